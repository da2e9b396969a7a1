//! Playback controller
//!
//! Single authority over what is playing and what plays next. Every play
//! request runs the same pipeline, strictly in order:
//!
//! 1. resolve the stream URL
//! 2. hand the URL to the audio sink and commit the current track
//! 3. record the play in recent history
//! 4. recompute the queue
//! 5. persist queue and history
//!
//! If resolution fails nothing after step 1 happens. Each request takes a
//! generation number; a request that finishes resolving after a newer one
//! was issued is dropped without touching the sink or history.
//!
//! The state lock is never held across a call into the sink or the store,
//! so either may call back into the controller.

use crate::events::PlaybackEvent;
use crate::history::RecentHistory;
use crate::likes::LikeRegistry;
use crate::queue::PlayQueue;
use crate::resolver::StreamResolver;
use crate::sink::{AudioSink, SinkEvent, SinkState};
use crate::types::{Direction, IgnoreReason, PlayOutcome, PlaybackConfig, PlaybackState};
use crate::upnext::{QueuePlan, QueuePolicy, UpNextEngine};
use crate::volume::Volume;
use nebula_core::{
    AutoplayService, LikeService, PlaybackStore, StreamService, Track, TrackId,
};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError};
use std::time::Duration;
use tokio::sync::{broadcast, Mutex};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

const EVENT_CHANNEL_CAPACITY: usize = 64;

/// External collaborators the controller drives
pub struct PlaybackServices {
    pub streams: Arc<dyn StreamService>,
    pub autoplay: Arc<dyn AutoplayService>,
    pub likes: Arc<dyn LikeService>,
    pub sink: Arc<dyn AudioSink>,
    pub store: Arc<dyn PlaybackStore>,
}

/// Where the queue for a play request comes from
enum QueueSource<'a> {
    /// Caller-supplied context, routed through the up-next policy
    Caller(Option<&'a [Track]>),

    /// Skip within the current queue; always a static-context play
    Queue { tracks: Vec<Track>, index: usize },
}

struct Inner {
    current: Option<Track>,
    queue: PlayQueue,
    history: RecentHistory,
    sink_state: SinkState,
    position_secs: f64,
    duration_secs: Option<f64>,
    volume: Volume,
    repeat: bool,

    /// Generation of the play that set `current`
    committed_generation: u64,
}

/// Orchestrates stream resolution, the audio sink, the queue and history
pub struct PlaybackController {
    resolver: StreamResolver,
    upnext: UpNextEngine,
    likes: Arc<LikeRegistry>,
    sink: Arc<dyn AudioSink>,
    store: Arc<dyn PlaybackStore>,
    config: PlaybackConfig,

    inner: Mutex<Inner>,

    /// Serializes store writes; each write snapshots state once it holds this
    persist_lock: Mutex<()>,

    /// Last generation handed out
    generation: AtomicU64,

    /// Background liked-set refresh, aborted on drop
    like_refresh: std::sync::Mutex<Option<JoinHandle<()>>>,

    events: broadcast::Sender<PlaybackEvent>,
}

impl PlaybackController {
    /// Create a controller with empty state
    ///
    /// Call [`restore`](Self::restore) to load persisted queue and history.
    pub fn new(services: PlaybackServices, config: PlaybackConfig) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        let volume = Volume::new(config.initial_volume);
        services.sink.set_volume(volume.level());

        let likes = LikeRegistry::new(services.likes).with_events(events.clone());

        Self {
            resolver: StreamResolver::from_config(services.streams, &config),
            upnext: UpNextEngine::new(services.autoplay),
            likes: Arc::new(likes),
            sink: services.sink,
            store: services.store,
            inner: Mutex::new(Inner {
                current: None,
                queue: PlayQueue::new(),
                history: RecentHistory::new(config.history_size),
                sink_state: SinkState::Idle,
                position_secs: 0.0,
                duration_secs: None,
                volume,
                repeat: config.repeat,
                committed_generation: 0,
            }),
            config,
            persist_lock: Mutex::new(()),
            generation: AtomicU64::new(0),
            like_refresh: std::sync::Mutex::new(None),
            events,
        }
    }

    /// Load the persisted queue and history
    ///
    /// Nothing is current after a restore. Storage failures are logged and
    /// leave the respective collection empty.
    pub async fn restore(&self) {
        let queue = self.store.load_queue().await.unwrap_or_else(|e| {
            warn!(error = %e, "Failed to load persisted queue");
            Vec::new()
        });
        let history = self.store.load_history().await.unwrap_or_else(|e| {
            warn!(error = %e, "Failed to load persisted history");
            Vec::new()
        });

        let mut inner = self.inner.lock().await;
        inner.current = None;
        inner.queue = PlayQueue::from_tracks(queue.into_iter().filter(Track::has_id).collect());
        inner.history = RecentHistory::from_tracks(history, self.config.history_size);

        info!(
            queue_len = inner.queue.len(),
            history_len = inner.history.len(),
            "Restored playback state"
        );
        self.emit_queue(&inner);
        self.emit(PlaybackEvent::HistoryChanged {
            tracks: inner.history.to_vec(),
        });
    }

    // ===== Playback Control =====

    /// Play `track`, using `context` to decide the queue
    ///
    /// A non-empty context without search results becomes the queue as is.
    /// Otherwise the queue is generated from autoplay recommendations.
    pub async fn play_track(&self, track: &Track, context: Option<&[Track]>) -> PlayOutcome {
        self.play(track, QueueSource::Caller(context)).await
    }

    /// Skip to the next or previous queued track
    ///
    /// Ignored when the target is outside the queue. After the current track
    /// was removed, skipping continues from its old slot. With no position at
    /// all (e.g. right after a restore), `Next` starts the queue from the top.
    pub async fn advance(&self, direction: Direction) -> PlayOutcome {
        let (tracks, target) = {
            let inner = self.inner.lock().await;
            (inner.queue.tracks().to_vec(), inner.queue.step(direction))
        };

        match target {
            Some(index) if index < tracks.len() => self.play_queue_entry(tracks, index).await,
            _ => {
                debug!(?direction, "Skip target out of range");
                PlayOutcome::Ignored(IgnoreReason::OutOfRange)
            }
        }
    }

    /// Play the queued track at `index`, keeping the queue as it is
    pub async fn play_queue_index(&self, index: usize) -> PlayOutcome {
        let tracks = self.inner.lock().await.queue.tracks().to_vec();
        if index >= tracks.len() {
            return PlayOutcome::Ignored(IgnoreReason::OutOfRange);
        }
        self.play_queue_entry(tracks, index).await
    }

    async fn play_queue_entry(&self, tracks: Vec<Track>, index: usize) -> PlayOutcome {
        let Some(track) = tracks.get(index).cloned() else {
            return PlayOutcome::Ignored(IgnoreReason::OutOfRange);
        };
        self.play(&track, QueueSource::Queue { tracks, index }).await
    }

    async fn play(&self, track: &Track, source: QueueSource<'_>) -> PlayOutcome {
        if !track.has_id() {
            debug!("Ignoring play request for track without id");
            return PlayOutcome::Ignored(IgnoreReason::MissingTrackId);
        }

        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        debug!(track_id = %track.id, generation, "Play requested");

        let Some(url) = self.resolver.resolve(&track.id).await else {
            warn!(track_id = %track.id, "No stream, play aborted");
            return PlayOutcome::Ignored(IgnoreReason::Unresolved);
        };

        let playing = track.clone().with_stream_url(url.clone());

        {
            let mut inner = self.inner.lock().await;
            if self.is_superseded(generation) {
                debug!(track_id = %track.id, generation, "Superseded before commit");
                return PlayOutcome::Ignored(IgnoreReason::Superseded);
            }

            self.sink.load(&url);
            let loading = inner.sink_state.on_load();
            self.set_sink_state(&mut inner, loading);
            inner.position_secs = 0.0;
            inner.duration_secs = None;

            inner.current = Some(playing.clone());
            inner.queue.follow(&playing.id);
            inner.committed_generation = generation;
            self.emit(PlaybackEvent::TrackChanged {
                track: playing.clone(),
            });

            inner.history.push(Track {
                stream_url: None,
                from_search: false,
                ..track.clone()
            });
            self.emit(PlaybackEvent::HistoryChanged {
                tracks: inner.history.to_vec(),
            });
        }

        // The sink may report back through `handle_sink_event` while starting
        if let Err(e) = self.sink.play().await {
            warn!(track_id = %track.id, error = %e, "Sink refused to start playback");
            self.resolver.invalidate(&track.id).await;
        }

        let plan = match source {
            QueueSource::Caller(context) => self.upnext.plan(&playing, context).await,
            QueueSource::Queue { tracks, index } => QueuePlan {
                tracks,
                index,
                policy: QueuePolicy::StaticContext,
            },
        };

        let (queue_applied, queue_len) = {
            let mut inner = self.inner.lock().await;
            let applied = inner.committed_generation == generation;
            if applied {
                inner.queue.replace(plan.tracks, plan.index);
                self.emit_queue(&inner);
            } else {
                debug!(track_id = %track.id, generation, "Newer play owns the queue");
            }
            (applied, inner.queue.len())
        };

        self.persist_history().await;
        if queue_applied {
            self.persist_queue().await;
        }

        info!(
            track_id = %track.id,
            generation,
            policy = ?plan.policy,
            queue_len,
            "Now playing"
        );
        PlayOutcome::Started
    }

    fn is_superseded(&self, generation: u64) -> bool {
        self.generation.load(Ordering::SeqCst) != generation
    }

    /// Feed a sink notification into the state machine
    ///
    /// On `Ended` the current track restarts when repeat is on, otherwise
    /// playback advances to the next queued track.
    pub async fn handle_sink_event(&self, event: SinkEvent) {
        let restart = {
            let mut inner = self.inner.lock().await;
            let next = inner.sink_state.on_event(&event);
            self.set_sink_state(&mut inner, next);

            if let SinkEvent::TimeUpdate { current, duration } = event {
                inner.position_secs = current;
                inner.duration_secs = (duration.is_finite() && duration > 0.0).then_some(duration);
                self.emit(PlaybackEvent::Progress {
                    position_secs: current,
                    duration_secs: inner.duration_secs,
                });
            }
            inner.repeat && inner.current.is_some()
        };

        if !matches!(event, SinkEvent::Ended) {
            return;
        }

        if restart {
            debug!("Repeating current track");
            self.sink.seek(Duration::ZERO);
            if let Err(e) = self.sink.play().await {
                warn!(error = %e, "Sink refused to restart playback");
            }
        } else {
            let outcome = self.advance(Direction::Next).await;
            debug!(?outcome, "Advanced after track ended");
        }
    }

    /// Pause when playing, otherwise start the current track
    pub async fn toggle_play(&self) {
        let (playing, loaded) = {
            let inner = self.inner.lock().await;
            (inner.sink_state.is_playing(), inner.current.is_some())
        };

        if playing {
            self.sink.pause();
        } else if loaded {
            if let Err(e) = self.sink.play().await {
                warn!(error = %e, "Sink refused to resume playback");
            }
        }
    }

    pub fn pause(&self) {
        self.sink.pause();
    }

    /// Seek within the current track
    pub async fn seek(&self, position: Duration) {
        if self.inner.lock().await.current.is_some() {
            self.sink.seek(position);
        }
    }

    /// Seek to `percent` (0-100) of the current track
    ///
    /// Needs a known duration; returns whether a seek was issued.
    pub async fn seek_percent(&self, percent: f64) -> bool {
        let duration = {
            let inner = self.inner.lock().await;
            match (&inner.current, inner.duration_secs) {
                (Some(_), Some(duration)) => duration,
                _ => return false,
            }
        };

        let fraction = if percent.is_nan() { 0.0 } else { percent.clamp(0.0, 100.0) / 100.0 };
        self.sink.seek(Duration::from_secs_f64(duration * fraction));
        true
    }

    // ===== Settings =====

    pub async fn set_repeat(&self, repeat: bool) {
        self.inner.lock().await.repeat = repeat;
    }

    pub async fn repeat(&self) -> bool {
        self.inner.lock().await.repeat
    }

    /// Set output volume, clamped to `[0, 1]`
    pub async fn set_volume(&self, level: f32) -> Volume {
        let volume = Volume::new(level);
        self.inner.lock().await.volume = volume;
        self.sink.set_volume(volume.level());
        volume
    }

    pub async fn volume(&self) -> Volume {
        self.inner.lock().await.volume
    }

    // ===== Queue Management =====

    /// Append `track` unless it is already queued
    pub async fn add_to_queue(&self, track: &Track) -> bool {
        if !track.has_id() {
            return false;
        }

        let added = {
            let mut inner = self.inner.lock().await;
            let added = inner.queue.add(Track {
                stream_url: None,
                ..track.clone()
            });
            if added {
                self.emit_queue(&inner);
            }
            added
        };
        if added {
            debug!(track_id = %track.id, "Added to queue");
            self.persist_queue().await;
        }
        added
    }

    /// Remove `id` from the queue, keeping the current-track pointer valid
    pub async fn remove_from_queue(&self, id: &TrackId) -> bool {
        let removed = {
            let mut inner = self.inner.lock().await;
            let removed = inner.queue.remove(id);
            if removed {
                self.emit_queue(&inner);
            }
            removed
        };
        if removed {
            debug!(track_id = %id, "Removed from queue");
            self.persist_queue().await;
        }
        removed
    }

    pub async fn clear_queue(&self) {
        {
            let mut inner = self.inner.lock().await;
            inner.queue.clear();
            self.emit_queue(&inner);
        }
        self.persist_queue().await;
    }

    // ===== State Queries =====

    /// Snapshot of current track, queue and index
    pub async fn state(&self) -> PlaybackState {
        let inner = self.inner.lock().await;
        PlaybackState {
            current_track: inner.current.clone(),
            queue: inner.queue.tracks().to_vec(),
            current_index: inner.queue.current_index(),
        }
    }

    /// Recent history, most recent first
    pub async fn history(&self) -> Vec<Track> {
        self.inner.lock().await.history.to_vec()
    }

    pub async fn sink_state(&self) -> SinkState {
        self.inner.lock().await.sink_state
    }

    /// Last reported position and duration, in seconds
    pub async fn progress(&self) -> (f64, Option<f64>) {
        let inner = self.inner.lock().await;
        (inner.position_secs, inner.duration_secs)
    }

    // ===== Likes =====

    /// Refresh the liked set every `like_refresh_interval_secs`
    ///
    /// Must be called inside a tokio runtime. Replaces a refresh started
    /// earlier; an interval of 0 only stops it. Returns whether a refresh
    /// task is running.
    pub fn start_like_refresh(&self) -> bool {
        let secs = self.config.like_refresh_interval_secs;
        let mut slot = self.like_refresh.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(previous) = slot.take() {
            previous.abort();
        }
        if secs == 0 {
            return false;
        }

        debug!(interval_secs = secs, "Starting liked tracks refresh");
        *slot = Some(self.likes.spawn_refresh(Duration::from_secs(secs)));
        true
    }

    pub fn stop_like_refresh(&self) {
        let handle = self
            .like_refresh
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(handle) = handle {
            handle.abort();
        }
    }

    pub fn likes(&self) -> &Arc<LikeRegistry> {
        &self.likes
    }

    pub fn resolver(&self) -> &StreamResolver {
        &self.resolver
    }

    pub fn config(&self) -> &PlaybackConfig {
        &self.config
    }

    // ===== Events =====

    /// Receive playback events from now on
    pub fn subscribe(&self) -> broadcast::Receiver<PlaybackEvent> {
        self.events.subscribe()
    }

    fn emit(&self, event: PlaybackEvent) {
        // No receivers is fine
        let _ = self.events.send(event);
    }

    fn emit_queue(&self, inner: &Inner) {
        self.emit(PlaybackEvent::QueueChanged {
            length: inner.queue.len(),
            current_index: inner.queue.current_index(),
        });
    }

    fn set_sink_state(&self, inner: &mut Inner, state: SinkState) {
        if inner.sink_state != state {
            inner.sink_state = state;
            self.emit(PlaybackEvent::StateChanged { state });
        }
    }

    // ===== Persistence =====

    // Snapshots are taken after acquiring `persist_lock`, so the last write
    // always carries the latest state.

    async fn persist_queue(&self) {
        let _writer = self.persist_lock.lock().await;
        let queue = self.inner.lock().await.queue.tracks().to_vec();
        if let Err(e) = self.store.save_queue(&queue).await {
            warn!(error = %e, "Failed to persist queue");
        }
    }

    async fn persist_history(&self) {
        let _writer = self.persist_lock.lock().await;
        let history = self.inner.lock().await.history.to_vec();
        if let Err(e) = self.store.save_history(&history).await {
            warn!(error = %e, "Failed to persist history");
        }
    }
}

impl Drop for PlaybackController {
    fn drop(&mut self) {
        let handle = self
            .like_refresh
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(handle) = handle {
            handle.abort();
        }
    }
}
