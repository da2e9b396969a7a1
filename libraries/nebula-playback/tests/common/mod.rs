//! Shared fakes for playback integration tests
//!
//! In-memory stand-ins for the remote services, the audio sink and the
//! store. Delays use `tokio::time::sleep` so tests can run with paused time.

#![allow(dead_code)]

use async_trait::async_trait;
use nebula_core::{
    AutoplayService, LikeService, NebulaError, PlaybackStore, Result, StreamService, Track,
    TrackId,
};
use nebula_playback::{
    AudioSink, PlaybackConfig, PlaybackController, PlaybackServices, SinkEvent,
};
use nebula_storage::MemoryPlaybackStore;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, OnceLock, Weak};
use std::time::Duration;

pub fn track(id: &str) -> Track {
    Track::new(id, format!("Title {id}"), "Artist").with_thumbnail(format!("https://img.test/{id}"))
}

pub fn tracks(ids: &[&str]) -> Vec<Track> {
    ids.iter().map(|id| track(id)).collect()
}

pub fn ids(tracks: &[Track]) -> Vec<String> {
    tracks.iter().map(|t| t.id.to_string()).collect()
}

pub fn stream_url(id: &str) -> String {
    format!("https://cdn.test/{id}")
}

// ===== Stream service =====

/// Resolves every id to `https://cdn.test/<id>` unless marked missing
#[derive(Default)]
pub struct FakeStreams {
    missing: Mutex<HashSet<String>>,
    delays: Mutex<HashMap<String, Duration>>,
    calls: AtomicUsize,
}

impl FakeStreams {
    pub fn mark_missing(&self, id: &str) {
        self.missing.lock().unwrap().insert(id.to_string());
    }

    pub fn delay(&self, id: &str, delay: Duration) {
        self.delays.lock().unwrap().insert(id.to_string(), delay);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl StreamService for FakeStreams {
    async fn resolve_stream(&self, track_id: &TrackId) -> Result<Option<String>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let delay = self.delays.lock().unwrap().get(track_id.as_str()).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        if self.missing.lock().unwrap().contains(track_id.as_str()) {
            return Ok(None);
        }
        Ok(Some(stream_url(track_id.as_str())))
    }
}

// ===== Autoplay service =====

/// Returns preset recommendations per id (empty when none were set)
#[derive(Default)]
pub struct FakeAutoplay {
    recommendations: Mutex<HashMap<String, Vec<Track>>>,
    delays: Mutex<HashMap<String, Duration>>,
    failing: AtomicBool,
    requests: Mutex<Vec<String>>,
}

impl FakeAutoplay {
    pub fn recommend(&self, id: &str, ids: &[&str]) {
        self.recommendations
            .lock()
            .unwrap()
            .insert(id.to_string(), tracks(ids));
    }

    pub fn delay(&self, id: &str, delay: Duration) {
        self.delays.lock().unwrap().insert(id.to_string(), delay);
    }

    pub fn fail(&self) {
        self.failing.store(true, Ordering::SeqCst);
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl AutoplayService for FakeAutoplay {
    async fn recommendations(&self, track_id: &TrackId) -> Result<Vec<Track>> {
        self.requests.lock().unwrap().push(track_id.to_string());
        let delay = self.delays.lock().unwrap().get(track_id.as_str()).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        if self.failing.load(Ordering::SeqCst) {
            return Err(NebulaError::network("autoplay unavailable"));
        }
        Ok(self
            .recommendations
            .lock()
            .unwrap()
            .get(track_id.as_str())
            .cloned()
            .unwrap_or_default())
    }
}

// ===== Like service =====

/// Remote like store that flips membership on every toggle
#[derive(Default)]
pub struct FakeLikes {
    liked: Mutex<Vec<Track>>,
    offline: AtomicBool,
}

impl FakeLikes {
    pub fn seed(&self, tracks: Vec<Track>) {
        *self.liked.lock().unwrap() = tracks;
    }

    pub fn go_offline(&self) {
        self.offline.store(true, Ordering::SeqCst);
    }

    fn check(&self) -> Result<()> {
        if self.offline.load(Ordering::SeqCst) {
            Err(NebulaError::network("offline"))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl LikeService for FakeLikes {
    async fn toggle_like(&self, track: &Track) -> Result<bool> {
        self.check()?;
        let mut liked = self.liked.lock().unwrap();
        if liked.iter().any(|t| t.id == track.id) {
            liked.retain(|t| t.id != track.id);
            Ok(false)
        } else {
            liked.push(track.clone());
            Ok(true)
        }
    }

    async fn liked_tracks(&self) -> Result<Vec<Track>> {
        self.check()?;
        Ok(self.liked.lock().unwrap().clone())
    }
}

// ===== Audio sink =====

#[derive(Debug, Clone, PartialEq)]
pub enum SinkCall {
    Load(String),
    Play,
    Pause,
    Seek(Duration),
    Volume(f32),
}

/// Records every instruction it receives
#[derive(Default)]
pub struct RecordingSink {
    calls: Mutex<Vec<SinkCall>>,
    refuse_play: AtomicBool,
}

impl RecordingSink {
    pub fn calls(&self) -> Vec<SinkCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn loads(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                SinkCall::Load(url) => Some(url),
                _ => None,
            })
            .collect()
    }

    pub fn refuse_play(&self) {
        self.refuse_play.store(true, Ordering::SeqCst);
    }

    pub fn reset(&self) {
        self.calls.lock().unwrap().clear();
    }

    fn record(&self, call: SinkCall) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl AudioSink for RecordingSink {
    fn load(&self, url: &str) {
        self.record(SinkCall::Load(url.to_string()));
    }

    async fn play(&self) -> Result<()> {
        self.record(SinkCall::Play);
        if self.refuse_play.load(Ordering::SeqCst) {
            return Err(NebulaError::invalid_input("autoplay blocked"));
        }
        Ok(())
    }

    fn pause(&self) {
        self.record(SinkCall::Pause);
    }

    fn seek(&self, position: Duration) {
        self.record(SinkCall::Seek(position));
    }

    fn set_volume(&self, volume: f32) {
        self.record(SinkCall::Volume(volume));
    }
}

/// Reports its own `Play` back into the controller from inside `play()`,
/// the way a platform sink delivers callbacks
#[derive(Default)]
pub struct ReportingSink {
    controller: OnceLock<Weak<PlaybackController>>,
}

impl ReportingSink {
    pub fn attach(&self, controller: &Arc<PlaybackController>) {
        let _ = self.controller.set(Arc::downgrade(controller));
    }
}

#[async_trait]
impl AudioSink for ReportingSink {
    fn load(&self, _url: &str) {}

    async fn play(&self) -> Result<()> {
        let controller = self.controller.get().and_then(Weak::upgrade);
        if let Some(controller) = controller {
            controller.handle_sink_event(SinkEvent::Play).await;
        }
        Ok(())
    }

    fn pause(&self) {}

    fn seek(&self, _position: Duration) {}

    fn set_volume(&self, _volume: f32) {}
}

// ===== Store =====

/// Store whose every operation fails
pub struct BrokenStore;

#[async_trait]
impl PlaybackStore for BrokenStore {
    async fn load_queue(&self) -> Result<Vec<Track>> {
        Err(NebulaError::storage("disk on fire"))
    }

    async fn save_queue(&self, _queue: &[Track]) -> Result<()> {
        Err(NebulaError::storage("disk on fire"))
    }

    async fn load_history(&self) -> Result<Vec<Track>> {
        Err(NebulaError::storage("disk on fire"))
    }

    async fn save_history(&self, _history: &[Track]) -> Result<()> {
        Err(NebulaError::storage("disk on fire"))
    }
}

// ===== Harness =====

pub struct Harness {
    pub controller: PlaybackController,
    pub streams: Arc<FakeStreams>,
    pub autoplay: Arc<FakeAutoplay>,
    pub likes: Arc<FakeLikes>,
    pub sink: Arc<RecordingSink>,
    pub store: Arc<MemoryPlaybackStore>,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_store(Arc::new(MemoryPlaybackStore::new()))
    }

    pub fn with_store(store: Arc<MemoryPlaybackStore>) -> Self {
        let streams = Arc::new(FakeStreams::default());
        let autoplay = Arc::new(FakeAutoplay::default());
        let likes = Arc::new(FakeLikes::default());
        let sink = Arc::new(RecordingSink::default());

        let controller = PlaybackController::new(
            PlaybackServices {
                streams: streams.clone(),
                autoplay: autoplay.clone(),
                likes: likes.clone(),
                sink: sink.clone(),
                store: store.clone(),
            },
            PlaybackConfig::default(),
        );
        sink.reset();

        Self {
            controller,
            streams,
            autoplay,
            likes,
            sink,
            store,
        }
    }

    /// Controller over `sink`, with fresh fakes for everything else
    pub fn controller_with_sink(sink: Arc<dyn AudioSink>) -> PlaybackController {
        PlaybackController::new(
            PlaybackServices {
                streams: Arc::new(FakeStreams::default()),
                autoplay: Arc::new(FakeAutoplay::default()),
                likes: Arc::new(FakeLikes::default()),
                sink,
                store: Arc::new(MemoryPlaybackStore::new()),
            },
            PlaybackConfig::default(),
        )
    }

    /// Controller over `store`, with fresh fakes for everything else
    pub fn controller_with_store(store: Arc<dyn PlaybackStore>) -> PlaybackController {
        PlaybackController::new(
            PlaybackServices {
                streams: Arc::new(FakeStreams::default()),
                autoplay: Arc::new(FakeAutoplay::default()),
                likes: Arc::new(FakeLikes::default()),
                sink: Arc::new(RecordingSink::default()),
                store,
            },
            PlaybackConfig::default(),
        )
    }
}
