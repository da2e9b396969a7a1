//! Liked-track registry
//!
//! Local cache of the remote liked set. The remote service is the source of
//! truth: refreshes overwrite the cache wholesale and toggles apply whatever
//! the server answered.

use crate::error::{PlaybackError, Result};
use crate::events::PlaybackEvent;
use nebula_core::{LikeService, Track, TrackId};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{broadcast, RwLock};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

#[derive(Debug, Default)]
struct LikedState {
    ids: HashSet<TrackId>,
    /// Ordered as the remote list, new likes appended
    tracks: Vec<Track>,
}

impl LikedState {
    fn replace(&mut self, tracks: Vec<Track>) {
        self.ids = tracks.iter().map(|t| t.id.clone()).collect();
        self.tracks = tracks;
    }

    fn set(&mut self, track: &Track, liked: bool) {
        if liked {
            if self.ids.insert(track.id.clone()) {
                self.tracks.push(Track {
                    stream_url: None,
                    from_search: false,
                    ..track.clone()
                });
            }
        } else if self.ids.remove(&track.id) {
            self.tracks.retain(|t| t.id != track.id);
        }
    }
}

/// Cached liked set kept in step with the remote service
pub struct LikeRegistry {
    service: Arc<dyn LikeService>,
    state: RwLock<LikedState>,
    events: Option<broadcast::Sender<PlaybackEvent>>,
}

impl LikeRegistry {
    pub fn new(service: Arc<dyn LikeService>) -> Self {
        Self {
            service,
            state: RwLock::new(LikedState::default()),
            events: None,
        }
    }

    /// Publish [`PlaybackEvent::LikeChanged`] on `events` after each toggle
    #[must_use]
    pub fn with_events(mut self, events: broadcast::Sender<PlaybackEvent>) -> Self {
        self.events = Some(events);
        self
    }

    /// Replace the cached set with the remote list
    ///
    /// On failure the cache is left as it was. Returns the number of liked
    /// tracks.
    pub async fn refresh(&self) -> Result<usize> {
        let tracks: Vec<Track> = self
            .service
            .liked_tracks()
            .await?
            .into_iter()
            .filter(Track::has_id)
            .collect();

        let count = tracks.len();
        self.state.write().await.replace(tracks);
        debug!(count, "Refreshed liked tracks");
        Ok(count)
    }

    /// Toggle the liked flag for `track`
    ///
    /// Membership follows the server's answer, which is returned. On failure
    /// the cache is unchanged and the error is returned.
    pub async fn toggle(&self, track: &Track) -> Result<bool> {
        if !track.has_id() {
            return Err(PlaybackError::MissingTrackId);
        }

        let liked = self.service.toggle_like(track).await?;
        self.state.write().await.set(track, liked);

        info!(track_id = %track.id, liked, "Like toggled");
        if let Some(events) = &self.events {
            let _ = events.send(PlaybackEvent::LikeChanged {
                track_id: track.id.clone(),
                liked,
            });
        }
        Ok(liked)
    }

    pub async fn is_liked(&self, id: &TrackId) -> bool {
        self.state.read().await.ids.contains(id)
    }

    pub async fn liked_ids(&self) -> HashSet<TrackId> {
        self.state.read().await.ids.clone()
    }

    /// Liked tracks in remote order
    pub async fn liked_tracks(&self) -> Vec<Track> {
        self.state.read().await.tracks.clone()
    }

    /// Refresh in the background every `interval`
    ///
    /// The first refresh runs immediately. Failures are logged and retried
    /// on the next tick. Abort the returned handle to stop.
    pub fn spawn_refresh(self: &Arc<Self>, interval: Duration) -> JoinHandle<()> {
        let registry = Arc::clone(self);
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                if let Err(e) = registry.refresh().await {
                    warn!(error = %e, "Liked tracks refresh failed");
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use nebula_core::NebulaError;
    use std::sync::Mutex;

    /// Flips membership on each toggle, like the remote store does
    #[derive(Default)]
    struct FlippingLikes {
        liked: Mutex<Vec<Track>>,
        offline: std::sync::atomic::AtomicBool,
    }

    impl FlippingLikes {
        fn go_offline(&self) {
            self.offline.store(true, std::sync::atomic::Ordering::SeqCst);
        }

        fn check(&self) -> nebula_core::Result<()> {
            if self.offline.load(std::sync::atomic::Ordering::SeqCst) {
                Err(NebulaError::network("offline"))
            } else {
                Ok(())
            }
        }
    }

    #[async_trait]
    impl LikeService for FlippingLikes {
        async fn toggle_like(&self, track: &Track) -> nebula_core::Result<bool> {
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

        async fn liked_tracks(&self) -> nebula_core::Result<Vec<Track>> {
            self.check()?;
            Ok(self.liked.lock().unwrap().clone())
        }
    }

    fn track(id: &str) -> Track {
        Track::new(id, id, "Artist")
    }

    #[tokio::test]
    async fn double_toggle_restores_membership() {
        let registry = LikeRegistry::new(Arc::new(FlippingLikes::default()));
        let a = track("a");

        assert!(registry.toggle(&a).await.unwrap());
        assert!(registry.is_liked(&a.id).await);

        assert!(!registry.toggle(&a).await.unwrap());
        assert!(!registry.is_liked(&a.id).await);
        assert!(registry.liked_tracks().await.is_empty());
    }

    #[tokio::test]
    async fn refresh_overwrites_local_set() {
        let service = Arc::new(FlippingLikes::default());
        service.liked.lock().unwrap().extend([track("a"), track("b")]);
        let registry = LikeRegistry::new(service.clone());

        assert_eq!(registry.refresh().await.unwrap(), 2);
        assert!(registry.is_liked(&TrackId::new("a")).await);

        *service.liked.lock().unwrap() = vec![track("c")];
        registry.refresh().await.unwrap();

        let ids = registry.liked_ids().await;
        assert_eq!(ids, HashSet::from([TrackId::new("c")]));
    }

    #[tokio::test]
    async fn failed_toggle_leaves_set_unchanged() {
        let service = Arc::new(FlippingLikes::default());
        let registry = LikeRegistry::new(service.clone());
        registry.toggle(&track("a")).await.unwrap();

        service.go_offline();
        let result = registry.toggle(&track("a")).await;

        assert!(matches!(result, Err(PlaybackError::Service(_))));
        assert!(registry.is_liked(&TrackId::new("a")).await);
    }

    #[tokio::test]
    async fn toggle_requires_id() {
        let registry = LikeRegistry::new(Arc::new(FlippingLikes::default()));
        let result = registry.toggle(&Track::default()).await;
        assert!(matches!(result, Err(PlaybackError::MissingTrackId)));
    }

    #[tokio::test]
    async fn toggle_publishes_event() {
        let (tx, mut rx) = broadcast::channel(8);
        let registry = LikeRegistry::new(Arc::new(FlippingLikes::default())).with_events(tx);

        registry.toggle(&track("a")).await.unwrap();

        assert_eq!(
            rx.recv().await.unwrap(),
            PlaybackEvent::LikeChanged {
                track_id: TrackId::new("a"),
                liked: true
            }
        );
    }

    #[tokio::test]
    async fn liked_list_keeps_remote_order() {
        let service = Arc::new(FlippingLikes::default());
        service.liked.lock().unwrap().extend([track("b"), track("a")]);
        let registry = LikeRegistry::new(service);
        registry.refresh().await.unwrap();

        registry.toggle(&track("c")).await.unwrap();

        let ids: Vec<_> = registry
            .liked_tracks()
            .await
            .into_iter()
            .map(|t| t.id.to_string())
            .collect();
        assert_eq!(ids, ["b", "a", "c"]);
    }

    #[tokio::test(start_paused = true)]
    async fn background_refresh_picks_up_remote_changes() {
        let service = Arc::new(FlippingLikes::default());
        let registry = Arc::new(LikeRegistry::new(service.clone()));

        let handle = registry.spawn_refresh(Duration::from_secs(60));
        tokio::time::sleep(Duration::from_secs(1)).await;
        assert!(registry.liked_tracks().await.is_empty());

        service.liked.lock().unwrap().push(track("a"));
        tokio::time::sleep(Duration::from_secs(60)).await;
        assert!(registry.is_liked(&TrackId::new("a")).await);

        handle.abort();
    }
}
