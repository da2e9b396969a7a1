//! Stream resolution with memoization
//!
//! Maps a track id to a playable URL. Results are kept in a bounded LRU
//! cache whose entries expire after a configurable TTL, and concurrent
//! requests for the same id share one in-flight lookup.

use crate::types::PlaybackConfig;
use futures_util::future::{BoxFuture, FutureExt, Shared};
use lru::LruCache;
use nebula_core::{StreamService, TrackId};
use std::collections::HashMap;
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tracing::{debug, warn};

type PendingResolve = Shared<BoxFuture<'static, Option<String>>>;

struct CachedStream {
    url: String,
    resolved_at: Instant,
}

/// Bounded cache of resolved stream URLs
struct StreamCache {
    entries: LruCache<TrackId, CachedStream>,
    ttl: Option<Duration>,
}

impl StreamCache {
    fn new(capacity: usize, ttl: Option<Duration>) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: LruCache::new(capacity),
            ttl,
        }
    }

    /// Live entry for `id`; expired entries are evicted on access
    fn get(&mut self, id: &TrackId) -> Option<String> {
        let expired = match self.entries.get(id) {
            Some(entry) => self
                .ttl
                .is_some_and(|ttl| entry.resolved_at.elapsed() >= ttl),
            None => return None,
        };

        if expired {
            self.entries.pop(id);
            return None;
        }
        self.entries.get(id).map(|entry| entry.url.clone())
    }

    fn put(&mut self, id: TrackId, url: String) {
        self.entries.put(
            id,
            CachedStream {
                url,
                resolved_at: Instant::now(),
            },
        );
    }
}

/// Memoizing stream resolver
///
/// Negative results are never cached, so a later request always retries.
pub struct StreamResolver {
    service: Arc<dyn StreamService>,
    cache: Mutex<StreamCache>,
    in_flight: Mutex<HashMap<TrackId, PendingResolve>>,
}

impl StreamResolver {
    /// Create a resolver with explicit cache bounds
    pub fn new(service: Arc<dyn StreamService>, capacity: usize, ttl: Option<Duration>) -> Self {
        Self {
            service,
            cache: Mutex::new(StreamCache::new(capacity, ttl)),
            in_flight: Mutex::new(HashMap::new()),
        }
    }

    /// Create a resolver sized from playback configuration
    pub fn from_config(service: Arc<dyn StreamService>, config: &PlaybackConfig) -> Self {
        Self::new(
            service,
            config.stream_cache_capacity,
            config.stream_cache_ttl_secs.map(Duration::from_secs),
        )
    }

    /// Resolve a playable URL for `id`
    ///
    /// Returns `None` when the id is empty, the service has no stream, or
    /// the request fails.
    pub async fn resolve(&self, id: &TrackId) -> Option<String> {
        if id.is_empty() {
            return None;
        }

        if let Some(url) = self.cache.lock().await.get(id) {
            debug!(track_id = %id, "Stream cache hit");
            return Some(url);
        }

        let pending = {
            let mut in_flight = self.in_flight.lock().await;

            // A lookup may have landed between the first check and this lock.
            if let Some(url) = self.cache.lock().await.get(id) {
                return Some(url);
            }

            in_flight
                .entry(id.clone())
                .or_insert_with(|| self.fetch(id.clone()))
                .clone()
        };

        let resolved = pending.clone().await;

        let mut in_flight = self.in_flight.lock().await;
        if let Some(url) = &resolved {
            self.cache.lock().await.put(id.clone(), url.clone());
        }
        if in_flight.get(id).is_some_and(|p| p.ptr_eq(&pending)) {
            in_flight.remove(id);
        }

        resolved
    }

    /// Cached URL for `id`, without touching the network
    pub async fn cached(&self, id: &TrackId) -> Option<String> {
        self.cache.lock().await.get(id)
    }

    /// Drop the cached URL for `id` (e.g. after the sink rejected it)
    pub async fn invalidate(&self, id: &TrackId) {
        self.cache.lock().await.entries.pop(id);
    }

    /// Number of cached URLs, including ones not yet evicted after expiry
    pub async fn cache_len(&self) -> usize {
        self.cache.lock().await.entries.len()
    }

    fn fetch(&self, id: TrackId) -> PendingResolve {
        let service = Arc::clone(&self.service);
        async move {
            debug!(track_id = %id, "Resolving stream");
            match service.resolve_stream(&id).await {
                Ok(Some(url)) if !url.is_empty() => Some(url),
                Ok(_) => {
                    warn!(track_id = %id, "No stream available");
                    None
                }
                Err(e) => {
                    warn!(track_id = %id, error = %e, "Stream resolution failed");
                    None
                }
            }
        }
        .boxed()
        .shared()
    }
}
