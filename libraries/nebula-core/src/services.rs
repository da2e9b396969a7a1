//! Remote collaborator traits
//!
//! The playback engine talks to the outside world only through these traits.
//! `nebula-client` implements them over HTTP; tests substitute in-memory fakes.

use crate::error::Result;
use crate::types::{Track, TrackDetails, TrackId};
use async_trait::async_trait;

/// Resolves a track identity to a playable network locator
#[async_trait]
pub trait StreamService: Send + Sync {
    /// Resolve a playable URL for the track
    ///
    /// Returns `Ok(None)` when the service answers but has no stream for the
    /// track (not found, extraction failed).
    async fn resolve_stream(&self, track_id: &TrackId) -> Result<Option<String>>;
}

/// Remote source of truth for liked tracks
#[async_trait]
pub trait LikeService: Send + Sync {
    /// Toggle the liked flag for a track
    ///
    /// The track's display metadata travels with the request because the
    /// remote store has no other source for it. Returns whether the track is
    /// liked after the toggle.
    async fn toggle_like(&self, track: &Track) -> Result<bool>;

    /// Fetch the full ordered list of liked tracks
    async fn liked_tracks(&self) -> Result<Vec<Track>>;
}

/// Server-generated follow-on recommendations
#[async_trait]
pub trait AutoplayService: Send + Sync {
    /// Ordered recommendations to play after the given track (possibly empty)
    async fn recommendations(&self, track_id: &TrackId) -> Result<Vec<Track>>;
}

/// Catalog lookups used by front ends
#[async_trait]
pub trait CatalogService: Send + Sync {
    /// Free-text search; every returned track is flagged as search-originated
    async fn search(&self, query: &str) -> Result<Vec<Track>>;

    /// Detailed metadata for a single track
    async fn track_info(&self, track_id: &TrackId) -> Result<TrackDetails>;
}
