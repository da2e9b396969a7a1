//! Persistence port for playback state

use crate::error::Result;
use crate::types::Track;
use async_trait::async_trait;

/// Durable storage for the play queue and recent-play history
///
/// Both collections are rewritten wholesale on every mutation and loaded once
/// at startup.
#[async_trait]
pub trait PlaybackStore: Send + Sync {
    /// Load the persisted play queue (empty if nothing was saved)
    async fn load_queue(&self) -> Result<Vec<Track>>;

    /// Replace the persisted play queue
    async fn save_queue(&self, queue: &[Track]) -> Result<()>;

    /// Load the persisted recent history, most recent first
    async fn load_history(&self) -> Result<Vec<Track>>;

    /// Replace the persisted recent history, most recent first
    async fn save_history(&self, history: &[Track]) -> Result<()>;
}
