//! In-memory `PlaybackStore`
//!
//! Used when no database is configured, and by tests.

use async_trait::async_trait;
use nebula_core::{PlaybackStore, Result, Track};
use tokio::sync::RwLock;

/// Playback state kept in memory for the lifetime of the process
#[derive(Debug, Default)]
pub struct MemoryPlaybackStore {
    queue: RwLock<Vec<Track>>,
    history: RwLock<Vec<Track>>,
}

impl MemoryPlaybackStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with a queue and history
    pub fn seeded(queue: Vec<Track>, history: Vec<Track>) -> Self {
        Self {
            queue: RwLock::new(queue),
            history: RwLock::new(history),
        }
    }
}

#[async_trait]
impl PlaybackStore for MemoryPlaybackStore {
    async fn load_queue(&self) -> Result<Vec<Track>> {
        Ok(self.queue.read().await.clone())
    }

    async fn save_queue(&self, queue: &[Track]) -> Result<()> {
        *self.queue.write().await = queue.to_vec();
        Ok(())
    }

    async fn load_history(&self) -> Result<Vec<Track>> {
        Ok(self.history.read().await.clone())
    }

    async fn save_history(&self, history: &[Track]) -> Result<()> {
        *self.history.write().await = history.to_vec();
        Ok(())
    }
}
