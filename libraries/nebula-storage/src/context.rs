//! `SQLite` implementation of `PlaybackStore`

use crate::error::Result;
use crate::{create_pool, queue, recent_history, run_migrations};
use async_trait::async_trait;
use nebula_core::{PlaybackStore, Track};
use sqlx::SqlitePool;

/// Playback state stored in a local `SQLite` database
#[derive(Clone)]
pub struct SqlitePlaybackStore {
    pool: SqlitePool,
}

impl SqlitePlaybackStore {
    /// Wrap an existing pool (migrations must already have run)
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Open the database at `database_url`, creating and migrating it as needed
    pub async fn open(database_url: &str) -> Result<Self> {
        let pool = create_pool(database_url).await?;
        run_migrations(&pool).await?;
        Ok(Self::new(pool))
    }

    /// Get the underlying pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl PlaybackStore for SqlitePlaybackStore {
    async fn load_queue(&self) -> nebula_core::Result<Vec<Track>> {
        Ok(queue::load(&self.pool).await?)
    }

    async fn save_queue(&self, tracks: &[Track]) -> nebula_core::Result<()> {
        Ok(queue::replace(&self.pool, tracks).await?)
    }

    async fn load_history(&self) -> nebula_core::Result<Vec<Track>> {
        Ok(recent_history::load(&self.pool).await?)
    }

    async fn save_history(&self, tracks: &[Track]) -> nebula_core::Result<()> {
        Ok(recent_history::replace(&self.pool, tracks).await?)
    }
}
