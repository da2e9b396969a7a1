//! Nebula Storage
//!
//! `SQLite` persistence for the two pieces of playback state that survive a
//! restart: the play queue and the recent-play history.
//!
//! # Architecture
//!
//! - **Wholesale rewrites**: every save replaces the stored collection in
//!   one transaction, so a crash never leaves half a queue behind
//! - **Vertical Slicing**: each table owns its own queries
//! - **Tolerant loads**: rows that no longer decode are skipped with a warning
//!
//! # Example
//!
//! ```rust,no_run
//! use nebula_core::{PlaybackStore, Track};
//! use nebula_storage::SqlitePlaybackStore;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = SqlitePlaybackStore::open("sqlite://nebula.db").await?;
//!
//! store.save_queue(&[Track::new("dQw4w9WgXcQ", "Never Gonna Give You Up", "Rick Astley")]).await?;
//! let queue = store.load_queue().await?;
//! # Ok(())
//! # }
//! ```

mod context;
mod error;
mod memory;

// Vertical slices
pub mod queue;
pub mod recent_history;

pub use context::SqlitePlaybackStore;
pub use error::{Result, StorageError};
pub use memory::MemoryPlaybackStore;

use sqlx::migrate::Migrator;
use sqlx::sqlite::SqlitePool;

// Embed migrations into binary
static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Run database migrations
///
/// Call once at startup, before the first query.
pub async fn run_migrations(pool: &SqlitePool) -> std::result::Result<(), sqlx::migrate::MigrateError> {
    MIGRATOR.run(pool).await
}

/// Create a new `SQLite` pool
///
/// # Arguments
///
/// * `database_url` - `SQLite` connection string (e.g., `<sqlite://nebula.db>`)
pub async fn create_pool(database_url: &str) -> std::result::Result<SqlitePool, sqlx::Error> {
    use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
    use std::str::FromStr;

    tracing::debug!(database_url, "Creating SQLite pool");

    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(std::time::Duration::from_secs(30));

    SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await
}
