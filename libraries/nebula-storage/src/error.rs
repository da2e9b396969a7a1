//! Errors raised by the playback store
use thiserror::Error;

/// Result type for storage operations
pub type Result<T> = std::result::Result<T, StorageError>;

#[derive(Error, Debug)]
pub enum StorageError {
    /// Schema could not be brought up to date
    #[error("Migration failed: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// A track could not be encoded for storage
    #[error("Track encoding failed: {0}")]
    Encoding(#[from] serde_json::Error),

    /// Query or connection failure
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

impl From<StorageError> for nebula_core::NebulaError {
    fn from(err: StorageError) -> Self {
        Self::storage(err.to_string())
    }
}
