/// CLI error types
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Service error: {0}")]
    Client(#[from] nebula_client::ClientError),

    #[error("Storage error: {0}")]
    Storage(#[from] nebula_storage::StorageError),

    #[error("Playback error: {0}")]
    Playback(#[from] nebula_playback::PlaybackError),

    #[error("Track not playable: {0}")]
    NotPlayable(String),
}

impl From<config::ConfigError> for CliError {
    fn from(err: config::ConfigError) -> Self {
        CliError::Config(err.to_string())
    }
}
