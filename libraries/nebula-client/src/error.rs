//! Error types for the Nebula service client.

use nebula_core::NebulaError;
use thiserror::Error;

/// Errors that can occur when talking to the Nebula services.
#[derive(Error, Debug)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Server returned an error response
    #[error("Server error ({status}): {message}")]
    ServerError { status: u16, message: String },

    /// Invalid server URL
    #[error("Invalid server URL: {0}")]
    InvalidUrl(String),

    /// Failed to parse server response
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Server is offline or unreachable
    #[error("Server unreachable: {0}")]
    ServerUnreachable(String),

    /// Request needs a track id but none was given
    #[error("Track has no id")]
    MissingTrackId,
}

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;

impl From<ClientError> for NebulaError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::ServerError { status, message } => NebulaError::Service { status, message },
            ClientError::MissingTrackId => NebulaError::invalid_input("track has no id"),
            ClientError::InvalidUrl(msg) => NebulaError::invalid_input(msg),
            other => NebulaError::network(other.to_string()),
        }
    }
}
