/// Core error types for Nebula
use thiserror::Error;

/// Result type alias using `NebulaError`
pub type Result<T> = std::result::Result<T, NebulaError>;

/// Core error type for Nebula
#[derive(Error, Debug)]
pub enum NebulaError {
    /// Remote service could not be reached
    #[error("Network error: {0}")]
    Network(String),

    /// Remote service answered with an error
    #[error("Service error ({status}): {message}")]
    Service { status: u16, message: String },

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Storage-related errors
    #[error("Storage error: {0}")]
    Storage(String),
}

impl NebulaError {
    /// Create a network error
    pub fn network(msg: impl Into<String>) -> Self {
        Self::Network(msg.into())
    }

    /// Create a storage error
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}
