//! Error types for playback management

use nebula_core::NebulaError;
use thiserror::Error;

/// Playback errors
///
/// Most playback failures are absorbed with a fallback and reported through
/// [`PlayOutcome`](crate::PlayOutcome); only operations whose caller must
/// know about the failure (like toggles, refreshes) return these.
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// Operation needs a track id but the track has none
    #[error("Track has no id")]
    MissingTrackId,

    /// Remote collaborator failed
    #[error("Service error: {0}")]
    Service(#[from] NebulaError),
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
