//! Types for Nebula service requests and responses.

use nebula_core::Track;
use serde::Deserialize;
use std::time::Duration;

/// Default prefix turning a track id into the source media locator
pub const DEFAULT_SOURCE_LOCATOR_BASE: &str = "https://www.youtube.com/watch?v=";

/// Configuration for connecting to the Nebula services.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the backend (e.g., "http://127.0.0.1:8000")
    pub url: String,
    /// Prefix the track id is appended to when asking for a stream
    pub source_locator_base: String,
    /// Whole-request timeout
    pub timeout: Duration,
    /// Connection timeout
    pub connect_timeout: Duration,
}

impl ClientConfig {
    /// Create a new config with just the URL.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            source_locator_base: default_source_locator_base(),
            timeout: default_timeout(),
            connect_timeout: default_connect_timeout(),
        }
    }

    /// Source media locator for a track id
    pub fn source_locator(&self, track_id: &str) -> String {
        format!("{}{}", self.source_locator_base, track_id)
    }
}

fn default_source_locator_base() -> String {
    DEFAULT_SOURCE_LOCATOR_BASE.to_string()
}

// Stream extraction on the backend can take several seconds.
fn default_timeout() -> Duration {
    Duration::from_secs(30)
}

fn default_connect_timeout() -> Duration {
    Duration::from_secs(10)
}

/// Response from the stream endpoint.
///
/// The backend answers 200 in both cases: `url` on success, `error` otherwise.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StreamUrlResponse {
    /// Playable URL
    #[serde(default)]
    pub url: Option<String>,
    /// Failure description
    #[serde(default)]
    pub error: Option<String>,
}

/// Response from the like toggle endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct LikeResponse {
    /// Whether the track is liked after the toggle
    pub liked: bool,
    /// Human readable status
    #[serde(default)]
    pub message: Option<String>,
}

/// Response from the liked list endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LikedListResponse {
    /// Liked tracks in the order they were liked
    #[serde(default)]
    pub liked: Vec<Track>,
}

/// Response from the autoplay endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpNextResponse {
    /// Recommended follow-on tracks
    #[serde(default)]
    pub upnext: Vec<Track>,
}
