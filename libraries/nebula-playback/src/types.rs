//! Core types for playback management

use nebula_core::Track;
use serde::{Deserialize, Serialize};

/// Snapshot of what is playing and what plays next
///
/// `current_index` is `None` when nothing in the queue is current (the
/// queue is empty, or the playing track is not part of it). When it is
/// `Some(i)`, `queue[i]` is the current track.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlaybackState {
    /// Track currently loaded in the sink, merged with its stream URL
    pub current_track: Option<Track>,

    /// Ordered play queue
    pub queue: Vec<Track>,

    /// Position of the current track within `queue`
    pub current_index: Option<usize>,
}

impl PlaybackState {
    /// Whether `queue[current_index]` is the current track
    pub fn is_consistent(&self) -> bool {
        match (self.current_index, &self.current_track) {
            (None, _) => true,
            (Some(i), Some(current)) => self.queue.get(i).is_some_and(|t| t.id == current.id),
            (Some(_), None) => false,
        }
    }
}

/// Skip direction for [`advance`](crate::PlaybackController::advance)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    /// Following track in the queue
    Next,

    /// Preceding track in the queue
    Previous,
}

/// Result of a play request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayOutcome {
    /// Track handed to the sink and committed as now playing
    Started,

    /// Nothing changed
    Ignored(IgnoreReason),
}

impl PlayOutcome {
    /// Whether the request started playback
    pub fn is_started(self) -> bool {
        matches!(self, PlayOutcome::Started)
    }
}

/// Why a play request left state untouched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// Track has no id
    MissingTrackId,

    /// No stream URL could be resolved
    Unresolved,

    /// A newer play request was issued while this one was resolving
    Superseded,

    /// Skip target is outside the queue
    OutOfRange,
}

/// Configuration for the playback engine
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    /// Recent history capacity (default: 10)
    pub history_size: usize,

    /// Maximum resolved stream URLs kept in memory (default: 256)
    pub stream_cache_capacity: usize,

    /// Seconds a resolved stream URL stays valid (default: 1800, `None` = forever)
    pub stream_cache_ttl_secs: Option<u64>,

    /// Seconds between background liked-set refreshes (default: 300)
    pub like_refresh_interval_secs: u64,

    /// Initial volume in `[0, 1]` (default: 1.0)
    pub initial_volume: f32,

    /// Initial repeat flag (default: false)
    pub repeat: bool,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            history_size: 10,
            stream_cache_capacity: 256,
            stream_cache_ttl_secs: Some(30 * 60),
            like_refresh_interval_secs: 300,
            initial_volume: 1.0,
            repeat: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = PlaybackConfig::default();
        assert_eq!(config.history_size, 10);
        assert_eq!(config.stream_cache_capacity, 256);
        assert_eq!(config.stream_cache_ttl_secs, Some(1800));
        assert_eq!(config.initial_volume, 1.0);
        assert!(!config.repeat);
    }

    #[test]
    fn consistency_check() {
        let a = Track::new("a", "A", "X");
        let b = Track::new("b", "B", "X");

        let mut state = PlaybackState {
            current_track: Some(b.clone()),
            queue: vec![a.clone(), b.clone()],
            current_index: Some(1),
        };
        assert!(state.is_consistent());

        state.current_index = Some(0);
        assert!(!state.is_consistent());

        state.current_index = Some(5);
        assert!(!state.is_consistent());

        state.current_index = None;
        assert!(state.is_consistent());
    }
}
