//! Playback events
//!
//! Published by the controller on a broadcast channel so front ends can
//! follow state without polling. Events are emitted after the change they
//! describe has been committed.

use crate::sink::SinkState;
use nebula_core::{Track, TrackId};
use serde::Serialize;

/// Events emitted by the playback engine
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum PlaybackEvent {
    /// A new track became the current track
    TrackChanged {
        /// The new current track, merged with its stream URL
        track: Track,
    },

    /// Queue contents or current index changed
    QueueChanged {
        /// New queue length
        length: usize,
        /// Position of the current track, if it is queued
        current_index: Option<usize>,
    },

    /// Recent history changed
    HistoryChanged {
        /// History, most recent first
        tracks: Vec<Track>,
    },

    /// Audio sink moved to a new state
    StateChanged {
        /// The new sink state
        state: SinkState,
    },

    /// Periodic position report from the sink
    Progress {
        /// Current position in seconds
        position_secs: f64,
        /// Track duration in seconds, when known
        duration_secs: Option<f64>,
    },

    /// Liked flag changed for a track
    LikeChanged {
        /// Track whose flag changed
        track_id: TrackId,
        /// Whether the track is liked now
        liked: bool,
    },
}
