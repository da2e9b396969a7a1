//! Recent-play history
//!
//! Bounded, most-recent-first list of played tracks, deduplicated by id

use nebula_core::Track;
use std::collections::VecDeque;

/// Recent-play history with bounded size
///
/// Re-playing a track moves it to the front instead of adding a duplicate.
/// When full, the oldest entry is discarded.
#[derive(Debug, Clone)]
pub struct RecentHistory {
    /// History buffer (most recent = front)
    tracks: VecDeque<Track>,

    /// Maximum history size
    max_size: usize,
}

impl RecentHistory {
    /// Create new history with specified maximum size
    pub fn new(max_size: usize) -> Self {
        Self {
            tracks: VecDeque::with_capacity(max_size),
            max_size,
        }
    }

    /// Rebuild history from persisted tracks (most recent first)
    ///
    /// Duplicates and entries beyond `max_size` are dropped.
    pub fn from_tracks(tracks: impl IntoIterator<Item = Track>, max_size: usize) -> Self {
        let mut history = Self::new(max_size);
        for track in tracks {
            if history.tracks.len() >= max_size {
                break;
            }
            if !history.contains(&track) {
                history.tracks.push_back(track);
            }
        }
        history
    }

    /// Record a play
    pub fn push(&mut self, track: Track) {
        if self.max_size == 0 {
            return;
        }
        self.tracks.retain(|t| t.id != track.id);
        self.tracks.push_front(track);
        self.tracks.truncate(self.max_size);
    }

    /// Most recently played track
    pub fn latest(&self) -> Option<&Track> {
        self.tracks.front()
    }

    /// All tracks, most recent first
    pub fn to_vec(&self) -> Vec<Track> {
        self.tracks.iter().cloned().collect()
    }

    /// Iterate most recent first
    pub fn iter(&self) -> impl Iterator<Item = &Track> {
        self.tracks.iter()
    }

    /// Get number of tracks in history
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Check if history is empty
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Get maximum history size
    pub fn max_size(&self) -> usize {
        self.max_size
    }

    fn contains(&self, track: &Track) -> bool {
        self.tracks.iter().any(|t| t.id == track.id)
    }
}

impl Default for RecentHistory {
    fn default() -> Self {
        Self::new(10)
    }
}
