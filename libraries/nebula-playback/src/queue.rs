//! Play queue
//!
//! Ordered list of tracks with a pointer to the current one. The pointer is
//! re-derived after every structural change so that it always designates the
//! current track or nothing. When the current track is removed the queue
//! remembers its slot, so skipping continues from where playback was.

use crate::types::Direction;
use nebula_core::{Track, TrackId};

/// Ordered play queue
///
/// ```text
///   [0] Track A
///   [1] Track B   <- current_index = Some(1)
///   [2] Track C
/// ```
#[derive(Debug, Clone, Default)]
pub struct PlayQueue {
    tracks: Vec<Track>,
    current_index: Option<usize>,

    /// Slot the removed current track occupied; only set while
    /// `current_index` is `None`
    vacated: Option<usize>,
}

impl PlayQueue {
    /// Create new empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue restored from storage: no track is current yet
    pub fn from_tracks(tracks: Vec<Track>) -> Self {
        Self {
            tracks,
            current_index: None,
            vacated: None,
        }
    }

    /// Replace the contents and select `index`
    ///
    /// An out-of-range index selects nothing.
    pub fn replace(&mut self, tracks: Vec<Track>, index: usize) {
        self.current_index = (index < tracks.len()).then_some(index);
        self.vacated = None;
        self.tracks = tracks;
    }

    /// Point at the first entry for `id`, or at nothing if absent
    ///
    /// Keeps the pointer valid when the playing track changes before the
    /// queue itself is recomputed.
    pub fn follow(&mut self, id: &TrackId) {
        if self.current().is_some_and(|t| &t.id == id) {
            return;
        }
        self.current_index = self.position_of(id);
        self.vacated = None;
    }

    /// Append a track unless one with the same id is already queued
    ///
    /// Returns whether the track was added.
    pub fn add(&mut self, track: Track) -> bool {
        if self.position_of(&track.id).is_some() {
            return false;
        }
        self.tracks.push(track);
        true
    }

    /// Remove every entry with `id`
    ///
    /// The pointer is re-derived against the surviving entries: it follows
    /// the current track to its new position, or clears if the current track
    /// itself was removed. In that case the slot is kept for [`step`](Self::step).
    /// Returns whether anything was removed.
    pub fn remove(&mut self, id: &TrackId) -> bool {
        let before = self.tracks.len();
        let slot = self.current_index.or(self.vacated);
        let removed_before_slot = slot.map_or(0, |slot| {
            self.tracks[..slot.min(before)]
                .iter()
                .filter(|t| &t.id == id)
                .count()
        });
        let current_id = self.current().map(|t| t.id.clone());

        self.tracks.retain(|t| &t.id != id);
        if self.tracks.len() == before {
            return false;
        }

        self.current_index = current_id.and_then(|current| self.position_of(&current));
        self.vacated = match self.current_index {
            Some(_) => None,
            None => slot.map(|slot| slot - removed_before_slot),
        };
        true
    }

    /// Index a skip in `direction` lands on, if any
    ///
    /// With a current entry this is its neighbour. After the current track
    /// was removed, `Next` takes the entry that moved into its slot and
    /// `Previous` the one before it. A queue with no position at all (e.g.
    /// freshly restored) starts from the top on `Next`. The result may be
    /// past the end; callers check it against [`len`](Self::len).
    pub fn step(&self, direction: Direction) -> Option<usize> {
        match (direction, self.current_index, self.vacated) {
            (Direction::Next, Some(i), _) => Some(i + 1),
            (Direction::Previous, Some(i), _) => i.checked_sub(1),
            (Direction::Next, None, Some(slot)) => Some(slot),
            (Direction::Previous, None, Some(slot)) => slot.checked_sub(1),
            (Direction::Next, None, None) => Some(0),
            (Direction::Previous, None, None) => None,
        }
    }

    /// Empty the queue
    pub fn clear(&mut self) {
        self.tracks.clear();
        self.current_index = None;
        self.vacated = None;
    }

    /// Index of the first entry with `id`
    pub fn position_of(&self, id: &TrackId) -> Option<usize> {
        self.tracks.iter().position(|t| &t.id == id)
    }

    /// Current entry
    pub fn current(&self) -> Option<&Track> {
        self.current_index.and_then(|i| self.tracks.get(i))
    }

    /// Position of the current entry
    pub fn current_index(&self) -> Option<usize> {
        self.current_index
    }

    /// Get track at index
    pub fn get(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }

    /// All queued tracks in order
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// Total number of tracks in queue
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Check if queue is empty
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }
}
