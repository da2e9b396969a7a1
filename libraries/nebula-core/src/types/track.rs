/// Track domain type
use crate::types::TrackId;
use serde::{Deserialize, Deserializer, Serialize};
use std::hash::{Hash, Hasher};

/// A playable media item with display metadata
///
/// Field names on the wire follow the remote catalog (`videoId`, `thumbnail`,
/// `streamUrl`, `fromSearch`). Identity is the track id alone: two values with
/// the same id compare equal even if one carries a resolved stream URL.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Track {
    /// Catalog identifier
    #[serde(rename = "videoId", default, deserialize_with = "null_as_default")]
    pub id: TrackId,

    /// Track title
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,

    /// Artist name
    #[serde(default, deserialize_with = "null_as_default")]
    pub artist: String,

    /// Artwork URL
    #[serde(rename = "thumbnail", default, deserialize_with = "null_as_default")]
    pub thumbnail_url: String,

    /// Resolved playable URL, populated lazily
    #[serde(rename = "streamUrl", default, skip_serializing_if = "Option::is_none")]
    pub stream_url: Option<String>,

    /// Whether the track came from free-text search results
    #[serde(rename = "fromSearch", default, skip_serializing_if = "is_false")]
    pub from_search: bool,
}

impl Track {
    /// Create a new track with minimal metadata
    pub fn new(id: impl Into<TrackId>, title: impl Into<String>, artist: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            artist: artist.into(),
            ..Self::default()
        }
    }

    /// Set the artwork URL
    #[must_use]
    pub fn with_thumbnail(mut self, thumbnail_url: impl Into<String>) -> Self {
        self.thumbnail_url = thumbnail_url.into();
        self
    }

    /// Return a copy merged with its resolved stream URL
    #[must_use]
    pub fn with_stream_url(mut self, stream_url: impl Into<String>) -> Self {
        self.stream_url = Some(stream_url.into());
        self
    }

    /// Mark the track as coming from search results
    #[must_use]
    pub fn searched(mut self) -> Self {
        self.from_search = true;
        self
    }

    /// Whether the track carries a usable identifier
    pub fn has_id(&self) -> bool {
        !self.id.is_empty()
    }
}

impl PartialEq for Track {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Track {}

impl Hash for Track {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// Detailed metadata for a single track
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackDetails {
    /// Catalog identifier
    #[serde(rename = "videoId")]
    pub id: TrackId,

    /// Track title
    pub title: String,

    /// Artist name
    pub artist: String,

    /// Duration in seconds (0 when unknown)
    #[serde(default)]
    pub duration: u64,

    /// Artwork URL
    #[serde(rename = "thumbnail", default)]
    pub thumbnail_url: String,
}

impl From<TrackDetails> for Track {
    fn from(details: TrackDetails) -> Self {
        Track::new(details.id, details.title, details.artist).with_thumbnail(details.thumbnail_url)
    }
}

#[allow(clippy::trivially_copy_pass_by_ref)]
fn is_false(value: &bool) -> bool {
    !*value
}

// The catalog sends `null` for missing titles/artists.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
