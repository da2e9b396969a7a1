//! Catalog endpoints: search, track details, autoplay.

use crate::client::{read_json, send_error};
use crate::error::{ClientError, Result};
use crate::types::UpNextResponse;
use nebula_core::{Track, TrackDetails, TrackId};
use reqwest::Client;
use tracing::debug;

/// Catalog client for the Nebula backend.
pub struct CatalogClient<'a> {
    http: &'a Client,
    base_url: &'a str,
}

impl<'a> CatalogClient<'a> {
    pub(crate) fn new(http: &'a Client, base_url: &'a str) -> Self {
        Self { http, base_url }
    }

    /// Search tracks by free text.
    ///
    /// Results are flagged as search-originated so the playback engine never
    /// treats them as a stable play order.
    pub async fn search(&self, query: &str) -> Result<Vec<Track>> {
        let url = format!("{}/search", self.base_url);
        debug!(url = %url, query = %query, "Searching tracks");

        let response = self
            .http
            .get(&url)
            .query(&[("q", query)])
            .send()
            .await
            .map_err(send_error)?;

        let tracks: Vec<Track> = read_json(response, "search").await?;
        let tracks: Vec<Track> = tracks
            .into_iter()
            .filter(Track::has_id)
            .map(Track::searched)
            .collect();

        debug!(results = tracks.len(), "Search complete");
        Ok(tracks)
    }

    /// Get detailed metadata for a single track.
    pub async fn get_track_info(&self, track_id: &TrackId) -> Result<TrackDetails> {
        if track_id.is_empty() {
            return Err(ClientError::MissingTrackId);
        }

        let url = format!("{}/track_info", self.base_url);
        debug!(url = %url, track_id = %track_id, "Fetching track info");

        let response = self
            .http
            .get(&url)
            .query(&[("video_id", track_id.as_str())])
            .send()
            .await
            .map_err(send_error)?;

        read_json(response, "track info").await
    }

    /// Get autoplay recommendations to follow a track.
    pub async fn get_up_next(&self, track_id: &TrackId) -> Result<Vec<Track>> {
        if track_id.is_empty() {
            return Err(ClientError::MissingTrackId);
        }

        let url = format!("{}/autoplay/upnext", self.base_url);
        debug!(url = %url, track_id = %track_id, "Fetching up next");

        let response = self
            .http
            .get(&url)
            .query(&[("videoId", track_id.as_str())])
            .send()
            .await
            .map_err(send_error)?;

        let body: UpNextResponse = read_json(response, "up next").await?;
        let tracks: Vec<Track> = body.upnext.into_iter().filter(Track::has_id).collect();

        debug!(results = tracks.len(), "Fetched up next");
        Ok(tracks)
    }
}
