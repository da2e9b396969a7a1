//! Liked track endpoints.

use crate::client::{read_json, send_error};
use crate::error::{ClientError, Result};
use crate::types::{LikeResponse, LikedListResponse};
use nebula_core::Track;
use reqwest::Client;
use tracing::debug;

/// Likes client for the Nebula backend.
pub struct LikesClient<'a> {
    http: &'a Client,
    base_url: &'a str,
}

impl<'a> LikesClient<'a> {
    pub(crate) fn new(http: &'a Client, base_url: &'a str) -> Self {
        Self { http, base_url }
    }

    /// Toggle the liked flag for a track.
    ///
    /// Sends the display metadata along with the id since the backend stores
    /// liked tracks without any other catalog lookup.
    pub async fn toggle(&self, track: &Track) -> Result<LikeResponse> {
        if !track.has_id() {
            return Err(ClientError::MissingTrackId);
        }

        let url = format!("{}/like", self.base_url);
        debug!(url = %url, track_id = %track.id, "Toggling like");

        let response = self
            .http
            .post(&url)
            .query(&[
                ("videoId", track.id.as_str()),
                ("title", track.title.as_str()),
                ("artist", track.artist.as_str()),
                ("thumbnail", track.thumbnail_url.as_str()),
            ])
            .send()
            .await
            .map_err(send_error)?;

        let body: LikeResponse = read_json(response, "like").await?;
        debug!(track_id = %track.id, liked = body.liked, "Like toggled");
        Ok(body)
    }

    /// Get every liked track.
    pub async fn get_all(&self) -> Result<Vec<Track>> {
        let url = format!("{}/liked/all", self.base_url);
        debug!(url = %url, "Fetching liked tracks");

        let response = self.http.get(&url).send().await.map_err(send_error)?;
        let body: LikedListResponse = read_json(response, "liked list").await?;

        debug!(tracks = body.liked.len(), "Fetched liked tracks");
        Ok(body.liked)
    }
}
