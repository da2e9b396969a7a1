//! Stream resolution endpoint.

use crate::client::{read_json, send_error};
use crate::error::{ClientError, Result};
use crate::types::{ClientConfig, StreamUrlResponse};
use nebula_core::TrackId;
use reqwest::Client;
use tracing::debug;

/// Stream client for the Nebula backend.
pub struct StreamClient<'a> {
    http: &'a Client,
    config: &'a ClientConfig,
}

impl<'a> StreamClient<'a> {
    pub(crate) fn new(http: &'a Client, config: &'a ClientConfig) -> Self {
        Self { http, config }
    }

    /// Resolve a playable stream URL for a track.
    ///
    /// Returns `Ok(None)` when the backend reports it could not find a stream.
    /// The URL is time-limited on the backend side and should be used promptly.
    pub async fn get_stream_url(&self, track_id: &TrackId) -> Result<Option<String>> {
        if track_id.is_empty() {
            return Err(ClientError::MissingTrackId);
        }

        let url = format!("{}/stream", self.config.url);
        let source = self.config.source_locator(track_id.as_str());
        debug!(url = %url, source = %source, "Resolving stream URL");

        let response = self
            .http
            .get(&url)
            .query(&[("url", source.as_str())])
            .send()
            .await
            .map_err(send_error)?;

        let body: StreamUrlResponse = read_json(response, "stream").await?;

        match body.url.filter(|u| !u.is_empty()) {
            Some(stream_url) => Ok(Some(stream_url)),
            None => {
                debug!(
                    track_id = %track_id,
                    error = body.error.as_deref().unwrap_or("empty response"),
                    "No stream available"
                );
                Ok(None)
            }
        }
    }
}
