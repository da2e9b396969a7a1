//! `nebula-core` service trait implementations.

use crate::client::NebulaClient;
use async_trait::async_trait;
use nebula_core::{
    AutoplayService, CatalogService, LikeService, Result, StreamService, Track, TrackDetails,
    TrackId,
};

#[async_trait]
impl StreamService for NebulaClient {
    async fn resolve_stream(&self, track_id: &TrackId) -> Result<Option<String>> {
        Ok(self.streams().get_stream_url(track_id).await?)
    }
}

#[async_trait]
impl LikeService for NebulaClient {
    async fn toggle_like(&self, track: &Track) -> Result<bool> {
        Ok(self.likes().toggle(track).await?.liked)
    }

    async fn liked_tracks(&self) -> Result<Vec<Track>> {
        Ok(self.likes().get_all().await?)
    }
}

#[async_trait]
impl AutoplayService for NebulaClient {
    async fn recommendations(&self, track_id: &TrackId) -> Result<Vec<Track>> {
        Ok(self.catalog().get_up_next(track_id).await?)
    }
}

#[async_trait]
impl CatalogService for NebulaClient {
    async fn search(&self, query: &str) -> Result<Vec<Track>> {
        Ok(self.catalog().search(query).await?)
    }

    async fn track_info(&self, track_id: &TrackId) -> Result<TrackDetails> {
        Ok(self.catalog().get_track_info(track_id).await?)
    }
}
