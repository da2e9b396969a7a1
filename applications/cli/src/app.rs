//! Wiring and command handlers

use crate::config::AppConfig;
use crate::error::{CliError, Result};
use crate::sink::LoggingSink;
use futures_util::future::join_all;
use nebula_client::NebulaClient;
use nebula_core::{CatalogService, PlaybackStore, Track, TrackId};
use nebula_playback::{PlayOutcome, PlaybackController, PlaybackServices};
use nebula_storage::{MemoryPlaybackStore, SqlitePlaybackStore};
use std::sync::Arc;
use tracing::{info, warn};

/// Client, controller and sink for one CLI invocation
pub struct App {
    client: Arc<NebulaClient>,
    controller: PlaybackController,
    sink: Arc<LoggingSink>,
}

impl App {
    /// Build the services from configuration and restore persisted state
    pub async fn new(config: &AppConfig) -> Result<Self> {
        let client = Arc::new(NebulaClient::new(config.client_config())?);

        let store: Arc<dyn PlaybackStore> = if config.storage.database_url.is_empty() {
            info!("No database configured, keeping state in memory");
            Arc::new(MemoryPlaybackStore::new())
        } else {
            Arc::new(SqlitePlaybackStore::open(&config.storage.database_url).await?)
        };

        Ok(Self::with_store(client, store, config))
    }

    /// Build around an existing client and store
    pub fn with_store(client: Arc<NebulaClient>, store: Arc<dyn PlaybackStore>, config: &AppConfig) -> Self {
        let sink = Arc::new(LoggingSink::new());
        let controller = PlaybackController::new(
            PlaybackServices {
                streams: client.clone(),
                autoplay: client.clone(),
                likes: client.clone(),
                sink: sink.clone(),
                store,
            },
            config.playback.clone(),
        );

        Self {
            client,
            controller,
            sink,
        }
    }

    pub fn controller(&self) -> &PlaybackController {
        &self.controller
    }

    pub fn sink(&self) -> &LoggingSink {
        &self.sink
    }

    /// Free-text search
    pub async fn search(&self, query: &str) -> Result<Vec<Track>> {
        Ok(self.client.catalog().search(query).await?)
    }

    /// Play `id`, with `context` ids as the queue when given
    ///
    /// Returns the playing track.
    pub async fn play(&self, id: &str, context: &[String]) -> Result<Track> {
        self.controller.restore().await;

        let track = self.lookup(id).await;
        let context = join_all(context.iter().map(|id| self.lookup(id))).await;
        let context = (!context.is_empty()).then_some(context.as_slice());

        match self.controller.play_track(&track, context).await {
            PlayOutcome::Started => self
                .controller
                .state()
                .await
                .current_track
                .ok_or_else(|| CliError::NotPlayable(id.to_string())),
            PlayOutcome::Ignored(reason) => {
                Err(CliError::NotPlayable(format!("{id} ({reason:?})")))
            }
        }
    }

    /// Liked tracks, freshly fetched
    pub async fn liked(&self) -> Result<Vec<Track>> {
        let likes = self.controller.likes();
        likes.refresh().await?;
        Ok(likes.liked_tracks().await)
    }

    /// Toggle the liked flag; returns whether the track is liked now
    pub async fn like(&self, id: &str) -> Result<bool> {
        let track = self.lookup(id).await;
        Ok(self.controller.likes().toggle(&track).await?)
    }

    pub async fn recent(&self) -> Vec<Track> {
        self.controller.restore().await;
        self.controller.history().await
    }

    pub async fn queue(&self) -> Vec<Track> {
        self.controller.restore().await;
        self.controller.state().await.queue
    }

    pub async fn clear_queue(&self) {
        self.controller.restore().await;
        self.controller.clear_queue().await;
    }

    /// Full metadata for `id`, or a bare track if the lookup fails
    async fn lookup(&self, id: &str) -> Track {
        let id = TrackId::new(id);
        match self.client.track_info(&id).await {
            Ok(details) => details.into(),
            Err(e) => {
                warn!(track_id = %id, error = %e, "Track info unavailable");
                Track::new(id, "", "")
            }
        }
    }
}

/// One line per track: `id  title - artist`
pub fn format_tracks(tracks: &[Track]) -> String {
    tracks
        .iter()
        .map(|t| format!("{:<12}  {} - {}", t.id, t.title, t.artist))
        .collect::<Vec<_>>()
        .join("\n")
}
