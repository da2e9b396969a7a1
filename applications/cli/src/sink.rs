//! Audio sink that only logs
//!
//! The CLI hands stream URLs off and reports them; it never decodes audio.

use async_trait::async_trait;
use nebula_playback::AudioSink;
use std::sync::Mutex;
use std::time::Duration;
use tracing::info;

/// Sink that records the last loaded URL and logs every instruction
#[derive(Debug, Default)]
pub struct LoggingSink {
    loaded: Mutex<Option<String>>,
}

impl LoggingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// URL of the most recent `load`
    pub fn loaded(&self) -> Option<String> {
        self.loaded.lock().ok().and_then(|url| url.clone())
    }
}

#[async_trait]
impl AudioSink for LoggingSink {
    fn load(&self, url: &str) {
        info!(url, "Sink load");
        if let Ok(mut loaded) = self.loaded.lock() {
            *loaded = Some(url.to_string());
        }
    }

    async fn play(&self) -> nebula_core::Result<()> {
        info!("Sink play");
        Ok(())
    }

    fn pause(&self) {
        info!("Sink pause");
    }

    fn seek(&self, position: Duration) {
        info!(position_secs = position.as_secs_f64(), "Sink seek");
    }

    fn set_volume(&self, volume: f32) {
        info!(volume, "Sink volume");
    }
}
