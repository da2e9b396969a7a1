/// CLI configuration
use crate::error::{CliError, Result};
use nebula_client::{ClientConfig, DEFAULT_SOURCE_LOCATOR_BASE};
use nebula_playback::PlaybackConfig;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// Default config file, read from the working directory when present
pub const DEFAULT_CONFIG_FILE: &str = "nebula.toml";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerSettings,
    pub storage: StorageSettings,
    pub playback: PlaybackConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    /// Backend base URL
    pub url: String,

    /// Prefix turning a track id into the source media locator
    pub source_locator_base: String,

    pub timeout_secs: u64,
    pub connect_timeout_secs: u64,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            url: "http://127.0.0.1:8000".to_string(),
            source_locator_base: DEFAULT_SOURCE_LOCATOR_BASE.to_string(),
            timeout_secs: 30,
            connect_timeout_secs: 10,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    /// `SQLite` URL for queue and history; empty keeps state in memory
    pub database_url: String,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            database_url: "sqlite://nebula.db".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from file and environment
    ///
    /// An explicit `path` must exist; otherwise `nebula.toml` is read if
    /// present. Environment variables prefixed with `NEBULA_` override both,
    /// with `__` between nested keys (`NEBULA_SERVER__URL`).
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        settings = match path {
            Some(path) => settings.add_source(config::File::from(path)),
            None => settings.add_source(config::File::with_name(DEFAULT_CONFIG_FILE).required(false)),
        };

        settings = settings.add_source(
            config::Environment::with_prefix("NEBULA")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config: AppConfig = settings.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.server.url.trim().is_empty() {
            return Err(CliError::Config("server.url must not be empty".to_string()));
        }
        if self.server.timeout_secs == 0 {
            return Err(CliError::Config("server.timeout_secs must be positive".to_string()));
        }
        if !(0.0..=1.0).contains(&self.playback.initial_volume) {
            return Err(CliError::Config(
                "playback.initial_volume must be between 0 and 1".to_string(),
            ));
        }
        Ok(())
    }

    /// HTTP client settings
    pub fn client_config(&self) -> ClientConfig {
        let mut config = ClientConfig::new(self.server.url.clone());
        config.source_locator_base = self.server.source_locator_base.clone();
        config.timeout = Duration::from_secs(self.server.timeout_secs);
        config.connect_timeout = Duration::from_secs(self.server.connect_timeout_secs);
        config
    }
}
