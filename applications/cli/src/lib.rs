//! Nebula CLI
//!
//! Command-line front end wiring the HTTP client, the playback controller
//! and the `SQLite` store together.

pub mod app;
pub mod config;
pub mod error;
pub mod sink;

pub use app::{format_tracks, App};
pub use config::AppConfig;
pub use error::{CliError, Result};
pub use sink::LoggingSink;
