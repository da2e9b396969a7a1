//! Nebula Service Client
//!
//! HTTP client library for the remote services behind Nebula playback.
//!
//! # Features
//!
//! - **Streams**: Resolve a track id to a playable stream URL
//! - **Likes**: Toggle the liked flag, list liked tracks
//! - **Catalog**: Search, track details, autoplay recommendations
//!
//! [`NebulaClient`] implements the `nebula-core` service traits, so it can be
//! handed straight to the playback engine.
//!
//! # Example
//!
//! ```ignore
//! use nebula_client::{ClientConfig, NebulaClient};
//! use nebula_core::TrackId;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = NebulaClient::new(ClientConfig::new("http://127.0.0.1:8000"))?;
//!
//!     let results = client.catalog().search("daft punk").await?;
//!     println!("Found {} tracks", results.len());
//!
//!     let url = client.streams().get_stream_url(&TrackId::new("abc")).await?;
//!     println!("Stream: {:?}", url);
//!
//!     Ok(())
//! }
//! ```

mod catalog;
mod client;
mod error;
mod likes;
mod services;
mod streams;
mod types;

// Re-export main types
pub use client::NebulaClient;
pub use error::{ClientError, Result};
pub use types::{
    ClientConfig, LikeResponse, LikedListResponse, StreamUrlResponse, UpNextResponse,
    DEFAULT_SOURCE_LOCATOR_BASE,
};

// Re-export sub-clients for direct use if needed
pub use catalog::CatalogClient;
pub use likes::LikesClient;
pub use streams::StreamClient;
