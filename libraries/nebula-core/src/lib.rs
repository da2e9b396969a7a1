//! Nebula Core
//!
//! Shared domain types, service traits, and error handling for Nebula.
//!
//! This crate provides the foundational building blocks used by the playback
//! engine, the remote service client, and the persistence layer.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `Track`, `TrackId`
//! - **Service Traits**: `StreamService`, `LikeService`, `AutoplayService`,
//!   `CatalogService` (remote collaborators) and `PlaybackStore` (persistence)
//! - **Error Handling**: Unified `NebulaError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use nebula_core::{Track, TrackId};
//!
//! let track = Track::new("dQw4w9WgXcQ", "Never Gonna Give You Up", "Rick Astley");
//! assert_eq!(track.id, TrackId::new("dQw4w9WgXcQ"));
//! assert!(track.has_id());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod services;
pub mod storage;
pub mod types;

// Re-export commonly used types
pub use error::{NebulaError, Result};
pub use services::{AutoplayService, CatalogService, LikeService, StreamService};
pub use storage::PlaybackStore;
pub use types::{Track, TrackDetails, TrackId};
