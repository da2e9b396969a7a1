//! Nebula Playback
//!
//! Client-side playback orchestration: decides what is playing, what plays
//! next, and keeps those decisions consistent while network lookups race
//! each other.
//!
//! This crate provides:
//! - Playback controller (play, skip, transport controls)
//! - Memoized stream resolution (bounded LRU, TTL, request coalescing)
//! - Up-next policies (static context vs. autoplay recommendations)
//! - Liked-track registry synced with the remote service
//! - Recent history (bounded, deduplicated, most recent first)
//! - Audio sink boundary with an explicit state machine
//!
//! # Architecture
//!
//! `nebula-playback` does no I/O of its own:
//! - No HTTP client (remote services come in through `nebula-core` traits)
//! - No database (persistence goes through `PlaybackStore`)
//! - No audio decoding (the platform implements [`AudioSink`])
//!
//! # Example: Sink state machine
//!
//! ```rust
//! use nebula_playback::{SinkEvent, SinkState, Volume};
//!
//! let state = SinkState::Idle.on_load();
//! assert_eq!(state, SinkState::Loading);
//!
//! let state = state.on_event(&SinkEvent::Play);
//! assert!(state.is_playing());
//!
//! assert_eq!(Volume::new(1.5).level(), 1.0);
//! ```

mod controller;
mod error;
mod events;
mod history;
mod likes;
mod queue;
mod resolver;
mod sink;
pub mod types;
mod upnext;
mod volume;

// Public exports
pub use controller::{PlaybackController, PlaybackServices};
pub use error::{PlaybackError, Result};
pub use events::PlaybackEvent;
pub use history::RecentHistory;
pub use likes::LikeRegistry;
pub use queue::PlayQueue;
pub use resolver::StreamResolver;
pub use sink::{AudioSink, SinkEvent, SinkState};
pub use types::{Direction, IgnoreReason, PlayOutcome, PlaybackConfig, PlaybackState};
pub use upnext::{QueuePlan, QueuePolicy, UpNextEngine};
pub use volume::Volume;
