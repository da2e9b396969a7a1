//! Audio sink boundary
//!
//! The engine never decodes audio. It hands a resolved URL to an
//! [`AudioSink`] and follows the sink's lifecycle through [`SinkEvent`]s,
//! tracked by the [`SinkState`] machine.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Audio output device
///
/// Implemented by the platform layer (browser element, native player, or a
/// logging stub in the CLI).
#[async_trait]
pub trait AudioSink: Send + Sync {
    /// Replace the current resource with `url`
    fn load(&self, url: &str);

    /// Start or resume playback
    ///
    /// May fail asynchronously (autoplay blocked, unsupported media). The
    /// controller logs the failure and carries on.
    async fn play(&self) -> nebula_core::Result<()>;

    /// Pause playback
    fn pause(&self);

    /// Jump to an absolute position
    fn seek(&self, position: Duration);

    /// Set linear output volume, already clamped to `[0, 1]`
    fn set_volume(&self, volume: f32);
}

/// Notifications reported by the sink
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SinkEvent {
    /// Playback started
    Play,

    /// Playback paused
    Pause,

    /// Position moved
    TimeUpdate {
        /// Current position in seconds
        current: f64,
        /// Resource duration in seconds (NaN or non-positive when unknown)
        duration: f64,
    },

    /// Resource played to the end
    Ended,
}

/// Sink lifecycle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SinkState {
    /// Nothing loaded
    #[default]
    Idle,

    /// Resource handed over, not yet playing
    Loading,

    /// Audibly playing
    Playing,

    /// Paused by the user or the platform
    Paused,

    /// Resource finished
    Ended,
}

impl SinkState {
    /// State after a new resource is loaded
    pub fn on_load(self) -> SinkState {
        SinkState::Loading
    }

    /// State after a sink event
    ///
    /// `Pause`, `TimeUpdate` and `Ended` leave `Idle` unchanged, since there
    /// is nothing loaded to pause or finish. `Ended` is left only by `Play`
    /// or a new load.
    pub fn on_event(self, event: &SinkEvent) -> SinkState {
        use SinkState::{Ended, Idle, Loading, Paused, Playing};

        match (self, event) {
            (_, SinkEvent::Play) => Playing,
            (Idle, _) => Idle,
            (Ended, _) => Ended,
            (Loading | Playing | Paused, SinkEvent::Pause) => Paused,
            (Loading | Playing | Paused, SinkEvent::Ended) => Ended,
            (state, SinkEvent::TimeUpdate { .. }) => state,
        }
    }

    /// Whether audio is currently audible
    pub fn is_playing(self) -> bool {
        self == SinkState::Playing
    }
}
