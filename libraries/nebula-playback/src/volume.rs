//! Output volume
//!
//! Linear gain handed straight to the audio sink. The only validation is
//! clamping to `[0, 1]`.

use serde::{Deserialize, Serialize};

/// Linear output volume in `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "f32", into = "f32")]
pub struct Volume(f32);

impl Volume {
    /// Silence
    pub const MIN: Volume = Volume(0.0);

    /// Unity gain
    pub const MAX: Volume = Volume(1.0);

    /// Create a volume, clamping into `[0, 1]`
    ///
    /// NaN is treated as silence.
    pub fn new(level: f32) -> Self {
        if level.is_nan() {
            return Self::MIN;
        }
        Self(level.clamp(0.0, 1.0))
    }

    /// Linear gain
    pub fn level(self) -> f32 {
        self.0
    }

    pub fn is_silent(self) -> bool {
        self.0 == 0.0
    }
}

impl Default for Volume {
    fn default() -> Self {
        Self::MAX
    }
}

impl From<f32> for Volume {
    fn from(level: f32) -> Self {
        Self::new(level)
    }
}

impl From<Volume> for f32 {
    fn from(volume: Volume) -> Self {
        volume.0
    }
}
