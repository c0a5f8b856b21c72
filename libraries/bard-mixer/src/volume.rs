//! Per-track volume with mute
//!
//! Levels are linear gain in 0.0..=1.0. Muting pins the audible level to
//! silence but keeps the stored level, so unmuting restores it.

use crate::error::{MixerError, Result};

/// Check a caller-supplied level
pub fn validate_level(level: f32) -> Result<f32> {
    if (0.0..=1.0).contains(&level) {
        Ok(level)
    } else {
        Err(MixerError::InvalidVolume(level))
    }
}

/// Volume controller
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Volume {
    /// Stored level (0.0 to 1.0)
    level: f32,

    /// Mute state (preserves level)
    muted: bool,
}

impl Volume {
    /// Create a volume at `level`, clamped to 0.0..=1.0
    pub fn new(level: f32) -> Self {
        Self {
            level: clamp_level(level),
            muted: false,
        }
    }

    pub fn set_level(&mut self, level: f32) {
        self.level = clamp_level(level);
    }

    pub fn level(&self) -> f32 {
        self.level
    }

    pub fn toggle_mute(&mut self) {
        self.muted = !self.muted;
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Audible level: 0.0 if muted, otherwise the stored level
    pub fn gain(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.level
        }
    }
}

impl Default for Volume {
    fn default() -> Self {
        Self::new(1.0)
    }
}

fn clamp_level(level: f32) -> f32 {
    if level.is_nan() {
        0.0
    } else {
        level.clamp(0.0, 1.0)
    }
}
