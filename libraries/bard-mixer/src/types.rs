//! Core types for the mixer

use crate::error::{MixerError, Result};
use crate::fade::{Fade, FadeCurve};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// How a track should join the current mix
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayOptions {
    /// Stop every active track first
    pub replace: bool,

    /// Location the track belongs to; empty for ad-hoc tracks
    ///
    /// At most one active track exists per location id, including the empty id.
    pub location_id: String,

    /// Parent whose tracks survive a mix-mode start
    pub parent_location_id: Option<String>,

    /// Loop until stopped (ambient) or play once (entry sounds)
    pub looping: bool,
}

impl Default for PlayOptions {
    fn default() -> Self {
        Self {
            replace: false,
            location_id: String::new(),
            parent_location_id: None,
            looping: true,
        }
    }
}

impl PlayOptions {
    /// Enter a primary location: everything else fades out
    pub fn replace(location_id: impl Into<String>) -> Self {
        Self {
            replace: true,
            location_id: location_id.into(),
            ..Self::default()
        }
    }

    /// Enter a sub-location that blends with its parent
    pub fn mix(location_id: impl Into<String>, parent_location_id: impl Into<String>) -> Self {
        Self {
            location_id: location_id.into(),
            parent_location_id: Some(parent_location_id.into()),
            ..Self::default()
        }
    }

    /// Play once instead of looping
    #[must_use]
    pub fn once(mut self) -> Self {
        self.looping = false;
        self
    }
}

/// Read-only view of an active track
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveTrack {
    /// Caller-supplied track id (`/audio/<name>`)
    pub id: String,
    /// Asset name resolved from the id
    pub name: String,
    /// Stored volume; the audible level is 0 while muted
    pub volume: f32,
    pub is_muted: bool,
    pub location_id: String,
}

/// Mixer settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MixerConfig {
    /// Fade-in length for new tracks; longer than fade-out to hide load latency
    pub fade_in_ms: u64,

    pub fade_out_ms: u64,

    /// Interval between fade level updates
    pub fade_step_ms: u64,

    pub curve: FadeCurve,

    pub initial_master_volume: f32,
}

impl Default for MixerConfig {
    fn default() -> Self {
        Self {
            fade_in_ms: 2000,
            fade_out_ms: 1000,
            fade_step_ms: 50,
            curve: FadeCurve::EqualPower,
            initial_master_volume: 1.0,
        }
    }
}

impl MixerConfig {
    pub fn validate(&self) -> Result<()> {
        if self.fade_in_ms == 0 || self.fade_out_ms == 0 {
            return Err(MixerError::InvalidConfig(
                "fade lengths must be greater than zero".to_string(),
            ));
        }
        if self.fade_step_ms == 0 {
            return Err(MixerError::InvalidConfig(
                "fade_step_ms must be greater than zero".to_string(),
            ));
        }
        crate::volume::validate_level(self.initial_master_volume)?;
        Ok(())
    }

    pub fn fade_in(&self) -> Fade {
        self.fade(self.fade_in_ms)
    }

    pub fn fade_out(&self) -> Fade {
        self.fade(self.fade_out_ms)
    }

    fn fade(&self, duration_ms: u64) -> Fade {
        Fade {
            duration: Duration::from_millis(duration_ms),
            resolution: Duration::from_millis(self.fade_step_ms),
            curve: self.curve,
        }
    }
}
