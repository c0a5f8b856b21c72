//! Fade envelopes for starting and stopping tracks
//!
//! Fades are stepped: a task sleeps one interval, sets the voice level, and
//! repeats. The last step always lands exactly on the target.

use serde::{Deserialize, Serialize};
use std::f32::consts::PI;
use std::time::Duration;

/// Fade curve shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FadeCurve {
    /// Straight line; dips audibly in the middle of a crossfade
    Linear,

    /// t^0.5: rises quickly, then eases off
    SquareRoot,

    /// Slow start, fast middle, slow end
    SCurve,

    /// Constant perceived loudness across a crossfade
    #[default]
    EqualPower,
}

impl FadeCurve {
    /// Gain multiplier at `position` (0.0 to 1.0) of a fade
    ///
    /// Fade-in rises from 0.0 to 1.0; fade-out mirrors it.
    #[inline]
    pub fn gain(&self, position: f32, fade_out: bool) -> f32 {
        let position = position.clamp(0.0, 1.0);
        let t = if fade_out { 1.0 - position } else { position };

        match self {
            FadeCurve::Linear => t,
            FadeCurve::SquareRoot => t.sqrt(),
            FadeCurve::SCurve => (1.0 - (PI * t).cos()) * 0.5,
            FadeCurve::EqualPower => (t * PI * 0.5).sin(),
        }
    }
}

/// A timed fade
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fade {
    pub duration: Duration,
    /// Requested interval between level updates
    pub resolution: Duration,
    pub curve: FadeCurve,
}

impl Fade {
    /// Number of level updates (at least one)
    pub fn steps(&self) -> u32 {
        let resolution = self.resolution.as_millis().max(1);
        (self.duration.as_millis() / resolution).clamp(1, u128::from(u32::MAX)) as u32
    }

    /// Time between level updates
    pub fn interval(&self) -> Duration {
        self.duration / self.steps()
    }

    /// Level after `step` of a fade-in towards `target`
    pub fn fade_in_level(&self, step: u32, target: f32) -> f32 {
        let steps = self.steps();
        if step >= steps {
            target
        } else {
            target * self.curve.gain(step as f32 / steps as f32, false)
        }
    }

    /// Level after `step` of a fade-out from `start`
    pub fn fade_out_level(&self, step: u32, start: f32) -> f32 {
        let steps = self.steps();
        if step >= steps {
            0.0
        } else {
            start * self.curve.gain(step as f32 / steps as f32, true)
        }
    }
}
