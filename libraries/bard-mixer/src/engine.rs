//! Platform-agnostic playback engine traits
//!
//! The mixer decides *what* plays and at which level; an engine turns a
//! resource locator into sound. Desktop, browser and test backends all plug
//! in here.

use crate::error::Result;
use tokio::sync::oneshot;

/// Audio backend
pub trait PlaybackEngine: Send + Sync {
    /// Prepare a voice for `url`
    ///
    /// The voice is returned stopped. `looping` voices never end on their own.
    fn load(&self, url: &str, looping: bool) -> Result<Box<dyn EngineVoice>>;

    /// Engine-wide output level (0.0 to 1.0)
    fn set_global_volume(&self, volume: f32);
}

/// One playing sound owned by the mixer
///
/// Dropping a voice without calling [`EngineVoice::stop`] is a leak from the
/// engine's point of view; the mixer always stops a voice exactly once.
pub trait EngineVoice: Send {
    fn play(&mut self);

    /// Set the audible level (0.0 to 1.0)
    fn set_volume(&mut self, volume: f32);

    /// Current audible level
    fn volume(&self) -> f32;

    /// Stop and release the sound
    fn stop(&mut self);

    /// Signal fired when a non-looping voice reaches its natural end
    ///
    /// Returns `None` for looping voices, or when already taken.
    fn take_end_signal(&mut self) -> Option<oneshot::Receiver<()>>;
}

/// Engine with no output device
///
/// Voices only remember their level. Used for dry runs, where the mixer's
/// decisions matter but nothing should be heard.
#[derive(Debug, Default)]
pub struct SilentEngine;

impl PlaybackEngine for SilentEngine {
    fn load(&self, url: &str, looping: bool) -> Result<Box<dyn EngineVoice>> {
        tracing::trace!(url_len = url.len(), looping, "silent voice loaded");
        Ok(Box::new(SilentVoice { volume: 0.0 }))
    }

    fn set_global_volume(&self, volume: f32) {
        tracing::trace!(volume, "silent engine volume");
    }
}

struct SilentVoice {
    volume: f32,
}

impl EngineVoice for SilentVoice {
    fn play(&mut self) {}

    fn set_volume(&mut self, volume: f32) {
        self.volume = volume;
    }

    fn volume(&self) -> f32 {
        self.volume
    }

    fn stop(&mut self) {
        self.volume = 0.0;
    }

    fn take_end_signal(&mut self) -> Option<oneshot::Receiver<()>> {
        None
    }
}
