//! Error types for the mixer

use thiserror::Error;

/// Mixer errors
///
/// Failures to resolve or load a track never surface here; they are logged
/// and the request is skipped.
#[derive(Debug, Error)]
pub enum MixerError {
    /// Playback engine error
    #[error("Playback engine error: {0}")]
    Engine(String),

    /// Volume outside 0.0..=1.0
    #[error("Invalid volume: {0} (expected 0.0 to 1.0)")]
    InvalidVolume(f32),

    /// Unusable fade or volume settings
    #[error("Invalid mixer configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for mixer operations
pub type Result<T> = std::result::Result<T, MixerError>;
