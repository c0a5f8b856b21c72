//! Bard - Ambient Audio Mixing
//!
//! Plays the background audio of map locations, blending or replacing
//! tracks as the party moves through a location hierarchy.
//!
//! This crate provides:
//! - Location mixing policy (replace vs. mix-with-parent)
//! - One active track per location, with natural-end cleanup for one-shots
//! - Per-track volume and mute, independent of master volume
//! - Fade-in/fade-out envelopes that never leak or resurrect a voice
//!
//! # Architecture
//!
//! `bard-mixer` does not produce sound itself. Tracks are resolved to
//! resource locators through [`bard_core::AssetStore`], and an implementation
//! of [`PlaybackEngine`] turns those into playing voices.
//!
//! # Example
//!
//! ```rust,no_run
//! use bard_mixer::{AudioSessionManager, MixerConfig, PlayOptions, SilentEngine};
//! use std::sync::Arc;
//!
//! # async fn example(store: Arc<dyn bard_core::AssetStore>) {
//! let mixer = AudioSessionManager::new(store, Arc::new(SilentEngine), MixerConfig::default());
//!
//! // Entering the keep replaces whatever was playing
//! mixer.play_track("/audio/keep.ogg", PlayOptions::replace("keep")).await;
//!
//! // The courtyard blends with the keep
//! mixer
//!     .play_track("/audio/fountain.ogg", PlayOptions::mix("courtyard", "keep"))
//!     .await;
//!
//! mixer.settle().await;
//! assert_eq!(mixer.active_tracks().len(), 2);
//! # }
//! ```

pub mod engine;
pub mod error;
pub mod events;
pub mod fade;
pub mod manager;
pub mod types;
pub mod volume;

pub use engine::{EngineVoice, PlaybackEngine, SilentEngine};
pub use error::{MixerError, Result};
pub use events::{MixerEvent, SkipReason, StopReason};
pub use fade::{Fade, FadeCurve};
pub use manager::AudioSessionManager;
pub use types::{ActiveTrack, MixerConfig, PlayOptions};
pub use volume::Volume;
