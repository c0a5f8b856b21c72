//! Mixer events
//!
//! Decisions made by the session manager are queued as events so a UI can
//! follow along without polling the track list. Drain them with
//! [`crate::AudioSessionManager::drain_events`].

use serde::{Deserialize, Serialize};

/// Events emitted by the session manager
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MixerEvent {
    /// A track started fading in
    TrackStarted {
        track_id: String,
        location_id: String,
    },

    /// A play request was dropped
    TrackSkipped {
        track_id: String,
        reason: SkipReason,
    },

    /// A track left the active set and is fading out
    TrackStopped {
        track_id: String,
        reason: StopReason,
    },

    /// A one-shot track reached its natural end
    TrackFinished { track_id: String },

    /// A track was muted or unmuted
    MuteChanged { track_id: String, is_muted: bool },

    /// A track's stored volume changed
    TrackVolumeChanged { track_id: String, volume: f32 },

    /// Master volume changed
    MasterVolumeChanged { volume: f32 },
}

/// Why a play request did nothing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// No audio asset with that name
    MissingAsset,
    /// A track for the same location is already active
    LocationAlreadyPlaying,
    /// The engine could not load the asset
    EngineFailure(String),
}

/// Why a track was stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// Explicit stop request
    Requested,
    /// A replacing track took over
    Replaced,
    /// A sibling sub-location started mixing with the shared parent
    SiblingEntered,
}
