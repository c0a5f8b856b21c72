//! Audio session manager
//!
//! Owns every active track and the master volume, and applies the location
//! mixing policy:
//!
//! - **Replace** (entering a primary location): every active track fades out.
//! - **Mix** (entering a sub-location that blends with its parent): only
//!   tracks of *other* locations fade out, except the parent's and ad-hoc
//!   (location-less) tracks.
//!
//! Operations return as soon as the decision is made. A track leaves the
//! active set immediately when stopped; its voice is handed to a fade-out
//! task that owns it and stops it once, so a fade can never resurrect a
//! removed track. Fade-in tasks look their track up by slot key on every
//! step and end when it is gone.

use crate::engine::{EngineVoice, PlaybackEngine};
use crate::error::Result;
use crate::events::{MixerEvent, SkipReason, StopReason};
use crate::fade::Fade;
use crate::types::{ActiveTrack, MixerConfig, PlayOptions};
use crate::volume::{validate_level, Volume};
use bard_core::{asset_name_from_track_id, AssetClass, AssetStore, LocationTree};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

/// An active track and the voice playing it
struct Slot {
    key: u64,
    id: String,
    name: String,
    location_id: String,
    volume: Volume,
    /// Cleared when the caller takes manual control of the level
    fading_in: bool,
    voice: Box<dyn EngineVoice>,
}

impl Slot {
    fn snapshot(&self) -> ActiveTrack {
        ActiveTrack {
            id: self.id.clone(),
            name: self.name.clone(),
            volume: self.volume.level(),
            is_muted: self.volume.is_muted(),
            location_id: self.location_id.clone(),
        }
    }
}

struct Session {
    master: f32,
    next_key: u64,
    slots: Vec<Slot>,
    pending_events: Vec<MixerEvent>,
    fades: Vec<JoinHandle<()>>,
}

impl Session {
    fn slot_mut(&mut self, key: u64) -> Option<&mut Slot> {
        self.slots.iter_mut().find(|slot| slot.key == key)
    }

    fn take_slots(&mut self, mut remove: impl FnMut(&Slot) -> bool) -> Vec<Slot> {
        let (removed, kept) = std::mem::take(&mut self.slots)
            .into_iter()
            .partition(|slot| remove(slot));
        self.slots = kept;
        removed
    }

    fn track_fade(&mut self, handle: JoinHandle<()>) {
        self.fades.retain(|fade| !fade.is_finished());
        self.fades.push(handle);
    }
}

fn lock(session: &Mutex<Session>) -> MutexGuard<'_, Session> {
    session.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Location-aware audio session manager
///
/// Cheap to clone; clones share the same session.
#[derive(Clone)]
pub struct AudioSessionManager {
    store: Arc<dyn AssetStore>,
    engine: Arc<dyn PlaybackEngine>,
    config: MixerConfig,
    session: Arc<Mutex<Session>>,
}

impl AudioSessionManager {
    /// Create a manager resolving tracks from `store` and playing them on `engine`
    ///
    /// Must be used from within a tokio runtime; fades run as spawned tasks.
    pub fn new(
        store: Arc<dyn AssetStore>,
        engine: Arc<dyn PlaybackEngine>,
        config: MixerConfig,
    ) -> Self {
        let master = Volume::new(config.initial_master_volume).level();
        engine.set_global_volume(master);

        Self {
            store,
            engine,
            config,
            session: Arc::new(Mutex::new(Session {
                master,
                next_key: 0,
                slots: Vec::new(),
                pending_events: Vec::new(),
                fades: Vec::new(),
            })),
        }
    }

    // ===== Playback Control =====

    /// Start `track_id` according to `options`
    ///
    /// Returns `true` if a new track started. A missing asset, an engine
    /// failure, or an already-playing location makes this a logged no-op.
    pub async fn play_track(&self, track_id: &str, options: PlayOptions) -> bool {
        let name = asset_name_from_track_id(track_id);
        let url = self.store.get_url(AssetClass::Audio, name).await;

        if url.is_empty() {
            tracing::warn!(track_id, "audio asset not found, skipping");
            self.lock().pending_events.push(MixerEvent::TrackSkipped {
                track_id: track_id.to_string(),
                reason: SkipReason::MissingAsset,
            });
            return false;
        }

        self.start(track_id, name, &url, &options)
    }

    fn start(&self, track_id: &str, name: &str, url: &str, options: &PlayOptions) -> bool {
        let mut session = self.lock();

        if session
            .slots
            .iter()
            .any(|slot| slot.location_id == options.location_id)
        {
            tracing::debug!(
                track_id,
                location_id = %options.location_id,
                "location already has an active track"
            );
            session.pending_events.push(MixerEvent::TrackSkipped {
                track_id: track_id.to_string(),
                reason: SkipReason::LocationAlreadyPlaying,
            });
            return false;
        }

        let mut voice = match self.engine.load(url, options.looping) {
            Ok(voice) => voice,
            Err(e) => {
                tracing::warn!(track_id, error = %e, "engine failed to load track");
                session.pending_events.push(MixerEvent::TrackSkipped {
                    track_id: track_id.to_string(),
                    reason: SkipReason::EngineFailure(e.to_string()),
                });
                return false;
            }
        };
        voice.set_volume(0.0);
        voice.play();
        let end_signal = voice.take_end_signal();

        let (removed, reason) = if options.replace {
            (session.take_slots(|_| true), StopReason::Replaced)
        } else {
            let parent = options.parent_location_id.as_deref();
            let removed = session.take_slots(|slot| {
                !slot.location_id.is_empty()
                    && slot.location_id != options.location_id
                    && Some(slot.location_id.as_str()) != parent
            });
            (removed, StopReason::SiblingEntered)
        };
        self.fade_out_all(&mut session, removed, reason);

        let key = session.next_key;
        session.next_key += 1;
        let master = session.master;
        session.slots.push(Slot {
            key,
            id: track_id.to_string(),
            name: name.to_string(),
            location_id: options.location_id.clone(),
            volume: Volume::new(master),
            fading_in: true,
            voice,
        });
        session.pending_events.push(MixerEvent::TrackStarted {
            track_id: track_id.to_string(),
            location_id: options.location_id.clone(),
        });

        tracing::info!(
            track_id,
            location_id = %options.location_id,
            replace = options.replace,
            looping = options.looping,
            "track started"
        );

        let fade_in = tokio::spawn(fade_in(
            Arc::clone(&self.session),
            key,
            self.config.fade_in(),
        ));
        session.track_fade(fade_in);

        if let Some(ended) = end_signal {
            tokio::spawn(watch_end(Arc::clone(&self.session), key, ended));
        }

        true
    }

    /// Play the background audio configured for a location
    ///
    /// Locations flagged to mix with an existing parent blend in; any other
    /// location replaces the current mix. Returns `true` if a track started.
    pub async fn play_location_audio(&self, locations: &LocationTree, location_id: &str) -> bool {
        let Some(location) = locations.get(location_id) else {
            tracing::debug!(location_id, "unknown location");
            return false;
        };
        let Some(track_id) = location
            .background_audio
            .as_deref()
            .filter(|track| !track.is_empty())
        else {
            tracing::debug!(location_id, "location has no background audio");
            return false;
        };

        let options = match location.parent_location_id.as_deref() {
            Some(parent) if location.mix_with_parent => PlayOptions::mix(location_id, parent),
            _ => PlayOptions::replace(location_id),
        };

        self.play_track(track_id, options).await
    }

    /// Fade out and remove every track with this id
    ///
    /// Returns `false` if no such track was active.
    pub fn stop_individual_track(&self, track_id: &str) -> bool {
        let mut session = self.lock();
        let removed = session.take_slots(|slot| slot.id == track_id);
        let stopped = !removed.is_empty();
        self.fade_out_all(&mut session, removed, StopReason::Requested);
        stopped
    }

    /// Fade out and remove every active track
    pub fn stop_all(&self) {
        let mut session = self.lock();
        let removed = session.take_slots(|_| true);
        self.fade_out_all(&mut session, removed, StopReason::Requested);
    }

    fn fade_out_all(&self, session: &mut Session, removed: Vec<Slot>, reason: StopReason) {
        for slot in removed {
            tracing::debug!(track_id = %slot.id, ?reason, "track fading out");
            session.pending_events.push(MixerEvent::TrackStopped {
                track_id: slot.id,
                reason,
            });
            let handle = tokio::spawn(fade_out(slot.voice, self.config.fade_out()));
            session.track_fade(handle);
        }
    }

    // ===== Volume Control =====

    /// Flip mute on every track with this id
    ///
    /// Muting silences instantly; unmuting restores the stored volume
    /// instantly. Returns `false` if no such track was active.
    pub fn toggle_mute_track(&self, track_id: &str) -> bool {
        let mut session = self.lock();
        let mut events = Vec::new();

        for slot in session.slots.iter_mut().filter(|slot| slot.id == track_id) {
            slot.volume.toggle_mute();
            slot.fading_in = false;
            slot.voice.set_volume(slot.volume.gain());
            events.push(MixerEvent::MuteChanged {
                track_id: slot.id.clone(),
                is_muted: slot.volume.is_muted(),
            });
        }

        let found = !events.is_empty();
        session.pending_events.extend(events);
        found
    }

    /// Set the stored volume of every track with this id
    ///
    /// Muted tracks stay silent; the new level applies on unmute.
    pub fn set_track_volume(&self, track_id: &str, volume: f32) -> Result<bool> {
        let volume = validate_level(volume)?;
        let mut session = self.lock();
        let mut events = Vec::new();

        for slot in session.slots.iter_mut().filter(|slot| slot.id == track_id) {
            slot.volume.set_level(volume);
            slot.fading_in = false;
            if !slot.volume.is_muted() {
                slot.voice.set_volume(volume);
            }
            events.push(MixerEvent::TrackVolumeChanged {
                track_id: slot.id.clone(),
                volume,
            });
        }

        let found = !events.is_empty();
        session.pending_events.extend(events);
        Ok(found)
    }

    /// Set the master volume
    ///
    /// Applies instantly to the engine and to every non-muted track. Stored
    /// per-track volumes are left as they are, except for tracks still fading
    /// in, whose stored level follows the master they are heading for.
    pub fn set_master_volume(&self, volume: f32) -> Result<()> {
        let volume = validate_level(volume)?;
        let mut session = self.lock();

        session.master = volume;
        self.engine.set_global_volume(volume);
        for slot in session
            .slots
            .iter_mut()
            .filter(|slot| !slot.volume.is_muted())
        {
            if slot.fading_in {
                slot.volume.set_level(volume);
            }
            slot.voice.set_volume(volume);
        }

        session
            .pending_events
            .push(MixerEvent::MasterVolumeChanged { volume });
        tracing::debug!(volume, "master volume changed");
        Ok(())
    }

    pub fn master_volume(&self) -> f32 {
        self.lock().master
    }

    // ===== State =====

    /// Snapshot of the active tracks, oldest first
    pub fn active_tracks(&self) -> Vec<ActiveTrack> {
        self.lock().slots.iter().map(Slot::snapshot).collect()
    }

    pub fn is_playing(&self, track_id: &str) -> bool {
        self.lock().slots.iter().any(|slot| slot.id == track_id)
    }

    /// Take all pending events
    pub fn drain_events(&self) -> Vec<MixerEvent> {
        std::mem::take(&mut self.lock().pending_events)
    }

    /// Wait for every in-flight fade to complete
    pub async fn settle(&self) {
        loop {
            let fades = std::mem::take(&mut self.lock().fades);
            if fades.is_empty() {
                break;
            }
            for fade in fades {
                if let Err(e) = fade.await {
                    tracing::warn!(error = %e, "fade task failed");
                }
            }
        }
    }

    fn lock(&self) -> MutexGuard<'_, Session> {
        lock(&self.session)
    }
}

/// Raise a track towards the master volume
///
/// The target follows master volume changes made during the fade. Ends early
/// when the track is removed or the caller sets its level by hand.
async fn fade_in(session: Arc<Mutex<Session>>, key: u64, fade: Fade) {
    let interval = fade.interval();

    for step in 1..=fade.steps() {
        tokio::time::sleep(interval).await;

        let mut session = lock(&session);
        let master = session.master;
        let Some(slot) = session.slot_mut(key) else {
            return;
        };
        if !slot.fading_in {
            return;
        }
        slot.volume.set_level(master);
        slot.voice.set_volume(fade.fade_in_level(step, master));
    }

    if let Some(slot) = lock(&session).slot_mut(key) {
        slot.fading_in = false;
    }
}

/// Lower a removed voice to silence, then stop it
///
/// The task owns the voice, so it is stopped exactly once.
async fn fade_out(mut voice: Box<dyn EngineVoice>, fade: Fade) {
    let interval = fade.interval();
    let start = voice.volume();

    for step in 1..=fade.steps() {
        tokio::time::sleep(interval).await;
        voice.set_volume(fade.fade_out_level(step, start));
    }

    voice.stop();
}

/// Remove a one-shot track when its voice reports the natural end
///
/// Does nothing if the track was already removed.
async fn watch_end(session: Arc<Mutex<Session>>, key: u64, ended: oneshot::Receiver<()>) {
    // A dropped sender means the voice is gone either way
    let _ = ended.await;

    let finished = {
        let mut session = lock(&session);
        let Some(index) = session.slots.iter().position(|slot| slot.key == key) else {
            return;
        };
        let slot = session.slots.remove(index);
        session.pending_events.push(MixerEvent::TrackFinished {
            track_id: slot.id.clone(),
        });
        slot
    };

    tracing::debug!(track_id = %finished.id, "one-shot track finished");
    let mut voice = finished.voice;
    voice.stop();
}
