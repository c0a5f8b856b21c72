//! Property-based tests for the session manager
//!
//! Random sequences of play/stop/mute requests must keep the mixer's
//! invariants: one track per location, every released voice stopped exactly
//! once, and no voice left playing without a matching active track.


use bard_mixer::PlayOptions;
use proptest::prelude::*;
use std::collections::HashSet;
use std::time::Duration;
use test_helpers::*;

const TRACKS: &[&str] = &["t0.ogg", "t1.ogg", "t2.ogg", "t3.ogg", "t4.ogg"];
const LOCATIONS: &[&str] = &["", "keep", "courtyard", "armory", "chapel"];

#[derive(Debug, Clone)]
enum Op {
    Play {
        track: usize,
        location: usize,
        parent: Option<usize>,
        replace: bool,
        looping: bool,
    },
    Stop(usize),
    StopAll,
    Mute(usize),
    Finish(usize),
    Wait(u64),
}

fn arbitrary_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (
            0..TRACKS.len(),
            0..LOCATIONS.len(),
            proptest::option::of(0..LOCATIONS.len()),
            any::<bool>(),
            any::<bool>(),
        )
            .prop_map(|(track, location, parent, replace, looping)| Op::Play {
                track,
                location,
                parent,
                replace,
                looping,
            }),
        1 => (0..TRACKS.len()).prop_map(Op::Stop),
        1 => Just(Op::StopAll),
        1 => (0..TRACKS.len()).prop_map(Op::Mute),
        1 => (0..TRACKS.len()).prop_map(Op::Finish),
        2 => (0u64..3000).prop_map(Op::Wait),
    ]
}

fn track_id(index: usize) -> String {
    format!("/audio/{}", TRACKS[index])
}

fn paused_runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .start_paused(true)
        .build()
        .unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Property: invariants hold after every operation and once fades settle
    #[test]
    fn session_invariants_hold(ops in prop::collection::vec(arbitrary_op(), 1..40)) {
        paused_runtime().block_on(async move {
            let h = harness(TRACKS);

            for op in ops {
                match op {
                    Op::Play { track, location, parent, replace, looping } => {
                        let mut options = PlayOptions {
                            replace,
                            location_id: LOCATIONS[location].to_string(),
                            parent_location_id: parent.map(|p| LOCATIONS[p].to_string()),
                            looping: true,
                        };
                        if !looping {
                            options = options.once();
                        }
                        h.mixer.play_track(&track_id(track), options).await;
                    }
                    Op::Stop(track) => {
                        h.mixer.stop_individual_track(&track_id(track));
                    }
                    Op::StopAll => h.mixer.stop_all(),
                    Op::Mute(track) => {
                        h.mixer.toggle_mute_track(&track_id(track));
                    }
                    Op::Finish(track) => {
                        for voice in h.engine.voices() {
                            if voice.name == TRACKS[track] {
                                voice.finish();
                            }
                        }
                    }
                    Op::Wait(ms) => tokio::time::sleep(Duration::from_millis(ms)).await,
                }

                let active = h.mixer.active_tracks();
                let locations: HashSet<&str> =
                    active.iter().map(|t| t.location_id.as_str()).collect();
                prop_assert_eq!(locations.len(), active.len(), "duplicate location in {:?}", active);

                for voice in h.engine.voices() {
                    prop_assert!(voice.stop_count() <= 1, "{} stopped twice", voice.name);
                }
            }

            h.mixer.settle().await;
            tokio::time::sleep(Duration::from_millis(1)).await;

            let voices = h.engine.voices();
            let live = voices.iter().filter(|v| v.stop_count() == 0).count();
            prop_assert_eq!(live, h.mixer.active_tracks().len());
            prop_assert!(voices.iter().all(|v| v.stop_count() <= 1));
            prop_assert!(voices.iter().all(|v| v.is_playing() == (v.stop_count() == 0)));
            Ok(())
        })?;
    }
}
