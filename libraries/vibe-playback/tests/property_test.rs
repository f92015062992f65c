//! Property-based tests for the playback controller
//!
//! Uses proptest to verify invariants across many random inputs.

mod common;

use common::create_controller;
use proptest::prelude::*;
use std::time::Duration;
use vibe_playback::{PlaybackController, PlaybackState};

// ===== Helpers =====

fn arbitrary_durations() -> impl Strategy<Value = Vec<u64>> {
    prop::collection::vec(1u64..600, 1..10)
}

/// Random user/timer action
#[derive(Debug, Clone)]
enum Action {
    Toggle,
    Tick(u64),
    Seek(u64),
    SeekPercent(f32),
    Volume(f32),
    Select(usize),
    Next,
    Previous,
}

fn arbitrary_action() -> impl Strategy<Value = Action> {
    prop_oneof![
        Just(Action::Toggle),
        (0u64..20_000).prop_map(Action::Tick),
        (0u64..1_000_000).prop_map(Action::Seek),
        (-50.0f32..150.0).prop_map(Action::SeekPercent),
        (-100.0f32..300.0).prop_map(Action::Volume),
        (0usize..20).prop_map(Action::Select),
        Just(Action::Next),
        Just(Action::Previous),
    ]
}

fn apply(controller: &mut PlaybackController, action: &Action) {
    match action {
        Action::Toggle => controller.toggle(),
        Action::Tick(ms) => controller.tick(Duration::from_millis(*ms)),
        Action::Seek(ms) => controller.seek(Duration::from_millis(*ms)),
        Action::SeekPercent(percent) => controller.seek_to_percent(*percent),
        Action::Volume(percent) => controller.set_volume(*percent),
        Action::Select(index) => {
            controller.select_track(*index).ok();
        }
        Action::Next => {
            controller.next().ok();
        }
        Action::Previous => controller.previous(),
    }
}

// ===== Property Tests =====

proptest! {
    /// Property: Session invariants hold after any sequence of actions
    #[test]
    fn invariants_hold_for_any_action_sequence(
        durations in arbitrary_durations(),
        actions in prop::collection::vec(arbitrary_action(), 1..100)
    ) {
        let (mut controller, _output) = create_controller(&durations);

        for action in &actions {
            apply(&mut controller, action);

            prop_assert!(controller.current_index() < durations.len());
            prop_assert!(
                controller.elapsed() <= controller.duration(),
                "elapsed {:?} exceeds duration {:?}",
                controller.elapsed(),
                controller.duration()
            );

            let percent = controller.progress_percent();
            prop_assert!((0.0..=100.0).contains(&percent), "progress out of range: {}", percent);

            let volume = controller.volume();
            prop_assert!((0.0..=100.0).contains(&volume), "volume out of range: {}", volume);
        }
    }

    /// Property: Valid selections land on the index with elapsed reset
    #[test]
    fn select_valid_index_resets_elapsed(
        durations in arbitrary_durations(),
        seek_ms in 0u64..600_000,
        pick in any::<prop::sample::Index>()
    ) {
        let (mut controller, _output) = create_controller(&durations);
        controller.seek(Duration::from_millis(seek_ms));

        let index = pick.index(durations.len());
        prop_assert!(controller.select_track(index).is_ok());
        prop_assert_eq!(controller.current_index(), index);
        prop_assert_eq!(controller.elapsed(), Duration::ZERO);
    }

    /// Property: Invalid selections change nothing
    #[test]
    fn select_invalid_index_is_ignored(
        durations in arbitrary_durations(),
        offset in 0usize..1000
    ) {
        let (mut controller, _output) = create_controller(&durations);
        controller.seek(Duration::from_secs(1));
        let before = controller.session();

        prop_assert!(controller.select_track(durations.len() + offset).is_err());
        prop_assert_eq!(controller.session(), before);
    }

    /// Property: Elapsed is monotonic between track boundaries
    #[test]
    fn ticks_are_monotonic_until_boundary(
        durations in arbitrary_durations(),
        deltas in prop::collection::vec(0u64..5_000, 1..200)
    ) {
        let (mut controller, _output) = create_controller(&durations);
        controller.toggle();

        for delta in deltas {
            if controller.state() != PlaybackState::Playing {
                break;
            }

            let index_before = controller.current_index();
            let elapsed_before = controller.elapsed();

            controller.tick(Duration::from_millis(delta));

            if controller.current_index() == index_before
                && controller.state() == PlaybackState::Playing
            {
                prop_assert!(controller.elapsed() >= elapsed_before);
            } else {
                // Boundary: next track from zero, or stopped at the end
                prop_assert_eq!(controller.elapsed(), Duration::ZERO);
                if controller.state() == PlaybackState::Playing {
                    prop_assert_eq!(controller.current_index(), index_before + 1);
                } else {
                    prop_assert_eq!(controller.current_index(), durations.len() - 1);
                    prop_assert_eq!(controller.state(), PlaybackState::Paused);
                }
            }
        }
    }

    /// Property: Seeking twice equals seeking once
    #[test]
    fn seek_is_idempotent(
        durations in arbitrary_durations(),
        target_ms in 0u64..1_000_000
    ) {
        let (mut controller, _output) = create_controller(&durations);

        controller.seek(Duration::from_millis(target_ms));
        let once = controller.session();
        controller.seek(Duration::from_millis(target_ms));

        prop_assert_eq!(controller.session(), once);
    }

    /// Property: Volume is always clamped to 0-100
    #[test]
    fn volume_clamped_to_range(volume in any::<f32>()) {
        let (mut controller, _output) = create_controller(&[10]);
        controller.set_volume(volume);

        let actual = controller.volume();
        prop_assert!((0.0..=100.0).contains(&actual), "Volume out of range: {}", actual);
    }
}
