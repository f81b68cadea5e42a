// Host-side tests for the playback voice state machine.
// The main crate is wasm-only, so we include the pure-Rust module directly.

#![allow(dead_code)]
mod playback {
    include!("../src/core/playback.rs");
}

use playback::{PlaybackMachine, PlaybackState, ToggleAction};

#[test]
fn loading_is_issued_exactly_once() {
    let mut m = PlaybackMachine::new();
    assert_eq!(m.state(), PlaybackState::Idle);
    assert!(m.begin_loading());
    assert!(!m.begin_loading(), "second initiate must be a no-op");
    assert_eq!(m.state(), PlaybackState::Loading);
}

#[test]
fn toggles_before_load_resolves_leave_a_single_voice() {
    let mut m = PlaybackMachine::new();
    assert!(m.begin_loading());

    // Two quick toggles before the assets settle.
    assert_eq!(m.toggle(), ToggleAction::Ignore);
    assert_eq!(m.toggle(), ToggleAction::Ignore);

    m.finish_loading();
    assert_eq!(m.state(), PlaybackState::Ready);

    // After the load settles, one toggle starts exactly one voice.
    assert_eq!(m.toggle(), ToggleAction::Start);
    assert_eq!(m.state(), PlaybackState::Playing);
    assert_eq!(m.toggle(), ToggleAction::Stop);
    assert_eq!(m.state(), PlaybackState::Ready);
}

#[test]
fn natural_end_returns_to_ready() {
    let mut m = PlaybackMachine::new();
    m.begin_loading();
    m.finish_loading();
    assert_eq!(m.toggle(), ToggleAction::Start);
    let epoch = m.voice_epoch();
    assert!(m.ended(epoch));
    assert_eq!(m.state(), PlaybackState::Ready);
    // A duplicate end notification changes nothing.
    assert!(!m.ended(epoch));
    assert_eq!(m.state(), PlaybackState::Ready);
}

#[test]
fn stale_end_from_a_replaced_voice_cannot_stop_its_successor() {
    let mut m = PlaybackMachine::new();
    m.begin_loading();
    m.finish_loading();

    // First voice starts, is stopped manually, and a second voice starts
    // before the first one's end notification is delivered.
    assert_eq!(m.toggle(), ToggleAction::Start);
    let first_epoch = m.voice_epoch();
    assert_eq!(m.toggle(), ToggleAction::Stop);
    assert_eq!(m.toggle(), ToggleAction::Start);
    let second_epoch = m.voice_epoch();
    assert_ne!(first_epoch, second_epoch);

    // The late event names the first voice and must be rejected.
    assert!(!m.ended(first_epoch));
    assert_eq!(m.state(), PlaybackState::Playing);
    // The next toggle therefore stops the live voice instead of starting
    // a second concurrent one.
    assert_eq!(m.toggle(), ToggleAction::Stop);

    // The second voice's own end is still honored.
    assert_eq!(m.toggle(), ToggleAction::Start);
    assert!(m.ended(m.voice_epoch()));
    assert_eq!(m.state(), PlaybackState::Ready);
}

#[test]
fn load_failure_returns_to_idle() {
    let mut m = PlaybackMachine::new();
    m.begin_loading();
    m.fail_loading();
    assert_eq!(m.state(), PlaybackState::Idle);
    assert_eq!(m.toggle(), ToggleAction::Ignore);
}

#[test]
fn finish_outside_loading_is_ignored() {
    let mut m = PlaybackMachine::new();
    m.finish_loading();
    assert_eq!(m.state(), PlaybackState::Idle);

    m.begin_loading();
    m.finish_loading();
    m.finish_loading();
    assert_eq!(m.state(), PlaybackState::Ready);
}
