// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

mod common;

use common::{journal, RecordingApp, ScriptedFrame, ScriptedPlatform};
use kestrel_core::input::{
    Button, FunctionKey, JoystickIndex, KeyStatus, PrintableKey, RawJoystickSample, RawKeyCode,
    Side, ValueKind,
};
use kestrel_core::{
    EngineLoop, LoopState, PictureSize, PlatformEvent, SessionError, WindowState,
};

fn key(code: u32, status: KeyStatus) -> PlatformEvent {
    PlatformEvent::Key {
        code: RawKeyCode(code),
        status,
    }
}

fn xbox_sample(id: &str, left_x: f32, bumper: bool) -> RawJoystickSample {
    let mut axes = vec![0.0; 6];
    axes[0] = left_x;
    let mut buttons = vec![false; 11];
    buttons[4] = bumper;
    RawJoystickSample {
        id: id.to_string(),
        name: "Microsoft X-Box 360 pad".to_string(),
        axes,
        buttons,
    }
}

fn slot(i: usize) -> JoystickIndex {
    JoystickIndex::new(i).unwrap()
}

#[test]
fn single_iteration_then_close_and_destroy() {
    let log = journal();
    let platform = ScriptedPlatform::new(Vec::new(), log.clone());
    let released = platform.released.clone();
    let mut engine = EngineLoop::new(platform);
    let mut app = RecordingApp::new(log.clone(), Some(1));

    assert_eq!(engine.window_state(), WindowState::Created);
    assert_eq!(engine.loop_state(), LoopState::Stopped);

    engine.run(&mut app).unwrap();

    assert_eq!(app.updates, 1);
    assert_eq!(app.renders, 1);
    assert_eq!(engine.frame_count(), 1);
    assert_eq!(engine.window_state(), WindowState::Closed);
    assert_eq!(engine.loop_state(), LoopState::Stopped);

    engine.destroy().unwrap();
    assert_eq!(engine.window_state(), WindowState::Destroyed);
    assert_eq!(*released.borrow(), 1);
}

#[test]
fn each_iteration_runs_its_steps_in_order() {
    let log = journal();
    let platform = ScriptedPlatform::new(Vec::new(), log.clone());
    let mut engine = EngineLoop::new(platform);
    let mut app = RecordingApp::new(log.clone(), Some(3));

    engine.run(&mut app).unwrap();

    let mut expected = vec!["pre_loop"];
    for _ in 0..3 {
        expected.extend(["poll", "update", "render", "present"]);
    }
    expected.push("post_loop");
    assert_eq!(*log.borrow(), expected);
}

#[test]
fn render_receives_a_cleared_frame_each_iteration() {
    let log = journal();
    let mut engine = EngineLoop::new(ScriptedPlatform::new(Vec::new(), log.clone()));
    let mut app = RecordingApp::new(log, Some(2));

    engine.run(&mut app).unwrap();

    let platform = engine.session().platform().unwrap();
    assert_eq!(
        platform.surface.calls,
        vec!["clear", "text mono frame", "clear", "text mono frame"]
    );
}

#[test]
fn key_press_updates_state_and_fires_callback_once() {
    let log = journal();
    let script = vec![ScriptedFrame::with_events(vec![key(0x04, KeyStatus::Press)])];
    let mut engine = EngineLoop::new(ScriptedPlatform::new(script, log.clone()));
    let mut app = RecordingApp::new(log.clone(), Some(2));

    engine.run(&mut app).unwrap();

    assert_eq!(app.printable, vec![(PrintableKey::A, KeyStatus::Press)]);
    assert!(app.function.is_empty());
    assert_eq!(
        app.seen_inputs[0].keyboard().status(PrintableKey::A),
        KeyStatus::Press
    );
    // The callback fired during the poll step, before the first update.
    let entries = log.borrow();
    let key_at = entries.iter().position(|e| e == "key A Press").unwrap();
    let update_at = entries.iter().position(|e| e == "update").unwrap();
    assert!(key_at < update_at);
}

#[test]
fn release_follows_press_across_iterations() {
    let log = journal();
    let script = vec![
        ScriptedFrame::with_events(vec![key(0x29, KeyStatus::Press)]),
        ScriptedFrame::with_events(vec![key(0x29, KeyStatus::Release)]),
    ];
    let mut engine = EngineLoop::new(ScriptedPlatform::new(script, log.clone()));
    let mut app = RecordingApp::new(log, Some(2));

    engine.run(&mut app).unwrap();

    assert_eq!(
        app.function,
        vec![
            (FunctionKey::Escape, KeyStatus::Press),
            (FunctionKey::Escape, KeyStatus::Release)
        ]
    );
    assert!(app.seen_inputs[0].keyboard().is_pressed(FunctionKey::Escape));
    assert!(!app.seen_inputs[1].keyboard().is_pressed(FunctionKey::Escape));
}

#[test]
fn repeats_and_unmapped_keys_are_ignored() {
    let log = journal();
    let script = vec![ScriptedFrame::with_events(vec![
        key(0x04, KeyStatus::Repeat),
        key(0xE0, KeyStatus::Press),
        key(0x3A, KeyStatus::Press),
    ])];
    let mut engine = EngineLoop::new(ScriptedPlatform::new(script, log.clone()));
    let mut app = RecordingApp::new(log, Some(1));

    engine.run(&mut app).unwrap();

    assert!(app.printable.is_empty());
    assert!(app.function.is_empty());
    assert!(app.seen_inputs[0]
        .keyboard()
        .iter()
        .all(|(_, status)| status == KeyStatus::Release));
}

#[test]
fn window_close_event_finishes_the_iteration_then_stops() {
    let log = journal();
    let script = vec![
        ScriptedFrame::default(),
        ScriptedFrame::with_events(vec![PlatformEvent::CloseRequested]),
    ];
    let mut engine = EngineLoop::new(ScriptedPlatform::new(script, log.clone()));
    let mut app = RecordingApp::new(log, None);

    engine.run(&mut app).unwrap();

    assert_eq!(app.updates, 2);
    assert_eq!(app.renders, 2);
    assert_eq!(engine.window_state(), WindowState::Closed);
    assert!(engine.session().is_close_requested());
}

#[test]
fn resize_is_visible_in_the_same_iteration() {
    let log = journal();
    let script = vec![ScriptedFrame::with_events(vec![PlatformEvent::Resized(
        PictureSize::new(800, 600),
    )])];
    let mut engine = EngineLoop::new(ScriptedPlatform::new(script, log.clone()));
    let mut app = RecordingApp::new(log, Some(1));

    engine.run(&mut app).unwrap();

    assert_eq!(app.update_frames[0].picture_size, PictureSize::new(800, 600));
    assert_eq!(app.render_frames[0].picture_size, PictureSize::new(800, 600));
}

#[test]
fn frame_times_chain_per_phase() {
    let log = journal();
    let mut engine = EngineLoop::new(ScriptedPlatform::new(Vec::new(), log.clone()));
    let mut app = RecordingApp::new(log, Some(3));

    engine.run(&mut app).unwrap();

    for phase in [&app.update_frames, &app.render_frames] {
        for frame in phase.iter() {
            assert!(frame.time_last <= frame.time_now);
        }
        for pair in phase.windows(2) {
            assert_eq!(pair[0].time_now, pair[1].time_last);
        }
    }
    // Render of iteration N starts after its update.
    for (update, render) in app.update_frames.iter().zip(&app.render_frames) {
        assert!(update.time_now <= render.time_now);
    }
}

#[test]
fn looping_twice_fails() {
    let log = journal();
    let mut engine = EngineLoop::new(ScriptedPlatform::new(Vec::new(), log.clone()));
    let mut app = RecordingApp::new(log, Some(1));

    engine.run(&mut app).unwrap();
    let err = engine.run(&mut app).unwrap_err();

    assert_eq!(
        err,
        SessionError::InvalidState {
            operation: "loop",
            actual: WindowState::Closed
        }
    );
    assert_eq!(app.updates, 1);
}

#[test]
fn close_before_loop_then_double_destroy() {
    let log = journal();
    let platform = ScriptedPlatform::new(Vec::new(), log.clone());
    let released = platform.released.clone();
    let mut engine = EngineLoop::new(platform);
    let mut app = RecordingApp::new(log.clone(), Some(1));

    engine.request_close().unwrap();
    engine.destroy().unwrap();
    engine.destroy().unwrap();

    assert_eq!(engine.window_state(), WindowState::Destroyed);
    assert_eq!(*released.borrow(), 1);
    assert!(engine.run(&mut app).is_err());
    assert!(engine.request_close().is_err());
    assert!(log.borrow().is_empty());
}

#[test]
fn joystick_appears_is_swapped_and_released() {
    let log = journal();
    let mut first = ScriptedFrame::default();
    first.joysticks[0] = Some(xbox_sample("pad-a", 0.5, true));
    let mut second = ScriptedFrame::default();
    second.joysticks[0] = Some(xbox_sample("pad-b", -0.25, false));
    let script = vec![ScriptedFrame::default(), first, second, ScriptedFrame::default()];
    let mut engine = EngineLoop::new(ScriptedPlatform::new(script, log.clone()));
    let mut app = RecordingApp::new(log, Some(4));

    engine.run(&mut app).unwrap();

    let seen = &app.seen_inputs;
    assert!(seen[0].joystick(slot(0)).is_none());

    let pad = seen[1].joystick(slot(0)).unwrap();
    assert_eq!(pad.id(), "pad-a");
    assert_eq!(pad.pad(Side::Left).value(ValueKind::JoyX), 0.5);
    assert!(pad.pad(Side::Left).button(Button::Bumper));

    let pad = seen[2].joystick(slot(0)).unwrap();
    assert_eq!(pad.id(), "pad-b");
    assert_eq!(pad.pad(Side::Left).value(ValueKind::JoyX), -0.25);
    assert!(!pad.pad(Side::Left).button(Button::Bumper));

    assert!(seen[3].joystick(slot(0)).is_none());
    assert!(seen.iter().all(|s| s.joystick(slot(1)).is_none()));
}

#[test]
fn unrecognized_controller_does_not_take_a_slot() {
    let log = journal();
    let mut frame = ScriptedFrame::default();
    frame.joysticks[1] = Some(RawJoystickSample {
        id: "flight-stick".to_string(),
        name: "Acme Flight Stick".to_string(),
        axes: vec![0.0; 3],
        buttons: vec![false; 4],
    });
    let mut engine = EngineLoop::new(ScriptedPlatform::new(vec![frame], log.clone()));
    let mut app = RecordingApp::new(log, Some(1));

    engine.run(&mut app).unwrap();

    assert!(app.seen_inputs[0].joystick(slot(1)).is_none());
}

#[test]
fn input_survives_the_run() {
    let log = journal();
    let script = vec![ScriptedFrame::with_events(vec![key(0x16, KeyStatus::Press)])];
    let mut engine = EngineLoop::new(ScriptedPlatform::new(script, log.clone()));
    let mut app = RecordingApp::new(log, Some(1));

    engine.run(&mut app).unwrap();

    assert!(engine.input().keyboard().is_pressed(PrintableKey::S));
}
