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

//! Scripted platform and recording application shared by the integration tests.

#![allow(dead_code)]

use kestrel_core::input::{
    FunctionKey, InputSnapshot, JoystickIndex, KeyStatus, PrintableKey, RawJoystickSample,
    MAX_JOYSTICKS,
};
use kestrel_core::renderer::{Color, DrawingSurface, Point, RectStyle};
use kestrel_core::{Application, FrameProperty, PictureSize, Platform, PlatformEvent};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

/// Shared, ordered record of everything that happened during a run.
pub type Journal = Rc<RefCell<Vec<String>>>;

pub fn journal() -> Journal {
    Rc::new(RefCell::new(Vec::new()))
}

/// A drawing surface that only records calls.
#[derive(Default)]
pub struct RecordingSurface {
    pub calls: Vec<String>,
}

impl DrawingSurface for RecordingSurface {
    fn size(&self) -> (u32, u32) {
        (320, 240)
    }

    fn draw_point(&mut self, at: Point, _color: Color) {
        self.calls.push(format!("point {} {}", at.x, at.y));
    }

    fn draw_line(&mut self, _from: Point, _to: Point, _color: Color, _rotation: Option<(Point, f32)>) {
        self.calls.push("line".to_string());
    }

    fn draw_loop(&mut self, points: &[Point], _color: Color) {
        self.calls.push(format!("loop {}", points.len()));
    }

    fn draw_rect(
        &mut self,
        _origin: Point,
        _width: f32,
        _height: f32,
        _style: RectStyle,
        _rotation: Option<(Point, f32)>,
    ) {
        self.calls.push("rect".to_string());
    }

    fn draw_text(&mut self, text: &str, _at: Point, font: &str, _px: f32, _color: Color) {
        self.calls.push(format!("text {font} {text}"));
    }
}

/// One poll cycle's worth of scripted hardware activity.
#[derive(Default, Clone)]
pub struct ScriptedFrame {
    pub events: Vec<PlatformEvent>,
    pub joysticks: [Option<RawJoystickSample>; MAX_JOYSTICKS],
}

impl ScriptedFrame {
    pub fn with_events(events: Vec<PlatformEvent>) -> Self {
        Self {
            events,
            ..Default::default()
        }
    }
}

/// A platform that replays scripted frames. Once the script runs out it
/// keeps reporting the last frame's joysticks and no events.
pub struct ScriptedPlatform {
    script: VecDeque<ScriptedFrame>,
    current: ScriptedFrame,
    pub surface: RecordingSurface,
    pub size: PictureSize,
    journal: Journal,
    pub released: Rc<RefCell<u32>>,
}

impl ScriptedPlatform {
    pub fn new(script: Vec<ScriptedFrame>, journal: Journal) -> Self {
        Self {
            script: script.into(),
            current: ScriptedFrame::default(),
            surface: RecordingSurface::default(),
            size: PictureSize::new(320, 240),
            journal,
            released: Rc::new(RefCell::new(0)),
        }
    }
}

impl Platform for ScriptedPlatform {
    fn poll_events(&mut self, sink: &mut dyn FnMut(PlatformEvent)) {
        self.journal.borrow_mut().push("poll".to_string());
        match self.script.pop_front() {
            Some(frame) => self.current = frame,
            None => self.current.events.clear(),
        }
        for event in self.current.events.clone() {
            if let PlatformEvent::Resized(size) = event {
                self.size = size;
            }
            sink(event);
        }
    }

    fn sample_joystick(&mut self, index: JoystickIndex) -> Option<RawJoystickSample> {
        self.current.joysticks[index.get()].clone()
    }

    fn picture_size(&self) -> PictureSize {
        self.size
    }

    fn begin_frame(&mut self) -> &mut dyn DrawingSurface {
        self.surface.calls.push("clear".to_string());
        &mut self.surface
    }

    fn present(&mut self) -> anyhow::Result<()> {
        self.journal.borrow_mut().push("present".to_string());
        Ok(())
    }

    fn release(&mut self) {
        *self.released.borrow_mut() += 1;
    }
}

/// An application that records every callback and stops after a fixed
/// number of renders (or never, when `stop_after` is `None`).
pub struct RecordingApp {
    journal: Journal,
    pub stop_after: Option<u32>,
    pub renders: u32,
    pub updates: u32,
    pub printable: Vec<(PrintableKey, KeyStatus)>,
    pub function: Vec<(FunctionKey, KeyStatus)>,
    pub seen_inputs: Vec<InputSnapshot>,
    pub update_frames: Vec<FrameProperty>,
    pub render_frames: Vec<FrameProperty>,
}

impl RecordingApp {
    pub fn new(journal: Journal, stop_after: Option<u32>) -> Self {
        Self {
            journal,
            stop_after,
            renders: 0,
            updates: 0,
            printable: Vec::new(),
            function: Vec::new(),
            seen_inputs: Vec::new(),
            update_frames: Vec::new(),
            render_frames: Vec::new(),
        }
    }

    fn log(&self, entry: impl Into<String>) {
        self.journal.borrow_mut().push(entry.into());
    }
}

impl Application for RecordingApp {
    fn pre_loop(&mut self) {
        self.log("pre_loop");
    }

    fn on_update_state(&mut self, input: &InputSnapshot, frame: &FrameProperty) {
        self.updates += 1;
        self.seen_inputs.push(input.clone());
        self.update_frames.push(*frame);
        self.log("update");
    }

    fn on_render(&mut self, surface: &mut dyn DrawingSurface, _input: &InputSnapshot, frame: &FrameProperty) {
        self.renders += 1;
        self.render_frames.push(*frame);
        surface.draw_text("frame", Point::new(0.0, 0.0), "mono", 12.0, Color::WHITE);
        self.log("render");
    }

    fn should_stop(&self) -> bool {
        self.stop_after.is_some_and(|n| self.renders >= n)
    }

    fn on_printable_key(&mut self, key: PrintableKey, status: KeyStatus) {
        self.printable.push((key, status));
        self.log(format!("key {key:?} {status:?}"));
    }

    fn on_function_key(&mut self, key: FunctionKey, status: KeyStatus) {
        self.function.push((key, status));
        self.log(format!("key {key:?} {status:?}"));
    }

    fn post_loop(&mut self) {
        self.log("post_loop");
    }
}
