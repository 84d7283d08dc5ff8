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

// Kestrel Engine Sandbox
// Draws live keyboard and gamepad state with every drawing primitive.
// Usage: sandbox [config.json]

use anyhow::Result;
use kestrel_sdk::prelude::*;

const KEY_SIZE: f32 = 28.0;
const KEY_GAP: f32 = 4.0;
const KEYS_PER_ROW: usize = 13;

struct SandboxApp {
    font: Option<String>,
    stop: bool,
    spin_degrees: f32,
    fps: f32,
    key_events: u64,
    runtime: Option<Stopwatch>,
}

impl SandboxApp {
    fn new(config: &WindowConfig) -> Self {
        Self {
            font: config.fonts.first().map(|f| f.name.clone()),
            stop: false,
            spin_degrees: 0.0,
            fps: 0.0,
            key_events: 0,
            runtime: None,
        }
    }

    fn label(&self, surface: &mut dyn DrawingSurface, text: &str, at: Point, color: Color) {
        if let Some(font) = self.font.as_deref() {
            surface.draw_text(text, at, font, 16.0, color);
        }
    }

    fn draw_keyboard(&self, surface: &mut dyn DrawingSurface, keyboard: &KeyboardState, origin: Point) {
        for (i, key) in PrintableKey::ALL.iter().enumerate() {
            let column = (i % KEYS_PER_ROW) as f32;
            let row = (i / KEYS_PER_ROW) as f32;
            let at = Point::new(
                origin.x + column * (KEY_SIZE + KEY_GAP),
                origin.y + row * (KEY_SIZE + KEY_GAP),
            );
            let style = if keyboard.is_pressed(*key) {
                RectStyle::filled(Color::WHITE, Color::GREEN)
            } else {
                RectStyle::outline(Color::GRAY)
            };
            surface.draw_rect(at, KEY_SIZE, KEY_SIZE, style, None);
            self.label(surface, &format!("{key:?}"), Point::new(at.x + 8.0, at.y + 5.0), Color::WHITE);
        }

        let y = origin.y + 2.0 * (KEY_SIZE + KEY_GAP) + KEY_GAP;
        for (i, key) in FunctionKey::ALL.iter().enumerate() {
            let at = Point::new(origin.x + i as f32 * (KEY_SIZE + KEY_GAP) * 1.5, y);
            let color = if keyboard.is_pressed(*key) {
                Color::YELLOW
            } else {
                Color::GRAY
            };
            surface.draw_rect(at, KEY_SIZE * 1.4, KEY_SIZE, RectStyle::outline(color), None);
        }
    }

    fn draw_pad(&self, surface: &mut dyn DrawingSurface, pad: &Pad, centre: Point) {
        // Stick travel ring.
        let ring: Vec<Point> = (0..24)
            .map(|i| {
                let angle = (i as f32 * 15.0).to_radians();
                Point::new(centre.x + 30.0 * angle.cos(), centre.y + 30.0 * angle.sin())
            })
            .collect();
        surface.draw_loop(&ring, Color::GRAY);

        let stick = Point::new(centre.x + pad.joy.x * 30.0, centre.y + pad.joy.y * 30.0);
        let stick_color = if pad.joy.pressed { Color::RED } else { Color::WHITE };
        surface.draw_line(centre, stick, stick_color, None);
        surface.draw_rect(
            Point::new(stick.x - 3.0, stick.y - 3.0),
            6.0,
            6.0,
            RectStyle::filled(stick_color, stick_color),
            None,
        );

        // Trigger bar.
        let trigger = pad.trigger.clamp(-1.0, 1.0) * 0.5 + 0.5;
        let bar = Point::new(centre.x - 30.0, centre.y - 50.0);
        surface.draw_rect(bar, 60.0, 8.0, RectStyle::outline(Color::GRAY), None);
        if trigger > 0.0 {
            surface.draw_rect(bar, 60.0 * trigger, 8.0, RectStyle::filled(Color::BLUE, Color::BLUE), None);
        }

        for (i, button) in Button::ALL.iter().enumerate() {
            let at = Point::new(centre.x - 42.0 + i as f32 * 12.0, centre.y + 42.0);
            if pad.button(*button) {
                surface.draw_rect(at, 10.0, 10.0, RectStyle::filled(Color::YELLOW, Color::YELLOW), None);
            } else {
                surface.draw_point(Point::new(at.x + 5.0, at.y + 5.0), Color::GRAY);
            }
        }
    }
}

impl Application for SandboxApp {
    fn pre_loop(&mut self) {
        log::info!("SandboxApp: press Escape to quit.");
        self.runtime = Some(Stopwatch::new());
    }

    fn on_update_state(&mut self, _input: &InputSnapshot, frame: &FrameProperty) {
        self.spin_degrees = (self.spin_degrees + 90.0 * frame.delta_seconds()) % 360.0;
    }

    fn on_render(&mut self, surface: &mut dyn DrawingSurface, input: &InputSnapshot, frame: &FrameProperty) {
        // Smoothed so the counter stays readable.
        self.fps = self.fps * 0.9 + frame.fps() * 0.1;

        let width = frame.picture_size.width as f32;
        self.label(surface, &format!("{:.0} fps", self.fps), Point::new(10.0, 10.0), Color::WHITE);
        self.draw_keyboard(surface, input.keyboard(), Point::new(10.0, 40.0));

        for index in JoystickIndex::all() {
            let top = 200.0 + index.get() as f32 * 140.0;
            match input.joystick(index) {
                Some(joystick) => {
                    self.label(surface, joystick.name(), Point::new(10.0, top), Color::WHITE);
                    self.draw_pad(surface, joystick.pad(Side::Left), Point::new(80.0, top + 70.0));
                    self.draw_pad(surface, joystick.pad(Side::Right), Point::new(220.0, top + 70.0));
                }
                None => {
                    self.label(surface, "(no controller)", Point::new(10.0, top), Color::GRAY);
                }
            }
        }

        let pivot = Point::new(width - 80.0, 80.0);
        surface.draw_rect(
            Point::new(pivot.x - 30.0, pivot.y - 30.0),
            60.0,
            60.0,
            RectStyle::filled(Color::WHITE, Color::rgba(255, 0, 0, 160)),
            Some((pivot, self.spin_degrees)),
        );
        surface.draw_line(
            pivot,
            Point::new(pivot.x + 50.0, pivot.y),
            Color::GREEN,
            Some((pivot, -self.spin_degrees)),
        );
    }

    fn should_stop(&self) -> bool {
        self.stop
    }

    fn on_printable_key(&mut self, key: PrintableKey, status: KeyStatus) {
        self.key_events += 1;
        log::debug!("{key:?} {status:?}");
    }

    fn on_function_key(&mut self, key: FunctionKey, status: KeyStatus) {
        self.key_events += 1;
        if key == FunctionKey::Escape && status == KeyStatus::Press {
            log::info!("Escape pressed, stopping.");
            self.stop = true;
        }
    }

    fn post_loop(&mut self) {
        let seconds = self.runtime.as_ref().map_or(0.0, Stopwatch::elapsed_secs_f64);
        log::info!(
            "SandboxApp: ran {seconds:.1}s, {} key event(s) received.",
            self.key_events
        );
    }
}

fn main() -> Result<()> {
    use env_logger::{Builder, Env};

    Builder::from_env(Env::default().default_filter_or("info"))
        .filter_module("wgpu_hal", log::LevelFilter::Error)
        .filter_module("wgpu_core", log::LevelFilter::Warn)
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => WindowConfig::from_json_file(&path)?,
        None => WindowConfig::default().with_title("Kestrel Sandbox"),
    };

    let mut app = SandboxApp::new(&config);
    Engine::run(&config, &mut app)?;
    Ok(())
}
