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

//! The engine loop: the orchestrator of one engine run.
//!
//! Each iteration runs, in order:
//! 1. poll and dispatch pending platform events (key callbacks fire here);
//! 2. sample every joystick slot into the [`InputSnapshot`];
//! 3. the application's update callback;
//! 4. the application's render callback on a cleared frame buffer;
//! 5. presentation;
//! 6. the stop check. A stop request, or a close event seen in step 1, ends
//!    the loop before the next iteration.
//!
//! One poll cycle always produces exactly one update and one render.

use crate::app::Application;
use crate::error::SessionError;
use crate::input::{InputSnapshot, JoystickIndex, LogicalKey};
use crate::platform::window::{LoopHooks, WindowSession, WindowState};
use crate::platform::{Platform, PlatformEvent};
use crate::timing::{FrameClock, FramePhase};
use std::ops::ControlFlow;
use std::time::Instant;

/// Whether the loop is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoopState {
    /// The loop is iterating.
    Running,
    /// The loop has not started or has finished.
    #[default]
    Stopped,
}

/// Owns the window session, the input snapshot and the frame clock of one
/// engine run.
#[derive(Debug)]
pub struct EngineLoop<P: Platform> {
    session: WindowSession<P>,
    input: InputSnapshot,
    loop_state: LoopState,
    frame_count: u64,
}

impl<P: Platform> EngineLoop<P> {
    /// Creates the engine around a freshly created platform window.
    pub fn new(platform: P) -> Self {
        Self {
            session: WindowSession::new(platform),
            input: InputSnapshot::new(),
            loop_state: LoopState::Stopped,
            frame_count: 0,
        }
    }

    /// The window session.
    pub fn session(&self) -> &WindowSession<P> {
        &self.session
    }

    /// The input snapshot as of the last iteration.
    pub fn input(&self) -> &InputSnapshot {
        &self.input
    }

    /// Whether the loop is running.
    pub fn loop_state(&self) -> LoopState {
        self.loop_state
    }

    /// Number of iterations completed.
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Current window lifecycle state.
    pub fn window_state(&self) -> WindowState {
        self.session.state()
    }

    /// Runs `app` until it asks to stop or the window is closed.
    ///
    /// Fails if the window is not in `Created` state.
    pub fn run<A: Application>(&mut self, app: &mut A) -> Result<(), SessionError> {
        let mut driver = FrameDriver {
            app,
            input: &mut self.input,
            clock: FrameClock::default(),
            loop_state: &mut self.loop_state,
            frame_count: &mut self.frame_count,
        };
        self.session.run_loop(&mut driver)
    }

    /// Asks the window to close. See [`WindowSession::request_close`].
    pub fn request_close(&mut self) -> Result<(), SessionError> {
        self.session.request_close()
    }

    /// Releases the window. See [`WindowSession::destroy`].
    pub fn destroy(&mut self) -> Result<(), SessionError> {
        self.session.destroy()
    }
}

/// Runs the per-frame sequence on behalf of one [`EngineLoop::run`] call.
struct FrameDriver<'a, A: Application> {
    app: &'a mut A,
    input: &'a mut InputSnapshot,
    clock: FrameClock,
    loop_state: &'a mut LoopState,
    frame_count: &'a mut u64,
}

impl<A: Application, P: Platform> LoopHooks<P> for FrameDriver<'_, A> {
    fn pre_loop(&mut self, _platform: &mut P) {
        *self.loop_state = LoopState::Running;
        self.app.pre_loop();
        self.clock = FrameClock::starting_at(Instant::now());
    }

    fn frame(&mut self, platform: &mut P) -> ControlFlow<()> {
        // 1. Poll. Key callbacks complete before anything else runs.
        let mut close_event = false;
        {
            let input = &mut *self.input;
            let app = &mut *self.app;
            platform.poll_events(&mut |event| match event {
                PlatformEvent::Key { code, status } => match input.apply_key_event(code, status) {
                    Some(LogicalKey::Printable(key)) => app.on_printable_key(key, status),
                    Some(LogicalKey::Function(key)) => app.on_function_key(key, status),
                    None => {}
                },
                PlatformEvent::CloseRequested => {
                    log::info!("Window close control activated.");
                    close_event = true;
                }
                PlatformEvent::Resized(size) => {
                    log::debug!("Drawable area resized to {}x{}", size.width, size.height);
                }
            });
        }

        // 2. Sample devices.
        for index in JoystickIndex::all() {
            let sample = platform.sample_joystick(index);
            self.input.sample_joystick(index, sample.as_ref());
        }

        // 3. Update.
        let update = self.clock.begin(FramePhase::Update, platform.picture_size());
        self.app.on_update_state(&*self.input, &update);

        // 4. Render.
        let render = self.clock.begin(FramePhase::Render, platform.picture_size());
        self.app.on_render(platform.begin_frame(), &*self.input, &render);

        // 5. Present.
        if let Err(e) = platform.present() {
            log::error!("Presentation error: {e:#}");
        }
        *self.frame_count += 1;
        log::trace!("Frame {} complete.", *self.frame_count);

        // 6. Stop check.
        if self.app.should_stop() || close_event {
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(())
        }
    }

    fn post_loop(&mut self, _platform: &mut P) {
        *self.loop_state = LoopState::Stopped;
        self.app.post_loop();
    }
}
