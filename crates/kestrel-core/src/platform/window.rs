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

//! The window lifecycle state machine.

use super::Platform;
use crate::error::SessionError;
use std::ops::ControlFlow;

/// Lifecycle state of a window session.
///
/// Transitions only move forward: `Created -> Looped -> Closed -> Destroyed`.
/// `Looped` may be skipped by closing a window that never looped, and
/// `destroy` may be called from any live state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum WindowState {
    /// The native window exists; the loop has not started.
    Created,
    /// The loop is running.
    Looped,
    /// The loop has exited; the native window still exists.
    Closed,
    /// Native resources are released. The session cannot be reused.
    Destroyed,
}

/// Per-frame work run by [`WindowSession::run_loop`].
pub trait LoopHooks<P: Platform> {
    /// Runs once, before the first iteration.
    fn pre_loop(&mut self, platform: &mut P);

    /// Runs one iteration. `Break` requests the window to close; the loop
    /// exits before the next iteration.
    fn frame(&mut self, platform: &mut P) -> ControlFlow<()>;

    /// Runs once, after the loop exited and the window reached `Closed`.
    fn post_loop(&mut self, platform: &mut P);
}

/// A handle to one native window and its rendering context.
///
/// Every operation checks the lifecycle state first and fails with
/// [`SessionError::InvalidState`] when its precondition is not met.
#[derive(Debug)]
pub struct WindowSession<P: Platform> {
    state: WindowState,
    close_requested: bool,
    platform: Option<P>,
}

impl<P: Platform> WindowSession<P> {
    /// Wraps a freshly created platform window. The session starts `Created`.
    pub fn new(platform: P) -> Self {
        log::info!("Window session created.");
        Self {
            state: WindowState::Created,
            close_requested: false,
            platform: Some(platform),
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> WindowState {
        self.state
    }

    /// Whether a close has been requested.
    pub fn is_close_requested(&self) -> bool {
        self.close_requested
    }

    /// The platform backend, until the session is destroyed.
    pub fn platform(&self) -> Option<&P> {
        self.platform.as_ref()
    }

    /// Runs the window loop until a close is requested.
    ///
    /// Requires `Created`; moves to `Looped`, runs `hooks.pre_loop`, then
    /// `hooks.frame` until the close flag is set, moves to `Closed` and runs
    /// `hooks.post_loop`. The flag is only checked between iterations.
    pub fn run_loop<H: LoopHooks<P>>(&mut self, hooks: &mut H) -> Result<(), SessionError> {
        if self.state != WindowState::Created {
            return Err(self.invalid("loop"));
        }
        let Some(platform) = self.platform.as_mut() else {
            return Err(self.invalid("loop"));
        };

        self.state = WindowState::Looped;
        log::info!("Entering window loop.");
        hooks.pre_loop(platform);

        let mut iterations: u64 = 0;
        while !self.close_requested {
            if hooks.frame(platform).is_break() {
                log::info!("Close requested after iteration {}.", iterations + 1);
                self.close_requested = true;
            }
            iterations += 1;
        }

        self.state = WindowState::Closed;
        log::info!("Window loop exited after {iterations} iteration(s).");
        hooks.post_loop(platform);
        Ok(())
    }

    /// Asks the window to close.
    ///
    /// On a `Looped` window this sets the flag the loop checks between
    /// iterations. A `Created` window goes straight to `Closed`. Repeated
    /// calls on a `Closed` window are no-ops.
    pub fn request_close(&mut self) -> Result<(), SessionError> {
        match self.state {
            WindowState::Created => {
                self.close_requested = true;
                self.state = WindowState::Closed;
                log::info!("Window closed before entering its loop.");
                Ok(())
            }
            WindowState::Looped => {
                if !self.close_requested {
                    log::info!("Close requested.");
                }
                self.close_requested = true;
                Ok(())
            }
            WindowState::Closed => Ok(()),
            WindowState::Destroyed => Err(self.invalid("request close on")),
        }
    }

    /// Releases the native window and context.
    ///
    /// Destroying an already destroyed session is a no-op.
    pub fn destroy(&mut self) -> Result<(), SessionError> {
        if self.state == WindowState::Destroyed {
            return Ok(());
        }
        if let Some(mut platform) = self.platform.take() {
            platform.release();
        }
        self.state = WindowState::Destroyed;
        log::info!("Window session destroyed.");
        Ok(())
    }

    fn invalid(&self, operation: &'static str) -> SessionError {
        let err = SessionError::InvalidState {
            operation,
            actual: self.state,
        };
        log::error!("{err}");
        err
    }
}

impl<P: Platform> Drop for WindowSession<P> {
    fn drop(&mut self) {
        if self.state != WindowState::Destroyed {
            let _ = self.destroy();
        }
    }
}
