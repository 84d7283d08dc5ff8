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

//! Provides abstractions over platform-specific functionalities.
//!
//! A windowing backend (winit, SDL, a scripted test double, ...) implements
//! [`Platform`] to be driven by a [`window::WindowSession`]. Everything runs
//! on the loop thread; no method may block waiting for input.

pub mod window;

use crate::input::{JoystickIndex, KeyStatus, RawJoystickSample, RawKeyCode};
use crate::renderer::DrawingSurface;
use crate::timing::PictureSize;

pub use window::{LoopHooks, WindowSession, WindowState};

/// A hardware or window-system event delivered during the poll step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformEvent {
    /// A key changed state.
    Key {
        /// The key's raw code.
        code: RawKeyCode,
        /// What happened to it.
        status: KeyStatus,
    },
    /// The user asked to close the window (e.g. clicked its close control).
    CloseRequested,
    /// The drawable area changed size. The backend has already resized its
    /// frame buffer when this is delivered.
    Resized(PictureSize),
}

/// The native side of a window session.
pub trait Platform {
    /// Dispatches every pending event to `sink`, synchronously, without
    /// waiting for new ones.
    fn poll_events(&mut self, sink: &mut dyn FnMut(PlatformEvent));

    /// Samples the device occupying `index`, if any.
    ///
    /// Returns `None` when no device is present or any part of its sample
    /// (id, name, buffers) is unavailable.
    fn sample_joystick(&mut self, index: JoystickIndex) -> Option<RawJoystickSample>;

    /// Current size of the drawable area.
    fn picture_size(&self) -> PictureSize;

    /// Clears the frame buffer and returns it for this frame's drawing.
    fn begin_frame(&mut self) -> &mut dyn DrawingSurface;

    /// Presents the frame buffer.
    fn present(&mut self) -> anyhow::Result<()>;

    /// Releases the native window, context and device handles.
    fn release(&mut self);
}
