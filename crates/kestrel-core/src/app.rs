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

//! The callback set an embedding application implements.

use crate::input::{FunctionKey, InputSnapshot, KeyStatus, PrintableKey};
use crate::renderer::DrawingSurface;
use crate::timing::FrameProperty;

/// Callbacks driven by the engine loop.
///
/// The engine calls them in a fixed order: `pre_loop` once, then per
/// iteration any key callbacks (during event polling), `on_update_state`,
/// `on_render` and finally `should_stop`. `post_loop` runs once after the
/// window closed. The application never drives the loop itself; it only
/// signals that it wants to stop.
pub trait Application {
    /// Called once after window creation, before the first iteration.
    fn pre_loop(&mut self) {}

    /// Advances application state. Called exactly once per iteration.
    fn on_update_state(&mut self, input: &InputSnapshot, frame: &FrameProperty);

    /// Draws the frame. Called exactly once per iteration, after
    /// [`on_update_state`](Self::on_update_state).
    fn on_render(
        &mut self,
        surface: &mut dyn DrawingSurface,
        input: &InputSnapshot,
        frame: &FrameProperty,
    );

    /// Polled after each render; returning `true` closes the window.
    fn should_stop(&self) -> bool;

    /// A printable key was pressed or released.
    fn on_printable_key(&mut self, _key: PrintableKey, _status: KeyStatus) {}

    /// A function key was pressed or released.
    fn on_function_key(&mut self, _key: FunctionKey, _status: KeyStatus) {}

    /// Called once after the loop exits and the window is closed.
    fn post_loop(&mut self) {}
}
