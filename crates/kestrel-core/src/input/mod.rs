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

//! Input-state synchronization.
//!
//! Raw per-frame hardware samples are folded into an [`InputSnapshot`]:
//! * keyboard events are applied as they are dispatched, through the fixed
//!   raw-code table in [`keys`];
//! * joysticks are polled once per frame and translated through the
//!   controller family's [`DeviceMapping`].

pub mod joystick;
pub mod keys;
pub mod mapping;
pub mod snapshot;

pub use joystick::{
    Button, JoyAxis, JoystickIndex, JoystickState, Pad, RawJoystickSample, Side, ValueKind,
    MAX_JOYSTICKS,
};
pub use keys::{FunctionKey, KeyStatus, KeyboardState, LogicalKey, PrintableKey, RawKeyCode};
pub use mapping::DeviceMapping;
pub use snapshot::InputSnapshot;
