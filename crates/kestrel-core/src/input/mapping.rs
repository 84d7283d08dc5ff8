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

//! Translation from a controller family's raw buffer layout to logical controls.
//!
//! Each family carries a fixed table. Both tables follow the native code
//! order of the Linux evdev drivers (`xpad`, `hid-sony`): axes are
//! `X, Y, Z, RX, RY, RZ, HAT0X, HAT0Y`, buttons are the `BTN_*` codes in
//! ascending order. The D-pad is a hat axis on both families, so the left
//! pad's direction buttons have no raw source.

use super::joystick::{Button, Side, ValueKind};

/// A known controller family and its raw layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeviceMapping {
    /// Microsoft Xbox 360 / One / Series pads.
    Xbox,
    /// Sony DualShock 3 / 4 pads.
    DualShock,
}

const XBOX_NAMES: &[&str] = &["xbox", "x-box"];
const DUALSHOCK_NAMES: &[&str] = &["dualshock", "ps4", "ps3", "wireless controller"];

impl DeviceMapping {
    /// Selects the mapping for a device by its reported name.
    ///
    /// Matching is a case-insensitive substring search. Unknown devices
    /// yield `None`; no layout is guessed.
    pub fn for_device_name(name: &str) -> Option<Self> {
        let name = name.to_ascii_lowercase();
        let matches = |needles: &[&str]| needles.iter().any(|n| name.contains(n));
        if matches(XBOX_NAMES) {
            Some(DeviceMapping::Xbox)
        } else if matches(DUALSHOCK_NAMES) {
            Some(DeviceMapping::DualShock)
        } else {
            None
        }
    }

    /// Raw axis index feeding `kind` on `side`, if the device has one.
    pub fn value_index(&self, side: Side, kind: ValueKind) -> Option<usize> {
        // Both families expose sticks and analog triggers on the same axes.
        match (self, side, kind) {
            (_, Side::Left, ValueKind::JoyX) => Some(0),
            (_, Side::Left, ValueKind::JoyY) => Some(1),
            (_, Side::Left, ValueKind::TriggerPosition) => Some(2),
            (_, Side::Right, ValueKind::JoyX) => Some(3),
            (_, Side::Right, ValueKind::JoyY) => Some(4),
            (_, Side::Right, ValueKind::TriggerPosition) => Some(5),
        }
    }

    /// Raw button index feeding `button` on `side`, if the device has one.
    pub fn button_index(&self, side: Side, button: Button) -> Option<usize> {
        match self {
            DeviceMapping::Xbox => match (side, button) {
                (Side::Left, Button::Main) => Some(6),
                (Side::Left, Button::Bumper) => Some(4),
                (Side::Left, Button::Joy) => Some(9),
                (Side::Left, _) => None,
                (Side::Right, Button::Up) => Some(3),
                (Side::Right, Button::Right) => Some(1),
                (Side::Right, Button::Down) => Some(0),
                (Side::Right, Button::Left) => Some(2),
                (Side::Right, Button::Main) => Some(7),
                (Side::Right, Button::Bumper) => Some(5),
                (Side::Right, Button::Joy) => Some(10),
            },
            DeviceMapping::DualShock => match (side, button) {
                (Side::Left, Button::Main) => Some(8),
                (Side::Left, Button::Bumper) => Some(4),
                (Side::Left, Button::Joy) => Some(11),
                (Side::Left, _) => None,
                (Side::Right, Button::Up) => Some(2),
                (Side::Right, Button::Right) => Some(1),
                (Side::Right, Button::Down) => Some(0),
                (Side::Right, Button::Left) => Some(3),
                (Side::Right, Button::Main) => Some(9),
                (Side::Right, Button::Bumper) => Some(5),
                (Side::Right, Button::Joy) => Some(12),
            },
        }
    }
}
