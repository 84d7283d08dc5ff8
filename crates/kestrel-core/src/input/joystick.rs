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

//! Gamepad model: controller slots, logical controls and per-device state.

/// Number of logical controller slots.
pub const MAX_JOYSTICKS: usize = 2;

/// A logical controller slot, stable across device re-plugging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct JoystickIndex(usize);

impl JoystickIndex {
    /// Returns the slot for `index`, or `None` past [`MAX_JOYSTICKS`].
    pub const fn new(index: usize) -> Option<Self> {
        if index < MAX_JOYSTICKS {
            Some(Self(index))
        } else {
            None
        }
    }

    /// The slot's ordinal.
    pub const fn get(self) -> usize {
        self.0
    }

    /// Iterates over every slot in order.
    pub fn all() -> impl Iterator<Item = JoystickIndex> {
        (0..MAX_JOYSTICKS).map(JoystickIndex)
    }
}

/// Which half of the controller a control belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    /// The left half (left stick, left trigger, D-pad side).
    Left,
    /// The right half (right stick, right trigger, face-button side).
    Right,
}

impl Side {
    /// Both sides, left first.
    pub const ALL: [Side; 2] = [Side::Left, Side::Right];
}

/// A continuous value a pad exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// Stick horizontal deflection.
    JoyX,
    /// Stick vertical deflection.
    JoyY,
    /// Analog trigger travel.
    TriggerPosition,
}

impl ValueKind {
    /// Every value kind.
    pub const ALL: [ValueKind; 3] = [ValueKind::JoyX, ValueKind::JoyY, ValueKind::TriggerPosition];
}

/// A discrete button of a pad.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    /// Top of the direction cluster (D-pad up, or top face button).
    Up,
    /// Right of the direction cluster.
    Right,
    /// Bottom of the direction cluster.
    Down,
    /// Left of the direction cluster.
    Left,
    /// The pad's menu button (back/share on the left, start/options on the right).
    Main,
    /// The shoulder bumper.
    Bumper,
    /// Stick click.
    Joy,
}

impl Button {
    /// Every button.
    pub const ALL: [Button; 7] = [
        Button::Up,
        Button::Right,
        Button::Down,
        Button::Left,
        Button::Main,
        Button::Bumper,
        Button::Joy,
    ];

    const fn index(self) -> usize {
        self as usize
    }
}

/// A two-axis stick.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct JoyAxis {
    /// Horizontal deflection in the device's reported range.
    pub x: f32,
    /// Vertical deflection in the device's reported range.
    pub y: f32,
    /// Whether the stick is clicked in.
    pub pressed: bool,
}

/// One half of a controller.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Pad {
    /// The stick.
    pub joy: JoyAxis,
    /// Trigger travel in the device's reported range.
    pub trigger: f32,
    buttons: [bool; Button::ALL.len()],
}

impl Pad {
    /// Returns whether `button` is held.
    pub fn button(&self, button: Button) -> bool {
        self.buttons[button.index()]
    }

    /// Reads the continuous value of `kind`.
    pub fn value(&self, kind: ValueKind) -> f32 {
        match kind {
            ValueKind::JoyX => self.joy.x,
            ValueKind::JoyY => self.joy.y,
            ValueKind::TriggerPosition => self.trigger,
        }
    }

    pub(crate) fn set_value(&mut self, kind: ValueKind, value: f32) {
        match kind {
            ValueKind::JoyX => self.joy.x = value,
            ValueKind::JoyY => self.joy.y = value,
            ValueKind::TriggerPosition => self.trigger = value,
        }
    }

    pub(crate) fn set_button(&mut self, button: Button, pressed: bool) {
        self.buttons[button.index()] = pressed;
        if button == Button::Joy {
            self.joy.pressed = pressed;
        }
    }
}

/// The latest known state of one recognized controller.
#[derive(Debug, Clone, PartialEq)]
pub struct JoystickState {
    id: String,
    name: String,
    /// The left half of the controller.
    pub left: Pad,
    /// The right half of the controller.
    pub right: Pad,
}

impl JoystickState {
    /// Creates a state with every control at rest.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            left: Pad::default(),
            right: Pad::default(),
        }
    }

    /// The device's stable identifier (GUID).
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The device's human-readable name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the pad on `side`.
    pub fn pad(&self, side: Side) -> &Pad {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    pub(crate) fn pad_mut(&mut self, side: Side) -> &mut Pad {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }
}

/// One frame's raw sample of a device, as reported by the platform.
///
/// Axis and button buffers are in the device's native order; a
/// [`DeviceMapping`](super::DeviceMapping) gives them meaning.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawJoystickSample {
    /// Stable device identifier (GUID).
    pub id: String,
    /// Device name as reported by the platform.
    pub name: String,
    /// Raw axis values.
    pub axes: Vec<f32>,
    /// Raw button states.
    pub buttons: Vec<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joystick_index_is_bounded() {
        assert_eq!(JoystickIndex::new(0).map(JoystickIndex::get), Some(0));
        assert!(JoystickIndex::new(MAX_JOYSTICKS - 1).is_some());
        assert!(JoystickIndex::new(MAX_JOYSTICKS).is_none());
        assert_eq!(JoystickIndex::all().count(), MAX_JOYSTICKS);
    }

    #[test]
    fn joy_button_drives_stick_pressed_flag() {
        let mut pad = Pad::default();
        pad.set_button(Button::Joy, true);
        assert!(pad.joy.pressed);
        assert!(pad.button(Button::Joy));
        pad.set_button(Button::Main, true);
        pad.set_button(Button::Joy, false);
        assert!(!pad.joy.pressed);
        assert!(pad.button(Button::Main));
    }

    #[test]
    fn pad_values_route_to_fields() {
        let mut pad = Pad::default();
        pad.set_value(ValueKind::JoyX, 0.25);
        pad.set_value(ValueKind::JoyY, -0.5);
        pad.set_value(ValueKind::TriggerPosition, 1.0);
        assert_eq!(pad.joy.x, 0.25);
        assert_eq!(pad.joy.y, -0.5);
        assert_eq!(pad.trigger, 1.0);
        assert_eq!(pad.value(ValueKind::JoyY), -0.5);
    }

    #[test]
    fn new_state_is_at_rest() {
        let state = JoystickState::new("guid", "pad");
        assert_eq!(state.id(), "guid");
        assert_eq!(state.name(), "pad");
        for side in Side::ALL {
            let pad = state.pad(side);
            assert!(Button::ALL.iter().all(|&b| !pad.button(b)));
            assert!(ValueKind::ALL.iter().all(|&k| pad.value(k) == 0.0));
        }
    }
}
