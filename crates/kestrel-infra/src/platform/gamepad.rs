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

//! Gamepad input through `gilrs`.
//!
//! Connected gamepads are assigned to the first free [`JoystickIndex`] and
//! keep it until they disconnect. Each frame a slot's device is sampled
//! into a [`RawJoystickSample`] whose buffers follow the kernel driver
//! order of the device's family, which is what a [`DeviceMapping`]
//! indexes into. The buffers are rebuilt from gilrs' mapped axes and
//! buttons, so the order holds whether a trigger is reported as an axis
//! or as an analog button.

use gilrs::{Axis, Button, Event, EventType, Gamepad, GamepadId, Gilrs};
use kestrel_core::input::{DeviceMapping, JoystickIndex, RawJoystickSample, MAX_JOYSTICKS};

/// Where one raw axis entry reads its value from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AxisSource {
    Stick(Axis),
    /// An analog trigger, reported either as an axis or as a button.
    Trigger(Axis, Button),
}

/// ABS_X, ABS_Y, ABS_Z, ABS_RX, ABS_RY, ABS_RZ.
const AXIS_ORDER: [AxisSource; 6] = [
    AxisSource::Stick(Axis::LeftStickX),
    AxisSource::Stick(Axis::LeftStickY),
    AxisSource::Trigger(Axis::LeftZ, Button::LeftTrigger2),
    AxisSource::Stick(Axis::RightStickX),
    AxisSource::Stick(Axis::RightStickY),
    AxisSource::Trigger(Axis::RightZ, Button::RightTrigger2),
];

/// xpad key order: A, B, X, Y, TL, TR, SELECT, START, MODE, THUMBL, THUMBR.
const XBOX_BUTTONS: [Button; 11] = [
    Button::South,
    Button::East,
    Button::West,
    Button::North,
    Button::LeftTrigger,
    Button::RightTrigger,
    Button::Select,
    Button::Start,
    Button::Mode,
    Button::LeftThumb,
    Button::RightThumb,
];

/// hid-sony key order: cross, circle, triangle, square, L1, R1, L2, R2,
/// share, options, PS, L3, R3.
const DUALSHOCK_BUTTONS: [Button; 13] = [
    Button::South,
    Button::East,
    Button::North,
    Button::West,
    Button::LeftTrigger,
    Button::RightTrigger,
    Button::LeftTrigger2,
    Button::RightTrigger2,
    Button::Select,
    Button::Start,
    Button::Mode,
    Button::LeftThumb,
    Button::RightThumb,
];

/// Button buffer order for a device family. Unrecognized devices get the
/// Xbox order; the snapshot ignores them anyway.
fn button_order(mapping: Option<DeviceMapping>) -> &'static [Button] {
    match mapping {
        Some(DeviceMapping::DualShock) => &DUALSHOCK_BUTTONS,
        Some(DeviceMapping::Xbox) | None => &XBOX_BUTTONS,
    }
}

/// Reads one axis entry. A trigger prefers its axis and falls back to the
/// analog value of its button.
fn read_axis(
    source: AxisSource,
    axis_value: impl Fn(Axis) -> Option<f32>,
    button_value: impl Fn(Button) -> Option<f32>,
) -> f32 {
    match source {
        AxisSource::Stick(axis) => axis_value(axis),
        AxisSource::Trigger(axis, button) => axis_value(axis).or_else(|| button_value(button)),
    }
    .unwrap_or(0.0)
}

fn sample_gamepad(gamepad: &Gamepad<'_>, buttons: &[Button]) -> RawJoystickSample {
    let axis_value = |axis: Axis| gamepad.axis_data(axis).map(|data| data.value());
    let button_value = |button: Button| gamepad.button_data(button).map(|data| data.value());
    RawJoystickSample {
        id: uuid_string(gamepad.uuid()),
        name: gamepad.name().to_string(),
        axes: AXIS_ORDER
            .iter()
            .map(|&source| read_axis(source, axis_value, button_value))
            .collect(),
        buttons: buttons.iter().map(|&b| gamepad.is_pressed(b)).collect(),
    }
}

#[derive(Debug)]
struct SlotDevice {
    id: GamepadId,
    buttons: &'static [Button],
}

/// Owns the `gilrs` context and the slot assignment of connected gamepads.
pub struct GamepadSlots {
    gilrs: Gilrs,
    slots: [Option<SlotDevice>; MAX_JOYSTICKS],
}

impl GamepadSlots {
    /// Opens the gamepad subsystem and assigns already connected devices.
    ///
    /// Returns `None` when the subsystem is unavailable; the engine then
    /// runs without gamepads.
    pub fn new() -> Option<Self> {
        let gilrs = match Gilrs::new() {
            Ok(gilrs) => gilrs,
            Err(gilrs::Error::NotImplemented(dummy)) => {
                log::warn!("Gamepads are not supported on this platform.");
                dummy
            }
            Err(e) => {
                log::warn!("Failed to initialize gamepad support: {e}");
                return None;
            }
        };

        let mut slots = Self {
            gilrs,
            slots: Default::default(),
        };
        let connected: Vec<GamepadId> = slots.gilrs.gamepads().map(|(id, _)| id).collect();
        for id in connected {
            slots.attach(id);
        }
        Some(slots)
    }

    /// Drains pending gamepad events, updating device state and slot
    /// assignment.
    pub fn poll(&mut self) {
        while let Some(Event { id, event, .. }) = self.gilrs.next_event() {
            match event {
                EventType::Connected => self.attach(id),
                EventType::Disconnected => self.detach(id),
                _ => {}
            }
        }
    }

    /// Samples the device occupying `index`.
    pub fn sample(&self, index: JoystickIndex) -> Option<RawJoystickSample> {
        let device = self.slots[index.get()].as_ref()?;
        let gamepad = self.gilrs.connected_gamepad(device.id)?;
        Some(sample_gamepad(&gamepad, device.buttons))
    }

    fn attach(&mut self, id: GamepadId) {
        if self.slots.iter().flatten().any(|d| d.id == id) {
            return;
        }
        let Some(gamepad) = self.gilrs.connected_gamepad(id) else {
            return;
        };
        let occupied: Vec<bool> = self.slots.iter().map(Option::is_some).collect();
        let Some(slot) = first_free(&occupied) else {
            log::info!(
                "Gamepad '{}' connected but every joystick slot is taken.",
                gamepad.name()
            );
            return;
        };
        let buttons = button_order(DeviceMapping::for_device_name(gamepad.name()));
        log::debug!(
            "Gamepad '{}' assigned to slot {slot} ({} buttons).",
            gamepad.name(),
            buttons.len()
        );
        self.slots[slot] = Some(SlotDevice { id, buttons });
    }

    fn detach(&mut self, id: GamepadId) {
        for (index, slot) in self.slots.iter_mut().enumerate() {
            if slot.as_ref().is_some_and(|d| d.id == id) {
                log::debug!("Gamepad left slot {index}.");
                *slot = None;
            }
        }
    }
}

fn first_free(occupied: &[bool]) -> Option<usize> {
    occupied.iter().position(|taken| !taken)
}

/// Formats a device UUID as 32 lowercase hex digits, SDL GUID style.
fn uuid_string(uuid: [u8; 16]) -> String {
    uuid.iter().map(|b| format!("{b:02x}")).collect()
}
