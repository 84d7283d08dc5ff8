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

//! The engine-owned record of all device states.

use super::joystick::{
    Button, JoystickIndex, JoystickState, RawJoystickSample, Side, ValueKind, MAX_JOYSTICKS,
};
use super::keys::{KeyStatus, KeyboardState, LogicalKey, RawKeyCode};
use super::mapping::DeviceMapping;

/// Latest known state of the keyboard and every joystick slot.
///
/// Created once per engine run and mutated in place every frame by the loop.
/// Application callbacks receive it by shared reference and must not keep
/// it past the callback: its fields change on the next iteration.
#[derive(Debug, Clone, PartialEq)]
pub struct InputSnapshot {
    keyboard: KeyboardState,
    joysticks: [Option<JoystickState>; MAX_JOYSTICKS],
}

impl InputSnapshot {
    /// Creates a snapshot with every key released and no joystick present.
    pub fn new() -> Self {
        Self {
            keyboard: KeyboardState::new(),
            joysticks: std::array::from_fn(|_| None),
        }
    }

    /// The keyboard table.
    pub fn keyboard(&self) -> &KeyboardState {
        &self.keyboard
    }

    /// The joystick in slot `index`, if a recognized device occupies it.
    pub fn joystick(&self, index: JoystickIndex) -> Option<&JoystickState> {
        self.joysticks[index.get()].as_ref()
    }

    /// Applies one raw key event.
    ///
    /// Repeats and codes without a logical identity leave the table
    /// untouched and return `None`. Otherwise the table is updated and the
    /// resolved key is returned so the caller can forward it.
    pub fn apply_key_event(&mut self, code: RawKeyCode, status: KeyStatus) -> Option<LogicalKey> {
        if status == KeyStatus::Repeat {
            return None;
        }
        let Some(key) = LogicalKey::from_raw(code) else {
            log::trace!("Ignoring unmapped key code {:#04x}", code.0);
            return None;
        };
        self.keyboard.set(key, status);
        Some(key)
    }

    /// Updates slot `index` from this frame's raw sample.
    ///
    /// A missing sample or an unrecognized device clears the slot. A sample
    /// whose id matches the slot's current device updates it in place;
    /// otherwise a fresh state is allocated. Controls the device has no raw
    /// source for keep their previous value.
    pub fn sample_joystick(&mut self, index: JoystickIndex, sample: Option<&RawJoystickSample>) {
        let slot = &mut self.joysticks[index.get()];

        let Some((sample, mapping)) =
            sample.and_then(|s| DeviceMapping::for_device_name(&s.name).map(|m| (s, m)))
        else {
            if let Some(previous) = slot.take() {
                log::info!(
                    "Joystick slot {} released ('{}', {})",
                    index.get(),
                    previous.name(),
                    previous.id()
                );
            }
            return;
        };

        if !matches!(slot, Some(state) if state.id() == sample.id) {
            log::info!(
                "Joystick slot {} now holds '{}' ({}, {:?} layout)",
                index.get(),
                sample.name,
                sample.id,
                mapping
            );
            *slot = Some(JoystickState::new(sample.id.clone(), sample.name.clone()));
        }
        let Some(state) = slot.as_mut() else {
            return;
        };

        for side in Side::ALL {
            let pad = state.pad_mut(side);
            for kind in ValueKind::ALL {
                let raw = mapping
                    .value_index(side, kind)
                    .and_then(|i| sample.axes.get(i).copied());
                if let Some(value) = raw {
                    pad.set_value(kind, value);
                }
            }
            for button in Button::ALL {
                let raw = mapping
                    .button_index(side, button)
                    .and_then(|i| sample.buttons.get(i).copied());
                if let Some(pressed) = raw {
                    pad.set_button(button, pressed);
                }
            }
        }
    }
}

impl Default for InputSnapshot {
    fn default() -> Self {
        Self::new()
    }
}
