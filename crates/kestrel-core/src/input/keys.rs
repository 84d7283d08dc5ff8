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

//! Keyboard model: raw key codes, logical keys and the keyboard state table.

/// The status carried by a key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum KeyStatus {
    /// The key went down.
    Press,
    /// The key went up.
    #[default]
    Release,
    /// The key is held and the platform emitted an auto-repeat.
    Repeat,
}

/// A raw hardware key code, expressed as a USB HID keyboard usage ID.
///
/// Backends translate their native codes into this space; the engine then
/// resolves it to a [`LogicalKey`] through a fixed table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RawKeyCode(pub u32);

macro_rules! logical_key_set {
    (
        $(#[$meta:meta])*
        $name:ident { $($variant:ident = $code:literal),* $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[allow(missing_docs)]
        pub enum $name {
            $($variant),*
        }

        impl $name {
            /// Every member of the set, in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),*];

            /// The HID usage ID this key is bound to.
            pub const fn raw_code(self) -> RawKeyCode {
                match self {
                    $($name::$variant => RawKeyCode($code)),*
                }
            }

            fn from_raw(code: RawKeyCode) -> Option<Self> {
                match code.0 {
                    $($code => Some($name::$variant),)*
                    _ => None,
                }
            }
        }
    };
}

logical_key_set! {
    /// Alphabetic keys used for game input.
    PrintableKey {
        A = 0x04, B = 0x05, C = 0x06, D = 0x07, E = 0x08, F = 0x09, G = 0x0A,
        H = 0x0B, I = 0x0C, J = 0x0D, K = 0x0E, L = 0x0F, M = 0x10, N = 0x11,
        O = 0x12, P = 0x13, Q = 0x14, R = 0x15, S = 0x16, T = 0x17, U = 0x18,
        V = 0x19, W = 0x1A, X = 0x1B, Y = 0x1C, Z = 0x1D,
    }
}

logical_key_set! {
    /// Control keys.
    FunctionKey {
        Enter = 0x28,
        Escape = 0x29,
        Backspace = 0x2A,
        Tab = 0x2B,
        Space = 0x2C,
        Right = 0x4F,
        Left = 0x50,
        Down = 0x51,
        Up = 0x52,
    }
}

/// An abstract key identity, independent of the hardware scan code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogicalKey {
    /// An alphabetic key.
    Printable(PrintableKey),
    /// A control key.
    Function(FunctionKey),
}

impl LogicalKey {
    /// Number of logical keys across both sets.
    pub const COUNT: usize = PrintableKey::ALL.len() + FunctionKey::ALL.len();

    /// Resolves a raw code, returning `None` for codes outside both sets.
    pub fn from_raw(code: RawKeyCode) -> Option<Self> {
        PrintableKey::from_raw(code)
            .map(LogicalKey::Printable)
            .or_else(|| FunctionKey::from_raw(code).map(LogicalKey::Function))
    }

    /// Iterates over every logical key.
    pub fn all() -> impl Iterator<Item = LogicalKey> {
        PrintableKey::ALL
            .iter()
            .copied()
            .map(LogicalKey::Printable)
            .chain(FunctionKey::ALL.iter().copied().map(LogicalKey::Function))
    }

    fn index(self) -> usize {
        match self {
            LogicalKey::Printable(k) => k as usize,
            LogicalKey::Function(k) => PrintableKey::ALL.len() + k as usize,
        }
    }
}

impl From<PrintableKey> for LogicalKey {
    fn from(key: PrintableKey) -> Self {
        LogicalKey::Printable(key)
    }
}

impl From<FunctionKey> for LogicalKey {
    fn from(key: FunctionKey) -> Self {
        LogicalKey::Function(key)
    }
}

/// Last known status of every logical key.
///
/// The table is total: every [`LogicalKey`] has an entry at all times and
/// starts at [`KeyStatus::Release`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyboardState {
    statuses: [KeyStatus; LogicalKey::COUNT],
}

impl KeyboardState {
    /// Creates a table with every key released.
    pub fn new() -> Self {
        Self {
            statuses: [KeyStatus::Release; LogicalKey::COUNT],
        }
    }

    /// Returns the last known status of `key`.
    pub fn status(&self, key: impl Into<LogicalKey>) -> KeyStatus {
        self.statuses[key.into().index()]
    }

    /// Returns `true` if `key` was last reported pressed.
    pub fn is_pressed(&self, key: impl Into<LogicalKey>) -> bool {
        self.status(key) == KeyStatus::Press
    }

    /// Iterates over every key with its status.
    pub fn iter(&self) -> impl Iterator<Item = (LogicalKey, KeyStatus)> + '_ {
        LogicalKey::all().map(move |key| (key, self.statuses[key.index()]))
    }

    pub(crate) fn set(&mut self, key: LogicalKey, status: KeyStatus) {
        self.statuses[key.index()] = status;
    }
}

impl Default for KeyboardState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn every_key_starts_released() {
        let state = KeyboardState::new();
        for key in LogicalKey::all() {
            assert_eq!(state.status(key), KeyStatus::Release, "{key:?}");
        }
        assert_eq!(state.iter().count(), LogicalKey::COUNT);
    }

    #[test]
    fn raw_codes_round_trip_through_the_table() {
        for key in LogicalKey::all() {
            let code = match key {
                LogicalKey::Printable(k) => k.raw_code(),
                LogicalKey::Function(k) => k.raw_code(),
            };
            assert_eq!(LogicalKey::from_raw(code), Some(key));
        }
    }

    #[test]
    fn sets_are_disjoint_and_indices_unique() {
        let codes: HashSet<u32> = PrintableKey::ALL
            .iter()
            .map(|k| k.raw_code().0)
            .chain(FunctionKey::ALL.iter().map(|k| k.raw_code().0))
            .collect();
        assert_eq!(codes.len(), LogicalKey::COUNT);

        let indices: HashSet<usize> = LogicalKey::all().map(LogicalKey::index).collect();
        assert_eq!(indices.len(), LogicalKey::COUNT);
        assert!(indices.iter().all(|&i| i < LogicalKey::COUNT));
    }

    #[test]
    fn known_codes_resolve() {
        assert_eq!(
            LogicalKey::from_raw(RawKeyCode(0x04)),
            Some(LogicalKey::Printable(PrintableKey::A))
        );
        assert_eq!(
            LogicalKey::from_raw(RawKeyCode(0x29)),
            Some(LogicalKey::Function(FunctionKey::Escape))
        );
        assert_eq!(
            LogicalKey::from_raw(RawKeyCode(0x2C)),
            Some(LogicalKey::Function(FunctionKey::Space))
        );
    }

    #[test]
    fn unmapped_codes_resolve_to_none() {
        // Digit 1 and F1 are real keys without a logical identity.
        assert_eq!(LogicalKey::from_raw(RawKeyCode(0x1E)), None);
        assert_eq!(LogicalKey::from_raw(RawKeyCode(0x3A)), None);
        assert_eq!(LogicalKey::from_raw(RawKeyCode(0xFFFF)), None);
    }

    #[test]
    fn set_updates_only_the_target_key() {
        let mut state = KeyboardState::new();
        state.set(PrintableKey::W.into(), KeyStatus::Press);
        assert!(state.is_pressed(PrintableKey::W));
        assert!(!state.is_pressed(PrintableKey::S));
        assert!(!state.is_pressed(FunctionKey::Enter));
    }
}
