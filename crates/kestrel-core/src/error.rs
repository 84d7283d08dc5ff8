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

//! Defines the error hierarchy of the engine.
//!
//! Two families exist:
//! * [`SessionError`]: a window operation was called from a state that does
//!   not satisfy its precondition. This is a programming error.
//! * [`PlatformError`]: the platform could not be brought up (no monitor,
//!   no window, no graphics device, missing font). These abort startup.
//!
//! Absent devices, unmapped keys and unmapped controls are not errors and
//! are expressed with `Option`.

use crate::platform::window::WindowState;
use std::path::PathBuf;
use thiserror::Error;

/// A window session operation was invoked from an invalid state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// The operation's precondition on the lifecycle state was not met.
    #[error("cannot {operation} a window in state {actual:?}")]
    InvalidState {
        /// Name of the rejected operation (e.g. `"loop"`).
        operation: &'static str,
        /// The state the window was in when the call was made.
        actual: WindowState,
    },
}

/// A fatal condition raised while bringing up the platform.
#[derive(Debug, Error)]
pub enum PlatformError {
    /// The platform reported no monitor at all.
    #[error("no monitor could be resolved")]
    NoMonitor,

    /// The configuration asked for a monitor index that does not exist.
    #[error("monitor #{index} requested but only {available} monitor(s) available")]
    MonitorIndexOutOfRange {
        /// The requested index.
        index: usize,
        /// The number of monitors the platform reported.
        available: usize,
    },

    /// The native event loop could not be created or stopped unexpectedly.
    #[error("event loop failure: {0}")]
    EventLoop(String),

    /// The native window could not be created.
    #[error("window creation failed: {0}")]
    WindowCreation(String),

    /// The graphics context (surface, adapter, device) could not be created.
    #[error("graphics context creation failed: {0}")]
    Graphics(String),

    /// A named font resource could not be read or parsed.
    #[error("failed to load font '{name}' from {path:?}: {reason}")]
    FontLoad {
        /// Name the font is registered under.
        name: String,
        /// Path the font was read from.
        path: PathBuf,
        /// Underlying cause.
        reason: String,
    },

    /// The configuration file could not be read or parsed.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(String),
}
