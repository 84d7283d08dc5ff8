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

//! The public-facing Software Development Kit (SDK) for the Kestrel Engine.
//!
//! Implement [`Application`](prelude::Application), describe the window
//! with a [`WindowConfig`](prelude::WindowConfig) and hand both to
//! [`Engine::run`].

use anyhow::{Context, Result};
use kestrel_core::{Application, EngineLoop, WindowConfig};
use kestrel_infra::WinitPlatform;

pub mod prelude {
    pub use kestrel_core::config::{FontResource, MonitorSelection, WindowMode};
    pub use kestrel_core::input::{
        Button, FunctionKey, InputSnapshot, JoystickIndex, JoystickState, KeyStatus,
        KeyboardState, LogicalKey, Pad, PrintableKey, Side, ValueKind,
    };
    pub use kestrel_core::renderer::{Color, DrawingSurface, Point, RectStyle};
    pub use kestrel_core::{Application, FrameProperty, PictureSize, Stopwatch, WindowConfig};

    pub use crate::Engine;
}

/// Entry point that wires the native platform into the engine loop.
pub struct Engine;

impl Engine {
    /// Opens the window, runs `app` until it stops or the window is closed,
    /// then destroys the window.
    ///
    /// # Errors
    /// Fails when the platform cannot be brought up (no monitor, no graphics
    /// context, missing font) or on a lifecycle misuse.
    pub fn run<A: Application>(config: &WindowConfig, app: &mut A) -> Result<()> {
        log::info!("Starting Kestrel engine...");
        let platform = WinitPlatform::create(config).context("Failed to open the engine window")?;

        let mut engine = EngineLoop::new(platform);
        engine.run(app).context("Engine loop failed")?;
        log::info!("Engine loop finished after {} frame(s).", engine.frame_count());

        engine.destroy().context("Failed to destroy the engine window")?;
        log::info!("Kestrel engine shut down.");
        Ok(())
    }
}
