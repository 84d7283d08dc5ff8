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

//! Window configuration.
//!
//! A [`WindowConfig`] is built in code with the `with_*` helpers or loaded
//! from a JSON file. Every field has a default, so a config file only needs
//! to name what it changes:
//!
//! ```json
//! { "title": "Demo", "mode": { "kind": "windowed", "width": 800, "height": 600 } }
//! ```

use crate::error::PlatformError;
use crate::renderer::Color;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// How the window occupies its monitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum WindowMode {
    /// A decorated window with an exact inner size in physical pixels.
    Windowed {
        /// Inner width in pixels.
        width: u32,
        /// Inner height in pixels.
        height: u32,
    },
    /// A borderless window covering the selected monitor.
    FullScreen,
}

impl Default for WindowMode {
    fn default() -> Self {
        WindowMode::Windowed {
            width: 1024,
            height: 768,
        }
    }
}

/// Strategy used to pick the monitor the window opens on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MonitorSelection {
    /// The platform's primary monitor, or the first available one when the
    /// platform does not designate a primary monitor.
    #[default]
    Primary,
    /// The n-th monitor in the platform's enumeration order.
    Index(usize),
}

impl MonitorSelection {
    /// Resolves the selection against the number of monitors available.
    ///
    /// `primary` is the position of the platform's primary monitor in the
    /// enumeration, if the platform designates one.
    pub fn resolve(&self, available: usize, primary: Option<usize>) -> Result<usize, PlatformError> {
        if available == 0 {
            return Err(PlatformError::NoMonitor);
        }
        match *self {
            MonitorSelection::Primary => Ok(primary.filter(|&p| p < available).unwrap_or(0)),
            MonitorSelection::Index(index) if index < available => Ok(index),
            MonitorSelection::Index(index) => {
                Err(PlatformError::MonitorIndexOutOfRange { index, available })
            }
        }
    }
}

/// A font file registered under a name usable by `DrawingSurface::draw_text`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontResource {
    /// Name render code refers to the font by.
    pub name: String,
    /// Path of the TrueType/OpenType file.
    pub path: PathBuf,
}

/// Everything needed to open the engine window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Title shown by the window decorations.
    pub title: String,
    /// Exact size or full screen.
    pub mode: WindowMode,
    /// Whether the window is shown on creation.
    pub visible: bool,
    /// Whether the user may resize the window.
    pub resizable: bool,
    /// Which monitor to open on.
    pub monitor: MonitorSelection,
    /// Fonts loaded at window creation.
    pub fonts: Vec<FontResource>,
    /// Colour the frame buffer is reset to before each render callback.
    pub clear_color: Color,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Kestrel".to_string(),
            mode: WindowMode::default(),
            visible: true,
            resizable: false,
            monitor: MonitorSelection::Primary,
            fonts: Vec::new(),
            clear_color: Color::BLACK,
        }
    }
}

impl WindowConfig {
    /// Creates a configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the window title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Requests a windowed mode of the given inner size.
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.mode = WindowMode::Windowed { width, height };
        self
    }

    /// Requests a full-screen window.
    pub fn full_screen(mut self) -> Self {
        self.mode = WindowMode::FullScreen;
        self
    }

    /// Sets the visibility flag.
    pub fn with_visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    /// Sets the resizability flag.
    pub fn with_resizable(mut self, resizable: bool) -> Self {
        self.resizable = resizable;
        self
    }

    /// Sets the monitor selection strategy.
    pub fn with_monitor(mut self, monitor: MonitorSelection) -> Self {
        self.monitor = monitor;
        self
    }

    /// Registers a font file under `name`.
    pub fn with_font(mut self, name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        self.fonts.push(FontResource {
            name: name.into(),
            path: path.into(),
        });
        self
    }

    /// Sets the frame buffer clear colour.
    pub fn with_clear_color(mut self, color: Color) -> Self {
        self.clear_color = color;
        self
    }

    /// Parses a configuration from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self, PlatformError> {
        serde_json::from_str(json).map_err(|e| PlatformError::ConfigLoad(e.to_string()))
    }

    /// Reads and parses a configuration from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, PlatformError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| PlatformError::ConfigLoad(format!("{}: {e}", path.display())))?;
        let config = Self::from_json_str(&json)?;
        log::info!("Loaded window configuration from {}", path.display());
        Ok(config)
    }
}
