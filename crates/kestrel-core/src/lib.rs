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

//! # Kestrel Core
//!
//! Foundational crate containing the window lifecycle state machine, the
//! input-state model, frame timing and the contracts an embedding
//! application and a platform backend implement.
//!
//! Nothing in this crate talks to the operating system directly. Concrete
//! windowing, gamepad and presentation backends live in `kestrel-infra`
//! and plug in through the [`platform::Platform`] trait.

#![warn(missing_docs)]

pub mod app;
pub mod config;
pub mod engine;
pub mod error;
pub mod input;
pub mod platform;
pub mod renderer;
pub mod timing;

pub use app::Application;
pub use config::WindowConfig;
pub use engine::{EngineLoop, LoopState};
pub use error::{PlatformError, SessionError};
pub use input::InputSnapshot;
pub use platform::window::{WindowSession, WindowState};
pub use platform::{Platform, PlatformEvent};
pub use renderer::DrawingSurface;
pub use timing::{FrameClock, FramePhase, FrameProperty, PictureSize, Stopwatch};
