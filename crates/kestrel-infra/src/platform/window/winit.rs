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

//! A `winit`-based implementation of the engine's [`Platform`] trait.
//!
//! winit normally owns the event loop. Here the engine owns it instead: each
//! poll step pumps pending window events with a zero timeout, so the
//! engine's own loop keeps control of iteration order.

use crate::graphics::{Canvas, FontCache, WgpuPresenter};
use crate::platform::gamepad::GamepadSlots;
use crate::platform::input::translate_winit_input;
use kestrel_core::config::{WindowConfig, WindowMode};
use kestrel_core::input::{JoystickIndex, RawJoystickSample};
use kestrel_core::renderer::DrawingSurface;
use kestrel_core::{PictureSize, Platform, PlatformError, PlatformEvent};
use std::sync::Arc;
use std::time::Duration;
use winit::application::ApplicationHandler;
use winit::dpi::{PhysicalPosition, PhysicalSize};
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::monitor::MonitorHandle;
use winit::platform::pump_events::{EventLoopExtPumpEvents, PumpStatus};
use winit::window::{Fullscreen, Window, WindowId};

/// Pump attempts allowed for the platform to deliver `resumed` at startup.
const STARTUP_PUMPS: usize = 100;

/// Builds the native window described by a [`WindowConfig`].
pub struct WinitWindowBuilder<'a> {
    config: &'a WindowConfig,
}

impl<'a> WinitWindowBuilder<'a> {
    /// Creates a builder for `config`.
    pub fn new(config: &'a WindowConfig) -> Self {
        Self { config }
    }

    /// Builds the window on the monitor the configuration selects.
    ///
    /// # Errors
    /// Fails when no monitor can be resolved or window creation fails.
    pub fn build(self, event_loop: &ActiveEventLoop) -> Result<Window, PlatformError> {
        let config = self.config;
        let monitor = select_monitor(event_loop, config)?;
        log::info!(
            "Building window '{}' ({:?}) on monitor '{}'",
            config.title,
            config.mode,
            monitor.name().unwrap_or_else(|| "<unnamed>".to_string())
        );

        let mut attributes = Window::default_attributes()
            .with_title(config.title.clone())
            .with_visible(config.visible)
            .with_resizable(config.resizable);

        attributes = match config.mode {
            WindowMode::Windowed { width, height } => {
                let position = centered_on(
                    monitor.position(),
                    monitor.size(),
                    PhysicalSize::new(width, height),
                );
                attributes
                    .with_inner_size(PhysicalSize::new(width, height))
                    .with_position(position)
            }
            WindowMode::FullScreen => {
                attributes.with_fullscreen(Some(Fullscreen::Borderless(Some(monitor))))
            }
        };

        let window = event_loop
            .create_window(attributes)
            .map_err(|e| PlatformError::WindowCreation(e.to_string()))?;
        log::info!("Winit window created successfully (id: {:?}).", window.id());
        Ok(window)
    }
}

fn select_monitor(
    event_loop: &ActiveEventLoop,
    config: &WindowConfig,
) -> Result<MonitorHandle, PlatformError> {
    let monitors: Vec<MonitorHandle> = event_loop.available_monitors().collect();
    let primary = event_loop
        .primary_monitor()
        .and_then(|p| monitors.iter().position(|m| *m == p));
    let index = config.monitor.resolve(monitors.len(), primary)?;
    monitors
        .get(index)
        .cloned()
        .ok_or(PlatformError::NoMonitor)
}

/// Top-left position that centres a window of `size` on a monitor.
fn centered_on(
    monitor_position: PhysicalPosition<i32>,
    monitor_size: PhysicalSize<u32>,
    size: PhysicalSize<u32>,
) -> PhysicalPosition<i32> {
    let dx = (monitor_size.width as i32 - size.width as i32) / 2;
    let dy = (monitor_size.height as i32 - size.height as i32) / 2;
    PhysicalPosition::new(monitor_position.x + dx.max(0), monitor_position.y + dy.max(0))
}

/// Receives winit callbacks during a pump and queues them as engine events.
struct PumpHandler {
    config: WindowConfig,
    window: Option<Arc<Window>>,
    startup_error: Option<PlatformError>,
    pending: Vec<PlatformEvent>,
}

impl ApplicationHandler for PumpHandler {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() || self.startup_error.is_some() {
            return;
        }
        match WinitWindowBuilder::new(&self.config).build(event_loop) {
            Ok(window) => self.window = Some(Arc::new(window)),
            Err(e) => self.startup_error = Some(e),
        }
    }

    fn window_event(&mut self, _event_loop: &ActiveEventLoop, id: WindowId, event: WindowEvent) {
        if self.window.as_ref().map(|w| w.id()) != Some(id) {
            return;
        }
        if let Some(event) = translate_winit_input(&event) {
            self.pending.push(event);
        }
    }
}

/// One winit window with its frame buffer, presenter and gamepads.
pub struct WinitPlatform {
    event_loop: EventLoop<()>,
    handler: PumpHandler,
    window: Option<Arc<Window>>,
    presenter: Option<WgpuPresenter>,
    canvas: Canvas,
    gamepads: Option<GamepadSlots>,
}

impl WinitPlatform {
    /// Opens the window described by `config` and brings up presentation,
    /// fonts and gamepads.
    ///
    /// # Errors
    /// Every failure here is fatal: no monitor, window or graphics context
    /// creation failure, or a font resource that cannot be loaded.
    pub fn create(config: &WindowConfig) -> Result<Self, PlatformError> {
        let mut event_loop =
            EventLoop::new().map_err(|e| PlatformError::EventLoop(e.to_string()))?;
        let mut handler = PumpHandler {
            config: config.clone(),
            window: None,
            startup_error: None,
            pending: Vec::new(),
        };

        for _ in 0..STARTUP_PUMPS {
            if let PumpStatus::Exit(code) =
                event_loop.pump_app_events(Some(Duration::from_millis(10)), &mut handler)
            {
                return Err(PlatformError::EventLoop(format!(
                    "event loop exited during startup with code {code}"
                )));
            }
            if let Some(e) = handler.startup_error.take() {
                return Err(e);
            }
            if handler.window.is_some() {
                break;
            }
        }
        let window = handler.window.clone().ok_or_else(|| {
            PlatformError::WindowCreation("the platform never resumed the application".into())
        })?;

        let fonts = FontCache::load(&config.fonts)?;

        let inner = window.inner_size();
        let size = PictureSize::new(inner.width, inner.height);
        let presenter = pollster::block_on(WgpuPresenter::new(window.clone(), size))
            .map_err(|e| PlatformError::Graphics(format!("{e:#}")))?;

        Ok(Self {
            event_loop,
            handler,
            window: Some(window),
            presenter: Some(presenter),
            canvas: Canvas::new(size, config.clear_color, fonts),
            gamepads: GamepadSlots::new(),
        })
    }

    /// The native window, until released.
    pub fn window(&self) -> Option<&Window> {
        self.window.as_deref()
    }

    fn resize(&mut self, size: PictureSize) {
        self.canvas.resize(size);
        if let Some(presenter) = self.presenter.as_mut() {
            presenter.resize(size);
        }
    }
}

impl Platform for WinitPlatform {
    fn poll_events(&mut self, sink: &mut dyn FnMut(PlatformEvent)) {
        if let PumpStatus::Exit(code) = self
            .event_loop
            .pump_app_events(Some(Duration::ZERO), &mut self.handler)
        {
            log::warn!("Native event loop exited with code {code}.");
            self.handler.pending.push(PlatformEvent::CloseRequested);
        }
        if let Some(gamepads) = self.gamepads.as_mut() {
            gamepads.poll();
        }

        let pending = std::mem::take(&mut self.handler.pending);
        for event in pending {
            if let PlatformEvent::Resized(size) = event {
                self.resize(size);
            }
            sink(event);
        }
    }

    fn sample_joystick(&mut self, index: JoystickIndex) -> Option<RawJoystickSample> {
        self.gamepads.as_ref()?.sample(index)
    }

    fn picture_size(&self) -> PictureSize {
        self.canvas.picture_size()
    }

    fn begin_frame(&mut self) -> &mut dyn DrawingSurface {
        self.canvas.clear();
        &mut self.canvas
    }

    fn present(&mut self) -> anyhow::Result<()> {
        let Some(presenter) = self.presenter.as_mut() else {
            return Ok(());
        };
        if let Some(window) = self.window.as_ref() {
            window.pre_present_notify();
        }
        presenter.present(self.canvas.as_bytes(), self.canvas.picture_size())
    }

    fn release(&mut self) {
        // The surface borrows the window, so it goes first.
        self.presenter = None;
        self.gamepads = None;
        self.handler.window = None;
        if let Some(window) = self.window.take() {
            log::info!("Releasing window {:?}.", window.id());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_is_centred_on_its_monitor() {
        let pos = centered_on(
            PhysicalPosition::new(1920, 0),
            PhysicalSize::new(1920, 1080),
            PhysicalSize::new(1024, 768),
        );
        assert_eq!(pos, PhysicalPosition::new(1920 + 448, 156));
    }

    #[test]
    fn oversized_window_is_pinned_to_the_monitor_corner() {
        let pos = centered_on(
            PhysicalPosition::new(0, 0),
            PhysicalSize::new(800, 600),
            PhysicalSize::new(1024, 768),
        );
        assert_eq!(pos, PhysicalPosition::new(0, 0));
    }
}
