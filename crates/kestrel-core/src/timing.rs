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

//! Frame timing.
//!
//! The loop has two phases, update and render, and each keeps its own
//! previous timestamp. [`FrameClock`] hands out one [`FrameProperty`] per
//! phase per iteration.

use std::time::{Duration, Instant};

/// Width and height of the drawable area in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PictureSize {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl PictureSize {
    /// Creates a size.
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Timing and surface-size context passed to one per-frame callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameProperty {
    /// When this phase last ran (or when the loop started, on the first frame).
    pub time_last: Instant,
    /// When this phase started running now.
    pub time_now: Instant,
    /// Current drawable area.
    pub picture_size: PictureSize,
}

impl FrameProperty {
    /// Time elapsed since this phase last ran.
    pub fn elapsed(&self) -> Duration {
        self.time_now.saturating_duration_since(self.time_last)
    }

    /// [`elapsed`](Self::elapsed) in seconds.
    pub fn delta_seconds(&self) -> f32 {
        self.elapsed().as_secs_f32()
    }

    /// Instantaneous frames per second, or 0 when no time elapsed.
    pub fn fps(&self) -> f32 {
        let dt = self.elapsed().as_secs_f64();
        if dt > 0.0 {
            (1.0 / dt) as f32
        } else {
            0.0
        }
    }
}

/// A loop phase with its own timestamp history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FramePhase {
    /// Simulation update.
    Update,
    /// Rendering.
    Render,
}

/// Produces per-phase [`FrameProperty`] values.
#[derive(Debug, Clone)]
pub struct FrameClock {
    last_update: Instant,
    last_render: Instant,
}

impl FrameClock {
    /// Creates a clock whose phases both last ran at `start`.
    pub fn starting_at(start: Instant) -> Self {
        Self {
            last_update: start,
            last_render: start,
        }
    }

    /// Starts `phase` at the current instant.
    pub fn begin(&mut self, phase: FramePhase, picture_size: PictureSize) -> FrameProperty {
        self.begin_at(phase, Instant::now(), picture_size)
    }

    /// Starts `phase` at `now`, recording `now` as the phase's last run.
    pub fn begin_at(
        &mut self,
        phase: FramePhase,
        now: Instant,
        picture_size: PictureSize,
    ) -> FrameProperty {
        let last = match phase {
            FramePhase::Update => &mut self.last_update,
            FramePhase::Render => &mut self.last_render,
        };
        let frame = FrameProperty {
            time_last: *last,
            time_now: now,
            picture_size,
        };
        *last = now;
        frame
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::starting_at(Instant::now())
    }
}

/// A simple CPU stopwatch.
#[derive(Debug, Clone)]
pub struct Stopwatch {
    start_time: Instant,
}

impl Stopwatch {
    /// Creates a stopwatch started now.
    #[inline]
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
        }
    }

    /// Time elapsed since the stopwatch was started.
    #[inline]
    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Elapsed time in seconds.
    #[inline]
    pub fn elapsed_secs_f64(&self) -> f64 {
        self.elapsed().as_secs_f64()
    }
}

impl Default for Stopwatch {
    fn default() -> Self {
        Self::new()
    }
}
