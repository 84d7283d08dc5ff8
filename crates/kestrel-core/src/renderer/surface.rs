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

//! Drawing primitives consumed by application render callbacks.
//!
//! Coordinates are surface pixels, origin top-left, y growing downward.
//! Angles are degrees; a positive angle turns clockwise on screen.

use serde::{Deserialize, Serialize};

/// An 8-bit-per-channel RGBA colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Color {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel, 255 is opaque.
    pub a: u8,
}

impl Color {
    /// Opaque black.
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    /// Opaque white.
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    /// Opaque red.
    pub const RED: Color = Color::rgb(255, 0, 0);
    /// Opaque green.
    pub const GREEN: Color = Color::rgb(0, 255, 0);
    /// Opaque blue.
    pub const BLUE: Color = Color::rgb(0, 0, 255);
    /// Opaque yellow.
    pub const YELLOW: Color = Color::rgb(255, 255, 0);
    /// Opaque mid gray.
    pub const GRAY: Color = Color::rgb(128, 128, 128);

    /// Creates an opaque colour.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Creates a colour with explicit alpha.
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Returns the channels as `[r, g, b, a]`.
    pub const fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

/// A position in surface pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    /// Horizontal coordinate, growing rightward.
    pub x: f32,
    /// Vertical coordinate, growing downward.
    pub y: f32,
}

impl Point {
    /// Creates a point.
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl From<(f32, f32)> for Point {
    fn from((x, y): (f32, f32)) -> Self {
        Self { x, y }
    }
}

/// How a rectangle is painted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectStyle {
    /// Colour of the outline.
    pub outline: Color,
    /// Interior colour, if the rectangle is filled.
    pub fill: Option<Color>,
}

impl RectStyle {
    /// Outline only.
    pub const fn outline(color: Color) -> Self {
        Self {
            outline: color,
            fill: None,
        }
    }

    /// Outline plus interior fill.
    pub const fn filled(outline: Color, fill: Color) -> Self {
        Self {
            outline,
            fill: Some(fill),
        }
    }
}

/// Rotates `point` about `pivot` by `degrees`.
///
/// With y growing downward a positive angle turns clockwise on screen.
pub fn rotate_about(point: Point, pivot: Point, degrees: f32) -> Point {
    if degrees == 0.0 {
        return point;
    }
    let (sin, cos) = degrees.to_radians().sin_cos();
    let dx = point.x - pivot.x;
    let dy = point.y - pivot.y;
    Point::new(
        pivot.x + dx * cos - dy * sin,
        pivot.y + dx * sin + dy * cos,
    )
}

/// The immediate-mode drawing surface of one frame.
///
/// Implemented by the rendering backend; the engine clears it before each
/// render callback and presents it afterwards.
pub trait DrawingSurface {
    /// Width and height of the drawable area in pixels.
    fn size(&self) -> (u32, u32);

    /// Draws a single pixel.
    fn draw_point(&mut self, at: Point, color: Color);

    /// Draws a line, rotated about `pivot` by `degrees` when a pivot is given.
    fn draw_line(&mut self, from: Point, to: Point, color: Color, rotation: Option<(Point, f32)>);

    /// Draws a closed polyline through `points`, joining the last point back
    /// to the first.
    fn draw_loop(&mut self, points: &[Point], color: Color);

    /// Draws a rectangle whose top-left corner is `origin`, rotated about
    /// `pivot` by `degrees` when a pivot is given.
    fn draw_rect(
        &mut self,
        origin: Point,
        width: f32,
        height: f32,
        style: RectStyle,
        rotation: Option<(Point, f32)>,
    );

    /// Draws `text` with its top-left at `at`, using the font registered as
    /// `font` at `pixel_height` pixels.
    fn draw_text(&mut self, text: &str, at: Point, font: &str, pixel_height: f32, color: Color);
}
