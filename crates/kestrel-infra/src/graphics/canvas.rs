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

//! A CPU-side RGBA frame buffer implementing [`DrawingSurface`].
//!
//! Pixels are stored row-major, top-left first, as straight (non
//! premultiplied) sRGB RGBA8, ready to be uploaded as an
//! `Rgba8UnormSrgb` texture.

use super::font::FontCache;
use ab_glyph::{point, Font, PxScale, ScaleFont};
use kestrel_core::renderer::{rotate_about, Color, DrawingSurface, Point, RectStyle};
use kestrel_core::PictureSize;

/// Raw pixel storage with clipped writes.
struct Pixels {
    width: u32,
    height: u32,
    data: Vec<[u8; 4]>,
}

impl Pixels {
    fn new(width: u32, height: u32, fill: Color) -> Self {
        Self {
            width,
            height,
            data: vec![fill.to_array(); width as usize * height as usize],
        }
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    /// Source-over blend of `color` at `(x, y)`, scaled by `coverage`.
    fn blend(&mut self, x: i32, y: i32, color: Color, coverage: f32) {
        let Some(i) = self.index(x, y) else {
            return;
        };
        let alpha = (color.a as f32 / 255.0) * coverage.clamp(0.0, 1.0);
        if alpha >= 1.0 {
            self.data[i] = color.to_array();
            return;
        }
        if alpha <= 0.0 {
            return;
        }
        let dst = &mut self.data[i];
        let src = [color.r, color.g, color.b];
        for c in 0..3 {
            dst[c] = (src[c] as f32 * alpha + dst[c] as f32 * (1.0 - alpha)).round() as u8;
        }
        dst[3] = (255.0 * alpha + dst[3] as f32 * (1.0 - alpha)).round() as u8;
    }

    /// Bresenham line between pixel centres, clipped to the buffer.
    fn line(&mut self, from: Point, to: Point, color: Color) {
        let ends = [from.x, from.y, to.x, to.y].map(|v| f64::from(v).round());
        let max = (f64::from(self.width) - 1.0, f64::from(self.height) - 1.0);
        let Some([fx, fy, tx, ty]) = clip_segment(ends, max) else {
            return;
        };
        let (mut x0, mut y0) = (fx.round() as i32, fy.round() as i32);
        let (x1, y1) = (tx.round() as i32, ty.round() as i32);
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;
        loop {
            self.blend(x0, y0, color, 1.0);
            if x0 == x1 && y0 == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x0 += sx;
            }
            if e2 <= dx {
                err += dx;
                y0 += sy;
            }
        }
    }

    /// Even-odd scanline fill of a polygon, sampled at pixel centres.
    fn fill_polygon(&mut self, points: &[Point], color: Color) {
        if points.len() < 3 {
            return;
        }
        let min_y = points.iter().map(|p| p.y).fold(f32::INFINITY, f32::min);
        let max_y = points.iter().map(|p| p.y).fold(f32::NEG_INFINITY, f32::max);
        let first_row = (min_y.floor() as i32).max(0);
        let last_row = (max_y.ceil() as i32).min(self.height as i32 - 1);

        let mut crossings = Vec::with_capacity(points.len());
        for row in first_row..=last_row {
            let yc = row as f32 + 0.5;
            crossings.clear();
            for (i, a) in points.iter().enumerate() {
                let b = points[(i + 1) % points.len()];
                if (a.y <= yc && yc < b.y) || (b.y <= yc && yc < a.y) {
                    crossings.push(a.x + (yc - a.y) * (b.x - a.x) / (b.y - a.y));
                }
            }
            crossings.sort_by(f32::total_cmp);
            for span in crossings.chunks_exact(2) {
                let start = ((span[0] - 0.5).ceil() as i32).max(0);
                let end = ((span[1] - 0.5).floor() as i32).min(self.width as i32 - 1);
                for x in start..=end {
                    self.blend(x, row, color, 1.0);
                }
            }
        }
    }
}

/// Liang-Barsky clip of the segment `[x0, y0, x1, y1]` to
/// `[0, max.0] x [0, max.1]`. `None` when nothing is left.
fn clip_segment([x0, y0, x1, y1]: [f64; 4], max: (f64, f64)) -> Option<[f64; 4]> {
    if ![x0, y0, x1, y1].iter().all(|v| v.is_finite()) || max.0 < 0.0 || max.1 < 0.0 {
        return None;
    }
    let (dx, dy) = (x1 - x0, y1 - y0);
    let (mut t0, mut t1) = (0.0_f64, 1.0_f64);
    for (p, q) in [(-dx, x0), (dx, max.0 - x0), (-dy, y0), (dy, max.1 - y0)] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            if r > t1 {
                return None;
            }
            t0 = t0.max(r);
        } else {
            if r < t0 {
                return None;
            }
            t1 = t1.min(r);
        }
    }
    let clamp = |v: f64, hi: f64| v.clamp(0.0, hi);
    Some([
        clamp(x0 + t0 * dx, max.0),
        clamp(y0 + t0 * dy, max.1),
        clamp(x0 + t1 * dx, max.0),
        clamp(y0 + t1 * dy, max.1),
    ])
}

/// The frame buffer one window draws into.
pub struct Canvas {
    pixels: Pixels,
    clear_color: Color,
    fonts: FontCache,
}

impl Canvas {
    /// Creates a canvas of `size`, filled with `clear_color`.
    pub fn new(size: PictureSize, clear_color: Color, fonts: FontCache) -> Self {
        Self {
            pixels: Pixels::new(size.width, size.height, clear_color),
            clear_color,
            fonts,
        }
    }

    /// Current size in pixels.
    pub fn picture_size(&self) -> PictureSize {
        PictureSize::new(self.pixels.width, self.pixels.height)
    }

    /// Reallocates the buffer for a new drawable size. Contents are cleared.
    pub fn resize(&mut self, size: PictureSize) {
        if size == self.picture_size() {
            return;
        }
        self.pixels = Pixels::new(size.width, size.height, self.clear_color);
    }

    /// Resets every pixel to the clear colour.
    pub fn clear(&mut self) {
        self.pixels.data.fill(self.clear_color.to_array());
    }

    /// The pixel at `(x, y)`, if inside the buffer.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        let [r, g, b, a] = self.pixels.data[self.pixels.index(x as i32, y as i32)?];
        Some(Color::rgba(r, g, b, a))
    }

    /// The raw RGBA8 bytes, row-major.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels.data)
    }
}

fn rotated(p: Point, rotation: Option<(Point, f32)>) -> Point {
    match rotation {
        Some((pivot, degrees)) => rotate_about(p, pivot, degrees),
        None => p,
    }
}

impl DrawingSurface for Canvas {
    fn size(&self) -> (u32, u32) {
        (self.pixels.width, self.pixels.height)
    }

    fn draw_point(&mut self, at: Point, color: Color) {
        self.pixels
            .blend(at.x.floor() as i32, at.y.floor() as i32, color, 1.0);
    }

    fn draw_line(&mut self, from: Point, to: Point, color: Color, rotation: Option<(Point, f32)>) {
        self.pixels
            .line(rotated(from, rotation), rotated(to, rotation), color);
    }

    fn draw_loop(&mut self, points: &[Point], color: Color) {
        match points {
            [] => {}
            [only] => self.draw_point(*only, color),
            _ => {
                for (i, &from) in points.iter().enumerate() {
                    let to = points[(i + 1) % points.len()];
                    self.pixels.line(from, to, color);
                }
            }
        }
    }

    fn draw_rect(
        &mut self,
        origin: Point,
        width: f32,
        height: f32,
        style: RectStyle,
        rotation: Option<(Point, f32)>,
    ) {
        // Outline runs through the last pixel of each side.
        let right = origin.x + (width - 1.0).max(0.0);
        let bottom = origin.y + (height - 1.0).max(0.0);
        let corners = [
            Point::new(origin.x, origin.y),
            Point::new(right, origin.y),
            Point::new(right, bottom),
            Point::new(origin.x, bottom),
        ]
        .map(|p| rotated(p, rotation));

        if let Some(fill) = style.fill {
            let area = [
                Point::new(origin.x, origin.y),
                Point::new(origin.x + width, origin.y),
                Point::new(origin.x + width, origin.y + height),
                Point::new(origin.x, origin.y + height),
            ]
            .map(|p| rotated(p, rotation));
            self.pixels.fill_polygon(&area, fill);
        }
        self.draw_loop(&corners, style.outline);
    }

    fn draw_text(&mut self, text: &str, at: Point, font: &str, pixel_height: f32, color: Color) {
        let Some(font) = self.fonts.get(font) else {
            log::warn!("draw_text: no font registered as '{font}'");
            return;
        };
        let scaled = font.as_scaled(PxScale::from(pixel_height));
        let line_height = scaled.height() + scaled.line_gap();
        let mut caret = point(at.x, at.y + scaled.ascent());
        let mut previous = None;

        for ch in text.chars() {
            if ch == '\n' {
                caret = point(at.x, caret.y + line_height);
                previous = None;
                continue;
            }
            let id = scaled.glyph_id(ch);
            if let Some(prev) = previous {
                caret.x += scaled.kern(prev, id);
            }
            let glyph = id.with_scale_and_position(scaled.scale(), caret);
            caret.x += scaled.h_advance(id);
            previous = Some(id);

            let Some(outlined) = font.outline_glyph(glyph) else {
                continue;
            };
            let bounds = outlined.px_bounds();
            let (left, top) = (bounds.min.x as i32, bounds.min.y as i32);
            let pixels = &mut self.pixels;
            outlined.draw(|x, y, coverage| {
                pixels.blend(
                    left.saturating_add(x as i32),
                    top.saturating_add(y as i32),
                    color,
                    coverage,
                );
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canvas(w: u32, h: u32) -> Canvas {
        Canvas::new(PictureSize::new(w, h), Color::BLACK, FontCache::new())
    }

    fn lit(c: &Canvas) -> usize {
        let (w, h) = c.size();
        (0..h)
            .flat_map(|y| (0..w).map(move |x| (x, y)))
            .filter(|&(x, y)| c.pixel(x, y) != Some(Color::BLACK))
            .count()
    }

    #[test]
    fn new_canvas_is_cleared() {
        let c = canvas(4, 3);
        assert_eq!(c.size(), (4, 3));
        assert_eq!(c.as_bytes().len(), 4 * 3 * 4);
        assert_eq!(lit(&c), 0);
    }

    #[test]
    fn point_and_clear() {
        let mut c = canvas(8, 8);
        c.draw_point(Point::new(2.0, 5.0), Color::RED);
        assert_eq!(c.pixel(2, 5), Some(Color::RED));
        // Off-surface points are clipped.
        c.draw_point(Point::new(-1.0, 100.0), Color::RED);
        assert_eq!(lit(&c), 1);
        c.clear();
        assert_eq!(lit(&c), 0);
    }

    #[test]
    fn horizontal_line_covers_both_ends() {
        let mut c = canvas(10, 10);
        c.draw_line(Point::new(1.0, 4.0), Point::new(6.0, 4.0), Color::WHITE, None);
        for x in 1..=6 {
            assert_eq!(c.pixel(x, 4), Some(Color::WHITE));
        }
        assert_eq!(lit(&c), 6);
    }

    #[test]
    fn rotated_line_turns_clockwise() {
        let mut c = canvas(20, 20);
        // A rightward line rotated 90 degrees about its start points down.
        let pivot = Point::new(5.0, 5.0);
        c.draw_line(pivot, Point::new(10.0, 5.0), Color::GREEN, Some((pivot, 90.0)));
        for y in 5..=10 {
            assert_eq!(c.pixel(5, y), Some(Color::GREEN));
        }
        assert_eq!(c.pixel(10, 5), Some(Color::BLACK));
    }

    #[test]
    fn loop_closes_back_to_the_start() {
        let mut c = canvas(10, 10);
        let tri = [Point::new(1.0, 1.0), Point::new(8.0, 1.0), Point::new(1.0, 8.0)];
        c.draw_loop(&tri, Color::BLUE);
        // The closing edge runs down the left column.
        for y in 1..=8 {
            assert_eq!(c.pixel(1, y), Some(Color::BLUE));
        }
    }

    #[test]
    fn outline_rect_leaves_interior_untouched() {
        let mut c = canvas(10, 10);
        c.draw_rect(Point::new(2.0, 2.0), 4.0, 3.0, RectStyle::outline(Color::WHITE), None);
        assert_eq!(c.pixel(2, 2), Some(Color::WHITE));
        assert_eq!(c.pixel(5, 2), Some(Color::WHITE));
        assert_eq!(c.pixel(5, 4), Some(Color::WHITE));
        assert_eq!(c.pixel(3, 3), Some(Color::BLACK));
        assert_eq!(c.pixel(6, 2), Some(Color::BLACK));
    }

    #[test]
    fn filled_rect_covers_exactly_its_area() {
        let mut c = canvas(10, 10);
        c.draw_rect(
            Point::new(2.0, 2.0),
            4.0,
            3.0,
            RectStyle::filled(Color::WHITE, Color::RED),
            None,
        );
        assert_eq!(lit(&c), 12);
        assert_eq!(c.pixel(3, 3), Some(Color::RED));
        assert_eq!(c.pixel(2, 2), Some(Color::WHITE));
    }

    #[test]
    fn rotated_fill_keeps_its_area() {
        let mut c = canvas(40, 40);
        let pivot = Point::new(20.0, 20.0);
        c.draw_rect(
            Point::new(15.0, 15.0),
            10.0,
            10.0,
            RectStyle::filled(Color::RED, Color::RED),
            Some((pivot, 45.0)),
        );
        let area = lit(&c) as f32;
        assert!((90.0..=130.0).contains(&area), "area {area}");
        assert_eq!(c.pixel(20, 20), Some(Color::RED));
        // The unrotated corner is now outside the diamond.
        assert_eq!(c.pixel(15, 15), Some(Color::BLACK));
    }

    #[test]
    fn translucent_colors_blend() {
        let mut c = canvas(2, 2);
        c.draw_point(Point::new(0.0, 0.0), Color::rgba(255, 255, 255, 128));
        let p = c.pixel(0, 0).unwrap();
        assert!((127..=129).contains(&p.r));
    }

    #[test]
    fn unknown_font_draws_nothing() {
        let mut c = canvas(16, 16);
        c.draw_text("hi", Point::new(0.0, 0.0), "missing", 12.0, Color::WHITE);
        assert_eq!(lit(&c), 0);
    }

    #[test]
    fn resize_reallocates() {
        let mut c = canvas(4, 4);
        c.draw_point(Point::new(1.0, 1.0), Color::RED);
        c.resize(PictureSize::new(6, 2));
        assert_eq!(c.size(), (6, 2));
        assert_eq!(c.as_bytes().len(), 6 * 2 * 4);
        assert_eq!(lit(&c), 0);
    }

    #[test]
    fn far_offscreen_line_is_clipped() {
        let mut c = canvas(8, 8);
        c.draw_line(Point::new(-3e9, 4.0), Point::new(3e9, 4.0), Color::WHITE, None);
        for x in 0..8 {
            assert_eq!(c.pixel(x, 4), Some(Color::WHITE));
        }
        assert_eq!(lit(&c), 8);
    }

    #[test]
    fn line_entering_from_outside_keeps_its_visible_part() {
        let mut c = canvas(10, 10);
        c.draw_line(Point::new(-20.0, 2.0), Point::new(3.0, 2.0), Color::WHITE, None);
        for x in 0..=3 {
            assert_eq!(c.pixel(x, 2), Some(Color::WHITE));
        }
        assert_eq!(lit(&c), 4);
    }

    #[test]
    fn lines_missing_the_surface_draw_nothing() {
        let mut c = canvas(8, 8);
        c.draw_line(Point::new(-5e8, -1.0), Point::new(5e8, -1.0), Color::WHITE, None);
        c.draw_line(Point::new(20.0, 0.0), Point::new(40.0, 30.0), Color::WHITE, None);
        c.draw_line(Point::new(f32::NAN, 0.0), Point::new(4.0, 4.0), Color::WHITE, None);
        assert_eq!(lit(&c), 0);
    }

    #[test]
    fn huge_filled_rect_covers_the_surface() {
        let mut c = canvas(6, 5);
        c.draw_rect(
            Point::new(-3e9, -3e9),
            6e9,
            6e9,
            RectStyle::filled(Color::WHITE, Color::RED),
            None,
        );
        assert!((0..5).all(|y| (0..6).all(|x| c.pixel(x, y) == Some(Color::RED))));
    }
}
