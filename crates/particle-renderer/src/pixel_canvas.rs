//! Software RGBA canvas
//!
//! Rasterizes with analytic coverage antialiasing into 8-bit straight-alpha
//! pixels. The byte view is uploaded as is by the host.

use crate::{sample_gradient, Canvas, Color, CompositeMode, GradientStop};
use bytemuck::{Pod, Zeroable};
use glam::Vec2;
use std::f32::consts::PI;
use std::ops::Range;

/// One pixel as stored, `Rgba8Unorm` layout
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Pod, Zeroable)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl From<[u8; 4]> for Rgba8 {
    fn from([r, g, b, a]: [u8; 4]) -> Self {
        Self { r, g, b, a }
    }
}

pub struct PixelCanvas {
    width: u32,
    height: u32,
    /// Physical pixels per logical unit
    scale: f32,
    mode: CompositeMode,
    pixels: Vec<Rgba8>,
}

impl PixelCanvas {
    /// Transparent canvas of `width` x `height` physical pixels
    pub fn new(width: u32, height: u32, scale: f32) -> Self {
        Self {
            width,
            height,
            scale: sanitize_scale(scale),
            mode: CompositeMode::SourceOver,
            pixels: vec![Rgba8::default(); width as usize * height as usize],
        }
    }

    /// Resizing discards the content, like a canvas element does
    pub fn resize(&mut self, width: u32, height: u32, scale: f32) {
        let scale = sanitize_scale(scale);
        if width == self.width && height == self.height && scale == self.scale {
            return;
        }
        *self = Self::new(width, height, scale);
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn clear(&mut self) {
        self.pixels.fill(Rgba8::default());
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels.get((y * self.width + x) as usize).copied()
    }

    pub fn pixels(&self) -> &[Rgba8] {
        &self.pixels
    }

    /// Row-major RGBA bytes, `4 * width` per row
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    fn to_physical(&self, point: Vec2) -> Vec2 {
        point * self.scale
    }

    /// Pixel columns and rows touched by the physical box, clipped to the surface
    fn span(&self, min: Vec2, max: Vec2) -> Option<(Range<u32>, Range<u32>)> {
        if !(min.is_finite() && max.is_finite()) {
            return None;
        }
        let x0 = min.x.floor().max(0.0) as u32;
        let y0 = min.y.floor().max(0.0) as u32;
        let x1 = (max.x.ceil().max(0.0) as u32).min(self.width);
        let y1 = (max.y.ceil().max(0.0) as u32).min(self.height);
        (x0 < x1 && y0 < y1).then_some((x0..x1, y0..y1))
    }

    fn blend(&mut self, x: u32, y: u32, color: Color, coverage: f32) {
        let source_alpha = color.a * coverage.clamp(0.0, 1.0);
        if source_alpha <= 0.0 {
            return;
        }
        let index = (y * self.width + x) as usize;
        let Some(pixel) = self.pixels.get_mut(index) else {
            return;
        };
        let dest = [pixel.r, pixel.g, pixel.b].map(|c| c as f32 / 255.0);
        let dest_alpha = pixel.a as f32 / 255.0;
        let source = [color.r, color.g, color.b];

        let (out, out_alpha) = match self.mode {
            CompositeMode::SourceOver => {
                let out_alpha = source_alpha + dest_alpha * (1.0 - source_alpha);
                let out: [f32; 3] = std::array::from_fn(|i| {
                    (source[i] * source_alpha + dest[i] * dest_alpha * (1.0 - source_alpha)) / out_alpha
                });
                (out, out_alpha)
            }
            CompositeMode::Lighter => {
                let out_alpha = (source_alpha + dest_alpha).min(1.0);
                let out: [f32; 3] = std::array::from_fn(|i| {
                    let premultiplied = (source[i] * source_alpha + dest[i] * dest_alpha).min(1.0);
                    premultiplied / out_alpha
                });
                (out, out_alpha)
            }
        };
        *pixel = Color::new(out[0], out[1], out[2], out_alpha).to_rgba8().into();
    }
}

fn sanitize_scale(scale: f32) -> f32 {
    if scale.is_finite() && scale > 0.0 {
        scale
    } else {
        1.0
    }
}

/// Overlap of the unit pixel starting at `pixel` with `[min, max)`
fn axis_overlap(pixel: u32, min: f32, max: f32) -> f32 {
    let start = pixel as f32;
    ((max.min(start + 1.0)) - min.max(start)).clamp(0.0, 1.0)
}

fn pixel_center(x: u32, y: u32) -> Vec2 {
    Vec2::new(x as f32 + 0.5, y as f32 + 0.5)
}

/// Coverage of a disc edge at distance `d`, capped by the disc's area for
/// sub-pixel radii
fn disc_coverage(radius: f32, d: f32) -> f32 {
    (radius + 0.5 - d).clamp(0.0, 1.0).min(PI * radius * radius)
}

fn distance_to_segment(point: Vec2, a: Vec2, b: Vec2) -> f32 {
    let ab = b - a;
    let length_sq = ab.length_squared();
    let t = if length_sq > 0.0 {
        ((point - a).dot(ab) / length_sq).clamp(0.0, 1.0)
    } else {
        0.0
    };
    point.distance(a + ab * t)
}

impl Canvas for PixelCanvas {
    fn size(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32) / self.scale
    }

    fn composite(&self) -> CompositeMode {
        self.mode
    }

    fn set_composite(&mut self, mode: CompositeMode) {
        self.mode = mode;
    }

    fn fill_rect(&mut self, min: Vec2, size: Vec2, color: Color) {
        let a = self.to_physical(min);
        let b = self.to_physical(min + size);
        let (lo, hi) = (a.min(b), a.max(b));
        let Some((xs, ys)) = self.span(lo, hi) else {
            return;
        };
        for y in ys {
            let cover_y = axis_overlap(y, lo.y, hi.y);
            for x in xs.clone() {
                self.blend(x, y, color, cover_y * axis_overlap(x, lo.x, hi.x));
            }
        }
    }

    fn fill_rect_gradient(
        &mut self,
        min: Vec2,
        size: Vec2,
        from: Vec2,
        to: Vec2,
        stops: &[GradientStop],
    ) {
        let a = self.to_physical(min);
        let b = self.to_physical(min + size);
        let (lo, hi) = (a.min(b), a.max(b));
        let Some((xs, ys)) = self.span(lo, hi) else {
            return;
        };
        let axis = to - from;
        let axis_length_sq = axis.length_squared();
        for y in ys {
            let cover_y = axis_overlap(y, lo.y, hi.y);
            for x in xs.clone() {
                let point = pixel_center(x, y) / self.scale;
                let t = if axis_length_sq > 0.0 {
                    (point - from).dot(axis) / axis_length_sq
                } else {
                    0.0
                };
                let color = sample_gradient(stops, t);
                self.blend(x, y, color, cover_y * axis_overlap(x, lo.x, hi.x));
            }
        }
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        let center = self.to_physical(center);
        let radius = radius * self.scale;
        if !radius.is_finite() || radius <= 0.0 {
            return;
        }
        let reach = Vec2::splat(radius + 1.0);
        let Some((xs, ys)) = self.span(center - reach, center + reach) else {
            return;
        };
        for y in ys {
            for x in xs.clone() {
                let d = pixel_center(x, y).distance(center);
                self.blend(x, y, color, disc_coverage(radius, d));
            }
        }
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Color) {
        let a = self.to_physical(from);
        let b = self.to_physical(to);
        let width = width * self.scale;
        if !width.is_finite() || width <= 0.0 {
            return;
        }
        let half = width * 0.5;
        let reach = Vec2::splat(half + 1.0);
        let Some((xs, ys)) = self.span(a.min(b) - reach, a.max(b) + reach) else {
            return;
        };
        for y in ys {
            for x in xs.clone() {
                let d = distance_to_segment(pixel_center(x, y), a, b);
                let coverage = (half + 0.5 - d).clamp(0.0, 1.0).min(width);
                self.blend(x, y, color, coverage);
            }
        }
    }

    fn radial_glow(&mut self, center: Vec2, radius: f32, inner: Color, outer: Color) {
        let center = self.to_physical(center);
        let radius = radius * self.scale;
        if !radius.is_finite() || radius <= 0.0 {
            return;
        }
        let reach = Vec2::splat(radius + 1.0);
        let Some((xs, ys)) = self.span(center - reach, center + reach) else {
            return;
        };
        for y in ys {
            for x in xs.clone() {
                let d = pixel_center(x, y).distance(center);
                let color = inner.lerp(outer, d / radius);
                self.blend(x, y, color, disc_coverage(radius, d));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BLACK: Color = Color::from_rgb8(0, 0, 0);
    const WHITE: Color = Color::from_rgb8(255, 255, 255);

    fn canvas(width: u32, height: u32) -> PixelCanvas {
        PixelCanvas::new(width, height, 1.0)
    }

    #[test]
    fn test_starts_transparent() {
        let canvas = canvas(4, 3);
        assert_eq!(canvas.as_bytes().len(), 4 * 3 * 4);
        assert!(canvas.as_bytes().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_overpaint_fades_previous_frame() {
        let mut canvas = canvas(2, 2);
        canvas.fill(WHITE);
        canvas.fill(BLACK.with_alpha(0.5));
        assert_eq!(canvas.pixel(1, 1), Some(Rgba8::from([128, 128, 128, 255])));

        // Repeated low-alpha overpaint converges on the overpaint color
        let background = Color::from_rgb8(2, 6, 23);
        for _ in 0..200 {
            canvas.fill(background.with_alpha(0.15));
        }
        let pixel = canvas.pixel(0, 0).unwrap();
        assert!(pixel.r.abs_diff(2) <= 3 && pixel.g.abs_diff(6) <= 3 && pixel.b.abs_diff(23) <= 3);
        assert_eq!(pixel.a, 255);
    }

    #[test]
    fn test_lighter_adds_and_source_over_blends() {
        let red = Color::from_rgb8(255, 0, 0).with_alpha(0.6);

        let mut over = canvas(1, 1);
        over.fill(BLACK);
        over.fill(red);
        over.fill(red);
        assert_eq!(over.pixel(0, 0).unwrap().r, 214);

        let mut lighter = canvas(1, 1);
        lighter.fill(BLACK);
        lighter.set_composite(CompositeMode::Lighter);
        lighter.fill(red);
        assert_eq!(lighter.pixel(0, 0).unwrap().r, 153);
        lighter.fill(red);
        assert_eq!(lighter.pixel(0, 0).unwrap().r, 255);
    }

    #[test]
    fn test_circle_covers_center_not_corners() {
        let mut canvas = canvas(20, 20);
        canvas.fill_circle(Vec2::new(10.0, 10.0), 4.0, WHITE);
        assert_eq!(canvas.pixel(10, 10).unwrap().a, 255);
        assert_eq!(canvas.pixel(0, 0).unwrap().a, 0);
        assert_eq!(canvas.pixel(10, 15).unwrap().a, 0);

        // Edge pixel is partially covered
        let edge = canvas.pixel(10, 13).unwrap().a;
        assert!(edge > 0 && edge <= 255);
    }

    #[test]
    fn test_sub_pixel_circle_is_faint() {
        let mut canvas = canvas(4, 4);
        canvas.fill_circle(Vec2::new(2.5, 2.5), 0.1, WHITE);
        let alpha = canvas.pixels().iter().map(|p| p.a).max().unwrap();
        assert!(alpha > 0 && alpha < 20, "alpha {alpha}");
    }

    #[test]
    fn test_line_covers_its_path() {
        let mut canvas = canvas(20, 10);
        canvas.stroke_line(Vec2::new(2.0, 5.0), Vec2::new(18.0, 5.0), 2.0, WHITE);
        for x in 3..17 {
            assert_eq!(canvas.pixel(x, 4).unwrap().a, 255);
            assert_eq!(canvas.pixel(x, 5).unwrap().a, 255);
            assert_eq!(canvas.pixel(x, 8).unwrap().a, 0);
        }
    }

    #[test]
    fn test_scale_maps_logical_to_physical() {
        let mut canvas = PixelCanvas::new(20, 20, 2.0);
        assert_eq!(canvas.size(), Vec2::new(10.0, 10.0));
        canvas.fill_rect(Vec2::ZERO, Vec2::new(5.0, 5.0), WHITE);
        assert_eq!(canvas.pixel(9, 9).unwrap().a, 255);
        assert_eq!(canvas.pixel(10, 10).unwrap().a, 0);
    }

    #[test]
    fn test_offscreen_draws_are_clipped() {
        let mut canvas = canvas(8, 8);
        canvas.fill_circle(Vec2::new(-50.0, -50.0), 3.0, WHITE);
        canvas.stroke_line(Vec2::new(100.0, 0.0), Vec2::new(200.0, 0.0), 1.0, WHITE);
        canvas.fill_rect(Vec2::new(f32::NAN, 0.0), Vec2::ONE, WHITE);
        assert!(canvas.as_bytes().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_glow_fades_outward() {
        let mut canvas = canvas(40, 40);
        canvas.fill(BLACK);
        let inner = Color::from_rgb8(200, 220, 255).with_alpha(1.0);
        canvas.radial_glow(Vec2::new(20.0, 20.0), 15.0, inner, inner.with_alpha(0.0));
        let center = canvas.pixel(20, 20).unwrap().b;
        let middle = canvas.pixel(27, 20).unwrap().b;
        let outside = canvas.pixel(38, 20).unwrap().b;
        assert!(center > middle && middle > outside);
        assert_eq!(outside, 0);
    }

    #[test]
    fn test_resize_discards_content() {
        let mut canvas = canvas(4, 4);
        canvas.fill(WHITE);
        canvas.resize(4, 4, 1.0);
        assert_eq!(canvas.pixel(0, 0).unwrap().a, 255);
        canvas.resize(6, 2, 1.0);
        assert_eq!(canvas.pixels().len(), 12);
        assert_eq!(canvas.pixel(0, 0).unwrap().a, 0);
    }
}
