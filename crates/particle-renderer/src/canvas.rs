//! 2D drawing surface
//!
//! The subset of an immediate-mode canvas the scene renderers need. All
//! coordinates are logical units; implementations apply their own
//! device-pixel scale.

use crate::Color;
use glam::Vec2;

/// How drawn pixels combine with what is already on the surface
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CompositeMode {
    /// Normal alpha blending
    #[default]
    SourceOver,
    /// Additive: overlapping draws brighten toward white
    Lighter,
}

/// Color stop of a gradient, offset in [0, 1]
pub type GradientStop = (f32, Color);

pub trait Canvas {
    /// Logical size of the surface
    fn size(&self) -> Vec2;

    fn composite(&self) -> CompositeMode;

    fn set_composite(&mut self, mode: CompositeMode);

    fn fill_rect(&mut self, min: Vec2, size: Vec2, color: Color);

    /// Axis-aligned rect filled with a linear gradient running `from` -> `to`
    fn fill_rect_gradient(
        &mut self,
        min: Vec2,
        size: Vec2,
        from: Vec2,
        to: Vec2,
        stops: &[GradientStop],
    );

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color);

    /// Round-capped segment
    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Color);

    /// Disc fading from `inner` at the center to `outer` at `radius`
    fn radial_glow(&mut self, center: Vec2, radius: f32, inner: Color, outer: Color);

    /// Cover the whole surface. With a translucent color this fades the
    /// previous frame instead of clearing it.
    fn fill(&mut self, color: Color) {
        self.fill_rect(Vec2::ZERO, self.size(), color);
    }

    fn stroke_polyline(&mut self, points: &[Vec2], width: f32, color: Color) {
        for segment in points.windows(2) {
            self.stroke_line(segment[0], segment[1], width, color);
        }
    }
}

/// Color of a gradient at `t`, clamped to the end stops
pub fn sample_gradient(stops: &[GradientStop], t: f32) -> Color {
    let Some(&(first_offset, first)) = stops.first() else {
        return Color::transparent();
    };
    if t <= first_offset {
        return first;
    }
    for pair in stops.windows(2) {
        let (a_offset, a) = pair[0];
        let (b_offset, b) = pair[1];
        if t <= b_offset {
            let span = b_offset - a_offset;
            let local = if span > 0.0 { (t - a_offset) / span } else { 1.0 };
            return a.lerp(b, local);
        }
    }
    stops[stops.len() - 1].1
}

/// Runs `draw` with `mode` active and restores the previous mode afterwards
pub fn with_composite(
    canvas: &mut dyn Canvas,
    mode: CompositeMode,
    draw: impl FnOnce(&mut dyn Canvas),
) {
    let previous = canvas.composite();
    canvas.set_composite(mode);
    draw(&mut *canvas);
    canvas.set_composite(previous);
}

#[cfg(test)]
mod tests {
    use super::*;

    const STOPS: [GradientStop; 3] = [
        (0.0, Color::new(0.0, 0.0, 0.0, 1.0)),
        (0.5, Color::new(1.0, 0.0, 0.0, 1.0)),
        (1.0, Color::new(1.0, 1.0, 1.0, 1.0)),
    ];

    #[test]
    fn test_gradient_interpolates_between_stops() {
        let quarter = sample_gradient(&STOPS, 0.25);
        assert!((quarter.r - 0.5).abs() < 1e-6);
        assert_eq!(quarter.g, 0.0);

        let late = sample_gradient(&STOPS, 0.75);
        assert_eq!(late.r, 1.0);
        assert!((late.g - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_gradient_clamps_outside_range() {
        assert_eq!(sample_gradient(&STOPS, -1.0), STOPS[0].1);
        assert_eq!(sample_gradient(&STOPS, 2.0), STOPS[2].1);
        assert_eq!(sample_gradient(&[], 0.5), Color::transparent());
    }
}
