use crate::palette::gravity_background;
use crate::{with_composite, Canvas, Color, CompositeMode, SceneRenderer};
use glam::Vec2;
use particle_simulation::{GravitySimulation, Simulation};

/// Fraction of the shorter view side covered by the outer boundary
const VIEW_FILL: f32 = 0.9;
const BODY_RADIUS: f32 = 2.5;
const BODY_GLOW_RADIUS: f32 = 8.0;
const TRAIL_WIDTH: f32 = 1.2;
const TRAIL_ALPHA: f32 = 0.6;
const CENTRAL_GLOW_FACTOR: f32 = 4.0;

/// World-to-view mapping: the central body at the view center, the outer
/// boundary just inside the shorter side
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WorldView {
    pub center: Vec2,
    /// Logical units per world unit
    pub scale: f32,
}

impl WorldView {
    pub fn fit(view_size: Vec2, max_radius: f32) -> Self {
        let scale = if max_radius > 0.0 {
            view_size.min_element() * 0.5 * VIEW_FILL / max_radius
        } else {
            1.0
        };
        Self {
            center: view_size * 0.5,
            scale,
        }
    }

    pub fn to_view(&self, world: Vec2) -> Vec2 {
        self.center + world * self.scale
    }
}

/// Orbiting bodies with fading trails around a dark central mass
#[derive(Debug, Default)]
pub struct GravityRenderer {
    points: Vec<Vec2>,
}

impl SceneRenderer<GravitySimulation> for GravityRenderer {
    fn draw(&mut self, simulation: &GravitySimulation, canvas: &mut dyn Canvas) {
        let params = simulation.params();
        let view = WorldView::fit(canvas.size(), params.max_radius);
        canvas.fill(gravity_background());

        // Trails fade from transparent at the oldest point
        for body in simulation.orbiting() {
            self.points.clear();
            self.points.extend(body.trail.iter().map(|&p| view.to_view(p)));
            let [r, g, b] = body.color;
            let color = Color::from_rgb8(r, g, b);
            let segments = self.points.len().saturating_sub(1);
            for (i, segment) in self.points.windows(2).enumerate() {
                let age = (i + 1) as f32 / segments as f32;
                canvas.stroke_line(segment[0], segment[1], TRAIL_WIDTH, color.with_alpha(age * TRAIL_ALPHA));
            }
        }

        let bodies = simulation.orbiting();
        with_composite(canvas, CompositeMode::Lighter, |canvas| {
            for body in bodies {
                let [r, g, b] = body.color;
                let color = Color::from_rgb8(r, g, b);
                let position = view.to_view(body.motion.position);
                canvas.radial_glow(position, BODY_GLOW_RADIUS, color.with_alpha(0.35), color.with_alpha(0.0));
                canvas.fill_circle(position, BODY_RADIUS, color);
            }
        });

        let central = simulation.central();
        let [r, g, b] = central.color;
        let radius = (params.capture_radius * view.scale).max(BODY_RADIUS);
        let halo = Color::from_catppuccin(&catppuccin::PALETTE.mocha.colors.mauve);
        canvas.radial_glow(
            view.center,
            radius * CENTRAL_GLOW_FACTOR,
            halo.with_alpha(0.4),
            halo.with_alpha(0.0),
        );
        canvas.fill_circle(view.center, radius, Color::from_rgb8(r, g, b));
    }
}
