use crate::palette::flocking::{BACKGROUND, BOID};
use crate::{with_composite, Canvas, CompositeMode, SceneRenderer};
use particle_physics::BOID_SEGMENT_HALF_LENGTH;
use particle_simulation::{FlockingSimulation, NeighborQuery, Simulation};

const SEGMENT_ALPHA: f32 = 0.6;
const SEGMENT_WIDTH: f32 = 1.5;
const HEAD_RADIUS: f32 = 0.8;

/// Boids as glowing heading-aligned dashes over fading trails
#[derive(Debug, Default)]
pub struct FlockRenderer;

impl<Q: NeighborQuery> SceneRenderer<FlockingSimulation<Q>> for FlockRenderer {
    fn draw(&mut self, simulation: &FlockingSimulation<Q>, canvas: &mut dyn Canvas) {
        // Trail length is the overpaint alpha: smaller fades slower
        canvas.fill(BACKGROUND.with_alpha(simulation.params().trail_length));

        let boids = simulation.entities();
        with_composite(canvas, CompositeMode::Lighter, |canvas| {
            let body = BOID.with_alpha(SEGMENT_ALPHA);
            for boid in boids {
                let offset = boid.heading() * BOID_SEGMENT_HALF_LENGTH;
                let position = boid.motion.position;
                canvas.stroke_line(position - offset, position + offset, SEGMENT_WIDTH, body);
            }
            for boid in boids {
                canvas.fill_circle(boid.motion.position, HEAD_RADIUS, BOID);
            }
        });
    }
}
