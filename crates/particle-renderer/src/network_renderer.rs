use crate::palette::network::{GRADIENT, LINK, NODE};
use crate::{Canvas, SceneRenderer};
use glam::Vec2;
use particle_simulation::{NetworkSimulation, Simulation};

const LINK_WIDTH: f32 = 0.5;
const LINK_ALPHA: f32 = 0.1;

/// Drifting nodes joined by faint proximity links over a diagonal gradient
#[derive(Debug, Default)]
pub struct NetworkRenderer;

impl SceneRenderer<NetworkSimulation> for NetworkRenderer {
    fn draw(&mut self, simulation: &NetworkSimulation, canvas: &mut dyn Canvas) {
        let size = canvas.size();
        canvas.fill(GRADIENT[0].1);
        canvas.fill_rect_gradient(Vec2::ZERO, size, Vec2::ZERO, size, &GRADIENT);

        let nodes = simulation.entities();
        for node in nodes {
            canvas.fill_circle(node.motion.position, node.size, NODE.with_alpha(node.opacity));
        }
        for link in simulation.links() {
            let (Some(a), Some(b)) = (nodes.get(link.a), nodes.get(link.b)) else {
                continue;
            };
            canvas.stroke_line(
                a.motion.position,
                b.motion.position,
                LINK_WIDTH,
                LINK.with_alpha(LINK_ALPHA * link.strength),
            );
        }
    }
}
