use crate::palette::pairing::{BACKGROUND, LINK, PAIRED, UNPAIRED};
use crate::{Canvas, SceneRenderer};
use particle_simulation::{make_rng, NeighborQuery, PairingSimulation, Simulation};
use rand::rngs::StdRng;
use rand::Rng;

const LINK_WIDTH: f32 = 1.0;
const PAIRED_RADIUS: f32 = 1.5;
const UNPAIRED_RADIUS: f32 = 1.0;
const UNPAIRED_ALPHA: f32 = 0.3;

/// Bond opacity; colder condensates draw brighter links
pub fn link_opacity(temperature: f32) -> f32 {
    0.15 + (1.0 - temperature) * 0.2
}

/// Electrons with their pair bonds
pub struct PairRenderer {
    /// Flicker of paired electrons
    rng: StdRng,
}

impl PairRenderer {
    pub fn new(seed: Option<u64>) -> Self {
        Self {
            rng: make_rng(seed),
        }
    }
}

impl<Q: NeighborQuery> SceneRenderer<PairingSimulation<Q>> for PairRenderer {
    fn draw(&mut self, simulation: &PairingSimulation<Q>, canvas: &mut dyn Canvas) {
        canvas.fill(BACKGROUND);

        let particles = simulation.entities();
        let half = simulation.bounds().size() * 0.5;
        let link = LINK.with_alpha(link_opacity(simulation.params().temperature));

        // Bonds first so the electrons sit on top of them
        for (i, particle) in particles.iter().enumerate() {
            let Some(partner) = particle.partner.filter(|&j| i < j) else {
                continue;
            };
            let Some(partner) = particles.get(partner) else {
                continue;
            };
            let a = particle.motion.position;
            let b = partner.motion.position;
            // A pair straddling a wrap edge would draw across the whole view
            let apart = (a - b).abs();
            if apart.x < half.x && apart.y < half.y {
                canvas.stroke_line(a, b, LINK_WIDTH, link);
            }
        }

        for particle in particles {
            if particle.is_paired() {
                let alpha = 0.4 + self.rng.random::<f32>() * 0.1;
                canvas.fill_circle(particle.motion.position, PAIRED_RADIUS, PAIRED.with_alpha(alpha));
            } else {
                canvas.fill_circle(
                    particle.motion.position,
                    UNPAIRED_RADIUS,
                    UNPAIRED.with_alpha(UNPAIRED_ALPHA),
                );
            }
        }
    }
}
