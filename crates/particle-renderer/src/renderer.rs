//! Scene rendering

use crate::Canvas;
use particle_simulation::Simulation;

/// Draws one simulation's current state
///
/// Renderers only read the simulation. Any randomness they use (flicker,
/// jitter) is their own and never feeds back into the model.
pub trait SceneRenderer<S: Simulation> {
    fn draw(&mut self, simulation: &S, canvas: &mut dyn Canvas);
}
