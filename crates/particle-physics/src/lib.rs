//! # Particle Physics
//!
//! Entity types and rule math for the emergence visualizations: flocking boids,
//! Cooper-pair coupling, central-mass gravity and hydrogen orbital clouds.
//!
//! Everything in this crate is deterministic and allocation-light. Randomness,
//! neighbor search and integration live in `particle-simulation`.

pub mod constants;
pub mod forces;
pub mod orbital;
pub mod particle;
pub mod trail;

pub use constants::*;
pub use forces::*;
pub use orbital::*;
pub use particle::*;
pub use trail::*;
