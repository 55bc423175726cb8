//! # Particle Simulation Engine
//!
//! Per-tick simulation of the emergence visualizations on a single thread:
//! entity stores, neighbor queries, the rule models and the integrator.
//!
//! Every model implements [`Simulation`]. A host calls [`Simulation::step`] once
//! per reference tick (see [`FrameClock`]) and reads the entity store back for
//! drawing; parameters are edited in place between ticks.

pub mod clock;
pub mod flocking;
pub mod gravity;
pub mod integrator;
pub mod neighbor;
pub mod network;
pub mod orbital;
pub mod pairing;
pub mod params;
pub mod simulation;

pub use clock::*;
pub use flocking::*;
pub use gravity::*;
pub use integrator::*;
pub use neighbor::*;
pub use network::*;
pub use orbital::*;
pub use pairing::*;
pub use params::*;
pub use simulation::*;
