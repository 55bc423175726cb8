//! Entity types for each simulation kind
//!
//! The variants share position/velocity/acceleration through [`Motion`] and the
//! [`Kinematic`] trait; each one only carries the fields its model reads.

use crate::trail::Trail;
use glam::{Vec2, Vec3};

/// Kinematic state of a point mass
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Motion {
    pub position: Vec2,
    pub velocity: Vec2,
    /// Per-tick scratch value, zeroed by the integrator
    pub acceleration: Vec2,
}

impl Motion {
    pub fn new(position: Vec2, velocity: Vec2) -> Self {
        Self {
            position,
            velocity,
            acceleration: Vec2::ZERO,
        }
    }
}

/// Common interface over every integrated entity
pub trait Kinematic {
    fn motion(&self) -> &Motion;
    fn motion_mut(&mut self) -> &mut Motion;

    fn position(&self) -> Vec2 {
        self.motion().position
    }

    fn velocity(&self) -> Vec2 {
        self.motion().velocity
    }

    fn speed(&self) -> f32 {
        self.motion().velocity.length()
    }
}

/// A boid
#[derive(Clone, Debug, PartialEq)]
pub struct FlockingParticle {
    pub id: u32,
    pub motion: Motion,
}

impl FlockingParticle {
    pub fn new(id: u32, position: Vec2, velocity: Vec2) -> Self {
        Self {
            id,
            motion: Motion::new(position, velocity),
        }
    }

    /// Unit heading, or +X for a particle at rest
    pub fn heading(&self) -> Vec2 {
        self.motion.velocity.try_normalize().unwrap_or(Vec2::X)
    }
}

impl Kinematic for FlockingParticle {
    fn motion(&self) -> &Motion {
        &self.motion
    }

    fn motion_mut(&mut self) -> &mut Motion {
        &mut self.motion
    }
}

/// Electron in the pairwise-coupling model
///
/// `partner` is an index into the owning store. The link is symmetric; only the
/// simulation may set or clear it, and always on both sides at once.
#[derive(Clone, Debug, PartialEq)]
pub struct PairingParticle {
    pub id: u32,
    pub motion: Motion,
    pub partner: Option<usize>,
    pub mass: f32,
    /// Render-only variation in [0, 1)
    pub color_offset: f32,
}

impl PairingParticle {
    pub fn new(id: u32, position: Vec2, velocity: Vec2, color_offset: f32) -> Self {
        Self {
            id,
            motion: Motion::new(position, velocity),
            partner: None,
            mass: 1.0,
            color_offset,
        }
    }

    pub fn is_paired(&self) -> bool {
        self.partner.is_some()
    }
}

impl Kinematic for PairingParticle {
    fn motion(&self) -> &Motion {
        &self.motion
    }

    fn motion_mut(&mut self) -> &mut Motion {
        &mut self.motion
    }
}

/// Body in the central-mass gravity model
#[derive(Clone, Debug)]
pub struct CelestialBody {
    pub id: u32,
    pub motion: Motion,
    pub mass: f32,
    pub trail: Trail,
    /// sRGB color, chosen at creation
    pub color: [u8; 3],
    /// The dominant mass at the origin; never integrated
    pub central: bool,
}

impl CelestialBody {
    pub fn central(mass: f32, color: [u8; 3]) -> Self {
        Self {
            id: 0,
            motion: Motion::default(),
            mass,
            trail: Trail::new(0),
            color,
            central: true,
        }
    }

    pub fn orbiting(
        id: u32,
        position: Vec2,
        velocity: Vec2,
        mass: f32,
        trail_capacity: usize,
        color: [u8; 3],
    ) -> Self {
        Self {
            id,
            motion: Motion::new(position, velocity),
            mass,
            trail: Trail::new(trail_capacity),
            color,
            central: false,
        }
    }

    /// Distance from the origin, where the central body sits
    pub fn radius(&self) -> f32 {
        self.motion.position.length()
    }
}

impl Kinematic for CelestialBody {
    fn motion(&self) -> &Motion {
        &self.motion
    }

    fn motion_mut(&mut self) -> &mut Motion {
        &mut self.motion
    }
}

/// A point accepted from an orbital probability density
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrbitalSample {
    /// Accepted position in view units (already scaled)
    pub base: Vec3,
    /// Twinkle phase, advanced by `life_speed` each tick
    pub phase: f32,
    pub life_speed: f32,
    /// Peak opacity of the twinkle
    pub target_alpha: f32,
    pub size: f32,
    /// Offset of the breathing oscillation
    pub oscillation_offset: f32,
}

impl OrbitalSample {
    /// Breathing position at time `t` (seconds)
    pub fn position_at(&self, t: f32, amplitude: f32) -> Vec3 {
        let o = self.oscillation_offset;
        self.base
            + Vec3::new(
                (t * 2.0 + o).sin(),
                (t * 3.0 + o).cos(),
                (t * 4.0 + o).sin(),
            ) * amplitude
    }

    /// Current opacity in [0, target_alpha]
    pub fn opacity(&self) -> f32 {
        (self.phase.sin() + 1.0) * 0.5 * self.target_alpha
    }
}

/// Drifting node of the network background
#[derive(Clone, Debug, PartialEq)]
pub struct NetworkNode {
    pub id: u32,
    pub motion: Motion,
    pub size: f32,
    pub opacity: f32,
}

impl Kinematic for NetworkNode {
    fn motion(&self) -> &Motion {
        &self.motion
    }

    fn motion_mut(&mut self) -> &mut Motion {
        &mut self.motion
    }
}
