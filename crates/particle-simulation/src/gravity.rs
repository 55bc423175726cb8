//! Bodies orbiting one dominant central mass
//!
//! World units are centered on the central body; bodies interact with the
//! center only. Capture respawns a body near the outer edge and the outer
//! boundary reflects, so every body stays in view indefinitely.

use crate::{integrate, make_rng, Bounds, FrameTime, GravityParams, Simulation, Step};
use glam::Vec2;
use particle_physics::{central_gravity, circular_orbit_speed, reflect, CelestialBody, BODY_MASS};
use rand::rngs::StdRng;
use rand::Rng;
use std::f32::consts::TAU;

/// Body colors, cycled by id
fn body_palette() -> [[u8; 3]; 6] {
    let colors = &catppuccin::PALETTE.mocha.colors;
    [
        &colors.teal,
        &colors.green,
        &colors.sky,
        &colors.lavender,
        &colors.peach,
        &colors.rosewater,
    ]
    .map(|color| [color.rgb.r, color.rgb.g, color.rgb.b])
}

fn central_color() -> [u8; 3] {
    let crust = &catppuccin::PALETTE.mocha.colors.crust;
    [crust.rgb.r, crust.rgb.g, crust.rgb.b]
}

pub struct GravitySimulation {
    params: GravityParams,
    bounds: Bounds,
    /// Index 0 is the central body
    bodies: Vec<CelestialBody>,
    rng: StdRng,
    respawns: u64,
}

impl GravitySimulation {
    pub fn new(params: GravityParams, bounds: Bounds, seed: Option<u64>) -> Self {
        Self::with_rng(params, bounds, make_rng(seed))
    }

    pub fn with_rng(params: GravityParams, bounds: Bounds, rng: StdRng) -> Self {
        let mut simulation = Self {
            params,
            bounds,
            bodies: Vec::new(),
            rng,
            respawns: 0,
        };
        simulation.initialize();
        simulation
    }

    /// Central body plus `body_count` bodies on near-circular orbits
    fn initialize(&mut self) {
        let params = self.params;
        let palette = body_palette();
        let rng = &mut self.rng;

        let mut bodies = Vec::with_capacity(params.body_count + 1);
        bodies.push(CelestialBody::central(params.central_mass, central_color()));
        for i in 0..params.body_count {
            let angle = rng.random::<f32>() * TAU;
            let radius = params.spawn_radius * rng.random_range(0.4..1.0);
            let direction = Vec2::from_angle(angle);
            let speed = circular_orbit_speed(params.gm(), radius) * rng.random_range(0.95..1.05);
            let id = i as u32 + 1;
            bodies.push(CelestialBody::orbiting(
                id,
                direction * radius,
                direction.perp() * speed,
                BODY_MASS,
                params.trail_capacity,
                palette[i % palette.len()],
            ));
        }
        self.bodies = bodies;
        log::info!("Gravity: {} bodies around M={}", params.body_count, params.central_mass);
    }

    pub fn central(&self) -> &CelestialBody {
        &self.bodies[0]
    }

    /// Bodies other than the central one
    pub fn orbiting(&self) -> &[CelestialBody] {
        &self.bodies[1..]
    }

    /// Total captures since the last reset
    pub fn respawns(&self) -> u64 {
        self.respawns
    }

    /// Place a body by hand; the trail is cleared
    pub fn place(&mut self, index: usize, position: Vec2, velocity: Vec2) {
        if let Some(body) = self.bodies.get_mut(index).filter(|b| !b.central) {
            body.motion.position = position;
            body.motion.velocity = velocity;
            body.trail.clear();
        }
    }
}

/// Put a captured body back near the outer edge on a tangential orbit
///
/// The trail restarts at the new position.
fn respawn(body: &mut CelestialBody, params: &GravityParams, rng: &mut StdRng) {
    let angle = rng.random::<f32>() * TAU;
    let direction = Vec2::from_angle(angle);
    let band = (params.orbit_speed_max - params.orbit_speed_min).max(0.0);
    let speed = params.orbit_speed_min + rng.random::<f32>() * band;

    body.motion.position = direction * params.spawn_radius;
    body.motion.velocity = direction.perp() * speed;
    body.motion.acceleration = Vec2::ZERO;
    body.trail.clear();
    body.trail.push(body.motion.position);
}

/// Bounce off the outer circle when moving outward, then clamp onto it
fn contain(body: &mut CelestialBody, params: &GravityParams) {
    let radius = body.radius();
    if radius <= params.max_radius || radius == 0.0 {
        return;
    }
    let normal = body.motion.position / radius;
    let velocity = body.motion.velocity;
    if velocity.dot(normal) > 0.0 {
        body.motion.velocity =
            reflect(velocity, normal, params.bounce_damping) - normal * params.inward_nudge;
    }
    body.motion.position = normal * params.max_radius;
}

impl Simulation for GravitySimulation {
    type Entity = CelestialBody;
    type Params = GravityParams;

    fn name(&self) -> &'static str {
        "gravity"
    }

    fn step(&mut self, _time: &FrameTime) {
        if self.bodies.len() != self.params.body_count + 1 {
            log::debug!(
                "Gravity: body count {} -> {}, reinitializing",
                self.bodies.len().saturating_sub(1),
                self.params.body_count
            );
            self.initialize();
        }

        let params = self.params;
        let gm = params.gm();
        let step = Step {
            max_speed: None,
            friction: 1.0 - params.drag,
        };
        let rng = &mut self.rng;
        let mut captured = 0;

        self.bodies[0].mass = params.central_mass;
        for body in self.bodies.iter_mut().filter(|b| !b.central) {
            if body.radius() < params.capture_radius {
                respawn(body, &params, rng);
                captured += 1;
                continue;
            }

            contain(body, &params);
            body.motion.acceleration += central_gravity(body.motion.position, gm, params.softening);
            integrate(body, step);

            if body.radius() < params.capture_radius {
                respawn(body, &params, rng);
                captured += 1;
                continue;
            }
            body.trail.push(body.motion.position);
        }

        if captured > 0 {
            self.respawns += captured;
            log::debug!("Gravity: {} captured and respawned", captured);
        }
    }

    /// World units are independent of the surface; only the stored size changes
    fn resize(&mut self, bounds: Bounds) {
        self.bounds = bounds;
    }

    fn reset(&mut self) {
        self.respawns = 0;
        self.initialize();
    }

    fn bounds(&self) -> Bounds {
        self.bounds
    }

    fn entities(&self) -> &[CelestialBody] {
        &self.bodies
    }

    fn params(&self) -> &GravityParams {
        &self.params
    }

    fn params_mut(&mut self) -> &mut GravityParams {
        &mut self.params
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use particle_physics::Kinematic;

    fn sim(seed: u64) -> GravitySimulation {
        GravitySimulation::new(GravityParams::default(), Bounds::new(800.0, 600.0), Some(seed))
    }

    #[test]
    fn test_central_body_first_and_fixed() {
        let mut sim = sim(1);
        assert_eq!(sim.len(), 13);
        assert!(sim.central().central);
        assert_eq!(sim.orbiting().len(), 12);
        for tick in 1..=50 {
            sim.step(&FrameTime::at_tick(tick));
        }
        assert_eq!(sim.central().position(), Vec2::ZERO);
    }

    #[test]
    fn test_bodies_stay_inside_max_radius() {
        let mut sim = sim(2);
        sim.place(1, Vec2::new(23.9, 0.0), Vec2::new(2.0, 0.0));
        for tick in 1..=2000 {
            sim.step(&FrameTime::at_tick(tick));
            for body in sim.orbiting() {
                assert!(body.radius() <= 24.0 + 2.5, "escaped to {}", body.radius());
                assert!(body.radius() >= 1.0);
            }
        }
    }

    #[test]
    fn test_outward_body_reflects_with_damping() {
        let params = GravityParams::default();
        let mut body = CelestialBody::orbiting(1, Vec2::new(25.0, 0.0), Vec2::new(1.0, 0.0), 1.0, 4, [0; 3]);
        contain(&mut body, &params);
        assert_eq!(body.position(), Vec2::new(24.0, 0.0));
        assert!((body.velocity().x - (-0.6 - 0.05)).abs() < 1e-6);
    }

    #[test]
    fn test_inward_body_is_only_clamped() {
        let params = GravityParams::default();
        let mut body = CelestialBody::orbiting(1, Vec2::new(0.0, 30.0), Vec2::new(0.0, -0.5), 1.0, 4, [0; 3]);
        contain(&mut body, &params);
        assert_eq!(body.position(), Vec2::new(0.0, 24.0));
        assert_eq!(body.velocity(), Vec2::new(0.0, -0.5));
    }

    #[test]
    fn test_trail_follows_body() {
        let mut sim = sim(3);
        for tick in 1..=200 {
            sim.step(&FrameTime::at_tick(tick));
        }
        for body in sim.orbiting() {
            assert!(body.trail.len() <= 90);
            assert!(!body.trail.is_empty());
            assert_eq!(body.trail.latest(), Some(body.position()));
        }
    }

    #[test]
    fn test_body_count_change_rebuilds() {
        let mut sim = sim(4);
        sim.params_mut().body_count = 3;
        sim.step(&FrameTime::at_tick(1));
        assert_eq!(sim.orbiting().len(), 3);
    }
}
