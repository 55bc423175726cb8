//! Flocking (boids)
//!
//! Every boid steers from the state of its neighbors at the start of the tick;
//! all accelerations are computed before any boid moves. Positions wrap
//! toroidally so the flock has no walls.

use crate::{
    count_changed, integrate, make_rng, wrap_toroidal, Bounds, FlockingParams, FrameTime, NaiveScan,
    NeighborQuery, Simulation, Step,
};
use glam::Vec2;
use particle_physics::{FlockNeighborhood, FlockingParticle};
use rand::rngs::StdRng;
use rand::Rng;
use std::f32::consts::TAU;
use std::ops::ControlFlow;

pub struct FlockingSimulation<Q: NeighborQuery = NaiveScan> {
    params: FlockingParams,
    bounds: Bounds,
    particles: Vec<FlockingParticle>,
    query: Q,
    positions: Vec<Vec2>,
    rng: StdRng,
}

impl FlockingSimulation<NaiveScan> {
    pub fn new(params: FlockingParams, bounds: Bounds, seed: Option<u64>) -> Self {
        Self::with_query(params, bounds, NaiveScan::default(), make_rng(seed))
    }
}

impl<Q: NeighborQuery> FlockingSimulation<Q> {
    pub fn with_query(params: FlockingParams, bounds: Bounds, query: Q, rng: StdRng) -> Self {
        let mut simulation = Self {
            params,
            bounds,
            particles: Vec::new(),
            query,
            positions: Vec::new(),
            rng,
        };
        simulation.initialize();
        simulation
    }

    /// Replace the whole store: uniform positions, random headings at the target speed
    fn initialize(&mut self) {
        let count = self.params.particle_count;
        let speed = self.params.speed;
        let size = self.bounds.size();
        let rng = &mut self.rng;
        self.particles = (0..count)
            .map(|i| {
                let position = Vec2::new(rng.random::<f32>(), rng.random::<f32>()) * size;
                let angle = rng.random::<f32>() * TAU;
                FlockingParticle::new(i as u32, position, Vec2::from_angle(angle) * speed)
            })
            .collect();
        log::info!(
            "Flocking: {} boids in {:.0}x{:.0}",
            count,
            self.bounds.width,
            self.bounds.height
        );
    }

    /// Mean unit heading length: 0 for random headings, 1 for a fully aligned flock
    pub fn polarization(&self) -> f32 {
        if self.particles.is_empty() {
            return 0.0;
        }
        let sum: Vec2 = self.particles.iter().map(FlockingParticle::heading).sum();
        sum.length() / self.particles.len() as f32
    }

    fn accumulate_steering(&mut self) {
        let weights = self.params.weights();
        let radius = self.params.perception_radius;

        self.positions.clear();
        self.positions
            .extend(self.particles.iter().map(|p| p.motion.position));
        self.query.rebuild(&self.positions, radius);

        for i in 0..self.particles.len() {
            let mut hood = FlockNeighborhood::default();
            let particles = &self.particles;
            let _ = self
                .query
                .for_each_within(&self.positions, i, radius, &mut |neighbor| {
                    let other = &particles[neighbor.index].motion;
                    hood.add(-neighbor.delta, other.position, other.velocity);
                    ControlFlow::Continue(())
                });

            let motion = &mut self.particles[i].motion;
            motion.acceleration = hood.steering(motion.position, motion.velocity, &weights);
        }
    }
}

impl<Q: NeighborQuery> Simulation for FlockingSimulation<Q> {
    type Entity = FlockingParticle;
    type Params = FlockingParams;

    fn name(&self) -> &'static str {
        "flocking"
    }

    fn step(&mut self, _time: &FrameTime) {
        if count_changed(self.particles.len(), self.params.particle_count) {
            log::debug!(
                "Flocking: count {} -> {}, reinitializing",
                self.particles.len(),
                self.params.particle_count
            );
            self.initialize();
        }

        self.accumulate_steering();

        let step = Step {
            max_speed: Some(self.params.speed),
            friction: 0.0,
        };
        for particle in &mut self.particles {
            integrate(particle, step);
            wrap_toroidal(&mut particle.motion.position, self.bounds);
        }
    }

    fn resize(&mut self, bounds: Bounds) {
        if bounds != self.bounds {
            self.bounds = bounds;
            self.initialize();
        }
    }

    fn reset(&mut self) {
        self.initialize();
    }

    fn bounds(&self) -> Bounds {
        self.bounds
    }

    fn entities(&self) -> &[FlockingParticle] {
        &self.particles
    }

    fn params(&self) -> &FlockingParams {
        &self.params
    }

    fn params_mut(&mut self) -> &mut FlockingParams {
        &mut self.params
    }
}
