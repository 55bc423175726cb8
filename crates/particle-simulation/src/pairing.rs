//! Pairwise coupling ("Cooper pairs")
//!
//! Particles are updated in index order and in place, so a particle sees the
//! already-moved state of lower indices, as in a Gauss-Seidel sweep. The
//! neighbor index is built once per tick from the start-of-tick positions.
//!
//! Pairing is first-match: an unpaired particle bonds with the first unpaired
//! candidate in range in the query's visiting order, not the nearest one.

use crate::{
    count_changed, integrate, make_rng, wrap_toroidal, Bounds, FrameTime, NeighborQuery,
    PairingParams, Simulation, SpatialGrid, Step,
};
use glam::Vec2;
use particle_physics::{
    coherence_drift, spring_force, PairingParticle, COHERENCE_TEMPERATURE,
    CONDENSED_FRICTION_FACTOR, CRITICAL_TEMPERATURE, PAIR_BREAK_FACTOR, PAIR_INITIAL_SPEED,
    PAIR_REST_FRACTION, PAIR_VELOCITY_BLEND, THERMAL_NOISE_SCALE,
};
use rand::rngs::StdRng;
use rand::Rng;
use std::ops::ControlFlow;

/// Ticks between pair-count log lines
const STATS_LOG_INTERVAL: u64 = 300;

/// Bond activity during the last tick
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PairStats {
    pub formed: usize,
    pub broken: usize,
    /// Number of particles with a partner after the tick
    pub paired: usize,
}

pub struct PairingSimulation<Q: NeighborQuery = SpatialGrid> {
    params: PairingParams,
    bounds: Bounds,
    particles: Vec<PairingParticle>,
    query: Q,
    positions: Vec<Vec2>,
    rng: StdRng,
    stats: PairStats,
}

impl PairingSimulation<SpatialGrid> {
    pub fn new(params: PairingParams, bounds: Bounds, seed: Option<u64>) -> Self {
        Self::with_query(params, bounds, SpatialGrid::default(), make_rng(seed))
    }
}

impl<Q: NeighborQuery> PairingSimulation<Q> {
    pub fn with_query(params: PairingParams, bounds: Bounds, query: Q, rng: StdRng) -> Self {
        let mut simulation = Self {
            params,
            bounds,
            particles: Vec::new(),
            query,
            positions: Vec::new(),
            rng,
            stats: PairStats::default(),
        };
        simulation.initialize();
        simulation
    }

    fn initialize(&mut self) {
        let count = self.params.particle_count;
        let size = self.bounds.size();
        let rng = &mut self.rng;
        self.particles = (0..count)
            .map(|i| {
                let position = Vec2::new(rng.random::<f32>(), rng.random::<f32>()) * size;
                let velocity = Vec2::new(
                    rng.random::<f32>() - 0.5,
                    rng.random::<f32>() - 0.5,
                ) * 2.0
                    * PAIR_INITIAL_SPEED;
                PairingParticle::new(i as u32, position, velocity, rng.random())
            })
            .collect();
        self.stats = PairStats::default();
        log::info!(
            "Pairing: {} electrons in {:.0}x{:.0}",
            count,
            self.bounds.width,
            self.bounds.height
        );
    }

    /// Replace the store with the given particles. Partner links are cleared.
    pub fn set_particles(&mut self, mut particles: Vec<PairingParticle>) {
        for particle in &mut particles {
            particle.partner = None;
        }
        self.params.particle_count = particles.len();
        self.particles = particles;
        self.stats = PairStats::default();
    }

    pub fn stats(&self) -> PairStats {
        self.stats
    }

    /// Whether every partner link is mirrored by its partner
    pub fn partners_symmetric(&self) -> bool {
        self.particles.iter().enumerate().all(|(i, p)| match p.partner {
            Some(j) => j != i && self.particles.get(j).and_then(|q| q.partner) == Some(i),
            None => true,
        })
    }

    /// Bond `a` and `b` on both sides
    pub fn link(&mut self, a: usize, b: usize) {
        if a == b || a >= self.particles.len() || b >= self.particles.len() {
            return;
        }
        self.unlink(a);
        self.unlink(b);
        self.particles[a].partner = Some(b);
        self.particles[b].partner = Some(a);
    }

    /// Clear the bond of `index` on both sides
    pub fn unlink(&mut self, index: usize) {
        let Some(partner) = self.particles.get_mut(index).and_then(|p| p.partner.take()) else {
            return;
        };
        if let Some(other) = self.particles.get_mut(partner) {
            if other.partner == Some(index) {
                other.partner = None;
            }
        }
    }

    fn thermal_noise(&mut self, temperature: f32) -> Vec2 {
        let amplitude = temperature * THERMAL_NOISE_SCALE;
        Vec2::new(
            self.rng.random::<f32>() - 0.5,
            self.rng.random::<f32>() - 0.5,
        ) * amplitude
    }

    /// First unpaired particle within range of `index`, from the tick's index
    fn find_partner(&self, index: usize, range: f32) -> Option<usize> {
        let mut found = None;
        let particles = &self.particles;
        let _ = self
            .query
            .for_each_within(&self.positions, index, range, &mut |neighbor| {
                if particles[neighbor.index].is_paired() {
                    ControlFlow::Continue(())
                } else {
                    found = Some(neighbor.index);
                    ControlFlow::Break(())
                }
            });
        found
    }

    /// Spring toward the partner, or break the bond
    fn bond_force(&mut self, index: usize, partner: usize, temperature: f32) -> Vec2 {
        let range = self.params.coupling_range;
        let delta = self.particles[partner].motion.position - self.particles[index].motion.position;
        let break_distance = range * PAIR_BREAK_FACTOR;

        if temperature > CRITICAL_TEMPERATURE || delta.length_squared() > break_distance * break_distance {
            self.unlink(index);
            self.stats.broken += 1;
            return Vec2::ZERO;
        }

        let partner_velocity = self.particles[partner].motion.velocity;
        let motion = &mut self.particles[index].motion;
        motion.velocity =
            motion.velocity * (1.0 - PAIR_VELOCITY_BLEND) + partner_velocity * PAIR_VELOCITY_BLEND;

        spring_force(
            delta,
            range * PAIR_REST_FRACTION,
            self.params.coupling_strength,
        )
    }
}

impl<Q: NeighborQuery> Simulation for PairingSimulation<Q> {
    type Entity = PairingParticle;
    type Params = PairingParams;

    fn name(&self) -> &'static str {
        "pairing"
    }

    fn step(&mut self, time: &FrameTime) {
        if count_changed(self.particles.len(), self.params.particle_count) {
            log::debug!(
                "Pairing: count {} -> {}, reinitializing",
                self.particles.len(),
                self.params.particle_count
            );
            self.initialize();
        }

        let PairingParams {
            temperature,
            coupling_range,
            friction,
            ..
        } = self.params;

        self.positions.clear();
        self.positions
            .extend(self.particles.iter().map(|p| p.motion.position));
        self.query.rebuild(&self.positions, coupling_range);

        self.stats.formed = 0;
        self.stats.broken = 0;

        let friction = if temperature < CRITICAL_TEMPERATURE {
            friction * CONDENSED_FRICTION_FACTOR
        } else {
            friction
        };
        let step = Step {
            max_speed: None,
            friction,
        };

        for i in 0..self.particles.len() {
            let mut acceleration = self.thermal_noise(temperature);
            if temperature < COHERENCE_TEMPERATURE {
                acceleration += coherence_drift(self.particles[i].motion.position, temperature);
            }

            let partner = self.particles[i].partner;
            match partner {
                Some(partner) => acceleration += self.bond_force(i, partner, temperature),
                None if temperature < CRITICAL_TEMPERATURE => {
                    if let Some(partner) = self.find_partner(i, coupling_range) {
                        self.link(i, partner);
                        self.stats.formed += 1;
                    }
                }
                None => {}
            }

            let particle = &mut self.particles[i];
            particle.motion.acceleration += acceleration;
            integrate(particle, step);
            wrap_toroidal(&mut particle.motion.position, self.bounds);
        }

        self.stats.paired = self.particles.iter().filter(|p| p.is_paired()).count();
        if time.tick % STATS_LOG_INTERVAL == 0 {
            log::debug!(
                "Pairing: T={:.2} ({:?}), {} paired, +{} -{} this tick",
                temperature,
                self.params.regime(),
                self.stats.paired,
                self.stats.formed,
                self.stats.broken
            );
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

    fn entities(&self) -> &[PairingParticle] {
        &self.particles
    }

    fn params(&self) -> &PairingParams {
        &self.params
    }

    fn params_mut(&mut self) -> &mut PairingParams {
        &mut self.params
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::NaiveScan;
    use rand::SeedableRng;

    fn cold(count: usize) -> PairingParams {
        PairingParams {
            particle_count: count,
            temperature: 0.1,
            ..Default::default()
        }
    }

    #[test]
    fn test_link_and_unlink_are_symmetric() {
        let mut sim = PairingSimulation::new(cold(4), Bounds::new(100.0, 100.0), Some(1));
        sim.link(0, 1);
        assert_eq!(sim.entities()[0].partner, Some(1));
        assert_eq!(sim.entities()[1].partner, Some(0));

        sim.link(1, 2);
        assert_eq!(sim.entities()[0].partner, None);
        assert!(sim.partners_symmetric());

        sim.unlink(2);
        assert!(sim.entities().iter().all(|p| p.partner.is_none()));
    }

    #[test]
    fn test_self_link_is_rejected() {
        let mut sim = PairingSimulation::new(cold(2), Bounds::new(100.0, 100.0), Some(1));
        sim.link(1, 1);
        assert_eq!(sim.entities()[1].partner, None);
    }

    #[test]
    fn test_no_bonds_above_critical_temperature() {
        let params = PairingParams {
            particle_count: 300,
            temperature: 0.9,
            ..Default::default()
        };
        let mut sim = PairingSimulation::new(params, Bounds::new(300.0, 300.0), Some(5));
        for tick in 1..=20 {
            sim.step(&FrameTime::at_tick(tick));
        }
        assert_eq!(sim.stats().paired, 0);
    }

    #[test]
    fn test_cold_gas_pairs_up_with_either_query() {
        let bounds = Bounds::new(300.0, 300.0);
        let mut grid = PairingSimulation::new(cold(200), bounds, Some(6));
        let mut naive =
            PairingSimulation::with_query(cold(200), bounds, NaiveScan::default(), StdRng::seed_from_u64(6));
        for tick in 1..=10 {
            grid.step(&FrameTime::at_tick(tick));
            naive.step(&FrameTime::at_tick(tick));
            assert!(grid.partners_symmetric());
            assert!(naive.partners_symmetric());
        }
        // Dense enough that almost everyone finds a partner
        assert!(grid.stats().paired > 150);
        assert!(naive.stats().paired > 150);
    }
}
