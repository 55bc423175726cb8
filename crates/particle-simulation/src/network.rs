//! Drifting node network
//!
//! Sparse nodes move at constant velocity and bounce off the domain edges.
//! Every pair closer than the link distance is connected; the link list is
//! rebuilt after each move for the renderer.

use crate::{
    bounce_inside, count_changed, integrate, make_rng, Bounds, FrameTime, NaiveScan, NeighborQuery,
    NetworkParams, Simulation, Step,
};
use glam::Vec2;
use particle_physics::{Motion, NetworkNode};
use rand::rngs::StdRng;
use rand::Rng;
use std::ops::ControlFlow;

/// Connection between two nodes, `a < b`
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NetworkLink {
    pub a: usize,
    pub b: usize,
    /// 1 at zero distance, falling to 0 at the link distance
    pub strength: f32,
}

pub struct NetworkSimulation {
    params: NetworkParams,
    bounds: Bounds,
    nodes: Vec<NetworkNode>,
    links: Vec<NetworkLink>,
    query: NaiveScan,
    positions: Vec<Vec2>,
    rng: StdRng,
}

impl NetworkSimulation {
    pub fn new(params: NetworkParams, bounds: Bounds, seed: Option<u64>) -> Self {
        let mut simulation = Self {
            params,
            bounds,
            nodes: Vec::new(),
            links: Vec::new(),
            query: NaiveScan::default(),
            positions: Vec::new(),
            rng: make_rng(seed),
        };
        simulation.initialize();
        simulation
    }

    fn requested_count(&self) -> usize {
        self.params.node_count(self.bounds.width, self.bounds.height)
    }

    fn initialize(&mut self) {
        let count = self.requested_count();
        let size = self.bounds.size();
        let drift = self.params.drift_speed;
        let rng = &mut self.rng;
        self.nodes = (0..count)
            .map(|i| NetworkNode {
                id: i as u32,
                motion: Motion::new(
                    Vec2::new(rng.random::<f32>(), rng.random::<f32>()) * size,
                    Vec2::new(rng.random::<f32>() - 0.5, rng.random::<f32>() - 0.5) * drift,
                ),
                size: rng.random_range(0.3..1.5),
                opacity: rng.random_range(0.1..0.6),
            })
            .collect();
        self.links.clear();
        log::info!(
            "Network: {} nodes in {:.0}x{:.0}",
            count,
            self.bounds.width,
            self.bounds.height
        );
    }

    pub fn links(&self) -> &[NetworkLink] {
        &self.links
    }

    fn rebuild_links(&mut self) {
        let distance = self.params.link_distance;
        let distance_sq = distance * distance;

        self.positions.clear();
        self.positions
            .extend(self.nodes.iter().map(|n| n.motion.position));
        self.query.rebuild(&self.positions, distance);

        self.links.clear();
        for a in 0..self.nodes.len() {
            let links = &mut self.links;
            let _ = self
                .query
                .for_each_within(&self.positions, a, distance, &mut |neighbor| {
                    if neighbor.index > a {
                        links.push(NetworkLink {
                            a,
                            b: neighbor.index,
                            strength: 1.0 - neighbor.distance_sq / distance_sq,
                        });
                    }
                    ControlFlow::Continue(())
                });
        }
    }
}

impl Simulation for NetworkSimulation {
    type Entity = NetworkNode;
    type Params = NetworkParams;

    fn name(&self) -> &'static str {
        "network"
    }

    fn step(&mut self, _time: &FrameTime) {
        if count_changed(self.nodes.len(), self.requested_count()) {
            self.initialize();
        }

        for node in &mut self.nodes {
            integrate(node, Step::default());
            let motion = &mut node.motion;
            bounce_inside(&mut motion.position, &mut motion.velocity, self.bounds);
        }
        self.rebuild_links();
    }

    /// Nodes are kept unless the size change moves the node count past the hysteresis
    fn resize(&mut self, bounds: Bounds) {
        self.bounds = bounds;
        if count_changed(self.nodes.len(), self.requested_count()) {
            self.initialize();
        }
    }

    fn reset(&mut self) {
        self.initialize();
    }

    fn bounds(&self) -> Bounds {
        self.bounds
    }

    fn entities(&self) -> &[NetworkNode] {
        &self.nodes
    }

    fn params(&self) -> &NetworkParams {
        &self.params
    }

    fn params_mut(&mut self) -> &mut NetworkParams {
        &mut self.params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_follows_area() {
        let sim = NetworkSimulation::new(NetworkParams::default(), Bounds::new(600.0, 500.0), Some(1));
        assert_eq!(sim.len(), 20);
        let big = NetworkSimulation::new(NetworkParams::default(), Bounds::new(1920.0, 1080.0), Some(1));
        assert_eq!(big.len(), 80);
    }

    #[test]
    fn test_links_are_short_and_ordered() {
        let mut sim = NetworkSimulation::new(NetworkParams::default(), Bounds::new(1200.0, 1000.0), Some(2));
        sim.step(&FrameTime::at_tick(1));
        assert!(!sim.links().is_empty());
        for link in sim.links() {
            assert!(link.a < link.b);
            assert!(link.strength > 0.0 && link.strength <= 1.0);
            let d = sim.entities()[link.a].motion.position - sim.entities()[link.b].motion.position;
            assert!(d.length() < 180.0);
        }
    }

    #[test]
    fn test_nodes_stay_inside() {
        let bounds = Bounds::new(200.0, 150.0);
        let params = NetworkParams {
            area_per_node: 1000.0,
            drift_speed: 20.0,
            ..Default::default()
        };
        let mut sim = NetworkSimulation::new(params, bounds, Some(3));
        for tick in 1..=200 {
            sim.step(&FrameTime::at_tick(tick));
            assert!(sim.entities().iter().all(|n| bounds.contains(n.motion.position)));
        }
    }
}
