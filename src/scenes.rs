//! The one live visualization and scene switching

use crate::config::{Config, SceneKind};
use glam::Vec2;
use particle_renderer::{
    Canvas, FlockRenderer, GravityRenderer, NetworkRenderer, OrbitalRenderer, PairRenderer, Session,
};
use particle_simulation::{
    Bounds, FlockingSimulation, FrameClock, GravitySimulation, NetworkSimulation, OrbitalSimulation,
    PairingSimulation, Simulation,
};
use std::time::Instant;

pub enum Scene {
    Flocking(Session<FlockingSimulation, FlockRenderer>),
    Pairing(Session<PairingSimulation, PairRenderer>),
    Gravity(Session<GravitySimulation, GravityRenderer>),
    Orbital(Session<OrbitalSimulation, OrbitalRenderer>),
    Network(Session<NetworkSimulation, NetworkRenderer>),
}

/// Run `$body` with `$session` bound to whichever session is live
macro_rules! with_session {
    ($scene:expr, $session:ident => $body:expr) => {
        match $scene {
            Scene::Flocking($session) => $body,
            Scene::Pairing($session) => $body,
            Scene::Gravity($session) => $body,
            Scene::Orbital($session) => $body,
            Scene::Network($session) => $body,
        }
    };
}

impl Scene {
    pub fn new(kind: SceneKind, config: &Config, bounds: Bounds) -> Self {
        let seed = config.seed;
        match kind {
            SceneKind::Flocking => Scene::Flocking(Session::new(
                FlockingSimulation::new(config.flocking, bounds, seed),
                FlockRenderer,
            )),
            SceneKind::Pairing => Scene::Pairing(Session::new(
                PairingSimulation::new(config.pairing, bounds, seed),
                PairRenderer::new(seed),
            )),
            SceneKind::Gravity => Scene::Gravity(Session::new(
                GravitySimulation::new(config.gravity, bounds, seed),
                GravityRenderer::default(),
            )),
            SceneKind::Orbital => Scene::Orbital(Session::new(
                OrbitalSimulation::new(config.orbital, bounds, seed),
                OrbitalRenderer::new(seed),
            )),
            SceneKind::Network => Scene::Network(Session::new(
                NetworkSimulation::new(config.network, bounds, seed),
                NetworkRenderer,
            )),
        }
    }

    pub fn kind(&self) -> SceneKind {
        match self {
            Scene::Flocking(_) => SceneKind::Flocking,
            Scene::Pairing(_) => SceneKind::Pairing,
            Scene::Gravity(_) => SceneKind::Gravity,
            Scene::Orbital(_) => SceneKind::Orbital,
            Scene::Network(_) => SceneKind::Network,
        }
    }

    pub fn frame(&mut self, now: Instant, canvas: Option<&mut dyn Canvas>) -> u32 {
        with_session!(self, session => session.frame(now, canvas))
    }

    pub fn resize(&mut self, bounds: Bounds) {
        with_session!(self, session => session.resize(bounds))
    }

    pub fn reset(&mut self) {
        with_session!(self, session => session.reset())
    }

    pub fn clock(&self) -> &FrameClock {
        with_session!(self, session => session.clock())
    }

    pub fn clock_mut(&mut self) -> &mut FrameClock {
        with_session!(self, session => session.clock_mut())
    }

    pub fn entity_count(&self) -> usize {
        with_session!(self, session => session.simulation().len())
    }

    /// Pointer offset from the view center in logical units; only the orbital
    /// scene reacts to it
    pub fn set_pointer(&mut self, pointer: Option<Vec2>) {
        if let Scene::Orbital(session) = self {
            session.simulation_mut().set_pointer(pointer);
        }
    }

    /// Copy the live parameters back so they survive a scene switch
    pub fn store_params(&self, config: &mut Config) {
        match self {
            Scene::Flocking(session) => config.flocking = *session.simulation().params(),
            Scene::Pairing(session) => config.pairing = *session.simulation().params(),
            Scene::Gravity(session) => config.gravity = *session.simulation().params(),
            Scene::Orbital(session) => config.orbital = *session.simulation().params(),
            Scene::Network(session) => config.network = *session.simulation().params(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use particle_renderer::PixelCanvas;

    fn config() -> Config {
        let mut config = Config {
            seed: Some(9),
            ..Default::default()
        };
        config.orbital.sample_count = 300;
        config
    }

    #[test]
    fn test_every_scene_runs_a_frame() {
        let config = config();
        let bounds = Bounds::new(320.0, 240.0);
        let mut canvas = PixelCanvas::new(320, 240, 1.0);
        for kind in SceneKind::ALL {
            let mut scene = Scene::new(kind, &config, bounds);
            assert_eq!(scene.kind(), kind);
            assert_eq!(scene.frame(Instant::now(), Some(&mut canvas)), 1);
            assert_eq!(scene.clock().tick(), 1);
        }
    }

    #[test]
    fn test_params_survive_a_switch() {
        let mut config = config();
        let mut scene = Scene::new(SceneKind::Pairing, &config, Bounds::new(320.0, 240.0));
        if let Scene::Pairing(session) = &mut scene {
            session.simulation_mut().params_mut().temperature = 0.1;
        }
        scene.store_params(&mut config);
        assert_eq!(config.pairing.temperature, 0.1);
    }

    #[test]
    fn test_pointer_only_reaches_orbital() {
        let config = config();
        let mut scene = Scene::new(SceneKind::Orbital, &config, Bounds::new(320.0, 240.0));
        scene.set_pointer(Some(Vec2::new(5.0, 5.0)));
        match &scene {
            Scene::Orbital(session) => assert!(session.simulation().is_observed()),
            _ => unreachable!(),
        }

        let mut flock = Scene::new(SceneKind::Flocking, &config, Bounds::new(320.0, 240.0));
        flock.set_pointer(Some(Vec2::ZERO));
        assert_eq!(flock.kind(), SceneKind::Flocking);
    }
}
