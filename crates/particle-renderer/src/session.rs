//! One running visualization
//!
//! A session owns its simulation, the renderer for it and the frame clock
//! that paces both. Nothing is shared between sessions; dropping one is the
//! teardown.

use crate::{Canvas, SceneRenderer};
use particle_simulation::{Bounds, FrameClock, Simulation};
use std::time::Instant;

pub struct Session<S: Simulation, R: SceneRenderer<S>> {
    simulation: S,
    renderer: R,
    clock: FrameClock,
}

impl<S: Simulation, R: SceneRenderer<S>> Session<S, R> {
    pub fn new(simulation: S, renderer: R) -> Self {
        log::info!(
            "✓ Session started: {} ({} entities in {:.0}x{:.0})",
            simulation.name(),
            simulation.len(),
            simulation.bounds().width,
            simulation.bounds().height
        );
        Self {
            simulation,
            renderer,
            clock: FrameClock::new(),
        }
    }

    /// Advance by the wall time since the previous frame, then draw
    ///
    /// With no canvas the ticks still run and drawing is skipped. Nothing is
    /// drawn when no tick ran (paused, or a very fast display), so the canvas
    /// keeps its last image. Returns the number of ticks run.
    pub fn frame(&mut self, now: Instant, canvas: Option<&mut dyn Canvas>) -> u32 {
        let ticks = self.clock.advance(now);
        for _ in 0..ticks {
            let time = self.clock.next_tick();
            self.simulation.step(&time);
        }
        if ticks == 0 {
            return 0;
        }
        match canvas {
            Some(canvas) => self.renderer.draw(&self.simulation, canvas),
            None => log::trace!("{}: no canvas attached, skipping draw", self.simulation.name()),
        }
        ticks
    }

    /// Resize the domain; the simulation decides whether that reinitializes
    pub fn resize(&mut self, bounds: Bounds) {
        if bounds != self.simulation.bounds() {
            log::debug!(
                "{}: resize to {:.0}x{:.0}",
                self.simulation.name(),
                bounds.width,
                bounds.height
            );
            self.simulation.resize(bounds);
        }
    }

    pub fn reset(&mut self) {
        log::info!("{}: reset", self.simulation.name());
        self.simulation.reset();
    }

    pub fn simulation(&self) -> &S {
        &self.simulation
    }

    pub fn simulation_mut(&mut self) -> &mut S {
        &mut self.simulation
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn clock(&self) -> &FrameClock {
        &self.clock
    }

    pub fn clock_mut(&mut self) -> &mut FrameClock {
        &mut self.clock
    }
}

impl<S: Simulation, R: SceneRenderer<S>> Drop for Session<S, R> {
    fn drop(&mut self) {
        log::info!(
            "✓ Session ended: {} after {} ticks",
            self.simulation.name(),
            self.clock.tick()
        );
    }
}
