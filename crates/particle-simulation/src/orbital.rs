//! Hydrogen orbital probability cloud
//!
//! Not a force model: sample positions are drawn once by rejection sampling
//! and stay fixed. Each tick only advances the twinkle phases, the view
//! rotation and, while a pointer hovers the view, the single observed
//! electron that replaces the cloud.

use crate::{make_rng, Bounds, FrameTime, OrbitalParams, Simulation};
use glam::{Vec2, Vec3};
use particle_physics::{
    OrbitalSample, OrbitalType, Trail, ELECTRON_ORBIT_RADIUS, ELECTRON_TRAIL_LENGTH,
    ELECTRON_UNCERTAINTY, ORBITAL_AUTO_ROTATE, ORBITAL_POINTER_GAIN, ORBITAL_ROTATION_DAMPING,
};
use rand::rngs::StdRng;
use rand::Rng;
use std::f32::consts::{PI, TAU};

/// Result of one rejection-sampling draw
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SampleOutcome {
    /// Accepted point in atomic units, or the last candidate when exhausted
    pub point: Vec3,
    pub attempts: u32,
    /// The attempt cap was reached without an acceptance
    pub exhausted: bool,
}

/// Draw one point from the orbital's density
///
/// Candidates are uniform in the orbital's bounding cube and accepted with
/// probability `density / peak`. After `max_attempts` rejections the last
/// candidate is returned as is.
pub fn sample_orbital_point<R: Rng + ?Sized>(
    orbital: OrbitalType,
    max_attempts: u32,
    rng: &mut R,
) -> SampleOutcome {
    let extent = orbital.extent();
    let max_attempts = max_attempts.max(1);
    let mut point = Vec3::ZERO;
    for attempt in 1..=max_attempts {
        point = Vec3::new(
            rng.random_range(-extent..extent),
            rng.random_range(-extent..extent),
            rng.random_range(-extent..extent),
        );
        if rng.random::<f32>() < orbital.acceptance(point) {
            return SampleOutcome {
                point,
                attempts: attempt,
                exhausted: false,
            };
        }
    }
    SampleOutcome {
        point,
        attempts: max_attempts,
        exhausted: true,
    }
}

/// Eased view rotation about the horizontal (x) and vertical (y) axes
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct OrbitalView {
    pub rotation: Vec2,
    pub target: Vec2,
}

impl OrbitalView {
    /// Auto-rotate, follow the pointer (offset from the view center) if any,
    /// then ease toward the target
    pub fn update(&mut self, pointer: Option<Vec2>) {
        self.target.y += ORBITAL_AUTO_ROTATE;
        if let Some(pointer) = pointer {
            self.target.x = pointer.y * ORBITAL_POINTER_GAIN;
            self.target.y += pointer.x * ORBITAL_POINTER_GAIN;
        }
        self.rotation += (self.target - self.rotation) * ORBITAL_ROTATION_DAMPING;
    }
}

/// The single electron shown while the view is observed
#[derive(Clone, Debug)]
pub struct ObservedElectron {
    pub angle: f32,
    pub phi: f32,
    /// World position and screen-space uncertainty offset, oldest first
    pub trail: Trail<(Vec3, Vec2)>,
}

impl Default for ObservedElectron {
    fn default() -> Self {
        Self {
            angle: 0.0,
            phi: 0.0,
            trail: Trail::new(ELECTRON_TRAIL_LENGTH),
        }
    }
}

impl ObservedElectron {
    pub fn position(&self) -> Vec3 {
        Vec3::new(
            self.angle.sin(),
            self.angle.cos() * self.phi.sin(),
            self.phi.cos(),
        ) * ELECTRON_ORBIT_RADIUS
    }

    fn advance<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.angle += 0.05;
        self.phi += 0.03;
        let jitter = Vec2::new(rng.random::<f32>() - 0.5, rng.random::<f32>() - 0.5)
            * ELECTRON_UNCERTAINTY;
        self.trail.push((self.position(), jitter));
    }

    /// Latest position and its uncertainty offset
    pub fn latest(&self) -> Option<(Vec3, Vec2)> {
        self.trail.latest()
    }
}

pub struct OrbitalSimulation {
    params: OrbitalParams,
    bounds: Bounds,
    /// Orbital the current samples were drawn from
    orbital: OrbitalType,
    samples: Vec<OrbitalSample>,
    view: OrbitalView,
    pointer: Option<Vec2>,
    electron: ObservedElectron,
    elapsed: f32,
    rng: StdRng,
}

impl OrbitalSimulation {
    pub fn new(params: OrbitalParams, bounds: Bounds, seed: Option<u64>) -> Self {
        Self::with_rng(params, bounds, make_rng(seed))
    }

    pub fn with_rng(params: OrbitalParams, bounds: Bounds, rng: StdRng) -> Self {
        let mut simulation = Self {
            params,
            bounds,
            orbital: params.orbital,
            samples: Vec::new(),
            view: OrbitalView::default(),
            pointer: None,
            electron: ObservedElectron::default(),
            elapsed: 0.0,
            rng,
        };
        simulation.regenerate();
        simulation
    }

    /// Replace every sample with fresh draws for the selected orbital
    fn regenerate(&mut self) {
        let OrbitalParams {
            orbital,
            sample_count,
            max_attempts,
        } = self.params;
        let scale = orbital.view_scale();
        let rng = &mut self.rng;

        let mut exhausted = 0usize;
        let mut attempts = 0u64;
        self.samples = (0..sample_count)
            .map(|_| {
                let outcome = sample_orbital_point(orbital, max_attempts, rng);
                attempts += outcome.attempts as u64;
                if outcome.exhausted {
                    exhausted += 1;
                }
                OrbitalSample {
                    base: outcome.point * scale,
                    phase: rng.random::<f32>() * PI,
                    life_speed: rng.random_range(0.01..0.03),
                    target_alpha: rng.random_range(0.1..0.5),
                    size: if rng.random::<f32>() > 0.9 { 1.4 } else { 0.8 },
                    oscillation_offset: rng.random::<f32>() * TAU,
                }
            })
            .collect();

        self.orbital = orbital;
        self.electron.trail.clear();

        log::info!("Orbital: {} samples of {}", sample_count, orbital);
        log::debug!(
            "Orbital: {} attempts, {} exhausted at cap {}",
            attempts,
            exhausted,
            max_attempts
        );
        if sample_count > 0 && exhausted * 100 > sample_count {
            log::warn!(
                "Orbital: {}/{} samples hit the attempt cap for {}",
                exhausted,
                sample_count,
                orbital
            );
        }
    }

    /// Pointer offset from the view center in logical pixels, or `None` when
    /// the pointer left the view
    pub fn set_pointer(&mut self, pointer: Option<Vec2>) {
        if self.pointer.is_some() && pointer.is_none() {
            self.electron.trail.clear();
        }
        self.pointer = pointer;
    }

    /// The cloud collapses to one electron while observed
    pub fn is_observed(&self) -> bool {
        self.pointer.is_some()
    }

    pub fn orbital(&self) -> OrbitalType {
        self.orbital
    }

    pub fn view(&self) -> &OrbitalView {
        &self.view
    }

    pub fn electron(&self) -> &ObservedElectron {
        &self.electron
    }

    /// Simulated seconds, drives the breathing motion
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }
}

impl Simulation for OrbitalSimulation {
    type Entity = OrbitalSample;
    type Params = OrbitalParams;

    fn name(&self) -> &'static str {
        "orbital"
    }

    fn step(&mut self, time: &FrameTime) {
        if self.params.orbital != self.orbital || self.params.sample_count != self.samples.len() {
            self.regenerate();
        }

        self.elapsed = time.elapsed;
        self.view.update(self.pointer);

        if self.pointer.is_some() {
            self.electron.advance(&mut self.rng);
        } else {
            for sample in &mut self.samples {
                sample.phase += sample.life_speed;
            }
        }
    }

    /// Samples live in view units around the center; nothing to rebuild
    fn resize(&mut self, bounds: Bounds) {
        self.bounds = bounds;
    }

    fn reset(&mut self) {
        self.view = OrbitalView::default();
        self.electron = ObservedElectron::default();
        self.regenerate();
    }

    fn bounds(&self) -> Bounds {
        self.bounds
    }

    fn entities(&self) -> &[OrbitalSample] {
        &self.samples
    }

    fn params(&self) -> &OrbitalParams {
        &self.params
    }

    fn params_mut(&mut self) -> &mut OrbitalParams {
        &mut self.params
    }
}
