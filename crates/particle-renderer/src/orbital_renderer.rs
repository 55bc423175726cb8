use crate::palette::orbital::{BACKGROUND, CLOUD, CORE, ELECTRON, NUCLEUS};
use crate::{Canvas, OrbitCamera, SceneRenderer};
use glam::Vec2;
use particle_physics::ORBITAL_VIBRATION;
use particle_simulation::{make_rng, OrbitalSimulation, Simulation};
use rand::rngs::StdRng;
use rand::Rng;

/// Samples fainter than this are skipped
const MIN_OPACITY: f32 = 0.01;
const MIN_SAMPLE_RADIUS: f32 = 0.1;
const TRAIL_WIDTH: f32 = 2.0;
const TRAIL_ALPHA: f32 = 0.5;
/// Extra per-frame wobble of trail points, in logical units
const TRAIL_WOBBLE: f32 = 2.0;
const ELECTRON_GLOW: f32 = 10.0;
const ELECTRON_CORE: f32 = 3.0;
const NUCLEUS_GLOW_RADIUS: f32 = 30.0;
const NUCLEUS_RADIUS: f32 = 4.0;
const NUCLEUS_BLUR: f32 = 15.0;

/// Probability cloud, or the single observed electron, around a glowing
/// nucleus
pub struct OrbitalRenderer {
    camera: OrbitCamera,
    rng: StdRng,
    trail: Vec<Vec2>,
}

impl OrbitalRenderer {
    pub fn new(seed: Option<u64>) -> Self {
        Self {
            camera: OrbitCamera::default(),
            rng: make_rng(seed),
            trail: Vec::new(),
        }
    }

    pub fn camera(&self) -> &OrbitCamera {
        &self.camera
    }

    fn draw_cloud(&self, simulation: &OrbitalSimulation, canvas: &mut dyn Canvas) {
        let t = simulation.elapsed();
        for sample in simulation.entities() {
            let opacity = sample.opacity();
            if opacity <= MIN_OPACITY {
                continue;
            }
            let Some(projection) = self.camera.project(sample.position_at(t, ORBITAL_VIBRATION)) else {
                continue;
            };
            let radius = (sample.size * projection.scale).max(MIN_SAMPLE_RADIUS);
            canvas.fill_circle(projection.screen, radius, CLOUD.with_alpha(opacity));
        }
    }

    fn draw_electron(&mut self, simulation: &OrbitalSimulation, canvas: &mut dyn Canvas) {
        let electron = simulation.electron();

        self.trail.clear();
        for (i, &(position, jitter)) in electron.trail.iter().enumerate() {
            let Some(projection) = self.camera.project(position) else {
                continue;
            };
            let mut point = projection.screen + jitter;
            if i > 0 {
                point += Vec2::new(self.rng.random::<f32>() - 0.5, self.rng.random::<f32>() - 0.5)
                    * TRAIL_WOBBLE;
            }
            self.trail.push(point);
        }
        canvas.stroke_polyline(&self.trail, TRAIL_WIDTH, ELECTRON.with_alpha(TRAIL_ALPHA));

        let Some((position, jitter)) = electron.latest() else {
            return;
        };
        let Some(projection) = self.camera.project(position) else {
            return;
        };
        let at = projection.screen + jitter;
        canvas.radial_glow(
            at,
            ELECTRON_GLOW * projection.scale,
            ELECTRON,
            ELECTRON.with_alpha(0.0),
        );
        canvas.fill_circle(at, ELECTRON_CORE * projection.scale, CORE);
    }
}

impl SceneRenderer<OrbitalSimulation> for OrbitalRenderer {
    fn draw(&mut self, simulation: &OrbitalSimulation, canvas: &mut dyn Canvas) {
        canvas.fill(BACKGROUND);

        let center = canvas.size() * 0.5;
        self.camera.center = center;
        self.camera.set_rotation(simulation.view().rotation);

        if simulation.is_observed() {
            self.draw_electron(simulation, canvas);
        } else {
            self.draw_cloud(simulation, canvas);
        }

        canvas.radial_glow(
            center,
            NUCLEUS_GLOW_RADIUS,
            NUCLEUS.with_alpha(0.2),
            NUCLEUS.with_alpha(0.0),
        );
        canvas.radial_glow(
            center,
            NUCLEUS_RADIUS + NUCLEUS_BLUR,
            CORE.with_alpha(0.5),
            CORE.with_alpha(0.0),
        );
        canvas.fill_circle(center, NUCLEUS_RADIUS, CORE.with_alpha(0.95));
    }
}
