//! Headless rendering of every scene into a `PixelCanvas`

use glam::Vec2;
use particle_physics::PairingParticle;
use particle_renderer::*;
use particle_simulation::*;

fn is_color(pixel: Rgba8, color: Color, tolerance: u8) -> bool {
    let [r, g, b, _] = color.to_rgba8();
    pixel.r.abs_diff(r) <= tolerance && pixel.g.abs_diff(g) <= tolerance && pixel.b.abs_diff(b) <= tolerance
}

#[test]
fn flock_draws_glowing_boids_and_restores_compositing() {
    let bounds = Bounds::new(200.0, 150.0);
    let params = FlockingParams {
        particle_count: 60,
        ..Default::default()
    };
    let mut session = Session::new(FlockingSimulation::new(params, bounds, Some(1)), FlockRenderer);
    let mut canvas = PixelCanvas::new(200, 150, 1.0);

    session.frame(std::time::Instant::now(), Some(&mut canvas));

    assert_eq!(canvas.composite(), CompositeMode::SourceOver);
    let bright = canvas.pixels().iter().filter(|p| p.g > 120).count();
    assert!(bright >= 60, "only {bright} bright pixels");
}

fn linked_pair(a: Vec2, b: Vec2) -> PairingSimulation {
    let params = PairingParams {
        particle_count: 2,
        temperature: 0.1,
        ..Default::default()
    };
    let mut sim = PairingSimulation::new(params, Bounds::new(600.0, 600.0), Some(2));
    sim.set_particles(vec![
        PairingParticle::new(0, a, Vec2::ZERO, 0.0),
        PairingParticle::new(1, b, Vec2::ZERO, 0.5),
    ]);
    sim.link(0, 1);
    sim
}

#[test]
fn pair_link_is_drawn_between_partners() {
    let sim = linked_pair(Vec2::new(100.0, 100.5), Vec2::new(140.0, 100.5));
    let mut canvas = PixelCanvas::new(600, 600, 1.0);
    PairRenderer::new(Some(3)).draw(&sim, &mut canvas);

    let background = palette::pairing::BACKGROUND;
    let midpoint = canvas.pixel(120, 100).unwrap();
    assert!(!is_color(midpoint, background, 0));
    assert!(is_color(canvas.pixel(120, 110).unwrap(), background, 0));
}

#[test]
fn pair_straddling_the_wrap_edge_is_not_linked() {
    let sim = linked_pair(Vec2::new(5.0, 300.5), Vec2::new(595.0, 300.5));
    let mut canvas = PixelCanvas::new(600, 600, 1.0);
    PairRenderer::new(Some(4)).draw(&sim, &mut canvas);

    let background = palette::pairing::BACKGROUND;
    assert!(is_color(canvas.pixel(300, 300).unwrap(), background, 0));
    // Both electrons are still drawn as paired
    assert!(!is_color(canvas.pixel(5, 300).unwrap(), background, 0));
    assert!(!is_color(canvas.pixel(595, 300).unwrap(), background, 0));
}

#[test]
fn link_opacity_grows_as_temperature_falls() {
    assert!((link_opacity(1.0) - 0.15).abs() < 1e-6);
    assert!((link_opacity(0.0) - 0.35).abs() < 1e-6);
}

fn is_electron_cyan(pixel: &Rgba8) -> bool {
    pixel.r < 60 && pixel.g > 100 && pixel.b > 100
}

#[test]
fn orbital_cloud_and_collapsed_electron() {
    let params = OrbitalParams {
        sample_count: 400,
        ..Default::default()
    };
    let mut sim = OrbitalSimulation::new(params, Bounds::new(800.0, 800.0), Some(5));
    let mut renderer = OrbitalRenderer::new(Some(5));
    let mut canvas = PixelCanvas::new(800, 800, 1.0);

    sim.step(&FrameTime::at_tick(1));
    renderer.draw(&sim, &mut canvas);
    // Nucleus core
    let center = canvas.pixel(400, 400).unwrap();
    assert!(center.r > 230 && center.g > 230 && center.b > 230);
    assert!(!canvas.pixels().iter().any(is_electron_cyan));

    sim.set_pointer(Some(Vec2::new(30.0, -10.0)));
    for tick in 2..=12 {
        sim.step(&FrameTime::at_tick(tick));
    }
    renderer.draw(&sim, &mut canvas);
    assert!(canvas.pixels().iter().any(is_electron_cyan));
}

#[test]
fn gravity_centers_the_dark_mass() {
    let mut sim = GravitySimulation::new(GravityParams::default(), Bounds::new(800.0, 600.0), Some(6));
    for tick in 1..=30 {
        sim.step(&FrameTime::at_tick(tick));
    }
    let mut canvas = PixelCanvas::new(800, 600, 1.0);
    GravityRenderer::default().draw(&sim, &mut canvas);

    let [r, g, b] = sim.central().color;
    assert!(is_color(canvas.pixel(400, 300).unwrap(), Color::from_rgb8(r, g, b), 0));

    let background = palette::gravity_background();
    let lit = canvas
        .pixels()
        .iter()
        .filter(|&&p| !is_color(p, background, 2))
        .count();
    assert!(lit > 100);
}

#[test]
fn network_background_is_a_diagonal_gradient() {
    let mut sim = NetworkSimulation::new(NetworkParams::default(), Bounds::new(300.0, 200.0), Some(7));
    sim.step(&FrameTime::at_tick(1));
    let mut canvas = PixelCanvas::new(300, 200, 1.0);
    NetworkRenderer.draw(&sim, &mut canvas);

    let [(_, start), _, (_, end)] = palette::network::GRADIENT;
    assert!(is_color(canvas.pixel(0, 0).unwrap(), start, 3));
    assert!(is_color(canvas.pixel(299, 199).unwrap(), end, 3));
}

#[test]
fn device_pixel_ratio_keeps_logical_layout() {
    let sim = linked_pair(Vec2::new(100.0, 100.5), Vec2::new(140.0, 100.5));
    let mut canvas = PixelCanvas::new(1200, 1200, 2.0);
    PairRenderer::new(Some(8)).draw(&sim, &mut canvas);

    let background = palette::pairing::BACKGROUND;
    assert!(!is_color(canvas.pixel(240, 201).unwrap(), background, 0));
    assert!(is_color(canvas.pixel(240, 230).unwrap(), background, 0));
}
