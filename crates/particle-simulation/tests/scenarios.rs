//! End-to-end behavior of the rule models over many ticks

use glam::Vec2;
use particle_physics::{Kinematic, OrbitalType, PairingParticle};
use particle_simulation::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn run<S: Simulation>(sim: &mut S, ticks: u64, mut check: impl FnMut(&S)) {
    for tick in 1..=ticks {
        sim.step(&FrameTime::at_tick(tick));
        check(&*sim);
    }
}

#[test]
fn flocking_speed_never_exceeds_cap() {
    let params = FlockingParams {
        particle_count: 150,
        separation: 5.0,
        ..Default::default()
    };
    let mut sim = FlockingSimulation::new(params, Bounds::new(400.0, 300.0), Some(11));
    run(&mut sim, 300, |sim| {
        for p in sim.entities() {
            assert!(p.speed() <= 3.5 + 1e-4, "speed {}", p.speed());
        }
    });
}

#[test]
fn flocking_and_pairing_stay_in_domain() {
    let bounds = Bounds::new(320.0, 240.0);
    let mut flock = FlockingSimulation::new(
        FlockingParams {
            particle_count: 120,
            ..Default::default()
        },
        bounds,
        Some(12),
    );
    run(&mut flock, 400, |sim| {
        assert!(sim.entities().iter().all(|p| bounds.contains(p.position())));
    });

    let mut pairs = PairingSimulation::new(
        PairingParams {
            particle_count: 200,
            temperature: 0.2,
            ..Default::default()
        },
        bounds,
        Some(13),
    );
    run(&mut pairs, 400, |sim| {
        assert!(sim.entities().iter().all(|p| bounds.contains(p.position())));
    });
}

#[test]
fn pairing_links_stay_symmetric_across_temperatures() {
    let mut sim = PairingSimulation::new(
        PairingParams {
            particle_count: 400,
            ..Default::default()
        },
        Bounds::new(500.0, 400.0),
        Some(14),
    );
    for (phase, temperature) in [0.1, 0.45, 0.7, 0.05, 1.0, 0.25].into_iter().enumerate() {
        sim.params_mut().temperature = temperature;
        for tick in 0..60 {
            sim.step(&FrameTime::at_tick(phase as u64 * 60 + tick + 1));
            assert!(sim.partners_symmetric(), "one-sided link at T={temperature}");
        }
    }
}

#[test]
fn reinitialization_gives_independent_sets_of_same_size() {
    let bounds = Bounds::new(640.0, 480.0);
    let params = FlockingParams {
        particle_count: 250,
        ..Default::default()
    };
    let mut sim = FlockingSimulation::new(params, bounds, Some(15));
    let first: Vec<Vec2> = sim.entities().iter().map(|p| p.position()).collect();
    sim.reset();
    let second: Vec<Vec2> = sim.entities().iter().map(|p| p.position()).collect();

    assert_eq!(first.len(), 250);
    assert_eq!(second.len(), 250);
    assert_ne!(first, second);
    for p in sim.entities() {
        assert!(bounds.contains(p.position()));
        assert!(p.speed() <= params.speed + 1e-4);
    }
}

#[test]
fn rejection_sampler_terminates_with_rare_exhaustion() {
    let mut rng = StdRng::seed_from_u64(16);
    for orbital in OrbitalType::ALL {
        let mut exhausted = 0;
        for _ in 0..10_000 {
            let outcome = sample_orbital_point(orbital, 10_000, &mut rng);
            assert!(outcome.attempts <= 10_000);
            assert!(orbital.density(outcome.point) >= 0.0);
            if outcome.exhausted {
                exhausted += 1;
            }
        }
        assert!(exhausted < 100, "{orbital}: {exhausted} of 10000 draws exhausted");
    }
}

/// Circular spread of headings: 0 when aligned, 1 when uniform
fn heading_spread<Q: NeighborQuery>(sim: &FlockingSimulation<Q>) -> f32 {
    1.0 - sim.polarization()
}

#[test]
fn flocking_headings_converge_with_strong_alignment() {
    let params = FlockingParams {
        particle_count: 50,
        separation: 0.0,
        alignment: 5.0,
        cohesion: 5.0,
        ..Default::default()
    };
    let mut sim = FlockingSimulation::new(params, Bounds::new(300.0, 300.0), Some(17));
    let initial = heading_spread(&sim);

    let mut late = Vec::new();
    run(&mut sim, 500, |sim| late.push(heading_spread(sim)));
    let late_mean = late[400..].iter().sum::<f32>() / 100.0;
    let early_mean = late[..50].iter().sum::<f32>() / 50.0;

    assert!(late_mean < initial, "spread {late_mean} not below initial {initial}");
    assert!(late_mean <= early_mean + 1e-3);
}

fn two_particles(distance: f32, temperature: f32) -> PairingSimulation {
    let params = PairingParams {
        particle_count: 2,
        temperature,
        ..Default::default()
    };
    let mut sim = PairingSimulation::new(params, Bounds::new(600.0, 600.0), Some(18));
    sim.set_particles(vec![
        PairingParticle::new(0, Vec2::new(300.0, 300.0), Vec2::ZERO, 0.2),
        PairingParticle::new(1, Vec2::new(300.0 + distance, 300.0), Vec2::ZERO, 0.7),
    ]);
    sim
}

#[test]
fn cold_neighbors_pair_in_one_tick() {
    let range = PairingParams::default().coupling_range;
    let mut sim = two_particles(0.5 * range, 0.1);
    sim.step(&FrameTime::at_tick(1));
    assert_eq!(sim.entities()[0].partner, Some(1));
    assert_eq!(sim.entities()[1].partner, Some(0));
    assert_eq!(sim.stats().formed, 1);
}

#[test]
fn heating_above_critical_dissolves_pairs() {
    let range = PairingParams::default().coupling_range;
    let mut sim = two_particles(0.5 * range, 0.1);
    sim.step(&FrameTime::at_tick(1));
    assert!(sim.entities()[0].is_paired());

    sim.params_mut().temperature = 1.0;
    sim.step(&FrameTime::at_tick(2));
    assert_eq!(sim.entities()[0].partner, None);
    assert_eq!(sim.entities()[1].partner, None);
}

#[test]
fn stretched_pair_breaks_beyond_three_ranges() {
    let range = PairingParams::default().coupling_range;
    let mut sim = two_particles(3.5 * range, 0.1);
    sim.link(0, 1);
    assert!(sim.partners_symmetric());

    sim.step(&FrameTime::at_tick(1));
    assert!(!sim.entities()[0].is_paired());
    assert!(!sim.entities()[1].is_paired());
}

#[test]
fn captured_body_respawns_on_outer_orbit() {
    let params = GravityParams::default();
    let mut sim = GravitySimulation::new(params, Bounds::new(800.0, 600.0), Some(19));
    sim.place(1, Vec2::new(0.5, 0.0), Vec2::new(0.0, 0.01));
    sim.step(&FrameTime::at_tick(1));

    let body = &sim.entities()[1];
    assert!((body.radius() - params.spawn_radius).abs() < 1e-3);
    let speed = body.speed();
    assert!(
        (params.orbit_speed_min..=params.orbit_speed_max).contains(&speed),
        "respawn speed {speed}"
    );
    // Tangential
    assert!(body.position().dot(body.velocity()).abs() < 1e-3);
    assert_eq!(sim.respawns(), 1);
}

#[test]
fn plunging_body_is_caught_within_the_tick() {
    let params = GravityParams::default();
    let mut sim = GravitySimulation::new(params, Bounds::new(800.0, 600.0), Some(20));
    sim.place(1, Vec2::new(1.5, 0.0), Vec2::new(-1.2, 0.0));
    sim.step(&FrameTime::at_tick(1));
    assert!((sim.entities()[1].radius() - params.spawn_radius).abs() < 1e-3);
}

#[test]
fn frame_clock_drives_a_simulation() {
    let mut clock = FrameClock::new();
    let mut sim = NetworkSimulation::new(NetworkParams::default(), Bounds::new(900.0, 700.0), Some(21));
    let mut ticks = 0;
    for _ in 0..30 {
        for _ in 0..clock.advance_by(REFERENCE_TICK * 2) {
            let time = clock.next_tick();
            sim.step(&time);
            ticks += 1;
        }
    }
    assert_eq!(ticks, 60);
    assert_eq!(clock.tick(), 60);
}
