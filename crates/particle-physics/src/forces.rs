//! Rule math for the interaction models
//!
//! Pure functions over vectors and scalars. Any normalization of a difference
//! vector goes through [`direction`], which refuses zero or non-finite lengths
//! so coincident particles contribute nothing instead of NaN.

use crate::constants::*;
use glam::Vec2;

/// Unit vector and length of `delta`, or `None` when it has no usable direction
#[inline]
pub fn direction(delta: Vec2) -> Option<(Vec2, f32)> {
    let length_sq = delta.length_squared();
    if !(length_sq > MIN_DISTANCE_SQ) || !length_sq.is_finite() {
        return None;
    }
    let length = length_sq.sqrt();
    Some((delta / length, length))
}

/// Weights and target speed for the flocking rules
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SteeringWeights {
    pub separation: f32,
    pub alignment: f32,
    pub cohesion: f32,
    pub speed: f32,
    /// Upper bound on the combined steering magnitude; non-positive disables it
    pub max_force: f32,
}

/// Running sums over one boid's neighbors
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FlockNeighborhood {
    separation: Vec2,
    velocity_sum: Vec2,
    position_sum: Vec2,
    count: u32,
}

impl FlockNeighborhood {
    /// Add one neighbor. `offset` points from the neighbor to the boid.
    ///
    /// Coincident neighbors are skipped for this tick.
    pub fn add(&mut self, offset: Vec2, neighbor_position: Vec2, neighbor_velocity: Vec2) {
        let Some((away, distance)) = direction(offset) else {
            return;
        };
        // Unit vector weighted by inverse distance
        self.separation += away / distance;
        self.velocity_sum += neighbor_velocity;
        self.position_sum += neighbor_position;
        self.count += 1;
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    /// Weighted steering acceleration, capped at `max_force`; zero without neighbors
    pub fn steering(&self, position: Vec2, velocity: Vec2, weights: &SteeringWeights) -> Vec2 {
        if self.count == 0 {
            return Vec2::ZERO;
        }
        let n = self.count as f32;

        let alignment = match direction(self.velocity_sum / n) {
            Some((heading, _)) => heading * weights.speed - velocity,
            None => Vec2::ZERO,
        };

        let cohesion = seek(self.position_sum / n - position, weights.speed, velocity);

        let steering = self.separation * weights.separation
            + alignment * weights.alignment
            + cohesion * weights.cohesion;
        if weights.max_force > 0.0 {
            steering.clamp_length_max(weights.max_force)
        } else {
            steering
        }
    }
}

/// Steering toward a target offset at the given speed
#[inline]
pub fn seek(target_offset: Vec2, speed: f32, velocity: Vec2) -> Vec2 {
    match direction(target_offset) {
        Some((toward, _)) => toward * speed - velocity,
        None => Vec2::ZERO,
    }
}

/// Hookean pull toward `rest_length` along `delta` (self to partner)
#[inline]
pub fn spring_force(delta: Vec2, rest_length: f32, strength: f32) -> Vec2 {
    match direction(delta) {
        Some((toward, distance)) => toward * (distance - rest_length) * strength,
        None => Vec2::ZERO,
    }
}

/// Collective flow below the coherence temperature
///
/// A gentle rightward drift plus a sinusoidal cross-term, scaled by
/// `(1 - temperature)`.
#[inline]
pub fn coherence_drift(position: Vec2, temperature: f32) -> Vec2 {
    let flow = Vec2::new(
        1.0,
        (position.x * COHERENCE_WAVENUMBER).sin() * COHERENCE_CROSS_AMPLITUDE,
    );
    flow * (1.0 - temperature) * COHERENCE_STRENGTH
}

/// Acceleration toward a central mass at the origin
///
/// Magnitude `gm / (d² + softening)`.
#[inline]
pub fn central_gravity(position: Vec2, gm: f32, softening: f32) -> Vec2 {
    match direction(-position) {
        Some((toward, distance)) => toward * (gm / (distance * distance + softening)),
        None => Vec2::ZERO,
    }
}

/// Reflect `velocity` off a wall with outward normal `normal`, losing energy
#[inline]
pub fn reflect(velocity: Vec2, normal: Vec2, damping: f32) -> Vec2 {
    (velocity - 2.0 * velocity.dot(normal) * normal) * damping
}

/// Tangential speed of a circular orbit at `radius`
#[inline]
pub fn circular_orbit_speed(gm: f32, radius: f32) -> f32 {
    if radius > 0.0 {
        (gm / radius).sqrt()
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WEIGHTS: SteeringWeights = SteeringWeights {
        separation: 1.0,
        alignment: 1.0,
        cohesion: 1.0,
        speed: 2.0,
        max_force: 0.0,
    };

    #[test]
    fn test_direction_rejects_zero() {
        assert!(direction(Vec2::ZERO).is_none());
        assert!(direction(Vec2::new(f32::NAN, 0.0)).is_none());
        let (unit, len) = direction(Vec2::new(3.0, 4.0)).unwrap();
        assert!((len - 5.0).abs() < 1e-6);
        assert!((unit.length() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_no_neighbors_no_steering() {
        let hood = FlockNeighborhood::default();
        let s = hood.steering(Vec2::ZERO, Vec2::X, &WEIGHTS);
        assert_eq!(s, Vec2::ZERO);
    }

    #[test]
    fn test_coincident_neighbor_skipped() {
        let mut hood = FlockNeighborhood::default();
        hood.add(Vec2::ZERO, Vec2::ONE, Vec2::X);
        assert_eq!(hood.count(), 0);
        let s = hood.steering(Vec2::ONE, Vec2::X, &WEIGHTS);
        assert!(s.is_finite());
        assert_eq!(s, Vec2::ZERO);
    }

    #[test]
    fn test_separation_weighted_by_inverse_distance() {
        let only_separation = SteeringWeights {
            separation: 1.0,
            alignment: 0.0,
            cohesion: 0.0,
            speed: 2.0,
            max_force: 0.0,
        };

        let mut near = FlockNeighborhood::default();
        near.add(Vec2::new(2.0, 0.0), Vec2::new(-2.0, 0.0), Vec2::ZERO);
        let mut far = FlockNeighborhood::default();
        far.add(Vec2::new(8.0, 0.0), Vec2::new(-8.0, 0.0), Vec2::ZERO);

        let push_near = near.steering(Vec2::ZERO, Vec2::ZERO, &only_separation);
        let push_far = far.steering(Vec2::ZERO, Vec2::ZERO, &only_separation);

        assert!((push_near.x - 0.5).abs() < 1e-6);
        assert!((push_far.x - 0.125).abs() < 1e-6);
    }

    #[test]
    fn test_alignment_is_desired_minus_current() {
        let only_alignment = SteeringWeights {
            separation: 0.0,
            alignment: 1.0,
            cohesion: 0.0,
            speed: 2.0,
            max_force: 0.0,
        };
        let mut hood = FlockNeighborhood::default();
        hood.add(Vec2::new(5.0, 0.0), Vec2::new(-5.0, 0.0), Vec2::new(0.0, 0.3));
        let s = hood.steering(Vec2::ZERO, Vec2::new(1.0, 0.0), &only_alignment);
        assert!((s - Vec2::new(-1.0, 2.0)).length() < 1e-5);
    }

    #[test]
    fn test_steering_is_capped() {
        let capped = SteeringWeights {
            max_force: 0.5,
            ..WEIGHTS
        };
        let mut hood = FlockNeighborhood::default();
        hood.add(Vec2::new(1.0, 0.0), Vec2::new(-1.0, 0.0), Vec2::new(0.0, 2.0));
        let s = hood.steering(Vec2::ZERO, Vec2::new(2.0, 0.0), &capped);
        assert!((s.length() - 0.5).abs() < 1e-5);
        assert!(hood.steering(Vec2::ZERO, Vec2::new(2.0, 0.0), &WEIGHTS).length() > 0.5);
    }

    #[test]
    fn test_spring_pulls_and_pushes() {
        let pull = spring_force(Vec2::new(10.0, 0.0), 5.0, 0.1);
        assert!((pull - Vec2::new(0.5, 0.0)).length() < 1e-6);
        let push = spring_force(Vec2::new(2.0, 0.0), 5.0, 0.1);
        assert!(push.x < 0.0);
        assert_eq!(spring_force(Vec2::ZERO, 5.0, 0.1), Vec2::ZERO);
    }

    #[test]
    fn test_gravity_points_inward() {
        let a = central_gravity(Vec2::new(10.0, 0.0), 1.0, 0.0);
        assert!(a.x < 0.0 && a.y.abs() < 1e-9);
        assert!((a.length() - 0.01).abs() < 1e-6);
        assert_eq!(central_gravity(Vec2::ZERO, 1.0, 0.1), Vec2::ZERO);
    }

    #[test]
    fn test_reflect_reverses_normal_component() {
        let v = reflect(Vec2::new(1.0, 1.0), Vec2::X, 0.5);
        assert!((v - Vec2::new(-0.5, 0.5)).length() < 1e-6);
    }

    #[test]
    fn test_drift_vanishes_at_unit_temperature() {
        assert_eq!(coherence_drift(Vec2::new(40.0, 3.0), 1.0), Vec2::ZERO);
        assert!(coherence_drift(Vec2::ZERO, 0.0).x > 0.0);
    }
}
