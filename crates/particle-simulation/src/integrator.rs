//! Semi-implicit Euler integration and boundary handling
//!
//! Velocity is advanced from the accumulated acceleration first, then position
//! from the new velocity. The acceleration accumulator is zeroed afterwards.

use glam::Vec2;
use particle_physics::Kinematic;

/// Rectangular simulation domain `[0, width] x [0, height]`
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    pub fn center(&self) -> Vec2 {
        self.size() * 0.5
    }

    pub fn area(&self) -> f32 {
        self.width * self.height
    }

    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= 0.0 && p.x <= self.width && p.y >= 0.0 && p.y <= self.height
    }
}

/// Per-call integration options
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Step {
    /// Speed cap applied after the velocity update
    pub max_speed: Option<f32>,
    /// Fraction of velocity removed after the velocity update
    pub friction: f32,
}

/// Advance one body by one tick
pub fn integrate<K: Kinematic + ?Sized>(body: &mut K, step: Step) {
    let motion = body.motion_mut();
    motion.velocity += motion.acceleration;
    if step.friction != 0.0 {
        motion.velocity *= 1.0 - step.friction;
    }
    if let Some(max_speed) = step.max_speed {
        motion.velocity = clamp_speed(motion.velocity, max_speed);
    }
    motion.position += motion.velocity;
    motion.acceleration = Vec2::ZERO;
}

/// Scale `velocity` down to `max_speed` if it is faster
#[inline]
pub fn clamp_speed(velocity: Vec2, max_speed: f32) -> Vec2 {
    let speed_sq = velocity.length_squared();
    if speed_sq > max_speed * max_speed && speed_sq > 0.0 {
        velocity * (max_speed.max(0.0) / speed_sq.sqrt())
    } else {
        velocity
    }
}

/// Periodic boundary: a coordinate past one edge re-enters at the opposite edge
///
/// The position is snapped onto the opposite edge, so the result always lies
/// inside `bounds` regardless of how far it overshot.
pub fn wrap_toroidal(position: &mut Vec2, bounds: Bounds) {
    if position.x > bounds.width {
        position.x = 0.0;
    } else if position.x < 0.0 {
        position.x = bounds.width;
    }
    if position.y > bounds.height {
        position.y = 0.0;
    } else if position.y < 0.0 {
        position.y = bounds.height;
    }
}

/// Reflecting boundary: velocity reverses on the axis that left the domain
pub fn bounce_inside(position: &mut Vec2, velocity: &mut Vec2, bounds: Bounds) {
    if position.x < 0.0 || position.x > bounds.width {
        velocity.x = -velocity.x;
        position.x = position.x.clamp(0.0, bounds.width);
    }
    if position.y < 0.0 || position.y > bounds.height {
        velocity.y = -velocity.y;
        position.y = position.y.clamp(0.0, bounds.height);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use particle_physics::FlockingParticle;

    #[test]
    fn test_velocity_before_position() {
        let mut p = FlockingParticle::new(0, Vec2::ZERO, Vec2::new(1.0, 0.0));
        p.motion.acceleration = Vec2::new(0.5, 0.0);
        integrate(&mut p, Step::default());
        assert_eq!(p.motion.velocity, Vec2::new(1.5, 0.0));
        assert_eq!(p.motion.position, Vec2::new(1.5, 0.0));
        assert_eq!(p.motion.acceleration, Vec2::ZERO);
    }

    #[test]
    fn test_speed_cap() {
        let mut p = FlockingParticle::new(0, Vec2::ZERO, Vec2::new(3.0, 4.0));
        p.motion.acceleration = Vec2::new(3.0, 4.0);
        integrate(
            &mut p,
            Step {
                max_speed: Some(2.0),
                friction: 0.0,
            },
        );
        assert!((p.speed() - 2.0).abs() < 1e-5);
    }

    #[test]
    fn test_friction_scales_velocity() {
        let mut p = FlockingParticle::new(0, Vec2::ZERO, Vec2::new(2.0, 0.0));
        integrate(
            &mut p,
            Step {
                max_speed: None,
                friction: 0.25,
            },
        );
        assert!((p.motion.velocity.x - 1.5).abs() < 1e-6);
    }

    #[test]
    fn test_wrap_snaps_to_opposite_edge() {
        let bounds = Bounds::new(100.0, 50.0);
        let mut p = Vec2::new(130.0, -4.0);
        wrap_toroidal(&mut p, bounds);
        assert_eq!(p, Vec2::new(0.0, 50.0));
        assert!(bounds.contains(p));
    }

    #[test]
    fn test_bounce_reverses_and_clamps() {
        let bounds = Bounds::new(10.0, 10.0);
        let mut p = Vec2::new(10.5, 5.0);
        let mut v = Vec2::new(1.0, 1.0);
        bounce_inside(&mut p, &mut v, bounds);
        assert_eq!(v, Vec2::new(-1.0, 1.0));
        assert_eq!(p.x, 10.0);
    }
}
