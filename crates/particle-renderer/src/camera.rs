//! Perspective camera for the orbital cloud

use glam::{Vec2, Vec3};
use particle_physics::{ORBITAL_CAMERA_DISTANCE, ORBITAL_FOCAL_LENGTH, ORBITAL_NEAR_CLIP};

/// A projected point in logical canvas units
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projection {
    pub screen: Vec2,
    /// Size multiplier at this depth
    pub scale: f32,
    pub depth: f32,
}

/// Fixed camera looking down -z at the origin, with the scene rotated in
/// front of it
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrbitCamera {
    pub distance: f32,
    pub focal_length: f32,
    pub near_clip: f32,
    /// Screen position of the origin
    pub center: Vec2,
    sin_cos_x: (f32, f32),
    sin_cos_y: (f32, f32),
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self {
            distance: ORBITAL_CAMERA_DISTANCE,
            focal_length: ORBITAL_FOCAL_LENGTH,
            near_clip: ORBITAL_NEAR_CLIP,
            center: Vec2::ZERO,
            sin_cos_x: (0.0, 1.0),
            sin_cos_y: (0.0, 1.0),
        }
    }
}

impl OrbitCamera {
    pub fn new(center: Vec2) -> Self {
        Self {
            center,
            ..Default::default()
        }
    }

    /// Scene rotation for this frame: `rotation.y` about the vertical axis
    /// first, then `rotation.x` about the horizontal one
    pub fn set_rotation(&mut self, rotation: Vec2) {
        self.sin_cos_x = rotation.x.sin_cos();
        self.sin_cos_y = rotation.y.sin_cos();
    }

    pub fn rotate(&self, p: Vec3) -> Vec3 {
        let (sin_y, cos_y) = self.sin_cos_y;
        let (sin_x, cos_x) = self.sin_cos_x;
        let x1 = p.x * cos_y - p.z * sin_y;
        let z1 = p.z * cos_y + p.x * sin_y;
        let y1 = p.y * cos_x - z1 * sin_x;
        let z2 = z1 * cos_x + p.y * sin_x;
        Vec3::new(x1, y1, z2)
    }

    /// `None` when the point is behind the near clip
    pub fn project(&self, p: Vec3) -> Option<Projection> {
        let rotated = self.rotate(p);
        let depth = self.distance + rotated.z;
        if depth < self.near_clip {
            return None;
        }
        let scale = self.focal_length / depth;
        Some(Projection {
            screen: self.center + Vec2::new(rotated.x, rotated.y) * scale,
            scale,
            depth,
        })
    }
}
