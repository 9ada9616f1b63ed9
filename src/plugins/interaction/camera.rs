//! Screen point → world ray.
//!
//! The core never talks to the render camera. The render shell keeps a
//! `PointerCamera` in sync with the real one; headless tests place their own.

use bevy::prelude::*;

pub trait ScreenRaycaster {
    /// Ray through a point given in normalized device coordinates.
    fn ray_through(&self, ndc: Vec2) -> Option<Ray3d>;
}

/// Pinhole model of a perspective camera looking down its local -Z.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct PointerCamera {
    pub position: Vec3,
    pub rotation: Quat,
    /// Vertical field of view (radians).
    pub fov_y: f32,
    pub aspect: f32,
}

impl PointerCamera {
    pub const DEFAULT_FOV_Y: f32 = std::f32::consts::FRAC_PI_4;

    pub fn looking_at(eye: Vec3, target: Vec3, fov_y: f32, aspect: f32) -> Self {
        let rotation = Transform::from_translation(eye).looking_at(target, Vec3::Y).rotation;
        Self { position: eye, rotation, fov_y, aspect }
    }

    pub fn sync_from(&mut self, transform: &Transform, fov_y: f32, aspect: f32) {
        self.position = transform.translation;
        self.rotation = transform.rotation;
        self.fov_y = fov_y;
        self.aspect = aspect;
    }
}

impl Default for PointerCamera {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            fov_y: Self::DEFAULT_FOV_Y,
            aspect: 16.0 / 9.0,
        }
    }
}

impl ScreenRaycaster for PointerCamera {
    fn ray_through(&self, ndc: Vec2) -> Option<Ray3d> {
        if !ndc.is_finite() {
            return None;
        }
        let half_height = (self.fov_y * 0.5).tan();
        let local = Vec3::new(ndc.x * half_height * self.aspect, ndc.y * half_height, -1.0);
        let direction = Dir3::new(self.rotation * local).ok()?;
        Some(Ray3d { origin: self.position, direction })
    }
}
