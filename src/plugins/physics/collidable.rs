//! Axis-aligned collision volumes.
//!
//! Everything the core hit-tests (idle stones, the catapult frame, torches) and the
//! ground-contact check for flying stones goes through this one primitive.

use bevy::math::bounding::{Aabb3d, RayCast3d};
use bevy::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Collidable {
    pub center: Vec3,
    pub half_extents: Vec3,
}

impl Collidable {
    pub fn new(center: Vec3, half_extents: Vec3) -> Self {
        Self { center, half_extents: half_extents.abs() }
    }

    /// Box enclosing a sphere of `radius`.
    #[inline]
    pub fn around(center: Vec3, radius: f32) -> Self {
        Self::new(center, Vec3::splat(radius))
    }

    #[inline]
    pub fn inflated(self, margin: f32) -> Self {
        Self::new(self.center, self.half_extents + Vec3::splat(margin.max(0.0)))
    }

    #[inline]
    pub fn min(&self) -> Vec3 {
        self.center - self.half_extents
    }

    #[inline]
    pub fn max(&self) -> Vec3 {
        self.center + self.half_extents
    }

    #[inline]
    pub fn aabb(&self) -> Aabb3d {
        Aabb3d::new(self.center, self.half_extents)
    }

    /// Distance along `ray` to the first point inside the box, if within `max_distance`.
    /// A ray starting inside the box hits at 0.
    pub fn ray_distance(&self, ray: Ray3d, max_distance: f32) -> Option<f32> {
        RayCast3d::from_ray(ray, max_distance).aabb_intersection_at(&self.aabb())
    }

    #[inline]
    pub fn touches_ground(&self, ground_y: f32) -> bool {
        self.min().y <= ground_y
    }
}
