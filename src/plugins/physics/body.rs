//! Free-body flight integration for launched stones.
//!
//! ```text
//!   v.y -= g * dt
//!   p   += v * dt
//!   ground contact (moving down):
//!     p.y   = ground + r
//!     v.y   = -v.y * bounce        (zeroed below settle_speed)
//!     v.xz *= damping
//!     |v| < settle_speed  => v = 0, Settled
//! ```
//!
//! Settling only happens on contact: a stone thrown straight up is momentarily slow
//! at its apex but must not stop in mid-air.

use bevy::prelude::*;

use super::collidable::Collidable;

/// World ground plane height.
pub const GROUND_Y: f32 = 0.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlightParams {
    pub gravity: f32,
    pub bounce: f32,
    pub damping: f32,
    pub settle_speed: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyStep {
    Airborne,
    Bounced,
    Settled,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhysicsBody {
    pub position: Vec3,
    pub velocity: Vec3,
    pub radius: f32,
}

impl PhysicsBody {
    pub fn at_rest(position: Vec3, radius: f32) -> Self {
        Self { position, velocity: Vec3::ZERO, radius }
    }

    #[inline]
    pub fn bounds(&self) -> Collidable {
        Collidable::around(self.position, self.radius)
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.velocity.length()
    }

    pub fn step(&mut self, dt: f32, params: &FlightParams) -> BodyStep {
        self.velocity.y -= params.gravity * dt;
        self.position += self.velocity * dt;

        if !self.bounds().touches_ground(GROUND_Y) || self.velocity.y > 0.0 {
            return BodyStep::Airborne;
        }

        self.position.y = GROUND_Y + self.radius;
        self.velocity.y = -self.velocity.y * params.bounce;
        if self.velocity.y < params.settle_speed {
            self.velocity.y = 0.0;
        }
        self.velocity.x *= params.damping;
        self.velocity.z *= params.damping;

        if self.speed() < params.settle_speed {
            self.velocity = Vec3::ZERO;
            return BodyStep::Settled;
        }
        BodyStep::Bounced
    }
}
