//! Tunable gameplay constants.

use bevy::prelude::*;

use crate::plugins::physics::FlightParams;

#[derive(Resource, Debug, Clone)]
pub struct Tunables {
    /// Collision radius of every stone (meters).
    pub stone_radius: f32,
    /// Extra half-extent added to an idle stone's pick box.
    pub pick_margin: f32,
    pub gravity: f32,
    /// Vertical restitution on ground contact, in (0, 1).
    pub bounce: f32,
    /// Horizontal velocity kept per ground contact, in (0, 1).
    pub ground_damping: f32,
    /// Below this speed a grounded stone is at rest.
    pub settle_speed: f32,
    pub launch_force: f32,
    /// Elevation of the base launch direction (radians).
    pub launch_pitch: f32,
    /// Upper bound of the random horizontal offset; capped at `MAX_LAUNCH_SPREAD`.
    pub launch_spread: f32,
    pub rearm_secs: f32,
    pub arm_swing_secs: f32,
    pub settled_linger_secs: f32,
    pub auto_load: bool,
    pub rng_seed: u64,
}

impl Tunables {
    #[inline]
    pub fn flight(&self) -> FlightParams {
        FlightParams {
            gravity: self.gravity,
            bounce: self.bounce,
            damping: self.ground_damping,
            settle_speed: self.settle_speed,
        }
    }
}

impl Default for Tunables {
    fn default() -> Self {
        Self {
            stone_radius: 0.3,
            pick_margin: 0.15,
            gravity: 9.81,
            bounce: 0.45,
            ground_damping: 0.8,
            settle_speed: 0.35,
            launch_force: 18.0,
            launch_pitch: 0.7,
            launch_spread: 0.08,
            rearm_secs: 2.0,
            arm_swing_secs: 0.35,
            settled_linger_secs: 3.0,
            auto_load: true,
            rng_seed: 0xCA7A_9017,
        }
    }
}
