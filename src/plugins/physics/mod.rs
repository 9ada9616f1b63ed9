//! Physics primitives: collision volumes and the flying-stone integrator.
//!
//! One free body against one ground plane. The integrator runs in
//! `FixedUpdate`, so flight does not depend on frame rate.

use bevy::prelude::*;

pub mod body;
pub mod collidable;

pub use body::{BodyStep, FlightParams, PhysicsBody, GROUND_Y};
pub use collidable::Collidable;

pub const FIXED_HZ: f64 = 64.0;

pub fn plugin(app: &mut App) {
    app.insert_resource(Time::<Fixed>::from_hz(FIXED_HZ));
}
