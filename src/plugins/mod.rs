//! Feature plugins.

use bevy::prelude::*;

pub mod catapult;
pub mod core;
pub mod interaction;
pub mod physics;
pub mod stones;
pub mod world;

// Render-only
pub mod camera;
pub mod lighting;
pub mod proxies;

/// Register gameplay plugins that work in headless tests.
///
/// Order matters: `core` inserts `Tunables`, which later plugins read at build time.
pub fn register_gameplay(app: &mut App) {
    core::plugin(app);
    physics::plugin(app);
    interaction::plugin(app);
    stones::plugin(app);
    catapult::plugin(app);
    world::plugin(app);
}

/// Register render-only plugins (requires DefaultPlugins / render infra).
pub fn register_render(app: &mut App) {
    lighting::plugin(app);
    camera::plugin(app);
    proxies::plugin(app);
}
