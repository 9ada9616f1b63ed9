//! Stones plugin: the collectible/launchable stone and its lifecycle systems.
//!
//! # Who mutates a stone?
//! Only `Stone`'s own transition methods. Systems decide *when* to call them:
//!
//! ```text
//!   Update        interaction::dispatch_clicks   Idle      → Collected
//!                 catapult::load_collected        Collected → Loaded
//!                 catapult::pin_loaded_stones     (basket position)
//!                 interaction::dispatch_clicks   Loaded    → Launched   (catapult click)
//!   FixedUpdate   integrate_flight                Launched  → Settled
//!   Update        cleanup_settled                 despawn after linger
//!   PostUpdate    sync_stone_proxies              Transform / Visibility
//! ```
//!
//! There is no "being collected" flag anywhere. A second click on the same stone
//! finds it `Collected`, gets `false`, and nothing happens.

use bevy::prelude::*;

pub mod components;
pub mod lookup;
pub mod messages;
pub mod systems;

pub use components::{Lifetime, Stone, StoneState};
pub use lookup::StoneLookup;

use crate::common::state::GameState;

pub fn plugin(app: &mut App) {
    app.add_message::<messages::StoneCollected>()
        .add_message::<messages::StoneLoaded>()
        .add_message::<messages::StoneLaunched>()
        .add_message::<messages::StoneSettled>()
        .add_systems(
            FixedUpdate,
            systems::integrate_flight.run_if(in_state(GameState::InGame)),
        )
        .add_systems(
            Update,
            systems::cleanup_settled.run_if(in_state(GameState::InGame)),
        )
        .add_systems(
            PostUpdate,
            systems::sync_stone_proxies.before(TransformSystems::Propagate),
        );
}
