//! Catapult plugin: load → launch → scheduled re-arm, plus the arm swing.
//!
//! ```text
//!   ready, empty ──load_stone──► loaded (ready = false)
//!        ▲                           │ launch (click)
//!        │                           v
//!        └──── rearm Timer ◄──── empty, not ready
//! ```
//!
//! The launch itself is synchronous: the stone has its velocity before the click
//! handler returns. `ArmSwing` runs alongside as a separate, removable task.

use bevy::prelude::*;

pub mod components;
pub mod systems;

pub use components::{ArmSwing, Catapult, LaunchRng, MAX_LAUNCH_SPREAD};

use crate::common::state::GameState;
use crate::common::tunables::Tunables;
use crate::plugins::interaction::systems::dispatch_clicks;

pub fn plugin(app: &mut App) {
    let seed = app.world().resource::<Tunables>().rng_seed;
    app.insert_resource(LaunchRng::seeded(seed))
        .add_systems(
            Update,
            systems::tick_rearm
                .before(dispatch_clicks)
                .run_if(in_state(GameState::InGame)),
        )
        .add_systems(
            Update,
            (systems::load_collected_stones, systems::pin_loaded_stones)
                .chain()
                .after(dispatch_clicks)
                .run_if(in_state(GameState::InGame)),
        )
        .add_systems(
            Update,
            (systems::start_arm_swing, systems::animate_arm)
                .chain()
                .after(dispatch_clicks)
                .run_if(in_state(GameState::InGame)),
        );
}
