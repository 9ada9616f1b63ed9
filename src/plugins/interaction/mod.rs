//! Interaction plugin: pointer clicks → world ray → one entity transition.
//!
//! ```text
//!   Update (InGame)
//!   ┌──────────────────────────────────────────────────────────────────┐
//!   │ camera::capture_clicks (render shell)                            │
//!   │   writes InteractionEvent { ndc, timestamp }                     │
//!   │                                                                  │
//!   │ systems::dispatch_clicks                                         │
//!   │   reads: InteractionEvent, PointerCamera                         │
//!   │   LiveScene::list_interactables  (fresh, ordered by SpawnOrder)  │
//!   │   nearest hit → LiveScene::interact(target)   exactly once       │
//!   │   writes: StoneCollected / StoneLaunched / TorchToggled          │
//!   └──────────────────────────────────────────────────────────────────┘
//! ```

use bevy::prelude::*;

pub mod camera;
pub mod dispatcher;
pub mod messages;
pub mod registry;
pub mod systems;

pub use camera::{PointerCamera, ScreenRaycaster};
pub use dispatcher::{dispatch, Candidate, Interactable, Interaction, InteractionOutcome, TargetKind};
pub use messages::InteractionEvent;
pub use registry::{LiveScene, SceneRegistry, SpawnOrder, SpawnSequence};

use crate::common::state::GameState;

pub fn plugin(app: &mut App) {
    app.init_resource::<SpawnSequence>()
        .add_message::<InteractionEvent>()
        .add_systems(
            Update,
            systems::dispatch_clicks.run_if(in_state(GameState::InGame)),
        );
}

#[cfg(test)]
mod tests;
