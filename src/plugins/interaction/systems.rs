use bevy::prelude::*;

use crate::plugins::stones::messages::{StoneCollected, StoneLaunched};
use crate::plugins::world::TorchToggled;

use super::camera::{PointerCamera, ScreenRaycaster};
use super::dispatcher::{dispatch, Interaction, InteractionOutcome};
use super::messages::InteractionEvent;
use super::registry::{LiveScene, SceneRegistry};

/// Consumer: every click message is dispatched once, in arrival order.
///
/// Each dispatch runs its state transition to completion before the next click is
/// read, so two clicks on the same stone in one frame cannot both collect it.
pub fn dispatch_clicks(
    mut clicks: MessageReader<InteractionEvent>,
    cameras: Query<&PointerCamera>,
    mut scene: LiveScene,
    mut collected: MessageWriter<StoneCollected>,
    mut launched: MessageWriter<StoneLaunched>,
    mut toggled: MessageWriter<TorchToggled>,
) {
    for click in clicks.read() {
        let camera = cameras.single().ok().map(|c| c as &dyn ScreenRaycaster);
        let outcome = match dispatch(click, camera, Some(&mut scene as &mut dyn SceneRegistry)) {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!("dropping click at {:?}: {e}", click.ndc);
                continue;
            }
        };

        match outcome {
            InteractionOutcome::Miss => trace!("click at {:?} hit nothing", click.ndc),
            InteractionOutcome::Refused { target } => debug!("click on {target:?} refused"),
            InteractionOutcome::Affected { target, interaction } => match interaction {
                Interaction::Collected => {
                    info!("stone {target:?} collected");
                    collected.write(StoneCollected { stone: target });
                }
                Interaction::Launched { stone, velocity } => {
                    info!("catapult {target:?} launched {stone:?} at {velocity:?}");
                    launched.write(StoneLaunched { stone, catapult: target, velocity });
                }
                Interaction::TorchToggled { lit } => {
                    debug!("torch {target:?} lit={lit}");
                    toggled.write(TorchToggled { torch: target, lit });
                }
            },
        }
    }
}
