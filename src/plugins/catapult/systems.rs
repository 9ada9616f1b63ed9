use bevy::prelude::*;

use crate::common::tunables::Tunables;
use crate::plugins::interaction::SpawnOrder;
use crate::plugins::stones::messages::{StoneLaunched, StoneLoaded};
use crate::plugins::stones::{Stone, StoneState};

use super::components::{ArmSwing, Catapult, ARM_REST};

/// Scheduled re-arm: counts down on the catapult itself, no blocking.
///
/// Runs before `dispatch_clicks`, so a timer started by this frame's launch is
/// first ticked next frame.
pub fn tick_rearm(time: Res<Time>, mut q: Query<(Entity, &mut Catapult)>) {
    for (e, mut catapult) in &mut q {
        if catapult.rearm_pending() && catapult.tick_rearm(time.delta()) {
            debug!("catapult {e:?} ready");
        }
    }
}

/// The catapult picks up the earliest-spawned collected stone whenever it is
/// ready and empty.
pub fn load_collected_stones(
    tunables: Res<Tunables>,
    mut q_catapult: Query<(Entity, &mut Catapult)>,
    mut q_stones: Query<(Entity, &mut Stone, Option<&SpawnOrder>)>,
    mut loaded: MessageWriter<StoneLoaded>,
) {
    if !tunables.auto_load {
        return;
    }
    let Ok((catapult_e, mut catapult)) = q_catapult.single_mut() else {
        return;
    };
    if !catapult.ready() || catapult.loaded_stone().is_some() {
        return;
    }

    let next = q_stones
        .iter()
        .filter(|(_, stone, _)| stone.state() == StoneState::Collected)
        .min_by_key(|(_, _, order)| order.copied().unwrap_or(SpawnOrder(u64::MAX)))
        .map(|(e, _, _)| e);
    let Some(stone_e) = next else {
        return;
    };
    let Ok((_, mut stone, _)) = q_stones.get_mut(stone_e) else {
        return;
    };

    if stone.load_into(stone_e, &mut catapult) {
        info!("catapult {catapult_e:?} loaded {stone_e:?}");
        loaded.write(StoneLoaded { stone: stone_e, catapult: catapult_e });
    }
}

/// Loaded stones ride along on the basket until launch.
pub fn pin_loaded_stones(q_catapult: Query<&Catapult>, mut q_stones: Query<&mut Stone>) {
    for catapult in &q_catapult {
        let Some(loaded) = catapult.loaded_stone() else {
            continue;
        };
        let Ok(mut stone) = q_stones.get_mut(loaded) else {
            continue;
        };
        let basket = catapult.basket_position();
        if stone.position() != basket {
            stone.pin_to(basket);
        }
    }
}

pub fn start_arm_swing(
    mut commands: Commands,
    tunables: Res<Tunables>,
    mut launched: MessageReader<StoneLaunched>,
) {
    for ev in launched.read() {
        commands
            .entity(ev.catapult)
            .insert(ArmSwing::from_tunables(&tunables));
    }
}

pub fn animate_arm(
    mut commands: Commands,
    time: Res<Time>,
    mut q: Query<(Entity, &mut Catapult, &mut ArmSwing)>,
) {
    for (e, mut catapult, mut swing) in &mut q {
        swing.tick(time.delta());
        if swing.is_finished() {
            catapult.set_arm_angle(ARM_REST);
            commands.entity(e).remove::<ArmSwing>();
        } else {
            catapult.set_arm_angle(swing.angle());
        }
    }
}
