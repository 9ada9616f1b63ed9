use bevy::prelude::*;

use crate::common::tunables::Tunables;
use crate::plugins::interaction::{LiveScene, SceneRegistry};

use super::components::{Lifetime, Stone, StoneState};
use super::messages::StoneSettled;

/// Fixed-step flight for launched stones.
///
/// Uses the configured fixed timestep rather than the frame delta: flight is a
/// fixed-step simulation no matter how the schedule is driven.
pub fn integrate_flight(
    mut commands: Commands,
    time: Res<Time<Fixed>>,
    tunables: Res<Tunables>,
    mut q: Query<(Entity, &mut Stone)>,
    mut settled: MessageWriter<StoneSettled>,
) {
    let dt = time.timestep().as_secs_f32();
    let params = tunables.flight();

    for (e, mut stone) in &mut q {
        if stone.state() != StoneState::Launched {
            continue;
        }
        if !stone.advance(dt, &params) {
            continue;
        }

        debug!("stone {e:?} settled at {:?}", stone.position());
        settled.write(StoneSettled { stone: e, position: stone.position() });
        commands.entity(e).insert(Lifetime(Timer::from_seconds(
            tunables.settled_linger_secs,
            TimerMode::Once,
        )));
    }
}

/// Cleanup pass: settled stones leave the registry once their linger time is up.
///
/// A stone that is no longer `Settled` (reset this frame) keeps its place even if a
/// stale `Lifetime` is still attached.
pub fn cleanup_settled(
    time: Res<Time>,
    mut q: Query<(Entity, &mut Lifetime), With<Stone>>,
    mut scene: LiveScene,
) {
    for (e, mut lifetime) in &mut q {
        if scene.stone(e).map(Stone::state) != Some(StoneState::Settled) {
            continue;
        }
        lifetime.tick(time.delta());
        if lifetime.is_finished() && scene.remove_stone(e) {
            debug!("stone {e:?} cleaned up");
        }
    }
}

/// Renderer intent sync: proxy transform and visibility follow the stone.
pub fn sync_stone_proxies(
    mut q: Query<(&Stone, &mut Transform, &mut Visibility), Changed<Stone>>,
) {
    for (stone, mut tf, mut vis) in &mut q {
        tf.translation = stone.position();
        vis.set_if_neq(if stone.is_visible() {
            Visibility::Visible
        } else {
            Visibility::Hidden
        });
    }
}
