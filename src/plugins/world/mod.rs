//! World plugin: lays out the castle courtyard and runs round resets.
//!
//! Seeds are fixed positions. Every round starts with one idle stone on each of them.

use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::state::GameState;
use crate::common::tunables::Tunables;
use crate::plugins::catapult::{ArmSwing, Catapult};
use crate::plugins::interaction::{Interactable, SpawnSequence};
use crate::plugins::interaction::registry::spawn_stone_entity;
use crate::plugins::physics::Collidable;
use crate::plugins::stones::systems::cleanup_settled;
use crate::plugins::stones::{Lifetime, Stone};

pub const STONE_SEEDS: [Vec3; 5] = [
    Vec3::new(2.0, 0.02, 11.0),
    Vec3::new(-3.0, 0.02, 9.0),
    Vec3::new(4.0, 0.02, 7.5),
    Vec3::new(-1.5, 0.02, 13.0),
    Vec3::new(3.0, 0.02, 13.5),
];

pub const CATAPULT_POSITION: Vec3 = Vec3::new(0.0, 0.0, 4.0);

pub const TORCH_POSITIONS: [Vec3; 4] = [
    Vec3::new(-6.0, 0.0, -6.0),
    Vec3::new(6.0, 0.0, -6.0),
    Vec3::new(-6.0, 0.0, 8.0),
    Vec3::new(6.0, 0.0, 8.0),
];

const TORCH_HALF_EXTENTS: Vec3 = Vec3::new(0.15, 0.9, 0.15);

#[derive(Component, Debug, Clone)]
#[require(Transform, Visibility)]
pub struct Torch {
    lit: bool,
    bounds: Collidable,
}

impl Torch {
    pub fn standing_at(base: Vec3) -> Self {
        Self {
            lit: true,
            bounds: Collidable::new(base + Vec3::Y * TORCH_HALF_EXTENTS.y, TORCH_HALF_EXTENTS),
        }
    }

    #[inline]
    pub fn lit(&self) -> bool {
        self.lit
    }

    /// Flips the flame; returns the new state.
    pub fn toggle(&mut self) -> bool {
        self.lit = !self.lit;
        self.lit
    }

    pub fn relight(&mut self) {
        self.lit = true;
    }
}

impl Interactable for Torch {
    fn hit_volume(&self) -> Option<Collidable> {
        Some(self.bounds)
    }

    fn accepts_interaction(&self) -> bool {
        true
    }
}

#[derive(Message, Clone, Copy, Debug, PartialEq)]
pub struct TorchToggled {
    pub torch: Entity,
    pub lit: bool,
}

/// Starts a new round: stones back to their seeds, catapult empty and ready.
#[derive(Message, Clone, Copy, Debug, Default)]
pub struct ResetRound;

pub fn plugin(app: &mut App) {
    app.add_message::<TorchToggled>()
        .add_message::<ResetRound>()
        .add_systems(OnEnter(GameState::InGame), spawn_scene)
        .add_systems(
            Update,
            reset_round
                .after(cleanup_settled)
                .run_if(in_state(GameState::InGame)),
        );
}

fn spawn_scene(
    mut commands: Commands,
    mut sequence: ResMut<SpawnSequence>,
    tunables: Res<Tunables>,
) {
    commands.spawn((
        Name::new("Catapult"),
        Catapult::new(CATAPULT_POSITION, 0.0),
        sequence.issue(),
        Transform::from_translation(CATAPULT_POSITION),
        DespawnOnExit(GameState::InGame),
    ));

    for (i, base) in TORCH_POSITIONS.into_iter().enumerate() {
        commands.spawn((
            Name::new(format!("Torch{i}")),
            Torch::standing_at(base),
            sequence.issue(),
            Transform::from_translation(base),
            DespawnOnExit(GameState::InGame),
        ));
    }

    for seed in STONE_SEEDS {
        spawn_stone_entity(&mut commands, &mut sequence, seed, tunables.stone_radius);
    }

    info!("courtyard ready: {} stones", STONE_SEEDS.len());
}

/// Round replay. Surviving stones `reset()`; seeds whose stone was cleaned up get a
/// fresh one. Pending re-arm and arm swing are cancelled so nothing later mutates
/// the catapult behind the reset's back.
///
/// Ordered after `cleanup_settled` (with a sync point in between): a stone despawned
/// this frame is already gone, so its seed is refilled.
fn reset_round(
    mut commands: Commands,
    mut resets: MessageReader<ResetRound>,
    mut sequence: ResMut<SpawnSequence>,
    tunables: Res<Tunables>,
    mut q_stones: Query<(Entity, &mut Stone)>,
    mut q_catapult: Query<(Entity, &mut Catapult)>,
    mut q_torches: Query<&mut Torch>,
) {
    if resets.read().count() == 0 {
        return;
    }

    for (e, mut catapult) in &mut q_catapult {
        catapult.reset();
        commands.entity(e).remove::<ArmSwing>();
    }

    let mut occupied = Vec::with_capacity(STONE_SEEDS.len());
    for (e, mut stone) in &mut q_stones {
        stone.reset();
        commands.entity(e).remove::<Lifetime>();
        occupied.push(stone.spawn_point());
    }

    let mut respawned = 0;
    for seed in STONE_SEEDS.into_iter().filter(|s| !occupied.contains(s)) {
        spawn_stone_entity(&mut commands, &mut sequence, seed, tunables.stone_radius);
        respawned += 1;
    }

    for mut torch in &mut q_torches {
        torch.relight();
    }

    info!("round reset: {} stones kept, {respawned} respawned", occupied.len());
}
