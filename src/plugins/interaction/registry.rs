//! Scene registry: the authoritative list of live interactables.
//!
//! The dispatcher only sees this trait. In the running game it is backed by
//! `LiveScene`, a system param over the ECS world, so every listing reflects the
//! world as it is *now*. Despawned stones simply stop showing up.

use bevy::ecs::system::SystemParam;
use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::state::GameState;
use crate::common::tunables::Tunables;
use crate::plugins::catapult::{Catapult, LaunchRng};
use crate::plugins::stones::{Stone, StoneState};
use crate::plugins::world::Torch;

use super::dispatcher::{Candidate, Interaction, TargetKind};

pub trait SceneRegistry {
    /// All interactables in registry insertion order.
    fn list_interactables(&self) -> Vec<Candidate>;

    /// Routes one interaction to the target's own transition method.
    /// `None` when the target refused (or no longer exists).
    fn interact(&mut self, target: Entity) -> Option<Interaction>;

    fn spawn_stone(&mut self, position: Vec3) -> Entity;

    /// Refuses to remove a stone the catapult still holds.
    fn remove_stone(&mut self, stone: Entity) -> bool;

    fn catapult(&self) -> Option<(Entity, &Catapult)>;
}

/// Registry insertion order.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SpawnOrder(pub u64);

#[derive(Resource, Debug, Default)]
pub struct SpawnSequence(u64);

impl SpawnSequence {
    pub fn issue(&mut self) -> SpawnOrder {
        let order = SpawnOrder(self.0);
        self.0 += 1;
        order
    }
}

pub fn spawn_stone_entity(
    commands: &mut Commands,
    sequence: &mut SpawnSequence,
    position: Vec3,
    radius: f32,
) -> Entity {
    commands
        .spawn((
            Name::new("Stone"),
            Stone::new(position, radius),
            sequence.issue(),
            Transform::from_translation(position),
            Visibility::Visible,
            DespawnOnExit(GameState::InGame),
        ))
        .id()
}

#[derive(SystemParam)]
pub struct LiveScene<'w, 's> {
    commands: Commands<'w, 's>,
    tunables: Res<'w, Tunables>,
    sequence: ResMut<'w, SpawnSequence>,
    rng: ResMut<'w, LaunchRng>,
    order: Query<'w, 's, &'static SpawnOrder>,
    stones: Query<'w, 's, (Entity, &'static mut Stone)>,
    catapults: Query<'w, 's, (Entity, &'static mut Catapult)>,
    torches: Query<'w, 's, (Entity, &'static mut Torch)>,
}

impl LiveScene<'_, '_> {
    pub fn stone(&self, stone: Entity) -> Option<&Stone> {
        self.stones.get(stone).ok().map(|(_, s)| s)
    }
}

impl SceneRegistry for LiveScene<'_, '_> {
    fn list_interactables(&self) -> Vec<Candidate> {
        let margin = self.tunables.pick_margin;
        let stones = self.stones.iter().map(|(e, stone)| {
            let mut candidate = Candidate::of(e, TargetKind::Stone, stone);
            candidate.volume = candidate.volume.map(|v| v.inflated(margin));
            candidate
        });
        let catapults = self
            .catapults
            .iter()
            .map(|(e, catapult)| Candidate::of(e, TargetKind::Catapult, catapult));
        let torches = self
            .torches
            .iter()
            .map(|(e, torch)| Candidate::of(e, TargetKind::Torch, torch));

        let mut listed: Vec<Candidate> = stones.chain(catapults).chain(torches).collect();
        listed.sort_by_key(|c| self.order.get(c.entity).map_or(u64::MAX, |o| o.0));
        listed
    }

    fn interact(&mut self, target: Entity) -> Option<Interaction> {
        if let Ok((_, mut stone)) = self.stones.get_mut(target) {
            return stone.collect().then_some(Interaction::Collected);
        }

        if let Ok((_, mut catapult)) = self.catapults.get_mut(target) {
            let stone = catapult.launch(&mut self.stones, &mut self.rng.0, &self.tunables)?;
            let velocity = self
                .stones
                .get(stone)
                .map_or(Vec3::ZERO, |(_, s)| s.velocity());
            return Some(Interaction::Launched { stone, velocity });
        }

        if let Ok((_, mut torch)) = self.torches.get_mut(target) {
            return Some(Interaction::TorchToggled { lit: torch.toggle() });
        }

        None
    }

    fn spawn_stone(&mut self, position: Vec3) -> Entity {
        spawn_stone_entity(
            &mut self.commands,
            &mut self.sequence,
            position,
            self.tunables.stone_radius,
        )
    }

    fn remove_stone(&mut self, stone: Entity) -> bool {
        let Ok((_, s)) = self.stones.get(stone) else {
            return false;
        };
        if s.state() == StoneState::Loaded {
            return false;
        }
        self.commands.entity(stone).despawn();
        true
    }

    fn catapult(&self) -> Option<(Entity, &Catapult)> {
        self.catapults.single().ok()
    }
}
