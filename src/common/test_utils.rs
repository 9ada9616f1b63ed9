//! Test helpers.
//!
//! Bevy provides `World::run_system_once` (via the `RunSystemOnce` trait) for quickly
//! executing a system in tests without building a full schedule. Systems that use
//! `Commands` enqueue structural changes, so we `flush()` before assertions.
//!
//! `MemoryScene` is a plain in-memory `SceneRegistry`: it lets the dispatcher and the
//! catapult be exercised without any ECS world, renderer or input.

use bevy::ecs::system::{IntoSystem, RunSystemOnce};
use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::common::tunables::Tunables;
use crate::plugins::catapult::Catapult;
use crate::plugins::interaction::{Candidate, Interaction, SceneRegistry, TargetKind};
use crate::plugins::stones::{Stone, StoneLookup, StoneState};
use crate::plugins::world::Torch;

/// Run a system once on the given world, then flush deferred commands.
/// Returns the system output.
pub fn run_system_once<T, Out, Marker>(world: &mut World, system: T) -> Out
where
    T: IntoSystem<(), Out, Marker>,
{
    let out = world.run_system_once(system).expect("system run failed");
    world.flush();
    out
}

impl StoneLookup for Vec<(Entity, Stone)> {
    fn stone_mut(&mut self, stone: Entity) -> Option<&mut Stone> {
        self.iter_mut().find(|(e, _)| *e == stone).map(|(_, s)| s)
    }
}

/// Registry backed by vectors; listing order is insertion order.
pub struct MemoryScene {
    ids: World,
    order: Vec<(Entity, TargetKind)>,
    pub stones: Vec<(Entity, Stone)>,
    pub catapult: Option<(Entity, Catapult)>,
    pub torches: Vec<(Entity, Torch)>,
    pub tunables: Tunables,
    pub rng: ChaCha8Rng,
}

impl MemoryScene {
    pub fn new() -> Self {
        let tunables = Tunables::default();
        Self {
            ids: World::new(),
            order: Vec::new(),
            stones: Vec::new(),
            catapult: None,
            torches: Vec::new(),
            rng: ChaCha8Rng::seed_from_u64(tunables.rng_seed),
            tunables,
        }
    }

    fn issue(&mut self, kind: TargetKind) -> Entity {
        let e = self.ids.spawn_empty().id();
        self.order.push((e, kind));
        e
    }

    pub fn with_catapult(&mut self, position: Vec3) -> Entity {
        let e = self.issue(TargetKind::Catapult);
        self.catapult = Some((e, Catapult::new(position, 0.0)));
        e
    }

    pub fn with_torch(&mut self, base: Vec3) -> Entity {
        let e = self.issue(TargetKind::Torch);
        self.torches.push((e, Torch::standing_at(base)));
        e
    }

    pub fn stone(&self, e: Entity) -> &Stone {
        &self.stones.iter().find(|(id, _)| *id == e).expect("unknown stone").1
    }

    pub fn catapult_ref(&self) -> &Catapult {
        SceneRegistry::catapult(self).expect("no catapult").1
    }

    /// Collects and loads `stone` into the catapult, asserting each step.
    pub fn collect_and_load(&mut self, stone: Entity) {
        let catapult = &mut self.catapult.as_mut().expect("no catapult").1;
        let s = self.stones.stone_mut(stone).expect("unknown stone");
        assert!(s.collect());
        assert!(s.load_into(stone, catapult));
    }
}

impl SceneRegistry for MemoryScene {
    fn list_interactables(&self) -> Vec<Candidate> {
        self.order
            .iter()
            .filter_map(|&(e, kind)| match kind {
                TargetKind::Stone => self
                    .stones
                    .iter()
                    .find(|(id, _)| *id == e)
                    .map(|(_, s)| Candidate::of(e, kind, s)),
                TargetKind::Catapult => self
                    .catapult
                    .as_ref()
                    .filter(|(id, _)| *id == e)
                    .map(|(_, c)| Candidate::of(e, kind, c)),
                TargetKind::Torch => self
                    .torches
                    .iter()
                    .find(|(id, _)| *id == e)
                    .map(|(_, t)| Candidate::of(e, kind, t)),
            })
            .collect()
    }

    fn interact(&mut self, target: Entity) -> Option<Interaction> {
        if let Some(stone) = self.stones.stone_mut(target) {
            return stone.collect().then_some(Interaction::Collected);
        }
        if let Some((id, catapult)) = self.catapult.as_mut() {
            if *id == target {
                let stone = catapult.launch(&mut self.stones, &mut self.rng, &self.tunables)?;
                let velocity = self.stone(stone).velocity();
                return Some(Interaction::Launched { stone, velocity });
            }
        }
        self.torches
            .iter_mut()
            .find(|(id, _)| *id == target)
            .map(|(_, torch)| Interaction::TorchToggled { lit: torch.toggle() })
    }

    fn spawn_stone(&mut self, position: Vec3) -> Entity {
        let e = self.issue(TargetKind::Stone);
        self.stones.push((e, Stone::new(position, self.tunables.stone_radius)));
        e
    }

    fn remove_stone(&mut self, stone: Entity) -> bool {
        let Some(index) = self.stones.iter().position(|(id, _)| *id == stone) else {
            return false;
        };
        if self.stones[index].1.state() == StoneState::Loaded {
            return false;
        }
        self.stones.remove(index);
        self.order.retain(|(id, _)| *id != stone);
        true
    }

    fn catapult(&self) -> Option<(Entity, &Catapult)> {
        self.catapult.as_ref().map(|(e, c)| (*e, c))
    }
}
