use bevy::prelude::*;

use super::components::Stone;

/// Mutable access to a stone by id, for operations that act on a stone they only
/// hold a reference to (the catapult's loaded stone).
pub trait StoneLookup {
    fn stone_mut(&mut self, stone: Entity) -> Option<&mut Stone>;
}

impl StoneLookup for Query<'_, '_, (Entity, &'static mut Stone)> {
    fn stone_mut(&mut self, stone: Entity) -> Option<&mut Stone> {
        self.get_mut(stone).ok().map(|(_, s)| s.into_inner())
    }
}
