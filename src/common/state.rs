//! Global state machine.
//!
//! The courtyard, its camera and its light are all scoped to `InGame` with
//! `DespawnOnExit`.

use bevy::prelude::*;

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, States, Default)]
pub enum GameState {
    #[default]
    InGame,
}
