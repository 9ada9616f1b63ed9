//! Lifecycle messages the core emits for scoring/audio/particle listeners.

use bevy::prelude::*;

#[derive(Message, Clone, Copy, Debug, PartialEq)]
pub struct StoneCollected {
    pub stone: Entity,
}

#[derive(Message, Clone, Copy, Debug, PartialEq)]
pub struct StoneLoaded {
    pub stone: Entity,
    pub catapult: Entity,
}

#[derive(Message, Clone, Copy, Debug, PartialEq)]
pub struct StoneLaunched {
    pub stone: Entity,
    pub catapult: Entity,
    pub velocity: Vec3,
}

#[derive(Message, Clone, Copy, Debug, PartialEq)]
pub struct StoneSettled {
    pub stone: Entity,
    pub position: Vec3,
}
