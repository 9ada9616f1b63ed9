//! Integration test harness.
//!
//! Keep integration tests headless:
//! - `MinimalPlugins` provides the core ECS runtime (time, schedules).
//! - `StatesPlugin` drives `GameState`.
//! - we then call `castle_catapult::game::configure_headless` to install gameplay plugins.

#![allow(dead_code)]

use bevy::ecs::message::Message;
use bevy::ecs::system::RunSystemOnce;
use bevy::prelude::*;
use bevy::state::app::StatesPlugin;

use castle_catapult::plugins::stones::Stone;

pub fn app_headless() -> App {
    let mut app = App::new();
    app.add_plugins((MinimalPlugins, StatesPlugin));

    castle_catapult::game::configure_headless(&mut app);
    app
}

/// Number of `M` messages still readable (current and previous update).
pub fn count_messages<M: Message>(app: &mut App) -> usize {
    app.world_mut()
        .run_system_once(|mut reader: MessageReader<M>| reader.read().count())
        .expect("reader system failed")
}

/// The stone that spawned at `seed`.
pub fn stone_at_seed(app: &mut App, seed: Vec3) -> Entity {
    let world = app.world_mut();
    world
        .query::<(Entity, &Stone)>()
        .iter(world)
        .find(|(_, s)| s.spawn_point() == seed)
        .map(|(e, _)| e)
        .expect("no stone at seed")
}
