//! Lighting plugin (render-only): one moonlit key light so proxies are visible.

use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::state::GameState;

pub fn plugin(app: &mut App) {
    app.add_systems(OnEnter(GameState::InGame), setup);
}

fn setup(mut commands: Commands) {
    commands.spawn((
        Name::new("Moonlight"),
        DirectionalLight {
            color: Color::srgb(0.75, 0.8, 1.0),
            illuminance: 6_000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(8.0, 14.0, 10.0).looking_at(Vec3::ZERO, Vec3::Y),
        DespawnOnExit(GameState::InGame),
    ));
}
