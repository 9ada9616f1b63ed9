//! Camera plugin (render-only).
//!
//! Owns the real `Camera3d` and turns raw mouse/keyboard input into core messages:
//!
//! ```text
//!   OnEnter(InGame): spawn MainCamera (+ PointerCamera mirror)
//!   Update:          sync_pointer_camera   Transform/Projection → PointerCamera
//!                    capture_clicks        left click → InteractionEvent (ndc)
//!                    capture_reset         R          → ResetRound
//! ```
//!
//! The core only ever sees the `PointerCamera` mirror, never the render camera.

use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;
use bevy::window::PrimaryWindow;

use crate::common::state::GameState;
use crate::plugins::interaction::systems::dispatch_clicks;
use crate::plugins::interaction::{InteractionEvent, PointerCamera};
use crate::plugins::world::{ResetRound, CATAPULT_POSITION};

#[derive(Component)]
pub struct MainCamera;

const EYE: Vec3 = Vec3::new(0.0, 4.5, 18.0);

pub fn plugin(app: &mut App) {
    app.add_systems(OnEnter(GameState::InGame), spawn_camera)
        .add_systems(
            Update,
            (sync_pointer_camera, capture_clicks, capture_reset)
                .chain()
                .before(dispatch_clicks)
                .run_if(in_state(GameState::InGame)),
        );
}

fn spawn_camera(mut commands: Commands) {
    let target = CATAPULT_POSITION + Vec3::new(0.0, 0.5, 4.0);
    commands.spawn((
        Name::new("MainCamera"),
        MainCamera,
        Camera3d::default(),
        Transform::from_translation(EYE).looking_at(target, Vec3::Y),
        PointerCamera::looking_at(EYE, target, PointerCamera::DEFAULT_FOV_Y, 16.0 / 9.0),
        DespawnOnExit(GameState::InGame),
    ));
}

fn sync_pointer_camera(
    mut q: Query<(&Transform, &Projection, &mut PointerCamera), With<MainCamera>>,
) {
    for (tf, projection, mut pointer) in &mut q {
        let Projection::Perspective(perspective) = projection else {
            continue;
        };
        pointer.sync_from(tf, perspective.fov, perspective.aspect_ratio);
    }
}

fn capture_clicks(
    time: Res<Time>,
    buttons: Option<Res<ButtonInput<MouseButton>>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut writer: MessageWriter<InteractionEvent>,
) {
    let Some(buttons) = buttons else { return; };
    if !buttons.just_pressed(MouseButton::Left) {
        return;
    }

    let window = match windows.single() {
        Ok(w) => w,
        Err(e) => { debug!("No single PrimaryWindow: {e:?}"); return; }
    };
    let Some(cursor) = window.cursor_position() else {
        debug!("Cursor position is None");
        return;
    };

    let size = Vec2::new(window.width(), window.height());
    if let Some(event) = InteractionEvent::from_cursor(cursor, size, time.elapsed()) {
        writer.write(event);
    }
}

fn capture_reset(
    keys: Option<Res<ButtonInput<KeyCode>>>,
    mut writer: MessageWriter<ResetRound>,
) {
    let Some(keys) = keys else { return; };
    if keys.just_pressed(KeyCode::KeyR) {
        writer.write(ResetRound);
    }
}
