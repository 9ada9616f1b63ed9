//! Render proxies (render-only).
//!
//! Gameplay entities never touch meshes or materials. This plugin dresses them up
//! after the fact:
//!
//! ```text
//!   Added<Stone>     → sphere mesh     (Transform/Visibility already synced by stones)
//!   Added<Catapult>  → frame + arm child, arm pitch follows Catapult::arm_angle
//!   Added<Torch>     → post, material follows Torch::lit
//! ```
//!
//! A stone whose proxy never materializes is still a perfectly valid click target:
//! hit-testing only looks at `Stone`, never at the mesh.

use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::state::GameState;
use crate::common::tunables::Tunables;
use crate::plugins::catapult::Catapult;
use crate::plugins::stones::Stone;
use crate::plugins::world::Torch;

#[derive(Resource)]
struct ProxyAssets {
    stone_mesh: Handle<Mesh>,
    stone_material: Handle<StandardMaterial>,
    frame_mesh: Handle<Mesh>,
    arm_mesh: Handle<Mesh>,
    wood: Handle<StandardMaterial>,
    torch_mesh: Handle<Mesh>,
    torch_lit: Handle<StandardMaterial>,
    torch_out: Handle<StandardMaterial>,
}

/// Marks the visual arm child of a catapult.
#[derive(Component)]
struct CatapultArm;

/// Catapult → its arm proxy.
#[derive(Component)]
struct ArmProxy(Entity);

pub fn plugin(app: &mut App) {
    app.add_systems(Startup, load_proxy_assets)
        .add_systems(OnEnter(GameState::InGame), spawn_ground)
        .add_systems(
            Update,
            (dress_stones, dress_catapults, dress_torches, swing_arm_proxies, flicker_torches),
        );
}

fn load_proxy_assets(
    mut commands: Commands,
    tunables: Res<Tunables>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let wood = materials.add(StandardMaterial {
        base_color: Color::srgb(0.45, 0.3, 0.18),
        perceptual_roughness: 0.9,
        ..default()
    });

    commands.insert_resource(ProxyAssets {
        stone_mesh: meshes.add(Sphere::new(tunables.stone_radius)),
        stone_material: materials.add(StandardMaterial {
            base_color: Color::srgb(0.55, 0.55, 0.58),
            perceptual_roughness: 1.0,
            ..default()
        }),
        frame_mesh: meshes.add(Cuboid::new(2.0, 1.5, 3.0)),
        arm_mesh: meshes.add(Cuboid::new(0.2, 0.2, 2.6)),
        wood,
        torch_mesh: meshes.add(Cylinder::new(0.1, 1.8)),
        torch_lit: materials.add(StandardMaterial {
            base_color: Color::srgb(1.0, 0.6, 0.2),
            emissive: LinearRgba::rgb(4.0, 1.8, 0.4),
            ..default()
        }),
        torch_out: materials.add(StandardMaterial {
            base_color: Color::srgb(0.2, 0.15, 0.1),
            ..default()
        }),
    });
}

fn spawn_ground(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    commands.spawn((
        Name::new("Courtyard"),
        Mesh3d(meshes.add(Plane3d::default().mesh().size(60.0, 60.0))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::srgb(0.22, 0.24, 0.2),
            perceptual_roughness: 1.0,
            ..default()
        })),
        Transform::default(),
        DespawnOnExit(GameState::InGame),
    ));
}

fn dress_stones(
    mut commands: Commands,
    assets: Option<Res<ProxyAssets>>,
    q: Query<Entity, Added<Stone>>,
) {
    let Some(assets) = assets else { return; };
    for e in &q {
        commands.entity(e).insert((
            Mesh3d(assets.stone_mesh.clone()),
            MeshMaterial3d(assets.stone_material.clone()),
        ));
    }
}

fn dress_catapults(
    mut commands: Commands,
    assets: Option<Res<ProxyAssets>>,
    q: Query<(Entity, &Catapult), Added<Catapult>>,
) {
    let Some(assets) = assets else { return; };
    for (e, catapult) in &q {
        let arm = commands
            .spawn((
                CatapultArm,
                Mesh3d(assets.arm_mesh.clone()),
                MeshMaterial3d(assets.wood.clone()),
                arm_transform(catapult.arm_angle()),
            ))
            .id();

        commands
            .entity(e)
            .insert((
                Transform::from_translation(catapult.position())
                    .with_rotation(Quat::from_rotation_y(catapult.orientation())),
                Mesh3d(assets.frame_mesh.clone()),
                MeshMaterial3d(assets.wood.clone()),
                ArmProxy(arm),
            ))
            .add_child(arm);
    }
}

fn dress_torches(
    mut commands: Commands,
    assets: Option<Res<ProxyAssets>>,
    q: Query<(Entity, &Torch), Added<Torch>>,
) {
    let Some(assets) = assets else { return; };
    for (e, torch) in &q {
        let material = if torch.lit() { &assets.torch_lit } else { &assets.torch_out };
        commands.entity(e).insert((
            Mesh3d(assets.torch_mesh.clone()),
            MeshMaterial3d(material.clone()),
        ));
    }
}

/// Arm pivots about the frame's top edge.
fn arm_transform(angle: f32) -> Transform {
    Transform::from_xyz(0.0, 0.9, 0.0).with_rotation(Quat::from_rotation_x(angle))
}

fn swing_arm_proxies(
    q_catapult: Query<(&Catapult, &ArmProxy), Changed<Catapult>>,
    mut q_arm: Query<&mut Transform, With<CatapultArm>>,
) {
    for (catapult, arm) in &q_catapult {
        if let Ok(mut tf) = q_arm.get_mut(arm.0) {
            *tf = arm_transform(catapult.arm_angle());
        }
    }
}

fn flicker_torches(
    assets: Option<Res<ProxyAssets>>,
    mut q: Query<(&Torch, &mut MeshMaterial3d<StandardMaterial>), Changed<Torch>>,
) {
    let Some(assets) = assets else { return; };
    for (torch, mut material) in &mut q {
        let wanted = if torch.lit() { &assets.torch_lit } else { &assets.torch_out };
        if material.0 != *wanted {
            material.0 = wanted.clone();
        }
    }
}
