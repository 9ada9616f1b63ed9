use std::time::Duration;

use bevy::prelude::*;

use super::dispatcher::nearest_hit;
use super::Interaction;
use super::*;
use crate::common::error::PreconditionError;
use crate::common::test_utils::{run_system_once, MemoryScene};
use crate::common::tunables::Tunables;
use crate::plugins::catapult::{Catapult, LaunchRng};
use crate::plugins::physics::Collidable;
use crate::plugins::stones::{Stone, StoneState};
use crate::plugins::world::Torch;

fn click(
    scene: &mut MemoryScene,
    camera: &PointerCamera,
    ndc: Vec2,
) -> InteractionOutcome {
    let event = InteractionEvent::at_ndc(ndc, Duration::ZERO);
    dispatch(&event, Some(camera as &dyn ScreenRaycaster), Some(scene as &mut dyn SceneRegistry))
        .expect("preconditions hold")
}

fn eye(position: Vec3, target: Vec3) -> PointerCamera {
    PointerCamera::looking_at(position, target, PointerCamera::DEFAULT_FOV_Y, 16.0 / 9.0)
}

/// Camera on the z axis at stone height, looking toward -Z.
fn down_the_lane() -> PointerCamera {
    eye(Vec3::new(0.0, 0.3, 20.0), Vec3::new(0.0, 0.3, 0.0))
}

// --------------------------------------------------------------------------------------
// Camera / input
// --------------------------------------------------------------------------------------

#[test]
fn centre_ray_follows_the_view_direction() {
    let camera = eye(Vec3::new(1.0, 2.0, 3.0), Vec3::new(1.0, 2.0, -7.0));
    let ray = camera.ray_through(Vec2::ZERO).unwrap();

    assert_eq!(ray.origin, Vec3::new(1.0, 2.0, 3.0));
    assert!(ray.direction.dot(Vec3::NEG_Z) > 0.9999);
}

#[test]
fn edge_ray_matches_horizontal_field_of_view() {
    let camera = PointerCamera::default();
    let ray = camera.ray_through(Vec2::X).unwrap();

    let half_fov_x = ((camera.fov_y * 0.5).tan() * camera.aspect).atan();
    assert!((ray.direction.angle_between(Vec3::NEG_Z) - half_fov_x).abs() < 1e-4);
    assert!(ray.direction.x > 0.0);
}

#[test]
fn non_finite_screen_point_gives_no_ray() {
    let camera = PointerCamera::default();
    assert!(camera.ray_through(Vec2::new(f32::NAN, 0.0)).is_none());
}

#[test]
fn cursor_converts_to_ndc_with_y_up() {
    let size = Vec2::new(800.0, 600.0);
    let t = Duration::from_millis(16);

    let centre = InteractionEvent::from_cursor(Vec2::new(400.0, 300.0), size, t).unwrap();
    assert_eq!(centre.ndc, Vec2::ZERO);
    assert_eq!(centre.timestamp, t);

    let top_left = InteractionEvent::from_cursor(Vec2::ZERO, size, t).unwrap();
    assert_eq!(top_left.ndc, Vec2::new(-1.0, 1.0));

    let bottom_right = InteractionEvent::from_cursor(size, size, t).unwrap();
    assert_eq!(bottom_right.ndc, Vec2::new(1.0, -1.0));

    assert!(InteractionEvent::from_cursor(Vec2::ZERO, Vec2::ZERO, t).is_none());
}

// --------------------------------------------------------------------------------------
// Preconditions
// --------------------------------------------------------------------------------------

#[test]
fn missing_camera_is_a_precondition_error() {
    let mut scene = MemoryScene::new();
    let event = InteractionEvent::at_ndc(Vec2::ZERO, Duration::ZERO);

    let result = dispatch(&event, None, Some(&mut scene as &mut dyn SceneRegistry));
    assert_eq!(result, Err(PreconditionError::MissingCamera));
}

#[test]
fn missing_registry_is_a_precondition_error() {
    let camera = PointerCamera::default();
    let event = InteractionEvent::at_ndc(Vec2::ZERO, Duration::ZERO);

    let result = dispatch(&event, Some(&camera as &dyn ScreenRaycaster), None);
    assert_eq!(result, Err(PreconditionError::MissingRegistry));
}

// --------------------------------------------------------------------------------------
// Picking
// --------------------------------------------------------------------------------------

#[test]
fn empty_scene_is_a_miss() {
    let mut scene = MemoryScene::new();
    assert_eq!(click(&mut scene, &PointerCamera::default(), Vec2::ZERO), InteractionOutcome::Miss);
}

#[test]
fn targets_behind_the_camera_are_missed() {
    let mut scene = MemoryScene::new();
    scene.with_catapult(Vec3::new(0.0, 0.0, 4.0));
    let camera = eye(Vec3::new(0.0, 0.5, 0.0), Vec3::new(0.0, 0.5, -10.0));

    assert_eq!(click(&mut scene, &camera, Vec2::ZERO), InteractionOutcome::Miss);
}

#[test]
fn targets_beyond_pick_range_are_missed() {
    let mut scene = MemoryScene::new();
    let far = scene.spawn_stone(Vec3::new(0.0, 0.0, -600.0));

    assert_eq!(click(&mut scene, &PointerCamera::default(), Vec2::ZERO), InteractionOutcome::Miss);
    assert_eq!(scene.stone(far).state(), StoneState::Idle);
}

#[test]
fn nearest_stone_wins_regardless_of_insertion_order() {
    let mut scene = MemoryScene::new();
    let far = scene.spawn_stone(Vec3::new(0.0, 0.3, 5.0));
    let near = scene.spawn_stone(Vec3::new(0.0, 0.3, 10.0));

    let outcome = click(&mut scene, &down_the_lane(), Vec2::ZERO);

    assert_eq!(
        outcome,
        InteractionOutcome::Affected { target: near, interaction: Interaction::Collected }
    );
    assert_eq!(scene.stone(near).state(), StoneState::Collected);
    assert_eq!(scene.stone(far).state(), StoneState::Idle);
}

#[test]
fn equidistant_hits_go_to_the_earliest_entry() {
    let mut scene = MemoryScene::new();
    let first = scene.spawn_stone(Vec3::new(0.0, 0.3, 10.0));
    let second = scene.spawn_stone(Vec3::new(0.0, 0.3, 10.0));

    let outcome = click(&mut scene, &down_the_lane(), Vec2::ZERO);

    assert_eq!(
        outcome,
        InteractionOutcome::Affected { target: first, interaction: Interaction::Collected }
    );
    assert_eq!(scene.stone(second).state(), StoneState::Idle);
}

#[test]
fn nearest_hit_skips_candidates_without_volume() {
    let mut ids = World::new();
    let ray = Ray3d { origin: Vec3::ZERO, direction: Dir3::NEG_Z };
    let hidden = Candidate {
        entity: ids.spawn_empty().id(),
        kind: TargetKind::Stone,
        volume: None,
        eligible: false,
    };
    let visible = Candidate {
        entity: ids.spawn_empty().id(),
        kind: TargetKind::Torch,
        volume: Some(Collidable::around(Vec3::new(0.0, 0.0, -4.0), 0.5)),
        eligible: true,
    };

    let (hit, distance) = nearest_hit(ray, &[hidden, visible]).unwrap();
    assert_eq!(hit, visible);
    assert!((distance - 3.5).abs() < 1e-4);
}

#[test]
fn double_click_collects_once() {
    let mut scene = MemoryScene::new();
    let stone = scene.spawn_stone(Vec3::new(0.0, 0.3, 10.0));
    let camera = down_the_lane();

    let outcomes = [
        click(&mut scene, &camera, Vec2::ZERO),
        click(&mut scene, &camera, Vec2::ZERO),
    ];

    let collected = outcomes
        .iter()
        .filter(|o| matches!(o, InteractionOutcome::Affected { interaction: Interaction::Collected, .. }))
        .count();
    assert_eq!(collected, 1);
    assert_eq!(outcomes[1], InteractionOutcome::Miss);
    assert_eq!(scene.stone(stone).state(), StoneState::Collected);
}

#[test]
fn collected_stone_no_longer_blocks_the_one_behind() {
    let mut scene = MemoryScene::new();
    let behind = scene.spawn_stone(Vec3::new(0.0, 0.3, 5.0));
    let front = scene.spawn_stone(Vec3::new(0.0, 0.3, 10.0));
    let camera = down_the_lane();

    click(&mut scene, &camera, Vec2::ZERO);
    let outcome = click(&mut scene, &camera, Vec2::ZERO);

    assert_eq!(
        outcome,
        InteractionOutcome::Affected { target: behind, interaction: Interaction::Collected }
    );
    assert_eq!(scene.stone(front).state(), StoneState::Collected);
}

#[test]
fn removed_stone_is_never_targeted() {
    let mut scene = MemoryScene::new();
    let stone = scene.spawn_stone(Vec3::new(0.0, 0.3, 10.0));

    assert!(scene.remove_stone(stone));
    assert!(!scene.remove_stone(stone));
    assert_eq!(click(&mut scene, &down_the_lane(), Vec2::ZERO), InteractionOutcome::Miss);
}

#[test]
fn loaded_stone_cannot_be_removed() {
    let mut scene = MemoryScene::new();
    scene.with_catapult(Vec3::new(0.0, 0.0, 4.0));
    let stone = scene.spawn_stone(Vec3::new(3.0, 0.3, 10.0));
    scene.collect_and_load(stone);

    assert!(!scene.remove_stone(stone));
    assert_eq!(scene.stone(stone).state(), StoneState::Loaded);
}

// --------------------------------------------------------------------------------------
// Catapult and torches
// --------------------------------------------------------------------------------------

fn at_the_catapult() -> PointerCamera {
    eye(Vec3::new(0.0, 3.0, 12.0), Vec3::new(0.0, 0.75, 4.0))
}

#[test]
fn clicking_an_empty_catapult_is_refused() {
    let mut scene = MemoryScene::new();
    let catapult = scene.with_catapult(Vec3::new(0.0, 0.0, 4.0));

    let outcome = click(&mut scene, &at_the_catapult(), Vec2::ZERO);

    assert_eq!(outcome, InteractionOutcome::Refused { target: catapult });
    assert!(scene.catapult_ref().ready());
    assert!(!scene.catapult_ref().rearm_pending());
}

#[test]
fn clicking_a_loaded_catapult_launches_its_stone() {
    let mut scene = MemoryScene::new();
    let catapult = scene.with_catapult(Vec3::new(0.0, 0.0, 4.0));
    let stone = scene.spawn_stone(Vec3::new(5.0, 0.3, 10.0));
    scene.collect_and_load(stone);

    let outcome = click(&mut scene, &at_the_catapult(), Vec2::ZERO);

    let InteractionOutcome::Affected {
        target,
        interaction: Interaction::Launched { stone: launched, velocity },
    } = outcome
    else {
        panic!("expected a launch, got {outcome:?}");
    };
    assert_eq!(target, catapult);
    assert_eq!(launched, stone);
    assert!((velocity.length() - scene.tunables.launch_force).abs() < 1e-3);
    assert_eq!(scene.stone(stone).state(), StoneState::Launched);
    assert_eq!(scene.catapult_ref().loaded_stone(), None);

    // Empty again: the next click is refused.
    let again = click(&mut scene, &at_the_catapult(), Vec2::ZERO);
    assert_eq!(again, InteractionOutcome::Refused { target: catapult });
}

#[test]
fn torch_click_toggles_the_flame() {
    let mut scene = MemoryScene::new();
    let torch = scene.with_torch(Vec3::new(6.0, 0.0, 8.0));
    let camera = eye(Vec3::new(6.0, 0.9, 12.0), Vec3::new(6.0, 0.9, 8.0));

    assert_eq!(
        click(&mut scene, &camera, Vec2::ZERO),
        InteractionOutcome::Affected { target: torch, interaction: Interaction::TorchToggled { lit: false } }
    );
    assert_eq!(
        click(&mut scene, &camera, Vec2::ZERO),
        InteractionOutcome::Affected { target: torch, interaction: Interaction::TorchToggled { lit: true } }
    );
}

// --------------------------------------------------------------------------------------
// Live registry
// --------------------------------------------------------------------------------------

#[test]
fn live_scene_lists_in_spawn_order_with_pick_margin() {
    let mut world = World::new();
    let tunables = Tunables::default();
    world.insert_resource(LaunchRng::seeded(tunables.rng_seed));
    world.insert_resource(tunables.clone());
    world.init_resource::<SpawnSequence>();

    let stone = world.spawn((Stone::new(Vec3::new(2.0, 0.3, 11.0), tunables.stone_radius), SpawnOrder(2))).id();
    let catapult = world.spawn((Catapult::new(Vec3::ZERO, 0.0), SpawnOrder(1))).id();
    let torch = world.spawn((Torch::standing_at(Vec3::X * 6.0), SpawnOrder(0))).id();

    let (listed, registered) = run_system_once(&mut world, |scene: LiveScene| {
        (scene.list_interactables(), scene.catapult().map(|(e, _)| e))
    });

    let order: Vec<_> = listed.iter().map(|c| (c.entity, c.kind)).collect();
    assert_eq!(
        order,
        vec![
            (torch, TargetKind::Torch),
            (catapult, TargetKind::Catapult),
            (stone, TargetKind::Stone),
        ]
    );
    let stone_volume = listed[2].volume.unwrap();
    assert_eq!(stone_volume.half_extents, Vec3::splat(tunables.stone_radius + tunables.pick_margin));
    assert!(!listed[1].eligible, "empty catapult refuses clicks");
    assert_eq!(registered, Some(catapult));
}

#[test]
fn live_scene_removes_settled_but_keeps_loaded_stones() {
    let mut world = World::new();
    let tunables = Tunables::default();
    world.insert_resource(LaunchRng::seeded(tunables.rng_seed));
    world.insert_resource(tunables);
    world.init_resource::<SpawnSequence>();

    let idle = world.spawn(Stone::new(Vec3::ZERO, 0.3)).id();
    let loaded = world.spawn_empty().id();
    let mut stone = Stone::new(Vec3::ONE, 0.3);
    let mut catapult = Catapult::new(Vec3::ZERO, 0.0);
    stone.collect();
    assert!(stone.load_into(loaded, &mut catapult));
    world.entity_mut(loaded).insert(stone);

    let removed = run_system_once(&mut world, move |mut scene: LiveScene| {
        (scene.remove_stone(idle), scene.remove_stone(loaded))
    });

    assert_eq!(removed, (true, false));
    assert!(world.get_entity(idle).is_err());
    assert!(world.get_entity(loaded).is_ok());
}

#[test]
fn live_scene_spawns_ordered_idle_stones() {
    let mut world = World::new();
    let tunables = Tunables::default();
    world.insert_resource(LaunchRng::seeded(tunables.rng_seed));
    world.insert_resource(tunables);
    world.init_resource::<SpawnSequence>();

    let (a, b) = run_system_once(&mut world, |mut scene: LiveScene| {
        (scene.spawn_stone(Vec3::X), scene.spawn_stone(Vec3::Y))
    });

    assert_eq!(world.get::<SpawnOrder>(a), Some(&SpawnOrder(0)));
    assert_eq!(world.get::<SpawnOrder>(b), Some(&SpawnOrder(1)));
    assert_eq!(world.get::<Stone>(b).unwrap().state(), StoneState::Idle);
    assert_eq!(world.get::<Transform>(b).unwrap().translation, Vec3::Y);
}
