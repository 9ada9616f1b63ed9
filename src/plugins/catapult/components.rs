use std::time::Duration;

use bevy::math::curve::{Curve, EaseFunction, EasingCurve};
use bevy::prelude::*;
use rand::Rng;

use crate::common::tunables::Tunables;
use crate::plugins::interaction::Interactable;
use crate::plugins::physics::Collidable;
use crate::plugins::stones::{Stone, StoneLookup, StoneState};

/// Hard cap on the random launch offset, whatever the tunables say.
pub const MAX_LAUNCH_SPREAD: f32 = 0.1;

pub const ARM_REST: f32 = 0.35;
pub const ARM_FIRED: f32 = -1.2;

const FRAME_HALF_EXTENTS: Vec3 = Vec3::new(1.0, 0.75, 1.5);
/// Basket offset in the catapult's local frame (behind the axle, at arm height).
const BASKET_OFFSET: Vec3 = Vec3::new(0.0, 1.4, 1.1);

/// The catapult: holds at most one stone, fires it, then re-arms after a delay.
///
/// Invariants:
/// - `loaded_stone` is only set while `ready`, and loading clears `ready`.
/// - only `launch` (or the `reset` escape hatch) clears `loaded_stone`.
/// - re-arming is a pending `Timer`, never a blocking wait; `cancel_rearm` drops it.
#[derive(Component, Debug, Clone)]
#[require(Transform, Visibility)]
pub struct Catapult {
    position: Vec3,
    /// Yaw (radians). 0 fires toward -Z.
    orientation: f32,
    arm_angle: f32,
    loaded_stone: Option<Entity>,
    ready: bool,
    rearm: Option<Timer>,
}

impl Catapult {
    pub fn new(position: Vec3, orientation: f32) -> Self {
        Self {
            position,
            orientation,
            arm_angle: ARM_REST,
            loaded_stone: None,
            ready: true,
            rearm: None,
        }
    }

    #[inline]
    pub fn position(&self) -> Vec3 {
        self.position
    }

    #[inline]
    pub fn orientation(&self) -> f32 {
        self.orientation
    }

    #[inline]
    pub fn arm_angle(&self) -> f32 {
        self.arm_angle
    }

    #[inline]
    pub fn set_arm_angle(&mut self, angle: f32) {
        self.arm_angle = angle;
    }

    #[inline]
    pub fn ready(&self) -> bool {
        self.ready
    }

    #[inline]
    pub fn loaded_stone(&self) -> Option<Entity> {
        self.loaded_stone
    }

    #[inline]
    pub fn rearm_pending(&self) -> bool {
        self.rearm.is_some()
    }

    #[inline]
    fn facing(&self) -> Quat {
        Quat::from_rotation_y(self.orientation)
    }

    pub fn basket_position(&self) -> Vec3 {
        self.position + self.facing() * BASKET_OFFSET
    }

    /// World-aligned box around the (yawed) frame.
    pub fn footprint(&self) -> Collidable {
        let basis = Mat3::from_quat(self.facing());
        let half = basis.x_axis.abs() * FRAME_HALF_EXTENTS.x
            + basis.y_axis.abs() * FRAME_HALF_EXTENTS.y
            + basis.z_axis.abs() * FRAME_HALF_EXTENTS.z;
        Collidable::new(self.position + Vec3::Y * FRAME_HALF_EXTENTS.y, half)
    }

    /// Unperturbed launch direction: forward, pitched up.
    pub fn base_direction(&self, pitch: f32) -> Dir3 {
        let forward = self.facing() * Vec3::NEG_Z;
        Dir3::new(forward * pitch.cos() + Vec3::Y * pitch.sin()).unwrap_or(Dir3::Y)
    }

    /// Base direction plus a random horizontal offset of length ≤ `spread`
    /// (itself capped at `MAX_LAUNCH_SPREAD`).
    pub fn aim<R: Rng + ?Sized>(&self, rng: &mut R, pitch: f32, spread: f32) -> Dir3 {
        let base = self.base_direction(pitch);
        if spread.is_nan() || spread <= 0.0 {
            return base;
        }
        let spread = spread.min(MAX_LAUNCH_SPREAD);
        let offset = Vec3::new(
            rng.gen_range(-spread..=spread),
            0.0,
            rng.gen_range(-spread..=spread),
        )
        .clamp_length_max(spread);
        Dir3::new(*base + offset).unwrap_or(base)
    }

    /// Accepts a `Collected` stone when ready and empty.
    pub fn load_stone(&mut self, id: Entity, stone: &mut Stone) -> bool {
        if !self.ready || self.loaded_stone.is_some() || stone.state() != StoneState::Collected {
            return false;
        }
        if !stone.mark_loaded(self.basket_position()) {
            return false;
        }
        self.loaded_stone = Some(id);
        self.ready = false;
        true
    }

    /// Fires the loaded stone. The stone's velocity is set right here, independent of
    /// any arm animation; re-arming is scheduled, not awaited.
    ///
    /// Returns the launched stone, or `None` (and changes nothing) when unloaded.
    pub fn launch<L, R>(&mut self, stones: &mut L, rng: &mut R, tunables: &Tunables) -> Option<Entity>
    where
        L: StoneLookup + ?Sized,
        R: Rng + ?Sized,
    {
        let id = self.loaded_stone?;
        let direction = self.aim(rng, tunables.launch_pitch, tunables.launch_spread);
        let stone = stones.stone_mut(id)?;
        if !stone.launch(direction, tunables.launch_force) {
            return None;
        }

        self.loaded_stone = None;
        self.ready = false;
        self.rearm = Some(Timer::from_seconds(tunables.rearm_secs, TimerMode::Once));
        Some(id)
    }

    /// Advances a pending re-arm. True on the tick the catapult becomes ready.
    pub fn tick_rearm(&mut self, delta: Duration) -> bool {
        let Some(timer) = self.rearm.as_mut() else {
            return false;
        };
        timer.tick(delta);
        if !timer.is_finished() {
            return false;
        }
        self.rearm = None;
        self.ready = true;
        true
    }

    pub fn cancel_rearm(&mut self) {
        self.rearm = None;
    }

    /// Round reset: empty, ready, arm at rest, nothing pending.
    pub fn reset(&mut self) {
        self.loaded_stone = None;
        self.ready = true;
        self.cancel_rearm();
        self.arm_angle = ARM_REST;
    }
}

impl Interactable for Catapult {
    fn hit_volume(&self) -> Option<Collidable> {
        Some(self.footprint())
    }

    /// Clicking the catapult fires it, so it only accepts clicks while loaded.
    fn accepts_interaction(&self) -> bool {
        self.loaded_stone.is_some()
    }
}

/// Presentation task: the arm whips forward, then eases back over the re-arm delay.
///
/// Purely visual. Removing the component cancels it.
#[derive(Component, Debug, Clone)]
pub struct ArmSwing {
    timer: Timer,
    fire_secs: f32,
    fire: EasingCurve<f32>,
    recover: EasingCurve<f32>,
}

impl ArmSwing {
    pub fn new(fire_secs: f32, total_secs: f32) -> Self {
        let fire_secs = fire_secs.max(f32::EPSILON);
        Self {
            timer: Timer::from_seconds(total_secs.max(fire_secs), TimerMode::Once),
            fire_secs,
            fire: EasingCurve::new(ARM_REST, ARM_FIRED, EaseFunction::CubicOut),
            recover: EasingCurve::new(ARM_FIRED, ARM_REST, EaseFunction::SineInOut),
        }
    }

    pub fn from_tunables(tunables: &Tunables) -> Self {
        Self::new(tunables.arm_swing_secs, tunables.rearm_secs)
    }

    pub fn tick(&mut self, delta: Duration) {
        self.timer.tick(delta);
    }

    #[inline]
    pub fn is_finished(&self) -> bool {
        self.timer.is_finished()
    }

    pub fn angle(&self) -> f32 {
        let elapsed = self.timer.elapsed_secs();
        if elapsed < self.fire_secs {
            return self.fire.sample_clamped(elapsed / self.fire_secs);
        }
        let recover_secs = (self.timer.duration().as_secs_f32() - self.fire_secs).max(f32::EPSILON);
        self.recover.sample_clamped((elapsed - self.fire_secs) / recover_secs)
    }
}

/// Seeded RNG for launch spread, so replays with the same seed fly the same way.
#[derive(Resource)]
pub struct LaunchRng(pub rand_chacha::ChaCha8Rng);

impl LaunchRng {
    pub fn seeded(seed: u64) -> Self {
        use rand::SeedableRng;
        Self(rand_chacha::ChaCha8Rng::seed_from_u64(seed))
    }
}
