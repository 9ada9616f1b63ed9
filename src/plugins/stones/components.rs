use bevy::prelude::*;

use crate::plugins::catapult::Catapult;
use crate::plugins::interaction::Interactable;
use crate::plugins::physics::{BodyStep, Collidable, FlightParams, PhysicsBody};

/// Stone lifecycle.
///
/// ```text
///   Idle ──collect──► Collected ──load──► Loaded ──launch──► Launched ──physics──► Settled
///     ▲                                                                              │
///     └─────────────────────────────── reset (any state) ◄───────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StoneState {
    /// Resting at its spawn point; the only clickable state.
    #[default]
    Idle,
    /// Picked up: hidden and not a click target.
    Collected,
    /// Held by the catapult, drawn at its basket.
    Loaded,
    Launched,
    /// At rest after landing; waits for cleanup.
    Settled,
}

/// A collectible, launchable stone.
///
/// Fields are private. Every mutation goes through a transition method,
/// and each one checks the current state first. A refused transition returns
/// `false` and leaves the stone untouched.
#[derive(Component, Debug, Clone, PartialEq)]
#[require(Transform, Visibility)]
pub struct Stone {
    spawn: Vec3,
    body: PhysicsBody,
    state: StoneState,
}

impl Stone {
    pub fn new(spawn: Vec3, radius: f32) -> Self {
        Self {
            spawn,
            body: PhysicsBody::at_rest(spawn, radius),
            state: StoneState::Idle,
        }
    }

    #[inline]
    pub fn state(&self) -> StoneState {
        self.state
    }

    #[inline]
    pub fn spawn_point(&self) -> Vec3 {
        self.spawn
    }

    #[inline]
    pub fn position(&self) -> Vec3 {
        self.body.position
    }

    #[inline]
    pub fn velocity(&self) -> Vec3 {
        self.body.velocity
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.body.radius
    }

    /// Render intent: a collected stone is never drawn.
    #[inline]
    pub fn is_visible(&self) -> bool {
        self.state != StoneState::Collected
    }

    /// `Idle → Collected`. The single guard against double collection.
    pub fn collect(&mut self) -> bool {
        if self.state != StoneState::Idle {
            return false;
        }
        self.state = StoneState::Collected;
        true
    }

    /// `Collected → Loaded`, from the stone's side. Same rules as `Catapult::load_stone`.
    pub fn load_into(&mut self, me: Entity, catapult: &mut Catapult) -> bool {
        catapult.load_stone(me, self)
    }

    /// Called by the catapult once it has accepted the stone.
    pub(crate) fn mark_loaded(&mut self, basket: Vec3) -> bool {
        if self.state != StoneState::Collected {
            return false;
        }
        self.state = StoneState::Loaded;
        self.body.position = basket;
        self.body.velocity = Vec3::ZERO;
        true
    }

    /// Keeps a loaded stone on the catapult basket.
    pub fn pin_to(&mut self, basket: Vec3) -> bool {
        if self.state != StoneState::Loaded {
            return false;
        }
        self.body.position = basket;
        true
    }

    /// `Loaded → Launched` with `velocity = direction * force`.
    pub fn launch(&mut self, direction: Dir3, force: f32) -> bool {
        if self.state != StoneState::Loaded || !force.is_finite() || force <= 0.0 {
            return false;
        }
        self.body.velocity = direction * force;
        self.state = StoneState::Launched;
        true
    }

    /// Advances a launched stone by `dt`. Returns true on the step it settles.
    pub fn advance(&mut self, dt: f32, params: &FlightParams) -> bool {
        if self.state != StoneState::Launched {
            return false;
        }
        if self.body.step(dt, params) != BodyStep::Settled {
            return false;
        }
        self.state = StoneState::Settled;
        true
    }

    /// Escape hatch for round replay: back to `Idle` at the spawn point.
    pub fn reset(&mut self) {
        self.body = PhysicsBody::at_rest(self.spawn, self.body.radius);
        self.state = StoneState::Idle;
    }
}

impl Interactable for Stone {
    fn hit_volume(&self) -> Option<Collidable> {
        (self.state == StoneState::Idle).then(|| self.body.bounds())
    }

    fn accepts_interaction(&self) -> bool {
        self.state == StoneState::Idle
    }
}

/// Time a settled stone stays on the field before cleanup removes it.
#[derive(Component, Deref, DerefMut)]
pub struct Lifetime(pub Timer);
