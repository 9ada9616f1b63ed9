//! Interaction dispatcher: one click → at most one state transition.
//!
//! ```text
//!   InteractionEvent (ndc)
//!        │  ScreenRaycaster::ray_through
//!        v
//!   Ray3d ──► SceneRegistry::list_interactables()   (fresh every call)
//!        │    nearest hit by ray distance, ties → earliest registry entry
//!        v
//!   winner.eligible ? SceneRegistry::interact(winner) : Refused
//! ```
//!
//! The dispatcher owns no per-entity flags. Whether a stone may be collected is
//! decided by the stone itself (`Stone::collect`), so duplicate clicks in one frame
//! resolve deterministically: the first wins, the rest see a non-idle stone.

use bevy::prelude::*;

use crate::common::error::PreconditionError;
use crate::plugins::physics::Collidable;

use super::camera::ScreenRaycaster;
use super::messages::InteractionEvent;
use super::registry::SceneRegistry;

/// Clicks further away than this never hit anything.
pub const PICK_RANGE: f32 = 500.0;

/// Capability contract for anything the player can click.
pub trait Interactable {
    /// Volume to ray-test against; `None` means "not a click target right now".
    fn hit_volume(&self) -> Option<Collidable>;

    fn accepts_interaction(&self) -> bool;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TargetKind {
    Stone,
    Catapult,
    Torch,
}

/// Snapshot of one interactable, taken when the registry is listed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Candidate {
    pub entity: Entity,
    pub kind: TargetKind,
    pub volume: Option<Collidable>,
    pub eligible: bool,
}

impl Candidate {
    pub fn of(entity: Entity, kind: TargetKind, target: &impl Interactable) -> Self {
        Self {
            entity,
            kind,
            volume: target.hit_volume(),
            eligible: target.accepts_interaction(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Interaction {
    Collected,
    Launched { stone: Entity, velocity: Vec3 },
    TorchToggled { lit: bool },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InteractionOutcome {
    Miss,
    Refused { target: Entity },
    Affected { target: Entity, interaction: Interaction },
}

/// Nearest candidate along `ray`, with its distance. Earlier entries win ties.
pub fn nearest_hit(ray: Ray3d, candidates: &[Candidate]) -> Option<(Candidate, f32)> {
    candidates
        .iter()
        .filter_map(|c| {
            let distance = c.volume?.ray_distance(ray, PICK_RANGE)?;
            Some((*c, distance))
        })
        .fold(None, |best, (c, d)| match best {
            Some((_, best_d)) if best_d <= d => best,
            _ => Some((c, d)),
        })
}

pub fn dispatch(
    event: &InteractionEvent,
    camera: Option<&dyn ScreenRaycaster>,
    scene: Option<&mut dyn SceneRegistry>,
) -> Result<InteractionOutcome, PreconditionError> {
    let camera = camera.ok_or(PreconditionError::MissingCamera)?;
    let scene = scene.ok_or(PreconditionError::MissingRegistry)?;

    let Some(ray) = camera.ray_through(event.ndc) else {
        return Ok(InteractionOutcome::Miss);
    };

    let candidates = scene.list_interactables();
    let Some((hit, distance)) = nearest_hit(ray, &candidates) else {
        return Ok(InteractionOutcome::Miss);
    };
    trace!("click at {:?} hit {:?} {:?} at {distance:.2}", event.ndc, hit.kind, hit.entity);

    if !hit.eligible {
        return Ok(InteractionOutcome::Refused { target: hit.entity });
    }

    Ok(match scene.interact(hit.entity) {
        Some(interaction) => InteractionOutcome::Affected { target: hit.entity, interaction },
        None => InteractionOutcome::Refused { target: hit.entity },
    })
}
