//! Errors surfaced by the interaction core.
//!
//! Refused state transitions are *not* errors: they come back as `false` / `None`
//! so click handling can try-and-fail every frame. Only a missing collaborator is.

use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum PreconditionError {
    #[error("no pointer camera is available to project the click")]
    MissingCamera,
    #[error("scene registry is not available")]
    MissingRegistry,
}
