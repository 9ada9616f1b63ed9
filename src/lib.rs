//! Castle catapult: collect stones in a torch-lit courtyard, load them into the
//! catapult and fling them over the wall.
//!
//! `plugins` holds the gameplay core (headless-testable) and the render shell.
//! Integration tests in `tests/` link against this library.

pub mod game;
pub mod common;
pub mod plugins;
