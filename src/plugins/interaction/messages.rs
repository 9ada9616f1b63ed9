//! Pointer input as seen by the core.
//!
//! One message per user click. The dispatcher reads each exactly once.

use std::time::Duration;

use bevy::prelude::*;

#[derive(Message, Clone, Copy, Debug, PartialEq)]
pub struct InteractionEvent {
    /// Normalized device coordinates, `[-1, 1]` on both axes, +y up.
    pub ndc: Vec2,
    pub timestamp: Duration,
}

impl InteractionEvent {
    pub fn at_ndc(ndc: Vec2, timestamp: Duration) -> Self {
        Self { ndc, timestamp }
    }

    /// Converts a window cursor position (logical pixels, +y down).
    pub fn from_cursor(cursor: Vec2, window_size: Vec2, timestamp: Duration) -> Option<Self> {
        if window_size.x <= 0.0 || window_size.y <= 0.0 {
            return None;
        }
        let ndc = Vec2::new(
            cursor.x / window_size.x * 2.0 - 1.0,
            1.0 - cursor.y / window_size.y * 2.0,
        );
        Some(Self { ndc, timestamp })
    }
}
