//! Per-player input snapshot
//!
//! Device polling lives with the host; the simulation only ever sees this
//! normalized per-frame snapshot, written into movement and armament
//! components from outside the update loop.

use crate::foundation::math::Vec2;

/// Normalized input state for one player for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PlayerInput {
    /// Desired movement direction, length clamped to 1 by consumers.
    pub move_dir: Vec2,

    /// Desired facing direction; zero keeps the current facing.
    pub look_dir: Vec2,

    /// Whether the fire control is held.
    pub firing: bool,
}
