//! Pluggable per-frame spawn policy

use crate::foundation::time::FrameTime;
use crate::scene::World;

/// Game-mode policy invoked by the world once per frame, after entity
/// updates and disposal cleanup, so spawn decisions observe the
/// post-cleanup entity set.
pub trait GameMode {
    /// Advance the mode by one frame.
    fn update(&mut self, frame: FrameTime, world: &World);

    /// Remaining lives, when the mode tracks them.
    fn lives(&self) -> u32 {
        0
    }

    /// Overwrite the remaining lives. The default implementation ignores
    /// the value for modes without a life pool.
    fn set_lives(&mut self, _lives: u32) {}
}
