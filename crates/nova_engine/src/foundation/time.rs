//! Frame timing
//!
//! The world and every per-frame component delta run off a single
//! [`FrameTime`] snapshot taken once per rendered frame.

use std::time::Instant;

/// Snapshot of the game's timing state for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameTime {
    /// Real time elapsed since the previous frame, in seconds.
    pub delta_seconds: f32,
    /// Real time elapsed since the clock was created, in seconds.
    pub total_seconds: f32,
}

impl FrameTime {
    /// Build a snapshot from an explicit delta. Useful for fixed-step
    /// simulations and tests.
    pub fn from_delta(delta_seconds: f32) -> Self {
        Self {
            delta_seconds,
            total_seconds: delta_seconds,
        }
    }
}

/// Produces [`FrameTime`] snapshots from wall-clock time.
pub struct FrameClock {
    last_frame: Instant,
    total_seconds: f32,
    frame_count: u64,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock {
    /// Create a new clock; the first tick measures from this instant.
    pub fn new() -> Self {
        Self {
            last_frame: Instant::now(),
            total_seconds: 0.0,
            frame_count: 0,
        }
    }

    /// Advance the clock and take the snapshot for this frame.
    pub fn tick(&mut self) -> FrameTime {
        let now = Instant::now();
        let delta_seconds = now.duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;
        self.total_seconds += delta_seconds;
        self.frame_count += 1;

        FrameTime {
            delta_seconds,
            total_seconds: self.total_seconds,
        }
    }

    /// Number of frames ticked so far.
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tick_accumulates_total_time() {
        let mut clock = FrameClock::new();
        let a = clock.tick();
        let b = clock.tick();
        assert!(b.total_seconds >= a.total_seconds);
        assert_eq!(clock.frame_count(), 2);
    }

    #[test]
    fn from_delta_builds_fixed_step() {
        let frame = FrameTime::from_delta(0.1);
        assert_eq!(frame.delta_seconds, 0.1);
    }
}
