//! Audio abstraction
//!
//! Playback goes through the [`AudioBackend`] trait; the world owns the
//! returned [`AudioInstance`] handles and is the only code that mutates
//! them (volume, pause, pruning). [`NullAudio`] records playback for tests
//! and headless runs; the rodio backend lives behind the `rodio-audio`
//! feature.

use std::cell::{Cell, RefCell};

use thiserror::Error;

#[cfg(feature = "rodio-audio")]
pub mod rodio_backend;

/// Audio playback errors.
///
/// Playback failures are logged and swallowed at the world boundary; a
/// missing sound never interrupts the simulation.
#[derive(Debug, Error)]
pub enum AudioError {
    /// The backend could not be brought up (no output device, etc.).
    #[error("audio backend unavailable: {0}")]
    BackendUnavailable(String),

    /// A specific sound failed to decode or play.
    #[error("failed to play sound '{id}': {reason}")]
    PlaybackFailed {
        /// Identifier of the sound that failed.
        id: String,
        /// Backend-specific failure description.
        reason: String,
    },
}

/// Handle to one playing sound.
pub trait AudioInstance {
    /// Pause playback, keeping the position.
    fn pause(&self);

    /// Resume a paused instance.
    fn resume(&self);

    /// Stop playback permanently.
    fn stop(&self);

    /// Whether the instance has finished or been stopped.
    fn is_stopped(&self) -> bool;

    /// Set the playback volume (0.0 to 1.0).
    fn set_volume(&self, volume: f32);
}

/// Narrow playback contract the world plays sounds through.
pub trait AudioBackend {
    /// Play the sound with the given identifier once.
    fn play(&self, id: &str) -> Result<Box<dyn AudioInstance>, AudioError>;

    /// Play the sound with the given identifier in a loop (music).
    fn play_looping(&self, id: &str) -> Result<Box<dyn AudioInstance>, AudioError>;
}

/// Backend that plays nothing but records what was asked of it.
pub struct NullAudio {
    played: RefCell<Vec<String>>,
    auto_stop: Cell<bool>,
}

impl Default for NullAudio {
    fn default() -> Self {
        Self::new()
    }
}

impl NullAudio {
    /// New silent backend whose instances play forever until stopped.
    pub fn new() -> Self {
        Self {
            played: RefCell::new(Vec::new()),
            auto_stop: Cell::new(false),
        }
    }

    /// Make every subsequently returned instance report itself stopped
    /// immediately, so the world prunes it on the next update.
    pub fn set_auto_stop(&self, auto_stop: bool) {
        self.auto_stop.set(auto_stop);
    }

    /// Every sound id played so far, in order.
    pub fn played(&self) -> Vec<String> {
        self.played.borrow().clone()
    }

    /// How many times the given sound id has been played.
    pub fn play_count(&self, id: &str) -> usize {
        self.played.borrow().iter().filter(|p| *p == id).count()
    }
}

impl AudioBackend for NullAudio {
    fn play(&self, id: &str) -> Result<Box<dyn AudioInstance>, AudioError> {
        self.played.borrow_mut().push(id.to_string());
        Ok(Box::new(NullInstance {
            stopped: Cell::new(self.auto_stop.get()),
            paused: Cell::new(false),
            volume: Cell::new(1.0),
        }))
    }

    fn play_looping(&self, id: &str) -> Result<Box<dyn AudioInstance>, AudioError> {
        self.play(id)
    }
}

struct NullInstance {
    stopped: Cell<bool>,
    paused: Cell<bool>,
    volume: Cell<f32>,
}

impl AudioInstance for NullInstance {
    fn pause(&self) {
        self.paused.set(true);
    }

    fn resume(&self) {
        self.paused.set(false);
    }

    fn stop(&self) {
        self.stopped.set(true);
    }

    fn is_stopped(&self) -> bool {
        self.stopped.get()
    }

    fn set_volume(&self, volume: f32) {
        self.volume.set(volume);
    }
}
