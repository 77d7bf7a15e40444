//! Persisted player settings
//!
//! A small binary record (`version:u32 | master:f32 | sound:f32 |
//! music:f32`, little-endian) rewritten whole-file on every change. An
//! unreadable or version-mismatched file is treated as absent and
//! regenerated with defaults; load problems never reach the player.
//!
//! [`Settings`] is a shared handle so the world and the host menus observe
//! the same state; observers registered with [`Settings::subscribe`] fire
//! after every change.

use std::cell::{Cell, RefCell};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use thiserror::Error;

const SETTINGS_VERSION: u32 = 1;
const RECORD_LEN: usize = 16;

/// Errors raised while reading the settings file.
///
/// Only used internally; the public constructor recovers from every variant
/// by falling back to defaults.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// The file could not be read.
    #[error("failed to read settings: {0}")]
    Io(#[from] io::Error),

    /// The file was written by an incompatible version.
    #[error("unsupported settings version {0}")]
    UnsupportedVersion(u32),

    /// The file is shorter than one full record.
    #[error("settings file truncated")]
    Truncated,
}

struct SettingsInner {
    path: PathBuf,
    master_volume: Cell<f32>,
    sound_volume: Cell<f32>,
    music_volume: Cell<f32>,
    observers: RefCell<Vec<Box<dyn Fn()>>>,
}

/// Shared handle to the persisted settings.
#[derive(Clone)]
pub struct Settings {
    inner: Rc<SettingsInner>,
}

impl Settings {
    /// Load settings from `path`, falling back to defaults (and rewriting
    /// the file) when it is missing, corrupt, or version-mismatched.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let (master, sound, music) = match Self::load(&path) {
            Ok(volumes) => volumes,
            Err(err) => {
                log::warn!(
                    "settings unreadable ({err}), regenerating {} with defaults",
                    path.display()
                );
                (1.0, 1.0, 1.0)
            }
        };

        let settings = Self {
            inner: Rc::new(SettingsInner {
                path,
                master_volume: Cell::new(master),
                sound_volume: Cell::new(sound),
                music_volume: Cell::new(music),
                observers: RefCell::new(Vec::new()),
            }),
        };
        settings.save();
        settings
    }

    fn load(path: &Path) -> Result<(f32, f32, f32), SettingsError> {
        let bytes = fs::read(path)?;
        if bytes.len() < RECORD_LEN {
            return Err(SettingsError::Truncated);
        }

        let version = u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
        if version != SETTINGS_VERSION {
            return Err(SettingsError::UnsupportedVersion(version));
        }

        let read_f32 = |offset: usize| {
            f32::from_le_bytes([
                bytes[offset],
                bytes[offset + 1],
                bytes[offset + 2],
                bytes[offset + 3],
            ])
        };

        Ok((read_f32(4), read_f32(8), read_f32(12)))
    }

    fn save(&self) {
        let mut bytes = Vec::with_capacity(RECORD_LEN);
        bytes.extend_from_slice(&SETTINGS_VERSION.to_le_bytes());
        bytes.extend_from_slice(&self.inner.master_volume.get().to_le_bytes());
        bytes.extend_from_slice(&self.inner.sound_volume.get().to_le_bytes());
        bytes.extend_from_slice(&self.inner.music_volume.get().to_le_bytes());

        if let Some(parent) = self.inner.path.parent() {
            if let Err(err) = fs::create_dir_all(parent) {
                log::warn!("failed to create settings directory: {err}");
                return;
            }
        }

        if let Err(err) = fs::write(&self.inner.path, bytes) {
            log::warn!("failed to write settings: {err}");
        }
    }

    fn changed(&self) {
        self.save();
        for observer in self.inner.observers.borrow().iter() {
            observer();
        }
    }

    /// Register an observer fired after every settings change.
    pub fn subscribe(&self, observer: impl Fn() + 'static) {
        self.inner.observers.borrow_mut().push(Box::new(observer));
    }

    /// Master volume.
    pub fn master_volume(&self) -> f32 {
        self.inner.master_volume.get()
    }

    /// Sound-effect volume, unscaled.
    pub fn sound_volume(&self) -> f32 {
        self.inner.sound_volume.get()
    }

    /// Music volume, unscaled.
    pub fn music_volume(&self) -> f32 {
        self.inner.music_volume.get()
    }

    /// Sound-effect volume scaled by the master volume.
    pub fn scaled_sound_volume(&self) -> f32 {
        self.master_volume() * self.sound_volume()
    }

    /// Music volume scaled by the master volume.
    pub fn scaled_music_volume(&self) -> f32 {
        self.master_volume() * self.music_volume()
    }

    /// Set the master volume, persisting and notifying observers.
    pub fn set_master_volume(&self, volume: f32) {
        self.inner.master_volume.set(volume);
        self.changed();
    }

    /// Set the sound-effect volume, persisting and notifying observers.
    pub fn set_sound_volume(&self, volume: f32) {
        self.inner.sound_volume.set(volume);
        self.changed();
    }

    /// Set the music volume, persisting and notifying observers.
    pub fn set_music_volume(&self, volume: f32) {
        self.inner.music_volume.set(volume);
        self.changed();
    }
}
