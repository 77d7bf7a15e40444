//! Engine bootstrap configuration

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration file errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read or written.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not valid TOML for the target type.
    #[error("parse error: {0}")]
    Parse(String),

    /// The value could not be serialized.
    #[error("serialization error: {0}")]
    Serialize(String),
}

/// TOML-backed configuration types.
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Load configuration from a TOML file.
    fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Save configuration to a TOML file.
    fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let contents =
            toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Load configuration, falling back to defaults when the file is
    /// missing or invalid.
    fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::load_from_file(&path) {
            Ok(config) => config,
            Err(err) => {
                log::info!(
                    "using default config ({} unavailable: {err})",
                    path.as_ref().display()
                );
                Self::default()
            }
        }
    }
}

/// Engine bootstrap parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Virtual resolution width the camera letterboxes to.
    pub target_width: u32,

    /// Virtual resolution height the camera letterboxes to.
    pub target_height: u32,

    /// Background texture path, tiled behind the world.
    pub background_texture: String,

    /// Looping in-game music id, if any.
    pub music: Option<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            target_width: 640,
            target_height: 360,
            background_texture: "Images/Background".to_string(),
            music: Some("Music/InGame".to_string()),
        }
    }
}

impl Config for EngineConfig {}
