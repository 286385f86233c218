//! Menu selection and playfield tunables
//!
//! Persisted separately from player progress.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{Result, SettingsError};
use crate::sim::{Difficulty, Rect, SessionConfig, SessionDuration};

/// Settings carried between launches
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Last selected session length
    pub duration: SessionDuration,
    /// Last selected difficulty
    pub difficulty: Difficulty,
    pub lives: u32,

    // === Playfield ===
    pub playfield_width: f32,
    pub playfield_height: f32,
    pub shape_size: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            duration: SessionDuration::Classic,
            difficulty: Difficulty::Normal,
            lives: DEFAULT_LIVES,

            playfield_width: DEFAULT_PLAYFIELD_WIDTH,
            playfield_height: DEFAULT_PLAYFIELD_HEIGHT,
            shape_size: DEFAULT_SHAPE_SIZE,
        }
    }
}

impl Settings {
    /// Build a validated session config from these settings
    pub fn to_session_config(&self, seed: u64) -> Result<SessionConfig> {
        let config = SessionConfig {
            duration: self.duration,
            difficulty: self.difficulty,
            lives: self.lives,
            playfield: Rect::from_size(self.playfield_width, self.playfield_height),
            shape_size: self.shape_size,
            seed,
        };
        config.validate()?;
        Ok(config)
    }

    /// Load settings from a JSON file. Missing or unreadable files give defaults.
    pub fn load(path: &Path) -> Self {
        match fs::read(path) {
            Ok(bytes) => match serde_json::from_slice(&bytes) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(e) => {
                    log::warn!("Ignoring unreadable settings {}: {e}", path.display());
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    pub fn save(&self, path: &Path) -> std::result::Result<(), SettingsError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(self)?;
        fs::write(path, data)?;
        log::info!("Settings saved");
        Ok(())
    }
}
