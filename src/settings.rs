//! Driver settings
//!
//! Read from a JSON file named by the first command line argument or by the
//! `GRID_ARENA_SETTINGS` environment variable. Every field has a default, so a
//! partial file is fine.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::sim::{CameraMode, GameState, Rules};

/// Environment variable naming the settings file
pub const SETTINGS_ENV: &str = "GRID_ARENA_SETTINGS";

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("Failed to read settings file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse settings file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Headless driver settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// RNG seed (random when absent)
    pub seed: Option<u64>,
    /// Number of simulation ticks to run
    pub ticks: u32,
    /// Pace ticks at the fixed timestep instead of running flat out
    pub realtime: bool,
    /// Let the autopilot play
    pub autopilot: bool,
    /// Whether the player's shots enter the world
    pub player_bullets: bool,
    pub camera_mode: CameraMode,
    pub fog: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: None,
            // One minute of play
            ticks: 3_600,
            realtime: false,
            autopilot: true,
            player_bullets: true,
            camera_mode: CameraMode::FirstPerson,
            fog: true,
        }
    }
}

impl Settings {
    /// Parse settings from a JSON file
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Settings file named on the command line or in the environment
    pub fn path_from_env() -> Option<PathBuf> {
        std::env::args()
            .nth(1)
            .or_else(|| std::env::var(SETTINGS_ENV).ok())
            .map(PathBuf::from)
    }

    /// Load from the configured path, falling back to defaults on any error
    pub fn load() -> Self {
        let Some(path) = Self::path_from_env() else {
            log::info!("No settings file given, using defaults");
            return Self::default();
        };
        match Self::load_from(&path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("{}, using defaults", e);
                Self::default()
            }
        }
    }

    pub fn rules(&self) -> Rules {
        Rules {
            player_bullets: self.player_bullets,
        }
    }

    /// Apply the cosmetic preferences to a fresh game
    pub fn apply(&self, state: &mut GameState) {
        state.camera.mode = self.camera_mode;
        state.fog = self.fog;
    }
}
