//! Game settings and preferences
//!
//! Stored as a JSON file next to the game. Every field has a default, so a
//! partial file (or no file at all) is valid.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::SettingsError;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Name recorded with high scores
    pub alias: String,
    /// High score table (`alias:score` lines)
    pub highscore_path: PathBuf,
    /// Asset root; when set, the manifest is checked at startup
    pub asset_dir: Option<PathBuf>,

    // === HUD ===
    /// Show FPS counter
    pub show_fps: bool,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    pub muted: bool,

    // === Headless demo ===
    /// Fixed RNG seed; wall clock when unset
    pub seed: Option<u64>,
    /// Seconds of autopilot play
    pub demo_seconds: f32,
    /// Frames per simulated second
    pub demo_fps: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            alias: "PLAYER".to_string(),
            highscore_path: PathBuf::from("Top_List/toplist.txt"),
            asset_dir: None,

            show_fps: true,

            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,

            seed: None,
            demo_seconds: 120.0,
            demo_fps: 60,
        }
    }
}

impl Settings {
    /// Seconds per demo frame
    pub fn demo_dt(&self) -> f32 {
        1.0 / self.demo_fps.max(1) as f32
    }

    /// Load settings from `path`, falling back to defaults if it does not exist
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        if !path.exists() {
            log::info!("No settings at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let json = std::fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = serde_json::from_str(&json).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Save settings to `path`
    pub fn save(&self, path: &Path) -> Result<(), SettingsError> {
        let json = serde_json::to_string_pretty(self).map_err(SettingsError::Serialize)?;
        std::fs::write(path, json).map_err(|source| SettingsError::Write {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }
}
