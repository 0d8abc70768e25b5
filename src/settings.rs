//! Game settings and preferences
//!
//! Kept apart from `Tuning`: these change how the game sounds and who gets
//! credited on the leaderboard, never how it plays.

use serde::{Deserialize, Serialize};

/// Game settings/preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Silence everything
    pub muted: bool,

    // === Leaderboard ===
    /// Entries shown on the leaderboard screen
    pub leaderboard_size: usize,
    /// Initials submitted with a finished run (at most 3 characters)
    pub player_name: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,

            leaderboard_size: 10,
            player_name: "AAA".to_string(),
        }
    }
}

impl Settings {
    /// Effective leaderboard size (at least one row)
    pub fn leaderboard_rows(&self) -> usize {
        self.leaderboard_size.max(1)
    }

    /// Parse settings from JSON, falling back to defaults on bad input
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str(json) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Ignoring invalid settings: {e}");
                Self::default()
            }
        }
    }

    /// Load settings from the file named by `SPACE_JOURNEY_SETTINGS`, if any
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        let Ok(path) = std::env::var("SPACE_JOURNEY_SETTINGS") else {
            log::info!("Using default settings");
            return Self::default();
        };
        match std::fs::read_to_string(&path) {
            Ok(json) => {
                log::info!("Loaded settings from {path}");
                Self::from_json(&json)
            }
            Err(e) => {
                log::warn!("Could not read settings {path}: {e}");
                Self::default()
            }
        }
    }

    /// Browser hosts pass settings in through `from_json`
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        Self::default()
    }
}
