//! Game settings and preferences
//!
//! Stored as a JSON file next to the leaderboard. A missing or unreadable
//! file never stops the game; defaults take over.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,
    pub muted: bool,

    // === Player ===
    /// Name sessions are recorded under
    pub username: String,
    /// Leaderboard file; platform data dir when unset
    pub leaderboard_path: Option<PathBuf>,

    /// Game balance
    pub tuning: Tuning,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            master_volume: 0.8,
            music_volume: 0.7,
            muted: false,
            username: String::from("player"),
            leaderboard_path: None,
            tuning: Tuning::default(),
        }
    }
}

impl Settings {
    /// `<config_dir>/lasso-catch/settings.json`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("lasso-catch").join("settings.json"))
    }

    /// Load settings from `path`, falling back to defaults
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            log::info!("No settings at {:?}, using defaults", path);
            return Self::default();
        }

        match fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str::<Settings>(&json) {
                Ok(mut settings) => {
                    settings.tuning = settings.tuning.sanitized();
                    log::info!("Loaded settings from {:?}", path);
                    settings
                }
                Err(e) => {
                    log::warn!("Failed to parse settings: {}", e);
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("Failed to read settings file: {}", e);
                Self::default()
            }
        }
    }

    /// Save settings to `path`. Failures are logged, not returned.
    pub fn save_to(&self, path: &Path) {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && let Err(e) = fs::create_dir_all(parent)
        {
            log::warn!("Failed to create settings directory: {}", e);
            return;
        }

        match serde_json::to_string_pretty(self) {
            Ok(json) => match fs::write(path, json) {
                Ok(()) => log::info!("Settings saved to {:?}", path),
                Err(e) => log::warn!("Failed to write settings: {}", e),
            },
            Err(e) => log::warn!("Failed to serialize settings: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::DeliveryMode;

    fn scratch(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("lasso-catch-settings-{}-{}", std::process::id(), name))
            .join("settings.json")
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let settings = Settings::load_from(&scratch("missing"));
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_save_then_load() {
        let path = scratch("save");
        let mut settings = Settings::default();
        settings.username = String::from("zidan");
        settings.muted = true;
        settings.tuning.delivery = DeliveryMode::Guaranteed;
        settings.save_to(&path);

        let loaded = Settings::load_from(&path);
        assert_eq!(loaded, settings);
        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let path = scratch("partial");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, r#"{ "username": "ada", "tuning": { "max_balls": 4 } }"#).unwrap();

        let loaded = Settings::load_from(&path);
        assert_eq!(loaded.username, "ada");
        assert_eq!(loaded.tuning.max_balls, 4);
        assert_eq!(loaded.master_volume, 0.8);
        assert_eq!(loaded.tuning.spawn_interval_ms, Tuning::default().spawn_interval_ms);
        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_garbage_file_gives_defaults() {
        let path = scratch("garbage");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "volume = loud").unwrap();
        assert_eq!(Settings::load_from(&path), Settings::default());
        let _ = fs::remove_dir_all(path.parent().unwrap());
    }
}
