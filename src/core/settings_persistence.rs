//! Settings persistence system
//!
//! Saves and loads [`GameSettings`] to/from a JSON file so preferences
//! survive between sessions.
//!
//! # File Location
//!
//! By default settings live in `settings.json` inside the platform config
//! directory (via `directories::ProjectDirs`), falling back to the working
//! directory. `--settings <path>` overrides the location.
//!
//! # Error Handling
//!
//! - Load failures fall back to default settings with a warning
//! - Save failures are logged but don't interrupt gameplay

use std::fs;
use std::path::{Path, PathBuf};

use bevy::prelude::*;
use directories::ProjectDirs;

use super::error::{CoreError, CoreResult};
use super::GameSettings;

/// Settings filename
const SETTINGS_FILENAME: &str = "settings.json";

/// Where settings are read from and written to
#[derive(Resource, Debug, Clone, PartialEq, Eq)]
pub struct SettingsLocation(pub PathBuf);

impl Default for SettingsLocation {
    fn default() -> Self {
        SettingsLocation(default_settings_path())
    }
}

/// Path to `settings.json` in the user's configuration directory
///
/// E.g. `~/.config/chesshand/settings.json`. Falls back to a local
/// `settings.json` if the system config dir cannot be found.
pub fn default_settings_path() -> PathBuf {
    if let Some(proj_dirs) = ProjectDirs::from("com", "trilltino", "ChessHand") {
        proj_dirs.config_dir().join(SETTINGS_FILENAME)
    } else {
        PathBuf::from(SETTINGS_FILENAME)
    }
}

/// Read settings from `path`
pub fn load_settings(path: &Path) -> CoreResult<GameSettings> {
    if !path.exists() {
        return Err(CoreError::SettingsMissing {
            path: path.to_path_buf(),
        });
    }
    let contents = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}

/// Read settings from `path`, using defaults when that fails
pub fn load_or_default(path: &Path) -> GameSettings {
    match load_settings(path) {
        Ok(settings) => {
            info!("[SETTINGS] Loaded settings from {:?}", path);
            settings
        }
        Err(CoreError::SettingsMissing { .. }) => {
            info!("[SETTINGS] No settings file found at {:?}. Using defaults.", path);
            GameSettings::default()
        }
        Err(e) => {
            warn!("[SETTINGS] {} ({:?}). Using defaults.", e, path);
            GameSettings::default()
        }
    }
}

/// Write settings to `path`, creating the directory if needed
pub fn save_settings(path: &Path, settings: &GameSettings) -> CoreResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }
    let json = serde_json::to_string_pretty(settings)?;
    fs::write(path, json)?;
    Ok(())
}

/// Load settings on startup
///
/// Runs in `PreStartup` so the settings resource exists before the board
/// and session are built.
pub fn load_settings_system(mut commands: Commands, location: Res<SettingsLocation>) {
    commands.insert_resource(load_or_default(&location.0));
}

/// Save settings whenever they change after startup
pub fn save_settings_system(settings: Res<GameSettings>, location: Res<SettingsLocation>) {
    if !settings.is_changed() || settings.is_added() {
        return;
    }

    match save_settings(&location.0, &settings) {
        Ok(()) => info!("[SETTINGS] Saved settings to {:?}", location.0),
        Err(e) => error!("[SETTINGS] Failed to save settings to {:?}: {}", location.0, e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("chess-hand-{}-{}", name, std::process::id()))
            .join(SETTINGS_FILENAME)
    }

    #[test]
    fn test_save_then_load() {
        let path = scratch_path("roundtrip");
        let settings = GameSettings {
            master_volume: 0.3,
            ..default()
        };
        save_settings(&path, &settings).unwrap();
        assert_eq!(load_settings(&path).unwrap(), settings);
        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_missing_file_falls_back() {
        let path = scratch_path("missing");
        assert!(matches!(load_settings(&path), Err(CoreError::SettingsMissing { .. })));
        assert_eq!(load_or_default(&path), GameSettings::default());
    }

    #[test]
    fn test_corrupt_file_falls_back() {
        let path = scratch_path("corrupt");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "{ not json").unwrap();
        assert!(matches!(load_settings(&path), Err(CoreError::SettingsSerialization(_))));
        assert_eq!(load_or_default(&path), GameSettings::default());
        let _ = fs::remove_dir_all(path.parent().unwrap());
    }
}
