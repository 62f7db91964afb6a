//! Integration tests for settings in a Bevy app
//!
//! Runs [`CorePlugin`] under `MinimalPlugins` against a scratch settings
//! file, verifying the load in `PreStartup` and the save on change.

use std::fs;
use std::path::PathBuf;

use bevy::prelude::*;
use chess_hand::core::settings_persistence::load_settings;
use chess_hand::core::{CorePlugin, GameSettings, SettingsLocation};

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("chess-hand-core-{}-{}", name, std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn app_with_settings(path: PathBuf) -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins);
    app.insert_resource(SettingsLocation(path));
    app.add_plugins(CorePlugin);
    app
}

#[test]
fn test_settings_loaded_before_startup() {
    //! A settings file on disk becomes the `GameSettings` resource on the
    //! first update, with missing fields defaulted

    let dir = scratch_dir("load");
    let path = dir.join("settings.json");
    fs::write(&path, r#"{ "master_volume": 0.2, "animation": { "lift_height": 6.0 } }"#).unwrap();

    let mut app = app_with_settings(path);
    app.update();

    let settings = app.world().resource::<GameSettings>();
    assert_eq!(settings.master_volume, 0.2);
    assert_eq!(settings.animation.lift_height, 6.0);
    assert_eq!(settings.animation.travel_ms, 800);
    let _ = fs::remove_dir_all(dir);
}

#[test]
fn test_missing_settings_use_defaults_and_are_not_written() {
    let dir = scratch_dir("missing");
    let path = dir.join("nested").join("settings.json");

    let mut app = app_with_settings(path.clone());
    app.update();
    app.update();

    assert_eq!(*app.world().resource::<GameSettings>(), GameSettings::default());
    assert!(!path.exists(), "untouched settings are not saved");
    let _ = fs::remove_dir_all(dir);
}

#[test]
fn test_changed_settings_are_saved() {
    //! Editing the resource writes the file, creating its directory

    let dir = scratch_dir("save");
    let path = dir.join("nested").join("settings.json");

    let mut app = app_with_settings(path.clone());
    app.update();

    app.world_mut().resource_mut::<GameSettings>().master_volume = 0.4;
    app.update();

    let saved = load_settings(&path).expect("settings written");
    assert_eq!(saved.master_volume, 0.4);
    let _ = fs::remove_dir_all(dir);
}
