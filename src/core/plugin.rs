//! Core plugin
//!
//! Sets up settings: resolves where they live, loads them before anything
//! else starts, and writes them back whenever they change.
//!
//! # Plugin Order
//!
//! Recommended plugin order:
//! 1. [`bevy::DefaultPlugins`] - Core Bevy functionality
//! 2. [`bevy_egui::EguiPlugin`] - UI framework
//! 3. [`CorePlugin`] - Settings
//! 4. [`crate::game::ChessHandPlugin`] - Board, session, audio and UI
//!
//! Insert a [`SettingsLocation`] before adding this plugin to override the
//! default settings path.

use bevy::prelude::*;

use super::settings_persistence::{load_settings_system, save_settings_system, SettingsLocation};

pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SettingsLocation>()
            .add_systems(PreStartup, load_settings_system)
            .add_systems(Update, save_settings_system);
    }
}
