//! Core module - settings and application infrastructure
//!
//! # Resources
//!
//! - [`GameSettings`] - User preferences (volume, animation timings, palette)
//! - [`SettingsLocation`] - Path of the persisted settings file
//!
//! # Plugin
//!
//! [`CorePlugin`] loads settings in `PreStartup` and saves them on change.
//! The headless runner skips the plugin and calls
//! [`settings_persistence::load_or_default`] directly.

pub mod error;
pub mod plugin;
pub mod resources;
pub mod settings_persistence;

// Re-export commonly used items
pub use error::{CoreError, CoreResult};
pub use plugin::CorePlugin;
pub use resources::*;
pub use settings_persistence::SettingsLocation;
