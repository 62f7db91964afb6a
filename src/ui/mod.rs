//! UI module - Egui-based overlays
//!
//! - **game_ui**: Status bar with the turn / result line and a Reset button
//! - **promotion_ui**: Modal piece picker shown while a promotion is pending
//!
//! Both systems run in `EguiPrimaryContextPass` and read the session through
//! the [`Table`](crate::game::plugin::Table) resource.

pub mod game_ui;
pub mod promotion_ui;
pub mod styles;

pub use game_ui::{status_bar_system, PanelState, ResetRequested};
pub use promotion_ui::promotion_ui_system;
