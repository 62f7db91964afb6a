//! Color palette for the table UI
//!
//! Dark panels with a gold accent for game-over text. Colors are
//! `egui::Color32` for direct use in UI code.

use bevy_egui::egui;

/// Primary UI color palette
pub struct UiColors;

impl UiColors {
    // === Background Colors ===

    /// Status bar background
    pub const BG_DARK: egui::Color32 = egui::Color32::from_rgb(20, 20, 25);

    /// Dialog background
    pub const BG_MID: egui::Color32 = egui::Color32::from_rgb(30, 30, 35);

    /// Buttons
    pub const BG_LIGHT: egui::Color32 = egui::Color32::from_rgb(40, 40, 45);

    // === Accent Colors ===

    /// Checkmate text
    pub const ACCENT_GOLD: egui::Color32 = egui::Color32::from_rgb(218, 165, 32);

    /// Draw text
    pub const WARNING: egui::Color32 = egui::Color32::from_rgb(255, 150, 0);

    // === Text Colors ===

    /// White to move, headings
    pub const TEXT_PRIMARY: egui::Color32 = egui::Color32::from_rgb(240, 240, 245);

    /// Black to move
    pub const TEXT_SECONDARY: egui::Color32 = egui::Color32::from_rgb(200, 200, 205);

    pub const BORDER: egui::Color32 = egui::Color32::from_rgb(60, 60, 65);
}
