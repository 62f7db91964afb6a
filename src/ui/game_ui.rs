//! In-game status bar
//!
//! A single top bar with the session's status line ("White's Turn",
//! "Checkmate! Black wins!", "Draw!") and a Reset button. The session writes
//! the text through [`PanelState`], its [`UiSurface`]; this module only reads
//! it back.

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use crate::game::collaborators::UiSurface;
use crate::game::plugin::Table;
use crate::game::status::GameStatus;
use crate::game::types::Side;
use crate::ui::styles::*;

/// [`UiSurface`] implementation read by the egui systems
#[derive(Debug, Clone, Default)]
pub struct PanelState {
    status: String,
    prompt: Option<Side>,
}

impl PanelState {
    pub fn status(&self) -> &str {
        &self.status
    }

    /// Side choosing a promotion piece, if the dialog is open
    pub fn prompt(&self) -> Option<Side> {
        self.prompt
    }
}

impl UiSurface for PanelState {
    fn show_promotion_prompt(&mut self, side: Side) {
        info!("[PROMOTION] Waiting for {} to choose a piece", side);
        self.prompt = Some(side);
    }

    fn hide_promotion_prompt(&mut self) {
        self.prompt = None;
    }

    fn set_status(&mut self, text: &str) {
        self.status = text.to_string();
    }
}

/// Sent by the Reset button
#[derive(Message, Debug, Clone, Copy, Default)]
pub struct ResetRequested;

fn status_color(status: GameStatus) -> egui::Color32 {
    match status {
        GameStatus::Turn(Side::White) => UiColors::TEXT_PRIMARY,
        GameStatus::Turn(Side::Black) => UiColors::TEXT_SECONDARY,
        GameStatus::Checkmate { .. } => UiColors::ACCENT_GOLD,
        GameStatus::Draw => UiColors::WARNING,
    }
}

/// System to display the status bar
///
/// Runs in `EguiPrimaryContextPass`.
pub fn status_bar_system(
    mut contexts: EguiContexts,
    table: Res<Table>,
    mut reset: MessageWriter<ResetRequested>,
) {
    let Ok(ctx) = contexts.ctx_mut() else {
        return;
    };

    egui::TopBottomPanel::top("status_bar")
        .resizable(false)
        .frame(
            egui::Frame::default()
                .fill(UiColors::BG_DARK)
                .inner_margin(8.0)
                .stroke(egui::Stroke::new(1.0, UiColors::BORDER)),
        )
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.add_space(10.0);
                ui.colored_label(
                    status_color(table.status()),
                    egui::RichText::new(table.ui().status()).size(18.0).strong(),
                );

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.add_space(10.0);
                    let button = egui::Button::new(
                        egui::RichText::new("Reset").color(UiColors::TEXT_PRIMARY),
                    )
                    .fill(UiColors::BG_LIGHT);
                    if ui.add(button).clicked() {
                        info!("[UI] Reset requested");
                        reset.write(ResetRequested);
                    }
                });
            });
        });
}
