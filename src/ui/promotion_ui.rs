//! Pawn Promotion UI
//!
//! Displays a dialog while the session waits for a promotion choice. Board
//! clicks are ignored until one of the four pieces is picked; there is no
//! default piece and no way to dismiss the dialog other than Reset.

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use crate::game::plugin::Table;
use crate::game::types::{PromotionChoice, Side};
use crate::ui::styles::*;

const CHOICES: [PromotionChoice; 4] = [
    PromotionChoice::Queen,
    PromotionChoice::Rook,
    PromotionChoice::Bishop,
    PromotionChoice::Knight,
];

fn symbol(choice: PromotionChoice, side: Side) -> &'static str {
    match (side, choice) {
        (Side::White, PromotionChoice::Queen) => "♕",
        (Side::White, PromotionChoice::Rook) => "♖",
        (Side::White, PromotionChoice::Bishop) => "♗",
        (Side::White, PromotionChoice::Knight) => "♘",
        (Side::Black, PromotionChoice::Queen) => "♛",
        (Side::Black, PromotionChoice::Rook) => "♜",
        (Side::Black, PromotionChoice::Bishop) => "♝",
        (Side::Black, PromotionChoice::Knight) => "♞",
    }
}

/// System to display the pawn promotion selection UI
pub fn promotion_ui_system(
    mut contexts: EguiContexts,
    mut table: ResMut<Table>,
    mut exit: MessageWriter<AppExit>,
) {
    let Some(side) = table.ui().prompt() else {
        return;
    };

    let Ok(ctx) = contexts.ctx_mut() else {
        return;
    };

    // Create a modal overlay
    egui::Area::new(egui::Id::new("promotion_overlay"))
        .fixed_pos(egui::pos2(0.0, 0.0))
        .show(ctx, |ui| {
            let screen_rect = ui.ctx().screen_rect();
            ui.painter().rect_filled(
                screen_rect,
                0.0,
                egui::Color32::from_rgba_unmultiplied(0, 0, 0, 180),
            );
        });

    let mut chosen = None;
    egui::Window::new("Promote Pawn")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .frame(
            egui::Frame::default()
                .fill(UiColors::BG_MID)
                .corner_radius(12.0)
                .inner_margin(20.0)
                .stroke(egui::Stroke::new(2.0, UiColors::BORDER)),
        )
        .show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.label(
                    egui::RichText::new("Choose Promotion Piece")
                        .size(20.0)
                        .color(UiColors::TEXT_PRIMARY)
                        .strong(),
                );
                ui.add_space(15.0);

                ui.horizontal(|ui| {
                    for choice in CHOICES {
                        let button = egui::Button::new(
                            egui::RichText::new(symbol(choice, side))
                                .size(48.0)
                                .color(UiColors::TEXT_PRIMARY),
                        )
                        .min_size(egui::vec2(70.0, 70.0))
                        .fill(UiColors::BG_DARK);

                        if ui.add(button).on_hover_text(format!("{:?}", choice)).clicked() {
                            chosen = Some(choice);
                        }
                        ui.add_space(5.0);
                    }
                });
            });
        });

    if let Some(choice) = chosen {
        info!("[PROMOTION] {} chose {:?}", side, choice);
        if let Err(e) = table.resolve_choice(choice) {
            error!("[PROMOTION] {}", e);
            exit.write(AppExit::error());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbols_differ_by_side() {
        for choice in CHOICES {
            assert_ne!(symbol(choice, Side::White), symbol(choice, Side::Black));
        }
    }
}
