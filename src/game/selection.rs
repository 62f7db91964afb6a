//! Selection & targeting
//!
//! Tracks the selected piece and decides what a click on a piece means:
//! select it, deselect it, switch to it, or aim the current selection at it.
//! Also paints the legal destinations of a selection through the scene.

use tracing::debug;

use super::collaborators::{HighlightClass, Scene};
use super::registry::EntityRegistry;
use super::rules::RulesEngine;
use super::types::{EntityId, Position, Side};

/// The currently selected entity, if any
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selection {
    selected: Option<EntityId>,
}

impl Selection {
    pub fn current(&self) -> Option<EntityId> {
        self.selected
    }

    pub fn is_selected(&self, id: EntityId) -> bool {
        self.selected == Some(id)
    }

    pub fn set(&mut self, id: EntityId) {
        self.selected = Some(id);
    }

    pub fn clear(&mut self) {
        self.selected = None;
    }
}

/// What a click on a piece asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionIntent {
    /// Make this entity the selection
    Select(EntityId),
    /// The selected entity was clicked again
    Deselect,
    /// An opposing piece was clicked with a selection active
    Target { from: Position, to: Position },
    /// Nothing to do
    Ignore,
}

/// Classify a click on `clicked` given the current selection and turn
pub fn interpret_click(
    selection: &Selection,
    registry: &EntityRegistry,
    turn: Side,
    clicked: EntityId,
) -> SelectionIntent {
    let Some((clicked_at, entity)) = registry.find(clicked) else {
        debug!("[INPUT] Entity {:?} is not on the board", clicked);
        return SelectionIntent::Ignore;
    };

    match selection.current() {
        None if entity.side == turn => SelectionIntent::Select(clicked),
        None => SelectionIntent::Ignore,
        Some(current) if current == clicked => SelectionIntent::Deselect,
        Some(_) if entity.side == turn => SelectionIntent::Select(clicked),
        Some(current) => match registry.position_of(current) {
            Some(from) => SelectionIntent::Target { from, to: clicked_at },
            None => SelectionIntent::Ignore,
        },
    }
}

/// Replace all highlights with the legal destinations from `origin`
///
/// Destinations are painted as captures when the engine reports a victim for
/// them, otherwise as quiet moves. The origin square gets its own class.
pub fn highlight_legal_targets(scene: &mut impl Scene, rules: &impl RulesEngine, origin: Position) {
    scene.clear_highlights();

    let moves = rules.legal_moves(Some(origin));
    for legal in &moves {
        let class = if legal.is_capture() {
            HighlightClass::Capture
        } else {
            HighlightClass::Move
        };
        scene.highlight(legal.to, class);
    }
    scene.highlight(origin, HighlightClass::Source);

    debug!("[INPUT] {} legal destinations from {}", moves.len(), origin);
}
