//! Move resolver
//!
//! Turns a `(from, to)` pair into one of three outcomes before anything is
//! mutated: not legal, legal but waiting on a promotion choice, or a single
//! fully specified move. Only the last one may be submitted without a choice,
//! so a real promotion can never pick up a default piece by accident.

use tracing::debug;

use super::rules::{CommittedMove, IllegalMove, LegalMove, MoveRequest, RulesEngine};
use super::types::{Position, PromotionChoice};

/// Classification of a move attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// No legal move connects the two squares
    Invalid,
    /// Legal, but the move is only complete once a promotion piece is chosen
    NeedsChoice { from: Position, to: Position },
    /// Exactly one fully specified legal move
    Unambiguous(LegalMove),
}

/// A promotion waiting on the player's choice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingPromotion {
    pub from: Position,
    pub to: Position,
}

pub fn resolve(rules: &impl RulesEngine, from: Position, to: Position) -> Resolution {
    let found = rules
        .legal_moves(Some(from))
        .into_iter()
        .find(|legal| legal.to == to);

    match found {
        None => Resolution::Invalid,
        Some(legal) if legal.requires_choice => Resolution::NeedsChoice { from, to },
        Some(legal) => Resolution::Unambiguous(legal),
    }
}

/// Submit a move that carries no choice
pub fn submit(rules: &mut impl RulesEngine, legal: LegalMove) -> Result<CommittedMove, IllegalMove> {
    debug!("[MOVE] Submitting {} -> {}", legal.from, legal.to);
    rules.apply_move(MoveRequest {
        from: legal.from,
        to: legal.to,
        choice: None,
    })
}

/// Submit a pending promotion with the player's choice
pub fn submit_choice(
    rules: &mut impl RulesEngine,
    pending: PendingPromotion,
    choice: PromotionChoice,
) -> Result<CommittedMove, IllegalMove> {
    debug!("[PROMOTION] Submitting {} -> {} as {:?}", pending.from, pending.to, choice);
    rules.apply_move(MoveRequest {
        from: pending.from,
        to: pending.to,
        choice: Some(choice),
    })
}
