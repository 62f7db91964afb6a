//! Chess rules module - Pure game logic without ECS coupling
//!
//! The interaction layer only ever talks to the [`RulesEngine`] trait: it asks
//! whose turn it is, which moves are legal, and submits moves transactionally.
//! [`StandardRules`] is the bundled implementation of standard chess.
//!
//! # Module Structure
//!
//! - `board_state` - Mailbox board, castling rights, attack queries
//! - `piece_moves` - Move generation for each piece kind and move application
//! - `fen` - FEN import/export for setting up positions
//! - `standard` - [`StandardRules`], legality filtering and game-end detection

pub mod board_state;
pub mod fen;
pub mod piece_moves;
pub mod standard;

#[cfg(test)]
mod tests;

pub use board_state::{BoardState, CastlingRights, Piece, Wing};
pub use standard::StandardRules;

use super::error::GameError;
use super::types::{PieceKind, Position, PromotionChoice, Side};

/// A legal move as reported by the rules engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LegalMove {
    pub from: Position,
    pub to: Position,
    /// Square of the piece this move removes; differs from `to` for en passant
    pub captures_at: Option<Position>,
    /// The move is only fully specified once a promotion piece is chosen
    pub requires_choice: bool,
}

impl LegalMove {
    pub fn is_capture(&self) -> bool {
        self.captures_at.is_some()
    }
}

/// A move submitted to the rules engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveRequest {
    pub from: Position,
    pub to: Position,
    pub choice: Option<PromotionChoice>,
}

/// Descriptor of a move the rules engine has committed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommittedMove {
    pub from: Position,
    pub to: Position,
    pub side: Side,
    /// Kind of the moving piece before any promotion
    pub kind: PieceKind,
    pub captured_kind: Option<PieceKind>,
    pub captured_at: Option<Position>,
    pub promotion_kind: Option<PieceKind>,
    pub is_capture: bool,
    pub is_promotion: bool,
    /// Rook relocation that accompanies a castling move
    pub rook_transfer: Option<(Position, Position)>,
}

/// An occupied square, used to populate the entity registry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Occupant {
    pub position: Position,
    pub kind: PieceKind,
    pub side: Side,
}

/// Reasons the rules engine refuses a move
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum IllegalMove {
    #[error("no legal move from {from} to {to}")]
    NotLegal { from: Position, to: Position },

    #[error("move from {from} to {to} needs a promotion choice")]
    ChoiceRequired { from: Position, to: Position },
}

impl From<IllegalMove> for GameError {
    fn from(err: IllegalMove) -> Self {
        match err {
            IllegalMove::NotLegal { from, to } => GameError::InvalidMove { from, to },
            IllegalMove::ChoiceRequired { from, to } => GameError::ChoiceRequired { from, to },
        }
    }
}

/// Authoritative game rules consulted by the interaction layer
pub trait RulesEngine {
    /// Side to move
    fn current_turn(&self) -> Side;

    /// Legal moves for the side to move, optionally restricted to one origin
    fn legal_moves(&self, from: Option<Position>) -> Vec<LegalMove>;

    /// Apply a move; on success the engine has already advanced
    fn apply_move(&mut self, request: MoveRequest) -> Result<CommittedMove, IllegalMove>;

    fn is_checkmate(&self) -> bool;

    fn is_draw(&self) -> bool;

    /// Every occupied square of the current position
    fn occupants(&self) -> Vec<Occupant>;

    /// Return to the standard starting position
    fn reset(&mut self);
}
