//! Error types for game module
//!
//! Invalid user input (a click on an unreachable square, input while the
//! board is busy) is not represented here: those are logged no-ops. These
//! variants cover programmer-facing failures and registry/engine desync.

use super::types::Position;

/// Errors that can occur in game logic
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    /// The rules engine refused the move
    #[error("Invalid move: {from} -> {to}")]
    InvalidMove { from: Position, to: Position },

    /// A promoting move was submitted without a piece choice
    #[error("Move {from} -> {to} requires a promotion choice")]
    ChoiceRequired { from: Position, to: Position },

    /// The registry no longer matches the rules engine
    #[error("Registry out of sync: no piece registered at {position}")]
    RegistryDesync { position: Position },

    /// Malformed FEN string
    #[error("Invalid FEN: {message}")]
    Fen { message: String },

    /// Unparseable square notation
    #[error("Unknown square: {notation}")]
    UnknownSquare { notation: String },
}

/// Result type alias for game operations
pub type GameResult<T> = Result<T, GameError>;
