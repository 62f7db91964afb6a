//! Game status derived from the rules engine after each move

use std::fmt;

use super::rules::RulesEngine;
use super::types::Side;

/// What the status line shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    /// Game continues with this side to move
    Turn(Side),
    Checkmate { winner: Side },
    Draw,
}

impl GameStatus {
    /// Read the current status; the side to move in a checkmate is the loser
    pub fn of(rules: &impl RulesEngine) -> Self {
        let turn = rules.current_turn();
        if rules.is_checkmate() {
            GameStatus::Checkmate {
                winner: turn.opponent(),
            }
        } else if rules.is_draw() {
            GameStatus::Draw
        } else {
            GameStatus::Turn(turn)
        }
    }

    pub fn is_over(&self) -> bool {
        !matches!(self, GameStatus::Turn(_))
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameStatus::Turn(side) => write!(f, "{side}'s Turn"),
            GameStatus::Checkmate { winner } => write!(f, "Checkmate! {winner} wins!"),
            GameStatus::Draw => f.write_str("Draw!"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_text() {
        assert_eq!(GameStatus::Turn(Side::White).to_string(), "White's Turn");
        assert_eq!(GameStatus::Turn(Side::Black).to_string(), "Black's Turn");
        assert_eq!(
            GameStatus::Checkmate { winner: Side::Black }.to_string(),
            "Checkmate! Black wins!"
        );
        assert_eq!(GameStatus::Draw.to_string(), "Draw!");
    }

    #[test]
    fn test_only_turn_is_in_progress() {
        assert!(!GameStatus::Turn(Side::White).is_over());
        assert!(GameStatus::Draw.is_over());
    }
}
