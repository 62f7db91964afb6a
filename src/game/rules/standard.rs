//! Standard chess as a [`RulesEngine`]
//!
//! Authoritative for move legality, turn order and game-end detection. The
//! interaction layer never inspects the board directly; it only sees
//! [`LegalMove`]s, [`CommittedMove`]s and [`Occupant`]s.

use tracing::{debug, info};

use super::board_state::{BoardState, RepetitionKey};
use super::piece_moves::{all_legal_moves, legal_moves_from, play, Candidate};
use super::{fen, CommittedMove, IllegalMove, LegalMove, MoveRequest, Occupant, RulesEngine};
use crate::game::error::GameResult;
use crate::game::types::{Position, Side};

/// Half-moves without pawn move or capture before the game is drawn
const FIFTY_MOVE_LIMIT: u32 = 100;

/// Standard chess rules engine
#[derive(Debug, Clone)]
pub struct StandardRules {
    board: BoardState,
    /// Positions seen since the last irreversible move, for repetition
    history: Vec<RepetitionKey>,
}

impl Default for StandardRules {
    fn default() -> Self {
        StandardRules::new()
    }
}

impl StandardRules {
    /// Engine at the standard starting position
    pub fn new() -> Self {
        StandardRules::from_board(BoardState::starting())
    }

    /// Engine at an arbitrary FEN position
    pub fn from_fen(fen: &str) -> GameResult<Self> {
        Ok(StandardRules::from_board(fen::parse(fen)?))
    }

    fn from_board(board: BoardState) -> Self {
        let history = vec![board.repetition_key()];
        StandardRules { board, history }
    }

    pub fn board(&self) -> &BoardState {
        &self.board
    }

    pub fn fen(&self) -> String {
        fen::format(&self.board)
    }

    pub fn is_check(&self) -> bool {
        self.board.in_check(self.board.turn)
    }

    pub fn is_stalemate(&self) -> bool {
        !self.is_check() && all_legal_moves(&self.board).is_empty()
    }

    pub fn is_threefold_repetition(&self) -> bool {
        let current = self.board.repetition_key();
        self.history.iter().filter(|key| **key == current).count() >= 3
    }

    fn to_legal_move(candidate: &Candidate) -> LegalMove {
        LegalMove {
            from: candidate.from,
            to: candidate.to,
            captures_at: candidate.captures_at,
            requires_choice: candidate.promotes,
        }
    }
}

impl RulesEngine for StandardRules {
    fn current_turn(&self) -> Side {
        self.board.turn
    }

    fn legal_moves(&self, from: Option<Position>) -> Vec<LegalMove> {
        let candidates = match from {
            Some(origin) => legal_moves_from(&self.board, origin),
            None => all_legal_moves(&self.board),
        };
        candidates.iter().map(StandardRules::to_legal_move).collect()
    }

    fn apply_move(&mut self, request: MoveRequest) -> Result<CommittedMove, IllegalMove> {
        let MoveRequest { from, to, choice } = request;

        let candidate = legal_moves_from(&self.board, from)
            .into_iter()
            .find(|candidate| candidate.to == to)
            .ok_or(IllegalMove::NotLegal { from, to })?;

        // A promotion is only ever applied with an explicit piece choice
        let promotion_kind = if candidate.promotes {
            Some(choice.ok_or(IllegalMove::ChoiceRequired { from, to })?.kind())
        } else {
            None
        };

        let Some(mover) = self.board.piece_at(from) else {
            return Err(IllegalMove::NotLegal { from, to });
        };
        let captured_kind = candidate
            .captures_at
            .and_then(|square| self.board.piece_at(square))
            .map(|victim| victim.kind);

        let next = play(&self.board, &candidate, promotion_kind);
        if next.halfmove_clock == 0 {
            self.history.clear();
        }
        self.history.push(next.repetition_key());
        self.board = next;

        let committed = CommittedMove {
            from,
            to,
            side: mover.side,
            kind: mover.kind,
            captured_kind,
            captured_at: candidate.captures_at,
            promotion_kind,
            is_capture: candidate.captures_at.is_some(),
            is_promotion: promotion_kind.is_some(),
            rook_transfer: candidate.rook_transfer(),
        };
        debug!("[RULES] {} -> {} committed, position {}", from, to, self.fen());
        Ok(committed)
    }

    fn is_checkmate(&self) -> bool {
        self.is_check() && all_legal_moves(&self.board).is_empty()
    }

    fn is_draw(&self) -> bool {
        self.is_stalemate()
            || self.board.has_insufficient_material()
            || self.board.halfmove_clock >= FIFTY_MOVE_LIMIT
            || self.is_threefold_repetition()
    }

    fn occupants(&self) -> Vec<Occupant> {
        self.board
            .occupied()
            .map(|(position, piece)| Occupant {
                position,
                kind: piece.kind,
                side: piece.side,
            })
            .collect()
    }

    fn reset(&mut self) {
        *self = StandardRules::new();
        info!("[RULES] Reset to starting position");
    }
}
