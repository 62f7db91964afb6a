//! Chess piece movement rules
//!
//! Pseudo-legal generation for each piece kind plus [`play`], which produces
//! the successor board. Pure functions with no side effects.

use super::board_state::{BoardState, Piece, Wing, DIAGONAL, KNIGHT_JUMPS, ORTHOGONAL};
use crate::game::types::{PieceKind, Position, Side};

/// A move a piece could make, before king safety is checked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate {
    pub from: Position,
    pub to: Position,
    pub captures_at: Option<Position>,
    pub promotes: bool,
    pub castle: Option<Wing>,
    pub double_push: bool,
}

impl Candidate {
    fn quiet(from: Position, to: Position) -> Self {
        Candidate {
            from,
            to,
            captures_at: None,
            promotes: false,
            castle: None,
            double_push: false,
        }
    }

    /// Rook squares for a castling candidate
    pub fn rook_transfer(&self) -> Option<(Position, Position)> {
        let wing = self.castle?;
        let (rook_from, rook_to) = wing.rook_files();
        let rank = self.from.rank.index();
        Some((Position::new(rook_from, rank)?, Position::new(rook_to, rank)?))
    }
}

/// Moves for the piece on `from`, ignoring whether the mover's king is left in check
pub fn pseudo_legal_moves(board: &BoardState, from: Position) -> Vec<Candidate> {
    let Some(piece) = board.piece_at(from) else {
        return Vec::new();
    };

    let mut moves = Vec::new();
    match piece.kind {
        PieceKind::Pawn => pawn_moves(board, from, piece.side, &mut moves),
        PieceKind::Knight => step_moves(board, from, piece.side, &KNIGHT_JUMPS, &mut moves),
        PieceKind::Bishop => slider_moves(board, from, piece.side, &DIAGONAL, &mut moves),
        PieceKind::Rook => slider_moves(board, from, piece.side, &ORTHOGONAL, &mut moves),
        PieceKind::Queen => {
            slider_moves(board, from, piece.side, &ORTHOGONAL, &mut moves);
            slider_moves(board, from, piece.side, &DIAGONAL, &mut moves);
        }
        PieceKind::King => {
            let around: Vec<(i8, i8)> = ORTHOGONAL.iter().chain(DIAGONAL.iter()).copied().collect();
            step_moves(board, from, piece.side, &around, &mut moves);
            castle_moves(board, from, piece.side, &mut moves);
        }
    }
    moves
}

/// Pseudo-legal moves filtered so the mover's king is never left attacked
pub fn legal_moves_from(board: &BoardState, from: Position) -> Vec<Candidate> {
    let Some(piece) = board.piece_at(from) else {
        return Vec::new();
    };
    if piece.side != board.turn {
        return Vec::new();
    }

    pseudo_legal_moves(board, from)
        .into_iter()
        .filter(|candidate| {
            // Promotion kind does not affect king safety
            let next = play(board, candidate, Some(PieceKind::Queen));
            !next.in_check(piece.side)
        })
        .collect()
}

/// Every legal move for the side to move
pub fn all_legal_moves(board: &BoardState) -> Vec<Candidate> {
    board
        .occupied()
        .filter(|(_, piece)| piece.side == board.turn)
        .flat_map(|(from, _)| legal_moves_from(board, from))
        .collect()
}

fn pawn_moves(board: &BoardState, from: Position, side: Side, moves: &mut Vec<Candidate>) {
    let forward = side.forward();
    let last_rank = side.opponent().home_rank();
    let start_rank = match side {
        Side::White => 1,
        Side::Black => 6,
    };

    if let Some(one) = from.offset(0, forward) {
        if board.is_empty(one) {
            moves.push(Candidate {
                promotes: one.rank.index() == last_rank,
                ..Candidate::quiet(from, one)
            });

            if from.rank.index() == start_rank {
                if let Some(two) = from.offset(0, 2 * forward) {
                    if board.is_empty(two) {
                        moves.push(Candidate {
                            double_push: true,
                            ..Candidate::quiet(from, two)
                        });
                    }
                }
            }
        }
    }

    for file_delta in [-1, 1] {
        let Some(target) = from.offset(file_delta, forward) else {
            continue;
        };
        match board.piece_at(target) {
            Some(victim) if victim.side != side => moves.push(Candidate {
                captures_at: Some(target),
                promotes: target.rank.index() == last_rank,
                ..Candidate::quiet(from, target)
            }),
            None if board.en_passant == Some(target) => {
                // The captured pawn sits beside the mover, not on the target
                if let Some(victim) = target.offset(0, -forward) {
                    moves.push(Candidate {
                        captures_at: Some(victim),
                        ..Candidate::quiet(from, target)
                    });
                }
            }
            _ => {}
        }
    }
}

fn step_moves(
    board: &BoardState,
    from: Position,
    side: Side,
    deltas: &[(i8, i8)],
    moves: &mut Vec<Candidate>,
) {
    for &(df, dr) in deltas {
        let Some(target) = from.offset(df, dr) else {
            continue;
        };
        match board.piece_at(target) {
            None => moves.push(Candidate::quiet(from, target)),
            Some(other) if other.side != side => moves.push(Candidate {
                captures_at: Some(target),
                ..Candidate::quiet(from, target)
            }),
            Some(_) => {}
        }
    }
}

fn slider_moves(
    board: &BoardState,
    from: Position,
    side: Side,
    directions: &[(i8, i8)],
    moves: &mut Vec<Candidate>,
) {
    for &(df, dr) in directions {
        let mut cursor = from;
        while let Some(target) = cursor.offset(df, dr) {
            match board.piece_at(target) {
                None => moves.push(Candidate::quiet(from, target)),
                Some(other) => {
                    if other.side != side {
                        moves.push(Candidate {
                            captures_at: Some(target),
                            ..Candidate::quiet(from, target)
                        });
                    }
                    break;
                }
            }
            cursor = target;
        }
    }
}

fn castle_moves(board: &BoardState, from: Position, side: Side, moves: &mut Vec<Candidate>) {
    let home = side.home_rank();
    if from.rank.index() != home || from.file.index() != 4 {
        return;
    }
    if board.in_check(side) {
        return;
    }

    for wing in [Wing::King, Wing::Queen] {
        if !board.castling.allows(side, wing) {
            continue;
        }
        let (rook_file, _) = wing.rook_files();
        let rook_square = Position::new(rook_file, home);
        if rook_square.and_then(|sq| board.piece_at(sq)) != Some(Piece::new(PieceKind::Rook, side)) {
            continue;
        }

        // Every square strictly between king and rook must be empty
        let (low, high) = if rook_file < 4 { (rook_file + 1, 4) } else { (5, rook_file) };
        let path_clear = (low..high)
            .filter_map(|file| Position::new(file, home))
            .all(|sq| board.is_empty(sq));
        if !path_clear {
            continue;
        }

        // The king may not pass through or land on an attacked square
        let king_target = wing.king_target_file();
        let step: i8 = if king_target > 4 { 1 } else { -1 };
        let passes_safely = (1..=2)
            .filter_map(|n| from.offset(step * n, 0))
            .all(|sq| !board.is_attacked(sq, side.opponent()));
        if !passes_safely {
            continue;
        }

        if let Some(to) = Position::new(king_target, home) {
            moves.push(Candidate {
                castle: Some(wing),
                ..Candidate::quiet(from, to)
            });
        }
    }
}

/// Successor board after `candidate`; `promotion` is used only when the move promotes
pub fn play(board: &BoardState, candidate: &Candidate, promotion: Option<PieceKind>) -> BoardState {
    let mut next = board.clone();
    let Some(mover) = board.piece_at(candidate.from) else {
        return next;
    };

    let captured = candidate.captures_at.and_then(|sq| board.piece_at(sq));
    if let Some(victim_square) = candidate.captures_at {
        next.set(victim_square, None);
    }

    let placed = match (candidate.promotes, promotion) {
        (true, Some(kind)) => Piece::new(kind, mover.side),
        _ => mover,
    };
    next.set(candidate.from, None);
    next.set(candidate.to, Some(placed));

    if let Some((rook_from, rook_to)) = candidate.rook_transfer() {
        let rook = next.piece_at(rook_from);
        next.set(rook_from, None);
        next.set(rook_to, rook);
    }

    if mover.kind == PieceKind::King {
        next.castling.revoke_side(mover.side);
    }
    next.castling.revoke_corner(candidate.from);
    next.castling.revoke_corner(candidate.to);

    next.en_passant = if candidate.double_push {
        candidate.from.offset(0, mover.side.forward())
    } else {
        None
    };

    if mover.kind == PieceKind::Pawn || captured.is_some() {
        next.halfmove_clock = 0;
    } else {
        next.halfmove_clock += 1;
    }
    if mover.side == Side::Black {
        next.fullmove_number += 1;
    }
    next.turn = mover.side.opponent();
    next
}
