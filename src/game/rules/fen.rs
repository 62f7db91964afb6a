//! FEN import/export
//!
//! Used to set up scenario positions (tests, the headless runner) and to log
//! the engine's position after a move.

use super::board_state::{BoardState, Piece, Wing};
use crate::game::error::{GameError, GameResult};
use crate::game::types::{PieceKind, Position, Side};

fn fen_error(message: impl Into<String>) -> GameError {
    GameError::Fen {
        message: message.into(),
    }
}

/// Parse a FEN string; the two clock fields are optional
pub fn parse(fen: &str) -> GameResult<BoardState> {
    let mut fields = fen.split_whitespace();
    let placement = fields.next().ok_or_else(|| fen_error("empty string"))?;

    let mut board = BoardState::empty();
    let rows: Vec<&str> = placement.split('/').collect();
    if rows.len() != 8 {
        return Err(fen_error(format!("expected 8 ranks, found {}", rows.len())));
    }

    for (row_index, row) in rows.iter().enumerate() {
        let rank = 7 - row_index as u8;
        let mut file = 0u8;
        for c in row.chars() {
            if let Some(skip) = c.to_digit(10) {
                file = match u8::try_from(skip) {
                    Ok(skip @ 1..=8) => file
                        .checked_add(skip)
                        .filter(|&f| f <= 8)
                        .ok_or_else(|| fen_error(format!("rank {} overflows", rank + 1)))?,
                    _ => return Err(fen_error(format!("bad empty-square count '{c}'"))),
                };
                continue;
            }
            let kind = PieceKind::from_letter(c)
                .ok_or_else(|| fen_error(format!("unknown piece '{c}'")))?;
            let side = if c.is_ascii_uppercase() { Side::White } else { Side::Black };
            let position = Position::new(file, rank)
                .ok_or_else(|| fen_error(format!("rank {} overflows", rank + 1)))?;
            board.set(position, Some(Piece::new(kind, side)));
            file += 1;
        }
        if file != 8 {
            return Err(fen_error(format!("rank {} has {} files", rank + 1, file)));
        }
    }

    board.turn = match fields.next().unwrap_or("w") {
        "w" => Side::White,
        "b" => Side::Black,
        other => return Err(fen_error(format!("bad side to move '{other}'"))),
    };

    for c in fields.next().unwrap_or("-").chars() {
        match c {
            'K' => board.castling.grant(Side::White, Wing::King),
            'Q' => board.castling.grant(Side::White, Wing::Queen),
            'k' => board.castling.grant(Side::Black, Wing::King),
            'q' => board.castling.grant(Side::Black, Wing::Queen),
            '-' => {}
            other => return Err(fen_error(format!("bad castling flag '{other}'"))),
        }
    }

    board.en_passant = match fields.next().unwrap_or("-") {
        "-" => None,
        square => Some(
            Position::from_name(square)
                .ok_or_else(|| fen_error(format!("bad en passant square '{square}'")))?,
        ),
    };

    if let Some(halfmove) = fields.next() {
        board.halfmove_clock = halfmove
            .parse()
            .map_err(|_| fen_error(format!("bad halfmove clock '{halfmove}'")))?;
    }
    if let Some(fullmove) = fields.next() {
        board.fullmove_number = fullmove
            .parse()
            .map_err(|_| fen_error(format!("bad fullmove number '{fullmove}'")))?;
    }

    Ok(board)
}

/// Serialize a board to FEN
pub fn format(board: &BoardState) -> String {
    let mut placement = String::new();
    for rank in (0..8).rev() {
        let mut gap = 0;
        for file in 0..8 {
            let piece = Position::new(file, rank).and_then(|p| board.piece_at(p));
            match piece {
                None => gap += 1,
                Some(piece) => {
                    if gap > 0 {
                        placement.push_str(&gap.to_string());
                        gap = 0;
                    }
                    let letter = piece.kind.letter();
                    placement.push(match piece.side {
                        Side::White => letter.to_ascii_uppercase(),
                        Side::Black => letter,
                    });
                }
            }
        }
        if gap > 0 {
            placement.push_str(&gap.to_string());
        }
        if rank > 0 {
            placement.push('/');
        }
    }

    let turn = match board.turn {
        Side::White => "w",
        Side::Black => "b",
    };

    let mut castling = String::new();
    for (side, wing, flag) in [
        (Side::White, Wing::King, 'K'),
        (Side::White, Wing::Queen, 'Q'),
        (Side::Black, Wing::King, 'k'),
        (Side::Black, Wing::Queen, 'q'),
    ] {
        if board.castling.allows(side, wing) {
            castling.push(flag);
        }
    }
    if castling.is_empty() {
        castling.push('-');
    }

    let en_passant = board
        .en_passant
        .map(|p| p.name())
        .unwrap_or_else(|| "-".to_string());

    format!(
        "{placement} {turn} {castling} {en_passant} {} {}",
        board.halfmove_clock, board.fullmove_number
    )
}
