//! Board state representation for move validation

use crate::game::types::{PieceKind, Position, Side};

/// A piece as the rules see it: kind and side, no identity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub side: Side,
}

impl Piece {
    pub const fn new(kind: PieceKind, side: Side) -> Self {
        Piece { kind, side }
    }
}

/// Castling wing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Wing {
    King,
    Queen,
}

impl Wing {
    /// File index the king lands on
    pub fn king_target_file(self) -> u8 {
        match self {
            Wing::King => 6,
            Wing::Queen => 2,
        }
    }

    /// `(rook origin file, rook destination file)`
    pub fn rook_files(self) -> (u8, u8) {
        match self {
            Wing::King => (7, 5),
            Wing::Queen => (0, 3),
        }
    }
}

/// Remaining castling rights for both sides
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CastlingRights {
    pub white_king_side: bool,
    pub white_queen_side: bool,
    pub black_king_side: bool,
    pub black_queen_side: bool,
}

impl CastlingRights {
    pub fn all() -> Self {
        CastlingRights {
            white_king_side: true,
            white_queen_side: true,
            black_king_side: true,
            black_queen_side: true,
        }
    }

    pub fn allows(&self, side: Side, wing: Wing) -> bool {
        match (side, wing) {
            (Side::White, Wing::King) => self.white_king_side,
            (Side::White, Wing::Queen) => self.white_queen_side,
            (Side::Black, Wing::King) => self.black_king_side,
            (Side::Black, Wing::Queen) => self.black_queen_side,
        }
    }

    pub fn grant(&mut self, side: Side, wing: Wing) {
        match (side, wing) {
            (Side::White, Wing::King) => self.white_king_side = true,
            (Side::White, Wing::Queen) => self.white_queen_side = true,
            (Side::Black, Wing::King) => self.black_king_side = true,
            (Side::Black, Wing::Queen) => self.black_queen_side = true,
        }
    }

    /// King moved: both wings are gone
    pub fn revoke_side(&mut self, side: Side) {
        match side {
            Side::White => {
                self.white_king_side = false;
                self.white_queen_side = false;
            }
            Side::Black => {
                self.black_king_side = false;
                self.black_queen_side = false;
            }
        }
    }

    /// A rook left or was captured on one of the corner squares
    pub fn revoke_corner(&mut self, position: Position) {
        match position.coordinates() {
            (0, 0) => self.white_queen_side = false,
            (7, 0) => self.white_king_side = false,
            (0, 7) => self.black_queen_side = false,
            (7, 7) => self.black_king_side = false,
            _ => {}
        }
    }
}

/// Everything that decides whether two positions repeat
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepetitionKey {
    squares: [Option<Piece>; 64],
    turn: Side,
    castling: CastlingRights,
    en_passant: Option<Position>,
}

pub(crate) const KNIGHT_JUMPS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

pub(crate) const ORTHOGONAL: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
pub(crate) const DIAGONAL: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

/// Mailbox board plus the side state that legality depends on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardState {
    squares: [Option<Piece>; 64],
    pub turn: Side,
    pub castling: CastlingRights,
    /// Square a pawn skipped over on the previous double push
    pub en_passant: Option<Position>,
    pub halfmove_clock: u32,
    pub fullmove_number: u32,
}

impl BoardState {
    /// Board with no pieces, white to move
    pub fn empty() -> Self {
        BoardState {
            squares: [None; 64],
            turn: Side::White,
            castling: CastlingRights::default(),
            en_passant: None,
            halfmove_clock: 0,
            fullmove_number: 1,
        }
    }

    /// Standard starting position
    pub fn starting() -> Self {
        const BACK_ROW: [PieceKind; 8] = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];

        let mut board = BoardState::empty();
        for (file, &kind) in BACK_ROW.iter().enumerate() {
            let file = file as u8;
            board.place(file, 0, Piece::new(kind, Side::White));
            board.place(file, 1, Piece::new(PieceKind::Pawn, Side::White));
            board.place(file, 6, Piece::new(PieceKind::Pawn, Side::Black));
            board.place(file, 7, Piece::new(kind, Side::Black));
        }
        board.castling = CastlingRights::all();
        board
    }

    fn place(&mut self, file: u8, rank: u8, piece: Piece) {
        if let Some(position) = Position::new(file, rank) {
            self.set(position, Some(piece));
        }
    }

    pub fn piece_at(&self, position: Position) -> Option<Piece> {
        self.squares[position.index()]
    }

    pub fn set(&mut self, position: Position, piece: Option<Piece>) {
        self.squares[position.index()] = piece;
    }

    pub fn is_empty(&self, position: Position) -> bool {
        self.piece_at(position).is_none()
    }

    pub fn occupied(&self) -> impl Iterator<Item = (Position, Piece)> + '_ {
        Position::all().filter_map(move |p| self.piece_at(p).map(|piece| (p, piece)))
    }

    pub fn king_position(&self, side: Side) -> Option<Position> {
        self.occupied()
            .find(|(_, piece)| piece.kind == PieceKind::King && piece.side == side)
            .map(|(position, _)| position)
    }

    /// Whether any piece of `by` attacks `target`
    pub fn is_attacked(&self, target: Position, by: Side) -> bool {
        // Pawns attack diagonally forward, so look one rank "behind" the target
        for file_delta in [-1, 1] {
            if let Some(origin) = target.offset(file_delta, -by.forward()) {
                if self.piece_at(origin) == Some(Piece::new(PieceKind::Pawn, by)) {
                    return true;
                }
            }
        }

        for (df, dr) in KNIGHT_JUMPS {
            if let Some(origin) = target.offset(df, dr) {
                if self.piece_at(origin) == Some(Piece::new(PieceKind::Knight, by)) {
                    return true;
                }
            }
        }

        for df in -1..=1 {
            for dr in -1..=1 {
                if (df, dr) == (0, 0) {
                    continue;
                }
                if let Some(origin) = target.offset(df, dr) {
                    if self.piece_at(origin) == Some(Piece::new(PieceKind::King, by)) {
                        return true;
                    }
                }
            }
        }

        self.ray_hits(target, &ORTHOGONAL, by, &[PieceKind::Rook, PieceKind::Queen])
            || self.ray_hits(target, &DIAGONAL, by, &[PieceKind::Bishop, PieceKind::Queen])
    }

    fn ray_hits(&self, target: Position, directions: &[(i8, i8)], by: Side, kinds: &[PieceKind]) -> bool {
        for &(df, dr) in directions {
            let mut cursor = target;
            while let Some(next) = cursor.offset(df, dr) {
                if let Some(piece) = self.piece_at(next) {
                    if piece.side == by && kinds.contains(&piece.kind) {
                        return true;
                    }
                    break;
                }
                cursor = next;
            }
        }
        false
    }

    pub fn in_check(&self, side: Side) -> bool {
        self.king_position(side)
            .is_some_and(|king| self.is_attacked(king, side.opponent()))
    }

    /// Neither side can ever deliver mate
    pub fn has_insufficient_material(&self) -> bool {
        let minors: Vec<(Position, Piece)> = self
            .occupied()
            .filter(|(_, piece)| piece.kind != PieceKind::King)
            .collect();

        match minors.as_slice() {
            [] => true,
            [(_, piece)] => matches!(piece.kind, PieceKind::Bishop | PieceKind::Knight),
            pieces => {
                let all_bishops = pieces.iter().all(|(_, p)| p.kind == PieceKind::Bishop);
                let first_color = pieces[0].0.is_light();
                all_bishops && pieces.iter().all(|(pos, _)| pos.is_light() == first_color)
            }
        }
    }

    /// En passant target that a pawn of the side to move stands ready to take
    pub fn capturable_en_passant(&self) -> Option<Position> {
        let target = self.en_passant?;
        let pawn = Some(Piece::new(PieceKind::Pawn, self.turn));
        [-1, 1]
            .into_iter()
            .filter_map(|file_delta| target.offset(file_delta, -self.turn.forward()))
            .any(|origin| self.piece_at(origin) == pawn)
            .then_some(target)
    }

    /// The en passant square only counts while the capture is on
    pub fn repetition_key(&self) -> RepetitionKey {
        RepetitionKey {
            squares: self.squares,
            turn: self.turn,
            castling: self.castling,
            en_passant: self.capturable_en_passant(),
        }
    }
}

impl Default for BoardState {
    fn default() -> Self {
        BoardState::starting()
    }
}
