//! Type definitions shared by the interaction logic
//!
//! Provides newtype patterns for board coordinates and the small value types
//! (sides, piece kinds, handles) that flow between the session and its
//! collaborators.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::GameError;

/// Board coordinate representing a file (column) on the chessboard
///
/// Values range from 0 (file 'a') to 7 (file 'h').
/// This newtype prevents mixing up x and z coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct File(u8);

impl File {
    /// Create a file from its index (0-7)
    pub fn new(index: u8) -> Option<Self> {
        (index < 8).then_some(File(index))
    }

    /// Create a file from a character ('a'..='h')
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'a'..='h' => Some(File(c as u8 - b'a')),
            _ => None,
        }
    }

    /// Convert file to character ('a'..='h')
    pub fn to_char(self) -> char {
        (b'a' + self.0) as char
    }

    /// Get the file index (0-7)
    pub fn index(self) -> u8 {
        self.0
    }
}

/// Board coordinate representing a rank (row) on the chessboard
///
/// Values range from 0 (rank 1) to 7 (rank 8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Rank(u8);

impl Rank {
    /// Create a rank from its index (0-7)
    pub fn new(index: u8) -> Option<Self> {
        (index < 8).then_some(Rank(index))
    }

    /// Create a rank from a number (1-8)
    pub fn from_number(n: u8) -> Option<Self> {
        if (1..=8).contains(&n) {
            Some(Rank(n - 1))
        } else {
            None
        }
    }

    /// Convert rank to number (1-8)
    pub fn to_number(self) -> u8 {
        self.0 + 1
    }

    /// Get the rank index (0-7)
    pub fn index(self) -> u8 {
        self.0
    }
}

/// A single board coordinate, file + rank
///
/// The canonical string form is the algebraic token (`"e4"`); [`Position::name`]
/// and [`Position::from_name`] round-trip without loss.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub file: File,
    pub rank: Rank,
}

impl Position {
    /// Create a position from file and rank indices, `None` when off the board
    pub fn new(file: u8, rank: u8) -> Option<Self> {
        Some(Position {
            file: File::new(file)?,
            rank: Rank::new(rank)?,
        })
    }

    /// Create a position from signed indices, used when walking move rays
    pub fn offset(self, file_delta: i8, rank_delta: i8) -> Option<Self> {
        let file = self.file.index() as i8 + file_delta;
        let rank = self.rank.index() as i8 + rank_delta;
        if (0..8).contains(&file) && (0..8).contains(&rank) {
            Position::new(file as u8, rank as u8)
        } else {
            None
        }
    }

    /// Parse algebraic notation (e.g. "e4")
    pub fn from_name(name: &str) -> Option<Self> {
        let mut chars = name.chars();
        let file = File::from_char(chars.next()?)?;
        let rank_number = chars.next()?.to_digit(10)? as u8;
        if chars.next().is_some() {
            return None;
        }
        Some(Position {
            file,
            rank: Rank::from_number(rank_number)?,
        })
    }

    /// Algebraic notation (e.g. "e4")
    pub fn name(self) -> String {
        format!("{}{}", self.file.to_char(), self.rank.to_number())
    }

    /// `(file, rank)` indices
    pub fn coordinates(self) -> (u8, u8) {
        (self.file.index(), self.rank.index())
    }

    /// Dense index 0-63, a1 = 0, h8 = 63
    pub fn index(self) -> usize {
        self.rank.index() as usize * 8 + self.file.index() as usize
    }

    /// Inverse of [`Position::index`]
    pub fn from_index(index: usize) -> Option<Self> {
        if index < 64 {
            Position::new((index % 8) as u8, (index / 8) as u8)
        } else {
            None
        }
    }

    /// All 64 squares, a1 first
    pub fn all() -> impl Iterator<Item = Position> {
        (0..64).filter_map(Position::from_index)
    }

    /// Light squares in the usual checkerboard (a1 is dark)
    pub fn is_light(self) -> bool {
        (self.file.index() + self.rank.index()) % 2 == 1
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file.to_char(), self.rank.to_number())
    }
}

impl FromStr for Position {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Position::from_name(s).ok_or_else(|| GameError::UnknownSquare {
            notation: s.to_string(),
        })
    }
}

/// The two sides of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    White,
    Black,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::White => Side::Black,
            Side::Black => Side::White,
        }
    }

    /// Rank direction pawns of this side advance in
    pub fn forward(self) -> i8 {
        match self {
            Side::White => 1,
            Side::Black => -1,
        }
    }

    /// Back rank index (0 for white, 7 for black)
    pub fn home_rank(self) -> u8 {
        match self {
            Side::White => 0,
            Side::Black => 7,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Side::White => "White",
            Side::Black => "Black",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Tagged piece kind; shapes, moves and promotion all dispatch on this
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceKind {
    Pawn,
    Rook,
    Knight,
    Bishop,
    Queen,
    King,
}

impl PieceKind {
    /// Lowercase FEN letter
    pub fn letter(self) -> char {
        match self {
            PieceKind::Pawn => 'p',
            PieceKind::Rook => 'r',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        }
    }

    pub fn from_letter(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            'p' => Some(PieceKind::Pawn),
            'r' => Some(PieceKind::Rook),
            'n' => Some(PieceKind::Knight),
            'b' => Some(PieceKind::Bishop),
            'q' => Some(PieceKind::Queen),
            'k' => Some(PieceKind::King),
            _ => None,
        }
    }
}

/// The four discrete answers to a promotion prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PromotionChoice {
    Queen,
    Rook,
    Bishop,
    Knight,
}

impl PromotionChoice {
    /// Order shown in the prompt
    pub const ALL: [PromotionChoice; 4] = [
        PromotionChoice::Queen,
        PromotionChoice::Rook,
        PromotionChoice::Bishop,
        PromotionChoice::Knight,
    ];

    pub fn kind(self) -> PieceKind {
        match self {
            PromotionChoice::Queen => PieceKind::Queen,
            PromotionChoice::Rook => PieceKind::Rook,
            PromotionChoice::Bishop => PieceKind::Bishop,
            PromotionChoice::Knight => PieceKind::Knight,
        }
    }

    pub fn from_letter(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            'q' => Some(PromotionChoice::Queen),
            'r' => Some(PromotionChoice::Rook),
            'b' => Some(PromotionChoice::Bishop),
            'n' => Some(PromotionChoice::Knight),
            _ => None,
        }
    }
}

/// Registry-assigned identity of a logical piece
///
/// Identifiers are never reused within a session, so a promoted piece is
/// distinguishable from the pawn it replaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(pub u32);

/// Reference to a visual owned by the scene
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VisualHandle(pub u64);

/// Point in scene space (y is up)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Point3 {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Point3 { x, y, z }
    }

    pub fn with_y(self, y: f32) -> Self {
        Point3 { y, ..self }
    }
}

/// Pointer location in window coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScreenPoint {
    pub x: f32,
    pub y: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_to_char() {
        assert_eq!(File(0).to_char(), 'a');
        assert_eq!(File(4).to_char(), 'e');
        assert_eq!(File(7).to_char(), 'h');
        assert_eq!(File::new(8), None);
    }

    #[test]
    fn test_rank_from_number() {
        assert_eq!(Rank::from_number(1), Some(Rank(0)));
        assert_eq!(Rank::from_number(8), Some(Rank(7)));
        assert_eq!(Rank::from_number(0), None);
        assert_eq!(Rank::from_number(9), None);
    }

    #[test]
    fn test_position_name_round_trip() {
        //! Every square survives name -> coordinates -> name unchanged
        for position in Position::all() {
            let name = position.name();
            assert_eq!(Position::from_name(&name), Some(position), "{name}");
            let (file, rank) = position.coordinates();
            assert_eq!(Position::new(file, rank), Some(position));
        }
        assert_eq!(Position::all().count(), 64);
    }

    #[test]
    fn test_position_rejects_bad_notation() {
        assert_eq!(Position::from_name("i1"), None);
        assert_eq!(Position::from_name("a9"), None);
        assert_eq!(Position::from_name("a10"), None);
        assert_eq!(Position::from_name(""), None);
        assert!("z3".parse::<Position>().is_err());
        assert_eq!("e4".parse::<Position>().ok(), Position::new(4, 3));
    }

    #[test]
    fn test_position_offset_stays_on_board() {
        let a1 = Position::new(0, 0).unwrap();
        assert_eq!(a1.offset(-1, 0), None);
        assert_eq!(a1.offset(1, 2), Position::from_name("b3"));
    }

    #[test]
    fn test_square_colors() {
        assert!(!Position::from_name("a1").unwrap().is_light());
        assert!(Position::from_name("h1").unwrap().is_light());
    }

    #[test]
    fn test_promotion_choice_kinds() {
        let kinds: Vec<_> = PromotionChoice::ALL.iter().map(|c| c.kind()).collect();
        assert_eq!(
            kinds,
            vec![PieceKind::Queen, PieceKind::Rook, PieceKind::Bishop, PieceKind::Knight]
        );
        assert_eq!(PromotionChoice::from_letter('N'), Some(PromotionChoice::Knight));
        assert_eq!(PromotionChoice::from_letter('k'), None);
    }
}
