use crate::square::Square;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Index, IndexMut};
use std::str::FromStr;

pub mod castling;
mod diagram;
mod glyphs;
pub use castling::{Wing, castle_destinations};
pub use diagram::DiagramError;

/// Starting position as a 64-cell diagram, a8 first.
pub const START_DIAGRAM: &str = concat!(
    "rnbqkbnr", "pppppppp", "........", "........", "........", "........", "PPPPPPPP",
    "RNBQKBNR"
);

// ———————— Starting squares ————————
const BLACK_KING_START: u8 = 4; // e8
const BLACK_ROOK_QUEENSIDE_START: u8 = 0; // a8
const BLACK_ROOK_KINGSIDE_START: u8 = 7; // h8
const WHITE_KING_START: u8 = 60; // e1
const WHITE_ROOK_QUEENSIDE_START: u8 = 56; // a1
const WHITE_ROOK_KINGSIDE_START: u8 = 63; // h1

const BACK_RANK: [Piece; 8] = [
    Piece::Rook,
    Piece::Knight,
    Piece::Bishop,
    Piece::Queen,
    Piece::King,
    Piece::Bishop,
    Piece::Knight,
    Piece::Rook,
];

/// Which side is to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Color {
    White,
    Black,
}

/// Movement class of a piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Piece {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

/// A piece together with its owner. An empty square is `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColoredPiece {
    pub color: Color,
    pub piece: Piece,
}

impl ColoredPiece {
    #[inline(always)]
    pub const fn new(color: Color, piece: Piece) -> Self {
        ColoredPiece { color, piece }
    }

    #[inline(always)]
    pub fn is(self, piece: Piece) -> bool {
        self.piece == piece
    }

    #[inline(always)]
    pub fn is_friendly_to(self, color: Color) -> bool {
        self.color == color
    }

    #[inline(always)]
    pub fn is_enemy_of(self, color: Color) -> bool {
        self.color != color
    }

    #[inline(always)]
    pub fn same_type(self, other: ColoredPiece) -> bool {
        self.piece == other.piece
    }

    /// Rook, bishop or queen.
    #[inline(always)]
    pub fn is_slider(self) -> bool {
        matches!(self.piece, Piece::Bishop | Piece::Rook | Piece::Queen)
    }
}

/// Mailbox position: 64 cells plus the derived king and castling state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    squares: [Option<ColoredPiece>; 64],
    /// White or Black to move
    pub side_to_move: Color,
    /// Cached king squares, [White, Black]
    king_squares: [Option<Square>; 2],
    /// Rooks still eligible to castle, [color][wing]
    castle_rooks: [[Option<Square>; 2]; 2],
    /// Square passed over by the last two-square pawn advance, for one ply only.
    pub en_passant: Option<Square>,
}

impl Board {
    /// Create an empty board (no pieces, no kings, White to move).
    pub fn new_empty() -> Self {
        Board {
            squares: [None; 64],
            side_to_move: Color::White,
            king_squares: [None; 2],
            castle_rooks: [[None; 2]; 2],
            en_passant: None,
        }
    }

    /// Standard starting position with full castling eligibility.
    pub fn new() -> Self {
        let mut b = Board::new_empty();
        for (file, &piece) in BACK_RANK.iter().enumerate() {
            let file = file as u8;
            b.squares[file as usize] = Some(ColoredPiece::new(Color::Black, piece));
            b.squares[8 + file as usize] = Some(ColoredPiece::new(Color::Black, Piece::Pawn));
            b.squares[48 + file as usize] = Some(ColoredPiece::new(Color::White, Piece::Pawn));
            b.squares[56 + file as usize] = Some(ColoredPiece::new(Color::White, piece));
        }

        b.king_squares = [
            Some(Square::from_index(WHITE_KING_START)),
            Some(Square::from_index(BLACK_KING_START)),
        ];
        b.castle_rooks = [
            [
                Some(Square::from_index(WHITE_ROOK_KINGSIDE_START)),
                Some(Square::from_index(WHITE_ROOK_QUEENSIDE_START)),
            ],
            [
                Some(Square::from_index(BLACK_ROOK_KINGSIDE_START)),
                Some(Square::from_index(BLACK_ROOK_QUEENSIDE_START)),
            ],
        ];
        b
    }

    /// Remove every piece and all derived state; White to move.
    pub fn clear(&mut self) {
        *self = Board::new_empty();
    }

    /// Returns the piece at a given square, or None if empty.
    #[inline(always)]
    pub fn piece_at(&self, sq: Square) -> Option<ColoredPiece> {
        self.squares[sq.index() as usize]
    }

    /// Returns just the piece type at a given square.
    #[inline(always)]
    pub fn piece_type_at(&self, sq: Square) -> Option<Piece> {
        self.piece_at(sq).map(|cp| cp.piece)
    }

    /// Returns just the color at a given square.
    #[inline(always)]
    pub fn color_at(&self, sq: Square) -> Option<Color> {
        self.piece_at(sq).map(|cp| cp.color)
    }

    #[inline(always)]
    pub fn is_empty(&self, sq: Square) -> bool {
        self.squares[sq.index() as usize].is_none()
    }

    #[inline(always)]
    pub fn is_friendly(&self, sq: Square, color: Color) -> bool {
        self.piece_at(sq).is_some_and(|cp| cp.is_friendly_to(color))
    }

    #[inline(always)]
    pub fn is_enemy(&self, sq: Square, color: Color) -> bool {
        self.piece_at(sq).is_some_and(|cp| cp.is_enemy_of(color))
    }

    /// Occupied squares with their pieces, in index order.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, ColoredPiece)> + '_ {
        self.squares
            .iter()
            .enumerate()
            .filter_map(|(i, cell)| cell.map(|cp| (Square::from_index(i as u8), cp)))
    }

    /// Where `color`'s king stands. `None` only while a position is being set up.
    #[inline(always)]
    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.king_squares[color as usize]
    }

    pub fn set_king_square(&mut self, color: Color, sq: Square) {
        self.king_squares[color as usize] = Some(sq);
    }

    /// The rook `color` may still castle with on `wing`.
    #[inline(always)]
    pub fn castle_rook(&self, color: Color, wing: Wing) -> Option<Square> {
        self.castle_rooks[color as usize][wing as usize]
    }

    pub fn set_castle_rook(&mut self, color: Color, wing: Wing, sq: Option<Square>) {
        self.castle_rooks[color as usize][wing as usize] = sq;
    }

    /// Drop both castling rooks for `color`.
    pub fn clear_castling(&mut self, color: Color) {
        self.castle_rooks[color as usize] = [None; 2];
    }

    pub fn set_side_to_move(&mut self, color: Color) {
        self.side_to_move = color;
    }

    /// Check the derived state against the placement.
    /// Returns Ok if consistent, Err describing the first mismatch otherwise.
    pub fn validate(&self) -> Result<(), String> {
        for color in [Color::White, Color::Black] {
            let king = ColoredPiece::new(color, Piece::King);
            match self.king_square(color) {
                Some(sq) if self.piece_at(sq) == Some(king) => {}
                Some(sq) => {
                    return Err(format!("{color:?} king cache points at {sq}, which holds no king"));
                }
                None => return Err(format!("{color:?} king square is unset")),
            }
            for wing in Wing::BOTH {
                if let Some(sq) = self.castle_rook(color, wing) {
                    if self.piece_at(sq) != Some(ColoredPiece::new(color, Piece::Rook)) {
                        return Err(format!("{color:?} {wing:?} castling rook missing from {sq}"));
                    }
                }
            }
        }
        if let Some(ep) = self.en_passant {
            if !self.is_empty(ep) {
                return Err(format!("en passant target {ep} is occupied"));
            }
        }
        Ok(())
    }
}

impl Color {
    pub fn opposite(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }
}

impl std::ops::Not for Color {
    type Output = Self;

    fn not(self) -> Self::Output {
        self.opposite()
    }
}

impl Piece {
    /// SAN letter; pawns have none.
    pub fn letter(self) -> Option<char> {
        match self {
            Piece::Pawn => None,
            Piece::Knight => Some('N'),
            Piece::Bishop => Some('B'),
            Piece::Rook => Some('R'),
            Piece::Queen => Some('Q'),
            Piece::King => Some('K'),
        }
    }
}

impl Index<Square> for Board {
    type Output = Option<ColoredPiece>;

    #[inline(always)]
    fn index(&self, sq: Square) -> &Self::Output {
        &self.squares[sq.index() as usize]
    }
}

impl IndexMut<Square> for Board {
    #[inline(always)]
    fn index_mut(&mut self, sq: Square) -> &mut Self::Output {
        &mut self.squares[sq.index() as usize]
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::new()
    }
}

impl FromStr for Board {
    type Err = DiagramError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Board::from_diagram(s)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let diagram = self.to_diagram();
        for (row, chunk) in diagram.as_bytes().chunks(8).enumerate() {
            // Diagram glyphs are ASCII.
            let line: String = chunk.iter().map(|&b| b as char).collect();
            writeln!(f, "{} {}", 8 - row, line)?;
        }
        write!(f, "  abcdefgh")
    }
}
