// src/board/diagram.rs
//! 64-cell text diagrams: one glyph per square from a8 to h1,
//! `.` for empty, whitespace ignored.

use super::glyphs::{cell_to_glyph, glyph_to_cell};
use super::{Board, Color, Piece};
use crate::square::Square;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DiagramError {
    #[error("diagram must describe 64 squares, found {0}")]
    Length(usize),
    #[error("illegal character '{0}' in diagram")]
    IllegalCharacter(char),
    #[error("diagram must contain exactly one king of each color")]
    KingCount,
}

impl Board {
    /// Parse a diagram into a board with White to move, no castling
    /// eligibility and no en passant target.
    pub fn from_diagram(diagram: &str) -> Result<Board, DiagramError> {
        let glyphs: Vec<char> = diagram.chars().filter(|c| !c.is_whitespace()).collect();
        if glyphs.len() != 64 {
            return Err(DiagramError::Length(glyphs.len()));
        }

        let mut board = Board::new_empty();
        let mut kings = [0usize; 2];

        for (i, &g) in glyphs.iter().enumerate() {
            let cell = glyph_to_cell(g).ok_or(DiagramError::IllegalCharacter(g))?;
            let sq = Square::from_index(i as u8);
            if let Some(cp) = cell {
                if cp.is(Piece::King) {
                    kings[cp.color as usize] += 1;
                    board.set_king_square(cp.color, sq);
                }
            }
            board[sq] = cell;
        }

        if kings != [1, 1] {
            return Err(DiagramError::KingCount);
        }
        Ok(board)
    }

    /// The 64-character diagram of the current placement.
    pub fn to_diagram(&self) -> String {
        Square::all().map(|sq| cell_to_glyph(self[sq])).collect()
    }

    /// Mark castling rooks from the placement: for each colour whose king
    /// stands on its back rank, the outermost rook of that colour on each
    /// side of the king becomes eligible.
    pub fn infer_castling(&mut self) {
        for color in [Color::White, Color::Black] {
            self.clear_castling(color);
            let Some(king) = self.king_square(color) else {
                continue;
            };
            if king.row() != super::castling::back_row(color) {
                continue;
            }

            let row_start = king.index() - king.file();
            let is_own_rook = |b: &Board, idx: u8| {
                b[Square::from_index(idx)]
                    .is_some_and(|cp| cp.color == color && cp.is(Piece::Rook))
            };

            let west = (row_start..king.index()).find(|&i| is_own_rook(self, i));
            let east = (king.index() + 1..row_start + 8)
                .rev()
                .find(|&i| is_own_rook(self, i));

            self.set_castle_rook(color, super::Wing::Queenside, west.map(Square::from_index));
            self.set_castle_rook(color, super::Wing::Kingside, east.map(Square::from_index));
        }
    }
}
