// src/board/glyphs.rs
// O(1) diagram glyph <-> piece maps.

use super::{Color, ColoredPiece, Piece};

pub(super) const EMPTY_GLYPH: char = '.';

pub(super) const CHAR_TO_PC: [Option<ColoredPiece>; 128] = {
    let mut table: [Option<ColoredPiece>; 128] = [None; 128];

    // Uppercase = White
    table['P' as usize] = Some(ColoredPiece::new(Color::White, Piece::Pawn));
    table['N' as usize] = Some(ColoredPiece::new(Color::White, Piece::Knight));
    table['B' as usize] = Some(ColoredPiece::new(Color::White, Piece::Bishop));
    table['R' as usize] = Some(ColoredPiece::new(Color::White, Piece::Rook));
    table['Q' as usize] = Some(ColoredPiece::new(Color::White, Piece::Queen));
    table['K' as usize] = Some(ColoredPiece::new(Color::White, Piece::King));

    // Lowercase = Black
    table['p' as usize] = Some(ColoredPiece::new(Color::Black, Piece::Pawn));
    table['n' as usize] = Some(ColoredPiece::new(Color::Black, Piece::Knight));
    table['b' as usize] = Some(ColoredPiece::new(Color::Black, Piece::Bishop));
    table['r' as usize] = Some(ColoredPiece::new(Color::Black, Piece::Rook));
    table['q' as usize] = Some(ColoredPiece::new(Color::Black, Piece::Queen));
    table['k' as usize] = Some(ColoredPiece::new(Color::Black, Piece::King));

    table
};

#[inline]
const fn pc_index(cp: ColoredPiece) -> usize {
    (cp.color as usize) * 6 + (cp.piece as usize)
}

const PC_TO_CHAR: [char; 12] = ['P', 'N', 'B', 'R', 'Q', 'K', 'p', 'n', 'b', 'r', 'q', 'k'];

/// Decode one diagram cell. `None` = not a diagram glyph,
/// `Some(None)` = empty square.
#[inline]
pub(super) fn glyph_to_cell(c: char) -> Option<Option<ColoredPiece>> {
    if c == EMPTY_GLYPH {
        return Some(None);
    }
    if !c.is_ascii() {
        return None;
    }
    CHAR_TO_PC[c as usize].map(Some)
}

#[inline]
pub(super) fn cell_to_glyph(cell: Option<ColoredPiece>) -> char {
    match cell {
        Some(cp) => PC_TO_CHAR[pc_index(cp)],
        None => EMPTY_GLYPH,
    }
}
