// src/board/castling.rs

use super::Color;
use crate::geometry::Direction;
use crate::square::Square;
use serde::{Deserialize, Serialize};

/// Side of the king a castle happens on. Kingside is the h-file side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Wing {
    Kingside,
    Queenside,
}

// Destination squares; the same in standard chess and Chess960.
const BLACK_QUEENSIDE_KING: u8 = 2; // c8
const BLACK_QUEENSIDE_ROOK: u8 = 3; // d8
const BLACK_KINGSIDE_KING: u8 = 6; // g8
const BLACK_KINGSIDE_ROOK: u8 = 5; // f8

const WHITE_QUEENSIDE_KING: u8 = 58; // c1
const WHITE_QUEENSIDE_ROOK: u8 = 59; // d1
const WHITE_KINGSIDE_KING: u8 = 62; // g1
const WHITE_KINGSIDE_ROOK: u8 = 61; // f1

impl Wing {
    pub const BOTH: [Wing; 2] = [Wing::Kingside, Wing::Queenside];

    /// Wing a king heads towards when moving along its rank.
    pub fn from_direction(dir: Direction) -> Option<Wing> {
        match dir {
            Direction::East => Some(Wing::Kingside),
            Direction::West => Some(Wing::Queenside),
            _ => None,
        }
    }
}

/// Final (king, rook) squares for a castle of `color` on `wing`.
pub const fn castle_destinations(color: Color, wing: Wing) -> (Square, Square) {
    let (king, rook) = match (color, wing) {
        (Color::White, Wing::Kingside) => (WHITE_KINGSIDE_KING, WHITE_KINGSIDE_ROOK),
        (Color::White, Wing::Queenside) => (WHITE_QUEENSIDE_KING, WHITE_QUEENSIDE_ROOK),
        (Color::Black, Wing::Kingside) => (BLACK_KINGSIDE_KING, BLACK_KINGSIDE_ROOK),
        (Color::Black, Wing::Queenside) => (BLACK_QUEENSIDE_KING, BLACK_QUEENSIDE_ROOK),
    };
    (Square::from_index(king), Square::from_index(rook))
}

/// Row index (0 = rank 8) of `color`'s back rank.
pub const fn back_row(color: Color) -> u8 {
    match color {
        Color::White => 7,
        Color::Black => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn destinations_sit_on_back_rank() {
        for color in [Color::White, Color::Black] {
            for wing in Wing::BOTH {
                let (k, r) = castle_destinations(color, wing);
                assert_eq!(k.row(), back_row(color));
                assert_eq!(r.row(), back_row(color));
                assert_ne!(k, r);
                assert_eq!(k.file().abs_diff(r.file()), 1);
            }
        }
    }

    #[test]
    fn standard_names() {
        let (k, r) = castle_destinations(Color::White, Wing::Kingside);
        assert_eq!((k.to_string(), r.to_string()), ("g1".into(), "f1".into()));
        let (k, r) = castle_destinations(Color::Black, Wing::Queenside);
        assert_eq!((k.to_string(), r.to_string()), ("c8".into(), "d8".into()));
    }

    #[test]
    fn wing_from_direction() {
        assert_eq!(Wing::from_direction(Direction::East), Some(Wing::Kingside));
        assert_eq!(Wing::from_direction(Direction::West), Some(Wing::Queenside));
        assert_eq!(Wing::from_direction(Direction::North), None);
    }
}
