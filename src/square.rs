use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A board square, 0–63, row-major from a8 (0) to h1 (63).
///
/// File = index % 8 (a..h), rank = 8 - index / 8.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Square(u8);

impl Square {
    /// Build from a raw index. The index must already be in 0–63.
    #[inline(always)]
    pub const fn from_index(index: u8) -> Self {
        debug_assert!(index < 64);
        Square(index)
    }

    #[inline(always)]
    pub const fn index(self) -> u8 {
        self.0
    }

    /// 0 = a-file .. 7 = h-file
    #[inline(always)]
    pub const fn file(self) -> u8 {
        self.0 % 8
    }

    /// Row from the top of the board: 0 = rank 8 .. 7 = rank 1
    #[inline(always)]
    pub const fn row(self) -> u8 {
        self.0 / 8
    }

    /// Chess rank, 1..=8
    #[inline(always)]
    pub const fn rank(self) -> u8 {
        8 - self.0 / 8
    }

    pub fn file_char(self) -> char {
        (b'a' + self.file()) as char
    }

    pub fn rank_char(self) -> char {
        (b'0' + self.rank()) as char
    }

    /// Square at (file, row), if both are on the board.
    #[inline]
    pub fn from_coords(file: i8, row: i8) -> Option<Self> {
        if (0..8).contains(&file) && (0..8).contains(&row) {
            Some(Square((row * 8 + file) as u8))
        } else {
            None
        }
    }

    /// Iterate all 64 squares in index order.
    pub fn all() -> impl Iterator<Item = Square> {
        (0u8..64).map(Square)
    }
}

impl TryFrom<u8> for Square {
    type Error = u8;

    fn try_from(index: u8) -> Result<Self, Self::Error> {
        if index < 64 {
            Ok(Square(index))
        } else {
            Err(index)
        }
    }
}

impl From<Square> for u8 {
    fn from(sq: Square) -> u8 {
        sq.0
    }
}

impl FromStr for Square {
    type Err = String;

    /// Parse algebraic coordinates such as "e4".
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return Err(format!("invalid square '{s}'"));
        }
        let file = bytes[0].wrapping_sub(b'a');
        let rank = bytes[1].wrapping_sub(b'1');
        if file > 7 || rank > 7 {
            return Err(format!("invalid square '{s}'"));
        }
        Ok(Square((7 - rank) * 8 + file))
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file_char(), self.rank_char())
    }
}
