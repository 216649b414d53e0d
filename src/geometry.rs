//! Precomputed board geometry: sliding rays, knight jumps and king steps.
//!
//! Every ray lives inside one of four "line images", one per axis
//! (file, rank, two diagonals). Each image lists the lines of its axis
//! back to back, every line fenced by `NO_SQUARE` on both sides, so a ray
//! in a direction and the ray in the opposite direction are the same
//! slice of memory read forwards or backwards.

use crate::board::Color;
use crate::square::Square;
use arrayvec::ArrayVec;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::iter::FusedIterator;

/// Fence value marking the end of a ray inside a line image.
pub(crate) const NO_SQUARE: u8 = 64;

/// Compass directions. Opposites differ only in the low bit, and both
/// directions of a pair share one line image (`d >> 1`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Direction {
    South = 0,
    North = 1,
    East = 2,
    West = 3,
    SouthEast = 4,
    NorthWest = 5,
    SouthWest = 6,
    NorthEast = 7,
}

impl Direction {
    pub const ALL: [Direction; 8] = [
        Direction::South,
        Direction::North,
        Direction::East,
        Direction::West,
        Direction::SouthEast,
        Direction::NorthWest,
        Direction::SouthWest,
        Direction::NorthEast,
    ];

    pub const STRAIGHT: [Direction; 4] = [
        Direction::South,
        Direction::North,
        Direction::East,
        Direction::West,
    ];

    pub const DIAGONAL: [Direction; 4] = [
        Direction::SouthEast,
        Direction::NorthWest,
        Direction::SouthWest,
        Direction::NorthEast,
    ];

    #[inline(always)]
    const fn from_u8(v: u8) -> Self {
        match v & 7 {
            0 => Direction::South,
            1 => Direction::North,
            2 => Direction::East,
            3 => Direction::West,
            4 => Direction::SouthEast,
            5 => Direction::NorthWest,
            6 => Direction::SouthWest,
            _ => Direction::NorthEast,
        }
    }

    #[inline(always)]
    pub const fn opposite(self) -> Self {
        Self::from_u8(self as u8 ^ 1)
    }

    #[inline(always)]
    pub const fn is_straight(self) -> bool {
        (self as u8) < 4
    }

    #[inline(always)]
    pub const fn is_diagonal(self) -> bool {
        (self as u8) >= 4
    }

    /// (file delta, row delta); rows grow towards rank 1.
    pub const fn delta(self) -> (i8, i8) {
        match self {
            Direction::South => (0, 1),
            Direction::North => (0, -1),
            Direction::East => (1, 0),
            Direction::West => (-1, 0),
            Direction::SouthEast => (1, 1),
            Direction::NorthWest => (-1, -1),
            Direction::SouthWest => (-1, 1),
            Direction::NorthEast => (1, -1),
        }
    }

    #[inline(always)]
    const fn axis(self) -> usize {
        (self as usize) >> 1
    }

    #[inline(always)]
    const fn step(self) -> isize {
        if self as u8 & 1 == 0 { 1 } else { -1 }
    }
}

struct Geometry {
    images: [Vec<u8>; 4],
    /// [direction][square] -> position in the axis image of the first
    /// square in that direction (or of the fence when there is none).
    starts: [[u16; 64]; 8],
    knight: [ArrayVec<Square, 8>; 64],
    king: [ArrayVec<Square, 8>; 64],
}

impl Geometry {
    fn build() -> Self {
        let mut images: [Vec<u8>; 4] = Default::default();
        let mut starts = [[0u16; 64]; 8];

        for (axis, image) in images.iter_mut().enumerate() {
            let forward = Direction::from_u8((axis as u8) << 1);
            let (df, dr) = forward.delta();
            let mut position = [0usize; 64];

            image.push(NO_SQUARE);
            for sq in Square::all() {
                let (file, row) = (sq.file() as i8, sq.row() as i8);
                // Only start walking at the first square of a line.
                if Square::from_coords(file - df, row - dr).is_some() {
                    continue;
                }
                let mut cursor = Some(sq);
                while let Some(s) = cursor {
                    position[s.index() as usize] = image.len();
                    image.push(s.index());
                    cursor = Square::from_coords(s.file() as i8 + df, s.row() as i8 + dr);
                }
                image.push(NO_SQUARE);
            }

            let backward = forward.opposite();
            for (sq, &pos) in position.iter().enumerate() {
                starts[forward as usize][sq] = (pos + 1) as u16;
                starts[backward as usize][sq] = (pos - 1) as u16;
            }
        }

        let knight = std::array::from_fn(|i| {
            jump_set(
                Square::from_index(i as u8),
                &[(1, 2), (2, 1), (2, -1), (1, -2), (-1, -2), (-2, -1), (-2, 1), (-1, 2)],
            )
        });
        let king = std::array::from_fn(|i| {
            jump_set(
                Square::from_index(i as u8),
                &[(0, 1), (0, -1), (1, 0), (-1, 0), (1, 1), (-1, -1), (-1, 1), (1, -1)],
            )
        });

        Geometry {
            images,
            starts,
            knight,
            king,
        }
    }
}

fn jump_set(from: Square, offsets: &[(i8, i8)]) -> ArrayVec<Square, 8> {
    offsets
        .iter()
        .filter_map(|&(df, dr)| Square::from_coords(from.file() as i8 + df, from.row() as i8 + dr))
        .collect()
}

static GEOMETRY: Lazy<Geometry> = Lazy::new(Geometry::build);

/// Walks one direction from a square, nearest square first, and stops at
/// the board edge. A fresh `Ray` is needed for every traversal.
#[derive(Debug, Clone)]
pub struct Ray {
    image: &'static [u8],
    pos: usize,
    step: isize,
}

impl Iterator for Ray {
    type Item = Square;

    #[inline]
    fn next(&mut self) -> Option<Square> {
        let sq = self.image[self.pos];
        if sq == NO_SQUARE {
            return None;
        }
        // Never steps past a fence: both ends of every line carry one.
        self.pos = self.pos.wrapping_add_signed(self.step);
        Some(Square::from_index(sq))
    }
}

impl FusedIterator for Ray {}

/// Squares in `dir` from `from` (exclusive), out to the edge.
#[inline]
pub fn ray(dir: Direction, from: Square) -> Ray {
    let g: &'static Geometry = &GEOMETRY;
    Ray {
        image: &g.images[dir.axis()],
        pos: g.starts[dir as usize][from.index() as usize] as usize,
        step: dir.step(),
    }
}

/// Squares a knight on `from` can reach.
#[inline]
pub fn knight_jumps(from: Square) -> &'static [Square] {
    &GEOMETRY.knight[from.index() as usize]
}

/// Squares a king on `from` can step to.
#[inline]
pub fn king_steps(from: Square) -> &'static [Square] {
    &GEOMETRY.king[from.index() as usize]
}

/// Straight-line direction from `from` to `to`, or `None` if the squares
/// share no rank, file or diagonal (or are the same square).
pub fn direction_between(from: Square, to: Square) -> Option<Direction> {
    let df = to.file() as i8 - from.file() as i8;
    let dr = to.row() as i8 - from.row() as i8;

    match (df.signum(), dr.signum()) {
        (0, 0) => None,
        (0, 1) => Some(Direction::South),
        (0, -1) => Some(Direction::North),
        (1, 0) => Some(Direction::East),
        (-1, 0) => Some(Direction::West),
        _ if df.abs() != dr.abs() => None,
        (1, 1) => Some(Direction::SouthEast),
        (-1, -1) => Some(Direction::NorthWest),
        (-1, 1) => Some(Direction::SouthWest),
        _ => Some(Direction::NorthEast),
    }
}

/// Absolute index difference. Not a board metric: a7 and h8 are 1 apart.
#[inline(always)]
pub fn distance(from: Square, to: Square) -> u8 {
    from.index().abs_diff(to.index())
}

#[inline(always)]
pub fn horizontal_distance(from: Square, to: Square) -> u8 {
    from.file().abs_diff(to.file())
}

#[inline(always)]
pub fn vertical_distance(from: Square, to: Square) -> u8 {
    from.row().abs_diff(to.row())
}

#[inline(always)]
pub fn in_king_range(a: Square, b: Square) -> bool {
    horizontal_distance(a, b) < 2 && vertical_distance(a, b) < 2
}

/// Knight displacement is one of 6, 10, 15, 17; the file check rejects
/// displacements that only match by wrapping round the board edge.
#[inline]
pub fn knight_shape(from: Square, to: Square) -> bool {
    matches!(distance(from, to), 6 | 10 | 15 | 17) && horizontal_distance(from, to) < 3
}

/// True if a pawn of `color` on `attacker` attacks `target`.
#[inline]
pub fn pawn_attacks(attacker: Square, target: Square, color: Color) -> bool {
    let (a, t) = (attacker.index() as i16, target.index() as i16);
    let forward = match color {
        Color::White => t == a - 7 || t == a - 9,
        Color::Black => t == a + 7 || t == a + 9,
    };
    forward && horizontal_distance(attacker, target) == 1
}

/// Second rank from the pawn owner's side.
#[inline]
pub fn on_home_row(sq: Square, color: Color) -> bool {
    match color {
        Color::White => sq.row() == 6,
        Color::Black => sq.row() == 1,
    }
}

#[inline]
pub fn on_promotion_row(sq: Square) -> bool {
    sq.row() == 0 || sq.row() == 7
}

/// The square one step back towards `color`'s own side. Only valid for
/// squares not on that side's back rank.
#[inline]
pub fn square_behind(sq: Square, color: Color) -> Square {
    match color {
        Color::White => Square::from_index(sq.index() + 8),
        Color::Black => Square::from_index(sq.index() - 8),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Square {
        s.parse().unwrap()
    }

    #[test]
    fn ray_east_from_a8_covers_rank() {
        let got: Vec<u8> = ray(Direction::East, sq("a8")).map(|s| s.index()).collect();
        assert_eq!(got, vec![1, 2, 3, 4, 5, 6, 7]);
    }

    #[test]
    fn ray_north_from_e1() {
        let got: Vec<String> = ray(Direction::North, sq("e1")).map(|s| s.to_string()).collect();
        assert_eq!(got, vec!["e2", "e3", "e4", "e5", "e6", "e7", "e8"]);
    }

    #[test]
    fn ray_toward_edge_is_empty() {
        assert_eq!(ray(Direction::West, sq("a4")).count(), 0);
        assert_eq!(ray(Direction::NorthEast, sq("h8")).count(), 0);
        assert_eq!(ray(Direction::SouthWest, sq("a1")).count(), 0);
    }

    #[test]
    fn exhausted_ray_stays_exhausted() {
        let mut r = ray(Direction::SouthEast, sq("g2"));
        assert_eq!(r.next(), Some(sq("h1")));
        assert_eq!(r.next(), None);
        assert_eq!(r.next(), None);
    }

    #[test]
    fn diagonal_rays_do_not_wrap() {
        let got: Vec<String> = ray(Direction::NorthEast, sq("f6")).map(|s| s.to_string()).collect();
        assert_eq!(got, vec!["g7", "h8"]);
        let got: Vec<String> = ray(Direction::SouthWest, sq("b3")).map(|s| s.to_string()).collect();
        assert_eq!(got, vec!["a2"]);
    }

    #[test]
    fn jump_set_sizes() {
        assert_eq!(knight_jumps(sq("a8")).len(), 2);
        assert_eq!(knight_jumps(sq("d4")).len(), 8);
        assert_eq!(knight_jumps(sq("b1")).len(), 3);
        assert_eq!(king_steps(sq("h1")).len(), 3);
        assert_eq!(king_steps(sq("e4")).len(), 8);
        assert_eq!(king_steps(sq("e1")).len(), 5);
    }

    #[test]
    fn direction_between_cases() {
        assert_eq!(direction_between(sq("e1"), sq("e8")), Some(Direction::North));
        assert_eq!(direction_between(sq("e8"), sq("e1")), Some(Direction::South));
        assert_eq!(direction_between(sq("a1"), sq("h8")), Some(Direction::NorthEast));
        assert_eq!(direction_between(sq("h1"), sq("a8")), Some(Direction::NorthWest));
        assert_eq!(direction_between(sq("a4"), sq("h4")), Some(Direction::East));
        // h7 -> a6 is index +1 but not a line
        assert_eq!(direction_between(sq("h7"), sq("a6")), None);
        assert_eq!(direction_between(sq("b1"), sq("c3")), None);
        assert_eq!(direction_between(sq("c3"), sq("c3")), None);
    }

    #[test]
    fn knight_shape_rejects_wrap() {
        assert!(knight_shape(sq("g1"), sq("f3")));
        // h3 -> a4 is a displacement of 15 but wraps
        assert!(!knight_shape(sq("h3"), sq("a4")));
        assert!(!knight_shape(sq("a1"), sq("g2")));
    }

    #[test]
    fn pawn_attack_edges() {
        assert!(pawn_attacks(sq("a6"), sq("b7"), Color::White));
        assert!(!pawn_attacks(sq("a6"), sq("h8"), Color::White));
        assert!(pawn_attacks(sq("h3"), sq("g2"), Color::Black));
        assert!(!pawn_attacks(sq("e4"), sq("d3"), Color::White));
    }
}
