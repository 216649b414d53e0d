use crate::board::{Piece, Wing};
use crate::square::Square;
use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Deref, DerefMut};

pub trait MoveBuffer: Deref<Target = [Move]> + DerefMut {
    fn push(&mut self, mv: Move);
    fn clear(&mut self);
}

impl MoveBuffer for Vec<Move> {
    fn push(&mut self, mv: Move) {
        self.push(mv);
    }
    fn clear(&mut self) {
        self.clear();
    }
}

impl<const N: usize> MoveBuffer for ArrayVec<Move, N> {
    fn push(&mut self, mv: Move) {
        self.push(mv);
    }
    fn clear(&mut self) {
        self.clear();
    }
}

/// Fixed-capacity move list; no legal position has more than 218 moves.
pub type MoveList = ArrayVec<Move, 256>;

/// Piece a pawn may promote to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PromotionChoice {
    Queen,
    Rook,
    Bishop,
    Knight,
}

impl PromotionChoice {
    pub const ALL: [PromotionChoice; 4] = [
        PromotionChoice::Queen,
        PromotionChoice::Rook,
        PromotionChoice::Bishop,
        PromotionChoice::Knight,
    ];

    pub fn piece(self) -> Piece {
        match self {
            PromotionChoice::Queen => Piece::Queen,
            PromotionChoice::Rook => Piece::Rook,
            PromotionChoice::Bishop => Piece::Bishop,
            PromotionChoice::Knight => Piece::Knight,
        }
    }

    /// Accepts `q`, `r`, `b`, `n` in either case.
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            'q' => Some(PromotionChoice::Queen),
            'r' => Some(PromotionChoice::Rook),
            'b' => Some(PromotionChoice::Bishop),
            'n' => Some(PromotionChoice::Knight),
            _ => None,
        }
    }

    pub fn to_char(self) -> char {
        match self {
            PromotionChoice::Queen => 'q',
            PromotionChoice::Rook => 'r',
            PromotionChoice::Bishop => 'b',
            PromotionChoice::Knight => 'n',
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveKind {
    Quiet,
    Capture,
    DoublePawnPush,
    EnPassant,
    CastleKingside,
    CastleQueenside,
    Promotion(PromotionChoice),
    PromotionCapture(PromotionChoice),
    /// A pawn reached the last rank and the mover still has to pick a piece.
    NeedsPromotion,
}

/// A move. For castles `to` is the castling rook's square, not the king's
/// destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    pub kind: MoveKind,
}

impl Move {
    #[inline(always)]
    pub const fn new(from: Square, to: Square, kind: MoveKind) -> Self {
        Move { from, to, kind }
    }

    #[inline(always)]
    pub fn is_capture(&self) -> bool {
        matches!(
            self.kind,
            MoveKind::Capture | MoveKind::EnPassant | MoveKind::PromotionCapture(_)
        )
    }

    #[inline(always)]
    pub fn is_en_passant(&self) -> bool {
        self.kind == MoveKind::EnPassant
    }

    #[inline(always)]
    pub fn is_castling(&self) -> bool {
        matches!(self.kind, MoveKind::CastleKingside | MoveKind::CastleQueenside)
    }

    #[inline(always)]
    pub fn is_promotion(&self) -> bool {
        matches!(
            self.kind,
            MoveKind::Promotion(_) | MoveKind::PromotionCapture(_)
        )
    }

    #[inline(always)]
    pub fn needs_promotion(&self) -> bool {
        self.kind == MoveKind::NeedsPromotion
    }

    #[inline(always)]
    pub fn is_double_pawn_push(&self) -> bool {
        self.kind == MoveKind::DoublePawnPush
    }

    /// Wing of a castling move.
    pub fn castle_wing(&self) -> Option<Wing> {
        match self.kind {
            MoveKind::CastleKingside => Some(Wing::Kingside),
            MoveKind::CastleQueenside => Some(Wing::Queenside),
            _ => None,
        }
    }

    pub fn promotion(&self) -> Option<PromotionChoice> {
        match self.kind {
            MoveKind::Promotion(p) | MoveKind::PromotionCapture(p) => Some(p),
            _ => None,
        }
    }

    /// Complete a pending promotion with `choice`.
    pub fn with_promotion(self, choice: PromotionChoice, capture: bool) -> Move {
        let kind = if capture {
            MoveKind::PromotionCapture(choice)
        } else {
            MoveKind::Promotion(choice)
        };
        Move { kind, ..self }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // from->to like e2e4; castles print king->rook
        write!(f, "{}{}", self.from, self.to)?;

        if let Some(promo) = self.promotion() {
            write!(f, "{}", promo.to_char())?;
        }

        // "{:#}" adds a tag for special moves
        if f.alternate() {
            if self.is_castling() {
                f.write_str(" (castle)")?;
            } else if self.is_en_passant() {
                f.write_str(" (ep)")?;
            } else if self.is_capture() {
                f.write_str(" (x)")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Square {
        s.parse().unwrap()
    }

    #[test]
    fn capture_classification() {
        let m = |kind| Move::new(sq("e4"), sq("d5"), kind);
        assert!(m(MoveKind::Capture).is_capture());
        assert!(m(MoveKind::EnPassant).is_capture());
        assert!(m(MoveKind::PromotionCapture(PromotionChoice::Rook)).is_capture());
        assert!(!m(MoveKind::Promotion(PromotionChoice::Rook)).is_capture());
        assert!(!m(MoveKind::Quiet).is_capture());
        assert!(!m(MoveKind::CastleKingside).is_capture());
    }

    #[test]
    fn completing_a_promotion() {
        let pending = Move::new(sq("b7"), sq("a8"), MoveKind::NeedsPromotion);
        assert!(pending.needs_promotion());
        let done = pending.with_promotion(PromotionChoice::Bishop, true);
        assert_eq!(done.kind, MoveKind::PromotionCapture(PromotionChoice::Bishop));
        assert_eq!(done.promotion(), Some(PromotionChoice::Bishop));
        assert_eq!((done.from, done.to), (pending.from, pending.to));
    }

    #[test]
    fn display_forms() {
        let push = Move::new(sq("e2"), sq("e4"), MoveKind::DoublePawnPush);
        assert_eq!(push.to_string(), "e2e4");
        let promo = Move::new(sq("a7"), sq("a8"), MoveKind::Promotion(PromotionChoice::Knight));
        assert_eq!(promo.to_string(), "a7a8n");
        let castle = Move::new(sq("e1"), sq("h1"), MoveKind::CastleKingside);
        assert_eq!(format!("{castle:#}"), "e1h1 (castle)");
    }

    #[test]
    fn promotion_choice_chars() {
        for choice in PromotionChoice::ALL {
            assert_eq!(PromotionChoice::from_char(choice.to_char()), Some(choice));
        }
        assert_eq!(PromotionChoice::from_char('K'), None);
    }

    #[test]
    fn buffers_share_interface() {
        fn fill(buf: &mut impl MoveBuffer) {
            buf.clear();
            buf.push(Move::new(sq("g1"), sq("f3"), MoveKind::Quiet));
        }
        let mut v = Vec::new();
        let mut a = MoveList::new();
        fill(&mut v);
        fill(&mut a);
        assert_eq!(&v[..], &a[..]);
    }
}
