//! Castling availability.
//!
//! The board remembers, per colour and wing, which rook may still castle.
//! King and rook always land on the standard squares for their wing
//! (g/f or c/d), wherever they started, so vacancy is checked over the
//! union of both pieces' paths and the squares between them.

use crate::board::{Board, Piece, Wing, castle_destinations};
use crate::moves::execute::leaves_king_in_check;
use crate::moves::square_control::{in_check, is_threatened_by};
use crate::moves::types::{Move, MoveKind};
use crate::square::Square;
use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CastleError {
    #[error("king or rook has already moved")]
    Moved,
    #[error("squares between king and rook are not empty")]
    Blocked,
    #[error("cannot castle out of check")]
    KingInCheck,
    #[error("king would pass through or land on an attacked square")]
    TransitAttacked,
}

/// Squares on one rank from `a` to `b`, both ends included.
fn span(a: Square, b: Square) -> impl Iterator<Item = Square> {
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
    (lo.index()..=hi.index()).map(Square::from_index)
}

/// Check whether the side to move may castle on `wing`. On success returns
/// the castling move, whose `to` is the rook's square.
pub fn can_castle(board: &Board, wing: Wing) -> Result<Move, CastleError> {
    let color = board.side_to_move;
    let (Some(king), Some(rook)) = (board.king_square(color), board.castle_rook(color, wing)) else {
        return Err(CastleError::Moved);
    };
    let rook_here = board
        .piece_at(rook)
        .is_some_and(|cp| cp.is_friendly_to(color) && cp.is(Piece::Rook));
    if !rook_here || king.row() != rook.row() {
        return Err(CastleError::Moved);
    }

    let (king_to, rook_to) = castle_destinations(color, wing);

    let occupied = span(king, rook)
        .chain(span(king, king_to))
        .chain(span(rook, rook_to))
        .any(|sq| sq != king && sq != rook && !board.is_empty(sq));
    if occupied {
        return Err(CastleError::Blocked);
    }

    if in_check(board, color) {
        return Err(CastleError::KingInCheck);
    }

    let enemy = color.opposite();
    if span(king, king_to)
        .filter(|&sq| sq != king)
        .any(|sq| is_threatened_by(board, sq, enemy))
    {
        return Err(CastleError::TransitAttacked);
    }

    let kind = match wing {
        Wing::Kingside => MoveKind::CastleKingside,
        Wing::Queenside => MoveKind::CastleQueenside,
    };
    let mv = Move::new(king, rook, kind);

    // The rook leaving its square can open a line onto the king's
    // destination; look at the finished position as well.
    if leaves_king_in_check(board, mv) {
        return Err(CastleError::TransitAttacked);
    }
    Ok(mv)
}
