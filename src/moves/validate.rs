//! Move validation: turns a raw from/to pair into a typed [`Move`] or a
//! precise reason why the move is not allowed.

use crate::board::{Board, Color, Piece, Wing};
use crate::geometry::{
    Direction, direction_between, distance, horizontal_distance, in_king_range, knight_shape,
    on_home_row, on_promotion_row, square_behind,
};
use crate::moves::castle::{CastleError, can_castle};
use crate::moves::execute::leaves_king_in_check;
use crate::moves::square_control::is_blocked;
use crate::moves::types::{Move, MoveKind};
use crate::square::Square;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveError {
    #[error("square index {0} is off the board")]
    OutOfBounds(u8),
    #[error("no piece on the origin square")]
    EmptyOrigin,
    #[error("the piece on the origin square belongs to the opponent")]
    NotYourPiece,
    #[error("cannot capture your own piece")]
    FriendlyCapture,

    #[error("pawns cannot move backwards")]
    PawnBackward,
    #[error("pawn is blocked")]
    PawnBlocked,
    #[error("pawns move diagonally only to capture")]
    PawnDiagonalWithoutCapture,
    #[error("pawns cannot move like that")]
    PawnShape,
    #[error("a two-square pawn advance must start on the home rank")]
    PawnDoubleStepNotHome,
    #[error("a two-square pawn advance cannot jump over a piece")]
    PawnDoubleStepObstructed,

    #[error("knights cannot move like that")]
    KnightShape,
    #[error("bishops move diagonally")]
    BishopShape,
    #[error("bishop path is blocked")]
    BishopBlocked,
    #[error("rooks move along ranks and files")]
    RookShape,
    #[error("rook path is blocked")]
    RookBlocked,
    #[error("queens move along ranks, files and diagonals")]
    QueenShape,
    #[error("queen path is blocked")]
    QueenBlocked,
    #[error("kings move one square at a time")]
    KingShape,

    #[error(transparent)]
    Castle(#[from] CastleError),
    #[error("move would leave your king in check")]
    SelfCheck,
}

/// Check a proposed move for the side to move.
///
/// A pawn reaching the last rank comes back as [`MoveKind::NeedsPromotion`];
/// the caller completes it with [`Move::with_promotion`]. A king moved along
/// its rank beyond one square, or onto its own castling rook, is a castling
/// request and comes back with the rook's square as `to`.
pub fn validate_move(board: &Board, from: u8, to: u8) -> Result<Move, MoveError> {
    let result = check(board, from, to);
    if let Err(err) = &result {
        debug!(from, to, side = ?board.side_to_move, %err, "move rejected");
    }
    result
}

fn check(board: &Board, from: u8, to: u8) -> Result<Move, MoveError> {
    let from = Square::try_from(from).map_err(MoveError::OutOfBounds)?;
    let to = Square::try_from(to).map_err(MoveError::OutOfBounds)?;
    let color = board.side_to_move;

    let mover = board.piece_at(from).ok_or(MoveError::EmptyOrigin)?;
    if !mover.is_friendly_to(color) {
        return Err(MoveError::NotYourPiece);
    }

    let target = board.piece_at(to);
    let rook_target = target.is_some_and(|cp| cp.is(Piece::Rook));
    if target.is_some_and(|cp| cp.is_friendly_to(color)) && !(mover.is(Piece::King) && rook_target) {
        return Err(MoveError::FriendlyCapture);
    }

    let capture = board.is_enemy(to, color);
    let plain = if capture { MoveKind::Capture } else { MoveKind::Quiet };

    let kind = match mover.piece {
        Piece::Pawn => pawn_kind(board, from, to, color, capture)?,
        Piece::Knight => {
            if !knight_shape(from, to) {
                return Err(MoveError::KnightShape);
            }
            plain
        }
        Piece::Bishop => {
            slide(board, from, to, Direction::is_diagonal, MoveError::BishopShape, MoveError::BishopBlocked)?;
            plain
        }
        Piece::Rook => {
            slide(board, from, to, Direction::is_straight, MoveError::RookShape, MoveError::RookBlocked)?;
            plain
        }
        Piece::Queen => {
            slide(board, from, to, |_| true, MoveError::QueenShape, MoveError::QueenBlocked)?;
            plain
        }
        Piece::King => {
            if let Some(castle) = castle_request(board, from, to, color)? {
                // Castling checks king safety itself.
                return Ok(castle);
            }
            plain
        }
    };

    let mv = Move::new(from, to, kind);
    if leaves_king_in_check(board, mv) {
        return Err(MoveError::SelfCheck);
    }
    Ok(mv)
}

fn pawn_kind(
    board: &Board,
    from: Square,
    to: Square,
    color: Color,
    capture: bool,
) -> Result<MoveKind, MoveError> {
    let forward = match color {
        Color::White => to < from,
        Color::Black => to > from,
    };
    if !forward {
        return Err(MoveError::PawnBackward);
    }

    let sideways = horizontal_distance(from, to);
    match sideways {
        0 if !board.is_empty(to) => return Err(MoveError::PawnBlocked),
        1 if !capture && board.en_passant != Some(to) => {
            return Err(MoveError::PawnDiagonalWithoutCapture);
        }
        0 | 1 => {}
        _ => return Err(MoveError::PawnShape),
    }

    match (distance(from, to), sideways) {
        (8, 0) | (7 | 9, 1) => Ok(if on_promotion_row(to) {
            MoveKind::NeedsPromotion
        } else if capture {
            MoveKind::Capture
        } else if sideways == 1 {
            MoveKind::EnPassant
        } else {
            MoveKind::Quiet
        }),
        (16, 0) => {
            if !on_home_row(from, color) {
                Err(MoveError::PawnDoubleStepNotHome)
            } else if !board.is_empty(square_behind(to, color)) {
                Err(MoveError::PawnDoubleStepObstructed)
            } else {
                Ok(MoveKind::DoublePawnPush)
            }
        }
        _ => Err(MoveError::PawnShape),
    }
}

fn slide(
    board: &Board,
    from: Square,
    to: Square,
    fits: fn(Direction) -> bool,
    shape: MoveError,
    blocked: MoveError,
) -> Result<(), MoveError> {
    direction_between(from, to).filter(|&d| fits(d)).ok_or(shape)?;
    if is_blocked(board, from, to) {
        return Err(blocked);
    }
    Ok(())
}

/// `Ok(None)` for an ordinary king step, `Ok(Some(castle))` for a valid
/// castling request. A distant enemy-occupied target is a shape error.
fn castle_request(
    board: &Board,
    from: Square,
    to: Square,
    color: Color,
) -> Result<Option<Move>, MoveError> {
    let onto_own_rook = board.is_friendly(to, color);
    if in_king_range(from, to) && !onto_own_rook {
        return Ok(None);
    }
    // Beyond one step only an empty square or an own rook reads as castling.
    if board.is_enemy(to, color) {
        return Err(MoveError::KingShape);
    }

    let wing = match direction_between(from, to).and_then(Wing::from_direction) {
        Some(wing) => wing,
        None if onto_own_rook => return Err(CastleError::Moved.into()),
        None => return Err(MoveError::KingShape),
    };

    if onto_own_rook && board.castle_rook(color, wing) != Some(to) {
        return Err(CastleError::Moved.into());
    }
    Ok(Some(can_castle(board, wing)?))
}
