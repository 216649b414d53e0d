use crate::board::{Board, Color, ColoredPiece, Piece, Wing, castle_destinations};
use crate::geometry::square_behind;
use crate::moves::square_control::in_check;
use crate::moves::types::{Move, PromotionChoice};
use crate::square::Square;
use tracing::trace;

/// Forget any castling rook, of either colour, that stood on `sq`.
#[inline(always)]
fn drop_castle_rook_on(board: &mut Board, sq: Square) {
    for color in [Color::White, Color::Black] {
        for wing in Wing::BOTH {
            if board.castle_rook(color, wing) == Some(sq) {
                board.set_castle_rook(color, wing, None);
            }
        }
    }
}

/// Apply a validated or generated move.
///
/// Passing any other move is a caller bug; it is caught by debug
/// assertions only.
pub fn make_move(board: &mut Board, mv: Move) {
    let color = board.side_to_move;
    let moving = board[mv.from];
    debug_assert!(
        moving.is_some_and(|cp| cp.is_friendly_to(color)),
        "make_move: {mv} does not move a {color:?} piece"
    );
    debug_assert!(!mv.needs_promotion(), "make_move: {mv} has no promotion piece");

    if let Some(wing) = mv.castle_wing() {
        let (king_to, rook_to) = castle_destinations(color, wing);
        let rook = board[mv.to];

        // Both origins first: the destinations may overlap them.
        board[mv.from] = None;
        board[mv.to] = None;
        board[king_to] = moving;
        board[rook_to] = rook;

        board.set_king_square(color, king_to);
        board.clear_castling(color);
        board.en_passant = None;
    } else {
        drop_castle_rook_on(board, mv.from);
        drop_castle_rook_on(board, mv.to);

        let placed = match mv.promotion() {
            Some(choice) => Some(ColoredPiece::new(color, choice.piece())),
            None => moving,
        };
        board[mv.from] = None;
        board[mv.to] = placed;

        if mv.is_en_passant() {
            board[square_behind(mv.to, color)] = None;
        }

        if moving.is_some_and(|cp| cp.is(Piece::King)) {
            board.set_king_square(color, mv.to);
            board.clear_castling(color);
        }

        board.en_passant = if mv.is_double_pawn_push() {
            Some(square_behind(mv.to, color))
        } else {
            None
        };
    }

    board.side_to_move = color.opposite();
    trace!(%mv, side_to_move = ?board.side_to_move, "move applied");
}

/// Would playing `mv` leave the mover's own king attacked?
///
/// Works on a scratch copy, so `board` is never touched. A move still
/// waiting for its promotion piece is tested as if it promoted to a queen;
/// the choice cannot affect the mover's own king.
pub fn leaves_king_in_check(board: &Board, mv: Move) -> bool {
    let color = board.side_to_move;
    let mv = if mv.needs_promotion() {
        let capture = board.is_enemy(mv.to, color);
        mv.with_promotion(PromotionChoice::Queen, capture)
    } else {
        mv
    };

    let mut scratch = board.clone();
    make_move(&mut scratch, mv);
    in_check(&scratch, color)
}

#[inline(always)]
pub fn is_legal(board: &Board, mv: Move) -> bool {
    !leaves_king_in_check(board, mv)
}
