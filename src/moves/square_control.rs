use crate::board::{Board, Color, ColoredPiece, Piece};
use crate::geometry::{
    Direction, direction_between, in_king_range, knight_jumps, pawn_attacks, ray,
};
use crate::square::Square;

/// First occupied square in `dir` from `from`, with its piece.
#[inline]
pub fn nearest_occupied(board: &Board, dir: Direction, from: Square) -> Option<(Square, ColoredPiece)> {
    ray(dir, from).find_map(|sq| board.piece_at(sq).map(|cp| (sq, cp)))
}

/// True if something stands strictly between `from` and `to` on the line
/// joining them. Squares that share no line count as blocked.
pub fn is_blocked(board: &Board, from: Square, to: Square) -> bool {
    let Some(dir) = direction_between(from, to) else {
        return true;
    };
    ray(dir, from)
        .take_while(|&sq| sq != to)
        .any(|sq| !board.is_empty(sq))
}

/// True if any piece of `attacker` attacks `target`.
///
/// Walks each of the eight directions only as far as the nearest piece;
/// that piece is the only one on the line that can reach `target`.
pub fn is_threatened_by(board: &Board, target: Square, attacker: Color) -> bool {
    for dir in Direction::ALL {
        let Some((sq, cp)) = nearest_occupied(board, dir, target) else {
            continue;
        };
        if !cp.is_friendly_to(attacker) {
            continue;
        }
        let hit = match cp.piece {
            Piece::Queen => true,
            Piece::Rook => dir.is_straight(),
            Piece::Bishop => dir.is_diagonal(),
            Piece::King => in_king_range(sq, target),
            Piece::Pawn => dir.is_diagonal() && pawn_attacks(sq, target, attacker),
            Piece::Knight => false,
        };
        if hit {
            return true;
        }
    }

    knight_jumps(target)
        .iter()
        .any(|&sq| board.piece_at(sq) == Some(ColoredPiece::new(attacker, Piece::Knight)))
}

/// True if the piece on `attacker` attacks `victim`. An empty `attacker`
/// square attacks nothing.
pub fn is_threatened_by_square(board: &Board, victim: Square, attacker: Square) -> bool {
    let Some(cp) = board.piece_at(attacker) else {
        return false;
    };
    if victim == attacker {
        return false;
    }

    match cp.piece {
        Piece::Pawn => pawn_attacks(attacker, victim, cp.color),
        Piece::Knight => knight_jumps(attacker).contains(&victim),
        Piece::King => in_king_range(attacker, victim),
        Piece::Bishop | Piece::Rook | Piece::Queen => {
            let Some(dir) = direction_between(attacker, victim) else {
                return false;
            };
            let shape_ok = match cp.piece {
                Piece::Bishop => dir.is_diagonal(),
                Piece::Rook => dir.is_straight(),
                _ => true,
            };
            shape_ok && !is_blocked(board, attacker, victim)
        }
    }
}

/// True if `side`'s king is attacked. A board with no king for `side` is
/// never in check.
#[inline]
pub fn in_check(board: &Board, side: Color) -> bool {
    board
        .king_square(side)
        .is_some_and(|king| is_threatened_by(board, king, side.opposite()))
}

#[inline(always)]
pub fn current_player_in_check(board: &Board) -> bool {
    in_check(board, board.side_to_move)
}
