use crate::board::{Board, Color, Piece, Wing};
use crate::geometry::{Direction, king_steps, knight_jumps, on_home_row, on_promotion_row, ray};
use crate::moves::castle::can_castle;
use crate::moves::execute::is_legal;
use crate::moves::types::{Move, MoveBuffer, MoveKind, PromotionChoice};
use crate::square::Square;

// Representative promotion pieces offered by the generator. Rook and bishop
// promotions stay available through validation.
const GENERATED_PROMOTIONS: [PromotionChoice; 2] = [PromotionChoice::Queen, PromotionChoice::Knight];

/// Push `mv` if it does not expose the mover's king.
#[inline(always)]
fn push_if_legal(board: &Board, mv: Move, move_list: &mut impl MoveBuffer) {
    if is_legal(board, mv) {
        move_list.push(mv);
    }
}

#[inline(always)]
fn plain_kind(capture: bool) -> MoveKind {
    if capture { MoveKind::Capture } else { MoveKind::Quiet }
}

fn push_pawn_move(
    board: &Board,
    from: Square,
    to: Square,
    capture: bool,
    move_list: &mut impl MoveBuffer,
) {
    if !on_promotion_row(to) {
        push_if_legal(board, Move::new(from, to, plain_kind(capture)), move_list);
        return;
    }
    for choice in GENERATED_PROMOTIONS {
        let kind = if capture {
            MoveKind::PromotionCapture(choice)
        } else {
            MoveKind::Promotion(choice)
        };
        push_if_legal(board, Move::new(from, to, kind), move_list);
    }
}

fn generate_pawn_moves(board: &Board, from: Square, color: Color, move_list: &mut impl MoveBuffer) {
    let forward: i8 = match color {
        Color::White => -1,
        Color::Black => 1,
    };
    let (file, row) = (from.file() as i8, from.row() as i8);

    if let Some(one) = Square::from_coords(file, row + forward) {
        if board.is_empty(one) {
            push_pawn_move(board, from, one, false, move_list);

            if on_home_row(from, color) {
                if let Some(two) = Square::from_coords(file, row + 2 * forward) {
                    if board.is_empty(two) {
                        push_if_legal(board, Move::new(from, two, MoveKind::DoublePawnPush), move_list);
                    }
                }
            }
        }
    }

    for side in [-1, 1] {
        let Some(to) = Square::from_coords(file + side, row + forward) else {
            continue;
        };
        if board.is_enemy(to, color) {
            push_pawn_move(board, from, to, true, move_list);
        } else if board.en_passant == Some(to) {
            push_if_legal(board, Move::new(from, to, MoveKind::EnPassant), move_list);
        }
    }
}

fn generate_jump_moves(
    board: &Board,
    from: Square,
    color: Color,
    targets: &[Square],
    move_list: &mut impl MoveBuffer,
) {
    for &to in targets {
        if board.is_friendly(to, color) {
            continue;
        }
        let kind = plain_kind(board.is_enemy(to, color));
        push_if_legal(board, Move::new(from, to, kind), move_list);
    }
}

fn generate_slider_moves(
    board: &Board,
    from: Square,
    color: Color,
    directions: &[Direction],
    move_list: &mut impl MoveBuffer,
) {
    for &dir in directions {
        for to in ray(dir, from) {
            match board.piece_at(to) {
                None => push_if_legal(board, Move::new(from, to, MoveKind::Quiet), move_list),
                Some(cp) => {
                    if cp.is_enemy_of(color) {
                        push_if_legal(board, Move::new(from, to, MoveKind::Capture), move_list);
                    }
                    break;
                }
            }
        }
    }
}

/// Fill `move_list` with every legal move for the side to move.
///
/// Promotions are offered as queen and knight only. The list is empty
/// exactly when the side to move has no legal move.
pub fn generate_legal(board: &Board, move_list: &mut impl MoveBuffer) {
    move_list.clear();
    let color = board.side_to_move;

    for (from, cp) in board.pieces() {
        if !cp.is_friendly_to(color) {
            continue;
        }
        match cp.piece {
            Piece::Pawn => generate_pawn_moves(board, from, color, move_list),
            Piece::Knight => generate_jump_moves(board, from, color, knight_jumps(from), move_list),
            Piece::Bishop => generate_slider_moves(board, from, color, &Direction::DIAGONAL, move_list),
            Piece::Rook => generate_slider_moves(board, from, color, &Direction::STRAIGHT, move_list),
            Piece::Queen => generate_slider_moves(board, from, color, &Direction::ALL, move_list),
            Piece::King => {
                generate_jump_moves(board, from, color, king_steps(from), move_list);
                // A king step onto the castling rook is filtered above; the
                // castle itself is offered here.
                for wing in Wing::BOTH {
                    if let Ok(mv) = can_castle(board, wing) {
                        move_list.push(mv);
                    }
                }
            }
        }
    }
}

/// Convenience wrapper returning the legal moves as a `Vec`.
pub fn generate_moves(board: &Board) -> Vec<Move> {
    let mut moves = Vec::with_capacity(64);
    generate_legal(board, &mut moves);
    moves
}
