//! Standard algebraic notation for moves.

use crate::board::{Board, Piece, Wing};
use crate::moves::execute::make_move;
use crate::moves::movegen::generate_moves;
use crate::moves::square_control::{current_player_in_check, is_threatened_by_square};
use crate::moves::types::{Move, PromotionChoice};
use crate::moves::validate::validate_move;
use crate::square::Square;

/// Other pieces of the same kind and colour that could also legally reach
/// `mv.to`.
fn rivals(board: &Board, mv: Move, piece: Piece) -> Vec<Square> {
    let color = board.side_to_move;
    board
        .pieces()
        .filter(|&(sq, cp)| sq != mv.from && cp.color == color && cp.is(piece))
        .filter(|&(sq, _)| is_threatened_by_square(board, mv.to, sq))
        .filter(|&(sq, _)| validate_move(board, sq.index(), mv.to.index()).is_ok())
        .map(|(sq, _)| sq)
        .collect()
}

/// File, rank, or both, whichever first tells `from` apart from `rivals`.
fn disambiguation(from: Square, rivals: &[Square]) -> String {
    if rivals.is_empty() {
        return String::new();
    }
    if rivals.iter().all(|r| r.file() != from.file()) {
        from.file_char().to_string()
    } else if rivals.iter().all(|r| r.rank() != from.rank()) {
        from.rank_char().to_string()
    } else {
        from.to_string()
    }
}

/// SAN for `mv`, played from `board`. `board` is the position before the
/// move; it is not modified.
///
/// A move still waiting for its promotion piece is written as a queen
/// promotion.
pub fn san(board: &Board, mv: Move) -> String {
    let mv = if mv.needs_promotion() {
        mv.with_promotion(PromotionChoice::Queen, board.is_enemy(mv.to, board.side_to_move))
    } else {
        mv
    };

    let mut text = match mv.castle_wing() {
        Some(Wing::Kingside) => "O-O".to_string(),
        Some(Wing::Queenside) => "O-O-O".to_string(),
        None => {
            let piece = board.piece_type_at(mv.from).unwrap_or(Piece::Pawn);
            let mut s = String::with_capacity(8);
            match piece.letter() {
                Some(letter) => {
                    s.push(letter);
                    s.push_str(&disambiguation(mv.from, &rivals(board, mv, piece)));
                }
                None if mv.is_capture() => s.push(mv.from.file_char()),
                None => {}
            }
            if mv.is_capture() {
                s.push('x');
            }
            s.push_str(&mv.to.to_string());
            if let Some(choice) = mv.promotion() {
                s.push('=');
                s.push(choice.piece().letter().unwrap_or('Q'));
            }
            s
        }
    };

    let mut after = board.clone();
    make_move(&mut after, mv);
    if current_player_in_check(&after) {
        text.push(if generate_moves(&after).is_empty() { '#' } else { '+' });
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::moves::types::MoveKind;

    fn sq(s: &str) -> Square {
        s.parse().unwrap()
    }

    #[test]
    fn simple_moves() {
        let b = Board::new();
        assert_eq!(san(&b, Move::new(sq("e2"), sq("e4"), MoveKind::DoublePawnPush)), "e4");
        assert_eq!(san(&b, Move::new(sq("g1"), sq("f3"), MoveKind::Quiet)), "Nf3");
    }

    #[test]
    fn pawn_capture_names_its_file() {
        let b = Board::from_diagram(
            "....k...\
             ........\
             ........\
             ...p....\
             ....P...\
             ........\
             ........\
             ....K...",
        )
        .unwrap();
        assert_eq!(san(&b, Move::new(sq("e4"), sq("d5"), MoveKind::Capture)), "exd5");
    }

    #[test]
    fn castles() {
        let mut b = Board::from_diagram(
            "....k...\
             ........\
             ........\
             ........\
             ........\
             ........\
             ........\
             R...K..R",
        )
        .unwrap();
        b.infer_castling();
        assert_eq!(san(&b, Move::new(sq("e1"), sq("h1"), MoveKind::CastleKingside)), "O-O");
        assert_eq!(san(&b, Move::new(sq("e1"), sq("a1"), MoveKind::CastleQueenside)), "O-O-O");
    }

    #[test]
    fn promotion_with_check() {
        let b = Board::from_diagram(
            "......k.\
             P.......\
             ........\
             ........\
             ........\
             ........\
             ........\
             ....K...",
        )
        .unwrap();
        let mv = Move::new(sq("a7"), sq("a8"), MoveKind::Promotion(PromotionChoice::Rook));
        assert_eq!(san(&b, mv), "a8=R+");
    }

    #[test]
    fn disambiguation_rules() {
        assert_eq!(disambiguation(sq("b1"), &[]), "");
        assert_eq!(disambiguation(sq("b1"), &[sq("f3")]), "b");
        assert_eq!(disambiguation(sq("a1"), &[sq("a5")]), "1");
        assert_eq!(disambiguation(sq("d4"), &[sq("d2"), sq("b4")]), "d4");
    }
}
