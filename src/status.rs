use crate::board::{Board, Color};
use crate::moves::movegen::generate_legal;
use crate::moves::square_control::current_player_in_check;
use crate::moves::types::MoveList;
use serde::{Deserialize, Serialize};
use tracing::debug;

// Kept apart from Board so the board module never depends on movegen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameStatus {
    InPlay,
    Checkmate { winner: Color },
    Stalemate,
}

impl GameStatus {
    pub fn is_over(self) -> bool {
        self != GameStatus::InPlay
    }
}

/// Classify the position for the side to move.
///
/// With at least one legal move the game goes on. Without one, a king in
/// check is mated and the other side wins; otherwise it is stalemate.
pub fn position_status(board: &Board) -> GameStatus {
    let mut legal = MoveList::new();
    generate_legal(board, &mut legal);
    classify(board, !legal.is_empty())
}

/// [`position_status`] for a caller that already knows whether the side to
/// move has a legal move.
pub fn classify(board: &Board, has_legal_move: bool) -> GameStatus {
    if has_legal_move {
        return GameStatus::InPlay;
    }

    let status = if current_player_in_check(board) {
        GameStatus::Checkmate {
            winner: board.side_to_move.opposite(),
        }
    } else {
        GameStatus::Stalemate
    };
    debug!(?status, "terminal position");
    status
}
