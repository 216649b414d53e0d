//! Game session: a board plus history, cached legal moves and a parked
//! promotion. All chess law lives in `moves`; this layer only forwards.

use crate::board::{Board, Color, DiagramError};
use crate::moves::execute;
use crate::moves::movegen::generate_moves;
use crate::moves::types::{Move, PromotionChoice};
use crate::moves::validate::{MoveError, validate_move};
use crate::notation::san;
use crate::square::Square;
use crate::status::{GameStatus, classify};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

/// What happened after a move, from the caller's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveResult {
    GameContinues,
    WhiteWins,
    BlackWins,
    Stalemate,
    /// The move was parked; call [`Game::promote`] with a piece.
    ChoosePromotion,
}

impl From<GameStatus> for MoveResult {
    fn from(status: GameStatus) -> Self {
        match status {
            GameStatus::InPlay => MoveResult::GameContinues,
            GameStatus::Checkmate { winner: Color::White } => MoveResult::WhiteWins,
            GameStatus::Checkmate { winner: Color::Black } => MoveResult::BlackWins,
            GameStatus::Stalemate => MoveResult::Stalemate,
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error(transparent)]
    Move(#[from] MoveError),
    #[error(transparent)]
    Diagram(#[from] DiagramError),
    #[error("no promotion is waiting for a piece")]
    NoPendingPromotion,
    #[error("choose a promotion piece first")]
    PromotionPending,
    #[error("the game is over")]
    NoMoves,
    #[error("{0} is not a legal move here")]
    IllegalMove(Move),
}

/// A move as it was played.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayedMove {
    pub mv: Move,
    pub san: String,
}

#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    history: Vec<PlayedMove>,
    legal: Vec<Move>,
    pending: Option<Move>,
}

impl Game {
    pub fn new() -> Self {
        Game::from_board(Board::new())
    }

    fn from_board(board: Board) -> Self {
        let legal = generate_moves(&board);
        Game {
            board,
            history: Vec::new(),
            legal,
            pending: None,
        }
    }

    /// Back to the standard starting position.
    pub fn new_game(&mut self) {
        *self = Game::new();
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn diagram(&self) -> String {
        self.board.to_diagram()
    }

    /// Replace the position with a diagram. Castling rights are inferred
    /// from the placement, White is to move and the history is cleared.
    pub fn set_board(&mut self, diagram: &str) -> Result<(), GameError> {
        let mut board = Board::from_diagram(diagram)?;
        board.infer_castling();
        *self = Game::from_board(board);
        Ok(())
    }

    /// Validate and play a move given as square indices. A pawn reaching the
    /// last rank is parked until [`Game::promote`] supplies the piece.
    pub fn try_move(&mut self, from: u8, to: u8) -> Result<MoveResult, GameError> {
        if self.pending.is_some() {
            return Err(GameError::PromotionPending);
        }
        if self.legal.is_empty() {
            return Err(GameError::NoMoves);
        }

        let mv = validate_move(&self.board, from, to)?;
        if mv.needs_promotion() {
            self.pending = Some(mv);
            return Ok(MoveResult::ChoosePromotion);
        }
        Ok(self.play(mv))
    }

    /// Complete the parked promotion with any of the four pieces.
    pub fn promote(&mut self, choice: PromotionChoice) -> Result<MoveResult, GameError> {
        let pending = self.pending.take().ok_or(GameError::NoPendingPromotion)?;
        let capture = self.board.is_enemy(pending.to, self.board.side_to_move);
        Ok(self.play(pending.with_promotion(choice, capture)))
    }

    /// Play an already typed move, such as one taken from [`Game::moves`].
    /// The move is checked against the validator before it is applied.
    pub fn make_move(&mut self, mv: Move) -> Result<MoveResult, GameError> {
        if self.pending.is_some() {
            return Err(GameError::PromotionPending);
        }
        if self.legal.is_empty() {
            return Err(GameError::NoMoves);
        }

        let checked = validate_move(&self.board, mv.from.index(), mv.to.index())?;
        let matches = if checked.needs_promotion() {
            mv.promotion().is_some()
                && mv.is_capture() == self.board.is_enemy(mv.to, self.board.side_to_move)
        } else {
            checked == mv
        };
        if !matches {
            return Err(GameError::IllegalMove(mv));
        }
        Ok(self.play(mv))
    }

    fn play(&mut self, mv: Move) -> MoveResult {
        let text = san(&self.board, mv);
        execute::make_move(&mut self.board, mv);
        self.history.push(PlayedMove { mv, san: text });
        self.legal = generate_moves(&self.board);

        let result = MoveResult::from(self.status());
        if result != MoveResult::GameContinues {
            info!(?result, moves = self.history.len(), "game finished");
        }
        result
    }

    /// Legal moves for the side to move (promotions as queen and knight).
    pub fn moves(&self) -> &[Move] {
        &self.legal
    }

    /// Does the piece on `sq` have at least one legal move?
    pub fn can_move(&self, sq: Square) -> bool {
        self.legal.iter().any(|m| m.from == sq)
    }

    pub fn active_player(&self) -> Color {
        self.board.side_to_move
    }

    /// Hand the move to `color`. Any en passant chance and parked promotion
    /// are dropped.
    pub fn set_active_player(&mut self, color: Color) {
        self.board.set_side_to_move(color);
        self.board.en_passant = None;
        self.pending = None;
        self.legal = generate_moves(&self.board);
    }

    /// Status of the current position, from the cached legal moves.
    pub fn status(&self) -> GameStatus {
        classify(&self.board, !self.legal.is_empty())
    }

    pub fn pending_promotion(&self) -> Option<Move> {
        self.pending
    }

    pub fn history(&self) -> &[PlayedMove] {
        &self.history
    }

    pub fn last_move_san(&self) -> Option<&str> {
        self.history.last().map(|p| p.san.as_str())
    }
}

impl Default for Game {
    fn default() -> Self {
        Game::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::moves::types::MoveKind;

    fn idx(s: &str) -> u8 {
        s.parse::<Square>().unwrap().index()
    }

    #[test]
    fn fresh_game() {
        let g = Game::new();
        assert_eq!(g.active_player(), Color::White);
        assert_eq!(g.moves().len(), 20);
        assert!(g.history().is_empty());
        assert_eq!(g.last_move_san(), None);
        assert!(g.can_move("g1".parse().unwrap()));
        assert!(!g.can_move("d1".parse().unwrap()));
    }

    #[test]
    fn moves_are_recorded_in_san() {
        let mut g = Game::new();
        assert_eq!(g.try_move(idx("e2"), idx("e4")), Ok(MoveResult::GameContinues));
        assert_eq!(g.try_move(idx("e7"), idx("e5")), Ok(MoveResult::GameContinues));
        assert_eq!(g.try_move(idx("g1"), idx("f3")), Ok(MoveResult::GameContinues));
        let sans: Vec<&str> = g.history().iter().map(|p| p.san.as_str()).collect();
        assert_eq!(sans, ["e4", "e5", "Nf3"]);
        assert_eq!(g.active_player(), Color::Black);
    }

    #[test]
    fn rejected_move_changes_nothing() {
        let mut g = Game::new();
        let before = g.diagram();
        assert_eq!(
            g.try_move(idx("e2"), idx("e5")),
            Err(GameError::Move(MoveError::PawnShape))
        );
        assert_eq!(g.diagram(), before);
        assert!(g.history().is_empty());
    }

    #[test]
    fn fools_mate() {
        let mut g = Game::new();
        for (from, to) in [("f2", "f3"), ("e7", "e5"), ("g2", "g4")] {
            g.try_move(idx(from), idx(to)).unwrap();
        }
        assert_eq!(g.try_move(idx("d8"), idx("h4")), Ok(MoveResult::BlackWins));
        assert_eq!(g.last_move_san(), Some("Qh4#"));
        assert_eq!(g.try_move(idx("a2"), idx("a3")), Err(GameError::NoMoves));
    }

    #[test]
    fn cached_status_matches_fresh_classification() {
        use crate::status::position_status;

        let mut g = Game::new();
        for (from, to) in [("f2", "f3"), ("e7", "e5"), ("g2", "g4"), ("d8", "h4")] {
            g.try_move(idx(from), idx(to)).unwrap();
            assert_eq!(g.status(), position_status(g.board()));
        }
        assert_eq!(g.status(), GameStatus::Checkmate { winner: Color::Black });

        // handing the move over refreshes the cache as well
        g.set_active_player(Color::Black);
        assert_eq!(g.status(), position_status(g.board()));
        assert_eq!(g.status(), GameStatus::InPlay);
    }

    #[test]
    fn promote_without_pending() {
        let mut g = Game::new();
        assert_eq!(g.promote(PromotionChoice::Queen), Err(GameError::NoPendingPromotion));
    }

    #[test]
    fn make_move_rejects_mismatched_kind() {
        let mut g = Game::new();
        let wrong = Move::new("e2".parse().unwrap(), "e4".parse().unwrap(), MoveKind::Quiet);
        assert_eq!(g.make_move(wrong), Err(GameError::IllegalMove(wrong)));
        let first = g.moves()[0];
        assert_eq!(g.make_move(first), Ok(MoveResult::GameContinues));
    }
}
