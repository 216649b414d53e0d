#[cfg(test)]
mod tests {
    use chess_law::board::{Color, Piece};
    use chess_law::game::{Game, GameError, MoveResult};
    use chess_law::moves::types::{MoveKind, PromotionChoice};
    use chess_law::moves::validate::MoveError;
    use chess_law::square::Square;
    use chess_law::status::GameStatus;

    fn sq(s: &str) -> Square {
        s.parse().unwrap()
    }

    fn idx(s: &str) -> u8 {
        sq(s).index()
    }

    const PROMOTION_RACE: &str = "....k...\
                                  .P......\
                                  ........\
                                  ........\
                                  ........\
                                  ........\
                                  ......p.\
                                  ....K...";

    #[test]
    fn promotion_waits_for_a_piece() {
        let mut g = Game::new();
        g.set_board(PROMOTION_RACE).unwrap();

        assert_eq!(g.try_move(idx("b7"), idx("b8")), Ok(MoveResult::ChoosePromotion));
        assert_eq!(g.pending_promotion().map(|m| m.kind), Some(MoveKind::NeedsPromotion));
        // nothing moved yet
        assert_eq!(g.board().piece_type_at(sq("b7")), Some(Piece::Pawn));
        assert_eq!(g.active_player(), Color::White);
        assert_eq!(
            g.try_move(idx("e1"), idx("d1")),
            Err(GameError::PromotionPending)
        );

        // under-promotion is allowed through the pending path
        assert_eq!(g.promote(PromotionChoice::Rook), Ok(MoveResult::GameContinues));
        assert_eq!(g.board().piece_type_at(sq("b8")), Some(Piece::Rook));
        assert_eq!(g.last_move_san(), Some("b8=R+"));
        assert_eq!(g.active_player(), Color::Black);
        assert_eq!(g.pending_promotion(), None);
    }

    #[test]
    fn black_promotes_to_bishop() {
        let mut g = Game::new();
        g.set_board(PROMOTION_RACE).unwrap();
        g.try_move(idx("e1"), idx("d2")).unwrap();
        assert_eq!(g.try_move(idx("g2"), idx("g1")), Ok(MoveResult::ChoosePromotion));
        assert_eq!(g.promote(PromotionChoice::Bishop), Ok(MoveResult::GameContinues));
        assert_eq!(g.board().piece_type_at(sq("g1")), Some(Piece::Bishop));
        assert_eq!(g.promote(PromotionChoice::Queen), Err(GameError::NoPendingPromotion));
    }

    #[test]
    fn generated_promotions_play_directly() {
        let mut g = Game::new();
        g.set_board(PROMOTION_RACE).unwrap();
        let knight = *g
            .moves()
            .iter()
            .find(|m| m.kind == MoveKind::Promotion(PromotionChoice::Knight))
            .expect("knight promotion offered");
        assert_eq!(g.make_move(knight), Ok(MoveResult::GameContinues));
        assert_eq!(g.board().piece_type_at(sq("b8")), Some(Piece::Knight));
    }

    #[test]
    fn set_board_infers_castling_and_resets() {
        let mut g = Game::new();
        g.try_move(idx("e2"), idx("e4")).unwrap();
        g.set_board(
            "r...k..r\
             ........\
             ........\
             ........\
             ........\
             ........\
             ........\
             R...K..R",
        )
        .unwrap();
        assert!(g.history().is_empty());
        assert_eq!(g.active_player(), Color::White);
        assert_eq!(g.moves().iter().filter(|m| m.is_castling()).count(), 2);
        assert_eq!(g.try_move(idx("e1"), idx("c1")), Ok(MoveResult::GameContinues));
        assert_eq!(g.last_move_san(), Some("O-O-O"));
    }

    #[test]
    fn bad_diagram_keeps_the_old_game() {
        let mut g = Game::new();
        let before = g.diagram();
        assert!(matches!(g.set_board("k"), Err(GameError::Diagram(_))));
        assert!(matches!(
            g.set_board(&".".repeat(64)),
            Err(GameError::Diagram(_))
        ));
        assert_eq!(g.diagram(), before);
    }

    #[test]
    fn handing_over_the_move() {
        let mut g = Game::new();
        g.try_move(idx("e2"), idx("e4")).unwrap();
        assert_eq!(g.board().en_passant, Some(sq("e3")));
        g.set_active_player(Color::White);
        assert_eq!(g.active_player(), Color::White);
        assert_eq!(g.board().en_passant, None);
        assert_eq!(g.try_move(idx("d2"), idx("d4")), Ok(MoveResult::GameContinues));
        assert_eq!(
            g.try_move(idx("d4"), idx("d5")),
            Err(GameError::Move(MoveError::NotYourPiece))
        );
    }

    #[test]
    fn stalemate_is_reported() {
        let mut g = Game::new();
        g.set_board(
            "k.......\
             ........\
             ..K.....\
             ........\
             ........\
             ........\
             ........\
             .Q......",
        )
        .unwrap();
        // Qb6 leaves the black king on a8 with no move
        assert_eq!(g.try_move(idx("b1"), idx("b6")), Ok(MoveResult::Stalemate));
        assert_eq!(g.status(), GameStatus::Stalemate);
        assert!(g.moves().is_empty());
        assert_eq!(g.try_move(idx("a8"), idx("a7")), Err(GameError::NoMoves));
    }

    #[test]
    fn new_game_resets() {
        let mut g = Game::new();
        g.try_move(idx("g1"), idx("f3")).unwrap();
        g.new_game();
        assert!(g.history().is_empty());
        assert_eq!(g.diagram(), Game::new().diagram());
    }
}
