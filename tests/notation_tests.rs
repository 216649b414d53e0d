#[cfg(test)]
mod tests {
    use chess_law::board::Board;
    use chess_law::moves::types::{Move, MoveKind};
    use chess_law::notation::san;
    use chess_law::square::Square;

    fn sq(s: &str) -> Square {
        s.parse().unwrap()
    }

    fn quiet(from: &str, to: &str) -> Move {
        Move::new(sq(from), sq(to), MoveKind::Quiet)
    }

    #[test]
    fn knights_told_apart_by_file() {
        let b = Board::from_diagram(
            "....k...\
             ........\
             ........\
             ........\
             ........\
             .....N..\
             ........\
             .N..K...",
        )
        .unwrap();
        assert_eq!(san(&b, quiet("b1", "d2")), "Nbd2");
        assert_eq!(san(&b, quiet("f3", "d2")), "Nfd2");
        // only one knight reaches h4
        assert_eq!(san(&b, quiet("f3", "h4")), "Nh4");
    }

    #[test]
    fn rooks_on_one_file_use_the_rank() {
        let b = Board::from_diagram(
            "....k...\
             ........\
             ........\
             R.......\
             ........\
             ........\
             ........\
             R...K...",
        )
        .unwrap();
        assert_eq!(san(&b, quiet("a1", "a3")), "R1a3");
        assert_eq!(san(&b, quiet("a5", "a3")), "R5a3");
    }

    #[test]
    fn pinned_rival_does_not_count() {
        // The knight on f3 is pinned by the rook on h3, so Nb1-d2 is unique.
        let b = Board::from_diagram(
            "....k...\
             ........\
             ........\
             ........\
             ........\
             ....KN.r\
             ........\
             .N......",
        )
        .unwrap();
        assert_eq!(san(&b, quiet("b1", "d2")), "Nd2");
    }

    #[test]
    fn three_queens() {
        let b = Board::from_diagram(
            "........\
             .......k\
             ........\
             ........\
             .Q.Q....\
             ........\
             ...Q....\
             .......K",
        )
        .unwrap();
        // shares a file with d2 and a rank with b4
        assert_eq!(san(&b, quiet("d4", "c3")), "Qd4c3");
        assert_eq!(san(&b, quiet("d2", "c3")), "Q2c3");
        assert_eq!(san(&b, quiet("b4", "c3")), "Qbc3");
    }

    #[test]
    fn mate_and_check_suffixes() {
        let b = Board::from_diagram(
            "......k.\
             .....ppp\
             ........\
             ........\
             ........\
             ........\
             ........\
             R.....K.",
        )
        .unwrap();
        assert_eq!(san(&b, quiet("a1", "a8")), "Ra8#");
        assert_eq!(san(&b, quiet("a1", "a7")), "Ra7");

        let mut b = Board::from_diagram(
            ".....k..\
             ........\
             ........\
             ........\
             ........\
             ........\
             ........\
             ....K..R",
        )
        .unwrap();
        b.infer_castling();
        let castle = Move::new(sq("e1"), sq("h1"), MoveKind::CastleKingside);
        assert_eq!(san(&b, castle), "O-O+");
    }

    #[test]
    fn en_passant_reads_as_pawn_capture() {
        let mut b = Board::from_diagram(
            "....k...\
             ........\
             ........\
             ...pP...\
             ........\
             ........\
             ........\
             ....K...",
        )
        .unwrap();
        b.en_passant = Some(sq("d6"));
        let ep = Move::new(sq("e5"), sq("d6"), MoveKind::EnPassant);
        assert_eq!(san(&b, ep), "exd6");
    }

    #[test]
    fn san_does_not_touch_the_board() {
        let b = Board::new();
        let before = b.clone();
        let _ = san(&b, Move::new(sq("e2"), sq("e4"), MoveKind::DoublePawnPush));
        assert_eq!(b, before);
    }
}
