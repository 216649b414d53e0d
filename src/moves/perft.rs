use crate::board::Board;
use crate::moves::{
    execute::make_move,
    movegen::{generate_legal, generate_moves},
    square_control::current_player_in_check,
    types::{Move, MoveList},
};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

const MAX_LOG_DEPTH: u32 = 3; // only log root details for shallow runs

/// Leaf statistics, counted on the moves that reach the final ply.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerftCounters {
    pub nodes: u64,
    pub captures: u64,
    pub ep_captures: u64,
    pub castles: u64,
    pub promotions: u64,
    pub checks: u64,
    pub checkmates: u64,
}

impl PerftCounters {
    pub fn add(&mut self, o: &PerftCounters) {
        self.nodes += o.nodes;
        self.captures += o.captures;
        self.ep_captures += o.ep_captures;
        self.castles += o.castles;
        self.promotions += o.promotions;
        self.checks += o.checks;
        self.checkmates += o.checkmates;
    }
}

fn perft_recursive(board: &Board, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }

    let mut moves = MoveList::new();
    generate_legal(board, &mut moves);

    // Bulk count the last ply.
    if depth == 1 {
        return moves.len() as u64;
    }

    moves
        .iter()
        .map(|&mv| {
            let mut child = board.clone();
            make_move(&mut child, mv);
            perft_recursive(&child, depth - 1)
        })
        .sum()
}

/// Number of leaf positions `depth` plies below `board`.
#[instrument(skip(board))]
pub fn perft(board: &Board, depth: u32) -> u64 {
    let nodes = perft_recursive(board, depth);
    debug!(depth, nodes, "perft: done");
    nodes
}

/// Perft split by root move.
#[instrument(skip(board))]
pub fn perft_divide(board: &Board, depth: u32) -> Vec<(Move, u64)> {
    if depth == 0 {
        return Vec::new();
    }

    let mut moves = MoveList::new();
    generate_legal(board, &mut moves);
    if depth <= MAX_LOG_DEPTH {
        debug!(depth, moves = moves.len(), "divide: root legal moves");
    }

    let mut out = Vec::with_capacity(moves.len());
    for &mv in moves.iter() {
        let mut child = board.clone();
        make_move(&mut child, mv);
        let count = perft_recursive(&child, depth - 1);

        if depth <= MAX_LOG_DEPTH {
            debug!(%mv, nodes = count, "divide: root child total");
        }
        out.push((mv, count));
    }

    let total: u64 = out.iter().map(|(_, n)| n).sum();
    debug!(depth, total, "divide: total");
    out
}

fn perft_count_recursive(board: &Board, depth: u32, out: &mut PerftCounters) {
    let mut moves = MoveList::new();
    generate_legal(board, &mut moves);

    for &mv in moves.iter() {
        let mut child = board.clone();
        make_move(&mut child, mv);

        if depth > 1 {
            perft_count_recursive(&child, depth - 1, out);
            continue;
        }

        // --- breakdown tags on the leaf edge ---
        out.nodes += 1;
        if mv.is_capture() {
            out.captures += 1;
            if mv.is_en_passant() {
                out.ep_captures += 1;
            }
        }
        if mv.is_castling() {
            out.castles += 1;
        }
        if mv.is_promotion() {
            out.promotions += 1;
        }
        if current_player_in_check(&child) {
            out.checks += 1;
            if generate_moves(&child).is_empty() {
                out.checkmates += 1;
            }
        }
    }
}

/// Perft with leaf statistics. Promotions count the generated queen and
/// knight choices only.
#[instrument(skip(board))]
pub fn perft_with_breakdown(board: &Board, depth: u32) -> PerftCounters {
    let mut out = PerftCounters::default();
    if depth == 0 {
        out.nodes = 1;
    } else {
        perft_count_recursive(board, depth, &mut out);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn depth_zero_is_one_node() {
        assert_eq!(perft(&Board::new(), 0), 1);
        assert!(perft_divide(&Board::new(), 0).is_empty());
    }

    #[test]
    fn shallow_start_counts() {
        let b = Board::new();
        assert_eq!(perft(&b, 1), 20);
        assert_eq!(perft(&b, 2), 400);
    }

    #[test]
    fn counters_add_up() {
        let mut total = PerftCounters::default();
        let one = PerftCounters { nodes: 3, captures: 1, ..Default::default() };
        total.add(&one);
        total.add(&one);
        assert_eq!(total.nodes, 6);
        assert_eq!(total.captures, 2);
    }
}
