use chess_law::board::Color;
use chess_law::game::{Game, MoveResult};
use chess_law::logger::{DEFAULT_FILTER, DEFAULT_LOG_PATH, init_logging};
use chess_law::moves::perft::{perft, perft_divide};
use chess_law::moves::types::PromotionChoice;
use chess_law::square::Square;
use indicatif::{ProgressBar, ProgressStyle};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use std::io::{self, BufRead, Write};
use std::time::Instant;
use tracing::{info, warn};

// Self-play games are cut off here and scored as unfinished.
const MAX_RANDOM_PLIES: usize = 400;

fn main() {
    if let Err(e) = init_logging(DEFAULT_LOG_PATH, DEFAULT_FILTER) {
        eprintln!("warning: logging disabled ({e})");
    }
    info!("chess-law shell started");

    let mut game = Game::new();
    println!("{}", game.board());
    prompt(&game);

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l.trim().to_string(),
            Err(_) => break,
        };
        if line.is_empty() {
            prompt(&game);
            continue;
        }

        let parts: Vec<&str> = line.split_whitespace().collect();
        match parts[0] {
            "quit" | "exit" => break,
            "d" | "display" => println!("{}", game.board()),
            "moves" => handle_moves(&game),
            "new" => {
                game.new_game();
                println!("{}", game.board());
            }
            "board" => handle_board(&parts, &mut game),
            "promote" => handle_promote(&parts, &mut game),
            "perft" => handle_perft(&parts, &game, false),
            "divide" => handle_perft(&parts, &game, true),
            "random" => handle_random(&parts),
            "help" => print_help(),
            other => handle_move_text(other, &mut game),
        }
        prompt(&game);
    }
}

fn prompt(game: &Game) {
    let side = match game.active_player() {
        Color::White => "white",
        Color::Black => "black",
    };
    print!("{side}> ");
    let _ = io::stdout().flush();
}

fn print_help() {
    println!("commands:");
    println!("  e2e4                 play a move (king onto its rook or two squares sideways castles)");
    println!("  promote q|r|b|n      finish a pending promotion");
    println!("  moves                list legal moves");
    println!("  d                    show the board");
    println!("  new                  start a new game");
    println!("  board <64 cells> [w|b]  load a diagram, a8 first, '.' for empty");
    println!("  perft <n> / divide <n>  count leaf nodes");
    println!("  random <games>       random self-play");
    println!("  quit");
}

fn handle_moves(game: &Game) {
    let list: Vec<String> = game.moves().iter().map(|m| format!("{m:#}")).collect();
    println!("{} moves: {}", list.len(), list.join(", "));
}

fn handle_board(parts: &[&str], game: &mut Game) {
    let Some(diagram) = parts.get(1) else {
        println!("usage: board <64 cells> [w|b]");
        return;
    };
    if let Err(e) = game.set_board(diagram) {
        println!("error: {e}");
        return;
    }
    if parts.get(2) == Some(&"b") {
        game.set_active_player(Color::Black);
    }
    println!("{}", game.board());
}

fn handle_move_text(text: &str, game: &mut Game) {
    let squares = (text.get(0..2), text.get(2..4));
    let (Some(Ok(from)), Some(Ok(to))) = (
        squares.0.map(str::parse::<Square>),
        squares.1.map(str::parse::<Square>),
    ) else {
        println!("unknown command '{text}' (try 'help')");
        return;
    };

    match game.try_move(from.index(), to.index()) {
        Ok(MoveResult::ChoosePromotion) => {
            // allow "a7a8q" in one go
            match text.chars().nth(4).and_then(PromotionChoice::from_char) {
                Some(choice) => {
                    let result = game_promote(game, choice);
                    report(game, result);
                }
                None => println!("promotion: choose with 'promote q|r|b|n'"),
            }
        }
        Ok(result) => report(game, Some(result)),
        Err(e) => println!("illegal: {e}"),
    }
}

fn game_promote(game: &mut Game, choice: PromotionChoice) -> Option<MoveResult> {
    match game.promote(choice) {
        Ok(result) => Some(result),
        Err(e) => {
            println!("error: {e}");
            None
        }
    }
}

fn handle_promote(parts: &[&str], game: &mut Game) {
    let choice = parts
        .get(1)
        .and_then(|s| s.chars().next())
        .and_then(PromotionChoice::from_char);
    match choice {
        Some(choice) => {
            let result = game_promote(game, choice);
            report(game, result);
        }
        None => println!("usage: promote q|r|b|n"),
    }
}

fn report(game: &Game, result: Option<MoveResult>) {
    let Some(result) = result else {
        return;
    };
    if let Some(san) = game.last_move_san() {
        println!("played {san}");
    }
    println!("{}", game.board());
    match result {
        MoveResult::WhiteWins => println!("checkmate, white wins"),
        MoveResult::BlackWins => println!("checkmate, black wins"),
        MoveResult::Stalemate => println!("stalemate"),
        MoveResult::GameContinues | MoveResult::ChoosePromotion => {}
    }
}

fn handle_perft(parts: &[&str], game: &Game, divide: bool) {
    let Some(depth) = parts.get(1).and_then(|s| s.parse::<u32>().ok()) else {
        println!("usage: {} <depth>", parts[0]);
        return;
    };

    let start = Instant::now();
    let nodes = if divide {
        let rows = perft_divide(game.board(), depth);
        for (mv, count) in &rows {
            println!("{mv}: {count}");
        }
        rows.iter().map(|(_, n)| n).sum()
    } else {
        perft(game.board(), depth)
    };
    let secs = start.elapsed().as_secs_f64().max(1e-9);
    println!("Total: {nodes}  ({secs:.3}s, {:.0} nps)", nodes as f64 / secs);
}

#[derive(Default)]
struct Tally {
    white: u32,
    black: u32,
    stalemate: u32,
    unfinished: u32,
}

fn handle_random(parts: &[&str]) {
    let games = parts.get(1).and_then(|s| s.parse::<u64>().ok()).unwrap_or(10);
    let seed = parts.get(2).and_then(|s| s.parse::<u64>().ok());
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_rng(&mut rand::rng()),
    };

    let bar = ProgressBar::new(games);
    match ProgressStyle::with_template("{bar:40} {pos}/{len} games ({elapsed})") {
        Ok(style) => bar.set_style(style),
        Err(e) => warn!(%e, "progress template rejected"),
    }

    let mut tally = Tally::default();
    for _ in 0..games {
        let mut game = Game::new();
        let mut outcome = None;
        for _ in 0..MAX_RANDOM_PLIES {
            let Some(&mv) = game.moves().choose(&mut rng) else {
                break;
            };
            match game.make_move(mv) {
                Ok(MoveResult::GameContinues) => {}
                Ok(result) => {
                    outcome = Some(result);
                    break;
                }
                Err(e) => {
                    // generated moves always validate; log and abandon the game
                    warn!(%mv, %e, "generated move rejected");
                    break;
                }
            }
        }
        match outcome {
            Some(MoveResult::WhiteWins) => tally.white += 1,
            Some(MoveResult::BlackWins) => tally.black += 1,
            Some(MoveResult::Stalemate) => tally.stalemate += 1,
            _ => tally.unfinished += 1,
        }
        bar.inc(1);
    }
    bar.finish();

    println!(
        "white {} | black {} | stalemate {} | unfinished {}",
        tally.white, tally.black, tally.stalemate, tally.unfinished
    );
    info!(
        games,
        white = tally.white,
        black = tally.black,
        stalemate = tally.stalemate,
        unfinished = tally.unfinished,
        "random self-play finished"
    );
}
