//! Integration tests for the iterative-deepening searcher.

use std::sync::Arc;
use std::sync::atomic::AtomicBool;
use std::thread;
use std::time::{Duration, Instant};

use scotch_core::{Game, Position};
use scotch_engine::{MATE_THRESHOLD, SearchConfig, SearchControl, SearchResult, Searcher, evaluate};

const KIWIPETE_FEN: &str = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";

const SCHOLARS_MATE_FEN: &str = "r1bqkb1r/pppp1ppp/2n2n2/4p2Q/2B1P3/8/PPPP1PPP/RNB1K1NR w KQkq - 4 4";

/// Black is a queen down with only king moves.
const LOST_FOR_BLACK_FEN: &str = "7k/8/8/8/8/8/8/1Q2K3 b - - 0 1";

fn config(text: &str) -> SearchConfig {
    text.parse().unwrap()
}

fn search(pos: &Position, config: &SearchConfig, history: &[u64]) -> SearchResult {
    let mut searcher = Searcher::with_capacity(1 << 14);
    let control = SearchControl::new(Arc::new(AtomicBool::new(false)), config.time_budget);
    searcher.search(pos, config, &control, history, |_| {})
}

#[test]
fn finds_scholars_mate() {
    let pos: Position = SCHOLARS_MATE_FEN.parse().unwrap();
    let result = search(&pos, &config("2,true,0"), &[pos.hash()]);
    assert_eq!(result.best_move.map(|mv| mv.to_uci()), Some("h5f7".to_string()));
    assert!(result.score > MATE_THRESHOLD, "score {} should indicate mate", result.score);
}

#[test]
fn stalemate_scores_zero() {
    let pos: Position = "k7/2K5/1Q6/8/8/8/8/8 b - - 0 1".parse().unwrap();
    let result = search(&pos, &config("3,true,0"), &[pos.hash()]);
    assert_eq!(result.score, 0);
    assert!(result.best_move.is_none());
}

#[test]
fn mated_side_scores_very_negative() {
    let pos: Position = "7k/6Q1/5K2/8/8/8/8/8 b - - 0 1".parse().unwrap();
    let result = search(&pos, &config("3,true,0"), &[pos.hash()]);
    assert!(result.score < -MATE_THRESHOLD);
    assert!(result.best_move.is_none());
}

#[test]
fn search_is_deterministic() {
    let pos: Position = "r1bqkbnr/pppp1ppp/2n5/1B2p3/4P3/5N2/PPPP1PPP/RNBQK2R b KQkq - 3 3"
        .parse()
        .unwrap();
    let cfg = config("3,true,0");
    let first = search(&pos, &cfg, &[pos.hash()]);
    let second = search(&pos, &cfg, &[pos.hash()]);
    assert_eq!(first, second);
    assert!(first.best_move.is_some());
}

#[test]
fn losing_side_takes_a_repetition() {
    let pos: Position = LOST_FOR_BLACK_FEN.parse().unwrap();
    let cfg = config("2,false,0");

    let lost = search(&pos, &cfg, &[pos.hash()]);
    assert!(lost.score < -500);

    // Every reply leads back to a position seen earlier in the game.
    let mut scratch = pos.clone();
    let mut history = vec![pos.hash()];
    for mv in pos.legal_moves() {
        scratch.make_move(mv);
        history.push(scratch.hash());
        scratch.unmake_move(mv);
    }
    let drawn = search(&pos, &cfg, &history);
    assert_eq!(drawn.score, 0);
}

#[test]
fn fifty_move_rule_draws_inside_the_tree() {
    let pos: Position = "7k/8/8/8/8/8/8/1Q2K3 b - - 99 80".parse().unwrap();
    let result = search(&pos, &config("2,false,0"), &[pos.hash()]);
    assert_eq!(result.score, 0);
}

#[test]
fn time_budget_stops_unlimited_search() {
    let pos = Position::starting_position();
    let start = Instant::now();
    let result = search(&pos, &config("-1,true,200"), &[pos.hash()]);
    assert!(start.elapsed() < Duration::from_secs(5));
    assert!(result.depth >= 1);
    assert!(result.best_move.is_some());
}

#[test]
fn tiny_budget_still_yields_a_move() {
    let pos: Position = KIWIPETE_FEN.parse().unwrap();
    let result = search(&pos, &config("-1,true,1"), &[pos.hash()]);
    assert!(result.depth >= 1);
    assert!(result.best_move.is_some());
}

#[test]
fn interrupted_iteration_keeps_the_last_completed_one() {
    let pos: Position = KIWIPETE_FEN.parse().unwrap();
    let mut searcher = Searcher::with_capacity(1 << 16);
    let control = SearchControl::unlimited();
    let stopper = control.clone();
    let timer = thread::spawn(move || {
        thread::sleep(Duration::from_millis(150));
        stopper.stop();
    });

    let mut completed = Vec::new();
    let result = searcher.search(&pos, &config("-1,true,60000"), &control, &[pos.hash()], |r| {
        completed.push(*r)
    });
    timer.join().unwrap();

    let last = *completed.last().unwrap();
    assert_eq!(result.best_move, last.best_move);
    assert_eq!(result.score, last.score);
    assert_eq!(result.depth, last.depth);
    // The aborted iteration visited nodes of its own.
    assert!(result.nodes > last.nodes);
}

#[test]
fn reports_each_completed_iteration() {
    let pos = Position::starting_position();
    let mut searcher = Searcher::with_capacity(1 << 14);
    let control = SearchControl::unlimited();
    let mut depths = Vec::new();
    let result = searcher.search(&pos, &config("3,false,0"), &control, &[pos.hash()], |r| depths.push(r.depth));
    assert_eq!(depths, vec![1, 2, 3]);
    assert_eq!(result.depth, 3);
}

#[test]
fn stopped_before_start_returns_nothing() {
    let pos = Position::starting_position();
    let mut searcher = Searcher::with_capacity(1 << 10);
    let control = SearchControl::unlimited();
    control.stop();
    let result = searcher.search(&pos, &SearchConfig::default(), &control, &[pos.hash()], |_| {});
    assert!(result.best_move.is_none());
    assert_eq!(result.depth, 0);
}

#[test]
fn game_history_feeds_the_search() {
    let mut game = Game::default();
    for uci in ["g1f3", "g8f6", "f3g1", "f6g8"] {
        let mv = game.position().find_uci_move(uci).unwrap();
        game.make_move(&mv);
    }
    let result = search(game.position(), &config("2,true,0"), game.key_history());
    assert!(result.best_move.is_some());
}

#[test]
fn evaluation_is_side_symmetric_at_the_start() {
    let white = Position::starting_position();
    let black: Position = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR b KQkq - 0 1".parse().unwrap();
    assert_eq!(evaluate(&white), evaluate(&black));
}
