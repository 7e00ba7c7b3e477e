//! Background advisory evaluation.
//!
//! An [`Advisor`] searches a snapshot of a game on its own thread and
//! reports what it would play. The game itself is never touched.

use std::sync::Arc;
use std::sync::atomic::AtomicBool;
use std::sync::mpsc::{self, Receiver};
use std::thread::{self, JoinHandle};

use scotch_core::{Color, Game, Move};
use tracing::{debug, warn};

use crate::config::SearchConfig;
use crate::search::Searcher;
use crate::search::control::SearchControl;

/// Table size for advisory searches; smaller than a playing agent's.
pub const ADVISOR_TT_CAPACITY: usize = 1 << 16;

/// What the advisor would play.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Advice {
    pub best_move: Move,
    /// Score in centipawns from White's point of view.
    pub score: i32,
    pub depth: u8,
    pub nodes: u64,
}

/// Handle to a running advisory search.
///
/// Dropping the handle cancels the search and waits for the thread.
pub struct Advisor {
    rx: Receiver<Advice>,
    control: SearchControl,
    handle: Option<JoinHandle<()>>,
}

impl Advisor {
    /// Start searching a copy of `game`'s current position.
    pub fn spawn(game: &Game, config: SearchConfig) -> Advisor {
        let (tx, rx) = mpsc::channel();
        let control = SearchControl::new(Arc::new(AtomicBool::new(false)), config.time_budget);

        let pos = game.position().clone();
        let history = game.key_history().to_vec();
        let search_control = control.clone();

        let handle = thread::spawn(move || {
            let mut searcher = Searcher::with_capacity(ADVISOR_TT_CAPACITY);
            let result = searcher.search(&pos, &config, &search_control, &history, |_| {});
            let Some(best_move) = result.best_move else {
                debug!(depth = result.depth, "advisor found no move");
                return;
            };
            let score = match pos.side_to_move() {
                Color::White => result.score,
                Color::Black => -result.score,
            };
            debug!(mv = %best_move, score, depth = result.depth, "advice ready");
            // The receiver may already be gone
            let _ = tx.send(Advice {
                best_move,
                score,
                depth: result.depth,
                nodes: result.nodes,
            });
        });

        Advisor {
            rx,
            control,
            handle: Some(handle),
        }
    }

    /// The advice, if the search has already finished.
    pub fn try_recv(&self) -> Option<Advice> {
        self.rx.try_recv().ok()
    }

    /// Block until the search finishes. `None` if it found no move.
    pub fn wait(mut self) -> Option<Advice> {
        self.join();
        self.rx.try_recv().ok()
    }

    /// Stop the search and discard its result.
    pub fn cancel(self) {
        self.control.stop();
    }

    fn join(&mut self) {
        if let Some(handle) = self.handle.take()
            && handle.join().is_err()
        {
            warn!("advisor thread panicked");
        }
    }
}

impl Drop for Advisor {
    fn drop(&mut self) {
        self.control.stop();
        self.join();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn finds_mate_for_white() {
        let game = Game::from_fen("6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1").unwrap();
        let advice = Advisor::spawn(&game, "3,true,0".parse().unwrap()).wait().unwrap();
        assert_eq!(advice.best_move.to_uci(), "a1a8");
        assert!(advice.score > 20_000);
    }

    #[test]
    fn score_is_white_relative() {
        // Black to move and mate: the score favours Black.
        let game = Game::from_fen("r5k1/8/8/8/8/8/5PPP/6K1 b - - 0 1").unwrap();
        let advice = Advisor::spawn(&game, "3,true,0".parse().unwrap()).wait().unwrap();
        assert_eq!(advice.best_move.to_uci(), "a8a1");
        assert!(advice.score < -20_000);
    }

    #[test]
    fn no_advice_when_game_is_over() {
        let game = Game::from_fen("k7/2K5/1Q6/8/8/8/8/8 b - - 0 1").unwrap();
        assert!(Advisor::spawn(&game, SearchConfig::default()).wait().is_none());
    }

    #[test]
    fn cancel_returns_promptly() {
        let game = Game::default();
        let config: SearchConfig = "-1,true,60000".parse().unwrap();
        let advisor = Advisor::spawn(&game, config);
        std::thread::sleep(Duration::from_millis(20));
        advisor.cancel();
    }

    #[test]
    fn panicked_worker_yields_no_advice() {
        let (_tx, rx) = mpsc::channel();
        let advisor = Advisor {
            rx,
            control: SearchControl::unlimited(),
            handle: Some(thread::spawn(|| panic!("worker failed"))),
        };
        assert!(advisor.wait().is_none());
    }

    #[test]
    fn game_is_untouched() {
        let game = Game::default();
        let before = game.position().clone();
        let _ = Advisor::spawn(&game, "2,false,0".parse().unwrap()).wait();
        assert_eq!(game.position(), &before);
    }
}
