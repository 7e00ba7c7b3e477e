//! Iterative-deepening search over a private copy of the position.

pub mod control;
pub mod negamax;
pub mod ordering;
pub mod tt;

use scotch_core::{Move, Position};
use tracing::debug;

use crate::config::SearchConfig;
use control::SearchControl;
use negamax::{INF, MATE_THRESHOLD, SearchContext, negamax};
use tt::{DEFAULT_CAPACITY, TranspositionTable};

/// Result of the deepest fully completed iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult {
    /// Best move, `None` when the root has no legal moves or the stop flag
    /// was raised before the first iteration finished.
    pub best_move: Option<Move>,
    /// Score in centipawns for the side to move.
    pub score: i32,
    /// Depth of the iteration the result comes from.
    pub depth: u8,
    /// Nodes visited, including any aborted iteration.
    pub nodes: u64,
}

/// Iterative-deepening searcher with a transposition table.
///
/// The table survives between searches so later moves of a game benefit
/// from earlier work.
pub struct Searcher {
    tt: TranspositionTable,
}

impl Searcher {
    /// Searcher with the default table size.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Searcher whose table holds `slots` entries.
    pub fn with_capacity(slots: usize) -> Self {
        Self {
            tt: TranspositionTable::new(slots),
        }
    }

    pub fn clear_tt(&mut self) {
        self.tt.clear();
    }

    /// Search `pos` by iterative deepening until the configured depth or
    /// until `control` stops it.
    ///
    /// `history` holds the keys of the positions played in the game so far.
    /// The first iteration runs to completion whatever the time budget; a
    /// later iteration cut short is discarded. `on_iter` sees each completed
    /// iteration.
    pub fn search<F>(
        &mut self,
        pos: &Position,
        config: &SearchConfig,
        control: &SearchControl,
        history: &[u64],
        mut on_iter: F,
    ) -> SearchResult
    where
        F: FnMut(&SearchResult),
    {
        let mut ctx = SearchContext {
            pos: pos.clone(),
            nodes: 0,
            tt: &mut self.tt,
            control,
            game_keys: history,
            quiescence: config.quiescence,
            honor_deadline: false,
            root_best: None,
        };

        let mut completed = SearchResult {
            best_move: None,
            score: 0,
            depth: 0,
            nodes: 0,
        };

        for depth in 1..=config.max_depth() {
            // Depth 1 always completes unless stopped from outside, so there
            // is a move to play however short the budget.
            let stop = if depth == 1 {
                control.is_stopped()
            } else {
                control.should_stop_iterating()
            };
            if stop {
                break;
            }

            ctx.honor_deadline = depth > 1;
            ctx.root_best = None;
            let score = negamax(&mut ctx, depth, 0, -INF, INF);

            if control.is_stopped() {
                break;
            }

            completed = SearchResult {
                best_move: ctx.root_best,
                score,
                depth,
                nodes: ctx.nodes,
            };
            debug!(
                depth,
                score,
                nodes = ctx.nodes,
                best = %completed.best_move.map_or_else(|| "none".to_string(), |mv| mv.to_uci()),
                "iteration complete"
            );
            on_iter(&completed);

            // Nothing to choose, or a forced mate already found
            if completed.best_move.is_none() || score.abs() > MATE_THRESHOLD {
                break;
            }
        }

        completed.nodes = ctx.nodes;
        completed
    }
}

impl Default for Searcher {
    fn default() -> Self {
        Self::new()
    }
}
