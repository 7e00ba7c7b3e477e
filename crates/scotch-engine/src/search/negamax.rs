//! Negamax alpha-beta search with quiescence.

use scotch_core::{FIFTY_MOVE_LIMIT, Move, Position};

use crate::eval::{evaluate, is_endgame};
use crate::search::control::SearchControl;
use crate::search::ordering::MovePicker;
use crate::search::tt::{Bound, TranspositionTable};

/// Score representing an unreachable upper/lower bound.
pub const INF: i32 = 30_000;

/// Base score for checkmate (adjusted by ply for mate distance).
pub const MATE_SCORE: i32 = 29_000;

/// Scores above this threshold indicate a forced mate.
pub const MATE_THRESHOLD: i32 = 28_000;

/// Maximum search depth (in plies) for recursion limits.
pub const MAX_PLY: usize = 128;

/// State shared across one search: the private position copy and the keys
/// of the positions actually played in the game.
pub(super) struct SearchContext<'a> {
    pub pos: Position,
    pub nodes: u64,
    pub tt: &'a mut TranspositionTable,
    pub control: &'a SearchControl,
    /// Keys of the game's positions up to and including the root. Positions
    /// repeated only along the search path are not in here.
    pub game_keys: &'a [u64],
    pub quiescence: bool,
    /// While false only the stop flag ends the search, not the deadline.
    pub honor_deadline: bool,
    /// Best root move found by the current iteration.
    pub root_best: Option<Move>,
}

impl SearchContext<'_> {
    fn should_stop(&self) -> bool {
        if self.honor_deadline {
            self.control.should_stop(self.nodes)
        } else {
            self.control.is_stopped()
        }
    }

    /// Drawn by the fifty-move rule, or by returning to a position already
    /// played in the game.
    pub(super) fn is_draw(&self) -> bool {
        self.pos.halfmove_clock() >= FIFTY_MOVE_LIMIT || self.game_keys.contains(&self.pos.hash())
    }
}

/// Negamax alpha-beta search.
///
/// Returns the best score for the side to move. At the root the best move
/// is recorded in `ctx.root_best`.
pub(super) fn negamax(ctx: &mut SearchContext<'_>, depth: u8, ply: u8, mut alpha: i32, beta: i32) -> i32 {
    ctx.nodes += 1;

    if ctx.should_stop() {
        return 0;
    }

    if ply > 0 && ctx.is_draw() {
        return 0;
    }

    let key = ctx.pos.hash();

    // No legal moves: checkmate or stalemate
    if ctx.pos.legal_moves().is_empty() {
        return if ctx.pos.in_check() {
            -(MATE_SCORE - ply as i32)
        } else {
            0
        };
    }

    if depth == 0 {
        return if ctx.quiescence {
            qsearch(ctx, ply, alpha, beta)
        } else {
            evaluate(&ctx.pos)
        };
    }

    if ply as usize >= MAX_PLY {
        return evaluate(&ctx.pos);
    }

    if ply > 0
        && let Some(score) = ctx.tt.lookup(key, depth, ply, alpha, beta)
    {
        return score;
    }

    let tt_move = ctx.tt.best_move(key);
    let endgame = is_endgame(&ctx.pos);
    let moves = ctx.pos.legal_moves().clone();
    let mut picker = MovePicker::new(&moves, &ctx.pos, endgame, tt_move);

    let original_alpha = alpha;
    let mut best_score = -INF;
    let mut best_move = None;

    while let Some(mv) = picker.pick_next() {
        ctx.pos.make_move(&mv);
        let score = -negamax(ctx, depth - 1, ply + 1, -beta, -alpha);
        ctx.pos.unmake_move(&mv);

        if ctx.control.is_stopped() {
            return 0;
        }

        if score > best_score {
            best_score = score;
            best_move = Some(mv);
            if ply == 0 {
                ctx.root_best = Some(mv);
            }
        }
        if score > alpha {
            alpha = score;
        }
        if alpha >= beta {
            break;
        }
    }

    let bound = if best_score >= beta {
        Bound::Lower
    } else if best_score > original_alpha {
        Bound::Exact
    } else {
        Bound::Upper
    };
    ctx.tt.store(key, depth, best_score, bound, best_move.as_ref(), ply);

    best_score
}

/// Quiescence search: resolve captures before trusting the static eval.
fn qsearch(ctx: &mut SearchContext<'_>, ply: u8, mut alpha: i32, beta: i32) -> i32 {
    ctx.nodes += 1;

    if ctx.should_stop() {
        return 0;
    }

    // Stand-pat: the side to move can choose not to capture
    let stand_pat = evaluate(&ctx.pos);
    if ply as usize >= MAX_PLY || stand_pat >= beta {
        return stand_pat;
    }
    if stand_pat > alpha {
        alpha = stand_pat;
    }

    let endgame = is_endgame(&ctx.pos);
    let moves = ctx.pos.legal_moves().clone();
    let mut picker = MovePicker::new_qsearch(&moves, &ctx.pos, endgame);

    while let Some(mv) = picker.pick_next() {
        ctx.pos.make_move(&mv);
        let score = -qsearch(ctx, ply + 1, -beta, -alpha);
        ctx.pos.unmake_move(&mv);

        if score >= beta {
            return score;
        }
        if score > alpha {
            alpha = score;
        }
    }

    alpha
}
