//! Perft: leaf-node counting for move generator verification.

use tracing::trace;

use crate::position::Position;

/// Count the leaf nodes `depth` plies below `pos`.
///
/// Depth 0 counts the position itself; depth 1 is the size of the cached
/// legal move list. The position is walked with make/unmake and comes back
/// unchanged.
pub fn perft(pos: &mut Position, depth: usize) -> u64 {
    match depth {
        0 => 1,
        1 => pos.legal_moves().len() as u64,
        _ => {
            let moves = pos.legal_moves().clone();
            let mut nodes = 0;
            for mv in &moves {
                pos.make_move(mv);
                nodes += perft(pos, depth - 1);
                pos.unmake_move(mv);
            }
            nodes
        }
    }
}

/// Leaf counts below each root move, keyed by UCI text and sorted by it.
pub fn divide(pos: &mut Position, depth: usize) -> Vec<(String, u64)> {
    let moves = pos.legal_moves().clone();
    let mut results: Vec<(String, u64)> = moves
        .iter()
        .map(|mv| {
            pos.make_move(mv);
            let count = perft(pos, depth.saturating_sub(1));
            pos.unmake_move(mv);
            trace!(mv = %mv, count, "divide");
            (mv.to_uci(), count)
        })
        .collect();
    results.sort_by(|a, b| a.0.cmp(&b.0));
    results
}
