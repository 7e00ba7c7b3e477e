//! Transposition table: one always-replace entry per slot.
//!
//! Each slot stores the full 64-bit key, so a lookup only succeeds for the
//! exact position that was stored. Two positions that share a slot simply
//! evict each other.

use scotch_core::Move;

use crate::search::negamax::MATE_THRESHOLD;

/// Default number of slots.
pub const DEFAULT_CAPACITY: usize = 1_024_000;

/// Bound type stored in a TT entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    /// The stored score is exact.
    Exact,
    /// The search failed high: the true score is at least this.
    Lower,
    /// The search failed low: the true score is at most this.
    Upper,
}

/// One stored search result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Entry {
    pub key: u64,
    pub depth: u8,
    /// Score in TT form (see [`score_to_tt`]).
    pub score: i32,
    pub bound: Bound,
    /// Packed best move, if the node had one.
    pub best_move: Option<u32>,
}

/// Convert a search score to TT-storable form.
///
/// Mate scores are stored as distance from this node rather than from the
/// root so they stay valid when the position is reached along another path.
pub fn score_to_tt(score: i32, ply: u8) -> i32 {
    if score > MATE_THRESHOLD {
        score + ply as i32
    } else if score < -MATE_THRESHOLD {
        score - ply as i32
    } else {
        score
    }
}

/// Reverse [`score_to_tt`].
pub fn score_from_tt(score: i32, ply: u8) -> i32 {
    if score > MATE_THRESHOLD {
        score - ply as i32
    } else if score < -MATE_THRESHOLD {
        score + ply as i32
    } else {
        score
    }
}

pub struct TranspositionTable {
    slots: Vec<Option<Entry>>,
}

impl TranspositionTable {
    /// Create a table with `capacity` slots (at least one).
    pub fn new(capacity: usize) -> TranspositionTable {
        TranspositionTable {
            slots: vec![None; capacity.max(1)],
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    fn index(&self, key: u64) -> usize {
        ((key as i64).unsigned_abs() % self.capacity() as u64) as usize
    }

    pub fn clear(&mut self) {
        self.slots.fill(None);
    }

    /// The entry stored for exactly this key, regardless of depth or bound.
    pub fn probe(&self, key: u64) -> Option<&Entry> {
        self.slots[self.index(key)].as_ref().filter(|e| e.key == key)
    }

    /// Packed best move remembered for `key`.
    pub fn best_move(&self, key: u64) -> Option<u32> {
        self.probe(key).and_then(|e| e.best_move)
    }

    /// A score usable at this node: the key matches, the stored depth is at
    /// least `depth`, and the bound allows a cutoff against `alpha`/`beta`.
    pub fn lookup(&self, key: u64, depth: u8, ply: u8, alpha: i32, beta: i32) -> Option<i32> {
        let entry = self.probe(key)?;
        if entry.depth < depth {
            return None;
        }
        let score = score_from_tt(entry.score, ply);
        let usable = match entry.bound {
            Bound::Exact => true,
            Bound::Lower => score >= beta,
            Bound::Upper => score <= alpha,
        };
        usable.then_some(score)
    }

    /// Store a result, overwriting whatever occupied the slot.
    pub fn store(&mut self, key: u64, depth: u8, score: i32, bound: Bound, best_move: Option<&Move>, ply: u8) {
        let idx = self.index(key);
        self.slots[idx] = Some(Entry {
            key,
            depth,
            score: score_to_tt(score, ply),
            bound,
            best_move: best_move.map(Move::pack),
        });
    }
}

impl Default for TranspositionTable {
    fn default() -> Self {
        TranspositionTable::new(DEFAULT_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::negamax::MATE_SCORE;
    use scotch_core::Position;

    #[test]
    fn exact_entry_is_usable() {
        let mut tt = TranspositionTable::new(64);
        tt.store(1000, 4, 25, Bound::Exact, None, 0);
        assert_eq!(tt.lookup(1000, 4, 0, -100, 100), Some(25));
        assert_eq!(tt.lookup(1000, 3, 0, -100, 100), Some(25));
        assert_eq!(tt.lookup(1000, 5, 0, -100, 100), None);
    }

    #[test]
    fn bounds_respect_window() {
        let mut tt = TranspositionTable::new(64);
        tt.store(7, 3, 50, Bound::Lower, None, 0);
        assert_eq!(tt.lookup(7, 3, 0, 0, 40), Some(50));
        assert_eq!(tt.lookup(7, 3, 0, 0, 60), None);

        tt.store(7, 3, -50, Bound::Upper, None, 0);
        assert_eq!(tt.lookup(7, 3, 0, -40, 0), Some(-50));
        assert_eq!(tt.lookup(7, 3, 0, -60, 0), None);
    }

    #[test]
    fn colliding_key_evicts_and_misses() {
        let mut tt = TranspositionTable::new(10);
        tt.store(3, 2, 10, Bound::Exact, None, 0);
        tt.store(13, 2, 20, Bound::Exact, None, 0);
        assert_eq!(tt.lookup(3, 2, 0, -100, 100), None);
        assert_eq!(tt.lookup(13, 2, 0, -100, 100), Some(20));
    }

    #[test]
    fn negative_keys_use_absolute_value() {
        let tt = TranspositionTable::new(10);
        assert_eq!(tt.index(-7i64 as u64), 7);
        assert_eq!(tt.index(i64::MIN as u64), (i64::MIN.unsigned_abs() % 10) as usize);
    }

    #[test]
    fn mate_scores_are_ply_independent() {
        let mut tt = TranspositionTable::new(16);
        let mate_in_three_from_ply_two = MATE_SCORE - 5;
        tt.store(42, 1, mate_in_three_from_ply_two, Bound::Exact, None, 2);
        assert_eq!(tt.lookup(42, 1, 4, -30_000, 30_000), Some(MATE_SCORE - 7));
    }

    #[test]
    fn remembers_best_move() {
        let pos = Position::starting_position();
        let mv = pos.find_uci_move("e2e4").unwrap();
        let mut tt = TranspositionTable::new(16);
        tt.store(pos.hash(), 1, 0, Bound::Upper, Some(&mv), 0);
        assert_eq!(tt.best_move(pos.hash()), Some(mv.pack()));
        tt.clear();
        assert_eq!(tt.best_move(pos.hash()), None);
    }
}
