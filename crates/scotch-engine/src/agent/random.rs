use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use scotch_core::{Game, Move};

use super::MoveSelector;

/// Plays a uniformly random legal move.
pub struct RandomAgent {
    rng: StdRng,
}

impl RandomAgent {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Reproducible agent for tests and replays.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomAgent {
    fn default() -> Self {
        Self::new()
    }
}

impl MoveSelector for RandomAgent {
    fn select_move(&mut self, game: &Game) -> Option<Move> {
        game.position().legal_moves().as_slice().choose(&mut self.rng).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_moves() {
        let game = Game::default();
        let mut a = RandomAgent::with_seed(7);
        let mut b = RandomAgent::with_seed(7);
        for _ in 0..10 {
            assert_eq!(a.select_move(&game), b.select_move(&game));
        }
    }

    #[test]
    fn no_move_when_game_is_over() {
        let game = Game::from_fen("7k/6Q1/5K2/8/8/8/8/8 b - - 0 1").unwrap();
        assert_eq!(RandomAgent::with_seed(1).select_move(&game), None);
    }
}
