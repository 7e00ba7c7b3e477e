use std::sync::Arc;
use std::sync::atomic::AtomicBool;

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use scotch_core::{Game, Move, OpeningBook};
use tracing::{info, warn};

use super::MoveSelector;
use crate::config::SearchConfig;
use crate::error::AgentError;
use crate::search::control::SearchControl;
use crate::search::{SearchResult, Searcher};

/// Plays a book move when one is known, otherwise searches.
pub struct SearchAgent {
    config: SearchConfig,
    searcher: Searcher,
    book: Option<OpeningBook>,
    rng: StdRng,
    last: Option<SearchResult>,
}

impl SearchAgent {
    /// Build the agent, loading the opening book the config names.
    pub fn new(config: SearchConfig) -> Result<Self, AgentError> {
        let book = config.book.as_deref().map(OpeningBook::load).transpose()?;
        Ok(Self {
            config,
            searcher: Searcher::new(),
            book,
            rng: StdRng::from_entropy(),
            last: None,
        })
    }

    /// Replace the default searcher, e.g. with a smaller table.
    pub fn with_searcher(mut self, searcher: Searcher) -> Self {
        self.searcher = searcher;
        self
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Result of the most recent search. `None` after a book move.
    pub fn last_result(&self) -> Option<&SearchResult> {
        self.last.as_ref()
    }

    fn book_move(&mut self, game: &Game) -> Option<Move> {
        let candidates = self.book.as_ref()?.moves_for(game.position());
        candidates.choose(&mut self.rng).copied()
    }
}

impl MoveSelector for SearchAgent {
    fn select_move(&mut self, game: &Game) -> Option<Move> {
        if let Some(mv) = self.book_move(game) {
            info!(mv = %mv, "book move");
            self.last = None;
            return Some(mv);
        }

        let control = SearchControl::new(Arc::new(AtomicBool::new(false)), self.config.time_budget);
        let result = self
            .searcher
            .search(game.position(), &self.config, &control, game.key_history(), |_| {});
        self.last = Some(result);

        match result.best_move {
            Some(mv) => {
                info!(
                    mv = %mv,
                    score = result.score,
                    depth = result.depth,
                    nodes = result.nodes,
                    "search move"
                );
                Some(mv)
            }
            None => {
                warn!(depth = result.depth, nodes = result.nodes, "search found no move");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plays_from_the_book() {
        let game = Game::default();
        let mut book = OpeningBook::new();
        let a3 = game.position().find_uci_move("a2a3").unwrap();
        book.record(game.position(), &a3);

        let path = std::env::temp_dir().join(format!("scotch-agent-book-{}.txt", std::process::id()));
        book.save(&path).unwrap();
        let config: SearchConfig = format!("2,true,0,{}", path.display()).parse().unwrap();
        let mut agent = SearchAgent::new(config).unwrap();
        let _ = std::fs::remove_file(&path);

        assert_eq!(agent.select_move(&game), Some(a3));
        assert!(agent.last_result().is_none());
    }

    #[test]
    fn searches_outside_the_book() {
        let game = Game::from_fen("6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1").unwrap();
        let config: SearchConfig = "3,true,0".parse().unwrap();
        let mut agent = SearchAgent::new(config).unwrap().with_searcher(Searcher::with_capacity(4096));
        let mv = agent.select_move(&game).unwrap();
        assert_eq!(mv.to_uci(), "a1a8");
        assert!(agent.last_result().is_some_and(|r| r.depth >= 1));
    }

    #[test]
    fn moves_even_with_a_one_millisecond_budget() {
        let game = Game::from_fen("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1").unwrap();
        let config: SearchConfig = "-1,true,1".parse().unwrap();
        let mut agent = SearchAgent::new(config).unwrap().with_searcher(Searcher::with_capacity(4096));
        let mv = agent.select_move(&game).unwrap();
        assert!(game.position().legal_moves().iter().any(|m| *m == mv));
    }

    #[test]
    fn no_move_in_a_finished_game() {
        let game = Game::from_fen("k7/2K5/1Q6/8/8/8/8/8 b - - 0 1").unwrap();
        let mut agent = SearchAgent::new(SearchConfig::default())
            .unwrap()
            .with_searcher(Searcher::with_capacity(64));
        assert_eq!(agent.select_move(&game), None);
    }
}
