//! Agent-vs-agent match runner.

use std::thread;
use std::time::Duration;

use scotch_core::{Color, Game, GameState, Position};
use scotch_engine::{Advisor, Agent, MoveSelector, SearchConfig};
use tracing::{info, warn};

/// Tally of finished games.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MatchSummary {
    pub white_wins: u32,
    pub black_wins: u32,
    pub draws: u32,
    /// Games abandoned because an agent produced no move.
    pub unfinished: u32,
}

impl MatchSummary {
    pub fn games(&self) -> u32 {
        self.white_wins + self.black_wins + self.draws + self.unfinished
    }

    fn record(&mut self, state: GameState) {
        match state {
            GameState::WhiteWins => self.white_wins += 1,
            GameState::BlackWins => self.black_wins += 1,
            GameState::Draw(_) => self.draws += 1,
            GameState::Active => self.unfinished += 1,
        }
    }
}

/// Plays a series of games between two agents, each starting from the same
/// position.
pub struct MatchRunner {
    start: Position,
    white: Agent,
    black: Agent,
    delay: Duration,
    advise: Option<SearchConfig>,
}

impl MatchRunner {
    pub fn new(start: Position, white: Agent, black: Agent) -> Self {
        Self {
            start,
            white,
            black,
            delay: Duration::ZERO,
            advise: None,
        }
    }

    /// Pause after every move.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Run an advisory search after every move.
    pub fn with_advisor(mut self, config: Option<SearchConfig>) -> Self {
        self.advise = config;
        self
    }

    /// Play `games` games and return the tally.
    pub fn run(&mut self, games: u32) -> MatchSummary {
        let mut summary = MatchSummary::default();
        for number in 1..=games {
            let game = self.play_one(number);
            info!(game = number, plies = game.moves().len(), result = %game.state(), "game over");
            summary.record(game.state());
        }
        info!(
            white_wins = summary.white_wins,
            black_wins = summary.black_wins,
            draws = summary.draws,
            unfinished = summary.unfinished,
            "match finished"
        );
        summary
    }

    /// Play a single game to its end and return it.
    pub fn play_one(&mut self, number: u32) -> Game {
        let mut game = Game::new(self.start.clone());
        info!(game = number, fen = %game.position(), "game start");

        while !game.is_over() {
            let side = game.position().side_to_move();
            let agent = match side {
                Color::White => &mut self.white,
                Color::Black => &mut self.black,
            };
            let Some(mv) = agent.select_move(&game) else {
                warn!(game = number, %side, agent = agent.id(), "agent produced no move");
                break;
            };

            game.make_move(&mv);
            info!(game = number, ply = game.moves().len(), %side, mv = %mv, fen = %game.position(), "move played");

            if let Some(config) = &self.advise
                && !game.is_over()
                && let Some(advice) = Advisor::spawn(&game, config.clone()).wait()
            {
                info!(
                    game = number,
                    suggestion = %advice.best_move,
                    score = advice.score,
                    depth = advice.depth,
                    "advisory evaluation"
                );
            }

            if !self.delay.is_zero() {
                thread::sleep(self.delay);
            }
        }

        game
    }
}
