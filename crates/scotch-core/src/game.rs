//! A game: the current position plus the move and key history needed for
//! repetition detection and for taking moves back.

use std::fmt;

use crate::chess_move::Move;
use crate::color::Color;
use crate::error::FenError;
use crate::position::Position;

/// Halfmove clock value at which the fifty-move rule ends the game.
pub const FIFTY_MOVE_LIMIT: u16 = 100;

/// Why a game ended in a draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DrawReason {
    Stalemate,
    OnlyKings,
    FiftyMoveRule,
    ThreefoldRepetition,
}

/// Outcome of the game so far.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameState {
    Active,
    WhiteWins,
    BlackWins,
    Draw(DrawReason),
}

impl GameState {
    pub fn is_over(self) -> bool {
        self != GameState::Active
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameState::Active => write!(f, "in progress"),
            GameState::WhiteWins => write!(f, "white wins"),
            GameState::BlackWins => write!(f, "black wins"),
            GameState::Draw(DrawReason::Stalemate) => write!(f, "draw by stalemate"),
            GameState::Draw(DrawReason::OnlyKings) => write!(f, "draw, only kings remain"),
            GameState::Draw(DrawReason::FiftyMoveRule) => write!(f, "draw by the fifty-move rule"),
            GameState::Draw(DrawReason::ThreefoldRepetition) => write!(f, "draw by threefold repetition"),
        }
    }
}

/// A position together with everything played to reach it.
#[derive(Clone, Debug)]
pub struct Game {
    position: Position,
    moves: Vec<Move>,
    /// Zobrist key of every position reached, starting with the initial one.
    keys: Vec<u64>,
    state: GameState,
}

impl Game {
    pub fn new(position: Position) -> Game {
        let keys = vec![position.hash()];
        let mut game = Game {
            position,
            moves: Vec::new(),
            keys,
            state: GameState::Active,
        };
        game.state = game.compute_state();
        game
    }

    pub fn from_fen(fen: &str) -> Result<Game, FenError> {
        Ok(Game::new(fen.parse()?))
    }

    #[inline]
    pub fn position(&self) -> &Position {
        &self.position
    }

    #[inline]
    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn is_over(&self) -> bool {
        self.state.is_over()
    }

    /// Moves played since the initial position, oldest first.
    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    /// Keys of every position reached, the current one last.
    pub fn key_history(&self) -> &[u64] {
        &self.keys
    }

    /// How often the position with `key` has occurred in this game.
    pub fn occurrences(&self, key: u64) -> usize {
        self.keys.iter().filter(|&&k| k == key).count()
    }

    /// Play a move from the current position's legal list and update the
    /// game state.
    pub fn make_move(&mut self, mv: &Move) {
        self.position.make_move(mv);
        self.moves.push(*mv);
        self.keys.push(self.position.hash());
        self.state = self.compute_state();
    }

    /// Take back the last move, returning it.
    pub fn unmake_move(&mut self) -> Option<Move> {
        let mv = self.moves.pop()?;
        self.keys.pop();
        self.position.unmake_move(&mv);
        self.state = self.compute_state();
        Some(mv)
    }

    fn compute_state(&self) -> GameState {
        let pos = &self.position;
        if pos.legal_moves().is_empty() {
            return if !pos.in_check() {
                GameState::Draw(DrawReason::Stalemate)
            } else if pos.side_to_move() == Color::White {
                GameState::BlackWins
            } else {
                GameState::WhiteWins
            };
        }
        if pos.only_kings() {
            GameState::Draw(DrawReason::OnlyKings)
        } else if pos.halfmove_clock() >= FIFTY_MOVE_LIMIT {
            GameState::Draw(DrawReason::FiftyMoveRule)
        } else if self.occurrences(pos.hash()) >= 3 {
            GameState::Draw(DrawReason::ThreefoldRepetition)
        } else {
            GameState::Active
        }
    }
}

impl Default for Game {
    fn default() -> Self {
        Game::new(Position::starting_position())
    }
}
