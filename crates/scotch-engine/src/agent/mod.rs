//! Agents: things that pick a move for the side to move in a [`Game`].
//!
//! Agents are named by an identifier with an optional configuration,
//! `id[:config]`: `random`, `search`, `search:6,true,2000`.

mod random;
mod search;

use std::str::FromStr;

use scotch_core::{Game, Move};

use crate::config::SearchConfig;
use crate::error::AgentError;

pub use random::RandomAgent;
pub use search::SearchAgent;

/// Chooses a move in a game.
pub trait MoveSelector {
    /// A legal move for the side to move, or `None` when there is none.
    fn select_move(&mut self, game: &Game) -> Option<Move>;
}

/// Every agent the registry can build.
pub enum Agent {
    Random(RandomAgent),
    Search(SearchAgent),
}

impl Agent {
    /// Build the agent named `id`, passing it `config` if given.
    pub fn new(id: &str, config: Option<&str>) -> Result<Agent, AgentError> {
        match id {
            "random" => Ok(Agent::Random(RandomAgent::new())),
            "search" => {
                let config = config.map(str::parse::<SearchConfig>).transpose()?.unwrap_or_default();
                Ok(Agent::Search(SearchAgent::new(config)?))
            }
            other => Err(AgentError::UnknownAgent {
                name: other.to_string(),
            }),
        }
    }

    /// Registry identifier of this agent.
    pub fn id(&self) -> &'static str {
        match self {
            Agent::Random(_) => "random",
            Agent::Search(_) => "search",
        }
    }
}

impl FromStr for Agent {
    type Err = AgentError;

    /// Parse `id[:config]`.
    fn from_str(s: &str) -> Result<Agent, AgentError> {
        match s.split_once(':') {
            Some((id, config)) => Agent::new(id.trim(), Some(config.trim())),
            None => Agent::new(s.trim(), None),
        }
    }
}

impl MoveSelector for Agent {
    fn select_move(&mut self, game: &Game) -> Option<Move> {
        match self {
            Agent::Random(agent) => agent.select_move(game),
            Agent::Search(agent) => agent.select_move(game),
        }
    }
}
