//! Evaluation, search and move-choosing agents for scotch.

pub mod advisor;
pub mod agent;
pub mod config;
pub mod error;
pub mod eval;
pub mod search;

pub use advisor::{Advice, Advisor};
pub use agent::{Agent, MoveSelector, RandomAgent, SearchAgent};
pub use config::SearchConfig;
pub use error::{AgentError, ConfigError};
pub use eval::evaluate;
pub use search::control::SearchControl;
pub use search::negamax::{MATE_SCORE, MATE_THRESHOLD};
pub use search::{SearchResult, Searcher};
