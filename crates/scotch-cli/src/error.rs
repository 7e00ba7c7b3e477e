//! Command-line errors.

use scotch_core::FenError;
use scotch_engine::{AgentError, ConfigError};

/// Errors from parsing the command line or setting up a match.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// A flag that takes a value was the last argument.
    #[error("flag {flag} expects a value")]
    MissingValue { flag: String },

    #[error("unknown flag: {flag}")]
    UnknownFlag { flag: String },

    #[error("invalid number for {flag}: {value}")]
    BadNumber { flag: String, value: String },

    #[error("invalid board: {0}")]
    Fen(#[from] FenError),

    #[error(transparent)]
    Agent(#[from] AgentError),

    #[error("invalid advisor configuration: {0}")]
    Config(#[from] ConfigError),

    /// A match was requested with only one agent.
    #[error("no agent given for {side}; pass both -agent1 and -agent2")]
    MissingAgent { side: &'static str },
}
