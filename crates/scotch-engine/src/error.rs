//! Engine errors: agent configuration and agent construction.

use scotch_core::BookError;

/// Errors from parsing a `depth,quiescence,time[,book]` configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("expected 2 to 4 comma-separated fields, found {found}")]
    WrongFieldCount { found: usize },

    #[error("invalid depth \"{found}\": expected -1 or 1..=64")]
    BadDepth { found: String },

    #[error("invalid quiescence flag \"{found}\": expected true or false")]
    BadQuiescence { found: String },

    #[error("invalid time budget \"{found}\": expected milliseconds")]
    BadTimeBudget { found: String },

    /// Unlimited depth with no time budget would never finish.
    #[error("unlimited depth requires a time budget")]
    Unbounded,
}

/// Errors from building an agent.
#[derive(Debug, thiserror::Error)]
pub enum AgentError {
    #[error("unknown agent \"{name}\" (expected random or search)")]
    UnknownAgent { name: String },

    #[error("bad agent configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("cannot load opening book: {0}")]
    Book(#[from] BookError),
}
