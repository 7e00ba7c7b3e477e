//! Search agent configuration: `depth,quiescence,timeMillis[,book]`.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::error::ConfigError;

/// Deepest iteration a search may reach.
pub const MAX_DEPTH: u8 = 64;

/// How a search agent searches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchConfig {
    /// Fixed depth, or `None` to deepen until the time budget runs out.
    pub depth: Option<u8>,
    /// Extend leaves with a capture-only search.
    pub quiescence: bool,
    /// Wall-clock budget per move, or `None` for no limit.
    pub time_budget: Option<Duration>,
    /// Opening book consulted before searching.
    pub book: Option<PathBuf>,
}

impl SearchConfig {
    /// Iterations to run: the fixed depth, or [`MAX_DEPTH`] when unlimited.
    pub fn max_depth(&self) -> u8 {
        self.depth.unwrap_or(MAX_DEPTH)
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            depth: Some(4),
            quiescence: true,
            time_budget: None,
            book: None,
        }
    }
}

impl FromStr for SearchConfig {
    type Err = ConfigError;

    /// Parse `depth,quiescence[,timeMillis[,book]]`. A depth of `-1` means
    /// unlimited and needs a non-zero time budget; a budget of `0` means no
    /// limit.
    fn from_str(s: &str) -> Result<SearchConfig, ConfigError> {
        let fields: Vec<&str> = s.split(',').map(str::trim).collect();
        if !(2..=4).contains(&fields.len()) {
            return Err(ConfigError::WrongFieldCount { found: fields.len() });
        }

        let depth = match fields[0].parse::<i32>() {
            Ok(-1) => None,
            Ok(d) if (1..=MAX_DEPTH as i32).contains(&d) => Some(d as u8),
            _ => {
                return Err(ConfigError::BadDepth {
                    found: fields[0].to_string(),
                });
            }
        };

        let quiescence = fields[1].parse::<bool>().map_err(|_| ConfigError::BadQuiescence {
            found: fields[1].to_string(),
        })?;

        let time_budget = match fields.get(2) {
            None => None,
            Some(text) => match text.parse::<u64>() {
                Ok(0) => None,
                Ok(ms) => Some(Duration::from_millis(ms)),
                Err(_) => {
                    return Err(ConfigError::BadTimeBudget {
                        found: text.to_string(),
                    });
                }
            },
        };

        if depth.is_none() && time_budget.is_none() {
            return Err(ConfigError::Unbounded);
        }

        let book = fields.get(3).filter(|p| !p.is_empty()).map(|p| PathBuf::from(*p));

        Ok(SearchConfig {
            depth,
            quiescence,
            time_budget,
            book,
        })
    }
}

impl fmt::Display for SearchConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let depth = self.depth.map_or(-1, i32::from);
        let millis = self.time_budget.map_or(0, |d| d.as_millis());
        write!(f, "{depth},{},{millis}", self.quiescence)?;
        if let Some(book) = &self.book {
            write!(f, ",{}", book.display())?;
        }
        Ok(())
    }
}
