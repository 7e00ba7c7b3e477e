//! Opening book: candidate moves keyed by position hash.
//!
//! The text form has one line per position:
//!
//! ```text
//! <zobrist key>: <packed move>, <packed move>, ...
//! ```
//!
//! Keys are written as unsigned decimals; signed 64-bit values are accepted
//! on input and reinterpreted. Blank lines and lines starting with `#` are
//! skipped.

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::Path;

use tracing::debug;

use crate::chess_move::Move;
use crate::error::BookError;
use crate::position::Position;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OpeningBook {
    entries: BTreeMap<u64, Vec<u32>>,
}

fn parse_key(text: &str) -> Option<u64> {
    text.parse::<u64>()
        .ok()
        .or_else(|| text.parse::<i64>().ok().map(|k| k as u64))
}

impl OpeningBook {
    pub fn new() -> OpeningBook {
        OpeningBook::default()
    }

    /// Parse the text form. Every packed move must decode.
    pub fn parse(text: &str) -> Result<OpeningBook, BookError> {
        let mut book = OpeningBook::new();
        for (index, raw) in text.lines().enumerate() {
            let line = index + 1;
            let trimmed = raw.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            let (key_text, moves_text) = trimmed
                .split_once(':')
                .ok_or(BookError::MissingSeparator { line })?;
            let key = parse_key(key_text.trim()).ok_or_else(|| BookError::BadKey {
                line,
                found: key_text.trim().to_string(),
            })?;

            for word in moves_text.split(',').map(str::trim).filter(|w| !w.is_empty()) {
                let packed = word.parse::<u32>().map_err(|_| BookError::BadMove {
                    line,
                    found: word.to_string(),
                })?;
                Move::unpack(packed).map_err(|source| BookError::Decode { line, source })?;
                book.insert(key, packed);
            }
        }
        Ok(book)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<OpeningBook, BookError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| BookError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let book = OpeningBook::parse(&text)?;
        debug!(path = %path.display(), positions = book.len(), "opening book loaded");
        Ok(book)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), BookError> {
        let path = path.as_ref();
        fs::write(path, self.to_string()).map_err(|source| BookError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Number of positions with at least one move.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Book moves for `pos` that are legal there, resolved against its
    /// legal move list so they carry full restore state.
    pub fn moves_for(&self, pos: &Position) -> Vec<Move> {
        self.entries
            .get(&pos.hash())
            .map(|packed| packed.iter().filter_map(|&p| pos.find_move(p)).collect())
            .unwrap_or_default()
    }

    /// Add `mv` as a book move for `pos`.
    pub fn record(&mut self, pos: &Position, mv: &Move) {
        self.insert(pos.hash(), mv.pack());
    }

    fn insert(&mut self, key: u64, packed: u32) {
        let moves = self.entries.entry(key).or_default();
        if !moves.contains(&packed) {
            moves.push(packed);
        }
    }
}

impl fmt::Display for OpeningBook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (key, moves) in &self.entries {
            write!(f, "{key}:")?;
            for (i, packed) in moves.iter().enumerate() {
                let sep = if i == 0 { " " } else { ", " };
                write!(f, "{sep}{packed}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
