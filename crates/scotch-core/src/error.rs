//! Error types for FEN parsing, position validation, packed moves and the
//! opening book.

use std::path::PathBuf;

/// Errors that occur when parsing a FEN string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FenError {
    #[error("expected 6 FEN fields, found {found}")]
    WrongFieldCount { found: usize },

    #[error("expected 8 ranks in piece placement, found {found}")]
    WrongRankCount { found: usize },

    /// `rank_index` counts from the top of the board (0 = rank 8).
    #[error("rank {rank_index} describes {length} squares, expected 8")]
    BadRankLength { rank_index: usize, length: usize },

    #[error("invalid piece character: '{character}'")]
    InvalidPieceChar { character: char },

    #[error("invalid active color: \"{found}\"")]
    InvalidColor { found: String },

    #[error("invalid castling character: '{character}'")]
    InvalidCastlingChar { character: char },

    #[error("invalid en passant square: \"{found}\"")]
    InvalidEnPassant { found: String },

    #[error("invalid {field}: \"{found}\"")]
    InvalidMoveCounter { field: &'static str, found: String },

    #[error("more than 16 pieces for {color}")]
    TooManyPieces { color: &'static str },

    #[error("invalid position: {source}")]
    InvalidPosition {
        #[from]
        source: PositionError,
    },
}

/// Structural problems in an otherwise well-formed placement.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PositionError {
    #[error("expected 1 king for {color}, found {count}")]
    InvalidKingCount { color: &'static str, count: u32 },

    #[error("pawns found on back rank")]
    PawnsOnBackRank,
}

/// A packed `u32` that does not describe a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MoveDecodeError {
    #[error("packed move {0:#x} has bits above bit 28")]
    Overflow(u32),

    #[error("invalid move type {0}")]
    InvalidType(u8),

    #[error("invalid piece code {0}")]
    InvalidPiece(u8),
}

/// Errors reading or writing an opening book.
#[derive(Debug, thiserror::Error)]
pub enum BookError {
    #[error("failed to access book {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("line {line}: missing ':' separator")]
    MissingSeparator { line: usize },

    #[error("line {line}: bad position key \"{found}\"")]
    BadKey { line: usize, found: String },

    #[error("line {line}: bad packed move \"{found}\"")]
    BadMove { line: usize, found: String },

    #[error("line {line}: {source}")]
    Decode {
        line: usize,
        #[source]
        source: MoveDecodeError,
    },
}

#[cfg(test)]
mod tests {
    use super::{FenError, MoveDecodeError, PositionError};

    #[test]
    fn fen_error_display() {
        let err = FenError::WrongFieldCount { found: 4 };
        assert_eq!(err.to_string(), "expected 6 FEN fields, found 4");
    }

    #[test]
    fn position_error_converts() {
        let err: FenError = PositionError::PawnsOnBackRank.into();
        assert!(matches!(err, FenError::InvalidPosition { .. }));
        assert_eq!(err.to_string(), "invalid position: pawns found on back rank");
    }

    #[test]
    fn decode_error_display() {
        assert_eq!(MoveDecodeError::InvalidPiece(7).to_string(), "invalid piece code 7");
    }
}
