//! FEN parsing and serialization for [`Position`].

use std::fmt;
use std::str::FromStr;

use tracing::debug;

use crate::castle_rights::CastleRights;
use crate::color::Color;
use crate::error::FenError;
use crate::piece::Piece;
use crate::position::{MAX_PIECES, Position};
use crate::square::Square;

/// The FEN string for the standard starting position.
pub const STARTING_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

fn color_name(color: Color) -> &'static str {
    match color {
        Color::White => "white",
        Color::Black => "black",
    }
}

impl FromStr for Position {
    type Err = FenError;

    /// Parse a six-field FEN. Nothing is returned unless every field is
    /// valid and the placement passes [`Position::validate`].
    fn from_str(fen: &str) -> Result<Position, FenError> {
        let fields: Vec<&str> = fen.split_whitespace().collect();
        if fields.len() != 6 {
            return Err(FenError::WrongFieldCount { found: fields.len() });
        }

        let side_to_move = match fields[1] {
            "w" => Color::White,
            "b" => Color::Black,
            other => {
                return Err(FenError::InvalidColor {
                    found: other.to_string(),
                });
            }
        };
        let mut pos = Position::empty(side_to_move);

        let ranks: Vec<&str> = fields[0].split('/').collect();
        if ranks.len() != 8 {
            return Err(FenError::WrongRankCount { found: ranks.len() });
        }

        for (rank_index, rank_str) in ranks.iter().enumerate() {
            let rank = 7 - rank_index as u8;
            let mut file: usize = 0;

            for c in rank_str.chars() {
                if let Some(run) = c.to_digit(10) {
                    if !(1..=8).contains(&run) {
                        return Err(FenError::InvalidPieceChar { character: c });
                    }
                    file += run as usize;
                    continue;
                }

                let piece = Piece::from_fen_char(c).ok_or(FenError::InvalidPieceChar { character: c })?;
                if file >= 8 {
                    return Err(FenError::BadRankLength {
                        rank_index,
                        length: file + 1,
                    });
                }
                if pos.piece_count(piece.color()) == MAX_PIECES {
                    return Err(FenError::TooManyPieces {
                        color: color_name(piece.color()),
                    });
                }
                pos.put_piece(Square::new(rank, file as u8), piece);
                file += 1;
            }

            if file != 8 {
                return Err(FenError::BadRankLength {
                    rank_index,
                    length: file,
                });
            }
        }

        let rights = CastleRights::from_fen(fields[2])?;

        let en_passant = match fields[3] {
            "-" => None,
            text => Some(Square::from_algebraic(text).ok_or_else(|| FenError::InvalidEnPassant {
                found: text.to_string(),
            })?),
        };

        let halfmove_clock = fields[4].parse::<u16>().map_err(|_| FenError::InvalidMoveCounter {
            field: "halfmove clock",
            found: fields[4].to_string(),
        })?;

        let fullmove_number = fields[5].parse::<u16>().map_err(|_| FenError::InvalidMoveCounter {
            field: "fullmove number",
            found: fields[5].to_string(),
        })?;

        pos.validate()?;

        pos.mark_unmoved(rights);
        pos.set_en_passant(en_passant);
        pos.set_halfmove_clock(halfmove_clock);
        pos.set_fullmove_number(fullmove_number);
        pos.finish_setup();

        debug!(fen, hash = pos.hash(), "position loaded");
        Ok(pos)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0u8..8).rev() {
            let mut empty_run = 0u8;
            for file in 0u8..8 {
                match self.piece_on(Square::new(rank, file)) {
                    Some(piece) => {
                        if empty_run > 0 {
                            write!(f, "{empty_run}")?;
                            empty_run = 0;
                        }
                        write!(f, "{piece}")?;
                    }
                    None => empty_run += 1,
                }
            }
            if empty_run > 0 {
                write!(f, "{empty_run}")?;
            }
            if rank > 0 {
                write!(f, "/")?;
            }
        }

        write!(f, " {} {}", self.side_to_move(), self.castle_rights())?;
        match self.en_passant() {
            Some(sq) => write!(f, " {sq}")?,
            None => write!(f, " -")?,
        }
        write!(f, " {} {}", self.halfmove_clock(), self.fullmove_number())
    }
}
