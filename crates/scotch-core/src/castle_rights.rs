//! Castling geometry and the four-bit castling-rights summary.
//!
//! A position does not store rights directly; they are derived from the
//! has-moved flags of the king and rook home squares. [`CastleRights`] is
//! the summary used for hashing and for the FEN castling field.

use std::fmt;

use crate::color::Color;
use crate::error::FenError;
use crate::square::Square;

/// Which wing to castle toward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CastleSide {
    KingSide,
    QueenSide,
}

impl CastleSide {
    pub const ALL: [CastleSide; 2] = [CastleSide::KingSide, CastleSide::QueenSide];

    /// Home square of the king.
    #[inline]
    pub const fn king_home(color: Color) -> Square {
        Square::new(color.back_rank(), 4)
    }

    /// Where the king lands.
    #[inline]
    pub const fn king_target(self, color: Color) -> Square {
        match self {
            CastleSide::KingSide => Square::new(color.back_rank(), 6),
            CastleSide::QueenSide => Square::new(color.back_rank(), 2),
        }
    }

    /// Home corner of the rook that castles on this side.
    #[inline]
    pub const fn rook_home(self, color: Color) -> Square {
        match self {
            CastleSide::KingSide => Square::new(color.back_rank(), 7),
            CastleSide::QueenSide => Square::new(color.back_rank(), 0),
        }
    }

    /// Where the rook lands (the square the king crosses).
    #[inline]
    pub const fn rook_target(self, color: Color) -> Square {
        match self {
            CastleSide::KingSide => Square::new(color.back_rank(), 5),
            CastleSide::QueenSide => Square::new(color.back_rank(), 3),
        }
    }

    /// Side implied by a king move from its home square to `target`.
    #[inline]
    pub fn from_king_target(target: Square) -> CastleSide {
        if target.file() > 4 {
            CastleSide::KingSide
        } else {
            CastleSide::QueenSide
        }
    }

    /// Squares that must be empty between king and rook.
    pub fn between(self, color: Color) -> &'static [u8] {
        match (self, color) {
            (CastleSide::KingSide, Color::White) => &[5, 6],
            (CastleSide::QueenSide, Color::White) => &[1, 2, 3],
            (CastleSide::KingSide, Color::Black) => &[61, 62],
            (CastleSide::QueenSide, Color::Black) => &[57, 58, 59],
        }
    }
}

/// Castling rights: bit 0 = White king side, 1 = White queen side,
/// 2 = Black king side, 3 = Black queen side.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CastleRights(u8);

impl CastleRights {
    pub const NONE: CastleRights = CastleRights(0);
    pub const ALL: CastleRights = CastleRights(0b1111);

    #[inline]
    pub const fn bits(self) -> u8 {
        self.0
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[inline]
    const fn flag(color: Color, side: CastleSide) -> u8 {
        let shift = color as u8 * 2
            + match side {
                CastleSide::KingSide => 0,
                CastleSide::QueenSide => 1,
            };
        1 << shift
    }

    #[inline]
    pub const fn has(self, color: Color, side: CastleSide) -> bool {
        self.0 & Self::flag(color, side) != 0
    }

    #[inline]
    pub const fn with(self, color: Color, side: CastleSide) -> CastleRights {
        CastleRights(self.0 | Self::flag(color, side))
    }

    /// Parse the FEN castling field (`"KQkq"`, `"Kq"`, `"-"`, ...).
    pub fn from_fen(s: &str) -> Result<CastleRights, FenError> {
        if s == "-" {
            return Ok(CastleRights::NONE);
        }
        s.chars().try_fold(CastleRights::NONE, |rights, c| match c {
            'K' => Ok(rights.with(Color::White, CastleSide::KingSide)),
            'Q' => Ok(rights.with(Color::White, CastleSide::QueenSide)),
            'k' => Ok(rights.with(Color::Black, CastleSide::KingSide)),
            'q' => Ok(rights.with(Color::Black, CastleSide::QueenSide)),
            _ => Err(FenError::InvalidCastlingChar { character: c }),
        })
    }
}

impl fmt::Display for CastleRights {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "-");
        }
        for (color, side, c) in [
            (Color::White, CastleSide::KingSide, 'K'),
            (Color::White, CastleSide::QueenSide, 'Q'),
            (Color::Black, CastleSide::KingSide, 'k'),
            (Color::Black, CastleSide::QueenSide, 'q'),
        ] {
            if self.has(color, side) {
                write!(f, "{c}")?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for CastleRights {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CastleRights({self})")
    }
}
