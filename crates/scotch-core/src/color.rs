//! Side colors and the per-color board geometry that hangs off them.

use std::fmt;
use std::ops::Not;

/// The side owning a piece, or the side to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Color {
    White = 0,
    Black = 1,
}

impl Color {
    /// Number of colors.
    pub const COUNT: usize = 2;

    /// Both colors, White first.
    pub const ALL: [Color; 2] = [Color::White, Color::Black];

    /// Array index (0 for White, 1 for Black).
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Decode the color bit of a piece code.
    #[inline]
    pub const fn from_bit(bit: u8) -> Color {
        if bit & 1 == 0 { Color::White } else { Color::Black }
    }

    #[inline]
    pub const fn flip(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Square offset of a single pawn push.
    #[inline]
    pub const fn pawn_push(self) -> i8 {
        match self {
            Color::White => 8,
            Color::Black => -8,
        }
    }

    /// Rank (0-based) a pawn of this color starts on.
    #[inline]
    pub const fn pawn_rank(self) -> u8 {
        match self {
            Color::White => 1,
            Color::Black => 6,
        }
    }

    /// Rank (0-based) a pawn of this color promotes on.
    #[inline]
    pub const fn promotion_rank(self) -> u8 {
        match self {
            Color::White => 7,
            Color::Black => 0,
        }
    }

    /// Rank (0-based) the king and rooks of this color start on.
    #[inline]
    pub const fn back_rank(self) -> u8 {
        match self {
            Color::White => 0,
            Color::Black => 7,
        }
    }
}

impl Not for Color {
    type Output = Color;

    #[inline]
    fn not(self) -> Color {
        self.flip()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => write!(f, "w"),
            Color::Black => write!(f, "b"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Color;

    #[test]
    fn flip_and_not_agree() {
        for color in Color::ALL {
            assert_eq!(!color, color.flip());
            assert_eq!(color.flip().flip(), color);
        }
    }

    #[test]
    fn from_bit_matches_index() {
        assert_eq!(Color::from_bit(0), Color::White);
        assert_eq!(Color::from_bit(1), Color::Black);
        for color in Color::ALL {
            assert_eq!(Color::from_bit(color.index() as u8), color);
        }
    }

    #[test]
    fn pawn_geometry_is_mirrored() {
        assert_eq!(Color::White.pawn_push(), -Color::Black.pawn_push());
        assert_eq!(Color::White.pawn_rank() + Color::Black.pawn_rank(), 7);
        assert_eq!(Color::White.promotion_rank() + Color::Black.promotion_rank(), 7);
        assert_eq!(Color::White.back_rank(), Color::Black.promotion_rank());
    }

    #[test]
    fn display_uses_fen_letters() {
        assert_eq!(Color::White.to_string(), "w");
        assert_eq!(Color::Black.to_string(), "b");
    }
}
