//! Piece codes: a color bit and three kind bits in one byte.

use std::fmt;

use crate::color::Color;
use crate::piece_kind::PieceKind;

/// A colored piece stored as its code `color << 3 | kind`.
///
/// Valid codes are 0-5 (White) and 8-13 (Black). Pieces are plain values;
/// two white knights are indistinguishable. An empty square is `None` at
/// every use site, and [`Piece::EMPTY_CODE`] in packed formats.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece(u8);

impl Piece {
    /// Number of distinct pieces.
    pub const COUNT: usize = 12;

    /// Code used for "no piece" in packed formats.
    pub const EMPTY_CODE: u8 = 0b1111;

    pub const WHITE_PAWN: Piece = Piece::new(PieceKind::Pawn, Color::White);
    pub const WHITE_KNIGHT: Piece = Piece::new(PieceKind::Knight, Color::White);
    pub const WHITE_BISHOP: Piece = Piece::new(PieceKind::Bishop, Color::White);
    pub const WHITE_ROOK: Piece = Piece::new(PieceKind::Rook, Color::White);
    pub const WHITE_QUEEN: Piece = Piece::new(PieceKind::Queen, Color::White);
    pub const WHITE_KING: Piece = Piece::new(PieceKind::King, Color::White);
    pub const BLACK_PAWN: Piece = Piece::new(PieceKind::Pawn, Color::Black);
    pub const BLACK_KNIGHT: Piece = Piece::new(PieceKind::Knight, Color::Black);
    pub const BLACK_BISHOP: Piece = Piece::new(PieceKind::Bishop, Color::Black);
    pub const BLACK_ROOK: Piece = Piece::new(PieceKind::Rook, Color::Black);
    pub const BLACK_QUEEN: Piece = Piece::new(PieceKind::Queen, Color::Black);
    pub const BLACK_KING: Piece = Piece::new(PieceKind::King, Color::Black);

    #[inline]
    pub const fn new(kind: PieceKind, color: Color) -> Piece {
        Piece((color as u8) << 3 | kind as u8)
    }

    /// Decode a piece code. Returns `None` for the empty code and for
    /// codes whose kind bits are out of range.
    #[inline]
    pub const fn from_code(code: u8) -> Option<Piece> {
        if code > 0b1111 {
            return None;
        }
        match PieceKind::from_bits(code & 0b111) {
            Some(kind) => Some(Piece::new(kind, Color::from_bit(code >> 3))),
            None => None,
        }
    }

    /// Packed code of an optional piece, [`Piece::EMPTY_CODE`] for `None`.
    #[inline]
    pub const fn code_of(piece: Option<Piece>) -> u8 {
        match piece {
            Some(p) => p.0,
            None => Self::EMPTY_CODE,
        }
    }

    #[inline]
    pub const fn code(self) -> u8 {
        self.0
    }

    #[inline]
    pub const fn kind(self) -> PieceKind {
        match PieceKind::from_bits(self.0 & 0b111) {
            Some(kind) => kind,
            None => PieceKind::King,
        }
    }

    #[inline]
    pub const fn color(self) -> Color {
        Color::from_bit(self.0 >> 3)
    }

    /// Dense index 0-11 (White 0-5, Black 6-11) for keyed tables.
    #[inline]
    pub const fn index(self) -> usize {
        (self.0 >> 3) as usize * PieceKind::COUNT + (self.0 & 0b111) as usize
    }

    /// Basic material weight of this piece's kind.
    #[inline]
    pub const fn weight(self) -> i32 {
        self.kind().weight()
    }

    #[inline]
    pub const fn is_kind(self, kind: PieceKind) -> bool {
        self.0 & 0b111 == kind as u8
    }

    /// FEN letter: uppercase for White.
    pub fn fen_char(self) -> char {
        let c = self.kind().fen_char();
        match self.color() {
            Color::White => c.to_ascii_uppercase(),
            Color::Black => c,
        }
    }

    pub fn from_fen_char(c: char) -> Option<Piece> {
        let kind = PieceKind::from_fen_char(c)?;
        let color = if c.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        Some(Piece::new(kind, color))
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.fen_char())
    }
}

impl fmt::Debug for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Piece({}:{})", self.fen_char(), self.0)
    }
}
