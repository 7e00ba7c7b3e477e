//! Move records and their packed `u32` form.
//!
//! A [`Move`] carries everything needed to apply it and to take it back:
//! the moving piece, what it captured, and the parts of the position that
//! the move overwrites (en passant target, halfmove clock, has-moved flags,
//! piece-list slot). Moves are only valid for the position that generated
//! them.

use std::fmt;
use std::hash::{Hash, Hasher};

use crate::error::MoveDecodeError;
use crate::piece::Piece;
use crate::square::Square;

const TYPE_SHIFT: u32 = 0;
const PROMOTE_SHIFT: u32 = 4;
const START_SHIFT: u32 = 8;
const END_SHIFT: u32 = 14;
const ACTOR_SHIFT: u32 = 20;
const CAPTURED_SHIFT: u32 = 24;
const FIRST_MOVE_SHIFT: u32 = 28;

const NIBBLE: u32 = 0b1111;
const SQUARE_BITS: u32 = 0b11_1111;

/// The category of a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum MoveType {
    Normal = 0,
    Castle = 1,
    Promotion = 2,
    EnPassant = 3,
}

impl MoveType {
    const fn from_bits(bits: u8) -> Option<MoveType> {
        match bits {
            0 => Some(MoveType::Normal),
            1 => Some(MoveType::Castle),
            2 => Some(MoveType::Promotion),
            3 => Some(MoveType::EnPassant),
            _ => None,
        }
    }
}

/// State overwritten by a move, recorded when the move is generated so that
/// unmaking it restores the position exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) struct Restore {
    pub(crate) en_passant: Option<Square>,
    pub(crate) halfmove_clock: u16,
    pub(crate) fullmove_number: u16,
    /// Slot the captured piece held in its owner's piece list.
    pub(crate) captured_slot: u8,
    /// Whether the destination square was untouched before the move.
    pub(crate) end_untouched: bool,
}

/// A fully described move.
///
/// For castling `start`/`end` are the king's squares and `captured` holds the
/// castling rook. For en passant `captured` is the passed pawn, which does not
/// stand on `end`.
///
/// Equality and hashing use the packed fields only.
#[derive(Clone, Copy)]
pub struct Move {
    start: Square,
    end: Square,
    actor: Piece,
    captured: Option<Piece>,
    kind: MoveType,
    promote_to: Option<Piece>,
    first_move: bool,
    pub(crate) restore: Restore,
}

impl Move {
    /// Filler for unused move-list slots. Never generated.
    pub(crate) const FILLER: Move = Move::new(
        Square::A1,
        Square::A1,
        Piece::WHITE_PAWN,
        None,
        MoveType::Normal,
        None,
        false,
        Restore {
            en_passant: None,
            halfmove_clock: 0,
            fullmove_number: 1,
            captured_slot: 0,
            end_untouched: false,
        },
    );

    #[allow(clippy::too_many_arguments)]
    pub(crate) const fn new(
        start: Square,
        end: Square,
        actor: Piece,
        captured: Option<Piece>,
        kind: MoveType,
        promote_to: Option<Piece>,
        first_move: bool,
        restore: Restore,
    ) -> Move {
        Move {
            start,
            end,
            actor,
            captured,
            kind,
            promote_to,
            first_move,
            restore,
        }
    }

    #[inline]
    pub const fn start(&self) -> Square {
        self.start
    }

    #[inline]
    pub const fn end(&self) -> Square {
        self.end
    }

    /// The piece that moves (the king, for castling).
    #[inline]
    pub const fn actor(&self) -> Piece {
        self.actor
    }

    #[inline]
    pub const fn captured(&self) -> Option<Piece> {
        self.captured
    }

    #[inline]
    pub const fn kind(&self) -> MoveType {
        self.kind
    }

    /// The piece placed on `end` by a promotion.
    #[inline]
    pub const fn promote_to(&self) -> Option<Piece> {
        self.promote_to
    }

    /// Whether the start square had never been touched before this move.
    #[inline]
    pub const fn is_first_move(&self) -> bool {
        self.first_move
    }

    /// A capture of an enemy piece. Castling is not a capture.
    #[inline]
    pub const fn is_capture(&self) -> bool {
        self.captured.is_some() && !matches!(self.kind, MoveType::Castle)
    }

    #[inline]
    pub const fn is_promotion(&self) -> bool {
        matches!(self.kind, MoveType::Promotion)
    }

    /// Pack the identity fields into 29 bits.
    pub fn pack(&self) -> u32 {
        let promote = match (self.kind, self.promote_to) {
            (MoveType::Promotion, Some(piece)) => piece.code() as u32,
            _ => 0,
        };
        (self.kind as u32) << TYPE_SHIFT
            | promote << PROMOTE_SHIFT
            | (self.start.index() as u32) << START_SHIFT
            | (self.end.index() as u32) << END_SHIFT
            | (self.actor.code() as u32) << ACTOR_SHIFT
            | (Piece::code_of(self.captured) as u32) << CAPTURED_SHIFT
            | (self.first_move as u32) << FIRST_MOVE_SHIFT
    }

    /// Decode a packed move.
    ///
    /// The result has no restore state; resolve it against a position's
    /// legal moves before making it.
    pub fn unpack(packed: u32) -> Result<Move, MoveDecodeError> {
        if packed >> (FIRST_MOVE_SHIFT + 1) != 0 {
            return Err(MoveDecodeError::Overflow(packed));
        }
        let type_bits = ((packed >> TYPE_SHIFT) & NIBBLE) as u8;
        let kind = MoveType::from_bits(type_bits).ok_or(MoveDecodeError::InvalidType(type_bits))?;

        let actor_code = ((packed >> ACTOR_SHIFT) & NIBBLE) as u8;
        let actor = Piece::from_code(actor_code).ok_or(MoveDecodeError::InvalidPiece(actor_code))?;

        let captured_code = ((packed >> CAPTURED_SHIFT) & NIBBLE) as u8;
        let captured = match captured_code {
            Piece::EMPTY_CODE => None,
            code => Some(Piece::from_code(code).ok_or(MoveDecodeError::InvalidPiece(code))?),
        };

        let promote_code = ((packed >> PROMOTE_SHIFT) & NIBBLE) as u8;
        let promote_to = match kind {
            MoveType::Promotion => Some(
                Piece::from_code(promote_code).ok_or(MoveDecodeError::InvalidPiece(promote_code))?,
            ),
            _ => None,
        };

        Ok(Move {
            start: Square::from_index_unchecked(((packed >> START_SHIFT) & SQUARE_BITS) as u8),
            end: Square::from_index_unchecked(((packed >> END_SHIFT) & SQUARE_BITS) as u8),
            actor,
            captured,
            kind,
            promote_to,
            first_move: (packed >> FIRST_MOVE_SHIFT) & 1 == 1,
            restore: Restore::default(),
        })
    }

    /// Long algebraic text such as `e2e4` or `e7e8q`.
    pub fn to_uci(&self) -> String {
        self.to_string()
    }
}

impl PartialEq for Move {
    fn eq(&self, other: &Move) -> bool {
        self.pack() == other.pack()
    }
}

impl Eq for Move {}

impl Hash for Move {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.pack().hash(state);
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.start, self.end)?;
        if let Some(piece) = self.promote_to {
            write!(f, "{}", piece.kind().fen_char())?;
        }
        Ok(())
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Move({self} {:?} by {:?}", self.kind, self.actor)?;
        if let Some(captured) = self.captured {
            write!(f, " x {captured:?}")?;
        }
        write!(f, ")")
    }
}
