//! Zobrist keys and the from-scratch position hash.
//!
//! All keys come from one xorshift64 stream with a fixed seed, so hashes are
//! stable across runs and opening books stay valid.

use crate::castle_rights::CastleRights;
use crate::color::Color;
use crate::piece::Piece;
use crate::position::Position;
use crate::square::Square;

const SEED: u64 = 0x0427_8a69_5c07_c4e1;

struct Keys {
    piece_square: [[u64; 64]; Piece::COUNT],
    castling: [u64; 16],
    /// Index 0 is "no en passant target", 1..=8 are files a..h.
    en_passant: [u64; 9],
    side_to_move: u64,
}

const fn xorshift64(mut state: u64) -> u64 {
    state ^= state << 13;
    state ^= state >> 7;
    state ^= state << 17;
    state
}

const fn generate() -> Keys {
    let mut keys = Keys {
        piece_square: [[0; 64]; Piece::COUNT],
        castling: [0; 16],
        en_passant: [0; 9],
        side_to_move: 0,
    };
    let mut state = SEED;

    let mut piece = 0;
    while piece < Piece::COUNT {
        let mut sq = 0;
        while sq < 64 {
            state = xorshift64(state);
            keys.piece_square[piece][sq] = state;
            sq += 1;
        }
        piece += 1;
    }

    let mut i = 0;
    while i < 16 {
        state = xorshift64(state);
        keys.castling[i] = state;
        i += 1;
    }

    i = 0;
    while i < 9 {
        state = xorshift64(state);
        keys.en_passant[i] = state;
        i += 1;
    }

    keys.side_to_move = xorshift64(state);
    keys
}

static KEYS: Keys = generate();

#[inline]
pub(crate) fn piece_square(piece: Piece, sq: Square) -> u64 {
    KEYS.piece_square[piece.index()][sq.index()]
}

#[inline]
pub(crate) fn castling(rights: CastleRights) -> u64 {
    KEYS.castling[rights.bits() as usize]
}

/// Key for the en passant state. The "none" state has a key of its own.
#[inline]
pub(crate) fn en_passant(target: Option<Square>) -> u64 {
    match target {
        Some(sq) => KEYS.en_passant[sq.file() as usize + 1],
        None => KEYS.en_passant[0],
    }
}

#[inline]
pub(crate) fn side_to_move() -> u64 {
    KEYS.side_to_move
}

/// Hash a position from its fields, ignoring the stored incremental hash.
pub fn hash_from_scratch(pos: &Position) -> u64 {
    let mut hash = Square::all()
        .filter_map(|sq| pos.piece_on(sq).map(|piece| piece_square(piece, sq)))
        .fold(0, |acc, key| acc ^ key);

    hash ^= castling(pos.castle_rights());
    hash ^= en_passant(pos.en_passant());
    if pos.side_to_move() == Color::Black {
        hash ^= side_to_move();
    }
    hash
}
