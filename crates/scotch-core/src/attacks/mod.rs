//! Static per-square geometry: ray directions, distance-to-edge, leaper
//! jump targets, pawn attacks, direction lookup and distance tables.

mod tables;

use crate::bitboard::Bitboard;
use crate::color::Color;
use crate::square::Square;

use self::tables::{
    DIRECTION_LOOKUP, DIRECTIONS, DIST_TO_CENTER, DIST_TO_EDGE, KING_TARGETS, KNIGHT_TARGETS,
    MANHATTAN, NO_DIRECTION, PAWN_ATTACKS,
};

/// Direction indices for rook-like movement.
pub const ORTHOGONAL: [usize; 4] = [0, 1, 2, 3];
/// Direction indices for bishop-like movement.
pub const DIAGONAL: [usize; 4] = [4, 5, 6, 7];
/// All eight direction indices.
pub const ALL_DIRECTIONS: [usize; 8] = [0, 1, 2, 3, 4, 5, 6, 7];

#[inline]
pub fn is_orthogonal(dir: usize) -> bool {
    dir < 4
}

/// The squares walked from `from` (exclusive) along `dir` to the edge.
#[inline]
pub fn ray(from: Square, dir: usize) -> Ray {
    Ray {
        current: from,
        step: DIRECTIONS[dir],
        remaining: DIST_TO_EDGE[from.index()][dir],
    }
}

#[inline]
pub fn knight_targets(sq: Square) -> Bitboard {
    KNIGHT_TARGETS[sq.index()]
}

#[inline]
pub fn king_targets(sq: Square) -> Bitboard {
    KING_TARGETS[sq.index()]
}

/// Squares a pawn of `color` standing on `sq` attacks.
#[inline]
pub fn pawn_attacks(color: Color, sq: Square) -> Bitboard {
    PAWN_ATTACKS[color.index()][sq.index()]
}

/// The ray direction leading from `from` to `to`, if the two share a rank,
/// file or diagonal.
#[inline]
pub fn direction_between(from: Square, to: Square) -> Option<usize> {
    match DIRECTION_LOOKUP[from.index()][to.index()] {
        NO_DIRECTION => None,
        dir => Some(dir as usize),
    }
}

/// Manhattan distance from `sq` to the nearest of the four center squares.
#[inline]
pub fn dist_to_center(sq: Square) -> u8 {
    DIST_TO_CENTER[sq.index()]
}

/// Manhattan distance between two squares.
#[inline]
pub fn manhattan(a: Square, b: Square) -> u8 {
    MANHATTAN[a.index()][b.index()]
}

/// Iterator over the squares of a ray, nearest first.
#[derive(Clone, Debug)]
pub struct Ray {
    current: Square,
    step: i8,
    remaining: u8,
}

impl Iterator for Ray {
    type Item = Square;

    #[inline]
    fn next(&mut self) -> Option<Square> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        self.current = self.current.offset(self.step);
        Some(self.current)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining as usize, Some(self.remaining as usize))
    }
}

impl ExactSizeIterator for Ray {}
