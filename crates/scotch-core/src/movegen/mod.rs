//! Legal move generation on top of the position's check and pin caches.
//!
//! After every mutation the position rebuilds its [`Safety`] record with
//! [`analyze`]: a ray walk from the king finds pins and slider/pawn checks,
//! and a pass over the opponent's pieces collects attacked squares and
//! knight checks. Generators then filter candidate moves against those
//! masks instead of trying each move and testing for check.

mod king;
mod knights;
mod pawns;
mod pins;
mod sliders;
mod threats;

use crate::attacks::direction_between;
use crate::chess_move::{Move, MoveType, Restore};
use crate::piece::Piece;
use crate::position::{Position, Safety};
use crate::square::Square;

use self::king::gen_king;
use self::knights::gen_knights;
use self::pawns::gen_pawns;
use self::pins::scan_king_rays;
use self::sliders::gen_sliders;
use self::threats::scan_threats;

/// Capacity of a [`MoveList`]; no legal position has more moves.
pub const MAX_MOVES: usize = 256;

/// Stack-allocated buffer of generated moves.
#[derive(Clone)]
pub struct MoveList {
    moves: [Move; MAX_MOVES],
    len: u16,
}

impl MoveList {
    pub fn new() -> MoveList {
        MoveList {
            moves: [Move::FILLER; MAX_MOVES],
            len: 0,
        }
    }

    #[inline]
    pub fn push(&mut self, mv: Move) {
        debug_assert!((self.len as usize) < MAX_MOVES);
        self.moves[self.len as usize] = mv;
        self.len += 1;
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len as usize
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn as_slice(&self) -> &[Move] {
        &self.moves[..self.len as usize]
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Move> {
        self.as_slice().iter()
    }
}

impl Default for MoveList {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for MoveList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

impl std::ops::Index<usize> for MoveList {
    type Output = Move;
    #[inline]
    fn index(&self, index: usize) -> &Move {
        &self.as_slice()[index]
    }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a Move;
    type IntoIter = std::slice::Iter<'a, Move>;
    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

/// Rebuild pins, checks and attacked squares for the side to move.
pub(crate) fn analyze(pos: &Position) -> Safety {
    let rays = scan_king_rays(pos);
    let threats = scan_threats(pos);
    Safety {
        pin_mask: rays.pin_mask,
        check_path: rays.check_path | threats.knight_checkers,
        checkers: rays.checkers + threats.knight_checkers.count() as u8,
        attacked: threats.attacked,
        pawn_attacked: threats.pawn_attacked,
    }
}

/// Generate every legal move for the side to move.
pub(crate) fn generate_legal_moves(pos: &Position) -> MoveList {
    let mut list = MoveList::new();
    if !pos.is_multi_check() {
        gen_pawns(pos, &mut list);
        gen_knights(pos, &mut list);
        gen_sliders(pos, &mut list);
    }
    gen_king(pos, &mut list);
    list
}

/// Whether a non-king piece on `start` may land on `end`: under single
/// check only check-path squares qualify, and a pinned piece must stay on
/// its pin ray.
fn lands_safely(pos: &Position, start: Square, end: Square) -> bool {
    let safety = pos.safety();
    if safety.checkers > 1 {
        return false;
    }
    if safety.checkers == 1 && !safety.check_path.contains(end) {
        return false;
    }
    if safety.pin_mask.contains(start) {
        let king = pos.king_square();
        return safety.pin_mask.contains(end) && direction_between(king, start) == direction_between(king, end);
    }
    true
}

/// Build a move record, capturing the restore state from `pos`.
fn record(
    pos: &Position,
    start: Square,
    end: Square,
    actor: Piece,
    kind: MoveType,
    victim: Option<(Piece, Square)>,
    promote_to: Option<Piece>,
) -> Move {
    let restore = Restore {
        en_passant: pos.en_passant(),
        halfmove_clock: pos.halfmove_clock(),
        fullmove_number: pos.fullmove_number(),
        captured_slot: victim.map_or(0, |(_, sq)| pos.slot_of(sq)),
        end_untouched: !pos.has_moved(end),
    };
    Move::new(
        start,
        end,
        actor,
        victim.map(|(piece, _)| piece),
        kind,
        promote_to,
        !pos.has_moved(start),
        restore,
    )
}
