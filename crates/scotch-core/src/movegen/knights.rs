//! Knight move generation.

use crate::attacks::knight_targets;
use crate::chess_move::MoveType;
use crate::piece::Piece;
use crate::piece_kind::PieceKind;
use crate::position::Position;

use super::{MoveList, lands_safely, record};

pub(super) fn gen_knights(pos: &Position, list: &mut MoveList) {
    let us = pos.side_to_move();
    let knight = Piece::new(PieceKind::Knight, us);

    for &start in pos.pieces(us) {
        // A pinned knight can never stay on its pin ray.
        if pos.piece_on(start) != Some(knight) || pos.pin_mask().contains(start) {
            continue;
        }
        for end in knight_targets(start) {
            let target = pos.piece_on(end);
            if target.is_some_and(|p| p.color() == us) || !lands_safely(pos, start, end) {
                continue;
            }
            list.push(record(
                pos,
                start,
                end,
                knight,
                MoveType::Normal,
                target.map(|victim| (victim, end)),
                None,
            ));
        }
    }
}
