//! King steps and castling.

use crate::attacks::king_targets;
use crate::castle_rights::CastleSide;
use crate::chess_move::MoveType;
use crate::piece::Piece;
use crate::piece_kind::PieceKind;
use crate::position::Position;
use crate::square::Square;

use super::{MoveList, record};

pub(super) fn gen_king(pos: &Position, list: &mut MoveList) {
    let us = pos.side_to_move();
    let start = pos.king_square();
    let king = Piece::new(PieceKind::King, us);
    let attacked = pos.attacked();

    for end in king_targets(start) {
        let target = pos.piece_on(end);
        if target.is_some_and(|p| p.color() == us) || attacked.contains(end) {
            continue;
        }
        list.push(record(
            pos,
            start,
            end,
            king,
            MoveType::Normal,
            target.map(|victim| (victim, end)),
            None,
        ));
    }

    if pos.in_check() {
        return;
    }
    for side in CastleSide::ALL {
        if !pos.can_castle(us, side) {
            continue;
        }
        let path_clear = side
            .between(us)
            .iter()
            .all(|&index| pos.piece_on(Square::from_index_unchecked(index)).is_none());
        let crossing = side.rook_target(us);
        let landing = side.king_target(us);
        if !path_clear || attacked.contains(crossing) || attacked.contains(landing) {
            continue;
        }
        let rook_home = side.rook_home(us);
        list.push(record(
            pos,
            start,
            landing,
            king,
            MoveType::Castle,
            Some((Piece::new(PieceKind::Rook, us), rook_home)),
            None,
        ));
    }
}

#[cfg(test)]
mod tests {
    use crate::chess_move::MoveType;
    use crate::piece_kind::PieceKind;
    use crate::position::Position;
    use crate::square::Square;

    fn castle_targets(fen: &str) -> Vec<Square> {
        let pos: Position = fen.parse().unwrap();
        pos.legal_moves()
            .iter()
            .filter(|mv| mv.kind() == MoveType::Castle)
            .map(|mv| mv.end())
            .collect()
    }

    #[test]
    fn both_sides_when_clear() {
        let mut targets = castle_targets("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
        targets.sort();
        assert_eq!(targets, vec![Square::C1, Square::G1]);
        let mut targets = castle_targets("r3k2r/8/8/8/8/8/8/R3K2R b KQkq - 0 1");
        targets.sort();
        assert_eq!(targets, vec![Square::C8, Square::G8]);
    }

    #[test]
    fn no_castling_out_of_check() {
        assert!(castle_targets("4k3/8/8/8/8/8/4r3/R3K2R w KQ - 0 1").is_empty());
    }

    #[test]
    fn attacked_rook_square_is_allowed() {
        // b1 is attacked but the king never crosses it.
        assert_eq!(castle_targets("1r2k3/8/8/8/8/8/8/R3K3 w Q - 0 1"), vec![Square::C1]);
    }

    #[test]
    fn king_avoids_attacked_squares() {
        let pos: Position = "4k3/8/8/8/8/8/3r4/4K3 w - - 0 1".parse().unwrap();
        let mut ends: Vec<Square> = pos.legal_moves().iter().map(|mv| mv.end()).collect();
        ends.sort();
        // The rook on d2 is unprotected; d1, e2 and f2 are covered by it.
        assert_eq!(ends, vec![Square::F1, Square::D2]);
    }

    #[test]
    fn castling_rook_is_recorded() {
        let pos: Position = "4k3/8/8/8/8/8/8/4K2R w K - 0 1".parse().unwrap();
        let castle = pos.find_uci_move("e1g1").unwrap();
        assert_eq!(castle.kind(), MoveType::Castle);
        assert_eq!(castle.captured().map(|p| p.kind()), Some(PieceKind::Rook));
        assert!(!castle.is_capture());
    }
}
