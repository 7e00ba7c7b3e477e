//! Pawn pushes, captures, promotions and en passant.

use crate::attacks::pawn_attacks;
use crate::chess_move::MoveType;
use crate::piece::Piece;
use crate::piece_kind::PieceKind;
use crate::position::Position;
use crate::square::Square;

use super::pins::en_passant_exposes_king;
use super::{MoveList, lands_safely, record};

pub(super) fn gen_pawns(pos: &Position, list: &mut MoveList) {
    let us = pos.side_to_move();
    let pawn = Piece::new(PieceKind::Pawn, us);

    for &start in pos.pieces(us) {
        if pos.piece_on(start) != Some(pawn) {
            continue;
        }

        let one = start.offset(us.pawn_push());
        if pos.piece_on(one).is_none() {
            if lands_safely(pos, start, one) {
                push_pawn_move(pos, list, start, one, pawn, None);
            }
            if start.rank() == us.pawn_rank() {
                let two = one.offset(us.pawn_push());
                if pos.piece_on(two).is_none() && lands_safely(pos, start, two) {
                    list.push(record(pos, start, two, pawn, MoveType::Normal, None, None));
                }
            }
        }

        for end in pawn_attacks(us, start) {
            match pos.piece_on(end) {
                Some(victim) if victim.color() != us => {
                    if lands_safely(pos, start, end) {
                        push_pawn_move(pos, list, start, end, pawn, Some(victim));
                    }
                }
                Some(_) => {}
                None if pos.en_passant() == Some(end) => {
                    try_en_passant(pos, list, start, end, pawn);
                }
                None => {}
            }
        }
    }
}

/// Push a pawn move, expanding it into the four promotions on the last rank.
fn push_pawn_move(pos: &Position, list: &mut MoveList, start: Square, end: Square, pawn: Piece, victim: Option<Piece>) {
    let us = pawn.color();
    let victim = victim.map(|piece| (piece, end));
    if end.rank() == us.promotion_rank() {
        for kind in PieceKind::PROMOTIONS {
            list.push(record(
                pos,
                start,
                end,
                pawn,
                MoveType::Promotion,
                victim,
                Some(Piece::new(kind, us)),
            ));
        }
    } else {
        list.push(record(pos, start, end, pawn, MoveType::Normal, victim, None));
    }
}

fn try_en_passant(pos: &Position, list: &mut MoveList, start: Square, target: Square, pawn: Piece) {
    let victim_sq = Square::new(start.rank(), target.file());
    let Some(victim) = pos.piece_on(victim_sq) else {
        return;
    };
    if victim.color() == pawn.color() || !victim.is_kind(PieceKind::Pawn) {
        return;
    }

    let checkers = pos.safety().checkers;
    let check_path = pos.check_path();
    if checkers > 1 {
        return;
    }
    if checkers == 1 && !check_path.contains(target) && !check_path.contains(victim_sq) {
        return;
    }
    if en_passant_exposes_king(pos, start, victim_sq, target) {
        return;
    }

    list.push(record(
        pos,
        start,
        target,
        pawn,
        MoveType::EnPassant,
        Some((victim, victim_sq)),
        None,
    ));
}

#[cfg(test)]
mod tests {
    use crate::chess_move::MoveType;
    use crate::piece_kind::PieceKind;
    use crate::position::Position;

    fn pawn_moves(fen: &str) -> Vec<String> {
        let pos: Position = fen.parse().unwrap();
        let mut moves: Vec<String> = pos
            .legal_moves()
            .iter()
            .filter(|mv| mv.actor().is_kind(PieceKind::Pawn))
            .map(|mv| mv.to_uci())
            .collect();
        moves.sort();
        moves
    }

    #[test]
    fn starting_pawns_push_once_or_twice() {
        let moves = pawn_moves("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1");
        assert_eq!(moves.len(), 16);
        assert!(moves.contains(&"e2e4".to_string()));
    }

    #[test]
    fn blocked_pawn_cannot_jump() {
        let moves = pawn_moves("4k3/8/8/8/8/4n3/4P3/4K3 w - - 0 1");
        assert_eq!(moves, Vec::<String>::new());
    }

    #[test]
    fn black_pawns_move_down() {
        let moves = pawn_moves("4k3/3p4/2N5/8/8/8/8/4K3 b - - 0 1");
        assert_eq!(moves, vec!["d7c6", "d7d5", "d7d6"]);
    }

    #[test]
    fn capture_promotion_expands() {
        let pos: Position = "1n2k3/P7/8/8/8/8/8/4K3 w - - 0 1".parse().unwrap();
        let promotions = pos
            .legal_moves()
            .iter()
            .filter(|mv| mv.kind() == MoveType::Promotion)
            .count();
        assert_eq!(promotions, 8);
    }

    #[test]
    fn en_passant_needs_enemy_pawn_on_victim_square() {
        // The target is set but the d5 pawn is white, so there is nothing to take.
        let moves = pawn_moves("4k3/8/8/3PP3/8/8/8/4K3 w - d6 0 1");
        assert!(!moves.contains(&"e5d6".to_string()));
    }

    #[test]
    fn pawn_block_resolves_check() {
        // The rook on a4 checks along the fourth rank; only blocks on it count.
        let moves = pawn_moves("4k3/8/8/8/r6K/2P5/6P1/8 w - - 0 1");
        assert_eq!(moves, vec!["c3c4", "g2g4"]);
    }
}
