//! Squares attacked by the opponent of the side to move.

use crate::attacks::{ALL_DIRECTIONS, DIAGONAL, ORTHOGONAL, king_targets, knight_targets, pawn_attacks, ray};
use crate::bitboard::Bitboard;
use crate::piece_kind::PieceKind;
use crate::position::Position;

pub(super) struct Threats {
    pub(super) attacked: Bitboard,
    pub(super) pawn_attacked: Bitboard,
    /// Enemy knights attacking our king.
    pub(super) knight_checkers: Bitboard,
}

/// Collect every square the opponent attacks. Slider rays stop at the first
/// occupant but pass through our king, so the king cannot step back along a
/// checking line.
pub(super) fn scan_threats(pos: &Position) -> Threats {
    let them = !pos.side_to_move();
    let king = pos.king_square();
    let mut threats = Threats {
        attacked: Bitboard::EMPTY,
        pawn_attacked: Bitboard::EMPTY,
        knight_checkers: Bitboard::EMPTY,
    };

    for &sq in pos.pieces(them) {
        let Some(piece) = pos.piece_on(sq) else {
            continue;
        };
        let directions: &[usize] = match piece.kind() {
            PieceKind::Pawn => {
                let hits = pawn_attacks(them, sq);
                threats.attacked |= hits;
                threats.pawn_attacked |= hits;
                continue;
            }
            PieceKind::Knight => {
                let hits = knight_targets(sq);
                threats.attacked |= hits;
                if hits.contains(king) {
                    threats.knight_checkers = threats.knight_checkers.with(sq);
                }
                continue;
            }
            PieceKind::King => {
                threats.attacked |= king_targets(sq);
                continue;
            }
            PieceKind::Bishop => &DIAGONAL,
            PieceKind::Rook => &ORTHOGONAL,
            PieceKind::Queen => &ALL_DIRECTIONS,
        };

        for &dir in directions {
            for target in ray(sq, dir) {
                threats.attacked = threats.attacked.with(target);
                if target != king && pos.piece_on(target).is_some() {
                    break;
                }
            }
        }
    }

    threats
}
