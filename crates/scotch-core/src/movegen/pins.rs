//! Ray walks outward from the king: pins, slider checks and adjacent pawn
//! checks, plus the en passant exposure test.

use crate::attacks::{ALL_DIRECTIONS, is_orthogonal, pawn_attacks, ray};
use crate::bitboard::Bitboard;
use crate::piece::Piece;
use crate::piece_kind::PieceKind;
use crate::position::Position;
use crate::square::Square;

/// Result of walking the eight rays from the king.
pub(super) struct RayScan {
    pub(super) pin_mask: Bitboard,
    pub(super) check_path: Bitboard,
    pub(super) checkers: u8,
}

/// Whether `piece` attacks along a ray of direction `dir`.
fn slides_along(piece: Piece, dir: usize) -> bool {
    if is_orthogonal(dir) {
        piece.kind().slides_orthogonally()
    } else {
        piece.kind().slides_diagonally()
    }
}

pub(super) fn scan_king_rays(pos: &Position) -> RayScan {
    let us = pos.side_to_move();
    let king = pos.king_square();
    let mut scan = RayScan {
        pin_mask: Bitboard::EMPTY,
        check_path: Bitboard::EMPTY,
        checkers: 0,
    };

    for dir in ALL_DIRECTIONS {
        let mut path = Bitboard::EMPTY;
        let mut shield: Option<Square> = None;

        for (step, sq) in ray(king, dir).enumerate() {
            path = path.with(sq);
            let Some(piece) = pos.piece_on(sq) else {
                continue;
            };

            if piece.color() == us {
                if shield.is_some() {
                    break;
                }
                shield = Some(sq);
                continue;
            }

            if slides_along(piece, dir) {
                if shield.is_some() {
                    scan.pin_mask |= path;
                } else {
                    scan.check_path |= path;
                    scan.checkers += 1;
                }
            } else if step == 0
                && shield.is_none()
                && piece.is_kind(PieceKind::Pawn)
                && pawn_attacks(piece.color(), sq).contains(king)
            {
                scan.check_path |= path;
                scan.checkers += 1;
            }
            break;
        }
    }

    scan
}

/// Whether capturing en passant from `start` onto `target`, removing the
/// pawn on `victim`, would leave the king attacked by a slider.
pub(super) fn en_passant_exposes_king(pos: &Position, start: Square, victim: Square, target: Square) -> bool {
    let us = pos.side_to_move();
    let king = pos.king_square();

    for dir in ALL_DIRECTIONS {
        for sq in ray(king, dir) {
            if sq == start || sq == victim {
                continue;
            }
            if sq == target {
                break;
            }
            let Some(piece) = pos.piece_on(sq) else {
                continue;
            };
            if piece.color() != us && slides_along(piece, dir) {
                return true;
            }
            break;
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan(fen: &str) -> RayScan {
        let pos: Position = fen.parse().unwrap();
        scan_king_rays(&pos)
    }

    #[test]
    fn pin_mask_spans_pinner_to_king() {
        let rays = scan("4k3/8/8/b7/8/8/3N4/4K3 w - - 0 1");
        assert_eq!(rays.checkers, 0);
        let expected: Bitboard = [Square::D2, Square::C3, Square::B4, Square::A5].into_iter().collect();
        assert_eq!(rays.pin_mask, expected);
    }

    #[test]
    fn two_shields_are_not_a_pin() {
        let rays = scan("4r1k1/8/8/8/4P3/8/4N3/4K3 w - - 0 1");
        assert!(rays.pin_mask.is_empty());
        assert_eq!(rays.checkers, 0);
    }

    #[test]
    fn enemy_piece_shields_the_king() {
        // The black knight between rook and king neither pins nor checks.
        let rays = scan("4r1k1/8/8/8/4n3/8/8/4K3 w - - 0 1");
        assert!(rays.pin_mask.is_empty());
        assert_eq!(rays.checkers, 0);
    }

    #[test]
    fn slider_check_path_includes_checker() {
        let rays = scan("4k3/8/8/8/7q/8/8/4K3 w - - 0 1");
        assert_eq!(rays.checkers, 1);
        let expected: Bitboard = [Square::F2, Square::G3, Square::H4].into_iter().collect();
        assert_eq!(rays.check_path, expected);
    }

    #[test]
    fn rook_does_not_check_on_diagonal() {
        let rays = scan("4k3/8/8/8/7r/8/8/4K3 w - - 0 1");
        assert_eq!(rays.checkers, 0);
    }

    #[test]
    fn pawn_check_for_black_king() {
        // White pawn on d7 attacks e8.
        let rays = scan("4k3/3P4/8/8/8/8/8/4K3 b - - 0 1");
        assert_eq!(rays.checkers, 1);
        assert_eq!(rays.check_path, Square::D7.bitboard());
    }
}
