//! Bishop, rook and queen move generation by walking rays.

use crate::attacks::{ALL_DIRECTIONS, DIAGONAL, ORTHOGONAL, ray};
use crate::chess_move::MoveType;
use crate::piece_kind::PieceKind;
use crate::position::Position;

use super::{MoveList, lands_safely, record};

pub(super) fn gen_sliders(pos: &Position, list: &mut MoveList) {
    let us = pos.side_to_move();

    for &start in pos.pieces(us) {
        let Some(piece) = pos.piece_on(start) else {
            continue;
        };
        let directions: &[usize] = match piece.kind() {
            PieceKind::Bishop => &DIAGONAL,
            PieceKind::Rook => &ORTHOGONAL,
            PieceKind::Queen => &ALL_DIRECTIONS,
            _ => continue,
        };

        for &dir in directions {
            for end in ray(start, dir) {
                let target = pos.piece_on(end);
                if target.is_some_and(|p| p.color() == us) {
                    break;
                }
                if lands_safely(pos, start, end) {
                    list.push(record(
                        pos,
                        start,
                        end,
                        piece,
                        MoveType::Normal,
                        target.map(|victim| (victim, end)),
                        None,
                    ));
                }
                if target.is_some() {
                    break;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::piece_kind::PieceKind;
    use crate::position::Position;

    fn count_for(fen: &str, kind: PieceKind) -> usize {
        let pos: Position = fen.parse().unwrap();
        pos.legal_moves().iter().filter(|mv| mv.actor().is_kind(kind)).count()
    }

    #[test]
    fn open_board_mobility() {
        assert_eq!(count_for("8/7k/8/8/3R4/8/8/7K w - - 0 1", PieceKind::Rook), 14);
        assert_eq!(count_for("8/7k/8/8/3B4/8/8/7K w - - 0 1", PieceKind::Bishop), 13);
        assert_eq!(count_for("8/7k/8/8/3Q4/8/8/7K w - - 0 1", PieceKind::Queen), 27);
    }

    #[test]
    fn rays_stop_at_pieces() {
        // The a1 rook stops before its own king on h1 and its own pawn on a3.
        assert_eq!(count_for("4k3/8/8/8/8/P7/8/R6K w - - 0 1", PieceKind::Rook), 7);
        // A black piece on a3 is captured instead.
        assert_eq!(count_for("4k3/8/8/8/8/n7/8/R6K w - - 0 1", PieceKind::Rook), 8);
    }
}
