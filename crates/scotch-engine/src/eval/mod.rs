//! Static evaluation.
//!
//! The score is always relative to the side to move: material with
//! piece-square bonuses, mobility, and in the endgame a king-trap term.

pub mod king_trap;
pub mod material;
pub mod mobility;
pub mod pst;

use scotch_core::{Color, Position};

/// Combined basic material at or below which the game counts as an endgame.
pub const ENDGAME_MATERIAL: i32 = 1650;

/// Whether both sides together have at most [`ENDGAME_MATERIAL`] of basic
/// material.
pub fn is_endgame(pos: &Position) -> bool {
    pos.basic_material(Color::White) + pos.basic_material(Color::Black) <= ENDGAME_MATERIAL
}

/// Evaluate `pos` from the side to move's perspective.
pub fn evaluate(pos: &Position) -> i32 {
    let endgame = is_endgame(pos);

    let white_relative = material::material(pos, endgame);
    let mut score = match pos.side_to_move() {
        Color::White => white_relative,
        Color::Black => -white_relative,
    };

    score += mobility::mobility(pos);

    if endgame {
        score += king_trap::king_trap(pos);
    }

    score
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_position_is_not_endgame() {
        assert!(!is_endgame(&Position::starting_position()));
    }

    #[test]
    fn rook_endgame_detected() {
        let pos: Position = "4k3/8/8/8/8/8/8/R3K2R w - - 0 1".parse().unwrap();
        assert!(is_endgame(&pos));
    }

    #[test]
    fn material_edge_is_seen_from_both_sides() {
        let white: Position = "4k3/8/8/8/8/8/8/3QK3 w - - 0 1".parse().unwrap();
        let black: Position = "4k3/8/8/8/8/8/8/3QK3 b - - 0 1".parse().unwrap();
        assert!(evaluate(&white) > 500);
        assert!(evaluate(&black) < -500);
    }

    #[test]
    fn mirrored_positions_evaluate_equally() {
        let white: Position = "r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 2 3"
            .parse()
            .unwrap();
        let black: Position = "rnbqkb1r/pppp1ppp/5n2/4p3/4P3/2N5/PPPP1PPP/R1BQKBNR b KQkq - 2 3"
            .parse()
            .unwrap();
        assert_eq!(evaluate(&white), evaluate(&black));
    }
}
