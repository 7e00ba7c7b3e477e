//! Material balance with piece-square bonuses.
//!
//! Scores are from White's perspective (positive = White ahead).

use scotch_core::{Color, Position};

use crate::eval::pst::piece_value;

/// Sum of piece values (weight plus square bonus) for one side.
pub fn side_material(pos: &Position, color: Color, endgame: bool) -> i32 {
    pos.pieces(color)
        .iter()
        .filter_map(|&sq| pos.piece_on(sq).map(|piece| piece_value(piece, sq, endgame)))
        .sum()
}

/// White's material minus Black's.
pub fn material(pos: &Position, endgame: bool) -> i32 {
    side_material(pos, Color::White, endgame) - side_material(pos, Color::Black, endgame)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_position_is_balanced() {
        let pos = Position::starting_position();
        assert_eq!(material(&pos, false), 0);
        assert_eq!(material(&pos, true), 0);
    }

    #[test]
    fn extra_queen_counts_for_white() {
        // White queen on d1: 900 - 5.
        let pos: Position = "4k3/8/8/8/8/8/8/3QK3 w - - 0 1".parse().unwrap();
        let white = side_material(&pos, Color::White, false);
        let black = side_material(&pos, Color::Black, false);
        assert_eq!(white, 895);
        assert_eq!(black, 0);
        assert_eq!(material(&pos, false), 895);
    }

    #[test]
    fn black_advantage_is_negative() {
        let pos: Position = "3rk3/8/8/8/8/8/8/4K3 b - - 0 1".parse().unwrap();
        assert!(material(&pos, false) < 0);
    }
}
