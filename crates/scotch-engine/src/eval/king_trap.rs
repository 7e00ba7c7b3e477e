//! Endgame king-trap term: push the enemy king to the edge and walk our own
//! king towards it. Grows as the enemy runs out of pieces.

use scotch_core::{Color, PieceKind, Position, Square, dist_to_center, manhattan};

/// Upper bound on the Manhattan distance between two squares.
const MAX_KING_DISTANCE: i32 = 14;

fn king_of(pos: &Position, color: Color) -> Option<Square> {
    pos.pieces(color)
        .iter()
        .copied()
        .find(|&sq| pos.piece_on(sq).is_some_and(|p| p.is_kind(PieceKind::King)))
}

/// Trap bonus earned by `hunter` against the opposing king.
pub fn trap_weight(pos: &Position, hunter: Color) -> i32 {
    let prey = hunter.flip();
    let (Some(own), Some(enemy)) = (king_of(pos, hunter), king_of(pos, prey)) else {
        return 0;
    };

    let scarcity = (16 - pos.piece_count(prey) as i32) / 2;
    let edge = dist_to_center(enemy) as i32;
    let closeness = MAX_KING_DISTANCE - manhattan(own, enemy) as i32;
    (edge + closeness) * 10 * scarcity
}

/// The side with more basic material, which does the hunting.
fn hunter(pos: &Position) -> Option<Color> {
    let white = pos.basic_material(Color::White);
    let black = pos.basic_material(Color::Black);
    match white.cmp(&black) {
        std::cmp::Ordering::Greater => Some(Color::White),
        std::cmp::Ordering::Less => Some(Color::Black),
        std::cmp::Ordering::Equal => None,
    }
}

/// Trap bonus of the stronger side, relative to the side to move. Zero when
/// material is level.
pub fn king_trap(pos: &Position) -> i32 {
    let Some(hunter) = hunter(pos) else {
        return 0;
    };
    let weight = trap_weight(pos, hunter);
    if hunter == pos.side_to_move() { weight } else { -weight }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cornered_lone_king() {
        // Black king a8 (6 from the centre), kings 4 apart, Black has 1 piece.
        let pos: Position = "k7/8/2K5/8/8/8/8/7Q w - - 0 1".parse().unwrap();
        assert_eq!(trap_weight(&pos, Color::White), (6 + 14 - 4) * 10 * 7);
    }

    #[test]
    fn closer_king_scores_higher() {
        // Same cornered king; the white king is 4 squares away, then 10.
        let near: Position = "k7/8/2K5/8/8/8/8/7Q w - - 0 1".parse().unwrap();
        let far: Position = "k7/8/8/8/8/5K2/8/7Q w - - 0 1".parse().unwrap();
        assert_eq!(king_trap(&near), (6 + 14 - 4) * 10 * 7);
        assert_eq!(king_trap(&far), (6 + 14 - 10) * 10 * 7);
        assert!(king_trap(&near) > king_trap(&far));
    }

    #[test]
    fn weaker_side_to_move_sees_a_penalty() {
        let pos: Position = "k7/8/2K5/8/8/8/8/7Q b - - 0 1".parse().unwrap();
        assert_eq!(king_trap(&pos), -(6 + 14 - 4) * 10 * 7);
    }

    #[test]
    fn symmetric_position_scores_zero() {
        let pos: Position = "4k3/8/8/8/8/8/8/4K3 w - - 0 1".parse().unwrap();
        assert_eq!(king_trap(&pos), 0);
    }

    #[test]
    fn relative_to_side_to_move() {
        let white: Position = "k7/8/2K5/8/8/8/8/7Q w - - 0 1".parse().unwrap();
        let black: Position = "k7/8/2K5/8/8/8/8/7Q b - - 0 1".parse().unwrap();
        assert!(king_trap(&white) > 0);
        assert_eq!(king_trap(&white), -king_trap(&black));
    }
}
