//! Mobility: how much freedom the side to move has compared to the pressure
//! on it.

use scotch_core::Position;

/// Legal moves for the side to move minus the number of squares the
/// opponent attacks. Relative to the side to move.
pub fn mobility(pos: &Position) -> i32 {
    pos.legal_moves().len() as i32 - pos.threat_count() as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_position() {
        let pos = Position::starting_position();
        assert_eq!(pos.legal_moves().len(), 20);
        assert_eq!(mobility(&pos), 20 - pos.threat_count() as i32);
    }

    #[test]
    fn cornered_king_has_little_mobility() {
        let cramped: Position = "k7/8/1Q6/8/8/8/8/7K b - - 0 1".parse().unwrap();
        let free: Position = "8/8/8/3k4/8/8/8/7K b - - 0 1".parse().unwrap();
        assert!(mobility(&cramped) < mobility(&free));
    }
}
