//! In-place move execution and its exact inverse.

use crate::castle_rights::CastleSide;
use crate::chess_move::{Move, MoveType};
use crate::color::Color;
use crate::piece_kind::PieceKind;
use crate::position::Position;
use crate::square::Square;
use crate::zobrist;

impl Position {
    /// Apply a move taken from this position's legal move list.
    ///
    /// Moves from anywhere else are a contract violation and are not
    /// re-validated.
    pub fn make_move(&mut self, mv: &Move) {
        let us = self.side_to_move();
        let start = mv.start();
        let end = mv.end();

        self.toggle_hash(zobrist::en_passant(self.en_passant()) ^ zobrist::castling(self.castle_rights()));

        let double_push = mv.actor().is_kind(PieceKind::Pawn) && start.index().abs_diff(end.index()) == 16;
        self.set_en_passant(double_push.then(|| start.offset(us.pawn_push())));

        match mv.kind() {
            MoveType::Castle => {
                let side = CastleSide::from_king_target(end);
                self.shift_piece(start, end);
                self.shift_piece(side.rook_home(us), side.rook_target(us));
                self.set_has_moved(start, true);
                self.set_has_moved(side.rook_home(us), true);
            }
            MoveType::EnPassant => {
                self.remove_piece(Square::new(start.rank(), end.file()));
                self.shift_piece(start, end);
                self.set_has_moved(start, true);
                self.set_has_moved(end, true);
            }
            MoveType::Normal | MoveType::Promotion => {
                if mv.captured().is_some() {
                    self.remove_piece(end);
                }
                self.shift_piece(start, end);
                if let Some(promoted) = mv.promote_to() {
                    self.replace_piece(end, promoted);
                }
                self.set_has_moved(start, true);
                self.set_has_moved(end, true);
            }
        }

        if mv.actor().is_kind(PieceKind::Pawn) || mv.is_capture() {
            self.set_halfmove_clock(0);
        } else {
            self.set_halfmove_clock(self.halfmove_clock().saturating_add(1));
        }
        if us == Color::Black {
            self.set_fullmove_number(self.fullmove_number().saturating_add(1));
        }
        self.set_side_to_move(!us);

        self.toggle_hash(
            zobrist::side_to_move()
                ^ zobrist::en_passant(self.en_passant())
                ^ zobrist::castling(self.castle_rights()),
        );
        self.refresh();
    }

    /// Take back `mv`, which must be the last move made on this position.
    /// Restores every field, piece-list order included.
    pub fn unmake_move(&mut self, mv: &Move) {
        let us = !self.side_to_move();
        let start = mv.start();
        let end = mv.end();
        let restore = mv.restore;

        self.toggle_hash(
            zobrist::side_to_move()
                ^ zobrist::en_passant(self.en_passant())
                ^ zobrist::castling(self.castle_rights()),
        );
        self.set_side_to_move(us);
        self.set_fullmove_number(restore.fullmove_number);

        match mv.kind() {
            MoveType::Castle => {
                let side = CastleSide::from_king_target(end);
                self.shift_piece(side.rook_target(us), side.rook_home(us));
                self.shift_piece(end, start);
                self.set_has_moved(start, false);
                self.set_has_moved(side.rook_home(us), false);
            }
            MoveType::EnPassant => {
                self.shift_piece(end, start);
                if let Some(victim) = mv.captured() {
                    self.restore_piece(Square::new(start.rank(), end.file()), victim, restore.captured_slot);
                }
                self.set_has_moved(start, !mv.is_first_move());
                self.set_has_moved(end, !restore.end_untouched);
            }
            MoveType::Normal | MoveType::Promotion => {
                if mv.promote_to().is_some() {
                    self.replace_piece(end, mv.actor());
                }
                self.shift_piece(end, start);
                if let Some(victim) = mv.captured() {
                    self.restore_piece(end, victim, restore.captured_slot);
                }
                self.set_has_moved(start, !mv.is_first_move());
                self.set_has_moved(end, !restore.end_untouched);
            }
        }

        self.set_en_passant(restore.en_passant);
        self.set_halfmove_clock(restore.halfmove_clock);

        self.toggle_hash(zobrist::en_passant(self.en_passant()) ^ zobrist::castling(self.castle_rights()));
        self.refresh();
    }
}

#[cfg(test)]
mod tests {
    use crate::castle_rights::CastleRights;
    use crate::chess_move::MoveType;
    use crate::color::Color;
    use crate::piece::Piece;
    use crate::position::Position;
    use crate::square::Square;
    use crate::zobrist::hash_from_scratch;

    fn play(pos: &mut Position, uci: &str) {
        let mv = pos
            .find_uci_move(uci)
            .unwrap_or_else(|| panic!("{uci} is not legal in {pos}"));
        pos.make_move(&mv);
        assert_eq!(pos.hash(), hash_from_scratch(pos), "hash drift after {uci}");
    }

    fn make_unmake(fen: &str, uci: &str) -> Position {
        let mut pos: Position = fen.parse().unwrap();
        let before = pos.clone();
        let mv = pos.find_uci_move(uci).unwrap();
        pos.make_move(&mv);
        assert_eq!(pos.hash(), hash_from_scratch(&pos));
        let after = pos.clone();
        pos.unmake_move(&mv);
        assert_eq!(pos, before, "unmake of {uci} did not restore {fen}");
        assert_eq!(pos.legal_moves().len(), before.legal_moves().len());
        after
    }

    #[test]
    fn double_push_sets_en_passant_target() {
        let after = make_unmake(
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
            "e2e4",
        );
        assert_eq!(after.en_passant(), Some(Square::E3));
        assert_eq!(after.side_to_move(), Color::Black);
        assert_eq!(after.to_string(), "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1");
    }

    #[test]
    fn capture_resets_clock() {
        let after = make_unmake("4k3/8/8/3p4/4N3/8/8/4K3 w - - 7 30", "e4d6");
        assert_eq!(after.halfmove_clock(), 8);
        let after = make_unmake("4k3/8/8/3p4/8/2N5/8/4K3 w - - 7 30", "c3d5");
        assert_eq!(after.halfmove_clock(), 0);
        assert_eq!(after.piece_count(Color::Black), 1);
    }

    #[test]
    fn en_passant_removes_passed_pawn() {
        let after = make_unmake("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1", "e5d6");
        assert_eq!(after.piece_on(Square::D5), None);
        assert_eq!(after.piece_on(Square::D6), Some(Piece::WHITE_PAWN));
        assert_eq!(after.en_passant(), None);
    }

    #[test]
    fn promotion_with_capture() {
        let after = make_unmake("1n2k3/P7/8/8/8/8/8/4K3 w - - 0 1", "a7b8q");
        assert_eq!(after.piece_on(Square::B8), Some(Piece::WHITE_QUEEN));
        assert_eq!(after.piece_on(Square::A7), None);
        assert_eq!(after.piece_count(Color::Black), 1);
    }

    #[test]
    fn castling_moves_rook_and_drops_rights() {
        let after = make_unmake("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1", "e1g1");
        assert_eq!(after.piece_on(Square::G1), Some(Piece::WHITE_KING));
        assert_eq!(after.piece_on(Square::F1), Some(Piece::WHITE_ROOK));
        assert_eq!(after.piece_on(Square::H1), None);
        assert_eq!(after.castle_rights().to_string(), "kq");

        let after = make_unmake("r3k2r/8/8/8/8/8/8/R3K2R b KQkq - 0 1", "e8c8");
        assert_eq!(after.piece_on(Square::C8), Some(Piece::BLACK_KING));
        assert_eq!(after.piece_on(Square::D8), Some(Piece::BLACK_ROOK));
        assert_eq!(after.castle_rights().to_string(), "KQ");
    }

    #[test]
    fn rook_move_and_capture_revoke_rights() {
        let after = make_unmake("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1", "h1h8");
        assert_eq!(after.castle_rights().to_string(), "Qq");
    }

    #[test]
    fn rook_returning_to_corner_does_not_restore_rights() {
        let mut pos: Position = "r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1".parse().unwrap();
        for uci in ["h1h2", "a8a7", "h2h1", "a7a8"] {
            play(&mut pos, uci);
        }
        assert_eq!(pos.castle_rights().to_string(), "Qk");
        assert!(
            pos.legal_moves()
                .iter()
                .all(|mv| mv.kind() != MoveType::Castle || mv.end() == Square::C1)
        );
    }

    #[test]
    fn fullmove_increments_after_black() {
        let mut pos = Position::starting_position();
        play(&mut pos, "e2e4");
        assert_eq!(pos.fullmove_number(), 1);
        play(&mut pos, "e7e5");
        assert_eq!(pos.fullmove_number(), 2);
    }

    #[test]
    fn fullmove_number_saturates_and_unmakes() {
        let mut pos: Position = "4k3/8/8/8/8/8/8/4K3 b - - 0 65535".parse().unwrap();
        let before = pos.clone();
        let mv = pos.find_uci_move("e8d8").unwrap();
        pos.make_move(&mv);
        assert_eq!(pos.fullmove_number(), u16::MAX);
        pos.unmake_move(&mv);
        assert_eq!(pos, before);
        assert_eq!(pos.fullmove_number(), u16::MAX);
    }

    #[test]
    fn transpositions_share_hash() {
        let mut a = Position::starting_position();
        let mut b = Position::starting_position();
        for uci in ["g1f3", "g8f6", "b1c3"] {
            play(&mut a, uci);
        }
        for uci in ["b1c3", "g8f6", "g1f3"] {
            play(&mut b, uci);
        }
        assert_eq!(a.hash(), b.hash());
        assert_eq!(a.to_string(), b.to_string());
    }

    #[test]
    fn unmake_restores_prior_en_passant_target() {
        let mut pos: Position = "rnbqkbnr/pp1ppppp/8/2p5/4P3/8/PPPP1PPP/RNBQKBNR w KQkq c6 0 2"
            .parse()
            .unwrap();
        let before = pos.clone();
        let mv = pos.find_uci_move("g1f3").unwrap();
        pos.make_move(&mv);
        assert_eq!(pos.en_passant(), None);
        pos.unmake_move(&mv);
        assert_eq!(pos.en_passant(), Some(Square::C6));
        assert_eq!(pos, before);
        assert_eq!(pos.castle_rights(), CastleRights::ALL);
    }
}
