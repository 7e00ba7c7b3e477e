//! The mutable position: a mailbox board with per-color piece lists,
//! has-moved flags, an incrementally maintained Zobrist hash and the
//! per-ply check, pin and attack caches that move generation reads.

use std::fmt;

use crate::bitboard::Bitboard;
use crate::castle_rights::{CastleRights, CastleSide};
use crate::chess_move::Move;
use crate::color::Color;
use crate::error::PositionError;
use crate::movegen::{self, MoveList};
use crate::piece::Piece;
use crate::piece_kind::PieceKind;
use crate::square::Square;
use crate::zobrist;

/// Most pieces one side can own.
pub const MAX_PIECES: usize = 16;

/// Check, pin and attack information for the side to move, rebuilt from
/// scratch after every mutation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct Safety {
    /// Squares of every pin ray: pinned piece, squares between, pinner.
    pub(crate) pin_mask: Bitboard,
    /// Squares that resolve the check: blockers between king and checker
    /// plus the checker itself.
    pub(crate) check_path: Bitboard,
    /// Number of pieces giving check.
    pub(crate) checkers: u8,
    /// Squares the opponent attacks. Sliders see through our king.
    pub(crate) attacked: Bitboard,
    /// Squares attacked by opponent pawns.
    pub(crate) pawn_attacked: Bitboard,
}

/// A chess position.
///
/// Cloning produces an independent deep copy, which is how search threads
/// and agents isolate themselves from the game.
#[derive(Clone)]
pub struct Position {
    /// Piece on each square.
    board: [Option<Piece>; 64],
    /// Squares occupied by each color, first `piece_count` entries valid.
    pieces: [[Square; MAX_PIECES]; 2],
    piece_count: [u8; 2],
    /// Slot of each occupied square in its owner's piece list. Stale for
    /// empty squares.
    slot_of: [u8; 64],
    /// Whether a piece has ever left or arrived on each square.
    has_moved: [bool; 64],
    side_to_move: Color,
    en_passant: Option<Square>,
    halfmove_clock: u16,
    fullmove_number: u16,
    hash: u64,
    /// King of the side to move.
    king_square: Square,
    safety: Safety,
    legal: MoveList,
}

impl Position {
    /// The standard starting position.
    ///
    /// Pieces are placed in FEN order (rank 8 first) so the piece lists
    /// match a position parsed from the starting FEN.
    pub fn starting_position() -> Position {
        const BACK: [PieceKind; 8] = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];
        let mut pos = Position::empty(Color::White);
        for rank in (0u8..8).rev() {
            for file in 0u8..8 {
                let piece = match rank {
                    0 => Some(Piece::new(BACK[file as usize], Color::White)),
                    1 => Some(Piece::WHITE_PAWN),
                    6 => Some(Piece::BLACK_PAWN),
                    7 => Some(Piece::new(BACK[file as usize], Color::Black)),
                    _ => None,
                };
                if let Some(piece) = piece {
                    pos.put_piece(Square::new(rank, file), piece);
                }
            }
        }
        pos.mark_unmoved(CastleRights::ALL);
        pos.finish_setup();
        pos
    }

    /// An empty board with every square marked as moved. Callers fill it and
    /// then call [`Position::finish_setup`].
    pub(crate) fn empty(side_to_move: Color) -> Position {
        Position {
            board: [None; 64],
            pieces: [[Square::A1; MAX_PIECES]; 2],
            piece_count: [0; 2],
            slot_of: [0; 64],
            has_moved: [true; 64],
            side_to_move,
            en_passant: None,
            halfmove_clock: 0,
            fullmove_number: 1,
            hash: 0,
            king_square: Square::A1,
            safety: Safety::default(),
            legal: MoveList::new(),
        }
    }

    /// Clear the has-moved flag of pawns on their starting rank and of the
    /// king and rook squares backing each castling right. Rights whose king
    /// or rook is missing are dropped.
    pub(crate) fn mark_unmoved(&mut self, rights: CastleRights) {
        self.has_moved = [true; 64];
        for color in Color::ALL {
            let pawn = Piece::new(PieceKind::Pawn, color);
            for file in 0..8 {
                let sq = Square::new(color.pawn_rank(), file);
                if self.board[sq.index()] == Some(pawn) {
                    self.has_moved[sq.index()] = false;
                }
            }
            for side in CastleSide::ALL {
                let king = CastleSide::king_home(color);
                let rook = side.rook_home(color);
                if rights.has(color, side)
                    && self.board[king.index()] == Some(Piece::new(PieceKind::King, color))
                    && self.board[rook.index()] == Some(Piece::new(PieceKind::Rook, color))
                {
                    self.has_moved[king.index()] = false;
                    self.has_moved[rook.index()] = false;
                }
            }
        }
    }

    /// Hash from scratch and build the derived caches.
    pub(crate) fn finish_setup(&mut self) {
        self.hash = zobrist::hash_from_scratch(self);
        self.refresh();
    }

    /// Rebuild king square, check/pin/attack caches and the legal moves.
    pub(crate) fn refresh(&mut self) {
        let us = self.side_to_move;
        self.king_square = self
            .pieces(us)
            .iter()
            .copied()
            .find(|&sq| self.board[sq.index()] == Some(Piece::new(PieceKind::King, us)))
            .unwrap_or(self.king_square);
        self.safety = movegen::analyze(self);
        self.legal = movegen::generate_legal_moves(self);
    }

    // --- Piece primitives. Each keeps board, lists, slots and hash in sync. ---

    /// Place a piece on an empty square, appending it to its owner's list.
    pub(crate) fn put_piece(&mut self, sq: Square, piece: Piece) {
        let color = piece.color().index();
        let slot = self.piece_count[color];
        debug_assert!((slot as usize) < MAX_PIECES);
        debug_assert!(self.board[sq.index()].is_none());
        self.board[sq.index()] = Some(piece);
        self.pieces[color][slot as usize] = sq;
        self.slot_of[sq.index()] = slot;
        self.piece_count[color] += 1;
        self.hash ^= zobrist::piece_square(piece, sq);
    }

    /// Remove the piece on `sq`. The last entry of the owner's list fills the
    /// hole. Returns the removed piece and the slot it held.
    pub(crate) fn remove_piece(&mut self, sq: Square) -> Option<(Piece, u8)> {
        let piece = self.board[sq.index()].take()?;
        let color = piece.color().index();
        let slot = self.slot_of[sq.index()];
        let last = self.piece_count[color] - 1;
        let moved = self.pieces[color][last as usize];
        self.pieces[color][slot as usize] = moved;
        self.slot_of[moved.index()] = slot;
        self.piece_count[color] = last;
        self.hash ^= zobrist::piece_square(piece, sq);
        Some((piece, slot))
    }

    /// Put a removed piece back into the slot it held, undoing
    /// [`Position::remove_piece`] exactly.
    pub(crate) fn restore_piece(&mut self, sq: Square, piece: Piece, slot: u8) {
        let color = piece.color().index();
        let end = self.piece_count[color];
        let displaced = self.pieces[color][slot as usize];
        self.pieces[color][end as usize] = displaced;
        self.slot_of[displaced.index()] = end;
        self.pieces[color][slot as usize] = sq;
        self.slot_of[sq.index()] = slot;
        self.piece_count[color] = end + 1;
        self.board[sq.index()] = Some(piece);
        self.hash ^= zobrist::piece_square(piece, sq);
    }

    /// Move the piece on `from` to the empty square `to`, keeping its slot.
    pub(crate) fn shift_piece(&mut self, from: Square, to: Square) {
        let Some(piece) = self.board[from.index()].take() else {
            return;
        };
        debug_assert!(self.board[to.index()].is_none());
        let slot = self.slot_of[from.index()];
        self.pieces[piece.color().index()][slot as usize] = to;
        self.slot_of[to.index()] = slot;
        self.board[to.index()] = Some(piece);
        self.hash ^= zobrist::piece_square(piece, from) ^ zobrist::piece_square(piece, to);
    }

    /// Replace the piece on an occupied square (promotion and its undo).
    pub(crate) fn replace_piece(&mut self, sq: Square, piece: Piece) {
        if let Some(old) = self.board[sq.index()].replace(piece) {
            self.hash ^= zobrist::piece_square(old, sq);
        }
        self.hash ^= zobrist::piece_square(piece, sq);
    }

    pub(crate) fn set_has_moved(&mut self, sq: Square, moved: bool) {
        self.has_moved[sq.index()] = moved;
    }

    pub(crate) fn set_en_passant(&mut self, target: Option<Square>) {
        self.en_passant = target;
    }

    pub(crate) fn set_side_to_move(&mut self, color: Color) {
        self.side_to_move = color;
    }

    pub(crate) fn set_halfmove_clock(&mut self, clock: u16) {
        self.halfmove_clock = clock;
    }

    pub(crate) fn set_fullmove_number(&mut self, number: u16) {
        self.fullmove_number = number;
    }

    pub(crate) fn toggle_hash(&mut self, key: u64) {
        self.hash ^= key;
    }

    pub(crate) fn slot_of(&self, sq: Square) -> u8 {
        self.slot_of[sq.index()]
    }

    pub(crate) fn safety(&self) -> &Safety {
        &self.safety
    }

    // --- Queries ---

    #[inline]
    pub fn piece_on(&self, sq: Square) -> Option<Piece> {
        self.board[sq.index()]
    }

    /// Squares occupied by `color`, in piece-list order.
    #[inline]
    pub fn pieces(&self, color: Color) -> &[Square] {
        &self.pieces[color.index()][..self.piece_count[color.index()] as usize]
    }

    #[inline]
    pub fn piece_count(&self, color: Color) -> usize {
        self.piece_count[color.index()] as usize
    }

    /// Whether a piece has ever left or arrived on `sq`.
    #[inline]
    pub fn has_moved(&self, sq: Square) -> bool {
        self.has_moved[sq.index()]
    }

    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    #[inline]
    pub fn en_passant(&self) -> Option<Square> {
        self.en_passant
    }

    #[inline]
    pub fn halfmove_clock(&self) -> u16 {
        self.halfmove_clock
    }

    #[inline]
    pub fn fullmove_number(&self) -> u16 {
        self.fullmove_number
    }

    /// Zobrist key of the position.
    #[inline]
    pub fn hash(&self) -> u64 {
        self.hash
    }

    /// King of the side to move.
    #[inline]
    pub fn king_square(&self) -> Square {
        self.king_square
    }

    /// Whether `color` may still castle toward `side`: king and rook stand on
    /// their home squares and neither square has ever been touched.
    pub fn can_castle(&self, color: Color, side: CastleSide) -> bool {
        let king = CastleSide::king_home(color);
        let rook = side.rook_home(color);
        !self.has_moved[king.index()]
            && !self.has_moved[rook.index()]
            && self.board[king.index()] == Some(Piece::new(PieceKind::King, color))
            && self.board[rook.index()] == Some(Piece::new(PieceKind::Rook, color))
    }

    /// Castling rights derived from the has-moved flags.
    pub fn castle_rights(&self) -> CastleRights {
        let mut rights = CastleRights::NONE;
        for color in Color::ALL {
            for side in CastleSide::ALL {
                if self.can_castle(color, side) {
                    rights = rights.with(color, side);
                }
            }
        }
        rights
    }

    #[inline]
    pub fn in_check(&self) -> bool {
        self.safety.checkers > 0
    }

    /// Two or more pieces give check; only the king may move.
    #[inline]
    pub fn is_multi_check(&self) -> bool {
        self.safety.checkers > 1
    }

    #[inline]
    pub fn pin_mask(&self) -> Bitboard {
        self.safety.pin_mask
    }

    #[inline]
    pub fn check_path(&self) -> Bitboard {
        self.safety.check_path
    }

    /// Squares attacked by the opponent of the side to move.
    #[inline]
    pub fn attacked(&self) -> Bitboard {
        self.safety.attacked
    }

    #[inline]
    pub fn pawn_attacked(&self) -> Bitboard {
        self.safety.pawn_attacked
    }

    /// Number of distinct squares the opponent attacks.
    #[inline]
    pub fn threat_count(&self) -> u32 {
        self.safety.attacked.count()
    }

    /// Legal moves for the side to move, cached since the last mutation.
    #[inline]
    pub fn legal_moves(&self) -> &MoveList {
        &self.legal
    }

    pub fn is_checkmate(&self) -> bool {
        self.in_check() && self.legal.is_empty()
    }

    /// No legal moves and not in check.
    pub fn is_stalemate(&self) -> bool {
        !self.in_check() && self.legal.is_empty()
    }

    /// Only the two kings remain.
    pub fn only_kings(&self) -> bool {
        self.piece_count == [1, 1]
    }

    /// Sum of basic piece weights for `color`.
    pub fn basic_material(&self, color: Color) -> i32 {
        self.pieces(color)
            .iter()
            .filter_map(|&sq| self.board[sq.index()])
            .map(Piece::weight)
            .sum()
    }

    /// The legal move whose packed form is `packed`.
    pub fn find_move(&self, packed: u32) -> Option<Move> {
        self.legal.iter().copied().find(|mv| mv.pack() == packed)
    }

    /// The legal move written as `uci` (e.g. `"e2e4"`, `"a7a8q"`).
    pub fn find_uci_move(&self, uci: &str) -> Option<Move> {
        self.legal.iter().copied().find(|mv| mv.to_uci() == uci)
    }

    /// Check the structural invariants a FEN placement must satisfy.
    pub fn validate(&self) -> Result<(), PositionError> {
        for color in Color::ALL {
            let king = Piece::new(PieceKind::King, color);
            let count = self
                .pieces(color)
                .iter()
                .filter(|&&sq| self.board[sq.index()] == Some(king))
                .count() as u32;
            if count != 1 {
                let color = match color {
                    Color::White => "white",
                    Color::Black => "black",
                };
                return Err(PositionError::InvalidKingCount { color, count });
            }
        }

        let pawn_on_back_rank = Square::all().any(|sq| {
            (sq.rank() == 0 || sq.rank() == 7)
                && self.board[sq.index()].is_some_and(|p| p.is_kind(PieceKind::Pawn))
        });
        if pawn_on_back_rank {
            return Err(PositionError::PawnsOnBackRank);
        }
        Ok(())
    }

    /// Pretty-printable 8x8 view.
    pub fn pretty(&self) -> PrettyBoard<'_> {
        PrettyBoard(self)
    }
}

impl PartialEq for Position {
    /// Two positions are equal when every stored field matches, including
    /// piece-list order. Derived caches follow from these fields.
    fn eq(&self, other: &Position) -> bool {
        self.board == other.board
            && self.piece_count == other.piece_count
            && Color::ALL
                .into_iter()
                .all(|c| self.pieces(c) == other.pieces(c))
            && self.has_moved == other.has_moved
            && self.side_to_move == other.side_to_move
            && self.en_passant == other.en_passant
            && self.halfmove_clock == other.halfmove_clock
            && self.fullmove_number == other.fullmove_number
            && self.hash == other.hash
    }
}

impl Eq for Position {}

impl Default for Position {
    fn default() -> Self {
        Position::starting_position()
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Position(\"{self}\")")
    }
}

/// Renders a position as a grid, rank 8 on top.
pub struct PrettyBoard<'a>(&'a Position);

impl fmt::Display for PrettyBoard<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0u8..8).rev() {
            write!(f, "{} ", rank + 1)?;
            for file in 0u8..8 {
                let c = self.0.piece_on(Square::new(rank, file)).map_or('.', Piece::fen_char);
                write!(f, " {c}")?;
            }
            writeln!(f)?;
        }
        write!(f, "   a b c d e f g h")
    }
}
