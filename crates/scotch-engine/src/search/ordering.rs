//! Move ordering: the TT move first, then captures by value gained,
//! promotions, and a penalty for stepping onto a pawn-attacked square.

use scotch_core::{Move, MoveList, MoveType, Position, Square};

use crate::eval::pst::piece_value;

/// Score given to the move remembered by the transposition table.
pub const TT_MOVE_SCORE: i32 = 100_000;

/// Square the captured piece stands on. Differs from `end` for en passant.
fn victim_square(mv: &Move) -> Square {
    match mv.kind() {
        MoveType::EnPassant => Square::new(mv.start().rank(), mv.end().file()),
        _ => mv.end(),
    }
}

/// Score a move for ordering. Higher scores are searched first.
///
/// - Captures: ten times the victim's value minus the capturer's value.
/// - Promotions: twice the basic weight of the new piece.
/// - Landing on a square an enemy pawn attacks: minus the mover's value.
pub fn score_move(pos: &Position, mv: &Move, endgame: bool) -> i32 {
    let actor_value = piece_value(mv.actor(), mv.start(), endgame);
    let mut score = 0;

    if mv.is_capture()
        && let Some(victim) = mv.captured()
    {
        score += 10 * (piece_value(victim, victim_square(mv), endgame) - actor_value);
    }

    if let Some(promoted) = mv.promote_to() {
        score += 2 * promoted.weight();
    }

    if pos.pawn_attacked().contains(mv.end()) {
        score -= actor_value;
    }

    score
}

/// Incremental move picker using selection sort.
///
/// Yields moves in descending score order, so a cutoff early in the list
/// skips sorting the rest.
pub struct MovePicker {
    moves: Vec<Move>,
    scores: Vec<i32>,
    cursor: usize,
}

impl MovePicker {
    /// Picker over every move in `moves`. The move whose packed form equals
    /// `tt_move` goes first.
    pub fn new(moves: &MoveList, pos: &Position, endgame: bool, tt_move: Option<u32>) -> Self {
        let moves: Vec<Move> = moves.iter().copied().collect();
        let scores = moves
            .iter()
            .map(|mv| {
                if tt_move == Some(mv.pack()) {
                    TT_MOVE_SCORE
                } else {
                    score_move(pos, mv, endgame)
                }
            })
            .collect();
        Self {
            moves,
            scores,
            cursor: 0,
        }
    }

    /// Picker for quiescence search: captures only.
    pub fn new_qsearch(moves: &MoveList, pos: &Position, endgame: bool) -> Self {
        let moves: Vec<Move> = moves.iter().copied().filter(Move::is_capture).collect();
        let scores = moves.iter().map(|mv| score_move(pos, mv, endgame)).collect();
        Self {
            moves,
            scores,
            cursor: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    /// Yield the next highest-scored move. Ties keep generation order.
    pub fn pick_next(&mut self) -> Option<Move> {
        if self.cursor >= self.moves.len() {
            return None;
        }

        let mut best_idx = self.cursor;
        for i in (self.cursor + 1)..self.moves.len() {
            if self.scores[i] > self.scores[best_idx] {
                best_idx = i;
            }
        }

        self.moves.swap(self.cursor, best_idx);
        self.scores.swap(self.cursor, best_idx);

        let mv = self.moves[self.cursor];
        self.cursor += 1;
        Some(mv)
    }
}
