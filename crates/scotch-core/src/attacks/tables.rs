//! Per-square tables computed once at compile time.

use crate::bitboard::Bitboard;

/// Square-index offsets of the eight ray directions:
/// N, S, W, E (orthogonal) then NW, SE, NE, SW (diagonal).
pub(crate) const DIRECTIONS: [i8; 8] = [8, -8, -1, 1, 7, -7, 9, -9];

/// Marker in [`DIRECTION_LOOKUP`] for squares that share no ray.
pub(crate) const NO_DIRECTION: u8 = 8;

const fn min(a: u8, b: u8) -> u8 {
    if a < b { a } else { b }
}

const fn max(a: i8, b: i8) -> i8 {
    if a > b { a } else { b }
}

const fn abs(x: i8) -> i8 {
    if x < 0 { -x } else { x }
}

const fn signum(x: i8) -> i8 {
    if x > 0 {
        1
    } else if x < 0 {
        -1
    } else {
        0
    }
}

const fn compute_dist_to_edge() -> [[u8; 8]; 64] {
    let mut table = [[0u8; 8]; 64];
    let mut sq = 0usize;
    while sq < 64 {
        let rank = (sq / 8) as u8;
        let file = (sq % 8) as u8;
        let north = 7 - rank;
        let south = rank;
        let west = file;
        let east = 7 - file;
        table[sq] = [
            north,
            south,
            west,
            east,
            min(north, west),
            min(south, east),
            min(north, east),
            min(south, west),
        ];
        sq += 1;
    }
    table
}

/// Jump table for a leaper described by (rank, file) deltas.
const fn compute_leaper(deltas: &[(i8, i8)]) -> [Bitboard; 64] {
    let mut table = [Bitboard::EMPTY; 64];
    let mut sq = 0usize;
    while sq < 64 {
        let rank = (sq / 8) as i8;
        let file = (sq % 8) as i8;
        let mut bits = 0u64;
        let mut d = 0;
        while d < deltas.len() {
            let r = rank + deltas[d].0;
            let f = file + deltas[d].1;
            if r >= 0 && r < 8 && f >= 0 && f < 8 {
                bits |= 1u64 << (r * 8 + f) as u32;
            }
            d += 1;
        }
        table[sq] = Bitboard::new(bits);
        sq += 1;
    }
    table
}

const KNIGHT_DELTAS: [(i8, i8); 8] = [
    (2, 1), (2, -1), (-2, 1), (-2, -1),
    (1, 2), (1, -2), (-1, 2), (-1, -2),
];

const KING_DELTAS: [(i8, i8); 8] = [
    (1, 0), (-1, 0), (0, -1), (0, 1),
    (1, -1), (-1, 1), (1, 1), (-1, -1),
];

const WHITE_PAWN_DELTAS: [(i8, i8); 2] = [(1, -1), (1, 1)];
const BLACK_PAWN_DELTAS: [(i8, i8); 2] = [(-1, -1), (-1, 1)];

const fn compute_direction_lookup() -> [[u8; 64]; 64] {
    let mut table = [[NO_DIRECTION; 64]; 64];
    let mut from = 0usize;
    while from < 64 {
        let mut to = 0usize;
        while to < 64 {
            let dr = (to / 8) as i8 - (from / 8) as i8;
            let df = (to % 8) as i8 - (from % 8) as i8;
            let aligned = dr == 0 || df == 0 || abs(dr) == abs(df);
            if from != to && aligned {
                let step = signum(dr) * 8 + signum(df);
                let mut dir = 0;
                while dir < 8 {
                    if DIRECTIONS[dir] == step {
                        table[from][to] = dir as u8;
                    }
                    dir += 1;
                }
            }
            to += 1;
        }
        from += 1;
    }
    table
}

const fn compute_dist_to_center() -> [u8; 64] {
    let mut table = [0u8; 64];
    let mut sq = 0usize;
    while sq < 64 {
        let rank = (sq / 8) as i8;
        let file = (sq % 8) as i8;
        table[sq] = (max(3 - file, file - 4) + max(3 - rank, rank - 4)) as u8;
        sq += 1;
    }
    table
}

const fn compute_manhattan() -> [[u8; 64]; 64] {
    let mut table = [[0u8; 64]; 64];
    let mut a = 0usize;
    while a < 64 {
        let mut b = 0usize;
        while b < 64 {
            let dr = (a / 8) as i8 - (b / 8) as i8;
            let df = (a % 8) as i8 - (b % 8) as i8;
            table[a][b] = (abs(dr) + abs(df)) as u8;
            b += 1;
        }
        a += 1;
    }
    table
}

pub(crate) static DIST_TO_EDGE: [[u8; 8]; 64] = compute_dist_to_edge();
pub(crate) static KNIGHT_TARGETS: [Bitboard; 64] = compute_leaper(&KNIGHT_DELTAS);
pub(crate) static KING_TARGETS: [Bitboard; 64] = compute_leaper(&KING_DELTAS);
pub(crate) static PAWN_ATTACKS: [[Bitboard; 64]; 2] = [
    compute_leaper(&WHITE_PAWN_DELTAS),
    compute_leaper(&BLACK_PAWN_DELTAS),
];
pub(crate) static DIRECTION_LOOKUP: [[u8; 64]; 64] = compute_direction_lookup();
pub(crate) static DIST_TO_CENTER: [u8; 64] = compute_dist_to_center();
pub(crate) static MANHATTAN: [[u8; 64]; 64] = compute_manhattan();
