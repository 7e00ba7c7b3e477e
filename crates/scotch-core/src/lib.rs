//! Core chess types: mailbox position, attack tables, Zobrist hashing, move
//! generation, make/unmake, game history and the opening book.

mod attacks;
mod bitboard;
mod book;
mod castle_rights;
mod chess_move;
mod color;
mod error;
mod fen;
mod game;
mod make_move;
mod movegen;
mod perft;
mod piece;
mod piece_kind;
mod position;
mod square;
mod zobrist;

pub use attacks::{dist_to_center, manhattan};
pub use bitboard::Bitboard;
pub use book::OpeningBook;
pub use castle_rights::{CastleRights, CastleSide};
pub use chess_move::{Move, MoveType};
pub use color::Color;
pub use error::{BookError, FenError, MoveDecodeError, PositionError};
pub use fen::STARTING_FEN;
pub use game::{DrawReason, FIFTY_MOVE_LIMIT, Game, GameState};
pub use movegen::{MAX_MOVES, MoveList};
pub use perft::{divide, perft};
pub use piece::Piece;
pub use piece_kind::PieceKind;
pub use position::{MAX_PIECES, Position, PrettyBoard};
pub use square::Square;
pub use zobrist::hash_from_scratch;
