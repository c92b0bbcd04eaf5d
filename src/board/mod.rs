//! Board representation.
//!
//! Contains pieces, coordinates, and the 8x8 grid.

pub mod grid;
pub mod piece;
pub mod position;

pub use grid::{back_rank_row, pawn_row, Board, BACK_RANK};
pub use piece::{Color, Piece, PieceKind, ALL_KINDS};
pub use position::{all_positions, Position, BOARD_SIZE};
