//! simplechess library.
//!
//! Exposes the board representation, the game state machine, move
//! enumeration, front-end helpers, and the text protocol for use by
//! integration tests and the binary entry points.

pub mod board;
pub mod engine;
pub mod game;
pub mod movegen;
pub mod protocol;
pub mod selfplay;
pub mod ui;

pub use board::{Board, Color, Piece, PieceKind, Position};
pub use game::{ChessGame, GameState, MoveError, MoveOutcome};
