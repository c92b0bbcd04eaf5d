//! Text protocol handling.
//!
//! This module implements the line-oriented protocol a front end uses to
//! drive a game: board notation for positions and the command parser for the
//! main loop.

pub mod notation;
pub mod parser;

pub use notation::{
    encode_notation, encode_placement, parse_game, parse_notation, parse_placement,
    NotationError, START_NOTATION,
};
pub use parser::{parse_command, parse_square, Command};
