//! Board notation encoding and decoding.
//!
//! A position is written as `<placement> <side>`, in the style of chess FEN.
//! The placement lists the eight rows from row 0 (black's back rank) to
//! row 7, separated by `/`. Within a row, letters are pieces (uppercase
//! white, lowercase black) and digits 1-8 are runs of empty cells. The side
//! to move is `w` or `b`.
//!
//! Example: `rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w`

use crate::board::{Board, Color, Piece, Position, BOARD_SIZE};
use crate::game::ChessGame;

/// Notation of the standard starting position.
pub const START_NOTATION: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w";

/// Errors that can occur during notation parsing.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum NotationError {
    #[error("empty input")]
    EmptyInput,

    #[error("expected 8 rows separated by '/', got {0}")]
    WrongRowCount(usize),

    #[error("row {row} describes {cells} cells, expected 8")]
    WrongRowLength { row: usize, cells: usize },

    #[error("invalid piece character: '{0}'")]
    InvalidPiece(char),

    #[error("missing side to move")]
    MissingSide,

    #[error("invalid side to move: '{0}'")]
    InvalidSide(String),

    #[error("unexpected trailing input: '{0}'")]
    TrailingInput(String),
}

/// Parses one placement row into the board.
fn parse_row(row: usize, s: &str, board: &mut Board) -> Result<(), NotationError> {
    let mut col: usize = 0;
    for c in s.chars() {
        if let Some(run) = c.to_digit(10) {
            if run == 0 || run > 8 {
                return Err(NotationError::InvalidPiece(c));
            }
            col += run as usize;
        } else {
            let piece = Piece::from_letter(c).ok_or(NotationError::InvalidPiece(c))?;
            if col < BOARD_SIZE as usize {
                board.place(Position::new(row as i32, col as i32), piece);
            }
            col += 1;
        }
    }
    if col != BOARD_SIZE as usize {
        return Err(NotationError::WrongRowLength { row, cells: col });
    }
    Ok(())
}

/// Parses a placement string (without the side to move) into a board.
pub fn parse_placement(s: &str) -> Result<Board, NotationError> {
    let rows: Vec<&str> = s.split('/').collect();
    if rows.len() != BOARD_SIZE as usize {
        return Err(NotationError::WrongRowCount(rows.len()));
    }

    let mut board = Board::empty();
    for (row, text) in rows.iter().enumerate() {
        parse_row(row, text, &mut board)?;
    }
    Ok(board)
}

/// Parses a full `<placement> <side>` string.
pub fn parse_notation(s: &str) -> Result<(Board, Color), NotationError> {
    let mut tokens = s.split_whitespace();
    let placement = tokens.next().ok_or(NotationError::EmptyInput)?;
    let side = tokens.next().ok_or(NotationError::MissingSide)?;
    let rest: Vec<&str> = tokens.collect();
    if !rest.is_empty() {
        return Err(NotationError::TrailingInput(rest.join(" ")));
    }

    let board = parse_placement(placement)?;
    let mut side_chars = side.chars();
    let color = match (side_chars.next(), side_chars.next()) {
        (Some(c), None) => Color::from_notation_char(c),
        _ => None,
    }
    .ok_or_else(|| NotationError::InvalidSide(side.to_string()))?;

    Ok((board, color))
}

/// Parses notation straight into a fresh game.
pub fn parse_game(s: &str) -> Result<ChessGame, NotationError> {
    let (board, turn) = parse_notation(s)?;
    Ok(ChessGame::from_board(board, turn))
}

/// Encodes the placement part for a board.
pub fn encode_placement(board: &Board) -> String {
    let mut rows: Vec<String> = Vec::with_capacity(BOARD_SIZE as usize);
    for cells in board.rows() {
        let mut row = String::new();
        let mut empty = 0;
        for cell in cells {
            match cell {
                Some(piece) => {
                    if empty > 0 {
                        row.push_str(&empty.to_string());
                        empty = 0;
                    }
                    row.push(piece.letter());
                }
                None => empty += 1,
            }
        }
        if empty > 0 {
            row.push_str(&empty.to_string());
        }
        rows.push(row);
    }
    rows.join("/")
}

/// Encodes the current position of a game.
pub fn encode_notation(game: &ChessGame) -> String {
    format!(
        "{} {}",
        encode_placement(&game.board()),
        game.current_turn().notation_char()
    )
}
