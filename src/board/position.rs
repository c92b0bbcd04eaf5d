//! Board coordinates.
//!
//! Row 0 is black's back rank and row 7 is white's. Coordinates are signed so
//! that off-board destinations can be expressed and rejected.

use std::fmt;

/// Number of rows and columns on the board.
pub const BOARD_SIZE: i32 = 8;

/// A cell coordinate, possibly outside the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub row: i32,
    pub col: i32,
}

impl Position {
    pub const fn new(row: i32, col: i32) -> Self {
        Position { row, col }
    }

    /// Returns true if both coordinates are within 0..8.
    pub const fn is_on_board(self) -> bool {
        self.row >= 0 && self.row < BOARD_SIZE && self.col >= 0 && self.col < BOARD_SIZE
    }

    /// Returns `(row, col)` as array indices, or None when off the board.
    pub fn indices(self) -> Option<(usize, usize)> {
        if self.is_on_board() {
            Some((self.row as usize, self.col as usize))
        } else {
            None
        }
    }

    /// Parses an algebraic square name such as `e2`.
    ///
    /// File `a` is column 0; rank `8` is row 0.
    pub fn from_algebraic(s: &str) -> Option<Position> {
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return None;
        }
        let file = bytes[0].to_ascii_lowercase();
        let rank = bytes[1];
        if !(b'a'..=b'h').contains(&file) || !(b'1'..=b'8').contains(&rank) {
            return None;
        }
        let col = (file - b'a') as i32;
        let row = BOARD_SIZE - (rank - b'0') as i32;
        Some(Position::new(row, col))
    }

    /// Returns the algebraic name, or None when off the board.
    pub fn to_algebraic(self) -> Option<String> {
        let (row, col) = self.indices()?;
        let file = (b'a' + col as u8) as char;
        let rank = BOARD_SIZE as usize - row;
        Some(format!("{}{}", file, rank))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_algebraic() {
            Some(name) => f.write_str(&name),
            None => write!(f, "({},{})", self.row, self.col),
        }
    }
}

/// Iterates over every on-board position, row 0 first.
pub fn all_positions() -> impl Iterator<Item = Position> {
    (0..BOARD_SIZE).flat_map(|row| (0..BOARD_SIZE).map(move |col| Position::new(row, col)))
}
