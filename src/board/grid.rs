//! The 8x8 grid of cells.
//!
//! `Board` is a fixed-size `Copy` array, so every accessor that hands a board
//! out returns an independent copy.

use serde::Serialize;

use super::piece::{Color, Piece, PieceKind};
use super::position::{all_positions, Position};

/// Back rank order from column 0 to column 7.
pub const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// Returns the back rank row for a color.
pub const fn back_rank_row(color: Color) -> usize {
    match color {
        Color::Black => 0,
        Color::White => 7,
    }
}

/// Returns the starting pawn row for a color.
pub const fn pawn_row(color: Color) -> usize {
    match color {
        Color::Black => 1,
        Color::White => 6,
    }
}

/// Piece placement: `cells[row][col]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Board {
    cells: [[Option<Piece>; 8]; 8],
}

impl Default for Board {
    fn default() -> Self {
        Board::empty()
    }
}

impl Board {
    /// Creates a board with no pieces.
    pub const fn empty() -> Self {
        Board {
            cells: [[None; 8]; 8],
        }
    }

    /// Creates the standard starting position.
    pub fn standard() -> Self {
        let mut board = Board::empty();
        for color in [Color::Black, Color::White] {
            let back = back_rank_row(color);
            let pawns = pawn_row(color);
            for (col, kind) in BACK_RANK.iter().enumerate() {
                board.cells[back][col] = Some(Piece::new(*kind, color));
                board.cells[pawns][col] = Some(Piece::new(PieceKind::Pawn, color));
            }
        }
        board
    }

    /// Returns the piece at a position. Off-board positions are empty.
    pub fn get(&self, pos: Position) -> Option<Piece> {
        let (row, col) = pos.indices()?;
        self.cells[row][col]
    }

    /// Places a piece. Returns false if the position is off the board or occupied.
    pub fn place(&mut self, pos: Position, piece: Piece) -> bool {
        match pos.indices() {
            Some((row, col)) if self.cells[row][col].is_none() => {
                self.cells[row][col] = Some(piece);
                true
            }
            _ => false,
        }
    }

    /// Removes and returns the piece at a position.
    pub fn take(&mut self, pos: Position) -> Option<Piece> {
        let (row, col) = pos.indices()?;
        self.cells[row][col].take()
    }

    /// Writes a cell unconditionally. Off-board positions are ignored.
    pub(crate) fn set(&mut self, pos: Position, piece: Option<Piece>) {
        if let Some((row, col)) = pos.indices() {
            self.cells[row][col] = piece;
        }
    }

    /// Returns the rows of the grid, row 0 first.
    pub fn rows(&self) -> &[[Option<Piece>; 8]; 8] {
        &self.cells
    }

    /// Iterates over occupied cells.
    pub fn pieces(&self) -> impl Iterator<Item = (Position, Piece)> + '_ {
        all_positions().filter_map(move |pos| self.get(pos).map(|p| (pos, p)))
    }

    /// Counts the pieces of one color.
    pub fn count(&self, color: Color) -> usize {
        self.pieces().filter(|(_, p)| p.color == color).count()
    }

    /// Returns true if the color still has a king on the board.
    pub fn has_king(&self, color: Color) -> bool {
        self.pieces()
            .any(|(_, p)| p.color == color && p.kind == PieceKind::King)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_board_has_no_pieces() {
        let board = Board::empty();
        assert_eq!(board.pieces().count(), 0);
        assert!(!board.has_king(Color::White));
    }

    #[test]
    fn standard_board_has_sixteen_per_side() {
        let board = Board::standard();
        assert_eq!(board.count(Color::White), 16);
        assert_eq!(board.count(Color::Black), 16);
        for row in 2..6 {
            for col in 0..8 {
                assert_eq!(board.get(Position::new(row, col)), None);
            }
        }
    }

    #[test]
    fn standard_back_ranks_in_order() {
        let board = Board::standard();
        for color in [Color::White, Color::Black] {
            let back = back_rank_row(color) as i32;
            let pawns = pawn_row(color) as i32;
            for col in 0..8 {
                assert_eq!(
                    board.get(Position::new(back, col)),
                    Some(Piece::new(BACK_RANK[col as usize], color))
                );
                assert_eq!(
                    board.get(Position::new(pawns, col)),
                    Some(Piece::new(PieceKind::Pawn, color))
                );
            }
        }
    }

    #[test]
    fn place_rejects_occupied_and_off_board() {
        let mut board = Board::empty();
        let rook = Piece::new(PieceKind::Rook, Color::White);
        assert!(board.place(Position::new(0, 0), rook));
        assert!(!board.place(Position::new(0, 0), rook));
        assert!(!board.place(Position::new(8, 0), rook));
        assert_eq!(board.take(Position::new(0, 0)), Some(rook));
        assert_eq!(board.get(Position::new(0, 0)), None);
    }

    #[test]
    fn copies_are_independent() {
        let original = Board::standard();
        let mut copy = original;
        copy.take(Position::new(6, 4));
        assert!(original.get(Position::new(6, 4)).is_some());
    }

    #[test]
    fn serializes_as_nested_rows() {
        let mut board = Board::empty();
        board.place(Position::new(0, 1), Piece::new(PieceKind::King, Color::Black));
        let value = serde_json::to_value(board).unwrap();
        let rows = value.as_array().unwrap();
        assert_eq!(rows.len(), 8);
        assert!(rows[0][0].is_null());
        assert_eq!(rows[0][1]["type"], "king");
        assert_eq!(rows[0][1]["color"], "black");
    }
}
