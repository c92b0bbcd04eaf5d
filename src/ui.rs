//! Front-end logic kept free of any display toolkit.
//!
//! A front end selects a piece with one click and moves it with the next.
//! The selection lives here, not in `ChessGame`, so the game stays a pure
//! board/turn state machine.

use crate::board::{Board, Position};
use crate::game::{ChessGame, GameState, MoveError, MoveOutcome};

/// Glyph drawn for an empty cell.
pub const EMPTY_CELL: char = '·';

/// Click selection state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Selection {
    #[default]
    None,
    Selected(Position),
}

/// What a click did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    /// First click landed on a piece of the side to move.
    Selected(Position),
    /// First click landed on an empty cell or an opponent's piece.
    Ignored(Position),
    /// Second click moved the selected piece. The board should be redrawn.
    Moved(MoveOutcome),
    /// Second click attempted a move that was rejected.
    Rejected(MoveError),
}

/// Turns a sequence of cell clicks into move attempts.
#[derive(Debug, Clone, Default)]
pub struct ClickController {
    selection: Selection,
}

impl ClickController {
    pub fn new() -> Self {
        ClickController::default()
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    /// Drops any pending selection.
    pub fn clear(&mut self) {
        self.selection = Selection::None;
    }

    /// Handles a click on a cell.
    ///
    /// The second click always clears the selection, whether or not the
    /// move was accepted.
    pub fn click(&mut self, game: &mut ChessGame, pos: Position) -> ClickOutcome {
        match self.selection {
            Selection::None => {
                let own_piece = game
                    .board()
                    .get(pos)
                    .is_some_and(|p| p.color == game.current_turn());
                if own_piece && !game.is_game_over() {
                    self.selection = Selection::Selected(pos);
                    ClickOutcome::Selected(pos)
                } else {
                    ClickOutcome::Ignored(pos)
                }
            }
            Selection::Selected(from) => {
                self.selection = Selection::None;
                match game.try_move(from, pos) {
                    Ok(outcome) => ClickOutcome::Moved(outcome),
                    Err(e) => ClickOutcome::Rejected(e),
                }
            }
        }
    }
}

/// Draws the board as text, row 0 at the top.
///
/// Each line starts with the rank number; the last line lists the files.
pub fn render_board(board: &Board) -> String {
    let mut out = String::new();
    for (row, cells) in board.rows().iter().enumerate() {
        out.push_str(&format!("{} ", 8 - row));
        let line: Vec<String> = cells
            .iter()
            .map(|cell| cell.map_or(EMPTY_CELL, |p| p.symbol()).to_string())
            .collect();
        out.push_str(&line.join(" "));
        out.push('\n');
    }
    out.push_str("  a b c d e f g h");
    out
}

/// Returns the status text shown under the board.
pub fn status_line(state: &GameState) -> String {
    match (state.is_game_over, state.winner) {
        (true, Some(winner)) => format!("Game Over! {} wins!", winner.name()),
        (true, None) => "Game Over!".to_string(),
        _ => format!("Current turn: {}", state.current_turn.name()),
    }
}
