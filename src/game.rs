//! Game state machine.
//!
//! `ChessGame` owns the board, the side to move, and the game-over flag.
//! Moves follow a deliberately simplified rule: any piece may go to any
//! on-board square not held by a friendly piece. Piece geometry, blocking,
//! and check are never considered. Capturing a king ends the game.
//!
//! Once the game is over it stays over, and every further move is rejected.

use log::debug;
use serde::Serialize;
use thiserror::Error;

use crate::board::{Board, Color, Piece, PieceKind, Position};

/// Why a move was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("the game is over")]
    GameOver,

    #[error("no piece on {0}")]
    EmptySource(Position),

    #[error("{0} is not the side to move")]
    WrongTurn(&'static str),

    #[error("{0} is off the board")]
    OffBoard(Position),

    #[error("{0} is occupied by a friendly piece")]
    FriendlyDestination(Position),
}

impl MoveError {
    /// Returns a single-token reason code used by the text protocol.
    pub const fn code(&self) -> &'static str {
        match self {
            MoveError::GameOver => "gameover",
            MoveError::EmptySource(_) => "empty",
            MoveError::WrongTurn(_) => "turn",
            MoveError::OffBoard(_) => "offboard",
            MoveError::FriendlyDestination(_) => "friendly",
        }
    }
}

/// The result of an accepted move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveOutcome {
    pub from: Position,
    pub to: Position,
    pub piece: Piece,
    pub captured: Option<Piece>,
    pub ended_game: bool,
}

/// Read-only snapshot of a game, built on demand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    pub board: Board,
    pub current_turn: Color,
    pub is_game_over: bool,
    pub winner: Option<Color>,
}

/// The single source of truth for a game in progress.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChessGame {
    board: Board,
    current_turn: Color,
    game_over: bool,
}

impl Default for ChessGame {
    fn default() -> Self {
        ChessGame::new()
    }
}

impl ChessGame {
    /// Creates a game in the standard starting position with white to move.
    pub fn new() -> Self {
        ChessGame {
            board: Board::standard(),
            current_turn: Color::White,
            game_over: false,
        }
    }

    /// Creates a game from an arbitrary position.
    ///
    /// The game starts in progress regardless of which kings are present.
    pub fn from_board(board: Board, current_turn: Color) -> Self {
        ChessGame {
            board,
            current_turn,
            game_over: false,
        }
    }

    /// Resets to the standard starting position.
    pub fn initialize(&mut self) {
        *self = ChessGame::new();
    }

    /// Returns a copy of the grid.
    pub fn board(&self) -> Board {
        self.board
    }

    pub fn current_turn(&self) -> Color {
        self.current_turn
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    /// Returns the color that captured a king, if the game is over.
    ///
    /// The turn flips after the capturing move, so the winner is the side
    /// that is no longer to move.
    pub fn winner(&self) -> Option<Color> {
        if self.game_over {
            Some(self.current_turn.opposite())
        } else {
            None
        }
    }

    /// Builds a snapshot of the current game.
    pub fn game_state(&self) -> GameState {
        GameState {
            board: self.board,
            current_turn: self.current_turn,
            is_game_over: self.game_over,
            winner: self.winner(),
        }
    }

    /// Attempts a move. Returns true if it was applied.
    ///
    /// A rejected move leaves the game untouched.
    pub fn attempt_move(&mut self, from: Position, to: Position) -> bool {
        self.try_move(from, to).is_ok()
    }

    /// Checks whether a move would be accepted without applying it.
    pub fn validate_move(&self, from: Position, to: Position) -> Result<Piece, MoveError> {
        if self.game_over {
            return Err(MoveError::GameOver);
        }
        let piece = self.board.get(from).ok_or(MoveError::EmptySource(from))?;
        if piece.color != self.current_turn {
            return Err(MoveError::WrongTurn(piece.color.name()));
        }
        if !to.is_on_board() {
            return Err(MoveError::OffBoard(to));
        }
        if let Some(target) = self.board.get(to) {
            if target.color == piece.color {
                return Err(MoveError::FriendlyDestination(to));
            }
        }
        Ok(piece)
    }

    /// Attempts a move, reporting why it was rejected.
    pub fn try_move(&mut self, from: Position, to: Position) -> Result<MoveOutcome, MoveError> {
        let piece = match self.validate_move(from, to) {
            Ok(p) => p,
            Err(e) => {
                debug!("rejected {} -> {}: {}", from, to, e);
                return Err(e);
            }
        };

        let captured = self.board.get(to);
        let ended_game = matches!(captured, Some(p) if p.kind == PieceKind::King);
        if ended_game {
            self.game_over = true;
        }

        self.board.set(to, Some(piece));
        self.board.set(from, None);
        self.current_turn = self.current_turn.opposite();

        debug!(
            "{} {} {} -> {}{}",
            piece.color.name(),
            piece.kind.name(),
            from,
            to,
            if ended_game { " (king captured)" } else { "" }
        );

        Ok(MoveOutcome {
            from,
            to,
            piece,
            captured,
            ended_game,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::all_positions;

    fn pos(row: i32, col: i32) -> Position {
        Position::new(row, col)
    }

    #[test]
    fn new_game_is_white_to_move() {
        let game = ChessGame::new();
        assert_eq!(game.current_turn(), Color::White);
        assert!(!game.is_game_over());
        assert_eq!(game.board().count(Color::White), 16);
        assert_eq!(game.board().count(Color::Black), 16);
    }

    #[test]
    fn pawn_push_flips_turn() {
        let mut game = ChessGame::new();
        assert!(game.attempt_move(pos(6, 4), pos(4, 4)));
        assert_eq!(game.current_turn(), Color::Black);
        let board = game.board();
        assert_eq!(board.get(pos(6, 4)), None);
        assert_eq!(
            board.get(pos(4, 4)),
            Some(Piece::new(PieceKind::Pawn, Color::White))
        );
    }

    #[test]
    fn wrong_turn_is_rejected_without_change() {
        let mut game = ChessGame::new();
        assert!(game.attempt_move(pos(6, 4), pos(4, 4)));
        let before = game.clone();
        // Black to move; white pawn cannot move.
        assert_eq!(
            game.try_move(pos(4, 4), pos(3, 4)),
            Err(MoveError::WrongTurn("white"))
        );
        assert_eq!(game, before);
    }

    #[test]
    fn black_piece_on_first_move_is_rejected() {
        let mut game = ChessGame::new();
        let before = game.board();
        assert!(!game.attempt_move(pos(1, 4), pos(3, 4)));
        assert_eq!(game.board(), before);
        assert_eq!(game.current_turn(), Color::White);
    }

    #[test]
    fn same_square_move_always_fails() {
        let game = ChessGame::new();
        for p in all_positions() {
            let mut g = game.clone();
            let err = g.try_move(p, p).unwrap_err();
            match game.board().get(p) {
                None => assert_eq!(err, MoveError::EmptySource(p)),
                Some(piece) if piece.color == Color::White => {
                    assert_eq!(err, MoveError::FriendlyDestination(p))
                }
                Some(_) => assert_eq!(err, MoveError::WrongTurn("black")),
            }
            assert_eq!(g, game);
        }
    }

    #[test]
    fn off_board_destinations_fail() {
        let mut game = ChessGame::new();
        for to in [pos(-1, 0), pos(8, 0), pos(6, -1), pos(6, 8), pos(100, 100)] {
            assert_eq!(game.try_move(pos(6, 0), to), Err(MoveError::OffBoard(to)));
        }
        assert_eq!(game, ChessGame::new());
    }

    #[test]
    fn off_board_source_is_empty() {
        let mut game = ChessGame::new();
        assert_eq!(
            game.try_move(pos(9, 0), pos(4, 0)),
            Err(MoveError::EmptySource(pos(9, 0)))
        );
    }

    #[test]
    fn geometry_is_not_checked() {
        let mut game = ChessGame::new();
        // Rook jumps over its own pawn to the far side of the board.
        assert!(game.attempt_move(pos(7, 0), pos(3, 5)));
        assert_eq!(
            game.board().get(pos(3, 5)),
            Some(Piece::new(PieceKind::Rook, Color::White))
        );
    }

    #[test]
    fn capture_of_non_king_keeps_game_running() {
        let mut game = ChessGame::new();
        let outcome = game.try_move(pos(6, 3), pos(1, 3)).unwrap();
        assert_eq!(
            outcome.captured,
            Some(Piece::new(PieceKind::Pawn, Color::Black))
        );
        assert!(!outcome.ended_game);
        assert!(!game.is_game_over());
        assert_eq!(game.game_state().winner, None);
        assert_eq!(game.board().count(Color::Black), 15);
    }

    #[test]
    fn king_capture_ends_game_for_mover() {
        let mut board = Board::empty();
        board.place(pos(0, 0), Piece::new(PieceKind::Rook, Color::White));
        board.place(pos(7, 7), Piece::new(PieceKind::King, Color::Black));
        let mut game = ChessGame::from_board(board, Color::White);

        assert!(game.attempt_move(pos(0, 0), pos(7, 7)));
        assert!(game.is_game_over());
        let state = game.game_state();
        assert!(state.is_game_over);
        assert_eq!(state.winner, Some(Color::White));
        assert_eq!(state.current_turn, Color::Black);
        assert_eq!(
            state.board.get(pos(7, 7)),
            Some(Piece::new(PieceKind::Rook, Color::White))
        );
    }

    #[test]
    fn black_can_win_too() {
        let mut board = Board::empty();
        board.place(pos(7, 4), Piece::new(PieceKind::King, Color::White));
        board.place(pos(0, 3), Piece::new(PieceKind::Queen, Color::Black));
        let mut game = ChessGame::from_board(board, Color::Black);
        assert!(game.attempt_move(pos(0, 3), pos(7, 4)));
        assert_eq!(game.winner(), Some(Color::Black));
    }

    #[test]
    fn moves_after_game_over_are_rejected() {
        let mut board = Board::empty();
        board.place(pos(0, 0), Piece::new(PieceKind::Rook, Color::White));
        board.place(pos(7, 7), Piece::new(PieceKind::King, Color::Black));
        board.place(pos(3, 3), Piece::new(PieceKind::Pawn, Color::Black));
        let mut game = ChessGame::from_board(board, Color::White);
        assert!(game.attempt_move(pos(0, 0), pos(7, 7)));

        let before = game.clone();
        assert_eq!(game.try_move(pos(3, 3), pos(4, 3)), Err(MoveError::GameOver));
        assert_eq!(game, before);
        assert!(game.is_game_over());
        assert_eq!(game.winner(), Some(Color::White));
    }

    #[test]
    fn returned_board_is_a_copy() {
        let game = ChessGame::new();
        let mut board = game.board();
        board.take(pos(7, 4));
        let mut state = game.game_state();
        state.board.take(pos(0, 4));
        assert!(game.board().get(pos(7, 4)).is_some());
        assert!(game.board().get(pos(0, 4)).is_some());
    }

    #[test]
    fn initialize_resets_everything() {
        let mut game = ChessGame::new();
        assert!(game.attempt_move(pos(6, 0), pos(0, 4)));
        assert!(game.is_game_over());
        game.initialize();
        assert_eq!(game, ChessGame::new());
    }

    #[test]
    fn game_state_serializes_camel_case() {
        let json = serde_json::to_value(ChessGame::new().game_state()).unwrap();
        assert_eq!(json["currentTurn"], "white");
        assert_eq!(json["isGameOver"], false);
        assert!(json["winner"].is_null());
        assert_eq!(json["board"][7][4]["type"], "king");
        assert_eq!(json["board"][7][4]["symbol"], "♔");
    }
}
