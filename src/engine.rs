//! Session state management.
//!
//! Holds the current game, the pending click selection, engine options, and
//! the random mover used by `go`. Each handler writes its protocol response
//! to the given writer.

use std::collections::HashMap;
use std::io::{self, Write};

use log::{info, warn};
use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::board::Position;
use crate::game::{ChessGame, MoveError, MoveOutcome};
use crate::movegen::random_move;
use crate::protocol::notation::{encode_notation, parse_game, NotationError};
use crate::ui::{render_board, status_line, ClickController, ClickOutcome, Selection};

/// Name reported in the handshake.
const ENGINE_NAME: &str = "simplechess";

/// Holds the mutable state of the engine between commands.
pub struct Engine {
    pub game: ChessGame,
    pub clicks: ClickController,
    pub options: HashMap<String, String>,
    rng: SmallRng,
}

impl Default for Engine {
    fn default() -> Self {
        Engine::new()
    }
}

impl Engine {
    /// Creates an engine with a game in the starting position.
    pub fn new() -> Self {
        Engine {
            game: ChessGame::new(),
            clicks: ClickController::new(),
            options: HashMap::new(),
            rng: SmallRng::from_entropy(),
        }
    }

    /// Resets the game and any pending selection.
    pub fn new_game(&mut self) {
        self.game.initialize();
        self.clicks.clear();
    }

    /// Replaces the current game with a position given in board notation.
    /// The previous game is kept on failure.
    pub fn set_position(&mut self, notation: &str) -> Result<(), NotationError> {
        self.game = parse_game(notation)?;
        self.clicks.clear();
        Ok(())
    }

    /// Sets an engine option. `Seed` reseeds the random mover; 0 means entropy.
    pub fn set_option(&mut self, name: String, value: Option<String>) {
        let value = value.unwrap_or_default();
        if name == "Seed" {
            match value.parse::<u64>() {
                Ok(0) => self.rng = SmallRng::from_entropy(),
                Ok(seed) => self.rng = SmallRng::seed_from_u64(seed),
                Err(_) => {
                    warn!("invalid Seed value: '{}'", value);
                    return;
                }
            }
            info!("random mover seeded with '{}'", value);
        }
        self.options.insert(name, value);
    }

    /// Handles the handshake: writes id, options, and `hellook`.
    pub fn handle_hello<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "id name {}", ENGINE_NAME)?;
        writeln!(out, "option name Seed type spin default 0")?;
        writeln!(out, "hellook")?;
        out.flush()
    }

    /// Handles the `isready` command.
    pub fn handle_isready<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "readyok")?;
        out.flush()
    }

    /// Handles `move <from> <to>`.
    pub fn handle_move<W: Write>(
        &mut self,
        from: Position,
        to: Position,
        out: &mut W,
    ) -> io::Result<()> {
        // A typed move abandons any half-finished click gesture.
        self.clicks.clear();
        let result = self.game.try_move(from, to);
        write_move_result(from, to, result, out)?;
        out.flush()
    }

    /// Handles `click <square>`.
    pub fn handle_click<W: Write>(&mut self, at: Position, out: &mut W) -> io::Result<()> {
        let from = match self.clicks.selection() {
            Selection::Selected(p) => Some(p),
            Selection::None => None,
        };
        match self.clicks.click(&mut self.game, at) {
            ClickOutcome::Selected(p) => writeln!(out, "selected {}", p)?,
            ClickOutcome::Ignored(p) => writeln!(out, "ignored {}", p)?,
            ClickOutcome::Moved(outcome) => {
                write_move_result(outcome.from, outcome.to, Ok(outcome), out)?
            }
            ClickOutcome::Rejected(e) => {
                let from = from.unwrap_or(at);
                write_move_result(from, at, Err(e), out)?
            }
        }
        out.flush()
    }

    /// Handles `go`: plays a random accepted move for the side to move.
    pub fn handle_go<W: Write>(&mut self, out: &mut W) -> io::Result<()> {
        self.clicks.clear();
        match random_move(&self.game, &mut self.rng) {
            Some((from, to)) => {
                let result = self.game.try_move(from, to);
                write_move_result(from, to, result, out)?;
            }
            None => writeln!(out, "nomove")?,
        }
        out.flush()
    }

    /// Handles `board`: writes the rendered board and the status line.
    pub fn handle_board<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "{}", render_board(&self.game.board()))?;
        writeln!(out, "{}", status_line(&self.game.game_state()))?;
        out.flush()
    }

    /// Handles `state`: writes the game snapshot as a single JSON line.
    pub fn handle_state<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let json = serde_json::to_string(&self.game.game_state())?;
        writeln!(out, "state {}", json)?;
        out.flush()
    }

    /// Handles `fen`: writes the current position in board notation.
    pub fn handle_fen<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "fen {}", encode_notation(&self.game))?;
        out.flush()
    }
}

/// Writes `moved`/`rejected` and, when a king fell, `gameover <winner>`.
fn write_move_result<W: Write>(
    from: Position,
    to: Position,
    result: Result<MoveOutcome, MoveError>,
    out: &mut W,
) -> io::Result<()> {
    match result {
        Ok(outcome) => {
            match outcome.captured {
                Some(piece) => writeln!(out, "moved {}{} x{}", from, to, piece.letter())?,
                None => writeln!(out, "moved {}{}", from, to)?,
            }
            if outcome.ended_game {
                writeln!(out, "gameover {}", outcome.piece.color.name())?;
            }
        }
        Err(e) => writeln!(out, "rejected {}{} {}", from, to, e.code())?,
    }
    Ok(())
}
