//! Command parser.
//!
//! Parses incoming protocol lines from raw text into structured `Command`
//! variants that the main loop can dispatch on.

use log::warn;

use crate::board::Position;
use crate::protocol::notation::START_NOTATION;

/// A parsed front-end-to-engine command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Protocol handshake.
    Hello,

    /// Synchronization ping; engine must reply `readyok`.
    IsReady,

    /// Set an engine option: `setoption name <id> [value <x>]`.
    SetOption { name: String, value: Option<String> },

    /// Start a new game from the standard position.
    NewGame,

    /// Set up a position from board notation. `startpos` is expanded here.
    Position { notation: String },

    /// Attempt a move.
    Move { from: Position, to: Position },

    /// A click on a cell, driving the select-then-move gesture.
    Click { at: Position },

    /// Play a random accepted move for the side to move.
    Go,

    /// Print the board and status line.
    Board,

    /// Print the game state as JSON.
    State,

    /// Print the current position in board notation.
    Fen,

    /// Terminate the engine process.
    Quit,
}

/// Parses a single line of input into a `Command`.
///
/// Returns `None` for empty lines or unrecognized commands. Malformed
/// arguments for known commands also return `None` after logging a warning.
pub fn parse_command(line: &str) -> Option<Command> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return None;
    }

    let tokens: Vec<&str> = trimmed.split_whitespace().collect();

    match tokens[0] {
        "hello" => Some(Command::Hello),
        "isready" => Some(Command::IsReady),
        "quit" => Some(Command::Quit),
        "newgame" => Some(Command::NewGame),
        "go" => Some(Command::Go),
        "board" => Some(Command::Board),
        "state" => Some(Command::State),
        "fen" => Some(Command::Fen),

        "setoption" => parse_setoption(&tokens),
        "position" => parse_position(&tokens),
        "move" => parse_move(&tokens),
        "click" => parse_click(&tokens),

        other => {
            warn!("unknown command: {}", other);
            None
        }
    }
}

/// Parses a square given either as an algebraic name (`e2`) or as a
/// `row,col` pair (`6,4`). The pair form may point off the board.
pub fn parse_square(s: &str) -> Option<Position> {
    if let Some((row, col)) = s.split_once(',') {
        let row = row.trim().parse::<i32>().ok()?;
        let col = col.trim().parse::<i32>().ok()?;
        return Some(Position::new(row, col));
    }
    Position::from_algebraic(s)
}

/// Parses `setoption name <id> [value <x>]`.
fn parse_setoption(tokens: &[&str]) -> Option<Command> {
    if tokens.len() < 3 || tokens[1] != "name" {
        warn!("malformed setoption: expected 'setoption name <id> [value <x>]'");
        return None;
    }

    let value_idx = tokens.iter().position(|&t| t == "value");

    let (name, value) = match value_idx {
        Some(vi) => {
            let name_parts = &tokens[2..vi];
            let value_parts = &tokens[vi + 1..];
            if name_parts.is_empty() {
                warn!("malformed setoption: empty name");
                return None;
            }
            let value = if value_parts.is_empty() {
                None
            } else {
                Some(value_parts.join(" "))
            };
            (name_parts.join(" "), value)
        }
        None => (tokens[2..].join(" "), None),
    };

    Some(Command::SetOption { name, value })
}

/// Parses `position startpos` or `position <placement> <side>`.
fn parse_position(tokens: &[&str]) -> Option<Command> {
    match tokens.len() {
        2 if tokens[1] == "startpos" => Some(Command::Position {
            notation: START_NOTATION.to_string(),
        }),
        n if n >= 2 => Some(Command::Position {
            notation: tokens[1..].join(" "),
        }),
        _ => {
            warn!("malformed position: expected 'position startpos|<placement> <side>'");
            None
        }
    }
}

/// Parses `move <from> <to>` or `move <from><to>` (e.g. `move e2e4`).
fn parse_move(tokens: &[&str]) -> Option<Command> {
    let squares: Option<(Position, Position)> = match tokens.len() {
        2 if tokens[1].len() == 4 && tokens[1].is_ascii() => {
            let (a, b) = tokens[1].split_at(2);
            parse_square(a).zip(parse_square(b))
        }
        3 => parse_square(tokens[1]).zip(parse_square(tokens[2])),
        _ => None,
    };

    match squares {
        Some((from, to)) => Some(Command::Move { from, to }),
        None => {
            warn!("malformed move: '{}'", tokens[1..].join(" "));
            None
        }
    }
}

/// Parses `click <square>`.
fn parse_click(tokens: &[&str]) -> Option<Command> {
    match tokens.get(1).and_then(|s| parse_square(s)) {
        Some(at) if tokens.len() == 2 => Some(Command::Click { at }),
        _ => {
            warn!("malformed click: expected 'click <square>'");
            None
        }
    }
}
