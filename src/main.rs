//! simplechess -- a two-player chess board driven over a text protocol.
//!
//! This binary reads commands from stdin and writes responses to stdout.
//! Diagnostics go to stderr through `env_logger` (`RUST_LOG` controls the
//! level, default `warn`).

use std::io::{self, BufRead, Write};

use log::{debug, error, warn};

use simplechess::engine::Engine;
use simplechess::protocol::parser::{parse_command, Command};

/// Dispatches one command. Returns false when the loop should stop.
fn dispatch<W: Write>(engine: &mut Engine, cmd: Command, out: &mut W) -> io::Result<bool> {
    match cmd {
        Command::Hello => engine.handle_hello(out)?,
        Command::IsReady => engine.handle_isready(out)?,
        Command::SetOption { name, value } => engine.set_option(name, value),
        Command::NewGame => engine.new_game(),
        Command::Position { notation } => {
            if let Err(e) = engine.set_position(&notation) {
                warn!("failed to parse position '{}': {}", notation, e);
            }
        }
        Command::Move { from, to } => engine.handle_move(from, to, out)?,
        Command::Click { at } => engine.handle_click(at, out)?,
        Command::Go => engine.handle_go(out)?,
        Command::Board => engine.handle_board(out)?,
        Command::State => engine.handle_state(out)?,
        Command::Fen => engine.handle_fen(out)?,
        Command::Quit => return Ok(false),
    }
    Ok(true)
}

/// Runs the main protocol loop, reading commands from stdin
/// and writing responses to stdout.
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .target(env_logger::Target::Stderr)
        .init();

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());
    let mut engine = Engine::new();

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(e) => {
                debug!("stdin closed: {}", e);
                break;
            }
        };

        let cmd = match parse_command(&line) {
            Some(c) => c,
            None => continue,
        };

        match dispatch(&mut engine, cmd, &mut out) {
            Ok(true) => {}
            Ok(false) => break,
            Err(e) => {
                error!("failed to write response: {}", e);
                break;
            }
        }
    }
}
