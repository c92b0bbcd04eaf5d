//! Random self-play.
//!
//! Plays complete games where both sides pick uniformly among the moves the
//! simplified rules accept, until a king is captured or a ply cap is hit.
//! Used to soak-test the state machine and to produce sample game records.

use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc;
use std::time::Instant;

use log::{info, warn};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use serde::Serialize;

use crate::board::Color;
use crate::game::ChessGame;
use crate::movegen::random_move;
use crate::protocol::notation::encode_notation;

/// Configuration for self-play runs.
#[derive(Debug, Clone)]
pub struct SelfPlayConfig {
    /// Number of games to play.
    pub num_games: usize,
    /// Plies after which an undecided game is abandoned.
    pub max_plies: usize,
    /// Number of parallel threads for concurrent games.
    pub threads: usize,
    /// Random seed (0 = use entropy).
    pub seed: u64,
    /// Suppress per-game progress logging.
    pub quiet: bool,
}

impl Default for SelfPlayConfig {
    fn default() -> Self {
        SelfPlayConfig {
            num_games: 10,
            max_plies: 500,
            threads: 4,
            seed: 0,
            quiet: false,
        }
    }
}

/// A complete self-play game record.
#[derive(Debug, Clone, Serialize)]
pub struct GameRecord {
    /// Sequential game ID.
    pub game_id: usize,
    /// Moves in order, as `<from><to>` square pairs.
    pub moves: Vec<String>,
    /// The side that captured a king, if any.
    pub winner: Option<Color>,
    /// Board notation of the final position.
    pub final_position: String,
}

impl GameRecord {
    pub fn plies(&self) -> usize {
        self.moves.len()
    }
}

fn rng_for(seed: u64, game_id: usize) -> SmallRng {
    if seed != 0 {
        SmallRng::seed_from_u64(seed.wrapping_add(game_id as u64))
    } else {
        SmallRng::from_entropy()
    }
}

/// Plays one game from the standard starting position.
pub fn play_game(config: &SelfPlayConfig, game_id: usize, rng: &mut SmallRng) -> GameRecord {
    let mut game = ChessGame::new();
    let mut moves = Vec::new();

    while !game.is_game_over() && moves.len() < config.max_plies {
        let Some((from, to)) = random_move(&game, rng) else {
            break;
        };
        match game.try_move(from, to) {
            Ok(_) => moves.push(format!("{}{}", from, to)),
            Err(e) => {
                warn!("game {}: generated move {}{} rejected: {}", game_id, from, to, e);
                break;
            }
        }
    }

    GameRecord {
        game_id,
        moves,
        winner: game.winner(),
        final_position: encode_notation(&game),
    }
}

/// Runs self-play, producing one record per game ordered by game ID.
///
/// When `config.threads > 1`, games are played concurrently using rayon.
pub fn run_self_play(config: &SelfPlayConfig) -> Vec<GameRecord> {
    let mut games = Vec::with_capacity(config.num_games);
    run_self_play_with_callback(config, |game| games.push(game));
    games.sort_by_key(|g| g.game_id);
    games
}

/// Runs self-play, calling `on_game` with each completed game record.
pub fn run_self_play_with_callback<F>(config: &SelfPlayConfig, on_game: F)
where
    F: FnMut(GameRecord) + Send,
{
    if config.threads > 1 {
        run_self_play_parallel(config, on_game);
    } else {
        run_self_play_sequential(config, on_game);
    }
}

fn log_game(config: &SelfPlayConfig, n: usize, game: &GameRecord, started: Instant) {
    if config.quiet {
        return;
    }
    let outcome = match game.winner {
        Some(w) => format!("{} wins", w.name()),
        None => "undecided".to_string(),
    };
    info!(
        "Game {}/{}: {} after {} plies ({:.1}ms)",
        n,
        config.num_games,
        outcome,
        game.plies(),
        started.elapsed().as_secs_f64() * 1000.0,
    );
}

/// Sequential self-play: plays games one at a time.
fn run_self_play_sequential<F>(config: &SelfPlayConfig, mut on_game: F)
where
    F: FnMut(GameRecord),
{
    for i in 0..config.num_games {
        let mut rng = rng_for(config.seed, i);
        let started = Instant::now();
        let game = play_game(config, i, &mut rng);
        log_game(config, i + 1, &game, started);
        on_game(game);
    }
}

/// Parallel self-play: plays games concurrently using rayon.
/// Completed games are delivered to the callback on the calling thread.
fn run_self_play_parallel<F>(config: &SelfPlayConfig, mut on_game: F)
where
    F: FnMut(GameRecord) + Send,
{
    use rayon::prelude::*;

    let pool = match rayon::ThreadPoolBuilder::new()
        .num_threads(config.threads)
        .build()
    {
        Ok(pool) => pool,
        Err(e) => {
            warn!("failed to build thread pool ({}), playing sequentially", e);
            run_self_play_sequential(config, on_game);
            return;
        }
    };

    let completed = AtomicUsize::new(0);
    let (tx, rx) = mpsc::channel::<GameRecord>();

    std::thread::scope(|scope| {
        let completed = &completed;
        let pool = &pool;
        scope.spawn(move || {
            pool.install(|| {
                (0..config.num_games)
                    .into_par_iter()
                    .for_each_with(tx, |tx, i| {
                        let mut rng = rng_for(config.seed, i);
                        let started = Instant::now();
                        let game = play_game(config, i, &mut rng);
                        let n = completed.fetch_add(1, Ordering::Relaxed) + 1;
                        log_game(config, n, &game, started);
                        let _ = tx.send(game);
                    });
            });
        });

        for game in rx {
            on_game(game);
        }
    });
}

/// Writes game records as JSONL (one JSON object per game, one per line).
pub fn write_jsonl<W: Write>(games: &[GameRecord], out: &mut W) -> std::io::Result<()> {
    for game in games {
        serde_json::to_writer(&mut *out, game)?;
        writeln!(out)?;
    }
    out.flush()
}

/// Aggregate results over a set of games.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Summary {
    pub games: usize,
    pub white_wins: usize,
    pub black_wins: usize,
    pub undecided: usize,
    pub avg_plies: f64,
}

/// Tallies winners and game length.
pub fn summarize(games: &[GameRecord]) -> Summary {
    let mut summary = Summary {
        games: games.len(),
        ..Summary::default()
    };
    let mut total_plies = 0usize;
    for game in games {
        total_plies += game.plies();
        match game.winner {
            Some(Color::White) => summary.white_wins += 1,
            Some(Color::Black) => summary.black_wins += 1,
            None => summary.undecided += 1,
        }
    }
    summary.avg_plies = total_plies as f64 / games.len().max(1) as f64;
    summary
}

/// Writes a human-readable summary of self-play results.
pub fn write_summary<W: Write>(games: &[GameRecord], out: &mut W) -> std::io::Result<()> {
    let s = summarize(games);
    let pct = |n: usize| 100.0 * n as f64 / s.games.max(1) as f64;
    writeln!(out, "=== Self-Play Summary ===")?;
    writeln!(out, "Games: {}", s.games)?;
    writeln!(out, "Avg plies/game: {:.1}", s.avg_plies)?;
    writeln!(out, "White wins: {} ({:.1}%)", s.white_wins, pct(s.white_wins))?;
    writeln!(out, "Black wins: {} ({:.1}%)", s.black_wins, pct(s.black_wins))?;
    writeln!(out, "Undecided (ply cap): {}", s.undecided)?;
    out.flush()
}
