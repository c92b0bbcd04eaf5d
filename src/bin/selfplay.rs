//! Random self-play CLI.
//!
//! Plays games between two random movers and outputs game records as JSONL.
//!
//! Usage:
//!   cargo run --release --bin selfplay -- [OPTIONS]
//!
//! Options:
//!   --games N       Number of games to play (default: 10)
//!   --max-plies N   Abandon a game after this many plies (default: 500)
//!   --threads N     Number of parallel threads (default: 4)
//!   --seed N        Random seed, 0 for entropy (default: 0)
//!   --output FILE   Output file path (default: stdout)
//!   --quiet         Suppress progress and summary output

use std::env;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::process;
use std::str::FromStr;
use std::time::Instant;

use log::{error, info};

use simplechess::selfplay::{self, SelfPlayConfig};

/// Parses the value following a flag.
fn flag_value<T: FromStr>(args: &[String], i: usize, flag: &str) -> Result<T, String> {
    let raw = args
        .get(i)
        .ok_or_else(|| format!("missing value for {}", flag))?;
    raw.parse()
        .map_err(|_| format!("invalid {} value: '{}'", flag, raw))
}

fn parse_args(args: &[String]) -> Result<Option<(SelfPlayConfig, Option<String>)>, String> {
    let mut config = SelfPlayConfig::default();
    let mut output_path = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--games" => {
                i += 1;
                config.num_games = flag_value(args, i, "--games")?;
            }
            "--max-plies" => {
                i += 1;
                config.max_plies = flag_value(args, i, "--max-plies")?;
            }
            "--threads" => {
                i += 1;
                config.threads = flag_value(args, i, "--threads")?;
            }
            "--seed" => {
                i += 1;
                config.seed = flag_value(args, i, "--seed")?;
            }
            "--output" => {
                i += 1;
                output_path = Some(flag_value(args, i, "--output")?);
            }
            "--quiet" => config.quiet = true,
            "--help" | "-h" => return Ok(None),
            other => return Err(format!("unknown argument: {}", other)),
        }
        i += 1;
    }

    Ok(Some((config, output_path)))
}

fn main() {
    let args: Vec<String> = env::args().collect();
    let (config, output_path) = match parse_args(&args) {
        Ok(Some(parsed)) => parsed,
        Ok(None) => {
            print_usage();
            return;
        }
        Err(msg) => {
            eprintln!("{}", msg);
            print_usage();
            process::exit(1);
        }
    };

    let default_level = if config.quiet { "warn" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    info!(
        "Self-play: {} games, max {} plies, {} threads",
        config.num_games, config.max_plies, config.threads
    );

    let start = Instant::now();
    let games = selfplay::run_self_play(&config);
    let elapsed = start.elapsed();
    info!(
        "Completed {} games in {:.2}s",
        games.len(),
        elapsed.as_secs_f64()
    );

    if !config.quiet {
        if let Err(e) = selfplay::write_summary(&games, &mut io::stderr()) {
            error!("failed to write summary: {}", e);
        }
    }

    let result = match &output_path {
        Some(path) => File::create(path).and_then(|file| {
            let mut writer = BufWriter::new(file);
            selfplay::write_jsonl(&games, &mut writer)?;
            info!("Wrote {} games to {}", games.len(), path);
            Ok(())
        }),
        None => {
            let stdout = io::stdout();
            let mut writer = BufWriter::new(stdout.lock());
            selfplay::write_jsonl(&games, &mut writer).and_then(|_| writer.flush())
        }
    };

    if let Err(e) = result {
        error!("failed to write output: {}", e);
        process::exit(1);
    }
}

fn print_usage() {
    eprintln!("Usage: selfplay [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --games N        Number of games to play (default: 10)");
    eprintln!("  --max-plies N    Abandon a game after this many plies (default: 500)");
    eprintln!("  --threads N      Number of parallel threads (default: 4)");
    eprintln!("  --seed N         Random seed, 0 for entropy (default: 0)");
    eprintln!("  --output FILE    Output file path (default: stdout)");
    eprintln!("  --quiet          Suppress progress and summary output");
    eprintln!("  --help           Show this help");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        std::iter::once("selfplay")
            .chain(list.iter().copied())
            .map(String::from)
            .collect()
    }

    #[test]
    fn defaults_without_flags() {
        let (config, output) = parse_args(&args(&[])).unwrap().unwrap();
        assert_eq!(config.num_games, 10);
        assert_eq!(config.max_plies, 500);
        assert!(output.is_none());
    }

    #[test]
    fn flags_override_defaults() {
        let (config, output) = parse_args(&args(&[
            "--games", "3", "--max-plies", "40", "--threads", "1", "--seed", "9", "--output",
            "out.jsonl", "--quiet",
        ]))
        .unwrap()
        .unwrap();
        assert_eq!(config.num_games, 3);
        assert_eq!(config.max_plies, 40);
        assert_eq!(config.threads, 1);
        assert_eq!(config.seed, 9);
        assert!(config.quiet);
        assert_eq!(output.as_deref(), Some("out.jsonl"));
    }

    #[test]
    fn bad_flags_are_errors() {
        assert!(parse_args(&args(&["--games"])).is_err());
        assert!(parse_args(&args(&["--games", "many"])).is_err());
        assert!(parse_args(&args(&["--bogus"])).is_err());
        assert!(parse_args(&args(&["--help"])).unwrap().is_none());
    }
}
