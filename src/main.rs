//! Headless autoplay driver.
//!
//! Builds a game from a TOML config or the defaults, plays random flips for
//! every seat until someone wins or the flip limit is reached, and can resume
//! from or write a save.

#![allow(clippy::print_stdout, clippy::print_stderr)]

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use simplelog::{ColorChoice, ConfigBuilder, LevelFilter, TermLogger, TerminalMode};

use fiery_dragons::{ConfigError, GameConfig, SaveFormat, SaveStore, TurnEngine};

/// Play a Fiery Dragons game between automated seats.
#[derive(Parser, Debug)]
#[command(name = "fiery-dragons")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Game config file (TOML). Defaults to the standard four-player game.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of players (2-4), overriding the config
    #[arg(short, long)]
    players: Option<usize>,

    /// Random seed, overriding the config
    #[arg(short, long)]
    seed: Option<u64>,

    /// Stop after this many flips
    #[arg(long, default_value = "10000")]
    max_flips: usize,

    /// Directory to save the game to when play stops without a winner
    #[arg(long)]
    save: Option<PathBuf>,

    /// Directory to resume a saved game from
    #[arg(long)]
    load: Option<PathBuf>,

    /// Use the binary save format instead of JSON
    #[arg(long)]
    binary: bool,

    /// Log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn setup_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    let config = ConfigBuilder::new().set_target_level(LevelFilter::Error).build();
    if TermLogger::init(level, config, TerminalMode::Stderr, ColorChoice::Auto).is_err() {
        eprintln!("Logging already initialised");
    }
}

fn load_config(args: &Args) -> Result<GameConfig, ConfigError> {
    let mut config = match &args.config {
        Some(path) => GameConfig::from_path(path)?,
        None => GameConfig::default(),
    };
    if let Some(players) = args.players {
        config = config.with_players(players);
    }
    if let Some(seed) = args.seed {
        config = config.with_seed(seed);
    }
    config.validate()?;
    Ok(config)
}

fn main() -> ExitCode {
    let args = Args::parse();
    setup_logging(args.verbose);

    let config = match load_config(&args) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Error: {err}");
            return ExitCode::FAILURE;
        }
    };
    let format = if args.binary { SaveFormat::Binary } else { SaveFormat::Json };

    let engine = match &args.load {
        Some(dir) => TurnEngine::load_or_new(config, &SaveStore::new(dir), format),
        None => TurnEngine::new(config),
    };
    let mut engine = match engine {
        Ok(engine) => engine,
        Err(err) => {
            eprintln!("Error: {err}");
            return ExitCode::FAILURE;
        }
    };

    let winner = engine.autoplay(args.max_flips);
    let (best, holder) = engine.best_streak();
    match winner {
        Some(colour) => println!("{colour} wins"),
        None => println!("No winner after {} flips", args.max_flips),
    }
    println!("Best memory score: {best} ({holder})");

    for player in engine.state().players.values() {
        println!(
            "  Player {} {}: {} moves{}",
            player.number(),
            player.colour,
            player.token.total_moves(),
            if player.token.has_won() { ", home" } else { "" }
        );
    }

    if let (Some(dir), None) = (&args.save, winner) {
        match engine.save(&SaveStore::new(dir), format) {
            Ok(path) => println!("Saved to {}", path.display()),
            Err(err) => {
                eprintln!("Error: {err}");
                return ExitCode::FAILURE;
            }
        }
    }

    ExitCode::SUCCESS
}
