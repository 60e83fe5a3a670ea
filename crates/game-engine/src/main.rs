use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use env_logger::Env;
use game_engine::{app, config::Config};
use log::info;
use rand::{SeedableRng, rngs::StdRng};
use twenty48_utils::{engine, game::Game};

#[derive(Parser, Debug)]
#[command(author, version, about = "Play 2048 in the terminal, one command per line")]
struct Args {
    /// Path to configuration file
    #[arg(long, value_name = "FILE", value_parser = clap::value_parser!(PathBuf))]
    config: Option<PathBuf>,

    /// RNG seed; overrides the config file
    #[arg(long, value_name = "N")]
    seed: Option<u64>,

    /// Log filter, e.g. "info", "debug"
    #[arg(long, default_value = "info")]
    log: String,
}

fn main() -> Result<()> {
    let args = Args::parse();
    env_logger::Builder::from_env(Env::default().default_filter_or(args.log.as_str())).init();

    let config = match &args.config {
        Some(path) => {
            info!("Using configuration file: {}", path.display());
            Config::from_toml(path)
                .with_context(|| format!("failed to load config {}", path.display()))?
        }
        None => Config::default(),
    };

    let seed = args.seed.or(config.seed).unwrap_or_else(rand::random);
    info!("seed {seed}, target tile {}", config.rules.target_tile);

    engine::new();
    let mut game = Game::new(config.rules, StdRng::seed_from_u64(seed))?;
    let stdin = io::stdin();
    let summary = app::run(&mut game, stdin.lock(), io::stdout().lock(), &config.display)?;
    info!(
        "Finished: {} moves, score {}, highest tile {}{}",
        summary.moves,
        summary.score,
        summary.highest_tile,
        if summary.won { " (won)" } else { "" }
    );
    Ok(())
}
