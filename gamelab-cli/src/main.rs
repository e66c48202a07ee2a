//! Gamelab CLI - Command-line interface
//!
//! Commands:
//! - play: Play repeated games between two stock strategies
//! - evolve: Breed graph-coloring strategies by tournament elimination

mod evolve;
mod match_cmd;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "gamelab")]
#[command(about = "Two-player game sandbox and strategy evolver")]
struct Cli {
    /// Random seed for reproducible runs
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Log per-game detail
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a match
    Play {
        #[command(subcommand)]
        game: match_cmd::PlayCommand,
    },
    /// Run the genetic algorithm on graph coloring
    Evolve(evolve::EvolveArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging; RUST_LOG overrides --verbose
    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Play { game } => match_cmd::run(game, cli.seed),
        Commands::Evolve(args) => evolve::run(args, cli.seed),
    }
}
