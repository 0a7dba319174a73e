//! Clear the Sector CLI - headless driver for the game engine
//!
//! Commands:
//! - play: generate one board and let the autopilot fly it
//! - simulate: play many seeded games and report statistics

mod autopilot;
mod play_cmd;
mod session;
mod setup;
mod simulate_cmd;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use play_cmd::PlayArgs;
use simulate_cmd::SimulateArgs;

#[derive(Parser)]
#[command(name = "sector")]
#[command(about = "Clear the Sector! headless game driver")]
struct Cli {
    /// Random seed for reproducibility
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a single game with the autopilot
    Play(PlayArgs),
    /// Play many games and report statistics
    Simulate(SimulateArgs),
}

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Play(args) => play_cmd::run(args, cli.seed),
        Commands::Simulate(args) => simulate_cmd::run(args, cli.seed),
    }
}
