//! Simulate command - play many seeded games and report statistics
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: play_batch(), report_results()
//! - Level 3: play_single_game(), compute_statistics()
//! - Level 4: formatting utilities

use anyhow::Result;
use clap::Args;
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;

use sector_core::{Game, GameResult};

use crate::autopilot;
use crate::setup::{create_rng, GameInputs, SourceArgs};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct SimulateArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Number of games to play
    #[arg(long, default_value = "100")]
    pub games: usize,

    /// Autopilot action limit per game
    #[arg(long, default_value = "5000")]
    pub max_actions: usize,

    /// Play games sequentially instead of in parallel
    #[arg(long)]
    pub sequential: bool,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// Result of a single game
#[derive(Clone, Debug)]
struct GameRecord {
    seed: u64,
    result: GameResult,
    moves: usize,
    recharges: usize,
    parts: u32,
    cleared_percent: f32,
}

/// Aggregated batch results
#[derive(Clone, Debug)]
struct BatchResults {
    games: Vec<GameRecord>,
    cleared: usize,
    destroyed: usize,
    unfinished: usize,
    avg_moves: f32,
    avg_parts: f32,
    avg_cleared_percent: f32,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run simulate command
///
/// This function reads like a table of contents:
/// 1. Load the shared inputs
/// 2. Play every game
/// 3. Report results
pub fn run(args: SimulateArgs, seed: Option<u64>) -> Result<()> {
    let inputs = args.source.load()?;
    let base_seed = create_rng(seed).gen::<u64>();

    tracing::info!(
        "Simulating {} games over {} cells (base seed {})",
        args.games,
        inputs.layout.cells.len(),
        base_seed
    );

    let results = play_batch(&inputs, &args, base_seed)?;

    report_results(&results, &args);

    Ok(())
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

/// Play all games; game `i` is seeded with `base_seed + i`
fn play_batch(inputs: &GameInputs, args: &SimulateArgs, base_seed: u64) -> Result<BatchResults> {
    let seeds: Vec<u64> = (0..args.games as u64).map(|i| base_seed.wrapping_add(i)).collect();

    let games: Vec<GameRecord> = if args.sequential {
        seeds
            .iter()
            .map(|&s| play_single_game(inputs, s, args.max_actions))
            .collect::<Result<_>>()?
    } else {
        seeds
            .par_iter()
            .map(|&s| play_single_game(inputs, s, args.max_actions))
            .collect::<Result<_>>()?
    };

    for record in &games {
        tracing::debug!(
            "Game seed {}: {:?} ({} moves, {:.1}% cleared)",
            record.seed,
            record.result,
            record.moves,
            record.cleared_percent
        );
    }

    Ok(compute_statistics(games))
}

/// Report batch results
fn report_results(results: &BatchResults, args: &SimulateArgs) {
    if args.json {
        print_json_results(results);
    } else {
        print_text_results(results);
    }
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

/// Generate one board and let the autopilot fly it
fn play_single_game(inputs: &GameInputs, seed: u64, max_actions: usize) -> Result<GameRecord> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut game = Game::new(&inputs.layout, inputs.catalog.clone(), &inputs.config, &mut rng)?;
    let summary = autopilot::run_to_end(&mut game, max_actions);

    Ok(GameRecord {
        seed,
        result: summary.result,
        moves: summary.moves,
        recharges: summary.recharges,
        parts: summary.parts,
        cleared_percent: summary.cleared_percent,
    })
}

/// Compute aggregate statistics from game records
fn compute_statistics(games: Vec<GameRecord>) -> BatchResults {
    let count = |result: GameResult| games.iter().filter(|g| g.result == result).count();
    let cleared = count(GameResult::Cleared);
    let destroyed = count(GameResult::Destroyed);
    let unfinished = count(GameResult::Ongoing);

    let n = games.len().max(1) as f32;
    let avg_moves = games.iter().map(|g| g.moves).sum::<usize>() as f32 / n;
    let avg_parts = games.iter().map(|g| g.parts).sum::<u32>() as f32 / n;
    let avg_cleared_percent = games.iter().map(|g| g.cleared_percent).sum::<f32>() / n;

    BatchResults {
        games,
        cleared,
        destroyed,
        unfinished,
        avg_moves,
        avg_parts,
        avg_cleared_percent,
    }
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

fn rate(part: usize, total: usize) -> f32 {
    if total > 0 {
        part as f32 / total as f32
    } else {
        0.0
    }
}

/// Print results as JSON
fn print_json_results(results: &BatchResults) {
    #[derive(serde::Serialize)]
    struct JsonGame {
        seed: u64,
        result: String,
        moves: usize,
        recharges: usize,
        parts: u32,
        cleared_percent: f32,
    }

    #[derive(serde::Serialize)]
    struct JsonOutput {
        total_games: usize,
        cleared: usize,
        destroyed: usize,
        unfinished: usize,
        clear_rate: f32,
        avg_moves: f32,
        avg_parts: f32,
        avg_cleared_percent: f32,
        games: Vec<JsonGame>,
    }

    let total = results.games.len();
    let output = JsonOutput {
        total_games: total,
        cleared: results.cleared,
        destroyed: results.destroyed,
        unfinished: results.unfinished,
        clear_rate: rate(results.cleared, total),
        avg_moves: results.avg_moves,
        avg_parts: results.avg_parts,
        avg_cleared_percent: results.avg_cleared_percent,
        games: results
            .games
            .iter()
            .map(|g| JsonGame {
                seed: g.seed,
                result: format!("{:?}", g.result),
                moves: g.moves,
                recharges: g.recharges,
                parts: g.parts,
                cleared_percent: g.cleared_percent,
            })
            .collect(),
    };

    if let Ok(json) = serde_json::to_string_pretty(&output) {
        println!("{}", json);
    }
}

/// Print results as text
fn print_text_results(results: &BatchResults) {
    let total = results.games.len();

    println!("\n=== Simulation Results ===");
    println!("Total games: {}", total);
    println!(
        "Cleared:     {} ({:.1}%)",
        results.cleared,
        rate(results.cleared, total) * 100.0
    );
    println!(
        "Destroyed:   {} ({:.1}%)",
        results.destroyed,
        rate(results.destroyed, total) * 100.0
    );
    println!("Unfinished:  {}", results.unfinished);
    println!("Avg moves:   {:.1}", results.avg_moves);
    println!("Avg parts:   {:.1}", results.avg_parts);
    println!("Avg cleared: {:.1}%", results.avg_cleared_percent);
}
