//! Play command - fly one game with the autopilot through the animated session
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: start_game(), play_session(), report_result()
//! - Level 3: apply_action(), describe_event()
//! - Level 4: formatting utilities

use std::time::Duration;

use anyhow::Result;
use clap::Args;

use sector_core::{Game, GameEvent, GameResult};

use crate::autopilot::{self, Action, RunSummary};
use crate::session::{self, AnimationRequest};
use crate::setup::{create_rng, SourceArgs};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct PlayArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Simulated approach animation per move, in milliseconds
    #[arg(long, default_value = "0")]
    pub animation_ms: u64,

    /// Stop after this many autopilot actions
    #[arg(long, default_value = "2000")]
    pub max_actions: usize,

    /// Print every game event
    #[arg(long)]
    pub verbose_events: bool,

    /// Output final status as JSON
    #[arg(long)]
    pub json: bool,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run play command
///
/// This function reads like a table of contents:
/// 1. Generate the board
/// 2. Play it out through the animated session
/// 3. Report the result
pub fn run(args: PlayArgs, seed: Option<u64>) -> Result<()> {
    let mut game = start_game(&args, seed)?;

    tracing::info!(
        "Starting game: {} cells, {} occupied, spawn at {}",
        game.board().len(),
        game.state().total_occupied(),
        game.spawn()
    );

    let runtime = tokio::runtime::Runtime::new()?;
    let summary = runtime.block_on(play_session(&mut game, &args))?;

    report_result(&game, &summary, &args);

    Ok(())
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

/// Load inputs and generate the board
fn start_game(args: &PlayArgs, seed: Option<u64>) -> Result<Game> {
    let inputs = args.source.load()?;
    let mut rng = create_rng(seed);
    let game = Game::new(&inputs.layout, inputs.catalog, &inputs.config, &mut rng)?;
    Ok(game)
}

/// Drive the autopilot until the game ends or it runs out of actions
async fn play_session(game: &mut Game, args: &PlayArgs) -> Result<RunSummary> {
    let (presenter, handle) = session::spawn_presenter(Duration::from_millis(args.animation_ms));

    let mut moves = 0;
    let mut recharges = 0;
    let mut surges = 0;

    for _ in 0..args.max_actions {
        let action = autopilot::next_action(game);
        let progressed = apply_action(game, action, &presenter).await?;

        match action {
            Action::Move(_) => moves += 1,
            Action::Recharge => recharges += 1,
            Action::Surge => surges += 1,
            Action::Stop => {}
        }

        for event in game.drain_events() {
            if args.verbose_events {
                println!("  {}", describe_event(&event));
            } else if let GameEvent::Alert { message } = &event {
                println!("  ALERT: {}", message);
            }
        }

        if !progressed {
            break;
        }
    }

    drop(presenter);
    let animations = handle.await?;
    tracing::debug!("presenter played {} animations", animations);

    Ok(autopilot::summarize(game, moves, recharges, surges))
}

/// Print the final status
fn report_result(game: &Game, summary: &RunSummary, args: &PlayArgs) {
    if args.json {
        if let Ok(json) = serde_json::to_string_pretty(&game.status_view()) {
            println!("{}", json);
        }
        return;
    }

    println!("\n=== {} ===", headline(summary.result));
    println!("Moves:     {}", summary.moves);
    println!("Recharges: {}", summary.recharges);
    println!("Surges:    {}", summary.surges);
    println!("Parts:     {}", summary.parts);
    println!("Cleared:   {:.1}%", summary.cleared_percent);
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

/// Perform one autopilot action. Returns false when nothing changed.
async fn apply_action(
    game: &mut Game,
    action: Action,
    presenter: &tokio::sync::mpsc::Sender<AnimationRequest>,
) -> Result<bool> {
    let progressed = match action {
        Action::Recharge => game.recharge(),
        Action::Surge => game.use_shield_surge(),
        Action::Move(cell) => {
            game.request_move(cell) && session::drive_pending(game, presenter).await? > 0
        }
        Action::Stop => false,
    };
    Ok(progressed)
}

/// One-line description of an event
fn describe_event(event: &GameEvent) -> String {
    match event {
        GameEvent::MoveStarted { seq, from, to } => match from {
            Some(from) => format!("move #{}: {} -> {}", seq, from, to),
            None => format!("move #{}: -> {}", seq, to),
        },
        GameEvent::CellRevealed { cell } => format!("revealed {}", cell),
        GameEvent::SafeHex { cell } => format!("cell {} is empty", cell),
        GameEvent::EnemyDefeated {
            cell,
            entity_id,
            shields_lost,
            parts_gained,
        } => format!(
            "defeated {} at {} (-{} shields, +{} parts)",
            entity_id, cell, shields_lost, parts_gained
        ),
        GameEvent::ShieldSurgeCollected { amount } => {
            format!("collected {} shield surge(s)", amount)
        }
        GameEvent::Alert { message } => format!("ALERT: {}", message),
        GameEvent::ChainedEffect { trigger, outcome } => {
            format!("{} triggered {:?}", trigger, outcome)
        }
        GameEvent::PlayerDestroyed {
            cell,
            entity_id,
            attack,
        } => format!("destroyed by {} (attack {}) at {}", entity_id, attack, cell),
        GameEvent::SectorCleared => "sector cleared".to_string(),
        GameEvent::Recharged {
            level,
            recharge_count,
        } => format!("recharge #{}: shields at {}", recharge_count, level),
        GameEvent::ShieldSurgeUsed { remaining } => {
            format!("shield surge used ({} left)", remaining)
        }
        GameEvent::QueueDrained { dropped } => format!("dropped {} queued move(s)", dropped),
    }
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

fn headline(result: GameResult) -> &'static str {
    match result {
        GameResult::Cleared => "SECTOR CLEARED",
        GameResult::Destroyed => "SHIP DESTROYED",
        GameResult::Ongoing => "GAME UNFINISHED",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_event() {
        let event = GameEvent::EnemyDefeated {
            cell: 4,
            entity_id: "E03".to_string(),
            shields_lost: 3,
            parts_gained: 3,
        };
        assert_eq!(describe_event(&event), "defeated E03 at 4 (-3 shields, +3 parts)");
        assert_eq!(describe_event(&GameEvent::SectorCleared), "sector cleared");
    }

    #[test]
    fn test_headline() {
        assert_eq!(headline(GameResult::Destroyed), "SHIP DESTROYED");
    }
}
