//! Autopilot - a simple player that only reads what the views expose
//!
//! Level 3 - Steps

use sector_core::{CellIndex, CellView, Game, GameResult, StatusView};

/// Next thing the autopilot wants to do
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    Recharge,
    Surge,
    Move(CellIndex),
    Stop,
}

/// Candidate destination with the worst damage it could hold
#[derive(Clone, Copy, Debug)]
struct Target {
    cell: CellIndex,
    risk: u32,
}

/// Risk assumed for a covered cell nothing tells us about
const UNKNOWN_RISK: u32 = 50;

/// Pick the next action from the player's point of view
pub fn next_action(game: &Game) -> Action {
    let status = game.status_view();
    if status.result != GameResult::Ongoing {
        return Action::Stop;
    }

    if status
        .parts_needed_for_next_recharge
        .is_some_and(|cost| status.parts >= cost)
    {
        return Action::Recharge;
    }

    let views = game.cell_views();
    let target = match best_target(game, &views) {
        Some(target) => target,
        None => return Action::Stop,
    };

    if target.risk > status.shields && wants_surge(&status) {
        return Action::Surge;
    }

    Action::Move(target.cell)
}

fn wants_surge(status: &StatusView) -> bool {
    status.shield_surge_inventory > 0 && status.shields < status.max_shields
}

/// Lowest-risk cell worth entering: visible occupants first by damage,
/// covered cells by their tightest hint bound
fn best_target(game: &Game, views: &[CellView]) -> Option<Target> {
    let visible = views
        .iter()
        .filter(|v| !v.is_player)
        .filter_map(|v| v.entity.as_ref().map(|e| Target { cell: v.index, risk: e.damage }));

    let covered = views
        .iter()
        .filter(|v| !v.revealed)
        .map(|v| Target {
            cell: v.index,
            risk: risk_bound(game, views, v.index),
        });

    visible
        .chain(covered)
        .min_by_key(|t| (t.risk, t.cell))
}

/// Upper bound on a covered cell's damage from its revealed neighbors.
///
/// A revealed empty neighbor showing hint h, with k damage already visible
/// around it, caps every covered neighbor at h - k.
fn risk_bound(game: &Game, views: &[CellView], cell: CellIndex) -> u32 {
    let board = game.board();
    board
        .neighbors(cell)
        .iter()
        .filter_map(|&n| {
            let view = &views[n];
            if !view.revealed || view.entity.is_some() {
                return None;
            }
            let hint = view.hint.unwrap_or(0);
            let known: u32 = board
                .neighbors(n)
                .iter()
                .filter_map(|&m| views[m].entity.as_ref())
                .map(|e| e.damage)
                .sum();
            Some(hint.saturating_sub(known))
        })
        .min()
        .unwrap_or(UNKNOWN_RISK)
}

/// Statistics of one autopilot run
#[derive(Clone, Debug)]
pub struct RunSummary {
    pub result: GameResult,
    pub moves: usize,
    pub recharges: usize,
    pub surges: usize,
    pub parts: u32,
    pub cleared_percent: f32,
}

/// Fly a game to the end without animation waits
pub fn run_to_end(game: &mut Game, max_actions: usize) -> RunSummary {
    let mut moves = 0;
    let mut recharges = 0;
    let mut surges = 0;

    for _ in 0..max_actions {
        let progressed = match next_action(game) {
            Action::Recharge => {
                recharges += 1;
                game.recharge()
            }
            Action::Surge => {
                surges += 1;
                game.use_shield_surge()
            }
            Action::Move(cell) => {
                moves += 1;
                game.request_move(cell) && game.settle() > 0
            }
            Action::Stop => false,
        };
        if !progressed {
            break;
        }
    }

    summarize(game, moves, recharges, surges)
}

pub fn summarize(game: &Game, moves: usize, recharges: usize, surges: usize) -> RunSummary {
    let status = game.status_view();
    RunSummary {
        result: status.result,
        moves,
        recharges,
        surges,
        parts: status.parts,
        cleared_percent: status.cleared_percent,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use sector_core::{BoardLayout, Catalog, GameConfig};

    fn game(seed: u64) -> Game {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        Game::new(
            &BoardLayout::hexagon(6, 1.0),
            Catalog::builtin().unwrap(),
            &GameConfig::default(),
            &mut rng,
        )
        .unwrap()
    }

    #[test]
    fn test_first_action_is_a_move() {
        let g = game(11);
        assert!(matches!(next_action(&g), Action::Move(_)));
    }

    #[test]
    fn test_runs_to_terminal_state() {
        for seed in 0..5 {
            let mut g = game(seed);
            let summary = run_to_end(&mut g, 10_000);
            assert_ne!(summary.result, GameResult::Ongoing);
            assert!(summary.moves > 0);
        }
    }

    #[test]
    fn test_stops_when_over() {
        let mut g = game(2);
        run_to_end(&mut g, 10_000);
        assert_eq!(next_action(&g), Action::Stop);
    }
}
