//! Terminal-state detection

use serde::{Deserialize, Serialize};

use crate::state::GameState;

/// Game result
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    Ongoing,
    /// Every occupied cell cleared
    Cleared,
    /// Shields overwhelmed
    Destroyed,
}

impl GameResult {
    pub fn is_over(self) -> bool {
        self != GameResult::Ongoing
    }
}

/// Result implied by the current state
pub fn evaluate(state: &GameState) -> GameResult {
    if !state.is_alive() {
        GameResult::Destroyed
    } else if state.total_occupied() > 0 && state.cleared_count() == state.total_occupied() {
        GameResult::Cleared
    } else {
        GameResult::Ongoing
    }
}

/// Latch a win. Returns true only on the transition, so it fires once.
pub(crate) fn check_win(state: &mut GameState) -> bool {
    if state.result.is_over() || evaluate(state) != GameResult::Cleared {
        return false;
    }
    state.result = GameResult::Cleared;
    tracing::info!("sector cleared with {} parts salvaged", state.parts());
    true
}

/// Latch a loss
pub(crate) fn record_loss(state: &mut GameState) {
    state.result = GameResult::Destroyed;
    tracing::info!("ship destroyed with {} parts salvaged", state.parts());
}
