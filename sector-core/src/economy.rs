//! Shield recharge ladder and shield surge consumables

use serde::{Deserialize, Serialize};

use crate::state::GameState;

/// Cost/result tables indexed by recharge count. Indices past the end reuse
/// the last entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RechargeLadder {
    costs: Vec<u32>,
    levels: Vec<u32>,
}

impl RechargeLadder {
    /// Tables of unequal length are cut to the shorter one
    pub fn new(mut costs: Vec<u32>, mut levels: Vec<u32>) -> Self {
        let len = costs.len().min(levels.len());
        costs.truncate(len);
        levels.truncate(len);
        Self { costs, levels }
    }

    fn step(&self, n: usize) -> Option<(u32, u32)> {
        let i = n.min(self.costs.len().checked_sub(1)?);
        Some((self.costs[i], self.levels[i]))
    }

    /// Parts required for the (n+1)-th recharge
    pub fn cost(&self, n: usize) -> Option<u32> {
        self.step(n).map(|(cost, _)| cost)
    }

    /// Shield level after the (n+1)-th recharge
    pub fn level(&self, n: usize) -> Option<u32> {
        self.step(n).map(|(_, level)| level)
    }
}

impl Default for RechargeLadder {
    fn default() -> Self {
        Self::new(
            vec![4, 6, 9, 13, 18, 24, 31, 40],
            vec![5, 6, 7, 8, 9, 10, 11, 12],
        )
    }
}

/// Spend parts to refill and raise shields. Returns the new level, or None
/// if nothing changed.
pub fn recharge(state: &mut GameState, ladder: &RechargeLadder) -> Option<u32> {
    if !state.is_alive || state.result.is_over() {
        return None;
    }
    let (cost, level) = ladder.step(state.recharge_count)?;
    if state.parts < cost {
        return None;
    }

    state.modify_parts(-(cost as i64));
    state.recharge_count += 1;
    state.raise_max_shields(level);
    state.shields = state.max_shields;

    tracing::debug!("recharge #{}: shields now {}", state.recharge_count, state.shields);
    Some(state.shields)
}

/// Consume one shield surge to max out shields
pub fn use_shield_surge(state: &mut GameState) -> bool {
    if !state.is_alive || state.result.is_over() || state.surge_inventory == 0 {
        return false;
    }
    state.shields = state.max_shields;
    state.surge_inventory -= 1;
    true
}
