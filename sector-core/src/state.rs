//! The single explicitly-owned game state object

use rustc_hash::{FxHashMap, FxHashSet};

use crate::hex::CellIndex;
use crate::movement::MoveQueue;
use crate::outcome::GameResult;

/// Player-authored damage guess on a covered cell. Cosmetic only.
pub type DamageMarker = u32;

/// Mutable game state, created at game start and discarded at restart
#[derive(Clone, Debug)]
pub struct GameState {
    pub(crate) shields: u32,
    pub(crate) max_shields: u32,
    pub(crate) parts: u32,
    pub(crate) is_alive: bool,
    pub(crate) player_cell: Option<CellIndex>,
    pub(crate) cleared: FxHashSet<CellIndex>,
    pub(crate) total_occupied: usize,
    pub(crate) recharge_count: usize,
    pub(crate) annotations: FxHashMap<CellIndex, DamageMarker>,
    pub(crate) surge_inventory: u32,
    pub(crate) movement: MoveQueue,
    pub(crate) result: GameResult,
}

impl GameState {
    /// Fresh state with full shields
    pub fn new(starting_shields: u32, total_occupied: usize) -> Self {
        Self {
            shields: starting_shields,
            max_shields: starting_shields,
            parts: 0,
            is_alive: true,
            player_cell: None,
            cleared: FxHashSet::default(),
            total_occupied,
            recharge_count: 0,
            annotations: FxHashMap::default(),
            surge_inventory: 0,
            movement: MoveQueue::new(),
            result: GameResult::Ongoing,
        }
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    pub fn shields(&self) -> u32 {
        self.shields
    }

    pub fn max_shields(&self) -> u32 {
        self.max_shields
    }

    pub fn parts(&self) -> u32 {
        self.parts
    }

    pub fn is_alive(&self) -> bool {
        self.is_alive
    }

    pub fn player_cell(&self) -> Option<CellIndex> {
        self.player_cell
    }

    pub fn is_cleared(&self, index: CellIndex) -> bool {
        self.cleared.contains(&index)
    }

    pub fn cleared_count(&self) -> usize {
        self.cleared.len()
    }

    pub fn total_occupied(&self) -> usize {
        self.total_occupied
    }

    pub fn recharge_count(&self) -> usize {
        self.recharge_count
    }

    pub fn surge_inventory(&self) -> u32 {
        self.surge_inventory
    }

    pub fn annotation(&self, index: CellIndex) -> Option<DamageMarker> {
        self.annotations.get(&index).copied()
    }

    pub fn movement(&self) -> &MoveQueue {
        &self.movement
    }

    pub fn result(&self) -> GameResult {
        self.result
    }

    // ========================================================================
    // CLAMPED MUTATORS
    // ========================================================================

    /// Add or remove shields, clamped into 0..=max_shields
    pub(crate) fn modify_shields(&mut self, delta: i64) {
        let next = (self.shields as i64 + delta).clamp(0, self.max_shields as i64);
        self.shields = next as u32;
    }

    /// Add or remove parts, never below zero
    pub(crate) fn modify_parts(&mut self, delta: i64) {
        self.parts = (self.parts as i64 + delta).max(0) as u32;
    }

    /// Raise the shield cap. Never lowers it.
    pub(crate) fn raise_max_shields(&mut self, level: u32) {
        self.max_shields = self.max_shields.max(level);
    }
}
