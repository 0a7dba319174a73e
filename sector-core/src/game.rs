//! Game facade: owns the state, board and catalog, and exposes the calls a
//! presentation layer makes

use rand::Rng;

use crate::board::Board;
use crate::catalog::Catalog;
use crate::combat::{self, CombatOutcome};
use crate::config::GameConfig;
use crate::economy::{self, RechargeLadder};
use crate::error::GenerationError;
use crate::events::GameEvent;
use crate::fog::{self, EffectOutcome};
use crate::generator;
use crate::hex::{CellIndex, HexGrid};
use crate::layout::BoardLayout;
use crate::movement::MoveTicket;
use crate::outcome::GameResult;
use crate::state::{DamageMarker, GameState};
use crate::view::{CellView, EntityDisplay, ShieldLevel, StatusView};

/// A running game
#[derive(Clone, Debug)]
pub struct Game {
    state: GameState,
    board: Board,
    catalog: Catalog,
    ladder: RechargeLadder,
    spawn: CellIndex,
    events: Vec<GameEvent>,
}

impl Game {
    // ========================================================================
    // CONSTRUCTORS
    // ========================================================================

    /// Generate a new board over `layout` and start a game on it
    pub fn new<R: Rng>(
        layout: &BoardLayout,
        catalog: Catalog,
        config: &GameConfig,
        rng: &mut R,
    ) -> Result<Self, GenerationError> {
        let grid = HexGrid::new(&layout.cells, layout.proximity_threshold(config.proximity_factor));
        let generated = generator::generate(grid, &catalog, rng)?;

        let mut state = GameState::new(config.starting_shields, generated.total_occupied);
        state.player_cell = Some(generated.spawn);

        Ok(Self {
            state,
            board: generated.board,
            catalog,
            ladder: config.ladder(),
            spawn: generated.spawn,
            events: Vec::new(),
        })
    }

    /// Start a game on a hand-built board. Every occupied cell counts toward
    /// the win; the spawn and its neighbors are revealed.
    pub fn from_board(
        mut board: Board,
        catalog: Catalog,
        config: &GameConfig,
        spawn: CellIndex,
    ) -> Self {
        board.refresh_all_hints();
        fog::reveal(&mut board, spawn);
        for n in board.neighbors(spawn).to_vec() {
            fog::reveal(&mut board, n);
        }

        let mut state = GameState::new(config.starting_shields, board.occupied_count());
        state.player_cell = Some(spawn);

        Self {
            state,
            board,
            catalog,
            ladder: config.ladder(),
            spawn,
            events: Vec::new(),
        }
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn spawn(&self) -> CellIndex {
        self.spawn
    }

    pub fn result(&self) -> GameResult {
        self.state.result
    }

    /// Take all events emitted since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    // ========================================================================
    // MOVEMENT
    // ========================================================================

    /// Queue a move. Returns false when the request is ignored: game over,
    /// unknown cell, the current cell, or a repeat of the last destination.
    pub fn request_move(&mut self, index: CellIndex) -> bool {
        if self.state.result.is_over() || index >= self.board.len() {
            return false;
        }
        if !self.state.movement.request(index, self.state.player_cell) {
            return false;
        }
        if !self.state.movement.is_in_flight() {
            self.process_next();
        }
        true
    }

    /// The move awaiting its animation-completion signal
    pub fn pending_move(&self) -> Option<MoveTicket> {
        self.state.movement.in_flight()
    }

    /// Animation-completion callback: resolve the in-flight move, then start
    /// the next one. Stale or unknown tickets are ignored.
    pub fn complete_move(&mut self, ticket: MoveTicket) -> bool {
        if !self.state.movement.finish(ticket) {
            return false;
        }
        self.resolve_move(ticket.to);
        self.process_next();
        true
    }

    /// Complete every queued move without waiting on animation.
    /// Returns how many moves were resolved.
    pub fn settle(&mut self) -> usize {
        let mut resolved = 0;
        while let Some(ticket) = self.pending_move() {
            if self.complete_move(ticket) {
                resolved += 1;
            }
        }
        resolved
    }

    fn process_next(&mut self) {
        let game_over = self.state.result.is_over();
        let waiting = self.state.movement.pending_len();

        match self.state.movement.advance(self.state.player_cell, game_over) {
            Some(ticket) => self.events.push(GameEvent::MoveStarted {
                seq: ticket.seq,
                from: ticket.from,
                to: ticket.to,
            }),
            None if game_over && waiting > 0 => {
                tracing::debug!("game over, dropping {} queued move(s)", waiting);
                self.events.push(GameEvent::QueueDrained { dropped: waiting });
            }
            None => {}
        }
    }

    fn resolve_move(&mut self, index: CellIndex) {
        self.state.player_cell = Some(index);
        self.reveal(index);

        match combat::resolve(&mut self.state, &mut self.board, &self.catalog, index) {
            CombatOutcome::SafeHex => self.events.push(GameEvent::SafeHex { cell: index }),
            CombatOutcome::Defeated {
                entity,
                shields_lost,
                parts_gained,
                surge_gained,
                effects,
                sector_cleared,
            } => {
                self.events.push(GameEvent::EnemyDefeated {
                    cell: index,
                    entity_id: entity.id.clone(),
                    shields_lost,
                    parts_gained,
                });
                if surge_gained > 0 {
                    self.events.push(GameEvent::ShieldSurgeCollected { amount: surge_gained });
                }
                if let Some(message) = entity.alert {
                    self.events.push(GameEvent::Alert { message });
                }
                for outcome in effects {
                    if let EffectOutcome::Revealed(cells) = &outcome {
                        for cell in cells {
                            self.state.annotations.remove(cell);
                        }
                    }
                    self.events.push(GameEvent::ChainedEffect {
                        trigger: entity.id.clone(),
                        outcome,
                    });
                }
                if sector_cleared {
                    self.events.push(GameEvent::SectorCleared);
                }
            }
            CombatOutcome::Destroyed { attack, entity } => {
                self.events.push(GameEvent::PlayerDestroyed {
                    cell: index,
                    entity_id: entity.id,
                    attack,
                });
            }
        }
    }

    fn reveal(&mut self, index: CellIndex) {
        if fog::reveal(&mut self.board, index) {
            self.state.annotations.remove(&index);
            self.events.push(GameEvent::CellRevealed { cell: index });
        }
    }

    // ========================================================================
    // PROGRESSION
    // ========================================================================

    /// Spend parts on the next recharge step
    pub fn recharge(&mut self) -> bool {
        match economy::recharge(&mut self.state, &self.ladder) {
            Some(level) => {
                self.events.push(GameEvent::Recharged {
                    level,
                    recharge_count: self.state.recharge_count,
                });
                true
            }
            None => false,
        }
    }

    /// Consume a shield surge
    pub fn use_shield_surge(&mut self) -> bool {
        if !economy::use_shield_surge(&mut self.state) {
            return false;
        }
        self.events.push(GameEvent::ShieldSurgeUsed {
            remaining: self.state.surge_inventory,
        });
        true
    }

    // ========================================================================
    // ANNOTATIONS
    // ========================================================================

    /// Mark a covered cell with a damage guess
    pub fn annotate(&mut self, index: CellIndex, marker: DamageMarker) -> bool {
        match self.board.cell(index) {
            Some(cell) if !cell.revealed => {
                self.state.annotations.insert(index, marker);
                true
            }
            _ => false,
        }
    }

    pub fn clear_annotation(&mut self, index: CellIndex) -> bool {
        self.state.annotations.remove(&index).is_some()
    }

    // ========================================================================
    // VIEWS
    // ========================================================================

    pub fn cell_view(&self, index: CellIndex) -> Option<CellView> {
        let cell = self.board.cell(index)?;
        let entity = if cell.revealed {
            cell.entity.as_ref().map(EntityDisplay::from)
        } else {
            None
        };

        Some(CellView {
            index,
            revealed: cell.revealed,
            entity,
            hint: fog::hint_visible(&self.board, index).then_some(cell.hint),
            annotation: self.state.annotation(index),
            is_player: self.state.player_cell == Some(index),
        })
    }

    pub fn cell_views(&self) -> Vec<CellView> {
        (0..self.board.len()).filter_map(|i| self.cell_view(i)).collect()
    }

    pub fn status_view(&self) -> StatusView {
        let state = &self.state;
        let cleared_percent = if state.total_occupied == 0 {
            0.0
        } else {
            state.cleared.len() as f32 * 100.0 / state.total_occupied as f32
        };

        StatusView {
            shields: state.shields,
            max_shields: state.max_shields,
            parts: state.parts,
            parts_needed_for_next_recharge: self.ladder.cost(state.recharge_count),
            shield_surge_inventory: state.surge_inventory,
            cleared_percent,
            is_alive: state.is_alive,
            result: state.result,
            shield_level: ShieldLevel::from_ratio(state.shields, state.max_shields),
        }
    }
}
