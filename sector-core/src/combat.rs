//! Combat resolution for a cell the player has just entered

use crate::board::Board;
use crate::catalog::{Catalog, Entity};
use crate::fog::{self, EffectOutcome};
use crate::hex::CellIndex;
use crate::outcome;
use crate::state::GameState;

/// Result of entering a cell
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CombatOutcome {
    /// Nothing there
    SafeHex,
    /// Occupant destroyed and salvaged
    Defeated {
        entity: Entity,
        shields_lost: u32,
        parts_gained: u32,
        surge_gained: u32,
        effects: Vec<EffectOutcome>,
        sector_cleared: bool,
    },
    /// Attack exceeded shields. The occupant stays on the cell.
    Destroyed { attack: u32, entity: Entity },
}

/// Resolve the player entering `index`
pub fn resolve(
    state: &mut GameState,
    board: &mut Board,
    catalog: &Catalog,
    index: CellIndex,
) -> CombatOutcome {
    let entity = match board.cell(index).and_then(|c| c.entity.clone()) {
        Some(entity) => entity,
        None => {
            board.refresh_hint(index);
            return CombatOutcome::SafeHex;
        }
    };

    let attack = entity.damage;
    if attack > state.shields {
        state.is_alive = false;
        state.shields = 0;
        outcome::record_loss(state);
        tracing::debug!("{} ({}) overwhelmed shields at cell {}", entity.name, attack, index);
        return CombatOutcome::Destroyed { attack, entity };
    }

    state.modify_shields(-(attack as i64));
    let reward = entity.reward();
    state.modify_parts(reward as i64);

    let surge_gained = entity.shield_bonus.unwrap_or(0);
    state.surge_inventory += surge_gained;

    board.clear_entity(index);
    state.cleared.insert(index);
    tracing::debug!(
        "defeated {} at cell {}: -{} shields, +{} parts",
        entity.name,
        index,
        attack,
        reward
    );

    let effects = fog::apply_chained(board, catalog, &entity.id);
    board.refresh_hints_around(index);

    let sector_cleared = outcome::check_win(state);

    CombatOutcome::Defeated {
        entity,
        shields_lost: attack,
        parts_gained: reward,
        surge_gained,
        effects,
        sector_cleared,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hex::HexGrid;
    use crate::layout::BoardLayout;
    use crate::outcome::GameResult;

    fn setup(total: usize) -> (GameState, Board, Catalog) {
        let layout = BoardLayout::hexagon(3, 1.0);
        let board = Board::new(HexGrid::new(&layout.cells, layout.proximity_threshold(1.2)));
        (GameState::new(5, total), board, Catalog::builtin().unwrap())
    }

    fn put(board: &mut Board, catalog: &Catalog, index: CellIndex, id: &str) {
        assert!(board.place(index, catalog.get(id).unwrap().clone()));
    }

    #[test]
    fn test_empty_cell_is_safe() {
        let (mut state, mut board, catalog) = setup(1);
        assert_eq!(resolve(&mut state, &mut board, &catalog, 4), CombatOutcome::SafeHex);
        assert_eq!(state.shields(), 5);
        assert_eq!(state.cleared_count(), 0);
    }

    #[test]
    fn test_defeat_spends_shields_and_salvages() {
        let (mut state, mut board, catalog) = setup(2);
        put(&mut board, &catalog, 4, "E03");

        let outcome = resolve(&mut state, &mut board, &catalog, 4);
        assert!(matches!(
            outcome,
            CombatOutcome::Defeated { shields_lost: 3, parts_gained: 3, .. }
        ));
        assert_eq!(state.shields(), 2);
        assert_eq!(state.parts(), 3);
        assert!(state.is_cleared(4));
        assert!(!board.is_occupied(4));
    }

    #[test]
    fn test_reward_override_used() {
        let (mut state, mut board, catalog) = setup(2);
        put(&mut board, &catalog, 4, "E08");
        resolve(&mut state, &mut board, &catalog, 4);
        assert_eq!(state.shields(), 4);
        assert_eq!(state.parts(), 6);
    }

    #[test]
    fn test_attack_equal_to_shields_survives() {
        let (mut state, mut board, catalog) = setup(2);
        put(&mut board, &catalog, 4, "E05");
        resolve(&mut state, &mut board, &catalog, 4);
        assert!(state.is_alive());
        assert_eq!(state.shields(), 0);
    }

    #[test]
    fn test_overwhelmed_shields() {
        let (mut state, mut board, catalog) = setup(2);
        put(&mut board, &catalog, 4, "E07");

        let outcome = resolve(&mut state, &mut board, &catalog, 4);
        assert!(matches!(outcome, CombatOutcome::Destroyed { attack: 7, .. }));
        assert!(!state.is_alive());
        assert_eq!(state.shields(), 0);
        assert_eq!(state.result(), GameResult::Destroyed);
        assert!(board.is_occupied(4));
        assert_eq!(state.cleared_count(), 0);
    }

    #[test]
    fn test_surge_pickup() {
        let (mut state, mut board, catalog) = setup(2);
        put(&mut board, &catalog, 4, "S01");
        let outcome = resolve(&mut state, &mut board, &catalog, 4);
        assert!(matches!(outcome, CombatOutcome::Defeated { surge_gained: 1, .. }));
        assert_eq!(state.surge_inventory(), 1);
        assert_eq!(state.shields(), 5);
    }

    #[test]
    fn test_last_clear_wins_once() {
        let (mut state, mut board, catalog) = setup(2);
        put(&mut board, &catalog, 4, "E01");
        put(&mut board, &catalog, 5, "E01");

        let first = resolve(&mut state, &mut board, &catalog, 4);
        assert!(matches!(first, CombatOutcome::Defeated { sector_cleared: false, .. }));
        let second = resolve(&mut state, &mut board, &catalog, 5);
        assert!(matches!(second, CombatOutcome::Defeated { sector_cleared: true, .. }));
        assert_eq!(state.result(), GameResult::Cleared);
    }

    #[test]
    fn test_defeat_triggers_chained_reveal() {
        let (mut state, mut board, catalog) = setup(3);
        state.shields = 9;
        state.max_shields = 9;
        put(&mut board, &catalog, 4, "E11");
        put(&mut board, &catalog, 20, "E12");

        let outcome = resolve(&mut state, &mut board, &catalog, 4);
        match outcome {
            CombatOutcome::Defeated { effects, .. } => {
                assert_eq!(effects, vec![EffectOutcome::Revealed(vec![20])]);
            }
            other => panic!("unexpected outcome {:?}", other),
        }
        assert!(board.cell(20).unwrap().revealed);
    }
}
