//! Fog of war: per-cell Covered -> Revealed, plus chained board effects
//!
//! Revealing is one-way. Chained effects come from the catalog trigger table
//! and act on every cell holding the target archetype, regardless of
//! adjacency.

use serde::Serialize;

use crate::board::Board;
use crate::catalog::{Catalog, TriggerEffect};
use crate::hex::CellIndex;

/// What a chained effect did to the board
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub enum EffectOutcome {
    Revealed(Vec<CellIndex>),
    Neutralized(Vec<CellIndex>),
}

/// Reveal a cell. Returns true only if it was covered before.
pub fn reveal(board: &mut Board, index: CellIndex) -> bool {
    match board.cell_mut(index) {
        Some(cell) if !cell.revealed => {
            cell.revealed = true;
            true
        }
        _ => false,
    }
}

/// Whether the neighbor-damage hint should be shown for a cell.
///
/// Hidden while covered, while zero, and while the cell's own occupant is
/// on display.
pub fn hint_visible(board: &Board, index: CellIndex) -> bool {
    board
        .cell(index)
        .is_some_and(|cell| cell.revealed && cell.hint > 0 && cell.entity.is_none())
}

/// Apply one trigger effect to the board
pub fn apply_effect(board: &mut Board, effect: &TriggerEffect) -> EffectOutcome {
    match effect {
        TriggerEffect::Reveal { targets } => {
            let mut revealed = Vec::new();
            for index in 0..board.len() {
                let hit = board
                    .cell(index)
                    .and_then(|c| c.entity_id())
                    .is_some_and(|id| targets.iter().any(|t| t == id));
                if hit && reveal(board, index) {
                    revealed.push(index);
                }
            }
            EffectOutcome::Revealed(revealed)
        }
        TriggerEffect::Neutralize { target, reward_parts } => {
            let cells = board.cells_with(target);
            for &index in &cells {
                if let Some(entity) = board.cell_mut(index).and_then(|c| c.entity.as_mut()) {
                    entity.damage = 0;
                    entity.reward_parts = Some(*reward_parts);
                }
            }
            EffectOutcome::Neutralized(cells)
        }
    }
}

/// Fire every effect keyed by the defeated archetype, then recompute hints
/// across the whole board
pub fn apply_chained(board: &mut Board, catalog: &Catalog, defeated: &str) -> Vec<EffectOutcome> {
    let outcomes: Vec<EffectOutcome> = catalog
        .effects_for(defeated)
        .map(|effect| apply_effect(board, effect))
        .collect();

    if !outcomes.is_empty() {
        tracing::debug!("{} chained effect(s) from defeating {}", outcomes.len(), defeated);
        board.refresh_all_hints();
    }
    outcomes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hex::HexGrid;
    use crate::layout::BoardLayout;

    fn setup() -> (Board, Catalog) {
        let layout = BoardLayout::hexagon(3, 1.0);
        let board = Board::new(HexGrid::new(&layout.cells, layout.proximity_threshold(1.2)));
        (board, Catalog::builtin().unwrap())
    }

    fn put(board: &mut Board, catalog: &Catalog, index: CellIndex, id: &str) {
        assert!(board.place(index, catalog.get(id).unwrap().clone()));
    }

    #[test]
    fn test_reveal_is_one_way() {
        let (mut board, _) = setup();
        assert!(reveal(&mut board, 4));
        assert!(!reveal(&mut board, 4));
        assert!(board.cell(4).unwrap().revealed);
        assert!(!reveal(&mut board, 10_000));
    }

    #[test]
    fn test_boss_reveals_command_core() {
        let (mut board, catalog) = setup();
        put(&mut board, &catalog, 2, "E12");
        put(&mut board, &catalog, 9, "E12");
        put(&mut board, &catalog, 5, "E01");

        let outcomes = apply_chained(&mut board, &catalog, "E11");
        assert_eq!(outcomes, vec![EffectOutcome::Revealed(vec![2, 9])]);
        assert!(board.cell(2).unwrap().revealed);
        assert!(!board.cell(5).unwrap().revealed);
    }

    #[test]
    fn test_trader_reveals_both_warship_kinds() {
        let (mut board, catalog) = setup();
        put(&mut board, &catalog, 1, "E06");
        put(&mut board, &catalog, 3, "E07");
        put(&mut board, &catalog, 6, "E03");

        apply_chained(&mut board, &catalog, "E08");
        assert!(board.cell(1).unwrap().revealed);
        assert!(board.cell(3).unwrap().revealed);
        assert!(!board.cell(6).unwrap().revealed);
    }

    #[test]
    fn test_command_core_neutralizes_without_revealing() {
        let (mut board, catalog) = setup();
        let center = board.grid().index_for(crate::hex::Cube::new(0, 0, 0)).unwrap();
        let engine = board.neighbors(center)[0];
        put(&mut board, &catalog, engine, "E13");
        board.refresh_all_hints();
        assert_eq!(board.cell(center).unwrap().hint, 20);

        let outcomes = apply_chained(&mut board, &catalog, "E12");
        assert_eq!(outcomes, vec![EffectOutcome::Neutralized(vec![engine])]);

        let cell = board.cell(engine).unwrap();
        assert!(!cell.revealed);
        let entity = cell.entity.as_ref().unwrap();
        assert_eq!(entity.damage, 0);
        assert_eq!(entity.reward(), 25);
        assert_eq!(board.cell(center).unwrap().hint, 0);
    }

    #[test]
    fn test_no_trigger_no_effect() {
        let (mut board, catalog) = setup();
        put(&mut board, &catalog, 1, "E03");
        assert!(apply_chained(&mut board, &catalog, "E01").is_empty());
        assert!(!board.cell(1).unwrap().revealed);
    }

    #[test]
    fn test_hint_visibility() {
        let (mut board, catalog) = setup();
        let center = board.grid().index_for(crate::hex::Cube::new(0, 0, 0)).unwrap();
        let n = board.neighbors(center)[0];
        put(&mut board, &catalog, n, "E02");
        board.refresh_all_hints();

        assert!(!hint_visible(&board, center));
        reveal(&mut board, center);
        assert!(hint_visible(&board, center));

        // Occupied and revealed: the entity is shown instead
        put(&mut board, &catalog, center, "E01");
        assert!(!hint_visible(&board, center));
    }
}
