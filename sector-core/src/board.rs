//! Cell table and neighbor-damage hints

use serde::Serialize;

use crate::catalog::Entity;
use crate::hex::{CellIndex, Cube, HexGrid};

/// A single hex on the board
#[derive(Clone, Debug, Serialize)]
pub struct Cell {
    pub index: CellIndex,
    pub coord: Option<Cube>,
    pub revealed: bool,
    pub entity: Option<Entity>,
    /// Sum of damage over placed neighbor entities
    pub hint: u32,
}

impl Cell {
    pub fn is_occupied(&self) -> bool {
        self.entity.is_some()
    }

    /// Id of the occupant, if any
    pub fn entity_id(&self) -> Option<&str> {
        self.entity.as_ref().map(|e| e.id.as_str())
    }
}

/// Board: cells owned by index, plus the grid they sit on
#[derive(Clone, Debug)]
pub struct Board {
    grid: HexGrid,
    cells: Vec<Cell>,
}

impl Board {
    /// Empty, fully covered board over the grid
    pub fn new(grid: HexGrid) -> Self {
        let cells = (0..grid.len())
            .map(|index| Cell {
                index,
                coord: grid.coord(index),
                revealed: false,
                entity: None,
                hint: 0,
            })
            .collect();
        Self { grid, cells }
    }

    pub fn grid(&self) -> &HexGrid {
        &self.grid
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn cell(&self, index: CellIndex) -> Option<&Cell> {
        self.cells.get(index)
    }

    pub(crate) fn cell_mut(&mut self, index: CellIndex) -> Option<&mut Cell> {
        self.cells.get_mut(index)
    }

    pub fn neighbors(&self, index: CellIndex) -> &[CellIndex] {
        self.grid.neighbor_indices(index)
    }

    pub fn is_occupied(&self, index: CellIndex) -> bool {
        self.cell(index).is_some_and(Cell::is_occupied)
    }

    /// Place an entity on an empty cell. Returns false if the cell is taken
    /// or out of range.
    pub fn place(&mut self, index: CellIndex, entity: Entity) -> bool {
        match self.cells.get_mut(index) {
            Some(cell) if cell.entity.is_none() => {
                cell.entity = Some(entity);
                true
            }
            _ => false,
        }
    }

    /// Remove and return a cell's occupant
    pub(crate) fn clear_entity(&mut self, index: CellIndex) -> Option<Entity> {
        self.cells.get_mut(index).and_then(|cell| cell.entity.take())
    }

    /// Cells currently holding the given archetype, in index order
    pub fn cells_with(&self, id: &str) -> Vec<CellIndex> {
        self.cells
            .iter()
            .filter(|cell| cell.entity_id() == Some(id))
            .map(|cell| cell.index)
            .collect()
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_occupied()).count()
    }

    /// Damage sum over the cell's placed neighbors
    pub fn neighbor_damage_sum(&self, index: CellIndex) -> u32 {
        self.neighbors(index)
            .iter()
            .filter_map(|&n| self.cells[n].entity.as_ref())
            .map(|e| e.damage)
            .sum()
    }

    pub(crate) fn refresh_hint(&mut self, index: CellIndex) {
        if index < self.cells.len() {
            self.cells[index].hint = self.neighbor_damage_sum(index);
        }
    }

    /// Recompute a cell's hint and those of its neighbors
    pub(crate) fn refresh_hints_around(&mut self, index: CellIndex) {
        self.refresh_hint(index);
        let neighbors = self.neighbors(index).to_vec();
        for n in neighbors {
            self.refresh_hint(n);
        }
    }

    pub(crate) fn refresh_all_hints(&mut self) {
        for index in 0..self.cells.len() {
            self.refresh_hint(index);
        }
    }
}
