//! Procedural board generation
//!
//! Runs once at game start: boss and guard ring, catalog distribution over
//! shuffled free cells, hints, player spawn with its safe zone, and the
//! optional shield surge pickup next to the spawn.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::board::Board;
use crate::catalog::Catalog;
use crate::error::GenerationError;
use crate::fog;
use crate::hex::{CellIndex, HexGrid};

/// A freshly generated board
#[derive(Clone, Debug)]
pub struct Generated {
    pub board: Board,
    pub spawn: CellIndex,
    pub boss_cell: CellIndex,
    /// Occupied cells at the end of generation, surge pickup included
    pub total_occupied: usize,
    pub surge_cell: Option<CellIndex>,
}

/// Generate a board. All random choices come from `rng`.
pub fn generate<R: Rng>(
    grid: HexGrid,
    catalog: &Catalog,
    rng: &mut R,
) -> Result<Generated, GenerationError> {
    if grid.is_empty() {
        return Err(GenerationError::EmptyBoard);
    }

    let roles = catalog.roles();
    let boss = catalog.boss().ok_or_else(|| GenerationError::MissingArchetype {
        role: "boss",
        id: roles.boss.clone(),
    })?;
    let guard = catalog.guard().ok_or_else(|| GenerationError::MissingArchetype {
        role: "guard",
        id: roles.guard.clone(),
    })?;

    let mut board = Board::new(grid);

    // Boss and its guard ring
    let boss_cell = rng.gen_range(0..board.len());
    board.place(boss_cell, boss.clone());
    let ring = board.neighbors(boss_cell).to_vec();
    for &cell in &ring {
        board.place(cell, guard.clone());
    }
    tracing::debug!("boss at cell {} with {} guards", boss_cell, ring.len());

    // Everything else, by count, over a shuffled pool of free cells
    let mut pool: Vec<CellIndex> = (0..board.len()).filter(|&i| !board.is_occupied(i)).collect();
    pool.shuffle(rng);
    let mut free = pool.into_iter();
    for archetype in catalog.placeable() {
        for cell in free.by_ref().take(archetype.count as usize) {
            board.place(cell, archetype.clone());
        }
    }

    let mut total_occupied = board.occupied_count();
    board.refresh_all_hints();

    let spawn = choose_spawn(&board, rng)?;
    fog::reveal(&mut board, spawn);
    for n in board.neighbors(spawn).to_vec() {
        fog::reveal(&mut board, n);
    }

    let surge_cell = place_surge(&mut board, catalog, spawn, rng);
    if surge_cell.is_some() {
        total_occupied += 1;
    }

    tracing::debug!(
        "generated {} cells: {} occupied, spawn at {}",
        board.len(),
        total_occupied,
        spawn
    );

    Ok(Generated {
        board,
        spawn,
        boss_cell,
        total_occupied,
        surge_cell,
    })
}

/// Uniform pick among free interior cells, relaxing to any free cell
fn choose_spawn<R: Rng>(board: &Board, rng: &mut R) -> Result<CellIndex, GenerationError> {
    let free: Vec<CellIndex> = (0..board.len()).filter(|&i| !board.is_occupied(i)).collect();
    let interior: Vec<CellIndex> = free
        .iter()
        .copied()
        .filter(|&i| !board.grid().is_outer_ring(i))
        .collect();

    if let Some(&cell) = interior.choose(rng) {
        return Ok(cell);
    }

    tracing::warn!("no free interior cell for spawn, relaxing to the outer ring");
    free.choose(rng).copied().ok_or(GenerationError::NoSpawnCell)
}

/// Drop one shield surge pickup on a free neighbor of the spawn, if possible
fn place_surge<R: Rng>(
    board: &mut Board,
    catalog: &Catalog,
    spawn: CellIndex,
    rng: &mut R,
) -> Option<CellIndex> {
    let surge = catalog.surge_archetype()?;
    let eligible: Vec<CellIndex> = board
        .neighbors(spawn)
        .iter()
        .copied()
        .filter(|&n| !board.is_occupied(n))
        .collect();
    let cell = *eligible.choose(rng)?;

    board.place(cell, surge.clone());
    board.refresh_hints_around(cell);
    Some(cell)
}
