//! Hex grid geometry with cube coordinates
//!
//! Cells are addressed by a stable [`CellIndex`]. Adjacency is derived from
//! each cell's cube coordinate; cells without a usable coordinate fall back
//! to planar proximity against the other cell centers.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::layout::CellGeometry;

/// Stable cell identity, assigned at board load
pub type CellIndex = usize;

/// Maximum number of neighbors a hex can have
pub const MAX_NEIGHBORS: usize = 6;

/// Cube direction offsets (dq, dr, ds)
pub const DIRECTIONS: [(i32, i32, i32); 6] = [
    (1, -1, 0),
    (1, 0, -1),
    (0, 1, -1),
    (-1, 1, 0),
    (-1, 0, 1),
    (0, -1, 1),
];

/// Cube hex coordinates (q + r + s = 0)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cube {
    pub q: i32,
    pub r: i32,
    pub s: i32,
}

impl Cube {
    pub const fn new(q: i32, r: i32, s: i32) -> Self {
        Self { q, r, s }
    }

    /// Build from axial (q, r), deriving s
    pub const fn from_axial(q: i32, r: i32) -> Self {
        Self { q, r, s: -q - r }
    }

    /// Check the cube constraint. Summed in i64 so extreme inputs cannot wrap.
    pub fn is_valid(&self) -> bool {
        self.q as i64 + self.r as i64 + self.s as i64 == 0
    }

    /// Get neighbor in direction (0-5). None when it falls outside i32.
    pub fn neighbor(&self, direction: usize) -> Option<Cube> {
        let (dq, dr, ds) = DIRECTIONS[direction % 6];
        Some(Cube::new(
            self.q.checked_add(dq)?,
            self.r.checked_add(dr)?,
            self.s.checked_add(ds)?,
        ))
    }

    /// Neighbor coordinates in direction order, skipping any that overflow
    pub fn neighbors(&self) -> impl Iterator<Item = Cube> + '_ {
        (0..DIRECTIONS.len()).filter_map(move |dir| self.neighbor(dir))
    }

    /// Distance between two hexes
    pub fn distance_to(&self, other: Cube) -> i64 {
        let dq = (self.q as i64 - other.q as i64).abs();
        let dr = (self.r as i64 - other.r as i64).abs();
        let ds = (self.s as i64 - other.s as i64).abs();
        (dq + dr + ds) / 2
    }

    /// Parse "q,r,s". Returns None for anything that is not three integers
    /// summing to zero.
    pub fn parse(text: &str) -> Option<Cube> {
        let mut parts = text.split(',').map(|p| p.trim().parse::<i32>());
        let q = parts.next()?.ok()?;
        let r = parts.next()?.ok()?;
        let s = parts.next()?.ok()?;
        if parts.next().is_some() {
            return None;
        }
        let cube = Cube::new(q, r, s);
        cube.is_valid().then_some(cube)
    }
}

impl std::fmt::Display for Cube {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{},{}", self.q, self.r, self.s)
    }
}

/// Coordinate table plus precomputed adjacency for every cell
#[derive(Clone, Debug)]
pub struct HexGrid {
    /// Coordinate per cell; None when the cell uses proximity fallback
    coords: Vec<Option<Cube>>,

    /// Planar centers, used only by the fallback
    centers: Vec<[f32; 2]>,

    /// Coordinate -> index (bijective over cells that carry coordinates)
    lookup: FxHashMap<Cube, CellIndex>,

    /// Neighbor indices per cell
    neighbors: Vec<Vec<CellIndex>>,

    /// Cells whose coordinate was missing or inconsistent
    fallback: Vec<CellIndex>,
}

impl HexGrid {
    /// Build the grid from raw geometry.
    ///
    /// A coordinate that violates the cube constraint, or that is shared by
    /// more than one cell, is treated as unknown and that cell switches to
    /// proximity lookup against `proximity_threshold`.
    ///
    /// Adjacency is only symmetric between cells that both carry
    /// coordinates. A fallback cell lists nearby coordinate cells, but a
    /// coordinate cell only ever lists other coordinate cells, so its hint
    /// leaves out the damage of a fallback occupant next to it.
    pub fn new(cells: &[CellGeometry], proximity_threshold: f32) -> Self {
        let mut seen: FxHashMap<Cube, usize> = FxHashMap::default();
        for cube in cells.iter().filter_map(|c| c.coord).filter(Cube::is_valid) {
            *seen.entry(cube).or_insert(0) += 1;
        }

        let coords: Vec<Option<Cube>> = cells
            .iter()
            .map(|c| c.coord.filter(|cube| cube.is_valid() && seen.get(cube) == Some(&1)))
            .collect();

        let lookup: FxHashMap<Cube, CellIndex> = coords
            .iter()
            .enumerate()
            .filter_map(|(index, coord)| coord.map(|cube| (cube, index)))
            .collect();

        let centers: Vec<[f32; 2]> = cells.iter().map(|c| c.center).collect();

        let mut fallback = Vec::new();
        let neighbors = (0..cells.len())
            .map(|index| match coords[index] {
                Some(cube) => cube
                    .neighbors()
                    .filter_map(|n| lookup.get(&n).copied())
                    .collect(),
                None => {
                    tracing::debug!("cell {} has no usable coordinate, using proximity", index);
                    fallback.push(index);
                    proximity_neighbors(&centers, index, proximity_threshold)
                }
            })
            .collect();

        Self {
            coords,
            centers,
            lookup,
            neighbors,
            fallback,
        }
    }

    /// Number of cells
    pub fn len(&self) -> usize {
        self.coords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    /// Coordinate of a cell, if it carries a usable one
    pub fn coord(&self, index: CellIndex) -> Option<Cube> {
        self.coords.get(index).copied().flatten()
    }

    /// Planar center of a cell
    pub fn center(&self, index: CellIndex) -> Option<[f32; 2]> {
        self.centers.get(index).copied()
    }

    /// Resolve a coordinate to its cell
    pub fn index_for(&self, coord: Cube) -> Option<CellIndex> {
        self.lookup.get(&coord).copied()
    }

    /// Up to six neighbors; boundary cells report fewer
    pub fn neighbor_indices(&self, index: CellIndex) -> &[CellIndex] {
        self.neighbors.get(index).map(Vec::as_slice).unwrap_or(&[])
    }

    /// A cell is on the outer ring if it has fewer than six neighbors
    pub fn is_outer_ring(&self, index: CellIndex) -> bool {
        self.neighbor_indices(index).len() < MAX_NEIGHBORS
    }

    /// Cells resolved through the proximity fallback
    pub fn fallback_cells(&self) -> &[CellIndex] {
        &self.fallback
    }
}

/// Rank every other cell by center distance and keep up to six under the
/// threshold. Ties break on index so identical geometry gives identical output.
fn proximity_neighbors(centers: &[[f32; 2]], index: CellIndex, threshold: f32) -> Vec<CellIndex> {
    let [x, y] = centers[index];
    let mut ranked: Vec<(f32, CellIndex)> = centers
        .iter()
        .enumerate()
        .filter(|&(other, _)| other != index)
        .map(|(other, [ox, oy])| ((ox - x).hypot(oy - y), other))
        .filter(|&(dist, _)| dist < threshold)
        .collect();

    ranked.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));
    ranked.into_iter().take(MAX_NEIGHBORS).map(|(_, other)| other).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::BoardLayout;

    fn grid(radius: i32) -> HexGrid {
        let layout = BoardLayout::hexagon(radius, 1.0);
        HexGrid::new(&layout.cells, layout.proximity_threshold(1.2))
    }

    #[test]
    fn test_parse() {
        assert_eq!(Cube::parse("1,-1,0"), Some(Cube::new(1, -1, 0)));
        assert_eq!(Cube::parse(" 2, 0 , -2 "), Some(Cube::new(2, 0, -2)));
        assert_eq!(Cube::parse("1,1,1"), None);
        assert_eq!(Cube::parse("1,2"), None);
        assert_eq!(Cube::parse("a,b,c"), None);
        assert_eq!(Cube::parse("0,0,0,0"), None);
    }

    #[test]
    fn test_parse_rejects_wrapping_sums() {
        // q + r + s wraps to 0 in i32 arithmetic
        assert_eq!(Cube::parse("2147483647,2147483647,2"), None);
        assert!(!Cube::new(i32::MAX, i32::MAX, 2).is_valid());
        assert!(Cube::new(i32::MAX, -i32::MAX, 0).is_valid());
    }

    #[test]
    fn test_neighbors_are_adjacent() {
        let origin = Cube::new(0, 0, 0);
        assert_eq!(origin.neighbors().count(), 6);
        for n in origin.neighbors() {
            assert!(n.is_valid());
            assert_eq!(origin.distance_to(n), 1);
        }
    }

    #[test]
    fn test_extreme_coordinate_drops_overflowing_neighbors() {
        let edge = Cube::new(i32::MAX, -i32::MAX, 0);
        // Every direction with dq = +1 leaves i32
        assert_eq!(edge.neighbors().count(), 4);

        let cells = vec![
            CellGeometry::new(Some(edge), [0.0, 0.0]),
            CellGeometry::new(Some(Cube::new(i32::MAX - 1, -i32::MAX + 1, 0)), [1.0, 0.0]),
        ];
        let g = HexGrid::new(&cells, 1.2);
        assert!(g.fallback_cells().is_empty());
        assert_eq!(g.neighbor_indices(0), &[1]);
        assert_eq!(g.neighbor_indices(1), &[0]);
    }

    #[test]
    fn test_center_has_six_neighbors() {
        let g = grid(2);
        let center = g.index_for(Cube::new(0, 0, 0)).unwrap();
        assert_eq!(g.neighbor_indices(center).len(), 6);
        assert!(!g.is_outer_ring(center));
    }

    #[test]
    fn test_corner_has_three_neighbors() {
        let g = grid(2);
        let corner = g.index_for(Cube::new(2, -2, 0)).unwrap();
        assert_eq!(g.neighbor_indices(corner).len(), 3);
        assert!(g.is_outer_ring(corner));
    }

    #[test]
    fn test_adjacency_is_symmetric() {
        let g = grid(3);
        for i in 0..g.len() {
            for &j in g.neighbor_indices(i) {
                assert!(g.neighbor_indices(j).contains(&i), "{} -> {} not mirrored", i, j);
            }
        }
    }

    #[test]
    fn test_fallback_matches_coordinates() {
        let mut layout = BoardLayout::hexagon(2, 1.0);
        let center = layout
            .cells
            .iter()
            .position(|c| c.coord == Some(Cube::new(0, 0, 0)))
            .unwrap();
        let expected = grid(2).neighbor_indices(center).to_vec();

        layout.cells[center].coord = None;
        let g = HexGrid::new(&layout.cells, layout.proximity_threshold(1.2));

        let mut found = g.neighbor_indices(center).to_vec();
        found.sort_unstable();
        let mut expected = expected;
        expected.sort_unstable();
        assert_eq!(found, expected);
        assert_eq!(g.fallback_cells(), &[center]);
    }

    #[test]
    fn test_duplicate_coordinates_fall_back() {
        let cells = vec![
            CellGeometry::new(Some(Cube::new(0, 0, 0)), [0.0, 0.0]),
            CellGeometry::new(Some(Cube::new(0, 0, 0)), [1.0, 0.0]),
            CellGeometry::new(Some(Cube::new(1, 0, -1)), [1.0, 0.0]),
        ];
        let g = HexGrid::new(&cells, 1.2);
        assert_eq!(g.fallback_cells(), &[0, 1]);
        assert_eq!(g.index_for(Cube::new(0, 0, 0)), None);
        assert_eq!(g.index_for(Cube::new(1, 0, -1)), Some(2));
    }

    #[test]
    fn test_fallback_links_are_one_way() {
        let cells = vec![
            CellGeometry::new(Some(Cube::new(0, 0, 0)), [0.0, 0.0]),
            CellGeometry::new(None, [1.0, 0.0]),
        ];
        let g = HexGrid::new(&cells, 1.2);
        assert_eq!(g.neighbor_indices(1), &[0]);
        assert!(g.neighbor_indices(0).is_empty());
    }

    #[test]
    fn test_fallback_tie_breaks_on_index() {
        let cells = vec![
            CellGeometry::new(None, [0.0, 0.0]),
            CellGeometry::new(None, [1.0, 0.0]),
            CellGeometry::new(None, [-1.0, 0.0]),
            CellGeometry::new(None, [0.0, 5.0]),
        ];
        let g = HexGrid::new(&cells, 1.2);
        assert_eq!(g.neighbor_indices(0), &[1, 2]);
        assert!(g.neighbor_indices(3).is_empty());
    }
}
