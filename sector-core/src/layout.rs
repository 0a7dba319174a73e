//! Board geometry input
//!
//! A layout is the raw table the grid is built from: one entry per cell,
//! in index order, each with an optional cube coordinate and a planar
//! center. Layouts are either generated (`hexagon`) or loaded from JSON.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::hex::Cube;

/// Geometry for a single cell
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawCell", into = "RawCell")]
pub struct CellGeometry {
    pub coord: Option<Cube>,
    pub center: [f32; 2],
}

impl CellGeometry {
    pub fn new(coord: Option<Cube>, center: [f32; 2]) -> Self {
        Self { coord, center }
    }
}

/// On-disk form: coordinates are "q,r,s" strings and may be absent or junk
#[derive(Clone, Debug, Serialize, Deserialize)]
struct RawCell {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    coord: Option<String>,
    x: f32,
    y: f32,
}

impl From<RawCell> for CellGeometry {
    fn from(raw: RawCell) -> Self {
        Self {
            coord: raw.coord.as_deref().and_then(Cube::parse),
            center: [raw.x, raw.y],
        }
    }
}

impl From<CellGeometry> for RawCell {
    fn from(cell: CellGeometry) -> Self {
        Self {
            coord: cell.coord.map(|c| c.to_string()),
            x: cell.center[0],
            y: cell.center[1],
        }
    }
}

/// Full board geometry
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BoardLayout {
    /// Center-to-center distance between adjacent hexes
    #[serde(default = "default_hex_width")]
    pub hex_width: f32,
    pub cells: Vec<CellGeometry>,
}

fn default_hex_width() -> f32 {
    1.0
}

impl BoardLayout {
    /// Hexagonal map of the given radius with pointy-top centers.
    /// Cells are ordered by q, then r.
    pub fn hexagon(radius: i32, hex_width: f32) -> Self {
        let radius = radius.max(0);
        let row_height = hex_width * 3f32.sqrt() / 2.0;
        let mut cells = Vec::new();

        for q in -radius..=radius {
            let r_min = (-radius).max(-q - radius);
            let r_max = radius.min(-q + radius);
            for r in r_min..=r_max {
                let x = hex_width * (q as f32 + r as f32 / 2.0);
                let y = row_height * r as f32;
                cells.push(CellGeometry::new(Some(Cube::from_axial(q, r)), [x, y]));
            }
        }

        Self { hex_width, cells }
    }

    /// Fallback proximity threshold for this layout
    pub fn proximity_threshold(&self, factor: f32) -> f32 {
        self.hex_width * factor
    }

    /// Load from JSON file
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let layout: BoardLayout = serde_json::from_str(&content)?;
        Ok(layout)
    }

    /// Save to JSON file
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hexagon_cell_count() {
        // 3r(r+1) + 1
        assert_eq!(BoardLayout::hexagon(0, 1.0).cells.len(), 1);
        assert_eq!(BoardLayout::hexagon(1, 1.0).cells.len(), 7);
        assert_eq!(BoardLayout::hexagon(4, 1.0).cells.len(), 61);
    }

    #[test]
    fn test_adjacent_centers_one_width_apart() {
        let layout = BoardLayout::hexagon(1, 2.0);
        let origin = layout
            .cells
            .iter()
            .find(|c| c.coord == Some(Cube::new(0, 0, 0)))
            .unwrap();
        for cell in &layout.cells {
            if cell.coord == origin.coord {
                continue;
            }
            let d = (cell.center[0] - origin.center[0]).hypot(cell.center[1] - origin.center[1]);
            assert!((d - 2.0).abs() < 1e-4, "distance {}", d);
        }
    }

    #[test]
    fn test_raw_cells_parse_coordinates() {
        let json = r#"{
            "hex_width": 1.5,
            "cells": [
                {"coord": "0,0,0", "x": 0.0, "y": 0.0},
                {"coord": "garbage", "x": 1.5, "y": 0.0},
                {"x": 3.0, "y": 0.0}
            ]
        }"#;
        let layout: BoardLayout = serde_json::from_str(json).unwrap();
        assert_eq!(layout.hex_width, 1.5);
        assert_eq!(layout.cells[0].coord, Some(Cube::new(0, 0, 0)));
        assert_eq!(layout.cells[1].coord, None);
        assert_eq!(layout.cells[2].coord, None);
        assert_eq!(layout.cells[2].center, [3.0, 0.0]);
    }
}
