//! Game configuration

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::economy::RechargeLadder;

/// Tunables for a game. Missing JSON fields take their defaults.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Shields (and shield cap) at game start
    pub starting_shields: u32,
    /// Parts required per recharge, by recharge count
    pub recharge_costs: Vec<u32>,
    /// Shield level after each recharge
    pub recharge_levels: Vec<u32>,
    /// Radius of the generated hexagon when no layout file is given
    pub board_radius: i32,
    /// Center-to-center distance of adjacent hexes
    pub hex_width: f32,
    /// Fallback proximity threshold, as a multiple of hex width
    pub proximity_factor: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            starting_shields: 5,
            recharge_costs: vec![4, 6, 9, 13, 18, 24, 31, 40],
            recharge_levels: vec![5, 6, 7, 8, 9, 10, 11, 12],
            board_radius: 6,
            hex_width: 1.0,
            proximity_factor: 1.2,
        }
    }
}

impl GameConfig {
    pub fn ladder(&self) -> RechargeLadder {
        RechargeLadder::new(self.recharge_costs.clone(), self.recharge_levels.clone())
    }

    /// Load from JSON file
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: GameConfig = serde_json::from_str(&content)?;
        Ok(config)
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
    fn test_defaults() {
        let config = GameConfig::default();
        assert_eq!(config.starting_shields, 5);
        assert_eq!(config.ladder(), RechargeLadder::default());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: GameConfig = serde_json::from_str(r#"{"starting_shields": 8}"#).unwrap();
        assert_eq!(config.starting_shields, 8);
        assert_eq!(config.board_radius, 6);
        assert_eq!(config.recharge_costs[0], 4);
    }
}
