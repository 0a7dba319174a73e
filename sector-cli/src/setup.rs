//! Shared game inputs: catalog, config and board layout
//!
//! Level 4 - Configuration

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use sector_core::{BoardLayout, Catalog, GameConfig};

#[derive(Args, Clone, Debug, Default)]
pub struct SourceArgs {
    /// Entity catalog JSON file (defaults to the built-in catalog)
    #[arg(long, value_name = "FILE")]
    pub catalog: Option<PathBuf>,

    /// Game configuration JSON file
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Board layout JSON file (defaults to a hexagon of config.board_radius)
    #[arg(long, value_name = "FILE")]
    pub layout: Option<PathBuf>,
}

/// Everything needed to start a game
#[derive(Clone, Debug)]
pub struct GameInputs {
    pub catalog: Catalog,
    pub config: GameConfig,
    pub layout: BoardLayout,
}

impl SourceArgs {
    pub fn load(&self) -> Result<GameInputs> {
        let catalog = match &self.catalog {
            Some(path) => Catalog::load(path)
                .with_context(|| format!("Failed to load catalog: {}", path.display()))?,
            None => Catalog::builtin().context("Built-in catalog is invalid")?,
        };

        let config = match &self.config {
            Some(path) => GameConfig::load(path)
                .with_context(|| format!("Failed to load config: {}", path.display()))?,
            None => GameConfig::default(),
        };

        let layout = match &self.layout {
            Some(path) => BoardLayout::load(path)
                .with_context(|| format!("Failed to load layout: {}", path.display()))?,
            None => BoardLayout::hexagon(config.board_radius, config.hex_width),
        };

        tracing::debug!(
            "loaded {} archetypes, {} cells",
            catalog.entities().len(),
            layout.cells.len()
        );

        Ok(GameInputs {
            catalog,
            config,
            layout,
        })
    }
}

/// Create RNG from seed or random
pub fn create_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(s) => ChaCha8Rng::seed_from_u64(s),
        None => ChaCha8Rng::from_entropy(),
    }
}
