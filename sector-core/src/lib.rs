//! Clear the Sector core - game engine
//!
//! This crate provides the engine core for the hex-grid salvage game:
//! - Hex geometry (cube coordinates, proximity fallback)
//! - Entity catalog and chained-effect trigger table
//! - Board generation with an injected RNG
//! - Fog of war, serialized movement and combat resolution
//! - Shield recharge ladder, shield surges and win/loss detection

pub mod hex;
pub mod layout;
pub mod catalog;
pub mod board;
pub mod generator;
pub mod fog;
pub mod movement;
pub mod combat;
pub mod economy;
pub mod outcome;
pub mod state;
pub mod view;
pub mod events;
pub mod config;
pub mod error;
pub mod game;

// Re-exports for convenient access
pub use hex::{CellIndex, Cube, HexGrid, DIRECTIONS};
pub use layout::{BoardLayout, CellGeometry};
pub use catalog::{Catalog, Entity, EntityRecord, Flag, Roles, Trigger, TriggerEffect};
pub use board::{Board, Cell};
pub use generator::{generate, Generated};
pub use movement::MoveTicket;
pub use economy::RechargeLadder;
pub use outcome::GameResult;
pub use state::{DamageMarker, GameState};
pub use view::{CellView, EntityDisplay, ShieldLevel, StatusView};
pub use events::GameEvent;
pub use config::GameConfig;
pub use error::{CatalogError, GenerationError};
pub use game::Game;
