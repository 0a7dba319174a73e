//! Read-only views handed to the presentation layer

use serde::Serialize;

use crate::catalog::Entity;
use crate::hex::CellIndex;
use crate::outcome::GameResult;
use crate::state::DamageMarker;

/// What the presentation shows for a revealed occupant
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct EntityDisplay {
    pub id: String,
    pub name: String,
    pub sprite: String,
    pub damage: u32,
}

impl From<&Entity> for EntityDisplay {
    fn from(entity: &Entity) -> Self {
        Self {
            id: entity.id.clone(),
            name: entity.name.clone(),
            sprite: entity.sprite.clone(),
            damage: entity.damage,
        }
    }
}

/// One cell as the player may see it
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CellView {
    pub index: CellIndex,
    pub revealed: bool,
    /// Present only once revealed
    pub entity: Option<EntityDisplay>,
    /// Neighbor damage sum, when visible
    pub hint: Option<u32>,
    pub annotation: Option<DamageMarker>,
    pub is_player: bool,
}

/// Shield readout band
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum ShieldLevel {
    Nominal,
    /// At or below half
    Warning,
    /// At or below a fifth
    Critical,
}

impl ShieldLevel {
    pub fn from_ratio(shields: u32, max_shields: u32) -> Self {
        if max_shields == 0 {
            return ShieldLevel::Critical;
        }
        let ratio = shields as f32 / max_shields as f32;
        if ratio <= 0.2 {
            ShieldLevel::Critical
        } else if ratio <= 0.5 {
            ShieldLevel::Warning
        } else {
            ShieldLevel::Nominal
        }
    }
}

/// Status bar contents
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct StatusView {
    pub shields: u32,
    pub max_shields: u32,
    pub parts: u32,
    /// None when the ladder is empty
    pub parts_needed_for_next_recharge: Option<u32>,
    pub shield_surge_inventory: u32,
    pub cleared_percent: f32,
    pub is_alive: bool,
    pub result: GameResult,
    pub shield_level: ShieldLevel,
}
