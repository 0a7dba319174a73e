//! State transitions emitted for the presentation layer

use serde::Serialize;

use crate::fog::EffectOutcome;
use crate::hex::CellIndex;

/// One observable change. The core never touches visuals; an adapter
/// drains these and animates.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub enum GameEvent {
    /// Player begins moving; resolution waits for `Game::complete_move`
    MoveStarted { seq: u64, from: Option<CellIndex>, to: CellIndex },
    CellRevealed { cell: CellIndex },
    SafeHex { cell: CellIndex },
    EnemyDefeated {
        cell: CellIndex,
        entity_id: String,
        shields_lost: u32,
        parts_gained: u32,
    },
    ShieldSurgeCollected { amount: u32 },
    Alert { message: String },
    ChainedEffect { trigger: String, outcome: EffectOutcome },
    PlayerDestroyed { cell: CellIndex, entity_id: String, attack: u32 },
    SectorCleared,
    Recharged { level: u32, recharge_count: usize },
    ShieldSurgeUsed { remaining: u32 },
    /// Pending moves discarded after the game ended
    QueueDrained { dropped: usize },
}
