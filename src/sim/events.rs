//! Events emitted while the field advances one frame.
//!
//! Entities report what happened to them here instead of raising flags the
//! controller has to find and clear. The controller consumes the movement
//! events itself; the rest are handed to the caller for audio and UI.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::{EntityId, Owner};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum FieldEvent {
    /// A grid enemy touched a side border with its turn cooldown expired.
    BorderHit { id: EntityId },
    /// The boss left the right edge and must be replaced.
    BossExited { id: EntityId },
    /// A grid enemy dropped below the bottom of the field.
    BottomBreached { id: EntityId },
    /// A projectile left a shooter.
    ProjectileFired { owner: Owner, pos: Vec2 },
    /// The player was struck and survived.
    PlayerHit { lives_left: u8 },
    /// The player ran out of lives or was rammed.
    PlayerKilled,
    EnemyDestroyed { id: EntityId, points: u64 },
    BossDamaged { id: EntityId },
    BossDestroyed { id: EntityId, points: u64 },
    BlockDamaged { id: EntityId, health: u8 },
    BlockDestroyed { id: EntityId },
    /// A fresh swarm entered the field.
    WaveSpawned { count: usize },
    BossSpawned { id: EntityId },
}

impl FieldEvent {
    /// Events that end the round.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            FieldEvent::PlayerKilled | FieldEvent::BottomBreached { .. }
        )
    }
}
