//! Events emitted by the simulation for audio and visual feedback.
//!
//! The presentation layer may map these to sounds or effects; the simulation
//! never waits for an acknowledgment.

use serde::Serialize;

use super::economy::Upgrade;
use super::state::{NodeVariant, PickupKind};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    WaveStarted { wave: u32, quota: u32 },
    WaveCleared { wave: u32 },
    BossSpawned { wave: u32 },
    EnemySpawned { sides: u32 },
    EnemyDestroyed { sides: u32, currency: u32 },
    /// A large enemy broke into `count` offspring
    EnemySplit { count: u32 },
    CoreDamaged { amount: i32, remaining: i32 },
    ShotFired { variant: NodeVariant },
    /// Tesla secondary hit
    ChainArc,
    PulseDischarged { hits: u32 },
    PickupDropped { kind: PickupKind },
    PickupCollected { kind: PickupKind },
    PickupExpired { kind: PickupKind },
    EmpExpired,
    OverdriveExpired,
    NodePlaced { variant: NodeVariant },
    Purchased { upgrade: Upgrade, cost: u32 },
    VariantUnlocked { variant: NodeVariant },
    GameOver { score: u64, wave: u32 },
}
