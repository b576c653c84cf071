//! Game state and core simulation types
//!
//! Everything one run owns: the run scalars, the entity registries and the
//! global ability timers. Registries are plain vectors; entities removed by
//! game rules are flagged first and compacted in a single pass afterwards.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::abilities::GlobalTimers;
use super::events::GameEvent;
use crate::tuning::{BossTuning, SplitTuning, Tuning};

/// Defense node variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum NodeVariant {
    #[default]
    Standard,
    Cryo,
    Tesla,
}

impl NodeVariant {
    pub const ALL: [NodeVariant; 3] = [NodeVariant::Standard, NodeVariant::Cryo, NodeVariant::Tesla];

    pub fn label(&self) -> &'static str {
        match self {
            NodeVariant::Standard => "STANDARD",
            NodeVariant::Cryo => "CRYO-SLOW",
            NodeVariant::Tesla => "TESLA-CHAIN",
        }
    }
}

/// Pickup effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PickupKind {
    Emp,
    Overdrive,
    Heal,
}

impl PickupKind {
    pub const ALL: [PickupKind; 3] = [PickupKind::Emp, PickupKind::Overdrive, PickupKind::Heal];
}

/// A hostile shape heading for the core
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    pub pos: Vec2,
    pub speed: f32,
    /// Polygon side count; doubles as the reward tier
    pub sides: u32,
    pub health: f32,
    pub max_health: f32,
    /// Cleared exactly once when health reaches zero; removal happens in the death sweep
    pub alive: bool,
    pub radius: f32,
    /// Seconds of slow remaining
    pub slow_timer: f32,
}

impl Enemy {
    pub fn new(id: u32, pos: Vec2, sides: u32, radius: f32, speed: f32, health: f32) -> Self {
        Self {
            id,
            pos,
            speed,
            sides,
            health,
            max_health: health,
            alive: true,
            radius,
            slow_timer: 0.0,
        }
    }

    /// Apply damage, clamping health at zero.
    ///
    /// Returns true only on the hit that kills the enemy.
    pub fn apply_damage(&mut self, amount: f32) -> bool {
        if !self.alive {
            return false;
        }
        self.health = (self.health - amount).max(0.0);
        if self.health <= 0.0 {
            self.alive = false;
            return true;
        }
        false
    }

    pub fn health_ratio(&self) -> f32 {
        if self.max_health > 0.0 {
            self.health / self.max_health
        } else {
            0.0
        }
    }

    pub fn is_slowed(&self) -> bool {
        self.slow_timer > 0.0
    }

    pub fn is_boss(&self, boss: &BossTuning) -> bool {
        self.sides >= boss.sides
    }

    /// Large enough to break into offspring on death
    pub fn splits(&self, split: &SplitTuning) -> bool {
        self.sides >= split.min_sides && self.radius > split.min_radius
    }
}

/// A player-placed defender (lives for one wave)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefenseNode {
    pub id: u32,
    pub pos: Vec2,
    /// Seconds since the last shot
    pub cooldown: f32,
    pub variant: NodeVariant,
}

/// Visual record of a hit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Beam {
    pub start: Vec2,
    pub end: Vec2,
    pub lifetime: f32,
    pub max_lifetime: f32,
    pub variant: NodeVariant,
}

impl Beam {
    pub fn new(start: Vec2, end: Vec2, lifetime: f32, variant: NodeVariant) -> Self {
        Self {
            start,
            end,
            lifetime,
            max_lifetime: lifetime,
            variant,
        }
    }
}

/// A timed bonus dropped by a dying enemy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pickup {
    pub id: u32,
    pub kind: PickupKind,
    pub pos: Vec2,
    /// Seconds left; only counts down while a wave is active
    pub ttl: f32,
    pub alive: bool,
    /// Cosmetic spin (degrees)
    pub rotation: f32,
}

/// Semantic color of a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tone {
    Info,
    Ability,
    Reward,
    Repair,
    Danger,
}

/// A short-lived status message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    pub text: String,
    pub timer: f32,
    pub duration: f32,
    pub tone: Tone,
}

impl Notification {
    pub fn new(text: impl Into<String>, duration: f32, tone: Tone) -> Self {
        Self {
            text: text.into(),
            timer: duration,
            duration,
            tone,
        }
    }
}

/// Scalars that persist for the length of one run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunState {
    pub core_health: i32,
    pub max_core_health: i32,
    pub currency: u32,
    pub score: u64,
    /// Current wave (0 before the first wave starts)
    pub wave: u32,
    pub enemies_to_spawn: u32,
    pub wave_active: bool,
    pub boss_pending: bool,
    /// Node slot capacity
    pub max_nodes: u32,
    /// Base seconds between shots
    pub fire_interval: f32,
    pub node_range: f32,
    pub pulse_charges: u32,
    pub selected: NodeVariant,
    pub cryo_unlocked: bool,
    pub tesla_unlocked: bool,
}

impl RunState {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            core_health: tuning.core.max_health,
            max_core_health: tuning.core.max_health,
            currency: 0,
            score: 0,
            wave: 0,
            enemies_to_spawn: 0,
            wave_active: false,
            boss_pending: false,
            max_nodes: tuning.nodes.starting_slots,
            fire_interval: tuning.nodes.base_interval,
            node_range: tuning.nodes.range,
            pulse_charges: 0,
            selected: NodeVariant::Standard,
            cryo_unlocked: false,
            tesla_unlocked: false,
        }
    }

    pub fn is_unlocked(&self, variant: NodeVariant) -> bool {
        match variant {
            NodeVariant::Standard => true,
            NodeVariant::Cryo => self.cryo_unlocked,
            NodeVariant::Tesla => self.tesla_unlocked,
        }
    }
}

/// Complete simulation state for one run
#[derive(Debug, Clone)]
pub struct GameState {
    pub tuning: Tuning,
    pub run: RunState,
    pub timers: GlobalTimers,
    pub enemies: Vec<Enemy>,
    pub nodes: Vec<DefenseNode>,
    pub beams: Vec<Beam>,
    pub pickups: Vec<Pickup>,
    /// Visible notifications, oldest first
    pub notices: Vec<Notification>,
    /// Notifications held back until the player leaves the armory
    pub outbox: Vec<Notification>,
    /// Presentation events raised since the last snapshot
    pub events: Vec<GameEvent>,
    /// Seconds since the last spawn
    pub spawn_timer: f32,
    /// Seconds of unpaused play this run
    pub time: f32,
    rng: Pcg32,
    next_id: u32,
}

impl GameState {
    /// Create a fresh run with the given seed and balance table
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        Self {
            run: RunState::new(&tuning),
            tuning,
            timers: GlobalTimers::default(),
            enemies: Vec::new(),
            nodes: Vec::new(),
            beams: Vec::new(),
            pickups: Vec::new(),
            notices: Vec::new(),
            outbox: Vec::new(),
            events: Vec::new(),
            spawn_timer: 0.0,
            time: 0.0,
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
        }
    }

    /// Return every run scalar and registry to its starting value.
    ///
    /// The RNG keeps its stream so consecutive runs differ.
    pub fn reset(&mut self) {
        self.run = RunState::new(&self.tuning);
        self.timers = GlobalTimers::default();
        self.enemies.clear();
        self.nodes.clear();
        self.beams.clear();
        self.pickups.clear();
        self.notices.clear();
        self.outbox.clear();
        self.events.clear();
        self.spawn_timer = 0.0;
        self.time = 0.0;
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn rng(&mut self) -> &mut Pcg32 {
        &mut self.rng
    }

    /// Show a notification now
    pub fn notify(&mut self, text: impl Into<String>, duration: f32, tone: Tone) {
        self.notices.push(Notification::new(text, duration, tone));
    }

    /// Hold a notification until the outbox is flushed
    pub fn defer_notice(&mut self, text: impl Into<String>, duration: f32, tone: Tone) {
        self.outbox.push(Notification::new(text, duration, tone));
    }

    /// Move deferred notifications to the visible list, preserving order
    pub fn flush_outbox(&mut self) {
        self.notices.append(&mut self.outbox);
    }

    pub fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Between waves with the field clear: nodes may be bought and a wave started
    pub fn in_build_phase(&self) -> bool {
        !self.run.wave_active && self.enemies.is_empty()
    }

    /// Live enemies plus everything still queued
    pub fn threats_remaining(&self) -> u32 {
        let live = self.enemies.iter().filter(|e| e.alive).count() as u32;
        live + self.run.enemies_to_spawn + u32::from(self.run.boss_pending)
    }

    pub fn core_destroyed(&self) -> bool {
        self.run.core_health <= 0
    }
}
