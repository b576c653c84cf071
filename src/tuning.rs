//! Data-driven game balance
//!
//! Every gameplay constant lives here so a run can be re-balanced from a JSON
//! file without recompiling. Missing fields fall back to the defaults below.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::error::TuningError;
use crate::sim::state::NodeVariant;

/// Complete balance table
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub core: CoreTuning,
    pub waves: WaveTuning,
    pub enemies: EnemyTuning,
    pub nodes: NodeTuning,
    pub abilities: AbilityTuning,
    pub economy: EconomyTuning,
}

impl Tuning {
    /// Parse a tuning table from JSON text
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a tuning table from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| TuningError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let tuning = Self::from_json(&text)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }
}

/// The defended core
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoreTuning {
    pub position: Vec2,
    /// Enemies closer than this hit the core
    pub radius: f32,
    /// Nodes may not be placed closer than this
    pub exclusion_radius: f32,
    pub max_health: i32,
    /// Health restored by a Heal pickup
    pub heal_pickup: i32,
}

impl Default for CoreTuning {
    fn default() -> Self {
        Self {
            position: Vec2::new(SCREEN_WIDTH / 2.0, SCREEN_HEIGHT / 2.0),
            radius: 50.0,
            exclusion_radius: 85.0,
            max_health: 20,
            heal_pickup: 3,
        }
    }
}

/// Spawn cadence and wave sizing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaveTuning {
    /// Distance from the core at which enemies appear
    pub spawn_radius: f32,
    pub base_quota: u32,
    pub quota_per_wave: u32,
    pub spawn_interval: f32,
    pub spawn_interval_per_wave: f32,
    pub min_spawn_interval: f32,
    pub min_sides: u32,
    pub max_sides: u32,
    /// Every n-th wave ends with a boss
    pub boss_every: u32,
    /// Delay after the last ordinary spawn before the boss appears
    pub boss_delay: f32,
}

impl Default for WaveTuning {
    fn default() -> Self {
        Self {
            spawn_radius: 850.0,
            base_quota: 7,
            quota_per_wave: 5,
            spawn_interval: 1.25,
            spawn_interval_per_wave: 0.06,
            min_spawn_interval: 0.15,
            min_sides: 3,
            max_sides: 10,
            boss_every: 10,
            boss_delay: 1.8,
        }
    }
}

/// Enemy stats, rewards and splitting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyTuning {
    pub radius: f32,
    pub base_speed: f32,
    pub speed_per_side: f32,
    pub speed_growth_per_wave: f32,
    pub max_speed_multiplier: f32,
    pub health_per_side: f32,
    /// Core damage dealt by an ordinary enemy
    pub contact_damage: i32,
    /// Movement multiplier while slowed
    pub slow_factor: f32,
    pub currency_per_side: u32,
    pub currency_bonus: u32,
    pub score_per_health: f32,
    /// Chance in [0, 1] that a death drops a pickup
    pub pickup_chance: f64,
    pub boss: BossTuning,
    pub split: SplitTuning,
}

impl Default for EnemyTuning {
    fn default() -> Self {
        Self {
            radius: 22.0,
            base_speed: 180.0,
            speed_per_side: 10.0,
            speed_growth_per_wave: 0.035,
            max_speed_multiplier: 1.6,
            health_per_side: 1.0,
            contact_damage: 1,
            slow_factor: 0.4,
            currency_per_side: 14,
            currency_bonus: 20,
            score_per_health: 100.0,
            pickup_chance: 0.2,
            boss: BossTuning::default(),
            split: SplitTuning::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BossTuning {
    pub sides: u32,
    pub radius: f32,
    pub speed: f32,
    pub base_health: f32,
    pub health_per_wave: f32,
    pub contact_damage: i32,
}

impl Default for BossTuning {
    fn default() -> Self {
        Self {
            sides: 24,
            radius: 90.0,
            speed: 25.0,
            base_health: 180.0,
            health_per_wave: 25.0,
            contact_damage: 5,
        }
    }
}

/// Offspring produced when a large enemy dies
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SplitTuning {
    /// Parent needs at least this many sides...
    pub min_sides: u32,
    /// ...and a radius strictly above this
    pub min_radius: f32,
    pub count: u32,
    pub sides: u32,
    pub radius: f32,
    pub health: f32,
    pub speed: f32,
}

impl Default for SplitTuning {
    fn default() -> Self {
        Self {
            min_sides: 6,
            min_radius: 20.0,
            count: 2,
            sides: 3,
            radius: 16.0,
            health: 5.0,
            speed: 180.0,
        }
    }
}

/// Special behavior attached to a node variant
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum NodeEffect {
    None,
    /// Slow the target for `duration` seconds (refreshes)
    Slow { duration: f32 },
    /// Arc to the nearest other enemy within `radius` of the target
    Chain { radius: f32, damage: f32 },
}

/// Behavior parameters for one node variant
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NodeProfile {
    /// Multiplier on the base fire interval (ignored during Overdrive)
    pub interval_multiplier: f32,
    pub damage: f32,
    pub effect: NodeEffect,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeTuning {
    pub starting_slots: u32,
    pub base_interval: f32,
    pub range: f32,
    /// Fire interval for every variant while Overdrive is active
    pub overdrive_interval: f32,
    pub beam_lifetime: f32,
    pub standard: NodeProfile,
    pub cryo: NodeProfile,
    pub tesla: NodeProfile,
}

impl NodeTuning {
    /// Behavior table lookup
    pub fn profile(&self, variant: NodeVariant) -> &NodeProfile {
        match variant {
            NodeVariant::Standard => &self.standard,
            NodeVariant::Cryo => &self.cryo,
            NodeVariant::Tesla => &self.tesla,
        }
    }
}

impl Default for NodeTuning {
    fn default() -> Self {
        Self {
            starting_slots: 3,
            base_interval: 0.8,
            range: 230.0,
            overdrive_interval: 0.05,
            beam_lifetime: 0.07,
            standard: NodeProfile {
                interval_multiplier: 1.0,
                damage: 1.0,
                effect: NodeEffect::None,
            },
            cryo: NodeProfile {
                interval_multiplier: 1.5,
                damage: 0.5,
                effect: NodeEffect::Slow { duration: 1.5 },
            },
            tesla: NodeProfile {
                interval_multiplier: 1.5,
                damage: 1.0,
                effect: NodeEffect::Chain {
                    radius: 140.0,
                    damage: 0.5,
                },
            },
        }
    }
}

/// Pulse, pickups and timed effects
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AbilityTuning {
    pub pulse_radius: f32,
    /// Pulse damage is `(pulse_radius - distance) / pulse_divisor`
    pub pulse_divisor: f32,
    pub emp_duration: f32,
    pub overdrive_duration: f32,
    pub pickup_ttl: f32,
    pub pickup_collect_radius: f32,
    /// Cosmetic pickup spin (degrees per second)
    pub pickup_spin: f32,
    pub emp_wave_speed: f32,
    pub emp_wave_max: f32,
    pub pulse_wave_speed: f32,
    pub pulse_wave_max: f32,
}

impl Default for AbilityTuning {
    fn default() -> Self {
        Self {
            pulse_radius: 400.0,
            pulse_divisor: 10.0,
            emp_duration: 4.5,
            overdrive_duration: 7.0,
            pickup_ttl: 10.0,
            pickup_collect_radius: 45.0,
            pickup_spin: 120.0,
            emp_wave_speed: 1600.0,
            emp_wave_max: 2500.0,
            pulse_wave_speed: 2200.0,
            pulse_wave_max: 1500.0,
        }
    }
}

/// Armory prices and unlock thresholds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EconomyTuning {
    pub slot_base_cost: u32,
    pub slot_cost_step: u32,
    pub pulse_cost: u32,
    pub overclock_base_cost: u32,
    /// Overclock cost grows by this much per second shaved off the interval
    pub overclock_cost_scale: f32,
    pub overclock_factor: f32,
    pub repair_cost: u32,
    pub repair_amount: i32,
    /// Slot capacity at which Cryo nodes unlock
    pub cryo_unlock_slots: u32,
    /// Slot capacity at which Tesla nodes unlock
    pub tesla_unlock_slots: u32,
}

impl Default for EconomyTuning {
    fn default() -> Self {
        Self {
            slot_base_cost: 400,
            slot_cost_step: 350,
            pulse_cost: 300,
            overclock_base_cost: 600,
            overclock_cost_scale: 10_000.0,
            overclock_factor: 0.85,
            repair_cost: 450,
            repair_amount: 6,
            cryo_unlock_slots: 5,
            tesla_unlock_slots: 7,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "core": { "max_health": 5 } }"#).unwrap();
        assert_eq!(tuning.core.max_health, 5);
        assert_eq!(tuning.core.radius, 50.0);
        assert_eq!(tuning.waves, WaveTuning::default());
    }

    #[test]
    fn test_node_profiles_roundtrip_through_json() {
        let json = serde_json::to_string(&Tuning::default()).unwrap();
        let back = Tuning::from_json(&json).unwrap();
        assert_eq!(back, Tuning::default());
        assert_eq!(
            back.nodes.profile(NodeVariant::Tesla).effect,
            NodeEffect::Chain {
                radius: 140.0,
                damage: 0.5
            }
        );
    }

    #[test]
    fn test_bad_json_is_an_error() {
        assert!(matches!(
            Tuning::from_json("{ not json"),
            Err(TuningError::Parse(_))
        ));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let err = Tuning::load("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, TuningError::Io { .. }));
    }
}
