//! Armory purchases and their cost curves.

use serde::{Deserialize, Serialize};

use super::events::GameEvent;
use super::state::{GameState, NodeVariant, RunState, Tone};
use crate::error::Rejection;
use crate::tuning::Tuning;

/// Items sold on the upgrade screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Upgrade {
    NodeSlot,
    PulseCharge,
    Overclock,
    CoreRepair,
}

impl Upgrade {
    pub const ALL: [Upgrade; 4] = [
        Upgrade::NodeSlot,
        Upgrade::PulseCharge,
        Upgrade::Overclock,
        Upgrade::CoreRepair,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Upgrade::NodeSlot => "NODE SLOT",
            Upgrade::PulseCharge => "PULSE CHARGE",
            Upgrade::Overclock => "OVERCLOCK",
            Upgrade::CoreRepair => "CORE REPAIR",
        }
    }
}

/// Current price of `upgrade` for this run
pub fn cost(run: &RunState, tuning: &Tuning, upgrade: Upgrade) -> u32 {
    let eco = &tuning.economy;
    match upgrade {
        Upgrade::NodeSlot => {
            let extra = run.max_nodes.saturating_sub(tuning.nodes.starting_slots);
            eco.slot_base_cost + extra * eco.slot_cost_step
        }
        Upgrade::PulseCharge => eco.pulse_cost,
        Upgrade::Overclock => {
            let shaved = (tuning.nodes.base_interval - run.fire_interval).max(0.0);
            // Truncates toward zero
            eco.overclock_base_cost + (shaved * eco.overclock_cost_scale) as u32
        }
        Upgrade::CoreRepair => eco.repair_cost,
    }
}

/// Buy `upgrade`, returning the amount spent.
///
/// Either every effect applies or nothing changes.
pub fn purchase(state: &mut GameState, upgrade: Upgrade) -> Result<u32, Rejection> {
    let price = cost(&state.run, &state.tuning, upgrade);
    if upgrade == Upgrade::CoreRepair && state.run.core_health >= state.run.max_core_health {
        return Err(Rejection::CoreAtFullHealth);
    }
    if state.run.currency < price {
        return Err(Rejection::InsufficientFunds {
            cost: price,
            available: state.run.currency,
        });
    }

    state.run.currency -= price;
    match upgrade {
        Upgrade::NodeSlot => {
            state.run.max_nodes += 1;
            unlock_variants(state);
        }
        Upgrade::PulseCharge => state.run.pulse_charges += 1,
        Upgrade::Overclock => state.run.fire_interval *= state.tuning.economy.overclock_factor,
        Upgrade::CoreRepair => {
            let run = &mut state.run;
            run.core_health =
                (run.core_health + state.tuning.economy.repair_amount).min(run.max_core_health);
        }
    }

    log::debug!("Purchased {:?} for {}", upgrade, price);
    state.emit(GameEvent::Purchased {
        upgrade,
        cost: price,
    });
    Ok(price)
}

/// Record variant unlocks for the new slot capacity; the notice waits in the outbox
fn unlock_variants(state: &mut GameState) {
    let capacity = state.run.max_nodes;
    let eco = &state.tuning.economy;
    let unlocks = [
        (NodeVariant::Cryo, eco.cryo_unlock_slots, state.run.cryo_unlocked),
        (NodeVariant::Tesla, eco.tesla_unlock_slots, state.run.tesla_unlocked),
    ];
    for (variant, threshold, already) in unlocks {
        if already || capacity < threshold {
            continue;
        }
        match variant {
            NodeVariant::Cryo => state.run.cryo_unlocked = true,
            NodeVariant::Tesla => state.run.tesla_unlocked = true,
            NodeVariant::Standard => {}
        }
        let key = NodeVariant::ALL
            .iter()
            .position(|v| *v == variant)
            .map_or(0, |i| i + 1);
        log::info!("{} nodes unlocked", variant.label());
        state.defer_notice(
            format!("{} NODES UNLOCKED [{}]", variant.label(), key),
            3.0,
            Tone::Reward,
        );
        state.emit(GameEvent::VariantUnlocked { variant });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rich_state() -> GameState {
        let mut state = GameState::new(2, Tuning::default());
        state.run.currency = 100_000;
        state
    }

    #[test]
    fn test_slot_cost_grows_with_capacity() {
        let mut state = rich_state();
        assert_eq!(cost(&state.run, &state.tuning, Upgrade::NodeSlot), 400);
        assert_eq!(purchase(&mut state, Upgrade::NodeSlot), Ok(400));
        assert_eq!(cost(&state.run, &state.tuning, Upgrade::NodeSlot), 750);
        assert_eq!(state.run.max_nodes, 4);
    }

    #[test]
    fn test_overclock_cost_tracks_interval() {
        let mut state = rich_state();
        assert_eq!(cost(&state.run, &state.tuning, Upgrade::Overclock), 600);
        purchase(&mut state, Upgrade::Overclock).unwrap();
        assert!((state.run.fire_interval - 0.68).abs() < 1e-6);
        assert_eq!(cost(&state.run, &state.tuning, Upgrade::Overclock), 1800);
    }

    #[test]
    fn test_overclock_cost_truncates() {
        let mut state = rich_state();
        for _ in 0..4 {
            purchase(&mut state, Upgrade::Overclock).unwrap();
        }
        assert!((state.run.fire_interval - 0.417605).abs() < 1e-5);
        // 600 + 3823.95
        assert_eq!(cost(&state.run, &state.tuning, Upgrade::Overclock), 4423);
    }

    #[test]
    fn test_insufficient_funds_changes_nothing() {
        let mut state = GameState::new(2, Tuning::default());
        state.run.currency = 299;
        let before = state.run.clone();
        assert_eq!(
            purchase(&mut state, Upgrade::PulseCharge),
            Err(Rejection::InsufficientFunds {
                cost: 300,
                available: 299
            })
        );
        assert_eq!(state.run, before);
        assert!(state.events.is_empty());
    }

    #[test]
    fn test_repair_rejected_at_full_health() {
        let mut state = rich_state();
        assert_eq!(
            purchase(&mut state, Upgrade::CoreRepair),
            Err(Rejection::CoreAtFullHealth)
        );
        state.run.core_health = 16;
        assert_eq!(purchase(&mut state, Upgrade::CoreRepair), Ok(450));
        assert_eq!(state.run.core_health, 20);
    }

    #[test]
    fn test_fifth_slot_unlocks_cryo_deferred() {
        let mut state = rich_state();
        purchase(&mut state, Upgrade::NodeSlot).unwrap();
        assert!(!state.run.cryo_unlocked);
        purchase(&mut state, Upgrade::NodeSlot).unwrap();
        assert!(state.run.cryo_unlocked);
        assert!(!state.run.tesla_unlocked);
        assert!(state.notices.is_empty());
        assert_eq!(state.outbox.len(), 1);
        assert_eq!(state.outbox[0].text, "CRYO-SLOW NODES UNLOCKED [2]");
        assert!(state.events.contains(&GameEvent::VariantUnlocked {
            variant: NodeVariant::Cryo
        }));
    }

    #[test]
    fn test_seventh_slot_unlocks_tesla_once() {
        let mut state = rich_state();
        for _ in 0..5 {
            purchase(&mut state, Upgrade::NodeSlot).unwrap();
        }
        assert_eq!(state.run.max_nodes, 8);
        assert!(state.run.tesla_unlocked);
        assert_eq!(state.outbox.len(), 2);
        assert_eq!(state.outbox[1].text, "TESLA-CHAIN NODES UNLOCKED [3]");
    }

    #[test]
    fn test_purchase_subtracts_exact_cost() {
        let mut state = rich_state();
        for upgrade in [Upgrade::NodeSlot, Upgrade::PulseCharge, Upgrade::Overclock] {
            let before = state.run.currency;
            let shown = cost(&state.run, &state.tuning, upgrade);
            assert_eq!(purchase(&mut state, upgrade), Ok(shown));
            assert_eq!(state.run.currency, before - shown);
        }
        assert_eq!(state.run.pulse_charges, 1);
    }
}
