//! Play-phase frame update
//!
//! One fixed-order pass: player commands, spawning, movement and core
//! impacts, the death sweep, the wave-clear check, node fire, timers and
//! transient pruning.

use glam::Vec2;

use super::events::GameEvent;
use super::state::{GameState, NodeVariant};
use super::{abilities, combat, wave};
use crate::error::Rejection;

/// Play-phase commands for one frame
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickInput {
    /// Switch the node variant used for placement
    pub select: Option<NodeVariant>,
    /// World-space click that is not over a HUD element
    pub click: Option<Vec2>,
    /// Spend a Pulse charge
    pub discharge: bool,
    /// Begin the next wave
    pub start_wave: bool,
}

/// Advance the play phase by `dt` seconds.
///
/// Returns every command rejected this frame. Rejections never change state.
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) -> Vec<Rejection> {
    let mut rejected = Vec::new();
    let mut check = |result: Result<(), Rejection>| {
        if let Err(reason) = result {
            log::debug!("Rejected: {}", reason);
            rejected.push(reason);
        }
    };

    if let Some(variant) = input.select {
        check(select_variant(state, variant));
    }
    if let Some(pos) = input.click {
        // A pickup under the pointer takes the click
        if combat::collect_pickup_at(state, pos).is_none() {
            check(combat::place_node(state, pos).map(|_| ()));
        }
    }
    if input.discharge {
        check(combat::discharge_pulse(state).map(|_| ()));
    }
    if input.start_wave {
        check(wave::start_wave(state).map(|_| ()));
    }

    wave::update_spawner(state, dt);
    combat::advance_enemies(state, dt);
    combat::resolve_deaths(state);
    wave::check_wave_clear(state);
    combat::fire_nodes(state, dt);
    abilities::update(state, dt);
    update_transients(state, dt);

    state.time += dt;
    rejected
}

/// Choose the variant for future placements
pub fn select_variant(state: &mut GameState, variant: NodeVariant) -> Result<(), Rejection> {
    if !state.run.is_unlocked(variant) {
        return Err(Rejection::VariantLocked);
    }
    state.run.selected = variant;
    Ok(())
}

/// Count down beams, pickups and notifications and drop the expired ones
fn update_transients(state: &mut GameState, dt: f32) {
    for beam in &mut state.beams {
        beam.lifetime -= dt;
    }
    state.beams.retain(|b| b.lifetime > 0.0);

    let spin = state.tuning.abilities.pickup_spin;
    let wave_active = state.run.wave_active;
    for pickup in state.pickups.iter_mut().filter(|p| p.alive) {
        pickup.rotation = (pickup.rotation + spin * dt) % 360.0;
        if wave_active {
            pickup.ttl -= dt;
            if pickup.ttl <= 0.0 {
                pickup.alive = false;
                state.events.push(GameEvent::PickupExpired { kind: pickup.kind });
            }
        }
    }
    state.pickups.retain(|p| p.alive);

    for notice in &mut state.notices {
        notice.timer -= dt;
    }
    state.notices.retain(|n| n.timer > 0.0);
}
