//! Combat resolver: enemy movement, core impacts, node fire, Pulse, placement
//! and the death sweep (rewards, splitting, pickup drops).

use glam::Vec2;
use rand::Rng;

use super::abilities;
use super::events::GameEvent;
use super::state::{Beam, DefenseNode, Enemy, GameState, NodeVariant, Pickup, PickupKind, Tone};
use crate::error::Rejection;
use crate::tuning::NodeEffect;
use crate::{distance, heading};

/// Move enemies toward the core and resolve core impacts.
///
/// An enemy inside the core radius damages the core and is removed at once,
/// even if it was killed earlier this frame (it earns no reward).
pub fn advance_enemies(state: &mut GameState, dt: f32) {
    let core = state.tuning.core.position;
    let slow_factor = state.tuning.enemies.slow_factor;

    if !state.timers.movement_locked() {
        for enemy in state.enemies.iter_mut().filter(|e| e.alive) {
            let mut speed = enemy.speed;
            if enemy.is_slowed() {
                speed *= slow_factor;
                enemy.slow_timer = (enemy.slow_timer - dt).max(0.0);
            }
            let angle = heading(enemy.pos, core);
            enemy.pos += Vec2::new(angle.cos(), angle.sin()) * speed * dt;
        }
    }

    let tuning = &state.tuning;
    let mut impacts = Vec::new();
    state.enemies.retain(|enemy| {
        if distance(enemy.pos, core) < tuning.core.radius {
            let damage = if enemy.is_boss(&tuning.enemies.boss) {
                tuning.enemies.boss.contact_damage
            } else {
                tuning.enemies.contact_damage
            };
            impacts.push(damage);
            false
        } else {
            true
        }
    });

    for damage in impacts {
        let run = &mut state.run;
        run.core_health = (run.core_health - damage).max(0);
        let remaining = run.core_health;
        log::debug!("Core hit for {} ({} left)", damage, remaining);
        state.emit(GameEvent::CoreDamaged {
            amount: damage,
            remaining,
        });
    }
}

/// Reward, split and remove every enemy marked dead
pub fn resolve_deaths(state: &mut GameState) {
    if state.enemies.iter().all(|e| e.alive) {
        return;
    }
    let (dead, alive): (Vec<Enemy>, Vec<Enemy>) =
        std::mem::take(&mut state.enemies).into_iter().partition(|e| !e.alive);
    state.enemies = alive;

    for enemy in dead {
        let rewards = &state.tuning.enemies;
        let currency = enemy.sides * rewards.currency_per_side + rewards.currency_bonus;
        state.run.currency += currency;
        state.run.score += (enemy.max_health * rewards.score_per_health) as u64;
        state.emit(GameEvent::EnemyDestroyed {
            sides: enemy.sides,
            currency,
        });

        let split = state.tuning.enemies.split.clone();
        if enemy.splits(&split) {
            for _ in 0..split.count {
                let id = state.next_entity_id();
                state.enemies.push(Enemy::new(
                    id,
                    enemy.pos,
                    split.sides,
                    split.radius,
                    split.speed,
                    split.health,
                ));
            }
            state.emit(GameEvent::EnemySplit { count: split.count });
        }

        let chance = state.tuning.enemies.pickup_chance.clamp(0.0, 1.0);
        if state.rng().random_bool(chance) {
            let kind = PickupKind::ALL[state.rng().random_range(0..PickupKind::ALL.len())];
            let id = state.next_entity_id();
            let ttl = state.tuning.abilities.pickup_ttl;
            state.pickups.push(Pickup {
                id,
                kind,
                pos: enemy.pos,
                ttl,
                alive: true,
                rotation: 0.0,
            });
            state.emit(GameEvent::PickupDropped { kind });
        }
    }
}

/// Nearest live enemy strictly within `range` of `from`.
///
/// The first enemy found wins exact ties. `exclude` skips one index.
pub fn find_target(enemies: &[Enemy], from: Vec2, range: f32, exclude: Option<usize>) -> Option<usize> {
    let mut best = None;
    let mut best_dist = range;
    for (i, enemy) in enemies.iter().enumerate() {
        if !enemy.alive || Some(i) == exclude {
            continue;
        }
        let d = distance(from, enemy.pos);
        if d < best_dist {
            best_dist = d;
            best = Some(i);
        }
    }
    best
}

/// Seconds between shots for a node variant right now.
///
/// Overdrive replaces the interval outright for every variant.
pub fn effective_interval(state: &GameState, variant: NodeVariant) -> f32 {
    let nodes = &state.tuning.nodes;
    if state.timers.overdrive_active() {
        nodes.overdrive_interval
    } else {
        state.run.fire_interval * nodes.profile(variant).interval_multiplier
    }
}

/// Advance node cooldowns and fire at targets in range
pub fn fire_nodes(state: &mut GameState, dt: f32) {
    let range = state.run.node_range;
    let beam_lifetime = state.tuning.nodes.beam_lifetime;
    let shared: &GameState = state;
    let intervals: Vec<f32> = shared
        .nodes
        .iter()
        .map(|n| effective_interval(shared, n.variant))
        .collect();

    let tuning = &state.tuning;
    for (node, interval) in state.nodes.iter_mut().zip(intervals) {
        node.cooldown += dt;
        if node.cooldown < interval {
            continue;
        }
        let Some(primary) = find_target(&state.enemies, node.pos, range, None) else {
            continue;
        };
        let profile = tuning.nodes.profile(node.variant);

        // Resolve the chain target before touching any enemy
        let secondary = match profile.effect {
            NodeEffect::Chain { radius, damage } => {
                find_target(&state.enemies, state.enemies[primary].pos, radius, Some(primary))
                    .map(|i| (i, damage))
            }
            _ => None,
        };

        let target = &mut state.enemies[primary];
        target.apply_damage(profile.damage);
        if let NodeEffect::Slow { duration } = profile.effect {
            target.slow_timer = duration;
        }
        let target_pos = target.pos;
        state
            .beams
            .push(Beam::new(node.pos, target_pos, beam_lifetime, node.variant));
        state.events.push(GameEvent::ShotFired {
            variant: node.variant,
        });

        if let Some((index, damage)) = secondary {
            let chained = &mut state.enemies[index];
            chained.apply_damage(damage);
            state
                .beams
                .push(Beam::new(target_pos, chained.pos, beam_lifetime, node.variant));
            state.events.push(GameEvent::ChainArc);
        }

        node.cooldown = 0.0;
    }
}

/// Spend one Pulse charge: radial falloff damage around the core
pub fn discharge_pulse(state: &mut GameState) -> Result<u32, Rejection> {
    if !state.run.wave_active {
        return Err(Rejection::WaveInactive);
    }
    if state.run.pulse_charges == 0 {
        return Err(Rejection::NoCharges);
    }
    state.run.pulse_charges -= 1;
    state.timers.pulse_wave.trigger();

    let core = state.tuning.core.position;
    let radius = state.tuning.abilities.pulse_radius;
    let divisor = state.tuning.abilities.pulse_divisor;
    let mut hits = 0;
    for enemy in state.enemies.iter_mut().filter(|e| e.alive) {
        let d = distance(core, enemy.pos);
        if d < radius {
            enemy.apply_damage((radius - d) / divisor);
            hits += 1;
        }
    }

    log::debug!("Pulse discharged, {} enemies hit", hits);
    state.notify("PULSE DISCHARGED", 2.5, Tone::Ability);
    state.emit(GameEvent::PulseDischarged { hits });
    Ok(hits)
}

/// Place a node of the selected variant at `pos`
pub fn place_node(state: &mut GameState, pos: Vec2) -> Result<u32, Rejection> {
    let run = &state.run;
    let variant = run.selected;
    if !run.is_unlocked(variant) {
        return Err(Rejection::VariantLocked);
    }
    if state.nodes.len() as u32 >= run.max_nodes {
        return Err(Rejection::SlotsFull {
            capacity: run.max_nodes,
        });
    }
    if distance(pos, state.tuning.core.position) <= state.tuning.core.exclusion_radius {
        return Err(Rejection::InsideExclusionZone);
    }

    let id = state.next_entity_id();
    state.nodes.push(DefenseNode {
        id,
        pos,
        cooldown: 0.0,
        variant,
    });
    state.emit(GameEvent::NodePlaced { variant });
    Ok(id)
}

/// Collect the first live pickup under `pos`, applying its effect
pub fn collect_pickup_at(state: &mut GameState, pos: Vec2) -> Option<PickupKind> {
    let radius = state.tuning.abilities.pickup_collect_radius;
    let pickup = state
        .pickups
        .iter_mut()
        .find(|p| p.alive && distance(pos, p.pos) < radius)?;
    pickup.alive = false;
    let kind = pickup.kind;
    abilities::apply_pickup(state, kind);
    Some(kind)
}
