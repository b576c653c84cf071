//! Wave director: spawn cadence, enemy generation, boss gating and wave clear.

use rand::Rng;

use super::events::GameEvent;
use super::state::{Enemy, GameState, Tone};
use crate::error::Rejection;
use crate::polar_to_cartesian;
use crate::tuning::{EnemyTuning, WaveTuning};

/// Seconds between ordinary spawns on `wave`
pub fn spawn_interval(wave: u32, tuning: &WaveTuning) -> f32 {
    (tuning.spawn_interval - wave as f32 * tuning.spawn_interval_per_wave)
        .max(tuning.min_spawn_interval)
}

/// Ordinary enemies spawned during `wave`
pub fn wave_quota(wave: u32, tuning: &WaveTuning) -> u32 {
    tuning.base_quota + wave * tuning.quota_per_wave
}

/// Inclusive side-count range for ordinary spawns on `wave`
pub fn sides_range(wave: u32, tuning: &WaveTuning) -> (u32, u32) {
    let max = tuning.max_sides.min(tuning.min_sides + wave / 2);
    (tuning.min_sides, max.max(tuning.min_sides))
}

/// Wave-based speed multiplier (capped)
pub fn speed_multiplier(wave: u32, tuning: &EnemyTuning) -> f32 {
    (1.0 + wave as f32 * tuning.speed_growth_per_wave).min(tuning.max_speed_multiplier)
}

/// Every `boss_every`-th wave ends with a boss
pub fn is_boss_wave(wave: u32, tuning: &WaveTuning) -> bool {
    tuning.boss_every > 0 && wave % tuning.boss_every == 0
}

/// Begin the next wave. Only allowed between waves.
pub fn start_wave(state: &mut GameState) -> Result<u32, Rejection> {
    if state.run.wave_active {
        return Err(Rejection::WaveInProgress);
    }
    let run = &mut state.run;
    run.wave += 1;
    run.wave_active = true;
    run.enemies_to_spawn = wave_quota(run.wave, &state.tuning.waves);
    run.boss_pending = is_boss_wave(run.wave, &state.tuning.waves);
    state.spawn_timer = 0.0;

    let (wave, quota) = (run.wave, run.enemies_to_spawn);
    log::info!(
        "Wave {} started: {} enemies{}",
        wave,
        quota,
        if state.run.boss_pending { " + boss" } else { "" }
    );
    state.emit(GameEvent::WaveStarted { wave, quota });
    Ok(wave)
}

/// Advance the spawn timer and materialize at most one enemy
pub fn update_spawner(state: &mut GameState, dt: f32) {
    if !state.run.wave_active {
        return;
    }
    state.spawn_timer += dt;

    let interval = spawn_interval(state.run.wave, &state.tuning.waves);
    let boss_delay = state.tuning.waves.boss_delay;
    if state.run.enemies_to_spawn > 0 {
        if state.spawn_timer > interval {
            spawn_enemy(state);
            state.run.enemies_to_spawn -= 1;
            state.spawn_timer = 0.0;
        }
    } else if state.run.boss_pending && state.spawn_timer > boss_delay {
        spawn_boss(state);
        state.run.boss_pending = false;
        state.spawn_timer = 0.0;
    }
}

/// Spawn one ordinary enemy on the spawn ring
pub fn spawn_enemy(state: &mut GameState) {
    let wave = state.run.wave;
    let (min_sides, max_sides) = sides_range(wave, &state.tuning.waves);
    let rng = state.rng();
    let angle = rng.random_range(0.0..std::f32::consts::TAU);
    let sides = rng.random_range(min_sides..=max_sides);

    let t = &state.tuning;
    let pos = polar_to_cartesian(t.core.position, t.waves.spawn_radius, angle);
    let speed = (t.enemies.base_speed - sides as f32 * t.enemies.speed_per_side).max(0.0)
        * speed_multiplier(wave, &t.enemies);
    let health = sides as f32 * t.enemies.health_per_side;
    let radius = t.enemies.radius;

    let id = state.next_entity_id();
    state
        .enemies
        .push(Enemy::new(id, pos, sides, radius, speed, health));
    state.emit(GameEvent::EnemySpawned { sides });
}

/// Spawn the wave boss on the spawn ring
pub fn spawn_boss(state: &mut GameState) {
    let angle = state.rng().random_range(0.0..std::f32::consts::TAU);
    let wave = state.run.wave;
    let t = &state.tuning;
    let boss = &t.enemies.boss;
    let pos = polar_to_cartesian(t.core.position, t.waves.spawn_radius, angle);
    let health = boss.base_health + wave as f32 * boss.health_per_wave;
    let (sides, radius, speed) = (boss.sides, boss.radius, boss.speed);

    let id = state.next_entity_id();
    state
        .enemies
        .push(Enemy::new(id, pos, sides, radius, speed, health));
    log::info!("Boss spawned on wave {} with {} health", wave, health);
    state.notify("BOSS DETECTED", 3.0, Tone::Danger);
    state.emit(GameEvent::BossSpawned { wave });
}

/// End the wave once nothing is queued and the field is empty.
///
/// Clearing destroys every node; they are a per-wave investment.
pub fn check_wave_clear(state: &mut GameState) -> bool {
    let run = &state.run;
    if !run.wave_active || run.enemies_to_spawn > 0 || run.boss_pending || !state.enemies.is_empty()
    {
        return false;
    }
    state.run.wave_active = false;
    state.nodes.clear();
    let wave = state.run.wave;
    log::info!("Wave {} cleared", wave);
    state.notify("WAVE CLEAR", 2.0, Tone::Info);
    state.emit(GameEvent::WaveCleared { wave });
    true
}
