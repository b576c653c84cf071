//! Global timed effects: EMP lockdown, Overdrive and shockwave cosmetics.
//!
//! Each timer is a named countdown. `Countdown::tick` reports the frame it
//! crosses zero, and `update` owns the single expiry path for each effect.

use serde::{Deserialize, Serialize};

use super::events::GameEvent;
use super::state::{GameState, PickupKind, Tone};
use crate::tuning::AbilityTuning;

/// A duration counting down to zero
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Countdown {
    remaining: f32,
    duration: f32,
}

impl Countdown {
    /// (Re)start at the full duration
    pub fn start(&mut self, duration: f32) {
        self.remaining = duration;
        self.duration = duration;
    }

    pub fn is_active(&self) -> bool {
        self.remaining > 0.0
    }

    /// Fraction of the duration left, 0 when idle
    pub fn ratio(&self) -> f32 {
        if self.duration > 0.0 {
            (self.remaining / self.duration).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    /// Count down by `dt`. Returns true on the tick the timer expires.
    pub fn tick(&mut self, dt: f32) -> bool {
        if self.remaining <= 0.0 {
            return false;
        }
        self.remaining -= dt;
        if self.remaining <= 0.0 {
            self.remaining = 0.0;
            return true;
        }
        false
    }
}

/// Expanding ring drawn when an area effect goes off (cosmetic only)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Shockwave {
    pub radius: f32,
}

impl Shockwave {
    const START_RADIUS: f32 = 10.0;

    pub fn trigger(&mut self) {
        self.radius = Self::START_RADIUS;
    }

    pub fn is_active(&self) -> bool {
        self.radius > 0.0
    }

    pub fn tick(&mut self, dt: f32, speed: f32, max_radius: f32) {
        if self.radius > 0.0 {
            self.radius += speed * dt;
            if self.radius > max_radius {
                self.radius = 0.0;
            }
        }
    }
}

/// Process-wide timers for one run
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GlobalTimers {
    pub emp: Countdown,
    pub overdrive: Countdown,
    pub emp_wave: Shockwave,
    pub pulse_wave: Shockwave,
}

impl GlobalTimers {
    /// EMP freezes enemy movement (nodes keep firing)
    pub fn movement_locked(&self) -> bool {
        self.emp.is_active()
    }

    pub fn overdrive_active(&self) -> bool {
        self.overdrive.is_active()
    }

    pub fn trigger_emp(&mut self, tuning: &AbilityTuning) {
        self.emp.start(tuning.emp_duration);
        self.emp_wave.trigger();
    }

    pub fn trigger_overdrive(&mut self, tuning: &AbilityTuning) {
        self.overdrive.start(tuning.overdrive_duration);
    }
}

/// Apply a collected pickup's effect
pub fn apply_pickup(state: &mut GameState, kind: PickupKind) {
    match kind {
        PickupKind::Emp => {
            state.timers.trigger_emp(&state.tuning.abilities);
            state.notify("SYSTEM EMP ACTIVATED", 2.0, Tone::Ability);
        }
        PickupKind::Overdrive => {
            state.timers.trigger_overdrive(&state.tuning.abilities);
            state.notify("LASER OVERDRIVE ONLINE", 2.0, Tone::Ability);
        }
        PickupKind::Heal => {
            let run = &mut state.run;
            run.core_health = (run.core_health + state.tuning.core.heal_pickup).min(run.max_core_health);
            state.notify("INTEGRITY RESTORED", 2.0, Tone::Repair);
        }
    }
    state.emit(GameEvent::PickupCollected { kind });
}

/// Advance every global timer by `dt`
pub fn update(state: &mut GameState, dt: f32) {
    let tuning = &state.tuning.abilities;
    let timers = &mut state.timers;
    timers
        .emp_wave
        .tick(dt, tuning.emp_wave_speed, tuning.emp_wave_max);
    timers
        .pulse_wave
        .tick(dt, tuning.pulse_wave_speed, tuning.pulse_wave_max);

    if timers.emp.tick(dt) {
        log::debug!("EMP lockdown expired");
        state.events.push(GameEvent::EmpExpired);
    }
    if timers.overdrive.tick(dt) {
        log::debug!("Overdrive expired");
        state.events.push(GameEvent::OverdriveExpired);
    }
}
