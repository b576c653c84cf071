//! Read-only view of one frame, handed to the renderer.
//!
//! Building a snapshot never modifies the simulation apart from draining the
//! event queue the caller passes in.

use glam::Vec2;
use serde::Serialize;

use super::economy::{self, Upgrade};
use super::events::GameEvent;
use super::state::{DefenseNode, GameState, NodeVariant, Pickup, RunState, Tone};
use crate::game::Screen;
use crate::leaderboard::ScoreEntry;

/// Everything the presentation layer needs for one frame
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub screen: Screen,
    pub time: f32,
    pub run: RunState,
    pub prices: Vec<PriceView>,
    pub timers: TimerView,
    pub enemies: Vec<EnemyView>,
    pub nodes: Vec<DefenseNode>,
    pub beams: Vec<BeamView>,
    pub pickups: Vec<Pickup>,
    pub notices: Vec<NoticeView>,
    pub threats_remaining: u32,
    pub build_phase: bool,
    /// Name typed on the game over screen so far
    pub name_entry: String,
    pub leaderboard: Vec<ScoreEntry>,
    /// Rank (1-based) the current score would take on the board
    pub potential_rank: Option<usize>,
    pub events: Vec<GameEvent>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PriceView {
    pub upgrade: Upgrade,
    pub cost: u32,
    pub affordable: bool,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct TimerView {
    pub emp: f32,
    pub overdrive: f32,
    pub emp_wave_radius: f32,
    pub pulse_wave_radius: f32,
}

#[derive(Debug, Clone, Serialize)]
pub struct EnemyView {
    pub id: u32,
    pub pos: Vec2,
    pub sides: u32,
    pub radius: f32,
    pub health_ratio: f32,
    pub slowed: bool,
    pub boss: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct BeamView {
    pub start: Vec2,
    pub end: Vec2,
    /// Fade factor in [0, 1]
    pub alpha: f32,
    pub variant: NodeVariant,
}

#[derive(Debug, Clone, Serialize)]
pub struct NoticeView {
    pub text: String,
    pub tone: Tone,
    pub alpha: f32,
}

/// Screen-level data that lives outside the simulation
pub struct Overlay<'a> {
    pub screen: Screen,
    pub name_entry: &'a str,
    pub leaderboard: &'a [ScoreEntry],
    pub potential_rank: Option<usize>,
}

/// Build a frame snapshot, taking ownership of the pending events
pub fn build_snapshot(state: &GameState, overlay: Overlay<'_>, events: Vec<GameEvent>) -> Snapshot {
    Snapshot {
        screen: overlay.screen,
        time: state.time,
        run: state.run.clone(),
        prices: build_prices(state),
        timers: TimerView {
            emp: state.timers.emp.ratio(),
            overdrive: state.timers.overdrive.ratio(),
            emp_wave_radius: state.timers.emp_wave.radius,
            pulse_wave_radius: state.timers.pulse_wave.radius,
        },
        enemies: build_enemies(state),
        nodes: state.nodes.clone(),
        beams: state
            .beams
            .iter()
            .map(|b| BeamView {
                start: b.start,
                end: b.end,
                alpha: fade(b.lifetime, b.max_lifetime),
                variant: b.variant,
            })
            .collect(),
        pickups: state.pickups.clone(),
        notices: state
            .notices
            .iter()
            .map(|n| NoticeView {
                text: n.text.clone(),
                tone: n.tone,
                alpha: fade(n.timer, n.duration),
            })
            .collect(),
        threats_remaining: state.threats_remaining(),
        build_phase: state.in_build_phase(),
        name_entry: overlay.name_entry.to_string(),
        leaderboard: overlay.leaderboard.to_vec(),
        potential_rank: overlay.potential_rank,
        events,
    }
}

fn build_prices(state: &GameState) -> Vec<PriceView> {
    Upgrade::ALL
        .iter()
        .map(|&upgrade| {
            let cost = economy::cost(&state.run, &state.tuning, upgrade);
            PriceView {
                upgrade,
                cost,
                affordable: state.run.currency >= cost,
            }
        })
        .collect()
}

fn build_enemies(state: &GameState) -> Vec<EnemyView> {
    let boss = &state.tuning.enemies.boss;
    state
        .enemies
        .iter()
        .filter(|e| e.alive)
        .map(|e| EnemyView {
            id: e.id,
            pos: e.pos,
            sides: e.sides,
            radius: e.radius,
            health_ratio: e.health_ratio(),
            slowed: e.is_slowed(),
            boss: e.is_boss(boss),
        })
        .collect()
}

fn fade(remaining: f32, total: f32) -> f32 {
    if total > 0.0 {
        (remaining / total).clamp(0.0, 1.0)
    } else {
        0.0
    }
}
