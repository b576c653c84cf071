//! Vector Defense headless driver
//!
//! Runs the simulation with a scripted autopilot standing in for the player,
//! then logs a run summary. Useful for balance checks and smoke tests.

use std::path::PathBuf;

use clap::Parser;
use glam::Vec2;

use vector_defense::game::{Action, FrameInput};
use vector_defense::persistence::{FileStore, MemoryStore, RecordStore};
use vector_defense::sim::{GameEvent, NodeVariant, Snapshot, Upgrade};
use vector_defense::ui::{Layout, Rect};
use vector_defense::{Game, Screen, Tuning, distance, logging, polar_to_cartesian};

/// Headless wave defense simulation
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// RNG seed
    #[arg(long, default_value_t = 1)]
    seed: u64,

    /// Number of frames to simulate
    #[arg(long, default_value_t = 36_000)]
    frames: u64,

    /// Seconds per frame
    #[arg(long, default_value_t = 1.0 / 60.0)]
    dt: f32,

    /// Leaderboard file (kept in memory when omitted)
    #[arg(long)]
    scores: Option<PathBuf>,

    /// Tuning JSON file
    #[arg(long)]
    tuning: Option<PathBuf>,

    /// Name the autopilot enters on the game over screen
    #[arg(long, default_value = "AUTOPILOT")]
    name: String,

    /// Print the final snapshot as JSON
    #[arg(long)]
    json: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

/// Radius of the ring the autopilot builds on
const RING_RADIUS: f32 = 160.0;
/// Enemies this close to the core trigger a Pulse
const PANIC_RADIUS: f32 = 220.0;

/// Scripted stand-in for a player
struct Autopilot {
    name: String,
    /// Wave number during which the armory was last visited
    shopped_on_wave: Option<u32>,
    name_typed: bool,
}

impl Autopilot {
    fn new(name: String) -> Self {
        Self {
            name,
            shopped_on_wave: None,
            name_typed: false,
        }
    }

    fn next_input(&mut self, snap: &Snapshot, layout: &Layout) -> FrameInput {
        match snap.screen {
            Screen::Menu => FrameInput::action(Action::Confirm),
            Screen::Guide | Screen::Leaderboard => FrameInput::action(Action::Cancel),
            Screen::Paused => FrameInput::action(Action::Pause),
            Screen::Upgrade => self.shop(snap, layout),
            Screen::GameOver => {
                if self.name_typed {
                    self.name_typed = false;
                    self.shopped_on_wave = None;
                    FrameInput::action(Action::Confirm)
                } else {
                    self.name_typed = true;
                    FrameInput::typing(self.name.clone())
                }
            }
            Screen::Play if snap.build_phase => self.build(snap),
            Screen::Play => self.defend(snap),
        }
    }

    fn build(&mut self, snap: &Snapshot) -> FrameInput {
        let run = &snap.run;
        let best = NodeVariant::ALL
            .into_iter()
            .rev()
            .find(|v| run.is_unlocked(*v))
            .unwrap_or_default();
        if run.selected != best {
            let action = match best {
                NodeVariant::Standard => Action::SelectStandard,
                NodeVariant::Cryo => Action::SelectCryo,
                NodeVariant::Tesla => Action::SelectTesla,
            };
            return FrameInput::action(action);
        }

        if self.shopped_on_wave != Some(run.wave) && snap.prices.iter().any(|p| p.affordable) {
            self.shopped_on_wave = Some(run.wave);
            return FrameInput::action(Action::OpenUpgrades);
        }

        let placed = snap.nodes.len();
        if (placed as u32) < run.max_nodes {
            // Spread nodes evenly, alternating between two rings
            let angle = placed as f32 * std::f32::consts::TAU / run.max_nodes as f32;
            let radius = RING_RADIUS + (placed % 2) as f32 * 60.0;
            let core = Vec2::new(
                vector_defense::consts::SCREEN_WIDTH / 2.0,
                vector_defense::consts::SCREEN_HEIGHT / 2.0,
            );
            return FrameInput::click_at(polar_to_cartesian(core, radius, angle));
        }

        FrameInput::action(Action::StartWave)
    }

    fn defend(&self, snap: &Snapshot) -> FrameInput {
        if let Some(pickup) = snap.pickups.first() {
            return FrameInput::click_at(pickup.pos);
        }
        let core = Vec2::new(
            vector_defense::consts::SCREEN_WIDTH / 2.0,
            vector_defense::consts::SCREEN_HEIGHT / 2.0,
        );
        let crowded = snap
            .enemies
            .iter()
            .filter(|e| distance(e.pos, core) < PANIC_RADIUS)
            .count();
        if snap.run.pulse_charges > 0 && crowded >= 4 {
            return FrameInput::action(Action::Discharge);
        }
        FrameInput::default()
    }

    fn shop(&self, snap: &Snapshot, layout: &Layout) -> FrameInput {
        let run = &snap.run;
        let wanted = [
            (Upgrade::CoreRepair, run.core_health <= run.max_core_health - 6),
            (Upgrade::NodeSlot, true),
            (Upgrade::Overclock, true),
            (Upgrade::PulseCharge, run.pulse_charges < 2),
        ];
        for (upgrade, want) in wanted {
            let affordable = snap
                .prices
                .iter()
                .any(|p| p.upgrade == upgrade && p.affordable);
            if want && affordable {
                let index = Upgrade::ALL.iter().position(|u| *u == upgrade).unwrap_or(0);
                return FrameInput::click_at(center(&layout.upgrades[index]));
            }
        }
        FrameInput::action(Action::Confirm)
    }
}

fn center(rect: &Rect) -> Vec2 {
    Vec2::new(rect.x + rect.w / 2.0, rect.y + rect.h / 2.0)
}

/// Counters gathered from the event stream
#[derive(Debug, Default)]
struct Tally {
    waves_cleared: u32,
    kills: u32,
    bosses: u32,
    pickups: u32,
    pulses: u32,
    runs: u32,
    best_wave: u32,
    best_score: u64,
}

impl Tally {
    fn record(&mut self, event: &GameEvent) {
        match *event {
            GameEvent::WaveCleared { wave } => {
                self.waves_cleared += 1;
                self.best_wave = self.best_wave.max(wave);
            }
            GameEvent::EnemyDestroyed { .. } => self.kills += 1,
            GameEvent::BossSpawned { .. } => self.bosses += 1,
            GameEvent::PickupCollected { .. } => self.pickups += 1,
            GameEvent::PulseDischarged { .. } => self.pulses += 1,
            GameEvent::GameOver { score, wave } => {
                self.runs += 1;
                self.best_score = self.best_score.max(score);
                self.best_wave = self.best_wave.max(wave);
            }
            _ => {}
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    logging::init(args.verbose);

    let tuning = match &args.tuning {
        Some(path) => Tuning::load(path)?,
        None => Tuning::default(),
    };
    let store: Box<dyn RecordStore> = match &args.scores {
        Some(path) => Box::new(FileStore::new(path)),
        None => Box::new(MemoryStore::new()),
    };

    let mut game = Game::new(args.seed, tuning, store);
    let mut pilot = Autopilot::new(args.name.clone());
    let mut tally = Tally::default();
    let mut snap = game.snapshot();

    for _ in 0..args.frames {
        let input = pilot.next_input(&snap, game.layout());
        snap = game.frame(&input, args.dt);
        for event in &snap.events {
            tally.record(event);
        }
    }

    log::info!(
        "Simulated {} frames: {} runs ended, {} waves cleared (best wave {}), {} kills, {} bosses",
        args.frames,
        tally.runs,
        tally.waves_cleared,
        tally.best_wave,
        tally.kills,
        tally.bosses
    );
    log::info!(
        "Best score {}, {} pickups collected, {} pulses fired, current wave {}",
        tally.best_score,
        tally.pickups,
        tally.pulses,
        snap.run.wave
    );
    if let Some(best) = game.leaderboard().top_score() {
        log::info!("Leaderboard top score {}", best);
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&snap)?);
    }
    Ok(())
}
