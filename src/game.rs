//! Screen state machine and frame orchestrator
//!
//! `Game` owns the simulation, the leaderboard and the current screen. Each
//! frame it routes the input snapshot to the active screen, runs at most one
//! simulation pass, and returns a read-only `Snapshot`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::NAME_MAX_LEN;
use crate::leaderboard::{BOARD_SIZE, Leaderboard};
use crate::persistence::RecordStore;
use crate::sim::{
    GameEvent, GameState, NodeVariant, Overlay, Snapshot, TickInput, build_snapshot, economy,
    tick,
};
use crate::tuning::Tuning;
use crate::ui::{Layout, MenuButton, PlayButton};

/// Top-level screens. Only the active one is updated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Screen {
    #[default]
    Menu,
    Guide,
    Leaderboard,
    /// Build and combat; split by `RunState::wave_active`
    Play,
    Paused,
    Upgrade,
    GameOver,
}

/// Edge-triggered commands (one per key press)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Confirm,
    Cancel,
    Pause,
    SelectStandard,
    SelectCryo,
    SelectTesla,
    Discharge,
    OpenUpgrades,
    StartWave,
}

/// Input gathered by the platform layer for one frame
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameInput {
    pub actions: Vec<Action>,
    /// Pointer position in logical screen space
    pub pointer: Vec2,
    /// Primary button went down this frame
    pub click: bool,
    /// Characters typed this frame; `\u{8}` is backspace
    pub typed: String,
}

impl FrameInput {
    pub fn pressed(&self, action: Action) -> bool {
        self.actions.contains(&action)
    }

    pub fn action(action: Action) -> Self {
        Self {
            actions: vec![action],
            ..Default::default()
        }
    }

    pub fn click_at(pointer: Vec2) -> Self {
        Self {
            pointer,
            click: true,
            ..Default::default()
        }
    }

    pub fn typing(text: impl Into<String>) -> Self {
        Self {
            typed: text.into(),
            ..Default::default()
        }
    }

    fn clicked(&self) -> Option<Vec2> {
        self.click.then_some(self.pointer)
    }
}

const BACKSPACE: char = '\u{8}';

/// The whole application minus rendering and platform input
pub struct Game {
    state: GameState,
    screen: Screen,
    leaderboard: Leaderboard,
    layout: Layout,
    /// Name being typed on the game over screen
    name: String,
    /// The current game over has already been recorded
    submitted: bool,
}

impl Game {
    pub fn new(seed: u64, tuning: Tuning, store: Box<dyn RecordStore>) -> Self {
        log::info!("New game (seed {})", seed);
        Self {
            state: GameState::new(seed, tuning),
            screen: Screen::Menu,
            leaderboard: Leaderboard::new(store),
            layout: Layout::default(),
            name: String::new(),
            submitted: false,
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Direct simulation access for scripted scenarios
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn leaderboard(&self) -> &Leaderboard {
        &self.leaderboard
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn name_entry(&self) -> &str {
        &self.name
    }

    /// Run one frame of `dt` wall-clock seconds.
    ///
    /// Negative or non-finite deltas count as zero; long frames are not capped.
    pub fn frame(&mut self, input: &FrameInput, dt: f32) -> Snapshot {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        match self.screen {
            Screen::Menu => self.update_menu(input),
            Screen::Guide => self.update_guide(input),
            Screen::Leaderboard => self.update_leaderboard(input),
            Screen::Play => self.update_play(input, dt),
            Screen::Paused => {
                if input.pressed(Action::Pause) {
                    self.set_screen(Screen::Play);
                }
            }
            Screen::Upgrade => self.update_upgrade(input),
            Screen::GameOver => self.update_game_over(input),
        }
        self.snapshot()
    }

    /// Snapshot of the current frame; drains pending events
    pub fn snapshot(&mut self) -> Snapshot {
        let events = std::mem::take(&mut self.state.events);
        let potential_rank = match self.screen {
            Screen::GameOver => self.leaderboard.potential_rank(self.state.run.score),
            _ => None,
        };
        let overlay = Overlay {
            screen: self.screen,
            name_entry: &self.name,
            leaderboard: self.leaderboard.top(BOARD_SIZE),
            potential_rank,
        };
        build_snapshot(&self.state, overlay, events)
    }

    fn set_screen(&mut self, screen: Screen) {
        if self.screen != screen {
            log::debug!("Screen {:?} -> {:?}", self.screen, screen);
            self.screen = screen;
        }
    }

    fn update_menu(&mut self, input: &FrameInput) {
        if input.pressed(Action::Confirm) {
            self.set_screen(Screen::Play);
            return;
        }
        match input.clicked().and_then(|p| self.layout.menu_button_at(p)) {
            Some(MenuButton::Boot) => self.set_screen(Screen::Play),
            Some(MenuButton::Guide) => self.set_screen(Screen::Guide),
            Some(MenuButton::Scores) => {
                self.leaderboard.load_entries();
                self.set_screen(Screen::Leaderboard);
            }
            None => {}
        }
    }

    fn update_guide(&mut self, input: &FrameInput) {
        if input.pressed(Action::Cancel) || self.back_clicked(input) {
            self.set_screen(Screen::Menu);
        }
    }

    fn update_leaderboard(&mut self, input: &FrameInput) {
        if input.pressed(Action::Cancel) || input.pressed(Action::Confirm) || self.back_clicked(input)
        {
            self.set_screen(Screen::Menu);
        }
    }

    fn back_clicked(&self, input: &FrameInput) -> bool {
        input.clicked().is_some_and(|p| self.layout.back.contains(p))
    }

    fn update_play(&mut self, input: &FrameInput, dt: f32) {
        if input.pressed(Action::Pause) {
            self.set_screen(Screen::Paused);
            return;
        }

        let run = &self.state.run;
        let build_phase = self.state.in_build_phase();
        let pulse_ready = run.wave_active && run.pulse_charges > 0;
        let mut open_upgrades = input.pressed(Action::OpenUpgrades);
        let mut commands = TickInput {
            discharge: input.pressed(Action::Discharge),
            start_wave: input.pressed(Action::StartWave),
            ..Default::default()
        };
        for action in &input.actions {
            match action {
                Action::SelectStandard => commands.select = Some(NodeVariant::Standard),
                Action::SelectCryo => commands.select = Some(NodeVariant::Cryo),
                Action::SelectTesla => commands.select = Some(NodeVariant::Tesla),
                _ => {}
            }
        }
        if let Some(p) = input.clicked() {
            match self.layout.play_button_at(p, build_phase, pulse_ready) {
                Some(PlayButton::Pulse) => commands.discharge = true,
                Some(PlayButton::Armory) => open_upgrades = true,
                Some(PlayButton::StartWave) => commands.start_wave = true,
                None if !self.layout.blocks_world_click(p, build_phase, pulse_ready) => {
                    commands.click = Some(p);
                }
                None => {}
            }
        }

        tick(&mut self.state, &commands, dt);

        // Core loss wins over anything else requested this frame
        if self.state.core_destroyed() {
            self.enter_game_over();
        } else if open_upgrades && !self.state.run.wave_active {
            self.set_screen(Screen::Upgrade);
        }
    }

    fn update_upgrade(&mut self, input: &FrameInput) {
        if let Some(upgrade) = input.clicked().and_then(|p| self.layout.upgrade_at(p)) {
            if let Err(reason) = economy::purchase(&mut self.state, upgrade) {
                log::debug!("{} rejected: {}", upgrade.label(), reason);
            }
        }
        if input.pressed(Action::OpenUpgrades) || input.pressed(Action::Confirm) {
            self.state.flush_outbox();
            self.set_screen(Screen::Play);
        }
    }

    fn enter_game_over(&mut self) {
        let run = &self.state.run;
        let (score, wave) = (run.score, run.wave);
        log::info!("Core destroyed on wave {} with score {}", wave, score);
        self.state.emit(GameEvent::GameOver { score, wave });
        self.leaderboard.load_entries();
        self.name.clear();
        self.submitted = false;
        self.set_screen(Screen::GameOver);
    }

    fn update_game_over(&mut self, input: &FrameInput) {
        for c in input.typed.chars() {
            if c == BACKSPACE {
                self.name.pop();
            } else if (c.is_ascii_alphanumeric() || c == '-' || c == '_')
                && self.name.len() < NAME_MAX_LEN
            {
                self.name.push(c);
            }
        }

        let reboot = input
            .clicked()
            .is_some_and(|p| self.layout.reboot.contains(p));
        if input.pressed(Action::Confirm) || reboot {
            self.submit_and_reboot();
        }
    }

    fn submit_and_reboot(&mut self) {
        if !self.submitted {
            self.submitted = true;
            if let Err(e) = self.leaderboard.append_entry(&self.name, self.state.run.score) {
                log::warn!("Could not record score: {}", e);
            }
        }
        self.state.reset();
        self.name.clear();
        log::info!("System rebooted");
        self.set_screen(Screen::Play);
    }
}
