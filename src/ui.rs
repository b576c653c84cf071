//! Screen layout and click routing
//!
//! Buttons are plain rectangles in logical screen space. Drawing them is the
//! renderer's job; this module only answers "what is under the pointer".

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::sim::Upgrade;

/// Axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Inclusive on every edge
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.x && p.x <= self.x + self.w && p.y >= self.y && p.y <= self.y + self.h
    }
}

/// Buttons on the main menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuButton {
    Boot,
    Guide,
    Scores,
}

/// Buttons on the play screen HUD
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayButton {
    Pulse,
    Armory,
    StartWave,
}

/// Every clickable region
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    pub header_height: f32,
    pub footer_height: f32,
    pub pulse: Rect,
    pub armory: Rect,
    pub start_wave: Rect,
    pub boot: Rect,
    pub guide: Rect,
    pub scores: Rect,
    /// Back button on the guide and leaderboard screens
    pub back: Rect,
    pub reboot: Rect,
    /// Armory purchase buttons, in `Upgrade::ALL` order
    pub upgrades: [Rect; 4],
}

impl Default for Layout {
    fn default() -> Self {
        let cx = SCREEN_WIDTH / 2.0;
        let menu = |y| Rect::new(cx - 150.0, y, 300.0, 65.0);
        let shop = |y| Rect::new(cx - 200.0, y, 400.0, 65.0);
        Self {
            header_height: 60.0,
            footer_height: 85.0,
            pulse: Rect::new(25.0, SCREEN_HEIGHT - 120.0, 230.0, 50.0),
            armory: Rect::new(SCREEN_WIDTH - 550.0, SCREEN_HEIGHT - 72.0, 250.0, 60.0),
            start_wave: Rect::new(SCREEN_WIDTH - 280.0, SCREEN_HEIGHT - 72.0, 250.0, 60.0),
            boot: menu(380.0),
            guide: menu(465.0),
            scores: menu(550.0),
            back: Rect::new(cx - 100.0, 620.0, 200.0, 50.0),
            reboot: menu(540.0),
            upgrades: [shop(180.0), shop(260.0), shop(340.0), shop(420.0)],
        }
    }
}

impl Layout {
    pub fn menu_button_at(&self, p: Vec2) -> Option<MenuButton> {
        [
            (self.boot, MenuButton::Boot),
            (self.guide, MenuButton::Guide),
            (self.scores, MenuButton::Scores),
        ]
        .into_iter()
        .find(|(rect, _)| rect.contains(p))
        .map(|(_, button)| button)
    }

    /// HUD button under `p`. Buttons only exist while they are usable.
    pub fn play_button_at(&self, p: Vec2, build_phase: bool, pulse_ready: bool) -> Option<PlayButton> {
        if pulse_ready && self.pulse.contains(p) {
            return Some(PlayButton::Pulse);
        }
        if build_phase {
            if self.armory.contains(p) {
                return Some(PlayButton::Armory);
            }
            if self.start_wave.contains(p) {
                return Some(PlayButton::StartWave);
            }
        }
        None
    }

    /// True when a click at `p` lands on HUD chrome rather than the field
    pub fn blocks_world_click(&self, p: Vec2, build_phase: bool, pulse_ready: bool) -> bool {
        let in_header = p.y < self.header_height;
        let in_footer = build_phase && p.y > SCREEN_HEIGHT - self.footer_height;
        let on_pulse = pulse_ready && self.pulse.contains(p);
        in_header || in_footer || on_pulse
    }

    pub fn upgrade_at(&self, p: Vec2) -> Option<Upgrade> {
        self.upgrades
            .iter()
            .zip(Upgrade::ALL)
            .find(|(rect, _)| rect.contains(p))
            .map(|(_, upgrade)| upgrade)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_contains_edges() {
        let r = Rect::new(10.0, 10.0, 20.0, 5.0);
        assert!(r.contains(Vec2::new(10.0, 10.0)));
        assert!(r.contains(Vec2::new(30.0, 15.0)));
        assert!(!r.contains(Vec2::new(30.1, 12.0)));
        assert!(!r.contains(Vec2::new(15.0, 9.9)));
    }

    #[test]
    fn test_menu_buttons() {
        let layout = Layout::default();
        assert_eq!(layout.menu_button_at(Vec2::new(640.0, 400.0)), Some(MenuButton::Boot));
        assert_eq!(layout.menu_button_at(Vec2::new(640.0, 500.0)), Some(MenuButton::Guide));
        assert_eq!(layout.menu_button_at(Vec2::new(640.0, 580.0)), Some(MenuButton::Scores));
        assert_eq!(layout.menu_button_at(Vec2::new(100.0, 400.0)), None);
    }

    #[test]
    fn test_hud_blocks_clicks() {
        let layout = Layout::default();
        assert!(layout.blocks_world_click(Vec2::new(640.0, 30.0), false, false));
        // Footer only exists in the build phase
        let footer = Vec2::new(400.0, 680.0);
        assert!(layout.blocks_world_click(footer, true, false));
        assert!(!layout.blocks_world_click(footer, false, false));
        let pulse = Vec2::new(100.0, 620.0);
        assert!(layout.blocks_world_click(pulse, false, true));
        assert!(!layout.blocks_world_click(pulse, false, false));
        assert!(!layout.blocks_world_click(Vec2::new(640.0, 200.0), true, true));
    }

    #[test]
    fn test_play_buttons_need_their_phase() {
        let layout = Layout::default();
        let armory = Vec2::new(800.0, 680.0);
        let start = Vec2::new(1100.0, 680.0);
        assert_eq!(layout.play_button_at(armory, true, false), Some(PlayButton::Armory));
        assert_eq!(layout.play_button_at(start, true, false), Some(PlayButton::StartWave));
        assert_eq!(layout.play_button_at(start, false, true), None);
        assert_eq!(
            layout.play_button_at(Vec2::new(30.0, 610.0), false, true),
            Some(PlayButton::Pulse)
        );
    }

    #[test]
    fn test_upgrade_buttons_in_order() {
        let layout = Layout::default();
        assert_eq!(layout.upgrade_at(Vec2::new(640.0, 200.0)), Some(Upgrade::NodeSlot));
        assert_eq!(layout.upgrade_at(Vec2::new(640.0, 290.0)), Some(Upgrade::PulseCharge));
        assert_eq!(layout.upgrade_at(Vec2::new(640.0, 370.0)), Some(Upgrade::Overclock));
        assert_eq!(layout.upgrade_at(Vec2::new(640.0, 450.0)), Some(Upgrade::CoreRepair));
        assert_eq!(layout.upgrade_at(Vec2::new(640.0, 250.0)), None);
    }
}
