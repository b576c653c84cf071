//! Vector Defense - protect the core from inbound shape waves
//!
//! Core modules:
//! - `sim`: Simulation (waves, combat, abilities, economy, frame tick)
//! - `game`: Screen state machine and frame orchestrator
//! - `ui`: Screen layout rectangles used for click routing
//! - `leaderboard` / `persistence`: High score records and their store
//! - `tuning`: Data-driven game balance

pub mod error;
pub mod game;
pub mod leaderboard;
pub mod logging;
pub mod persistence;
pub mod sim;
pub mod tuning;
pub mod ui;

pub use error::{Rejection, StoreError, TuningError};
pub use game::{Game, Screen};
pub use leaderboard::{Leaderboard, ScoreEntry};
pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Logical screen size (pointer coordinates use this space)
    pub const SCREEN_WIDTH: f32 = 1280.0;
    pub const SCREEN_HEIGHT: f32 = 720.0;

    /// Name entry on the game over screen
    pub const NAME_MAX_LEN: usize = 12;
    pub const NAME_PLACEHOLDER: &str = "OPERATOR";
}

/// Convert polar (r, theta) around `origin` to cartesian
#[inline]
pub fn polar_to_cartesian(origin: Vec2, r: f32, theta: f32) -> Vec2 {
    origin + Vec2::new(r * theta.cos(), r * theta.sin())
}

/// Angle (radians) of the direction from `from` toward `to`
#[inline]
pub fn heading(from: Vec2, to: Vec2) -> f32 {
    (to.y - from.y).atan2(to.x - from.x)
}

/// Euclidean distance between two points
#[inline]
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    a.distance(b)
}
