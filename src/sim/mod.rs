//! Simulation module
//!
//! All gameplay logic lives here. It has no rendering, audio or input
//! dependencies:
//! - Seeded RNG only
//! - One fixed-order pass per frame (see `tick`)
//! - Registries compacted in a single pass after flagging

pub mod abilities;
pub mod combat;
pub mod economy;
pub mod events;
pub mod snapshot;
pub mod state;
pub mod tick;
pub mod wave;

pub use abilities::{Countdown, GlobalTimers, Shockwave};
pub use economy::Upgrade;
pub use events::GameEvent;
pub use snapshot::{Overlay, Snapshot, build_snapshot};
pub use state::{
    Beam, DefenseNode, Enemy, GameState, NodeVariant, Notification, Pickup, PickupKind, RunState,
    Tone,
};
pub use tick::{TickInput, tick};
