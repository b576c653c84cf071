//! Error and rejection types
//!
//! Nothing here is fatal. `Rejection` reports a gameplay action whose
//! preconditions were not met (state is left untouched); the other errors
//! come from the record store and tuning files.

use std::path::PathBuf;

use thiserror::Error;

/// Why a player action was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("not enough currency: need {cost}, have {available}")]
    InsufficientFunds { cost: u32, available: u32 },
    #[error("all {capacity} node slots are in use")]
    SlotsFull { capacity: u32 },
    #[error("position is inside the core exclusion zone")]
    InsideExclusionZone,
    #[error("node variant is still locked")]
    VariantLocked,
    #[error("no pulse charges stored")]
    NoCharges,
    #[error("no wave is in progress")]
    WaveInactive,
    #[error("a wave is already in progress")]
    WaveInProgress,
    #[error("core is already at full integrity")]
    CoreAtFullHealth,
}

/// Record store failure
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("record store I/O failed at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Tuning file failure
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("cannot read tuning file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid tuning JSON: {0}")]
    Parse(#[from] serde_json::Error),
}
