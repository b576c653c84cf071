//! Logger setup for the headless driver.

use env_logger::{Builder, Env};
use log::LevelFilter;

/// Install the env_logger backend.
///
/// The run summary logs at info. `verbose` drops to debug so screen changes,
/// rejected commands and timer expiries show up. `RUST_LOG` overrides both.
pub fn init(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let env = Env::default().default_filter_or(level.to_string());
    // A second call is a no-op
    let _ = Builder::from_env(env).try_init();
}
