//! Tracing setup. The filter directive comes from `ADGATE_LOG`
//! (e.g. `ADGATE_LOG=adgate_core=debug`), defaulting to `warn`.

use tracing_subscriber::EnvFilter;

use crate::constants::LOG_ENV_VAR;

/// Install the global fmt subscriber. Safe to call more than once; later
/// calls are no-ops.
pub fn init_tracing() {
    init_tracing_with_default("warn");
}

pub fn init_tracing_with_default(default_directive: &str) {
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
        .unwrap_or_else(|_| EnvFilter::new(default_directive));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init();
}
