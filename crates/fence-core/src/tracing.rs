//! Tracing initialization.
//!
//! The library only emits events; binaries and tests that want output call
//! [`init_tracing`] once. The filter comes from `FENCE_LOG`, e.g.
//! `FENCE_LOG=fence_analysis=debug`.

use tracing_subscriber::EnvFilter;

use crate::constants::LOG_ENV_VAR;

/// Install a fmt subscriber filtered by `FENCE_LOG` (default `info`).
///
/// Safe to call more than once; later calls are no-ops.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init();
}
