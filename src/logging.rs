//! Log subscriber setup shared by the binaries.

use std::str::FromStr;

use tracing::Level;

/// Install the global `fmt` subscriber.
///
/// Level comes from `LOG_LEVEL` (`error`..`trace`), default `info`.
/// Timestamps are left off because the platform log viewer adds its own.
/// Safe to call more than once; later calls are no-ops.
pub fn init() {
    let level = std::env::var("LOG_LEVEL")
        .ok()
        .and_then(|v| Level::from_str(v.trim()).ok())
        .unwrap_or(Level::INFO);

    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .without_time()
        .try_init();
}
