//! Logging utilities for the pushlink crates.
//!
//! Provides a standardized tracing-subscriber setup used by the demo
//! binary and by tests that want log output.

use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber with the default log level (INFO).
pub fn init() {
    init_with_level(Level::INFO);
}

/// Initialize the tracing subscriber with a specific log level.
///
/// Honors `RUST_LOG` on top of a `pushlink={level}` directive. `try_init`
/// is used so a second call (common in tests) is a no-op instead of a
/// panic.
pub fn init_with_level(level: Level) {
    let filter = EnvFilter::from_default_env()
        .add_directive(format!("pushlink={}", level).parse().expect("valid directive"));

    let result = tracing_subscriber::registry()
        .with(fmt::layer().with_target(true))
        .with(filter)
        .try_init();

    if result.is_ok() {
        info!("Logging initialized at level: {}", level);
    }
}
