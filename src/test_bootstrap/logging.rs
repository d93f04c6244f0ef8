#![cfg(test)]

//! Logging bootstrap for unit tests.
//!
//! Guarded by a `OnceCell` so every test can call [`init`] without caring
//! whether another test got there first.

use once_cell::sync::OnceCell;
use tracing_subscriber::{fmt, EnvFilter};

static GUARD: OnceCell<()> = OnceCell::new();

/// Initialize tracing for tests. Safe to call from every test.
///
/// The filter comes from `TEST_LOG`, then `RUST_LOG`, then defaults to
/// `warn`. Output goes through the test writer so cargo captures it per
/// test, with timestamps stripped to keep log lines stable.
pub fn init() {
    GUARD.get_or_init(|| {
        fmt()
            .with_env_filter(test_filter())
            .with_test_writer()
            .without_time()
            .try_init()
            .ok();
    });
}

fn test_filter() -> EnvFilter {
    ["TEST_LOG", "RUST_LOG"]
        .iter()
        .find_map(|name| std::env::var(name).ok())
        .map(EnvFilter::new)
        .unwrap_or_else(|| EnvFilter::new("warn"))
}
