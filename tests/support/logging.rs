//! Logging bootstrap for integration tests.
//!
//! Mirrors the crate's test_bootstrap module. Integration test binaries
//! cannot reach the crate's test-only modules, so the initializer lives
//! here as well.
//!
//! The filter respects, in order of precedence:
//! 1. `TEST_LOG` (preferred)
//! 2. `RUST_LOG` (fallback)
//! 3. `"warn"` (default, quiet)

use once_cell::sync::OnceCell;
use tracing_subscriber::{fmt, EnvFilter};

static GUARD: OnceCell<()> = OnceCell::new();

/// Initialize tracing for integration tests. Idempotent.
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

/// Automatically initialize logging for every integration test binary that
/// declares this module.
#[ctor::ctor]
fn _auto_init_for_integration_tests() {
    init();
}
