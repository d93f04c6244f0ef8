//! Process-wide tracing setup.
//!
//! Two entry points: JSON output for long-lived processes and log
//! collectors, plain formatted output for interactive tools. Both honor
//! `RUST_LOG` over their built-in default filter.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Structured JSON logs, default level `info`.
pub fn init_tracing() {
    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_ansi(false)
        .json();

    tracing_subscriber::registry()
        .with(env_filter("info"))
        .with(fmt_layer)
        .init();
}

/// Human-readable logs for CLI tools, with a caller-chosen default level.
pub fn init_tracing_pretty(default_filter: &str) {
    fmt().with_env_filter(env_filter(default_filter)).init();
}

fn env_filter(default_filter: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter))
}
