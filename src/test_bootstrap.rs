//! Unified test logging initialization for unit tests.

pub mod logging;
