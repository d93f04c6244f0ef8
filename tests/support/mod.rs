#![allow(dead_code)]

pub mod logging;
pub mod test_utils;

// Re-export the helpers the suites use by name
pub use test_utils::test_seed;
