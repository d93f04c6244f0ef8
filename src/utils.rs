//! Shared utilities.

pub mod join_code;
