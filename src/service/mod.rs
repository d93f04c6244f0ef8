//! Session runtime: one actor task per session, a registry of handles,
//! and the service facade callers go through.

pub mod actor;
pub mod command;
pub mod registry;
pub mod sessions;
