#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod config;
pub mod domain;
pub mod error;
pub mod service;
pub mod telemetry;
pub mod utils;

#[cfg(test)]
pub mod test_bootstrap;

// Re-exports for public API
pub use config::{ConfigError, EngineConfig};
pub use domain::cards::Card;
pub use domain::session::{DealOutcome, ResolveOutcome};
pub use domain::snapshot::{ParticipantView, SessionSnapshot};
pub use domain::state::{ParticipantId, Phase, Role, Session, SessionId};
pub use error::GameError;
pub use service::registry::{SessionHandle, SessionRegistry};
pub use service::sessions::SessionService;

// Prelude for test convenience
pub mod prelude {
    pub use super::config::*;
    pub use super::domain::resolution::*;
    pub use super::domain::snapshot::*;
    pub use super::domain::state::*;
    pub use super::error::*;
    pub use super::service::registry::*;
    pub use super::service::sessions::*;
}

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    test_bootstrap::logging::init();
}
