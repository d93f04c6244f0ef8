//! Engine configuration from environment variables.

use std::env;
use std::time::Duration;

use thiserror::Error;

use crate::domain::rules::{DEFAULT_HAND_SIZE, DEFAULT_MAX_PARTICIPANTS, DEFAULT_MIN_ACTIVE};

/// Configuration failures, kept apart from the game-rule error taxonomy.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {name}: '{value}'")]
    Invalid { name: &'static str, value: String },
}

/// Tunables for session behavior.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Cards dealt to each active participant.
    pub hand_size: usize,
    /// Fewest participants required to deal.
    pub min_active: usize,
    /// Cap on participants per session, spectators included.
    pub max_participants: usize,
    /// Resolve automatically once every active participant has committed.
    pub auto_resolve: bool,
    /// Delay between readiness and automatic resolution.
    pub resolve_delay: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            hand_size: DEFAULT_HAND_SIZE,
            min_active: DEFAULT_MIN_ACTIVE,
            max_participants: DEFAULT_MAX_PARTICIPANTS,
            auto_resolve: true,
            resolve_delay: Duration::from_millis(1000),
        }
    }
}

impl EngineConfig {
    /// Load from `COWTAKER_*` environment variables, falling back to the
    /// defaults for anything unset.
    ///
    /// - `COWTAKER_HAND_SIZE` (default 10)
    /// - `COWTAKER_MIN_ACTIVE` (default 2)
    /// - `COWTAKER_MAX_PARTICIPANTS` (default 10)
    /// - `COWTAKER_AUTO_RESOLVE` (`true`/`false`, default true)
    /// - `COWTAKER_RESOLVE_DELAY_MS` (default 1000)
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = EngineConfig::default();
        if let Some(hand_size) = parsed_var("COWTAKER_HAND_SIZE")? {
            config.hand_size = hand_size;
        }
        if let Some(min_active) = parsed_var("COWTAKER_MIN_ACTIVE")? {
            config.min_active = min_active;
        }
        if let Some(max_participants) = parsed_var("COWTAKER_MAX_PARTICIPANTS")? {
            config.max_participants = max_participants;
        }
        if let Some(auto_resolve) = parsed_var("COWTAKER_AUTO_RESOLVE")? {
            config.auto_resolve = auto_resolve;
        }
        if let Some(delay_ms) = parsed_var::<u64>("COWTAKER_RESOLVE_DELAY_MS")? {
            config.resolve_delay = Duration::from_millis(delay_ms);
        }
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.hand_size == 0 {
            return Err(ConfigError::Invalid {
                name: "COWTAKER_HAND_SIZE",
                value: self.hand_size.to_string(),
            });
        }
        if self.min_active < 2 {
            return Err(ConfigError::Invalid {
                name: "COWTAKER_MIN_ACTIVE",
                value: self.min_active.to_string(),
            });
        }
        if self.max_participants < self.min_active {
            return Err(ConfigError::Invalid {
                name: "COWTAKER_MAX_PARTICIPANTS",
                value: self.max_participants.to_string(),
            });
        }
        Ok(())
    }
}

/// Read and parse an environment variable, `None` when unset.
fn parsed_var<T: std::str::FromStr>(name: &'static str) -> Result<Option<T>, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| ConfigError::Invalid { name, value: raw }),
        Err(_) => Ok(None),
    }
}
