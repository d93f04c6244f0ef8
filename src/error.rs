use thiserror::Error;

use crate::domain::state::Phase;

/// Errors surfaced by session operations.
///
/// Every rejected operation leaves the session unchanged; there are no
/// partial mutations behind any of these variants. Authority checks are not
/// errors at all (a deal or resolve from the wrong participant is silently
/// skipped), so nothing here covers them.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("session not found")]
    SessionNotFound,
    #[error("participant not found: {id}")]
    ParticipantNotFound { id: String },
    #[error("participant {id} is not an active player")]
    NotActive { id: String },
    #[error("participant {id} already committed a card this round")]
    AlreadyCommitted { id: String },
    #[error("card {card} is not in hand")]
    CardNotHeld { card: u8 },
    #[error("deck too small for the deal: need {required}, have {available}")]
    InsufficientDeck { required: usize, available: usize },
    #[error("{action} is not legal in the {phase} phase")]
    InvalidTransition {
        action: &'static str,
        phase: Phase,
    },
    #[error("session is full (capacity {capacity})")]
    SessionFull { capacity: usize },
    #[error("card value {value} is out of range")]
    InvalidCard { value: u8 },
}

impl GameError {
    /// Stable machine-readable code for transports and logs.
    pub fn code(&self) -> &'static str {
        match self {
            GameError::SessionNotFound => "SESSION_NOT_FOUND",
            GameError::ParticipantNotFound { .. } => "PARTICIPANT_NOT_FOUND",
            GameError::NotActive { .. } => "NOT_ACTIVE",
            GameError::AlreadyCommitted { .. } => "ALREADY_COMMITTED",
            GameError::CardNotHeld { .. } => "CARD_NOT_HELD",
            GameError::InsufficientDeck { .. } => "INSUFFICIENT_DECK",
            GameError::InvalidTransition { .. } => "INVALID_TRANSITION",
            GameError::SessionFull { .. } => "SESSION_FULL",
            GameError::InvalidCard { .. } => "INVALID_CARD",
        }
    }
}
