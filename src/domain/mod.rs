//! Domain layer: pure game rules, state, and resolution.

pub mod cards;
pub mod committing;
pub mod dealing;
pub mod game_transition;
pub mod resolution;
pub mod rows;
pub mod rules;
pub mod scoring;
pub mod seed_derivation;
pub mod session;
pub mod snapshot;
pub mod state;

#[cfg(test)]
mod test_helpers;
#[cfg(test)]
mod tests_session;
#[cfg(test)]
mod tests_snapshot;

// Re-exports for ergonomics
pub use cards::Card;
pub use committing::{commit_card, committed_plays, is_ready};
pub use dealing::{deal, full_deck, shuffled_deck, DealResult};
pub use resolution::{resolve_round, Placement, PlacementFate, RoundOutcome, RoundRecord};
pub use rows::{cheapest_row, eligible_row, Row};
pub use session::{
    create_session, join_session, leave_session, resolve_turn, start_game, DealOutcome,
    ResolveOutcome,
};
pub use snapshot::{snapshot_for, ParticipantView, SessionSnapshot};
pub use state::{Participant, ParticipantId, Phase, Role, Session, SessionId};
