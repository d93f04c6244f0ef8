use crate::domain::state::{Phase, Session};

/// The lifecycle-relevant slice of a session, cheap to capture before and
/// after a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionLifecycleView {
    pub version: u64,
    pub phase: Phase,
    pub game_no: u32,
    pub round: u32,
    pub participant_count: usize,
}

impl SessionLifecycleView {
    pub fn of(session: &Session) -> Self {
        SessionLifecycleView {
            version: session.version,
            phase: session.phase,
            game_no: session.game_no,
            round: session.round,
            participant_count: session.participants.len(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionTransition {
    /// Edge-triggered: a deal moved the session into Playing.
    GameStarted { game_no: u32 },

    /// Edge-triggered: a resolution advanced the round within a game.
    RoundAdvanced { round: u32 },

    /// Edge-triggered: the session reached Finished.
    GameEnded,

    /// Edge-triggered: the participant count grew.
    ParticipantJoined,

    /// Edge-triggered: the participant count shrank.
    ParticipantLeft,
}

/// Derive transitions from before/after lifecycle state.
pub fn derive_session_transitions(
    before: &SessionLifecycleView,
    after: &SessionLifecycleView,
) -> Vec<SessionTransition> {
    let mut transitions = Vec::new();

    // 1. Deal: any phase other than Playing -> Playing (covers rematches).
    if before.phase != Phase::Playing && after.phase == Phase::Playing {
        transitions.push(SessionTransition::GameStarted {
            game_no: after.game_no,
        });
    }

    // 2. Round advance within the same game.
    if before.phase == Phase::Playing
        && after.phase == Phase::Playing
        && before.game_no == after.game_no
        && after.round > before.round
    {
        transitions.push(SessionTransition::RoundAdvanced { round: after.round });
    }

    // 3. Game end.
    if before.phase != Phase::Finished && after.phase == Phase::Finished {
        transitions.push(SessionTransition::GameEnded);
    }

    // 4. Membership changes.
    if after.participant_count > before.participant_count {
        transitions.push(SessionTransition::ParticipantJoined);
    }
    if after.participant_count < before.participant_count {
        transitions.push(SessionTransition::ParticipantLeft);
    }

    transitions
}
