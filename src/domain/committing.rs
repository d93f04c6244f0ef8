//! Simultaneous-move collection for one round.

use crate::domain::cards::Card;
use crate::domain::state::{ParticipantId, Phase, Role, Session};
use crate::error::GameError;

/// Commit one card from a participant's hand for the current round.
///
/// Checks run in order: phase, actor, double commit, card ownership. The
/// hand removal and the commitment write happen together; no error path
/// leaves a partial mutation behind.
pub fn commit_card(
    session: &mut Session,
    who: &ParticipantId,
    card: Card,
) -> Result<(), GameError> {
    session.require_phase(Phase::Playing, "commit")?;

    let Some(participant) = session.participant_mut(who) else {
        return Err(GameError::NotActive {
            id: who.to_string(),
        });
    };
    if participant.role != Role::Active {
        return Err(GameError::NotActive {
            id: who.to_string(),
        });
    }
    if participant.commitment.is_some() {
        return Err(GameError::AlreadyCommitted {
            id: who.to_string(),
        });
    }
    let Some(pos) = participant.hand.iter().position(|&c| c == card) else {
        return Err(GameError::CardNotHeld { card: card.value() });
    };

    let removed = participant.hand.remove(pos);
    participant.commitment = Some(removed);
    session.bump_version();
    Ok(())
}

/// True when at least one active participant exists and every active
/// participant has committed.
pub fn is_ready(session: &Session) -> bool {
    let mut any = false;
    for participant in session.active_participants() {
        any = true;
        if participant.commitment.is_none() {
            return false;
        }
    }
    any
}

/// The (participant, card) pairs awaiting resolution.
pub fn committed_plays(session: &Session) -> Vec<(ParticipantId, Card)> {
    session
        .active_participants()
        .filter_map(|p| p.commitment.map(|card| (p.id.clone(), card)))
        .collect()
}
