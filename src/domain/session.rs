//! Session aggregate operations: create, join, leave, deal, resolve.
//!
//! These are the only functions that mutate a [`Session`]. Authority checks
//! are preconditions, not errors: a deal or resolve from anyone but the
//! authority returns a `NotAuthority` outcome and changes nothing, so a
//! stale or duplicated trigger degrades to a no-op.

use time::OffsetDateTime;

use crate::domain::committing::{committed_plays, is_ready};
use crate::domain::dealing;
use crate::domain::resolution::{self, RoundRecord};
use crate::domain::seed_derivation::derive_deal_seed;
use crate::domain::state::{Participant, ParticipantId, Phase, Role, Session, SessionId};
use crate::error::GameError;

/// Result of asking the session to deal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DealOutcome {
    /// Cards dealt; the session is playing.
    Dealt,
    /// The caller is not the authority; nothing changed.
    NotAuthority,
}

/// Result of asking the session to resolve the current round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolveOutcome {
    /// The round resolved and the game continues.
    RoundResolved,
    /// The round resolved and ended the game.
    GameEnded,
    /// The caller is not the authority; nothing changed.
    NotAuthority,
    /// Some active participant has not committed yet; nothing changed.
    NotReady,
}

/// Build a fresh session in `Waiting` with the creator as its authority and
/// first active participant.
pub fn create_session(
    id: SessionId,
    authority_id: ParticipantId,
    display_name: String,
    seed: u64,
    created_at: OffsetDateTime,
) -> Session {
    let creator = Participant::new(authority_id.clone(), display_name, Role::Active);
    Session {
        id,
        authority_id,
        phase: Phase::Waiting,
        game_no: 0,
        round: 0,
        rows: Default::default(),
        participants: vec![creator],
        message: String::new(),
        stock: Vec::new(),
        discard: Vec::new(),
        history: Vec::new(),
        seed,
        version: 0,
        created_at,
    }
}

/// Admit a participant, or refresh the name of one already present.
///
/// Joins during `Waiting` are active; joins after a deal are spectators
/// until the next deal promotes them. Rejoining with a known id never
/// touches the existing hand, score, or role.
pub fn join_session(
    session: &mut Session,
    id: ParticipantId,
    display_name: String,
    max_participants: usize,
) -> Result<Role, GameError> {
    if let Some(existing) = session.participant_mut(&id) {
        existing.display_name = display_name;
        let role = existing.role;
        session.bump_version();
        return Ok(role);
    }

    if session.participants.len() >= max_participants {
        return Err(GameError::SessionFull {
            capacity: max_participants,
        });
    }

    let role = match session.phase {
        Phase::Waiting => Role::Active,
        Phase::Playing | Phase::Finished => Role::Spectator,
    };
    session
        .participants
        .push(Participant::new(id, display_name, role));
    session.bump_version();
    Ok(role)
}

/// Remove a participant. Their hand and any pending commitment leave the
/// game with them; the cards are not returned to play.
pub fn leave_session(session: &mut Session, id: &ParticipantId) -> Result<(), GameError> {
    let Some(pos) = session.participants.iter().position(|p| &p.id == id) else {
        return Err(GameError::ParticipantNotFound { id: id.to_string() });
    };
    session.participants.remove(pos);
    session.bump_version();
    Ok(())
}

/// Deal a new game: seed the rows, deal every participant a fresh hand,
/// reset scores, and enter `Playing`.
///
/// Legal from `Waiting` (first game) and from `Finished` (rematch in the
/// same session; spectators are promoted to active here and only here).
/// Dealing over a running game is rejected. A non-authority caller is
/// skipped without error.
pub fn start_game(
    session: &mut Session,
    by: &ParticipantId,
    hand_size: usize,
    min_active: usize,
) -> Result<DealOutcome, GameError> {
    if !session.is_authority(by) {
        return Ok(DealOutcome::NotAuthority);
    }
    if session.phase == Phase::Playing {
        return Err(GameError::InvalidTransition {
            action: "deal",
            phase: session.phase,
        });
    }

    // Everyone present plays the new game, spectators included.
    let player_count = session.participants.len();
    if player_count < min_active {
        return Err(GameError::InvalidTransition {
            action: "deal",
            phase: session.phase,
        });
    }

    let next_game = session.game_no + 1;
    let dealt = dealing::deal(player_count, hand_size, derive_deal_seed(session.seed, next_game))?;

    session.game_no = next_game;
    session.round = 1;
    session.phase = Phase::Playing;
    session.rows = dealt.rows;
    session.stock = dealt.stock;
    session.discard.clear();
    session.message = String::from("Cards dealt.");
    for (participant, hand) in session.participants.iter_mut().zip(dealt.hands) {
        participant.role = Role::Active;
        participant.score = 0;
        participant.commitment = None;
        participant.hand = hand;
    }
    session.bump_version();
    Ok(DealOutcome::Dealt)
}

/// Resolve the current round once every active participant has committed.
///
/// Applies the pure resolution outcome to the rows and scores, clears the
/// commitments, records the round for replay, and either advances the round
/// counter or finishes the game. Calls outside `Playing` are rejected;
/// non-authority and not-ready calls are skipped without error.
pub fn resolve_turn(
    session: &mut Session,
    by: &ParticipantId,
) -> Result<ResolveOutcome, GameError> {
    session.require_phase(Phase::Playing, "resolve")?;
    if !session.is_authority(by) {
        return Ok(ResolveOutcome::NotAuthority);
    }
    if !is_ready(session) {
        return Ok(ResolveOutcome::NotReady);
    }

    let plays = committed_plays(session);
    let rows_before = session.rows.clone();
    let outcome = resolution::resolve_round(&rows_before, &plays);
    let message = resolution::render_summary(&outcome, |id| {
        session
            .participant(id)
            .map(|p| p.display_name.clone())
            .unwrap_or_else(|| id.to_string())
    });
    let placed_any = !plays.is_empty();

    session.rows = outcome.rows.clone();
    session.discard.extend_from_slice(&outcome.swept);
    for participant in session.participants.iter_mut() {
        if let Some(delta) = outcome.deltas.get(&participant.id) {
            participant.score += delta;
        }
        participant.commitment = None;
    }
    session.message = message;
    session.history.push(RoundRecord {
        game_no: session.game_no,
        round: session.round,
        rows_before,
        plays,
        outcome,
    });

    // End of game: the first active participant (join order) ran out of
    // cards. Hands empty in lockstep, so any active hand would do.
    let ended = placed_any
        && session
            .active_participants()
            .next()
            .is_some_and(|p| p.hand.is_empty());
    if ended {
        debug_assert!(
            session.active_participants().all(|p| p.hand.is_empty()),
            "active hands must empty simultaneously"
        );
        session.phase = Phase::Finished;
        session.message.push_str("\nGame over.");
        session.bump_version();
        return Ok(ResolveOutcome::GameEnded);
    }

    session.round += 1;
    session.bump_version();
    Ok(ResolveOutcome::RoundResolved)
}
