//! Session aggregate: lifecycle, authority gating, dealing, resolution,
//! end of game, rematch.

use std::collections::HashSet;

use crate::domain::cards::Card;
use crate::domain::committing::{commit_card, is_ready};
use crate::domain::resolution::resolve_round;
use crate::domain::rules::{DECK_SIZE, DEFAULT_HAND_SIZE, DEFAULT_MIN_ACTIVE};
use crate::domain::session::{
    join_session, leave_session, resolve_turn, start_game, DealOutcome, ResolveOutcome,
};
use crate::domain::state::{ParticipantId, Phase, Role, Session};
use crate::domain::test_helpers::{card, pid, waiting_session};
use crate::error::GameError;

const MAX: usize = 10;

fn deal_for(session: &mut Session) -> DealOutcome {
    let authority = session.authority_id.clone();
    start_game(session, &authority, DEFAULT_HAND_SIZE, DEFAULT_MIN_ACTIVE).unwrap()
}

fn dealt_session(names: &[&str]) -> Session {
    let mut session = waiting_session(names[0], &names[1..]);
    assert_eq!(deal_for(&mut session), DealOutcome::Dealt);
    session
}

/// Every card dealt into the session is somewhere, exactly once.
fn assert_conserved(session: &Session) {
    let mut all: Vec<Card> = Vec::new();
    for row in &session.rows {
        all.extend_from_slice(row.cards());
    }
    for participant in &session.participants {
        all.extend_from_slice(&participant.hand);
        all.extend(participant.commitment);
    }
    all.extend_from_slice(&session.stock);
    all.extend_from_slice(&session.discard);

    let unique: HashSet<Card> = all.iter().copied().collect();
    assert_eq!(unique.len(), all.len(), "duplicate card in session");
    assert_eq!(all.len(), DECK_SIZE, "cards lost or invented");
}

/// Everyone commits their lowest card until the game finishes. Returns the
/// number of rounds resolved.
fn play_full_game(session: &mut Session) -> u32 {
    let authority = session.authority_id.clone();
    let mut rounds = 0;
    while session.phase == Phase::Playing {
        let ids: Vec<ParticipantId> = session.active_participants().map(|p| p.id.clone()).collect();
        for id in ids {
            let lowest = session.participant(&id).unwrap().hand[0];
            commit_card(session, &id, lowest).unwrap();
        }
        resolve_turn(session, &authority).unwrap();
        assert_conserved(session);
        rounds += 1;
        assert!(rounds <= 20, "game did not terminate");
    }
    rounds
}

#[test]
fn a_new_session_waits_with_its_creator() {
    let session = waiting_session("ann", &[]);
    assert_eq!(session.phase, Phase::Waiting);
    assert_eq!(session.round, 0);
    assert_eq!(session.game_no, 0);
    assert!(session.is_authority(&pid("ann")));
    assert_eq!(session.participants.len(), 1);
    assert_eq!(session.participants[0].role, Role::Active);
    assert!(session.rows.iter().all(|r| r.is_empty()));
}

#[test]
fn joins_before_the_deal_are_active() {
    let mut session = waiting_session("ann", &[]);
    let role = join_session(&mut session, pid("bob"), "bob".into(), MAX).unwrap();
    assert_eq!(role, Role::Active);
}

#[test]
fn joins_after_the_deal_are_spectators() {
    let mut session = dealt_session(&["ann", "bob"]);
    let role = join_session(&mut session, pid("zoe"), "zoe".into(), MAX).unwrap();
    assert_eq!(role, Role::Spectator);
    let zoe = session.participant(&pid("zoe")).unwrap();
    assert!(zoe.hand.is_empty());
}

#[test]
fn rejoining_refreshes_the_name_and_nothing_else() {
    let mut session = dealt_session(&["ann", "bob"]);
    let hand_before = session.participant(&pid("bob")).unwrap().hand.clone();

    let role = join_session(&mut session, pid("bob"), "bobby".into(), MAX).unwrap();

    assert_eq!(role, Role::Active);
    assert_eq!(session.participants.len(), 2);
    let bob = session.participant(&pid("bob")).unwrap();
    assert_eq!(bob.display_name, "bobby");
    assert_eq!(bob.hand, hand_before);
}

#[test]
fn a_full_session_rejects_new_joiners() {
    let mut session = waiting_session("ann", &["bob"]);
    let err = join_session(&mut session, pid("zoe"), "zoe".into(), 2).unwrap_err();
    assert_eq!(err, GameError::SessionFull { capacity: 2 });
    assert_eq!(session.participants.len(), 2);
}

#[test]
fn leaving_removes_the_participant_and_their_cards() {
    let mut session = dealt_session(&["ann", "bob", "cal"]);
    leave_session(&mut session, &pid("cal")).unwrap();

    assert!(session.participant(&pid("cal")).is_none());
    assert_eq!(session.participants.len(), 2);
    // cal's cards are gone with them; the rest stays unique.
    let held: usize = session.participants.iter().map(|p| p.hand.len()).sum();
    assert_eq!(held, 2 * DEFAULT_HAND_SIZE);
}

#[test]
fn leaving_twice_is_an_error() {
    let mut session = waiting_session("ann", &["bob"]);
    leave_session(&mut session, &pid("bob")).unwrap();
    let err = leave_session(&mut session, &pid("bob")).unwrap_err();
    assert_eq!(err, GameError::ParticipantNotFound { id: "bob".into() });
}

#[test]
fn a_departure_can_make_the_round_ready() {
    let mut session = dealt_session(&["ann", "bob"]);
    let low = session.participant(&pid("ann")).unwrap().hand[0];
    commit_card(&mut session, &pid("ann"), low).unwrap();
    assert!(!is_ready(&session));

    leave_session(&mut session, &pid("bob")).unwrap();
    assert!(is_ready(&session));
}

#[test]
fn only_the_authority_deals() {
    let mut session = waiting_session("ann", &["bob"]);
    let version = session.version;

    let outcome =
        start_game(&mut session, &pid("bob"), DEFAULT_HAND_SIZE, DEFAULT_MIN_ACTIVE).unwrap();

    assert_eq!(outcome, DealOutcome::NotAuthority);
    assert_eq!(session.phase, Phase::Waiting);
    assert_eq!(session.version, version);
}

#[test]
fn dealing_requires_enough_participants() {
    let mut session = waiting_session("ann", &[]);
    let err = start_game(&mut session, &pid("ann"), DEFAULT_HAND_SIZE, DEFAULT_MIN_ACTIVE)
        .unwrap_err();
    assert_eq!(
        err,
        GameError::InvalidTransition {
            action: "deal",
            phase: Phase::Waiting,
        }
    );
}

#[test]
fn dealing_over_a_running_game_is_rejected() {
    let mut session = dealt_session(&["ann", "bob"]);
    let err = start_game(&mut session, &pid("ann"), DEFAULT_HAND_SIZE, DEFAULT_MIN_ACTIVE)
        .unwrap_err();
    assert_eq!(
        err,
        GameError::InvalidTransition {
            action: "deal",
            phase: Phase::Playing,
        }
    );
}

#[test]
fn an_uncoverable_deal_is_rejected_whole() {
    let mut session = waiting_session("ann", &["bob", "cal", "dee", "eve", "fay"]);
    let err = start_game(&mut session, &pid("ann"), 20, DEFAULT_MIN_ACTIVE).unwrap_err();
    assert_eq!(
        err,
        GameError::InsufficientDeck {
            required: 124,
            available: 104,
        }
    );
    assert_eq!(session.phase, Phase::Waiting);
    assert!(session.participants.iter().all(|p| p.hand.is_empty()));
}

#[test]
fn the_deal_sets_up_the_board_and_hands() {
    let session = dealt_session(&["ann", "bob", "cal"]);

    assert_eq!(session.phase, Phase::Playing);
    assert_eq!(session.game_no, 1);
    assert_eq!(session.round, 1);
    for row in &session.rows {
        assert_eq!(row.len(), 1);
    }
    for participant in &session.participants {
        assert_eq!(participant.role, Role::Active);
        assert_eq!(participant.score, 0);
        assert_eq!(participant.commitment, None);
        assert_eq!(participant.hand.len(), DEFAULT_HAND_SIZE);
        let mut sorted = participant.hand.clone();
        sorted.sort();
        assert_eq!(participant.hand, sorted);
    }
    assert_eq!(
        session.stock.len(),
        DECK_SIZE - 4 - 3 * DEFAULT_HAND_SIZE
    );
    assert_conserved(&session);
}

#[test]
fn the_deal_is_deterministic_per_session_seed() {
    let a = dealt_session(&["ann", "bob"]);
    let b = dealt_session(&["ann", "bob"]);
    // test sessions share a fixed seed, so the deal matches
    assert_eq!(a.rows, b.rows);
    assert_eq!(
        a.participants[0].hand,
        b.participants[0].hand
    );
}

#[test]
fn resolving_outside_playing_is_an_invalid_transition() {
    let mut session = waiting_session("ann", &["bob"]);
    let err = resolve_turn(&mut session, &pid("ann")).unwrap_err();
    assert_eq!(
        err,
        GameError::InvalidTransition {
            action: "resolve",
            phase: Phase::Waiting,
        }
    );
}

#[test]
fn non_authority_resolution_is_silently_skipped() {
    let mut session = dealt_session(&["ann", "bob"]);
    for id in ["ann", "bob"] {
        let low = session.participant(&pid(id)).unwrap().hand[0];
        commit_card(&mut session, &pid(id), low).unwrap();
    }
    let version = session.version;

    let outcome = resolve_turn(&mut session, &pid("bob")).unwrap();

    assert_eq!(outcome, ResolveOutcome::NotAuthority);
    assert_eq!(session.version, version);
    assert!(session
        .active_participants()
        .all(|p| p.commitment.is_some()));
}

#[test]
fn an_unready_round_is_not_resolved() {
    let mut session = dealt_session(&["ann", "bob"]);
    let low = session.participant(&pid("ann")).unwrap().hand[0];
    commit_card(&mut session, &pid("ann"), low).unwrap();
    let version = session.version;

    let outcome = resolve_turn(&mut session, &pid("ann")).unwrap();

    assert_eq!(outcome, ResolveOutcome::NotReady);
    assert_eq!(session.version, version);
    assert_eq!(
        session.participant(&pid("ann")).unwrap().commitment,
        Some(low)
    );
}

#[test]
fn a_second_resolution_without_new_commitments_is_a_no_op() {
    let mut session = dealt_session(&["ann", "bob"]);
    let authority = session.authority_id.clone();
    for id in ["ann", "bob"] {
        let low = session.participant(&pid(id)).unwrap().hand[0];
        commit_card(&mut session, &pid(id), low).unwrap();
    }
    resolve_turn(&mut session, &authority).unwrap();

    let version = session.version;
    let rows = session.rows.clone();
    let scores: Vec<u32> = session.participants.iter().map(|p| p.score).collect();

    let outcome = resolve_turn(&mut session, &authority).unwrap();

    assert_eq!(outcome, ResolveOutcome::NotReady);
    assert_eq!(session.version, version);
    assert_eq!(session.rows, rows);
    let rescored: Vec<u32> = session.participants.iter().map(|p| p.score).collect();
    assert_eq!(rescored, scores);
}

#[test]
fn resolution_applies_scores_and_advances_the_round() {
    let mut session = dealt_session(&["ann", "bob"]);
    for id in ["ann", "bob"] {
        let low = session.participant(&pid(id)).unwrap().hand[0];
        commit_card(&mut session, &pid(id), low).unwrap();
    }

    let outcome = resolve_turn(&mut session, &pid("ann")).unwrap();

    assert_eq!(outcome, ResolveOutcome::RoundResolved);
    assert_eq!(session.round, 2);
    assert_eq!(session.history.len(), 1);
    assert!(!session.message.is_empty());
    assert!(session
        .active_participants()
        .all(|p| p.commitment.is_none()));
    assert_conserved(&session);
}

#[test]
fn a_full_game_runs_ten_rounds_and_finishes() {
    let mut session = dealt_session(&["ann", "bob", "cal"]);
    let rounds = play_full_game(&mut session);

    assert_eq!(rounds, DEFAULT_HAND_SIZE as u32);
    assert_eq!(session.phase, Phase::Finished);
    assert!(session.active_participants().all(|p| p.hand.is_empty()));
    assert_eq!(session.history.len(), DEFAULT_HAND_SIZE);
}

#[test]
fn scores_accumulate_monotonically_within_a_game() {
    let mut session = dealt_session(&["ann", "bob"]);
    let authority = session.authority_id.clone();
    let mut last_scores = vec![0u32; 2];

    while session.phase == Phase::Playing {
        let ids: Vec<ParticipantId> =
            session.active_participants().map(|p| p.id.clone()).collect();
        for id in ids {
            let low = session.participant(&id).unwrap().hand[0];
            commit_card(&mut session, &id, low).unwrap();
        }
        resolve_turn(&mut session, &authority).unwrap();

        let scores: Vec<u32> = session.participants.iter().map(|p| p.score).collect();
        for (now, before) in scores.iter().zip(&last_scores) {
            assert!(now >= before, "score decreased mid-game");
        }
        last_scores = scores;
    }
}

#[test]
fn the_version_increases_with_every_mutation() {
    let mut session = dealt_session(&["ann", "bob"]);
    let mut last = session.version;
    let authority = session.authority_id.clone();

    for id in ["ann", "bob"] {
        let low = session.participant(&pid(id)).unwrap().hand[0];
        commit_card(&mut session, &pid(id), low).unwrap();
        assert!(session.version > last);
        last = session.version;
    }
    resolve_turn(&mut session, &authority).unwrap();
    assert!(session.version > last);
}

#[test]
fn history_replays_to_the_recorded_outcome() {
    let mut session = dealt_session(&["ann", "bob", "cal"]);
    play_full_game(&mut session);

    for record in &session.history {
        let replayed = resolve_round(&record.rows_before, &record.plays);
        assert_eq!(replayed, record.outcome, "round {} diverged", record.round);
    }
}

#[test]
fn a_rematch_deals_from_finished_and_promotes_spectators() {
    let mut session = dealt_session(&["ann", "bob"]);
    play_full_game(&mut session);
    assert_eq!(session.phase, Phase::Finished);

    join_session(&mut session, pid("zoe"), "zoe".into(), MAX).unwrap();
    assert_eq!(
        session.participant(&pid("zoe")).unwrap().role,
        Role::Spectator
    );

    assert_eq!(deal_for(&mut session), DealOutcome::Dealt);

    assert_eq!(session.phase, Phase::Playing);
    assert_eq!(session.game_no, 2);
    assert_eq!(session.round, 1);
    let zoe = session.participant(&pid("zoe")).unwrap();
    assert_eq!(zoe.role, Role::Active);
    assert_eq!(zoe.hand.len(), DEFAULT_HAND_SIZE);
    assert!(session.participants.iter().all(|p| p.score == 0));
    assert!(session.discard.is_empty());
    assert_conserved(&session);
}

#[test]
fn rematch_shuffles_differently_from_the_first_game() {
    let mut session = dealt_session(&["ann", "bob"]);
    let first_hand = session.participant(&pid("ann")).unwrap().hand.clone();
    play_full_game(&mut session);

    deal_for(&mut session);
    let second_hand = session.participant(&pid("ann")).unwrap().hand.clone();

    assert_ne!(first_hand, second_hand);
}

#[test]
fn commit_after_the_game_ended_is_rejected() {
    let mut session = dealt_session(&["ann", "bob"]);
    play_full_game(&mut session);

    let err = commit_card(&mut session, &pid("ann"), card(1)).unwrap_err();
    assert_eq!(
        err,
        GameError::InvalidTransition {
            action: "commit",
            phase: Phase::Finished,
        }
    );
}
