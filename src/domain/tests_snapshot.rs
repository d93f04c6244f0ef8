//! Snapshot redaction: own hand only, commitments as flags.

use crate::domain::committing::commit_card;
use crate::domain::snapshot::snapshot_for;
use crate::domain::test_helpers::{card, cards, four_rows, pid, playing_session};

fn sample_session() -> crate::domain::state::Session {
    playing_session(
        four_rows(&[10], &[20], &[30], &[40]),
        &[("ann", &[5, 15]), ("bob", &[6, 16])],
    )
}

#[test]
fn the_viewer_sees_only_their_own_hand() {
    let session = sample_session();
    let snapshot = snapshot_for(&session, &pid("ann"));

    let ann = &snapshot.participants[0];
    let bob = &snapshot.participants[1];
    assert_eq!(ann.hand, Some(cards(&[5, 15])));
    assert_eq!(bob.hand, None);
    assert_eq!(bob.hand_count, 2);
}

#[test]
fn commitments_surface_as_flags_not_cards() {
    let mut session = sample_session();
    commit_card(&mut session, &pid("bob"), card(6)).unwrap();

    let snapshot = snapshot_for(&session, &pid("ann"));
    let bob = &snapshot.participants[1];

    assert!(bob.committed);
    assert_eq!(bob.hand, None);
    assert_eq!(bob.hand_count, 1);
}

#[test]
fn unknown_viewers_get_the_public_view() {
    let session = sample_session();
    let snapshot = snapshot_for(&session, &pid("nobody"));
    assert!(snapshot.participants.iter().all(|p| p.hand.is_none()));
}

#[test]
fn snapshots_carry_board_and_progress() {
    let session = sample_session();
    let snapshot = snapshot_for(&session, &pid("ann"));

    assert_eq!(snapshot.phase, session.phase);
    assert_eq!(snapshot.round, session.round);
    assert_eq!(snapshot.rows, session.rows);
    assert_eq!(snapshot.version, session.version);
}

#[test]
fn hidden_hands_are_absent_from_the_wire_format() {
    let session = sample_session();
    let snapshot = snapshot_for(&session, &pid("ann"));
    let json = serde_json::to_value(&snapshot).unwrap();

    let participants = json["participants"].as_array().unwrap();
    assert!(participants[0].get("hand").is_some());
    assert!(participants[1].get("hand").is_none());
    // camelCase record fields
    assert!(json.get("sessionId").is_some());
    assert!(participants[1].get("handCount").is_some());
}
