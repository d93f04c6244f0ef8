//! Test-only session and board builders for domain unit tests.

use time::OffsetDateTime;

use crate::domain::cards::Card;
use crate::domain::rows::Row;
use crate::domain::rules::ROW_COUNT;
use crate::domain::session::create_session;
use crate::domain::state::{Participant, ParticipantId, Phase, Role, Session, SessionId};

pub fn card(value: u8) -> Card {
    Card::new(value).unwrap()
}

pub fn cards(values: &[u8]) -> Vec<Card> {
    values.iter().map(|&v| card(v)).collect()
}

pub fn pid(id: &str) -> ParticipantId {
    ParticipantId::new(id)
}

/// A row holding the given card values in placement order.
pub fn row(values: &[u8]) -> Row {
    let mut iter = values.iter();
    let first = iter.next().expect("row needs at least one card");
    let mut row = Row::starting_with(card(*first));
    for &value in iter {
        row.append(card(value));
    }
    row
}

pub fn four_rows(a: &[u8], b: &[u8], c: &[u8], d: &[u8]) -> [Row; ROW_COUNT] {
    [row(a), row(b), row(c), row(d)]
}

/// A `Waiting` session with `creator` as authority plus the given
/// co-players, all active, fixed seed.
pub fn waiting_session(creator: &str, others: &[&str]) -> Session {
    let mut session = create_session(
        SessionId::new("TEST00"),
        pid(creator),
        creator.to_string(),
        4242,
        OffsetDateTime::UNIX_EPOCH,
    );
    for other in others {
        session
            .participants
            .push(Participant::new(pid(other), other.to_string(), Role::Active));
    }
    session
}

/// A `Playing` session with explicit rows and hands. The first entry is the
/// authority; everyone is active.
pub fn playing_session(rows: [Row; ROW_COUNT], hands: &[(&str, &[u8])]) -> Session {
    let mut session = waiting_session(hands[0].0, &[]);
    session.participants.clear();
    for (name, hand) in hands {
        let mut participant = Participant::new(pid(name), name.to_string(), Role::Active);
        participant.hand = cards(hand);
        session.participants.push(participant);
    }
    session.phase = Phase::Playing;
    session.game_no = 1;
    session.round = 1;
    session.rows = rows;
    session
}
