//! Per-viewer redacted views of a session.
//!
//! Snapshots carry everything public plus the viewer's own hand. Other
//! hands surface only as counts, and a pending commitment surfaces only as
//! a flag; card values stay hidden until resolution publishes them in the
//! round summary.

use serde::{Deserialize, Serialize};

use crate::domain::cards::Card;
use crate::domain::rows::Row;
use crate::domain::rules::ROW_COUNT;
use crate::domain::state::{ParticipantId, Phase, Role, Session, SessionId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantView {
    pub id: ParticipantId,
    pub display_name: String,
    pub role: Role,
    pub score: u32,
    /// Whether a card is committed for the current round.
    pub committed: bool,
    pub hand_count: usize,
    /// Present only for the viewer themselves.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hand: Option<Vec<Card>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub session_id: SessionId,
    pub authority_id: ParticipantId,
    pub phase: Phase,
    pub game_no: u32,
    pub round: u32,
    pub rows: [Row; ROW_COUNT],
    pub participants: Vec<ParticipantView>,
    pub message: String,
    pub version: u64,
}

/// Build the view `viewer` is allowed to see. An unknown viewer gets the
/// fully redacted public view.
pub fn snapshot_for(session: &Session, viewer: &ParticipantId) -> SessionSnapshot {
    let participants = session
        .participants
        .iter()
        .map(|p| ParticipantView {
            id: p.id.clone(),
            display_name: p.display_name.clone(),
            role: p.role,
            score: p.score,
            committed: p.commitment.is_some(),
            hand_count: p.hand.len(),
            hand: (&p.id == viewer).then(|| p.hand.clone()),
        })
        .collect();

    SessionSnapshot {
        session_id: session.id.clone(),
        authority_id: session.authority_id.clone(),
        phase: session.phase,
        game_no: session.game_no,
        round: session.round,
        rows: session.rows.clone(),
        participants,
        message: session.message.clone(),
        version: session.version,
    }
}
