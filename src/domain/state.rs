use std::fmt;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::domain::cards::Card;
use crate::domain::resolution::RoundRecord;
use crate::domain::rows::Row;
use crate::domain::rules::ROW_COUNT;
use crate::error::GameError;

/// Session lifecycle phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// Session created; participants gather, nothing dealt yet.
    Waiting,
    /// A game is running: commitments gather, resolutions advance rounds.
    Playing,
    /// The last resolution ended the game. A new deal starts a rematch;
    /// the session never returns to `Waiting`.
    Finished,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Waiting => "waiting",
            Phase::Playing => "playing",
            Phase::Finished => "finished",
        };
        f.write_str(name)
    }
}

/// Whether a participant plays cards or only watches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Holds a hand, commits cards, accumulates penalty points.
    Active,
    /// Joined after the deal; watches until the next deal promotes them.
    Spectator,
}

/// Room code addressing one session.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    pub fn new(code: impl Into<String>) -> Self {
        SessionId(code.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Caller-supplied opaque participant identifier.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParticipantId(String);

impl ParticipantId {
    pub fn new(id: impl Into<String>) -> Self {
        ParticipantId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One member of a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Participant {
    pub id: ParticipantId,
    pub display_name: String,
    pub role: Role,
    /// Penalty points this game. Lower is better; reset by each deal.
    pub score: u32,
    /// Unique cards, sorted ascending at deal time.
    pub hand: Vec<Card>,
    /// The card removed from `hand` for the current round, if any.
    pub commitment: Option<Card>,
}

impl Participant {
    pub fn new(id: ParticipantId, display_name: String, role: Role) -> Self {
        Participant {
            id,
            display_name,
            role,
            score: 0,
            hand: Vec::new(),
            commitment: None,
        }
    }
}

/// The authoritative session record.
///
/// Exactly one task owns and mutates a `Session`; everything else sees it
/// through snapshots. The whole record serializes, so a transport or store
/// can ship it as a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub id: SessionId,
    /// The creator. Only this participant's deal/resolve calls take effect.
    pub authority_id: ParticipantId,
    pub phase: Phase,
    /// Number of deals performed; 0 before the first.
    pub game_no: u32,
    /// Round within the current game; 0 before the first deal, reset to 1
    /// by each deal.
    pub round: u32,
    pub rows: [Row; ROW_COUNT],
    /// Join order, which is also deal order and the order the end-of-game
    /// reference participant is taken from.
    pub participants: Vec<Participant>,
    /// Last round summary, for display only.
    pub message: String,
    /// Undealt remainder of the deck from the last deal.
    pub stock: Vec<Card>,
    /// Cards swept off rows by busts and row takes since the last deal.
    pub discard: Vec<Card>,
    /// Resolved rounds, inputs and outcomes, across all games.
    pub history: Vec<RoundRecord>,
    /// Base RNG seed; each deal derives its shuffle seed from this.
    pub seed: u64,
    /// Bumped once per successful mutation.
    pub version: u64,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl Session {
    pub fn participant(&self, id: &ParticipantId) -> Option<&Participant> {
        self.participants.iter().find(|p| &p.id == id)
    }

    pub fn participant_mut(&mut self, id: &ParticipantId) -> Option<&mut Participant> {
        self.participants.iter_mut().find(|p| &p.id == id)
    }

    /// Active participants in join order.
    pub fn active_participants(&self) -> impl Iterator<Item = &Participant> {
        self.participants.iter().filter(|p| p.role == Role::Active)
    }

    pub fn active_count(&self) -> usize {
        self.active_participants().count()
    }

    pub fn is_authority(&self, id: &ParticipantId) -> bool {
        &self.authority_id == id
    }

    pub fn require_phase(&self, expected: Phase, action: &'static str) -> Result<(), GameError> {
        if self.phase == expected {
            Ok(())
        } else {
            Err(GameError::InvalidTransition {
                action,
                phase: self.phase,
            })
        }
    }

    pub(crate) fn bump_version(&mut self) {
        self.version += 1;
    }
}
