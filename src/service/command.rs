//! Mailbox messages understood by a session actor.

use tokio::sync::oneshot;

use crate::domain::cards::Card;
use crate::domain::session::{DealOutcome, ResolveOutcome};
use crate::domain::snapshot::SessionSnapshot;
use crate::domain::state::{ParticipantId, Role};
use crate::error::GameError;

/// A single request to a session actor.
///
/// Each variant carries a oneshot sender for the reply. Replies may be
/// dropped if the caller went away; the actor ignores send failures.
#[derive(Debug)]
pub enum SessionCommand {
    Join {
        participant_id: ParticipantId,
        display_name: String,
        reply: oneshot::Sender<Result<Role, GameError>>,
    },
    Leave {
        participant_id: ParticipantId,
        reply: oneshot::Sender<Result<(), GameError>>,
    },
    Deal {
        by: ParticipantId,
        reply: oneshot::Sender<Result<DealOutcome, GameError>>,
    },
    Commit {
        participant_id: ParticipantId,
        card: Card,
        reply: oneshot::Sender<Result<(), GameError>>,
    },
    Resolve {
        by: ParticipantId,
        reply: oneshot::Sender<Result<ResolveOutcome, GameError>>,
    },
    Snapshot {
        viewer: ParticipantId,
        reply: oneshot::Sender<SessionSnapshot>,
    },
}

impl SessionCommand {
    /// Short name for logging.
    pub fn name(&self) -> &'static str {
        match self {
            SessionCommand::Join { .. } => "join",
            SessionCommand::Leave { .. } => "leave",
            SessionCommand::Deal { .. } => "deal",
            SessionCommand::Commit { .. } => "commit",
            SessionCommand::Resolve { .. } => "resolve",
            SessionCommand::Snapshot { .. } => "snapshot",
        }
    }
}
