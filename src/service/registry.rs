//! Handles to live session actors and the registry that tracks them.

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use tokio::sync::{mpsc, oneshot};

use crate::domain::cards::Card;
use crate::domain::session::{DealOutcome, ResolveOutcome};
use crate::domain::snapshot::SessionSnapshot;
use crate::domain::state::{ParticipantId, Role, SessionId};
use crate::error::GameError;
use crate::service::command::SessionCommand;

/// Cloneable handle to one running session actor.
///
/// All methods serialize through the actor's mailbox, so callers never
/// observe a half-applied mutation. A closed mailbox means the actor has
/// shut down and surfaces as `SessionNotFound`.
#[derive(Debug, Clone)]
pub struct SessionHandle {
    sender: mpsc::Sender<SessionCommand>,
}

impl SessionHandle {
    pub(crate) fn new(sender: mpsc::Sender<SessionCommand>) -> Self {
        Self { sender }
    }

    async fn send(&self, command: SessionCommand) -> Result<(), GameError> {
        self.sender
            .send(command)
            .await
            .map_err(|_| GameError::SessionNotFound)
    }

    /// Join the session, or refresh the display name when already present.
    pub async fn join(
        &self,
        participant_id: ParticipantId,
        display_name: impl Into<String>,
    ) -> Result<Role, GameError> {
        let (reply, rx) = oneshot::channel();
        self.send(SessionCommand::Join {
            participant_id,
            display_name: display_name.into(),
            reply,
        })
        .await?;
        rx.await.map_err(|_| GameError::SessionNotFound)?
    }

    /// Leave the session. Any held cards vanish with the participant.
    pub async fn leave(&self, participant_id: ParticipantId) -> Result<(), GameError> {
        let (reply, rx) = oneshot::channel();
        self.send(SessionCommand::Leave {
            participant_id,
            reply,
        })
        .await?;
        rx.await.map_err(|_| GameError::SessionNotFound)?
    }

    /// Ask the actor to deal a new game on behalf of `by`.
    pub async fn deal(&self, by: ParticipantId) -> Result<DealOutcome, GameError> {
        let (reply, rx) = oneshot::channel();
        self.send(SessionCommand::Deal { by, reply }).await?;
        rx.await.map_err(|_| GameError::SessionNotFound)?
    }

    /// Commit a card for the current round.
    pub async fn commit(
        &self,
        participant_id: ParticipantId,
        card: Card,
    ) -> Result<(), GameError> {
        let (reply, rx) = oneshot::channel();
        self.send(SessionCommand::Commit {
            participant_id,
            card,
            reply,
        })
        .await?;
        rx.await.map_err(|_| GameError::SessionNotFound)?
    }

    /// Ask the actor to resolve the current round on behalf of `by`.
    pub async fn resolve(&self, by: ParticipantId) -> Result<ResolveOutcome, GameError> {
        let (reply, rx) = oneshot::channel();
        self.send(SessionCommand::Resolve { by, reply }).await?;
        rx.await.map_err(|_| GameError::SessionNotFound)?
    }

    /// Snapshot the session as seen by `viewer`.
    pub async fn snapshot(&self, viewer: ParticipantId) -> Result<SessionSnapshot, GameError> {
        let (reply, rx) = oneshot::channel();
        self.send(SessionCommand::Snapshot { viewer, reply }).await?;
        rx.await.map_err(|_| GameError::SessionNotFound)
    }
}

/// Concurrent map from session id to actor handle.
#[derive(Debug, Default)]
pub struct SessionRegistry {
    sessions: DashMap<SessionId, SessionHandle>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self {
            sessions: DashMap::new(),
        }
    }

    /// Claim an id for a new session. Returns false if the id is taken,
    /// without disturbing the existing entry.
    pub fn register(&self, id: SessionId, handle: SessionHandle) -> bool {
        match self.sessions.entry(id) {
            Entry::Occupied(_) => false,
            Entry::Vacant(vacant) => {
                vacant.insert(handle);
                true
            }
        }
    }

    pub fn unregister(&self, id: &SessionId) {
        self.sessions.remove(id);
    }

    pub fn get(&self, id: &SessionId) -> Option<SessionHandle> {
        self.sessions.get(id).map(|entry| entry.value().clone())
    }

    pub fn contains(&self, id: &SessionId) -> bool {
        self.sessions.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
