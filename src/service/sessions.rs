//! Service facade: create sessions and address them by id.

use std::sync::Arc;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use time::OffsetDateTime;
use tokio::sync::mpsc;
use tracing::info;

use crate::config::EngineConfig;
use crate::domain::cards::Card;
use crate::domain::session::{self, DealOutcome, ResolveOutcome};
use crate::domain::snapshot::SessionSnapshot;
use crate::domain::state::{ParticipantId, Role, SessionId};
use crate::error::GameError;
use crate::service::actor;
use crate::service::registry::{SessionHandle, SessionRegistry};
use crate::utils::join_code::generate_room_code;

/// Commands queued per session before senders feel backpressure.
const MAILBOX_CAPACITY: usize = 64;

/// Owns the registry and spawns one actor per session.
#[derive(Debug, Clone)]
pub struct SessionService {
    registry: Arc<SessionRegistry>,
    config: EngineConfig,
}

impl SessionService {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            registry: Arc::new(SessionRegistry::new()),
            config,
        }
    }

    /// Create a session with `authority_id` as creator and authority, spawn
    /// its actor, and hand back the claimed id plus a handle to it.
    ///
    /// Must be called from within a tokio runtime.
    pub fn create_session(
        &self,
        authority_id: ParticipantId,
        display_name: impl Into<String>,
    ) -> (SessionId, SessionHandle) {
        let (sender, mailbox) = mpsc::channel(MAILBOX_CAPACITY);
        let handle = SessionHandle::new(sender);

        // Room codes can collide; keep generating until one registers.
        let session_id = loop {
            let candidate = SessionId::new(generate_room_code());
            if self.registry.register(candidate.clone(), handle.clone()) {
                break candidate;
            }
        };

        let seed = StdRng::from_os_rng().random::<u64>();
        let state = session::create_session(
            session_id.clone(),
            authority_id.clone(),
            display_name.into(),
            seed,
            OffsetDateTime::now_utc(),
        );
        tokio::spawn(actor::run_session(
            state,
            self.config.clone(),
            mailbox,
            self.registry.clone(),
        ));

        info!(
            session_id = %session_id,
            authority_id = %authority_id,
            "Session created"
        );
        (session_id, handle)
    }

    fn handle(&self, id: &SessionId) -> Result<SessionHandle, GameError> {
        self.registry.get(id).ok_or(GameError::SessionNotFound)
    }

    pub async fn join_session(
        &self,
        id: &SessionId,
        participant_id: ParticipantId,
        display_name: impl Into<String>,
    ) -> Result<Role, GameError> {
        self.handle(id)?.join(participant_id, display_name).await
    }

    pub async fn leave_session(
        &self,
        id: &SessionId,
        participant_id: ParticipantId,
    ) -> Result<(), GameError> {
        self.handle(id)?.leave(participant_id).await
    }

    pub async fn deal(
        &self,
        id: &SessionId,
        by: ParticipantId,
    ) -> Result<DealOutcome, GameError> {
        self.handle(id)?.deal(by).await
    }

    pub async fn commit(
        &self,
        id: &SessionId,
        participant_id: ParticipantId,
        card: Card,
    ) -> Result<(), GameError> {
        self.handle(id)?.commit(participant_id, card).await
    }

    pub async fn resolve(
        &self,
        id: &SessionId,
        by: ParticipantId,
    ) -> Result<ResolveOutcome, GameError> {
        self.handle(id)?.resolve(by).await
    }

    pub async fn snapshot(
        &self,
        id: &SessionId,
        viewer: ParticipantId,
    ) -> Result<SessionSnapshot, GameError> {
        self.handle(id)?.snapshot(viewer).await
    }

    /// Number of live sessions.
    pub fn session_count(&self) -> usize {
        self.registry.len()
    }

    pub fn registry(&self) -> Arc<SessionRegistry> {
        self.registry.clone()
    }
}
