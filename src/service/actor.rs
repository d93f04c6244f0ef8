//! The per-session actor task.
//!
//! Each session lives on exactly one tokio task that owns the [`Session`]
//! value outright. Commands arrive through an mpsc mailbox and are applied
//! one at a time, which is the whole concurrency story: no locks, no
//! compare-and-swap, no torn reads. The actor also arms a debounce timer
//! when auto-resolve is on, so a round resolves shortly after the last
//! commitment lands without any caller driving it.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::time::{sleep_until, Instant};
use tracing::{debug, info, warn};

use crate::config::EngineConfig;
use crate::domain::committing::{self, commit_card};
use crate::domain::game_transition::{derive_session_transitions, SessionLifecycleView};
use crate::domain::session::{self, ResolveOutcome};
use crate::domain::snapshot::snapshot_for;
use crate::domain::state::{Phase, Session};
use crate::service::command::SessionCommand;
use crate::service::registry::SessionRegistry;

/// Run a session to completion. Exits when every handle is dropped or the
/// last participant leaves, then removes the session from the registry.
pub(crate) async fn run_session(
    mut session: Session,
    config: EngineConfig,
    mut mailbox: mpsc::Receiver<SessionCommand>,
    registry: Arc<SessionRegistry>,
) {
    let session_id = session.id.clone();
    info!(session_id = %session_id, "Session actor started");

    let mut auto_resolve_at: Option<Instant> = None;

    loop {
        tokio::select! {
            command = mailbox.recv() => {
                let Some(command) = command else {
                    break;
                };
                let before = SessionLifecycleView::of(&session);
                apply_command(&mut session, &config, command);
                let after = SessionLifecycleView::of(&session);
                log_transitions(&session, &before, &after);

                if session.participants.is_empty() {
                    info!(session_id = %session_id, "Last participant left, shutting down");
                    break;
                }
                auto_resolve_at = next_deadline(&session, &config, auto_resolve_at);
            }
            _ = wait_until(auto_resolve_at), if auto_resolve_at.is_some() => {
                auto_resolve_at = None;
                let before = SessionLifecycleView::of(&session);
                resolve_automatically(&mut session);
                let after = SessionLifecycleView::of(&session);
                log_transitions(&session, &before, &after);
                auto_resolve_at = next_deadline(&session, &config, None);
            }
        }
    }

    registry.unregister(&session_id);
    info!(session_id = %session_id, "Session actor stopped");
}

async fn wait_until(deadline: Option<Instant>) {
    match deadline {
        Some(at) => sleep_until(at).await,
        None => std::future::pending().await,
    }
}

/// Compute the auto-resolve deadline after a state change.
///
/// An already armed deadline is kept rather than pushed out, so late
/// joins or snapshot traffic cannot postpone resolution indefinitely.
fn next_deadline(
    session: &Session,
    config: &EngineConfig,
    current: Option<Instant>,
) -> Option<Instant> {
    if !config.auto_resolve || session.phase != Phase::Playing || !committing::is_ready(session) {
        return None;
    }
    current.or_else(|| Some(Instant::now() + config.resolve_delay))
}

/// Resolve on behalf of the authority once the debounce fires.
fn resolve_automatically(session: &mut Session) {
    let authority = session.authority_id.clone();
    match session::resolve_turn(session, &authority) {
        Ok(ResolveOutcome::RoundResolved) => {
            info!(
                session_id = %session.id,
                game_no = session.game_no,
                round = session.round,
                "Auto-resolved round"
            );
        }
        Ok(ResolveOutcome::GameEnded) => {
            info!(
                session_id = %session.id,
                game_no = session.game_no,
                "Auto-resolve finished the game"
            );
        }
        Ok(ResolveOutcome::NotAuthority) | Ok(ResolveOutcome::NotReady) => {}
        Err(err) => {
            warn!(
                session_id = %session.id,
                error = %err,
                error_code = err.code(),
                "Auto-resolve rejected"
            );
        }
    }
}

fn apply_command(session: &mut Session, config: &EngineConfig, command: SessionCommand) {
    debug!(
        session_id = %session.id,
        command = command.name(),
        "Applying command"
    );

    match command {
        SessionCommand::Join {
            participant_id,
            display_name,
            reply,
        } => {
            let result = session::join_session(
                session,
                participant_id.clone(),
                display_name,
                config.max_participants,
            );
            if let Err(err) = &result {
                debug!(
                    session_id = %session.id,
                    participant_id = %participant_id,
                    error_code = err.code(),
                    "Join rejected"
                );
            }
            let _ = reply.send(result);
        }
        SessionCommand::Leave {
            participant_id,
            reply,
        } => {
            let result = session::leave_session(session, &participant_id);
            let _ = reply.send(result);
        }
        SessionCommand::Deal { by, reply } => {
            let result = session::start_game(session, &by, config.hand_size, config.min_active);
            if let Err(err) = &result {
                debug!(
                    session_id = %session.id,
                    participant_id = %by,
                    error_code = err.code(),
                    "Deal rejected"
                );
            }
            let _ = reply.send(result);
        }
        SessionCommand::Commit {
            participant_id,
            card,
            reply,
        } => {
            let result = commit_card(session, &participant_id, card);
            if let Err(err) = &result {
                debug!(
                    session_id = %session.id,
                    participant_id = %participant_id,
                    error_code = err.code(),
                    "Commit rejected"
                );
            }
            let _ = reply.send(result);
        }
        SessionCommand::Resolve { by, reply } => {
            let result = session::resolve_turn(session, &by);
            let _ = reply.send(result);
        }
        SessionCommand::Snapshot { viewer, reply } => {
            let _ = reply.send(snapshot_for(session, &viewer));
        }
    }
}

fn log_transitions(
    session: &Session,
    before: &SessionLifecycleView,
    after: &SessionLifecycleView,
) {
    for transition in derive_session_transitions(before, after) {
        info!(
            session_id = %session.id,
            version = session.version,
            transition = ?transition,
            "Session transition"
        );
    }
}
