use std::collections::HashMap;

use crate::session::{SessionId, SessionInfo, TransferSession};
use crate::TransferError;

/// Owns every live transfer session, keyed by connection identity.
///
/// Sessions are created when the host reports a new connection and
/// destroyed on teardown; every other component resolves a session
/// through the registry before acting on it.
#[derive(Debug, Default)]
pub struct SessionRegistry {
    sessions: HashMap<SessionId, TransferSession>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a fresh role-less session for `id`.
    pub fn create(&mut self, id: SessionId) -> Result<(), TransferError> {
        if self.sessions.contains_key(&id) {
            return Err(TransferError::DuplicateSession(id));
        }
        self.sessions.insert(id, TransferSession::new(id));
        tracing::info!(session = id, "created session");
        Ok(())
    }

    /// Removes the session for `id`, discarding any in-flight transfer
    /// state.
    ///
    /// Destroying an unknown id is a non-fatal no-op; it happens when
    /// teardown races a connection that never finished establishment.
    pub fn destroy(&mut self, id: SessionId) {
        if self.sessions.remove(&id).is_some() {
            tracing::info!(session = id, "destroyed session");
        } else {
            tracing::debug!(session = id, "destroy of unknown session ignored");
        }
    }

    pub fn get(&self, id: SessionId) -> Option<&TransferSession> {
        self.sessions.get(&id)
    }

    pub fn get_mut(&mut self, id: SessionId) -> Option<&mut TransferSession> {
        self.sessions.get_mut(&id)
    }

    /// Snapshot of a session for host introspection.
    pub fn info(&self, id: SessionId) -> Option<SessionInfo> {
        self.sessions.get(&id).map(TransferSession::info)
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
