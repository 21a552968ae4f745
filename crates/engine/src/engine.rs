//! Dispatch of host callbacks onto per-session transfer state.

use serde_json::value::RawValue;

use fileferry_protocol::{codec, ControlRequest, ControlResponse};
use fileferry_transfer::receiver::{self, ReceiveOutcome};
use fileferry_transfer::sender::{self, SendStep};
use fileferry_transfer::{
    Role, SessionId, SessionInfo, SessionRegistry, TransferError, TransferSession,
};

use crate::negotiator;
use crate::pending::{PendingNegotiation, PendingQueue};
use crate::sink::ChannelSink;

/// How a control message was resolved.
#[derive(Debug, Clone, PartialEq)]
pub enum Disposition {
    /// Answered synchronously; relay the response to the peer.
    Reply(ControlResponse),
    /// Parked until the handshake is answered; the result will arrive
    /// as a pushed event after the next resume.
    Deferred,
}

/// The per-process transfer engine.
///
/// Owns every session and the deferred-negotiation queue. Methods map
/// one-to-one onto host callbacks and run to completion synchronously;
/// the single event-processing thread is the only mutator, so no
/// per-session locking exists.
pub struct Engine<S: ChannelSink> {
    registry: SessionRegistry,
    pending: PendingQueue,
    sink: S,
}

impl<S: ChannelSink> Engine<S> {
    /// Creates an engine that talks to the transport through `sink`.
    pub fn new(sink: S) -> Self {
        Self {
            registry: SessionRegistry::new(),
            pending: PendingQueue::new(),
            sink,
        }
    }

    /// The transport sink the engine was built with.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Registers a newly established connection.
    pub fn create_session(&mut self, id: SessionId) -> Result<(), TransferError> {
        self.registry.create(id)
    }

    /// Tears down a connection, discarding all transfer state for it.
    ///
    /// Queued negotiations for the id stay in the queue but are skipped
    /// when drained.
    pub fn destroy_session(&mut self, id: SessionId) {
        self.registry.destroy(id);
    }

    /// Snapshot of a session for host introspection.
    pub fn query_session(&self, id: SessionId) -> Option<SessionInfo> {
        self.registry.info(id)
    }

    /// Number of live sessions.
    pub fn session_count(&self) -> usize {
        self.registry.len()
    }

    /// Handles one control message for a session.
    ///
    /// With `handshake` attached the request is queued for the next
    /// [`resume_pending`](Self::resume_pending) pass and `Deferred` is
    /// returned; otherwise the request is processed in place. A missing
    /// session is answered immediately in both cases.
    pub fn handle_message(
        &mut self,
        id: SessionId,
        transaction: &str,
        msg: &str,
        handshake: Option<Box<RawValue>>,
    ) -> Disposition {
        let Some(session) = self.registry.get_mut(id) else {
            tracing::warn!(session = id, "control message for unknown session");
            return Disposition::Reply(ControlResponse::error(
                TransferError::SessionNotFound(id).to_string(),
            ));
        };

        let request = match ControlRequest::from_json(msg) {
            Ok(request) => request,
            Err(err) => {
                tracing::warn!(session = id, error = %err, "malformed control message");
                return Disposition::Reply(ControlResponse::error(format!(
                    "malformed control message: {err}"
                )));
            }
        };

        if let Some(handshake) = handshake {
            self.pending.push(PendingNegotiation {
                session_id: id,
                transaction: transaction.to_string(),
                request,
                handshake,
            });
            tracing::debug!(
                session = id,
                pending = self.pending.len(),
                "negotiation deferred until handshake answer"
            );
            return Disposition::Deferred;
        }

        Disposition::Reply(negotiator::process_request(session, &request, &self.sink))
    }

    /// Drains the deferred-negotiation queue, in FIFO order.
    ///
    /// Invoked by the host scheduler. Each entry is processed at most
    /// once: the control request runs through the negotiator and its
    /// response is pushed to the peer together with the host-generated
    /// handshake answer. Entries whose session was destroyed in the
    /// meantime are dropped. `&mut self` makes the drain non-reentrant
    /// by construction.
    pub fn resume_pending(&mut self) {
        while let Some(task) = self.pending.pop() {
            let Some(session) = self.registry.get_mut(task.session_id) else {
                tracing::debug!(
                    session = task.session_id,
                    "dropping pending negotiation for destroyed session"
                );
                continue;
            };
            let response = negotiator::process_request(session, &task.request, &self.sink);
            let answer = self.sink.answer_handshake(task.session_id, &task.handshake);
            self.sink.push_event(
                task.session_id,
                Some(&task.transaction),
                &response,
                answer.as_deref(),
            );
        }
    }

    /// The data channel for `id` became usable.
    ///
    /// Download sessions start pushing immediately; later chunks are
    /// paced by acknowledgements. Upload sessions have nothing to
    /// start.
    pub fn channel_up(&mut self, id: SessionId) {
        let Some(session) = self.registry.get_mut(id) else {
            tracing::warn!(session = id, "channel up for unknown session");
            return;
        };
        if session.role() != Role::Download {
            return;
        }
        if let Err(err) = sender::begin(session) {
            tracing::warn!(session = id, error = %err, "cannot start download");
            self.sink
                .push_event(id, None, &ControlResponse::error(err.to_string()), None);
            return;
        }
        push_next_chunk(session, &self.sink);
    }

    /// Dispatches one inbound data-channel payload.
    ///
    /// Data-plane anomalies never fail the session: they are logged and
    /// the payload is dropped.
    pub fn incoming_data(&mut self, id: SessionId, payload: &[u8]) {
        let Some(session) = self.registry.get_mut(id) else {
            tracing::warn!(session = id, "payload for unknown session");
            return;
        };
        match session.role() {
            Role::Unset => {
                tracing::warn!(session = id, "payload before session type was set");
            }
            Role::Upload => accept_upload_chunk(session, payload, &self.sink),
            Role::Download => {
                if sender::acknowledges_last_chunk(session, payload) {
                    push_next_chunk(session, &self.sink);
                } else {
                    tracing::debug!(
                        session = id,
                        len = payload.len(),
                        "ignoring non-acknowledgement payload"
                    );
                }
            }
        }
    }
}

/// Decodes and persists one upload chunk, pushing the completion event
/// when the declared count is reached.
fn accept_upload_chunk<S: ChannelSink>(session: &mut TransferSession, payload: &[u8], sink: &S) {
    let text = match std::str::from_utf8(payload) {
        Ok(text) => text,
        Err(err) => {
            tracing::warn!(session = session.id(), error = %err, "upload chunk is not text");
            return;
        }
    };
    let data = match codec::decode_chunk(text) {
        Ok(data) => data,
        Err(err) => {
            tracing::warn!(session = session.id(), error = %err, "dropping undecodable chunk");
            return;
        }
    };
    match receiver::accept_chunk(session, &data) {
        Ok(ReceiveOutcome::Accepted { received, expected }) => {
            tracing::debug!(session = session.id(), received, expected, "chunk stored");
        }
        Ok(ReceiveOutcome::Completed { received }) => {
            tracing::info!(session = session.id(), chunks = received, "file upload completed");
            sink.push_event(
                session.id(),
                None,
                &ControlResponse::completed("file upload completed"),
                None,
            );
        }
        Err(err) => {
            tracing::warn!(session = session.id(), error = %err, "upload chunk rejected");
        }
    }
}

/// Produces and relays the next download chunk, or the completion event
/// at end of file.
fn push_next_chunk<S: ChannelSink>(session: &mut TransferSession, sink: &S) {
    match sender::next_chunk(session) {
        Ok(SendStep::Chunk { index, data }) => {
            tracing::debug!(
                session = session.id(),
                chunk = index,
                len = data.len(),
                "relaying chunk"
            );
            sink.relay_data(session.id(), &data);
        }
        Ok(SendStep::Completed) => {
            tracing::info!(session = session.id(), "file download completed");
            sink.push_event(
                session.id(),
                None,
                &ControlResponse::completed("file download completed"),
                None,
            );
        }
        Ok(SendStep::AlreadyComplete) => {}
        Err(err) => {
            tracing::warn!(session = session.id(), error = %err, "failed to read next chunk");
        }
    }
}
