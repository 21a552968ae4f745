use std::collections::VecDeque;

use serde_json::value::RawValue;

use fileferry_protocol::ControlRequest;
use fileferry_transfer::SessionId;

/// A control request parked until the connection handshake is answered.
///
/// Requests that arrive bundled with a handshake offer cannot be
/// answered synchronously: the peer expects the negotiation result and
/// the handshake answer to arrive together, as one event.
#[derive(Debug)]
pub struct PendingNegotiation {
    /// Session the request belongs to.
    pub session_id: SessionId,
    /// Correlation token from the triggering message.
    pub transaction: String,
    /// The parsed control request, processed at drain time.
    pub request: ControlRequest,
    /// Opaque handshake offer, answered by the host at drain time.
    pub handshake: Box<RawValue>,
}

/// FIFO queue of deferred negotiations.
///
/// Drained to empty by the engine's resume operation; each entry is
/// processed at most once and then discarded.
#[derive(Debug, Default)]
pub struct PendingQueue {
    tasks: VecDeque<PendingNegotiation>,
}

impl PendingQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, task: PendingNegotiation) {
        self.tasks.push_back(task);
    }

    pub fn pop(&mut self) -> Option<PendingNegotiation> {
        self.tasks.pop_front()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}
