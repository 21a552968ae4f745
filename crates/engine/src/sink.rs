use serde_json::value::RawValue;

use fileferry_protocol::ControlResponse;
use fileferry_transfer::SessionId;

/// Host-supplied transport operations.
///
/// The hosting runtime owns the peer connection and its handshake; the
/// engine only reacts to events and calls back through this trait. All
/// methods are fire-and-forget from the engine's point of view;
/// delivery failures are the transport's concern.
pub trait ChannelSink {
    /// Relays one data-channel message to the peer.
    fn relay_data(&self, id: SessionId, data: &[u8]);

    /// Pushes a control-plane event to the peer.
    ///
    /// `transaction` correlates the event to a deferred request;
    /// `handshake_answer` rides along when the event resolves a
    /// negotiation that arrived with a handshake offer.
    fn push_event(
        &self,
        id: SessionId,
        transaction: Option<&str>,
        event: &ControlResponse,
        handshake_answer: Option<&RawValue>,
    );

    /// Enables inbound and outbound payload capability for a
    /// connection. Called once during role selection, before any chunk
    /// moves.
    fn enable_payload(&self, id: SessionId);

    /// Produces the transport handshake answer for an opaque offer.
    ///
    /// The engine never interprets the offer or the answer; `None`
    /// means the host could not answer and the event is pushed without
    /// one.
    fn answer_handshake(&self, id: SessionId, offer: &RawValue) -> Option<Box<RawValue>>;
}
