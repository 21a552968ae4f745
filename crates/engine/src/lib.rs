//! Event-driven core of the file transfer service.
//!
//! The host embeds an [`Engine`] and forwards its connection callbacks
//! to it: session create/destroy, control messages (with or without an
//! attached transport handshake), data-channel readiness, inbound
//! payload, and the scheduler's resume tick. The engine owns all
//! per-session state and talks back to the transport exclusively
//! through [`ChannelSink`].

mod engine;
mod negotiator;
mod pending;
mod sink;

pub use engine::{Disposition, Engine};
pub use pending::{PendingNegotiation, PendingQueue};
pub use sink::ChannelSink;
