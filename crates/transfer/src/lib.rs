//! Transfer session state and chunked file I/O.
//!
//! One [`TransferSession`] exists per logical connection, owned by the
//! [`SessionRegistry`] for the connection's lifetime. The receiving
//! side appends inbound chunks to disk ([`receiver`]); the sending side
//! reads a file one bounded chunk at a time and advances only on
//! acknowledgement ([`sender`]).

mod registry;
mod session;
mod validation;

pub mod receiver;
pub mod sender;

pub use registry::SessionRegistry;
pub use session::{Role, SendStatus, SessionId, SessionInfo, TransferSession};
pub use validation::validate_chunk_count;

/// Errors produced by the transfer crate.
///
/// All of these are recoverable: none terminates a session. The only
/// destructive operation is explicit teardown via
/// [`SessionRegistry::destroy`].
#[derive(Debug, thiserror::Error)]
pub enum TransferError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("session [{0}] not found")]
    SessionNotFound(SessionId),

    #[error("session [{0}] already exists")]
    DuplicateSession(SessionId),

    #[error("session type is already set")]
    RoleAlreadySet,

    #[error("unknown session type [{0}]")]
    UnknownSessionType(String),

    #[error("session not configured: {0}")]
    SessionNotConfigured(&'static str),

    #[error("invalid chunk count [{0}]")]
    InvalidChunkCount(String),

    #[error("transfer already complete")]
    TransferAlreadyComplete,

    #[error("unrecognized request for this session type")]
    UnrecognizedRequest,
}
