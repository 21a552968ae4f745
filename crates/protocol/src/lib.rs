//! Wire protocol types for data channel file transfers.
//!
//! A peer drives a transfer with small JSON control messages (role
//! selection, paths, chunk counts) and then exchanges file payload as
//! bounded-size chunks over the same channel. This crate defines the
//! control request/response shapes, the acknowledgement literal that
//! paces the sending side, and the text codec applied to binary chunks
//! on text-biased transports.

pub mod codec;
pub mod request;
pub mod response;

pub use codec::{CodecError, decode_chunk, encode_chunk};
pub use request::{ControlRequest, SESSION_TYPE_DOWNLOAD, SESSION_TYPE_UPLOAD};
pub use response::{ControlResponse, RequestOutcome};

/// Fixed chunk size when pushing a file to the peer (bytes).
///
/// Agreed with the client by convention; never renegotiated.
pub const DOWNLOAD_CHUNK_SIZE: usize = 64_000;

/// Chunk size browser senders use when pushing a file to us (bytes).
///
/// Advisory only: chunking in that direction is sender-controlled and
/// the receiver treats every inbound message as exactly one chunk.
pub const UPLOAD_CHUNK_SIZE: usize = 48_000;

/// Builds the acknowledgement payload for a received chunk index.
///
/// The peer confirms chunk `N` with the literal ASCII text `ack-N`;
/// the sender only advances once it sees the acknowledgement for the
/// chunk it last sent.
pub fn ack_payload(index: u64) -> String {
    format!("ack-{index}")
}
