//! Sending side of a download: stop-and-wait chunk pacing.
//!
//! One chunk is outstanding at a time. The peer confirms chunk `N` with
//! the literal payload `ack-N`, and only then is chunk `N + 1` read and
//! produced. There is no timeout or retransmission: a lost
//! acknowledgement stalls the transfer until the connection is torn
//! down.

use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::Path;

use fileferry_protocol::{DOWNLOAD_CHUNK_SIZE, ack_payload};

use crate::session::{SendStatus, TransferSession};
use crate::TransferError;

/// One step of the sending state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendStep {
    /// A chunk to relay to the peer; its acknowledgement gates the next
    /// one.
    Chunk { index: u64, data: Vec<u8> },
    /// The end of the file was reached; the session is now completed.
    Completed,
    /// The transfer had already completed earlier; nothing was done.
    AlreadyComplete,
}

/// Marks a download session ready to send, starting from chunk 0.
pub fn begin(session: &mut TransferSession) -> Result<(), TransferError> {
    if session.file_path().is_none() {
        return Err(TransferError::SessionNotConfigured(
            "path not set, unable to read file",
        ));
    }
    session.begin_sending();
    Ok(())
}

/// Reads and produces the next chunk for a sending session.
///
/// Advances the chunk cursor on success. Completion is detected by the
/// read at the cursor offset yielding no data, so a file whose length
/// is an exact multiple of the chunk size takes one extra call to
/// finish.
pub fn next_chunk(session: &mut TransferSession) -> Result<SendStep, TransferError> {
    if session.send_status() == SendStatus::Completed {
        return Ok(SendStep::AlreadyComplete);
    }
    let path = session
        .file_path()
        .ok_or(TransferError::SessionNotConfigured(
            "path not set, unable to read file",
        ))?
        .to_path_buf();

    let offset = DOWNLOAD_CHUNK_SIZE as u64 * session.sent_chunk_index();
    match read_chunk_at(&path, offset, DOWNLOAD_CHUNK_SIZE)? {
        Some(data) => {
            let index = session.sent_chunk_index();
            session.advance_sent_chunk();
            Ok(SendStep::Chunk { index, data })
        }
        None => {
            session.complete_sending();
            Ok(SendStep::Completed)
        }
    }
}

/// `true` when `payload` acknowledges the chunk most recently sent.
///
/// Anything else (duplicate acks, unrelated traffic) is not an error;
/// the caller simply drops it.
pub fn acknowledges_last_chunk(session: &TransferSession, payload: &[u8]) -> bool {
    let sent = session.sent_chunk_index();
    if sent == 0 {
        return false;
    }
    payload == ack_payload(sent - 1).as_bytes()
}

/// Reads up to `len` bytes from `path` at `offset`.
///
/// Returns `None` at or past end of file. The file is reopened per
/// call; reads are bounded to one chunk so each host callback stays
/// short.
fn read_chunk_at(path: &Path, offset: u64, len: usize) -> Result<Option<Vec<u8>>, TransferError> {
    let mut file = File::open(path)?;
    file.seek(SeekFrom::Start(offset))?;

    let mut buf = vec![0u8; len];
    let mut filled = 0;
    loop {
        let n = file.read(&mut buf[filled..])?;
        if n == 0 {
            break;
        }
        filled += n;
        if filled == buf.len() {
            break;
        }
    }
    if filled == 0 {
        return Ok(None);
    }
    buf.truncate(filled);
    Ok(Some(buf))
}
