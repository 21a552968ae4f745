//! Receiving side of an upload: persist inbound chunks and detect
//! completion.

use std::fs::OpenOptions;
use std::io::Write;

use crate::session::TransferSession;
use crate::TransferError;

/// What accepting one inbound chunk did to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReceiveOutcome {
    /// Chunk persisted; more are expected.
    Accepted { received: u64, expected: u64 },
    /// Chunk persisted and it was the last one declared.
    Completed { received: u64 },
}

/// Accepts one inbound payload chunk for an upload session.
///
/// Bytes are appended to the configured save path in arrival order; the
/// protocol has no resequencing, so out-of-order delivery corrupts the
/// output. Chunk sizing is the sender's decision: every call counts as
/// exactly one chunk no matter how many bytes arrived.
pub fn accept_chunk(
    session: &mut TransferSession,
    data: &[u8],
) -> Result<ReceiveOutcome, TransferError> {
    let save_path = session
        .save_path()
        .ok_or(TransferError::SessionNotConfigured("save path not set"))?
        .to_path_buf();
    let expected = session
        .expected_chunks()
        .ok_or(TransferError::SessionNotConfigured("chunk count not set"))?;

    if session.received_chunks() >= expected {
        return Err(TransferError::TransferAlreadyComplete);
    }

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&save_path)?;
    file.write_all(data)?;

    let received = session.record_received_chunk();
    tracing::debug!(
        session = session.id(),
        chunk = received,
        len = data.len(),
        "persisted chunk"
    );

    if received >= expected {
        Ok(ReceiveOutcome::Completed { received })
    } else {
        Ok(ReceiveOutcome::Accepted { received, expected })
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;
    use crate::session::Role;

    fn upload_session(dir: &TempDir, chunks: u64) -> TransferSession {
        let mut session = TransferSession::new(1);
        session.set_role(Role::Upload).unwrap();
        session.set_save_path(dir.path().join("out.bin"));
        session.set_expected_chunks(chunks);
        session
    }

    #[test]
    fn appends_chunks_in_arrival_order() {
        let dir = TempDir::new().unwrap();
        let mut session = upload_session(&dir, 2);

        let outcome = accept_chunk(&mut session, b"hello").unwrap();
        assert_eq!(
            outcome,
            ReceiveOutcome::Accepted {
                received: 1,
                expected: 2
            }
        );

        let outcome = accept_chunk(&mut session, b"abc").unwrap();
        assert_eq!(outcome, ReceiveOutcome::Completed { received: 2 });

        let content = std::fs::read(dir.path().join("out.bin")).unwrap();
        assert_eq!(&content, b"helloabc");
    }

    #[test]
    fn chunk_sizes_are_sender_controlled() {
        // 3 chunks of wildly different sizes; the receiver only counts
        // messages, never bytes.
        let dir = TempDir::new().unwrap();
        let mut session = upload_session(&dir, 3);

        accept_chunk(&mut session, &[0u8; 1]).unwrap();
        accept_chunk(&mut session, &[1u8; 4096]).unwrap();
        let outcome = accept_chunk(&mut session, &[2u8; 7]).unwrap();
        assert_eq!(outcome, ReceiveOutcome::Completed { received: 3 });

        let content = std::fs::read(dir.path().join("out.bin")).unwrap();
        assert_eq!(content.len(), 1 + 4096 + 7);
    }

    #[test]
    fn rejects_chunk_after_completion() {
        let dir = TempDir::new().unwrap();
        let mut session = upload_session(&dir, 1);

        accept_chunk(&mut session, b"only").unwrap();
        let err = accept_chunk(&mut session, b"extra").unwrap_err();
        assert!(matches!(err, TransferError::TransferAlreadyComplete));

        // The rejected chunk was not written and not counted.
        assert_eq!(session.received_chunks(), 1);
        let content = std::fs::read(dir.path().join("out.bin")).unwrap();
        assert_eq!(&content, b"only");
    }

    #[test]
    fn requires_save_path() {
        let mut session = TransferSession::new(1);
        session.set_role(Role::Upload).unwrap();
        session.set_expected_chunks(1);

        let err = accept_chunk(&mut session, b"data").unwrap_err();
        assert!(matches!(err, TransferError::SessionNotConfigured(_)));
        assert_eq!(session.received_chunks(), 0);
    }

    #[test]
    fn requires_chunk_count() {
        let dir = TempDir::new().unwrap();
        let mut session = TransferSession::new(1);
        session.set_role(Role::Upload).unwrap();
        session.set_save_path(dir.path().join("out.bin"));

        let err = accept_chunk(&mut session, b"data").unwrap_err();
        assert!(matches!(err, TransferError::SessionNotConfigured(_)));
    }

    #[test]
    fn empty_chunk_still_counts() {
        let dir = TempDir::new().unwrap();
        let mut session = upload_session(&dir, 2);

        accept_chunk(&mut session, b"").unwrap();
        assert_eq!(session.received_chunks(), 1);
    }
}
