use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::TransferError;

/// Connection identity assigned by the host, stable for the
/// connection's lifetime.
pub type SessionId = u64;

/// Direction of a transfer session, fixed once selected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// No role selected yet; payload is neither accepted nor produced.
    #[default]
    Unset,
    /// Receive chunks from the peer and persist them.
    Upload,
    /// Read a local file and push chunks to the peer.
    Download,
}

/// Sending-side progress state of a download session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SendStatus {
    #[default]
    Idle,
    Sending,
    Completed,
}

/// Per-connection transfer state.
///
/// Created empty when the connection is established, configured by
/// control messages, advanced by the receiver or sender, and discarded
/// on teardown. Partial transfers do not survive their connection.
#[derive(Debug)]
pub struct TransferSession {
    id: SessionId,
    role: Role,
    file_path: Option<PathBuf>,
    save_path: Option<PathBuf>,
    expected_chunks: Option<u64>,
    received_chunks: u64,
    sent_chunk_index: u64,
    send_status: SendStatus,
}

impl TransferSession {
    /// Creates an empty, role-less session.
    pub fn new(id: SessionId) -> Self {
        Self {
            id,
            role: Role::Unset,
            file_path: None,
            save_path: None,
            expected_chunks: None,
            received_chunks: 0,
            sent_chunk_index: 0,
            send_status: SendStatus::Idle,
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn role(&self) -> Role {
        self.role
    }

    /// Selects the session role. Fails once a role has been set.
    pub fn set_role(&mut self, role: Role) -> Result<(), TransferError> {
        if self.role != Role::Unset {
            return Err(TransferError::RoleAlreadySet);
        }
        self.role = role;
        Ok(())
    }

    /// Source file a download session reads from.
    pub fn file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }

    pub fn set_file_path(&mut self, path: impl Into<PathBuf>) {
        self.file_path = Some(path.into());
    }

    /// Destination an upload session appends received chunks to.
    pub fn save_path(&self) -> Option<&Path> {
        self.save_path.as_deref()
    }

    pub fn set_save_path(&mut self, path: impl Into<PathBuf>) {
        self.save_path = Some(path.into());
    }

    /// Chunk count the peer declared for an upload.
    pub fn expected_chunks(&self) -> Option<u64> {
        self.expected_chunks
    }

    pub fn set_expected_chunks(&mut self, count: u64) {
        self.expected_chunks = Some(count);
    }

    /// Clears the declared chunk count after an invalid value.
    pub fn clear_expected_chunks(&mut self) {
        self.expected_chunks = None;
    }

    pub fn received_chunks(&self) -> u64 {
        self.received_chunks
    }

    /// Counts one more received chunk and returns the new total.
    pub(crate) fn record_received_chunk(&mut self) -> u64 {
        self.received_chunks += 1;
        self.received_chunks
    }

    /// Index of the next chunk to send (0-based).
    pub fn sent_chunk_index(&self) -> u64 {
        self.sent_chunk_index
    }

    pub(crate) fn advance_sent_chunk(&mut self) {
        self.sent_chunk_index += 1;
    }

    pub fn send_status(&self) -> SendStatus {
        self.send_status
    }

    pub(crate) fn begin_sending(&mut self) {
        self.send_status = SendStatus::Sending;
        self.sent_chunk_index = 0;
    }

    pub(crate) fn complete_sending(&mut self) {
        self.send_status = SendStatus::Completed;
    }

    /// `true` once every declared upload chunk has been received.
    pub fn upload_complete(&self) -> bool {
        matches!(self.expected_chunks, Some(expected) if self.received_chunks >= expected)
    }

    /// Snapshot of this session for host introspection.
    pub fn info(&self) -> SessionInfo {
        SessionInfo {
            id: self.id,
            role: self.role,
            received_chunks: self.received_chunks,
            sent_chunk_index: self.sent_chunk_index,
            send_status: self.send_status,
        }
    }
}

/// Serializable snapshot of a session's state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SessionInfo {
    pub id: SessionId,
    pub role: Role,
    pub received_chunks: u64,
    pub sent_chunk_index: u64,
    pub send_status: SendStatus,
}
