//! Control-plane negotiation: role selection and per-role
//! configuration.

use fileferry_protocol::{
    ControlRequest, ControlResponse, SESSION_TYPE_DOWNLOAD, SESSION_TYPE_UPLOAD,
};
use fileferry_transfer::{Role, TransferError, TransferSession, validate_chunk_count};

use crate::sink::ChannelSink;

/// Applies one control request to a session.
///
/// Rejections never terminate the session; they are reported in the
/// response and the peer may retry with corrected parameters.
pub(crate) fn process_request<S: ChannelSink>(
    session: &mut TransferSession,
    request: &ControlRequest,
    sink: &S,
) -> ControlResponse {
    match apply(session, request, sink) {
        Ok(info) => {
            tracing::debug!(session = session.id(), %info, "control request applied");
            ControlResponse::ok(info)
        }
        Err(err) => {
            tracing::warn!(session = session.id(), error = %err, "control request rejected");
            ControlResponse::error(err.to_string())
        }
    }
}

fn apply<S: ChannelSink>(
    session: &mut TransferSession,
    request: &ControlRequest,
    sink: &S,
) -> Result<String, TransferError> {
    if let Some(session_type) = request.session_type.as_deref() {
        return select_role(session, session_type, request, sink);
    }
    match session.role() {
        Role::Unset => Err(TransferError::SessionNotConfigured(
            "session type must be set first",
        )),
        Role::Upload => configure_upload(session, request),
        Role::Download => configure_download(session, request),
    }
}

/// One-time role selection; also opens the payload path on the host.
fn select_role<S: ChannelSink>(
    session: &mut TransferSession,
    session_type: &str,
    request: &ControlRequest,
    sink: &S,
) -> Result<String, TransferError> {
    if session.role() != Role::Unset {
        return Err(TransferError::RoleAlreadySet);
    }
    let role = match session_type {
        SESSION_TYPE_UPLOAD => Role::Upload,
        SESSION_TYPE_DOWNLOAD => Role::Download,
        other => return Err(TransferError::UnknownSessionType(other.to_string())),
    };
    session.set_role(role)?;
    if role == Role::Download {
        if let Some(path) = request.path.as_deref() {
            session.set_file_path(path);
        }
    }
    sink.enable_payload(session.id());
    Ok(format!("session type set to {session_type}"))
}

fn configure_upload(
    session: &mut TransferSession,
    request: &ControlRequest,
) -> Result<String, TransferError> {
    let mut applied = Vec::new();

    if let Some(savepath) = request.savepath.as_deref() {
        session.set_save_path(savepath);
        applied.push(format!("save path set to [{savepath}]"));
    }

    if let Some(chunks) = request.chunks.as_deref() {
        match validate_chunk_count(chunks) {
            Ok(count) => {
                session.set_expected_chunks(count);
                applied.push(format!("file to be received in [{count}] chunks"));
            }
            Err(err) => {
                session.clear_expected_chunks();
                return Err(err);
            }
        }
    }

    if applied.is_empty() {
        return Err(TransferError::UnrecognizedRequest);
    }
    Ok(applied.join(", "))
}

fn configure_download(
    session: &mut TransferSession,
    request: &ControlRequest,
) -> Result<String, TransferError> {
    match request.path.as_deref() {
        Some(path) => {
            session.set_file_path(path);
            Ok(format!("download path set to [{path}]"))
        }
        None => Err(TransferError::UnrecognizedRequest),
    }
}
