use serde::{Deserialize, Serialize};

/// `session_type` value selecting the upload role (peer pushes to us).
pub const SESSION_TYPE_UPLOAD: &str = "fileupload";

/// `session_type` value selecting the download role (we push to the peer).
pub const SESSION_TYPE_DOWNLOAD: &str = "filedownload";

/// A control-plane request from the peer.
///
/// Every field is optional: role selection (`session_type`) arrives
/// first, role-specific configuration (`savepath`/`chunks` for uploads,
/// `path` for downloads) in later messages. Unknown extra fields are
/// ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ControlRequest {
    /// One-time role selection: `"fileupload"` or `"filedownload"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_type: Option<String>,
    /// Download role: source file to read and push.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Upload role: destination file for received chunks.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub savepath: Option<String>,
    /// Upload role: declared chunk count, as a decimal string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chunks: Option<String>,
}

impl ControlRequest {
    /// Parses a request from its JSON text form.
    pub fn from_json(msg: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(msg)
    }
}
