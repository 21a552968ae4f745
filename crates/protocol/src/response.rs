use serde::{Deserialize, Serialize};

/// Outcome tag carried in every control response and pushed event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestOutcome {
    /// The request was applied.
    Ok,
    /// The request was rejected; the session is unchanged and usable.
    Error,
    /// A transfer finished (pushed events only, never a direct reply).
    Completed,
}

/// Control-plane response or pushed event: `{ "info": ..., "result": ... }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControlResponse {
    /// Human-readable detail for the peer.
    pub info: String,
    pub result: RequestOutcome,
}

impl ControlResponse {
    /// A successful response.
    pub fn ok(info: impl Into<String>) -> Self {
        Self {
            info: info.into(),
            result: RequestOutcome::Ok,
        }
    }

    /// A rejection. Control-plane errors are recoverable: the peer may
    /// retry with corrected parameters.
    pub fn error(info: impl Into<String>) -> Self {
        Self {
            info: info.into(),
            result: RequestOutcome::Error,
        }
    }

    /// A transfer-completion event.
    pub fn completed(info: impl Into<String>) -> Self {
        Self {
            info: info.into(),
            result: RequestOutcome::Completed,
        }
    }

    /// `true` when the request was applied.
    pub fn is_ok(&self) -> bool {
        self.result == RequestOutcome::Ok
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ok_wire_shape() {
        let json = serde_json::to_string(&ControlResponse::ok("session type set to fileupload"))
            .unwrap();
        assert_eq!(
            json,
            r#"{"info":"session type set to fileupload","result":"ok"}"#
        );
    }

    #[test]
    fn error_wire_shape() {
        let json = serde_json::to_string(&ControlResponse::error("session type is already set"))
            .unwrap();
        assert_eq!(
            json,
            r#"{"info":"session type is already set","result":"error"}"#
        );
    }

    #[test]
    fn completed_wire_shape() {
        let json =
            serde_json::to_string(&ControlResponse::completed("file upload completed")).unwrap();
        assert_eq!(
            json,
            r#"{"info":"file upload completed","result":"completed"}"#
        );
    }

    #[test]
    fn json_roundtrip() {
        let resp = ControlResponse::error("invalid chunk count [007]");
        let json = serde_json::to_string(&resp).unwrap();
        let parsed: ControlResponse = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, resp);
        assert!(!parsed.is_ok());
    }
}
