fn main() {
    println!("Run `cargo test -p wire-compat` to execute wire compatibility tests.");
}

/// Compatibility tests against the messages the browser client actually
/// produces, captured as literal fixtures. If one of these breaks, the
/// wire format changed and deployed clients will notice.
#[cfg(test)]
mod tests {
    use fileferry_protocol::{
        ControlRequest, ControlResponse, ack_payload, decode_chunk, encode_chunk,
        UPLOAD_CHUNK_SIZE,
    };

    // --- Control-plane fixtures ---

    #[test]
    fn fixture_upload_role_selection() {
        let req = ControlRequest::from_json(r#"{"session_type":"fileupload"}"#).unwrap();
        assert_eq!(req.session_type.as_deref(), Some("fileupload"));
    }

    #[test]
    fn fixture_upload_configuration() {
        let req = ControlRequest::from_json(
            r#"{"savepath":"/tmp/uploaded.bin","chunks":"3"}"#,
        )
        .unwrap();
        assert_eq!(req.savepath.as_deref(), Some("/tmp/uploaded.bin"));
        assert_eq!(req.chunks.as_deref(), Some("3"));
    }

    #[test]
    fn fixture_download_role_selection() {
        let req = ControlRequest::from_json(
            r#"{"session_type":"filedownload","path":"/tmp/source.bin"}"#,
        )
        .unwrap();
        assert_eq!(req.session_type.as_deref(), Some("filedownload"));
        assert_eq!(req.path.as_deref(), Some("/tmp/source.bin"));
    }

    #[test]
    fn fixture_request_with_client_extras() {
        // The client bundles fields this core does not know; they must
        // not break parsing.
        let req = ControlRequest::from_json(
            r#"{"session_type":"fileupload","audio":false,"video":false,"data":true}"#,
        )
        .unwrap();
        assert_eq!(req.session_type.as_deref(), Some("fileupload"));
    }

    #[test]
    fn response_shapes_are_stable() {
        let ok = serde_json::to_string(&ControlResponse::ok("session type set to fileupload"))
            .unwrap();
        assert_eq!(ok, r#"{"info":"session type set to fileupload","result":"ok"}"#);

        let err =
            serde_json::to_string(&ControlResponse::error("session [1] not found")).unwrap();
        assert_eq!(err, r#"{"info":"session [1] not found","result":"error"}"#);

        let done =
            serde_json::to_string(&ControlResponse::completed("file download completed")).unwrap();
        assert_eq!(
            done,
            r#"{"info":"file download completed","result":"completed"}"#
        );
    }

    // --- Data-plane fixtures ---

    #[test]
    fn acknowledgement_literals() {
        assert_eq!(ack_payload(0), "ack-0");
        assert_eq!(ack_payload(1), "ack-1");
        assert_eq!(ack_payload(41), "ack-41");
    }

    #[test]
    fn chunk_encoding_matches_the_browser_encoder() {
        // The client maps 3 bytes to 4 symbols and pads tails with '='.
        assert_eq!(encode_chunk(b"Man"), "TWFu");
        assert_eq!(encode_chunk(b"Ma"), "TWE=");
        assert_eq!(encode_chunk(b"M"), "TQ==");
        assert_eq!(decode_chunk("TWFu").unwrap(), b"Man");
        assert_eq!(decode_chunk("TQ==").unwrap(), b"M");
    }

    #[test]
    fn a_full_browser_chunk_round_trips() {
        let chunk: Vec<u8> = (0..UPLOAD_CHUNK_SIZE).map(|i| (i % 256) as u8).collect();
        let encoded = encode_chunk(&chunk);
        // 48000 bytes is a multiple of 3: no padding on full chunks.
        assert_eq!(encoded.len(), UPLOAD_CHUNK_SIZE / 3 * 4);
        assert!(!encoded.ends_with('='));
        assert_eq!(decode_chunk(&encoded).unwrap(), chunk);
    }
}
