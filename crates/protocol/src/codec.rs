//! Transport-safe chunk encoding.
//!
//! The data channel is text-biased, so binary chunks cannot cross it
//! as-is: senders map every 3 raw bytes to 4 symbols from the standard
//! 64-symbol alphabet (`A–Z a–z 0–9 + /`), padding a 1-byte tail with
//! `==` and a 2-byte tail with `=`. Decoding is the exact inverse and
//! rejects anything that is not canonical: wrong length, foreign
//! symbols, bad padding, or non-zero trailing bits.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

/// Error returned for input that is not a canonical chunk encoding.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    #[error("malformed chunk encoding: {0}")]
    MalformedEncoding(#[from] base64::DecodeError),
}

/// Encodes raw chunk bytes into their transport text form.
pub fn encode_chunk(data: &[u8]) -> String {
    STANDARD.encode(data)
}

/// Decodes the transport text form back into raw chunk bytes.
///
/// Inverse of [`encode_chunk`] for every byte sequence, including the
/// empty one.
pub fn decode_chunk(text: &str) -> Result<Vec<u8>, CodecError> {
    Ok(STANDARD.decode(text)?)
}
