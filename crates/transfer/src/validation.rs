use crate::TransferError;

/// Longest accepted chunk-count literal: a leading non-zero digit plus
/// up to 20 more digits.
const MAX_CHUNK_COUNT_DIGITS: usize = 21;

/// Validates a declared chunk count.
///
/// Accepts a positive decimal integer with no leading zero, no sign,
/// and at most 21 digits. Values past `u64::MAX` are rejected even when
/// they fit the textual form.
pub fn validate_chunk_count(raw: &str) -> Result<u64, TransferError> {
    let invalid = || TransferError::InvalidChunkCount(raw.to_string());

    if raw.is_empty() || raw.len() > MAX_CHUNK_COUNT_DIGITS {
        return Err(invalid());
    }
    let mut digits = raw.chars();
    if !matches!(digits.next(), Some('1'..='9')) {
        return Err(invalid());
    }
    if !digits.all(|c| c.is_ascii_digit()) {
        return Err(invalid());
    }
    raw.parse::<u64>().map_err(|_| invalid())
}
