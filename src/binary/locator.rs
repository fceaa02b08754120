//! Signature seeking: leftmost exact byte match, reporting the offset just past it.

use crate::error::DetectorError;

/// Encode a signature literal as ASCII bytes; non-ASCII characters become `?`.
pub fn encode_ascii(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| if c.is_ascii() { c as u8 } else { b'?' })
        .collect()
}

/// Find the first occurrence of `needle` in `data` and return the offset right after it.
///
/// `Ok(None)` means the signature is not present. An empty needle is a caller bug and is
/// reported as [`DetectorError::EmptySignature`] rather than as a match at offset 0.
pub fn seek_after(data: &[u8], needle: &[u8]) -> Result<Option<usize>, DetectorError> {
    if needle.is_empty() {
        return Err(DetectorError::EmptySignature);
    }
    if needle.len() > data.len() {
        return Ok(None);
    }
    Ok(data
        .windows(needle.len())
        .position(|w| w == needle)
        .map(|start| start + needle.len()))
}
