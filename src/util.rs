//! Text decoding helpers.

use std::borrow::Cow;

/// Decode bytes to a string.
///
/// This function:
/// 1. First tries UTF-8 (handles BOM automatically via encoding_rs)
/// 2. Falls back to Windows-1252 (common in files saved by older editors)
///
/// Uses `Cow<str>` to avoid allocation when the input is valid UTF-8
/// without a BOM.
pub fn decode_text(bytes: &[u8]) -> Cow<'_, str> {
    let (result, _encoding, malformed) = encoding_rs::UTF_8.decode(bytes);

    if !malformed {
        return result;
    }

    log::debug!("event=decode_fallback encoding=windows-1252 bytes={}", bytes.len());
    let (result, _, _) = encoding_rs::WINDOWS_1252.decode(bytes);
    result
}
