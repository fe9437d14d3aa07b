//! Character encoding detection for filing text exports.
//!
//! DART text exports arrive in a mix of encodings (EUC-KR from older
//! tooling, UTF-8 and UTF-16 from newer ones). Detection checks for a BOM
//! first, then falls back to statistical detection via chardetng. The
//! detector's best guess is trusted as-is; decoding is strict and a file
//! that does not decode cleanly with the detected encoding is an error, not
//! a candidate for another attempt.

use std::fs;
use std::path::Path;

use chardetng::EncodingDetector;
use encoding_rs::Encoding;

use crate::error::{DataError, Result};

/// Detect the character encoding of a byte buffer.
///
/// A BOM wins when present; otherwise chardetng's statistical guess is
/// returned without any confidence check. Empty buffers are UTF-8.
pub fn detect_encoding(buffer: &[u8]) -> &'static Encoding {
    if let Some((encoding, _bom_len)) = Encoding::for_bom(buffer) {
        return encoding;
    }
    let mut detector = EncodingDetector::new();
    detector.feed(buffer, true);
    detector.guess(None, true)
}

/// Read a file and decode it with its detected encoding.
///
/// # Errors
///
/// Returns [`DataError::Io`] if the file cannot be read and
/// [`DataError::Decode`] naming the file and the detected encoding if the
/// bytes do not decode cleanly. There is no fallback decode.
pub fn read_to_string(path: &Path) -> Result<String> {
    let buffer = fs::read(path)?;
    let encoding = detect_encoding(&buffer);
    let (text, _actual, had_errors) = encoding.decode(&buffer);
    if had_errors {
        return Err(DataError::Decode {
            path: path.to_path_buf(),
            encoding: encoding.name(),
        });
    }
    Ok(text.into_owned())
}
