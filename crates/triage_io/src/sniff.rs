//! Content sniffing from magic bytes, via the `infer` crate.
//!
//! `infer` only knows binary signatures, so plain text and empty files get
//! fallback types here.

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use triage_core::DetectedType;

/// Bytes read from the start of a file for detection.
pub const SNIFF_HEADER_SIZE: usize = 8192;

pub const MIME_EMPTY: &str = "application/x-empty";
pub const MIME_TEXT: &str = "text/plain";
pub const MIME_BINARY: &str = "application/octet-stream";

pub fn detect_file_type(path: &Path) -> io::Result<DetectedType> {
    let file = File::open(path)?;
    let mut header = Vec::with_capacity(SNIFF_HEADER_SIZE);
    file.take(SNIFF_HEADER_SIZE as u64).read_to_end(&mut header)?;
    Ok(detect_bytes(&header))
}

pub fn detect_bytes(header: &[u8]) -> DetectedType {
    if let Some(kind) = infer::get(header) {
        return DetectedType::new(kind.mime_type(), Some(kind.extension()));
    }

    if header.is_empty() {
        DetectedType::new(MIME_EMPTY, None)
    } else if looks_like_text(header) {
        DetectedType::new(MIME_TEXT, Some("txt"))
    } else {
        DetectedType::new(MIME_BINARY, None)
    }
}

/// UTF-8 without control bytes other than common whitespace. A multi-byte
/// character cut off at the end of the sample is tolerated.
fn looks_like_text(data: &[u8]) -> bool {
    let text = match std::str::from_utf8(data) {
        Ok(text) => text,
        Err(e) if e.error_len().is_none() => {
            match std::str::from_utf8(&data[..e.valid_up_to()]) {
                Ok(text) => text,
                Err(_) => return false,
            }
        }
        Err(_) => return false,
    };

    text.chars()
        .all(|c| !c.is_control() || matches!(c, '\n' | '\r' | '\t' | '\x0c'))
}
