//! Heuristics flagged in the recovery report.
//!
//! Each check is evaluated independently; a row can carry several anomalies.

use crate::types::{Anomaly, DetectedType};

/// Evaluates the size, extension and hash-extension heuristics for one
/// recovered file. `extension` is the lowercased suffix with its leading dot.
pub fn evaluate(size: u64, detected: &DetectedType, extension: &str, sha256_hex: &str) -> Vec<Anomaly> {
    let mut anomalies = Vec::new();

    if size == 0 {
        anomalies.push(Anomaly::Corrupted);
    }
    if is_extension_mismatch(extension, detected) {
        anomalies.push(Anomaly::ExtensionMismatch);
    }
    if is_hash_extension_mismatch(extension, sha256_hex) {
        anomalies.push(Anomaly::HashExtensionMismatch);
    }
    anomalies
}

/// True when the extension appears neither in the detected MIME string nor
/// as the sniffer's own extension for the content.
///
/// The MIME string is searched for the extension first. Failing that, the
/// extension the sniffer reports for the content is accepted too, so `.txt`
/// passes for `text/plain` and `.jpg` passes for `image/jpeg`. Nothing is
/// flagged when the type is unknown or the file has no suffix.
pub fn is_extension_mismatch(extension: &str, detected: &DetectedType) -> bool {
    let token = extension_token(extension);
    if detected.mime.is_empty() || token.is_empty() {
        return false;
    }
    if detected.mime.to_ascii_lowercase().contains(&token) {
        return false;
    }
    detected.extension.as_deref() != Some(token.as_str())
}

/// True when the extension (dots removed) is not a substring of the hex
/// digest.
///
/// Placeholder check carried for report compatibility. Digest text has no
/// relation to file type; do not treat this as an integrity signal.
pub fn is_hash_extension_mismatch(extension: &str, sha256_hex: &str) -> bool {
    !sha256_hex.contains(&extension_token(extension))
}

fn extension_token(extension: &str) -> String {
    extension.replace('.', "").to_ascii_lowercase()
}
