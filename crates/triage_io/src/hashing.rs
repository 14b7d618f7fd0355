use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use tracing::warn;

/// Read size used when streaming a file through the hasher.
pub const HASH_CHUNK_SIZE: usize = 4096;

/// Lowercase hex SHA-256 of a file, read in fixed-size chunks.
pub fn sha256_file(path: &Path) -> io::Result<String> {
    let mut file = File::open(path)?;
    let mut hasher = Sha256::new();
    let mut buffer = [0u8; HASH_CHUNK_SIZE];

    loop {
        let n = match file.read(&mut buffer) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        hasher.update(&buffer[..n]);
    }

    Ok(hex::encode(hasher.finalize()))
}

/// Like [`sha256_file`], but an unreadable file yields an empty digest.
pub fn sha256_file_or_empty(path: &Path) -> String {
    match sha256_file(path) {
        Ok(digest) => digest,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "could not hash file");
            String::new()
        }
    }
}
