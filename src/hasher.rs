//! Content hashing for duplicate detection.
//!
//! Files are digested with SHA-256, read in fixed-size chunks so that
//! arbitrarily large installers never have to fit in memory. The digest is
//! rendered as a 64-character lowercase hex string and used as an equality
//! proxy when grouping duplicates.

use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

/// Chunk size for streaming reads.
const CHUNK_SIZE: usize = 4096;

/// Computes the SHA-256 digest of a file's full contents.
///
/// Reads the file in 4 KiB chunks regardless of file size. Any read failure
/// (permission denied, file vanished mid-read, I/O error) is returned to the
/// caller, which treats it as "skip this file" rather than aborting a scan.
pub fn hash_file(path: &Path) -> io::Result<String> {
    let file = File::open(path)?;
    let mut reader = BufReader::with_capacity(CHUNK_SIZE, file);
    let mut hasher = Sha256::new();
    let mut buffer = [0u8; CHUNK_SIZE];

    loop {
        let n = reader.read(&mut buffer)?;
        if n == 0 {
            break;
        }
        hasher.update(&buffer[..n]);
    }

    Ok(format!("{:x}", hasher.finalize()))
}
