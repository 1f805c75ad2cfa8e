//! Content identification using BLAKE3
//!
//! Identical byte streams always produce identical identifiers; the empty
//! stream produces [`ContentId::NULL`].

use crate::types::ContentId;
use blake3::Hasher;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

const READ_BUFFER_SIZE: usize = 64 * 1024;

/// Identify the full contents of a reader.
pub fn identify<R: Read>(reader: R) -> io::Result<ContentId> {
    identify_counted(reader).map(|(id, _)| id)
}

/// Identify a reader and report how many bytes went into the identifier.
pub fn identify_counted<R: Read>(mut reader: R) -> io::Result<(ContentId, u64)> {
    let mut hasher = Hasher::new();
    let mut buf = vec![0u8; READ_BUFFER_SIZE];
    let mut total = 0u64;
    loop {
        let n = match reader.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        hasher.update(&buf[..n]);
        total += n as u64;
    }
    Ok((ContentId::from_bytes(*hasher.finalize().as_bytes()), total))
}

/// Identify an in-memory byte slice.
pub fn identify_bytes(content: &[u8]) -> ContentId {
    let mut hasher = Hasher::new();
    hasher.update(content);
    ContentId::from_bytes(*hasher.finalize().as_bytes())
}

/// Identify the contents of the file at `path`.
///
/// Opening follows symlinks; callers that must not dereference links check the
/// mode first.
pub fn identify_file(path: &Path) -> io::Result<ContentId> {
    identify(File::open(path)?)
}

/// Identify a file and return the number of bytes read alongside it.
pub fn identify_file_counted(path: &Path) -> io::Result<(ContentId, u64)> {
    identify_counted(File::open(path)?)
}

/// The identifier of the empty byte stream.
pub fn null_id() -> ContentId {
    ContentId::NULL
}
