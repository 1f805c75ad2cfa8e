//! Mapping live filesystem metadata onto portable modes
//!
//! Uses `symlink_metadata` so a link is always classified as the link itself,
//! never its target.

use crate::error::ClassificationError;
use crate::mode::bits::{FileModeBits, FileType, Permissions, SpecialFlags};
use std::fs::Metadata;
use std::path::Path;

/// Classify the filesystem object at `path` without following symlinks.
pub fn classify(path: &Path) -> Result<FileModeBits, ClassificationError> {
    let metadata = std::fs::symlink_metadata(path).map_err(|source| ClassificationError {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(classify_metadata(&metadata))
}

/// Derive a mode from already-read metadata.
pub fn classify_metadata(metadata: &Metadata) -> FileModeBits {
    let file_type = file_type_of(metadata);
    let (permissions, special) = permission_bits_of(metadata, file_type);
    FileModeBits::new(file_type, permissions).with_special(special)
}

#[cfg(unix)]
fn file_type_of(metadata: &Metadata) -> FileType {
    use std::os::unix::fs::FileTypeExt;

    let ft = metadata.file_type();
    if ft.is_symlink() {
        FileType::SymbolicLink
    } else if ft.is_dir() {
        FileType::Directory
    } else if ft.is_block_device() {
        FileType::Device
    } else if ft.is_char_device() {
        FileType::CharDevice
    } else if ft.is_fifo() {
        FileType::NamedPipe
    } else if ft.is_socket() {
        FileType::Socket
    } else {
        FileType::Regular
    }
}

#[cfg(not(unix))]
fn file_type_of(metadata: &Metadata) -> FileType {
    let ft = metadata.file_type();
    if ft.is_symlink() {
        FileType::SymbolicLink
    } else if ft.is_dir() {
        FileType::Directory
    } else {
        FileType::Regular
    }
}

#[cfg(unix)]
fn permission_bits_of(metadata: &Metadata, _file_type: FileType) -> (Permissions, SpecialFlags) {
    use std::os::unix::fs::PermissionsExt;

    const S_ISUID: u32 = 0o4000;
    const S_ISGID: u32 = 0o2000;
    const S_ISVTX: u32 = 0o1000;

    let raw = metadata.permissions().mode();
    let mut special = SpecialFlags::empty();
    if raw & S_ISUID != 0 {
        special |= SpecialFlags::SETUID;
    }
    if raw & S_ISGID != 0 {
        special |= SpecialFlags::SETGID;
    }
    if raw & S_ISVTX != 0 {
        special |= SpecialFlags::STICKY;
    }
    (Permissions::from_octal(raw), special)
}

// Only the read-only attribute exists here; synthesize the usual defaults.
#[cfg(not(unix))]
fn permission_bits_of(metadata: &Metadata, file_type: FileType) -> (Permissions, SpecialFlags) {
    let octal = match (file_type, metadata.permissions().readonly()) {
        (FileType::Directory, false) => 0o755,
        (FileType::Directory, true) => 0o555,
        (_, false) => 0o644,
        (_, true) => 0o444,
    };
    (Permissions::from_octal(octal), SpecialFlags::empty())
}
