//! Manifest-stable path rendering
//!
//! Manifest paths are relative to the walk root, use `/` on every platform,
//! and are Unicode NFC so the same tree yields the same bytes everywhere.

use crate::error::ManifestError;
use std::path::{Component, Path, PathBuf};
use unicode_normalization::UnicodeNormalization;

/// Path used for the walk root itself.
pub const ROOT_PATH: &str = ".";

/// Render `path` relative to `root` in manifest form.
pub fn manifest_path(root: &Path, path: &Path) -> Result<String, ManifestError> {
    let relative = path.strip_prefix(root).map_err(|_| {
        ManifestError::InvalidPath(format!(
            "{} is not under {}",
            path.display(),
            root.display()
        ))
    })?;
    relative_to_manifest(relative)
}

/// Render an already-relative path in manifest form.
pub fn relative_to_manifest(relative: &Path) -> Result<String, ManifestError> {
    let mut parts = Vec::new();
    for component in relative.components() {
        match component {
            Component::Normal(name) => {
                let name = name.to_str().ok_or_else(|| {
                    ManifestError::InvalidPath(format!(
                        "non UTF-8 path component in {}",
                        relative.display()
                    ))
                })?;
                parts.push(name.nfc().collect::<String>());
            }
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                return Err(ManifestError::InvalidPath(format!(
                    "{} escapes the manifest root",
                    relative.display()
                )));
            }
        }
    }

    if parts.is_empty() {
        Ok(ROOT_PATH.to_string())
    } else {
        Ok(parts.join("/"))
    }
}

/// Resolve a manifest path back onto a filesystem root.
pub fn resolve(root: &Path, manifest_path: &str) -> PathBuf {
    if manifest_path == ROOT_PATH {
        return root.to_path_buf();
    }
    manifest_path
        .split('/')
        .fold(root.to_path_buf(), |acc, part| acc.join(part))
}

/// Canonical absolute form of a root directory.
pub fn canonical_root(root: &Path) -> Result<PathBuf, ManifestError> {
    dunce::canonicalize(root).map_err(|e| {
        ManifestError::InvalidPath(format!("Failed to canonicalize {}: {}", root.display(), e))
    })
}
