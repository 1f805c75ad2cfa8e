//! Filesystem walker for manifest traversal

use crate::error::{ClassificationError, ManifestError};
use crate::path;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Walker configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalkerConfig {
    /// Dereference symlinks before classifying and identifying them
    #[serde(default)]
    pub follow_symlinks: bool,
    /// Entry names to skip (matched against each path component)
    #[serde(default)]
    pub ignore_patterns: Vec<String>,
    /// Maximum depth to traverse; the root is depth 0, so `Some(0)` yields
    /// only the root (None = unlimited)
    #[serde(default)]
    pub max_depth: Option<usize>,
    /// Emit an entry for the root directory itself
    #[serde(default)]
    pub include_root: bool,
}

impl Default for WalkerConfig {
    fn default() -> Self {
        Self {
            follow_symlinks: false,
            ignore_patterns: Vec::new(),
            max_depth: None,
            include_root: false,
        }
    }
}

/// A visited filesystem object
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkedEntry {
    /// Path on disk
    pub path: PathBuf,
    /// Manifest-form path relative to the walk root
    pub relative: String,
    pub depth: usize,
}

/// Filesystem walker
pub struct Walker {
    root: PathBuf,
    config: WalkerConfig,
}

impl Walker {
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            config: WalkerConfig::default(),
        }
    }

    pub fn with_config(root: PathBuf, config: WalkerConfig) -> Self {
        Self { root, config }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config(&self) -> &WalkerConfig {
        &self.config
    }

    /// Walk the tree in traversal order (directory before its children,
    /// siblings by file name).
    ///
    /// Objects that cannot be read show up as per-entry errors; only a
    /// missing root fails the whole walk.
    pub fn walk(&self) -> Result<Vec<Result<WalkedEntry, ClassificationError>>, ManifestError> {
        if std::fs::symlink_metadata(&self.root).is_err() {
            return Err(ManifestError::Walk(format!(
                "root {} does not exist",
                self.root.display()
            )));
        }

        let walker = WalkDir::new(&self.root)
            .follow_links(self.config.follow_symlinks)
            .max_depth(self.config.max_depth.unwrap_or(usize::MAX))
            .sort_by_file_name();

        let mut entries = Vec::new();
        for entry in walker.into_iter().filter_entry(|e| !self.should_ignore(e)) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    entries.push(Err(self.walk_error(e)));
                    continue;
                }
            };

            if entry.depth() == 0 && !self.includes_root() {
                continue;
            }

            let relative = match path::manifest_path(&self.root, entry.path()) {
                Ok(relative) => relative,
                Err(e) => {
                    entries.push(Err(ClassificationError {
                        path: entry.path().to_path_buf(),
                        source: std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()),
                    }));
                    continue;
                }
            };

            entries.push(Ok(WalkedEntry {
                path: entry.path().to_path_buf(),
                relative,
                depth: entry.depth(),
            }));
        }

        Ok(entries)
    }

    /// A depth limit of 0 means "only the root", so the root is then emitted.
    fn includes_root(&self) -> bool {
        self.config.include_root || self.config.max_depth == Some(0)
    }

    fn walk_error(&self, err: walkdir::Error) -> ClassificationError {
        let path = err
            .path()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.root.clone());
        let message = err.to_string();
        let source = err
            .into_io_error()
            .unwrap_or_else(|| std::io::Error::new(std::io::ErrorKind::Other, message));
        ClassificationError { path, source }
    }

    /// Check if an entry should be ignored based on ignore patterns
    fn should_ignore(&self, entry: &DirEntry) -> bool {
        if entry.depth() == 0 {
            return false;
        }
        let name = entry.file_name().to_string_lossy();
        self.config
            .ignore_patterns
            .iter()
            .any(|pattern| name == pattern.as_str())
    }
}
