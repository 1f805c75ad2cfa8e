//! Compare a manifest against a live tree

use crate::error::{ClassificationError, ManifestError};
use crate::manifest::builder::{BuildReport, ManifestBuilder};
use crate::manifest::document::Manifest;
use crate::manifest::entry::ManifestEntry;
use crate::mode;
use crate::path;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::path::Path;
use tracing::{info, instrument};

/// Which part of an entry differs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangedField {
    ContentId,
    Mode,
    Size,
}

impl fmt::Display for ChangedField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChangedField::ContentId => f.write_str("id"),
            ChangedField::Mode => f.write_str("mode"),
            ChangedField::Size => f.write_str("bytes"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Change {
    pub path: String,
    pub fields: Vec<ChangedField>,
}

/// Differences between a manifest and the filesystem, each list sorted by path
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct VerifyReport {
    /// In the manifest, not on disk
    pub missing: Vec<String>,
    /// On disk, not in the manifest
    pub added: Vec<String>,
    pub changed: Vec<Change>,
    /// Objects on disk that could not be read
    pub unreadable: Vec<String>,
}

impl VerifyReport {
    pub fn is_clean(&self) -> bool {
        self.drift() == 0
    }

    pub fn drift(&self) -> usize {
        self.missing.len() + self.added.len() + self.changed.len() + self.unreadable.len()
    }
}

fn diff_entry(expected: &ManifestEntry, actual: &ManifestEntry) -> Vec<ChangedField> {
    let mut fields = Vec::new();
    if expected.content_id() != actual.content_id() {
        fields.push(ChangedField::ContentId);
    }
    // Compared in wire form: special bits the string cannot hold never survive
    // a document, so they must not count as drift.
    if mode::encode(&expected.mode()) != mode::encode(&actual.mode()) {
        fields.push(ChangedField::Mode);
    }
    if expected.size() != actual.size() {
        fields.push(ChangedField::Size);
    }
    fields
}

/// Rebuild the tree with `builder` and compare it to `manifest`.
#[instrument(skip_all, fields(entries = manifest.len()))]
pub fn verify(manifest: &Manifest, builder: &ManifestBuilder) -> Result<VerifyReport, ManifestError> {
    let current = builder.build()?;
    let report = compare(manifest.entries(), &current, builder.root());
    info!(drift = report.drift(), "Verification complete");
    Ok(report)
}

/// Diff recorded entries against a fresh build of the tree at `root`.
fn compare(recorded: &[ManifestEntry], current: &BuildReport, root: &Path) -> VerifyReport {
    let expected: BTreeMap<&str, &ManifestEntry> =
        recorded.iter().map(|e| (e.path(), e)).collect();
    let actual: BTreeMap<&str, &ManifestEntry> =
        current.entries.iter().map(|e| (e.path(), e)).collect();

    let mut report = VerifyReport {
        unreadable: unreadable_paths(root, &current.failures),
        ..VerifyReport::default()
    };
    // An unreadable object would also look missing; report it once.
    let unreadable: BTreeSet<&str> = report.unreadable.iter().map(String::as_str).collect();

    for (path, want) in &expected {
        match actual.get(path) {
            None if unreadable.contains(path) => {}
            None => report.missing.push(path.to_string()),
            Some(have) => {
                let fields = diff_entry(want, have);
                if !fields.is_empty() {
                    report.changed.push(Change {
                        path: path.to_string(),
                        fields,
                    });
                }
            }
        }
    }
    report.added = actual
        .keys()
        .filter(|path| !expected.contains_key(*path))
        .map(|path| path.to_string())
        .collect();
    report
}

/// Failure locations in manifest form, so they can be matched against entries.
fn unreadable_paths(root: &Path, failures: &[ClassificationError]) -> Vec<String> {
    // A single-file build names its entry after the file, relative to its parent.
    let base = if root.is_dir() {
        root
    } else {
        root.parent().unwrap_or(root)
    };
    let mut paths: Vec<String> = failures
        .iter()
        .map(|f| {
            path::manifest_path(base, &f.path).unwrap_or_else(|_| f.path.display().to_string())
        })
        .collect();
    paths.sort();
    paths
}
