//! Manifest document serialization
//!
//! Entries are kept in insertion order in memory and sorted by path only when
//! written, so two walks of the same tree always serialize identically.

use crate::error::ManifestError;
use crate::manifest::entry::{build_entry, ManifestEntry, RawEntry};
use crate::mode;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Current document format version
pub const MANIFEST_VERSION: u32 = 1;

/// An ordered collection of manifest entries
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Manifest {
    created: DateTime<Utc>,
    entries: Vec<ManifestEntry>,
}

#[derive(Serialize)]
struct DocumentOut<'a> {
    version: u32,
    created: DateTime<Utc>,
    entries: Vec<&'a ManifestEntry>,
}

#[derive(Deserialize)]
struct DocumentIn {
    version: u32,
    created: Option<DateTime<Utc>>,
    #[serde(default)]
    entries: Vec<serde_json::Value>,
}

impl Manifest {
    pub fn new(entries: Vec<ManifestEntry>) -> Self {
        Self {
            created: Utc::now(),
            entries,
        }
    }

    pub fn created(&self) -> DateTime<Utc> {
        self.created
    }

    pub fn entries(&self) -> &[ManifestEntry] {
        &self.entries
    }

    pub fn get(&self, path: &str) -> Option<&ManifestEntry> {
        self.entries.iter().find(|e| e.path() == path)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries sorted by path, the order used on disk.
    pub fn sorted_entries(&self) -> Vec<&ManifestEntry> {
        let mut sorted: Vec<&ManifestEntry> = self.entries.iter().collect();
        sorted.sort_by(|a, b| a.path().cmp(b.path()));
        sorted
    }

    pub fn to_json(&self) -> Result<String, ManifestError> {
        let doc = DocumentOut {
            version: MANIFEST_VERSION,
            created: self.created,
            entries: self.sorted_entries(),
        };
        serde_json::to_string_pretty(&doc).map_err(|e| ManifestError::Malformed(e.to_string()))
    }

    /// Parse a document, failing on the first bad entry.
    pub fn from_json(input: &str) -> Result<Self, ManifestError> {
        let (created, results) = parse_document(input)?;
        let entries = results.into_iter().collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            created: created.unwrap_or_else(Utc::now),
            entries,
        })
    }

    /// Parse every entry independently; a bad entry does not stop the others.
    pub fn parse_entries(input: &str) -> Result<Vec<Result<ManifestEntry, ManifestError>>, ManifestError> {
        parse_document(input).map(|(_, results)| results)
    }

    pub fn write_to(&self, path: &Path) -> Result<(), ManifestError> {
        let json = self.to_json()?;
        std::fs::write(path, json)?;
        debug!(path = %path.display(), entries = self.len(), "Wrote manifest");
        Ok(())
    }

    pub fn read_from(path: &Path) -> Result<Self, ManifestError> {
        let input = std::fs::read_to_string(path)?;
        Self::from_json(&input)
    }
}

type ParsedDocument = (
    Option<DateTime<Utc>>,
    Vec<Result<ManifestEntry, ManifestError>>,
);

fn parse_document(input: &str) -> Result<ParsedDocument, ManifestError> {
    let doc: DocumentIn =
        serde_json::from_str(input).map_err(|e| ManifestError::Malformed(e.to_string()))?;
    if doc.version != MANIFEST_VERSION {
        return Err(ManifestError::UnsupportedVersion(doc.version));
    }
    let results = doc.entries.into_iter().map(parse_entry).collect();
    Ok((doc.created, results))
}

fn parse_entry(value: serde_json::Value) -> Result<ManifestEntry, ManifestError> {
    let raw: RawEntry =
        serde_json::from_value(value).map_err(|e| ManifestError::Malformed(e.to_string()))?;

    let mode = mode::decode(&raw.mode).map_err(|source| ManifestError::InvalidEntryMode {
        path: raw.path.clone(),
        source,
    })?;
    let content_id = raw
        .id
        .parse()
        .map_err(|_| ManifestError::InvalidContentId {
            path: raw.path.clone(),
            value: raw.id.clone(),
        })?;

    Ok(build_entry(raw.path, mode, Some(content_id), raw.bytes))
}
