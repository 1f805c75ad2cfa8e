//! Manifest entries
//!
//! One [`ManifestEntry`] per filesystem object. Entries are built once during a
//! walk and never mutated afterwards.

use crate::mode::FileModeBits;
use crate::types::ContentId;
use serde::{Deserialize, Serialize};

/// A single filesystem object in a manifest.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ManifestEntry {
    path: String,
    mode: FileModeBits,
    #[serde(rename = "id")]
    content_id: ContentId,
    #[serde(rename = "bytes")]
    size: u64,
    #[serde(rename = "folder")]
    is_folder: bool,
    #[serde(rename = "link")]
    is_link: bool,
}

/// Build an entry from a classified mode.
///
/// Only regular and temporary files carry a digest and a size; every other
/// type is stored with the null identifier and zero bytes whatever the caller
/// passes.
pub fn build_entry(
    path: impl Into<String>,
    mode: FileModeBits,
    content_id: Option<ContentId>,
    size: u64,
) -> ManifestEntry {
    let (content_id, size) = if mode.has_content() {
        (content_id.unwrap_or(ContentId::NULL), size)
    } else {
        (ContentId::NULL, 0)
    };

    ManifestEntry {
        path: path.into(),
        mode,
        content_id,
        size,
        is_folder: mode.is_dir(),
        is_link: mode.is_symlink(),
    }
}

impl ManifestEntry {
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn mode(&self) -> FileModeBits {
        self.mode
    }

    pub fn content_id(&self) -> ContentId {
        self.content_id
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn is_folder(&self) -> bool {
        self.is_folder
    }

    pub fn is_link(&self) -> bool {
        self.is_link
    }
}

/// Wire shape of an entry. Folder/link flags are accepted but recomputed from
/// the mode so a document cannot contradict itself.
#[derive(Debug, Deserialize)]
pub(crate) struct RawEntry {
    pub path: String,
    pub mode: String,
    pub id: String,
    #[serde(default)]
    pub bytes: u64,
}
