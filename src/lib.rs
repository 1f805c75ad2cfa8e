//! fsmanifest: content-addressable filesystem manifests
//!
//! Walks a filesystem subtree, identifies every regular file by content, and
//! records each object's type, permission bits and size using a portable
//! 10-character mode string, so a manifest written on one platform can be
//! read and verified on another.

pub mod cli;
pub mod config;
pub mod error;
pub mod identify;
pub mod logging;
pub mod manifest;
pub mod mode;
pub mod output;
pub mod path;
pub mod types;

pub use error::{ApiError, ClassificationError, ManifestError, ModeError};
pub use manifest::{build_entry, Manifest, ManifestBuilder, ManifestEntry};
pub use mode::{FileModeBits, FileType, Permissions, SpecialFlags};
pub use types::ContentId;
