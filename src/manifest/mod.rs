//! Directory manifests
//!
//! A manifest is an ordered list of [`ManifestEntry`] records describing a
//! subtree's structure, permissions and content identities.

pub mod builder;
pub mod document;
pub mod entry;
pub mod verify;
pub mod walker;

pub use builder::{entry_for, BuildReport, ErrorPolicy, ManifestBuilder};
pub use document::{Manifest, MANIFEST_VERSION};
pub use entry::{build_entry, ManifestEntry};
pub use verify::{verify, ChangedField, VerifyReport};
pub use walker::{WalkedEntry, Walker, WalkerConfig};
