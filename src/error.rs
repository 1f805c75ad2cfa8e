//! Error types for the manifest builder.

use std::path::PathBuf;
use thiserror::Error;

/// Mode codec errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModeError {
    #[error("Malformed file mode {input:?}: expected at least 10 characters")]
    MalformedInput { input: String },
}

/// Failure to read platform metadata for a single filesystem object.
///
/// Fatal for that object only; the traversal decides whether to skip or abort.
#[derive(Debug, Error)]
#[error("Failed to classify {path:?}: {source}")]
pub struct ClassificationError {
    pub path: PathBuf,
    #[source]
    pub source: std::io::Error,
}

/// Manifest construction, parsing and verification errors
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error(transparent)]
    Classification(#[from] ClassificationError),

    #[error("Invalid mode for entry {path:?}: {source}")]
    InvalidEntryMode {
        path: String,
        #[source]
        source: ModeError,
    },

    #[error("Invalid content id for entry {path:?}: {value:?}")]
    InvalidContentId { path: String, value: String },

    #[error("Unsupported manifest version {0}")]
    UnsupportedVersion(u32),

    #[error("Malformed manifest document: {0}")]
    Malformed(String),

    #[error("Failed to walk directory: {0}")]
    Walk(String),

    #[error("Invalid path: {0}")]
    InvalidPath(String),

    #[error("Manifest I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Top-level errors surfaced by the CLI and configuration layers
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Manifest error: {0}")]
    Manifest(#[from] ManifestError),

    #[error("Mode error: {0}")]
    Mode(#[from] ModeError),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Manifest does not match {}: {drift} difference(s)\n{details}", .root.display())]
    VerificationFailed {
        root: PathBuf,
        drift: usize,
        details: String,
    },

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl From<config::ConfigError> for ApiError {
    fn from(err: config::ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}

impl From<ClassificationError> for ApiError {
    fn from(err: ClassificationError) -> Self {
        ApiError::Manifest(ManifestError::Classification(err))
    }
}
