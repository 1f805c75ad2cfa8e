//! Human-readable rendering of manifest entries

use crate::error::ManifestError;
use crate::manifest::ManifestEntry;
use crate::path;
use serde::{Deserialize, Serialize};
use std::fmt::Write;
use std::path::{Path, PathBuf};

/// Layout of the leading line printed per entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum FormatTemplate {
    /// `<id>:  <path>`
    #[default]
    Id,
    /// `<path>:  <id>`
    Path,
    /// `<id>  <path>`
    IdAndPath,
}

/// Output options for the printer and the traversal that feeds it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Print mode, byte size and folder/link flags under each entry
    #[serde(default)]
    pub include_metadata: bool,
    /// Print absolute paths instead of paths relative to the walk root
    #[serde(default)]
    pub use_absolute_paths: bool,
    #[serde(default)]
    pub format: FormatTemplate,
    /// Depth limit handed to the walker (None = unlimited)
    #[serde(default)]
    pub max_depth: Option<usize>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            include_metadata: false,
            use_absolute_paths: false,
            format: FormatTemplate::Id,
            max_depth: None,
        }
    }
}

/// Renders entries produced by a walk
///
/// Entry paths are shown joined onto `root`, the walk target as the user
/// named it (or its canonical form when absolute paths are requested).
pub struct Printer {
    config: OutputConfig,
    root: PathBuf,
}

impl Printer {
    pub fn new(config: OutputConfig, root: PathBuf) -> Self {
        Self { config, root }
    }

    /// Printer for entries built from `target`, a file or directory.
    ///
    /// Fails when absolute paths are requested and the target cannot be
    /// canonicalized.
    pub fn for_target(config: OutputConfig, target: &Path) -> Result<Self, ManifestError> {
        let base = if target.is_dir() {
            target.to_path_buf()
        } else {
            target.parent().map(Path::to_path_buf).unwrap_or_default()
        };
        let root = if config.use_absolute_paths {
            let anchor = if base.as_os_str().is_empty() {
                Path::new(".")
            } else {
                base.as_path()
            };
            path::canonical_root(anchor)?
        } else {
            base
        };
        Ok(Self::new(config, root))
    }

    pub fn config(&self) -> &OutputConfig {
        &self.config
    }

    fn display_path(&self, entry: &ManifestEntry) -> String {
        if self.root.as_os_str().is_empty() || self.root == Path::new(".") {
            entry.path().to_string()
        } else {
            path::resolve(&self.root, entry.path()).display().to_string()
        }
    }

    /// Render one entry, without a trailing newline.
    pub fn render(&self, entry: &ManifestEntry) -> String {
        let id = entry.content_id();
        let path = self.display_path(entry);
        let mut out = match self.config.format {
            FormatTemplate::Id => format!("{}:  {}", id, path),
            FormatTemplate::Path => format!("{}:  {}", path, id),
            FormatTemplate::IdAndPath => format!("{}  {}", id, path),
        };

        if self.config.include_metadata {
            // Writing to a String cannot fail.
            let _ = write!(
                out,
                "\n  mode:  {}\n  bytes:  {}\n  folder:  {}\n  link:  {}",
                entry.mode(),
                entry.size(),
                entry.is_folder(),
                entry.is_link()
            );
        }
        out
    }

    pub fn render_all(&self, entries: &[ManifestEntry]) -> String {
        entries
            .iter()
            .map(|e| self.render(e))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
