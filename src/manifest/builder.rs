//! Manifest builder: walk, classify, identify

use crate::error::{ClassificationError, ManifestError};
use crate::identify;
use crate::manifest::entry::{build_entry, ManifestEntry};
use crate::manifest::walker::{WalkedEntry, Walker, WalkerConfig};
use crate::mode::classify_metadata;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs::Metadata;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info, instrument, warn};

/// What to do when a single object cannot be classified or read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorPolicy {
    /// Log the failure, leave the object out, and keep going
    #[default]
    Skip,
    /// Stop at the first failure
    Abort,
}

/// Result of a build: entries in traversal order plus skipped objects
#[derive(Debug, Default)]
pub struct BuildReport {
    pub entries: Vec<ManifestEntry>,
    pub failures: Vec<ClassificationError>,
}

impl BuildReport {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Builds manifest entries for a file or directory tree
pub struct ManifestBuilder {
    root: PathBuf,
    walker_config: WalkerConfig,
    error_policy: ErrorPolicy,
    /// 0 = rayon's global pool
    jobs: usize,
}

impl ManifestBuilder {
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            walker_config: WalkerConfig::default(),
            error_policy: ErrorPolicy::default(),
            jobs: 0,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn with_walker_config(mut self, config: WalkerConfig) -> Self {
        self.walker_config = config;
        self
    }

    pub fn with_error_policy(mut self, policy: ErrorPolicy) -> Self {
        self.error_policy = policy;
        self
    }

    /// Number of worker threads used for classification and hashing.
    pub fn with_parallelism(mut self, jobs: usize) -> Self {
        self.jobs = jobs;
        self
    }

    /// Build one entry per visited object.
    ///
    /// A root that is not a directory yields a single entry named after the
    /// file itself.
    #[instrument(skip(self), fields(root = %self.root.display()))]
    pub fn build(&self) -> Result<BuildReport, ManifestError> {
        let start = Instant::now();
        info!("Starting manifest build");

        let walked = self.collect_targets()?;
        debug!(object_count = walked.len(), "Walked filesystem");

        let follow = self.walker_config.follow_symlinks;
        let results = self.run(|| {
            walked
                .into_par_iter()
                .map(|item| item.and_then(|w| entry_for(&w.path, &w.relative, follow)))
                .collect::<Vec<_>>()
        })?;

        let mut report = BuildReport::default();
        for result in results {
            match result {
                Ok(entry) => report.entries.push(entry),
                Err(e) if self.error_policy == ErrorPolicy::Abort => {
                    return Err(ManifestError::Classification(e));
                }
                Err(e) => {
                    warn!(path = %e.path.display(), error = %e.source, "Skipping unreadable object");
                    report.failures.push(e);
                }
            }
        }

        info!(
            entries = report.entries.len(),
            failures = report.failures.len(),
            duration_ms = start.elapsed().as_millis(),
            "Manifest build complete"
        );
        Ok(report)
    }

    fn collect_targets(&self) -> Result<Vec<Result<WalkedEntry, ClassificationError>>, ManifestError> {
        let metadata = read_metadata(&self.root, self.walker_config.follow_symlinks)
            .map_err(ManifestError::Classification)?;
        if metadata.is_dir() {
            return Walker::with_config(self.root.clone(), self.walker_config.clone()).walk();
        }

        let name = self
            .root
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| {
                ManifestError::InvalidPath(format!("{} has no file name", self.root.display()))
            })?;
        Ok(vec![Ok(WalkedEntry {
            path: self.root.clone(),
            relative: name,
            depth: 0,
        })])
    }

    fn run<T: Send>(&self, op: impl FnOnce() -> T + Send) -> Result<T, ManifestError> {
        if self.jobs == 0 {
            return Ok(op());
        }
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.jobs)
            .build()
            .map_err(|e| ManifestError::Walk(format!("Failed to start worker pool: {}", e)))?;
        Ok(pool.install(op))
    }
}

fn read_metadata(path: &Path, follow_symlinks: bool) -> Result<Metadata, ClassificationError> {
    let result = if follow_symlinks {
        // A dangling link still gets an entry, as the link itself.
        std::fs::metadata(path).or_else(|_| std::fs::symlink_metadata(path))
    } else {
        std::fs::symlink_metadata(path)
    };
    result.map_err(|source| ClassificationError {
        path: path.to_path_buf(),
        source,
    })
}

/// Classify one object and, if it is a regular file, identify its content.
pub fn entry_for(
    path: &Path,
    relative: &str,
    follow_symlinks: bool,
) -> Result<ManifestEntry, ClassificationError> {
    let metadata = read_metadata(path, follow_symlinks)?;
    let mode = classify_metadata(&metadata);

    if !mode.has_content() {
        return Ok(build_entry(relative, mode, None, 0));
    }

    // Size comes from the bytes hashed so it always agrees with the id.
    let (content_id, size) =
        identify::identify_file_counted(path).map_err(|source| ClassificationError {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(build_entry(relative, mode, Some(content_id), size))
}
