//! Configuration System
//!
//! Layered configuration: built-in defaults, the global config file, a
//! `.fsmanifest.toml` in the walk root, then `FSMANIFEST__*` environment
//! variables. CLI flags are applied on top by the binary.

use crate::error::ApiError;
use crate::logging::LoggingConfig;
use crate::manifest::{ErrorPolicy, WalkerConfig};
use crate::output::OutputConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

mod merge;
mod sources;

pub use sources::global_file::global_config_path;
pub use sources::workspace_file::{workspace_config_path, WORKSPACE_CONFIG_FILE};

/// Upper bound on worker threads accepted from configuration
pub const MAX_JOBS: usize = 1024;

/// Root configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ManifestConfig {
    /// Printer options
    #[serde(default)]
    pub output: OutputConfig,

    /// Traversal options
    #[serde(default)]
    pub walker: WalkerConfig,

    /// Build options
    #[serde(default)]
    pub build: BuildConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Build-time options
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildConfig {
    #[serde(default)]
    pub error_policy: ErrorPolicy,
    /// Worker threads; 0 lets rayon decide
    #[serde(default)]
    pub jobs: usize,
}

impl ManifestConfig {
    /// Validate the entire configuration, collecting every problem.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if let Err(e) = self.logging.validate() {
            errors.push(e.to_string());
        }
        if self.build.jobs > MAX_JOBS {
            errors.push(format!(
                "build.jobs must be at most {} (got {})",
                MAX_JOBS, self.build.jobs
            ));
        }
        for pattern in &self.walker.ignore_patterns {
            if pattern.is_empty() || pattern.contains('/') {
                errors.push(format!(
                    "walker.ignore_patterns entry {:?} must be a single non-empty name",
                    pattern
                ));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Walker settings with the output depth limit applied.
    pub fn effective_walker(&self) -> WalkerConfig {
        let mut walker = self.walker.clone();
        if self.output.max_depth.is_some() {
            walker.max_depth = self.output.max_depth;
        }
        walker
    }
}

/// Configuration loader facade.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration for a walk root from files and environment.
    pub fn load(root: &Path) -> Result<ManifestConfig, ApiError> {
        Ok(merge::service::MergeService::load(root)?)
    }

    /// Load configuration from a specific file with environment overlay.
    pub fn load_from_file(path: &Path) -> Result<ManifestConfig, ApiError> {
        Ok(merge::service::MergeService::load_from_file(path)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::FormatTemplate;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_default_config_is_valid() {
        assert!(ManifestConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validate_collects_errors() {
        let mut config = ManifestConfig::default();
        config.logging.level = "loud".to_string();
        config.build.jobs = MAX_JOBS + 1;
        config.walker.ignore_patterns = vec!["a/b".to_string()];
        let errors = config.validate().unwrap_err();
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn test_output_depth_overrides_walker() {
        let mut config = ManifestConfig::default();
        config.walker.max_depth = Some(5);
        assert_eq!(config.effective_walker().max_depth, Some(5));
        config.output.max_depth = Some(1);
        assert_eq!(config.effective_walker().max_depth, Some(1));
    }

    #[test]
    fn test_load_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("custom.toml");
        fs::write(
            &path,
            r#"
[output]
include_metadata = true
format = "id-and-path"

[walker]
ignore_patterns = [".git"]

[build]
error_policy = "abort"
jobs = 2
"#,
        )
        .unwrap();

        let config = ConfigLoader::load_from_file(&path).unwrap();
        assert!(config.output.include_metadata);
        assert_eq!(config.output.format, FormatTemplate::IdAndPath);
        assert_eq!(config.walker.ignore_patterns, vec![".git".to_string()]);
        assert_eq!(config.build.error_policy, ErrorPolicy::Abort);
        assert_eq!(config.build.jobs, 2);
        assert_eq!(config.logging.output, crate::logging::LogOutput::Stderr);
    }

    #[test]
    fn test_load_from_missing_file_fails() {
        let temp_dir = TempDir::new().unwrap();
        assert!(ConfigLoader::load_from_file(&temp_dir.path().join("none.toml")).is_err());
    }

    #[test]
    fn test_load_picks_up_root_file() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(
            workspace_config_path(temp_dir.path()),
            "[output]\nuse_absolute_paths = true\n",
        )
        .unwrap();

        let config = ConfigLoader::load(temp_dir.path()).unwrap();
        assert!(config.output.use_absolute_paths);
        assert!(!config.output.include_metadata);
    }
}
