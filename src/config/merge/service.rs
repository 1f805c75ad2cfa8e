//! MergeService: orchestrates sources, applies merge policy, deserializes to ManifestConfig.

use crate::config::sources::{environment, global_file, workspace_file};
use crate::config::ManifestConfig;
use config::ConfigError;
use config::File;
use std::path::Path;
use tracing::debug;

use super::merge_policy;

/// Merge service for config composition.
pub struct MergeService;

impl MergeService {
    /// Load config for a walk root.
    /// Precedence: defaults (lowest) -> global file -> root file -> environment (highest).
    pub fn load(root: &Path) -> Result<ManifestConfig, ConfigError> {
        let builder = merge_policy::builder_with_defaults()?;
        let builder = global_file::add_to_builder(builder)?;
        let builder = workspace_file::add_to_builder(builder, root)?;
        let builder = environment::add_to_builder(builder)?;

        let config: ManifestConfig = builder.build()?.try_deserialize()?;
        debug!(root = %root.display(), "Loaded configuration");
        Ok(config)
    }

    /// Load config from a specific file with environment overlay.
    pub fn load_from_file(path: &Path) -> Result<ManifestConfig, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.display().to_string()));
        }
        let builder = merge_policy::builder_with_defaults()?;
        let builder = builder.add_source(File::from(path));
        let builder = environment::add_to_builder(builder)?;

        builder.build()?.try_deserialize()
    }
}
