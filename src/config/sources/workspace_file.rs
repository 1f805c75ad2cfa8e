//! Per-tree config file source: <root>/.fsmanifest.toml

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::ConfigError;
use config::File;
use std::path::{Path, PathBuf};

pub const WORKSPACE_CONFIG_FILE: &str = ".fsmanifest.toml";

pub fn workspace_config_path(root: &Path) -> PathBuf {
    root.join(WORKSPACE_CONFIG_FILE)
}

/// Add the root's config file to builder when present.
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
    root: &Path,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let path = workspace_config_path(root);
    if path.is_file() {
        return Ok(builder.add_source(File::from(path.as_path()).required(false)));
    }
    Ok(builder)
}
