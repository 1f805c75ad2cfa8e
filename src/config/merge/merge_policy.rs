//! Merge rules: defaults, override order, conflict handling.

use config::Config;
use config::ConfigBuilder;
use config::ConfigError;

/// Create a Config builder with merge policy defaults applied.
pub fn builder_with_defaults() -> Result<ConfigBuilder<config::builder::DefaultState>, ConfigError>
{
    Config::builder()
        .set_default("output.format", "id")?
        .set_default("build.error_policy", "skip")?
        .set_default("build.jobs", 0)?
        .set_default("logging.output", "stderr")
}
