//! Environment variable source: FSMANIFEST__SECTION__KEY

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::ConfigError;
use config::Environment;

/// Add environment variable overlay to builder.
/// Uses the FSMANIFEST prefix and `__` as separator for nested keys, e.g.
/// `FSMANIFEST__OUTPUT__INCLUDE_METADATA=true`.
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let builder = builder.add_source(
        Environment::with_prefix("FSMANIFEST")
            .prefix_separator("__")
            .separator("__")
            .try_parsing(true),
    );
    Ok(builder)
}
