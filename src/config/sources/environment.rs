//! Environment variable source: TTMAKER_* prefix with __ separator

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::ConfigError;
use config::Environment;

/// Add environment variable overlay to builder.
/// Uses TTMAKER__ prefix and __ as separator for nested keys,
/// e.g. `TTMAKER__GENERATION__JOBS=4`.
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let builder = builder.add_source(
        Environment::with_prefix("TTMAKER")
            .separator("__")
            .try_parsing(true),
    );
    Ok(builder)
}
