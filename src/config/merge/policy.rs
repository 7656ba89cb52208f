//! Merge policy: built-in defaults every source is layered over.

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError};

/// Start a builder seeded with the built-in defaults.
pub fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Config::builder()
        .set_default("generation.jobs", 0)?
        .set_default("logging.enabled", true)?
        .set_default("logging.level", "info")?
        .set_default("logging.format", "text")?
        .set_default("logging.output", "stderr")?
        .set_default("logging.color", true)
}
