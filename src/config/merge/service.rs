//! MergeService: orchestrates sources, applies merge policy, deserializes to MakerSettings.

use crate::config::sources::{environment, global_file};
use crate::config::MakerSettings;
use crate::error::ApiError;
use config::File;
use std::path::Path;

use super::policy;

/// Merge service for settings composition.
pub struct MergeService;

impl MergeService {
    /// Load settings from standard sources.
    /// Precedence: defaults (lowest) -> global file -> environment (highest).
    pub fn load() -> Result<MakerSettings, ApiError> {
        let builder = policy::builder_with_defaults()?;
        let builder = global_file::add_to_builder(builder)?;
        let builder = environment::add_to_builder(builder)?;

        let config = builder.build()?;
        Ok(config.try_deserialize()?)
    }

    /// Load settings with an explicit file between the global file and the environment.
    pub fn load_from_file(path: &Path) -> Result<MakerSettings, ApiError> {
        if !path.is_file() {
            return Err(ApiError::ConfigError(format!(
                "Settings file not found: {}",
                path.display()
            )));
        }

        let builder = policy::builder_with_defaults()?;
        let builder = global_file::add_to_builder(builder)?;
        let builder = builder.add_source(File::from(path).required(true));
        let builder = environment::add_to_builder(builder)?;

        let config = builder.build()?;
        Ok(config.try_deserialize()?)
    }
}
