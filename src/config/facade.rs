//! ConfigLoader facade delegating to merge service.

use super::merge::service::MergeService;
use super::MakerSettings;
use crate::error::ApiError;
use std::path::Path;

/// Settings loader facade.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load settings from the global file and environment.
    pub fn load() -> Result<MakerSettings, ApiError> {
        MergeService::load()
    }

    /// Load settings with `path` layered over the global file.
    pub fn load_from_file(path: &Path) -> Result<MakerSettings, ApiError> {
        MergeService::load_from_file(path)
    }

    /// Load the explicit file if given, otherwise the standard sources.
    pub fn load_optional(path: Option<&Path>) -> Result<MakerSettings, ApiError> {
        match path {
            Some(path) => Self::load_from_file(path),
            None => Self::load(),
        }
    }

    /// Create default settings.
    pub fn default() -> MakerSettings {
        MakerSettings::default()
    }
}
