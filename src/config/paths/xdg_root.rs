//! XDG Base Directory utilities for settings and logs.

use crate::error::ApiError;
use std::path::PathBuf;

/// Get XDG config home directory
///
/// Returns `$XDG_CONFIG_HOME` if set, otherwise defaults to `$HOME/.config`
/// Follows XDG Base Directory Specification
pub fn config_home() -> Result<PathBuf, ApiError> {
    if let Ok(xdg_config_home) = std::env::var("XDG_CONFIG_HOME") {
        if !xdg_config_home.is_empty() {
            return Ok(PathBuf::from(xdg_config_home));
        }
    }

    let home = std::env::var("HOME").map_err(|_| {
        ApiError::ConfigError(
            "Could not determine XDG config home directory (HOME not set)".to_string(),
        )
    })?;

    Ok(PathBuf::from(home).join(".config"))
}

/// Global settings file path
///
/// Returns `$XDG_CONFIG_HOME/ttmaker/config.toml`. The file is optional.
pub fn global_config_path() -> Result<PathBuf, ApiError> {
    Ok(config_home()?.join("ttmaker").join("config.toml"))
}

/// Default log file path
///
/// Uses the platform state directory from `ProjectDirs`, falling back to the data
/// directory on platforms without one.
pub fn default_log_file() -> Result<PathBuf, ApiError> {
    let project_dirs = directories::ProjectDirs::from("", "ttmaker", "ttmaker").ok_or_else(|| {
        ApiError::ConfigError(
            "Could not determine platform state directory for log file".to_string(),
        )
    })?;
    let dir = project_dirs
        .state_dir()
        .unwrap_or_else(|| project_dirs.data_local_dir())
        .to_path_buf();
    Ok(dir.join("ttmaker.log"))
}
