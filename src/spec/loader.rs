//! Loading and merging tree configuration files
//!
//! Each source is a YAML mapping of subdirectory name to spec. Sources are merged in
//! the order given; a subdirectory defined by two sources is an error, since there is
//! no sensible way to combine them.

use super::validation::normalize_subdir_name;
use super::{RawSpec, Spec, TreeConfig};
use crate::error::ApiError;
use serde_yaml::Value;
use std::collections::HashSet;
use std::path::Path;
use tracing::debug;

/// Accumulates sources into a [`TreeConfig`]
#[derive(Debug, Default)]
pub struct TreeConfigLoader {
    entries: Vec<(String, Spec)>,
    seen: HashSet<String>,
}

impl TreeConfigLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load and merge `paths` in order
    pub fn load_files<P: AsRef<Path>>(paths: &[P]) -> Result<TreeConfig, ApiError> {
        let mut loader = Self::new();
        for path in paths {
            loader.add_file(path.as_ref())?;
        }
        loader.build()
    }

    /// Read one YAML file
    pub fn add_file(&mut self, path: &Path) -> Result<(), ApiError> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            ApiError::ConfigError(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;
        self.add_yaml(&path.display().to_string(), &text)
    }

    /// Merge one YAML document; `origin` names the source in error messages
    pub fn add_yaml(&mut self, origin: &str, text: &str) -> Result<(), ApiError> {
        if text.trim().is_empty() {
            debug!(origin, "Config source is empty");
            return Ok(());
        }

        let document: Value = serde_yaml::from_str(text).map_err(|e| {
            ApiError::ConfigError(format!("Failed to parse {}: {}", origin, e))
        })?;

        let mapping = match document {
            Value::Null => {
                debug!(origin, "Config source is empty");
                return Ok(());
            }
            Value::Mapping(mapping) => mapping,
            _ => {
                return Err(ApiError::ConfigError(format!(
                    "{}: top level must be a mapping of subdirectory names",
                    origin
                )))
            }
        };

        let mut parsed = Vec::with_capacity(mapping.len());
        for (key, value) in mapping {
            let key = key_to_string(&key).ok_or_else(|| {
                ApiError::ConfigError(format!(
                    "{}: subdirectory names must be strings or numbers, got {:?}",
                    origin, key
                ))
            })?;
            let subdir = normalize_subdir_name(&key)
                .map_err(|e| ApiError::ConfigError(format!("{}: {}", origin, e)))?;

            let raw: RawSpec = serde_yaml::from_value(value).map_err(|e| {
                ApiError::ConfigError(format!("{}: [{}] {}", origin, subdir, e))
            })?;
            parsed.push((subdir, raw));
        }

        // Keys are compared after normalization, so `a/` repeats `a`
        let mut in_source = HashSet::new();
        let dupes: Vec<&str> = parsed
            .iter()
            .map(|(name, _)| name.as_str())
            .filter(|name| self.seen.contains(*name) || !in_source.insert(*name))
            .collect();
        if !dupes.is_empty() {
            return Err(ApiError::ConfigError(format!(
                "Duplicate key seen in {}: {:?}",
                origin, dupes
            )));
        }

        for (subdir, raw) in parsed {
            let spec = raw
                .resolve(&subdir)
                .map_err(|e| ApiError::ConfigError(format!("{}: {}", origin, strip_prefix(e))))?;
            debug!(origin, subdir = %subdir, files = spec.file_count(), "Loaded spec");
            self.seen.insert(subdir.clone());
            self.entries.push((subdir, spec));
        }

        Ok(())
    }

    /// Finish merging; at least one subdirectory must be defined
    pub fn build(self) -> Result<TreeConfig, ApiError> {
        if self.entries.is_empty() {
            return Err(ApiError::ConfigError(
                "No subdirectories defined in configuration".to_string(),
            ));
        }
        let config = TreeConfig::new(self.entries);
        if config.checked_totals().is_none() {
            return Err(ApiError::ConfigError(
                "Total size too large: file count or byte total of the configuration exceeds 2^64 - 1"
                    .to_string(),
            ));
        }
        Ok(config)
    }
}

fn key_to_string(key: &Value) -> Option<String> {
    match key {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn strip_prefix(err: ApiError) -> String {
    match err {
        ApiError::ConfigError(msg) => msg,
        other => other.to_string(),
    }
}
