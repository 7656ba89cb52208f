//! Tree description
//!
//! A tree configuration maps subdirectory names to specs. Specs arrive from YAML in a
//! loose shape (`size` and `number` may be scalars or lists) and are resolved once, at
//! load time, into [`Spec`], so nothing downstream deals with malformed input.

pub mod expander;
pub mod loader;
pub mod size;
pub mod validation;

pub use expander::{expand_config, expand_spec};
pub use loader::TreeConfigLoader;

use crate::error::ApiError;
use serde::Deserialize;

/// A field that may be written as a scalar or as a list
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    One(T),
    Many(Vec<T>),
}

impl<T> OneOrMany<T> {
    pub fn into_vec(self) -> Vec<T> {
        match self {
            OneOrMany::One(value) => vec![value],
            OneOrMany::Many(values) => values,
        }
    }
}

/// A size as written: plain bytes or a human string such as `"20k"`
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum SizeValue {
    Bytes(u64),
    Human(String),
}

impl SizeValue {
    /// Resolve to (label used in names, byte count)
    pub fn resolve(&self) -> Result<SizeEntry, ApiError> {
        match self {
            SizeValue::Bytes(bytes) => Ok(SizeEntry {
                label: bytes.to_string(),
                bytes: *bytes,
            }),
            SizeValue::Human(text) => Ok(SizeEntry {
                label: text.trim().to_string(),
                bytes: size::parse_size(text)?,
            }),
        }
    }
}

/// One subdirectory entry exactly as it appears in YAML
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawSpec {
    pub size: Option<OneOrMany<SizeValue>>,
    pub number: Option<OneOrMany<u64>>,
    #[serde(default)]
    pub pathnamelen: usize,
    #[serde(default)]
    pub pathdepth: usize,
    #[serde(default)]
    pub base64: bool,
    pub extn: Option<String>,
}

/// Size label and the byte count it resolves to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SizeEntry {
    pub label: String,
    pub bytes: u64,
}

/// A validated spec in canonical form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Spec {
    /// Distinct by label, in configuration order
    pub sizes: Vec<SizeEntry>,
    /// Non-empty, every value positive
    pub numbers: Vec<u64>,
    pub pad_len: usize,
    pub path_depth: usize,
    pub text: bool,
    pub extn: String,
}

impl Spec {
    /// Number of files this spec expands to
    pub fn file_count(&self) -> u64 {
        self.checked_totals().map_or(u64::MAX, |(files, _)| files)
    }

    /// Bytes this spec expands to
    pub fn total_bytes(&self) -> u64 {
        self.checked_totals().map_or(u64::MAX, |(_, bytes)| bytes)
    }

    /// (files, bytes), or `None` if either does not fit in a `u64`
    pub fn checked_totals(&self) -> Option<(u64, u64)> {
        let per_size = self
            .numbers
            .iter()
            .try_fold(0u64, |acc, &n| acc.checked_add(n))?;
        let files = per_size.checked_mul(self.sizes.len() as u64)?;
        let bytes = self.sizes.iter().try_fold(0u64, |acc, size| {
            acc.checked_add(size.bytes.checked_mul(per_size)?)
        })?;
        Some((files, bytes))
    }
}

impl RawSpec {
    /// Resolve into a [`Spec`], rejecting anything that cannot be expanded
    pub fn resolve(self, subdir: &str) -> Result<Spec, ApiError> {
        let invalid = |msg: String| ApiError::ConfigError(format!("[{}] {}", subdir, msg));

        let raw_sizes = self
            .size
            .ok_or_else(|| invalid("Missing mandatory field 'size'".to_string()))?
            .into_vec();
        if raw_sizes.is_empty() {
            return Err(invalid("'size' must not be an empty list".to_string()));
        }

        let mut sizes: Vec<SizeEntry> = Vec::with_capacity(raw_sizes.len());
        for raw in &raw_sizes {
            let entry = raw.resolve().map_err(|e| match e {
                ApiError::ConfigError(msg) => invalid(msg),
                other => other,
            })?;
            if !sizes.iter().any(|s| s.label == entry.label) {
                sizes.push(entry);
            }
        }

        let numbers = match self.number {
            Some(number) => number.into_vec(),
            None => vec![1],
        };
        if numbers.is_empty() {
            return Err(invalid("'number' must not be an empty list".to_string()));
        }
        if numbers.iter().any(|&n| n == 0) {
            return Err(invalid("'number' values must be positive".to_string()));
        }

        let text = self.base64;
        let extn = self
            .extn
            .unwrap_or_else(|| (if text { ".txt" } else { ".dat" }).to_string());
        validation::validate_extension(&extn).map_err(invalid)?;

        let spec = Spec {
            sizes,
            numbers,
            pad_len: self.pathnamelen,
            path_depth: self.pathdepth,
            text,
            extn,
        };
        if spec.checked_totals().is_none() {
            return Err(invalid(
                "Total size too large: file count or byte total exceeds 2^64 - 1".to_string(),
            ));
        }
        Ok(spec)
    }
}

/// Merged, validated configuration: subdirectory specs in source order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TreeConfig {
    entries: Vec<(String, Spec)>,
}

impl TreeConfig {
    pub fn new(entries: Vec<(String, Spec)>) -> Self {
        Self { entries }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Spec)> {
        self.entries.iter().map(|(name, spec)| (name.as_str(), spec))
    }

    pub fn get(&self, subdir: &str) -> Option<&Spec> {
        self.entries
            .iter()
            .find(|(name, _)| name == subdir)
            .map(|(_, spec)| spec)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn file_count(&self) -> u64 {
        self.checked_totals().map_or(u64::MAX, |(files, _)| files)
    }

    pub fn total_bytes(&self) -> u64 {
        self.checked_totals().map_or(u64::MAX, |(_, bytes)| bytes)
    }

    /// (files, bytes) across every subdirectory, or `None` on overflow
    pub fn checked_totals(&self) -> Option<(u64, u64)> {
        self.entries
            .iter()
            .try_fold((0u64, 0u64), |(files, bytes), (_, spec)| {
                let (spec_files, spec_bytes) = spec.checked_totals()?;
                Some((files.checked_add(spec_files)?, bytes.checked_add(spec_bytes)?))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(yaml: &str) -> RawSpec {
        serde_yaml::from_str(yaml).unwrap()
    }

    #[test]
    fn test_scalars_become_lists() {
        let spec = raw("size: 20k\nnumber: 3\n").resolve("s").unwrap();
        assert_eq!(
            spec.sizes,
            vec![SizeEntry {
                label: "20k".to_string(),
                bytes: 20 * 1024
            }]
        );
        assert_eq!(spec.numbers, vec![3]);
    }

    #[test]
    fn test_defaults() {
        let spec = raw("size: 100\n").resolve("s").unwrap();
        assert_eq!(spec.numbers, vec![1]);
        assert_eq!(spec.pad_len, 0);
        assert_eq!(spec.path_depth, 0);
        assert!(!spec.text);
        assert_eq!(spec.extn, ".dat");
        assert_eq!(spec.sizes[0].label, "100");
    }

    #[test]
    fn test_base64_defaults_to_txt() {
        let spec = raw("size: 1k\nbase64: true\n").resolve("s").unwrap();
        assert!(spec.text);
        assert_eq!(spec.extn, ".txt");

        let spec = raw("size: 1k\nbase64: true\nextn: .b64\n").resolve("s").unwrap();
        assert_eq!(spec.extn, ".b64");
    }

    #[test]
    fn test_duplicate_labels_dropped_but_equal_values_kept() {
        let spec = raw("size: [1k, 1k, 1024]\n").resolve("s").unwrap();
        let labels: Vec<&str> = spec.sizes.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, vec!["1k", "1024"]);
        assert!(spec.sizes.iter().all(|s| s.bytes == 1024));
    }

    #[test]
    fn test_totals_past_u64_rejected() {
        let err = raw("size: 16000000T\nnumber: 2\n").resolve("big").unwrap_err();
        match err {
            ApiError::ConfigError(msg) => {
                assert!(msg.contains("[big]"), "{}", msg);
                assert!(msg.contains("Total size too large"), "{}", msg);
            }
            other => panic!("unexpected error: {other:?}"),
        }

        let err = raw("size: 1\nnumber: [18446744073709551615, 1]\n")
            .resolve("many")
            .unwrap_err();
        assert!(matches!(err, ApiError::ConfigError(_)));

        // One file of the same size still fits
        let spec = raw("size: 16000000T\n").resolve("big").unwrap();
        assert_eq!(spec.total_bytes(), 16_000_000u64 << 40);
    }

    #[test]
    fn test_missing_size_is_config_error() {
        let err = raw("number: [1]\n").resolve("nosize").unwrap_err();
        match err {
            ApiError::ConfigError(msg) => {
                assert!(msg.contains("nosize"));
                assert!(msg.contains("size"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_bad_numbers_rejected() {
        assert!(raw("size: 1\nnumber: []\n").resolve("s").is_err());
        assert!(raw("size: 1\nnumber: [2, 0]\n").resolve("s").is_err());
        assert!(serde_yaml::from_str::<RawSpec>("size: 1\nnumber: [-1]\n").is_err());
        assert!(serde_yaml::from_str::<RawSpec>("size: 1\nnumber: lots\n").is_err());
    }

    #[test]
    fn test_unknown_suffix_rejected() {
        assert!(matches!(
            raw("size: 20q\n").resolve("s"),
            Err(ApiError::ConfigError(_))
        ));
    }

    #[test]
    fn test_unknown_field_rejected() {
        assert!(serde_yaml::from_str::<RawSpec>("size: 1\nsizes: 2\n").is_err());
    }

    #[test]
    fn test_counts_and_bytes() {
        let spec = raw("size: [1k, 2k]\nnumber: [1, 3]\n").resolve("s").unwrap();
        assert_eq!(spec.file_count(), 8);
        assert_eq!(spec.total_bytes(), 4 * 1024 + 4 * 2048);
    }
}
