//! Tree generation
//!
//! A [`GenerationPlan`] pairs a validated configuration with an optional output root.
//! [`GenerationExecutor`] runs it: without a root every file is only reported, with a
//! root each file is also written, on a bounded pool of workers.

pub mod executor;
pub mod format;

pub use executor::GenerationExecutor;
pub use format::{format_report_json, format_report_text};

use crate::spec::TreeConfig;
use serde::Serialize;
use std::path::PathBuf;

/// What to generate and where
#[derive(Debug, Clone)]
pub struct GenerationPlan {
    pub config: TreeConfig,
    /// Must not exist yet; `None` means report only
    pub output_root: Option<PathBuf>,
}

impl GenerationPlan {
    pub fn new(config: TreeConfig, output_root: Option<PathBuf>) -> Self {
        Self {
            config,
            output_root,
        }
    }

    /// Report-only plan
    pub fn dry_run(config: TreeConfig) -> Self {
        Self::new(config, None)
    }
}

/// Files and bytes produced for one subdirectory
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubdirSummary {
    pub subdir: String,
    pub files: u64,
    pub bytes: u64,
}

/// Outcome of a run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerationReport {
    pub output_root: Option<PathBuf>,
    /// Whether files were written, as opposed to only listed
    pub written: bool,
    /// Set when the run stopped early on request
    pub cancelled: bool,
    pub subdirs: Vec<SubdirSummary>,
    pub directories_created: usize,
}

impl GenerationReport {
    /// Totals a configuration would produce, without expanding it
    pub fn planned(config: &TreeConfig) -> Self {
        Self {
            output_root: None,
            written: false,
            cancelled: false,
            subdirs: config
                .iter()
                .map(|(subdir, spec)| SubdirSummary {
                    subdir: subdir.to_string(),
                    files: spec.file_count(),
                    bytes: spec.total_bytes(),
                })
                .collect(),
            directories_created: 0,
        }
    }

    pub fn total_files(&self) -> u64 {
        self.subdirs
            .iter()
            .fold(0u64, |acc, s| acc.saturating_add(s.files))
    }

    pub fn total_bytes(&self) -> u64 {
        self.subdirs
            .iter()
            .fold(0u64, |acc, s| acc.saturating_add(s.bytes))
    }
}
