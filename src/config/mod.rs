//! Tool settings
//!
//! Settings control how a run behaves (logging, worker count), not what it builds;
//! the tree itself is described by the YAML files handled in [`crate::spec`].

pub mod facade;
pub mod merge;
pub mod paths;
pub mod sources;

pub use facade::ConfigLoader;

use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};

/// Top-level settings document
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MakerSettings {
    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub generation: GenerationSettings,
}

/// Materialization settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerationSettings {
    /// Files written concurrently: 0 = one per CPU, 1 = sequential
    #[serde(default)]
    pub jobs: usize,
}

impl GenerationSettings {
    /// Resolve `jobs` to an actual worker count (never zero)
    pub fn worker_count(&self) -> usize {
        resolve_jobs(self.jobs)
    }
}

/// Map a jobs setting to a worker count; 0 means one per available CPU
pub fn resolve_jobs(jobs: usize) -> usize {
    if jobs == 0 {
        std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1)
    } else {
        jobs
    }
}
