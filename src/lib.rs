//! ttmaker: Deterministic Test Trees
//!
//! Expands small YAML descriptions into trees of named files with reproducible
//! content, for exercising file-transfer tooling. Every file name is derived from
//! its configuration and every file body from its relative path, so two runs over
//! the same configuration produce byte-identical trees.

pub mod concurrency;
pub mod config;
pub mod content;
pub mod error;
pub mod generation;
pub mod logging;
pub mod materialize;
pub mod naming;
pub mod spec;
pub mod tooling;
pub mod types;
