//! Shared state for concurrent materialization
//!
//! Workers share one directory cache so each distinct parent directory is created once
//! per run, and one cancel flag so scheduling can stop early.

use parking_lot::RwLock;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::debug;

/// Directories already created during one run
///
/// Lookups take the read lock; creation takes the write lock and re-checks, so the
/// check-then-create sequence is atomic per path even with many writers.
#[derive(Debug, Default)]
pub struct DirectoryCache {
    created: RwLock<HashSet<PathBuf>>,
}

impl DirectoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create `dir` (and any missing ancestors) unless this cache already did.
    pub fn ensure(&self, dir: &Path) -> std::io::Result<()> {
        if self.created.read().contains(dir) {
            return Ok(());
        }

        let mut created = self.created.write();
        // Another worker may have created it while we waited for the write lock
        if created.contains(dir) {
            return Ok(());
        }
        std::fs::create_dir_all(dir)?;
        debug!(dir = %dir.display(), "Created directory");
        created.insert(dir.to_path_buf());
        Ok(())
    }

    pub fn contains(&self, dir: &Path) -> bool {
        self.created.read().contains(dir)
    }

    pub fn len(&self) -> usize {
        self.created.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Best-effort stop signal: checked before each file is scheduled
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}
