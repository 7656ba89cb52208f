//! Generation executor
//!
//! Descriptors are scheduled and reported in configuration order. Writes run on
//! `spawn_blocking` tasks; a semaphore caps how many files are in flight. The first
//! failure stops scheduling and is returned once in-flight writes have drained.

use super::{GenerationPlan, GenerationReport, SubdirSummary};
use crate::concurrency::{CancelFlag, DirectoryCache};
use crate::error::ApiError;
use crate::materialize::materialize;
use crate::spec::{expand_spec, TreeConfig};
use parking_lot::Mutex;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::{JoinError, JoinSet};
use tracing::{debug, info, warn};

/// Runs generation plans
#[derive(Debug, Clone)]
pub struct GenerationExecutor {
    workers: usize,
    cancel: CancelFlag,
    handle_signals: bool,
}

impl GenerationExecutor {
    /// Executor with `workers` concurrent writes (at least one)
    pub fn new(workers: usize) -> Self {
        Self {
            workers: workers.max(1),
            cancel: CancelFlag::new(),
            handle_signals: false,
        }
    }

    /// Share a cancel flag with the caller
    pub fn with_cancel_flag(mut self, cancel: CancelFlag) -> Self {
        self.cancel = cancel;
        self
    }

    /// Stop scheduling on Ctrl-C
    pub fn with_signal_handling(mut self, enabled: bool) -> Self {
        self.handle_signals = enabled;
        self
    }

    pub fn cancel_flag(&self) -> CancelFlag {
        self.cancel.clone()
    }

    /// Execute `plan`, writing one line per file to `report`
    pub fn run<W: Write>(
        &self,
        plan: &GenerationPlan,
        report: &mut W,
    ) -> Result<GenerationReport, ApiError> {
        info!(
            subdirs = plan.config.len(),
            files = plan.config.file_count(),
            bytes = plan.config.total_bytes(),
            output_root = ?plan.output_root,
            "Starting generation"
        );

        let result = match &plan.output_root {
            None => self.list(&plan.config, report),
            Some(root) => {
                prepare_output_root(root)?;
                self.write(&plan.config, root, report)
            }
        }?;

        report.flush().map_err(report_error)?;
        info!(
            files = result.total_files(),
            bytes = result.total_bytes(),
            subdirs = result.subdirs.len(),
            cancelled = result.cancelled,
            "Generation finished"
        );
        Ok(result)
    }

    fn list<W: Write>(
        &self,
        config: &TreeConfig,
        report: &mut W,
    ) -> Result<GenerationReport, ApiError> {
        let mut subdirs = Vec::with_capacity(config.len());
        let mut cancelled = false;

        'outer: for (subdir, spec) in config.iter() {
            debug!(subdir, "Looking at subdirectory");
            let mut summary = SubdirSummary {
                subdir: subdir.to_string(),
                files: 0,
                bytes: 0,
            };
            for descriptor in expand_spec(subdir, spec) {
                if self.cancel.is_cancelled() {
                    cancelled = true;
                    subdirs.push(summary);
                    break 'outer;
                }
                writeln!(report, "{}", descriptor.display_path()).map_err(report_error)?;
                summary.files = summary.files.saturating_add(1);
                summary.bytes = summary.bytes.saturating_add(descriptor.byte_size);
            }
            debug!(subdir, files = summary.files, "Listed files");
            subdirs.push(summary);
        }

        Ok(GenerationReport {
            output_root: None,
            written: false,
            cancelled,
            subdirs,
            directories_created: 0,
        })
    }

    fn write<W: Write>(
        &self,
        config: &TreeConfig,
        root: &Path,
        report: &mut W,
    ) -> Result<GenerationReport, ApiError> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .max_blocking_threads(self.workers)
            .enable_all()
            .build()
            .map_err(|e| ApiError::WorkerFailed(format!("Failed to start worker pool: {}", e)))?;

        runtime.block_on(self.write_async(config, root, report))
    }

    async fn write_async<W: Write>(
        &self,
        config: &TreeConfig,
        root: &Path,
        report: &mut W,
    ) -> Result<GenerationReport, ApiError> {
        if self.handle_signals {
            let cancel = self.cancel.clone();
            tokio::spawn(async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    warn!("Interrupted, finishing files in flight");
                    cancel.cancel();
                }
            });
        }

        let root = Arc::new(root.to_path_buf());
        let dirs = Arc::new(DirectoryCache::new());
        let semaphore = Arc::new(Semaphore::new(self.workers));
        let first_error: Arc<Mutex<Option<ApiError>>> = Arc::new(Mutex::new(None));
        let mut tasks = JoinSet::new();
        let mut subdirs = Vec::with_capacity(config.len());
        let mut cancelled = false;

        'outer: for (subdir, spec) in config.iter() {
            debug!(subdir, "Looking at subdirectory");
            let mut summary = SubdirSummary {
                subdir: subdir.to_string(),
                files: 0,
                bytes: 0,
            };

            for descriptor in expand_spec(subdir, spec) {
                let permit = Arc::clone(&semaphore)
                    .acquire_owned()
                    .await
                    .map_err(|e| ApiError::WorkerFailed(e.to_string()))?;

                while let Some(joined) = tasks.try_join_next() {
                    record_join(joined, &first_error);
                }
                if first_error.lock().is_some() {
                    subdirs.push(summary);
                    break 'outer;
                }
                if self.cancel.is_cancelled() {
                    cancelled = true;
                    subdirs.push(summary);
                    break 'outer;
                }

                writeln!(report, "{}", descriptor.display_path()).map_err(report_error)?;
                summary.files = summary.files.saturating_add(1);
                summary.bytes = summary.bytes.saturating_add(descriptor.byte_size);

                let root = Arc::clone(&root);
                let dirs = Arc::clone(&dirs);
                let first_error = Arc::clone(&first_error);
                let cancel = self.cancel.clone();
                tasks.spawn_blocking(move || {
                    let _permit = permit;
                    if let Err(e) = materialize(&root, &descriptor, &dirs) {
                        first_error.lock().get_or_insert(e);
                        cancel.cancel();
                    }
                });
            }

            debug!(subdir, files = summary.files, "Generated files");
            subdirs.push(summary);
        }

        while let Some(joined) = tasks.join_next().await {
            record_join(joined, &first_error);
        }

        if let Some(err) = first_error.lock().take() {
            return Err(err);
        }
        if cancelled {
            warn!("Generation cancelled before all files were scheduled");
        }

        Ok(GenerationReport {
            output_root: Some((*root).clone()),
            written: true,
            cancelled,
            subdirs,
            directories_created: dirs.len(),
        })
    }
}

/// Create the output root, refusing to reuse an existing path
pub fn prepare_output_root(root: &Path) -> Result<(), ApiError> {
    if std::fs::symlink_metadata(root).is_ok() {
        return Err(ApiError::OutputConflict(root.to_path_buf()));
    }
    std::fs::create_dir(root).map_err(|e| {
        if e.kind() == std::io::ErrorKind::AlreadyExists {
            ApiError::OutputConflict(root.to_path_buf())
        } else {
            ApiError::io(root, e)
        }
    })?;
    debug!(root = %root.display(), "Created output root");
    Ok(())
}

fn record_join(joined: Result<(), JoinError>, first_error: &Mutex<Option<ApiError>>) {
    if let Err(e) = joined {
        first_error
            .lock()
            .get_or_insert(ApiError::WorkerFailed(e.to_string()));
    }
}

fn report_error(e: std::io::Error) -> ApiError {
    ApiError::io(PathBuf::from("<report>"), e)
}
