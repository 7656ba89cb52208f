//! CLI Tooling
//!
//! Command-line interface for generating and validating test trees. Commands run
//! through [`CliContext::execute`], which streams the per-file report to a caller
//! supplied writer and returns the summary as a string.

use crate::concurrency::CancelFlag;
use crate::config::{resolve_jobs, ConfigLoader, MakerSettings};
use crate::error::ApiError;
use crate::generation::{
    format_report_json, format_report_text, GenerationExecutor, GenerationPlan, GenerationReport,
};
use crate::logging::LoggingConfig;
use crate::spec::TreeConfigLoader;
use clap::{Parser, Subcommand};
use std::io::Write;
use std::path::PathBuf;
use std::time::Instant;
use tracing::info;

/// ttmaker CLI - deterministic test trees for transfer tooling
#[derive(Parser, Debug)]
#[command(name = "ttmaker")]
#[command(about = "Given config files, generates a directory of files to try transferring")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Settings file path (overrides default settings loading)
    #[arg(long, global = true)]
    pub settings: Option<PathBuf>,

    /// Print more verbose debugging messages
    #[arg(short, long, global = true)]
    pub debug: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long, global = true)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file, file+stderr, both)
    #[arg(long, global = true)]
    pub log_output: Option<String>,

    /// Log file path (if output includes "file")
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// Fold logging flags over the settings' logging section
    pub fn logging_config(&self, base: &LoggingConfig) -> LoggingConfig {
        let mut config = base.clone();
        if let Some(level) = &self.log_level {
            config.level = level.clone();
        }
        if self.debug {
            config.level = "debug".to_string();
        }
        if let Some(format) = &self.log_format {
            config.format = format.clone();
        }
        if let Some(output) = &self.log_output {
            config.output = output.clone();
        }
        if let Some(file) = &self.log_file {
            config.file = Some(file.clone());
        }
        config
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Expand config files into a tree of files
    Generate {
        /// Config file(s) to process, merged in order
        #[arg(required = true)]
        configs: Vec<PathBuf>,

        /// Directory to create. Must not exist. If omitted, the list of files is only printed
        #[arg(short, long)]
        outdir: Option<PathBuf>,

        /// Files written concurrently (0 = one per CPU, 1 = sequential)
        #[arg(short, long)]
        jobs: Option<usize>,

        /// Do not print one line per generated file
        #[arg(short, long)]
        quiet: bool,

        /// Summary format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Check config files and show what they would generate
    Validate {
        /// Config file(s) to check, merged in order
        #[arg(required = true)]
        configs: Vec<PathBuf>,

        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
}

/// CLI context holding loaded settings
pub struct CliContext {
    settings: MakerSettings,
    cancel: CancelFlag,
    handle_signals: bool,
}

impl CliContext {
    /// Create a new CLI context, loading settings from `settings_path` or the
    /// standard sources
    pub fn new(settings_path: Option<PathBuf>) -> Result<Self, ApiError> {
        let settings = ConfigLoader::load_optional(settings_path.as_deref())?;
        Ok(Self::from_settings(settings))
    }

    /// Create a context from already-loaded settings
    pub fn from_settings(settings: MakerSettings) -> Self {
        Self {
            settings,
            cancel: CancelFlag::new(),
            handle_signals: false,
        }
    }

    /// Stop scheduling new files on Ctrl-C
    pub fn with_signal_handling(mut self, enabled: bool) -> Self {
        self.handle_signals = enabled;
        self
    }

    pub fn settings(&self) -> &MakerSettings {
        &self.settings
    }

    /// Flag that stops a running generation when set
    pub fn cancel_flag(&self) -> CancelFlag {
        self.cancel.clone()
    }

    /// Execute a CLI command
    pub fn execute<W: Write>(&self, command: &Commands, report: &mut W) -> Result<String, ApiError> {
        let started = Instant::now();
        let result = match command {
            Commands::Generate {
                configs,
                outdir,
                jobs,
                quiet,
                format,
            } => self.handle_generate(configs, outdir.clone(), *jobs, *quiet, format, report),
            Commands::Validate { configs, format } => self.handle_validate(configs, format),
        };
        info!(
            command = command_name(command),
            ok = result.is_ok(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Command finished"
        );
        result
    }

    fn handle_generate<W: Write>(
        &self,
        configs: &[PathBuf],
        outdir: Option<PathBuf>,
        jobs: Option<usize>,
        quiet: bool,
        format: &str,
        report: &mut W,
    ) -> Result<String, ApiError> {
        validate_output_format(format)?;
        let config = TreeConfigLoader::load_files(configs)?;

        let workers = jobs
            .map(resolve_jobs)
            .unwrap_or_else(|| self.settings.generation.worker_count());
        let executor = GenerationExecutor::new(workers)
            .with_cancel_flag(self.cancel.clone())
            .with_signal_handling(self.handle_signals);
        let plan = GenerationPlan::new(config, outdir);

        let summary = if quiet {
            executor.run(&plan, &mut std::io::sink())?
        } else {
            executor.run(&plan, report)?
        };
        Ok(format_summary(&summary, format))
    }

    fn handle_validate(&self, configs: &[PathBuf], format: &str) -> Result<String, ApiError> {
        validate_output_format(format)?;
        let config = TreeConfigLoader::load_files(configs)?;
        Ok(format_summary(&GenerationReport::planned(&config), format))
    }
}

fn format_summary(report: &GenerationReport, format: &str) -> String {
    if format == "json" {
        format_report_json(report)
    } else {
        format_report_text(report)
    }
}

fn validate_output_format(format: &str) -> Result<(), ApiError> {
    match format {
        "text" | "json" => Ok(()),
        other => Err(ApiError::ConfigError(format!(
            "Invalid output format: {} (must be 'text' or 'json')",
            other
        ))),
    }
}

fn command_name(command: &Commands) -> &'static str {
    match command {
        Commands::Generate { .. } => "generate",
        Commands::Validate { .. } => "validate",
    }
}
