use std::fs;
use std::path::{Path, PathBuf};

use ttmaker::config::MakerSettings;
use ttmaker::error::ApiError;
use ttmaker::tooling::cli::{CliContext, Commands};
use walkdir::WalkDir;

/// Context with default settings, isolated from any settings on the host
pub fn context() -> CliContext {
    CliContext::from_settings(MakerSettings::default())
}

pub fn write_config(dir: &Path, name: &str, yaml: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, yaml).unwrap();
    path
}

pub fn generate(
    configs: Vec<PathBuf>,
    outdir: Option<PathBuf>,
    jobs: usize,
    format: &str,
) -> Result<(String, String), ApiError> {
    let mut report = Vec::new();
    let summary = context().execute(
        &Commands::Generate {
            configs,
            outdir,
            jobs: Some(jobs),
            quiet: false,
            format: format.to_string(),
        },
        &mut report,
    )?;
    Ok((String::from_utf8(report).unwrap(), summary))
}

/// Every regular file under `root` as (relative path, size), sorted
pub fn list_files(root: &Path) -> Vec<(String, u64)> {
    let mut files: Vec<(String, u64)> = WalkDir::new(root)
        .into_iter()
        .map(|entry| entry.unwrap())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| {
            let rel = entry
                .path()
                .strip_prefix(root)
                .unwrap()
                .components()
                .map(|c| c.as_os_str().to_string_lossy().into_owned())
                .collect::<Vec<_>>()
                .join("/");
            (rel, entry.metadata().unwrap().len())
        })
        .collect();
    files.sort();
    files
}
