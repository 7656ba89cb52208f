//! Writing descriptors to disk

use crate::concurrency::DirectoryCache;
use crate::content::fill_file;
use crate::error::ApiError;
use crate::types::FileDescriptor;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Create the parent of `full_path` if this run has not already, then write the
/// file's content.
pub fn fill_path(
    full_path: &Path,
    nbytes: u64,
    seed: &str,
    text: bool,
    dirs: &DirectoryCache,
) -> Result<(), ApiError> {
    if let Some(parent) = full_path.parent() {
        dirs.ensure(parent).map_err(|e| ApiError::io(parent, e))?;
    }

    let file = File::create(full_path).map_err(|e| ApiError::io(full_path, e))?;
    let mut writer = BufWriter::new(file);
    fill_file(&mut writer, nbytes, seed, text).map_err(|e| ApiError::io(full_path, e))?;
    writer.flush().map_err(|e| ApiError::io(full_path, e))?;
    Ok(())
}

/// Materialize one descriptor under `root`
pub fn materialize(
    root: &Path,
    descriptor: &FileDescriptor,
    dirs: &DirectoryCache,
) -> Result<(), ApiError> {
    fill_path(
        &descriptor.full_path(root),
        descriptor.byte_size,
        &descriptor.seed,
        descriptor.text,
        dirs,
    )
}
