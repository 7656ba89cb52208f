//! Core types shared by the expander, the materializer and the run driver.

use std::path::{Path, PathBuf};

/// One file to generate.
///
/// `seed` is always the path below the subdirectory, never anything that depends on
/// where the tree is written, so the same relative path yields the same bytes under
/// any output root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDescriptor {
    pub subdir: String,
    pub relative_path: String,
    pub byte_size: u64,
    pub seed: String,
    pub text: bool,
}

impl FileDescriptor {
    /// Report line: `{subdir}/{relative_path}`
    pub fn display_path(&self) -> String {
        format!("{}/{}", self.subdir, self.relative_path)
    }

    /// Location of this file under `root`
    pub fn full_path(&self, root: &Path) -> PathBuf {
        let mut path = root.join(&self.subdir);
        for segment in self.relative_path.split('/') {
            path.push(segment);
        }
        path
    }
}
