//! Checks on names that end up as filesystem paths.

use std::path::{Component, Path};

/// A subdirectory key must stay below the output root.
///
/// Returns the key in canonical form: `.` components and redundant or trailing
/// separators are dropped, so `a`, `a/` and `./a` all name `a`.
pub fn normalize_subdir_name(name: &str) -> Result<String, String> {
    if name.trim().is_empty() {
        return Err("Subdirectory name cannot be empty".to_string());
    }

    let mut parts = Vec::new();
    for component in Path::new(name).components() {
        match component {
            Component::Normal(part) => parts.push(part.to_string_lossy().into_owned()),
            Component::CurDir => {}
            Component::ParentDir => {
                return Err(format!(
                    "Subdirectory '{}' must not contain '..' components",
                    name
                ))
            }
            Component::RootDir | Component::Prefix(_) => {
                return Err(format!("Subdirectory '{}' must be a relative path", name))
            }
        }
    }

    if parts.is_empty() {
        return Err(format!(
            "Subdirectory '{}' does not name a directory below the output root",
            name
        ));
    }
    Ok(parts.join("/"))
}

/// An extension is appended to a file name, so it cannot introduce directories.
pub fn validate_extension(extn: &str) -> Result<(), String> {
    if extn.contains('/') || extn.contains('\\') {
        return Err(format!(
            "Extension '{}' must not contain path separators",
            extn
        ));
    }
    Ok(())
}
