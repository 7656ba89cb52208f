//! Spec expansion: one spec to an ordered stream of file descriptors.
//!
//! Order is size label, then count, then file index, all as configured. Nothing is
//! buffered; descriptors are built as the caller pulls them.

use super::{Spec, TreeConfig};
use crate::naming::gen_names;
use crate::types::FileDescriptor;

/// Descriptors for one subdirectory
pub fn expand_spec<'a>(subdir: &'a str, spec: &'a Spec) -> impl Iterator<Item = FileDescriptor> + 'a {
    spec.sizes.iter().flat_map(move |size| {
        spec.numbers.iter().flat_map(move |&count| {
            gen_names(count, &size.label, spec.pad_len, spec.path_depth, &spec.extn).map(
                move |relative_path| FileDescriptor {
                    subdir: subdir.to_string(),
                    seed: relative_path.clone(),
                    relative_path,
                    byte_size: size.bytes,
                    text: spec.text,
                },
            )
        })
    })
}

/// Descriptors for a whole configuration, subdirectory by subdirectory
pub fn expand_config(config: &TreeConfig) -> impl Iterator<Item = FileDescriptor> + '_ {
    config
        .iter()
        .flat_map(|(subdir, spec)| expand_spec(subdir, spec))
}
