//! File and directory naming
//!
//! Pure functions: no I/O. Paths are `/`-separated strings relative to a
//! subdirectory; the materializer turns them into platform paths.

/// Filler used when a name must be stretched to a minimum length
pub const DEFAULT_PAD: &str = "paddingPADDING";

/// Minimum number of digits in a file index
const MIN_INDEX_WIDTH: usize = 4;

/// Pad `name` so that `name + extn` is at least `min_len` characters long.
///
/// Padding is `_` followed by `pad` tiled end-to-end. A deficit of exactly one is left
/// unpadded, since it would only leave room for a bare `_`.
pub fn pad_filename(name: &str, min_len: usize, pad: &str, extn: &str) -> String {
    let used = name.chars().count() + extn.chars().count();
    let deficit = min_len.saturating_sub(used);

    if deficit <= 1 {
        return format!("{name}{extn}");
    }

    let padding: String = pad.chars().cycle().take(deficit - 1).collect();
    format!("{name}_{padding}{extn}")
}

/// Digits needed to print the largest index of a `file_count`-sized run
pub fn index_width(file_count: u64) -> usize {
    let largest = file_count.saturating_sub(1);
    largest.to_string().len().max(MIN_INDEX_WIDTH)
}

/// Name the files of one (size label, count) group.
///
/// Yields exactly `file_count` paths of the form
/// `size_{label}_files_{count}[/subdir_1/...]/size_{label}_{index}{extn}`.
/// The iterator is `Clone`, so a generated sequence can be replayed.
pub fn gen_names(
    file_count: u64,
    size_label: &str,
    pad_len: usize,
    path_depth: usize,
    extn: &str,
) -> FileNames {
    let mut dir = format!("size_{size_label}_files_{file_count}");
    for n in 1..path_depth {
        dir.push('/');
        dir.push_str(&pad_filename(&format!("subdir_{n}"), pad_len, DEFAULT_PAD, ""));
    }

    FileNames {
        dir,
        size_label: size_label.to_string(),
        extn: extn.to_string(),
        pad_len,
        width: index_width(file_count),
        next: 0,
        count: file_count,
    }
}

/// Lazy sequence returned by [`gen_names`]
#[derive(Debug, Clone)]
pub struct FileNames {
    dir: String,
    size_label: String,
    extn: String,
    pad_len: usize,
    width: usize,
    next: u64,
    count: u64,
}

impl Iterator for FileNames {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        if self.next >= self.count {
            return None;
        }
        let index = self.next;
        self.next += 1;

        let stem = format!("size_{}_{:0width$}", self.size_label, index, width = self.width);
        Some(format!(
            "{}/{}",
            self.dir,
            pad_filename(&stem, self.pad_len, DEFAULT_PAD, &self.extn)
        ))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.count - self.next) as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for FileNames {}
