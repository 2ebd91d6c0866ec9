//! Input selection and output file naming.
//!
//! Input files are selected by extension alone (`.jpg`, `.jpeg`, `.png`,
//! `.webp`, any case). Output names keep the input's file name and swap the
//! extension for the output format's:
//!
//! - `holiday.JPEG` → `holiday.jpg` (type `jpg`)
//! - `scan.webp` → `scan.png` (type `png`)
//! - `v1.2-final.png` → `v1.2-final.jpg` (only the last extension changes)

use crate::imaging::{OutputFormat, supported_input_extensions};
use std::path::{Path, PathBuf};

/// Whether `path` has an image extension this build can decode.
///
/// Only looks at the name; the file is not opened.
pub fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .is_some_and(|ext| supported_input_extensions().contains(&ext.as_str()))
}

/// Output file name for `input`: its file name with the extension replaced.
///
/// Returns `None` when `input` has no file name (e.g. `/` or `..`).
pub fn output_file_name(input: &Path, format: OutputFormat) -> Option<PathBuf> {
    let name = input.file_name()?;
    Some(Path::new(name).with_extension(format.extension()))
}

/// Whether an `--output` argument names a file rather than a directory.
///
/// Anything with an extension is treated as a file path, everything else as
/// a directory.
pub fn is_file_path(output: &Path) -> bool {
    output.extension().is_some()
}
