//! Report artifacts and how they are written to disk.

use crate::error::Result;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// UTF-8 byte-order mark, written ahead of text meant for spreadsheet and
/// editor tools that sniff encodings.
pub const UTF8_BOM: &str = "\u{feff}";

/// A file produced into the report directory.
pub trait Artifact {
    /// File name inside the report directory.
    fn file_name(&self) -> &str;

    /// Write the artifact into `dir`, which must exist, and return the path
    /// written. An existing file of the same name is overwritten.
    fn write_to(&self, dir: &Path) -> Result<PathBuf>;
}

/// Write UTF-8 text into `dir/file_name`, optionally prefixed by a BOM.
pub fn write_text(
    dir: &Path,
    file_name: &str,
    contents: &str,
    byte_order_mark: bool,
) -> Result<PathBuf> {
    let path = dir.join(file_name);
    let mut bytes = Vec::with_capacity(contents.len() + UTF8_BOM.len());
    if byte_order_mark {
        bytes.extend_from_slice(UTF8_BOM.as_bytes());
    }
    bytes.extend_from_slice(contents.as_bytes());

    fs::write(&path, bytes)?;
    info!(file = %path.display(), "wrote artifact");
    Ok(path)
}
