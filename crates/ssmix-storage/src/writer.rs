//! Atomic, per-message file writes.

use crate::error::{Result, StorageError};
use std::path::Path;
use tempfile::NamedTempFile;

/// Writes `contents` to `path`, provisioning parent directories as
/// needed. The write lands in a temporary file in the same directory
/// first, then is renamed into place, so a reader never observes a
/// partially written message file.
pub fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let parent = path.parent().unwrap_or_else(|| Path::new("."));
    std::fs::create_dir_all(parent).map_err(|source| StorageError::CreateDir {
        path: parent.to_path_buf(),
        source,
    })?;

    let mut tmp = NamedTempFile::new_in(parent).map_err(|source| StorageError::Write {
        path: path.to_path_buf(),
        source,
    })?;

    use std::io::Write;
    tmp.write_all(contents.as_bytes()).map_err(|source| StorageError::Write {
        path: path.to_path_buf(),
        source,
    })?;

    tmp.persist(path).map_err(|e| StorageError::Persist {
        path: path.to_path_buf(),
        source: e.error,
    })?;

    Ok(())
}
