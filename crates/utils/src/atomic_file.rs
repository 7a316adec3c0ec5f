//! Atomic file replacement so a failed run never leaves a half-written env file

use std::fs;
use std::io::Write;
use std::path::Path;
use vaultenv_core::{Error, Result};

/// Write data to a file atomically by writing to a temporary file and renaming
///
/// The temporary file lives in the target directory so the rename never
/// crosses a filesystem. On Unix it is created with mode 0600, which the
/// final file keeps.
pub fn write_atomic(path: &Path, content: &[u8]) -> Result<()> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    fs::create_dir_all(parent)
        .map_err(|e| Error::file_system(parent, "create parent directory", e))?;

    let mut temp = tempfile::NamedTempFile::new_in(parent)
        .map_err(|e| Error::file_system(parent, "create temporary file", e))?;

    temp.write_all(content)
        .map_err(|e| Error::file_system(temp.path(), "write to temporary file", e))?;

    temp.as_file()
        .sync_all()
        .map_err(|e| Error::file_system(temp.path(), "sync temporary file", e))?;

    // Dropping a NamedTempFile on error removes it
    temp.persist(path)
        .map_err(|e| Error::file_system(path, "atomic rename", e.error))?;

    Ok(())
}

/// Write string content to a file atomically
pub fn write_atomic_string(path: &Path, content: &str) -> Result<()> {
    write_atomic(path, content.as_bytes())
}
