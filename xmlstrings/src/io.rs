//! Atomic file output.

use std::{
    fs::{self, OpenOptions},
    io::Write,
    path::Path,
};

use crate::error::Error;

/// Write content atomically to a file.
///
/// Writes to a temporary sibling, flushes it and renames it over `path`.
/// The temporary file is removed when any step fails.
pub fn write_atomic(path: &Path, content: &[u8]) -> Result<(), Error> {
    let file_name = path
        .file_name()
        .ok_or_else(|| {
            Error::write_error(
                path,
                std::io::Error::new(std::io::ErrorKind::InvalidInput, "path has no file name"),
            )
        })?
        .to_string_lossy();

    // Same directory keeps the rename on one filesystem
    let temp_path = path.with_file_name(format!(".{}.{}.tmp", file_name, std::process::id()));

    let result = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(&temp_path)
        .and_then(|mut file| {
            file.write_all(content)?;
            file.sync_all()
        })
        .and_then(|()| fs::rename(&temp_path, path));

    if let Err(e) = result {
        let _ = fs::remove_file(&temp_path);
        return Err(Error::write_error(path, e));
    }

    tracing::debug!(path = %path.display(), bytes = content.len(), "wrote file");
    Ok(())
}
