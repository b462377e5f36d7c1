//! Output-name policy and input checks shared by the commands and the menu.

use std::path::{Path, PathBuf};

use xmlstrings::FormatType;

use crate::error::{CliError, Result};

const INVALID_CHARS: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

const RESERVED_NAMES: &[&str] = &[
    "CON", "PRN", "AUX", "NUL", "COM1", "COM2", "COM3", "COM4", "COM5", "COM6", "COM7", "COM8",
    "COM9", "LPT1", "LPT2", "LPT3", "LPT4", "LPT5", "LPT6", "LPT7", "LPT8", "LPT9",
];

/// `true` when `name` is usable as a file name on every desktop platform.
pub fn is_valid_file_name(name: &str) -> bool {
    if name.is_empty() || name.contains(INVALID_CHARS) {
        return false;
    }
    if name.ends_with(' ') || name.ends_with('.') {
        return false;
    }
    let base = Path::new(name)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(name);
    !RESERVED_NAMES
        .iter()
        .any(|reserved| base.eq_ignore_ascii_case(reserved))
}

/// Appends the format's extension unless the name already carries it.
pub fn with_extension(name: &str, format: FormatType) -> PathBuf {
    let path = PathBuf::from(name);
    if format.matches(&path) {
        path
    } else {
        PathBuf::from(format!("{}.{}", name, format.extension()))
    }
}

/// Next candidate after `path`: `name.ext` -> `name (1).ext`,
/// `name (1).ext` -> `name (2).ext`.
pub fn bump(path: &Path) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let (base, count) = split_counter(&stem);
    let mut name = format!("{} ({})", base, count + 1);
    if let Some(ext) = path.extension() {
        name.push('.');
        name.push_str(&ext.to_string_lossy());
    }
    path.with_file_name(name)
}

fn split_counter(stem: &str) -> (&str, u32) {
    stem.strip_suffix(')')
        .and_then(|rest| rest.rsplit_once(" ("))
        .and_then(|(base, digits)| {
            if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
                return None;
            }
            digits.parse().ok().map(|count| (base, count))
        })
        .unwrap_or((stem, 0))
}

/// First path starting at `path` that does not exist yet.
pub fn next_available_path(path: &Path) -> PathBuf {
    let mut candidate = path.to_path_buf();
    while candidate.exists() {
        candidate = bump(&candidate);
    }
    candidate
}

/// Turns a user-supplied output name into the destination path.
///
/// The extension is appended when missing, the file name is validated and,
/// unless `overwrite` is set, an existing file is never replaced.
pub fn resolve_output(name: &str, format: FormatType, overwrite: bool) -> Result<PathBuf> {
    let path = with_extension(name.trim(), format);
    let file_name = path
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or_default();
    if !is_valid_file_name(file_name) {
        return Err(CliError::user(
            "Filename contains invalid characters, ends with space/dot, or uses a reserved name.",
        ));
    }

    if overwrite || !path.exists() {
        return Ok(path);
    }
    let available = next_available_path(&path);
    tracing::debug!(
        requested = %path.display(),
        chosen = %available.display(),
        "output exists, picked next free name"
    );
    Ok(available)
}

/// Checks a typed input path: surrounding quotes are stripped, the file
/// must exist and carry the expected extension.
pub fn existing_input(raw: &str, format: FormatType) -> Result<PathBuf> {
    let trimmed = raw.trim().trim_matches('"');
    let path = PathBuf::from(trimmed);
    if trimmed.is_empty() || !path.is_file() {
        return Err(CliError::user(format!(
            "Specified .{} file not found! Try again.",
            format.extension()
        )));
    }
    match FormatType::from_path(&path) {
        Ok(found) if found == format => Ok(path),
        Ok(found) => Err(CliError::user(format!(
            "Invalid file format! Should be .{}, got a {} file!",
            format.extension(),
            found
        ))),
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "unrecognized input extension");
            Err(CliError::user(format!(
                "Invalid file format! Should be .{}!",
                format.extension()
            )))
        }
    }
}
