//! Persisted preferences for the command line.
//!
//! Settings live in a small TOML file. A missing file means defaults; the
//! file is only created when a value is changed.

use std::{
    fmt, fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use xmlstrings::ExportOptions;

use crate::error::{CliError, Result};

const SETTINGS_DIR: &str = "xmlstrings";
const SETTINGS_FILE: &str = "settings.toml";

/// Names accepted by `config set`.
pub const KEYS: &[&str] = &[
    "include_empty",
    "detailed_changes",
    "default_export_name",
    "default_import_name",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Write absent values as `""` when exporting.
    pub include_empty: bool,
    /// Print every applied change after an import.
    pub detailed_changes: bool,
    /// Output name offered for exports, without extension.
    pub default_export_name: String,
    /// Output name offered for imports, without extension.
    pub default_import_name: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            include_empty: true,
            detailed_changes: true,
            default_export_name: "Localizable".to_string(),
            default_import_name: "strings_edited".to_string(),
        }
    }
}

impl Settings {
    /// `<config dir>/xmlstrings/settings.toml`, when the platform has one.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(SETTINGS_DIR).join(SETTINGS_FILE))
    }

    /// Loads settings from `path`, falling back to defaults when the file
    /// does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no settings file, using defaults");
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CliError::config(path, e.message()))
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).map_err(|e| CliError::config(path, e))?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        xmlstrings::io::write_atomic(path, content.as_bytes())?;
        tracing::debug!(path = %path.display(), "saved settings");
        Ok(())
    }

    /// Updates one value by name, parsing booleans leniently.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "include_empty" => self.include_empty = parse_bool(key, value)?,
            "detailed_changes" => self.detailed_changes = parse_bool(key, value)?,
            "default_export_name" => self.default_export_name = parse_name(key, value)?,
            "default_import_name" => self.default_import_name = parse_name(key, value)?,
            other => {
                return Err(CliError::user(format!(
                    "Unknown setting '{}'. Available settings: {}",
                    other,
                    KEYS.join(", ")
                )));
            }
        }
        Ok(())
    }

    pub fn export_options(&self) -> ExportOptions {
        ExportOptions::new().with_include_empty(self.include_empty)
    }
}

impl fmt::Display for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "include_empty = {}", self.include_empty)?;
        writeln!(f, "detailed_changes = {}", self.detailed_changes)?;
        writeln!(f, "default_export_name = {}", self.default_export_name)?;
        write!(f, "default_import_name = {}", self.default_import_name)
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Ok(true),
        "false" | "no" | "off" | "0" => Ok(false),
        _ => Err(CliError::user(format!(
            "Setting '{}' expects true or false, got '{}'",
            key, value
        ))),
    }
}

fn parse_name(key: &str, value: &str) -> Result<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(CliError::user(format!("Setting '{}' cannot be empty", key)));
    }
    Ok(value.to_string())
}

/// Resolves the settings path from `--config` or the platform default.
pub fn resolve_path(explicit: Option<&Path>) -> Result<PathBuf> {
    match explicit {
        Some(path) => Ok(path.to_path_buf()),
        None => Settings::default_path().ok_or_else(|| {
            CliError::user("No configuration directory on this platform; pass --config <path>")
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let settings = Settings::load(&dir.path().join("settings.toml")).unwrap();
        assert_eq!(settings, Settings::default());
        assert!(settings.include_empty);
        assert_eq!(settings.default_export_name, "Localizable");
    }

    #[test]
    fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("settings.toml");

        let mut settings = Settings::default();
        settings.set("include_empty", "no").unwrap();
        settings.set("default_import_name", " translated ").unwrap();
        settings.save(&path).unwrap();

        let loaded = Settings::load(&path).unwrap();
        assert!(!loaded.include_empty);
        assert_eq!(loaded.default_import_name, "translated");
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.toml");
        fs::write(&path, "detailed_changes = false\n").unwrap();

        let loaded = Settings::load(&path).unwrap();
        assert!(!loaded.detailed_changes);
        assert_eq!(loaded.default_import_name, "strings_edited");
    }

    #[test]
    fn test_invalid_file_is_config_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.toml");
        fs::write(&path, "include_empty = \"sometimes\"\n").unwrap();

        let err = Settings::load(&path).unwrap_err();
        assert!(matches!(err, CliError::Config { .. }));
    }

    #[test]
    fn test_set_rejects_unknown_key_and_bad_values() {
        let mut settings = Settings::default();
        assert!(settings.set("colour", "blue").is_err());
        assert!(settings.set("include_empty", "maybe").is_err());
        assert!(settings.set("default_export_name", "   ").is_err());
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_export_options_follow_settings() {
        let mut settings = Settings::default();
        assert!(settings.export_options().include_empty);
        settings.include_empty = false;
        assert!(!settings.export_options().include_empty);
    }
}
