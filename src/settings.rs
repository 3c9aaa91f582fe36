//! Remembered operator choices between runs.
//!
//! Stores the last browse directory and output file in
//! `<config dir>/ezlyric/settings.json`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::constants::settings::{APP_DIR, SETTINGS_FILE};
use crate::error::{Error, Result};

/// Persistent settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Directory of the last loaded or chosen file.
    #[serde(default)]
    pub directory: Option<PathBuf>,

    /// Last output file.
    #[serde(default)]
    pub output_file: Option<PathBuf>,
}

/// Default settings path under the platform config directory.
pub fn default_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(APP_DIR).join(SETTINGS_FILE))
}

impl Settings {
    /// Load settings, falling back to defaults if the file is missing or unreadable.
    pub fn load(path: &Path) -> Self {
        let contents = match fs_err::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Self::default(),
            Err(e) => {
                tracing::warn!("Failed to read settings: {e}");
                return Self::default();
            }
        };

        serde_json::from_str(&contents).unwrap_or_else(|e| {
            tracing::warn!("Ignoring corrupt settings file {}: {e}", path.display());
            Self::default()
        })
    }

    /// Write settings, creating the parent directory if needed.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs_err::create_dir_all(parent).map_err(|e| Error::io(e, parent.to_path_buf()))?;
        }
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| Error::parse(e.to_string(), path.to_path_buf()))?;
        fs_err::write(path, json).map_err(|e| Error::io(e, path.to_path_buf()))
    }

    /// Remember the directory containing `file`.
    pub fn remember_directory(&mut self, file: &Path) {
        let dir = if file.is_dir() { Some(file) } else { file.parent() };
        if let Some(dir) = dir.filter(|d| !d.as_os_str().is_empty()) {
            self.directory = Some(dir.to_path_buf());
        }
    }

    /// Resolve a typed path against the remembered directory.
    ///
    /// `~` is expanded; relative paths are joined onto the directory.
    pub fn resolve(&self, input: &str) -> PathBuf {
        let expanded = PathBuf::from(shellexpand::tilde(input.trim()).to_string());
        match &self.directory {
            Some(dir) if expanded.is_relative() => dir.join(expanded),
            _ => expanded,
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::load(&dir.path().join("settings.json"));
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_corrupt_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "{ nope").unwrap();
        assert_eq!(Settings::load(&path), Settings::default());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.json");

        let mut settings = Settings::default();
        settings.remember_directory(&dir.path().join("hymns").join("grace.txt"));
        settings.output_file = Some(dir.path().join("out.txt"));
        settings.save(&path).unwrap();

        let loaded = Settings::load(&path);
        assert_eq!(loaded.directory, Some(dir.path().join("hymns")));
        assert_eq!(loaded.output_file, Some(dir.path().join("out.txt")));
    }

    #[test]
    fn test_resolve_relative_against_directory() {
        let settings = Settings {
            directory: Some(PathBuf::from("/srv/lyrics")),
            output_file: None,
        };
        assert_eq!(settings.resolve("grace.txt"), PathBuf::from("/srv/lyrics/grace.txt"));
        assert_eq!(settings.resolve("/abs/x.txt"), PathBuf::from("/abs/x.txt"));
    }
}
