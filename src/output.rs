//! The file an external display watches for the current lyric line.

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Output file that receives one line at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputTarget {
    path: PathBuf,
}

impl OutputTarget {
    /// Target the given file. Nothing is written until a line is shown.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the output file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Replace the file content with `text` as UTF-8, no trailing newline.
    pub fn write_line(&self, text: &str) -> Result<()> {
        fs_err::write(&self.path, text.as_bytes()).map_err(|e| Error::io(e, self.path.clone()))?;
        tracing::debug!("Wrote {} bytes to {}", text.len(), self.path.display());
        Ok(())
    }

    /// Blank the display by truncating the file.
    pub fn clear(&self) -> Result<()> {
        self.write_line("")
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;

    #[test]
    fn test_write_replaces_content() {
        let dir = tempfile::tempdir().unwrap();
        let target = OutputTarget::new(dir.path().join("line.txt"));

        target.write_line("first line that is longer").unwrap();
        target.write_line("Grâce").unwrap();
        assert_eq!(std::fs::read_to_string(target.path()).unwrap(), "Grâce");

        target.clear().unwrap();
        assert_eq!(std::fs::read(target.path()).unwrap().len(), 0);
    }

    #[test]
    fn test_write_into_missing_dir_fails_with_path() {
        let dir = tempfile::tempdir().unwrap();
        let target = OutputTarget::new(dir.path().join("no_such_dir").join("line.txt"));
        let err = target.write_line("x").unwrap_err();
        assert!(matches!(err, Error::Io { path: Some(_), .. }));
    }
}
