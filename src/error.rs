//! Application error types.
//!
//! Provides unified error handling with the file path attached wherever a
//! file was involved, so the operator sees which file failed.

use std::path::PathBuf;

use thiserror::Error;

/// Application result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Application error types with specific context for actionable debugging
#[derive(Debug, Error)]
pub enum Error {
    /// IO error with path context
    #[error("IO error at {path:?}: {source}")]
    Io {
        /// The underlying IO error.
        source: std::io::Error,
        /// File path where the error occurred, if known.
        path: Option<PathBuf>,
    },

    /// Configuration error with guidance
    #[error("Configuration error: {message}. {hint}")]
    Config {
        /// Description of the configuration problem.
        message: String,
        /// Actionable guidance for fixing the issue.
        hint: &'static str,
    },

    /// File parsing error
    #[error("Parse error in {file:?}: {message}")]
    Parse {
        /// File that failed to parse, if known.
        file: Option<PathBuf>,
        /// Description of the parse failure.
        message: String,
    },

    /// Song model rejected an edit
    #[error("Song error: {0}")]
    Song(String),

    /// No output file has been chosen yet
    #[error("No output file set. Press 'w' to choose one")]
    NoOutput,

    /// Generic message error (escape hatch)
    #[error("{0}")]
    Msg(String),
}

impl Error {
    /// Create an IO error with path context
    pub fn io(source: std::io::Error, path: impl Into<Option<PathBuf>>) -> Self {
        Self::Io { source, path: path.into() }
    }

    /// Create a config error with actionable hint
    pub fn config(message: impl Into<String>, hint: &'static str) -> Self {
        Self::Config { message: message.into(), hint }
    }

    /// Create a parse error with file context
    pub fn parse(message: impl Into<String>, file: impl Into<Option<PathBuf>>) -> Self {
        Self::Parse { file: file.into(), message: message.into() }
    }

    /// Create a song edit error
    pub fn song(message: impl Into<String>) -> Self {
        Self::Song(message.into())
    }
}

// Convenience conversions
impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::Io { source: e, path: None }
    }
}

impl From<String> for Error {
    fn from(s: String) -> Self {
        Self::Msg(s)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;

    #[test]
    fn io_error_names_path() {
        let err = Error::io(
            std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
            PathBuf::from("/tmp/lyrics.txt"),
        );
        let msg = err.to_string();
        assert!(msg.contains("lyrics.txt"));
        assert!(msg.contains("missing"));
    }

    #[test]
    fn config_error_includes_hint() {
        let err = Error::config("bad prefix", "Set EZLYRIC_COMMENT_PREFIX to a non-empty value");
        match err {
            Error::Config { hint, .. } => assert!(hint.contains("EZLYRIC_COMMENT_PREFIX")),
            _ => panic!("Expected Config error"),
        }
    }
}
