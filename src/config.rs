//! Application configuration.
//!
//! Handles loading configuration from environment variables and .env files.

use dotenv::dotenv;
use std::env;
use std::path::PathBuf;

use crate::constants::env as keys;
use crate::constants::navigator::DEFAULT_COMMENT_PREFIX;
use crate::error::{Error, Result};

/// Configuration for the application.
#[derive(Debug, Clone)]
pub struct Config {
    /// Output file from the environment; overrides the remembered one
    pub output_file: Option<PathBuf>,
    /// Prefix marking comment lines skipped by advance
    pub comment_prefix: String,
    /// Log file path, if logging is enabled
    pub log_file: Option<PathBuf>,
    /// Settings file location
    pub settings_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_file: None,
            comment_prefix: DEFAULT_COMMENT_PREFIX.to_string(),
            log_file: None,
            settings_path: crate::settings::default_path(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn load() -> Result<Self> {
        // Try to load .env file if present
        dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from a variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self {
            output_file: lookup(keys::OUTPUT).map(|p| expand_path(&p)),
            log_file: lookup(keys::LOG).map(|p| expand_path(&p)),
            ..Self::default()
        };

        if let Some(prefix) = lookup(keys::COMMENT_PREFIX) {
            let prefix = prefix.trim();
            if prefix.is_empty() {
                return Err(Error::config(
                    "comment prefix is empty",
                    "Set EZLYRIC_COMMENT_PREFIX to a non-empty value such as '-' or unset it",
                ));
            }
            config.comment_prefix = prefix.to_string();
        }

        Ok(config)
    }
}

fn expand_path(path: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path.trim()).to_string())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_without_env() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.comment_prefix, "-");
        assert!(config.output_file.is_none());
        assert!(config.log_file.is_none());
        if let Some(path) = config.settings_path {
            assert!(path.ends_with("ezlyric/settings.json"));
        }
    }

    #[test]
    fn test_env_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            ("EZLYRIC_OUTPUT", "/tmp/overlay.txt"),
            ("EZLYRIC_COMMENT_PREFIX", " # "),
        ]))
        .unwrap();
        assert_eq!(config.output_file, Some(PathBuf::from("/tmp/overlay.txt")));
        assert_eq!(config.comment_prefix, "#");
    }

    #[test]
    fn test_blank_prefix_is_config_error() {
        let err = Config::from_lookup(lookup_from(&[("EZLYRIC_COMMENT_PREFIX", "  ")])).unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }
}
