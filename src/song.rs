//! Song record with JSON persistence.
//!
//! A song is a number, title, author and a set of named lyric parts
//! (`V1`, `C`, `B`, ...). Parts are kept sorted by name.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::song::MAX_NUMBER;
use crate::error::{Error, Result};

/// One song and its lyric parts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Song {
    /// Hymnal or setlist number.
    #[serde(default)]
    pub number: u32,

    /// Display title.
    #[serde(default)]
    pub title: String,

    /// Author or composer credit.
    #[serde(default)]
    pub author: String,

    /// Part name to lyric text.
    #[serde(default)]
    pub lyrics: BTreeMap<String, String>,
}

impl Song {
    /// Create an empty song.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a song from a JSON document.
    ///
    /// Missing keys fall back to defaults. The document must be an object.
    pub fn from_json(json: &str) -> Result<Self> {
        let song: Self =
            serde_json::from_str(json).map_err(|e| Error::parse(e.to_string(), None))?;
        song.validate()?;
        Ok(song)
    }

    /// Serialize to indented JSON.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| Error::parse(e.to_string(), None))
    }

    /// Load a song from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs_err::read_to_string(path).map_err(|e| Error::io(e, path.to_path_buf()))?;
        let song: Self = serde_json::from_str(&contents)
            .map_err(|e| Error::parse(e.to_string(), path.to_path_buf()))?;
        song.validate()
            .map_err(|e| Error::parse(e.to_string(), path.to_path_buf()))?;

        tracing::info!("Loaded song #{} \"{}\" from {}", song.number, song.title, path.display());
        Ok(song)
    }

    /// Save the song to a JSON file, replacing any existing content.
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = self.to_json()?;
        fs_err::write(path, json).map_err(|e| Error::io(e, path.to_path_buf()))?;

        tracing::info!("Saved song \"{}\" to {}", self.title, path.display());
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        if self.number > MAX_NUMBER {
            return Err(Error::song(format!(
                "song number {} exceeds {MAX_NUMBER}",
                self.number
            )));
        }
        if self.lyrics.keys().any(|name| name.trim().is_empty()) {
            return Err(Error::song("part names must not be empty"));
        }
        Ok(())
    }

    /// Set the song number, rejecting values above [`MAX_NUMBER`].
    pub fn set_number(&mut self, number: u32) -> Result<()> {
        if number > MAX_NUMBER {
            return Err(Error::song(format!("song number must be at most {MAX_NUMBER}")));
        }
        self.number = number;
        Ok(())
    }

    /// Add or replace a part. The name is trimmed and must not be empty.
    pub fn set_part(&mut self, name: &str, text: impl Into<String>) -> Result<()> {
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::song("part name must not be empty"));
        }
        self.lyrics.insert(name.to_string(), text.into());
        Ok(())
    }

    /// Remove a part, returning its text.
    pub fn remove_part(&mut self, name: &str) -> Option<String> {
        self.lyrics.remove(name)
    }

    /// Lyric text for a part.
    pub fn part(&self, name: &str) -> Option<&str> {
        self.lyrics.get(name).map(String::as_str)
    }

    /// Part names in sorted order.
    pub fn part_names(&self) -> Vec<&str> {
        self.lyrics.keys().map(String::as_str).collect()
    }

    /// Flatten into navigator lines.
    ///
    /// Each part becomes a `<prefix><name>` header, its trimmed lines, then a
    /// blank separator. Headers and separators are skipped on advance.
    pub fn to_lines(&self, comment_prefix: &str) -> Vec<String> {
        let mut lines = Vec::new();
        for (name, text) in &self.lyrics {
            lines.push(format!("{comment_prefix}{name}"));
            lines.extend(
                text.lines()
                    .map(str::trim)
                    .filter(|l| !l.is_empty())
                    .map(String::from),
            );
            lines.push(String::new());
        }
        lines
    }
}
