//! Sequential cursor over loaded lyric lines.
//!
//! The operator shows the selected line and the cursor jumps to the next line
//! worth displaying. Blank lines separate stanzas and lines starting with the
//! comment prefix hold cues like `-V1` or `-Chorus`, so both are passed over.

use std::path::Path;

use crate::constants::navigator::DEFAULT_COMMENT_PREFIX;
use crate::error::{Error, Result};
use crate::song::Song;

/// Ordered lines plus the currently selected row.
#[derive(Debug, Clone)]
pub struct LineNavigator {
    lines: Vec<String>,
    current: Option<usize>,
    comment_prefix: String,
}

impl Default for LineNavigator {
    fn default() -> Self {
        Self::new(DEFAULT_COMMENT_PREFIX)
    }
}

impl LineNavigator {
    /// Create an empty navigator using the given comment prefix.
    pub fn new(comment_prefix: impl Into<String>) -> Self {
        Self {
            lines: Vec::new(),
            current: None,
            comment_prefix: comment_prefix.into(),
        }
    }

    /// Build a navigator from raw text with the default comment prefix.
    pub fn from_text(text: &str) -> Self {
        let mut nav = Self::default();
        nav.set_text(text);
        nav
    }

    /// Replace the content with `text`, one trimmed entry per `\n`.
    ///
    /// Blank lines stay in the list so the layout matches the file. The first
    /// row is selected when there is any content.
    pub fn set_text(&mut self, text: &str) {
        let lines = text.split('\n').map(|l| l.trim().to_string()).collect();
        self.set_lines(lines);
    }

    /// Replace the content with already-split lines.
    pub fn set_lines(&mut self, lines: Vec<String>) {
        self.lines = lines;
        self.current = if self.lines.is_empty() { None } else { Some(0) };
    }

    /// Load a lyric file.
    ///
    /// `.json` files are parsed as songs and flattened with part headers;
    /// anything else is read as UTF-8 text.
    pub fn load_file(&mut self, path: &Path) -> Result<()> {
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        if is_json {
            let song = Song::load(path)?;
            self.set_lines(song.to_lines(&self.comment_prefix));
        } else {
            let bytes = fs_err::read(path).map_err(|e| Error::io(e, path.to_path_buf()))?;
            self.set_text(&String::from_utf8_lossy(&bytes));
        }

        tracing::info!("Loaded {} lines from {}", self.lines.len(), path.display());
        Ok(())
    }

    /// All loaded lines.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Number of loaded lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether nothing is loaded.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Index of the selected row.
    pub const fn current(&self) -> Option<usize> {
        self.current
    }

    /// Text of the selected row.
    pub fn current_line(&self) -> Option<&str> {
        self.current.and_then(|i| self.lines.get(i)).map(String::as_str)
    }

    /// The prefix marking comment lines.
    pub fn comment_prefix(&self) -> &str {
        &self.comment_prefix
    }

    /// Select a row. Returns `false` and keeps the selection if out of range.
    pub fn select(&mut self, index: usize) -> bool {
        if index < self.lines.len() {
            self.current = Some(index);
            true
        } else {
            false
        }
    }

    /// Drop the selection.
    pub fn clear_selection(&mut self) {
        self.current = None;
    }

    /// Move the cursor up one row without skipping.
    pub fn select_previous(&mut self) {
        match self.current {
            Some(i) => self.current = Some(i.saturating_sub(1)),
            None if !self.lines.is_empty() => self.current = Some(self.lines.len() - 1),
            None => {}
        }
    }

    /// Move the cursor down one row without skipping.
    pub fn select_next(&mut self) {
        match self.current {
            Some(i) if i + 1 < self.lines.len() => self.current = Some(i + 1),
            Some(_) => {}
            None if !self.lines.is_empty() => self.current = Some(0),
            None => {}
        }
    }

    /// Whether advance would stop on this line.
    pub fn is_displayable(&self, line: &str) -> bool {
        !line.trim().is_empty()
            && (self.comment_prefix.is_empty() || !line.starts_with(&self.comment_prefix))
    }

    /// Return the selected line and move to the next displayable one.
    ///
    /// With no selection nothing happens. When no displayable line follows,
    /// the selection is cleared so the next call is a no-op.
    pub fn take_and_advance(&mut self) -> Option<String> {
        let index = self.current?;
        let text = self.lines.get(index)?.clone();

        self.current = self
            .lines
            .iter()
            .enumerate()
            .skip(index + 1)
            .find(|(_, line)| self.is_displayable(line))
            .map(|(i, _)| i);

        tracing::debug!("Advanced from line {index} to {:?}", self.current);
        Some(text)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;

    const STANZAS: &str = "-V1\nAmazing grace\nhow sweet the sound\n\n-C\n  That saved a wretch  \n";

    #[test]
    fn test_set_text_trims_and_keeps_blanks() {
        let nav = LineNavigator::from_text("one\r\n  two \n\nthree");
        assert_eq!(nav.lines(), &["one", "two", "", "three"]);
        assert_eq!(nav.current(), Some(0));
    }

    #[test]
    fn test_empty_text_is_single_blank_line() {
        // Splitting "" yields one empty entry, like an empty list row
        let nav = LineNavigator::from_text("");
        assert_eq!(nav.len(), 1);
        assert_eq!(nav.current_line(), Some(""));
    }

    #[test]
    fn test_advance_skips_blank_and_comment_lines() {
        let mut nav = LineNavigator::from_text(STANZAS);
        assert!(nav.select(1));

        assert_eq!(nav.take_and_advance().as_deref(), Some("Amazing grace"));
        assert_eq!(nav.current(), Some(2));

        assert_eq!(nav.take_and_advance().as_deref(), Some("how sweet the sound"));
        assert_eq!(nav.current_line(), Some("That saved a wretch"));
    }

    #[test]
    fn test_comment_line_is_shown_when_selected() {
        let mut nav = LineNavigator::from_text(STANZAS);
        assert_eq!(nav.take_and_advance().as_deref(), Some("-V1"));
        assert_eq!(nav.current(), Some(1));
    }

    #[test]
    fn test_advance_past_last_line_clears_selection() {
        let mut nav = LineNavigator::from_text("only line\n\n-end");
        assert_eq!(nav.take_and_advance().as_deref(), Some("only line"));
        assert_eq!(nav.current(), None);
        assert_eq!(nav.take_and_advance(), None);
    }

    #[test]
    fn test_select_out_of_range_keeps_selection() {
        let mut nav = LineNavigator::from_text("a\nb");
        assert!(nav.select(1));
        assert!(!nav.select(5));
        assert_eq!(nav.current(), Some(1));
    }

    #[test]
    fn test_cursor_moves_clamp() {
        let mut nav = LineNavigator::from_text("a\n\nb");
        nav.select_previous();
        assert_eq!(nav.current(), Some(0));
        nav.select_next();
        nav.select_next();
        nav.select_next();
        assert_eq!(nav.current(), Some(2));

        nav.clear_selection();
        nav.select_previous();
        assert_eq!(nav.current(), Some(2));
    }

    #[test]
    fn test_custom_comment_prefix() {
        let mut nav = LineNavigator::new("#");
        nav.set_text("line one\n-dash stays\n# cue\nline two");
        assert_eq!(nav.take_and_advance().as_deref(), Some("line one"));
        assert_eq!(nav.current_line(), Some("-dash stays"));
        assert_eq!(nav.take_and_advance().as_deref(), Some("-dash stays"));
        assert_eq!(nav.current_line(), Some("line two"));
    }

    #[test]
    fn test_load_missing_file_reports_path() {
        let mut nav = LineNavigator::default();
        let err = nav
            .load_file(Path::new("/tmp/ezlyric_missing_dir/nothing.txt"))
            .unwrap_err();
        assert!(err.to_string().contains("nothing.txt"));
    }
}
