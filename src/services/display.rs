//! Display service: the navigator wired to the output file.
//!
//! Every operator action that changes what the audience sees goes through
//! here, so it can be tested without a terminal.

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::navigator::LineNavigator;
use crate::output::OutputTarget;

/// Loaded lyrics, output target and the text currently on screen.
#[derive(Debug, Default)]
pub struct DisplayService {
    /// Loaded lines and cursor.
    pub navigator: LineNavigator,
    output: Option<OutputTarget>,
    loaded_file: Option<PathBuf>,
    on_screen: Option<String>,
}

impl DisplayService {
    /// Create a service around an empty navigator.
    pub const fn new(navigator: LineNavigator) -> Self {
        Self {
            navigator,
            output: None,
            loaded_file: None,
            on_screen: None,
        }
    }

    /// Load a lyric file into the navigator.
    pub fn load(&mut self, path: &Path) -> Result<()> {
        self.navigator.load_file(path)?;
        self.loaded_file = Some(path.to_path_buf());
        Ok(())
    }

    /// Replace the navigator lines directly (edited song, pasted text).
    pub fn load_lines(&mut self, lines: Vec<String>, source: Option<PathBuf>) {
        self.navigator.set_lines(lines);
        self.loaded_file = source;
    }

    /// File the lines came from.
    pub fn loaded_file(&self) -> Option<&Path> {
        self.loaded_file.as_deref()
    }

    /// Choose the output file.
    pub fn set_output(&mut self, path: impl Into<PathBuf>) {
        let target = OutputTarget::new(path);
        tracing::info!("Output file set to {}", target.path().display());
        self.output = Some(target);
    }

    /// Current output file.
    pub fn output_path(&self) -> Option<&Path> {
        self.output.as_ref().map(OutputTarget::path)
    }

    /// Text last written to the output file.
    pub fn on_screen(&self) -> Option<&str> {
        self.on_screen.as_deref()
    }

    fn target(&self) -> Result<&OutputTarget> {
        self.output.as_ref().ok_or(Error::NoOutput)
    }

    /// Write the selected line and advance to the next displayable one.
    ///
    /// Returns `Ok(None)` when nothing is selected. The cursor only moves
    /// once the write succeeded.
    pub fn show_selected(&mut self) -> Result<Option<String>> {
        let target = self.target()?;
        let Some(line) = self.navigator.current_line() else {
            return Ok(None);
        };
        target.write_line(line)?;

        let shown = self.navigator.take_and_advance();
        self.on_screen.clone_from(&shown);
        Ok(shown)
    }

    /// Write arbitrary text without touching the cursor.
    pub fn show_text(&mut self, text: &str) -> Result<()> {
        self.target()?.write_line(text)?;
        self.on_screen = Some(text.to_string());
        Ok(())
    }

    /// Blank the output.
    pub fn clear(&mut self) -> Result<()> {
        self.target()?.clear()?;
        self.on_screen = None;
        Ok(())
    }
}
