//! Input handling abstractions.
//!
//! Single-line text entry shared by the file prompts, the "show text" prompt
//! and the `:` command bar. Handlers are testable without a terminal.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Result of processing an input event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputResult {
    /// The input was consumed and handled.
    Consumed,
    /// The input was ignored (not applicable to this handler).
    Ignored,
    /// Entry finished with this text.
    Submit(String),
    /// Entry was abandoned.
    Cancel,
}

/// What a prompt's submitted text is used for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    /// Path of a lyric file to load.
    LoadFile,
    /// Path of the output file.
    SetOutput,
    /// Free text to display.
    ShowText,
    /// Path to save the edited song to.
    SaveSong,
}

impl PromptKind {
    /// Title shown on the prompt box.
    pub const fn title(self) -> &'static str {
        match self {
            Self::LoadFile => "Load File",
            Self::SetOutput => "Set Output File",
            Self::ShowText => "Enter text to display",
            Self::SaveSong => "Save Song As",
        }
    }
}

/// Editable single line of text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineInput {
    buffer: String,
}

impl LineInput {
    /// Start with `initial` already typed.
    pub fn with_text(initial: impl Into<String>) -> Self {
        Self { buffer: initial.into() }
    }

    /// Current contents.
    pub fn text(&self) -> &str {
        &self.buffer
    }

    /// Append pasted text. Line breaks become spaces so a paste can never
    /// submit the line.
    pub fn insert_str(&mut self, text: &str) {
        let flat = text.lines().collect::<Vec<_>>().join(" ");
        self.buffer.push_str(&flat);
    }

    /// Handle a key event.
    pub fn handle(&mut self, key: KeyEvent) -> InputResult {
        match key.code {
            KeyCode::Esc => InputResult::Cancel,
            KeyCode::Enter => InputResult::Submit(std::mem::take(&mut self.buffer)),
            KeyCode::Backspace => {
                self.buffer.pop();
                InputResult::Consumed
            }
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.buffer.clear();
                InputResult::Consumed
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.buffer.push(c);
                InputResult::Consumed
            }
            _ => InputResult::Ignored,
        }
    }
}

/// A modal prompt waiting for a line of text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    /// What the answer is for.
    pub kind: PromptKind,
    /// The text typed so far.
    pub input: LineInput,
}

impl Prompt {
    /// Open a prompt with optional prefilled text.
    pub fn new(kind: PromptKind, initial: impl Into<String>) -> Self {
        Self { kind, input: LineInput::with_text(initial) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::empty())
    }

    #[test]
    fn test_typing_and_submit() {
        let mut input = LineInput::default();
        for c in "grace.tx".chars() {
            assert_eq!(input.handle(make_key(KeyCode::Char(c))), InputResult::Consumed);
        }
        input.handle(make_key(KeyCode::Char('t')));
        input.handle(make_key(KeyCode::Char('t')));
        input.handle(make_key(KeyCode::Backspace));

        assert_eq!(input.text(), "grace.txt");
        assert_eq!(
            input.handle(make_key(KeyCode::Enter)),
            InputResult::Submit("grace.txt".to_string())
        );
        assert_eq!(input.text(), "");
    }

    #[test]
    fn test_escape_cancels() {
        let mut input = LineInput::with_text("/tmp");
        assert_eq!(input.handle(make_key(KeyCode::Esc)), InputResult::Cancel);
    }

    #[test]
    fn test_ctrl_u_clears_line() {
        let mut input = LineInput::with_text("/home/op/lyrics/");
        let result = input.handle(KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL));
        assert_eq!(result, InputResult::Consumed);
        assert_eq!(input.text(), "");
    }

    #[test]
    fn test_pasted_lines_are_joined() {
        let mut input = LineInput::with_text("~/");
        input.insert_str("Welcome\r\nquiet please\n");
        assert_eq!(input.text(), "~/Welcome quiet please");
    }

    #[test]
    fn test_function_keys_ignored() {
        let mut input = LineInput::default();
        assert_eq!(input.handle(make_key(KeyCode::F(5))), InputResult::Ignored);
    }
}
