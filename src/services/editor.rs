//! Song editor state and key handling.
//!
//! Edits apply straight to the held [`Song`]; the app decides when to save.

use std::path::PathBuf;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::constants::song::{COMMON_PARTS, MAX_NUMBER};
use crate::error::{Error, Result};
use crate::song::Song;

/// Result of an editor action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorAction {
    /// The action was handled and state was modified.
    Modified,
    /// The action was handled but no state changed.
    NoChange,
    /// The operator asked to save.
    Save,
    /// The action requires exiting editor mode.
    Exit,
    /// The action was refused; the message explains why.
    Rejected(String),
    /// The action was not handled by the editor.
    Unhandled,
}

/// Which editor field receives typed keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditorFocus {
    /// Song number.
    #[default]
    Number,
    /// Song title.
    Title,
    /// Song author.
    Author,
    /// Part list.
    Parts,
    /// Lyric text of the selected part.
    Text,
}

impl EditorFocus {
    /// Next field in tab order.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Number => Self::Title,
            Self::Title => Self::Author,
            Self::Author => Self::Parts,
            Self::Parts => Self::Text,
            Self::Text => Self::Number,
        }
    }

    /// Previous field in tab order.
    #[must_use]
    pub const fn previous(self) -> Self {
        match self {
            Self::Number => Self::Text,
            Self::Title => Self::Number,
            Self::Author => Self::Title,
            Self::Parts => Self::Author,
            Self::Text => Self::Parts,
        }
    }
}

/// A song being edited.
#[derive(Debug, Clone, Default)]
pub struct SongEditor {
    /// The song under edit.
    pub song: Song,
    /// Where the song was loaded from or last saved to.
    pub path: Option<PathBuf>,
    /// Focused field.
    pub focus: EditorFocus,
    /// Index into the sorted part names.
    pub selected_part: Option<usize>,
    /// Unsaved changes exist.
    pub dirty: bool,
}

impl SongEditor {
    /// Edit an existing song.
    pub fn open(song: Song, path: Option<PathBuf>) -> Self {
        let selected_part = (!song.lyrics.is_empty()).then_some(0);
        Self {
            song,
            path,
            focus: EditorFocus::Number,
            selected_part,
            dirty: false,
        }
    }

    /// Name of the selected part.
    pub fn selected_part_name(&self) -> Option<&str> {
        self.selected_part
            .and_then(|i| self.song.lyrics.keys().nth(i))
            .map(String::as_str)
    }

    /// Add a part and select it. An existing part with that name is just selected.
    pub fn add_part(&mut self, name: &str) -> Result<()> {
        let name = name.trim();
        if self.song.part(name).is_none() {
            self.song.set_part(name, String::new())?;
            self.dirty = true;
        }
        self.selected_part = self.song.lyrics.keys().position(|k| k == name);
        self.focus = EditorFocus::Text;
        Ok(())
    }

    /// Add the first common part name not yet used.
    pub fn add_next_common_part(&mut self) -> Result<()> {
        let name = COMMON_PARTS
            .iter()
            .find(|name| self.song.part(name).is_none())
            .ok_or_else(|| Error::song("all common parts exist; use :part <name>"))?;
        self.add_part(name)
    }

    /// Remove the selected part.
    pub fn remove_selected_part(&mut self) -> bool {
        let Some(name) = self.selected_part_name().map(String::from) else {
            return false;
        };
        self.song.remove_part(&name);
        self.dirty = true;

        let count = self.song.lyrics.len();
        self.selected_part = match self.selected_part {
            _ if count == 0 => None,
            Some(i) => Some(i.min(count - 1)),
            None => None,
        };
        true
    }

    fn edit_selected_text(&mut self, f: impl FnOnce(&mut String)) -> bool {
        let Some(name) = self.selected_part_name().map(String::from) else {
            return false;
        };
        if let Some(text) = self.song.lyrics.get_mut(&name) {
            f(text);
            self.dirty = true;
            return true;
        }
        false
    }

    fn push_number_digit(&mut self, digit: u32) -> bool {
        let candidate = self.song.number.saturating_mul(10).saturating_add(digit);
        if candidate > MAX_NUMBER {
            return false;
        }
        self.song.number = candidate;
        self.dirty = true;
        true
    }

    /// Insert pasted text into the focused field.
    ///
    /// Only the part text keeps line breaks. Title and author take the first
    /// line, the number takes digits while they fit.
    pub fn paste(&mut self, text: &str) -> EditorAction {
        let first_line = text.lines().next().unwrap_or_default();
        let modified = match self.focus {
            EditorFocus::Number => first_line
                .chars()
                .filter_map(|c| c.to_digit(10))
                .fold(false, |changed, d| self.push_number_digit(d) || changed),
            EditorFocus::Title if !first_line.is_empty() => {
                self.song.title.push_str(first_line);
                self.dirty = true;
                true
            }
            EditorFocus::Author if !first_line.is_empty() => {
                self.song.author.push_str(first_line);
                self.dirty = true;
                true
            }
            EditorFocus::Text => {
                let text = text.replace("\r\n", "\n").replace('\r', "\n");
                self.edit_selected_text(|t| t.push_str(&text))
            }
            EditorFocus::Title | EditorFocus::Author | EditorFocus::Parts => false,
        };

        if modified {
            EditorAction::Modified
        } else {
            EditorAction::NoChange
        }
    }

    /// Handle a key event.
    pub fn handle_key(&mut self, key: KeyEvent) -> EditorAction {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        match key.code {
            KeyCode::Esc => return EditorAction::Exit,
            KeyCode::Char('s') if ctrl => return EditorAction::Save,
            KeyCode::Tab => {
                self.focus = self.focus.next();
                return EditorAction::NoChange;
            }
            KeyCode::BackTab => {
                self.focus = self.focus.previous();
                return EditorAction::NoChange;
            }
            _ => {}
        }
        if ctrl {
            return EditorAction::Unhandled;
        }

        let modified = match (self.focus, key.code) {
            (EditorFocus::Number, KeyCode::Char(c)) => match c.to_digit(10) {
                Some(d) => self.push_number_digit(d),
                None => return EditorAction::Unhandled,
            },
            (EditorFocus::Number, KeyCode::Backspace) => {
                self.song.number /= 10;
                self.dirty = true;
                true
            }
            (EditorFocus::Title, KeyCode::Char(c)) => {
                self.song.title.push(c);
                self.dirty = true;
                true
            }
            (EditorFocus::Title, KeyCode::Backspace) => {
                self.dirty = true;
                self.song.title.pop().is_some()
            }
            (EditorFocus::Author, KeyCode::Char(c)) => {
                self.song.author.push(c);
                self.dirty = true;
                true
            }
            (EditorFocus::Author, KeyCode::Backspace) => {
                self.dirty = true;
                self.song.author.pop().is_some()
            }
            (EditorFocus::Parts, KeyCode::Up | KeyCode::Char('k')) => {
                self.selected_part = self.selected_part.map(|i| i.saturating_sub(1));
                false
            }
            (EditorFocus::Parts, KeyCode::Down | KeyCode::Char('j')) => {
                let last = self.song.lyrics.len().saturating_sub(1);
                self.selected_part = self.selected_part.map(|i| (i + 1).min(last));
                false
            }
            (EditorFocus::Parts, KeyCode::Enter) => {
                self.focus = EditorFocus::Text;
                false
            }
            (EditorFocus::Parts, KeyCode::Char('+')) => {
                return match self.add_next_common_part() {
                    Ok(()) => EditorAction::Modified,
                    Err(e) => EditorAction::Rejected(e.to_string()),
                };
            }
            (EditorFocus::Parts, KeyCode::Delete | KeyCode::Char('d')) => self.remove_selected_part(),
            (EditorFocus::Text, KeyCode::Char(c)) => self.edit_selected_text(|t| t.push(c)),
            (EditorFocus::Text, KeyCode::Enter) => self.edit_selected_text(|t| t.push('\n')),
            (EditorFocus::Text, KeyCode::Backspace) => self.edit_selected_text(|t| {
                t.pop();
            }),
            _ => return EditorAction::Unhandled,
        };

        if modified {
            EditorAction::Modified
        } else {
            EditorAction::NoChange
        }
    }
}
