//! Operator console state and key dispatch.

use std::path::{Path, PathBuf};

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::widgets::ListState;

use crate::config::Config;
use crate::error::Result;
use crate::input::{InputResult, LineInput, Prompt, PromptKind};
use crate::navigator::LineNavigator;
use crate::services::display::DisplayService;
use crate::services::editor::{EditorAction, SongEditor};
use crate::settings::Settings;
use crate::song::Song;

/// Top-level screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    /// Loaded lines and the show/advance controls.
    Lyrics,
    /// Structured song editing.
    SongEditor,
}

/// Whole application state.
pub struct App {
    /// Current screen.
    pub mode: AppMode,
    /// Lines, cursor and output file.
    pub display: DisplayService,
    /// Scroll state of the lyric list; selection mirrors the navigator.
    pub list_state: ListState,
    /// Song editor state.
    pub editor: SongEditor,
    /// Open modal prompt, if any.
    pub prompt: Option<Prompt>,
    /// `:` command entry, when active.
    pub command: Option<LineInput>,
    /// Remembered directory and output file.
    pub settings: Settings,
    /// Environment configuration.
    pub config: Config,
    /// Blocking error modal text.
    pub error_message: Option<String>,
    /// Blocking info modal text.
    pub status_message: Option<String>,
    /// Help modal visible.
    pub show_help: bool,
    should_quit: bool,
}

impl App {
    /// Build the app, restoring settings from disk when a settings path is configured.
    pub fn new(config: Config) -> Self {
        let settings = config
            .settings_path
            .as_deref()
            .map(Settings::load)
            .unwrap_or_default();

        let mut display = DisplayService::new(LineNavigator::new(config.comment_prefix.clone()));
        if let Some(output) = config.output_file.clone().or_else(|| settings.output_file.clone()) {
            display.set_output(output);
        }

        Self {
            mode: AppMode::Lyrics,
            display,
            list_state: ListState::default(),
            editor: SongEditor::default(),
            prompt: None,
            command: None,
            settings,
            config,
            error_message: None,
            status_message: None,
            show_help: false,
            should_quit: false,
        }
    }

    /// Whether the main loop should stop.
    pub const fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Ask the main loop to stop.
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    fn persist_settings(&self) {
        let Some(path) = &self.config.settings_path else {
            return;
        };
        if let Err(e) = self.settings.save(path) {
            tracing::warn!("Failed to save settings: {e}");
        }
    }

    fn report(&mut self, result: Result<()>) {
        if let Err(e) = result {
            tracing::error!("{e}");
            self.error_message = Some(e.to_string());
        }
    }

    /// Route a key press to the active modal, prompt or screen.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if self.show_help {
            if matches!(key.code, KeyCode::Esc | KeyCode::F(1) | KeyCode::Char('?')) {
                self.show_help = false;
            }
            return;
        }

        // Error and status modals block input until dismissed
        if self.error_message.is_some() || self.status_message.is_some() {
            if matches!(key.code, KeyCode::Esc | KeyCode::Enter) {
                self.error_message = None;
                self.status_message = None;
            }
            return;
        }

        if self.prompt.is_some() {
            self.handle_prompt_input(key);
            return;
        }

        if self.command.is_some() {
            self.handle_command_input(key);
            return;
        }

        if key.code == KeyCode::F(1) || (key.code == KeyCode::Char('?') && self.mode == AppMode::Lyrics) {
            self.show_help = true;
            return;
        }

        if key.code == KeyCode::Char(':') && !self.editor_is_typing() {
            self.command = Some(LineInput::default());
            return;
        }

        match self.mode {
            AppMode::Lyrics => self.handle_lyrics_input(key),
            AppMode::SongEditor => self.handle_editor_input(key),
        }
    }

    /// Insert bracketed-paste text into whichever field has focus.
    ///
    /// Pasted text never becomes key presses, so a line break cannot submit a
    /// prompt or reach the Lyrics keys. With no text field focused the paste
    /// is dropped.
    pub fn handle_paste(&mut self, text: &str) {
        if self.show_help || self.error_message.is_some() || self.status_message.is_some() {
            return;
        }
        if let Some(prompt) = self.prompt.as_mut() {
            prompt.input.insert_str(text);
        } else if let Some(command) = self.command.as_mut() {
            command.insert_str(text);
        } else if self.mode == AppMode::SongEditor {
            self.editor.paste(text);
        }
    }

    /// In the editor, `:` is literal text unless the part list has focus.
    fn editor_is_typing(&self) -> bool {
        use crate::services::editor::EditorFocus;
        self.mode == AppMode::SongEditor && self.editor.focus != EditorFocus::Parts
    }

    fn handle_lyrics_input(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.quit(),
            KeyCode::Up | KeyCode::Char('k') => self.display.navigator.select_previous(),
            KeyCode::Down | KeyCode::Char('j') => self.display.navigator.select_next(),
            KeyCode::Home | KeyCode::Char('g') => {
                self.display.navigator.select(0);
            }
            KeyCode::Enter | KeyCode::Char(' ') => self.show_selected(),
            KeyCode::Char('c') => {
                let result = self.display.clear();
                self.report(result);
            }
            KeyCode::Char('t') => self.open_prompt(PromptKind::ShowText),
            KeyCode::Char('o') => self.open_prompt(PromptKind::LoadFile),
            KeyCode::Char('w') => self.open_prompt(PromptKind::SetOutput),
            KeyCode::Char('e') => self.open_song_editor(),
            KeyCode::Char('n') => self.new_song(),
            _ => {}
        }
    }

    fn handle_editor_input(&mut self, key: KeyEvent) {
        match self.editor.handle_key(key) {
            EditorAction::Exit => self.close_song_editor(),
            EditorAction::Save => self.save_song(),
            EditorAction::Rejected(message) => {
                tracing::warn!("{message}");
                self.error_message = Some(message);
            }
            EditorAction::Modified | EditorAction::NoChange | EditorAction::Unhandled => {}
        }
    }

    fn show_selected(&mut self) {
        let result = self.display.show_selected().map(|_| ());
        self.report(result);
    }

    fn open_prompt(&mut self, kind: PromptKind) {
        let initial = match kind {
            PromptKind::LoadFile => self
                .settings
                .directory
                .as_ref()
                .map(|d| format!("{}/", d.display()))
                .unwrap_or_default(),
            PromptKind::SetOutput => self
                .display
                .output_path()
                .map(|p| p.display().to_string())
                .unwrap_or_default(),
            PromptKind::SaveSong => self
                .editor
                .path
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_default(),
            PromptKind::ShowText => String::new(),
        };
        self.prompt = Some(Prompt::new(kind, initial));
    }

    fn handle_prompt_input(&mut self, key: KeyEvent) {
        let Some(prompt) = self.prompt.as_mut() else {
            return;
        };
        match prompt.input.handle(key) {
            InputResult::Submit(text) => {
                let kind = prompt.kind;
                self.prompt = None;
                self.submit_prompt(kind, &text);
            }
            InputResult::Cancel => self.prompt = None,
            InputResult::Consumed | InputResult::Ignored => {}
        }
    }

    fn submit_prompt(&mut self, kind: PromptKind, text: &str) {
        // An empty path answer is treated as a cancel
        if kind != PromptKind::ShowText && text.trim().is_empty() {
            return;
        }
        let path = self.settings.resolve(text);
        let result = match kind {
            PromptKind::LoadFile => self.load_file(&path),
            PromptKind::SetOutput => {
                self.set_output(&path);
                Ok(())
            }
            PromptKind::ShowText => self.display.show_text(text),
            PromptKind::SaveSong => self.save_song_to(&path),
        };
        self.report(result);
    }

    /// Load a lyric file and remember its directory.
    pub fn load_file(&mut self, path: &Path) -> Result<()> {
        self.display.load(path)?;
        self.settings.remember_directory(path);
        self.persist_settings();
        Ok(())
    }

    /// Set the output file and remember it.
    pub fn set_output(&mut self, path: &Path) {
        self.display.set_output(path);
        self.settings.remember_directory(path);
        self.settings.output_file = Some(path.to_path_buf());
        self.persist_settings();
    }

    fn open_song_editor(&mut self) {
        // Go back to the held song if it has unsaved edits or is what's loaded
        let held_path = self.editor.path.as_deref();
        let holds_loaded = held_path.is_some() && held_path == self.display.loaded_file();
        if self.editor.dirty || holds_loaded {
            self.mode = AppMode::SongEditor;
            return;
        }

        let json_path = self
            .display
            .loaded_file()
            .filter(|p| p.extension().is_some_and(|e| e.eq_ignore_ascii_case("json")))
            .map(Path::to_path_buf);

        match json_path {
            Some(path) => match Song::load(&path) {
                Ok(song) => {
                    self.editor = SongEditor::open(song, Some(path));
                    self.mode = AppMode::SongEditor;
                }
                Err(e) => self.report(Err(e)),
            },
            None => self.new_song(),
        }
    }

    fn new_song(&mut self) {
        self.editor = SongEditor::default();
        self.mode = AppMode::SongEditor;
    }

    fn close_song_editor(&mut self) {
        self.mode = AppMode::Lyrics;
        if self.editor.song.lyrics.is_empty() {
            return;
        }
        let lines = self.editor.song.to_lines(self.display.navigator.comment_prefix());
        self.display.load_lines(lines, self.editor.path.clone());
        if self.editor.dirty {
            let message = "Song has unsaved changes. Press 'e' to keep editing, Ctrl+S there to save";
            self.status_message = Some(message.to_string());
        }
    }

    fn save_song(&mut self) {
        match self.editor.path.clone() {
            Some(path) => {
                let result = self.save_song_to(&path);
                self.report(result);
            }
            None => self.open_prompt(PromptKind::SaveSong),
        }
    }

    fn save_song_to(&mut self, path: &Path) -> Result<()> {
        self.editor.song.save(path)?;
        self.editor.path = Some(path.to_path_buf());
        self.editor.dirty = false;
        self.settings.remember_directory(path);
        self.persist_settings();
        Ok(())
    }

    fn handle_command_input(&mut self, key: KeyEvent) {
        let Some(command) = self.command.as_mut() else {
            return;
        };
        match command.handle(key) {
            InputResult::Submit(text) => {
                self.command = None;
                let result = self.execute_command(&text);
                self.report(result);
            }
            InputResult::Cancel => self.command = None,
            InputResult::Consumed | InputResult::Ignored => {}
        }
    }

    /// Run a `:` command line.
    pub fn execute_command(&mut self, line: &str) -> Result<()> {
        let line = line.trim();
        let (name, arg) = line
            .split_once(char::is_whitespace)
            .map_or((line, ""), |(n, a)| (n, a.trim()));

        tracing::debug!("Command {name:?} arg {arg:?}");

        match name {
            "" => Ok(()),
            "q" | "quit" => {
                self.quit();
                Ok(())
            }
            "load" | "open" => {
                let path = self.settings.resolve(require_arg(name, arg)?);
                self.load_file(&path)
            }
            "output" | "out" => {
                let path = self.settings.resolve(require_arg(name, arg)?);
                self.set_output(&path);
                Ok(())
            }
            "text" => self.display.show_text(arg),
            "clear" => self.display.clear(),
            "edit" => {
                self.open_song_editor();
                Ok(())
            }
            "new" => {
                self.new_song();
                Ok(())
            }
            "part" if self.mode == AppMode::SongEditor => self.editor.add_part(require_arg(name, arg)?),
            "save" | "w" if self.mode == AppMode::SongEditor => {
                if arg.is_empty() {
                    self.save_song();
                    Ok(())
                } else {
                    let path = self.settings.resolve(arg);
                    self.save_song_to(&path)
                }
            }
            other => Err(format!("Unknown command: {other}").into()),
        }
    }

    /// Sync the list widget selection with the navigator before drawing.
    pub fn sync_list_state(&mut self) {
        self.list_state.select(self.display.navigator.current());
    }

    /// Path the song editor will save to.
    pub fn song_path(&self) -> Option<&PathBuf> {
        self.editor.path.as_ref()
    }
}

fn require_arg<'a>(command: &str, arg: &'a str) -> Result<&'a str> {
    if arg.is_empty() {
        Err(format!(":{command} needs an argument").into())
    } else {
        Ok(arg)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;
    use crossterm::event::KeyModifiers;

    fn test_app() -> App {
        App::new(Config {
            settings_path: None,
            ..Config::default()
        })
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::empty())
    }

    fn type_str(app: &mut App, s: &str) {
        for c in s.chars() {
            app.handle_key(key(KeyCode::Char(c)));
        }
    }

    #[test]
    fn test_show_without_output_reports_error() {
        let mut app = test_app();
        app.display.navigator.set_text("line");
        app.handle_key(key(KeyCode::Enter));
        assert!(app.error_message.is_some());

        // Modal swallows keys until dismissed
        app.handle_key(key(KeyCode::Char('q')));
        assert!(!app.should_quit());
        app.handle_key(key(KeyCode::Esc));
        assert!(app.error_message.is_none());
    }

    #[test]
    fn test_enter_shows_and_advances() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = test_app();
        app.set_output(&dir.path().join("out.txt"));
        app.display.navigator.set_text("one\n-cue\ntwo");

        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.display.on_screen(), Some("one"));
        assert_eq!(app.display.navigator.current(), Some(2));

        app.sync_list_state();
        assert_eq!(app.list_state.selected(), Some(2));
    }

    #[test]
    fn test_show_text_prompt() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = test_app();
        app.set_output(&dir.path().join("out.txt"));

        app.handle_key(key(KeyCode::Char('t')));
        assert!(app.prompt.is_some());
        type_str(&mut app, "Welcome all");
        app.handle_key(key(KeyCode::Enter));

        assert!(app.prompt.is_none());
        assert_eq!(std::fs::read_to_string(dir.path().join("out.txt")).unwrap(), "Welcome all");
    }

    #[test]
    fn test_commands() {
        let dir = tempfile::tempdir().unwrap();
        let lyrics = dir.path().join("song.txt");
        std::fs::write(&lyrics, "a\nb\n").unwrap();

        let mut app = test_app();
        app.execute_command(&format!("load {}", lyrics.display())).unwrap();
        assert_eq!(app.display.navigator.len(), 3);
        assert_eq!(app.settings.directory.as_deref(), Some(dir.path()));

        // Relative paths resolve against the remembered directory
        app.execute_command("output out.txt").unwrap();
        assert_eq!(app.display.output_path(), Some(dir.path().join("out.txt").as_path()));

        app.execute_command("text hello there").unwrap();
        assert_eq!(app.display.on_screen(), Some("hello there"));

        assert!(app.execute_command("load").is_err());
        assert!(app.execute_command("bogus").is_err());

        app.execute_command("q").unwrap();
        assert!(app.should_quit());
    }

    #[test]
    fn test_editor_round_trip_into_navigator() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = test_app();

        app.handle_key(key(KeyCode::Char('n')));
        assert_eq!(app.mode, AppMode::SongEditor);

        app.editor.add_part("V1").unwrap();
        type_str(&mut app, "Holy holy");

        let path = dir.path().join("holy.json");
        app.execute_command(&format!("save {}", path.display())).unwrap();
        assert!(!app.editor.dirty);

        app.handle_key(key(KeyCode::Esc));
        assert_eq!(app.mode, AppMode::Lyrics);
        assert_eq!(app.display.navigator.lines(), &["-V1", "Holy holy", ""]);
        assert_eq!(app.display.loaded_file(), Some(path.as_path()));

        // Reopening edits the saved file
        app.handle_key(key(KeyCode::Char('e')));
        assert_eq!(app.song_path(), Some(&path));
        assert_eq!(app.editor.song.part("V1"), Some("Holy holy"));
    }

    #[test]
    fn test_colon_is_text_while_typing_in_editor() {
        let mut app = test_app();
        app.handle_key(key(KeyCode::Char('n')));
        app.handle_key(key(KeyCode::Tab));
        type_str(&mut app, "Psalm 23:1");
        assert!(app.command.is_none());
        assert_eq!(app.editor.song.title, "Psalm 23:1");
    }

    #[test]
    fn test_multiline_paste_stays_in_prompt() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = test_app();
        app.set_output(&dir.path().join("out.txt"));
        app.display.navigator.set_text("one\ntwo");

        app.handle_key(key(KeyCode::Char('t')));
        app.handle_paste("Welcome\nquiet please");

        assert!(!app.should_quit());
        assert_eq!(app.display.on_screen(), None);
        let prompt = app.prompt.as_ref().unwrap();
        assert_eq!(prompt.input.text(), "Welcome quiet please");

        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.display.on_screen(), Some("Welcome quiet please"));
        assert_eq!(app.display.navigator.current(), Some(0));
    }

    #[test]
    fn test_paste_without_text_field_is_dropped() {
        let mut app = test_app();
        app.display.navigator.set_text("one\ntwo");
        app.handle_paste("jq");
        assert!(!app.should_quit());
        assert_eq!(app.display.navigator.current(), Some(0));
    }

    #[test]
    fn test_reopen_editor_keeps_unsaved_song() {
        let mut app = test_app();
        app.handle_key(key(KeyCode::Char('n')));
        app.editor.add_part("V1").unwrap();
        type_str(&mut app, "Holy holy");

        app.handle_key(key(KeyCode::Esc));
        assert!(app.status_message.is_some());
        app.handle_key(key(KeyCode::Esc));

        app.handle_key(key(KeyCode::Char('e')));
        assert_eq!(app.mode, AppMode::SongEditor);
        assert_eq!(app.editor.song.part("V1"), Some("Holy holy"));
        assert!(app.editor.dirty);
    }

    #[test]
    fn test_ctrl_s_without_path_prompts_then_saves() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("grace.json");
        let mut app = test_app();
        app.handle_key(key(KeyCode::Char('n')));
        app.editor.add_part("V1").unwrap();
        type_str(&mut app, "Amazing grace");

        app.handle_key(KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL));
        assert_eq!(app.prompt.as_ref().map(|p| p.kind), Some(PromptKind::SaveSong));

        type_str(&mut app, &path.display().to_string());
        app.handle_key(key(KeyCode::Enter));

        assert!(app.prompt.is_none());
        assert!(app.error_message.is_none());
        assert_eq!(app.song_path(), Some(&path));
        assert!(!app.editor.dirty);
        assert_eq!(Song::load(&path).unwrap().part("V1"), Some("Amazing grace"));
    }

    #[test]
    fn test_part_command_only_from_part_list() {
        let mut app = test_app();
        assert!(app.execute_command("part Tag").is_err());

        app.handle_key(key(KeyCode::Char('n')));
        // Number field has focus, so ':' is not a command
        app.handle_key(key(KeyCode::Char(':')));
        assert!(app.command.is_none());

        app.handle_key(key(KeyCode::BackTab));
        app.handle_key(key(KeyCode::BackTab));
        assert_eq!(app.editor.focus, crate::services::editor::EditorFocus::Parts);
        app.handle_key(key(KeyCode::Char(':')));
        assert!(app.command.is_some());
        type_str(&mut app, "part Tag");
        app.handle_key(key(KeyCode::Enter));

        assert!(app.error_message.is_none());
        assert_eq!(app.editor.song.part_names(), vec!["Tag"]);
        assert_eq!(app.editor.selected_part_name(), Some("Tag"));
    }

    #[test]
    fn test_escape_from_empty_song_keeps_lines() {
        let mut app = test_app();
        app.display.navigator.set_text("one\ntwo");
        app.handle_key(key(KeyCode::Down));

        app.handle_key(key(KeyCode::Char('n')));
        app.handle_key(key(KeyCode::Esc));

        assert_eq!(app.mode, AppMode::Lyrics);
        assert!(app.status_message.is_none());
        assert_eq!(app.display.navigator.lines(), &["one", "two"]);
        assert_eq!(app.display.navigator.current(), Some(1));
    }

    #[test]
    fn test_delete_key_removes_selected_part() {
        let mut app = test_app();
        app.handle_key(key(KeyCode::Char('n')));
        app.editor.add_part("V1").unwrap();
        app.editor.add_part("C").unwrap();
        app.handle_key(key(KeyCode::BackTab));

        app.handle_key(key(KeyCode::Delete));
        assert_eq!(app.editor.song.part_names(), vec!["V1"]);
        assert_eq!(app.editor.selected_part_name(), Some("V1"));
        assert!(app.editor.dirty);
    }

    #[test]
    fn test_plus_with_all_common_parts_reports_error() {
        let mut app = test_app();
        app.handle_key(key(KeyCode::Char('n')));
        for _ in crate::constants::song::COMMON_PARTS {
            app.editor.add_next_common_part().unwrap();
        }
        app.handle_key(key(KeyCode::BackTab));

        app.handle_key(key(KeyCode::Char('+')));
        assert!(app.error_message.as_deref().unwrap().contains(":part"));
        assert_eq!(app.editor.song.lyrics.len(), 8);

        app.handle_key(key(KeyCode::Esc));
        assert!(app.error_message.is_none());
        assert_eq!(app.mode, AppMode::SongEditor);
    }
}
