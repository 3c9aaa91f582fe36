//! User interface components.
//!
//! Provides TUI widgets and drawing functions for the application's
//! terminal-based user interface using ratatui.

mod lyric_list;
mod song_editor;

pub use lyric_list::draw_lyrics;
pub use song_editor::draw_song_editor;

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::app::{App, AppMode};
use crate::constants::ui::{HELP_WIDTH, PROMPT_WIDTH};
use crate::input::Prompt;

/// Render the full application UI to the terminal frame.
pub fn draw(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),
            Constraint::Length(3), // Command/status bar at bottom
        ])
        .split(f.size());

    match app.mode {
        AppMode::Lyrics => draw_lyrics(f, app, chunks[0]),
        AppMode::SongEditor => draw_song_editor(f, app, chunks[0]),
    }

    draw_command_bar(f, app, chunks[1]);

    if let Some(prompt) = &app.prompt {
        draw_prompt(f, prompt);
    }

    if let Some(status) = &app.status_message {
        draw_message(f, "Info", Color::Cyan, status);
        return;
    }
    if let Some(error) = &app.error_message {
        draw_message(f, "Error", Color::Red, error);
        return;
    }

    if app.show_help {
        draw_help_modal(f, app);
    }
}

#[allow(clippy::cast_possible_truncation)]
fn draw_command_bar(f: &mut Frame, app: &App, area: Rect) {
    let title = if app.command.is_some() { "Command" } else { "Commands/Status" };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .title(Span::styled(title, Style::default().fg(Color::Yellow)));

    f.render_widget(block, area);

    let inner_area = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1)])
        .margin(1) // Add a margin of 1 to account for the border
        .split(area)[0];

    if let Some(command) = &app.command {
        let text = Paragraph::new(format!(" :{}", command.text()))
            .style(Style::default().fg(Color::Yellow));
        f.render_widget(text, inner_area);
        f.set_cursor(inner_area.left() + command.text().chars().count() as u16 + 2, inner_area.top());
        return;
    }

    let hints: &[(&str, &str)] = match app.mode {
        AppMode::Lyrics => &[
            ("Enter", "Show"),
            ("c", "Clear"),
            ("t", "Text"),
            ("o", "Load"),
            ("w", "Output"),
            ("e", "Edit song"),
            ("?", "Help"),
        ],
        AppMode::SongEditor => &[
            ("ESC", "Back"),
            ("Tab", "Next field"),
            ("+", "Add part"),
            ("Ctrl+S", "Save"),
        ],
    };

    let status_bar = Paragraph::new(Line::from(create_help_text(hints)))
        .style(Style::default().fg(Color::Gray));

    f.render_widget(status_bar, inner_area);
}

/// Build styled help text spans from key-description pairs for the command bar.
pub fn create_help_text<'a>(commands: &[(&'a str, &'a str)]) -> Vec<Span<'a>> {
    let mut text = vec![Span::raw(" ")];

    for (i, (key, description)) in commands.iter().enumerate() {
        text.push(Span::styled(*key, Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)));
        text.push(Span::raw(format!(": {description}")));

        if i < commands.len() - 1 {
            text.push(Span::raw(" | "));
        }
    }

    text
}

/// Create a bordered block with a title, highlighted when focused.
pub fn create_titled_block(title: &str, is_focused: bool) -> Block<'_> {
    let (title_style, border_style) = if is_focused {
        (
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            Style::default().fg(Color::Yellow),
        )
    } else {
        (Style::default(), Style::default())
    };

    Block::default()
        .title(Span::styled(title, title_style))
        .borders(Borders::ALL)
        .border_style(border_style)
}

/// A rectangle of the given size centered in `outer`.
fn centered(outer: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(outer.width.saturating_sub(4));
    let height = height.min(outer.height.saturating_sub(2));
    Rect {
        x: outer.x + (outer.width.saturating_sub(width)) / 2,
        y: outer.y + (outer.height.saturating_sub(height)) / 2,
        width,
        height,
    }
}

#[allow(clippy::cast_possible_truncation)]
fn draw_prompt(f: &mut Frame, prompt: &Prompt) {
    let area = centered(f.size(), PROMPT_WIDTH, 5);

    let block = Block::default()
        .title(Span::styled(
            format!(" {} ", prompt.kind.title()),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .style(Style::default().bg(Color::Black));

    f.render_widget(Clear, area);
    f.render_widget(block, area);

    let inner = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1), Constraint::Min(0)])
        .margin(1)
        .split(area);

    // Keep the end of long paths visible
    let text = prompt.input.text();
    let visible = inner[0].width.saturating_sub(2) as usize;
    let skip = text.chars().count().saturating_sub(visible);
    let shown: String = text.chars().skip(skip).collect();

    f.render_widget(
        Paragraph::new(format!(" {shown}")).style(Style::default().fg(Color::White)),
        inner[0],
    );
    f.set_cursor(inner[0].left() + shown.chars().count() as u16 + 1, inner[0].top());

    f.render_widget(
        Paragraph::new("Enter to confirm, Esc to cancel")
            .style(Style::default().fg(Color::Gray))
            .alignment(Alignment::Center),
        inner[1],
    );
}

/// Width and height of a message box for `message` on `screen`.
fn message_box_size(message: &str, screen: Rect) -> (u16, u16) {
    use unicode_width::UnicodeWidthStr;

    // Box width: max 80% of screen, min 40
    let max_width = usize::from(screen.width) * 80 / 100;
    let width = message.width().saturating_add(6).min(max_width).max(40);
    let width = u16::try_from(width).unwrap_or(u16::MAX);

    let inner_width = usize::from(width.saturating_sub(4)).max(1);
    let msg_lines = message.width().div_ceil(inner_width);
    let height = u16::try_from(msg_lines).unwrap_or(u16::MAX).saturating_add(4);
    (width, height)
}

fn draw_message(f: &mut Frame, title: &str, color: Color, message: &str) {
    let size = f.size();
    let (width, height) = message_box_size(message, size);
    let area = centered(size, width, height);

    let block = Block::default()
        .title(Span::styled(title, Style::default().fg(color).add_modifier(Modifier::BOLD)))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color))
        .style(Style::default().bg(Color::Black));

    let text = Paragraph::new(message)
        .style(Style::default().fg(Color::White))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });

    f.render_widget(Clear, area);
    f.render_widget(block, area);

    let inner_area = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .margin(1)
        .split(area);

    f.render_widget(text, inner_area[0]);

    let hint = Paragraph::new("Press Esc to dismiss")
        .style(Style::default().fg(Color::Gray))
        .alignment(Alignment::Center);

    f.render_widget(hint, inner_area[1]);
}

// Draw the help modal with keybindings
fn draw_help_modal(f: &mut Frame, app: &App) {
    let area = centered(f.size(), HELP_WIDTH, 26);

    let block = Block::default()
        .title(Span::styled(" Help - Keybindings ", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .style(Style::default().bg(Color::Black));

    f.render_widget(Clear, area);
    f.render_widget(block, area);

    let inner_area = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1)])
        .margin(1)
        .split(area)[0];

    let help_text: Vec<Line> = build_help_content(app.mode)
        .iter()
        .map(|(key, desc, is_header)| {
            if *is_header {
                Line::from(Span::styled(*key, Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)))
            } else {
                Line::from(vec![
                    Span::styled(format!("{key:>14}"), Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
                    Span::raw("  "),
                    Span::styled(*desc, Style::default().fg(Color::White)),
                ])
            }
        })
        .collect();

    f.render_widget(Paragraph::new(help_text).wrap(Wrap { trim: true }), inner_area);
}

fn build_help_content(mode: AppMode) -> Vec<(&'static str, &'static str, bool)> {
    let mut lines = vec![
        ("── Global ──", "", true),
        ("F1 / ?", "Show this help", false),
        (":", "Enter command mode", false),
        (":q", "Quit", false),
        ("Esc", "Go back / dismiss modal", false),
        ("", "", false),
    ];

    match mode {
        AppMode::Lyrics => lines.extend([
            ("── Lyrics ──", "", true),
            ("↑/↓ or j/k", "Move selection", false),
            ("Enter/Space", "Show line, jump to next", false),
            ("c", "Clear output", false),
            ("t", "Show custom text", false),
            ("o / :load", "Load text or song file", false),
            ("w / :output", "Set output file", false),
            ("e / n", "Edit song / new song", false),
        ]),
        AppMode::SongEditor => lines.extend([
            ("── Song Editor ──", "", true),
            ("Tab/Shift+Tab", "Next / previous field", false),
            ("+", "Add V1..V6, C, B part", false),
            (":part NAME", "Add custom part", false),
            ("d / Delete", "Remove selected part", false),
            ("Ctrl+S", "Save song", false),
            (":save PATH", "Save song as", false),
        ]),
    }

    lines.push(("", "", false));
    lines.push(("Press Esc, F1 or ? to close", "", true));

    lines
}
