use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use crate::app::App;
use crate::constants::ui::EDITOR_SIDE_PERCENT;
use crate::services::editor::EditorFocus;
use crate::ui::create_titled_block;

/// Draw song properties and the part list beside the part text.
pub fn draw_song_editor(f: &mut Frame, app: &App, area: Rect) {
    let editor = &app.editor;

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(EDITOR_SIDE_PERCENT),
            Constraint::Percentage(100 - EDITOR_SIDE_PERCENT),
        ])
        .split(area);

    let side = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Length(3), Constraint::Length(3), Constraint::Min(3)])
        .split(columns[0]);

    let number = if editor.song.number == 0 { String::new() } else { editor.song.number.to_string() };
    draw_field(f, side[0], "Number", &number, editor.focus == EditorFocus::Number);
    draw_field(f, side[1], "Title", &editor.song.title, editor.focus == EditorFocus::Title);
    draw_field(f, side[2], "Author", &editor.song.author, editor.focus == EditorFocus::Author);

    // --- Part list ---
    let parts: Vec<ListItem> = editor
        .song
        .part_names()
        .into_iter()
        .map(|name| ListItem::new(Line::from(Span::raw(name))))
        .collect();

    let parts_focused = editor.focus == EditorFocus::Parts;
    let mut state = ListState::default().with_selected(editor.selected_part);
    let list = List::new(parts)
        .block(create_titled_block("Parts", parts_focused))
        .highlight_style(
            Style::default()
                .bg(Color::Rgb(80, 80, 120))
                .fg(if parts_focused { Color::Yellow } else { Color::White })
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");
    f.render_stateful_widget(list, side[3], &mut state);

    // --- Part text ---
    let mut block_title = editor.selected_part_name().map_or_else(
        || "No part selected (+ to add)".to_string(),
        |name| format!("Part {name}"),
    );
    let text = editor
        .selected_part_name()
        .and_then(|name| editor.song.part(name))
        .unwrap_or_default();

    let mut lines: Vec<Line> = text.split('\n').map(|l| Line::from(l.to_string())).collect();
    if editor.focus == EditorFocus::Text {
        if let Some(last) = lines.last_mut() {
            last.spans.push(Span::styled("█", Style::default().fg(Color::Yellow)));
        }
    }

    if editor.dirty {
        block_title.push_str(" [modified]");
    }
    if let Some(path) = &editor.path {
        block_title.push_str(&format!(" - {}", path.display()));
    }

    let body = Paragraph::new(lines)
        .block(create_titled_block(&block_title, editor.focus == EditorFocus::Text))
        .wrap(Wrap { trim: false });
    f.render_widget(body, columns[1]);
}

fn draw_field(f: &mut Frame, area: Rect, label: &str, value: &str, focused: bool) {
    let mut spans = vec![Span::raw(format!(" {value}"))];
    if focused {
        spans.push(Span::styled("█", Style::default().fg(Color::Yellow)));
    }
    f.render_widget(
        Paragraph::new(Line::from(spans)).block(create_titled_block(label, focused)),
        area,
    );
}
