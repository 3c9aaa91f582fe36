use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, Paragraph, Wrap},
    Frame,
};

use crate::app::App;
use crate::ui::create_titled_block;

/// Draw the loaded lines above the output panel.
pub fn draw_lyrics(f: &mut Frame, app: &mut App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(6)])
        .split(area);

    app.sync_list_state();

    let navigator = &app.display.navigator;
    let selection_bg = Color::Rgb(80, 80, 120);

    let items: Vec<ListItem> = navigator
        .lines()
        .iter()
        .map(|line| {
            let style = if line.is_empty() {
                Style::default()
            } else if navigator.is_displayable(line) {
                Style::default().fg(Color::White)
            } else {
                // Cue lines are skipped on advance
                Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC)
            };
            ListItem::new(Line::from(Span::styled(line.as_str(), style)))
        })
        .collect();

    let title = app.display.loaded_file().map_or_else(
        || "Lyric Content".to_string(),
        |p| format!("Lyric Content - {}", p.display()),
    );

    let list = List::new(items)
        .block(create_titled_block(&title, true))
        .highlight_style(
            Style::default()
                .bg(selection_bg)
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");
    f.render_stateful_widget(list, chunks[0], &mut app.list_state);

    // --- Bottom pane: output file and what is on screen ---
    let output = app.display.output_path().map_or_else(
        || Span::styled("[empty]", Style::default().fg(Color::DarkGray)),
        |p| Span::styled(p.display().to_string(), Style::default().fg(Color::Cyan)),
    );
    let on_screen = app.display.on_screen().map_or_else(
        || Span::styled("(blank)", Style::default().fg(Color::DarkGray)),
        |t| Span::styled(t.to_string(), Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
    );

    let info = vec![
        Line::from(vec![Span::raw("Output file: "), output]),
        Line::from(vec![Span::raw("On screen:   "), on_screen]),
        Line::from(Span::styled(
            format!("{} lines", navigator.len()),
            Style::default().fg(Color::Gray),
        )),
    ];

    let panel = Paragraph::new(info)
        .block(create_titled_block("Output", false))
        .wrap(Wrap { trim: true });
    f.render_widget(panel, chunks[1]);
}
