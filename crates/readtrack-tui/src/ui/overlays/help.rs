use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::app::App;

const SEARCH_KEYS: &[(&str, &str)] = &[
    ("/ i", "type a query, Enter to search"),
    ("s Enter", "save highlighted book"),
    ("c Esc", "clear search"),
    ("a", "add a custom book"),
];

const LIBRARY_KEYS: &[(&str, &str)] = &[
    ("1-5", "rate"),
    ("t Enter", "change status"),
    ("- +", "progress step (reading only)"),
    ("p", "set exact progress"),
    ("f", "cycle status filter"),
    ("o", "cycle sort order"),
    ("/", "filter by title or author"),
    ("d", "delete (asks first)"),
];

const GENERAL_KEYS: &[(&str, &str)] = &[
    ("Tab", "switch Search / Library"),
    ("j k g G", "move"),
    ("r", "reload library and stats"),
    ("q Ctrl-c", "quit"),
];

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let overlay_area = crate::ui::centered_rect(60, 70, area);
    frame.render_widget(Clear, overlay_area);

    let block = Block::default()
        .title(Span::styled(
            " HELP ",
            Style::default()
                .fg(app.theme.frost_ice())
                .add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.frost_blue()))
        .style(Style::default().bg(app.theme.bg()));

    let inner = block.inner(overlay_area);
    frame.render_widget(block, overlay_area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(5),
            Constraint::Length(1), // Footer
        ])
        .split(inner);

    let mut lines = Vec::new();
    for (heading, keys) in [
        ("SEARCH", SEARCH_KEYS),
        ("LIBRARY", LIBRARY_KEYS),
        ("GENERAL", GENERAL_KEYS),
    ] {
        lines.push(Line::from(Span::styled(
            heading,
            Style::default()
                .fg(app.theme.frost_ice())
                .add_modifier(Modifier::BOLD),
        )));
        for (key, desc) in keys {
            lines.push(Line::from(vec![
                Span::styled(format!("  {key:<10}"), Style::default().fg(app.theme.yellow())),
                Span::styled(*desc, Style::default().fg(app.theme.fg())),
            ]));
        }
        lines.push(Line::from(""));
    }

    frame.render_widget(Paragraph::new(lines), chunks[0]);

    let footer = Line::from(vec![
        Span::styled(" Esc ", Style::default().fg(app.theme.yellow())),
        Span::styled("close", Style::default().fg(app.theme.muted())),
    ]);
    frame.render_widget(
        Paragraph::new(footer).alignment(ratatui::layout::Alignment::Center),
        chunks[1],
    );
}
