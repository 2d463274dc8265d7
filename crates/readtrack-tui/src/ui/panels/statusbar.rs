use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::app::{App, Mode, Tab};

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(10), // Mode
            Constraint::Min(20),    // Key hints
            Constraint::Length(32), // Service
        ])
        .split(area);

    render_mode_zone(frame, app, chunks[0]);
    render_hints_zone(frame, app, chunks[1]);
    render_service_zone(frame, app, chunks[2]);
}

fn render_mode_zone(frame: &mut Frame, app: &App, area: Rect) {
    let (bg, fg) = match app.mode {
        Mode::Normal => (app.theme.frost_dark(), app.theme.fg_white()),
        Mode::Insert => (app.theme.green(), app.theme.bg()),
    };

    let content = Line::from(Span::styled(
        format!(" {} ", app.mode),
        Style::default().bg(bg).fg(fg).add_modifier(Modifier::BOLD),
    ));
    frame.render_widget(
        Paragraph::new(content).alignment(ratatui::layout::Alignment::Center),
        area,
    );
}

fn render_hints_zone(frame: &mut Frame, app: &App, area: Rect) {
    let hints: &[(&str, &str)] = match (app.mode, app.tab) {
        (Mode::Insert, Tab::Search) => &[("Enter", "search"), ("Esc", "done")],
        (Mode::Insert, Tab::Library) => &[("Enter/Esc", "done")],
        (Mode::Normal, Tab::Search) => &[
            ("/", "search"),
            ("s", "save"),
            ("a", "add custom"),
            ("c", "clear"),
            ("Tab", "library"),
            ("?", "help"),
        ],
        (Mode::Normal, Tab::Library) => &[
            ("1-5", "rate"),
            ("t", "status"),
            ("-/+", "progress"),
            ("f", "filter"),
            ("o", "sort"),
            ("d", "delete"),
            ("Tab", "search"),
        ],
    };

    let mut spans = Vec::new();
    for (key, desc) in hints {
        spans.push(Span::styled(
            format!(" {key} "),
            Style::default().fg(app.theme.yellow()).add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::styled(format!("{desc} "), Style::default().fg(app.theme.muted())));
    }

    frame.render_widget(
        Paragraph::new(Line::from(spans)).style(Style::default().bg(app.theme.bg_secondary())),
        area,
    );
}

fn render_service_zone(frame: &mut Frame, app: &App, area: Rect) {
    let content = Line::from(Span::styled(
        format!("{} ", app.config.service.base_url),
        Style::default().fg(app.theme.frost_mint()),
    ));
    frame.render_widget(
        Paragraph::new(content)
            .style(Style::default().bg(app.theme.bg_secondary()))
            .alignment(ratatui::layout::Alignment::Right),
        area,
    );
}
