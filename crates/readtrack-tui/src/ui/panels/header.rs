use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Tabs};

use crate::app::{App, Tab};

/// Tabs on the left, library stats on the right.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(Style::default().fg(app.theme.border()))
        .style(Style::default().bg(app.theme.bg()));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(52), Constraint::Min(20)])
        .split(inner);

    render_tabs(frame, app, chunks[0]);
    render_stats(frame, app, chunks[1]);
}

fn render_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let titles = vec![
        Line::from(" 🔍 Search Books "),
        Line::from(format!(" 📖 My Library ({}) ", app.state.entries.len())),
    ];
    let selected = match app.tab {
        Tab::Search => 0,
        Tab::Library => 1,
    };

    let tabs = Tabs::new(titles)
        .select(selected)
        .style(Style::default().fg(app.theme.muted()))
        .highlight_style(
            Style::default()
                .fg(app.theme.frost_ice())
                .add_modifier(Modifier::BOLD),
        )
        .divider(Span::styled("│", Style::default().fg(app.theme.border())));

    frame.render_widget(tabs, area);
}

fn render_stats(frame: &mut Frame, app: &App, area: Rect) {
    let stats = &app.state.stats;
    let label = Style::default().fg(app.theme.muted());

    let line = Line::from(vec![
        Span::styled("📚 ", label),
        Span::styled(stats.total_books.to_string(), Style::default().fg(app.theme.fg_bright())),
        Span::styled("  📖 ", label),
        Span::styled(stats.reading.to_string(), Style::default().fg(app.theme.frost_ice())),
        Span::styled("  ✅ ", label),
        Span::styled(stats.completed.to_string(), Style::default().fg(app.theme.green())),
        Span::styled("  📌 ", label),
        Span::styled(stats.want_to_read.to_string(), Style::default().fg(app.theme.orange())),
        Span::styled("  ⭐ ", label),
        Span::styled(
            format!("{:.1}", stats.average_rating),
            Style::default().fg(app.theme.star_color()),
        ),
        Span::styled("  🎯 ", label),
        Span::styled(format!("{:.0}%", stats.completion_rate), Style::default().fg(app.theme.fg())),
        Span::raw(" "),
    ]);

    frame.render_widget(
        Paragraph::new(line).alignment(ratatui::layout::Alignment::Right),
        area,
    );
}
