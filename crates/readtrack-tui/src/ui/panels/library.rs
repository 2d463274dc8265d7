use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Gauge, List, ListItem, Paragraph, Wrap};
use readtrack_core::LibraryEntry;

use crate::app::{App, Mode};
use crate::ui::{scroll_offset, stars, truncate};

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(3)])
        .split(area);

    render_toolbar(frame, app, chunks[0]);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(chunks[1]);

    let entries = app.visible_entries();
    render_list(frame, app, &entries, body[0]);
    render_detail(frame, app, entries.get(app.library_selected).copied(), body[1]);
}

fn render_toolbar(frame: &mut Frame, app: &App, area: Rect) {
    let view = &app.state.view;
    let muted = Style::default().fg(app.theme.muted());
    let value = Style::default().fg(app.theme.frost_ice());

    let term = if app.mode == Mode::Insert {
        format!("{}█", view.search_term)
    } else if view.search_term.is_empty() {
        "─".to_string()
    } else {
        view.search_term.clone()
    };

    let line = Line::from(vec![
        Span::styled(" [f] ", muted),
        Span::styled(view.status_filter.label(), value),
        Span::styled("   [o] ", muted),
        Span::styled(view.sort_key.label(), value),
        Span::styled("   [/] ", muted),
        Span::styled(term, Style::default().fg(app.theme.fg_bright())),
    ]);
    frame.render_widget(Paragraph::new(line).style(Style::default().bg(app.theme.bg())), area);
}

fn render_list(frame: &mut Frame, app: &App, entries: &[&LibraryEntry], area: Rect) {
    let block = Block::default()
        .title(format!(" Books ({}) ", entries.len()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.active_panel()))
        .style(Style::default().bg(app.theme.bg()));

    if entries.is_empty() {
        let message = if app.state.entries.is_empty() {
            "  Your library is empty. Search for books and save them!"
        } else {
            "  No books match your filters."
        };
        let empty = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(message, Style::default().fg(app.theme.muted()))),
        ])
        .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let inner = block.inner(area);
    let visible = usize::from(inner.height);
    let offset = scroll_offset(app.library_selected, visible);

    let items: Vec<ListItem> = entries
        .iter()
        .enumerate()
        .skip(offset)
        .take(visible)
        .map(|(i, entry)| entry_row(app, i, entry, inner.width))
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}

fn entry_row<'a>(app: &'a App, i: usize, entry: &LibraryEntry, width: u16) -> ListItem<'a> {
    let is_selected = i == app.library_selected;
    let prefix = if is_selected { "▶ " } else { "  " };

    let status_text = if entry.shows_progress() {
        format!("{:>3}%", entry.progress)
    } else {
        match entry.status {
            readtrack_core::ReadingStatus::WantToRead => " 📌 ".to_string(),
            readtrack_core::ReadingStatus::Reading => " 📖 ".to_string(),
            readtrack_core::ReadingStatus::Completed => " ✅ ".to_string(),
        }
    };

    let title_width = usize::from(width).saturating_sub(16);
    let mut spans = vec![
        Span::styled(prefix, Style::default().fg(app.theme.frost_ice())),
        Span::styled(
            format!("{:<title_width$}", truncate(&entry.book.title, title_width)),
            Style::default().fg(if is_selected { app.theme.fg_bright() } else { app.theme.fg() }),
        ),
        Span::styled(stars(entry.rating), Style::default().fg(app.theme.star_color())),
        Span::styled(status_text, Style::default().fg(app.theme.status_color(entry.status))),
    ];
    if entry.book.is_custom {
        spans.insert(1, Span::styled("✎ ", Style::default().fg(app.theme.custom_color())));
    }

    let style = if is_selected {
        Style::default().bg(app.theme.bg_secondary())
    } else {
        Style::default()
    };
    ListItem::new(Line::from(spans)).style(style)
}

fn render_detail(frame: &mut Frame, app: &App, entry: Option<&LibraryEntry>, area: Rect) {
    let block = Block::default()
        .title(" Details ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.border()))
        .style(Style::default().bg(app.theme.bg()));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let Some(entry) = entry else {
        return;
    };

    // Leave room for the progress gauge while reading.
    let gauge_height = if entry.shows_progress() { 3 } else { 0 };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(gauge_height)])
        .split(inner);

    let muted = Style::default().fg(app.theme.muted());
    let text = Style::default().fg(app.theme.fg());
    let book = &entry.book;

    let mut lines = vec![
        Line::from(Span::styled(
            book.title.clone(),
            Style::default().fg(app.theme.fg_bright()).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(format!("by {}", book.authors_display()), text)),
        Line::from(""),
    ];

    let detail = |label: &'static str, value: String| {
        Line::from(vec![Span::styled(label, muted), Span::styled(value, text)])
    };
    if let Some(year) = book.first_publish_year {
        lines.push(detail("📅 Published: ", year.to_string()));
    }
    if let Some(ref publisher) = book.publisher {
        lines.push(detail("🏢 Publisher: ", publisher.clone()));
    }
    if let Some(pages) = book.pages {
        lines.push(detail("📄 Pages: ", pages.to_string()));
    }
    if let Some(ref isbn) = book.isbn {
        lines.push(detail("🔖 ISBN: ", isbn.clone()));
    }
    if book.is_custom {
        let custom = Style::default().fg(app.theme.custom_color());
        lines.push(Line::from(Span::styled("✎ Custom book", custom)));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("Status: ", muted),
        Span::styled(
            entry.status.label(),
            Style::default().fg(app.theme.status_color(entry.status)),
        ),
        Span::styled("  [t]", muted),
    ]));
    lines.push(Line::from(vec![
        Span::styled("Rating: ", muted),
        Span::styled(stars(entry.rating), Style::default().fg(app.theme.star_color())),
        Span::styled("  [1-5]", muted),
    ]));
    if let Some(saved_at) = entry.saved_at {
        lines.push(Line::from(vec![
            Span::styled("📌 Added: ", muted),
            Span::styled(saved_at.format("%b %-d, %Y").to_string(), text),
        ]));
    }
    lines.push(Line::from(vec![
        Span::styled("🖼  Cover: ", muted),
        Span::styled(book.cover().to_string(), Style::default().fg(app.theme.frost_mint())),
    ]));

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), chunks[0]);

    if entry.shows_progress() {
        let gauge = Gauge::default()
            .block(
                Block::default()
                    .title(" Progress  [-/+] [p] ")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(app.theme.border())),
            )
            .gauge_style(Style::default().fg(app.theme.frost_ice()).bg(app.theme.bg_secondary()))
            .percent(u16::from(entry.progress.min(100)))
            .label(format!("{}%", entry.progress));
        frame.render_widget(gauge, chunks[1]);
    }
}
