use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph};
use readtrack_core::CatalogBook;
use readtrack_core::state::MSG_NO_RESULTS;

use crate::app::{App, Mode};
use crate::ui::{scroll_offset, truncate};

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // query box
            Constraint::Length(1), // message line
            Constraint::Min(3),    // results
        ])
        .split(area);

    render_query(frame, app, chunks[0]);
    render_message(frame, app, chunks[1]);
    render_results(frame, app, chunks[2]);
}

fn render_query(frame: &mut Frame, app: &App, area: Rect) {
    let editing = app.mode == Mode::Insert;
    let border = if editing { app.theme.active_panel() } else { app.theme.border() };

    let block = Block::default()
        .title(" Search the catalog ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
        .style(Style::default().bg(app.theme.bg()));

    let query = &app.state.search.query;
    let line = if editing {
        Line::from(Span::styled(format!(" {query}█"), Style::default().fg(app.theme.fg_bright())))
    } else if query.is_empty() {
        Line::from(Span::styled(
            " Press / to search by title, author or ISBN",
            Style::default().fg(app.theme.muted()),
        ))
    } else {
        Line::from(Span::styled(format!(" {query}"), Style::default().fg(app.theme.fg())))
    };

    frame.render_widget(Paragraph::new(line).block(block), area);
}

fn render_message(frame: &mut Frame, app: &App, area: Rect) {
    let search = &app.state.search;
    let line = if search.loading {
        Line::from(Span::styled(" ⏳ Searching…", Style::default().fg(app.theme.frost_blue())))
    } else if let Some(ref message) = search.error {
        let color = if message == MSG_NO_RESULTS { app.theme.orange() } else { app.theme.danger() };
        Line::from(Span::styled(format!(" {message}"), Style::default().fg(color)))
    } else if !search.results.is_empty() {
        Line::from(Span::styled(
            format!(" {} results", search.results.len()),
            Style::default().fg(app.theme.muted()),
        ))
    } else {
        Line::from("")
    };

    frame.render_widget(Paragraph::new(line), area);
}

fn render_results(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.border()))
        .style(Style::default().bg(app.theme.bg()));

    let results = &app.state.search.results;
    if results.is_empty() {
        let hint = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                "  Can't find it? Press a to add a custom book.",
                Style::default().fg(app.theme.muted()),
            )),
        ])
        .block(block);
        frame.render_widget(hint, area);
        return;
    }

    let inner = block.inner(area);
    // Two lines per result.
    let visible = usize::from(inner.height / 2);
    let offset = scroll_offset(app.search_selected, visible);

    let items: Vec<ListItem> = results
        .iter()
        .enumerate()
        .skip(offset)
        .take(visible.max(1))
        .map(|(i, book)| result_row(app, i, book, inner.width))
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}

fn result_row<'a>(app: &'a App, i: usize, book: &'a CatalogBook, width: u16) -> ListItem<'a> {
    let is_selected = i == app.search_selected;
    let saved = app.state.is_book_saved(&book.key);

    let prefix = if is_selected { "▶ " } else { "  " };
    let badge = if saved {
        Span::styled(" ✓ In Library ", Style::default().fg(app.theme.success()))
    } else {
        Span::styled(
            " ➕ Save ",
            Style::default().fg(app.theme.frost_ice()).add_modifier(Modifier::BOLD),
        )
    };

    let title_width = usize::from(width).saturating_sub(20);
    let title_line = Line::from(vec![
        Span::styled(prefix, Style::default().fg(app.theme.frost_ice())),
        Span::styled(
            truncate(&book.title, title_width),
            Style::default().fg(app.theme.fg_bright()).add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        badge,
    ]);

    let mut details = vec![
        Span::raw("    "),
        Span::styled(book.authors_display(), Style::default().fg(app.theme.fg())),
    ];
    let muted = Style::default().fg(app.theme.muted());
    if let Some(year) = book.first_publish_year {
        details.push(Span::styled(format!(" · {year}"), muted));
    }
    if let Some(ref publisher) = book.publisher {
        details.push(Span::styled(format!(" · {publisher}"), muted));
    }

    let style = if is_selected {
        Style::default().bg(app.theme.bg_secondary())
    } else {
        Style::default()
    };
    ListItem::new(vec![title_line, Line::from(details)]).style(style)
}
