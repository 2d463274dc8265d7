use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use readtrack_core::ReadingStatus;

use super::centered_rect;
use crate::app::App;
use crate::popup::{FormField, Popup};
use crate::ui::overlays;

pub(crate) fn render_popup(frame: &mut Frame, app: &App, popup: &Popup, area: Rect) {
    match popup {
        Popup::AddBook(form) => {
            let popup_area = centered_rect(60, 40, area);
            frame.render_widget(Clear, popup_area);

            let block = Block::default()
                .title(" ➕ Add Custom Book ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(app.theme.frost_blue()))
                .style(Style::default().bg(app.theme.bg()));

            let inner = block.inner(popup_area);
            frame.render_widget(block, popup_area);

            let mut lines = Vec::new();
            for (i, field) in form.fields.iter().enumerate() {
                lines.push(field_line(app, field, i == form.active_field));
            }

            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                "  Empty year means this year; empty cover uses a placeholder.",
                Style::default().fg(app.theme.muted()),
            )));
            lines.push(Line::from(Span::styled(
                "  Tab: next field  Enter: add to library  Esc: cancel",
                Style::default().fg(app.theme.muted()).add_modifier(Modifier::DIM),
            )));

            frame.render_widget(Paragraph::new(lines), inner);
        }

        Popup::DeleteConfirm { title, .. } => {
            let dim = Style::default().fg(app.theme.muted()).add_modifier(Modifier::DIM);
            let popup_area = centered_rect(50, 20, area);
            frame.render_widget(Clear, popup_area);

            let block = Block::default()
                .title(" Confirm Delete ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(app.theme.red()))
                .style(Style::default().bg(app.theme.bg()));

            let inner = block.inner(popup_area);
            frame.render_widget(block, popup_area);

            let lines = vec![
                Line::from(""),
                Line::from(Span::styled(
                    format!("  Remove \"{title}\" from your library?"),
                    Style::default().fg(app.theme.fg()),
                )),
                Line::from(""),
                Line::from(vec![
                    Span::styled("  [y]", key_style(app.theme.red())),
                    Span::styled("es  ", Style::default().fg(app.theme.muted())),
                    Span::styled("[n]", key_style(app.theme.green())),
                    Span::styled("o  ", Style::default().fg(app.theme.muted())),
                    Span::styled("Esc: cancel", dim),
                ]),
            ];

            frame.render_widget(Paragraph::new(lines), inner);
        }

        Popup::SetStatus { selected, .. } => {
            let popup_area = centered_rect(40, 25, area);
            frame.render_widget(Clear, popup_area);

            let block = Block::default()
                .title(" Reading Status ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(app.theme.frost_ice()))
                .style(Style::default().bg(app.theme.bg()));

            let inner = block.inner(popup_area);
            frame.render_widget(block, popup_area);

            let mut lines = vec![Line::from("")];
            for (i, status) in ReadingStatus::ALL.iter().enumerate() {
                let is_selected = i == *selected;
                let style = if is_selected {
                    Style::default()
                        .fg(app.theme.status_color(*status))
                        .bg(app.theme.bg_secondary())
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(app.theme.fg())
                };
                let prefix = if is_selected { "▶" } else { " " };
                lines.push(Line::from(Span::styled(
                    format!("  {prefix} {} {}", i + 1, status.label()),
                    style,
                )));
            }
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                "  j/k: move  Enter: set  Esc: cancel",
                Style::default().fg(app.theme.muted()).add_modifier(Modifier::DIM),
            )));

            frame.render_widget(Paragraph::new(lines), inner);
        }

        Popup::SetProgress { input, .. } => {
            let popup_area = centered_rect(40, 20, area);
            frame.render_widget(Clear, popup_area);

            let block = Block::default()
                .title(" Reading Progress ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(app.theme.frost_ice()))
                .style(Style::default().bg(app.theme.bg()));

            let inner = block.inner(popup_area);
            frame.render_widget(block, popup_area);

            let lines = vec![
                Line::from(""),
                field_line(app, input, true),
                Line::from(""),
                Line::from(Span::styled(
                    "  0-100  Enter: save  Esc: cancel",
                    Style::default().fg(app.theme.muted()).add_modifier(Modifier::DIM),
                )),
            ];

            frame.render_widget(Paragraph::new(lines), inner);
        }

        Popup::Help => {
            overlays::help::render(frame, app, area);
        }
    }
}

fn key_style(color: ratatui::style::Color) -> Style {
    Style::default().fg(color).add_modifier(Modifier::BOLD)
}

fn field_line<'a>(app: &App, field: &'a FormField, is_active: bool) -> Line<'a> {
    let label_style = if is_active {
        Style::default().fg(app.theme.frost_ice()).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(app.theme.muted())
    };

    let value = if is_active {
        let (before, after) = field.value.split_at(field.cursor);
        format!("{before}█{after}")
    } else if field.value.is_empty() {
        "─".to_string()
    } else {
        field.value.clone()
    };

    let indicator = if is_active { "▶ " } else { "  " };

    Line::from(vec![
        Span::styled(indicator, Style::default().fg(app.theme.frost_ice())),
        Span::styled(format!("{}: ", field.label), label_style),
        Span::styled(value, Style::default().fg(app.theme.fg())),
    ])
}
