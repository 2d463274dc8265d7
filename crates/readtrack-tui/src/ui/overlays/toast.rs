use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use readtrack_core::Toast;

use crate::app::App;

/// Toast box in the top-right corner, below the header.
pub fn render(frame: &mut Frame, app: &App, toast: &Toast, area: Rect) {
    let width = (toast.message.chars().count() as u16 + 6).min(area.width);
    let toast_area = Rect {
        x: area.x + area.width.saturating_sub(width + 1),
        y: area.y + 3,
        width,
        height: 3.min(area.height),
    };
    frame.render_widget(Clear, toast_area);

    let color = app.theme.toast_color(toast.kind);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color))
        .style(Style::default().bg(app.theme.bg_secondary()));

    let message = Line::styled(format!(" {} ", toast.message), Style::default().fg(color));
    frame.render_widget(Paragraph::new(message).block(block), toast_area);
}
