pub(crate) mod overlays;
pub(crate) mod panels;
pub(crate) mod popups;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};

use crate::app::App;

/// Render the entire UI.
pub fn render(frame: &mut Frame, app: &App) {
    let size = frame.area();

    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // header: tabs + stats
            Constraint::Min(5),    // body
            Constraint::Length(1), // status bar
        ])
        .split(size);

    panels::header::render(frame, app, main_layout[0]);
    panels::render_body(frame, app, main_layout[1]);
    panels::statusbar::render(frame, app, main_layout[2]);

    // Popup overlay (on top of everything)
    if let Some(ref popup) = app.popup {
        popups::render_popup(frame, app, popup, size);
    }

    // Toast stays visible above popups.
    if let Some(toast) = app.state.toast() {
        overlays::toast::render(frame, app, toast, size);
    }
}

// ─── Helpers ───────────────────────────────────────────────

pub(crate) fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{truncated}…")
    }
}

/// Five-star display; unrated shows five empty stars.
pub(crate) fn stars(rating: u8) -> String {
    let filled = usize::from(rating.min(5));
    "★".repeat(filled) + &"☆".repeat(5 - filled)
}

/// First row to draw so that `selected` stays inside a window of `height` rows.
pub(crate) fn scroll_offset(selected: usize, height: usize) -> usize {
    if height > 0 && selected >= height {
        selected - height + 1
    } else {
        0
    }
}

/// Create a centered rectangle.
pub(crate) fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stars() {
        assert_eq!(stars(0), "☆☆☆☆☆");
        assert_eq!(stars(3), "★★★☆☆");
        assert_eq!(stars(9), "★★★★★");
    }

    #[test]
    fn test_truncate_counts_chars() {
        assert_eq!(truncate("Dune", 10), "Dune");
        assert_eq!(truncate("Der Zauberberg", 6), "Der Z…");
    }

    #[test]
    fn test_scroll_offset_keeps_selection_visible() {
        assert_eq!(scroll_offset(3, 10), 0);
        assert_eq!(scroll_offset(12, 10), 3);
        assert_eq!(scroll_offset(5, 0), 0);
    }
}
