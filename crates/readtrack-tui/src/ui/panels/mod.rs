pub mod header;
pub mod library;
pub mod search;
pub mod statusbar;

use ratatui::Frame;
use ratatui::layout::Rect;

use crate::app::{App, Tab};

pub fn render_body(frame: &mut Frame, app: &App, area: Rect) {
    match app.tab {
        Tab::Search => search::render(frame, app, area),
        Tab::Library => library::render(frame, app, area),
    }
}
