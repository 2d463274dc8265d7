mod popup_keys;

use crossterm::event::{KeyCode, KeyModifiers};

use crate::app::{App, Mode, Tab};
use crate::popup::Popup;

pub(crate) fn handle_key(app: &mut App, code: KeyCode, modifiers: KeyModifiers) {
    if code == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return;
    }

    // Popup takes priority
    if app.popup.is_some() {
        popup_keys::handle_popup_key(app, code, modifiers);
        return;
    }

    match app.mode {
        Mode::Insert => handle_insert_mode(app, code),
        Mode::Normal => handle_normal_mode(app, code),
    }
}

/// Typing into the search box or the library filter.
fn handle_insert_mode(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Esc => app.stop_editing(),
        KeyCode::Enter => match app.tab {
            Tab::Search => app.submit_search(),
            Tab::Library => app.stop_editing(),
        },
        KeyCode::Backspace => app.input_backspace(),
        KeyCode::Char(c) => app.input_char(c),
        _ => {}
    }
}

fn handle_normal_mode(app: &mut App, code: KeyCode) {
    // Keys shared by both tabs
    match code {
        KeyCode::Char('q') => {
            app.should_quit = true;
            return;
        }
        KeyCode::Tab | KeyCode::BackTab => {
            app.switch_tab();
            return;
        }
        KeyCode::Char('?') => {
            app.popup = Some(Popup::Help);
            return;
        }
        KeyCode::Char('/') | KeyCode::Char('i') => {
            app.start_editing();
            return;
        }
        KeyCode::Char('j') | KeyCode::Down => {
            app.move_down();
            return;
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.move_up();
            return;
        }
        KeyCode::Char('g') | KeyCode::Home => {
            app.move_to_top();
            return;
        }
        KeyCode::Char('G') | KeyCode::End => {
            app.move_to_bottom();
            return;
        }
        KeyCode::Char('a') => {
            app.open_add_popup();
            return;
        }
        KeyCode::Char('r') => {
            app.reload();
            return;
        }
        _ => {}
    }

    match app.tab {
        Tab::Search => handle_search_tab(app, code),
        Tab::Library => handle_library_tab(app, code),
    }
}

fn handle_search_tab(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Enter | KeyCode::Char('s') => app.save_selected_result(),
        KeyCode::Char('c') | KeyCode::Esc => app.clear_search(),
        _ => {}
    }
}

fn handle_library_tab(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Char(c @ '1'..='5') => {
            if let Some(rating) = c.to_digit(10) {
                app.rate_selected(rating as u8);
            }
        }
        KeyCode::Char('t') | KeyCode::Enter => app.open_status_popup(),
        KeyCode::Char('+') | KeyCode::Char('=') | KeyCode::Right => {
            let step = i16::from(app.config.ui.progress_step);
            app.adjust_progress(step);
        }
        KeyCode::Char('-') | KeyCode::Left => {
            let step = i16::from(app.config.ui.progress_step);
            app.adjust_progress(-step);
        }
        KeyCode::Char('p') => app.open_progress_popup(),
        KeyCode::Char('f') => app.cycle_filter(),
        KeyCode::Char('o') => app.cycle_sort(),
        KeyCode::Char('d') | KeyCode::Delete => app.open_delete_confirm(),
        KeyCode::Esc => {
            app.state.view.search_term.clear();
            app.clamp_selection();
        }
        _ => {}
    }
}
