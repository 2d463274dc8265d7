use crossterm::event::{KeyCode, KeyModifiers};
use readtrack_core::ReadingStatus;

use crate::app::App;
use crate::popup::Popup;

pub(crate) fn handle_popup_key(app: &mut App, code: KeyCode, _modifiers: KeyModifiers) {
    match &mut app.popup {
        Some(Popup::AddBook(form)) => match code {
            KeyCode::Esc => app.popup = None,
            KeyCode::Enter => app.submit_add_book(),
            KeyCode::Tab | KeyCode::Down => form.next_field(),
            KeyCode::BackTab | KeyCode::Up => form.prev_field(),
            KeyCode::Backspace => form.active_field_mut().delete_back(),
            KeyCode::Left => form.active_field_mut().move_left(),
            KeyCode::Right => form.active_field_mut().move_right(),
            KeyCode::Char(c) => form.active_field_mut().insert_char(c),
            _ => {}
        },

        Some(Popup::DeleteConfirm { .. }) => match code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                app.confirm_delete();
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                app.cancel_delete();
            }
            _ => {}
        },

        Some(Popup::SetStatus { selected, .. }) => match code {
            KeyCode::Char('j') | KeyCode::Down => {
                *selected = (*selected + 1).min(ReadingStatus::ALL.len() - 1);
            }
            KeyCode::Char('k') | KeyCode::Up => {
                *selected = selected.saturating_sub(1);
            }
            KeyCode::Char(c @ '1'..='3') => {
                *selected = (c as usize) - ('1' as usize);
                app.submit_status();
            }
            KeyCode::Enter => app.submit_status(),
            KeyCode::Esc | KeyCode::Char('q') => app.popup = None,
            _ => {}
        },

        Some(Popup::SetProgress { input, .. }) => match code {
            KeyCode::Esc => app.popup = None,
            KeyCode::Enter => app.submit_progress(),
            KeyCode::Backspace => input.delete_back(),
            KeyCode::Left => input.move_left(),
            KeyCode::Right => input.move_right(),
            KeyCode::Char(c) if c.is_ascii_digit() && input.value.len() < 3 => {
                input.insert_char(c);
            }
            _ => {}
        },

        Some(Popup::Help) => {
            if matches!(code, KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?')) {
                app.popup = None;
            }
        }

        None => {}
    }
}
