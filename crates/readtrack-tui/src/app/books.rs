use chrono::Utc;
use readtrack_core::state::{progress_update, rating_update};
use readtrack_core::{EntryUpdate, NewEntry, ReadingStatus};

use super::{App, Mode, Tab};
use crate::popup::{AddBookForm, Popup};

impl App {
    // ─── Tabs & input ───────────────────────────────────────

    pub fn switch_tab(&mut self) {
        self.tab = self.tab.toggle();
        self.mode = Mode::Normal;
    }

    /// Edit the search box, or the library filter term on the Library tab.
    pub fn start_editing(&mut self) {
        self.mode = Mode::Insert;
    }

    pub fn stop_editing(&mut self) {
        self.mode = Mode::Normal;
    }

    pub fn input_char(&mut self, c: char) {
        match self.tab {
            Tab::Search => self.state.search.query.push(c),
            Tab::Library => {
                self.state.view.search_term.push(c);
                self.clamp_selection();
            }
        }
    }

    pub fn input_backspace(&mut self) {
        match self.tab {
            Tab::Search => {
                self.state.search.query.pop();
            }
            Tab::Library => {
                self.state.view.search_term.pop();
                self.clamp_selection();
            }
        }
    }

    // ─── Search ─────────────────────────────────────────────

    pub fn submit_search(&mut self) {
        let query = self.state.search.query.clone();
        if let Some(query) = self.state.begin_search(&query) {
            tracing::debug!(%query, "searching catalog");
            self.tasks.search(query);
        }
        self.mode = Mode::Normal;
    }

    pub fn clear_search(&mut self) {
        self.state.clear_search();
        self.search_selected = 0;
    }

    /// Save the highlighted search result. Books already in the library are
    /// not offered for saving.
    pub fn save_selected_result(&mut self) {
        let Some(book) = self.state.search.results.get(self.search_selected) else {
            return;
        };
        if self.state.is_book_saved(&book.key) {
            return;
        }
        self.tasks.save(NewEntry::from_book(book.clone()));
    }

    // ─── Custom book ────────────────────────────────────────

    pub fn open_add_popup(&mut self) {
        self.popup = Some(Popup::AddBook(AddBookForm::new()));
    }

    /// Submit the Add Book form. An incomplete form stays open.
    pub fn submit_add_book(&mut self) {
        let Some(Popup::AddBook(ref form)) = self.popup else {
            return;
        };
        let form = form.to_form();
        if let Some(book) = self.state.prepare_custom_book(&form, Utc::now()) {
            self.tasks.save(NewEntry::from_book(book));
            self.popup = None;
        }
    }

    // ─── Updates ────────────────────────────────────────────

    pub fn rate_selected(&mut self, rating: u8) {
        if let Some(entry) = self.selected_entry() {
            let id = entry.id.clone();
            self.tasks.update(id, rating_update(rating), true);
        }
    }

    pub fn open_status_popup(&mut self) {
        let Some(entry) = self.selected_entry() else {
            return;
        };
        let popup = Popup::set_status(entry.id.clone(), entry.status);
        self.popup = Some(popup);
    }

    pub fn submit_status(&mut self) {
        if let Some(Popup::SetStatus { ref id, selected }) = self.popup {
            let status = ReadingStatus::ALL[selected.min(ReadingStatus::ALL.len() - 1)];
            self.tasks.update(id.clone(), EntryUpdate::status(status), true);
            self.popup = None;
        }
    }

    /// Step progress by `delta` points. Only entries being read have progress.
    pub fn adjust_progress(&mut self, delta: i16) {
        let Some(entry) = self.selected_entry() else {
            return;
        };
        if !entry.shows_progress() {
            return;
        }
        let progress = (i16::from(entry.progress) + delta).clamp(0, 100) as u8;
        if progress != entry.progress {
            let id = entry.id.clone();
            self.tasks.update(id, progress_update(progress), false);
        }
    }

    pub fn open_progress_popup(&mut self) {
        let popup = match self.selected_entry() {
            Some(entry) if entry.shows_progress() => {
                Popup::set_progress(entry.id.clone(), entry.progress)
            }
            _ => return,
        };
        self.popup = Some(popup);
    }

    pub fn submit_progress(&mut self) {
        if let Some(Popup::SetProgress { ref id, ref input }) = self.popup {
            // Out-of-range numbers are clamped; anything else is ignored.
            let Ok(value) = input.value.trim().parse::<u32>() else {
                return;
            };
            let progress = value.min(100) as u8;
            self.tasks.update(id.clone(), progress_update(progress), false);
            self.popup = None;
        }
    }

    // ─── View ───────────────────────────────────────────────

    pub fn cycle_filter(&mut self) {
        self.state.view.status_filter = self.state.view.status_filter.next();
        self.library_selected = 0;
    }

    pub fn cycle_sort(&mut self) {
        self.state.view.sort_key = self.state.view.sort_key.next();
        self.library_selected = 0;
    }

    pub fn reload(&mut self) {
        self.load();
    }

    // ─── Delete ─────────────────────────────────────────────

    /// First step: mark the selected entry pending and ask for confirmation.
    pub fn open_delete_confirm(&mut self) {
        if let Some(entry) = self.selected_entry() {
            let id = entry.id.clone();
            let title = entry.book.title.clone();
            self.state.confirm_delete(id.clone());
            self.popup = Some(Popup::DeleteConfirm { id, title });
        }
    }

    /// Second step: delete the entry named by the confirmation popup. The
    /// entry stays pending until the service answers.
    pub fn confirm_delete(&mut self) {
        match self.popup.take() {
            Some(Popup::DeleteConfirm { id, .. }) => {
                tracing::debug!(%id, "delete confirmed");
                self.tasks.delete(id);
            }
            other => {
                tracing::warn!("delete confirmed without a confirmation popup");
                self.popup = other;
            }
        }
    }

    pub fn cancel_delete(&mut self) {
        self.state.cancel_delete();
        self.popup = None;
    }
}
