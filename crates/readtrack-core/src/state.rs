//! Client-side library state and the transitions applied to it.
//!
//! Every transition is synchronous and takes the outcome of a remote call as
//! an argument, so the same reducers serve the sequential [`LibraryClient`]
//! and the event-driven TUI, where requests run as background tasks and their
//! results are applied in whatever order they arrive.
//!
//! [`LibraryClient`]: crate::client::LibraryClient

use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};

use crate::error::Result;
use crate::models::{
    CatalogBook, CustomBookForm, EntryId, EntryUpdate, LibraryEntry, LibraryStats, NewEntry,
};
use crate::notify::{DEFAULT_TOAST_DURATION, Notifier, Toast, ToastKind};
use crate::service::CreatedEntry;
use crate::view::{ViewOptions, filter_and_sort};

// ─── Messages ───────────────────────────────────────────────

pub const MSG_EMPTY_QUERY: &str = "Please enter a search term";
pub const MSG_NO_RESULTS: &str = "No books found. Try a different search or add a custom book!";
pub const MSG_SEARCH_FAILED: &str = "Failed to search books. Is backend running?";
pub const MSG_LOAD_FAILED: &str = "❌ Failed to load books";
pub const MSG_SAVED: &str = "✅ Book saved to favorites!";
pub const MSG_SAVE_FAILED: &str = "❌ Failed to save book";
pub const MSG_UPDATE_FAILED: &str = "❌ Failed to update book";
pub const MSG_DELETED: &str = "✅ Book removed from library";
pub const MSG_DELETE_FAILED: &str = "❌ Failed to delete book";
pub const MSG_FORM_INCOMPLETE: &str = "❌ Title and author are required";

/// What the caller should do once a transition has been applied.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Followup {
    Nothing,
    /// The library changed; aggregate stats are stale.
    RefreshStats,
}

// ─── Search ─────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchState {
    pub query: String,
    pub results: Vec<CatalogBook>,
    /// Inline message under the search box; informational or an error.
    pub error: Option<String>,
    pub loading: bool,
}

// ─── Delete confirmation ────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DeleteState {
    #[default]
    Idle,
    Pending(EntryId),
}

// ─── Update helpers ─────────────────────────────────────────

/// Rating update from the star control; always 1–5.
pub fn rating_update(rating: u8) -> EntryUpdate {
    EntryUpdate::rating(rating.clamp(1, 5))
}

pub fn progress_update(progress: u8) -> EntryUpdate {
    EntryUpdate::progress(progress.min(100))
}

/// Success notice for an update made through one of the dedicated controls.
/// Progress changes are silent.
pub fn update_notice(update: &EntryUpdate) -> Option<String> {
    if let Some(status) = update.status {
        return Some(status.notice().to_string());
    }
    update.rating.map(|n| format!("⭐ Rated {n} stars!"))
}

// ─── LibraryState ───────────────────────────────────────────

#[derive(Debug)]
pub struct LibraryState {
    pub entries: Vec<LibraryEntry>,
    pub stats: LibraryStats,
    pub search: SearchState,
    pub view: ViewOptions,
    delete: DeleteState,
    notifier: Notifier,
}

impl Default for LibraryState {
    fn default() -> Self {
        Self::new(ViewOptions::default(), DEFAULT_TOAST_DURATION)
    }
}

impl LibraryState {
    pub fn new(view: ViewOptions, toast_duration: Duration) -> Self {
        Self {
            entries: Vec::new(),
            stats: LibraryStats::default(),
            search: SearchState::default(),
            view,
            delete: DeleteState::Idle,
            notifier: Notifier::new(toast_duration),
        }
    }

    // ─── Loading ────────────────────────────────────────────

    pub fn apply_entries(&mut self, result: Result<Vec<LibraryEntry>>) {
        match result {
            Ok(entries) => {
                tracing::debug!(count = entries.len(), "library loaded");
                self.entries = entries;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to load library");
                self.notify(MSG_LOAD_FAILED, ToastKind::Error);
            }
        }
    }

    /// Stats failures are logged only; the previous figures stay on screen.
    pub fn apply_stats(&mut self, result: Result<LibraryStats>) {
        match result {
            Ok(stats) => self.stats = stats,
            Err(e) => tracing::warn!(error = %e, "failed to refresh stats"),
        }
    }

    // ─── Search ─────────────────────────────────────────────

    /// Record the query and validate it. Returns the query to send, or
    /// `None` when it was blank and nothing should be sent.
    pub fn begin_search(&mut self, query: &str) -> Option<String> {
        self.search.query = query.to_string();
        let trimmed = query.trim();
        if trimmed.is_empty() {
            self.search.error = Some(MSG_EMPTY_QUERY.to_string());
            return None;
        }

        self.search.loading = true;
        self.search.error = None;
        Some(trimmed.to_string())
    }

    pub fn finish_search(&mut self, result: Result<Vec<CatalogBook>>) {
        self.search.loading = false;
        match result {
            Ok(books) => {
                self.search.error = books.is_empty().then(|| MSG_NO_RESULTS.to_string());
                self.search.results = books;
            }
            Err(e) => {
                tracing::error!(error = %e, query = %self.search.query, "search failed");
                self.search.error = Some(MSG_SEARCH_FAILED.to_string());
            }
        }
    }

    pub fn clear_search(&mut self) {
        self.search.query.clear();
        self.search.results.clear();
        self.search.error = None;
    }

    // ─── Save ───────────────────────────────────────────────

    /// A catalog key already present in the library cannot be saved again.
    pub fn is_book_saved(&self, key: &str) -> bool {
        self.entries.iter().any(|entry| entry.book.key == key)
    }

    pub fn finish_save(
        &mut self,
        submitted: NewEntry,
        result: Result<CreatedEntry>,
        now: DateTime<Utc>,
    ) -> Followup {
        match result {
            Ok(created) => {
                tracing::info!(id = %created.id, key = %submitted.book.key, "book saved");
                let entry = LibraryEntry::from_created(created.id, submitted, now);
                self.entries.insert(0, entry);
                self.notify(MSG_SAVED, ToastKind::Success);
                Followup::RefreshStats
            }
            Err(e) => {
                tracing::error!(error = %e, key = %submitted.book.key, "save failed");
                self.notify(MSG_SAVE_FAILED, ToastKind::Error);
                Followup::Nothing
            }
        }
    }

    /// Validate the hand-entry form and build its catalog book. On failure the
    /// validation toast is shown and `None` returned.
    pub fn prepare_custom_book(
        &mut self,
        form: &CustomBookForm,
        now: DateTime<Utc>,
    ) -> Option<CatalogBook> {
        match form.to_catalog_book(now) {
            Ok(book) => Some(book),
            Err(_) => {
                self.notify(MSG_FORM_INCOMPLETE, ToastKind::Error);
                None
            }
        }
    }

    // ─── Update ─────────────────────────────────────────────

    pub fn entry(&self, id: &EntryId) -> Option<&LibraryEntry> {
        self.entries.iter().find(|entry| &entry.id == id)
    }

    /// Merge a confirmed update into the matching entry. Returns whether the
    /// update succeeded; nothing is rolled back on failure.
    pub fn finish_update(
        &mut self,
        id: &EntryId,
        update: &EntryUpdate,
        result: Result<()>,
        now: DateTime<Utc>,
    ) -> bool {
        match result {
            Ok(()) => {
                match self.entries.iter_mut().find(|entry| &entry.id == id) {
                    Some(entry) => entry.apply(update, now),
                    None => tracing::debug!(%id, "updated entry is no longer in the library"),
                }
                true
            }
            Err(e) => {
                tracing::error!(error = %e, %id, "update failed");
                self.notify(MSG_UPDATE_FAILED, ToastKind::Error);
                false
            }
        }
    }

    pub fn announce_update(&mut self, update: &EntryUpdate) {
        if let Some(notice) = update_notice(update) {
            self.notify(notice, ToastKind::Success);
        }
    }

    // ─── Delete ─────────────────────────────────────────────

    pub fn confirm_delete(&mut self, id: EntryId) {
        self.delete = DeleteState::Pending(id);
    }

    pub fn cancel_delete(&mut self) {
        self.delete = DeleteState::Idle;
    }

    pub fn delete_state(&self) -> &DeleteState {
        &self.delete
    }

    pub fn pending_delete(&self) -> Option<&EntryId> {
        match self.delete {
            DeleteState::Pending(ref id) => Some(id),
            DeleteState::Idle => None,
        }
    }

    /// Outcome of the delete request for `id`. The confirmation for `id` ends
    /// here, whatever the result; a newer pending delete is left alone.
    pub fn finish_delete(&mut self, id: &EntryId, result: Result<()>) -> Followup {
        if self.pending_delete() == Some(id) {
            self.delete = DeleteState::Idle;
        }
        match result {
            Ok(()) => {
                tracing::info!(%id, "book deleted");
                self.entries.retain(|entry| &entry.id != id);
                self.notify(MSG_DELETED, ToastKind::Success);
                Followup::RefreshStats
            }
            Err(e) => {
                tracing::error!(error = %e, %id, "delete failed");
                self.notify(MSG_DELETE_FAILED, ToastKind::Error);
                Followup::Nothing
            }
        }
    }

    // ─── View / toast ───────────────────────────────────────

    pub fn visible_entries(&self) -> Vec<&LibraryEntry> {
        filter_and_sort(&self.entries, &self.view)
    }

    pub fn notify(&mut self, message: impl Into<String>, kind: ToastKind) {
        self.notifier.show(message, kind);
    }

    pub fn toast(&self) -> Option<&Toast> {
        self.notifier.current()
    }

    /// Drop the toast once its deadline has passed. Returns true if it did.
    pub fn expire_toast(&mut self, now: Instant) -> bool {
        self.notifier.expire(now)
    }
}
