use std::sync::Arc;

use chrono::Utc;

use crate::models::{
    CatalogBook, CustomBookForm, EntryId, EntryUpdate, LibraryEntry, NewEntry, ReadingStatus,
};
use crate::service::LibraryService;
use crate::state::{Followup, LibraryState, progress_update, rating_update};

/// Sequential driver for [`LibraryState`]: each operation performs its
/// request, waits for it, and applies the outcome before returning.
pub struct LibraryClient {
    service: Arc<dyn LibraryService>,
    state: LibraryState,
}

impl LibraryClient {
    pub fn new(service: Arc<dyn LibraryService>, state: LibraryState) -> Self {
        Self { service, state }
    }

    pub fn state(&self) -> &LibraryState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut LibraryState {
        &mut self.state
    }

    /// Initial fetch of the library and its stats.
    pub async fn load(&mut self) {
        let entries = self.service.list_books().await;
        self.state.apply_entries(entries);
        self.refresh_stats().await;
    }

    pub async fn refresh_stats(&mut self) {
        let stats = self.service.stats().await;
        self.state.apply_stats(stats);
    }

    async fn follow(&mut self, followup: Followup) {
        if followup == Followup::RefreshStats {
            self.refresh_stats().await;
        }
    }

    // ─── Search ─────────────────────────────────────────────

    pub async fn search_books(&mut self, query: &str) {
        let Some(query) = self.state.begin_search(query) else {
            return;
        };
        let result = self.service.search(&query).await;
        self.state.finish_search(result);
    }

    pub fn clear_search(&mut self) {
        self.state.clear_search();
    }

    // ─── Save ───────────────────────────────────────────────

    /// Returns whether the book was saved.
    pub async fn save_book(&mut self, book: CatalogBook) -> bool {
        let entry = NewEntry::from_book(book);
        let result = self.service.create(&entry).await;
        let saved = result.is_ok();
        let followup = self.state.finish_save(entry, result, Utc::now());
        self.follow(followup).await;
        saved
    }

    pub async fn add_custom_book(&mut self, form: &CustomBookForm) -> bool {
        match self.state.prepare_custom_book(form, Utc::now()) {
            Some(book) => self.save_book(book).await,
            None => false,
        }
    }

    pub fn is_book_saved(&self, key: &str) -> bool {
        self.state.is_book_saved(key)
    }

    // ─── Update ─────────────────────────────────────────────

    pub async fn update_book(&mut self, id: &EntryId, update: EntryUpdate) -> bool {
        let result = self.service.update(id, &update).await;
        let updated = self.state.finish_update(id, &update, result, Utc::now());
        if updated {
            self.refresh_stats().await;
        }
        updated
    }

    pub async fn update_rating(&mut self, id: &EntryId, rating: u8) -> bool {
        self.update_announced(id, rating_update(rating)).await
    }

    pub async fn update_status(&mut self, id: &EntryId, status: ReadingStatus) -> bool {
        self.update_announced(id, EntryUpdate::status(status)).await
    }

    pub async fn update_progress(&mut self, id: &EntryId, progress: u8) -> bool {
        self.update_book(id, progress_update(progress)).await
    }

    async fn update_announced(&mut self, id: &EntryId, update: EntryUpdate) -> bool {
        let updated = self.update_book(id, update.clone()).await;
        if updated {
            self.state.announce_update(&update);
        }
        updated
    }

    // ─── Delete ─────────────────────────────────────────────

    pub fn confirm_delete(&mut self, id: EntryId) {
        self.state.confirm_delete(id);
    }

    pub fn cancel_delete(&mut self) {
        self.state.cancel_delete();
    }

    /// Delete the entry awaiting confirmation. Without one, nothing is sent
    /// and false is returned.
    pub async fn delete_book(&mut self) -> bool {
        let Some(id) = self.state.pending_delete().cloned() else {
            tracing::debug!("delete requested without a pending confirmation");
            return false;
        };
        let result = self.service.delete(&id).await;
        let deleted = result.is_ok();
        let followup = self.state.finish_delete(&id, result);
        self.follow(followup).await;
        deleted
    }

    // ─── View ───────────────────────────────────────────────

    pub fn filtered_books(&self) -> Vec<&LibraryEntry> {
        self.state.visible_entries()
    }
}
