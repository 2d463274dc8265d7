//! Derived library view: status filter, free-text filter and sort order.
//!
//! Nothing here is stored; the view is recomputed from the entry list every
//! time it is needed.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::models::{LibraryEntry, ReadingStatus};

/// Which statuses the library view shows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StatusFilter {
    #[default]
    All,
    WantToRead,
    Reading,
    Completed,
}

impl StatusFilter {
    pub fn matches(self, status: ReadingStatus) -> bool {
        match self {
            Self::All => true,
            Self::WantToRead => status == ReadingStatus::WantToRead,
            Self::Reading => status == ReadingStatus::Reading,
            Self::Completed => status == ReadingStatus::Completed,
        }
    }

    pub fn next(self) -> Self {
        match self {
            Self::All => Self::WantToRead,
            Self::WantToRead => Self::Reading,
            Self::Reading => Self::Completed,
            Self::Completed => Self::All,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::All => "📚 All Books",
            Self::WantToRead => ReadingStatus::WantToRead.label(),
            Self::Reading => ReadingStatus::Reading.label(),
            Self::Completed => ReadingStatus::Completed.label(),
        }
    }
}

impl From<ReadingStatus> for StatusFilter {
    fn from(status: ReadingStatus) -> Self {
        match status {
            ReadingStatus::WantToRead => Self::WantToRead,
            ReadingStatus::Reading => Self::Reading,
            ReadingStatus::Completed => Self::Completed,
        }
    }
}

/// Sort order for the library view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    /// Newest `saved_at` first.
    #[default]
    Recent,
    Title,
    Author,
    /// Newest publication year first.
    Year,
    Rating,
    Progress,
}

impl SortKey {
    pub fn next(self) -> Self {
        match self {
            Self::Recent => Self::Title,
            Self::Title => Self::Author,
            Self::Author => Self::Year,
            Self::Year => Self::Rating,
            Self::Rating => Self::Progress,
            Self::Progress => Self::Recent,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Recent => "🕐 Recently Added",
            Self::Title => "🔤 Title A-Z",
            Self::Author => "✍️ Author A-Z",
            Self::Year => "📅 Year (Newest)",
            Self::Rating => "⭐ Highest Rated",
            Self::Progress => "📊 Reading Progress",
        }
    }

    fn compare(self, a: &LibraryEntry, b: &LibraryEntry) -> Ordering {
        match self {
            // Entries without a save time sort last.
            Self::Recent => b.saved_at.cmp(&a.saved_at),
            Self::Title => compare_text(&a.book.title, &b.book.title),
            Self::Author => compare_text(a.book.first_author(), b.book.first_author()),
            Self::Year => b
                .book
                .first_publish_year
                .unwrap_or(0)
                .cmp(&a.book.first_publish_year.unwrap_or(0)),
            Self::Rating => b.rating.cmp(&a.rating),
            Self::Progress => b.progress.cmp(&a.progress),
        }
    }
}

fn compare_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// The user's current view settings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewOptions {
    pub status_filter: StatusFilter,
    pub search_term: String,
    pub sort_key: SortKey,
}

impl ViewOptions {
    pub fn new(status_filter: StatusFilter, sort_key: SortKey) -> Self {
        Self {
            status_filter,
            search_term: String::new(),
            sort_key,
        }
    }
}

/// True if the title or the space-joined author names contain `needle`
/// (already lowercased).
fn matches_term(entry: &LibraryEntry, needle: &str) -> bool {
    entry.book.title.to_lowercase().contains(needle)
        || entry.book.author_name.join(" ").to_lowercase().contains(needle)
}

/// Filter by status, then by search term, then sort. The sort is stable, so
/// ties keep their library order.
pub fn filter_and_sort<'a>(
    entries: &'a [LibraryEntry],
    options: &ViewOptions,
) -> Vec<&'a LibraryEntry> {
    let needle = options.search_term.to_lowercase();

    let mut view: Vec<&LibraryEntry> = entries
        .iter()
        .filter(|entry| options.status_filter.matches(entry.status))
        .filter(|entry| needle.is_empty() || matches_term(entry, &needle))
        .collect();

    view.sort_by(|a, b| options.sort_key.compare(a, b));
    view
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::models::{CatalogBook, EntryId};

    fn entry(id: u64, title: &str, author: &str, status: ReadingStatus) -> LibraryEntry {
        let mut book = CatalogBook::new(format!("OL{id}W"), title);
        book.author_name = vec![author.to_string()];
        LibraryEntry {
            id: EntryId::from(id),
            book,
            rating: 0,
            status,
            progress: 0,
            notes: String::new(),
            categories: Vec::new(),
            saved_at: None,
            updated_at: None,
        }
    }

    fn sample() -> Vec<LibraryEntry> {
        let mut dune = entry(1, "Dune", "Frank Herbert", ReadingStatus::Reading);
        dune.book.first_publish_year = Some(1965);
        dune.rating = 5;
        dune.progress = 55;
        dune.saved_at = Some(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());

        let mut emma = entry(2, "emma", "Jane Austen", ReadingStatus::Completed);
        emma.book.first_publish_year = Some(1815);
        emma.rating = 3;
        emma.saved_at = Some(Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap());

        let mut hyperion = entry(3, "Hyperion", "Dan Simmons", ReadingStatus::WantToRead);
        hyperion.rating = 4;
        hyperion.saved_at = Some(Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap());

        let mut anathem = entry(4, "Anathem", "Neal Stephenson", ReadingStatus::Reading);
        anathem.book.first_publish_year = Some(2008);
        anathem.progress = 10;

        vec![dune, emma, hyperion, anathem]
    }

    fn titles(view: &[&LibraryEntry]) -> Vec<String> {
        view.iter().map(|e| e.book.title.clone()).collect()
    }

    #[test]
    fn test_status_filter_only_keeps_matching_entries() {
        let entries = sample();
        let options = ViewOptions::new(StatusFilter::Reading, SortKey::Title);
        let view = filter_and_sort(&entries, &options);
        assert_eq!(titles(&view), vec!["Anathem", "Dune"]);
        assert!(view.iter().all(|e| e.status == ReadingStatus::Reading));
    }

    #[test]
    fn test_all_filter_keeps_everything() {
        let entries = sample();
        let view = filter_and_sort(&entries, &ViewOptions::default());
        assert_eq!(view.len(), 4);
    }

    #[test]
    fn test_search_term_matches_title_or_author_case_insensitively() {
        let entries = sample();
        let mut options = ViewOptions::default();

        options.search_term = "HERBERT".to_string();
        assert_eq!(titles(&filter_and_sort(&entries, &options)), vec!["Dune"]);

        options.search_term = "emm".to_string();
        assert_eq!(titles(&filter_and_sort(&entries, &options)), vec!["emma"]);

        options.search_term = "zzz".to_string();
        assert!(filter_and_sort(&entries, &options).is_empty());
    }

    #[test]
    fn test_filter_and_term_combine() {
        let entries = sample();
        let mut options = ViewOptions::new(StatusFilter::Reading, SortKey::Recent);
        options.search_term = "jane".to_string();
        assert!(filter_and_sort(&entries, &options).is_empty());
    }

    #[test]
    fn test_sort_by_title_is_ascending_ignoring_case() {
        let entries = sample();
        let view = filter_and_sort(&entries, &ViewOptions::new(StatusFilter::All, SortKey::Title));
        assert_eq!(titles(&view), vec!["Anathem", "Dune", "emma", "Hyperion"]);
    }

    #[test]
    fn test_sort_by_author_uses_first_author() {
        let entries = sample();
        let view = filter_and_sort(&entries, &ViewOptions::new(StatusFilter::All, SortKey::Author));
        assert_eq!(titles(&view), vec!["Hyperion", "Dune", "emma", "Anathem"]);
    }

    #[test]
    fn test_sort_by_year_is_newest_first_with_missing_as_zero() {
        let entries = sample();
        let view = filter_and_sort(&entries, &ViewOptions::new(StatusFilter::All, SortKey::Year));
        assert_eq!(titles(&view), vec!["Anathem", "Dune", "emma", "Hyperion"]);
    }

    #[test]
    fn test_sort_by_rating_is_descending() {
        let entries = sample();
        let view = filter_and_sort(&entries, &ViewOptions::new(StatusFilter::All, SortKey::Rating));
        let ratings: Vec<u8> = view.iter().map(|e| e.rating).collect();
        assert_eq!(ratings, vec![5, 4, 3, 0]);
    }

    #[test]
    fn test_sort_by_progress_is_descending() {
        let entries = sample();
        let view =
            filter_and_sort(&entries, &ViewOptions::new(StatusFilter::All, SortKey::Progress));
        assert_eq!(titles(&view)[..2], ["Dune", "Anathem"]);
    }

    #[test]
    fn test_sort_by_recent_puts_unsaved_last() {
        let entries = sample();
        let view = filter_and_sort(&entries, &ViewOptions::default());
        assert_eq!(titles(&view), vec!["emma", "Hyperion", "Dune", "Anathem"]);
    }

    #[test]
    fn test_cycles_wrap_around() {
        assert_eq!(SortKey::Progress.next(), SortKey::Recent);
        assert_eq!(StatusFilter::Completed.next(), StatusFilter::All);
        assert!(StatusFilter::from(ReadingStatus::Reading).matches(ReadingStatus::Reading));
    }
}
