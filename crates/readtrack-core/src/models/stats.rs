use serde::{Deserialize, Serialize};

/// Aggregate statistics computed by the library service.
///
/// Never modified locally: it is re-fetched after every change to the library.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LibraryStats {
    pub total_books: u32,
    pub completed: u32,
    pub reading: u32,
    pub want_to_read: u32,
    /// Mean of the non-zero ratings, one decimal.
    pub average_rating: f64,
    /// Percentage of completed books, one decimal.
    pub completion_rate: f64,
    pub total_pages: u64,
    pub average_progress: f64,
}
