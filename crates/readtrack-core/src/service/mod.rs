pub mod http;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::{CatalogBook, EntryId, EntryUpdate, LibraryEntry, LibraryStats, NewEntry};

pub use http::HttpLibraryService;

/// Reply to a create request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatedEntry {
    pub id: EntryId,
    #[serde(default)]
    pub message: String,
}

/// Service health as reported by `GET /api/health`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthReport {
    pub status: String,
    #[serde(default, with = "crate::models::library::timestamp")]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(default)]
    pub database: String,
    #[serde(default)]
    pub books_count: u32,
}

impl HealthReport {
    pub fn is_healthy(&self) -> bool {
        self.status == "healthy"
    }
}

/// Full library dump from `GET /api/books/export`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LibraryExport {
    #[serde(default, with = "crate::models::library::timestamp")]
    pub export_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub total_books: u32,
    #[serde(default)]
    pub books: Vec<LibraryEntry>,
}

/// The remote library service: CRUD over library entries, catalog search and
/// aggregate statistics.
#[async_trait]
pub trait LibraryService: Send + Sync {
    async fn list_books(&self) -> Result<Vec<LibraryEntry>>;

    async fn stats(&self) -> Result<LibraryStats>;

    async fn search(&self, query: &str) -> Result<Vec<CatalogBook>>;

    async fn create(&self, entry: &NewEntry) -> Result<CreatedEntry>;

    async fn update(&self, id: &EntryId, update: &EntryUpdate) -> Result<()>;

    async fn delete(&self, id: &EntryId) -> Result<()>;

    async fn health(&self) -> Result<HealthReport>;

    async fn export(&self) -> Result<LibraryExport>;
}
