use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::TrackerError;
use crate::models::book::CatalogBook;

// ─── EntryId ────────────────────────────────────────────────

/// Canonical identifier of a saved library entry.
///
/// The service assigns it on creation. On the wire it may be a number or a
/// string, under `id` or `_id`; both spellings are folded into this type when
/// deserializing and nowhere else.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntryId(String);

impl EntryId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<u64> for EntryId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

impl From<&str> for EntryId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl Serialize for EntryId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.0.parse::<u64>() {
            Ok(n) => serializer.serialize_u64(n),
            Err(_) => serializer.serialize_str(&self.0),
        }
    }
}

impl<'de> Deserialize<'de> for EntryId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct EntryIdVisitor;

        impl Visitor<'_> for EntryIdVisitor {
            type Value = EntryId;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a string or integer entry id")
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<EntryId, E> {
                Ok(EntryId(v.to_string()))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<EntryId, E> {
                Ok(EntryId(v.to_string()))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<EntryId, E> {
                if v.is_empty() {
                    return Err(E::custom("entry id is empty"));
                }
                Ok(EntryId(v.to_string()))
            }
        }

        deserializer.deserialize_any(EntryIdVisitor)
    }
}

// ─── ReadingStatus ──────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReadingStatus {
    #[default]
    WantToRead,
    Reading,
    Completed,
}

impl ReadingStatus {
    pub const ALL: [ReadingStatus; 3] = [Self::WantToRead, Self::Reading, Self::Completed];

    /// Wire name, e.g. `want-to-read`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::WantToRead => "want-to-read",
            Self::Reading => "reading",
            Self::Completed => "completed",
        }
    }

    /// Label used in selectors.
    pub fn label(self) -> &'static str {
        match self {
            Self::WantToRead => "📌 Want to Read",
            Self::Reading => "📖 Currently Reading",
            Self::Completed => "✅ Completed",
        }
    }

    /// Notification shown after an entry moves into this status.
    pub fn notice(self) -> &'static str {
        match self {
            Self::WantToRead => "📌 Added to want to read",
            Self::Reading => "📖 Started reading",
            Self::Completed => "✅ Completed! Great job!",
        }
    }

    pub fn next(self) -> Self {
        match self {
            Self::WantToRead => Self::Reading,
            Self::Reading => Self::Completed,
            Self::Completed => Self::WantToRead,
        }
    }
}

impl fmt::Display for ReadingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReadingStatus {
    type Err = TrackerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "want-to-read" => Ok(Self::WantToRead),
            "reading" => Ok(Self::Reading),
            "completed" => Ok(Self::Completed),
            other => Err(TrackerError::Validation(format!(
                "unknown reading status: {other}"
            ))),
        }
    }
}

// ─── LibraryEntry ───────────────────────────────────────────

/// A saved book with its tracking fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LibraryEntry {
    #[serde(alias = "_id")]
    pub id: EntryId,

    #[serde(flatten)]
    pub book: CatalogBook,

    /// 0 = unrated, otherwise 1–5.
    #[serde(default)]
    pub rating: u8,

    #[serde(default)]
    pub status: ReadingStatus,

    /// 0–100, only meaningful while `status` is `Reading`.
    #[serde(default)]
    pub progress: u8,

    #[serde(default)]
    pub notes: String,

    #[serde(default)]
    pub categories: Vec<String>,

    #[serde(default, with = "timestamp", skip_serializing_if = "Option::is_none")]
    pub saved_at: Option<DateTime<Utc>>,

    #[serde(default, with = "timestamp", skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl LibraryEntry {
    /// Local echo of a freshly created entry: the submitted fields under the
    /// id the service assigned.
    pub fn from_created(id: EntryId, submitted: NewEntry, saved_at: DateTime<Utc>) -> Self {
        Self {
            id,
            book: submitted.book,
            rating: submitted.rating,
            status: submitted.status,
            progress: submitted.progress,
            notes: submitted.notes,
            categories: submitted.categories,
            saved_at: Some(saved_at),
            updated_at: None,
        }
    }

    /// Merge a partial update and stamp the modification time.
    pub fn apply(&mut self, update: &EntryUpdate, at: DateTime<Utc>) {
        if let Some(rating) = update.rating {
            self.rating = rating;
        }
        if let Some(status) = update.status {
            self.status = status;
        }
        if let Some(progress) = update.progress {
            self.progress = progress;
        }
        if let Some(ref notes) = update.notes {
            self.notes = notes.clone();
        }
        if let Some(ref categories) = update.categories {
            self.categories = categories.clone();
        }
        self.updated_at = Some(at);
    }

    /// Progress is only shown and editable while reading.
    pub fn shows_progress(&self) -> bool {
        self.status == ReadingStatus::Reading
    }
}

// ─── Requests ───────────────────────────────────────────────

/// Body of the create request: the catalog book plus default library fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewEntry {
    #[serde(flatten)]
    pub book: CatalogBook,
    pub rating: u8,
    pub status: ReadingStatus,
    pub progress: u8,
    pub notes: String,
    pub categories: Vec<String>,
}

impl NewEntry {
    pub fn from_book(book: CatalogBook) -> Self {
        Self {
            book,
            rating: 0,
            status: ReadingStatus::WantToRead,
            progress: 0,
            notes: String::new(),
            categories: Vec::new(),
        }
    }
}

/// Partial field set for the update request. Absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EntryUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<u8>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ReadingStatus>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progress: Option<u8>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<String>>,
}

impl EntryUpdate {
    pub fn rating(rating: u8) -> Self {
        Self {
            rating: Some(rating),
            ..Default::default()
        }
    }

    pub fn status(status: ReadingStatus) -> Self {
        Self {
            status: Some(status),
            ..Default::default()
        }
    }

    pub fn progress(progress: u8) -> Self {
        Self {
            progress: Some(progress),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

// ─── Timestamps ─────────────────────────────────────────────

/// The service writes naive ISO-8601 timestamps (no offset) in UTC; RFC 3339
/// is accepted too. Unreadable values are treated as absent.
pub(crate) mod timestamp {
    use chrono::{DateTime, NaiveDateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        value: &Option<DateTime<Utc>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(ts) => serializer.serialize_str(&ts.to_rfc3339()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<DateTime<Utc>>, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.as_deref().and_then(parse))
    }

    pub fn parse(raw: &str) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(raw)
            .map(|ts| ts.with_timezone(&Utc))
            .ok()
            .or_else(|| {
                NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
                    .ok()
                    .map(|naive| naive.and_utc())
            })
    }
}

// ─── Tests ─────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use serde_json::json;

    use super::*;

    fn stored_entry() -> serde_json::Value {
        json!({
            "id": 7,
            "key": "OL1W",
            "title": "Dune",
            "author_name": ["Frank Herbert"],
            "first_publish_year": 1965,
            "rating": 4,
            "status": "reading",
            "progress": 40,
            "notes": "",
            "categories": [],
            "saved_at": "2024-05-01T10:20:30.123456",
            "updated_at": "2024-05-02T08:00:00+00:00"
        })
    }

    #[test]
    fn test_entry_from_service_json() {
        let entry: LibraryEntry = serde_json::from_value(stored_entry()).unwrap();
        assert_eq!(entry.id, EntryId::from(7));
        assert_eq!(entry.book.title, "Dune");
        assert_eq!(entry.status, ReadingStatus::Reading);
        assert_eq!(entry.progress, 40);
        assert_eq!(
            entry.saved_at.unwrap().date_naive(),
            chrono::NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()
        );
        assert!(entry.updated_at.is_some());
    }

    #[test]
    fn test_entry_accepts_underscore_id() {
        let entry: LibraryEntry =
            serde_json::from_value(json!({"_id": "abc123", "key": "k", "title": "T"})).unwrap();
        assert_eq!(entry.id.as_str(), "abc123");
        assert_eq!(entry.rating, 0);
        assert_eq!(entry.status, ReadingStatus::WantToRead);
        assert!(entry.saved_at.is_none());
    }

    #[test]
    fn test_unreadable_timestamp_is_absent() {
        let entry: LibraryEntry = serde_json::from_value(
            json!({"id": 1, "key": "k", "title": "T", "saved_at": "yesterday"}),
        )
        .unwrap();
        assert!(entry.saved_at.is_none());
    }

    #[test]
    fn test_status_wire_names() {
        assert_eq!(
            serde_json::to_value(ReadingStatus::WantToRead).unwrap(),
            json!("want-to-read")
        );
        assert_eq!("completed".parse::<ReadingStatus>().unwrap(), ReadingStatus::Completed);
        assert!("finished".parse::<ReadingStatus>().is_err());
        assert_eq!(ReadingStatus::Completed.next(), ReadingStatus::WantToRead);
    }

    #[test]
    fn test_update_serializes_only_present_fields() {
        let body = serde_json::to_value(EntryUpdate::status(ReadingStatus::Reading)).unwrap();
        assert_eq!(body, json!({"status": "reading"}));
        assert!(EntryUpdate::default().is_empty());
    }

    #[test]
    fn test_new_entry_defaults() {
        let body = serde_json::to_value(NewEntry::from_book(CatalogBook::new("OL1W", "Dune")))
            .unwrap();
        assert_eq!(body["key"], "OL1W");
        assert_eq!(body["rating"], 0);
        assert_eq!(body["status"], "want-to-read");
        assert_eq!(body["progress"], 0);
        assert_eq!(body["notes"], "");
        assert_eq!(body["categories"], json!([]));
    }

    #[test]
    fn test_apply_merges_and_stamps() {
        let mut entry: LibraryEntry = serde_json::from_value(stored_entry()).unwrap();
        let at = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();

        entry.apply(&EntryUpdate::rating(5), at);
        assert_eq!(entry.rating, 5);
        assert_eq!(entry.status, ReadingStatus::Reading);
        assert_eq!(entry.updated_at, Some(at));
    }

    #[test]
    fn test_entry_id_serializes_numeric_ids_as_numbers() {
        assert_eq!(serde_json::to_value(EntryId::from(3)).unwrap(), json!(3));
        assert_eq!(serde_json::to_value(EntryId::from("x1")).unwrap(), json!("x1"));
    }
}
