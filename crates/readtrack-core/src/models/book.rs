use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{Result, TrackerError};

/// Cover shown for books that have none of their own.
pub const PLACEHOLDER_COVER_URL: &str =
    "https://images.unsplash.com/photo-1544947950-fa07a98d237f?w=150";

// ─── CatalogBook ────────────────────────────────────────────

/// A book as returned by the catalog search, or entered by hand,
/// before it is saved into the library.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogBook {
    /// External catalog identifier (`custom-…` for hand-entered books).
    #[serde(default)]
    pub key: String,

    #[serde(default)]
    pub title: String,

    #[serde(default, deserialize_with = "one_or_many")]
    pub author_name: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_publish_year: Option<i32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publisher: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_id: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub isbn: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pages: Option<u32>,

    #[serde(default)]
    pub is_custom: bool,
}

impl CatalogBook {
    pub fn new(key: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            title: title.into(),
            author_name: Vec::new(),
            first_publish_year: None,
            publisher: None,
            cover_url: None,
            cover_id: None,
            isbn: None,
            language: None,
            pages: None,
            is_custom: false,
        }
    }

    /// Cover to display, falling back to the placeholder.
    pub fn cover(&self) -> &str {
        self.cover_url
            .as_deref()
            .filter(|url| !url.is_empty())
            .unwrap_or(PLACEHOLDER_COVER_URL)
    }

    /// Authors joined for display, or "Unknown".
    pub fn authors_display(&self) -> String {
        if self.author_name.is_empty() {
            "Unknown".to_string()
        } else {
            self.author_name.join(", ")
        }
    }

    /// First listed author, empty if there is none.
    pub fn first_author(&self) -> &str {
        self.author_name.first().map(String::as_str).unwrap_or("")
    }
}

/// Some catalog records carry a bare string where a list of authors is expected.
fn one_or_many<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
    }

    Ok(match Option::<OneOrMany>::deserialize(deserializer)? {
        Some(OneOrMany::One(name)) => vec![name],
        Some(OneOrMany::Many(names)) => names,
        None => Vec::new(),
    })
}

// ─── CustomBookForm ─────────────────────────────────────────

/// The hand-entry form for books the catalog does not know.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomBookForm {
    pub title: String,
    pub author: String,
    /// Free text; empty, unparsable or zero means "this year".
    pub year: String,
    /// Free text; empty means the placeholder cover.
    pub cover_url: String,
}

impl CustomBookForm {
    pub fn new(title: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            ..Default::default()
        }
    }

    /// Build the catalog-shaped book for this form.
    ///
    /// The generated key is `custom-<unix millis>`; it is not globally unique,
    /// the service assigns the canonical id on creation.
    pub fn to_catalog_book(&self, now: DateTime<Utc>) -> Result<CatalogBook> {
        let title = self.title.trim();
        let author = self.author.trim();
        if title.is_empty() || author.is_empty() {
            return Err(TrackerError::Validation(
                "title and author are required".to_string(),
            ));
        }

        let year = self
            .year
            .trim()
            .parse::<i32>()
            .ok()
            .filter(|year| *year != 0)
            .unwrap_or_else(|| now.year());

        let cover = self.cover_url.trim();
        let cover_url = if cover.is_empty() {
            PLACEHOLDER_COVER_URL.to_string()
        } else {
            cover.to_string()
        };

        let mut book = CatalogBook::new(format!("custom-{}", now.timestamp_millis()), title);
        book.author_name = vec![author.to_string()];
        book.first_publish_year = Some(year);
        book.cover_url = Some(cover_url);
        book.is_custom = true;
        Ok(book)
    }
}

// ─── Tests ─────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use serde_json::json;

    use super::*;

    #[test]
    fn test_parses_search_payload() {
        let payload = json!({
            "key": "OL45883W",
            "title": "Dune",
            "author_name": ["Frank Herbert"],
            "first_publish_year": 1965,
            "cover_id": 12345,
            "cover_url": "https://covers.openlibrary.org/b/id/12345-M.jpg",
            "isbn": null,
            "publisher": "Chilton Books",
            "language": "eng",
            "pages": 412
        });

        let book: CatalogBook = serde_json::from_value(payload).unwrap();
        assert_eq!(book.key, "OL45883W");
        assert_eq!(book.author_name, vec!["Frank Herbert"]);
        assert_eq!(book.first_publish_year, Some(1965));
        assert_eq!(book.publisher.as_deref(), Some("Chilton Books"));
        assert_eq!(book.pages, Some(412));
        assert!(book.isbn.is_none());
        assert!(!book.is_custom);
    }

    #[test]
    fn test_author_name_accepts_bare_string() {
        let book: CatalogBook =
            serde_json::from_value(json!({"key": "k", "title": "t", "author_name": "Solo"}))
                .unwrap();
        assert_eq!(book.author_name, vec!["Solo"]);
        assert_eq!(book.authors_display(), "Solo");
    }

    #[test]
    fn test_cover_falls_back_to_placeholder() {
        let mut book = CatalogBook::new("k", "t");
        assert_eq!(book.cover(), PLACEHOLDER_COVER_URL);
        book.cover_url = Some(String::new());
        assert_eq!(book.cover(), PLACEHOLDER_COVER_URL);
        book.cover_url = Some("https://example.org/c.jpg".to_string());
        assert_eq!(book.cover(), "https://example.org/c.jpg");
    }

    #[test]
    fn test_custom_form_defaults() {
        let now = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
        let book = CustomBookForm::new("Dune", "Frank Herbert")
            .to_catalog_book(now)
            .unwrap();

        assert_eq!(book.key, format!("custom-{}", now.timestamp_millis()));
        assert_eq!(book.title, "Dune");
        assert_eq!(book.author_name, vec!["Frank Herbert"]);
        assert_eq!(book.first_publish_year, Some(2026));
        assert_eq!(book.cover_url.as_deref(), Some(PLACEHOLDER_COVER_URL));
        assert!(book.is_custom);
    }

    #[test]
    fn test_custom_form_year_parsing() {
        let now = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
        let mut form = CustomBookForm::new("Emma", "Jane Austen");

        form.year = "1815".to_string();
        assert_eq!(form.to_catalog_book(now).unwrap().first_publish_year, Some(1815));

        form.year = "soon".to_string();
        assert_eq!(form.to_catalog_book(now).unwrap().first_publish_year, Some(2026));

        form.year = "0".to_string();
        assert_eq!(form.to_catalog_book(now).unwrap().first_publish_year, Some(2026));
    }

    #[test]
    fn test_custom_form_requires_title_and_author() {
        let now = Utc::now();
        assert!(CustomBookForm::new("", "Someone").to_catalog_book(now).is_err());
        assert!(CustomBookForm::new("Something", "   ").to_catalog_book(now).is_err());
    }
}
