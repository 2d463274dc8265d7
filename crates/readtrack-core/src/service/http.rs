use async_trait::async_trait;
use reqwest::{Response, StatusCode, Url};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::config::ServiceConfig;
use crate::error::{Result, TrackerError};
use crate::models::{CatalogBook, EntryId, EntryUpdate, LibraryEntry, LibraryStats, NewEntry};
use crate::service::{CreatedEntry, HealthReport, LibraryExport, LibraryService};

// ─── HttpLibraryService ─────────────────────────────────────

/// `LibraryService` over the service's JSON REST API.
///
/// Build one per process and share it; the underlying connection pool is
/// reused across calls.
pub struct HttpLibraryService {
    client: reqwest::Client,
    base_url: Url,
}

#[derive(Deserialize)]
struct CreateReply {
    #[serde(default)]
    id: Option<EntryId>,
    #[serde(default)]
    message: String,
}

impl HttpLibraryService {
    pub fn new(config: &ServiceConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder().user_agent(config.user_agent.as_str());
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self {
            client,
            base_url: parse_base_url(&config.base_url)?,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        {
            let mut segs = url.path_segments_mut().map_err(|_| TrackerError::InvalidUrl {
                url: self.base_url.to_string(),
                reason: "cannot be a base".to_string(),
            })?;
            segs.pop_if_empty();
            segs.extend(segments);
        }
        Ok(url)
    }

    fn entry_endpoint(&self, id: &EntryId) -> Result<Url> {
        self.endpoint(&["api", "books", id.as_str()])
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        tracing::debug!(%url, "GET");
        let resp = self.client.get(url).send().await?;
        read_json(ensure_success(resp).await?).await
    }
}

#[async_trait]
impl LibraryService for HttpLibraryService {
    async fn list_books(&self) -> Result<Vec<LibraryEntry>> {
        self.get_json(self.endpoint(&["api", "books"])?).await
    }

    async fn stats(&self) -> Result<LibraryStats> {
        self.get_json(self.endpoint(&["api", "books", "stats"])?).await
    }

    async fn search(&self, query: &str) -> Result<Vec<CatalogBook>> {
        let mut url = self.endpoint(&["api", "books", "search"])?;
        url.query_pairs_mut().append_pair("q", query);
        self.get_json(url).await
    }

    async fn create(&self, entry: &NewEntry) -> Result<CreatedEntry> {
        let url = self.endpoint(&["api", "books"])?;
        tracing::debug!(%url, key = %entry.book.key, "POST");

        let resp = self.client.post(url).json(entry).send().await?;
        let resp = ensure_success(resp).await?;
        if !matches!(resp.status(), StatusCode::OK | StatusCode::CREATED) {
            return Err(unexpected_status(resp.status()));
        }

        let reply: CreateReply = read_json(resp).await?;
        match reply.id {
            Some(id) => Ok(CreatedEntry {
                id,
                message: reply.message,
            }),
            None => Err(TrackerError::MissingId),
        }
    }

    async fn update(&self, id: &EntryId, update: &EntryUpdate) -> Result<()> {
        let url = self.entry_endpoint(id)?;
        tracing::debug!(%url, "PUT");

        let resp = self.client.put(url).json(update).send().await?;
        let resp = ensure_success(resp).await?;
        if resp.status() != StatusCode::OK {
            return Err(unexpected_status(resp.status()));
        }
        Ok(())
    }

    async fn delete(&self, id: &EntryId) -> Result<()> {
        let url = self.entry_endpoint(id)?;
        tracing::debug!(%url, "DELETE");

        let resp = self.client.delete(url).send().await?;
        ensure_success(resp).await?;
        Ok(())
    }

    async fn health(&self) -> Result<HealthReport> {
        self.get_json(self.endpoint(&["api", "health"])?).await
    }

    async fn export(&self) -> Result<LibraryExport> {
        self.get_json(self.endpoint(&["api", "books", "export"])?).await
    }
}

// ─── Helpers ────────────────────────────────────────────────

fn parse_base_url(base_url: &str) -> Result<Url> {
    Url::parse(base_url.trim()).map_err(|e| TrackerError::InvalidUrl {
        url: base_url.to_string(),
        reason: e.to_string(),
    })
}

/// Turn non-2xx replies into `TrackerError::Api`, surfacing the service's
/// `{"error": …}` message when there is one.
async fn ensure_success(resp: Response) -> Result<Response> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }

    let body = resp.text().await.unwrap_or_default();
    let message = serde_json::from_str::<Value>(&body)
        .ok()
        .and_then(|v| v.get("error").and_then(Value::as_str).map(ToOwned::to_owned))
        .unwrap_or_else(|| body.trim().to_string());

    Err(TrackerError::Api {
        status: status.as_u16(),
        message,
    })
}

async fn read_json<T: DeserializeOwned>(resp: Response) -> Result<T> {
    let text = resp.text().await?;
    serde_json::from_str(&text).map_err(|e| TrackerError::Parse(e.to_string()))
}

fn unexpected_status(status: StatusCode) -> TrackerError {
    TrackerError::Api {
        status: status.as_u16(),
        message: "unexpected status".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use mockito::{Matcher, Server};
    use serde_json::json;

    use super::*;
    use crate::models::ReadingStatus;

    fn service_for(server: &Server) -> HttpLibraryService {
        let config = ServiceConfig {
            base_url: server.url(),
            ..Default::default()
        };
        HttpLibraryService::new(&config).unwrap()
    }

    #[test]
    fn test_endpoint_joins_segments() {
        let config = ServiceConfig {
            base_url: "http://localhost:5000/".to_string(),
            ..Default::default()
        };
        let service = HttpLibraryService::new(&config).unwrap();
        let url = service.endpoint(&["api", "books", "stats"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:5000/api/books/stats");

        let url = service.entry_endpoint(&EntryId::from(12)).unwrap();
        assert_eq!(url.as_str(), "http://localhost:5000/api/books/12");
    }

    #[test]
    fn test_rejects_unparsable_base_url() {
        let config = ServiceConfig {
            base_url: "not a url".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            HttpLibraryService::new(&config),
            Err(TrackerError::InvalidUrl { .. })
        ));
    }

    #[tokio::test]
    async fn test_search_encodes_query() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/api/books/search")
            .match_query(Matcher::UrlEncoded("q".into(), "dune messiah".into()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"[{"key": "OL1W", "title": "Dune Messiah", "author_name": ["Frank Herbert"], "first_publish_year": 1969}]"#)
            .create_async()
            .await;

        let results = service_for(&server).search("dune messiah").await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].title, "Dune Messiah");
        assert_eq!(results[0].first_publish_year, Some(1969));
    }

    #[tokio::test]
    async fn test_create_posts_defaults_and_returns_id() {
        let mut server = Server::new_async().await;
        let m = server
            .mock("POST", "/api/books")
            .match_body(Matcher::PartialJson(json!({
                "key": "OL1W",
                "rating": 0,
                "status": "want-to-read",
                "progress": 0
            })))
            .with_status(201)
            .with_body(r#"{"message": "saved", "id": 9}"#)
            .create_async()
            .await;

        let entry = NewEntry::from_book(CatalogBook::new("OL1W", "Dune"));
        let created = service_for(&server).create(&entry).await.unwrap();
        assert_eq!(created.id, EntryId::from(9));
        m.assert_async().await;
    }

    #[tokio::test]
    async fn test_create_without_id_is_an_error() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("POST", "/api/books")
            .with_status(201)
            .with_body(r#"{"message": "saved"}"#)
            .create_async()
            .await;

        let entry = NewEntry::from_book(CatalogBook::new("OL1W", "Dune"));
        let err = service_for(&server).create(&entry).await.unwrap_err();
        assert!(matches!(err, TrackerError::MissingId));
    }

    #[tokio::test]
    async fn test_update_sends_partial_body() {
        let mut server = Server::new_async().await;
        let m = server
            .mock("PUT", "/api/books/3")
            .match_body(Matcher::Json(json!({"status": "reading"})))
            .with_status(200)
            .with_body(r#"{"message": "updated"}"#)
            .create_async()
            .await;

        service_for(&server)
            .update(&EntryId::from(3), &EntryUpdate::status(ReadingStatus::Reading))
            .await
            .unwrap();
        m.assert_async().await;
    }

    #[tokio::test]
    async fn test_error_body_is_surfaced() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("DELETE", "/api/books/404")
            .with_status(404)
            .with_body(r#"{"error": "Book not found"}"#)
            .create_async()
            .await;

        let err = service_for(&server)
            .delete(&EntryId::from(404))
            .await
            .unwrap_err();
        match err {
            TrackerError::Api { status, message } => {
                assert_eq!(status, 404);
                assert_eq!(message, "Book not found");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_delete_accepts_any_success_status() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("DELETE", "/api/books/5")
            .with_status(204)
            .create_async()
            .await;

        assert!(service_for(&server).delete(&EntryId::from(5)).await.is_ok());
    }

    #[tokio::test]
    async fn test_health_report() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/api/health")
            .with_status(200)
            .with_body(r#"{"status": "healthy", "timestamp": "2024-06-01T09:00:00.5", "database": "JSON file", "books_count": 3}"#)
            .create_async()
            .await;

        let report = service_for(&server).health().await.unwrap();
        assert!(report.is_healthy());
        assert_eq!(report.books_count, 3);
        assert!(report.timestamp.is_some());
    }
}
