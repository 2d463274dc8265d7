use std::sync::Arc;

use chrono::{Datelike, Utc};
use mockito::{Matcher, Server, ServerGuard};
use serde_json::json;

use readtrack_core::models::PLACEHOLDER_COVER_URL;
use readtrack_core::state::{MSG_FORM_INCOMPLETE, MSG_SAVED, MSG_UPDATE_FAILED};
use readtrack_core::{
    CustomBookForm, EntryId, HttpLibraryService, LibraryClient, LibraryState, ReadingStatus,
    ServiceConfig, SortKey, StatusFilter,
};

fn client_for(server: &ServerGuard) -> LibraryClient {
    let config = ServiceConfig {
        base_url: server.url(),
        ..Default::default()
    };
    let service = HttpLibraryService::new(&config).unwrap();
    LibraryClient::new(Arc::new(service), LibraryState::default())
}

const LIBRARY: &str = r#"[
    {"id": 1, "key": "OL1W", "title": "Dune", "author_name": ["Frank Herbert"],
     "first_publish_year": 1965, "rating": 5, "status": "reading", "progress": 40,
     "saved_at": "2024-01-10T08:00:00.000000"},
    {"_id": "2", "key": "OL2W", "title": "Emma", "author_name": ["Jane Austen"],
     "first_publish_year": 1815, "rating": 3, "status": "completed", "progress": 100,
     "saved_at": "2024-02-10T08:00:00.000000"},
    {"id": 3, "key": "OL3W", "title": "Hyperion", "author_name": ["Dan Simmons"],
     "rating": 0, "status": "want-to-read", "progress": 0}
]"#;

async fn mock_stats(server: &mut ServerGuard, total: u32) -> mockito::Mock {
    server
        .mock("GET", "/api/books/stats")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({"total_books": total, "completed": 1, "reading": 1, "want_to_read": 1,
                          "average_rating": 4.0, "completion_rate": 33.3}).to_string())
        .create_async()
        .await
}

async fn loaded_client(server: &mut ServerGuard) -> LibraryClient {
    let _books = server
        .mock("GET", "/api/books")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(LIBRARY)
        .create_async()
        .await;
    let _stats = mock_stats(server, 3).await;

    let mut client = client_for(server);
    client.load().await;
    client
}

#[tokio::test]
async fn load_reads_library_and_stats() {
    let mut server = Server::new_async().await;
    let client = loaded_client(&mut server).await;

    assert_eq!(client.state().entries.len(), 3);
    assert_eq!(client.state().stats.total_books, 3);
    assert_eq!(client.state().entries[1].id, EntryId::from(2));
    assert!(client.is_book_saved("OL1W"));
    assert!(!client.is_book_saved("OL9W"));
    assert!(client.state().toast().is_none());
}

#[tokio::test]
async fn filter_and_sort_over_loaded_library() {
    let mut server = Server::new_async().await;
    let mut client = loaded_client(&mut server).await;

    client.state_mut().view.sort_key = SortKey::Rating;
    let ratings: Vec<u8> = client.filtered_books().iter().map(|e| e.rating).collect();
    assert_eq!(ratings, vec![5, 3, 0]);

    client.state_mut().view.status_filter = StatusFilter::Completed;
    let view = client.filtered_books();
    assert_eq!(view.len(), 1);
    assert_eq!(view[0].book.title, "Emma");

    client.state_mut().view.status_filter = StatusFilter::All;
    client.state_mut().view.sort_key = SortKey::Recent;
    let titles: Vec<&str> = client.filtered_books().iter().map(|e| e.book.title.as_str()).collect();
    assert_eq!(titles, vec!["Emma", "Dune", "Hyperion"]);
}

#[tokio::test]
async fn custom_book_is_saved_with_defaults() {
    let mut server = Server::new_async().await;
    let year = Utc::now().year();
    let create = server
        .mock("POST", "/api/books")
        .match_body(Matcher::PartialJson(json!({
            "title": "Dune",
            "author_name": ["Frank Herbert"],
            "first_publish_year": year,
            "cover_url": PLACEHOLDER_COVER_URL,
            "is_custom": true,
            "rating": 0,
            "status": "want-to-read",
            "progress": 0,
            "notes": "",
            "categories": []
        })))
        .with_status(201)
        .with_header("content-type", "application/json")
        .with_body(r#"{"message": "Book saved successfully", "id": 11}"#)
        .create_async()
        .await;
    let stats = mock_stats(&mut server, 1).await;

    let mut client = client_for(&server);
    let form = CustomBookForm::new("Dune", "Frank Herbert");
    assert!(client.add_custom_book(&form).await);
    create.assert_async().await;
    stats.assert_async().await;

    let entry = &client.state().entries[0];
    assert_eq!(entry.id, EntryId::from(11));
    assert!(entry.book.is_custom);
    assert!(entry.book.key.starts_with("custom-"));
    assert_eq!(entry.book.first_publish_year, Some(year));
    assert_eq!(entry.book.cover(), PLACEHOLDER_COVER_URL);
    assert_eq!(entry.status, ReadingStatus::WantToRead);
    assert_eq!(entry.progress, 0);
    assert_eq!(entry.rating, 0);
    assert_eq!(client.state().toast().unwrap().message, MSG_SAVED);
    assert_eq!(client.state().stats.total_books, 1);
}

#[tokio::test]
async fn incomplete_custom_book_sends_nothing() {
    let mut server = Server::new_async().await;
    let create = server
        .mock("POST", "/api/books")
        .expect(0)
        .create_async()
        .await;

    let mut client = client_for(&server);
    assert!(!client.add_custom_book(&CustomBookForm::new("", "Frank Herbert")).await);
    create.assert_async().await;
    assert_eq!(client.state().toast().unwrap().message, MSG_FORM_INCOMPLETE);
    assert!(client.state().entries.is_empty());
}

#[tokio::test]
async fn status_change_to_reading_is_announced() {
    let mut server = Server::new_async().await;
    let mut client = loaded_client(&mut server).await;
    let update = server
        .mock("PUT", "/api/books/3")
        .match_body(Matcher::Json(json!({"status": "reading"})))
        .with_status(200)
        .with_body(r#"{"message": "Book updated successfully"}"#)
        .create_async()
        .await;

    let id = EntryId::from(3);
    assert!(client.update_status(&id, ReadingStatus::Reading).await);
    update.assert_async().await;

    let entry = client.state().entry(&id).unwrap();
    assert_eq!(entry.status, ReadingStatus::Reading);
    assert!(entry.shows_progress());
    assert!(entry.updated_at.is_some());
    assert_eq!(client.state().toast().unwrap().message, "📖 Started reading");
}

#[tokio::test]
async fn progress_is_persisted_without_toast() {
    let mut server = Server::new_async().await;
    let mut client = loaded_client(&mut server).await;
    let update = server
        .mock("PUT", "/api/books/1")
        .match_body(Matcher::Json(json!({"progress": 55})))
        .with_status(200)
        .create_async()
        .await;

    let id = EntryId::from(1);
    assert!(client.update_progress(&id, 55).await);
    update.assert_async().await;
    assert_eq!(client.state().entry(&id).unwrap().progress, 55);
    assert!(client.state().toast().is_none());
}

#[tokio::test]
async fn rating_is_clamped_and_announced() {
    let mut server = Server::new_async().await;
    let mut client = loaded_client(&mut server).await;
    let update = server
        .mock("PUT", "/api/books/2")
        .match_body(Matcher::Json(json!({"rating": 5})))
        .with_status(200)
        .create_async()
        .await;

    let id = EntryId::from(2);
    assert!(client.update_rating(&id, 8).await);
    update.assert_async().await;
    assert_eq!(client.state().entry(&id).unwrap().rating, 5);
    assert_eq!(client.state().toast().unwrap().message, "⭐ Rated 5 stars!");
}

#[tokio::test]
async fn failed_update_is_not_applied() {
    let mut server = Server::new_async().await;
    let mut client = loaded_client(&mut server).await;
    let _update = server
        .mock("PUT", "/api/books/1")
        .with_status(404)
        .with_body(r#"{"error": "Book not found"}"#)
        .create_async()
        .await;

    let id = EntryId::from(1);
    assert!(!client.update_status(&id, ReadingStatus::Completed).await);
    assert_eq!(client.state().entry(&id).unwrap().status, ReadingStatus::Reading);
    assert_eq!(client.state().toast().unwrap().message, MSG_UPDATE_FAILED);
}

#[tokio::test]
async fn delete_without_confirmation_sends_nothing() {
    let mut server = Server::new_async().await;
    let mut client = loaded_client(&mut server).await;
    let delete = server
        .mock("DELETE", Matcher::Regex(r"^/api/books/.*$".to_string()))
        .expect(0)
        .create_async()
        .await;

    assert!(!client.delete_book().await);

    client.confirm_delete(EntryId::from(1));
    client.cancel_delete();
    assert!(!client.delete_book().await);

    delete.assert_async().await;
    assert_eq!(client.state().entries.len(), 3);
}

#[tokio::test]
async fn confirmed_delete_removes_entry() {
    let mut server = Server::new_async().await;
    let mut client = loaded_client(&mut server).await;
    let delete = server
        .mock("DELETE", "/api/books/2")
        .with_status(200)
        .with_body(r#"{"message": "Book deleted successfully"}"#)
        .create_async()
        .await;

    client.confirm_delete(EntryId::from(2));
    assert!(client.delete_book().await);
    delete.assert_async().await;

    assert_eq!(client.state().entries.len(), 2);
    assert!(!client.is_book_saved("OL2W"));
    assert!(client.state().pending_delete().is_none());
}

#[tokio::test]
async fn search_then_clear() {
    let mut server = Server::new_async().await;
    let _search = server
        .mock("GET", "/api/books/search")
        .match_query(Matcher::UrlEncoded("q".into(), "dune".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"[{"key": "OL1W", "title": "Dune", "author_name": ["Frank Herbert"]},
                       {"key": "OL5W", "title": "Children of Dune", "author_name": "Frank Herbert"}]"#)
        .create_async()
        .await;

    let mut client = client_for(&server);
    client.search_books("dune").await;
    assert_eq!(client.state().search.results.len(), 2);
    assert_eq!(client.state().search.results[1].first_author(), "Frank Herbert");
    assert!(client.state().search.error.is_none());

    client.clear_search();
    assert!(client.state().search.results.is_empty());
    assert!(client.state().search.query.is_empty());
}
