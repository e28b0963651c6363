//! Catalog backend client tests
//!
//! Tests listing, search, detail + episodes, and error handling against a
//! mock HTTP server.

use anistream::api::{CatalogClient, CatalogError};
use mockito::{Matcher, Server};

const NARUTO: &str = r#"{
    "id": 7,
    "title": "Naruto",
    "cover_url": "http://img.test/naruto.jpg",
    "tags": ["Action"],
    "description": "A ninja story"
}"#;

const EPISODES: &str = r#"[
    {"id": "e1", "number": 1, "title": "Enter", "thumbnail_url": null, "duration": 24, "stream_url": "http://cdn.test/1.m3u8"},
    {"id": "e2", "number": "2", "duration": 0, "stream_url": "http://cdn.test/2.m3u8"}
]"#;

// =============================================================================
// List Tests
// =============================================================================

#[tokio::test]
async fn test_list_parses_titles() {
    let mut server = Server::new_async().await;

    let mock = server
        .mock("GET", "/api/anime")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(format!("[{}, {{\"id\": \"8\", \"title\": \"Bleach\", \"tags\": null}}]", NARUTO))
        .create_async()
        .await;

    let client = CatalogClient::with_base_url(server.url());
    let titles = client.list_titles("").await.unwrap();

    mock.assert_async().await;

    assert_eq!(titles.len(), 2);
    assert_eq!(titles[0].id, "7");
    assert_eq!(titles[0].title, "Naruto");
    assert_eq!(titles[0].cover_url.as_deref(), Some("http://img.test/naruto.jpg"));
    assert_eq!(titles[0].tags, vec!["Action"]);
    assert_eq!(titles[1].id, "8");
    assert!(titles[1].tags.is_empty());
    assert!(titles[1].cover_url.is_none());
}

#[tokio::test]
async fn test_nameless_title_keeps_the_list() {
    let mut server = Server::new_async().await;

    server
        .mock("GET", "/api/anime")
        .with_status(200)
        .with_body(r#"[{"id": 1, "title": "Naruto", "tags": ["Action"]}, {"id": 2, "title": null}]"#)
        .create_async()
        .await;

    let client = CatalogClient::with_base_url(server.url());
    let titles = tokio_test::assert_ok!(client.list_titles("").await);

    assert_eq!(titles.len(), 2);
    assert_eq!(titles[0].title, "Naruto");
    assert_eq!(titles[0].tags, vec!["Action"]);
    assert_eq!(titles[1].id, "2");
    assert!(titles[1].title.is_empty());
}

#[tokio::test]
async fn test_search_sends_encoded_query() {
    let mut server = Server::new_async().await;

    let mock = server
        .mock("GET", "/api/anime")
        .match_query(Matcher::UrlEncoded("q".into(), "one piece & co".into()))
        .with_status(200)
        .with_body("[]")
        .create_async()
        .await;

    let client = CatalogClient::with_base_url(server.url());
    let titles = client.list_titles("one piece & co").await.unwrap();

    mock.assert_async().await;
    assert!(titles.is_empty());
}

#[tokio::test]
async fn test_empty_query_omits_q() {
    let mut server = Server::new_async().await;

    let mock = server
        .mock("GET", "/api/anime")
        .match_query(Matcher::Missing)
        .with_status(200)
        .with_body("[]")
        .create_async()
        .await;

    let client = CatalogClient::with_base_url(server.url());
    tokio_test::assert_ok!(client.list_titles("").await);
    mock.assert_async().await;
}

// =============================================================================
// Detail Tests
// =============================================================================

#[tokio::test]
async fn test_title_with_episodes() {
    let mut server = Server::new_async().await;

    let title_mock = server
        .mock("GET", "/api/anime/7")
        .with_status(200)
        .with_body(NARUTO)
        .create_async()
        .await;
    let episodes_mock = server
        .mock("GET", "/api/anime/7/episodes")
        .with_status(200)
        .with_body(EPISODES)
        .create_async()
        .await;

    let client = CatalogClient::with_base_url(server.url());
    let (title, episodes) = client.title_with_episodes("7").await.unwrap();

    title_mock.assert_async().await;
    episodes_mock.assert_async().await;

    assert_eq!(title.title, "Naruto");
    assert_eq!(episodes.len(), 2);
    assert_eq!(episodes[0].number, "1");
    assert_eq!(episodes[0].duration, Some(24));
    assert_eq!(episodes[1].number, "2");
    assert_eq!(episodes[1].duration, Some(0));
    assert!(episodes[1].title.is_none());
}

#[tokio::test]
async fn test_title_id_is_path_encoded() {
    let mut server = Server::new_async().await;

    let mock = server
        .mock("GET", "/api/anime/a%2Fb")
        .with_status(200)
        .with_body(r#"{"id": "a/b", "title": "Slash"}"#)
        .create_async()
        .await;

    let client = CatalogClient::with_base_url(server.url());
    let title = client.title("a/b").await.unwrap();

    mock.assert_async().await;
    assert_eq!(title.id, "a/b");
}

// =============================================================================
// Error Tests
// =============================================================================

#[tokio::test]
async fn test_not_found() {
    let mut server = Server::new_async().await;

    server
        .mock("GET", "/api/anime/404")
        .with_status(404)
        .create_async()
        .await;

    let client = CatalogClient::with_base_url(server.url());
    let result = client.title("404").await;
    assert!(matches!(result, Err(CatalogError::NotFound)));
}

#[tokio::test]
async fn test_server_error_is_failure() {
    let mut server = Server::new_async().await;

    server
        .mock("GET", "/api/anime")
        .with_status(500)
        .with_body(r#"{"detail": "boom"}"#)
        .create_async()
        .await;

    let client = CatalogClient::with_base_url(server.url());
    let result = client.list_titles("").await;
    assert!(matches!(result, Err(CatalogError::Server(500))));
}

#[tokio::test]
async fn test_malformed_json() {
    let mut server = Server::new_async().await;

    server
        .mock("GET", "/api/anime")
        .with_status(200)
        .with_body("not json")
        .create_async()
        .await;

    let client = CatalogClient::with_base_url(server.url());
    let result = client.list_titles("").await;
    assert!(matches!(result, Err(CatalogError::InvalidResponse(_))));
}

#[tokio::test]
async fn test_either_half_failing_fails_the_pair() {
    let mut server = Server::new_async().await;

    server
        .mock("GET", "/api/anime/7")
        .with_status(200)
        .with_body(NARUTO)
        .create_async()
        .await;
    server
        .mock("GET", "/api/anime/7/episodes")
        .with_status(503)
        .create_async()
        .await;

    let client = CatalogClient::with_base_url(server.url());
    let result = client.title_with_episodes("7").await;
    assert!(matches!(result, Err(CatalogError::Server(503))));
}

#[tokio::test]
async fn test_unreachable_backend() {
    // Nothing listens on port 9 locally
    let client = CatalogClient::with_base_url("http://127.0.0.1:9");
    let result = client.list_titles("").await;
    assert!(matches!(result, Err(CatalogError::Request(_))));
}
