//! Loader tests
//!
//! Runs app effects against a mock backend and checks which messages come
//! back: superseded and cancelled fetches must stay silent.

use std::time::Duration;

use anistream::api::CatalogClient;
use anistream::app::{App, Effect, Message};
use anistream::loader::Loader;
use anistream::route::Route;
use anistream::stream::PlayerType;
use mockito::{Matcher, Server};
use tokio::time::timeout;

const WAIT: Duration = Duration::from_secs(5);
const QUIET: Duration = Duration::from_millis(300);

async fn catalog_server() -> mockito::ServerGuard {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/api/anime")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"[{"id": 7, "title": "Naruto", "tags": ["Action"]}]"#)
        .create_async()
        .await;
    server
}

#[tokio::test]
async fn test_fetch_catalog_reports_result() {
    let server = catalog_server().await;
    let (mut loader, mut rx) = Loader::new(CatalogClient::with_base_url(server.url()), PlayerType::Mpv);

    loader.run(Effect::FetchCatalog {
        request_id: 1,
        query: "naruto".into(),
    });

    let message = timeout(WAIT, rx.recv()).await.unwrap().unwrap();
    match message {
        Message::CatalogLoaded { request_id, result } => {
            assert_eq!(request_id, 1);
            let titles = tokio_test::assert_ok!(result);
            assert_eq!(titles[0].title, "Naruto");
        }
        other => panic!("unexpected message: {:?}", other),
    }
}

#[tokio::test]
async fn test_superseded_fetch_is_silent() {
    let server = catalog_server().await;
    let (mut loader, mut rx) = Loader::new(CatalogClient::with_base_url(server.url()), PlayerType::Mpv);

    loader.run_all(vec![
        Effect::FetchCatalog { request_id: 1, query: "n".into() },
        Effect::FetchCatalog { request_id: 2, query: "na".into() },
    ]);

    let message = timeout(WAIT, rx.recv()).await.unwrap().unwrap();
    assert!(matches!(message, Message::CatalogLoaded { request_id: 2, .. }));
    assert!(timeout(QUIET, rx.recv()).await.is_err());
}

#[tokio::test]
async fn test_cancel_catalog_is_silent() {
    let server = catalog_server().await;
    let (mut loader, mut rx) = Loader::new(CatalogClient::with_base_url(server.url()), PlayerType::Mpv);

    loader.run_all(vec![
        Effect::FetchCatalog { request_id: 1, query: String::new() },
        Effect::CancelCatalog,
    ]);

    assert!(timeout(QUIET, rx.recv()).await.is_err());
}

#[tokio::test]
async fn test_fetch_player_reports_pair() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/api/anime/7")
        .with_status(200)
        .with_body(r#"{"id": "7", "title": "Naruto"}"#)
        .create_async()
        .await;
    server
        .mock("GET", "/api/anime/7/episodes")
        .with_status(200)
        .with_body(r#"[{"id": "a", "number": 1, "stream_url": "http://cdn.test/1.m3u8"}]"#)
        .create_async()
        .await;

    let (mut loader, mut rx) = Loader::new(CatalogClient::with_base_url(server.url()), PlayerType::Mpv);
    loader.run(Effect::FetchPlayer {
        request_id: 3,
        anime_id: "7".into(),
    });

    match timeout(WAIT, rx.recv()).await.unwrap().unwrap() {
        Message::PlayerLoaded { request_id, result } => {
            assert_eq!(request_id, 3);
            let (title, episodes) = tokio_test::assert_ok!(result);
            assert_eq!(title.title, "Naruto");
            assert_eq!(episodes.len(), 1);
        }
        other => panic!("unexpected message: {:?}", other),
    }
}

#[tokio::test]
async fn test_play_without_stream_fails() {
    let (mut loader, mut rx) = Loader::new(CatalogClient::new(), PlayerType::Mpv);
    loader.run(Effect::Play {
        stream_url: String::new(),
        label: "Naruto - Episode 1".into(),
    });

    match timeout(WAIT, rx.recv()).await.unwrap().unwrap() {
        Message::PlaybackFailed(msg) => assert!(msg.contains("no stream")),
        other => panic!("unexpected message: {:?}", other),
    }
}

#[tokio::test]
async fn test_app_and_loader_end_to_end() {
    let mut server = catalog_server().await;
    server
        .mock("GET", "/api/anime/7")
        .with_status(500)
        .create_async()
        .await;
    server
        .mock("GET", "/api/anime/7/episodes")
        .with_status(200)
        .with_body("[]")
        .create_async()
        .await;

    let (mut loader, mut rx) = Loader::new(CatalogClient::with_base_url(server.url()), PlayerType::Mpv);
    let mut app = App::new();

    loader.run_all(app.take_effects());
    let message = timeout(WAIT, rx.recv()).await.unwrap().unwrap();
    app.apply(message);
    assert_eq!(app.catalog.titles.len(), 1);

    app.navigate(Route::player("7"));
    loader.run_all(app.take_effects());
    let message = timeout(WAIT, rx.recv()).await.unwrap().unwrap();
    app.apply(message);

    assert!(!app.player.loading);
    assert!(app.player.title.is_none());
    assert!(app.player.current().is_none());
}
