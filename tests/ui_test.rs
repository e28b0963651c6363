//! UI rendering tests
//!
//! Renders the full frame into a ratatui `TestBackend` and checks what ends
//! up on screen for the catalog and player views.
//!
//! ## Test Cases
//! - catalog: loading text, cards with name and tags, search placeholder
//! - player: placeholder when nothing is selected, episode rows, durations
//! - overlays: error popup

use anistream::api::CatalogError;
use anistream::app::{App, Effect, Message};
use anistream::models::{Episode, Title};
use anistream::route::Route;
use anistream::ui;
use ratatui::{backend::TestBackend, Terminal};

fn screen(app: &App, width: u16, height: u16) -> String {
    let backend = TestBackend::new(width, height);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal.draw(|frame| ui::render(frame, app)).unwrap();

    let buffer = terminal.backend().buffer();
    let mut out = String::new();
    for y in 0..buffer.area.height {
        for x in 0..buffer.area.width {
            out.push_str(buffer[(x, y)].symbol());
        }
        out.push('\n');
    }
    out
}

fn request_id(app: &mut App) -> u64 {
    app.take_effects()
        .into_iter()
        .find_map(|e| match e {
            Effect::FetchCatalog { request_id, .. } | Effect::FetchPlayer { request_id, .. } => {
                Some(request_id)
            }
            _ => None,
        })
        .unwrap()
}

fn naruto() -> Title {
    Title {
        id: "7".into(),
        title: "Naruto".into(),
        cover_url: None,
        tags: vec!["Action".into()],
        description: Some("Hidden leaf village".into()),
    }
}

fn episode(number: &str, duration: Option<u32>) -> Episode {
    Episode {
        id: number.into(),
        number: number.into(),
        title: None,
        thumbnail_url: None,
        duration,
        stream_url: format!("http://cdn.test/{}.m3u8", number),
    }
}

// =============================================================================
// CATALOG VIEW
// =============================================================================

#[test]
fn test_catalog_loading() {
    let app = App::new();
    let out = screen(&app, 100, 30);
    assert!(out.contains("Trending"));
    assert!(out.contains("Loading..."));
    assert!(out.contains("Anime streaming"));
    assert!(out.contains("Search anime..."));
    assert!(!out.contains("Status"));
}

#[test]
fn test_catalog_card() {
    let mut app = App::new();
    app.set_columns(3);
    let id = request_id(&mut app);
    app.apply(Message::CatalogLoaded {
        request_id: id,
        result: Ok(vec![naruto()]),
    });

    let out = screen(&app, 100, 30);
    assert!(!out.contains("Loading..."));
    assert!(out.contains("Naruto"));
    assert!(out.contains("Action"));
    assert!(out.contains("No Cover"));
    assert_eq!(out.matches("Naruto").count(), 1);
}

#[test]
fn test_catalog_nameless_title_beside_named_card() {
    let mut app = App::new();
    app.set_columns(3);
    let id = request_id(&mut app);
    let titles: Vec<Title> = serde_json::from_str(
        r#"[{"id": 7, "title": "Naruto", "tags": ["Action"]}, {"id": 2, "title": null}]"#,
    )
    .unwrap();
    app.apply(Message::CatalogLoaded {
        request_id: id,
        result: Ok(titles),
    });

    assert_eq!(app.catalog.titles.len(), 2);
    let out = screen(&app, 100, 30);
    assert!(out.contains("Naruto"));
    assert!(out.contains("Action"));
    assert_eq!(out.matches("No Cover").count(), 2);
}

#[test]
fn test_catalog_empty_result() {
    let mut app = App::new();
    let id = request_id(&mut app);
    app.apply(Message::CatalogLoaded {
        request_id: id,
        result: Err(CatalogError::Server(500)),
    });

    let out = screen(&app, 100, 30);
    assert!(!out.contains("Loading..."));
    assert!(!out.contains("Error"));
}

#[test]
fn test_layout_small_and_large() {
    let mut app = App::new();
    let id = request_id(&mut app);
    app.apply(Message::CatalogLoaded {
        request_id: id,
        result: Ok(vec![naruto(); 12]),
    });

    for (width, height) in [(40, 10), (80, 24), (200, 50)] {
        app.set_columns(ui::catalog::columns_for(width - 2));
        let out = screen(&app, width, height);
        assert!(out.contains("Trending"), "{}x{}", width, height);
    }
}

// =============================================================================
// PLAYER VIEW
// =============================================================================

#[test]
fn test_player_placeholder_on_failure() {
    let mut app = App::with_route(Route::player("7"));
    let id = request_id(&mut app);
    app.apply(Message::PlayerLoaded {
        request_id: id,
        result: Err(CatalogError::NotFound),
    });

    let out = screen(&app, 120, 30);
    assert!(out.contains("No episode selected"));
    assert!(!out.contains("Hidden leaf village"));
    assert!(!out.contains("Episode 1"));
}

#[test]
fn test_player_loaded() {
    let mut app = App::with_route(Route::player("7"));
    let id = request_id(&mut app);
    app.apply(Message::PlayerLoaded {
        request_id: id,
        result: Ok((naruto(), vec![episode("1", Some(0)), episode("2", Some(45))])),
    });

    let out = screen(&app, 120, 30);
    assert!(!out.contains("No episode selected"));
    assert!(out.contains("Naruto"));
    assert!(out.contains("Hidden leaf village"));
    assert!(out.contains("Episodes"));
    assert!(out.contains("(2)"));
    assert!(out.contains("0 min"));
    assert!(out.contains("45 min"));
    assert!(out.contains("http://cdn.test/1.m3u8"));
}

#[test]
fn test_player_without_duration() {
    let mut app = App::with_route(Route::player("7"));
    let id = request_id(&mut app);
    app.apply(Message::PlayerLoaded {
        request_id: id,
        result: Ok((naruto(), vec![episode("1", None)])),
    });

    let out = screen(&app, 120, 30);
    assert!(out.contains("Episode 1"));
    assert!(!out.contains(" min"));
}

// =============================================================================
// OVERLAYS
// =============================================================================

#[test]
fn test_error_popup() {
    let mut app = App::new();
    app.apply(Message::PlaybackFailed("mpv not found".into()));
    let out = screen(&app, 100, 30);
    assert!(out.contains("mpv not found"));
}
