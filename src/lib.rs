//! anistream - browse and watch anime from your terminal
//!
//! A keyboard-driven client for an anime catalog backend: a searchable grid
//! of titles and a player view with an episode sidebar.
//!
//! # Modules
//!
//! - `models` - Titles, episodes and the current-episode selection
//! - `api` - Catalog backend client
//! - `route` - `/` and `/anime/{id}?ep=N` routes
//! - `app` - Application state, navigation and key handling
//! - `loader` - Runs fetches and playback in the background
//! - `stream` - Local player (mpv, VLC)
//! - `ui` - TUI components
//! - `cli`, `config`, `logging` - Process surface

pub mod models;
pub mod api;
pub mod route;
pub mod app;
pub mod loader;
pub mod stream;
pub mod ui;
pub mod cli;
pub mod config;
pub mod logging;

// Re-export commonly used types
pub use models::{format_minutes, select_current, Episode, Title, BRAND};
pub use api::{CatalogClient, CatalogError};
pub use route::Route;
pub use app::{App, Effect, Message};
pub use loader::Loader;
pub use config::Config;
