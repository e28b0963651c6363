//! App state and core application logic
//!
//! Manages the current route, the per-view state of the catalog and player
//! views, and keyboard handling. Network work never happens here: the app
//! queues [`Effect`]s for the loader to run and receives the outcomes back
//! as [`Message`]s.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::{debug, info, warn};

use crate::api::CatalogResult;
use crate::models::{select_current, Episode, Title, BRAND};
use crate::route::Route;

// =============================================================================
// Effects and Messages
// =============================================================================

/// Side effects requested by the app, executed by the loader
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Fetch the catalog list (superseding any catalog fetch in flight)
    FetchCatalog { request_id: u64, query: String },
    /// Fetch a title and its episodes (superseding any player fetch in flight)
    FetchPlayer { request_id: u64, anime_id: String },
    /// Abort the outstanding catalog fetch
    CancelCatalog,
    /// Abort the outstanding player fetch
    CancelPlayer,
    /// Hand an episode to the local player
    Play { stream_url: String, label: String },
}

/// Results delivered back to the app
#[derive(Debug)]
pub enum Message {
    CatalogLoaded {
        request_id: u64,
        result: CatalogResult<Vec<Title>>,
    },
    PlayerLoaded {
        request_id: u64,
        result: CatalogResult<(Title, Vec<Episode>)>,
    },
    PlaybackStarted {
        player: String,
    },
    PlaybackFailed(String),
}

// =============================================================================
// Input Mode
// =============================================================================

/// Current input mode for keyboard handling
#[derive(Debug, Clone, PartialEq, Default)]
pub enum InputMode {
    /// Normal navigation mode
    #[default]
    Normal,
    /// Text input mode (search box focused)
    Editing,
}

// =============================================================================
// Search Input
// =============================================================================

/// Search box contents. The cursor counts characters, not bytes.
#[derive(Debug, Clone, Default)]
pub struct SearchInput {
    pub query: String,
    pub cursor: usize,
}

impl SearchInput {
    fn byte_index(&self, cursor: usize) -> usize {
        self.query
            .char_indices()
            .nth(cursor)
            .map(|(i, _)| i)
            .unwrap_or(self.query.len())
    }

    fn char_len(&self) -> usize {
        self.query.chars().count()
    }

    /// Insert character at cursor
    pub fn insert(&mut self, c: char) {
        let idx = self.byte_index(self.cursor);
        self.query.insert(idx, c);
        self.cursor += 1;
    }

    /// Delete character before cursor, returns whether the query changed
    pub fn backspace(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        let idx = self.byte_index(self.cursor);
        self.query.remove(idx);
        true
    }

    /// Delete character at cursor, returns whether the query changed
    pub fn delete(&mut self) -> bool {
        if self.cursor >= self.char_len() {
            return false;
        }
        let idx = self.byte_index(self.cursor);
        self.query.remove(idx);
        true
    }

    pub fn cursor_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn cursor_right(&mut self) {
        if self.cursor < self.char_len() {
            self.cursor += 1;
        }
    }

    pub fn cursor_home(&mut self) {
        self.cursor = 0;
    }

    pub fn cursor_end(&mut self) {
        self.cursor = self.char_len();
    }

    /// Query split around the cursor, for rendering
    pub fn split_at_cursor(&self) -> (&str, &str) {
        self.query.split_at(self.byte_index(self.cursor))
    }
}

// =============================================================================
// Selection State
// =============================================================================

/// Selection state for lists and grids
#[derive(Debug, Clone, Default)]
pub struct ListState {
    /// Currently selected index
    pub selected: usize,
    /// Total number of items
    pub len: usize,
}

impl ListState {
    pub fn new(len: usize) -> Self {
        Self { selected: 0, len }
    }

    /// Move selection back by `step`, stopping at the first item
    pub fn back(&mut self, step: usize) {
        if self.selected >= step {
            self.selected -= step;
        }
    }

    /// Move selection forward by `step`, staying on the last item
    pub fn forward(&mut self, step: usize) {
        if self.selected + step < self.len {
            self.selected += step;
        }
    }

    pub fn up(&mut self) {
        self.back(1);
    }

    pub fn down(&mut self) {
        self.forward(1);
    }

    pub fn first(&mut self) {
        self.selected = 0;
    }

    pub fn last(&mut self) {
        self.selected = self.len.saturating_sub(1);
    }

    /// Update length, clamping the selection
    pub fn set_len(&mut self, len: usize) {
        self.len = len;
        if len == 0 {
            self.selected = 0;
        } else if self.selected >= len {
            self.selected = len - 1;
        }
    }
}

// =============================================================================
// View State
// =============================================================================

/// Catalog view state
#[derive(Debug, Clone)]
pub struct CatalogState {
    pub search: SearchInput,
    /// Titles from the latest applied response
    pub titles: Vec<Title>,
    /// A request is in flight
    pub loading: bool,
    /// Id of the request whose response may be applied
    pub request_id: u64,
    /// Card selection
    pub grid: ListState,
    /// Cards per row, set from the terminal width
    pub columns: usize,
}

impl Default for CatalogState {
    fn default() -> Self {
        Self {
            search: SearchInput::default(),
            titles: Vec::new(),
            loading: true,
            request_id: 0,
            grid: ListState::default(),
            columns: 1,
        }
    }
}

impl CatalogState {
    pub fn selected_title(&self) -> Option<&Title> {
        self.titles.get(self.grid.selected)
    }
}

/// Player view state
#[derive(Debug, Clone, Default)]
pub struct PlayerState {
    pub anime_id: String,
    /// Raw `ep` route parameter
    pub ep: Option<String>,
    pub title: Option<Title>,
    pub episodes: Vec<Episode>,
    pub loading: bool,
    pub request_id: u64,
    /// Cursor in the episode sidebar
    pub list: ListState,
}

impl PlayerState {
    pub fn new(anime_id: impl Into<String>, ep: Option<String>) -> Self {
        Self {
            anime_id: anime_id.into(),
            ep,
            loading: true,
            ..Self::default()
        }
    }

    /// Episode currently bound to the video area
    pub fn current(&self) -> Option<&Episode> {
        select_current(&self.episodes, self.ep.as_deref())
    }

    /// Whether `episode` is the highlighted row
    pub fn is_active(&self, episode: &Episode) -> bool {
        self.current()
            .map(|c| c.number == episode.number)
            .unwrap_or(false)
    }

    /// Episode under the sidebar cursor
    pub fn cursor_episode(&self) -> Option<&Episode> {
        self.episodes.get(self.list.selected)
    }

    /// Move the sidebar cursor onto the current episode
    fn sync_cursor(&mut self) {
        self.list.set_len(self.episodes.len());
        let current = self
            .current()
            .and_then(|c| self.episodes.iter().position(|e| e.id == c.id));
        if let Some(idx) = current {
            self.list.selected = idx;
        }
    }

    /// Fail closed: drop everything fetched for this title
    fn clear(&mut self) {
        self.title = None;
        self.episodes.clear();
        self.list.set_len(0);
    }
}

// =============================================================================
// Main Application State
// =============================================================================

/// Main application state
#[derive(Debug)]
pub struct App {
    /// Current location
    pub route: Route,
    /// Navigation history stack
    pub nav_stack: Vec<Route>,
    /// Whether the app is running
    pub running: bool,
    /// Current input mode
    pub input_mode: InputMode,
    /// Error popup message
    pub error: Option<String>,
    /// Terminal window title
    pub window_title: String,

    pub catalog: CatalogState,
    pub player: PlayerState,

    next_request_id: u64,
    effects: Vec<Effect>,
}

impl Default for App {
    fn default() -> Self {
        Self::with_route(Route::Catalog)
    }
}

impl App {
    /// Create a new App at the catalog view
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an App mounted at `route`
    pub fn with_route(route: Route) -> Self {
        let mut app = Self {
            route: route.clone(),
            nav_stack: Vec::new(),
            running: true,
            input_mode: InputMode::Normal,
            error: None,
            window_title: BRAND.to_string(),
            catalog: CatalogState::default(),
            player: PlayerState::default(),
            next_request_id: 0,
            effects: Vec::new(),
        };
        app.mount(route);
        app
    }

    /// Drain queued effects
    pub fn take_effects(&mut self) -> Vec<Effect> {
        std::mem::take(&mut self.effects)
    }

    fn next_id(&mut self) -> u64 {
        self.next_request_id += 1;
        self.next_request_id
    }

    // -------------------------------------------------------------------------
    // Routing
    // -------------------------------------------------------------------------

    /// Navigate to a route, pushing the current one to the stack.
    ///
    /// Changing only the `ep` parameter of the open title keeps the view
    /// mounted and just reselects the current episode.
    pub fn navigate(&mut self, route: Route) {
        self.input_mode = InputMode::Normal;
        if route == self.route {
            return;
        }

        if let (
            Route::Player { anime_id: from, .. },
            Route::Player { anime_id: to, ep },
        ) = (&self.route, &route)
        {
            if from == to {
                debug!(anime_id = %to, ep = ?ep, "episode parameter changed");
                self.player.ep = ep.clone();
                self.player.sync_cursor();
                self.route = route;
                return;
            }
        }

        let previous = std::mem::replace(&mut self.route, route.clone());
        self.unmount(&previous);
        self.nav_stack.push(previous);
        self.mount(route);
    }

    /// Go back to the previous route
    pub fn back(&mut self) -> bool {
        if self.input_mode == InputMode::Editing {
            self.input_mode = InputMode::Normal;
            return true;
        }

        match self.nav_stack.pop() {
            Some(prev) => {
                let current = std::mem::replace(&mut self.route, prev.clone());
                self.unmount(&current);
                self.mount(prev);
                true
            }
            None => false,
        }
    }

    fn mount(&mut self, route: Route) {
        info!(route = %route, "mount");
        match route {
            Route::Catalog => {
                self.catalog = CatalogState {
                    columns: self.catalog.columns,
                    ..CatalogState::default()
                };
                self.window_title = BRAND.to_string();
                self.request_catalog();
            }
            Route::Player { anime_id, ep } => {
                let request_id = self.next_id();
                self.player = PlayerState::new(anime_id.clone(), ep);
                self.player.request_id = request_id;
                self.effects.push(Effect::FetchPlayer {
                    request_id,
                    anime_id,
                });
            }
        }
    }

    fn unmount(&mut self, route: &Route) {
        match route {
            Route::Catalog => {
                if self.catalog.loading {
                    self.effects.push(Effect::CancelCatalog);
                }
            }
            Route::Player { .. } => {
                if self.player.loading {
                    self.effects.push(Effect::CancelPlayer);
                }
            }
        }
    }

    /// Start a catalog fetch for the current search text
    fn request_catalog(&mut self) {
        let request_id = self.next_id();
        self.catalog.request_id = request_id;
        self.catalog.loading = true;
        self.effects.push(Effect::FetchCatalog {
            request_id,
            query: self.catalog.search.query.clone(),
        });
    }

    // -------------------------------------------------------------------------
    // Messages
    // -------------------------------------------------------------------------

    /// Apply a result from the loader. Results for superseded requests are dropped.
    pub fn apply(&mut self, message: Message) {
        match message {
            Message::CatalogLoaded { request_id, result } => {
                if self.route != Route::Catalog || request_id != self.catalog.request_id {
                    debug!(request_id, current = self.catalog.request_id, "ignoring stale catalog result");
                    return;
                }
                match result {
                    Err(e) if e.is_cancelled() => return,
                    Ok(titles) => {
                        info!(request_id, count = titles.len(), "catalog loaded");
                        self.catalog.titles = titles;
                    }
                    Err(e) => {
                        warn!(request_id, error = %e, "catalog fetch failed");
                        self.catalog.titles.clear();
                    }
                }
                self.catalog.loading = false;
                let len = self.catalog.titles.len();
                self.catalog.grid.set_len(len);
            }
            Message::PlayerLoaded { request_id, result } => {
                if self.route.anime_id().is_none() || request_id != self.player.request_id {
                    debug!(request_id, current = self.player.request_id, "ignoring stale player result");
                    return;
                }
                match result {
                    Err(e) if e.is_cancelled() => return,
                    Ok((title, episodes)) => {
                        info!(request_id, anime_id = %title.id, episodes = episodes.len(), "player loaded");
                        if let Some(window_title) = title.window_title() {
                            self.window_title = window_title;
                        }
                        self.player.title = Some(title);
                        self.player.episodes = episodes;
                        self.player.sync_cursor();
                    }
                    Err(e) => {
                        warn!(request_id, error = %e, "player fetch failed");
                        self.player.clear();
                    }
                }
                self.player.loading = false;
            }
            Message::PlaybackStarted { player } => {
                info!(%player, "playback started");
            }
            Message::PlaybackFailed(msg) => {
                warn!(error = %msg, "playback failed");
                self.set_error(msg);
            }
        }
    }

    // -------------------------------------------------------------------------
    // Misc
    // -------------------------------------------------------------------------

    pub fn quit(&mut self) {
        self.running = false;
    }

    pub fn set_error(&mut self, msg: impl Into<String>) {
        self.error = Some(msg.into());
    }

    /// Update the grid width from the terminal size
    pub fn set_columns(&mut self, columns: usize) {
        self.catalog.columns = columns.max(1);
    }

    /// Focus search input (catalog only)
    pub fn focus_search(&mut self) {
        if self.route == Route::Catalog {
            self.input_mode = InputMode::Editing;
        }
    }

    /// Queue playback of the current episode
    pub fn play_current(&mut self) -> bool {
        let Some(episode) = self.player.current() else {
            return false;
        };
        let series = self
            .player
            .title
            .as_ref()
            .map(|t| t.title.as_str())
            .unwrap_or_default();
        let label = if series.is_empty() {
            episode.label()
        } else {
            format!("{} - {}", series, episode.label())
        };
        let effect = Effect::Play {
            stream_url: episode.stream_url.clone(),
            label,
        };
        self.effects.push(effect);
        true
    }

    // -------------------------------------------------------------------------
    // Keyboard Event Handling
    // -------------------------------------------------------------------------

    /// Handle keyboard event, returns true if event was consumed
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        self.error = None;

        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.quit();
            return true;
        }

        if self.input_mode == InputMode::Editing {
            self.handle_editing_key(key)
        } else {
            self.handle_normal_key(key)
        }
    }

    /// Handle keys in editing (text input) mode. Every edit re-fetches.
    fn handle_editing_key(&mut self, key: KeyEvent) -> bool {
        let search = &mut self.catalog.search;
        let changed = match key.code {
            KeyCode::Esc | KeyCode::Enter => {
                self.input_mode = InputMode::Normal;
                return true;
            }
            KeyCode::Char(c) => {
                search.insert(c);
                true
            }
            KeyCode::Backspace => search.backspace(),
            KeyCode::Delete => search.delete(),
            KeyCode::Left => {
                search.cursor_left();
                false
            }
            KeyCode::Right => {
                search.cursor_right();
                false
            }
            KeyCode::Home => {
                search.cursor_home();
                false
            }
            KeyCode::End => {
                search.cursor_end();
                false
            }
            _ => return false,
        };

        if changed {
            self.catalog.grid.first();
            self.request_catalog();
        }
        true
    }

    /// Handle keys in normal navigation mode
    fn handle_normal_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Char('q') => {
                self.quit();
                return true;
            }
            KeyCode::Char('/') | KeyCode::Char('s') => {
                self.focus_search();
                return true;
            }
            KeyCode::Esc => return self.back(),
            _ => {}
        }

        match self.route {
            Route::Catalog => self.handle_catalog_key(key),
            Route::Player { .. } => self.handle_player_key(key),
        }
    }

    fn handle_catalog_key(&mut self, key: KeyEvent) -> bool {
        let columns = self.catalog.columns;
        let grid = &mut self.catalog.grid;
        match key.code {
            KeyCode::Left | KeyCode::Char('h') => grid.back(1),
            KeyCode::Right | KeyCode::Char('l') => grid.forward(1),
            KeyCode::Up | KeyCode::Char('k') => grid.back(columns),
            KeyCode::Down | KeyCode::Char('j') => grid.forward(columns),
            KeyCode::Home => grid.first(),
            KeyCode::End => grid.last(),
            KeyCode::Enter => {
                if let Some(title) = self.catalog.selected_title() {
                    let route = Route::player(title.id.clone());
                    self.navigate(route);
                }
            }
            _ => return false,
        }
        true
    }

    fn handle_player_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.player.list.up(),
            KeyCode::Down | KeyCode::Char('j') => self.player.list.down(),
            KeyCode::Home => self.player.list.first(),
            KeyCode::End => self.player.list.last(),
            KeyCode::Enter => {
                if let Some(number) = self.player.cursor_episode().map(|e| e.number.clone()) {
                    let route = self.route.with_ep(number);
                    self.navigate(route);
                }
            }
            KeyCode::Char('p') | KeyCode::Char(' ') => {
                self.play_current();
            }
            _ => return false,
        }
        true
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
