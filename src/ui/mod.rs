//! Terminal UI components
//!
//! Built with ratatui. Keyboard-first navigation throughout.

pub mod theme;
pub mod catalog;
pub mod player;

pub use theme::Theme;

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};

use crate::app::{App, InputMode};
use crate::models::BRAND;
use crate::route::Route;

/// Placeholder shown in an empty, unfocused search box
pub const SEARCH_PLACEHOLDER: &str = "Search anime...";

// =============================================================================
// UI Rendering
// =============================================================================

/// Main render function - dispatches to view-specific renderers
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    frame.render_widget(Clear, area);
    frame.render_widget(Block::default().style(Style::default().bg(Theme::BACKGROUND)), area);

    // Main layout: header, content, status bar
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(1),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    render_header(frame, chunks[0], app);
    render_content(frame, chunks[1], app);
    render_status_bar(frame, chunks[2], app);

    if let Some(ref error) = app.error {
        render_error_popup(frame, area, error);
    }
}

/// Text shown in the search box
pub fn search_text(app: &App) -> String {
    let search = &app.catalog.search;
    if app.input_mode == InputMode::Editing {
        let (before, after) = search.split_at_cursor();
        format!("⌕ {}│{}", before, after)
    } else if search.query.is_empty() {
        format!("⌕ {}", SEARCH_PLACEHOLDER)
    } else {
        format!("⌕ {}", search.query)
    }
}

/// Header: logo plus the search box
fn render_header(frame: &mut Frame, area: Rect, app: &App) {
    let header_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(BRAND.len() as u16 + 6), // Logo
            Constraint::Min(1),                          // Search box
        ])
        .split(area);

    let logo = Paragraph::new(Line::from(vec![
        Span::styled("◆ ", Theme::accent()),
        Span::styled(BRAND, Theme::brand()),
    ]))
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Theme::border()),
    );
    frame.render_widget(logo, header_chunks[0]);

    let editing = app.input_mode == InputMode::Editing;
    let search_box = Paragraph::new(search_text(app))
        .style(if editing {
            Theme::input().fg(Theme::PRIMARY)
        } else if app.catalog.search.query.is_empty() {
            Theme::dimmed()
        } else {
            Theme::input()
        })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(if editing {
                    Theme::border_focused()
                } else {
                    Theme::border()
                })
                .title(Span::styled(" Search ", Theme::title())),
        );
    frame.render_widget(search_box, header_chunks[1]);
}

/// Main content area for the current route
fn render_content(frame: &mut Frame, area: Rect, app: &App) {
    match app.route {
        Route::Catalog => catalog::render(frame, area, &app.catalog),
        Route::Player { .. } => player::render(frame, area, &app.player),
    }
}

/// Status bar at bottom
fn render_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let mode_indicator = match app.input_mode {
        InputMode::Normal => Span::styled(
            " NORMAL ",
            Style::default().fg(Theme::BACKGROUND).bg(Theme::PRIMARY),
        ),
        InputMode::Editing => Span::styled(
            " INSERT ",
            Style::default().fg(Theme::BACKGROUND).bg(Theme::SECONDARY),
        ),
    };

    let route_indicator = Span::styled(format!(" {} ", app.route), Theme::dimmed());

    let help = match app.route {
        Route::Catalog => " q:quit  /:search  ←↑↓→:move  enter:open ",
        Route::Player { .. } => " q:quit  esc:back  ↑↓:episodes  enter:select  p:play ",
    };

    let status_line = Line::from(vec![
        mode_indicator,
        route_indicator,
        Span::raw(" │ "),
        Span::styled(help, Theme::dimmed()),
    ]);

    let status = Paragraph::new(status_line).style(Theme::status_bar());
    frame.render_widget(status, area);
}

/// Error popup overlay
fn render_error_popup(frame: &mut Frame, area: Rect, error: &str) {
    let popup_width = 60.min(area.width.saturating_sub(4));
    let popup_height = 5.min(area.height);

    let popup_area = Rect {
        x: area.x + (area.width.saturating_sub(popup_width)) / 2,
        y: area.y + (area.height.saturating_sub(popup_height)) / 2,
        width: popup_width,
        height: popup_height,
    };

    frame.render_widget(Clear, popup_area);

    let error_block = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(error, Theme::error())),
    ])
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Double)
            .border_style(Theme::error())
            .title(Span::styled(" ✗ Error ", Theme::error()))
            .style(Style::default().bg(Theme::BACKGROUND)),
    );

    frame.render_widget(error_block, popup_area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    #[test]
    fn test_search_text_placeholder() {
        let app = App::new();
        assert_eq!(search_text(&app), "⌕ Search anime...");
    }

    #[test]
    fn test_search_text_editing_shows_cursor() {
        let mut app = App::new();
        app.focus_search();
        for c in "one".chars() {
            app.handle_key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::empty()));
        }
        app.handle_key(KeyEvent::new(KeyCode::Left, KeyModifiers::empty()));
        assert_eq!(search_text(&app), "⌕ on│e");

        app.handle_key(KeyEvent::new(KeyCode::Enter, KeyModifiers::empty()));
        assert_eq!(search_text(&app), "⌕ one");
    }
}
