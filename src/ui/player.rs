//! Player view
//!
//! Video area bound to the current episode, title info underneath, and the
//! episode list on the right.

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, List, ListItem, Paragraph, Wrap},
};

use crate::app::PlayerState;
use crate::models::Episode;
use crate::ui::Theme;

/// Placeholder shown in the video area when nothing can be played
pub const NO_EPISODE: &str = "No episode selected";

/// One row of the episode sidebar. Pure rendering of an episode.
pub struct EpisodeRow<'a> {
    episode: &'a Episode,
    active: bool,
    cursor: bool,
}

impl<'a> EpisodeRow<'a> {
    pub fn new(episode: &'a Episode) -> Self {
        Self {
            episode,
            active: false,
            cursor: false,
        }
    }

    /// Row of the episode being played
    pub fn active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    /// Row under the keyboard cursor
    pub fn cursor(mut self, cursor: bool) -> Self {
        self.cursor = cursor;
        self
    }

    pub fn line(&self) -> Line<'a> {
        let mut spans = vec![Span::styled(
            if self.cursor { "▸ " } else { "  " },
            Theme::accent(),
        )];

        if let Some(duration) = self.episode.duration_str() {
            let badge = if self.active {
                Theme::duration_active()
            } else {
                Theme::duration()
            };
            spans.push(Span::styled(format!(" {} ", duration), badge));
            spans.push(Span::raw(" "));
        }

        spans.push(Span::styled(
            self.episode.label(),
            if self.active { Theme::active() } else { Theme::text() },
        ));

        if let Some(ref title) = self.episode.title {
            spans.push(Span::styled(format!("  {}", title), Theme::muted()));
        }

        spans.push(Span::styled(
            if self.active { "  ▶" } else { "" },
            Theme::accent(),
        ));

        Line::from(spans)
    }

    pub fn into_item(self) -> ListItem<'a> {
        let item = ListItem::new(self.line());
        if self.active {
            item.style(Theme::active())
        } else {
            item
        }
    }
}

/// Render the player view into `area`
pub fn render(frame: &mut Frame, area: Rect, state: &PlayerState) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(2, 3), Constraint::Ratio(1, 3)])
        .split(area);

    let main = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(55), Constraint::Min(3)])
        .split(columns[0]);

    render_video(frame, main[0], state);
    render_info(frame, main[1], state);
    render_episodes(frame, columns[1], state);
}

/// Video area: bound to the current episode's stream and poster
fn render_video(frame: &mut Frame, area: Rect, state: &PlayerState) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Theme::border())
        .style(Theme::video());

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let Some(current) = state.current() else {
        let placeholder = Paragraph::new(NO_EPISODE)
            .style(Theme::video())
            .alignment(Alignment::Center);
        let y = inner.y + inner.height / 2;
        frame.render_widget(placeholder, Rect { y, height: inner.height.min(1), ..inner });
        return;
    };

    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(format!("▶  {}", current.label()), Theme::title())),
        Line::from(""),
        Line::from(vec![
            Span::styled("source  ", Theme::dimmed()),
            Span::styled(current.stream_url.as_str(), Theme::muted()),
        ]),
    ];
    if let Some(ref poster) = current.thumbnail_url {
        lines.push(Line::from(vec![
            Span::styled("poster  ", Theme::dimmed()),
            Span::styled(poster.as_str(), Theme::muted()),
        ]));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled(" p ", Theme::keybind()),
        Span::styled(" play", Theme::dimmed()),
    ]));

    let video = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(video, inner);
}

/// Title heading, current episode line, description and tags
fn render_info(frame: &mut Frame, area: Rect, state: &PlayerState) {
    let Some(ref title) = state.title else {
        return;
    };

    let mut lines = vec![Line::from(Span::styled(title.title.as_str(), Theme::heading()))];

    if let Some(current) = state.current() {
        if let Some(ref episode_title) = current.title {
            let mut spans = vec![
                Span::styled("▶ ", Theme::accent()),
                Span::styled(format!("{}: ", current.label()), Theme::text()),
                Span::styled(episode_title.as_str(), Theme::text()),
            ];
            if let Some(duration) = current.duration_str() {
                spans.push(Span::styled(format!("   ⏱ {}", duration), Theme::muted()));
            }
            lines.push(Line::from(spans));
        }
    }

    if let Some(ref description) = title.description {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(description.as_str(), Theme::muted())));
    }

    if !title.tags.is_empty() {
        lines.push(Line::from(""));
        let mut chips = Vec::with_capacity(title.tags.len() * 2);
        for tag in &title.tags {
            chips.push(Span::styled(format!(" {} ", tag), Theme::tag()));
            chips.push(Span::raw(" "));
        }
        lines.push(Line::from(chips));
    }

    let info = Paragraph::new(lines).wrap(Wrap { trim: true });
    let inner = Rect {
        x: area.x + 1,
        width: area.width.saturating_sub(2),
        ..area
    };
    frame.render_widget(info, inner);
}

/// Episode sidebar with the active row highlighted
fn render_episodes(frame: &mut Frame, area: Rect, state: &PlayerState) {
    let mut heading = vec![Span::styled(" Episodes › ", Theme::title())];
    if !state.episodes.is_empty() {
        heading.push(Span::styled(format!("({}) ", state.episodes.len()), Theme::muted()));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Theme::border_focused())
        .title(Line::from(heading));

    let inner_height = block.inner(area).height as usize;
    let offset = (state.list.selected + 1).saturating_sub(inner_height.max(1));

    let items: Vec<ListItem> = state
        .episodes
        .iter()
        .enumerate()
        .skip(offset)
        .take(inner_height)
        .map(|(i, episode)| {
            EpisodeRow::new(episode)
                .active(state.is_active(episode))
                .cursor(i == state.list.selected)
                .into_item()
        })
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}
