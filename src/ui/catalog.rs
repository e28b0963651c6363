//! Catalog view
//!
//! "Trending" grid of title cards, sized to the terminal width.

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Paragraph, Widget},
};

use crate::app::CatalogState;
use crate::models::Title;
use crate::ui::Theme;

/// Height of one card including borders
pub const CARD_HEIGHT: u16 = 5;

/// Cards per row for a given content width (2 to 5, like a responsive grid)
pub fn columns_for(width: u16) -> usize {
    match width {
        0..=59 => 2,
        60..=99 => 3,
        100..=139 => 4,
        _ => 5,
    }
}

/// A single title card: cover line, name, tags. No state of its own.
pub struct TitleCard<'a> {
    title: &'a Title,
    selected: bool,
}

impl<'a> TitleCard<'a> {
    pub fn new(title: &'a Title) -> Self {
        Self {
            title,
            selected: false,
        }
    }

    pub fn selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }

    /// Text lines shown inside the card
    pub fn lines(&self) -> Vec<Line<'a>> {
        let cover = match self.title.cover_url {
            Some(ref url) => Line::from(Span::styled(format!("▣ {}", url), Theme::dimmed())),
            None => Line::from(Span::styled("No Cover", Theme::dimmed())).alignment(Alignment::Center),
        };

        let name = Line::from(Span::styled(self.title.title.as_str(), Theme::heading()));

        let tags = match self.title.tags_line() {
            Some(tags) => Line::from(Span::styled(tags, Theme::muted())),
            None => Line::from(""),
        };

        vec![cover, name, tags]
    }
}

impl Widget for TitleCard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.selected {
            Theme::border_focused()
        } else {
            Theme::border()
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(if self.selected {
                BorderType::Thick
            } else {
                BorderType::Rounded
            })
            .border_style(border_style);

        let lines = self.lines();
        Paragraph::new(lines).block(block).render(area, buf);
    }
}

/// Render the catalog view into `area`
pub fn render(frame: &mut Frame, area: Rect, state: &CatalogState) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Theme::border())
        .title(Span::styled(" Trending ", Theme::title()));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    if state.loading {
        let loading = Paragraph::new("Loading...")
            .style(Theme::loading())
            .alignment(Alignment::Center);
        frame.render_widget(loading, inner);
        return;
    }

    if state.titles.is_empty() || inner.width == 0 || inner.height < CARD_HEIGHT {
        return;
    }

    let columns = state.columns.max(1);
    let visible_rows = (inner.height / CARD_HEIGHT).max(1) as usize;
    let selected_row = state.grid.selected / columns;
    let first_row = (selected_row + 1).saturating_sub(visible_rows);
    let card_width = inner.width / columns as u16;

    for (i, title) in state
        .titles
        .iter()
        .enumerate()
        .skip(first_row * columns)
        .take(visible_rows * columns)
    {
        let row = (i / columns - first_row) as u16;
        let col = (i % columns) as u16;
        let card_area = Rect {
            x: inner.x + col * card_width,
            y: inner.y + row * CARD_HEIGHT,
            width: card_width,
            height: CARD_HEIGHT,
        };
        let card = TitleCard::new(title).selected(i == state.grid.selected);
        frame.render_widget(card, card_area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn title(tags: &[&str], cover: Option<&str>) -> Title {
        Title {
            id: "1".into(),
            title: "Naruto".into(),
            cover_url: cover.map(String::from),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            description: None,
        }
    }

    fn line_text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_columns_for_width() {
        assert_eq!(columns_for(40), 2);
        assert_eq!(columns_for(80), 3);
        assert_eq!(columns_for(120), 4);
        assert_eq!(columns_for(200), 5);
    }

    #[test]
    fn test_card_lines_without_cover() {
        let t = title(&["Action", "Shounen"], None);
        let lines = TitleCard::new(&t).lines();
        assert_eq!(line_text(&lines[0]), "No Cover");
        assert_eq!(line_text(&lines[1]), "Naruto");
        assert_eq!(line_text(&lines[2]), "Action • Shounen");
    }

    #[test]
    fn test_card_lines_with_cover_no_tags() {
        let t = title(&[], Some("http://img.test/naruto.jpg"));
        let lines = TitleCard::new(&t).lines();
        assert!(line_text(&lines[0]).contains("naruto.jpg"));
        assert_eq!(line_text(&lines[2]), "");
    }
}
