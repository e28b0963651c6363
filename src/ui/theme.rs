//! Indigo theme for anistream
//!
//! Color palette and style helpers for the TUI.

use ratatui::style::{Color, Modifier, Style};

/// Indigo/purple color palette on a dark slate background
pub struct Theme;

impl Theme {
    // ═══════════════════════════════════════════════════════════════════════
    // CORE PALETTE
    // ═══════════════════════════════════════════════════════════════════════

    /// Background: #0f172a (slate-900)
    pub const BACKGROUND: Color = Color::Rgb(0x0f, 0x17, 0x2a);

    /// Primary: #818cf8 (indigo-400)
    pub const PRIMARY: Color = Color::Rgb(0x81, 0x8c, 0xf8);

    /// Secondary: #c084fc (purple-400)
    pub const SECONDARY: Color = Color::Rgb(0xc0, 0x84, 0xfc);

    /// Text: #e5e7eb (gray-200)
    pub const TEXT: Color = Color::Rgb(0xe5, 0xe7, 0xeb);

    /// Muted: #9ca3af (gray-400)
    pub const MUTED: Color = Color::Rgb(0x9c, 0xa3, 0xaf);

    /// Dim: #4b5563 (gray-600)
    pub const DIM: Color = Color::Rgb(0x4b, 0x55, 0x63);

    /// Active row background: #312e81 (indigo-900)
    pub const ACTIVE_BG: Color = Color::Rgb(0x31, 0x2e, 0x81);

    /// Video area background: #000000
    pub const VIDEO_BG: Color = Color::Rgb(0x00, 0x00, 0x00);

    /// Error: #f87171 (red-400)
    pub const ERROR: Color = Color::Rgb(0xf8, 0x71, 0x71);

    /// Border color (gray-700)
    pub const BORDER: Color = Color::Rgb(0x37, 0x41, 0x51);

    /// Border color when focused
    pub const BORDER_FOCUSED: Color = Self::PRIMARY;

    // ═══════════════════════════════════════════════════════════════════════
    // STYLE HELPERS
    // ═══════════════════════════════════════════════════════════════════════

    /// Default text style
    pub fn text() -> Style {
        Style::default().fg(Self::TEXT)
    }

    /// Secondary text (tags, episode titles)
    pub fn muted() -> Style {
        Style::default().fg(Self::MUTED)
    }

    pub fn dimmed() -> Style {
        Style::default().fg(Self::DIM)
    }

    pub fn error() -> Style {
        Style::default().fg(Self::ERROR).add_modifier(Modifier::BOLD)
    }

    /// Block titles and headings
    pub fn title() -> Style {
        Style::default().fg(Self::PRIMARY).add_modifier(Modifier::BOLD)
    }

    /// Large heading (title name in the player view)
    pub fn heading() -> Style {
        Style::default().fg(Self::TEXT).add_modifier(Modifier::BOLD)
    }

    /// Logo text
    pub fn brand() -> Style {
        Style::default()
            .fg(Self::SECONDARY)
            .add_modifier(Modifier::BOLD)
    }

    pub fn accent() -> Style {
        Style::default().fg(Self::PRIMARY)
    }

    pub fn border() -> Style {
        Style::default().fg(Self::BORDER)
    }

    pub fn border_focused() -> Style {
        Style::default().fg(Self::BORDER_FOCUSED)
    }

    /// Row of the episode currently playing
    pub fn active() -> Style {
        Style::default()
            .fg(Self::TEXT)
            .bg(Self::ACTIVE_BG)
            .add_modifier(Modifier::BOLD)
    }

    /// Tag chip
    pub fn tag() -> Style {
        Style::default().fg(Self::MUTED).bg(Self::BORDER)
    }

    /// Duration badge
    pub fn duration() -> Style {
        Style::default().fg(Self::TEXT).bg(Self::DIM)
    }

    /// Duration badge on the active row
    pub fn duration_active() -> Style {
        Style::default().fg(Self::TEXT).bg(Self::PRIMARY)
    }

    pub fn video() -> Style {
        Style::default().fg(Self::MUTED).bg(Self::VIDEO_BG)
    }

    pub fn input() -> Style {
        Style::default().fg(Self::TEXT)
    }

    pub fn keybind() -> Style {
        Style::default()
            .fg(Self::BACKGROUND)
            .bg(Self::SECONDARY)
            .add_modifier(Modifier::BOLD)
    }

    pub fn status_bar() -> Style {
        Style::default().fg(Self::MUTED).bg(Self::BACKGROUND)
    }

    pub fn loading() -> Style {
        Style::default()
            .fg(Self::MUTED)
            .add_modifier(Modifier::ITALIC)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // WCAG 2.0 contrast, used to check the palette

    /// Calculate relative luminance for a color (used in contrast ratio)
    /// Formula: https://www.w3.org/TR/WCAG20/#relativeluminancedef
    fn relative_luminance(r: u8, g: u8, b: u8) -> f64 {
        fn channel_luminance(c: u8) -> f64 {
            let c = c as f64 / 255.0;
            if c <= 0.03928 {
                c / 12.92
            } else {
                ((c + 0.055) / 1.055).powf(2.4)
            }
        }

        0.2126 * channel_luminance(r) + 0.7152 * channel_luminance(g) + 0.0722 * channel_luminance(b)
    }

    /// Contrast ratio between two colors, from 1 (same) to 21 (black/white)
    fn contrast_ratio(fg: (u8, u8, u8), bg: (u8, u8, u8)) -> f64 {
        let l1 = relative_luminance(fg.0, fg.1, fg.2);
        let l2 = relative_luminance(bg.0, bg.1, bg.2);

        let (lighter, darker) = if l1 > l2 { (l1, l2) } else { (l2, l1) };

        (lighter + 0.05) / (darker + 0.05)
    }

    /// WCAG AA for normal text (4.5:1)
    fn meets_wcag_aa(fg: (u8, u8, u8), bg: (u8, u8, u8)) -> bool {
        contrast_ratio(fg, bg) >= 4.5
    }

    /// Extract RGB tuple from ratatui Color (only works for Rgb variant)
    fn color_to_rgb(color: Color) -> Option<(u8, u8, u8)> {
        match color {
            Color::Rgb(r, g, b) => Some((r, g, b)),
            _ => None,
        }
    }

    fn rgb(color: Color) -> (u8, u8, u8) {
        color_to_rgb(color).expect("Theme colors should all be RGB")
    }

    #[test]
    fn test_text_readable_on_background() {
        for color in [Theme::TEXT, Theme::MUTED, Theme::PRIMARY, Theme::SECONDARY] {
            assert!(
                meets_wcag_aa(rgb(color), rgb(Theme::BACKGROUND)),
                "{:?} on BACKGROUND is {:.2}:1",
                color,
                contrast_ratio(rgb(color), rgb(Theme::BACKGROUND))
            );
        }
    }

    #[test]
    fn test_active_row_readable() {
        assert!(meets_wcag_aa(rgb(Theme::TEXT), rgb(Theme::ACTIVE_BG)));
    }

    #[test]
    fn test_keybind_readable() {
        assert!(meets_wcag_aa(rgb(Theme::BACKGROUND), rgb(Theme::SECONDARY)));
    }

    #[test]
    fn test_contrast_ratio_bounds() {
        assert!((contrast_ratio((0, 0, 0), (255, 255, 255)) - 21.0).abs() < 0.1);
        assert!((contrast_ratio((100, 100, 100), (100, 100, 100)) - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_color_to_rgb_non_rgb() {
        assert_eq!(color_to_rgb(Color::Reset), None);
    }
}
