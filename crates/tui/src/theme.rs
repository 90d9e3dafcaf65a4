use promptshare_core::config::UiTheme;
use ratatui::prelude::*;
use ratatui::widgets::{Block, BorderType, Padding};

/// Named colors for one theme. Every view draws through a `&Palette` so the
/// theme setting swaps colors in one place.
pub struct Palette {
    // ── Border ───────────────────────────────────────────────────────
    pub border_dim: Color,
    pub border_normal: Color,
    pub border_accent: Color,

    // ── Text hierarchy ───────────────────────────────────────────────
    pub text_primary: Color,
    pub text_secondary: Color,
    pub text_muted: Color,
    pub text_hint: Color,

    // ── Key style (for footer hints) ─────────────────────────────────
    pub text_key: Color,
    pub text_key_desc: Color,

    // ── Accent ───────────────────────────────────────────────────────
    pub accent_blue: Color,
    pub accent_green: Color,
    pub accent_red: Color,
    pub accent_yellow: Color,
    pub accent_purple: Color,
    pub accent_cyan: Color,

    // ── Misc ─────────────────────────────────────────────────────────
    pub tag: Color,
    pub tab_inactive: Color,
    pub field_value: Color,
    pub selection_bg: Color,
}

pub const DARK: Palette = Palette {
    border_dim: Color::DarkGray,
    border_normal: Color::Rgb(60, 65, 80),
    border_accent: Color::Rgb(100, 180, 240),

    text_primary: Color::White,
    text_secondary: Color::Rgb(140, 145, 160),
    text_muted: Color::Rgb(80, 85, 100),
    text_hint: Color::Rgb(60, 65, 80),

    text_key: Color::Rgb(140, 145, 160),
    text_key_desc: Color::DarkGray,

    accent_blue: Color::Rgb(100, 180, 240),
    accent_green: Color::Rgb(80, 200, 120),
    accent_red: Color::Rgb(220, 80, 80),
    accent_yellow: Color::Rgb(220, 180, 60),
    accent_purple: Color::Rgb(180, 140, 220),
    accent_cyan: Color::Rgb(80, 200, 200),

    tag: Color::Rgb(100, 120, 160),
    tab_inactive: Color::Rgb(120, 125, 140),
    field_value: Color::Rgb(100, 105, 120),
    selection_bg: Color::Rgb(40, 45, 60),
};

pub const LIGHT: Palette = Palette {
    border_dim: Color::Gray,
    border_normal: Color::Rgb(180, 185, 195),
    border_accent: Color::Rgb(30, 110, 190),

    text_primary: Color::Black,
    text_secondary: Color::Rgb(90, 95, 110),
    text_muted: Color::Rgb(150, 155, 165),
    text_hint: Color::Rgb(170, 175, 185),

    text_key: Color::Rgb(70, 75, 90),
    text_key_desc: Color::Gray,

    accent_blue: Color::Rgb(30, 110, 190),
    accent_green: Color::Rgb(30, 140, 70),
    accent_red: Color::Rgb(190, 40, 40),
    accent_yellow: Color::Rgb(170, 130, 20),
    accent_purple: Color::Rgb(130, 80, 180),
    accent_cyan: Color::Rgb(20, 140, 140),

    tag: Color::Rgb(70, 95, 140),
    tab_inactive: Color::Rgb(130, 135, 145),
    field_value: Color::Rgb(110, 115, 125),
    selection_bg: Color::Rgb(220, 228, 240),
};

pub fn palette(theme: UiTheme) -> &'static Palette {
    match theme {
        UiTheme::Dark => &DARK,
        UiTheme::Light => &LIGHT,
    }
}

impl Palette {
    pub const PADDING_CARD: Padding = Padding::new(2, 2, 1, 1);
    pub const PADDING_COMPACT: Padding = Padding::new(1, 1, 0, 0);

    // ── Block helpers ────────────────────────────────────────────────

    pub fn block(&self) -> Block<'static> {
        Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::new().fg(self.border_normal))
    }

    pub fn block_dim(&self) -> Block<'static> {
        Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::new().fg(self.border_dim))
    }

    pub fn block_accent(&self) -> Block<'static> {
        Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::new().fg(self.border_accent))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palettes_differ_on_primary_text() {
        assert_ne!(
            palette(UiTheme::Dark).text_primary,
            palette(UiTheme::Light).text_primary
        );
    }

    #[test]
    fn palette_selection_matches_theme() {
        assert_eq!(palette(UiTheme::Dark).accent_blue, DARK.accent_blue);
        assert_eq!(palette(UiTheme::Light).accent_blue, LIGHT.accent_blue);
    }
}
