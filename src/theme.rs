//! Colour palettes for the two theme tokens.

use mergetui::prefs::ThemeName;
use ratatui::style::Color;

/// Tile colours indexed by log2(value) - 1: 2, 4, 8, ... 2048. Larger values use `super_tile`.
const TILE_COUNT: usize = 11;

/// Palette for board, HUD and tiles.
#[derive(Debug, Clone)]
pub struct Theme {
    pub name: ThemeName,
    /// Screen background.
    pub bg: Color,
    /// Board background and empty cells.
    pub board_bg: Color,
    pub empty_cell: Color,
    /// Border / divider lines.
    pub div_line: Color,
    /// Text (score, status).
    pub main_fg: Color,
    /// Highlight / titles.
    pub title: Color,
    /// Secondary text (disabled undo, hints).
    pub inactive_fg: Color,
    /// (background, foreground) per tile exponent.
    tiles: [(Color, Color); TILE_COUNT],
    super_tile: (Color, Color),
}

impl Default for Theme {
    fn default() -> Self {
        Self::neumorph()
    }
}

impl Theme {
    pub fn for_name(name: ThemeName) -> Self {
        match name {
            ThemeName::Neumorph => Self::neumorph(),
            ThemeName::Contrast => Self::contrast(),
        }
    }

    /// Soft warm palette (classic 2048 colours on a dark board).
    pub fn neumorph() -> Self {
        let dark = Color::Rgb(0x77, 0x6E, 0x65);
        let light = Color::Rgb(0xF9, 0xF6, 0xF2);
        Self {
            name: ThemeName::Neumorph,
            bg: Color::Rgb(0x2B, 0x28, 0x25),
            board_bg: Color::Rgb(0xBB, 0xAD, 0xA0),
            empty_cell: Color::Rgb(0xCD, 0xC1, 0xB4),
            div_line: Color::Rgb(0x8F, 0x7A, 0x66),
            main_fg: Color::Rgb(0xEE, 0xE4, 0xDA),
            title: Color::Rgb(0xED, 0xC2, 0x2E),
            inactive_fg: Color::Rgb(0x6B, 0x62, 0x5A),
            tiles: [
                (Color::Rgb(0xEE, 0xE4, 0xDA), dark),
                (Color::Rgb(0xED, 0xE0, 0xC8), dark),
                (Color::Rgb(0xF2, 0xB1, 0x79), light),
                (Color::Rgb(0xF5, 0x95, 0x63), light),
                (Color::Rgb(0xF6, 0x7C, 0x5F), light),
                (Color::Rgb(0xF6, 0x5E, 0x3B), light),
                (Color::Rgb(0xED, 0xCF, 0x72), light),
                (Color::Rgb(0xED, 0xCC, 0x61), light),
                (Color::Rgb(0xED, 0xC8, 0x50), light),
                (Color::Rgb(0xED, 0xC5, 0x3F), light),
                (Color::Rgb(0xED, 0xC2, 0x2E), light),
            ],
            super_tile: (Color::Rgb(0x3C, 0x3A, 0x32), light),
        }
    }

    /// High-contrast palette: saturated tiles, black/white text.
    pub fn contrast() -> Self {
        Self {
            name: ThemeName::Contrast,
            bg: Color::Black,
            board_bg: Color::Rgb(0x20, 0x20, 0x20),
            empty_cell: Color::Rgb(0x38, 0x38, 0x38),
            div_line: Color::White,
            main_fg: Color::White,
            title: Color::Rgb(0xFF, 0xFF, 0x00),
            inactive_fg: Color::Rgb(0x80, 0x80, 0x80),
            tiles: [
                (Color::Rgb(0xFF, 0xFF, 0xFF), Color::Black),
                (Color::Rgb(0xFF, 0xFF, 0x00), Color::Black),
                (Color::Rgb(0xFF, 0x88, 0x00), Color::Black),
                (Color::Rgb(0xFF, 0x00, 0x00), Color::White),
                (Color::Rgb(0xFF, 0x00, 0xFF), Color::White),
                (Color::Rgb(0x88, 0x00, 0xFF), Color::White),
                (Color::Rgb(0x00, 0x88, 0xFF), Color::White),
                (Color::Rgb(0x00, 0xFF, 0xFF), Color::Black),
                (Color::Rgb(0x00, 0xFF, 0x00), Color::Black),
                (Color::Rgb(0x00, 0x99, 0x00), Color::White),
                (Color::Rgb(0xFF, 0xD7, 0x00), Color::Black),
            ],
            super_tile: (Color::White, Color::Black),
        }
    }

    /// (background, foreground) for a non-empty tile.
    pub fn tile_colors(&self, value: u32) -> (Color, Color) {
        if value == 0 {
            return (self.empty_cell, self.empty_cell);
        }
        let exp = value.trailing_zeros() as usize;
        exp.checked_sub(1)
            .and_then(|i| self.tiles.get(i))
            .copied()
            .unwrap_or(self.super_tile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tile_colours_follow_exponent() {
        let theme = Theme::neumorph();
        assert_eq!(theme.tile_colors(2), theme.tiles[0]);
        assert_eq!(theme.tile_colors(2048), theme.tiles[10]);
        assert_eq!(theme.tile_colors(4096), theme.super_tile);
    }

    #[test]
    fn name_selects_palette() {
        assert_eq!(Theme::for_name(ThemeName::Contrast).name, ThemeName::Contrast);
        assert_eq!(Theme::default().name, ThemeName::Neumorph);
    }
}
