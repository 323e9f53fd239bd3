// Copyright (C) 2026  Caprica Software Limited
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Site colour palette.

use ratatui::style::Color;

#[derive(Clone, Copy)]
pub(crate) struct Theme {
    pub(crate) background_colour: Color,
    pub(crate) surface_colour: Color,
    pub(crate) accent_colour: Color,
    pub(crate) border_colour: Color,
    pub(crate) gauge_track_colour: Color,

    pub(crate) heading_fg: Color,
    pub(crate) text_fg: Color,
    pub(crate) muted_fg: Color,
    pub(crate) disabled_fg: Color,

    pub(crate) success_fg: Color,
    pub(crate) error_fg: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::default_theme()
    }
}

impl Theme {
    pub(crate) const fn default_theme() -> Self {
        Self {
            background_colour: Color::Rgb(10, 10, 14),
            surface_colour: Color::Rgb(24, 22, 30),
            accent_colour: Color::Rgb(220, 38, 38),
            border_colour: Color::Rgb(70, 66, 80),
            gauge_track_colour: Color::Rgb(40, 36, 48),

            heading_fg: Color::Rgb(255, 255, 255),
            text_fg: Color::Rgb(214, 211, 220),
            muted_fg: Color::Rgb(150, 146, 160),
            disabled_fg: Color::Rgb(80, 76, 90),

            success_fg: Color::Rgb(74, 222, 128),
            error_fg: Color::Rgb(248, 113, 113),
        }
    }

    /// Converts an RGB colour into a CSS-style hex string, as used in the
    /// terminal background escape sequence. Other variants map to black.
    pub(crate) fn to_hex(colour: Color) -> String {
        match colour {
            Color::Rgb(r, g, b) => format!("#{:02x}{:02x}{:02x}", r, g, b),
            _ => "#000000".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_conversion() {
        assert_eq!(Theme::to_hex(Color::Rgb(220, 38, 8)), "#dc2608");
        assert_eq!(Theme::to_hex(Color::Red), "#000000");
    }
}
