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

//! Unicode symbols for the TUI.
//!
//! Symbols that have emoji presentations carry Variation Selector-15
//! (`\u{FE0E}`), which forces terminals to render them as monochrome text so
//! they respect the TUI's colour styling.

// Transport
pub(crate) const ICON_PLAY: &str = "\u{25B6}\u{FE0E}";
pub(crate) const ICON_PAUSE: &str = "\u{23F8}\u{FE0E}";
pub(crate) const ICON_NEXT: &str = "\u{23ED}\u{FE0E}";
pub(crate) const ICON_PREV: &str = "\u{23EE}\u{FE0E}";
pub(crate) const ICON_SHUFFLE: &str = "\u{21C4}";
pub(crate) const ICON_REPEAT: &str = "\u{21BB}";

// Volume
pub(crate) const ICON_VOLUME: &str = "\u{1F509}\u{FE0E}";
pub(crate) const ICON_MUTED: &str = "\u{1F507}\u{FE0E}";

// Track list
pub(crate) const ICON_NOW_PLAYING: &str = "\u{266A}";

// Carousel
pub(crate) const ICON_DOT_ACTIVE: &str = "\u{25CF}";
pub(crate) const ICON_DOT: &str = "\u{25CB}";
pub(crate) const ICON_CHEVRON_LEFT: &str = "\u{2039}";
pub(crate) const ICON_CHEVRON_RIGHT: &str = "\u{203A}";

// Chrome
pub(crate) const ICON_MENU: &str = "\u{2630}";
pub(crate) const ICON_CLOSE: &str = "\u{2715}";
