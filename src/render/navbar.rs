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

//! Render the navigation bar and the section menu.
//!
//! The bar is three rows tall with a bottom border at the top of the page,
//! and collapses to a single shaded row once the page is scrolled.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Clear, Widget},
};

use crate::{
    App,
    model::content::{HERO_TITLE, Section},
    render::{
        draw_button,
        hits::{Hit, HitMap},
        icons::{ICON_CLOSE, ICON_MENU},
    },
};

const LINK_GAP: u16 = 3;
const MENU_WIDTH: u16 = 22;

pub(super) fn draw_navbar(f: &mut Frame, area: Rect, app: &App, hits: &mut HitMap) {
    let theme = &app.theme;
    let compact = app.navigation.is_compact();

    let block = if compact {
        Block::new().style(Style::default().bg(theme.surface_colour))
    } else {
        Block::new()
            .borders(Borders::BOTTOM)
            .border_style(Style::default().fg(theme.border_colour))
    };
    let inner = block.inner(area);
    f.render_widget(block, area);

    // Content sits on the middle row when expanded.
    let row = if compact { inner.y } else { inner.y + inner.height.saturating_sub(1) / 2 };
    let x = inner.x + 1;
    let buf = f.buffer_mut();

    let brand = draw_button(
        buf,
        x,
        row,
        HERO_TITLE,
        Style::default().fg(theme.accent_colour).add_modifier(Modifier::BOLD),
    );
    hits.push(brand, Hit::MenuEntry(Section::Home));

    let menu_label = format!("[{}]", if app.navigation.is_menu_open() { ICON_CLOSE } else { ICON_MENU });
    let menu_width = menu_label.chars().count() as u16;
    let contact_label = "[ Contact ]";
    let contact_width = contact_label.len() as u16;

    let menu_x = inner.right().saturating_sub(menu_width + 1);
    let contact_x = menu_x.saturating_sub(contact_width + LINK_GAP);

    let menu = draw_button(
        buf,
        menu_x,
        row,
        &menu_label,
        Style::default().fg(theme.heading_fg).add_modifier(Modifier::BOLD),
    );
    hits.push(menu, Hit::MenuToggle);

    let contact = draw_button(
        buf,
        contact_x,
        row,
        contact_label,
        Style::default().fg(theme.accent_colour).add_modifier(Modifier::BOLD),
    );
    hits.push(contact, Hit::OpenModal);

    // Section links only when they fit between the brand and the buttons.
    let links_width: u16 = Section::ALL
        .iter()
        .map(|s| s.label().len() as u16 + LINK_GAP)
        .sum();
    let links_start = brand.right() + LINK_GAP * 2;
    if links_start + links_width > contact_x {
        return;
    }

    let focused = app.navigation.focused_section(&app.layout);
    let mut x = links_start;
    for section in Section::ALL {
        let style = if section == focused {
            Style::default()
                .fg(theme.accent_colour)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(theme.text_fg)
        };
        let link = draw_button(buf, x, row, section.label(), style);
        hits.push(link, Hit::MenuEntry(section));
        x = link.right() + LINK_GAP;
    }
}

/// Draws the section menu dropped down at the right of `page_area`.
pub(super) fn draw_menu(f: &mut Frame, page_area: Rect, app: &App, hits: &mut HitMap) {
    let theme = &app.theme;

    let height = (Section::ALL.len() as u16 + 2).min(page_area.height);
    let width = MENU_WIDTH.min(page_area.width);
    let area = Rect::new(
        page_area.right().saturating_sub(width + 1),
        page_area.y,
        width,
        height,
    );

    let block = Block::bordered()
        .title(Line::styled(" Sections ", Style::default().fg(theme.heading_fg)))
        .border_style(Style::default().fg(theme.accent_colour))
        .style(Style::default().bg(theme.surface_colour));
    let inner = block.inner(area);

    f.render_widget(Clear, area);
    f.render_widget(block, area);

    let buf = f.buffer_mut();
    let cursor = app.navigation.menu_cursor();

    for (index, section) in Section::ALL.into_iter().enumerate() {
        let y = inner.y + index as u16;
        if y >= inner.bottom() {
            break;
        }
        let row = Rect::new(inner.x, y, inner.width, 1);

        let style = if section == cursor {
            Style::default()
                .fg(theme.heading_fg)
                .bg(theme.accent_colour)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.text_fg)
        };

        Line::styled(format!(" {}  {}", index + 1, section.label()), style).render(row, buf);
        buf.set_style(row, style);
        hits.push(row, Hit::MenuEntry(section));
    }
}
