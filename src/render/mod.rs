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

//! User interface rendering logic.
//!
//! This module handles the translation of the [`App`] state into visual
//! widgets using the `ratatui` framework.
//!
//! # Rendering Pipeline
//!
//! The primary entry point is the [`draw`] function, called after every
//! event. Each frame is composed bottom to top:
//!
//! 1. the scrolled page, drawn off screen and copied into the viewport;
//! 2. the navbar and, when open, the section menu;
//! 3. the status footer;
//! 4. the contact modal, when visible.
//!
//! While drawing, every clickable element records a [`hits::Hit`] region,
//! replacing the previous frame's map once the frame is complete.

mod form;
mod gallery;
pub(crate) mod hits;
mod icons;
mod modal;
mod navbar;
mod page;
mod player;
mod sections;

use std::time::Instant;

use ratatui::{
    Frame,
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::{App, render::hits::HitMap, theme::Theme, util::notice::NoticeKind};

pub(crate) use page::page_layout;

const EXPANDED_NAVBAR_HEIGHT: u16 = 3;
const COMPACT_NAVBAR_HEIGHT: u16 = 1;

/// Widest the page content column grows on wide terminals.
const MAX_CONTENT_WIDTH: u16 = 100;

/// Renders the user interface to the terminal frame.
///
/// Takes the application state mutably so the navigation viewport and the
/// click regions follow what was actually drawn.
pub(crate) fn draw(f: &mut Frame, app: &mut App) {
    let now = Instant::now();

    let navbar_height = if app.navigation.is_compact() {
        COMPACT_NAVBAR_HEIGHT
    } else {
        EXPANDED_NAVBAR_HEIGHT
    };

    let full_area = f.area();
    let [navbar_area, page_area, footer_area] = Layout::vertical([
        Constraint::Length(navbar_height),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(full_area);

    app.navigation.set_viewport(page_area.height, &app.layout);

    let mut hits = HitMap::default();
    let cursor = {
        let app: &App = app;

        let mut cursor = page::draw_page(f, page_area, app, now, &mut hits);

        navbar::draw_navbar(f, navbar_area, app, &mut hits);
        if app.navigation.is_menu_open() {
            navbar::draw_menu(f, page_area, app, &mut hits);
            cursor = None;
        }

        draw_footer(f, footer_area, app);

        if app.modal.is_visible() {
            cursor = modal::draw_modal(f, full_area, app, now, &mut hits);
        }

        cursor
    };

    // The cursor would trail behind a scroll animation.
    if let Some(position) = cursor.filter(|_| !app.navigation.is_scrolling()) {
        f.set_cursor_position(position);
    }

    app.hits = hits;
}

fn draw_footer(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;

    let line = match &app.status {
        Some(notice) => Line::from(Span::styled(
            notice.message.as_str(),
            Style::default().fg(notice_colour(notice.kind, theme)),
        )),
        None => {
            let hint = |key: &'static str, action: &'static str| {
                [
                    Span::styled(key, Style::default().fg(theme.accent_colour).add_modifier(Modifier::BOLD)),
                    Span::styled(format!(" {}  ", action), Style::default().fg(theme.muted_fg)),
                ]
            };

            Line::from(
                [
                    hint("q", "quit"),
                    hint("Tab", "menu"),
                    hint("Space", "play/pause"),
                    hint("Alt+\u{2190}/\u{2192}", "track"),
                    hint("c", "contact"),
                    hint("j/k", "scroll"),
                ]
                .into_iter()
                .flatten()
                .collect::<Vec<_>>(),
            )
        }
    };

    f.render_widget(
        Paragraph::new(line).style(Style::default().bg(theme.surface_colour)),
        area,
    );
}

/// The centred content column of a page section.
fn content_area(area: Rect) -> Rect {
    let width = area.width.saturating_sub(4).min(MAX_CONTENT_WIDTH);
    Rect::new(area.x + (area.width - width) / 2, area.y, width, area.height)
}

/// Draws a one-line button label and returns the region it covers.
fn draw_button(buf: &mut Buffer, x: u16, y: u16, label: &str, style: Style) -> Rect {
    let max_width = buf.area.right().saturating_sub(x);
    let (end, _) = buf.set_line(x, y, &Line::styled(label, style), max_width);
    Rect::new(x, y, end.saturating_sub(x), 1)
}

/// Draws a section heading with a subtitle beneath it, using two rows.
fn draw_heading(buf: &mut Buffer, area: Rect, title: &str, subtitle: &str, theme: &Theme) {
    let title_area = Rect { height: 1, ..area };
    let subtitle_area = Rect {
        y: area.y + 1,
        height: 1,
        ..area
    };

    Paragraph::new(Line::styled(
        title,
        Style::default().fg(theme.heading_fg).add_modifier(Modifier::BOLD),
    ))
    .centered()
    .render(title_area, buf);

    Paragraph::new(Line::styled(subtitle, Style::default().fg(theme.muted_fg)))
        .centered()
        .render(subtitle_area, buf);
}

/// Style for a toggle control, highlighted when on.
fn toggle_style(on: bool, theme: &Theme) -> Style {
    if on {
        Style::default().fg(theme.accent_colour).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.muted_fg)
    }
}

fn notice_colour(kind: NoticeKind, theme: &Theme) -> Color {
    match kind {
        NoticeKind::Success => theme.success_fg,
        NoticeKind::Error => theme.error_fg,
    }
}
