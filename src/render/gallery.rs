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

//! Render the gallery carousel.

use std::time::Instant;

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph, Widget, Wrap},
};

use crate::{
    App,
    model::content::Slide,
    render::{
        content_area, draw_button, draw_heading,
        hits::{Hit, HitMap},
        icons::{ICON_CHEVRON_LEFT, ICON_CHEVRON_RIGHT, ICON_DOT, ICON_DOT_ACTIVE},
    },
    theme::Theme,
};

const FRAME_HEIGHT: u16 = 11;

pub(super) fn draw_gallery(buf: &mut Buffer, area: Rect, app: &App, now: Instant, hits: &mut HitMap) {
    let theme = &app.theme;
    let gallery = &app.gallery;
    let content = content_area(area);

    let [heading, _, frame, controls, status] = Layout::vertical([
        Constraint::Length(2),
        Constraint::Length(1),
        Constraint::Length(FRAME_HEIGHT),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(content);

    draw_heading(buf, heading, "GALLERY", "On stage and behind the scenes", theme);

    // The carousel region goes first so the controls pushed after it win.
    hits.push(frame.union(controls), Hit::Gallery);

    let block = Block::bordered().border_style(Style::default().fg(theme.border_colour));
    let inner = block.inner(frame);
    block.render(frame, buf);

    match gallery.transition(now) {
        Some((_, progress)) => {
            let shift = ((1.0 - progress) * f64::from(inner.width) / 3.0).round() as u16;
            let shifted = Rect {
                x: inner.x + shift.min(inner.width),
                width: inner.width.saturating_sub(shift),
                ..inner
            };
            draw_slide(buf, shifted, gallery.current_slide(), theme, true);
        }
        None => draw_slide(buf, inner, gallery.current_slide(), theme, false),
    }

    draw_controls(buf, controls, app, hits);

    let status_text = if gallery.is_auto_advancing() {
        "Auto-advancing   p pause"
    } else {
        "Paused   p resume"
    };
    Paragraph::new(Line::styled(status_text, Style::default().fg(theme.muted_fg)))
        .centered()
        .render(status, buf);
}

fn draw_slide(buf: &mut Buffer, area: Rect, slide: &Slide, theme: &Theme, dim: bool) {
    let [_, image, _, title, caption] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(2),
    ])
    .areas(area);

    let base = if dim {
        Style::default().add_modifier(Modifier::DIM)
    } else {
        Style::default()
    };

    Paragraph::new(Line::styled(
        format!("\u{25A3} {}", slide.image),
        base.fg(theme.muted_fg).add_modifier(Modifier::ITALIC),
    ))
    .centered()
    .render(image, buf);

    Paragraph::new(Line::styled(
        slide.title.as_str(),
        base.fg(theme.heading_fg).add_modifier(Modifier::BOLD),
    ))
    .centered()
    .render(title, buf);

    Paragraph::new(Line::styled(slide.caption.as_str(), base.fg(theme.text_fg)))
        .centered()
        .wrap(Wrap { trim: true })
        .render(caption, buf);
}

/// Previous and next buttons either side of the slide indicators.
fn draw_controls(buf: &mut Buffer, area: Rect, app: &App, hits: &mut HitMap) {
    let theme = &app.theme;
    let gallery = &app.gallery;

    let enabled = Style::default().fg(theme.accent_colour).add_modifier(Modifier::BOLD);
    let disabled = Style::default().fg(theme.disabled_fg);

    let previous = draw_button(
        buf,
        area.x,
        area.y,
        &format!("{} Prev", ICON_CHEVRON_LEFT),
        if gallery.can_go_previous() { enabled } else { disabled },
    );
    hits.push(previous, Hit::SlidePrevious);

    let next_label = format!("Next {}", ICON_CHEVRON_RIGHT);
    let next_width = next_label.chars().count() as u16;
    let next = draw_button(
        buf,
        area.right().saturating_sub(next_width),
        area.y,
        &next_label,
        if gallery.can_go_next() { enabled } else { disabled },
    );
    hits.push(next, Hit::SlideNext);

    let counter = format!("  {} / {}", gallery.current() + 1, gallery.len());
    let width = (gallery.len() * 2) as u16 + counter.chars().count() as u16;
    let mut x = area.x + area.width.saturating_sub(width) / 2;

    for index in 0..gallery.len() {
        let (icon, style) = if index == gallery.current() {
            (ICON_DOT_ACTIVE, Style::default().fg(theme.accent_colour))
        } else {
            (ICON_DOT, Style::default().fg(theme.muted_fg))
        };
        let dot = draw_button(buf, x, area.y, icon, style);
        hits.push(dot, Hit::SlideDot(index));
        x = dot.right() + 1;
    }

    buf.set_line(
        x,
        area.y,
        &Line::from(Span::styled(counter, Style::default().fg(theme.muted_fg))),
        area.right().saturating_sub(x),
    );
}
