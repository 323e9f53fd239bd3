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

//! Page composition.
//!
//! The whole page is drawn into an off-screen buffer as tall as every
//! section together, then the rows under the scroll offset are copied into
//! the viewport. Reveal animations are applied during the copy: a section
//! that has not been revealed is left blank, and a revealing one is dimmed
//! and drawn a few rows below its resting place.

use std::time::Instant;

use ratatui::{
    Frame,
    buffer::Buffer,
    layout::{Position, Rect},
    style::{Modifier, Style},
};

use crate::{
    App,
    model::content::Section,
    nav::{Navigation, PageLayout, reveal_shift},
    render::{gallery, hits::HitMap, player, sections},
};

/// Section heights in page order: Home, About, Music, Gallery, Discography,
/// Contact.
const SECTION_HEIGHTS: [u16; Section::ALL.len()] = [12, 14, 24, 17, 12, 22];

pub(crate) fn page_layout() -> PageLayout {
    PageLayout::new(SECTION_HEIGHTS)
}

/// Draws the visible part of the page into `viewport`.
///
/// Returns the screen position of the contact form's text cursor, if the
/// form is being edited and the cursor is on screen.
pub(super) fn draw_page(
    f: &mut Frame,
    viewport: Rect,
    app: &App,
    now: Instant,
    hits: &mut HitMap,
) -> Option<Position> {
    let layout = &app.layout;

    let mut page = Buffer::empty(Rect::new(0, 0, viewport.width, layout.total()));
    let mut page_hits = HitMap::default();
    let mut cursor = None;

    for section in Section::ALL {
        let area = Rect::new(0, layout.top(section), viewport.width, layout.height(section));
        match section {
            Section::Home => sections::draw_hero(&mut page, area, app, &mut page_hits),
            Section::About => sections::draw_about(&mut page, area, app),
            Section::Music => player::draw_music(&mut page, area, app, &mut page_hits),
            Section::Gallery => gallery::draw_gallery(&mut page, area, app, now, &mut page_hits),
            Section::Discography => sections::draw_discography(&mut page, area, app),
            Section::Contact => {
                cursor = sections::draw_contact(&mut page, area, app, &mut page_hits)
            }
        }
    }

    let offset = app.navigation.offset();
    let buf = f.buffer_mut();

    for row in 0..viewport.height {
        let source = source_row(app, offset.saturating_add(row), now);

        for column in 0..viewport.width {
            let Some(target) = buf.cell_mut((viewport.x + column, viewport.y + row)) else {
                continue;
            };

            match source.and_then(|(r, dim)| page.cell((column, r)).map(|cell| (cell, dim))) {
                Some((cell, dim)) => {
                    *target = cell.clone();
                    if dim {
                        target.set_style(Style::default().add_modifier(Modifier::DIM));
                    }
                }
                None => {
                    target.reset();
                }
            }
        }
    }

    hits.extend_scrolled(settled_hits(page_hits, app, now), offset, viewport);

    cursor.and_then(|p| {
        let visible = p.y >= offset && p.y - offset < viewport.height;
        let settled = app.navigation.reveal_progress(Section::Contact, now) >= 1.0;
        (visible && settled).then(|| Position::new(viewport.x + p.x, viewport.y + (p.y - offset)))
    })
}

/// Drops regions in sections that are hidden or still moving into place, so
/// only what is drawn at rest can be clicked.
fn settled_hits(mut page_hits: HitMap, app: &App, now: Instant) -> HitMap {
    settle(&mut page_hits, &app.layout, &app.navigation, now);
    page_hits
}

fn settle(page_hits: &mut HitMap, layout: &PageLayout, navigation: &Navigation, now: Instant) {
    page_hits.retain(|rect, _| navigation.reveal_progress(layout.section_at(rect.y), now) >= 1.0);
}

/// The page row to show at page row `row`, and whether it is dimmed.
///
/// `None` means the row is blank: past the end of the page, in a section not
/// yet revealed, or in the gap a shifted section leaves above itself.
fn source_row(app: &App, row: u16, now: Instant) -> Option<(u16, bool)> {
    if row >= app.layout.total() {
        return None;
    }

    let section = app.layout.section_at(row);
    let progress = app.navigation.reveal_progress(section, now);
    if progress <= 0.0 {
        return None;
    }

    let shift = ((1.0 - progress) * f64::from(reveal_shift(section))).round() as u16;
    let source = row
        .checked_sub(shift)
        .filter(|r| *r >= app.layout.top(section))?;

    Some((source, progress < 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{nav::REVEAL_DURATION, render::hits::Hit};

    fn page_hits(layout: &PageLayout) -> HitMap {
        let mut hits = HitMap::default();
        hits.push(Rect::new(4, layout.top(Section::Home) + 2, 10, 1), Hit::OpenModal);
        hits.push(Rect::new(4, layout.top(Section::Music) + 15, 40, 1), Hit::Track(0));
        hits
    }

    #[test]
    fn hidden_and_revealing_sections_are_not_clickable() {
        let layout = page_layout();
        let now = Instant::now();
        let home_row = layout.top(Section::Home) + 2;
        let track_row = layout.top(Section::Music) + 15;

        let mut nav = Navigation::new();
        nav.set_viewport(20, &layout);
        nav.tick(now, &layout);

        // Home has just started revealing, Music has not been reached.
        let mut hits = page_hits(&layout);
        settle(&mut hits, &layout, &nav, now);
        assert_eq!(hits.at(5, home_row), None);
        assert_eq!(hits.at(5, track_row), None);

        let mut hits = page_hits(&layout);
        settle(&mut hits, &layout, &nav, now + REVEAL_DURATION);
        assert_eq!(hits.at(5, home_row).map(|(_, h)| h), Some(Hit::OpenModal));
        assert_eq!(hits.at(5, track_row), None);
    }
}
