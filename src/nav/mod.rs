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

//! Page navigation and scrolling.
//!
//! The page is a fixed column of [`Section`]s taller than the terminal. This
//! module owns the scroll offset into it, the section menu, and the record of
//! which sections have been revealed. It also forwards the global playback
//! shortcuts to the playlist controller.
//!
//! Offsets and heights are measured in rows from the top of the page.

pub(crate) mod history;

use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::{
    model::content::Section,
    player::AudioOutput,
    playlist::{Direction, PlaylistController},
};

pub(crate) const SCROLL_ANIMATION: Duration = Duration::from_millis(400);

/// The navbar goes compact once the page is scrolled past this many rows.
pub(crate) const COMPACT_OFFSET: u16 = 5;

pub(crate) const REVEAL_DURATION: Duration = Duration::from_millis(600);

/// Rows at the bottom of the viewport that do not count towards a reveal.
const REVEAL_BOTTOM_MARGIN: u16 = 2;

/// Vertical position and height of every section, in page rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PageLayout {
    tops: [u16; Section::ALL.len()],
    heights: [u16; Section::ALL.len()],
}

impl PageLayout {
    /// Stacks sections of the given heights, in page order.
    pub(crate) fn new(heights: [u16; Section::ALL.len()]) -> Self {
        let mut tops = [0; Section::ALL.len()];
        let mut y: u16 = 0;
        for (top, height) in tops.iter_mut().zip(heights) {
            *top = y;
            y = y.saturating_add(height);
        }

        Self { tops, heights }
    }

    pub(crate) fn top(&self, section: Section) -> u16 {
        self.tops[section.index()]
    }

    pub(crate) fn height(&self, section: Section) -> u16 {
        self.heights[section.index()]
    }

    pub(crate) fn total(&self) -> u16 {
        let last = Section::ALL.len() - 1;
        self.tops[last].saturating_add(self.heights[last])
    }

    /// The section containing `row`. Rows past the end belong to the last one.
    pub(crate) fn section_at(&self, row: u16) -> Section {
        Section::ALL
            .into_iter()
            .rev()
            .find(|s| self.top(*s) <= row && self.height(*s) > 0)
            .unwrap_or(Section::Home)
    }
}

#[derive(Debug, Clone, Copy)]
struct ScrollAnimation {
    from: u16,
    to: u16,
    started: Instant,
}

pub(crate) struct Navigation {
    menu_open: bool,
    menu_cursor: usize,

    offset: u16,
    viewport: u16,
    animation: Option<ScrollAnimation>,

    revealed: [Option<Instant>; Section::ALL.len()],
}

impl Navigation {
    pub(crate) fn new() -> Self {
        Self {
            menu_open: false,
            menu_cursor: 0,
            offset: 0,
            viewport: 0,
            animation: None,
            revealed: [None; Section::ALL.len()],
        }
    }

    pub(crate) fn toggle_menu(&mut self) {
        self.menu_open = !self.menu_open;
    }

    pub(crate) fn close_menu(&mut self) {
        self.menu_open = false;
    }

    pub(crate) fn is_menu_open(&self) -> bool {
        self.menu_open
    }

    pub(crate) fn menu_cursor(&self) -> Section {
        Section::ALL[self.menu_cursor]
    }

    pub(crate) fn menu_next(&mut self) {
        self.menu_cursor = (self.menu_cursor + 1) % Section::ALL.len();
    }

    pub(crate) fn menu_previous(&mut self) {
        let len = Section::ALL.len();
        self.menu_cursor = (self.menu_cursor + len - 1) % len;
    }

    /// Closes the menu and smooth-scrolls to `section`.
    pub(crate) fn select(&mut self, section: Section, layout: &PageLayout, now: Instant) {
        tracing::debug!(anchor = section.anchor(), "navigating to section");

        self.menu_open = false;
        self.menu_cursor = section.index();
        self.scroll_to(layout.top(section), layout, now);
    }

    /// Starts a smooth scroll towards `target`.
    pub(crate) fn scroll_to(&mut self, target: u16, layout: &PageLayout, now: Instant) {
        let to = target.min(self.max_offset(layout));
        self.animation = (to != self.offset).then_some(ScrollAnimation {
            from: self.offset,
            to,
            started: now,
        });
    }

    /// Scrolls immediately, cancelling any smooth scroll in progress.
    pub(crate) fn scroll_by(&mut self, rows: i32, layout: &PageLayout) {
        let max = i32::from(self.max_offset(layout));
        let offset = (i32::from(self.offset) + rows).clamp(0, max);

        self.animation = None;
        self.offset = u16::try_from(offset).unwrap_or(0);
    }

    pub(crate) fn page_up(&mut self, layout: &PageLayout) {
        self.scroll_by(-i32::from(self.page_rows()), layout);
    }

    pub(crate) fn page_down(&mut self, layout: &PageLayout) {
        self.scroll_by(i32::from(self.page_rows()), layout);
    }

    pub(crate) fn scroll_home(&mut self) {
        self.animation = None;
        self.offset = 0;
    }

    pub(crate) fn scroll_end(&mut self, layout: &PageLayout) {
        self.animation = None;
        self.offset = self.max_offset(layout);
    }

    /// Sets the number of page rows visible at once.
    pub(crate) fn set_viewport(&mut self, rows: u16, layout: &PageLayout) {
        self.viewport = rows;
        self.offset = self.offset.min(self.max_offset(layout));
    }

    /// Advances a smooth scroll and records newly revealed sections.
    pub(crate) fn tick(&mut self, now: Instant, layout: &PageLayout) {
        if let Some(animation) = self.animation {
            let t = now.saturating_duration_since(animation.started).as_secs_f64()
                / SCROLL_ANIMATION.as_secs_f64();

            if t >= 1.0 {
                self.offset = animation.to;
                self.animation = None;
            } else {
                let from = f64::from(animation.from);
                let to = f64::from(animation.to);
                self.offset = (from + (to - from) * ease_in_out(t)).round() as u16;
            }
        }

        self.update_reveals(now, layout);
    }

    pub(crate) fn offset(&self) -> u16 {
        self.offset
    }

    pub(crate) fn is_scrolling(&self) -> bool {
        self.animation.is_some()
    }

    pub(crate) fn is_compact(&self) -> bool {
        self.offset > COMPACT_OFFSET
    }

    /// The section under the top third of the viewport.
    pub(crate) fn focused_section(&self, layout: &PageLayout) -> Section {
        layout.section_at(self.offset.saturating_add(self.viewport / 3))
    }

    /// Reveal animation progress, from 0 (not yet revealed) to 1 (settled).
    pub(crate) fn reveal_progress(&self, section: Section, now: Instant) -> f64 {
        match self.revealed[section.index()] {
            None => 0.0,
            Some(started) => (now.saturating_duration_since(started).as_secs_f64()
                / REVEAL_DURATION.as_secs_f64())
            .min(1.0),
        }
    }

    fn update_reveals(&mut self, now: Instant, layout: &PageLayout) {
        let visible_top = self.offset;
        let visible_bottom = self
            .offset
            .saturating_add(self.viewport.saturating_sub(REVEAL_BOTTOM_MARGIN));

        for section in Section::ALL {
            let slot = &mut self.revealed[section.index()];
            if slot.is_some() {
                continue;
            }

            let height = layout.height(section);
            if height == 0 {
                continue;
            }

            let top = layout.top(section);
            let bottom = top.saturating_add(height);
            let overlap = bottom.min(visible_bottom).saturating_sub(top.max(visible_top));

            if f64::from(overlap) / f64::from(height) >= reveal_threshold(section) {
                *slot = Some(now);
            }
        }
    }

    fn max_offset(&self, layout: &PageLayout) -> u16 {
        layout.total().saturating_sub(self.viewport)
    }

    fn page_rows(&self) -> u16 {
        self.viewport.saturating_sub(2).max(1)
    }
}

/// Fraction of a section that must be on screen before it reveals.
pub(crate) fn reveal_threshold(section: Section) -> f64 {
    match section {
        Section::Music | Section::Gallery => 0.2,
        _ => 0.1,
    }
}

/// Rows a section is drawn below its resting place when it starts revealing.
pub(crate) fn reveal_shift(section: Section) -> u16 {
    match section {
        Section::Music | Section::Gallery => 3,
        _ => 2,
    }
}

fn ease_in_out(t: f64) -> f64 {
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

/// Whether `key` is one of the global playback shortcuts.
pub(crate) fn is_shortcut(key: &KeyEvent) -> bool {
    matches!(
        (key.code, key.modifiers),
        (KeyCode::Char(' '), _)
            | (KeyCode::Left | KeyCode::Right, KeyModifiers::ALT)
            | (KeyCode::Char('m'), KeyModifiers::NONE)
    )
}

/// Applies a global playback shortcut. Returns `true` if `key` was one.
///
/// Keys typed into a text field must be routed to that field instead.
pub(crate) fn forward_shortcut<O: AudioOutput>(
    key: &KeyEvent,
    playlist: &mut PlaylistController<O>,
) -> bool {
    if !is_shortcut(key) {
        return false;
    }

    match (key.code, key.modifiers) {
        (KeyCode::Char(' '), _) => playlist.toggle_playback(),
        (KeyCode::Left, KeyModifiers::ALT) => playlist.advance(Direction::Previous),
        (KeyCode::Right, KeyModifiers::ALT) => playlist.advance(Direction::Next),
        (KeyCode::Char('m'), _) => playlist.toggle_mute(),
        _ => return false,
    }

    true
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use anyhow::Result;

    use super::*;
    use crate::{
        model::catalog,
        player::AudioEvent,
        playlist::PlaybackStatus,
        store::MemoryStore,
    };

    // Home 10, About 10, Music 20, Gallery 20, Discography 10, Contact 10.
    fn layout() -> PageLayout {
        PageLayout::new([10, 10, 20, 20, 10, 10])
    }

    fn navigation(viewport: u16) -> Navigation {
        let mut nav = Navigation::new();
        nav.set_viewport(viewport, &layout());
        nav
    }

    #[test]
    fn layout_stacks_sections() {
        let layout = layout();
        assert_eq!(layout.top(Section::Home), 0);
        assert_eq!(layout.top(Section::Music), 20);
        assert_eq!(layout.top(Section::Contact), 70);
        assert_eq!(layout.total(), 80);

        assert_eq!(layout.section_at(0), Section::Home);
        assert_eq!(layout.section_at(19), Section::About);
        assert_eq!(layout.section_at(20), Section::Music);
        assert_eq!(layout.section_at(500), Section::Contact);
    }

    #[test]
    fn smooth_scroll_eases_to_target() {
        let layout = layout();
        let mut nav = navigation(20);
        let now = Instant::now();

        nav.select(Section::Music, &layout, now);
        assert!(nav.is_scrolling());

        nav.tick(now + SCROLL_ANIMATION / 2, &layout);
        assert_eq!(nav.offset(), 10);

        nav.tick(now + SCROLL_ANIMATION, &layout);
        assert_eq!(nav.offset(), 20);
        assert!(!nav.is_scrolling());
    }

    #[test]
    fn scroll_target_is_clamped_to_page_end() {
        let layout = layout();
        let mut nav = navigation(20);
        let now = Instant::now();

        nav.select(Section::Contact, &layout, now);
        nav.tick(now + SCROLL_ANIMATION, &layout);
        assert_eq!(nav.offset(), 60);
    }

    #[test]
    fn direct_scroll_cancels_animation() {
        let layout = layout();
        let mut nav = navigation(20);
        let now = Instant::now();

        nav.select(Section::Gallery, &layout, now);
        nav.scroll_by(3, &layout);
        assert!(!nav.is_scrolling());
        assert_eq!(nav.offset(), 3);

        nav.tick(now + SCROLL_ANIMATION, &layout);
        assert_eq!(nav.offset(), 3);

        nav.scroll_by(-10, &layout);
        assert_eq!(nav.offset(), 0);

        nav.scroll_end(&layout);
        assert_eq!(nav.offset(), 60);
        nav.scroll_home();
        assert_eq!(nav.offset(), 0);
    }

    #[test]
    fn navbar_goes_compact_past_threshold() {
        let layout = layout();
        let mut nav = navigation(20);

        nav.scroll_by(i32::from(COMPACT_OFFSET), &layout);
        assert!(!nav.is_compact());
        nav.scroll_by(1, &layout);
        assert!(nav.is_compact());
    }

    #[test]
    fn selecting_closes_menu() {
        let layout = layout();
        let mut nav = navigation(20);

        nav.toggle_menu();
        assert!(nav.is_menu_open());
        nav.menu_previous();
        assert_eq!(nav.menu_cursor(), Section::Contact);

        nav.select(Section::About, &layout, Instant::now());
        assert!(!nav.is_menu_open());
        assert_eq!(nav.menu_cursor(), Section::About);
    }

    #[test]
    fn reveal_needs_a_larger_share_for_music() {
        let layout = layout();
        let now = Instant::now();

        // Viewport rows 0..22 count, Music (20..40) shows 2 of 20 rows.
        let mut nav = navigation(24);
        nav.tick(now, &layout);
        assert!(nav.revealed[Section::About.index()].is_some());
        assert!(nav.revealed[Section::Music.index()].is_none());

        // Four rows of Music is 20%.
        nav.scroll_by(2, &layout);
        nav.tick(now, &layout);
        assert!(nav.revealed[Section::Music.index()].is_some());
    }

    #[test]
    fn bottom_margin_is_excluded_from_reveal() {
        let layout = layout();
        let now = Instant::now();

        // Rows 0..10 count, About starts at row 10.
        let mut nav = navigation(12);
        nav.tick(now, &layout);
        assert!(nav.revealed[Section::Home.index()].is_some());
        assert!(nav.revealed[Section::About.index()].is_none());

        nav.scroll_by(1, &layout);
        nav.tick(now, &layout);
        assert!(nav.revealed[Section::About.index()].is_some());
    }

    #[test]
    fn reveal_animates_and_never_reverts() {
        let layout = layout();
        let now = Instant::now();
        let mut nav = navigation(20);

        assert_eq!(nav.reveal_progress(Section::Home, now), 0.0);
        nav.tick(now, &layout);
        assert!((nav.reveal_progress(Section::Home, now + REVEAL_DURATION / 2) - 0.5).abs() < 1e-6);
        assert_eq!(nav.reveal_progress(Section::Home, now + REVEAL_DURATION * 2), 1.0);

        nav.scroll_end(&layout);
        nav.tick(now + REVEAL_DURATION * 3, &layout);
        assert_eq!(nav.reveal_progress(Section::Home, now + REVEAL_DURATION * 3), 1.0);
    }

    #[test]
    fn focus_follows_top_third() {
        let layout = layout();
        let mut nav = navigation(30);
        assert_eq!(nav.focused_section(&layout), Section::About);

        nav.scroll_by(15, &layout);
        assert_eq!(nav.focused_section(&layout), Section::Music);
    }

    #[derive(Default)]
    struct SilentOutput {
        source: Option<String>,
    }

    impl AudioOutput for SilentOutput {
        fn set_source(&mut self, src: &str) -> Result<()> {
            self.source = Some(src.to_string());
            Ok(())
        }

        fn source(&self) -> Option<&str> {
            self.source.as_deref()
        }

        fn begin_playback(&mut self) -> Result<()> {
            Ok(())
        }

        fn pause(&mut self) -> Result<()> {
            Ok(())
        }

        fn position(&self) -> f64 {
            0.0
        }

        fn set_position(&mut self, _seconds: f64) -> Result<()> {
            Ok(())
        }

        fn duration(&self) -> Option<f64> {
            None
        }

        fn set_volume(&mut self, _volume: f64) -> Result<()> {
            Ok(())
        }

        fn observe(&mut self, _event: &AudioEvent) {}
    }

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn shortcuts_drive_the_playlist() {
        let tracks = catalog(Path::new("assets"));
        let mut playlist = PlaylistController::new(
            tracks,
            SilentOutput::default(),
            Box::new(MemoryStore::new()),
        );

        assert!(forward_shortcut(&key(KeyCode::Char(' '), KeyModifiers::NONE), &mut playlist));
        assert_eq!(playlist.status(), PlaybackStatus::Loading);
        assert_eq!(playlist.position(), 0);

        assert!(forward_shortcut(&key(KeyCode::Right, KeyModifiers::ALT), &mut playlist));
        assert_eq!(playlist.position(), 1);
        assert!(forward_shortcut(&key(KeyCode::Left, KeyModifiers::ALT), &mut playlist));
        assert_eq!(playlist.position(), 0);

        assert!(forward_shortcut(&key(KeyCode::Char('m'), KeyModifiers::NONE), &mut playlist));
        assert!(playlist.is_muted());

        assert!(!forward_shortcut(&key(KeyCode::Left, KeyModifiers::NONE), &mut playlist));
        assert!(!forward_shortcut(&key(KeyCode::Char('x'), KeyModifiers::NONE), &mut playlist));
    }
}
