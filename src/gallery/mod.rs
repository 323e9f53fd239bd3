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

//! Gallery carousel.
//!
//! Shows one slide at a time. Slides change by manual navigation, a drag
//! gesture, or automatically on a fixed interval. Every change starts a
//! [`TRANSITION`] during which further changes are ignored, and manual
//! changes restart the auto-advance interval.

use std::time::{Duration, Instant};

use crate::model::content::Slide;

pub(crate) const TRANSITION: Duration = Duration::from_millis(500);

/// Minimum horizontal drag, in columns, recognised as a swipe.
pub(crate) const SWIPE_THRESHOLD: u16 = 6;

#[derive(Debug, thiserror::Error)]
pub(crate) enum GalleryError {
    #[error("gallery has no slides")]
    NoSlides,
}

#[derive(Debug, Clone, Copy)]
struct SlideChange {
    from: usize,
    started: Instant,
}

pub(crate) struct Gallery {
    slides: Vec<Slide>,
    current: usize,
    change: Option<SlideChange>,

    interval: Duration,
    /// Deadline of the next automatic advance, `None` while paused.
    next_advance: Option<Instant>,

    drag_origin: Option<u16>,
}

impl Gallery {
    /// Creates a carousel showing the first slide with auto-advance running.
    ///
    /// # Errors
    ///
    /// Fails if `slides` is empty.
    pub(crate) fn new(slides: Vec<Slide>, interval: Duration, now: Instant) -> Result<Self, GalleryError> {
        if slides.is_empty() {
            return Err(GalleryError::NoSlides);
        }

        tracing::debug!(slides = slides.len(), "gallery initialised");

        Ok(Self {
            slides,
            current: 0,
            change: None,
            interval,
            next_advance: Some(now + interval),
            drag_origin: None,
        })
    }

    pub(crate) fn next(&mut self, now: Instant) -> bool {
        let index = (self.current + 1) % self.slides.len();
        self.show(index, now)
    }

    pub(crate) fn previous(&mut self, now: Instant) -> bool {
        let len = self.slides.len();
        let index = (self.current + len - 1) % len;
        self.show(index, now)
    }

    /// Jumps to `index`; out-of-range indices are ignored.
    pub(crate) fn go_to(&mut self, index: usize, now: Instant) -> bool {
        if index >= self.slides.len() {
            return false;
        }
        self.show(index, now)
    }

    /// Stops auto-advance, e.g. while the pointer hovers the carousel.
    pub(crate) fn pause(&mut self) {
        self.next_advance = None;
    }

    /// Resumes auto-advance with a full interval.
    pub(crate) fn play(&mut self, now: Instant) {
        if self.next_advance.is_none() {
            self.next_advance = Some(now + self.interval);
        }
    }

    pub(crate) fn toggle_auto_advance(&mut self, now: Instant) {
        if self.is_auto_advancing() {
            self.pause();
        } else {
            self.play(now);
        }
    }

    pub(crate) fn begin_drag(&mut self, column: u16) {
        self.drag_origin = Some(column);
    }

    /// Ends a drag. Dragging left moves forward, dragging right moves back.
    pub(crate) fn end_drag(&mut self, column: u16, now: Instant) -> bool {
        let Some(origin) = self.drag_origin.take() else {
            return false;
        };

        let diff = i32::from(origin) - i32::from(column);
        if diff.unsigned_abs() <= u32::from(SWIPE_THRESHOLD) {
            return false;
        }

        if diff > 0 {
            self.next(now)
        } else {
            self.previous(now)
        }
    }

    pub(crate) fn tick(&mut self, now: Instant) {
        if self
            .change
            .is_some_and(|c| now >= c.started + TRANSITION)
        {
            self.change = None;
        }

        if self.next_advance.is_some_and(|at| now >= at) {
            self.next(now);
        }
    }

    pub(crate) fn current(&self) -> usize {
        self.current
    }

    pub(crate) fn current_slide(&self) -> &Slide {
        &self.slides[self.current]
    }

    pub(crate) fn len(&self) -> usize {
        self.slides.len()
    }

    pub(crate) fn is_auto_advancing(&self) -> bool {
        self.next_advance.is_some()
    }

    pub(crate) fn can_go_previous(&self) -> bool {
        self.current > 0
    }

    pub(crate) fn can_go_next(&self) -> bool {
        self.current + 1 < self.slides.len()
    }

    /// The slide being left and the transition progress, while a change runs.
    pub(crate) fn transition(&self, now: Instant) -> Option<(usize, f64)> {
        self.change.map(|c| {
            let progress = now.saturating_duration_since(c.started).as_secs_f64() / TRANSITION.as_secs_f64();
            (c.from, progress.min(1.0))
        })
    }

    fn in_transition(&self, now: Instant) -> bool {
        self.change.is_some_and(|c| now < c.started + TRANSITION)
    }

    fn show(&mut self, index: usize, now: Instant) -> bool {
        if self.in_transition(now) {
            return false;
        }

        self.change = Some(SlideChange {
            from: self.current,
            started: now,
        });
        self.current = index;

        if self.next_advance.is_some() {
            self.next_advance = Some(now + self.interval);
        }

        true
    }
}
