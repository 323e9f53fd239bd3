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

//! Clickable screen regions.
//!
//! Rebuilt on every frame. Regions are recorded in drawing order, so when
//! regions overlap the one drawn last, which is the one on top, wins.

use ratatui::layout::{Position, Rect};

use crate::{form::FormKind, model::content::Section};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Hit {
    MenuToggle,
    MenuEntry(Section),
    OpenModal,

    Track(usize),
    PreviousTrack,
    PlayPause,
    NextTrack,
    Shuffle,
    Repeat,
    Mute,
    Volume,
    Progress,

    /// The carousel frame, used for hover and drag.
    Gallery,
    SlidePrevious,
    SlideNext,
    SlideDot(usize),

    Field(FormKind, usize),
    Submit(FormKind),

    ModalClose,
    ModalBackdrop,
    ModalDialog,
}

#[derive(Debug, Default)]
pub(crate) struct HitMap {
    regions: Vec<(Rect, Hit)>,
}

impl HitMap {
    pub(crate) fn push(&mut self, rect: Rect, hit: Hit) {
        if !rect.is_empty() {
            self.regions.push((rect, hit));
        }
    }

    /// The topmost region under the given cell.
    pub(crate) fn at(&self, column: u16, row: u16) -> Option<(Rect, Hit)> {
        let position = Position::new(column, row);
        self.regions
            .iter()
            .rev()
            .find(|(rect, _)| rect.contains(position))
            .copied()
    }

    /// Keeps only the regions for which `keep` returns `true`.
    pub(crate) fn retain(&mut self, mut keep: impl FnMut(Rect, Hit) -> bool) {
        self.regions.retain(|(rect, hit)| keep(*rect, *hit));
    }

    /// Adds regions recorded against a scrolled page, moving them into the
    /// `viewport` showing page rows from `offset` down. Regions outside the
    /// viewport are dropped and partly visible ones clipped.
    pub(crate) fn extend_scrolled(&mut self, page: HitMap, offset: u16, viewport: Rect) {
        let visible_end = offset.saturating_add(viewport.height);

        for (rect, hit) in page.regions {
            let top = rect.y.max(offset);
            let bottom = rect.bottom().min(visible_end);
            if top >= bottom {
                continue;
            }

            let moved = Rect::new(
                viewport.x.saturating_add(rect.x),
                viewport.y + (top - offset),
                rect.width,
                bottom - top,
            );
            self.push(moved.intersection(viewport), hit);
        }
    }
}
