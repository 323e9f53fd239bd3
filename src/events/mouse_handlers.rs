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

//! Mouse routing.
//!
//! Clicks are resolved against the hit regions recorded while drawing the
//! last frame, so what is clicked is always what was on screen.

use std::time::Instant;

use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;

use crate::{
    App,
    events::handlers::submit_contact,
    form::FormKind,
    modal::ModalPhase,
    playlist::Direction,
    render::hits::Hit,
};

const WHEEL_STEP: i32 = 3;

pub(super) fn process_mouse_event(app: &mut App, mouse: MouseEvent) {
    let now = Instant::now();

    match mouse.kind {
        MouseEventKind::ScrollDown if !app.modal.is_visible() => {
            app.navigation.scroll_by(WHEEL_STEP, &app.layout)
        }
        MouseEventKind::ScrollUp if !app.modal.is_visible() => {
            app.navigation.scroll_by(-WHEEL_STEP, &app.layout)
        }

        MouseEventKind::Down(MouseButton::Left) => {
            match app.hits.at(mouse.column, mouse.row) {
                Some((rect, hit)) => process_click(app, hit, rect, mouse.column, now),
                None => {
                    app.navigation.close_menu();
                    app.editing_contact = false;
                }
            }
        }

        MouseEventKind::Up(MouseButton::Left) => {
            app.gallery.end_drag(mouse.column, now);
        }

        MouseEventKind::Moved | MouseEventKind::Drag(MouseButton::Left) => {
            update_gallery_hover(app, mouse.column, mouse.row, now)
        }

        _ => {}
    }
}

fn process_click(app: &mut App, hit: Hit, rect: Rect, column: u16, now: Instant) {
    if app.modal.is_visible() {
        process_modal_click(app, hit, now);
        return;
    }

    if !matches!(hit, Hit::Field(FormKind::Main, _) | Hit::Submit(FormKind::Main)) {
        app.editing_contact = false;
    }

    if !matches!(hit, Hit::MenuToggle | Hit::MenuEntry(_)) {
        app.navigation.close_menu();
    }

    match hit {
        Hit::MenuToggle => app.navigation.toggle_menu(),
        Hit::MenuEntry(section) => app.navigation.select(section, &app.layout, now),
        Hit::OpenModal => {
            app.modal.open(now, &mut app.history);
        }

        Hit::Track(index) => app.playlist.play(index),
        Hit::PreviousTrack => app.playlist.advance(Direction::Previous),
        Hit::PlayPause => app.playlist.toggle_playback(),
        Hit::NextTrack => app.playlist.advance(Direction::Next),
        Hit::Shuffle => app.playlist.toggle_shuffle(),
        Hit::Repeat => app.playlist.toggle_repeat(),
        Hit::Mute => app.playlist.toggle_mute(),
        Hit::Volume => app.playlist.set_volume_percent(percent_at(rect, column)),
        Hit::Progress => app.playlist.seek_to_percent(percent_at(rect, column)),

        Hit::Gallery => app.gallery.begin_drag(column),
        // Edge buttons are disabled, unlike keys and swipes which wrap.
        Hit::SlidePrevious => {
            if app.gallery.can_go_previous() {
                app.gallery.previous(now);
            }
        }
        Hit::SlideNext => {
            if app.gallery.can_go_next() {
                app.gallery.next(now);
            }
        }
        Hit::SlideDot(index) => {
            app.gallery.go_to(index, now);
        }

        Hit::Field(FormKind::Main, index) => {
            app.editing_contact = true;
            app.contact_form.focus_field(index);
        }
        Hit::Submit(FormKind::Main) => {
            app.editing_contact = true;
            app.contact_form.focus_submit();
            if let Some(payload) = app.contact_form.begin_submit() {
                submit_contact(app, FormKind::Main, payload);
            }
        }

        Hit::Field(FormKind::Modal, _)
        | Hit::Submit(FormKind::Modal)
        | Hit::ModalClose
        | Hit::ModalBackdrop
        | Hit::ModalDialog => {}
    }
}

/// The backdrop covers the page, so only modal regions can be hit here.
fn process_modal_click(app: &mut App, hit: Hit, now: Instant) {
    match modal_click_action(hit, app.modal.phase()) {
        Some(ModalClick::Close) => {
            app.modal.close(now, &mut app.history);
        }
        Some(ModalClick::Focus(index)) => app.modal.form_mut().focus_field(index),
        Some(ModalClick::Submit) => {
            app.modal.form_mut().focus_submit();
            if let Some(payload) = app.modal.form_mut().begin_submit() {
                submit_contact(app, FormKind::Modal, payload);
            }
        }
        None => {}
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ModalClick {
    Close,
    Focus(usize),
    Submit,
}

/// What a click on the modal does. The form only takes clicks once the modal
/// is fully open, as it only takes keys then.
fn modal_click_action(hit: Hit, phase: ModalPhase) -> Option<ModalClick> {
    match hit {
        Hit::ModalClose | Hit::ModalBackdrop => Some(ModalClick::Close),
        Hit::Field(FormKind::Modal, index) if phase == ModalPhase::Open => {
            Some(ModalClick::Focus(index))
        }
        Hit::Submit(FormKind::Modal) if phase == ModalPhase::Open => Some(ModalClick::Submit),
        _ => None,
    }
}

/// Pauses auto-advance while the pointer is over the carousel.
fn update_gallery_hover(app: &mut App, column: u16, row: u16, now: Instant) {
    let hovered = !app.modal.is_visible()
        && app.hits.at(column, row).is_some_and(|(_, hit)| {
            matches!(
                hit,
                Hit::Gallery | Hit::SlidePrevious | Hit::SlideNext | Hit::SlideDot(_)
            )
        });

    if hovered == app.gallery_hovered {
        return;
    }

    app.gallery_hovered = hovered;
    if hovered {
        app.gallery.pause();
    } else {
        app.gallery.play(now);
    }
}

/// Horizontal click position within `rect`, as a percentage.
fn percent_at(rect: Rect, column: u16) -> f64 {
    if rect.width <= 1 {
        return 0.0;
    }

    let offset = column.saturating_sub(rect.x).min(rect.width - 1);
    f64::from(offset) / f64::from(rect.width - 1) * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn click_position_maps_to_percent() {
        let rect = Rect::new(10, 0, 11, 1);
        assert_eq!(percent_at(rect, 10), 0.0);
        assert_eq!(percent_at(rect, 15), 50.0);
        assert_eq!(percent_at(rect, 20), 100.0);
        assert_eq!(percent_at(rect, 99), 100.0);
        assert_eq!(percent_at(Rect::new(0, 0, 1, 1), 0), 0.0);
    }

    #[test]
    fn modal_form_ignores_clicks_while_animating() {
        let started = Instant::now();

        for phase in [ModalPhase::Opening { started }, ModalPhase::Closing { started }] {
            assert_eq!(modal_click_action(Hit::Submit(FormKind::Modal), phase), None);
            assert_eq!(modal_click_action(Hit::Field(FormKind::Modal, 1), phase), None);
            assert_eq!(modal_click_action(Hit::ModalClose, phase), Some(ModalClick::Close));
        }

        assert_eq!(
            modal_click_action(Hit::Submit(FormKind::Modal), ModalPhase::Open),
            Some(ModalClick::Submit)
        );
        assert_eq!(
            modal_click_action(Hit::Field(FormKind::Modal, 2), ModalPhase::Open),
            Some(ModalClick::Focus(2))
        );
        assert_eq!(modal_click_action(Hit::ModalDialog, ModalPhase::Open), None);
    }
}
