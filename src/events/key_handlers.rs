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

//! Keyboard routing.
//!
//! A key goes to the first of these that is active, and no further:
//!
//! * **Modal**: a visible modal captures everything, so the page cannot
//!   scroll underneath it.
//! * **Menu**: entry selection.
//! * **Contact form**: typing into the page's own form.
//! * **Shortcuts**: playback keys forwarded to the playlist.
//! * **Focused section**: keys that only apply to the section in view.
//! * **Global**: application control, playback policy and scrolling.

use std::time::Instant;

use anyhow::Result;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};

use crate::{
    App,
    events::{AppEvent, handlers::submit_contact},
    form::{FormAction, FormKind},
    model::content::Section,
    nav,
    playlist::{SEEK_STEP_PERCENT, VOLUME_STEP_PERCENT},
};

const SCROLL_STEP: i32 = 1;

/// Where a key is delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum KeyRoute {
    Exit,
    Modal,
    Menu,
    ContactForm,
    Shortcut,
    Section(SectionAction),
    Global,
}

/// Keys that only apply to the section in view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SectionAction {
    PlayTrack(usize),
    PreviousSlide,
    NextSlide,
    ToggleAutoAdvance,
    GoToSlide(usize),
    EditContact,
}

/// The interface state that decides where a key goes.
#[derive(Debug, Clone, Copy)]
struct KeyContext {
    modal_visible: bool,
    menu_open: bool,
    editing_contact: bool,
    section: Section,
}

impl KeyContext {
    fn of(app: &App) -> Self {
        Self {
            modal_visible: app.modal.is_visible(),
            menu_open: app.navigation.is_menu_open(),
            editing_contact: app.editing_contact,
            section: app.navigation.focused_section(&app.layout),
        }
    }
}

fn route_key(context: KeyContext, key: &KeyEvent) -> KeyRoute {
    if let (KeyCode::Char('c'), KeyModifiers::CONTROL) = (key.code, key.modifiers) {
        return KeyRoute::Exit;
    }

    if context.modal_visible {
        KeyRoute::Modal
    } else if context.menu_open {
        KeyRoute::Menu
    } else if context.editing_contact {
        KeyRoute::ContactForm
    } else if nav::is_shortcut(key) {
        KeyRoute::Shortcut
    } else if let Some(action) = section_action(context.section, key) {
        KeyRoute::Section(action)
    } else {
        KeyRoute::Global
    }
}

fn section_action(section: Section, key: &KeyEvent) -> Option<SectionAction> {
    if key.modifiers != KeyModifiers::NONE && key.modifiers != KeyModifiers::SHIFT {
        return None;
    }

    match (section, key.code) {
        (Section::Music, KeyCode::Char(c)) => digit_index(c).map(SectionAction::PlayTrack),
        (Section::Gallery, KeyCode::Left) => Some(SectionAction::PreviousSlide),
        (Section::Gallery, KeyCode::Right) => Some(SectionAction::NextSlide),
        (Section::Gallery, KeyCode::Char('p')) => Some(SectionAction::ToggleAutoAdvance),
        (Section::Gallery, KeyCode::Char(c)) => digit_index(c).map(SectionAction::GoToSlide),
        (Section::Contact, KeyCode::Enter | KeyCode::Char('i')) => Some(SectionAction::EditContact),
        _ => None,
    }
}

/// Maps keyboard input to application actions and playback commands.
///
/// # Errors
///
/// Returns an error if the exit request cannot be delivered to the event
/// loop.
pub(super) fn process_key_event(app: &mut App, key: KeyEvent) -> Result<()> {
    let now = Instant::now();
    let event = Event::Key(key);

    match route_key(KeyContext::of(app), &key) {
        KeyRoute::Exit => app.event_tx.send(AppEvent::ExitApplication)?,
        KeyRoute::Modal => {
            if let Some(payload) = app.modal.process_event(&event, now, &mut app.history) {
                submit_contact(app, FormKind::Modal, payload);
            }
        }
        KeyRoute::Menu => process_menu_key_event(app, key, now),
        KeyRoute::ContactForm => match app.contact_form.process_event(&event) {
            Some(FormAction::Submit(payload)) => submit_contact(app, FormKind::Main, payload),
            Some(FormAction::Leave) => app.editing_contact = false,
            Some(FormAction::Reset) => app.contact_form.reset(),
            Some(FormAction::Edited) | None => {}
        },
        KeyRoute::Shortcut => {
            nav::forward_shortcut(&key, &mut app.playlist);
        }
        KeyRoute::Section(action) => apply_section_action(app, action, now),
        KeyRoute::Global => process_global_key_event(app, key, now)?,
    }

    Ok(())
}

fn process_menu_key_event(app: &mut App, key: KeyEvent, now: Instant) {
    match key.code {
        KeyCode::Esc | KeyCode::Tab => app.navigation.close_menu(),
        KeyCode::Char('j') | KeyCode::Down => app.navigation.menu_next(),
        KeyCode::Char('k') | KeyCode::Up => app.navigation.menu_previous(),
        KeyCode::Enter => {
            let section = app.navigation.menu_cursor();
            app.navigation.select(section, &app.layout, now);
        }
        KeyCode::Char(c) => {
            if let Some(section) = digit_index(c).and_then(|i| Section::ALL.get(i)) {
                app.navigation.select(*section, &app.layout, now);
            }
        }
        _ => {}
    }
}

fn apply_section_action(app: &mut App, action: SectionAction, now: Instant) {
    match action {
        SectionAction::PlayTrack(index) => app.playlist.play(index),
        SectionAction::PreviousSlide => {
            app.gallery.previous(now);
        }
        SectionAction::NextSlide => {
            app.gallery.next(now);
        }
        SectionAction::ToggleAutoAdvance => app.gallery.toggle_auto_advance(now),
        SectionAction::GoToSlide(index) => {
            app.gallery.go_to(index, now);
        }
        SectionAction::EditContact => {
            app.editing_contact = true;
            app.contact_form.focus_first();
        }
    }
}

fn process_global_key_event(app: &mut App, key: KeyEvent, now: Instant) -> Result<()> {
    match (key.code, key.modifiers) {
        (KeyCode::Char('q'), _) => {
            app.event_tx.send(AppEvent::ExitApplication)?;
        }

        (KeyCode::Tab, _) => app.navigation.toggle_menu(),
        (KeyCode::Char('c'), _) => {
            app.modal.open(now, &mut app.history);
        }

        (KeyCode::Char(','), _) => app.playlist.seek_by_percent(-SEEK_STEP_PERCENT),
        (KeyCode::Char('.'), _) => app.playlist.seek_by_percent(SEEK_STEP_PERCENT),
        (KeyCode::Char('-'), _) => app.playlist.adjust_volume_percent(-VOLUME_STEP_PERCENT),
        (KeyCode::Char('='), _) | (KeyCode::Char('+'), _) => {
            app.playlist.adjust_volume_percent(VOLUME_STEP_PERCENT)
        }
        (KeyCode::Char('s'), _) => app.playlist.toggle_shuffle(),
        (KeyCode::Char('r'), _) => app.playlist.toggle_repeat(),

        // Scrolling
        (KeyCode::Char('j'), _) | (KeyCode::Down, _) => {
            app.navigation.scroll_by(SCROLL_STEP, &app.layout)
        }
        (KeyCode::Char('k'), _) | (KeyCode::Up, _) => {
            app.navigation.scroll_by(-SCROLL_STEP, &app.layout)
        }
        (KeyCode::PageDown, _) => app.navigation.page_down(&app.layout),
        (KeyCode::PageUp, _) => app.navigation.page_up(&app.layout),
        (KeyCode::Home, _) => app.navigation.scroll_home(),
        (KeyCode::End, _) => app.navigation.scroll_end(&app.layout),

        _ => {}
    }

    Ok(())
}

/// Maps `'1'..='9'` to a zero-based index.
fn digit_index(c: char) -> Option<usize> {
    match c.to_digit(10) {
        Some(d) if d > 0 => Some(d as usize - 1),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn browsing(section: Section) -> KeyContext {
        KeyContext {
            modal_visible: false,
            menu_open: false,
            editing_contact: false,
            section,
        }
    }

    #[test]
    fn space_while_editing_goes_to_the_form() {
        let context = KeyContext {
            editing_contact: true,
            ..browsing(Section::Contact)
        };
        assert_eq!(route_key(context, &key(KeyCode::Char(' '))), KeyRoute::ContactForm);
        assert_eq!(route_key(context, &key(KeyCode::Char('m'))), KeyRoute::ContactForm);
        assert_eq!(route_key(context, &key(KeyCode::Char('q'))), KeyRoute::ContactForm);
    }

    #[test]
    fn visible_modal_captures_scroll_keys() {
        let context = KeyContext {
            modal_visible: true,
            menu_open: true,
            ..browsing(Section::Home)
        };
        for code in [KeyCode::Char('j'), KeyCode::Down, KeyCode::PageDown, KeyCode::End] {
            assert_eq!(route_key(context, &key(code)), KeyRoute::Modal);
        }
        assert_eq!(route_key(browsing(Section::Home), &key(KeyCode::Char('j'))), KeyRoute::Global);
    }

    #[test]
    fn space_in_music_is_only_the_playback_shortcut() {
        let space = key(KeyCode::Char(' '));
        assert_eq!(route_key(browsing(Section::Music), &space), KeyRoute::Shortcut);
        assert_eq!(section_action(Section::Music, &space), None);
    }

    #[test]
    fn section_keys_apply_to_the_focused_section() {
        assert_eq!(
            route_key(browsing(Section::Music), &key(KeyCode::Char('3'))),
            KeyRoute::Section(SectionAction::PlayTrack(2))
        );
        assert_eq!(
            route_key(browsing(Section::Gallery), &key(KeyCode::Char('3'))),
            KeyRoute::Section(SectionAction::GoToSlide(2))
        );
        assert_eq!(
            route_key(browsing(Section::Gallery), &key(KeyCode::Left)),
            KeyRoute::Section(SectionAction::PreviousSlide)
        );
        assert_eq!(
            route_key(browsing(Section::Contact), &key(KeyCode::Enter)),
            KeyRoute::Section(SectionAction::EditContact)
        );
        assert_eq!(route_key(browsing(Section::About), &key(KeyCode::Char('3'))), KeyRoute::Global);
        assert_eq!(route_key(browsing(Section::Music), &key(KeyCode::Char('0'))), KeyRoute::Global);

        let alt_left = KeyEvent::new(KeyCode::Left, KeyModifiers::ALT);
        assert_eq!(route_key(browsing(Section::Gallery), &alt_left), KeyRoute::Shortcut);
    }

    #[test]
    fn ctrl_c_exits_from_anywhere() {
        let context = KeyContext {
            modal_visible: true,
            editing_contact: true,
            ..browsing(Section::Contact)
        };
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(route_key(context, &ctrl_c), KeyRoute::Exit);
    }
}
