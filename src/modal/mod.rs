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

//! Contact modal.
//!
//! Owns the dialog's visibility, its open/close animation and the draft of
//! its form. Opening and closing each take [`ANIMATION`]; requests made while
//! an animation runs are ignored. An open modal sits on the navigation
//! history so a back gesture dismisses it.
//!
//! The draft is written to the store on every edit and restored at start-up,
//! so an unfinished message survives a restart.

use std::time::{Duration, Instant};

use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use serde::{Deserialize, Serialize};

use crate::{
    form::{ContactForm, ContactPayload, FormAction},
    nav::history::{History, HistoryEntry},
    store::{CONTACT_DRAFT_KEY, KeyValueStore},
};

pub(crate) const ANIMATION: Duration = Duration::from_millis(300);

/// Delay between a successful submission and the modal closing itself.
pub(crate) const CLOSE_AFTER_SUCCESS: Duration = Duration::from_secs(2);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ModalPhase {
    Closed,
    Opening { started: Instant },
    Open,
    Closing { started: Instant },
}

#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq, Eq)]
pub(crate) struct ContactDraft {
    #[serde(default)]
    pub(crate) name: String,
    #[serde(default)]
    pub(crate) email: String,
    #[serde(default)]
    pub(crate) phone: String,
    #[serde(default)]
    pub(crate) message: String,
}

impl ContactDraft {
    fn from_form(form: &ContactForm) -> Self {
        let value = |name| form.value(name).unwrap_or_default().to_string();
        Self {
            name: value("name"),
            email: value("email"),
            phone: value("phone"),
            message: value("message"),
        }
    }

    fn apply_to(&self, form: &mut ContactForm) {
        for (name, value) in [
            ("name", &self.name),
            ("email", &self.email),
            ("phone", &self.phone),
            ("message", &self.message),
        ] {
            if !value.is_empty() {
                form.set_value(name, value);
            }
        }
    }
}

pub(crate) struct ContactModal {
    phase: ModalPhase,
    form: ContactForm,
    store: Box<dyn KeyValueStore>,
    close_at: Option<Instant>,
}

impl ContactModal {
    pub(crate) fn new(form: ContactForm, store: Box<dyn KeyValueStore>) -> Self {
        let mut modal = Self {
            phase: ModalPhase::Closed,
            form,
            store,
            close_at: None,
        };

        modal.restore_draft();
        modal
    }

    /// Starts opening the modal. Returns `false` if it is not fully closed.
    pub(crate) fn open(&mut self, now: Instant, history: &mut History) -> bool {
        if self.phase != ModalPhase::Closed {
            return false;
        }

        tracing::debug!("opening contact modal");
        self.phase = ModalPhase::Opening { started: now };
        history.push(HistoryEntry::ContactModal);
        true
    }

    /// Starts closing the modal. Returns `false` if it is not fully open.
    ///
    /// The modal's history entry is removed if it is still the current one.
    pub(crate) fn close(&mut self, now: Instant, history: &mut History) -> bool {
        if self.phase != ModalPhase::Open {
            return false;
        }

        tracing::debug!("closing contact modal");
        self.phase = ModalPhase::Closing { started: now };
        self.close_at = None;
        if history.current() == Some(HistoryEntry::ContactModal) {
            history.back();
        }
        true
    }

    /// Handles input while the modal is visible.
    ///
    /// Returns a payload when the form was submitted.
    pub(crate) fn process_event(
        &mut self,
        event: &Event,
        now: Instant,
        history: &mut History,
    ) -> Option<ContactPayload> {
        if let Event::Key(KeyEvent { code, modifiers, .. }) = event {
            match (*code, *modifiers) {
                (KeyCode::Esc, _) => {
                    self.close(now, history);
                    return None;
                }
                (KeyCode::Left, KeyModifiers::ALT) => {
                    self.back(now, history);
                    return None;
                }
                _ => {}
            }
        }

        if self.phase != ModalPhase::Open {
            return None;
        }

        match self.form.process_event(event)? {
            FormAction::Edited => {
                self.save_draft();
                None
            }
            FormAction::Reset => {
                self.reset();
                None
            }
            FormAction::Leave => {
                self.close(now, history);
                None
            }
            FormAction::Submit(payload) => Some(payload),
        }
    }

    /// Reacts to a back gesture. Only an open modal on top of the history is
    /// dismissed this way.
    pub(crate) fn back(&mut self, now: Instant, history: &mut History) {
        if self.phase == ModalPhase::Open && history.current() == Some(HistoryEntry::ContactModal) {
            history.back();
            self.close(now, history);
        }
    }

    /// Advances animations and timed actions.
    pub(crate) fn tick(&mut self, now: Instant, history: &mut History) {
        match self.phase {
            ModalPhase::Opening { started } if now >= started + ANIMATION => {
                self.phase = ModalPhase::Open;
                self.form.focus_first();
            }
            ModalPhase::Closing { started } if now >= started + ANIMATION => {
                self.phase = ModalPhase::Closed;
            }
            _ => {}
        }

        if self.close_at.is_some_and(|at| now >= at) {
            self.close_at = None;
            self.close(now, history);
        }

        self.form.tick(now);
    }

    /// Records a submission outcome. Success clears the draft and schedules
    /// the modal to close.
    pub(crate) fn finish_submit(&mut self, result: Result<(), String>, now: Instant) {
        let succeeded = result.is_ok();
        self.form.finish_submit(result, now);

        if succeeded {
            self.clear_draft();
            self.close_at = Some(now + CLOSE_AFTER_SUCCESS);
        }
    }

    /// Clears the form and forgets the stored draft.
    pub(crate) fn reset(&mut self) {
        self.form.reset();
        self.clear_draft();
    }

    pub(crate) fn phase(&self) -> ModalPhase {
        self.phase
    }

    pub(crate) fn is_visible(&self) -> bool {
        self.phase != ModalPhase::Closed
    }

    /// How far the modal is shown, from 0 (hidden) to 1 (fully open).
    pub(crate) fn visibility(&self, now: Instant) -> f64 {
        let elapsed = |started: Instant| {
            (now.saturating_duration_since(started).as_secs_f64() / ANIMATION.as_secs_f64()).min(1.0)
        };

        match self.phase {
            ModalPhase::Closed => 0.0,
            ModalPhase::Opening { started } => elapsed(started),
            ModalPhase::Open => 1.0,
            ModalPhase::Closing { started } => 1.0 - elapsed(started),
        }
    }

    pub(crate) fn form(&self) -> &ContactForm {
        &self.form
    }

    pub(crate) fn form_mut(&mut self) -> &mut ContactForm {
        &mut self.form
    }

    /// Writes the current field values as the draft.
    pub(crate) fn save_draft(&mut self) {
        let draft = ContactDraft::from_form(&self.form);

        match serde_json::to_string(&draft) {
            Ok(json) => {
                if let Err(e) = self.store.set(CONTACT_DRAFT_KEY, &json) {
                    tracing::warn!(error = %e, "failed to save contact draft");
                }
            }
            Err(e) => tracing::warn!(error = %e, "failed to encode contact draft"),
        }
    }

    fn clear_draft(&mut self) {
        if let Err(e) = self.store.remove(CONTACT_DRAFT_KEY) {
            tracing::warn!(error = %e, "failed to clear contact draft");
        }
    }

    fn restore_draft(&mut self) {
        let stored = match self.store.get(CONTACT_DRAFT_KEY) {
            Ok(Some(stored)) => stored,
            Ok(None) => return,
            Err(e) => {
                tracing::warn!(error = %e, "failed to read contact draft");
                return;
            }
        };

        match serde_json::from_str::<ContactDraft>(&stored) {
            Ok(draft) => draft.apply_to(&mut self.form),
            Err(e) => tracing::warn!(error = %e, "ignoring malformed contact draft"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        form::{CONTACT_FIELDS, FormFocus, FormKind},
        store::MemoryStore,
    };

    fn modal(store: &MemoryStore) -> ContactModal {
        let form = ContactForm::new(FormKind::Modal, &CONTACT_FIELDS).unwrap();
        ContactModal::new(form, Box::new(store.clone()))
    }

    fn opened(store: &MemoryStore, history: &mut History, now: Instant) -> ContactModal {
        let mut m = modal(store);
        assert!(m.open(now, history));
        m.tick(now + ANIMATION, history);
        assert_eq!(m.phase(), ModalPhase::Open);
        m
    }

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn open_and_close_are_guarded_by_animation() {
        let mut history = History::new();
        let mut m = modal(&MemoryStore::new());
        let now = Instant::now();

        assert!(m.open(now, &mut history));
        assert!(m.is_visible());
        assert!(!m.open(now, &mut history));
        assert!(!m.close(now + Duration::from_millis(100), &mut history));

        m.tick(now + ANIMATION, &mut history);
        assert_eq!(m.phase(), ModalPhase::Open);
        assert_eq!(m.form().focus(), FormFocus::Field(0));

        let later = now + Duration::from_secs(1);
        assert!(m.close(later, &mut history));
        assert!(!m.open(later, &mut history));
        m.tick(later + ANIMATION, &mut history);
        assert_eq!(m.phase(), ModalPhase::Closed);
        assert!(!m.is_visible());
    }

    #[test]
    fn opening_pushes_history_and_closing_pops_it() {
        let mut history = History::new();
        let now = Instant::now();
        let mut m = opened(&MemoryStore::new(), &mut history, now);
        assert_eq!(history.current(), Some(HistoryEntry::ContactModal));

        m.process_event(&key(KeyCode::Esc), now, &mut history);
        assert!(matches!(m.phase(), ModalPhase::Closing { .. }));
        assert_eq!(history.current(), None);
    }

    #[test]
    fn back_gesture_dismisses_modal_once() {
        let mut history = History::new();
        let now = Instant::now();
        let mut m = opened(&MemoryStore::new(), &mut history, now);

        let back = Event::Key(KeyEvent::new(KeyCode::Left, KeyModifiers::ALT));
        m.process_event(&back, now, &mut history);

        assert!(matches!(m.phase(), ModalPhase::Closing { .. }));
        assert_eq!(history.current(), None);
    }

    #[test]
    fn visibility_follows_the_animation() {
        let mut history = History::new();
        let mut m = modal(&MemoryStore::new());
        let now = Instant::now();
        assert_eq!(m.visibility(now), 0.0);

        m.open(now, &mut history);
        let halfway = m.visibility(now + ANIMATION / 2);
        assert!((halfway - 0.5).abs() < 1e-6);
        assert_eq!(m.visibility(now + ANIMATION * 2), 1.0);
    }

    #[test]
    fn edits_are_saved_as_draft_and_restored() {
        let store = MemoryStore::new();
        let mut history = History::new();
        let now = Instant::now();
        {
            let mut m = opened(&store, &mut history, now);
            for c in "Mitch".chars() {
                m.process_event(&key(KeyCode::Char(c)), now, &mut history);
            }
        }

        let stored = store.get(CONTACT_DRAFT_KEY).unwrap().unwrap();
        let draft: ContactDraft = serde_json::from_str(&stored).unwrap();
        assert_eq!(draft.name, "Mitch");

        let m = modal(&store);
        assert_eq!(m.form().value("name"), Some("Mitch"));
        assert_eq!(m.form().value("email"), Some(""));
    }

    #[test]
    fn malformed_draft_is_ignored() {
        let mut store = MemoryStore::new();
        store.set(CONTACT_DRAFT_KEY, "{name:").unwrap();

        let m = modal(&store);
        assert_eq!(m.form().value("name"), Some(""));
    }

    #[test]
    fn partial_draft_fills_known_fields() {
        let mut store = MemoryStore::new();
        store.set(CONTACT_DRAFT_KEY, r#"{"email":"fan@example.com"}"#).unwrap();

        let m = modal(&store);
        assert_eq!(m.form().value("email"), Some("fan@example.com"));
    }

    #[test]
    fn success_clears_draft_and_closes_after_delay() {
        let store = MemoryStore::new();
        let mut history = History::new();
        let now = Instant::now();
        let mut m = opened(&store, &mut history, now);

        m.form_mut().set_value("name", "Clinton");
        m.form_mut().set_value("email", "fan@example.com");
        m.form_mut().set_value("message", "See you at the show tonight");
        m.save_draft();
        assert!(m.form_mut().begin_submit().is_some());

        m.finish_submit(Ok(()), now);
        assert_eq!(store.get(CONTACT_DRAFT_KEY).unwrap(), None);

        m.tick(now + Duration::from_secs(1), &mut history);
        assert_eq!(m.phase(), ModalPhase::Open);

        m.tick(now + CLOSE_AFTER_SUCCESS, &mut history);
        assert!(matches!(m.phase(), ModalPhase::Closing { .. }));
        assert_eq!(history.current(), None);
    }

    #[test]
    fn failure_keeps_draft_and_modal_open() {
        let store = MemoryStore::new();
        let mut history = History::new();
        let now = Instant::now();
        let mut m = opened(&store, &mut history, now);

        m.form_mut().set_value("name", "Clinton");
        m.save_draft();
        m.finish_submit(Err("offline".into()), now);

        m.tick(now + Duration::from_secs(10), &mut history);
        assert_eq!(m.phase(), ModalPhase::Open);
        assert!(store.get(CONTACT_DRAFT_KEY).unwrap().is_some());
    }

    #[test]
    fn explicit_reset_clears_draft() {
        let store = MemoryStore::new();
        let mut history = History::new();
        let now = Instant::now();
        let mut m = opened(&store, &mut history, now);

        m.process_event(&key(KeyCode::Char('x')), now, &mut history);
        assert!(store.get(CONTACT_DRAFT_KEY).unwrap().is_some());

        let reset = Event::Key(KeyEvent::new(KeyCode::Char('r'), KeyModifiers::CONTROL));
        m.process_event(&reset, now, &mut history);
        assert_eq!(store.get(CONTACT_DRAFT_KEY).unwrap(), None);
        assert_eq!(m.form().value("name"), Some(""));
    }
}
