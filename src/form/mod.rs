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

//! Contact form state, validation and submission lifecycle.
//!
//! The same form is used in two places, the contact section of the page and
//! the contact modal. Each field is a [`tui_input::Input`] with at most one
//! error annotation. Fields are validated when focus leaves them and again on
//! submit; editing a field clears its annotation.
//!
//! Submission itself happens on the task worker (see [`submit`]); the form
//! only tracks whether a submission is in flight and the outcome message.

pub(crate) mod submit;
pub(crate) mod validate;

use std::{
    collections::BTreeMap,
    time::{Duration, Instant},
};

use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use tui_input::{Input, backend::crossterm::EventHandler};

use crate::util::notice::{Notice, NoticeKind};

pub(crate) use validate::FieldKind;

/// How long a success message stays visible.
pub(crate) const SUCCESS_TTL: Duration = Duration::from_secs(5);

const SUCCESS_MESSAGE: &str = "Message sent successfully!";

/// Field name to raw value, as posted to the submission endpoint.
pub(crate) type ContactPayload = BTreeMap<String, String>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FormKind {
    Main,
    Modal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldSpec {
    pub(crate) name: &'static str,
    pub(crate) label: &'static str,
    pub(crate) kind: FieldKind,
    pub(crate) required: bool,
}

pub(crate) const CONTACT_FIELDS: [FieldSpec; 4] = [
    FieldSpec { name: "name", label: "Name", kind: FieldKind::Text, required: true },
    FieldSpec { name: "email", label: "Email", kind: FieldKind::Email, required: true },
    FieldSpec { name: "phone", label: "Phone", kind: FieldKind::Phone, required: false },
    FieldSpec { name: "message", label: "Message", kind: FieldKind::Message, required: true },
];

#[derive(Debug, thiserror::Error)]
pub(crate) enum FormError {
    #[error("form has no fields")]
    NoFields,

    #[error("field {0} is declared more than once")]
    DuplicateField(&'static str),
}

pub(crate) struct Field {
    pub(crate) spec: FieldSpec,
    pub(crate) input: Input,
    pub(crate) error: Option<&'static str>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FormFocus {
    Field(usize),
    Submit,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum FormAction {
    /// A field value changed.
    Edited,
    /// The form validated and is now submitting this payload.
    Submit(ContactPayload),
    /// The user asked to stop editing.
    Leave,
    /// The user asked to clear the form.
    Reset,
}

pub(crate) struct ContactForm {
    kind: FormKind,
    fields: Vec<Field>,
    focus: FormFocus,
    submitting: bool,
    message: Option<Notice>,
}

impl ContactForm {
    /// Builds a form from a field table.
    ///
    /// # Errors
    ///
    /// Fails if the table is empty or declares a field name twice.
    pub(crate) fn new(kind: FormKind, specs: &[FieldSpec]) -> Result<Self, FormError> {
        if specs.is_empty() {
            return Err(FormError::NoFields);
        }

        for (i, spec) in specs.iter().enumerate() {
            if specs[..i].iter().any(|other| other.name == spec.name) {
                return Err(FormError::DuplicateField(spec.name));
            }
        }

        let fields = specs
            .iter()
            .map(|spec| Field {
                spec: *spec,
                input: Input::default(),
                error: None,
            })
            .collect();

        Ok(Self {
            kind,
            fields,
            focus: FormFocus::Field(0),
            submitting: false,
            message: None,
        })
    }

    pub(crate) fn process_event(&mut self, event: &Event) -> Option<FormAction> {
        let Event::Key(KeyEvent { code, modifiers, .. }) = event else {
            return None;
        };

        match (*code, *modifiers) {
            (KeyCode::Tab, _) | (KeyCode::Down, _) => self.focus_next(),
            (KeyCode::BackTab, _) | (KeyCode::Up, _) => self.focus_previous(),

            (KeyCode::Esc, _) => {
                self.blur();
                return Some(FormAction::Leave);
            }

            (KeyCode::Char('r'), KeyModifiers::CONTROL) => return Some(FormAction::Reset),
            (KeyCode::Char('s'), KeyModifiers::CONTROL) => {
                return self.begin_submit().map(FormAction::Submit);
            }

            (KeyCode::Enter, _) => match self.focus {
                FormFocus::Submit => return self.begin_submit().map(FormAction::Submit),
                FormFocus::Field(_) => self.focus_next(),
            },

            _ => {
                if let FormFocus::Field(index) = self.focus {
                    let field = &mut self.fields[index];
                    let changed = field.input.handle_event(event).is_some_and(|c| c.value);
                    if changed {
                        field.error = None;
                        return Some(FormAction::Edited);
                    }
                }
            }
        }

        None
    }

    /// Starts a submission if the form is valid and none is in flight.
    ///
    /// Required fields are always checked, optional ones only when filled in.
    /// On failure focus moves to the first invalid field.
    pub(crate) fn begin_submit(&mut self) -> Option<ContactPayload> {
        if self.submitting {
            return None;
        }

        let mut first_invalid = None;
        for index in 0..self.fields.len() {
            let field = &self.fields[index];
            let checked = field.spec.required || !field.input.value().trim().is_empty();
            if checked && !self.validate_field(index) && first_invalid.is_none() {
                first_invalid = Some(index);
            }
        }

        if let Some(index) = first_invalid {
            self.focus = FormFocus::Field(index);
            return None;
        }

        self.submitting = true;
        self.message = None;

        tracing::info!(form = ?self.kind, "submitting contact form");
        Some(self.payload())
    }

    /// Records the outcome of a submission and leaves the loading state.
    pub(crate) fn finish_submit(&mut self, result: Result<(), String>, now: Instant) {
        self.submitting = false;

        match result {
            Ok(()) => {
                self.clear_fields();
                self.message = Some(Notice::timed(
                    NoticeKind::Success,
                    SUCCESS_MESSAGE,
                    SUCCESS_TTL,
                    now,
                ));
            }
            Err(reason) => {
                self.message = Some(Notice::sticky(
                    NoticeKind::Error,
                    format!("Failed to send the form ({}). Please try again.", reason),
                ));
            }
        }
    }

    pub(crate) fn tick(&mut self, now: Instant) {
        if self.message.as_ref().is_some_and(|m| m.is_expired(now)) {
            self.message = None;
        }
    }

    /// Clears every value, annotation and message.
    pub(crate) fn reset(&mut self) {
        self.clear_fields();
        self.message = None;
    }

    pub(crate) fn focus_first(&mut self) {
        self.focus = FormFocus::Field(0);
    }

    /// Moves focus to a field, validating the one being left.
    pub(crate) fn focus_field(&mut self, index: usize) {
        if index < self.fields.len() {
            self.blur();
            self.focus = FormFocus::Field(index);
        }
    }

    pub(crate) fn focus_submit(&mut self) {
        self.blur();
        self.focus = FormFocus::Submit;
    }

    pub(crate) fn value(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|f| f.spec.name == name)
            .map(|f| f.input.value())
    }

    pub(crate) fn set_value(&mut self, name: &str, value: &str) {
        if let Some(field) = self.fields.iter_mut().find(|f| f.spec.name == name) {
            field.input = Input::new(value.to_string());
            field.error = None;
        }
    }

    pub(crate) fn kind(&self) -> FormKind {
        self.kind
    }

    pub(crate) fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub(crate) fn focus(&self) -> FormFocus {
        self.focus
    }

    pub(crate) fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub(crate) fn message(&self) -> Option<&Notice> {
        self.message.as_ref()
    }

    pub(crate) fn submit_label(&self) -> &'static str {
        if self.submitting {
            "Sending…"
        } else {
            "Send Message"
        }
    }

    fn focus_next(&mut self) {
        let next = match self.focus {
            FormFocus::Field(index) if index + 1 < self.fields.len() => FormFocus::Field(index + 1),
            FormFocus::Field(_) => FormFocus::Submit,
            FormFocus::Submit => FormFocus::Field(0),
        };
        self.blur();
        self.focus = next;
    }

    fn focus_previous(&mut self) {
        let previous = match self.focus {
            FormFocus::Field(0) => FormFocus::Submit,
            FormFocus::Field(index) => FormFocus::Field(index - 1),
            FormFocus::Submit => FormFocus::Field(self.fields.len() - 1),
        };
        self.blur();
        self.focus = previous;
    }

    fn blur(&mut self) {
        if let FormFocus::Field(index) = self.focus {
            self.validate_field(index);
        }
    }

    fn validate_field(&mut self, index: usize) -> bool {
        let field = &mut self.fields[index];
        field.error = validate::validate(field.spec.kind, field.spec.required, field.input.value());
        field.error.is_none()
    }

    fn clear_fields(&mut self) {
        for field in &mut self.fields {
            field.input.reset();
            field.error = None;
        }
    }

    fn payload(&self) -> ContactPayload {
        self.fields
            .iter()
            .map(|f| (f.spec.name.to_string(), f.input.value().to_string()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn type_text(form: &mut ContactForm, text: &str) {
        for c in text.chars() {
            form.process_event(&key(KeyCode::Char(c)));
        }
    }

    fn filled_form() -> ContactForm {
        let mut form = ContactForm::new(FormKind::Main, &CONTACT_FIELDS).unwrap();
        form.set_value("name", "Clinton");
        form.set_value("email", "fan@example.com");
        form.set_value("message", "Please come to Perth next tour");
        form
    }

    fn error_count(form: &ContactForm) -> usize {
        form.fields().iter().filter(|f| f.error.is_some()).count()
    }

    #[test]
    fn construction_rejects_bad_field_tables() {
        assert!(matches!(
            ContactForm::new(FormKind::Main, &[]),
            Err(FormError::NoFields)
        ));

        let duplicated = [CONTACT_FIELDS[0], CONTACT_FIELDS[0]];
        assert!(matches!(
            ContactForm::new(FormKind::Modal, &duplicated),
            Err(FormError::DuplicateField("name"))
        ));
    }

    #[test]
    fn empty_required_field_blocks_submit_with_one_annotation() {
        let mut form = filled_form();
        form.set_value("name", "");
        form.focus_submit();

        assert_eq!(form.begin_submit(), None);
        assert!(!form.is_submitting());
        assert_eq!(error_count(&form), 1);
        assert_eq!(form.fields()[0].error, Some(validate::REQUIRED_MESSAGE));
        assert_eq!(form.focus(), FormFocus::Field(0));

        // A second attempt must not stack another annotation.
        assert_eq!(form.begin_submit(), None);
        assert_eq!(error_count(&form), 1);

        type_text(&mut form, "Christian");
        assert_eq!(error_count(&form), 0);

        let payload = form.begin_submit().unwrap();
        assert_eq!(payload["name"], "Christian");
        assert!(form.is_submitting());
    }

    #[test]
    fn blur_validates_the_field_being_left() {
        let mut form = ContactForm::new(FormKind::Main, &CONTACT_FIELDS).unwrap();
        form.focus_field(1);
        type_text(&mut form, "not-an-email");
        form.process_event(&key(KeyCode::Tab));

        assert_eq!(form.focus(), FormFocus::Field(2));
        assert_eq!(form.fields()[1].error, Some(validate::EMAIL_MESSAGE));
    }

    #[test]
    fn editing_reports_change_and_clears_error() {
        let mut form = ContactForm::new(FormKind::Main, &CONTACT_FIELDS).unwrap();
        form.process_event(&key(KeyCode::Tab));
        assert!(form.fields()[0].error.is_some());

        form.focus_field(0);
        let action = form.process_event(&key(KeyCode::Char('M')));
        assert_eq!(action, Some(FormAction::Edited));
        assert_eq!(form.value("name"), Some("M"));
        assert!(form.fields()[0].error.is_none());
    }

    #[test]
    fn filled_optional_field_is_checked_on_submit() {
        let mut form = filled_form();
        form.set_value("phone", "123");
        assert_eq!(form.begin_submit(), None);
        assert_eq!(form.fields()[2].error, Some(validate::PHONE_MESSAGE));

        form.set_value("phone", "");
        assert!(form.begin_submit().is_some());
    }

    #[test]
    fn submit_is_ignored_while_in_flight() {
        let mut form = filled_form();
        assert!(form.begin_submit().is_some());
        assert_eq!(form.submit_label(), "Sending…");
        assert_eq!(form.begin_submit(), None);
    }

    #[test]
    fn enter_on_submit_button_submits_raw_values() {
        let mut form = filled_form();
        form.set_value("phone", " +61 400 000 000 ");
        form.focus_submit();

        let Some(FormAction::Submit(payload)) = form.process_event(&key(KeyCode::Enter)) else {
            panic!("expected a submission");
        };
        assert_eq!(payload.len(), 4);
        assert_eq!(payload["phone"], " +61 400 000 000 ");
    }

    #[test]
    fn success_resets_form_and_message_expires() {
        let mut form = filled_form();
        form.begin_submit().unwrap();

        let now = Instant::now();
        form.finish_submit(Ok(()), now);

        assert!(!form.is_submitting());
        assert_eq!(form.value("name"), Some(""));
        assert_eq!(form.message().unwrap().kind, NoticeKind::Success);

        form.tick(now + Duration::from_secs(4));
        assert!(form.message().is_some());
        form.tick(now + SUCCESS_TTL);
        assert!(form.message().is_none());
    }

    #[test]
    fn failure_keeps_values_and_shows_reason() {
        let mut form = filled_form();
        form.begin_submit().unwrap();
        form.finish_submit(Err("HTTP error! status: 500".into()), Instant::now());

        assert!(!form.is_submitting());
        assert_eq!(form.value("name"), Some("Clinton"));
        let message = form.message().unwrap();
        assert_eq!(message.kind, NoticeKind::Error);
        assert!(message.message.contains("HTTP error! status: 500"));
        assert_eq!(form.submit_label(), "Send Message");
    }
}
