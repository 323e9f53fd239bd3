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

//! Field validation rules.
//!
//! Rules run in a fixed order against the trimmed value and the last rule
//! that fails provides the message, so a field only ever reports one error.

use std::sync::LazyLock;

use regex::Regex;

static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email pattern"));

static PHONE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[+]?[0-9\s\-()]{10,}$").expect("valid phone pattern"));

pub(crate) const MIN_MESSAGE_LEN: usize = 10;

pub(crate) const REQUIRED_MESSAGE: &str = "This field is required";
pub(crate) const EMAIL_MESSAGE: &str = "Please enter a valid email address";
pub(crate) const PHONE_MESSAGE: &str = "Please enter a valid phone number";
pub(crate) const MESSAGE_LENGTH_MESSAGE: &str = "Message must be at least 10 characters long";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FieldKind {
    Text,
    Email,
    Phone,
    Message,
}

/// Checks `value` against the rules for a field, returning the error to show.
pub(crate) fn validate(kind: FieldKind, required: bool, value: &str) -> Option<&'static str> {
    let value = value.trim();
    let mut error = None;

    if required && value.is_empty() {
        error = Some(REQUIRED_MESSAGE);
    }

    match kind {
        FieldKind::Email if !value.is_empty() && !EMAIL_PATTERN.is_match(value) => {
            error = Some(EMAIL_MESSAGE);
        }
        FieldKind::Phone if !value.is_empty() => {
            let compact: String = value.chars().filter(|c| !c.is_whitespace()).collect();
            if !PHONE_PATTERN.is_match(&compact) {
                error = Some(PHONE_MESSAGE);
            }
        }
        FieldKind::Message if value.chars().count() < MIN_MESSAGE_LEN => {
            error = Some(MESSAGE_LENGTH_MESSAGE);
        }
        _ => {}
    }

    error
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_rejects_blank() {
        assert_eq!(validate(FieldKind::Text, true, "   "), Some(REQUIRED_MESSAGE));
        assert_eq!(validate(FieldKind::Text, true, "Mitchel"), None);
        assert_eq!(validate(FieldKind::Text, false, ""), None);
    }

    #[test]
    fn email_format() {
        assert_eq!(validate(FieldKind::Email, true, "fan@example.com"), None);
        assert_eq!(validate(FieldKind::Email, true, " fan@example.com "), None);
        assert_eq!(validate(FieldKind::Email, true, "fan@example"), Some(EMAIL_MESSAGE));
        assert_eq!(validate(FieldKind::Email, true, "fan @example.com"), Some(EMAIL_MESSAGE));
        assert_eq!(validate(FieldKind::Email, true, ""), Some(REQUIRED_MESSAGE));
    }

    #[test]
    fn phone_ignores_whitespace_and_needs_ten_characters() {
        assert_eq!(validate(FieldKind::Phone, false, "+61 412 345 678"), None);
        assert_eq!(validate(FieldKind::Phone, false, "(02) 9876-5432"), None);
        assert_eq!(validate(FieldKind::Phone, false, "12345"), Some(PHONE_MESSAGE));
        assert_eq!(validate(FieldKind::Phone, false, "call me maybe"), Some(PHONE_MESSAGE));
        assert_eq!(validate(FieldKind::Phone, false, ""), None);
    }

    #[test]
    fn message_length_applies_even_when_empty() {
        assert_eq!(validate(FieldKind::Message, true, "Too short"), Some(MESSAGE_LENGTH_MESSAGE));
        assert_eq!(validate(FieldKind::Message, true, ""), Some(MESSAGE_LENGTH_MESSAGE));
        assert_eq!(validate(FieldKind::Message, true, "Love the new album!"), None);
    }
}
