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

//! User-visible messages, optionally removed after a deadline.

use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum NoticeKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Notice {
    pub(crate) kind: NoticeKind,
    pub(crate) message: String,
    expires_at: Option<Instant>,
}

impl Notice {
    /// A notice that disappears `ttl` after `now`.
    pub(crate) fn timed(kind: NoticeKind, message: impl Into<String>, ttl: Duration, now: Instant) -> Self {
        Self {
            kind,
            message: message.into(),
            expires_at: Some(now + ttl),
        }
    }

    /// A notice that stays until replaced or cleared.
    pub(crate) fn sticky(kind: NoticeKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            expires_at: None,
        }
    }

    pub(crate) fn is_expired(&self, now: Instant) -> bool {
        self.expires_at.is_some_and(|deadline| now >= deadline)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timed_notice_expires_at_deadline() {
        let now = Instant::now();
        let notice = Notice::timed(NoticeKind::Error, "oops", Duration::from_secs(3), now);

        assert!(!notice.is_expired(now + Duration::from_millis(2999)));
        assert!(notice.is_expired(now + Duration::from_secs(3)));
    }

    #[test]
    fn sticky_notice_never_expires() {
        let notice = Notice::sticky(NoticeKind::Success, "sent");
        assert!(!notice.is_expired(Instant::now() + Duration::from_secs(3600)));
    }
}
