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

//! Navigation history.
//!
//! Overlays push an entry when they open so that a "back" gesture can
//! dismiss them. The page itself is the implicit bottom of the stack.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum HistoryEntry {
    ContactModal,
}

impl HistoryEntry {
    pub(crate) fn fragment(self) -> &'static str {
        match self {
            HistoryEntry::ContactModal => "#contact-modal",
        }
    }
}

#[derive(Debug, Default)]
pub(crate) struct History {
    entries: Vec<HistoryEntry>,
}

impl History {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, entry: HistoryEntry) {
        tracing::trace!(fragment = entry.fragment(), "history push");
        self.entries.push(entry);
    }

    /// Steps back, returning the entry that was left.
    pub(crate) fn back(&mut self) -> Option<HistoryEntry> {
        let entry = self.entries.pop();
        if let Some(entry) = entry {
            tracing::trace!(fragment = entry.fragment(), "history back");
        }
        entry
    }

    pub(crate) fn current(&self) -> Option<HistoryEntry> {
        self.entries.last().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn back_pops_most_recent_entry() {
        let mut history = History::new();
        assert_eq!(history.back(), None);

        history.push(HistoryEntry::ContactModal);
        assert_eq!(history.current(), Some(HistoryEntry::ContactModal));
        assert_eq!(history.back(), Some(HistoryEntry::ContactModal));
        assert_eq!(history.current(), None);
    }
}
