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

//! Persistent key-value storage.
//!
//! Controllers persist small JSON documents under fixed string keys. The
//! durable implementation is a single SQLite table; a memory-backed store is
//! used when the database cannot be opened, and in tests.
//!
//! # Tables
//!
//! * `kv` - One row per key, holding the serialized value.

use std::{
    cell::RefCell,
    collections::HashMap,
    path::Path,
    rc::Rc,
};

use rusqlite::{Connection, OptionalExtension, params};

/// Key holding the serialized playlist state.
pub(crate) const PLAYER_STATE_KEY: &str = "musicPlayerState";

/// Key holding the contact modal's draft form fields.
pub(crate) const CONTACT_DRAFT_KEY: &str = "contactFormData";

#[derive(Debug, thiserror::Error)]
pub(crate) enum StoreError {
    #[error("storage backend failure: {0}")]
    Backend(#[from] rusqlite::Error),

    #[error("failed to enable WAL mode, journal mode is {0}")]
    JournalMode(String),
}

/// String-keyed, string-valued storage that survives restarts.
pub(crate) trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;

    fn remove(&mut self, key: &str) -> Result<(), StoreError>;
}

pub(crate) struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Opens (creating if necessary) the store at `path`.
    ///
    /// Each controller owns its own connection to the same file, WAL mode
    /// keeps those connections from blocking one another.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened, WAL mode cannot be
    /// enabled, or the schema cannot be created.
    pub(crate) fn open(path: &Path) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;

        let journal_mode: String = conn.query_row("PRAGMA journal_mode = WAL", [], |r| r.get(0))?;
        if journal_mode != "wal" {
            return Err(StoreError::JournalMode(journal_mode));
        }

        conn.execute_batch("PRAGMA synchronous = NORMAL;")?;

        Self::with_connection(conn)
    }

    #[cfg(test)]
    pub(crate) fn open_in_memory() -> Result<Self, StoreError> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self, StoreError> {
        conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS kv (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );
        ",
        )?;

        Ok(Self { conn })
    }
}

impl KeyValueStore for SqliteStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let mut stmt = self.conn.prepare_cached("SELECT value FROM kv WHERE key = ?1")?;
        let value = stmt
            .query_row(params![key], |row| row.get(0))
            .optional()?;

        Ok(value)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut stmt = self.conn.prepare_cached(
            "INSERT INTO kv (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
        )?;
        stmt.execute(params![key, value])?;

        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        let mut stmt = self.conn.prepare_cached("DELETE FROM kv WHERE key = ?1")?;
        stmt.execute(params![key])?;

        Ok(())
    }
}

/// Session-only store.
///
/// Clones share the same map, so a test can hand one clone to a controller
/// and inspect or reuse the contents through another.
#[derive(Debug, Clone, Default)]
pub(crate) struct MemoryStore {
    entries: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStore {
    pub(crate) fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

/// Opens the durable store, falling back to a session-only store when the
/// database is unavailable.
pub(crate) fn open_or_fallback(path: &Path) -> Box<dyn KeyValueStore> {
    match SqliteStore::open(path) {
        Ok(store) => Box::new(store),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "state database unavailable, state will not survive restart");
            Box::new(MemoryStore::new())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sqlite_store_round_trips_and_overwrites() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        assert_eq!(store.get("k").unwrap(), None);

        store.set("k", "one").unwrap();
        store.set("k", "two").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("two"));

        store.remove("k").unwrap();
        assert_eq!(store.get("k").unwrap(), None);
    }

    #[test]
    fn sqlite_store_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.db");

        {
            let mut store = SqliteStore::open(&path).unwrap();
            store.set(PLAYER_STATE_KEY, "{\"volume\":0.3}").unwrap();
        }

        let store = SqliteStore::open(&path).unwrap();
        assert_eq!(
            store.get(PLAYER_STATE_KEY).unwrap().as_deref(),
            Some("{\"volume\":0.3}")
        );
    }

    #[test]
    fn memory_store_clones_share_entries() {
        let mut a = MemoryStore::new();
        let b = a.clone();
        a.set(CONTACT_DRAFT_KEY, "{}").unwrap();
        assert_eq!(b.get(CONTACT_DRAFT_KEY).unwrap().as_deref(), Some("{}"));
    }
}
