//! `SqliteStorage`: durable `KeyValueStorage` backed by a single SQLite
//! table. One connection behind a mutex; ad-state traffic is a handful of
//! tiny reads and writes per page view.

use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use adgate_core::errors::StorageError;
use adgate_core::state::KeyValueStorage;
use rusqlite::{params, Connection, OptionalExtension};
use tracing::debug;

use crate::pragmas::{configure_connection, initialize_schema};

const UPSERT_SQL: &str = "INSERT INTO kv_store (key, value) VALUES (?1, ?2)
     ON CONFLICT(key) DO UPDATE SET
        value = excluded.value,
        updated_at = CAST(strftime('%s', 'now') AS INTEGER)";

pub struct SqliteStorage {
    conn: Mutex<Connection>,
}

impl SqliteStorage {
    /// Open (or create) a file-backed store and apply the schema.
    pub fn open(path: &Path) -> Result<Self, StorageError> {
        let conn = Connection::open(path).map_err(to_storage_error)?;
        configure_connection(&conn).map_err(to_storage_error)?;
        initialize_schema(&conn).map_err(to_storage_error)?;
        debug!(path = %path.display(), "Opened ad-state database");
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Open an in-memory store (for testing).
    pub fn open_in_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory().map_err(to_storage_error)?;
        initialize_schema(&conn).map_err(to_storage_error)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>, StorageError> {
        self.conn.lock().map_err(|_| StorageError::Unavailable {
            reason: "sqlite connection lock poisoned".to_string(),
        })
    }
}

impl KeyValueStorage for SqliteStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.conn()?
            .query_row(
                "SELECT value FROM kv_store WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()
            .map_err(to_storage_error)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.conn()?
            .execute(UPSERT_SQL, params![key, value])
            .map(|_| ())
            .map_err(to_storage_error)
    }

    /// All entries in one transaction.
    fn set_many(&self, entries: &[(&str, &str)]) -> Result<(), StorageError> {
        let mut conn = self.conn()?;
        let tx = conn.transaction().map_err(to_storage_error)?;
        for (key, value) in entries {
            tx.execute(UPSERT_SQL, params![key, value])
                .map_err(to_storage_error)?;
        }
        tx.commit().map_err(to_storage_error)
    }

    fn remove(&self, key: &str) -> Result<bool, StorageError> {
        self.conn()?
            .execute("DELETE FROM kv_store WHERE key = ?1", params![key])
            .map(|n| n > 0)
            .map_err(to_storage_error)
    }

    fn keys(&self) -> Result<Vec<String>, StorageError> {
        let conn = self.conn()?;
        let mut stmt = conn
            .prepare("SELECT key FROM kv_store ORDER BY key")
            .map_err(to_storage_error)?;
        let rows = stmt
            .query_map([], |row| row.get::<_, String>(0))
            .map_err(to_storage_error)?;
        rows.collect::<Result<Vec<_>, _>>()
            .map_err(to_storage_error)
    }
}

fn to_storage_error(e: rusqlite::Error) -> StorageError {
    StorageError::Backend {
        message: e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upsert_overwrites() {
        let storage = SqliteStorage::open_in_memory().unwrap();
        storage.set("k", "1").unwrap();
        storage.set("k", "2").unwrap();
        assert_eq!(storage.get("k").unwrap().as_deref(), Some("2"));
        assert_eq!(storage.keys().unwrap(), vec!["k".to_string()]);
    }

    #[test]
    fn set_many_rolls_back_on_failure() {
        let storage = SqliteStorage::open_in_memory().unwrap();
        storage
            .conn()
            .unwrap()
            .execute_batch(
                "CREATE TRIGGER reject_boom BEFORE INSERT ON kv_store
                 WHEN NEW.key = 'boom'
                 BEGIN SELECT RAISE(ABORT, 'rejected'); END;",
            )
            .unwrap();

        assert!(storage.set_many(&[("a", "1"), ("boom", "x")]).is_err());
        assert_eq!(storage.get("a").unwrap(), None);

        storage.set_many(&[("a", "1"), ("b", "2")]).unwrap();
        assert_eq!(storage.keys().unwrap(), vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn remove_reports_existence() {
        let storage = SqliteStorage::open_in_memory().unwrap();
        storage.set("k", "v").unwrap();
        assert!(storage.remove("k").unwrap());
        assert!(!storage.remove("k").unwrap());
        assert_eq!(storage.get("k").unwrap(), None);
    }
}
