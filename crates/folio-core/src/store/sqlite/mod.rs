//! SQLite-backed store adapter.

mod admin;
mod authors;
mod issues;
mod publications;
mod schema;
mod sections;
mod submissions;
mod vocabulary;

pub use schema::{init_schema, SCHEMA_VERSION};

use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use rusqlite::Connection;

use crate::error::Result;

pub struct ConnectionPool {
    path: Option<String>,
    connection: Mutex<Connection>,
}

impl ConnectionPool {
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        schema::apply_pragmas(&conn)?;
        Ok(Self {
            path: Some(path.to_string_lossy().to_string()),
            connection: Mutex::new(conn),
        })
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        schema::apply_pragmas(&conn)?;
        Ok(Self {
            path: None,
            connection: Mutex::new(conn),
        })
    }

    pub fn get_connection(&self) -> MutexGuard<'_, Connection> {
        self.connection.lock().unwrap()
    }

    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }
}

/// Store over a SQLite database; implements every store trait, locking the
/// shared connection per call.
pub struct SqliteStore {
    pool: ConnectionPool,
}

impl SqliteStore {
    pub fn open(path: &Path) -> Result<Self> {
        let pool = ConnectionPool::open(path)?;
        {
            let conn = pool.get_connection();
            schema::init_schema(&conn)?;
        }
        Ok(Self { pool })
    }

    pub fn open_in_memory() -> Result<Self> {
        let pool = ConnectionPool::open_in_memory()?;
        {
            let conn = pool.get_connection();
            schema::init_schema(&conn)?;
        }
        Ok(Self { pool })
    }

    pub(crate) fn conn(&self) -> MutexGuard<'_, Connection> {
        self.pool.get_connection()
    }
}

/// Serializes a localized map (or any model field) to its JSON column form.
pub(crate) fn to_json<T: serde::Serialize>(value: &T) -> Result<String> {
    Ok(serde_json::to_string(value)?)
}

/// Deserializes a JSON column, falling back to the default on corruption.
pub(crate) fn from_json<T: serde::de::DeserializeOwned + Default>(raw: &str) -> T {
    serde_json::from_str(raw).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opens_in_memory_with_schema() {
        let store = SqliteStore::open_in_memory().unwrap();
        let conn = store.conn();
        let count: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name='issues'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn opens_on_disk() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("folio.db");
        let store = SqliteStore::open(&path).unwrap();
        drop(store);
        // Re-open over the existing file; migrations must be idempotent.
        SqliteStore::open(&path).unwrap();
    }
}
