//! SQLite implementation of `KvStore`.
//!
//! Provides reload durability for the wizard mirror: a draft survives the
//! process that created it and is rehydrated by the next session.
//!
//! # Schema Versioning
//!
//! The database uses SQLite's `user_version` pragma to track schema
//! versions. When the schema changes, increment `SCHEMA_VERSION` and add a
//! migration function in `run_migrations`.

use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension};

use super::KvStore;

/// Current schema version. Increment when making schema changes.
const SCHEMA_VERSION: i32 = 1;

/// SQLite-backed key-value store.
///
/// Uses a `Mutex<Connection>` because `rusqlite::Connection` is not `Sync`.
/// Every operation is a single-row statement, so the lock is held only
/// briefly.
pub struct SqliteKv {
    conn: Mutex<Connection>,
}

impl SqliteKv {
    /// Open or create the database file at the given path.
    pub fn new(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open SQLite database at {:?}", path))?;
        let kv = Self {
            conn: Mutex::new(conn),
        };
        kv.init_schema()?;
        Ok(kv)
    }

    /// Create an in-memory database (for testing).
    pub fn new_in_memory() -> Result<Self> {
        let conn =
            Connection::open_in_memory().context("Failed to open in-memory SQLite database")?;
        let kv = Self {
            conn: Mutex::new(conn),
        };
        kv.init_schema()?;
        Ok(kv)
    }

    fn init_schema(&self) -> Result<()> {
        let conn = self.conn.lock().expect("mutex poisoned");

        let current_version: i32 =
            conn.pragma_query_value(None, "user_version", |row| row.get(0))?;

        if current_version > SCHEMA_VERSION {
            anyhow::bail!(
                "Database schema version {} is newer than supported version {}. \
                 Please upgrade the application.",
                current_version,
                SCHEMA_VERSION
            );
        }

        if current_version < SCHEMA_VERSION {
            Self::run_migrations(&conn, current_version)?;
            conn.pragma_update(None, "user_version", SCHEMA_VERSION)?;
        }

        Ok(())
    }

    fn run_migrations(conn: &Connection, from_version: i32) -> Result<()> {
        if from_version < 1 {
            Self::migrate_v0_to_v1(conn)?;
        }
        Ok(())
    }

    fn migrate_v0_to_v1(conn: &Connection) -> Result<()> {
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS kv (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );
            "#,
        )
        .context("Failed to create kv table")?;
        Ok(())
    }
}

impl KvStore for SqliteKv {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let conn = self.conn.lock().expect("mutex poisoned");
        conn.query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| {
            row.get(0)
        })
        .optional()
        .with_context(|| format!("Failed to read key {key:?}"))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let conn = self.conn.lock().expect("mutex poisoned");
        conn.execute(
            "INSERT INTO kv (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![key, value],
        )
        .with_context(|| format!("Failed to write key {key:?}"))?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let conn = self.conn.lock().expect("mutex poisoned");
        conn.execute("DELETE FROM kv WHERE key = ?1", params![key])
            .with_context(|| format!("Failed to remove key {key:?}"))?;
        Ok(())
    }
}
