//! SQLite-backed key/value slot using rusqlite.

use crate::storage::schema::{MIGRATIONS, SCHEMA_VERSION_TABLE};
use crate::storage::slot::{KeyValueSlot, StorageError};
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;

/// Database wrapper for SQLite operations.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open or create a database at the given path, creating parent
    /// directories as needed.
    pub fn open(path: &Path) -> Result<Self, StorageError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| StorageError::IoError(e.to_string()))?;
        }

        Self::with_connection(Connection::open(path))
    }

    /// Open an in-memory database (for testing).
    pub fn open_in_memory() -> Result<Self, StorageError> {
        Self::with_connection(Connection::open_in_memory())
    }

    fn with_connection(conn: rusqlite::Result<Connection>) -> Result<Self, StorageError> {
        let conn = conn.map_err(|e| StorageError::ConnectionFailed(e.to_string()))?;
        let mut db = Self { conn };
        db.apply_pending_migrations()?;
        Ok(db)
    }

    /// Run every migration newer than the recorded version, in one transaction.
    fn apply_pending_migrations(&mut self) -> Result<(), StorageError> {
        self.conn
            .execute_batch(SCHEMA_VERSION_TABLE)
            .map_err(migration_failed)?;

        let applied = self.schema_version()?;
        let pending: Vec<_> = MIGRATIONS
            .iter()
            .filter(|&&(version, _)| version > applied)
            .collect();
        if pending.is_empty() {
            return Ok(());
        }

        let tx = self.conn.transaction().map_err(migration_failed)?;
        for &(version, sql) in pending {
            tx.execute_batch(sql).map_err(migration_failed)?;
            tx.execute(
                "INSERT INTO schema_version (version, applied_at) VALUES (?1, ?2)",
                params![version, Utc::now().to_rfc3339()],
            )
            .map_err(migration_failed)?;
            tracing::info!(from = applied, to = version, "Applied schema migration");
        }
        tx.commit().map_err(migration_failed)
    }

    /// Schema version recorded in the database, 0 before any migration.
    pub fn schema_version(&self) -> Result<i32, StorageError> {
        self.conn
            .query_row(
                "SELECT COALESCE(MAX(version), 0) FROM schema_version",
                [],
                |row| row.get(0),
            )
            .map_err(|e| StorageError::QueryFailed(e.to_string()))
    }
}

fn migration_failed(e: rusqlite::Error) -> StorageError {
    StorageError::MigrationFailed(e.to_string())
}

impl KeyValueSlot for Database {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.conn
            .query_row(
                "SELECT value FROM kv_slots WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()
            .map_err(|e| StorageError::QueryFailed(e.to_string()))
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.conn
            .execute(
                "INSERT INTO kv_slots (key, value, updated_at) VALUES (?1, ?2, ?3)
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
                params![key, value, Utc::now().to_rfc3339()],
            )
            .map_err(|e| StorageError::QueryFailed(e.to_string()))?;

        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.conn
            .execute("DELETE FROM kv_slots WHERE key = ?1", params![key])
            .map_err(|e| StorageError::QueryFailed(e.to_string()))?;

        Ok(())
    }
}
