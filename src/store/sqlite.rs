use super::KeyValueStore;
use crate::db::{migrations, Database};
use crate::error::AppError;
use crate::safe_lock;
use rusqlite::{params, OptionalExtension};
use std::path::Path;
use std::sync::Mutex;

/// Key-value store persisted in the `kv` table of a SQLite database.
pub struct SqliteStore {
    db: Mutex<Database>,
}

impl SqliteStore {
    /// Open (or create) the database at `path` and apply migrations.
    pub fn open(path: &Path) -> rusqlite::Result<Self> {
        let db = Database::open(path)?;
        Self::from_database(db)
    }

    pub fn open_in_memory() -> rusqlite::Result<Self> {
        Self::from_database(Database::open_in_memory()?)
    }

    pub fn from_database(db: Database) -> rusqlite::Result<Self> {
        migrations::run(db.connection())?;
        Ok(Self { db: Mutex::new(db) })
    }
}

impl KeyValueStore for SqliteStore {
    fn get(&self, key: &str) -> Result<Option<String>, AppError> {
        let db = safe_lock(&self.db, "Database");
        let value = db
            .connection()
            .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| {
                row.get(0)
            })
            .optional()?;
        Ok(value)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), AppError> {
        let db = safe_lock(&self.db, "Database");
        db.connection().execute(
            "INSERT INTO kv (key, value, updated_at) VALUES (?1, ?2, strftime('%s', 'now'))
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            params![key, value],
        )?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), AppError> {
        let db = safe_lock(&self.db, "Database");
        db.connection()
            .execute("DELETE FROM kv WHERE key = ?1", params![key])?;
        Ok(())
    }
}
