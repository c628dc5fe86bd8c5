use super::{check_quota, KeyValueStore};
use crate::constants::MAX_VALUE_BYTES;
use crate::db::{kv, migrations, Database};
use crate::error::AppError;
use std::path::Path;

/// Key-value store persisted in the `kv_store` table of a SQLite database.
pub struct SqliteStore {
    db: Database,
    limit: usize,
}

impl SqliteStore {
    /// Wrap an open database, creating the schema if needed.
    pub fn new(db: Database) -> rusqlite::Result<Self> {
        migrations::run(db.connection())?;
        Ok(Self {
            db,
            limit: MAX_VALUE_BYTES,
        })
    }

    pub fn open(path: &Path) -> rusqlite::Result<Self> {
        Self::new(Database::open(path)?)
    }

    /// Override the per-entry size quota.
    #[must_use]
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }
}

impl KeyValueStore for SqliteStore {
    fn get(&self, key: &str) -> Result<Option<String>, AppError> {
        Ok(kv::find(self.db.connection(), key)?)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), AppError> {
        check_quota(key, value, self.limit)?;
        kv::upsert(self.db.connection(), key, value)?;
        Ok(())
    }
}
