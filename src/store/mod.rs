//! Key-value storage substrate.
//!
//! Each entity collection lives in one named slot of a [`KeyValueStore`].
//! The SQLite backend is used by the application; the in-memory backend
//! serves tests and ephemeral sessions.

mod sqlite;

pub use sqlite::SqliteStore;

use crate::constants::MAX_VALUE_BYTES;
use crate::error::AppError;
use std::cell::RefCell;
use std::collections::HashMap;

/// A store of named text blobs.
pub trait KeyValueStore {
    /// Read the value stored under `key`. `Ok(None)` when the key is absent.
    fn get(&self, key: &str) -> Result<Option<String>, AppError>;

    /// Write `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<(), AppError>;
}

/// Reject values larger than the per-entry quota.
pub(crate) fn check_quota(key: &str, value: &str, limit: usize) -> Result<(), AppError> {
    if value.len() > limit {
        return Err(AppError::QuotaExceeded {
            key: key.to_string(),
            size: value.len(),
            limit,
        });
    }
    Ok(())
}

/// Volatile store backed by a `HashMap`.
#[derive(Debug)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, String>>,
    limit: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::with_limit(MAX_VALUE_BYTES)
    }

    /// Create a store whose entries may not exceed `limit` bytes.
    pub fn with_limit(limit: usize) -> Self {
        Self {
            entries: RefCell::new(HashMap::new()),
            limit,
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, AppError> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), AppError> {
        check_quota(key, value, self.limit)?;
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}
