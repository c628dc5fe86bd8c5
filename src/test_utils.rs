//! Shared test utilities for Dreamboard.
//!
//! This module provides common setup functions used across test modules.

#![cfg(test)]

use crate::clock::Clock;
use crate::db::{migrations, Database};
use crate::error::AppError;
use crate::store::{KeyValueStore, MemoryStore};
use chrono::{DateTime, NaiveDate, Utc};
use std::cell::Cell;
use std::rc::Rc;
use tempfile::{tempdir, TempDir};

/// Create a temporary test database with migrations applied.
///
/// Returns a tuple of (Database, TempDir). The TempDir must be kept alive
/// for the duration of the test to prevent the database file from being deleted.
pub fn setup_test_db() -> (Database, TempDir) {
    let dir = tempdir().expect("Failed to create temp directory for test DB");
    let db_path = dir.path().join("test.db");
    let db = Database::open(&db_path).expect("Failed to open test database");
    migrations::run(db.connection()).expect("Failed to run migrations on test DB");
    (db, dir)
}

/// Clock frozen at a given instant and day. Clones share the same time.
#[derive(Debug, Clone)]
pub struct FixedClock {
    now: Rc<Cell<DateTime<Utc>>>,
    today: Rc<Cell<NaiveDate>>,
}

impl FixedClock {
    pub fn new(now: DateTime<Utc>, today: NaiveDate) -> Self {
        Self {
            now: Rc::new(Cell::new(now)),
            today: Rc::new(Cell::new(today)),
        }
    }

    pub fn set_today(&self, today: NaiveDate) {
        self.today.set(today);
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.now.get()
    }

    fn today(&self) -> NaiveDate {
        self.today.get()
    }
}

/// Store that fails reads, writes, or both, to exercise fallback paths.
pub struct FailingStore {
    inner: MemoryStore,
    fail_reads: bool,
    fail_writes: bool,
}

impl FailingStore {
    pub fn failing_reads() -> Self {
        Self {
            inner: MemoryStore::new(),
            fail_reads: true,
            fail_writes: false,
        }
    }

    pub fn failing_writes() -> Self {
        Self {
            inner: MemoryStore::new(),
            fail_reads: false,
            fail_writes: true,
        }
    }
}

impl KeyValueStore for FailingStore {
    fn get(&self, key: &str) -> Result<Option<String>, AppError> {
        if self.fail_reads {
            return Err(AppError::Internal(format!("read of '{key}' refused")));
        }
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), AppError> {
        if self.fail_writes {
            return Err(AppError::Internal(format!("write of '{key}' refused")));
        }
        self.inner.set(key, value)
    }
}
