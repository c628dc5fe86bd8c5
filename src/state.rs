//! Persistent keyed state container.
//!
//! A [`PersistentState`] mirrors one value into one named slot of a
//! [`KeyValueStore`]. Storage problems never reach the caller: a failed or
//! corrupt read falls back to the initial value, and a failed write is
//! logged while the in-memory value still changes.

use crate::error::AppError;
use crate::store::KeyValueStore;
use log::{error, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::rc::Rc;

pub struct PersistentState<T> {
    store: Rc<dyn KeyValueStore>,
    key: String,
    value: T,
    write_failed: bool,
}

impl<T> PersistentState<T>
where
    T: Serialize + DeserializeOwned,
{
    /// Load `key` from `store`, or start from `initial` when the slot is
    /// empty or unreadable.
    pub fn new(store: Rc<dyn KeyValueStore>, key: impl Into<String>, initial: T) -> Self {
        let key = key.into();
        let value = match load(store.as_ref(), &key) {
            Ok(Some(value)) => value,
            Ok(None) => initial,
            Err(e) => {
                warn!("Failed to load '{key}', using initial value: {e}");
                initial
            }
        };

        Self {
            store,
            key,
            value,
            write_failed: false,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn get(&self) -> &T {
        &self.value
    }

    /// Replace the value and write it back to the store.
    pub fn set(&mut self, value: T) {
        self.value = value;
        self.persist();
    }

    /// Derive the new value from the current one, then write it back.
    pub fn update<F>(&mut self, f: F)
    where
        F: FnOnce(&T) -> T,
    {
        let next = f(&self.value);
        self.set(next);
    }

    /// False while the most recent write has failed. A read that fell back
    /// to the initial value does not count.
    pub fn is_in_sync(&self) -> bool {
        !self.write_failed
    }

    fn persist(&mut self) {
        let result = serde_json::to_string(&self.value)
            .map_err(AppError::from)
            .and_then(|json| self.store.set(&self.key, &json));

        match result {
            Ok(()) => self.write_failed = false,
            Err(e) => {
                error!("Failed to persist '{}': {e}", self.key);
                self.write_failed = true;
            }
        }
    }
}

fn load<T>(store: &dyn KeyValueStore, key: &str) -> Result<Option<T>, AppError>
where
    T: DeserializeOwned,
{
    match store.get(key)? {
        Some(json) => Ok(Some(serde_json::from_str(&json)?)),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use crate::test_utils::FailingStore;

    fn memory_store() -> Rc<dyn KeyValueStore> {
        Rc::new(MemoryStore::new())
    }

    #[test]
    fn test_absent_key_uses_initial_value() {
        let state = PersistentState::new(memory_store(), "dreams", vec![1, 2]);
        assert_eq!(state.get(), &vec![1, 2]);
        assert!(state.is_in_sync());
    }

    #[test]
    fn test_existing_value_is_loaded() {
        let store = memory_store();
        store.set("goals", "[7,8,9]").unwrap();

        let state: PersistentState<Vec<i32>> = PersistentState::new(store, "goals", Vec::new());
        assert_eq!(state.get(), &vec![7, 8, 9]);
    }

    #[test]
    fn test_corrupt_value_falls_back_to_initial() {
        let store = memory_store();
        store.set("habits", "{not json").unwrap();

        let state: PersistentState<Vec<i32>> = PersistentState::new(store, "habits", Vec::new());
        assert!(state.get().is_empty());
        assert!(state.is_in_sync());
    }

    #[test]
    fn test_read_failure_falls_back_to_initial() {
        let store: Rc<dyn KeyValueStore> = Rc::new(FailingStore::failing_reads());

        let state: PersistentState<Vec<i32>> = PersistentState::new(store, "dreams", vec![42]);
        assert_eq!(state.get(), &vec![42]);
        assert!(state.is_in_sync());
    }

    #[test]
    fn test_set_writes_through() {
        let store = memory_store();
        let mut state = PersistentState::new(Rc::clone(&store), "dreams", Vec::<i32>::new());

        state.set(vec![3]);

        assert_eq!(store.get("dreams").unwrap().as_deref(), Some("[3]"));
        assert!(state.is_in_sync());
    }

    #[test]
    fn test_update_derives_from_previous_value() {
        let store = memory_store();
        let mut state = PersistentState::new(Rc::clone(&store), "goals", vec![1]);

        state.update(|old| old.iter().map(|n| n * 10).collect());
        state.update(|old| {
            let mut next = old.clone();
            next.push(5);
            next
        });

        assert_eq!(state.get(), &vec![10, 5]);
        assert_eq!(store.get("goals").unwrap().as_deref(), Some("[10,5]"));
    }

    #[test]
    fn test_write_failure_still_updates_memory() {
        let store: Rc<dyn KeyValueStore> = Rc::new(FailingStore::failing_writes());
        let mut state = PersistentState::new(store, "habits", Vec::<i32>::new());

        state.set(vec![1, 2, 3]);

        assert_eq!(state.get(), &vec![1, 2, 3]);
        assert!(!state.is_in_sync());
    }

    #[test]
    fn test_quota_exceeded_keeps_memory_value() {
        let store: Rc<dyn KeyValueStore> = Rc::new(MemoryStore::with_limit(4));
        let mut state = PersistentState::new(Rc::clone(&store), "dreams", Vec::<i32>::new());

        state.set(vec![1]);
        assert!(state.is_in_sync());

        state.set(vec![100, 200, 300]);
        assert_eq!(state.get(), &vec![100, 200, 300]);
        assert!(!state.is_in_sync());
        assert_eq!(store.get("dreams").unwrap().as_deref(), Some("[1]"));

        state.set(vec![2]);
        assert!(state.is_in_sync());
    }

    #[test]
    fn test_fresh_container_reads_previous_writes() {
        let store = memory_store();
        {
            let mut state = PersistentState::new(Rc::clone(&store), "goals", Vec::<String>::new());
            state.set(vec!["Run a marathon".to_string()]);
        }

        let reloaded = PersistentState::new(store, "goals", Vec::<String>::new());
        assert_eq!(reloaded.get(), &vec!["Run a marathon".to_string()]);
        assert_eq!(reloaded.key(), "goals");
    }
}
