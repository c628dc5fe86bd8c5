//! Ordered entity collections backed by a [`PersistentState`].
//!
//! Every mutation builds a new sequence from the old one and writes the
//! whole sequence back. Records keep their insertion order.

use crate::error::AppError;
use crate::models::{EntityId, Record};
use crate::state::PersistentState;
use crate::store::KeyValueStore;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::rc::Rc;

/// Hands out time-derived ids that strictly increase, even when the clock
/// stalls or goes backwards.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdGenerator {
    last: EntityId,
}

impl IdGenerator {
    pub fn starting_after(last: EntityId) -> Self {
        Self { last }
    }

    pub fn next(&mut self, now: DateTime<Utc>) -> EntityId {
        let id = now.timestamp_millis().max(self.last.saturating_add(1));
        self.last = id;
        id
    }
}

pub struct Collection<T> {
    state: PersistentState<Vec<T>>,
    ids: IdGenerator,
}

impl<T> Collection<T>
where
    T: Record + Clone + Serialize + DeserializeOwned,
{
    pub fn new(state: PersistentState<Vec<T>>) -> Self {
        let last = state.get().iter().map(Record::id).max().unwrap_or(0);
        Self {
            state,
            ids: IdGenerator::starting_after(last),
        }
    }

    /// Load the collection stored under `key`, empty if there is none.
    pub fn open(store: Rc<dyn KeyValueStore>, key: &str) -> Self {
        Self::new(PersistentState::new(store, key, Vec::new()))
    }

    pub fn items(&self) -> &[T] {
        self.state.get()
    }

    pub fn get(&self, id: EntityId) -> Option<&T> {
        self.items().iter().find(|item| item.id() == id)
    }

    pub fn len(&self) -> usize {
        self.items().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items().is_empty()
    }

    pub fn is_in_sync(&self) -> bool {
        self.state.is_in_sync()
    }

    /// Append a record built from a freshly generated id.
    ///
    /// If `build` fails nothing is written.
    pub fn insert_with<F>(&mut self, now: DateTime<Utc>, build: F) -> Result<T, AppError>
    where
        F: FnOnce(EntityId) -> Result<T, AppError>,
    {
        let record = build(self.ids.next(now))?;
        let appended = record.clone();
        self.state.update(|items| {
            let mut next = items.clone();
            next.push(appended);
            next
        });
        Ok(record)
    }

    /// Remove the record with `id`. Returns false, writing nothing, if absent.
    pub fn remove(&mut self, id: EntityId) -> bool {
        if self.get(id).is_none() {
            return false;
        }
        self.state.update(|items| {
            items.iter().filter(|item| item.id() != id).cloned().collect()
        });
        true
    }

    /// Replace the record with `id` by `f(old)`, keeping its position.
    pub fn replace_with<F>(&mut self, id: EntityId, f: F) -> Result<T, AppError>
    where
        F: FnOnce(&T) -> Result<T, AppError>,
    {
        let current = self.get(id).ok_or(AppError::NotFound {
            entity: T::ENTITY,
            id,
        })?;
        let replacement = f(current)?;
        if replacement.id() != id {
            return Err(AppError::Internal(format!(
                "{} {id} cannot change its id to {}",
                T::ENTITY,
                replacement.id()
            )));
        }

        let stored = replacement.clone();
        self.state.update(|items| {
            items
                .iter()
                .map(|item| if item.id() == id { stored.clone() } else { item.clone() })
                .collect()
        });
        Ok(replacement)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Dream, NewDream};
    use crate::store::MemoryStore;
    use chrono::TimeZone;

    fn at_millis(ms: i64) -> DateTime<Utc> {
        Utc.timestamp_millis_opt(ms).unwrap()
    }

    fn draft(title: &str) -> NewDream {
        NewDream {
            title: title.to_string(),
            ..NewDream::default()
        }
    }

    fn add(
        dreams: &mut Collection<Dream>,
        now: DateTime<Utc>,
        title: &str,
    ) -> Result<Dream, AppError> {
        dreams.insert_with(now, |id| Dream::create(id, now, &draft(title)))
    }

    fn titles(dreams: &Collection<Dream>) -> Vec<&str> {
        dreams.items().iter().map(|d| d.title.as_str()).collect()
    }

    #[test]
    fn test_id_generator_is_monotonic_with_frozen_clock() {
        let mut ids = IdGenerator::default();
        let now = at_millis(1_000);

        assert_eq!(ids.next(now), 1_000);
        assert_eq!(ids.next(now), 1_001);
        assert_eq!(ids.next(at_millis(500)), 1_002);
        assert_eq!(ids.next(at_millis(5_000)), 5_000);
    }

    #[test]
    fn test_insert_appends_with_unique_ids() {
        let mut dreams = Collection::open(Rc::new(MemoryStore::new()), "dreams");
        let now = at_millis(10_000);

        let a = add(&mut dreams, now, "A").unwrap();
        let b = add(&mut dreams, now, "B").unwrap();

        assert_ne!(a.id, b.id);
        assert_eq!(titles(&dreams), vec!["A", "B"]);
    }

    #[test]
    fn test_failed_build_leaves_collection_unchanged() {
        let store: Rc<dyn KeyValueStore> = Rc::new(MemoryStore::new());
        let mut dreams = Collection::open(Rc::clone(&store), "dreams");

        assert!(add(&mut dreams, at_millis(1), "").is_err());

        assert!(dreams.is_empty());
        assert!(store.get("dreams").unwrap().is_none());
    }

    #[test]
    fn test_remove_preserves_order_of_others() {
        let mut dreams = Collection::open(Rc::new(MemoryStore::new()), "dreams");
        let now = at_millis(1);
        add(&mut dreams, now, "A").unwrap();
        let b = add(&mut dreams, now, "B").unwrap();
        add(&mut dreams, now, "C").unwrap();

        assert!(dreams.remove(b.id));
        assert_eq!(titles(&dreams), vec!["A", "C"]);
    }

    #[test]
    fn test_remove_absent_id_is_noop() {
        let mut dreams = Collection::open(Rc::new(MemoryStore::new()), "dreams");
        add(&mut dreams, at_millis(1), "A").unwrap();

        assert!(!dreams.remove(999));
        assert_eq!(dreams.len(), 1);
    }

    #[test]
    fn test_replace_keeps_position() {
        let mut dreams = Collection::open(Rc::new(MemoryStore::new()), "dreams");
        let now = at_millis(1);
        add(&mut dreams, now, "A").unwrap();
        let b = add(&mut dreams, now, "B").unwrap();
        add(&mut dreams, now, "C").unwrap();

        dreams.replace_with(b.id, |old| old.replaced_by(&draft("B2"))).unwrap();

        assert_eq!(titles(&dreams), vec!["A", "B2", "C"]);
    }

    #[test]
    fn test_replace_absent_id_is_not_found() {
        let mut dreams: Collection<Dream> = Collection::open(Rc::new(MemoryStore::new()), "dreams");
        let result = dreams.replace_with(42, |old| Ok(old.clone()));
        assert!(matches!(result, Err(AppError::NotFound { entity: "Dream", id: 42 })));
    }

    #[test]
    fn test_replace_cannot_change_id() {
        let mut dreams = Collection::open(Rc::new(MemoryStore::new()), "dreams");
        let a = add(&mut dreams, at_millis(1), "A").unwrap();

        let result = dreams.replace_with(a.id, |old| {
            let mut moved = old.clone();
            moved.id += 1;
            Ok(moved)
        });

        assert!(result.is_err());
        assert_eq!(dreams.get(a.id), Some(&a));
    }

    #[test]
    fn test_reopen_continues_ids_after_stored_maximum() {
        let store: Rc<dyn KeyValueStore> = Rc::new(MemoryStore::new());
        let future = at_millis(9_000_000);
        {
            let mut dreams = Collection::open(Rc::clone(&store), "dreams");
            add(&mut dreams, future, "From the future").unwrap();
        }

        let mut reopened = Collection::open(store, "dreams");
        let next = add(&mut reopened, at_millis(1), "Now").unwrap();

        assert_eq!(reopened.len(), 2);
        assert!(next.id > 9_000_000);
    }
}
