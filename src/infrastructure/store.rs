//! Concurrent identity-to-entry storage.
//!
//! Backs the governor with a dashmap: the `entry()` guard holds the shard
//! lock for the duration of the access closure, which is what makes the
//! governor's check-then-increment one atomic critical section under
//! parallel callers.

use crate::application::ports::EntryStore;
use crate::domain::entry::WindowEntry;
use dashmap::DashMap;

/// Thread-safe map from identity to its window entry.
///
/// DashMap shards the key space, so checks for different identities rarely
/// contend while checks for the same identity serialize on one shard lock.
#[derive(Debug, Default)]
pub struct IdentityStore {
    map: DashMap<String, WindowEntry>,
}

impl IdentityStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of one identity's entry, if present.
    pub fn get(&self, identity: &str) -> Option<WindowEntry> {
        self.map.get(identity).map(|entry| entry.clone())
    }

    /// Remove one identity's entry, returning it if present.
    pub fn remove(&self, identity: &str) -> Option<WindowEntry> {
        self.map.remove(identity).map(|(_, entry)| entry)
    }
}

impl EntryStore for IdentityStore {
    fn with_entry_mut<R>(
        &self,
        identity: &str,
        vacant: impl FnOnce() -> WindowEntry,
        accessor: impl FnOnce(&mut WindowEntry) -> R,
    ) -> R {
        let entry = self.map.entry(identity.to_owned());
        let mut value = entry.or_insert_with(vacant);
        accessor(&mut value)
    }

    fn len(&self) -> usize {
        self.map.len()
    }

    fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    fn clear(&self) {
        self.map.clear();
    }

    fn retain(&self, mut f: impl FnMut(&str, &mut WindowEntry) -> bool) {
        self.map.retain(|identity, entry| f(identity.as_str(), entry));
    }
}

// Implement the port for Arc<IdentityStore> so a shared store can be handed
// to the governor directly.
impl EntryStore for std::sync::Arc<IdentityStore> {
    fn with_entry_mut<R>(
        &self,
        identity: &str,
        vacant: impl FnOnce() -> WindowEntry,
        accessor: impl FnOnce(&mut WindowEntry) -> R,
    ) -> R {
        (**self).with_entry_mut(identity, vacant, accessor)
    }

    fn len(&self) -> usize {
        (**self).len()
    }

    fn is_empty(&self) -> bool {
        (**self).is_empty()
    }

    fn clear(&self) {
        (**self).clear()
    }

    fn retain(&self, f: impl FnMut(&str, &mut WindowEntry) -> bool) {
        (**self).retain(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};

    #[test]
    fn with_entry_mut_creates_on_first_access() {
        let store = IdentityStore::new();
        let now = Instant::now();

        let count = store.with_entry_mut(
            "u1",
            || WindowEntry::open(now, Duration::from_secs(60)),
            |entry| entry.count(),
        );

        assert_eq!(count, 1);
        assert_eq!(store.len(), 1);
        assert!(store.get("u1").is_some());
    }

    #[test]
    fn with_entry_mut_reuses_existing_entry() {
        let store = IdentityStore::new();
        let now = Instant::now();
        let window = Duration::from_secs(60);

        store.with_entry_mut("u1", || WindowEntry::open(now, window), |_| {});
        store.with_entry_mut(
            "u1",
            || WindowEntry::open(now, window),
            |entry| {
                entry.register(now, 10, window);
            },
        );

        assert_eq!(store.len(), 1);
        assert_eq!(store.get("u1").unwrap().count(), 2);
    }

    #[test]
    fn retain_drops_failing_entries() {
        let store = IdentityStore::new();
        let now = Instant::now();
        let window = Duration::from_secs(60);

        store.with_entry_mut("keep", || WindowEntry::open(now, window), |_| {});
        store.with_entry_mut("drop", || WindowEntry::open(now, window), |_| {});

        store.retain(|identity, _| identity == "keep");

        assert_eq!(store.len(), 1);
        assert!(store.get("keep").is_some());
        assert!(store.get("drop").is_none());
    }

    #[test]
    fn remove_returns_the_entry() {
        let store = IdentityStore::new();
        let now = Instant::now();

        store.with_entry_mut(
            "u1",
            || WindowEntry::open(now, Duration::from_secs(60)),
            |_| {},
        );

        let removed = store.remove("u1").unwrap();
        assert_eq!(removed.count(), 1);
        assert!(store.is_empty());
        assert!(store.remove("u1").is_none());
    }

    #[test]
    fn concurrent_access_across_identities() {
        use std::sync::Arc;
        use std::thread;

        let store = Arc::new(IdentityStore::new());
        let now = Instant::now();
        let mut handles = vec![];

        for i in 0..10 {
            let store = Arc::clone(&store);
            handles.push(thread::spawn(move || {
                for j in 0..100 {
                    let identity = format!("user_{i}_{j}");
                    store.with_entry_mut(
                        &identity,
                        || WindowEntry::open(now, Duration::from_secs(60)),
                        |_| {},
                    );
                }
            }));
        }

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(store.len(), 1000);
    }
}
