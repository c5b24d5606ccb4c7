use crate::Result;
use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// An insert-only map guarded by double-checked locking.
///
/// Values are built while the write lock is held, so a key is populated at
/// most once and readers never see a half-built entry. A failed build leaves
/// the key vacant.
pub(super) struct Cache<K, V> {
    entries: RwLock<HashMap<K, V>>,
}

impl<K: Eq + Hash, V: Clone> Cache<K, V> {
    pub(super) fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    pub(super) fn get_or_try_insert_with(
        &self,
        key: K,
        build: impl FnOnce() -> Result<V>,
    ) -> Result<V> {
        if let Some(value) = self.read().get(&key) {
            return Ok(value.clone());
        }

        let mut entries = self.write();

        // Another caller may have populated the entry while we waited.
        if let Some(value) = entries.get(&key) {
            return Ok(value.clone());
        }

        let value = build()?;
        entries.insert(key, value.clone());
        Ok(value)
    }

    pub(super) fn len(&self) -> usize {
        self.read().len()
    }

    // Entries are only ever inserted whole, so a poisoned lock still guards
    // a consistent map.
    fn read(&self) -> RwLockReadGuard<'_, HashMap<K, V>> {
        self.entries.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<K, V>> {
        self.entries.write().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn builds_each_key_once_across_threads() {
        let cache = Arc::new(Cache::<u32, u32>::new());
        let builds = Arc::new(AtomicUsize::new(0));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let cache = cache.clone();
                let builds = builds.clone();
                std::thread::spawn(move || {
                    cache
                        .get_or_try_insert_with(1, || {
                            builds.fetch_add(1, Ordering::SeqCst);
                            Ok(42)
                        })
                        .unwrap()
                })
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), 42);
        }
        assert_eq!(builds.load(Ordering::SeqCst), 1);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn failed_build_leaves_key_vacant() {
        let cache = Cache::<u32, u32>::new();

        let err = cache
            .get_or_try_insert_with(1, || Err(Error::invalid_schema("nope")))
            .unwrap_err();
        assert!(err.is_invalid_schema());
        assert_eq!(cache.len(), 0);

        assert_eq!(cache.get_or_try_insert_with(1, || Ok(7)).unwrap(), 7);
    }
}
