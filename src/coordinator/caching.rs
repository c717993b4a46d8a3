//! Caching Store
//!
//! Puts an [`LruCache`] in front of a durable [`KeyValueStore`]. The durable
//! store is written first and read on every miss; the cache only ever holds
//! values the durable store has committed.

use parking_lot::Mutex;
use tracing::{debug, warn};

use crate::cache::{CacheError, CacheStats, LruCache};
use crate::coordinator::LockStrategy;
use crate::error::Result;
use crate::kv::{validate_key, validate_value, Key, KeyValueStore, Value};

// == Caching Store ==
#[derive(Debug)]
pub struct CachingStore<S> {
    cache: Mutex<LruCache>,
    store: S,
    locks: LockStrategy,
}

impl<S: KeyValueStore> CachingStore<S> {
    pub fn new(store: S, cache: LruCache, locks: LockStrategy) -> Self {
        Self {
            cache: Mutex::new(cache),
            store,
            locks,
        }
    }

    /// The wrapped store of record.
    pub fn inner(&self) -> &S {
        &self.store
    }

    /// Best-effort cache update; failures are reported, never returned.
    fn fill_cache(&self, key: Key, value: Value, reason: &'static str) {
        if let Err(err) = self.cache.lock().set(key.clone(), value) {
            warn!(key = %key, error = %err, reason, "Cache update skipped");
        }
    }
}

impl<S: KeyValueStore> KeyValueStore for CachingStore<S> {
    // == Get ==
    /// Cache first; on a miss, read the durable store and backfill.
    fn get(&self, key: &Key) -> Result<Value> {
        validate_key(key)?;
        let _guard = self.locks.acquire(key);

        match self.cache.lock().get(key) {
            Ok(value) => {
                debug!(key = %key, "Cache hit");
                return Ok(value);
            }
            Err(CacheError::Miss(_)) => debug!(key = %key, "Cache miss"),
            Err(err) => warn!(key = %key, error = %err, "Cache lookup failed"),
        }

        let value = self.store.get(key)?;
        self.fill_cache(key.clone(), value.clone(), "backfill");
        Ok(value)
    }

    // == Set ==
    /// Durable write first; the cache is only touched once it succeeded.
    fn set(&self, key: Key, value: Value) -> Result<()> {
        validate_key(&key)?;
        validate_value(&value)?;
        let _guard = self.locks.acquire(&key);

        self.store.set(key.clone(), value.clone())?;
        self.fill_cache(key, value, "write-through");
        Ok(())
    }

    fn cache_stats(&self) -> Option<CacheStats> {
        Some(self.cache.lock().stats())
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use std::collections::HashMap;
    use std::io;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    /// In-memory store that counts calls and can be told to fail.
    #[derive(Default)]
    struct FakeStore {
        values: Mutex<HashMap<Key, Value>>,
        get_calls: AtomicUsize,
        set_calls: AtomicUsize,
        fail_gets: AtomicBool,
        fail_sets: AtomicBool,
    }

    impl FakeStore {
        fn injected(op: &'static str) -> StoreError {
            StoreError::io(op, "/fake", io::Error::other("injected failure"))
        }
    }

    impl KeyValueStore for FakeStore {
        fn get(&self, key: &Key) -> Result<Value> {
            self.get_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_gets.load(Ordering::SeqCst) {
                return Err(Self::injected("read"));
            }
            self.values
                .lock()
                .get(key)
                .cloned()
                .ok_or_else(|| StoreError::NotFound(key.clone()))
        }

        fn set(&self, key: Key, value: Value) -> Result<()> {
            self.set_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_sets.load(Ordering::SeqCst) {
                return Err(Self::injected("promote"));
            }
            self.values.lock().insert(key, value);
            Ok(())
        }
    }

    fn create_store(capacity: usize) -> CachingStore<FakeStore> {
        CachingStore::new(
            FakeStore::default(),
            LruCache::new(capacity).unwrap(),
            LockStrategy::global(),
        )
    }

    #[test]
    fn test_set_then_get_served_from_cache() {
        let store = create_store(50);

        store.set(Key::from("a key"), Value::from("some value 123")).unwrap();
        let value = store.get(&Key::from("a key")).unwrap();

        assert_eq!(value, Value::from("some value 123"));
        assert_eq!(store.inner().set_calls.load(Ordering::SeqCst), 1);
        assert_eq!(store.inner().get_calls.load(Ordering::SeqCst), 0);
        assert_eq!(store.cache_stats().unwrap().hits, 1);
    }

    #[test]
    fn test_overwrite_returns_latest_value() {
        let store = create_store(50);

        store.set(Key::from("a key"), Value::from("some value 123")).unwrap();
        store.set(Key::from("a key"), Value::from("another ")).unwrap();

        assert_eq!(store.get(&Key::from("a key")).unwrap(), Value::from("another "));
    }

    #[test]
    fn test_identical_set_keeps_cache_size() {
        let store = create_store(50);

        store.set(Key::from("a key"), Value::from("some value 123")).unwrap();
        let before = store.cache_stats().unwrap();
        store.set(Key::from("a key"), Value::from("some value 123")).unwrap();
        let after = store.cache_stats().unwrap();

        assert_eq!(before.size_bytes, after.size_bytes);
        assert_eq!(before.total_entries, after.total_entries);
        assert_eq!(store.inner().set_calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_failed_durable_write_leaves_cache_untouched() {
        let store = create_store(50);
        store.set(Key::from("k"), Value::from("old")).unwrap();

        store.inner().fail_sets.store(true, Ordering::SeqCst);
        let result = store.set(Key::from("k"), Value::from("new"));

        assert!(matches!(result, Err(StoreError::Io { .. })));
        assert_eq!(store.get(&Key::from("k")).unwrap(), Value::from("old"));
        assert_eq!(store.inner().get_calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_failed_first_write_caches_nothing() {
        let store = create_store(50);
        store.inner().fail_sets.store(true, Ordering::SeqCst);

        assert!(store.set(Key::from("k"), Value::from("v")).is_err());
        assert_eq!(store.cache_stats().unwrap().total_entries, 0);
    }

    #[test]
    fn test_miss_reads_durable_and_backfills() {
        let store = create_store(50);
        store
            .inner()
            .values
            .lock()
            .insert(Key::from("k"), Value::from("durable"));

        assert_eq!(store.get(&Key::from("k")).unwrap(), Value::from("durable"));
        assert_eq!(store.get(&Key::from("k")).unwrap(), Value::from("durable"));

        assert_eq!(store.inner().get_calls.load(Ordering::SeqCst), 1);
        let stats = store.cache_stats().unwrap();
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.hits, 1);
    }

    #[test]
    fn test_missing_key_is_not_found() {
        let store = create_store(50);

        let result = store.get(&Key::from("missing"));

        assert!(matches!(result, Err(StoreError::NotFound(_))));
        assert_eq!(store.cache_stats().unwrap().total_entries, 0);
    }

    #[test]
    fn test_durable_read_error_propagates() {
        let store = create_store(50);
        store.inner().fail_gets.store(true, Ordering::SeqCst);

        let result = store.get(&Key::from("k"));

        assert!(matches!(result, Err(StoreError::Io { op: "read", .. })));
    }

    #[test]
    fn test_oversize_value_durable_but_not_cached() {
        let store = create_store(10);
        let large = Value::from("a value of well over thirty bytes in length");

        store.set(Key::from("k"), large.clone()).unwrap();
        assert_eq!(store.cache_stats().unwrap().total_entries, 0);

        assert_eq!(store.get(&Key::from("k")).unwrap(), large);
        assert_eq!(store.inner().get_calls.load(Ordering::SeqCst), 1);

        let stats = store.cache_stats().unwrap();
        assert_eq!(stats.total_entries, 0);
        assert_eq!(stats.rejections, 2);
    }

    #[test]
    fn test_invalid_input_rejected_before_io() {
        let store = create_store(50);

        assert!(matches!(
            store.set(Key::new(Vec::new()), Value::from("v")),
            Err(StoreError::InvalidRequest(_))
        ));
        assert!(matches!(
            store.set(Key::from("k"), Value::new(Vec::new())),
            Err(StoreError::InvalidRequest(_))
        ));
        assert!(matches!(
            store.get(&Key::new(Vec::new())),
            Err(StoreError::InvalidRequest(_))
        ));
        assert_eq!(store.inner().set_calls.load(Ordering::SeqCst), 0);
        assert_eq!(store.inner().get_calls.load(Ordering::SeqCst), 0);
    }
}
