//! Cache Store Module
//!
//! Byte-bounded LRU cache combining a HashMap index with the eviction-order list.

use std::collections::HashMap;

use tracing::debug;

use crate::cache::{CacheCounters, CacheEntry, CacheError, CacheEvent, CacheStats, LruList};
use crate::kv::{Key, Value};

// == LRU Cache ==
/// In-memory cache bounded by the total byte size of its values.
///
/// Every key in `entries` owns exactly one node in `order`, and the sum of
/// entry sizes never exceeds `capacity_bytes`.
#[derive(Debug)]
pub struct LruCache {
    /// Key-value index
    entries: HashMap<Key, CacheEntry>,
    /// Eviction order, least recently used first
    order: LruList,
    /// Hit, miss, eviction and rejection counts
    counters: CacheCounters,
    /// Maximum total value bytes
    capacity_bytes: usize,
    /// Current total value bytes
    size_bytes: usize,
}

impl LruCache {
    // == Constructor ==
    /// Creates an empty cache holding at most `capacity_bytes` of values.
    pub fn new(capacity_bytes: usize) -> Result<Self, CacheError> {
        if capacity_bytes == 0 {
            return Err(CacheError::ZeroCapacity);
        }

        Ok(Self {
            entries: HashMap::new(),
            order: LruList::new(),
            counters: CacheCounters::default(),
            capacity_bytes,
            size_bytes: 0,
        })
    }

    // == Set ==
    /// Caches `value` under `key` as the most recently used entry.
    ///
    /// Re-setting an identical value only refreshes recency. A different value
    /// replaces the old entry; the old entry is dropped even when the new value
    /// is then refused as too large, so a stale value is never served.
    pub fn set(&mut self, key: Key, value: Value) -> Result<(), CacheError> {
        if let Some(existing) = self.entries.get(&key) {
            if existing.value == value {
                return self.touch(&key);
            }
            self.remove_entry(&key)?;
        }

        let size = value.size();
        if size >= self.capacity_bytes {
            self.counters.record(CacheEvent::Rejection);
            return Err(CacheError::ValueTooLarge {
                size,
                capacity: self.capacity_bytes,
            });
        }

        while self.size_bytes + size > self.capacity_bytes {
            self.evict_lru()?;
        }

        let node = self.order.push_back(key.clone());
        self.entries.insert(key, CacheEntry::new(value, node));
        self.size_bytes += size;

        Ok(())
    }

    // == Get ==
    /// Returns the cached value and marks it most recently used.
    pub fn get(&mut self, key: &Key) -> Result<Value, CacheError> {
        let value = match self.entries.get(key) {
            Some(entry) => entry.value.clone(),
            None => {
                self.counters.record(CacheEvent::Miss);
                return Err(CacheError::Miss(key.clone()));
            }
        };

        self.touch(key)?;
        self.counters.record(CacheEvent::Hit);
        Ok(value)
    }

    /// Returns true if `key` is cached, without affecting recency.
    pub fn contains(&self, key: &Key) -> bool {
        self.entries.contains_key(key)
    }

    /// Cached keys from least to most recently used.
    pub fn lru_order(&self) -> Vec<Key> {
        self.order.iter().cloned().collect()
    }

    pub fn stats(&self) -> CacheStats {
        self.counters
            .snapshot(self.entries.len(), self.size_bytes, self.capacity_bytes)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn size_bytes(&self) -> usize {
        self.size_bytes
    }

    pub fn capacity_bytes(&self) -> usize {
        self.capacity_bytes
    }

    // == Touch ==
    /// Moves `key` to the most recently used end.
    fn touch(&mut self, key: &Key) -> Result<(), CacheError> {
        let node = self
            .entries
            .get(key)
            .map(|entry| entry.node)
            .ok_or_else(|| CacheError::Inconsistent(format!("Key missing in cache: {}", key)))?;

        if !self.order.move_to_back(node) {
            return Err(CacheError::Inconsistent(format!(
                "No eviction-order node for {}",
                key
            )));
        }
        Ok(())
    }

    // == Evict ==
    /// Drops the least recently used entry.
    fn evict_lru(&mut self) -> Result<(), CacheError> {
        let key = self.order.pop_front().ok_or(CacheError::EvictEmpty)?;
        let entry = self.entries.remove(&key).ok_or_else(|| {
            CacheError::Inconsistent(format!("Key {} missing from cache during eviction", key))
        })?;

        self.size_bytes -= entry.size_bytes;
        self.counters.record(CacheEvent::Eviction);
        debug!(key = %key, size_bytes = entry.size_bytes, "Evicted cache entry");
        Ok(())
    }

    fn remove_entry(&mut self, key: &Key) -> Result<CacheEntry, CacheError> {
        let entry = self
            .entries
            .remove(key)
            .ok_or_else(|| CacheError::Inconsistent(format!("Key missing in cache: {}", key)))?;

        self.size_bytes -= entry.size_bytes;
        if self.order.remove(entry.node).is_none() {
            return Err(CacheError::Inconsistent(format!(
                "No eviction-order node for {}",
                key
            )));
        }
        Ok(entry)
    }

    /// Verifies index/order agreement and byte accounting.
    #[cfg(test)]
    pub(crate) fn check_consistency(&self) -> Result<(), String> {
        if self.entries.len() != self.order.len() {
            return Err(format!(
                "index has {} keys, order has {}",
                self.entries.len(),
                self.order.len()
            ));
        }

        let mut total = 0;
        for (key, entry) in &self.entries {
            if self.order.key(entry.node) != Some(key) {
                return Err(format!("node for {} points elsewhere", key));
            }
            if entry.size_bytes != entry.value.size() {
                return Err(format!("size of {} is stale", key));
            }
            total += entry.size_bytes;
        }

        if total != self.size_bytes {
            return Err(format!("tracked {} bytes, actual {}", self.size_bytes, total));
        }
        if self.size_bytes > self.capacity_bytes {
            return Err(format!(
                "size {} exceeds capacity {}",
                self.size_bytes, self.capacity_bytes
            ));
        }
        Ok(())
    }
}
