//! Cache Statistics Module
//!
//! [`CacheCounters`] is updated by the cache as it serves requests;
//! [`CacheStats`] is the point-in-time snapshot handed to callers.

use serde::Serialize;

/// Something the cache did that is worth counting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheEvent {
    Hit,
    Miss,
    Eviction,
    /// A value was refused because it could never fit
    Rejection,
}

// == Counters ==
/// Running event counters owned by an `LruCache`.
#[derive(Debug, Clone, Default)]
pub struct CacheCounters {
    hits: u64,
    misses: u64,
    evictions: u64,
    rejections: u64,
}

impl CacheCounters {
    pub fn record(&mut self, event: CacheEvent) {
        let counter = match event {
            CacheEvent::Hit => &mut self.hits,
            CacheEvent::Miss => &mut self.misses,
            CacheEvent::Eviction => &mut self.evictions,
            CacheEvent::Rejection => &mut self.rejections,
        };
        *counter += 1;
    }

    /// Combines the counters with the cache's current occupancy.
    pub fn snapshot(&self, total_entries: usize, size_bytes: usize, capacity_bytes: usize) -> CacheStats {
        CacheStats {
            hits: self.hits,
            misses: self.misses,
            evictions: self.evictions,
            rejections: self.rejections,
            total_entries,
            size_bytes,
            capacity_bytes,
        }
    }
}

// == Snapshot ==
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CacheStats {
    pub hits: u64,
    /// Lookups that fell through to the durable layer
    pub misses: u64,
    pub evictions: u64,
    pub rejections: u64,
    pub total_entries: usize,
    /// Bytes currently charged against capacity
    pub size_bytes: usize,
    pub capacity_bytes: usize,
}

impl CacheStats {
    /// hits / (hits + misses), or 0.0 before any lookup.
    pub fn hit_rate(&self) -> f64 {
        ratio(self.hits, self.hits + self.misses)
    }

    /// Share of the byte capacity in use.
    pub fn fill_ratio(&self) -> f64 {
        ratio(self.size_bytes as u64, self.capacity_bytes as u64)
    }
}

fn ratio(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64
    }
}
