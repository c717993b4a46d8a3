//! Cache Entry Module
//!
//! A cached value together with its accounted size and its position in the
//! eviction order.

use crate::cache::lru::NodeId;
use crate::kv::Value;

// == Cache Entry ==
/// Represents a single cache entry with value and bookkeeping metadata.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The cached value
    pub value: Value,
    /// Bytes charged against the cache capacity
    pub size_bytes: usize,
    /// Position in the eviction-order list
    pub node: NodeId,
}

impl CacheEntry {
    /// Creates an entry for `value` linked at `node`.
    pub fn new(value: Value, node: NodeId) -> Self {
        Self {
            size_bytes: value.size(),
            value,
            node,
        }
    }
}
