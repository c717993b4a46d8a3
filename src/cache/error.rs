//! Cache Error Module
//!
//! Failures of the cache layer. Apart from construction, none of these fail a
//! store operation; the caching decorator records them and carries on with
//! the durable result.

use thiserror::Error;

use crate::kv::Key;

// == Cache Error Enum ==
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// A cache must be able to hold at least one byte
    #[error("Cannot create a cache of capacity 0")]
    ZeroCapacity,

    /// Key is not cached; callers fall through to the durable layer
    #[error("Cache miss for {0}")]
    Miss(Key),

    /// Value can never fit the cache capacity
    #[error("Value too large for cache: {size} bytes, capacity {capacity} bytes")]
    ValueTooLarge { size: usize, capacity: usize },

    /// Eviction was needed but nothing is left to evict
    #[error("Cannot evict an empty cache")]
    EvictEmpty,

    /// Lookup index and eviction order disagree
    #[error("Cache bookkeeping inconsistent: {0}")]
    Inconsistent(String),
}
