//! Cache Module
//!
//! Provides a byte-bounded, in-memory LRU cache. The cache is an accelerator
//! only; the durable store stays authoritative.

mod entry;
mod error;
mod lru;
mod stats;
mod store;


// Re-export public types
pub use entry::CacheEntry;
pub use error::CacheError;
pub use lru::{LruList, NodeId};
pub use stats::{CacheCounters, CacheEvent, CacheStats};
pub use store::LruCache;
