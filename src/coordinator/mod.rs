//! Storage Coordinator Module
//!
//! Composes the cache and the durable store behind the [`KeyValueStore`]
//! interface.

mod caching;
mod locking;

use std::sync::Arc;

use tracing::info;

use crate::cache::LruCache;
use crate::config::Config;
use crate::durable::FileStore;
use crate::error::{Result, StoreError};
use crate::kv::KeyValueStore;

pub use caching::CachingStore;
pub use locking::LockStrategy;

/// Builds the store described by `config`.
///
/// A cache capacity of 0 yields the bare durable store; anything else wraps
/// it in a [`CachingStore`].
pub fn build_store(config: &Config) -> Result<Arc<dyn KeyValueStore>> {
    let durable = FileStore::open(&config.data_dir)?;

    if config.cache_capacity_bytes == 0 {
        info!("Cache disabled, serving from durable store only");
        return Ok(Arc::new(durable));
    }

    let cache = LruCache::new(config.cache_capacity_bytes)
        .map_err(|e| StoreError::InvalidRequest(e.to_string()))?;
    let locks = LockStrategy::sharded(config.lock_shards);
    info!(
        capacity_bytes = config.cache_capacity_bytes,
        lock_shards = locks.shard_count(),
        "Cache enabled"
    );
    Ok(Arc::new(CachingStore::new(durable, cache, locks)))
}
