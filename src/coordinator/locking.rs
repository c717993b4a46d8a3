//! Request Serialization
//!
//! Decides which requests may run their bodies concurrently. A request holds
//! the guard for its key from first cache lookup to last cache update.

use parking_lot::{Mutex, MutexGuard};

use crate::kv::Key;

// == Lock Strategy ==
#[derive(Debug)]
pub enum LockStrategy {
    /// One lock for every request
    Global(Mutex<()>),
    /// Requests for keys in different shards run concurrently
    Sharded(Vec<Mutex<()>>),
}

impl LockStrategy {
    pub fn global() -> Self {
        LockStrategy::Global(Mutex::new(()))
    }

    /// `shards <= 1` falls back to a single global lock.
    pub fn sharded(shards: usize) -> Self {
        if shards <= 1 {
            return Self::global();
        }
        LockStrategy::Sharded((0..shards).map(|_| Mutex::new(())).collect())
    }

    /// Blocks until the lock covering `key` is held.
    pub fn acquire(&self, key: &Key) -> MutexGuard<'_, ()> {
        match self {
            LockStrategy::Global(lock) => lock.lock(),
            LockStrategy::Sharded(locks) => locks[shard_index(key, locks.len())].lock(),
        }
    }

    pub fn shard_count(&self) -> usize {
        match self {
            LockStrategy::Global(_) => 1,
            LockStrategy::Sharded(locks) => locks.len(),
        }
    }
}

fn shard_index(key: &Key, shards: usize) -> usize {
    let hash = blake3::hash(key.as_bytes());
    let b = hash.as_bytes();
    let h = u64::from_le_bytes([b[0], b[1], b[2], b[3], b[4], b[5], b[6], b[7]]);
    (h % shards as u64) as usize
}
