//! Key/Value Model
//!
//! Opaque byte-string keys and values, plus the capability interface shared by
//! the bare durable store and the caching decorator.

use std::fmt;

use crate::cache::CacheStats;
use crate::error::{Result, StoreError};

// == Key ==
/// Opaque, immutable identity of a stored item.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Key(Vec<u8>);

impl Key {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for Key {
    fn from(s: &str) -> Self {
        Self(s.as_bytes().to_vec())
    }
}

impl From<String> for Key {
    fn from(s: String) -> Self {
        Self(s.into_bytes())
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", String::from_utf8_lossy(&self.0))
    }
}

// == Value ==
/// Opaque, immutable payload. Its size is its byte length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Value(Vec<u8>);

impl Value {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    /// Byte length, the unit of cache capacity accounting.
    pub fn size(&self) -> usize {
        self.0.len()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self(s.as_bytes().to_vec())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self(s.into_bytes())
    }
}

// == Key Value Store ==
/// Point read/write capability over a key/value store.
///
/// Implementations synchronize internally; callers may share one instance
/// across threads.
pub trait KeyValueStore: Send + Sync {
    /// Returns the committed value for `key`.
    ///
    /// Fails with [`StoreError::NotFound`] when nothing is stored, and with
    /// [`StoreError::Io`] when the value exists but cannot be read.
    fn get(&self, key: &Key) -> Result<Value>;

    /// Associates `key` with `value`. A failed call leaves no trace of `value`.
    fn set(&self, key: Key, value: Value) -> Result<()>;

    /// Cache statistics, for stores that carry a cache.
    fn cache_stats(&self) -> Option<CacheStats> {
        None
    }
}

// == Validation ==
/// Rejects an empty key before any I/O is attempted.
pub fn validate_key(key: &Key) -> Result<()> {
    if key.is_empty() {
        return Err(StoreError::InvalidRequest("Key cannot be empty".to_string()));
    }
    Ok(())
}

/// Rejects an empty value before any I/O is attempted.
pub fn validate_value(value: &Value) -> Result<()> {
    if value.is_empty() {
        return Err(StoreError::InvalidRequest(
            "Value cannot be empty".to_string(),
        ));
    }
    Ok(())
}
