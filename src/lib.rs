//! Mini KV - A key-value server with a byte-bounded LRU cache in front of a
//! crash-consistent file store.
//!
//! The file store is the source of truth; the cache only accelerates reads.

pub mod api;
pub mod cache;
pub mod config;
pub mod coordinator;
pub mod durable;
pub mod error;
pub mod kv;
pub mod models;

pub use api::AppState;
pub use config::Config;
pub use coordinator::{build_store, CachingStore, LockStrategy};
pub use durable::FileStore;
pub use error::{Result, StoreError};
pub use kv::{Key, KeyValueStore, Value};
