//! Durable Store Module
//!
//! Crash-consistent, file-backed storage; the source of truth for every key.

mod file_store;
mod layout;

pub use file_store::FileStore;
pub use layout::{StoreLayout, STAGING_DIR};
