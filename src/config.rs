//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::path::PathBuf;

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Root directory of the durable store
    pub data_dir: PathBuf,
    /// Byte capacity of the in-memory cache; 0 disables the cache
    pub cache_capacity_bytes: usize,
    /// Number of request lock shards; 1 serializes every request
    pub lock_shards: usize,
    /// HTTP server port
    pub server_port: u16,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `DATA_DIR` - Durable store root (default: /tmp/mini_kv)
    /// - `CACHE_CAPACITY_BYTES` - Cache capacity in bytes (default: 64 MiB)
    /// - `LOCK_SHARDS` - Request lock shards (default: 1)
    /// - `SERVER_PORT` - HTTP server port (default: 8080)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            data_dir: env::var("DATA_DIR")
                .ok()
                .filter(|v| !v.is_empty())
                .map(PathBuf::from)
                .unwrap_or(defaults.data_dir),
            cache_capacity_bytes: env::var("CACHE_CAPACITY_BYTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.cache_capacity_bytes),
            lock_shards: env::var("LOCK_SHARDS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.lock_shards),
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.server_port),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("/tmp/mini_kv"),
            cache_capacity_bytes: 64 * 1024 * 1024,
            lock_shards: 1,
            server_port: 8080,
        }
    }
}
