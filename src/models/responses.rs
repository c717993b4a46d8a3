//! Response DTOs for the key-value server API

use serde::Serialize;

use crate::cache::CacheStats;
use crate::kv::Value;

/// Body of a successful `/get`.
#[derive(Debug, Clone, Serialize)]
pub struct GetResponse {
    pub key: String,
    /// Stored bytes rendered as UTF-8, invalid sequences replaced
    pub value: String,
    pub size_bytes: usize,
}

impl GetResponse {
    pub fn new(key: impl Into<String>, value: &Value) -> Self {
        Self {
            key: key.into(),
            value: String::from_utf8_lossy(value.as_bytes()).into_owned(),
            size_bytes: value.size(),
        }
    }
}

/// Body of a successful `/set`, sent only after the value is durable.
#[derive(Debug, Clone, Serialize)]
pub struct SetResponse {
    pub message: String,
    pub key: String,
    pub size_bytes: usize,
}

impl SetResponse {
    pub fn committed(key: impl Into<String>, size_bytes: usize) -> Self {
        let key = key.into();
        Self {
            message: format!("Key '{}' committed ({} bytes)", key, size_bytes),
            key,
            size_bytes,
        }
    }
}

/// Body of `GET /stats`. Counters are flattened into the top-level object.
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// False when the server runs on the durable store alone
    pub cache_enabled: bool,
    #[serde(flatten)]
    pub cache: CacheStats,
    pub hit_rate: f64,
    pub fill_ratio: f64,
}

impl StatsResponse {
    pub fn new(stats: Option<CacheStats>) -> Self {
        let cache_enabled = stats.is_some();
        let cache = stats.unwrap_or_default();
        Self {
            cache_enabled,
            hit_rate: cache.hit_rate(),
            fill_ratio: cache.fill_ratio(),
            cache,
        }
    }
}

/// Body of `GET /health`.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    /// RFC 3339 time the check was answered
    pub timestamp: String,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Body of every error response.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
