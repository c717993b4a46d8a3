//! API Handlers
//!
//! HTTP request handlers for each key-value server endpoint. Store calls do
//! blocking file I/O, so they run on tokio's blocking pool.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};

use crate::config::Config;
use crate::coordinator::build_store;
use crate::error::{Result, StoreError};
use crate::kv::{Key, KeyValueStore};
use crate::models::{GetQuery, GetResponse, HealthResponse, SetRequest, SetResponse, StatsResponse};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Store shared by every request
    pub store: Arc<dyn KeyValueStore>,
}

impl AppState {
    /// Creates a new AppState around the given store.
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Creates a new AppState from configuration.
    ///
    /// Opens the durable store, clearing any interrupted writes.
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(build_store(config)?))
    }
}

/// Runs a store call on the blocking pool.
async fn run_blocking<T, F>(f: F) -> Result<T>
where
    F: FnOnce() -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| StoreError::Internal(format!("Store task failed: {}", e)))?
}

async fn fetch(state: AppState, key: String) -> Result<Json<GetResponse>> {
    let store = state.store.clone();
    let lookup = Key::from(key.as_str());
    let value = run_blocking(move || store.get(&lookup)).await?;

    Ok(Json(GetResponse::new(key, &value)))
}

/// Handler for PUT /set and POST /set
///
/// Responds only once the value is durable.
pub async fn set_handler(
    State(state): State<AppState>,
    Json(req): Json<SetRequest>,
) -> Result<Json<SetResponse>> {
    let name = req.key.clone();
    let (key, value) = req.into_entry()?;
    let size_bytes = value.size();

    let store = state.store.clone();
    run_blocking(move || store.set(key, value)).await?;

    Ok(Json(SetResponse::committed(name, size_bytes)))
}

/// Handler for GET /get/:key
pub async fn get_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<GetResponse>> {
    fetch(state, key).await
}

/// Handler for GET /get?key=...
pub async fn get_query_handler(
    State(state): State<AppState>,
    Query(query): Query<GetQuery>,
) -> Result<Json<GetResponse>> {
    fetch(state, query.require_key()?).await
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(StatsResponse::new(state.store.cache_stats()))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
