//! Request DTOs for the key-value server API
//!
//! Wire shapes of `/set` bodies and `/get` queries, and their conversion into
//! engine types.
//!
//! The HTTP surface carries UTF-8 text only: a key or value is stored as the
//! exact bytes of its JSON string, with no base64 or other decoding. Arbitrary
//! binary values are reachable through [`crate::kv::KeyValueStore`] directly.

use serde::Deserialize;

use crate::error::{Result, StoreError};
use crate::kv::{validate_key, validate_value, Key, Value};

/// JSON body of `PUT /set` and `POST /set`.
#[derive(Debug, Clone, Deserialize)]
pub struct SetRequest {
    pub key: String,
    /// Stored as its UTF-8 bytes
    pub value: String,
}

impl SetRequest {
    /// Converts the body into an engine key and value, rejecting empty input.
    pub fn into_entry(self) -> Result<(Key, Value)> {
        let key = Key::from(self.key);
        let value = Value::from(self.value);
        validate_key(&key)?;
        validate_value(&value)?;
        Ok((key, value))
    }
}

/// Query string of `GET /get?key=...`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GetQuery {
    pub key: Option<String>,
}

impl GetQuery {
    /// The requested key; absent and empty are both rejected.
    pub fn require_key(self) -> Result<String> {
        match self.key {
            Some(key) if !key.is_empty() => Ok(key),
            _ => Err(StoreError::InvalidRequest(
                "Missing query parameter 'key'".to_string(),
            )),
        }
    }
}
