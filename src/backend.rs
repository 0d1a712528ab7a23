//! Backend capability contract
//!
//! Defines the raw cache interface the safe wrapper decorates, along with
//! the failure signal backends raise.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Duration;
use serde_json::Value;
use thiserror::Error;

// == Backend Error ==
/// Failure raised by a raw cache backend.
///
/// Malformed input is kept apart from every other failure so callers of the
/// safe wrapper can correct their input instead of retrying.
#[derive(Debug, Error)]
pub enum BackendError {
    /// A key or argument the backend rejects as malformed
    #[error("invalid key: {0}")]
    InvalidKey(String),

    /// Any other backend failure
    #[error(transparent)]
    Backend(#[from] anyhow::Error),
}

// == Raw Cache ==
/// The eight-operation capability set of a cache backend.
///
/// Mutating operations signal failure through two channels: a raised
/// [`BackendError`], or an `Ok(false)` return for backends that report
/// failure without raising. `get` and `has` only use the error channel.
#[async_trait]
pub trait RawCache: Send + Sync {
    /// Fetches the value stored under `key`, or `default` on a miss.
    async fn get(&self, key: &str, default: Value) -> Result<Value, BackendError>;

    /// Stores `value` under `key`, overwriting any existing entry.
    ///
    /// A `ttl` of `None` means the entry never expires by time. `Some`
    /// durations become an absolute deadline, including zero-length ones;
    /// the two shapes are never interchangeable.
    async fn set(
        &self,
        key: &str,
        value: Value,
        ttl: Option<Duration>,
    ) -> Result<bool, BackendError>;

    /// Removes the entry stored under `key`.
    async fn delete(&self, key: &str) -> Result<bool, BackendError>;

    /// Wipes the entire cache.
    async fn clear(&self) -> Result<bool, BackendError>;

    /// Reports whether `key` currently holds a live entry.
    ///
    /// A `true` result is subject to a race: a concurrent deletion or expiry
    /// can invalidate it before the caller's next operation.
    async fn has(&self, key: &str) -> Result<bool, BackendError>;

    /// Fetches values for `keys`, substituting `default` for misses.
    async fn get_multiple(
        &self,
        keys: &[String],
        default: Value,
    ) -> Result<HashMap<String, Value>, BackendError>;

    /// Stores every pair in `values` with one shared `ttl`.
    async fn set_multiple(
        &self,
        values: &[(String, Value)],
        ttl: Option<Duration>,
    ) -> Result<bool, BackendError>;

    /// Removes every entry named in `keys`.
    async fn delete_multiple(&self, keys: &[String]) -> Result<bool, BackendError>;
}
