//! In-Memory Reference Backend
//!
//! A clock-driven implementation of the raw cache contract, intended as a
//! test/demo double rather than a production store.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Duration;
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::debug;

use crate::backend::{BackendError, RawCache};
use crate::cache::{CacheStats, CachedItem};
use crate::clock::Clock;

// == Store Inner ==
/// Map and counters, guarded together so they never drift apart.
#[derive(Debug, Default)]
struct StoreInner {
    entries: HashMap<String, CachedItem>,
    stats: CacheStats,
}

// == Memory Cache ==
/// Unbounded in-memory cache with lazy TTL expiry.
///
/// Expired entries are removed only when `has` finds them, when they are
/// overwritten, or when they are deleted; there is no background sweep.
/// Note the deliberate asymmetry: `get` returns whatever is stored without
/// consulting liveness, while `has` enforces it.
///
/// Mutating operations cannot fail here, so they always report `Ok(true)`.
#[derive(Debug)]
pub struct MemoryCache {
    inner: RwLock<StoreInner>,
    clock: Arc<dyn Clock>,
}

impl MemoryCache {
    // == Constructor ==
    /// Creates an empty cache reading time from `clock`.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            inner: RwLock::new(StoreInner::default()),
            clock,
        }
    }

    // == Length ==
    /// Returns the number of stored entries, live or not.
    pub async fn len(&self) -> usize {
        self.inner.read().await.entries.len()
    }

    // == Is Empty ==
    /// Returns true if nothing is stored.
    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.entries.is_empty()
    }

    // == Stats ==
    /// Returns a snapshot of the activity counters.
    pub async fn stats(&self) -> CacheStats {
        let inner = self.inner.read().await;
        let mut stats = inner.stats.clone();
        stats.set_total_entries(inner.entries.len());
        stats
    }
}

#[async_trait]
impl RawCache for MemoryCache {
    /// Returns the stored value if the key is present, else `default`.
    ///
    /// Liveness is not checked here; only `has` enforces expiry.
    async fn get(&self, key: &str, default: Value) -> Result<Value, BackendError> {
        let mut inner = self.inner.write().await;
        if let Some(item) = inner.entries.get(key) {
            let value = item.value().clone();
            inner.stats.record_hit();
            Ok(value)
        } else {
            inner.stats.record_miss();
            Ok(default)
        }
    }

    async fn set(
        &self,
        key: &str,
        value: Value,
        ttl: Option<Duration>,
    ) -> Result<bool, BackendError> {
        let expires_at = ttl.map(|ttl| self.clock.now() + ttl);
        let mut inner = self.inner.write().await;
        inner
            .entries
            .insert(key.to_string(), CachedItem::new(value, expires_at));
        let count = inner.entries.len();
        inner.stats.set_total_entries(count);
        Ok(true)
    }

    async fn delete(&self, key: &str) -> Result<bool, BackendError> {
        let mut inner = self.inner.write().await;
        inner.entries.remove(key);
        let count = inner.entries.len();
        inner.stats.set_total_entries(count);
        Ok(true)
    }

    async fn clear(&self) -> Result<bool, BackendError> {
        let mut inner = self.inner.write().await;
        inner.entries.clear();
        inner.stats.set_total_entries(0);
        Ok(true)
    }

    /// True only if the key exists and the item is still active.
    ///
    /// A found-but-expired entry is evicted on the way out (lazy expiry).
    async fn has(&self, key: &str) -> Result<bool, BackendError> {
        let now = self.clock.now();
        let mut inner = self.inner.write().await;
        let active = inner.entries.get(key).map(|item| item.is_active(now));
        match active {
            Some(true) => {
                inner.stats.record_hit();
                Ok(true)
            }
            Some(false) => {
                inner.entries.remove(key);
                let count = inner.entries.len();
                inner.stats.record_eviction();
                inner.stats.record_miss();
                inner.stats.set_total_entries(count);
                debug!(key, "evicted expired entry");
                Ok(false)
            }
            None => {
                inner.stats.record_miss();
                Ok(false)
            }
        }
    }

    async fn get_multiple(
        &self,
        keys: &[String],
        default: Value,
    ) -> Result<HashMap<String, Value>, BackendError> {
        let mut output = HashMap::with_capacity(keys.len());
        for key in keys {
            let value = self.get(key, default.clone()).await?;
            output.insert(key.clone(), value);
        }
        Ok(output)
    }

    async fn set_multiple(
        &self,
        values: &[(String, Value)],
        ttl: Option<Duration>,
    ) -> Result<bool, BackendError> {
        for (key, value) in values {
            self.set(key, value.clone(), ttl).await?;
        }
        Ok(true)
    }

    async fn delete_multiple(&self, keys: &[String]) -> Result<bool, BackendError> {
        for key in keys {
            self.delete(key).await?;
        }
        Ok(true)
    }
}
