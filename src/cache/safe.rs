//! Safe Cache Wrapper
//!
//! Decorates any raw cache backend and converts its mixed failure signals
//! (raised errors and boolean false returns) into one typed result channel.

use std::collections::HashMap;

use serde_json::{json, Value};
use tracing::warn;

use crate::backend::{BackendError, RawCache};
use crate::error::{CacheError, ErrorContext, Result};
use crate::models::{
    CacheGetMultipleRequest, CacheGetRequest, CacheSetMultipleRequest, CacheSetRequest,
};

// == Safe Cache ==
/// Error-normalizing decorator over a raw cache backend.
///
/// Every operation invokes the backend exactly once and returns a typed
/// result instead of raising or handing back ambiguous booleans. The wrapper
/// holds no state of its own and adds no locking, so one instance can be
/// shared across tasks whenever the backend itself allows it; it provides no
/// check-then-act atomicity across calls.
#[derive(Debug)]
pub struct SafeCache<C: RawCache> {
    backend: C,
}

impl<C: RawCache> SafeCache<C> {
    /// Wraps `backend`.
    pub fn new(backend: C) -> Self {
        Self { backend }
    }

    /// Returns the wrapped backend.
    pub fn backend(&self) -> &C {
        &self.backend
    }

    // == Get ==
    /// Fetches a value, falling back to the request's default on a miss.
    pub async fn get(&self, request: CacheGetRequest) -> Result<Value> {
        let context = || {
            ErrorContext::new()
                .with("action", json!("get"))
                .with("request", request.describe())
        };
        match self
            .backend
            .get(request.key(), request.default().clone())
            .await
        {
            Ok(value) => Ok(value),
            Err(error) => Err(fail(error, context())),
        }
    }

    // == Set ==
    /// Stores the request's value, passing its normalized TTL through
    /// unchanged (an absent TTL is not a zero TTL).
    pub async fn set(&self, request: CacheSetRequest) -> Result<()> {
        let context = || {
            ErrorContext::new()
                .with("action", json!("set"))
                .with("request", request.describe())
        };
        let outcome = self
            .backend
            .set(request.key(), request.value().clone(), request.ttl())
            .await;
        expect_true(outcome, context)
    }

    // == Delete ==
    /// Removes one key.
    pub async fn delete(&self, key: &str) -> Result<()> {
        let context = || {
            ErrorContext::new()
                .with("action", json!("delete"))
                .with("key", json!(key))
        };
        expect_true(self.backend.delete(key).await, context)
    }

    // == Clear ==
    /// Wipes the entire cache.
    pub async fn clear(&self) -> Result<()> {
        let context = || ErrorContext::new().with("action", json!("clear"));
        expect_true(self.backend.clear().await, context)
    }

    // == Has ==
    /// Reports whether a live entry exists for `key`.
    ///
    /// A `true` result can be invalidated by a concurrent deletion or expiry
    /// before the next call.
    pub async fn has(&self, key: &str) -> Result<bool> {
        let context = || {
            ErrorContext::new()
                .with("action", json!("has"))
                .with("key", json!(key))
        };
        match self.backend.has(key).await {
            Ok(found) => Ok(found),
            Err(error) => Err(fail(error, context())),
        }
    }

    // == Get Multiple ==
    /// Fetches several keys in one call; misses carry the request's default.
    pub async fn get_multiple(
        &self,
        request: CacheGetMultipleRequest,
    ) -> Result<HashMap<String, Value>> {
        let context = || {
            ErrorContext::new()
                .with("action", json!("get_multiple"))
                .with("request", request.describe())
        };
        match self
            .backend
            .get_multiple(request.keys(), request.default().clone())
            .await
        {
            Ok(values) => Ok(values),
            Err(error) => Err(fail(error, context())),
        }
    }

    // == Set Multiple ==
    /// Stores several pairs with one shared TTL.
    ///
    /// The batch reports a single aggregate outcome; there is no per-key
    /// failure breakdown.
    pub async fn set_multiple(&self, request: CacheSetMultipleRequest) -> Result<()> {
        let context = || {
            ErrorContext::new()
                .with("action", json!("set_multiple"))
                .with("request", request.describe())
        };
        let outcome = self
            .backend
            .set_multiple(request.values(), request.ttl())
            .await;
        expect_true(outcome, context)
    }

    // == Delete Multiple ==
    /// Removes several keys as one aggregate operation.
    pub async fn delete_multiple(&self, keys: &[String]) -> Result<()> {
        let context = || {
            ErrorContext::new()
                .with("action", json!("delete_multiple"))
                .with("keys", json!(keys))
        };
        expect_true(self.backend.delete_multiple(keys).await, context)
    }
}

// == Classification Helpers ==
/// Classifies a raised backend error, attaching the lazily built context.
fn fail(error: BackendError, context: ErrorContext) -> CacheError {
    let error = CacheError::from_backend(error, context);
    warn!(kind = ?error.kind(), "cache operation failed: {}", error);
    error
}

/// Resolves a boolean completion: `true` is success, `false` is the
/// falsy-failure channel, and raised errors go through classification.
///
/// The context closure only runs on the failure path.
fn expect_true(
    outcome: std::result::Result<bool, BackendError>,
    context: impl FnOnce() -> ErrorContext,
) -> Result<()> {
    match outcome {
        Ok(true) => Ok(()),
        Ok(false) => {
            let error = CacheError::return_false(context());
            warn!(kind = ?error.kind(), "cache operation failed: {}", error);
            Err(error)
        }
        Err(error) => Err(fail(error, context())),
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CacheErrorKind;
    use anyhow::anyhow;
    use async_trait::async_trait;
    use chrono::Duration;
    use serde_json::json;

    /// What every operation of a stub backend should do.
    #[derive(Debug, Clone, Copy)]
    enum Mode {
        /// Succeed: booleans true, `get` echoes the default
        Healthy,
        /// Reject every key as malformed
        RejectKeys,
        /// Raise an opaque backend failure
        Broken,
        /// Complete but report failure with `false`
        FalseReturns,
    }

    #[derive(Debug)]
    struct StubBackend {
        mode: Mode,
    }

    impl StubBackend {
        fn flag(&self) -> std::result::Result<bool, BackendError> {
            match self.mode {
                Mode::Healthy => Ok(true),
                Mode::RejectKeys => Err(BackendError::InvalidKey("malformed key".to_string())),
                Mode::Broken => Err(BackendError::Backend(anyhow!("connection reset"))),
                Mode::FalseReturns => Ok(false),
            }
        }

        fn value(&self, fallback: Value) -> std::result::Result<Value, BackendError> {
            self.flag().map(|_| fallback)
        }
    }

    #[async_trait]
    impl RawCache for StubBackend {
        async fn get(&self, _key: &str, default: Value) -> std::result::Result<Value, BackendError> {
            self.value(default)
        }

        async fn set(
            &self,
            _key: &str,
            _value: Value,
            _ttl: Option<Duration>,
        ) -> std::result::Result<bool, BackendError> {
            self.flag()
        }

        async fn delete(&self, _key: &str) -> std::result::Result<bool, BackendError> {
            self.flag()
        }

        async fn clear(&self) -> std::result::Result<bool, BackendError> {
            self.flag()
        }

        async fn has(&self, _key: &str) -> std::result::Result<bool, BackendError> {
            self.flag()
        }

        async fn get_multiple(
            &self,
            keys: &[String],
            default: Value,
        ) -> std::result::Result<HashMap<String, Value>, BackendError> {
            self.flag()?;
            Ok(keys
                .iter()
                .map(|key| (key.clone(), default.clone()))
                .collect())
        }

        async fn set_multiple(
            &self,
            _values: &[(String, Value)],
            _ttl: Option<Duration>,
        ) -> std::result::Result<bool, BackendError> {
            self.flag()
        }

        async fn delete_multiple(&self, _keys: &[String]) -> std::result::Result<bool, BackendError> {
            self.flag()
        }
    }

    fn wrap(mode: Mode) -> SafeCache<StubBackend> {
        SafeCache::new(StubBackend { mode })
    }

    #[tokio::test]
    async fn test_set_rejected_key_classified_as_invalid_argument() {
        let cache = wrap(Mode::RejectKeys);
        let request = CacheSetRequest::new("bad key", json!(1), None);

        let error = cache.set(request).await.unwrap_err();
        assert_eq!(error.kind(), CacheErrorKind::InvalidArgument);
        assert_eq!(error.context().get("action"), Some(&json!("set")));
        assert_eq!(
            error.context().get("request").and_then(|r| r.get("key")),
            Some(&json!("bad key"))
        );
        assert!(error.context().has_source());
    }

    #[tokio::test]
    async fn test_clear_false_classified_without_source() {
        let cache = wrap(Mode::FalseReturns);

        let error = cache.clear().await.unwrap_err();
        assert_eq!(error.kind(), CacheErrorKind::ReturnFalseError);
        assert_eq!(error.context().get("action"), Some(&json!("clear")));
        assert!(!error.context().has_source());
    }

    #[tokio::test]
    async fn test_get_backend_failure_classified_as_cache_exception() {
        let cache = wrap(Mode::Broken);
        let request = CacheGetRequest::new("key1", Value::Null);

        let error = cache.get(request).await.unwrap_err();
        assert_eq!(error.kind(), CacheErrorKind::CacheException);
        assert_eq!(error.context().get("action"), Some(&json!("get")));
        assert!(error.context().has_source());
    }

    #[tokio::test]
    async fn test_has_success_passes_through() {
        let cache = wrap(Mode::Healthy);
        assert!(cache.has("key1").await.unwrap());
    }

    #[tokio::test]
    async fn test_boolean_ops_succeed_as_unit() {
        let cache = wrap(Mode::Healthy);

        cache
            .set(CacheSetRequest::new("k", json!(1), None))
            .await
            .unwrap();
        cache.delete("k").await.unwrap();
        cache.clear().await.unwrap();
        cache
            .set_multiple(CacheSetMultipleRequest::new(
                vec![("a".to_string(), json!(1))],
                None,
            ))
            .await
            .unwrap();
        cache.delete_multiple(&["a".to_string()]).await.unwrap();
    }

    #[tokio::test]
    async fn test_delete_failure_context_names_the_key() {
        let cache = wrap(Mode::FalseReturns);

        let error = cache.delete("user:1").await.unwrap_err();
        assert_eq!(error.kind(), CacheErrorKind::ReturnFalseError);
        assert_eq!(error.context().get("key"), Some(&json!("user:1")));
    }

    #[tokio::test]
    async fn test_delete_multiple_failure_context_names_the_keys() {
        let cache = wrap(Mode::Broken);
        let keys = vec!["a".to_string(), "b".to_string()];

        let error = cache.delete_multiple(&keys).await.unwrap_err();
        assert_eq!(error.kind(), CacheErrorKind::CacheException);
        assert_eq!(error.context().get("keys"), Some(&json!(["a", "b"])));
    }
}
