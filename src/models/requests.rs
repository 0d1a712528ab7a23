//! Request value objects for safe cache operations
//!
//! Thin immutable carriers bundling key/value/default/TTL. TTL input comes
//! in two shapes and is normalized to a single structured duration the
//! moment a request is built, so nothing downstream branches on it again.

use chrono::Duration;
use serde_json::{json, Value};

// == Ttl ==
/// Time-to-live input: whole seconds or a structured duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ttl {
    /// Whole seconds
    Seconds(u64),
    /// Structured duration
    Interval(Duration),
}

impl Ttl {
    /// Converts to the normalized duration form; seconds become a duration
    /// of exactly that many seconds.
    pub fn into_interval(self) -> Duration {
        match self {
            Ttl::Seconds(seconds) => Duration::seconds(seconds as i64),
            Ttl::Interval(interval) => interval,
        }
    }
}

impl From<u64> for Ttl {
    fn from(seconds: u64) -> Self {
        Ttl::Seconds(seconds)
    }
}

impl From<Duration> for Ttl {
    fn from(interval: Duration) -> Self {
        Ttl::Interval(interval)
    }
}

// == Get Request ==
/// Parameters for a single-key fetch.
#[derive(Debug, Clone)]
pub struct CacheGetRequest {
    key: String,
    default: Value,
}

impl CacheGetRequest {
    /// Creates a get request; `default` is handed back on a cache miss.
    pub fn new(key: impl Into<String>, default: Value) -> Self {
        Self {
            key: key.into(),
            default,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn default(&self) -> &Value {
        &self.default
    }

    /// Context annotation summarizing this request.
    pub(crate) fn describe(&self) -> Value {
        json!({ "key": self.key, "default": self.default })
    }
}

// == Set Request ==
/// Parameters for a single-key store.
#[derive(Debug, Clone)]
pub struct CacheSetRequest {
    key: String,
    value: Value,
    ttl: Option<Duration>,
}

impl CacheSetRequest {
    /// Creates a set request, normalizing `ttl` on the way in.
    ///
    /// `None` means the entry should never expire by time; `Some(0.into())`
    /// is a real zero-length TTL, not "no expiry".
    pub fn new(key: impl Into<String>, value: Value, ttl: Option<Ttl>) -> Self {
        Self {
            key: key.into(),
            value,
            ttl: ttl.map(Ttl::into_interval),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn ttl(&self) -> Option<Duration> {
        self.ttl
    }

    /// Context annotation summarizing this request.
    pub(crate) fn describe(&self) -> Value {
        json!({
            "key": self.key,
            "value": self.value,
            "ttl_seconds": self.ttl.map(|ttl| ttl.num_seconds()),
        })
    }
}

// == Get Multiple Request ==
/// Parameters for a multi-key fetch.
#[derive(Debug, Clone)]
pub struct CacheGetMultipleRequest {
    keys: Vec<String>,
    default: Value,
}

impl CacheGetMultipleRequest {
    /// Creates a multi-key get request; misses resolve to `default`.
    pub fn new(keys: Vec<String>, default: Value) -> Self {
        Self { keys, default }
    }

    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    pub fn default(&self) -> &Value {
        &self.default
    }

    /// Context annotation summarizing this request.
    pub(crate) fn describe(&self) -> Value {
        json!({ "keys": self.keys, "default": self.default })
    }
}

// == Set Multiple Request ==
/// Parameters for a multi-key store sharing one TTL.
#[derive(Debug, Clone)]
pub struct CacheSetMultipleRequest {
    values: Vec<(String, Value)>,
    ttl: Option<Duration>,
}

impl CacheSetMultipleRequest {
    /// Creates a multi-key set request, normalizing `ttl` on the way in.
    pub fn new(values: Vec<(String, Value)>, ttl: Option<Ttl>) -> Self {
        Self {
            values,
            ttl: ttl.map(Ttl::into_interval),
        }
    }

    pub fn values(&self) -> &[(String, Value)] {
        &self.values
    }

    pub fn ttl(&self) -> Option<Duration> {
        self.ttl
    }

    /// Context annotation summarizing this request (keys and TTL only; the
    /// payload values stay out of the diagnostics).
    pub(crate) fn describe(&self) -> Value {
        let keys: Vec<&str> = self.values.iter().map(|(key, _)| key.as_str()).collect();
        json!({
            "keys": keys,
            "ttl_seconds": self.ttl.map(|ttl| ttl.num_seconds()),
        })
    }
}
