//! Cached Item Module
//!
//! Defines a stored value together with its optional expiry instant.

use chrono::{DateTime, Utc};
use serde_json::Value;

// == Cached Item ==
/// A stored value plus an optional absolute expiry instant.
///
/// Items are created once at store time and never mutated; the owning cache
/// replaces or removes them wholesale.
#[derive(Debug, Clone)]
pub struct CachedItem {
    /// The stored value
    value: Value,
    /// Absolute expiry instant, None = never expires
    expires_at: Option<DateTime<Utc>>,
}

impl CachedItem {
    // == Constructor ==
    /// Creates an item; an absent `expires_at` never expires by time.
    pub fn new(value: Value, expires_at: Option<DateTime<Utc>>) -> Self {
        Self { value, expires_at }
    }

    // == Is Active ==
    /// Reports whether the item is live at `now`.
    ///
    /// The boundary instant is inclusive: an item expiring exactly at `now`
    /// is still active. The instant is supplied by the caller at each call,
    /// never cached.
    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        match self.expires_at {
            Some(expires_at) => now <= expires_at,
            None => true,
        }
    }

    // == Value ==
    /// Returns the stored value without checking liveness.
    ///
    /// Callers that care about freshness must consult `is_active` first.
    pub fn value(&self) -> &Value {
        &self.value
    }

    // == Expires At ==
    /// Returns the expiry instant, if the item has one.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.expires_at
    }
}
