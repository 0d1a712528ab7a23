//! Safe Cache - a safety wrapper around fallible cache backends
//!
//! Converts a backend's mixed failure signaling (raised errors and boolean
//! false returns) into one typed result channel, and provides an in-memory
//! reference backend with TTL expiry for tests and demos.

pub mod backend;
pub mod cache;
pub mod clock;
pub mod error;
pub mod models;

pub use backend::{BackendError, RawCache};
pub use cache::{CacheStats, CachedItem, MemoryCache, SafeCache};
pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{CacheError, CacheErrorKind, ErrorContext};
pub use models::{
    CacheGetMultipleRequest, CacheGetRequest, CacheSetMultipleRequest, CacheSetRequest, Ttl,
};
