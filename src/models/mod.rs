//! Request Models Module
//!
//! Immutable value objects carried into safe cache operations.

mod requests;

pub use requests::{
    CacheGetMultipleRequest, CacheGetRequest, CacheSetMultipleRequest, CacheSetRequest, Ttl,
};
