//! Error types for the safe cache layer
//!
//! Provides the closed failure taxonomy and per-failure diagnostic context
//! using thiserror.

use std::collections::BTreeMap;

use serde_json::Value;
use thiserror::Error;

use crate::backend::BackendError;

// == Error Kind ==
/// Closed set of failure kinds a wrapped cache operation can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheErrorKind {
    /// The backend rejected a key or argument as malformed.
    ///
    /// Recoverable by correcting the input.
    InvalidArgument,
    /// The backend completed without raising but signaled failure with a
    /// bare `false`, so there is no causal error to inspect.
    ReturnFalseError,
    /// Any other backend failure (connectivity, serialization, corruption).
    CacheException,
}

// == Error Context ==
/// Diagnostic annotations describing one failed cache call.
///
/// Only materialized on the failure path; successful operations never build
/// one.
#[derive(Debug, Default)]
pub struct ErrorContext {
    values: BTreeMap<String, Value>,
    source: Option<BackendError>,
}

impl ErrorContext {
    /// Creates an empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an annotation, builder style.
    pub fn with(mut self, key: impl Into<String>, value: Value) -> Self {
        self.values.insert(key.into(), value);
        self
    }

    /// Returns the annotation stored under `key`, if any.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// Attaches the backend error that caused the failure.
    ///
    /// First writer wins: once a source is present, later calls are ignored.
    pub fn set_source(&mut self, source: BackendError) {
        if self.source.is_none() {
            self.source = Some(source);
        }
    }

    /// Returns the wrapped backend error, if one was attached.
    pub fn source(&self) -> Option<&BackendError> {
        self.source.as_ref()
    }

    /// Reports whether a backend error has been attached.
    pub fn has_source(&self) -> bool {
        self.source.is_some()
    }
}

// == Cache Error ==
/// One failure occurrence of a wrapped cache operation.
///
/// Carries the taxonomy kind, a human-readable message and the diagnostic
/// context built for the failed call. Constructed fresh per failure and not
/// mutated afterwards.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct CacheError {
    kind: CacheErrorKind,
    message: String,
    context: ErrorContext,
}

impl CacheError {
    /// Builds the error for a backend that signaled failure with `false`.
    pub(crate) fn return_false(context: ErrorContext) -> Self {
        Self {
            kind: CacheErrorKind::ReturnFalseError,
            message: "cache returned false".to_string(),
            context,
        }
    }

    /// Classifies a raised backend error and attaches it to the context.
    pub(crate) fn from_backend(error: BackendError, mut context: ErrorContext) -> Self {
        let (kind, message) = match &error {
            BackendError::InvalidKey(reason) => (
                CacheErrorKind::InvalidArgument,
                format!("invalid argument: {}", reason),
            ),
            BackendError::Backend(cause) => (
                CacheErrorKind::CacheException,
                format!("cache exception: {}", cause),
            ),
        };
        context.set_source(error);
        Self {
            kind,
            message,
            context,
        }
    }

    /// Returns the failure kind.
    pub fn kind(&self) -> CacheErrorKind {
        self.kind
    }

    /// Returns the human-readable message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the diagnostic context for this failure.
    pub fn context(&self) -> &ErrorContext {
        &self.context
    }
}

// == Result Type Alias ==
/// Convenience Result type for safe cache operations.
pub type Result<T> = std::result::Result<T, CacheError>;
