//! Unified error type.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::RateLimitWindow;

/// Unified error type for the hearth workspace.
///
/// Only [`HearthError::StoreQuery`] is meant to reach end users as a hard
/// failure of an aggregation call; connector, rate-limit and cache backend
/// failures are absorbed by the orchestrator (see [`HearthError::is_degradable`]).
#[derive(Debug, Error, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum HearthError {
    /// Malformed filter input, rejected before reaching the aggregation core.
    #[error("invalid query: {0}")]
    Validation(String),

    /// The local resource store failed to answer a query.
    #[error("query failed: {0}")]
    StoreQuery(String),

    /// An individual connector returned an error.
    #[error("{connector} failed: {msg}")]
    Connector {
        /// Connector name that failed.
        connector: String,
        /// Human-readable error message.
        msg: String,
    },

    /// The shared cache backend could not be reached or answered garbage.
    #[error("cache backend unavailable: {0}")]
    CacheBackend(String),

    /// A connector-local request quota is exhausted; no network call was made.
    #[error("rate limit exceeded for {connector}: {limit} requests per {window}")]
    RateLimitExceeded {
        /// Connector whose quota is exhausted.
        connector: String,
        /// Configured number of requests for the exhausted window.
        limit: u64,
        /// Which window tripped.
        window: RateLimitWindow,
    },

    /// A resource could not be found.
    #[error("not found: {what}")]
    NotFound {
        /// Description of the missing resource, e.g. "resource demo-1".
        what: String,
    },

    /// The caller failed the shared-secret admin check.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Invalid input argument (configuration, builder input).
    #[error("invalid argument: {0}")]
    InvalidArg(String),

    /// Unknown/opaque error.
    #[error("unknown error: {0}")]
    Other(String),
}

impl HearthError {
    /// Helper: build a `Validation` error.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Helper: build a `StoreQuery` error.
    pub fn store_query(msg: impl Into<String>) -> Self {
        Self::StoreQuery(msg.into())
    }

    /// Helper: build a `Connector` error with the connector name and message.
    pub fn connector(connector: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Connector {
            connector: connector.into(),
            msg: msg.into(),
        }
    }

    /// Helper: build a `NotFound` error for a description of the missing resource.
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound { what: what.into() }
    }

    /// Returns true when the orchestrator should swallow this error and serve
    /// a smaller-but-valid result instead of failing the request.
    #[must_use]
    pub const fn is_degradable(&self) -> bool {
        matches!(
            self,
            Self::Connector { .. }
                | Self::RateLimitExceeded { .. }
                | Self::CacheBackend(_)
                | Self::NotFound { .. }
        )
    }
}
