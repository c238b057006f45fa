//! hearth-middleware
//!
//! Connector wrappers and the shared cache store.
//!
//! - [`RateLimitedConnector`]: per-instance day and minute request budgets,
//!   applied through [`ConnectorBuilder`].
//! - [`CacheStore`]: key/value cache with a fresh window, a stale grace
//!   window, a remote REST backend and an in-process fallback.

mod builder;
pub mod cache;
mod rate_limit;

pub use crate::builder::ConnectorBuilder;
pub use crate::cache::{CacheLookup, CacheStats, CacheStore, StoredEntry};
pub use crate::rate_limit::{RateLimitMiddleware, RateLimitedConnector, RateLimiter};
