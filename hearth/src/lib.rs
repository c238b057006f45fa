//! hearth
//!
//! Aggregates community resources from a local store and external open-data
//! feeds into trust-annotated cards, behind a shared cache with a stale grace
//! window.
//!
//! Overview
//! - [`Hearth`] orchestrates one listing request: cache check, local page
//!   query, trust overrides, an optional external feed, client-side filters
//!   and a freshness summary.
//! - Feeds implement [`ResourceConnector`] and are usually wrapped with
//!   [`ConnectorBuilder`] to add a rate limit.
//! - Failures of feeds and of the cache backend degrade the response; only
//!   local store failures surface as [`HearthError::StoreQuery`].
//!
//! Quickstart
//! ```rust,ignore
//! use std::sync::Arc;
//! use hearth::{Hearth, ResourceFilters};
//!
//! let hearth = Hearth::builder()
//!     .with_repository(Arc::new(store))
//!     .with_connector(nyc311)
//!     .build()?;
//! let page = hearth
//!     .list_resources(&ResourceFilters::from_query_str("categories=food&open_now=true")?)
//!     .await?;
//! println!("{} cards, cached={}", page.count, page.cached);
//! ```
#![warn(missing_docs)]

mod aggregate;
pub mod audit;
pub(crate) mod core;

pub use aggregate::SourceStatus;
pub use aggregate::filters::{ClientFilterContext, is_open_now, is_verified_recently, is_within_radius};
pub use audit::AuditEvent;
pub use crate::core::{Hearth, HearthBuilder};

pub use hearth_core::{
    CacheNamespace, Category, HearthConfig, HearthError, ListFreshness, Resource, ResourceCard,
    ResourceConnector, ResourceDetail, ResourceFilters, ResourceListResponse, ResourceRepository,
    SyncReport, TaskHandle,
};
pub use hearth_middleware::{CacheStats, CacheStore, ConnectorBuilder, RateLimitMiddleware};
