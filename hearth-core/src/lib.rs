//! hearth-core
//!
//! Traits and pure logic shared across the hearth workspace.
//!
//! - `connector`: the `ResourceConnector` trait implemented by external feeds.
//! - `repository`: the `ResourceRepository` contract of the local store.
//! - `normalize`: field helpers and conversion of feed records into resources.
//! - `trust`: availability, badge, confidence and freshness derivation.
//! - `cache_key`: canonical, order-independent cache keys.
//! - `geo`: Haversine distance.
//!
//! Async runtime (Tokio)
//! ---------------------
//! `task::TaskHandle` wraps `tokio::task::JoinHandle<()>` and a
//! `tokio::sync::oneshot::Sender<()>` for cooperative shutdown, so code that
//! spawns background tasks must run under a Tokio 1.x runtime.
#![warn(missing_docs)]

/// Canonical cache key construction.
pub mod cache_key;
/// External feed trait.
pub mod connector;
pub mod geo;
/// Middleware trait implemented by connector wrappers.
pub mod middleware;
pub mod normalize;
/// Local store trait.
pub mod repository;
pub mod task;
pub mod trust;

pub use cache_key::CacheKey;
pub use connector::{ResourceConnector, SYNC_BATCH_SIZE};
pub use geo::{format_distance, haversine_miles};
pub use middleware::Middleware;
pub use repository::ResourceRepository;
pub use task::TaskHandle;
pub use trust::to_card;

pub use hearth_types::*;
