//! The aggregation pipeline: cache check, local fetch, optional external
//! fetch, client-side filters, summary, cache store.

mod admin;
mod detail;
pub(crate) mod external;
pub(crate) mod filters;
mod listing;
mod summary;
pub(crate) mod trust;

pub use admin::SourceStatus;
