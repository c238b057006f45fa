//! Response envelopes produced by the orchestrator.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::card::ResourceCard;

/// Freshness summary over a result set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListFreshness {
    /// Earliest confirmation instant among the results.
    pub oldest_confirmation_at: Option<DateTime<Utc>>,
    /// Cards whose freshness is `stale`.
    pub stale_count: usize,
    /// Cards whose freshness is `unknown`.
    pub unknown_count: usize,
}

/// Filtered, summarized listing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourceListResponse {
    /// Cards after client-side filtering.
    pub data: Vec<ResourceCard>,
    /// Number of cards in `data`.
    pub count: usize,
    /// Freshness summary of `data`.
    pub freshness: ListFreshness,
    /// Cards per source; records without a source count as `local`.
    pub source_mix: BTreeMap<String, usize>,
    /// Whether this response was served from the cache.
    pub cached: bool,
}

/// A resource card with its nearest local alternatives.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourceDetail {
    /// The requested resource, `None` when unknown.
    pub resource: Option<ResourceCard>,
    /// Nearest resources in the same city and state, closest first.
    pub alternatives: Vec<ResourceCard>,
}
