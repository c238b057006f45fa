//! Canonical cache keys.

use std::collections::BTreeMap;

use hearth_types::{CacheNamespace, ResourceFilters};

/// Builder for `prefix?name=value&...` cache keys.
///
/// Parameters are emitted sorted by name regardless of insertion order, and
/// absent values are omitted. Names and values are form-encoded so a value
/// cannot smuggle in another parameter. With no parameters the key is the
/// bare prefix.
#[derive(Debug, Clone)]
pub struct CacheKey {
    prefix: String,
    params: BTreeMap<String, String>,
}

impl CacheKey {
    /// Start a key under `prefix`.
    #[must_use]
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            params: BTreeMap::new(),
        }
    }

    /// Start a key under a namespace prefix.
    #[must_use]
    pub fn namespace(ns: CacheNamespace) -> Self {
        Self::new(ns.prefix())
    }

    /// Add a parameter; `None` is skipped.
    #[must_use]
    pub fn param<V: ToString>(mut self, name: &str, value: Option<V>) -> Self {
        if let Some(v) = value {
            self.params.insert(name.to_string(), v.to_string());
        }
        self
    }

    /// Render the key.
    #[must_use]
    pub fn build(&self) -> String {
        if self.params.is_empty() {
            return self.prefix.clone();
        }
        let query = self
            .params
            .iter()
            .map(|(k, v)| format!("{}={}", encode(k), encode(v)))
            .collect::<Vec<_>>()
            .join("&");
        format!("{}?{query}", self.prefix)
    }
}

fn encode(s: &str) -> String {
    url::form_urlencoded::byte_serialize(s.as_bytes()).collect()
}

/// Sorted, deduplicated csv so list order never splits the key.
fn csv<T: ToString>(items: &[T]) -> Option<String> {
    let mut items: Vec<String> = items.iter().map(ToString::to_string).collect();
    items.sort();
    items.dedup();
    (!items.is_empty()).then(|| items.join(","))
}

/// Key of a listing in the `resources` namespace.
///
/// Every filter that can change the result participates; false boolean
/// toggles are omitted so they key the same as absent ones.
#[must_use]
pub fn listing_key(filters: &ResourceFilters) -> String {
    CacheKey::namespace(CacheNamespace::Resources)
        .param("categories", csv(&filters.categories))
        .param("search", filters.search.as_deref())
        .param("city", filters.city.as_deref())
        .param("state", filters.state.as_deref())
        .param("zip", filters.zip.as_deref())
        .param("eligibility", csv(&filters.eligibility))
        .param("verified", filters.verified)
        .param("open_now", filters.open_now.then_some(true))
        .param("verified_recently", filters.verified_recently.then_some(true))
        .param("near_lat", filters.near_lat)
        .param("near_lng", filters.near_lng)
        .param("near_radius_miles", filters.near_radius_miles)
        .param("source", filters.source.as_deref())
        .param("limit", Some(filters.limit))
        .param("offset", Some(filters.offset))
        .build()
}

/// Key of a resource detail in the `resources` namespace.
#[must_use]
pub fn detail_key(id: &str) -> String {
    CacheKey::namespace(CacheNamespace::Resources)
        .param("detail", Some(id))
        .build()
}

/// Key of a connector's last sync report in the `sync_status` namespace.
#[must_use]
pub fn sync_key(source: &str) -> String {
    CacheKey::namespace(CacheNamespace::SyncStatus)
        .param("source", Some(source))
        .build()
}
