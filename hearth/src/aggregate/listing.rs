use chrono::{DateTime, Utc};
use hearth_core::cache_key::listing_key;
use hearth_core::{
    HearthError, RepositoryQuery, ResourceCard, ResourceFilters, ResourceListResponse,
};
use serde_json::json;

use super::filters::{ClientFilterContext, apply as apply_client_filters};
use super::summary;
use crate::Hearth;
use crate::audit::{self, AuditEvent};

const LOCAL_SOURCE: &str = "local";

/// Where a listing's cards come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Plan<'a> {
    /// Local store, falling back to the default feed when it comes back empty.
    LocalOrDefault,
    /// Local store only.
    LocalOnly,
    /// One external feed; the local store is skipped.
    External(&'a str),
}

impl<'a> Plan<'a> {
    fn for_source(source: Option<&'a str>) -> Self {
        match source {
            None => Self::LocalOrDefault,
            Some(LOCAL_SOURCE) => Self::LocalOnly,
            Some(other) => Self::External(other),
        }
    }
}

fn store_failure(err: HearthError) -> HearthError {
    match err {
        HearthError::StoreQuery(msg) => {
            HearthError::store_query(format!("Database query failed: {msg}"))
        }
        other => HearthError::store_query(format!("Database query failed: {other}")),
    }
}

impl Hearth {
    /// Cards for a filter set, served from the cache when possible.
    ///
    /// A hit (fresh or stale) returns with `cached = true`. On a miss the
    /// listing is computed, audited, cached and returned with `cached = false`.
    ///
    /// # Errors
    /// Returns `StoreQuery` when the local store fails a page query. External
    /// feed and cache backend failures never surface here.
    #[tracing::instrument(
        level = "info",
        skip(self, filters),
        fields(source = filters.source.as_deref().unwrap_or("auto"))
    )]
    pub async fn list_resources(
        &self,
        filters: &ResourceFilters,
    ) -> Result<ResourceListResponse, HearthError> {
        let key = listing_key(filters);
        let (mut response, cached) = self
            .cache
            .get_or_compute(&key, None, || self.compute_listing(&key, filters))
            .await?;
        response.cached = cached;
        Ok(response)
    }

    /// Parse a raw query string, then [`list_resources`](Self::list_resources).
    ///
    /// # Errors
    /// Returns `Validation` for malformed parameters, before any lookup.
    pub async fn list_resources_from_query(
        &self,
        query: &str,
    ) -> Result<ResourceListResponse, HearthError> {
        let filters = ResourceFilters::from_query_str(query)?;
        self.list_resources(&filters).await
    }

    async fn local_cards(
        &self,
        filters: &ResourceFilters,
        now: DateTime<Utc>,
    ) -> Result<Vec<ResourceCard>, HearthError> {
        let page = self
            .repository
            .fetch_filtered(&RepositoryQuery::from(filters))
            .await
            .map_err(store_failure)?;
        tracing::debug!(rows = page.rows.len(), total = page.total_count, "local page");
        Ok(self.cards_with_trust(&page.rows, now).await)
    }

    async fn compute_listing(
        &self,
        key: &str,
        filters: &ResourceFilters,
    ) -> Result<ResourceListResponse, HearthError> {
        let now = Utc::now();
        let cards = match Plan::for_source(filters.source.as_deref()) {
            Plan::External(source) => self.external_cards(source, filters, now).await,
            Plan::LocalOnly => self.local_cards(filters, now).await?,
            Plan::LocalOrDefault => {
                let local = self.local_cards(filters, now).await?;
                if local.is_empty() {
                    let source = self.cfg.default_external_source.as_str();
                    tracing::debug!(source, "local store empty; consulting default source");
                    self.external_cards(source, filters, now).await
                } else {
                    local
                }
            }
        };

        let recent_window = chrono::Duration::from_std(self.cfg.verified_recently_window)
            .unwrap_or(chrono::Duration::MAX);
        let data = apply_client_filters(
            cards,
            filters,
            ClientFilterContext {
                now,
                recent_window,
                default_radius_miles: self.cfg.default_radius_miles,
            },
        );
        let response = ResourceListResponse {
            count: data.len(),
            freshness: summary::freshness(&data),
            source_mix: summary::source_mix(&data),
            data,
            cached: false,
        };

        audit::emit(
            AuditEvent::SearchPerformed,
            &json!({ "key": key, "count": response.count, "source_mix": response.source_mix }),
        );
        if response.count == 0 {
            audit::emit(AuditEvent::ZeroResults, &json!({ "key": key }));
        }
        if response.freshness.stale_count > 0 {
            audit::emit(
                AuditEvent::StaleDataDetected,
                &json!({ "key": key, "stale_count": response.freshness.stale_count }),
            );
        }
        Ok(response)
    }
}
