//! Operator-facing operations: cache control, feed syncs and source health.

use futures::future::join_all;
use hearth_core::cache_key::{CacheKey, sync_key};
use hearth_core::{CacheNamespace, HearthError, RateLimitState, SyncReport};
use hearth_middleware::CacheStats;
use serde::{Deserialize, Serialize};

use crate::Hearth;

/// Health snapshot of one registered feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceStatus {
    /// Connector name.
    pub source: String,
    /// Display label.
    pub label: String,
    /// Rate-limit counters, when the connector is limited.
    pub rate_limit: Option<RateLimitState>,
    /// Report of the last sync, while it is still cached.
    pub last_sync: Option<SyncReport>,
}

impl Hearth {
    /// Drop cached entries after checking the admin secret.
    ///
    /// `None` clears every namespace. Returns the number of entries removed.
    ///
    /// # Errors
    /// Returns `Unauthorized` when the key does not match the configured
    /// secret, or when no secret is configured.
    pub async fn invalidate_cache(
        &self,
        admin_key: &str,
        namespace: Option<CacheNamespace>,
    ) -> Result<usize, HearthError> {
        if !self.cfg.admin_key_matches(admin_key) {
            tracing::warn!(?namespace, "cache invalidation rejected: bad admin key");
            return Err(HearthError::Unauthorized("invalid admin key".to_string()));
        }
        let removed = match namespace {
            Some(ns) => self.cache.invalidate_namespace(ns).await,
            None => {
                let mut removed = 0;
                for ns in CacheNamespace::ALL {
                    removed += self.cache.invalidate_namespace(ns).await;
                }
                removed
            }
        };
        Ok(removed)
    }

    /// Walk one feed in batches and cache the report under its sync key.
    ///
    /// # Errors
    /// Returns `NotFound` when no connector is registered as `source`.
    #[tracing::instrument(level = "info", skip(self))]
    pub async fn sync_source(&self, source: &str) -> Result<SyncReport, HearthError> {
        let connector = self
            .connector(source)
            .ok_or_else(|| HearthError::not_found(format!("source {source}")))?;
        let report = connector.sync_all().await;
        self.cache.set(&sync_key(source), &report, None).await;
        Ok(report)
    }

    /// Sync every registered feed concurrently, in registration order.
    pub async fn sync_all_sources(&self) -> Vec<SyncReport> {
        let jobs = self.connectors.iter().map(|c| async move {
            let report = c.sync_all().await;
            self.cache.set(&sync_key(c.name()), &report, None).await;
            report
        });
        join_all(jobs).await
    }

    /// Cached report of the last sync of `source`.
    pub async fn last_sync(&self, source: &str) -> Option<SyncReport> {
        self.cache.get(&sync_key(source)).await
    }

    /// Health of every registered feed, cached in the `source_status` namespace.
    pub async fn source_status(&self) -> Vec<SourceStatus> {
        let key = CacheKey::namespace(CacheNamespace::SourceStatus).build();
        if let Some(status) = self.cache.get(&key).await {
            return status;
        }
        let mut status = Vec::with_capacity(self.connectors.len());
        for c in &self.connectors {
            status.push(SourceStatus {
                source: c.name().to_string(),
                label: c.label().to_string(),
                rate_limit: c.rate_limit_status(),
                last_sync: self.last_sync(c.name()).await,
            });
        }
        self.cache.set(&key, &status, None).await;
        status
    }

    /// Live rate-limit counters of `source`; `None` when unknown or unlimited.
    #[must_use]
    pub fn rate_limit_status(&self, source: &str) -> Option<RateLimitState> {
        self.connector(source)?.rate_limit_status()
    }

    /// Cache counters and contents snapshot.
    pub async fn cache_stats(&self) -> CacheStats {
        self.cache.stats().await
    }
}
