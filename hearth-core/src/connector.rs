use async_trait::async_trait;

use crate::normalize::{to_resource, validate_resource};
use hearth_types::{
    ConnectorKey, ExternalQuery, ExternalService, HearthError, RateLimitState, SyncReport,
};

/// Page size used by [`ResourceConnector::sync_all`].
pub const SYNC_BATCH_SIZE: u32 = 100;

/// Client for an external resource feed.
///
/// Implementations own their transport and normalization: every record they
/// return is already an [`ExternalService`]. Failures must surface as
/// `HearthError::Connector` or `HearthError::RateLimitExceeded`, never as panics.
#[async_trait]
pub trait ResourceConnector: Send + Sync {
    /// A stable identifier, doubling as the source id of the records it returns (e.g. "nyc311").
    fn name(&self) -> &'static str;

    /// Canonical connector key constructed from the static name.
    fn key(&self) -> ConnectorKey {
        ConnectorKey::new(self.name())
    }

    /// Human-friendly label for logs and admin views.
    fn label(&self) -> &'static str {
        self.name()
    }

    /// Search the feed.
    async fn fetch_records(
        &self,
        query: &ExternalQuery,
    ) -> Result<Vec<ExternalService>, HearthError>;

    /// Fetch a single record by its source id; `Ok(None)` when the feed has no such record.
    async fn fetch_by_id(&self, id: &str) -> Result<Option<ExternalService>, HearthError>;

    /// Current rate-limit counters, when this connector is rate limited.
    fn rate_limit_status(&self) -> Option<RateLimitState> {
        None
    }

    /// Page through the whole feed in batches of [`SYNC_BATCH_SIZE`].
    ///
    /// Stops at the first short page or the first failed batch. Records that
    /// do not survive validation are reported as errors, not imported.
    #[tracing::instrument(level = "info", skip(self), fields(connector = self.name()))]
    async fn sync_all(&self) -> SyncReport {
        let mut imported = 0usize;
        let mut errors = Vec::new();
        let mut offset = 0u32;

        loop {
            let query = ExternalQuery::default().page(SYNC_BATCH_SIZE, offset);
            let batch = match self.fetch_records(&query).await {
                Ok(batch) => batch,
                Err(e) => {
                    tracing::warn!(offset, error = %e, "sync batch failed");
                    errors.push(format!("failed to fetch batch at offset {offset}: {e}"));
                    break;
                }
            };

            let len = batch.len();
            for record in &batch {
                if validate_resource(to_resource(record)).is_some() {
                    imported += 1;
                } else {
                    errors.push(format!("invalid record {}", record.source_id));
                }
            }

            if len < SYNC_BATCH_SIZE as usize {
                break;
            }
            offset = offset.saturating_add(SYNC_BATCH_SIZE);
        }

        tracing::info!(imported, errors = errors.len(), "sync finished");
        SyncReport {
            source: self.name().to_string(),
            imported,
            success: errors.is_empty(),
            errors,
            timestamp: chrono::Utc::now(),
        }
    }
}
