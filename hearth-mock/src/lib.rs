//! Deterministic test doubles for hearth: a [`MockConnector`] serving fixture
//! records and an [`InMemoryRepository`] standing in for the local store.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use hearth_core::normalize::infer_categories;
use hearth_core::{ExternalQuery, ExternalService, HearthError, ResourceConnector};

pub mod fixtures;
mod repository;

pub use repository::InMemoryRepository;

/// Mock connector for CI-safe tests and demos. Serves records from static fixtures.
///
/// A search or id of `FAIL` forces a connector error; `TIMEOUT` adds a short delay.
pub struct MockConnector {
    records: Vec<ExternalService>,
    calls: AtomicUsize,
}

impl Default for MockConnector {
    fn default() -> Self {
        Self::new()
    }
}

fn eq_ignore_case(a: Option<&String>, b: Option<&String>) -> bool {
    match (a, b) {
        (_, None) => true,
        (Some(a), Some(b)) => a.eq_ignore_ascii_case(b),
        (None, Some(_)) => false,
    }
}

impl MockConnector {
    /// Connector over the fixture records, verified one day ago.
    #[must_use]
    pub fn new() -> Self {
        Self::with_records(fixtures::services::all(Utc::now()))
    }

    /// Connector over caller-supplied records.
    #[must_use]
    pub const fn with_records(records: Vec<ExternalService>) -> Self {
        Self {
            records,
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of calls that reached this connector.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    async fn maybe_fail_or_delay(marker: Option<&str>, op: &'static str) -> Result<(), HearthError> {
        match marker {
            Some("FAIL") => Err(HearthError::connector("mock", format!("forced failure: {op}"))),
            Some("TIMEOUT") => {
                tokio::time::sleep(std::time::Duration::from_millis(200)).await;
                Ok(())
            }
            _ => Ok(()),
        }
    }

    fn matches(record: &ExternalService, query: &ExternalQuery) -> bool {
        if let Some(term) = query.search.as_deref().filter(|t| *t != "TIMEOUT") {
            let term = term.to_lowercase();
            let hit = record.name.to_lowercase().contains(&term)
                || record
                    .description
                    .as_deref()
                    .is_some_and(|d| d.to_lowercase().contains(&term));
            if !hit {
                return false;
            }
        }
        if let Some(cat) = query.category
            && !infer_categories(&record.name, record.description.as_deref()).contains(&cat)
        {
            return false;
        }
        if query.zip.is_some() && record.zip != query.zip {
            return false;
        }
        eq_ignore_case(record.city.as_ref(), query.city.as_ref())
            && eq_ignore_case(record.state.as_ref(), query.state.as_ref())
    }
}

#[async_trait]
impl ResourceConnector for MockConnector {
    fn name(&self) -> &'static str {
        "mock"
    }

    fn label(&self) -> &'static str {
        "Mock 311"
    }

    async fn fetch_records(
        &self,
        query: &ExternalQuery,
    ) -> Result<Vec<ExternalService>, HearthError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Self::maybe_fail_or_delay(query.search.as_deref(), "fetch_records").await?;
        let out: Vec<ExternalService> = self
            .records
            .iter()
            .filter(|r| Self::matches(r, query))
            .skip(query.offset as usize)
            .take(query.limit as usize)
            .cloned()
            .collect();
        tracing::debug!(returned = out.len(), "mock fetch_records");
        Ok(out)
    }

    async fn fetch_by_id(&self, id: &str) -> Result<Option<ExternalService>, HearthError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Self::maybe_fail_or_delay(Some(id), "fetch_by_id").await?;
        Ok(self.records.iter().find(|r| r.source_id == id).cloned())
    }
}
