use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use chrono::Utc;
use hearth_core::{
    AvailabilityRow, HearthError, RepositoryQuery, Resource, ResourcePage, ResourceRepository,
    VerificationRow,
};

use crate::fixtures;

#[derive(Default)]
struct Tables {
    resources: Vec<Resource>,
    availability: Vec<AvailabilityRow>,
    verification: Vec<VerificationRow>,
}

/// In-memory stand-in for the local resource store.
///
/// Applies the same filter semantics as the production store and can be told
/// to fail its page query or its trust-override lookups.
#[derive(Default)]
pub struct InMemoryRepository {
    tables: Mutex<Tables>,
    fail_page: AtomicBool,
    fail_trust: AtomicBool,
    page_queries: AtomicUsize,
}

fn matches(r: &Resource, q: &RepositoryQuery) -> bool {
    if !q.categories.is_empty() && !q.categories.iter().any(|c| r.categories.contains(c)) {
        return false;
    }
    if let Some(term) = &q.search {
        let term = term.to_lowercase();
        let in_name = r.name.to_lowercase().contains(&term);
        let in_desc = r
            .description
            .as_deref()
            .is_some_and(|d| d.to_lowercase().contains(&term));
        if !in_name && !in_desc {
            return false;
        }
    }
    if q.city.is_some() && r.city != q.city {
        return false;
    }
    if q.state.as_ref().is_some_and(|s| *s != r.state) {
        return false;
    }
    if q.zip.is_some() && r.zip != q.zip {
        return false;
    }
    q.verified.is_none_or(|v| v == r.verified)
}

impl InMemoryRepository {
    /// Empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store holding the fixture rows and availability overrides, aged from now.
    #[must_use]
    pub fn with_fixtures() -> Self {
        let now = Utc::now();
        Self::new()
            .with_resources(fixtures::resources::all(now))
            .with_availability(fixtures::resources::availability(now))
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Tables> {
        self.tables.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Append resource rows.
    #[must_use]
    pub fn with_resources(self, rows: Vec<Resource>) -> Self {
        self.lock().resources.extend(rows);
        self
    }

    /// Append availability override rows.
    #[must_use]
    pub fn with_availability(self, rows: Vec<AvailabilityRow>) -> Self {
        self.lock().availability.extend(rows);
        self
    }

    /// Append verification override rows.
    #[must_use]
    pub fn with_verification(self, rows: Vec<VerificationRow>) -> Self {
        self.lock().verification.extend(rows);
        self
    }

    /// Make `fetch_filtered` fail until reset.
    pub fn fail_page_queries(&self, fail: bool) {
        self.fail_page.store(fail, Ordering::SeqCst);
    }

    /// Make the trust-override lookups fail until reset.
    pub fn fail_trust_queries(&self, fail: bool) {
        self.fail_trust.store(fail, Ordering::SeqCst);
    }

    /// Number of page queries served or attempted.
    pub fn page_queries(&self) -> usize {
        self.page_queries.load(Ordering::SeqCst)
    }

    fn trust_guard(&self) -> Result<(), HearthError> {
        if self.fail_trust.load(Ordering::SeqCst) {
            return Err(HearthError::store_query(
                "relation \"resource_availability\" does not exist",
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl ResourceRepository for InMemoryRepository {
    async fn fetch_filtered(&self, query: &RepositoryQuery) -> Result<ResourcePage, HearthError> {
        self.page_queries.fetch_add(1, Ordering::SeqCst);
        if self.fail_page.load(Ordering::SeqCst) {
            return Err(HearthError::store_query("connection refused"));
        }
        let tables = self.lock();
        let matched: Vec<&Resource> = tables.resources.iter().filter(|r| matches(r, query)).collect();
        let total_count = matched.len() as u64;
        let rows = matched
            .into_iter()
            .skip(query.offset as usize)
            .take(query.limit as usize)
            .cloned()
            .collect();
        Ok(ResourcePage { rows, total_count })
    }

    async fn fetch_availability(&self, ids: &[String]) -> Result<Vec<AvailabilityRow>, HearthError> {
        self.trust_guard()?;
        Ok(self
            .lock()
            .availability
            .iter()
            .filter(|a| ids.contains(&a.resource_id))
            .cloned()
            .collect())
    }

    async fn fetch_verification(
        &self,
        ids: &[String],
    ) -> Result<Vec<VerificationRow>, HearthError> {
        self.trust_guard()?;
        Ok(self
            .lock()
            .verification
            .iter()
            .filter(|v| ids.contains(&v.resource_id))
            .cloned()
            .collect())
    }

    async fn fetch_by_id(&self, id: &str) -> Result<Option<Resource>, HearthError> {
        Ok(self.lock().resources.iter().find(|r| r.id == id).cloned())
    }
}
