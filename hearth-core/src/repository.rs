use async_trait::async_trait;

use hearth_types::{
    AvailabilityRow, HearthError, RepositoryQuery, Resource, ResourcePage, VerificationRow,
};

/// Local resource store.
///
/// Filter semantics: `categories` matches rows carrying any listed category,
/// `search` is a case-insensitive substring over name and description, and
/// `city`, `state`, `zip` and `verified` are exact matches. Paging applies
/// after filtering; `total_count` is the unpaginated match count.
#[async_trait]
pub trait ResourceRepository: Send + Sync {
    /// Filtered, paginated rows.
    async fn fetch_filtered(&self, query: &RepositoryQuery) -> Result<ResourcePage, HearthError>;

    /// Availability override rows for the given resource ids.
    async fn fetch_availability(&self, ids: &[String]) -> Result<Vec<AvailabilityRow>, HearthError>;

    /// Verification override rows for the given resource ids.
    async fn fetch_verification(&self, ids: &[String])
    -> Result<Vec<VerificationRow>, HearthError>;

    /// A single row by id.
    async fn fetch_by_id(&self, id: &str) -> Result<Option<Resource>, HearthError>;
}
