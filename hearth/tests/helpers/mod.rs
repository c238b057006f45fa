// Shared setup so tests can `use crate::helpers::*;`
#![allow(dead_code)]

use std::sync::Arc;

use hearth::{Hearth, HearthBuilder, ResourceFilters};
use hearth_mock::{InMemoryRepository, MockConnector};

/// Admin secret accepted by hearths built here.
pub const ADMIN_KEY: &str = "test-admin-key-0123456789";

/// Builder over `repo` and `connector`, with the mock feed as default source.
pub fn builder(repo: &Arc<InMemoryRepository>, connector: &Arc<MockConnector>) -> HearthBuilder {
    Hearth::builder()
        .with_repository(Arc::clone(repo) as Arc<dyn hearth::ResourceRepository>)
        .with_connector(Arc::clone(connector) as Arc<dyn hearth::ResourceConnector>)
        .default_external_source("mock")
        .admin_api_key(ADMIN_KEY)
}

/// Hearth over the local fixtures and the mock feed.
pub fn fixture_hearth() -> (Hearth, Arc<InMemoryRepository>, Arc<MockConnector>) {
    let repo = Arc::new(InMemoryRepository::with_fixtures());
    let connector = Arc::new(MockConnector::new());
    let hearth = builder(&repo, &connector).build().unwrap();
    (hearth, repo, connector)
}

/// Hearth over an empty local store and the mock feed.
pub fn empty_local_hearth() -> (Hearth, Arc<InMemoryRepository>, Arc<MockConnector>) {
    let repo = Arc::new(InMemoryRepository::new());
    let connector = Arc::new(MockConnector::new());
    let hearth = builder(&repo, &connector).build().unwrap();
    (hearth, repo, connector)
}

/// Parse a query string into filters without unwrap noise in tests.
pub fn filters(query: &str) -> ResourceFilters {
    ResourceFilters::from_query_str(query).unwrap()
}

/// Ids of the cards in a listing, in order.
pub fn ids(resp: &hearth::ResourceListResponse) -> Vec<String> {
    resp.data.iter().map(|c| c.id().to_string()).collect()
}
