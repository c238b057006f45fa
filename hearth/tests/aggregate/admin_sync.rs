use std::sync::Arc;

use hearth::{ConnectorBuilder, Hearth, HearthError};
use hearth_mock::{InMemoryRepository, MockConnector};

use crate::helpers::{ADMIN_KEY, filters, fixture_hearth};

fn limited_hearth(per_minute: u64) -> Hearth {
    let limited = ConnectorBuilder::new(Arc::new(MockConnector::new()))
        .requests_per_minute(per_minute)
        .build();
    Hearth::builder()
        .with_repository(Arc::new(InMemoryRepository::new()))
        .with_connector(limited)
        .default_external_source("mock")
        .admin_api_key(ADMIN_KEY)
        .build()
        .unwrap()
}

#[tokio::test]
async fn sync_source_reports_and_caches_the_result() {
    let (hearth, _, connector) = fixture_hearth();
    let report = hearth.sync_source("mock").await.unwrap();
    assert_eq!(report.source, "mock");
    assert_eq!(report.imported, 6);
    assert!(report.success);
    assert!(report.errors.is_empty());
    assert_eq!(connector.calls(), 1);

    let cached = hearth.last_sync("mock").await.unwrap();
    assert_eq!(cached, report);
}

#[tokio::test]
async fn syncing_an_unknown_source_is_not_found() {
    let (hearth, _, _) = fixture_hearth();
    let err = hearth.sync_source("nowhere").await.unwrap_err();
    assert!(matches!(err, HearthError::NotFound { .. }), "got {err:?}");
    assert!(hearth.last_sync("nowhere").await.is_none());
}

#[tokio::test]
async fn sync_all_sources_covers_every_connector() {
    let (hearth, _, _) = fixture_hearth();
    let reports = hearth.sync_all_sources().await;
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].source, "mock");
    assert!(hearth.last_sync("mock").await.is_some());
}

#[tokio::test]
async fn rate_limited_feed_degrades_listing_and_reports_state() {
    let hearth = limited_hearth(1);
    let first = hearth.list_resources(&filters("search=food")).await.unwrap();
    assert_eq!(first.count, 1);

    // Budget spent: the feed is skipped and the listing comes back empty.
    let second = hearth.list_resources(&filters("search=shelter")).await.unwrap();
    assert_eq!(second.count, 0);

    let state = hearth.rate_limit_status("mock").unwrap();
    assert_eq!(state.requests_this_minute, 1);
    assert!(hearth.rate_limit_status("nowhere").is_none());
}

#[tokio::test]
async fn source_status_lists_feeds_with_limits_and_last_sync() {
    let hearth = limited_hearth(10);
    hearth.sync_source("mock").await.unwrap();
    let status = hearth.source_status().await;
    assert_eq!(status.len(), 1);
    assert_eq!(status[0].source, "mock");
    assert_eq!(status[0].label, "Mock 311");
    assert_eq!(status[0].rate_limit.as_ref().map(|s| s.requests_today), Some(1));
    assert_eq!(status[0].last_sync.as_ref().map(|r| r.imported), Some(6));
}
