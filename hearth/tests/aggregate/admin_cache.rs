use std::sync::Arc;

use hearth::{CacheNamespace, Hearth, HearthError};
use hearth_mock::InMemoryRepository;

use crate::helpers::{ADMIN_KEY, filters, fixture_hearth};

#[tokio::test]
async fn wrong_admin_key_is_rejected() {
    let (hearth, _, _) = fixture_hearth();
    hearth.list_resources(&filters("")).await.unwrap();
    let err = hearth
        .invalidate_cache("not-the-admin-key-000000", Some(CacheNamespace::Resources))
        .await
        .unwrap_err();
    assert!(matches!(err, HearthError::Unauthorized(_)), "got {err:?}");
    assert!(hearth.list_resources(&filters("")).await.unwrap().cached);
}

#[tokio::test]
async fn admin_calls_are_refused_without_a_configured_key() {
    let hearth = Hearth::builder()
        .with_repository(Arc::new(InMemoryRepository::new()))
        .build()
        .unwrap();
    let err = hearth.invalidate_cache("", None).await.unwrap_err();
    assert!(matches!(err, HearthError::Unauthorized(_)));
}

#[tokio::test]
async fn namespace_invalidation_forces_recompute() {
    let (hearth, repo, _) = fixture_hearth();
    hearth.list_resources(&filters("city=Orange")).await.unwrap();
    hearth.resource_detail("demo-1").await.unwrap();

    let removed = hearth
        .invalidate_cache(ADMIN_KEY, Some(CacheNamespace::Resources))
        .await
        .unwrap();
    assert_eq!(removed, 2);

    let resp = hearth.list_resources(&filters("city=Orange")).await.unwrap();
    assert!(!resp.cached);
    assert_eq!(repo.page_queries(), 3);
}

#[tokio::test]
async fn invalidating_everything_spans_namespaces() {
    let (hearth, _, _) = fixture_hearth();
    hearth.list_resources(&filters("")).await.unwrap();
    hearth.sync_source("mock").await.unwrap();

    let removed = hearth.invalidate_cache(ADMIN_KEY, None).await.unwrap();
    assert_eq!(removed, 2);
    assert!(hearth.last_sync("mock").await.is_none());
    assert_eq!(hearth.cache_stats().await.local_entries, 0);
}

#[test]
fn short_admin_keys_are_rejected_at_build_time() {
    let err = Hearth::builder()
        .with_repository(Arc::new(InMemoryRepository::new()))
        .admin_api_key("short")
        .build()
        .err()
        .unwrap();
    assert!(matches!(err, HearthError::InvalidArg(_)));
}

#[test]
fn building_without_a_repository_fails() {
    assert!(matches!(
        Hearth::builder().build().err(),
        Some(HearthError::InvalidArg(_))
    ));
}
