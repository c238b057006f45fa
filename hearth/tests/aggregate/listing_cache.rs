use std::sync::Arc;
use std::time::Duration;

use hearth::CacheStore;
use hearth_core::{CacheConfig, CacheNamespace, CachePolicy};
use hearth_mock::{InMemoryRepository, MockConnector};

use crate::helpers::{builder, filters, fixture_hearth, ids};

#[tokio::test]
async fn second_identical_listing_is_served_from_cache() {
    let (hearth, repo, _) = fixture_hearth();
    let f = filters("categories=food,education&city=Orange");

    let first = hearth.list_resources(&f).await.unwrap();
    assert!(!first.cached);
    assert_eq!(repo.page_queries(), 1);

    let second = hearth.list_resources(&f).await.unwrap();
    assert!(second.cached);
    assert_eq!(repo.page_queries(), 1, "cache hit must not query the store");
    assert_eq!(ids(&first), ids(&second));
    assert_eq!(first.count, second.count);
    assert_eq!(first.freshness, second.freshness);
}

#[tokio::test]
async fn parameter_order_does_not_split_the_cache() {
    let (hearth, repo, _) = fixture_hearth();
    hearth
        .list_resources_from_query("city=Orange&categories=food,legal")
        .await
        .unwrap();
    let again = hearth
        .list_resources_from_query("categories=legal,food&city=Orange")
        .await
        .unwrap();
    assert!(again.cached);
    assert_eq!(repo.page_queries(), 1);
}

#[tokio::test]
async fn stale_window_read_counts_as_cached() {
    let mut cache_cfg = CacheConfig::default();
    cache_cfg.namespaces.insert(
        CacheNamespace::Resources,
        CachePolicy::new(Duration::from_millis(100), Duration::from_secs(60)),
    );
    let cache = Arc::new(CacheStore::new(cache_cfg).unwrap());
    let repo = Arc::new(InMemoryRepository::with_fixtures());
    let connector = Arc::new(MockConnector::new());
    let hearth = builder(&repo, &connector)
        .cache(Arc::clone(&cache))
        .build()
        .unwrap();

    let f = filters("city=Orange");
    hearth.list_resources(&f).await.unwrap();
    tokio::time::sleep(Duration::from_millis(250)).await;

    let stale = hearth.list_resources(&f).await.unwrap();
    assert!(stale.cached);
    assert_eq!(repo.page_queries(), 1);
    let stats = cache.stats().await;
    assert_eq!(stats.stale_hits, 1);
}

#[tokio::test]
async fn shared_cache_is_used_by_every_hearth() {
    let cache = Arc::new(CacheStore::in_memory());
    let repo = Arc::new(InMemoryRepository::with_fixtures());
    let connector = Arc::new(MockConnector::new());
    let a = builder(&repo, &connector).cache(Arc::clone(&cache)).build().unwrap();
    let b = builder(&repo, &connector).cache(Arc::clone(&cache)).build().unwrap();

    let f = filters("zip=92868");
    assert!(!a.list_resources(&f).await.unwrap().cached);
    assert!(b.list_resources(&f).await.unwrap().cached);
}
