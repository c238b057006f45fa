use hearth::HearthError;

use crate::helpers::{empty_local_hearth, filters, fixture_hearth};

#[tokio::test]
async fn feed_failure_degrades_to_an_empty_listing() {
    let (hearth, _, connector) = empty_local_hearth();
    let resp = hearth.list_resources(&filters("search=FAIL")).await.unwrap();
    assert_eq!(connector.calls(), 1);
    assert_eq!(resp.count, 0);
    assert!(resp.data.is_empty());
}

#[tokio::test]
async fn trust_lookup_failure_keeps_base_rows() {
    let (hearth, repo, _) = fixture_hearth();
    repo.fail_trust_queries(true);
    let resp = hearth.list_resources(&filters("search=demo")).await.unwrap();
    assert_eq!(resp.count, 1);
    let card = &resp.data[0];
    assert_eq!(card.confirmation_source, "local");
    assert_eq!(card.last_confirmed_at, card.resource.last_verified_at);
}

#[tokio::test]
async fn store_failure_surfaces_and_is_not_cached() {
    let (hearth, repo, connector) = fixture_hearth();
    repo.fail_page_queries(true);
    let err = hearth.list_resources(&filters("")).await.unwrap_err();
    match err {
        HearthError::StoreQuery(msg) => assert!(msg.starts_with("Database query failed"), "{msg}"),
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(connector.calls(), 0, "store failures do not fall back to a feed");

    repo.fail_page_queries(false);
    let resp = hearth.list_resources(&filters("")).await.unwrap();
    assert!(!resp.cached);
    assert_eq!(resp.count, 6);
    assert_eq!(repo.page_queries(), 2);
}

#[tokio::test]
async fn empty_feed_failures_are_cached_like_any_listing() {
    let (hearth, _, connector) = empty_local_hearth();
    hearth.list_resources(&filters("search=FAIL")).await.unwrap();
    let again = hearth.list_resources(&filters("search=FAIL")).await.unwrap();
    assert!(again.cached);
    assert_eq!(connector.calls(), 1);
}
