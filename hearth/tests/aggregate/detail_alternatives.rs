use crate::helpers::fixture_hearth;

fn alt_ids(detail: &hearth::ResourceDetail) -> Vec<&str> {
    detail.alternatives.iter().map(|c| c.id()).collect()
}

#[tokio::test]
async fn detail_lists_nearest_local_alternatives() {
    let (hearth, _, _) = fixture_hearth();
    let detail = hearth.resource_detail("legal-aid").await.unwrap();
    assert_eq!(detail.resource.as_ref().map(|c| c.id()), Some("legal-aid"));
    // Same city, coordinates required, nearest first; tutoring has no coordinates.
    assert_eq!(alt_ids(&detail), vec!["food-bank", "health-clinic", "demo-1"]);
}

#[tokio::test]
async fn detail_alternatives_carry_trust_overrides() {
    let (hearth, _, _) = fixture_hearth();
    let detail = hearth.resource_detail("food-bank").await.unwrap();
    let demo = detail
        .alternatives
        .iter()
        .find(|c| c.id() == "demo-1")
        .unwrap();
    assert_eq!(demo.confirmation_source, "partner_call");
}

#[tokio::test]
async fn detail_is_cached_after_the_first_lookup() {
    let (hearth, repo, _) = fixture_hearth();
    let first = hearth.resource_detail("demo-1").await.unwrap();
    assert_eq!(repo.page_queries(), 1);
    let second = hearth.resource_detail("demo-1").await.unwrap();
    assert_eq!(repo.page_queries(), 1);
    assert_eq!(
        second.resource.as_ref().map(|c| c.id()),
        first.resource.as_ref().map(|c| c.id())
    );
    assert_eq!(alt_ids(&first), alt_ids(&second));
}

#[tokio::test]
async fn unknown_id_is_empty_and_not_cached() {
    let (hearth, repo, _) = fixture_hearth();
    let detail = hearth.resource_detail("missing").await.unwrap();
    assert!(detail.resource.is_none());
    assert!(detail.alternatives.is_empty());
    assert!(hearth.cache_stats().await.fresh_keys.is_empty());
    assert_eq!(repo.page_queries(), 0);
}

#[tokio::test]
async fn failed_alternative_lookup_still_returns_the_resource() {
    let (hearth, repo, _) = fixture_hearth();
    repo.fail_page_queries(true);
    let detail = hearth.resource_detail("shelter").await.unwrap();
    assert_eq!(detail.resource.as_ref().map(|c| c.id()), Some("shelter"));
    assert!(detail.alternatives.is_empty());
}

#[tokio::test]
async fn external_ids_are_resolved_on_their_feed() {
    let (hearth, repo, connector) = fixture_hearth();
    let detail = hearth.resource_detail("ext-mock-1004").await.unwrap();
    let card = detail.resource.unwrap();
    assert_eq!(card.id(), "ext-mock-1004");
    assert_eq!(card.resource.name, "Brooklyn Job Training Center");
    assert!(detail.alternatives.is_empty());
    assert_eq!(connector.calls(), 1);
    assert_eq!(repo.page_queries(), 0);

    let failed = hearth.resource_detail("ext-mock-FAIL").await.unwrap();
    assert!(failed.resource.is_none());
    let unknown_feed = hearth.resource_detail("ext-nowhere-1").await.unwrap();
    assert!(unknown_feed.resource.is_none());
}
