use hearth_core::VerificationBadge;

use crate::helpers::{empty_local_hearth, filters, fixture_hearth, ids};

#[tokio::test]
async fn empty_local_result_falls_back_to_the_default_source() {
    let (hearth, repo, connector) = empty_local_hearth();
    let resp = hearth.list_resources(&filters("")).await.unwrap();
    assert_eq!(repo.page_queries(), 1);
    assert_eq!(connector.calls(), 1);
    assert_eq!(resp.count, 6);
    assert_eq!(resp.source_mix.get("mock"), Some(&6));
    assert!(ids(&resp).iter().all(|id| id.starts_with("ext-mock-")));
    assert!(
        resp.data
            .iter()
            .all(|c| c.verification_badge == VerificationBadge::VerifiedApi)
    );
    assert_eq!(resp.data[0].data_source_label, "MOCK");
}

#[tokio::test]
async fn non_empty_local_result_skips_the_feed() {
    let (hearth, _, connector) = fixture_hearth();
    let resp = hearth.list_resources(&filters("city=Orange")).await.unwrap();
    assert_eq!(resp.count, 5);
    assert_eq!(connector.calls(), 0);
}

#[tokio::test]
async fn explicit_source_skips_the_local_store() {
    let (hearth, repo, connector) = fixture_hearth();
    let resp = hearth
        .list_resources(&filters("source=mock&categories=legal"))
        .await
        .unwrap();
    assert_eq!(repo.page_queries(), 0);
    assert_eq!(connector.calls(), 1);
    assert_eq!(ids(&resp), vec!["ext-mock-1003"]);
    assert_eq!(resp.data[0].resource.source.as_deref(), Some("mock"));
}

#[tokio::test]
async fn source_local_never_consults_a_feed() {
    let (hearth, repo, connector) = empty_local_hearth();
    let resp = hearth.list_resources(&filters("source=local")).await.unwrap();
    assert_eq!(resp.count, 0);
    assert_eq!(repo.page_queries(), 1);
    assert_eq!(connector.calls(), 0);
}

#[tokio::test]
async fn unknown_source_yields_an_empty_listing() {
    let (hearth, repo, connector) = fixture_hearth();
    let resp = hearth.list_resources(&filters("source=nowhere")).await.unwrap();
    assert_eq!(resp.count, 0);
    assert!(resp.source_mix.is_empty());
    assert_eq!(repo.page_queries(), 0);
    assert_eq!(connector.calls(), 0);
}

#[tokio::test]
async fn external_query_is_capped_and_starts_at_zero() {
    let (hearth, _, _) = empty_local_hearth();
    // A local offset must not skip feed records.
    let resp = hearth
        .list_resources(&filters("offset=40&limit=100"))
        .await
        .unwrap();
    assert_eq!(resp.count, 6);
}
