use hearth::HearthError;
use hearth_core::AvailabilityStatus;

use crate::helpers::{filters, fixture_hearth, ids};

#[tokio::test]
async fn open_now_keeps_limited_and_drops_full() {
    let (hearth, _, _) = fixture_hearth();
    let resp = hearth.list_resources(&filters("open_now=true")).await.unwrap();
    let got = ids(&resp);
    assert!(got.contains(&"food-bank".to_string()), "limited stays: {got:?}");
    assert!(!got.contains(&"shelter".to_string()), "full goes: {got:?}");
    assert!(!got.contains(&"tutoring".to_string()), "unknown goes: {got:?}");
    assert_eq!(resp.count, 4);
    assert!(resp.data.iter().all(|c| matches!(
        c.availability_status,
        AvailabilityStatus::Open | AvailabilityStatus::Limited
    )));
}

#[tokio::test]
async fn verified_recently_uses_the_effective_confirmation() {
    let (hearth, _, _) = fixture_hearth();
    let resp = hearth
        .list_resources(&filters("verified_recently=true"))
        .await
        .unwrap();
    assert_eq!(ids(&resp), vec!["demo-1", "food-bank"]);
}

#[tokio::test]
async fn radius_excludes_far_rows_and_rows_without_coordinates() {
    let (hearth, _, _) = fixture_hearth();
    let resp = hearth
        .list_resources(&filters("near_lat=33.7880&near_lng=-117.8500&near_radius_miles=0.5"))
        .await
        .unwrap();
    assert_eq!(ids(&resp), vec!["food-bank", "legal-aid"]);
}

#[tokio::test]
async fn radius_needs_both_halves_of_the_center() {
    let (hearth, _, _) = fixture_hearth();
    let resp = hearth
        .list_resources(&filters("near_lat=33.7880&near_radius_miles=0.5"))
        .await
        .unwrap();
    assert_eq!(resp.count, 6);
}

#[tokio::test]
async fn default_radius_applies_when_only_a_center_is_given() {
    let (hearth, _, _) = fixture_hearth();
    let resp = hearth
        .list_resources(&filters("near_lat=33.7175&near_lng=-117.8311"))
        .await
        .unwrap();
    let got = ids(&resp);
    assert!(got.contains(&"demo-1".to_string()));
    assert!(got.contains(&"shelter".to_string()));
    assert!(!got.contains(&"tutoring".to_string()));
}

#[tokio::test]
async fn malformed_zip_is_rejected_before_any_lookup() {
    let (hearth, repo, connector) = fixture_hearth();
    let err = hearth
        .list_resources_from_query("zip=abcde")
        .await
        .unwrap_err();
    assert!(matches!(err, HearthError::Validation(_)), "got {err:?}");
    assert_eq!(repo.page_queries(), 0);
    assert_eq!(connector.calls(), 0);
    assert_eq!(hearth.cache_stats().await.misses, 0);
}

#[tokio::test]
async fn store_filters_reach_the_repository() {
    let (hearth, _, _) = fixture_hearth();
    let resp = hearth
        .list_resources(&filters("categories=housing&city=Santa%20Ana"))
        .await
        .unwrap();
    assert_eq!(ids(&resp), vec!["shelter"]);

    let page = hearth
        .list_resources(&filters("limit=2&offset=1"))
        .await
        .unwrap();
    assert_eq!(ids(&page), vec!["food-bank", "shelter"]);
}
