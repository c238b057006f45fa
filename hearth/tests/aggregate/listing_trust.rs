use std::sync::Arc;

use chrono::Utc;
use hearth_core::{AvailabilityStatus, FreshnessState, VerificationBadge};
use hearth_mock::{InMemoryRepository, MockConnector, fixtures};

use crate::helpers::{builder, filters, fixture_hearth};

#[tokio::test]
async fn verified_local_row_confirmed_now_is_a_fresh_partner_listing() {
    let now = Utc::now();
    let mut row = fixtures::resources::all(now)
        .into_iter()
        .find(|r| r.id == "health-clinic")
        .unwrap();
    row.last_verified_at = Some(now);
    let repo = Arc::new(InMemoryRepository::new().with_resources(vec![row]));
    let hearth = builder(&repo, &Arc::new(MockConnector::new())).build().unwrap();

    let resp = hearth.list_resources(&filters("")).await.unwrap();
    assert_eq!(resp.count, 1);
    let card = &resp.data[0];
    assert_eq!(card.verification_badge, VerificationBadge::VerifiedPartner);
    assert_eq!(card.freshness_state, FreshnessState::Fresh);
    assert_eq!(card.confidence_score, Some(0.95));
    assert_eq!(card.data_source_label, "Local partner directory");
    assert_eq!(card.confirmation_source, "local");
}

#[tokio::test]
async fn store_override_wins_over_derived_signals() {
    let (hearth, _, _) = fixture_hearth();
    let resp = hearth.list_resources(&filters("search=demo")).await.unwrap();
    let card = &resp.data[0];
    assert_eq!(card.id(), "demo-1");
    assert_eq!(card.availability_status, AvailabilityStatus::Open);
    assert_eq!(card.confirmation_source, "partner_call");
    assert_eq!(card.confidence_score, Some(0.9));
    assert_eq!(card.freshness_state, FreshnessState::Fresh);
    assert_eq!(card.verification_badge, VerificationBadge::VerifiedPartner);
}

#[tokio::test]
async fn listing_summary_counts_stale_unknown_and_sources() {
    let (hearth, _, _) = fixture_hearth();
    let resp = hearth.list_resources(&filters("")).await.unwrap();
    assert_eq!(resp.count, 6);
    assert_eq!(resp.freshness.stale_count, 2);
    assert_eq!(resp.freshness.unknown_count, 2);
    assert_eq!(resp.source_mix.get("local"), Some(&5));
    assert_eq!(resp.source_mix.get("community"), Some(&1));
    let oldest = resp.freshness.oldest_confirmation_at.unwrap();
    let clinic = resp.data.iter().find(|c| c.id() == "health-clinic").unwrap();
    assert_eq!(Some(oldest), clinic.last_confirmed_at);
}

#[tokio::test]
async fn derived_availability_follows_listing_text() {
    let (hearth, _, _) = fixture_hearth();
    let resp = hearth.list_resources(&filters("")).await.unwrap();
    let status = |id: &str| {
        resp.data
            .iter()
            .find(|c| c.id() == id)
            .map(|c| c.availability_status)
            .unwrap()
    };
    assert_eq!(status("food-bank"), AvailabilityStatus::Limited);
    assert_eq!(status("shelter"), AvailabilityStatus::Full);
    assert_eq!(status("legal-aid"), AvailabilityStatus::Open);
    assert_eq!(status("tutoring"), AvailabilityStatus::Unknown);
}
