use std::sync::Arc;

use proptest::prelude::*;

use hearth::{Hearth, ResourceFilters};
use hearth_core::{AvailabilityStatus, Category};
use hearth_mock::{InMemoryRepository, MockConnector};

fn arb_filters() -> impl Strategy<Value = ResourceFilters> {
    (
        any::<bool>(),
        any::<bool>(),
        proptest::option::of(prop_oneof![Just("Orange"), Just("Santa Ana")]),
        proptest::collection::vec(
            prop_oneof![
                Just(Category::Food),
                Just(Category::Legal),
                Just(Category::Health),
                Just(Category::Education),
            ],
            0..3,
        ),
        1u32..=10,
        0u32..=6,
    )
        .prop_map(|(open_now, verified_recently, city, categories, limit, offset)| {
            ResourceFilters {
                open_now,
                verified_recently,
                city: city.map(str::to_string),
                categories,
                limit,
                offset,
                source: Some("local".to_string()),
                ..ResourceFilters::default()
            }
        })
}

fn block_on<F: std::future::Future>(fut: F) -> F::Output {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap()
        .block_on(fut)
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 48, .. ProptestConfig::default() })]
    #[test]
    fn listing_summary_is_consistent_with_its_cards(f in arb_filters()) {
        let resp = block_on(async {
            let hearth = Hearth::builder()
                .with_repository(Arc::new(InMemoryRepository::with_fixtures()))
                .with_connector(Arc::new(MockConnector::new()))
                .build()
                .unwrap();
            hearth.list_resources(&f).await.unwrap()
        });

        prop_assert_eq!(resp.count, resp.data.len());
        prop_assert!(resp.count <= f.limit as usize);
        prop_assert_eq!(resp.source_mix.values().sum::<usize>(), resp.count);
        prop_assert!(resp.freshness.stale_count + resp.freshness.unknown_count <= resp.count);
        if f.open_now {
            prop_assert!(resp.data.iter().all(|c| matches!(
                c.availability_status,
                AvailabilityStatus::Open | AvailabilityStatus::Limited
            )));
        }
        if f.verified_recently {
            prop_assert!(resp.data.iter().all(|c| c.last_confirmed_at.is_some()));
        }
        if let Some(oldest) = resp.freshness.oldest_confirmation_at {
            prop_assert!(resp.data.iter().filter_map(|c| c.last_confirmed_at).all(|t| t >= oldest));
        }
    }

    #[test]
    fn cached_listing_matches_the_computed_one(f in arb_filters()) {
        let (first, second) = block_on(async {
            let hearth = Hearth::builder()
                .with_repository(Arc::new(InMemoryRepository::with_fixtures()))
                .build()
                .unwrap();
            let first = hearth.list_resources(&f).await.unwrap();
            let second = hearth.list_resources(&f).await.unwrap();
            (first, second)
        });
        prop_assert!(!first.cached);
        prop_assert!(second.cached);
        let ids = |r: &hearth::ResourceListResponse| {
            r.data.iter().map(|c| c.id().to_string()).collect::<Vec<_>>()
        };
        prop_assert_eq!(ids(&first), ids(&second));
        prop_assert_eq!(first.source_mix, second.source_mix);
    }
}
