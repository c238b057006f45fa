use std::collections::BTreeMap;

use hearth_core::trust::source_or_local;
use hearth_core::{FreshnessState, ListFreshness, ResourceCard};

/// Oldest confirmation plus stale and unknown counts.
#[must_use]
pub fn freshness(cards: &[ResourceCard]) -> ListFreshness {
    ListFreshness {
        oldest_confirmation_at: cards.iter().filter_map(|c| c.last_confirmed_at).min(),
        stale_count: cards
            .iter()
            .filter(|c| c.freshness_state == FreshnessState::Stale)
            .count(),
        unknown_count: cards
            .iter()
            .filter(|c| c.freshness_state == FreshnessState::Unknown)
            .count(),
    }
}

/// Cards per source; cards without a source count as `local`.
#[must_use]
pub fn source_mix(cards: &[ResourceCard]) -> BTreeMap<String, usize> {
    let mut mix = BTreeMap::new();
    for card in cards {
        *mix.entry(source_or_local(card.resource.source.as_deref()).to_string())
            .or_insert(0) += 1;
    }
    mix
}
