//! Filters the local store cannot apply, evaluated on finished cards.

use chrono::{DateTime, Utc};
use hearth_core::{AvailabilityStatus, ResourceCard, ResourceFilters, haversine_miles};

/// Open or limited availability.
#[must_use]
pub const fn is_open_now(card: &ResourceCard) -> bool {
    matches!(
        card.availability_status,
        AvailabilityStatus::Open | AvailabilityStatus::Limited
    )
}

/// Confirmed no longer than `window` before `now`.
#[must_use]
pub fn is_verified_recently(card: &ResourceCard, now: DateTime<Utc>, window: chrono::Duration) -> bool {
    card.last_confirmed_at.is_some_and(|at| now - at <= window)
}

/// Inside `radius_miles` of `center`; cards without coordinates never are.
#[must_use]
pub fn is_within_radius(card: &ResourceCard, center: (f64, f64), radius_miles: f64) -> bool {
    card.resource
        .coordinates()
        .is_some_and(|(lat, lng)| haversine_miles(center.0, center.1, lat, lng) <= radius_miles)
}

/// Settings the client-side filters need besides the filters themselves.
#[derive(Debug, Clone, Copy)]
pub struct ClientFilterContext {
    /// Evaluation instant.
    pub now: DateTime<Utc>,
    /// Window for `verified_recently`.
    pub recent_window: chrono::Duration,
    /// Radius used when only a center is given.
    pub default_radius_miles: f64,
}

/// Keep the cards passing every requested client-side filter.
///
/// The radius filter applies only when both halves of the center are given.
#[must_use]
pub fn apply(
    cards: Vec<ResourceCard>,
    filters: &ResourceFilters,
    ctx: ClientFilterContext,
) -> Vec<ResourceCard> {
    let center = filters.center();
    let radius = filters.near_radius_miles.unwrap_or(ctx.default_radius_miles);
    cards
        .into_iter()
        .filter(|card| !filters.open_now || is_open_now(card))
        .filter(|card| {
            !filters.verified_recently || is_verified_recently(card, ctx.now, ctx.recent_window)
        })
        .filter(|card| center.is_none_or(|c| is_within_radius(card, c, radius)))
        .collect()
}
