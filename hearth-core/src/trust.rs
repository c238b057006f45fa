//! Trust and freshness derivation for resource cards.
//!
//! Everything here is a pure function of the resource, an optional store
//! override and the reference instant `now`.

use chrono::{DateTime, Utc};

use hearth_types::{
    AvailabilityStatus, FreshnessState, Resource, ResourceCard, TrustOverride, VerificationBadge,
};

/// Confirmations at most this old are fresh.
pub const FRESH_HOURS: f64 = 24.0;
/// Confirmations at most this old are aging; older ones are stale.
pub const AGING_HOURS: f64 = 72.0;

const VERIFIED_BASE: f64 = 0.95;
const UNVERIFIED_BASE: f64 = 0.5;
const MAX_DECAY: f64 = 0.6;
const DECAY_HORIZON_HOURS: f64 = 24.0 * 14.0;
const CONFIDENCE_FLOOR: f64 = 0.2;

fn age_hours(at: DateTime<Utc>, now: DateTime<Utc>) -> f64 {
    let ms = (now - at).num_milliseconds().max(0);
    ms as f64 / 3_600_000.0
}

/// Source id a record is attributed to; absent sources are local.
#[must_use]
pub fn source_or_local(source: Option<&str>) -> &str {
    source.unwrap_or("local")
}

/// Availability inferred from listing text, checked in priority order.
#[must_use]
pub fn infer_availability(resource: &Resource) -> AvailabilityStatus {
    let text = format!(
        "{} {} {}",
        resource.name,
        resource.description.as_deref().unwrap_or_default(),
        resource.schedule.as_deref().unwrap_or_default()
    )
    .to_lowercase();

    if text.contains("waitlist") {
        AvailabilityStatus::Waitlist
    } else if text.contains("full") || text.contains("no vacancy") {
        AvailabilityStatus::Full
    } else if text.contains("limited") {
        AvailabilityStatus::Limited
    } else if resource.verified {
        AvailabilityStatus::Open
    } else {
        AvailabilityStatus::Unknown
    }
}

/// Freshness class of a confirmation timestamp relative to `now`.
#[must_use]
pub fn freshness_state(confirmed_at: Option<DateTime<Utc>>, now: DateTime<Utc>) -> FreshnessState {
    let Some(at) = confirmed_at else {
        return FreshnessState::Unknown;
    };
    let age = age_hours(at, now);
    if age <= FRESH_HOURS {
        FreshnessState::Fresh
    } else if age <= AGING_HOURS {
        FreshnessState::Aging
    } else {
        FreshnessState::Stale
    }
}

/// Provenance badge derived from the verified flag and the source.
#[must_use]
pub fn verification_badge(resource: &Resource) -> VerificationBadge {
    match (resource.verified, resource.source.as_deref()) {
        (true, None | Some("local")) => VerificationBadge::VerifiedPartner,
        (true, Some(_)) => VerificationBadge::VerifiedApi,
        (false, Some("community")) => VerificationBadge::Community,
        _ => VerificationBadge::Unverified,
    }
}

/// Confidence in a listing, decaying linearly with the age of its last verification.
///
/// Starts at 0.95 (verified) or 0.5, loses up to 0.6 over 14 days, never
/// drops below 0.2, and is rounded to two decimals. `None` without a
/// verification timestamp.
#[must_use]
pub fn confidence_score(resource: &Resource, now: DateTime<Utc>) -> Option<f64> {
    let at = resource.last_verified_at?;
    let base = if resource.verified {
        VERIFIED_BASE
    } else {
        UNVERIFIED_BASE
    };
    let decay = MAX_DECAY * (age_hours(at, now) / DECAY_HORIZON_HOURS).min(1.0);
    let score = (base - decay).max(CONFIDENCE_FLOOR);
    Some((score * 100.0).round() / 100.0)
}

/// Display label for a source id.
#[must_use]
pub fn data_source_label(source: Option<&str>) -> String {
    match source {
        None | Some("local") => "Local partner directory".to_string(),
        Some("nyc311") => "NYC 311 open data".to_string(),
        Some(other) => other.to_uppercase(),
    }
}

/// Build the card for a resource. Every field present on `trust` wins over
/// the derived value; the resource itself is carried through unchanged.
#[must_use]
pub fn to_card(
    resource: &Resource,
    trust: Option<&TrustOverride>,
    now: DateTime<Utc>,
) -> ResourceCard {
    let empty = TrustOverride::default();
    let trust = trust.unwrap_or(&empty);
    let last_confirmed_at = trust.last_confirmed_at.or(resource.last_verified_at);

    ResourceCard {
        availability_status: trust
            .availability_status
            .unwrap_or_else(|| infer_availability(resource)),
        last_confirmed_at,
        confirmation_source: trust
            .confirmation_source
            .clone()
            .unwrap_or_else(|| source_or_local(resource.source.as_deref()).to_string()),
        confidence_score: trust
            .confidence_score
            .or_else(|| confidence_score(resource, now)),
        verification_badge: trust
            .verification_badge
            .unwrap_or_else(|| verification_badge(resource)),
        data_source_label: trust
            .data_source_label
            .clone()
            .unwrap_or_else(|| data_source_label(resource.source.as_deref())),
        freshness_state: trust
            .freshness_state
            .unwrap_or_else(|| freshness_state(last_confirmed_at, now)),
        resource: resource.clone(),
    }
}
