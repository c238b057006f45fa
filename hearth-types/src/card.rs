//! The resource card DTO served to list and detail views.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::resource::Resource;
use crate::trust::{AvailabilityStatus, FreshnessState, VerificationBadge};

/// A [`Resource`] decorated with derived trust and freshness signals.
///
/// The resource fields are flattened on the wire so a card serializes as a
/// single object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceCard {
    /// The underlying record, passed through unchanged.
    #[serde(flatten)]
    pub resource: Resource,
    /// Current availability.
    pub availability_status: AvailabilityStatus,
    /// Latest confirmation: the override timestamp, else `last_verified_at`.
    pub last_confirmed_at: Option<DateTime<Utc>>,
    /// Who confirmed the listing.
    pub confirmation_source: String,
    /// Confidence in the listing, in `[0.20, 0.95]` when derived.
    pub confidence_score: Option<f64>,
    /// Provenance badge.
    pub verification_badge: VerificationBadge,
    /// Human-readable provenance label.
    pub data_source_label: String,
    /// Age class of the latest confirmation.
    pub freshness_state: FreshnessState,
}

impl ResourceCard {
    /// Resource identifier.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.resource.id
    }
}
