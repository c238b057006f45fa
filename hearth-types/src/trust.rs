//! Trust signals: availability, verification badge, freshness and the
//! authoritative override rows a store may hold for a resource.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Whether a resource is currently taking clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AvailabilityStatus {
    /// No signal either way.
    #[default]
    Unknown,
    /// Accepting clients.
    Open,
    /// Accepting with reduced capacity.
    Limited,
    /// Not accepting clients.
    Full,
    /// Accepting sign-ups onto a waitlist.
    Waitlist,
}

impl AvailabilityStatus {
    /// Wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::Open => "open",
            Self::Limited => "limited",
            Self::Full => "full",
            Self::Waitlist => "waitlist",
        }
    }
}

/// How a listing's provenance is presented to users.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationBadge {
    /// Verified by a local partner.
    VerifiedPartner,
    /// Verified through a trusted external feed.
    VerifiedApi,
    /// Community-submitted.
    Community,
    /// No verification.
    Unverified,
}

impl VerificationBadge {
    /// Wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::VerifiedPartner => "verified_partner",
            Self::VerifiedApi => "verified_api",
            Self::Community => "community",
            Self::Unverified => "unverified",
        }
    }
}

/// Age class of the most recent confirmation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FreshnessState {
    /// Confirmed within the last 24 hours.
    Fresh,
    /// Confirmed within the last 72 hours.
    Aging,
    /// Confirmed more than 72 hours ago.
    Stale,
    /// Never confirmed.
    Unknown,
}

/// Availability row keyed by resource id, as held by the local store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvailabilityRow {
    /// Resource the row belongs to.
    pub resource_id: String,
    /// Authoritative availability.
    pub availability_status: Option<AvailabilityStatus>,
    /// When availability was last confirmed.
    pub last_confirmed_at: Option<DateTime<Utc>>,
    /// Who confirmed it.
    pub confirmation_source: Option<String>,
    /// Store-assigned confidence.
    pub confidence_score: Option<f64>,
}

/// Verification row keyed by resource id, as held by the local store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationRow {
    /// Resource the row belongs to.
    pub resource_id: String,
    /// Authoritative badge.
    pub verification_badge: Option<VerificationBadge>,
    /// Authoritative provenance label.
    pub data_source_label: Option<String>,
    /// Authoritative freshness class.
    pub freshness_state: Option<FreshnessState>,
}

/// Merged trust fields for one resource. Every present field wins over the
/// value the mapper would otherwise derive.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[allow(missing_docs)]
pub struct TrustOverride {
    pub availability_status: Option<AvailabilityStatus>,
    pub last_confirmed_at: Option<DateTime<Utc>>,
    pub confirmation_source: Option<String>,
    pub confidence_score: Option<f64>,
    pub verification_badge: Option<VerificationBadge>,
    pub data_source_label: Option<String>,
    pub freshness_state: Option<FreshnessState>,
}

impl TrustOverride {
    /// Merge the two store rows for a resource; `None` when neither exists.
    #[must_use]
    pub fn merge(
        availability: Option<&AvailabilityRow>,
        verification: Option<&VerificationRow>,
    ) -> Option<Self> {
        if availability.is_none() && verification.is_none() {
            return None;
        }
        let mut out = Self::default();
        if let Some(a) = availability {
            out.availability_status = a.availability_status;
            out.last_confirmed_at = a.last_confirmed_at;
            out.confirmation_source.clone_from(&a.confirmation_source);
            out.confidence_score = a.confidence_score;
        }
        if let Some(v) = verification {
            out.verification_badge = v.verification_badge;
            out.data_source_label.clone_from(&v.data_source_label);
            out.freshness_state = v.freshness_state;
        }
        Some(out)
    }
}
