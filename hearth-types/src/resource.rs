//! Canonical resource record and its category taxonomy.

use core::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::HearthError;

/// Service category a resource belongs to. A resource may carry several.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Food pantries, meal programs, grocery assistance.
    Food,
    /// Shelters, rental assistance, transitional housing.
    Housing,
    /// Clinics, mental health, substance use services.
    Health,
    /// Legal aid, immigration help.
    Legal,
    /// Job training, placement, career services.
    Employment,
    /// Classes, tutoring, literacy programs.
    Education,
}

impl Category {
    /// Every category in declaration order.
    pub const ALL: [Self; 6] = [
        Self::Food,
        Self::Housing,
        Self::Health,
        Self::Legal,
        Self::Employment,
        Self::Education,
    ];

    /// Stable lower-case identifier used on the wire and in cache keys.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Food => "food",
            Self::Housing => "housing",
            Self::Health => "health",
            Self::Legal => "legal",
            Self::Employment => "employment",
            Self::Education => "education",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = HearthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| HearthError::validation(format!("unknown category '{s}'")))
    }
}

/// A single assistance-service listing.
///
/// `state` is the only mandatory free-text field besides `name`; the
/// coordinate pair is meaningful only when both halves are present (see
/// [`Resource::coordinates`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    /// Stable identifier (store primary key, or `ext-{source}-{source_id}`).
    pub id: String,
    /// Display name.
    pub name: String,
    /// Free-text description.
    pub description: Option<String>,
    /// Service categories, at least one.
    pub categories: Vec<Category>,
    /// Eligibility notes.
    pub eligibility: Option<String>,
    /// Street address.
    pub address: Option<String>,
    /// City.
    pub city: Option<String>,
    /// Two-letter state code.
    pub state: String,
    /// Five-digit postal code.
    pub zip: Option<String>,
    /// Latitude in decimal degrees.
    pub latitude: Option<f64>,
    /// Longitude in decimal degrees.
    pub longitude: Option<f64>,
    /// Phone number, E.164 when it could be normalized.
    pub phone: Option<String>,
    /// Website URL.
    pub website: Option<String>,
    /// How to apply.
    pub application_guide: Option<String>,
    /// Whether a partner or trusted feed vouched for the listing.
    pub verified: bool,
    /// Provenance source identifier (`local`, `nyc311`, `community`, ...).
    pub source: Option<String>,
    /// Identifier of the record inside its source.
    pub source_id: Option<String>,
    /// Operating organization name.
    pub organization_name: Option<String>,
    /// Operating organization identifier.
    pub organization_id: Option<String>,
    /// Contact e-mail.
    pub email: Option<String>,
    /// Languages spoken on site.
    pub languages: Vec<String>,
    /// Interpretation services offered.
    pub interpretation_services: Vec<String>,
    /// Accessibility features.
    pub accessibility: Vec<String>,
    /// Fee notes.
    pub fees: Option<String>,
    /// Opening hours as free text.
    pub schedule: Option<String>,
    /// Served area as free text.
    pub service_area: Option<String>,
    /// Last time the listing was verified.
    pub last_verified_at: Option<DateTime<Utc>>,
    /// Upstream URL for the record.
    pub data_source_url: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Resource {
    /// The coordinate pair, only when both latitude and longitude are present.
    #[must_use]
    pub const fn coordinates(&self) -> Option<(f64, f64)> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lng)) => Some((lat, lng)),
            _ => None,
        }
    }
}

/// Partially populated resource produced by normalizers before validation.
///
/// Every field is optional; validation turns a draft into a [`Resource`] by
/// requiring `name` and `state` and supplying explicit defaults elsewhere.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[allow(missing_docs)]
pub struct ResourceDraft {
    pub id: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub categories: Vec<Category>,
    pub eligibility: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub application_guide: Option<String>,
    pub verified: bool,
    pub source: Option<String>,
    pub source_id: Option<String>,
    pub organization_name: Option<String>,
    pub organization_id: Option<String>,
    pub email: Option<String>,
    pub languages: Vec<String>,
    pub interpretation_services: Vec<String>,
    pub accessibility: Vec<String>,
    pub fees: Option<String>,
    pub schedule: Option<String>,
    pub service_area: Option<String>,
    pub last_verified_at: Option<DateTime<Utc>>,
    pub data_source_url: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}
