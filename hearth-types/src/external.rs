//! Records and queries exchanged with external connectors.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::resource::Category;

/// Kind of phone line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhoneType {
    /// Voice line.
    #[default]
    Voice,
    /// Fax line.
    Fax,
    /// Text telephone.
    Tty,
    /// Text messages.
    Sms,
}

/// Canonical record produced by a connector after normalizing its raw payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[allow(missing_docs)]
pub struct ExternalService {
    pub source_id: String,
    pub source: String,
    pub name: String,
    pub description: Option<String>,
    pub organization_name: Option<String>,
    pub organization_id: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub phone: Option<String>,
    pub phone_type: Option<PhoneType>,
    pub website: Option<String>,
    pub email: Option<String>,
    pub eligibility: Option<String>,
    pub fees: Option<String>,
    pub schedule: Option<String>,
    pub service_area: Option<String>,
    pub languages: Vec<String>,
    pub interpretation_services: Vec<String>,
    pub accessibility: Vec<String>,
    pub last_verified_at: Option<DateTime<Utc>>,
    pub data_source_url: Option<String>,
}

/// Search parameters forwarded to a connector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalQuery {
    /// Free-text keyword.
    pub search: Option<String>,
    /// City or borough.
    pub city: Option<String>,
    /// Five-digit postal code.
    pub zip: Option<String>,
    /// Category hint.
    pub category: Option<Category>,
    /// Two-letter state code.
    pub state: Option<String>,
    /// Page size requested; connectors clamp to their own maximum.
    pub limit: u32,
    /// Records to skip.
    pub offset: u32,
}

impl Default for ExternalQuery {
    fn default() -> Self {
        Self {
            search: None,
            city: None,
            zip: None,
            category: None,
            state: None,
            limit: 50,
            offset: 0,
        }
    }
}

impl ExternalQuery {
    /// Replace the page window.
    #[must_use]
    pub const fn page(mut self, limit: u32, offset: u32) -> Self {
        self.limit = limit;
        self.offset = offset;
        self
    }

    /// Set the keyword.
    #[must_use]
    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }
}

/// Outcome of a bulk import from one external source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncReport {
    /// Source identifier.
    pub source: String,
    /// Records successfully imported.
    pub imported: usize,
    /// Messages for pages or records that failed.
    pub errors: Vec<String>,
    /// When the sync finished.
    pub timestamp: DateTime<Utc>,
    /// True when no error occurred.
    pub success: bool,
}
