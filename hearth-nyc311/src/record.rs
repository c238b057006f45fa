//! Raw NYC 311 service payload and its normalization.

use chrono::Utc;
use hearth_core::normalize::{normalize_phone, parse_accessibility, parse_list_field};
use hearth_core::{ExternalService, PhoneType};
use serde::{Deserialize, Deserializer};

/// A service as returned by the NYC 311 directory.
///
/// Every field is optional on the wire; ids and coordinates may arrive as
/// either numbers or strings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
#[allow(missing_docs)]
pub struct Nyc311Service {
    #[serde(deserialize_with = "lenient_string")]
    pub unique_id: Option<String>,
    pub service_name: Option<String>,
    pub service_description: Option<String>,
    pub agency_responsible: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub zipcode: Option<String>,
    #[serde(deserialize_with = "lenient_f64")]
    pub latitude: Option<f64>,
    #[serde(deserialize_with = "lenient_f64")]
    pub longitude: Option<f64>,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub email: Option<String>,
    pub fees: Option<String>,
    pub accessibility: Option<String>,
    pub languages: Option<String>,
    pub hours: Option<String>,
    pub eligibility: Option<String>,
    pub service_area: Option<String>,
}

fn lenient_string<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    Ok(match serde_json::Value::deserialize(d)? {
        serde_json::Value::String(s) => Some(s),
        serde_json::Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

fn lenient_f64<'de, D: Deserializer<'de>>(d: D) -> Result<Option<f64>, D::Error> {
    Ok(match serde_json::Value::deserialize(d)? {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
    .filter(|v: &f64| v.is_finite()))
}

fn non_empty(value: Option<&String>) -> Option<String> {
    value
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Map a raw NYC 311 service into the canonical connector record.
///
/// State defaults to `NY`, every phone is a voice line, and the record is
/// stamped as verified at normalization time.
#[must_use]
pub fn normalize_nyc311(raw: &Nyc311Service, source: &str) -> ExternalService {
    let website = non_empty(raw.website.as_ref());
    ExternalService {
        source_id: non_empty(raw.unique_id.as_ref()).unwrap_or_default(),
        source: source.to_string(),
        name: non_empty(raw.service_name.as_ref()).unwrap_or_default(),
        description: non_empty(raw.service_description.as_ref()),
        organization_name: non_empty(raw.agency_responsible.as_ref()),
        organization_id: None,
        address: non_empty(raw.address.as_ref()),
        city: non_empty(raw.city.as_ref()),
        state: non_empty(raw.state.as_ref()).or_else(|| Some("NY".to_string())),
        zip: non_empty(raw.zipcode.as_ref()),
        latitude: raw.latitude,
        longitude: raw.longitude,
        phone: normalize_phone(raw.phone.as_deref()),
        phone_type: Some(PhoneType::Voice),
        website: website.clone(),
        email: non_empty(raw.email.as_ref()),
        eligibility: non_empty(raw.eligibility.as_ref()),
        fees: non_empty(raw.fees.as_ref()),
        schedule: non_empty(raw.hours.as_ref()),
        service_area: non_empty(raw.service_area.as_ref()),
        languages: parse_list_field(raw.languages.as_deref()),
        interpretation_services: Vec::new(),
        accessibility: parse_accessibility(raw.accessibility.as_deref()),
        last_verified_at: Some(Utc::now()),
        data_source_url: website,
    }
}
