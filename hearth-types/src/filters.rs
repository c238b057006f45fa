//! Listing filters, their query-string parser, and the store-facing query.

use serde::{Deserialize, Serialize};

use crate::error::HearthError;
use crate::resource::{Category, Resource};

/// Default page size for listings.
pub const DEFAULT_LIMIT: u32 = 20;
/// Largest accepted page size.
pub const MAX_LIMIT: u32 = 100;

/// Validated filters for a resource listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceFilters {
    /// Match resources carrying any of these categories.
    pub categories: Vec<Category>,
    /// Case-insensitive substring over name and description.
    pub search: Option<String>,
    /// Exact city.
    pub city: Option<String>,
    /// Exact two-letter state.
    pub state: Option<String>,
    /// Exact five-digit postal code.
    pub zip: Option<String>,
    /// Eligibility tags. Accepted and keyed, not applied as a filter.
    pub eligibility: Vec<String>,
    /// Exact match on the verified flag.
    pub verified: Option<bool>,
    /// Keep only resources that are open or limited.
    pub open_now: bool,
    /// Keep only resources confirmed within the recent window.
    pub verified_recently: bool,
    /// Center latitude for the radius filter.
    pub near_lat: Option<f64>,
    /// Center longitude for the radius filter.
    pub near_lng: Option<f64>,
    /// Radius in miles around the center.
    pub near_radius_miles: Option<f64>,
    /// Explicit source selection (`local` or a connector key).
    pub source: Option<String>,
    /// Page size.
    pub limit: u32,
    /// Page offset.
    pub offset: u32,
}

impl Default for ResourceFilters {
    fn default() -> Self {
        Self {
            categories: Vec::new(),
            search: None,
            city: None,
            state: None,
            zip: None,
            eligibility: Vec::new(),
            verified: None,
            open_now: false,
            verified_recently: false,
            near_lat: None,
            near_lng: None,
            near_radius_miles: None,
            source: None,
            limit: DEFAULT_LIMIT,
            offset: 0,
        }
    }
}

fn csv(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn text(name: &str, value: &str, min: usize, max: usize) -> Result<String, HearthError> {
    let v = value.trim();
    let len = v.chars().count();
    if len < min || len > max {
        return Err(HearthError::validation(format!(
            "{name} must be between {min} and {max} characters"
        )));
    }
    Ok(v.to_string())
}

fn boolean(name: &str, value: &str) -> Result<bool, HearthError> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(HearthError::validation(format!(
            "{name} must be 'true' or 'false'"
        ))),
    }
}

fn number(name: &str, value: &str, min: f64, max: f64) -> Result<f64, HearthError> {
    let n: f64 = value
        .trim()
        .parse()
        .map_err(|_| HearthError::validation(format!("{name} must be a number")))?;
    if !n.is_finite() || n < min || n > max {
        return Err(HearthError::validation(format!(
            "{name} must be between {min} and {max}"
        )));
    }
    Ok(n)
}

fn integer(name: &str, value: &str, min: u32, max: u32) -> Result<u32, HearthError> {
    let n: i64 = value
        .trim()
        .parse()
        .map_err(|_| HearthError::validation(format!("{name} must be an integer")))?;
    u32::try_from(n)
        .ok()
        .filter(|n| (min..=max).contains(n))
        .ok_or_else(|| HearthError::validation(format!("{name} must be between {min} and {max}")))
}

impl ResourceFilters {
    /// Parse and validate a URL query string (`categories=food,legal&zip=10001`).
    ///
    /// Empty parameters are treated as absent. Unknown parameters are ignored.
    ///
    /// # Errors
    /// Returns [`HearthError::Validation`] naming the first offending parameter.
    pub fn from_query_str(query: &str) -> Result<Self, HearthError> {
        let mut f = Self::default();
        let query = query.strip_prefix('?').unwrap_or(query);
        for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
            if value.is_empty() {
                continue;
            }
            match key.as_ref() {
                "categories" => {
                    let mut categories = csv(&value)
                        .iter()
                        .map(|c| c.parse())
                        .collect::<Result<Vec<Category>, _>>()?;
                    categories.sort();
                    categories.dedup();
                    f.categories = categories;
                }
                "search" => f.search = Some(text("search", &value, 1, 120)?),
                "city" => f.city = Some(text("city", &value, 1, 100)?),
                "state" => f.state = Some(text("state", &value, 2, 2)?),
                "zip" => {
                    let zip = value.trim();
                    if zip.len() != 5 || !zip.bytes().all(|b| b.is_ascii_digit()) {
                        return Err(HearthError::validation("zip must be five digits"));
                    }
                    f.zip = Some(zip.to_string());
                }
                "eligibility" => {
                    let items = csv(&value);
                    if items.len() > 20 {
                        return Err(HearthError::validation(
                            "eligibility accepts at most 20 items",
                        ));
                    }
                    f.eligibility = items
                        .iter()
                        .map(|e| text("eligibility", e, 1, 64))
                        .collect::<Result<_, _>>()?;
                }
                "verified" => f.verified = Some(boolean("verified", &value)?),
                "open_now" => f.open_now = boolean("open_now", &value)?,
                "verified_recently" => f.verified_recently = boolean("verified_recently", &value)?,
                "near_lat" => f.near_lat = Some(number("near_lat", &value, -90.0, 90.0)?),
                "near_lng" => f.near_lng = Some(number("near_lng", &value, -180.0, 180.0)?),
                "near_radius_miles" => {
                    f.near_radius_miles = Some(number("near_radius_miles", &value, 0.1, 50.0)?);
                }
                "source" => f.source = Some(text("source", &value, 1, 40)?),
                "limit" => f.limit = integer("limit", &value, 1, MAX_LIMIT)?,
                "offset" => f.offset = integer("offset", &value, 0, u32::MAX)?,
                _ => {}
            }
        }
        Ok(f)
    }

    /// Whether both halves of the radius center are present.
    #[must_use]
    pub const fn center(&self) -> Option<(f64, f64)> {
        match (self.near_lat, self.near_lng) {
            (Some(lat), Some(lng)) => Some((lat, lng)),
            _ => None,
        }
    }
}

/// Filters the local store applies itself.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryQuery {
    /// Match rows carrying any of these categories; empty means no filter.
    pub categories: Vec<Category>,
    /// Case-insensitive substring over name and description.
    pub search: Option<String>,
    /// Exact city.
    pub city: Option<String>,
    /// Exact state.
    pub state: Option<String>,
    /// Exact zip.
    pub zip: Option<String>,
    /// Exact verified flag.
    pub verified: Option<bool>,
    /// Page size.
    pub limit: u32,
    /// Page offset.
    pub offset: u32,
}

impl From<&ResourceFilters> for RepositoryQuery {
    fn from(f: &ResourceFilters) -> Self {
        Self {
            categories: f.categories.clone(),
            search: f.search.clone(),
            city: f.city.clone(),
            state: f.state.clone(),
            zip: f.zip.clone(),
            verified: f.verified,
            limit: f.limit,
            offset: f.offset,
        }
    }
}

/// One page of store rows plus the unpaginated match count.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourcePage {
    /// Rows in the requested window.
    pub rows: Vec<Resource>,
    /// Total rows matching the filters.
    pub total_count: u64,
}
