//! Field-level normalization of external records and their conversion into
//! local [`Resource`] rows.

use chrono::Utc;

use hearth_types::{Category, ExternalService, Resource, ResourceDraft};

const CATEGORY_KEYWORDS: [(Category, &[&str]); 6] = [
    (
        Category::Food,
        &["food", "meal", "hunger", "food pantry", "soup kitchen", "groceries"],
    ),
    (
        Category::Housing,
        &[
            "housing",
            "shelter",
            "homeless",
            "rent",
            "housing assistance",
            "transitional",
        ],
    ),
    (
        Category::Health,
        &[
            "health",
            "medical",
            "clinic",
            "hospital",
            "mental health",
            "counseling",
            "substance",
            "addiction",
        ],
    ),
    (
        Category::Legal,
        &[
            "legal",
            "law",
            "attorney",
            "immigration",
            "visa",
            "citizenship",
            "legal aid",
        ],
    ),
    (
        Category::Employment,
        &[
            "job",
            "employment",
            "work",
            "career",
            "training",
            "resume",
            "unemployment",
        ],
    ),
    (
        Category::Education,
        &[
            "education",
            "school",
            "tutoring",
            "college",
            "university",
            "classes",
            "literacy",
        ],
    ),
];

const ACCESSIBILITY_KEYWORDS: [(&str, &[&str]); 7] = [
    ("wheelchair_accessible", &["wheelchair", "accessible"]),
    ("ramp_accessible", &["ramp"]),
    ("elevator", &["elevator"]),
    ("sign_language", &["sign", "asl"]),
    ("braille", &["braille"]),
    ("visual_assistance", &["visual", "blind"]),
    ("hearing_assistance", &["hearing", "deaf"]),
];

/// Infer categories by keyword over the lower-cased name and description.
///
/// Every category whose keyword list matches is returned, in declaration
/// order. Non-empty text that matches nothing falls back to `food`.
// FIXME: the food fallback mislabels unrelated services; needs a product decision.
#[must_use]
pub fn infer_categories(name: &str, description: Option<&str>) -> Vec<Category> {
    let text = format!("{name} {}", description.unwrap_or_default()).to_lowercase();
    let mut out: Vec<Category> = CATEGORY_KEYWORDS
        .iter()
        .filter(|(_, words)| words.iter().any(|w| text.contains(w)))
        .map(|(c, _)| *c)
        .collect();
    if out.is_empty() && !text.trim().is_empty() {
        out.push(Category::Food);
    }
    out
}

/// Normalize a phone number to E.164 when it is a recognizable US number.
///
/// 10 digits become `+1XXXXXXXXXX`, 11 digits with a leading `1` become
/// `+1XXXXXXXXXX`; anything else is returned unchanged. Blank input is `None`.
#[must_use]
pub fn normalize_phone(phone: Option<&str>) -> Option<String> {
    let phone = phone.filter(|p| !p.trim().is_empty())?;
    let digits: String = phone.chars().filter(char::is_ascii_digit).collect();
    match digits.len() {
        10 => Some(format!("+1{digits}")),
        11 if digits.starts_with('1') => Some(format!("+{digits}")),
        _ => Some(phone.to_string()),
    }
}

/// Split a `,` or `|` separated field into trimmed, non-empty items.
#[must_use]
pub fn parse_list_field(value: Option<&str>) -> Vec<String> {
    value
        .unwrap_or_default()
        .split([',', '|'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Map free-text accessibility notes to canonical tags.
#[must_use]
pub fn parse_accessibility(value: Option<&str>) -> Vec<String> {
    let text = value.unwrap_or_default().to_lowercase();
    if text.is_empty() {
        return Vec::new();
    }
    ACCESSIBILITY_KEYWORDS
        .iter()
        .filter(|(_, words)| words.iter().any(|w| text.contains(w)))
        .map(|(tag, _)| (*tag).to_string())
        .collect()
}

/// Globally unique id for a record inside a source: `"{source}:{id}"`.
#[must_use]
pub fn generate_source_id(source: &str, external_id: &str) -> String {
    format!("{source}:{external_id}")
}

/// Listing id for a resource that only exists in an external feed.
#[must_use]
pub fn external_resource_id(source: &str, source_id: &str) -> String {
    format!("ext-{source}-{source_id}")
}

/// Convert a connector record into a resource draft.
///
/// External records are always marked verified. The service area doubles as
/// the application guide.
#[must_use]
pub fn to_resource(external: &ExternalService) -> ResourceDraft {
    ResourceDraft {
        name: Some(external.name.clone()),
        description: external.description.clone(),
        categories: infer_categories(&external.name, external.description.as_deref()),
        eligibility: external.eligibility.clone(),
        address: external.address.clone(),
        city: external.city.clone(),
        state: external.state.clone(),
        zip: external.zip.clone(),
        latitude: external.latitude,
        longitude: external.longitude,
        phone: external.phone.clone(),
        website: external.website.clone(),
        application_guide: external.service_area.clone(),
        verified: true,
        source: Some(external.source.clone()),
        source_id: Some(external.source_id.clone()),
        organization_name: external.organization_name.clone(),
        organization_id: external.organization_id.clone(),
        email: external.email.clone(),
        languages: external.languages.clone(),
        interpretation_services: external.interpretation_services.clone(),
        accessibility: external.accessibility.clone(),
        fees: external.fees.clone(),
        schedule: external.schedule.clone(),
        service_area: external.service_area.clone(),
        last_verified_at: external.last_verified_at,
        data_source_url: external.data_source_url.clone(),
        ..ResourceDraft::default()
    }
}

/// Turn a draft into a resource, or `None` when `name` or `state` is blank.
///
/// Missing categories default to `[food]`; missing timestamps default to now.
/// A coordinate pair with a missing half is dropped entirely.
#[must_use]
pub fn validate_resource(draft: ResourceDraft) -> Option<Resource> {
    let name = draft.name.filter(|n| !n.trim().is_empty())?;
    let state = draft.state.filter(|s| !s.trim().is_empty())?;
    let now = Utc::now();
    let (latitude, longitude) = match (draft.latitude, draft.longitude) {
        (Some(lat), Some(lng)) => (Some(lat), Some(lng)),
        _ => (None, None),
    };
    let categories = if draft.categories.is_empty() {
        vec![Category::Food]
    } else {
        draft.categories
    };

    Some(Resource {
        id: draft.id.unwrap_or_default(),
        name,
        description: draft.description,
        categories,
        eligibility: draft.eligibility,
        address: draft.address,
        city: draft.city,
        state,
        zip: draft.zip,
        latitude,
        longitude,
        phone: draft.phone,
        website: draft.website,
        application_guide: draft.application_guide,
        verified: draft.verified,
        source: draft.source,
        source_id: draft.source_id,
        organization_name: draft.organization_name,
        organization_id: draft.organization_id,
        email: draft.email,
        languages: draft.languages,
        interpretation_services: draft.interpretation_services,
        accessibility: draft.accessibility,
        fees: draft.fees,
        schedule: draft.schedule,
        service_area: draft.service_area,
        last_verified_at: draft.last_verified_at,
        data_source_url: draft.data_source_url,
        created_at: draft.created_at.unwrap_or(now),
        updated_at: draft.updated_at.unwrap_or(now),
    })
}
