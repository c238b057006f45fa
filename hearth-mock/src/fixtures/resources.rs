use chrono::{DateTime, Duration, Utc};
use hearth_core::{AvailabilityRow, AvailabilityStatus, Category, Resource};

fn base(id: &str, name: &str, city: &str, zip: &str, now: DateTime<Utc>) -> Resource {
    Resource {
        id: id.to_string(),
        name: name.to_string(),
        description: None,
        categories: vec![Category::Food],
        eligibility: None,
        address: None,
        city: Some(city.to_string()),
        state: "CA".to_string(),
        zip: Some(zip.to_string()),
        latitude: None,
        longitude: None,
        phone: None,
        website: None,
        application_guide: None,
        verified: true,
        source: Some("local".to_string()),
        source_id: None,
        organization_name: None,
        organization_id: None,
        email: None,
        languages: Vec::new(),
        interpretation_services: Vec::new(),
        accessibility: Vec::new(),
        fees: None,
        schedule: None,
        service_area: None,
        last_verified_at: None,
        data_source_url: None,
        created_at: now - Duration::days(90),
        updated_at: now - Duration::days(1),
    }
}

/// Local rows for the in-memory repository, aged relative to `now`.
///
/// | id            | city      | trait under test                       |
/// |---------------|-----------|----------------------------------------|
/// | demo-1        | Orange    | verified local, confirmed 2h ago       |
/// | food-bank     | Orange    | "limited" hours, confirmed 48h ago     |
/// | shelter       | Santa Ana | community, "no vacancy", 10 days old   |
/// | legal-aid     | Orange    | verified, no source, never confirmed   |
/// | health-clinic | Orange    | verified local, 30 days old            |
/// | tutoring      | Orange    | unverified, no coordinates             |
pub fn all(now: DateTime<Utc>) -> Vec<Resource> {
    vec![
        Resource {
            description: Some("Demo resource for local testing.".to_string()),
            categories: vec![Category::Education],
            address: Some("123 Demo St".to_string()),
            latitude: Some(33.7175),
            longitude: Some(-117.8311),
            phone: Some("+17145551234".to_string()),
            organization_name: Some("Demo Organization".to_string()),
            languages: vec!["English".to_string(), "Spanish".to_string()],
            schedule: Some("Mon-Fri 9am-5pm".to_string()),
            service_area: Some("Orange County".to_string()),
            last_verified_at: Some(now - Duration::hours(2)),
            ..base("demo-1", "Demo Community Center", "Orange", "92868", now)
        },
        Resource {
            description: Some("Limited hours this week; bring ID.".to_string()),
            categories: vec![Category::Food],
            latitude: Some(33.7879),
            longitude: Some(-117.8531),
            last_verified_at: Some(now - Duration::hours(48)),
            ..base("food-bank", "Orange Food Bank", "Orange", "92868", now)
        },
        Resource {
            description: Some("Family shelter. Currently no vacancy.".to_string()),
            categories: vec![Category::Housing],
            verified: false,
            source: Some("community".to_string()),
            latitude: Some(33.7455),
            longitude: Some(-117.8677),
            last_verified_at: Some(now - Duration::days(10)),
            ..base("shelter", "Santa Ana Family Shelter", "Santa Ana", "92701", now)
        },
        Resource {
            categories: vec![Category::Legal],
            source: None,
            latitude: Some(33.7880),
            longitude: Some(-117.8500),
            ..base("legal-aid", "Orange County Legal Aid", "Orange", "92868", now)
        },
        Resource {
            description: Some("Walk-in medical clinic.".to_string()),
            categories: vec![Category::Health],
            latitude: Some(33.8000),
            longitude: Some(-117.8600),
            last_verified_at: Some(now - Duration::days(30)),
            ..base("health-clinic", "Orange Health Clinic", "Orange", "92866", now)
        },
        Resource {
            description: Some("After-school tutoring.".to_string()),
            categories: vec![Category::Education],
            verified: false,
            ..base("tutoring", "Orange Tutoring Co-op", "Orange", "92868", now)
        },
    ]
}

/// Availability override for `demo-1`: open, confirmed one hour ago by a partner.
pub fn availability(now: DateTime<Utc>) -> Vec<AvailabilityRow> {
    vec![AvailabilityRow {
        resource_id: "demo-1".to_string(),
        availability_status: Some(AvailabilityStatus::Open),
        last_confirmed_at: Some(now - Duration::hours(1)),
        confirmation_source: Some("partner_call".to_string()),
        confidence_score: Some(0.9),
    }]
}
