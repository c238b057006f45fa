use chrono::{TimeZone, Utc};
use hearth_types::{
    AvailabilityStatus, CacheNamespace, Category, FreshnessState, HearthError, RateLimitWindow,
    Resource, ResourceCard, VerificationBadge,
};

fn resource() -> Resource {
    let ts = Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap();
    Resource {
        id: "r-1".into(),
        name: "Eastside Pantry".into(),
        description: None,
        categories: vec![Category::Food],
        eligibility: None,
        address: None,
        city: Some("Brooklyn".into()),
        state: "NY".into(),
        zip: None,
        latitude: Some(40.7),
        longitude: Some(-73.9),
        phone: None,
        website: None,
        application_guide: None,
        verified: true,
        source: None,
        source_id: None,
        organization_name: None,
        organization_id: None,
        email: None,
        languages: vec![],
        interpretation_services: vec![],
        accessibility: vec![],
        fees: None,
        schedule: None,
        service_area: None,
        last_verified_at: Some(ts),
        data_source_url: None,
        created_at: ts,
        updated_at: ts,
    }
}

#[test]
fn card_serializes_as_flat_object() {
    let card = ResourceCard {
        resource: resource(),
        availability_status: AvailabilityStatus::Open,
        last_confirmed_at: None,
        confirmation_source: "local".into(),
        confidence_score: Some(0.95),
        verification_badge: VerificationBadge::VerifiedPartner,
        data_source_label: "Local partner directory".into(),
        freshness_state: FreshnessState::Fresh,
    };

    let v = serde_json::to_value(&card).expect("serialize card");
    assert_eq!(v["name"], "Eastside Pantry");
    assert_eq!(v["availability_status"], "open");
    assert_eq!(v["verification_badge"], "verified_partner");
    assert_eq!(v["categories"][0], "food");
    assert_eq!(v["last_verified_at"], "2025-03-01T12:00:00Z");

    let back: ResourceCard = serde_json::from_value(v).expect("deserialize card");
    assert_eq!(back, card);
}

#[test]
fn rate_limit_error_roundtrip() {
    let err = HearthError::RateLimitExceeded {
        connector: "nyc311".into(),
        limit: 100,
        window: RateLimitWindow::Minute,
    };
    assert_eq!(
        err.to_string(),
        "rate limit exceeded for nyc311: 100 requests per minute"
    );
    let json = serde_json::to_string(&err).expect("serialize error");
    let de: HearthError = serde_json::from_str(&json).expect("deserialize error");
    assert_eq!(de, err);
    assert!(de.is_degradable());
    assert!(!HearthError::store_query("Database query failed").is_degradable());
}

#[test]
fn namespaces_parse_from_prefix() {
    for ns in CacheNamespace::ALL {
        assert_eq!(ns.prefix().parse::<CacheNamespace>().unwrap(), ns);
    }
    assert!("everything".parse::<CacheNamespace>().is_err());
}
