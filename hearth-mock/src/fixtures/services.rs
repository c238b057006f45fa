use chrono::{DateTime, Duration, Utc};
use hearth_core::{ExternalService, PhoneType};

struct Row {
    id: &'static str,
    name: &'static str,
    description: &'static str,
    city: &'static str,
    zip: &'static str,
    coords: Option<(f64, f64)>,
    phone: &'static str,
    schedule: &'static str,
}

const ROWS: [Row; 6] = [
    Row {
        id: "1001",
        name: "Harlem Community Food Pantry",
        description: "Weekly groceries and hot meals for families.",
        city: "New York",
        zip: "10027",
        coords: Some((40.8116, -73.9465)),
        phone: "+12125550101",
        schedule: "Tue, Thu 10am-2pm",
    },
    Row {
        id: "1002",
        name: "Bronx Family Shelter Intake",
        description: "Emergency shelter placement for homeless families.",
        city: "Bronx",
        zip: "10451",
        coords: Some((40.8200, -73.9235)),
        phone: "+17185550102",
        schedule: "Open 24 hours",
    },
    Row {
        id: "1003",
        name: "Downtown Legal Aid Clinic",
        description: "",
        city: "New York",
        zip: "10007",
        coords: Some((40.7138, -74.0070)),
        phone: "+12125550103",
        schedule: "Mon-Fri 9am-5pm",
    },
    Row {
        id: "1004",
        name: "Brooklyn Job Training Center",
        description: "Career coaching, resume help and job training.",
        city: "Brooklyn",
        zip: "11201",
        coords: Some((40.6943, -73.9903)),
        phone: "+17185550104",
        schedule: "Mon-Sat 8am-6pm",
    },
    Row {
        id: "1005",
        name: "Queens Adult Literacy Program",
        description: "Free literacy classes for adults.",
        city: "Queens",
        zip: "11432",
        coords: None,
        phone: "+17185550105",
        schedule: "Evenings",
    },
    Row {
        id: "1006",
        name: "Washington Heights Counseling Services",
        description: "Mental health counseling; new clients join a waitlist.",
        city: "New York",
        zip: "10032",
        coords: Some((40.8417, -73.9394)),
        phone: "+12125550106",
        schedule: "Mon-Fri 10am-7pm",
    },
];

/// External records served by the mock connector, verified a day before `now`.
pub fn all(now: DateTime<Utc>) -> Vec<ExternalService> {
    ROWS.iter()
        .map(|r| ExternalService {
            source_id: r.id.to_string(),
            source: "mock".to_string(),
            name: r.name.to_string(),
            description: (!r.description.is_empty()).then(|| r.description.to_string()),
            organization_name: Some("NYC Mock Services".to_string()),
            address: None,
            city: Some(r.city.to_string()),
            state: Some("NY".to_string()),
            zip: Some(r.zip.to_string()),
            latitude: r.coords.map(|c| c.0),
            longitude: r.coords.map(|c| c.1),
            phone: Some(r.phone.to_string()),
            phone_type: Some(PhoneType::Voice),
            schedule: Some(r.schedule.to_string()),
            languages: vec!["English".to_string(), "Spanish".to_string()],
            last_verified_at: Some(now - Duration::days(1)),
            ..ExternalService::default()
        })
        .collect()
}
