//! Great-circle distance.

/// Mean earth radius in miles.
pub const EARTH_RADIUS_MILES: f64 = 3959.0;

/// Haversine distance in miles between two points given in decimal degrees.
#[must_use]
pub fn haversine_miles(lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lng = (lng2 - lng1).to_radians();
    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lng / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_MILES * c
}

/// Display form of a distance: "Nearby" under a tenth of a mile, else one decimal.
#[must_use]
pub fn format_distance(miles: f64) -> String {
    if miles < 0.1 {
        "Nearby".to_string()
    } else {
        format!("{miles:.1} mi")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_distance_for_same_point() {
        assert!(haversine_miles(40.7, -74.0, 40.7, -74.0).abs() < 1e-9);
    }

    #[test]
    fn manhattan_to_brooklyn_is_a_few_miles() {
        // Times Square to Barclays Center
        let d = haversine_miles(40.758, -73.9855, 40.6826, -73.9754);
        assert!((5.0..5.5).contains(&d), "got {d}");
    }

    #[test]
    fn formats_short_distances_as_nearby() {
        assert_eq!(format_distance(0.05), "Nearby");
        assert_eq!(format_distance(2.345), "2.3 mi");
    }
}
