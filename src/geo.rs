//! Great-circle distance from the LaGuardia reference point
//!
//! Distances are nautical miles, computed with the haversine formula and
//! the 3440.065 NM Earth radius used by the published procedures.

/// Earth radius in nautical miles
pub const EARTH_RADIUS_NM: f64 = 3440.065;

/// KLGA field reference point (latitude, longitude)
pub const KLGA: (f64, f64) = (40.7772, -73.8726);

/// Haversine great-circle distance in nautical miles.
#[must_use]
pub fn distance_nm(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let phi1 = lat1.to_radians();
    let phi2 = lat2.to_radians();
    let d_phi = (lat2 - lat1).to_radians();
    let d_lambda = (lon2 - lon1).to_radians();

    let a = (d_phi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (d_lambda / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_NM * c
}

/// Distance from the KLGA reference point in nautical miles.
#[must_use]
pub fn distance_from_klga_nm(lat: f64, lon: f64) -> f64 {
    distance_nm(KLGA.0, KLGA.1, lat, lon)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_distance_at_reference() {
        assert!(distance_from_klga_nm(KLGA.0, KLGA.1) < 1e-9);
    }

    #[test]
    fn test_jfk_distance_plausible() {
        // KJFK is roughly 9.5 NM south-southeast of KLGA
        let d = distance_from_klga_nm(40.6413, -73.7781);
        assert!(d > 8.0 && d < 11.0, "got {d}");
    }

    #[test]
    fn test_symmetry() {
        let a = distance_nm(40.0, -74.0, 41.0, -73.0);
        let b = distance_nm(41.0, -73.0, 40.0, -74.0);
        assert!((a - b).abs() < 1e-9);
    }

    #[test]
    fn test_one_degree_latitude_is_sixty_nm() {
        // A degree of latitude is 60 NM by definition of the nautical mile
        let d = distance_nm(40.0, -73.0, 41.0, -73.0);
        assert!((d - 60.0).abs() < 0.1, "got {d}");
    }
}
