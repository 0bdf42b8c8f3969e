//! Haversine great-circle distance.

/// Mean Earth radius in meters.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Great-circle distance in meters between two points given in degrees.
///
/// Uses the haversine formula on a sphere of radius [`EARTH_RADIUS_M`].
/// Inputs are not validated; a NaN coordinate yields NaN.
pub fn distance_meters(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let phi1 = lat1.to_radians();
    let phi2 = lat2.to_radians();
    let d_phi = (lat2 - lat1).to_radians();
    let d_lambda = (lon2 - lon1).to_radians();

    let a = (d_phi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (d_lambda / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_M * c
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_is_zero() {
        assert_eq!(distance_meters(1.2868, 103.8545, 1.2868, 103.8545), 0.0);
        assert_eq!(distance_meters(-45.0, -170.0, -45.0, -170.0), 0.0);
    }

    #[test]
    fn test_symmetry() {
        let pairs = [
            ((1.2868, 103.8545), (1.2834, 103.8607)),
            ((51.5074, -0.1278), (48.8566, 2.3522)),
            ((-33.8688, 151.2093), (35.6762, 139.6503)),
        ];
        for ((a_lat, a_lon), (b_lat, b_lon)) in pairs {
            let ab = distance_meters(a_lat, a_lon, b_lat, b_lon);
            let ba = distance_meters(b_lat, b_lon, a_lat, a_lon);
            assert!((ab - ba).abs() < 1e-6, "{ab} != {ba}");
        }
    }

    #[test]
    fn test_merlion_to_marina_bay_sands() {
        let d = distance_meters(1.2868, 103.8545, 1.2834, 103.8607);
        assert!(d > 400.0 && d < 1000.0, "Expected ~780m, got {d}m");
    }

    #[test]
    fn test_london_to_paris() {
        let d = distance_meters(51.5074, -0.1278, 48.8566, 2.3522);
        assert!((d - 343_500.0).abs() < 2_000.0, "Expected ~343km, got {d}m");
    }

    #[test]
    fn test_antipodes_is_half_circumference() {
        let d = distance_meters(0.0, 0.0, 0.0, 180.0);
        let half = std::f64::consts::PI * EARTH_RADIUS_M;
        assert!((d - half).abs() < 1.0);
    }

    #[test]
    fn test_nan_propagates() {
        assert!(distance_meters(f64::NAN, 0.0, 0.0, 0.0).is_nan());
    }
}
