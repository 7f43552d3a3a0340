//! Frame conversions: TEME -> ECEF -> geodetic / topocentric.

// WGS-84 semi-major axis and first eccentricity squared
const WGS84_A_KM: f64 = 6378.137;
const WGS84_E2: f64 = 0.00669437999014;

pub fn teme_to_ecef_position(pos_teme: [f64; 3], gmst: f64) -> [f64; 3] {
    let cos_gmst = gmst.cos();
    let sin_gmst = gmst.sin();
    [
        pos_teme[0] * cos_gmst + pos_teme[1] * sin_gmst,
        -pos_teme[0] * sin_gmst + pos_teme[1] * cos_gmst,
        pos_teme[2],
    ]
}

/// Convert an ECEF position to geodetic latitude, longitude and height
/// above the WGS-84 ellipsoid. Iterative; converges in a handful of
/// rounds for anything in low Earth orbit.
pub fn ecef_to_geodetic(ecef: [f64; 3]) -> (f64, f64, f64) {
    let [x, y, z] = ecef;
    let lon = y.atan2(x);
    let p = (x * x + y * y).sqrt();

    // Directly over a pole the iteration below would divide by zero.
    if p < 1e-9 {
        let b = WGS84_A_KM * (1.0 - WGS84_E2).sqrt();
        return (90.0_f64.copysign(z), 0.0, z.abs() - b);
    }

    let mut lat = (z / (p * (1.0 - WGS84_E2))).atan();
    for _ in 0..5 {
        let sin_lat = lat.sin();
        let n = WGS84_A_KM / (1.0 - WGS84_E2 * sin_lat * sin_lat).sqrt();
        lat = ((z + WGS84_E2 * n * sin_lat) / p).atan();
    }

    let sin_lat = lat.sin();
    let n = WGS84_A_KM / (1.0 - WGS84_E2 * sin_lat * sin_lat).sqrt();
    let height_km = p / lat.cos() - n;

    (lat.to_degrees(), lon.to_degrees(), height_km)
}

pub fn ecef_to_enu(dr: [f64; 3], lat_rad: f64, lon_rad: f64) -> (f64, f64, f64) {
    let sin_lat = lat_rad.sin();
    let cos_lat = lat_rad.cos();
    let sin_lon = lon_rad.sin();
    let cos_lon = lon_rad.cos();

    let east = -sin_lon * dr[0] + cos_lon * dr[1];
    let north = -sin_lat * cos_lon * dr[0] - sin_lat * sin_lon * dr[1] + cos_lat * dr[2];
    let up = cos_lat * cos_lon * dr[0] + cos_lat * sin_lon * dr[1] + sin_lat * dr[2];
    (east, north, up)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ephemeris::Observer;

    #[test]
    fn teme_to_ecef_rotates_about_z() {
        let teme = [1000.0, 0.0, 500.0];

        let ecef = teme_to_ecef_position(teme, 0.0);
        assert!((ecef[0] - 1000.0).abs() < 1e-9);
        assert!(ecef[1].abs() < 1e-9);
        assert!((ecef[2] - 500.0).abs() < 1e-9);

        let ecef_90 = teme_to_ecef_position(teme, std::f64::consts::FRAC_PI_2);
        assert!(ecef_90[0].abs() < 1e-9);
        assert!((ecef_90[1] + 1000.0).abs() < 1e-9);
        assert!((ecef_90[2] - 500.0).abs() < 1e-9);
    }

    #[test]
    fn geodetic_recovers_known_surface_point() {
        // 400 km above the equator on the prime meridian
        let ecef = [WGS84_A_KM + 400.0, 0.0, 0.0];
        let (lat, lon, height) = ecef_to_geodetic(ecef);
        assert!(lat.abs() < 1e-9);
        assert!(lon.abs() < 1e-9);
        assert!((height - 400.0).abs() < 1e-6);
    }

    #[test]
    fn geodetic_inverts_observer_position() {
        let observer = Observer::new(47.3769, 8.5417, 408.0);
        let (lat, lon, height) = ecef_to_geodetic(observer.position_ecef_km());
        assert!((lat - 47.3769).abs() < 1e-6);
        assert!((lon - 8.5417).abs() < 1e-6);
        assert!((height - 0.408).abs() < 1e-4);
    }

    #[test]
    fn geodetic_is_finite_over_the_poles() {
        let b = WGS84_A_KM * (1.0 - WGS84_E2).sqrt();

        let (lat, lon, height) = ecef_to_geodetic([0.0, 0.0, b + 500.0]);
        assert!((lat - 90.0).abs() < 1e-9);
        assert!(lon.abs() < 1e-9);
        assert!((height - 500.0).abs() < 1e-6);

        let (lat_s, _, height_s) = ecef_to_geodetic([0.0, 0.0, -(b + 500.0)]);
        assert!((lat_s + 90.0).abs() < 1e-9);
        assert!(height_s.is_finite());
    }

    #[test]
    fn enu_up_for_satellite_overhead() {
        let observer = Observer::new(0.0, 0.0, 0.0);
        let obs_ecef = observer.position_ecef_km();
        let sat_ecef = [obs_ecef[0] + 400.0, 0.0, 0.0];
        let dr = [
            sat_ecef[0] - obs_ecef[0],
            sat_ecef[1] - obs_ecef[1],
            sat_ecef[2] - obs_ecef[2],
        ];
        let (east, north, up) = ecef_to_enu(dr, observer.lat_rad(), observer.lon_rad());
        assert!(east.abs() < 1e-9);
        assert!(north.abs() < 1e-9);
        assert!((up - 400.0).abs() < 1e-9);
    }
}
