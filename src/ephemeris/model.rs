use chrono::{DateTime, Utc};
use sgp4::{Constants, Elements};

use crate::ephemeris::error::EphemerisError;
use crate::ephemeris::geo::{ecef_to_enu, ecef_to_geodetic, teme_to_ecef_position};
use crate::ephemeris::observer::Observer;
use crate::ephemeris::pass_finder;
use crate::ephemeris::types::{PassEvent, SubPoint};

/// Mean Earth radius used to normalize reported altitudes.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Propagation seam for the web handlers. Implemented over SGP4 in
/// production; tests substitute deterministic doubles.
pub trait OrbitModel: Send + Sync {
    /// Ground position directly beneath the satellite at `at`.
    fn subpoint(&self, at: DateTime<Utc>) -> Result<SubPoint, EphemerisError>;

    /// Ordered rise/culminate/set events at `min_elevation_deg` as seen
    /// from `observer` within [start, end].
    fn find_events(
        &self,
        observer: &Observer,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        min_elevation_deg: f64,
    ) -> Result<Vec<PassEvent>, EphemerisError>;
}

pub struct Sgp4Model {
    name: String,
    elements: Elements,
    constants: Constants,
}

impl Sgp4Model {
    pub fn new(name: String, elements: Elements, constants: Constants) -> Self {
        Self {
            name,
            elements,
            constants,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn norad_id(&self) -> u64 {
        self.elements.norad_id
    }

    fn position_ecef_km(&self, at: DateTime<Utc>) -> Result<[f64; 3], EphemerisError> {
        let minutes = self
            .elements
            .datetime_to_minutes_since_epoch(&at.naive_utc())
            .map_err(|e| EphemerisError::Propagation(e.to_string()))?;

        let prediction = self
            .constants
            .propagate(minutes)
            .map_err(|e| EphemerisError::Propagation(e.to_string()))?;

        let sidereal =
            sgp4::iau_epoch_to_sidereal_time(sgp4::julian_years_since_j2000(&at.naive_utc()));

        Ok(teme_to_ecef_position(prediction.position, sidereal))
    }

    fn elevation_deg(&self, observer: &Observer, at: DateTime<Utc>) -> Result<f64, EphemerisError> {
        let sat_ecef = self.position_ecef_km(at)?;
        let obs_ecef = observer.position_ecef_km();

        let dr = [
            sat_ecef[0] - obs_ecef[0],
            sat_ecef[1] - obs_ecef[1],
            sat_ecef[2] - obs_ecef[2],
        ];
        let range_km = (dr[0] * dr[0] + dr[1] * dr[1] + dr[2] * dr[2]).sqrt();

        let (_, _, up) = ecef_to_enu(dr, observer.lat_rad(), observer.lon_rad());
        if range_km > 0.0 {
            Ok((up / range_km).asin().to_degrees())
        } else {
            Ok(0.0)
        }
    }
}

impl OrbitModel for Sgp4Model {
    fn subpoint(&self, at: DateTime<Utc>) -> Result<SubPoint, EphemerisError> {
        let ecef = self.position_ecef_km(at)?;
        let (latitude_deg, longitude_deg, elevation_km) = ecef_to_geodetic(ecef);
        Ok(SubPoint {
            latitude_deg,
            longitude_deg,
            elevation_km,
        })
    }

    fn find_events(
        &self,
        observer: &Observer,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        min_elevation_deg: f64,
    ) -> Result<Vec<PassEvent>, EphemerisError> {
        pass_finder::find_events(
            |at| self.elevation_deg(observer, at),
            start,
            end,
            min_elevation_deg,
        )
    }
}
