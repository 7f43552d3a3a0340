use axum::{extract::State, response::IntoResponse, Json};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::ephemeris::{EphemerisError, EventKind, Observer, OrbitModel, EARTH_RADIUS_KM};
use crate::timefmt::iso_utc_seconds;
use crate::web::api::error::ApiResult;
use crate::web::server::AppState;

const PATH_DURATION_MIN: i64 = 90;
const PATH_STEP_MIN: i64 = 2;
const PASS_LOOKAHEAD_HOURS: i64 = 48;
const MIN_PASS_ELEVATION_DEG: f64 = 10.0;
const MAX_REPORTED_PASSES: usize = 3;

#[derive(Debug, Serialize, ToSchema)]
pub struct StatusResponse {
    pub status: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct IssNowResponse {
    pub lat: f64,
    pub lng: f64,
    /// Elevation over the mean Earth radius, as a unitless ratio.
    pub alt: f64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PathPoint {
    pub lat: f64,
    pub lng: f64,
    pub alt: f64,
    pub timestamp: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct IssPathResponse {
    pub points: Vec<PathPoint>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct LocationRequest {
    pub lat: f64,
    pub lng: f64,
}

/// Success shape differs by result: a list of rise times when passes were
/// found, a bare message otherwise.
#[derive(Debug, Serialize, ToSchema)]
#[serde(untagged)]
pub enum PredictPassResponse {
    Passes { passes: Vec<String> },
    NoPasses { message: String },
}

#[utoipa::path(
    get,
    path = "/",
    tag = "iss",
    responses(
        (status = 200, description = "Liveness check", body = StatusResponse)
    )
)]
pub async fn home() -> impl IntoResponse {
    Json(StatusResponse {
        status: "Space Backend Running".to_string(),
    })
}

#[utoipa::path(
    get,
    path = "/iss-now",
    tag = "iss",
    responses(
        (status = 200, description = "Current ISS ground position", body = IssNowResponse),
        (status = 500, description = "Propagation failed")
    )
)]
pub async fn iss_now(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let sub = state.orbit.subpoint(Utc::now())?;
    Ok(Json(IssNowResponse {
        lat: sub.latitude_deg,
        lng: sub.longitude_deg,
        alt: sub.elevation_km / EARTH_RADIUS_KM,
    }))
}

#[utoipa::path(
    get,
    path = "/iss-path",
    tag = "iss",
    responses(
        (status = 200, description = "Ground track over the next 90 minutes", body = IssPathResponse),
        (status = 500, description = "Propagation failed")
    )
)]
pub async fn iss_path(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let points = sample_path(state.orbit.as_ref(), Utc::now())?;
    Ok(Json(IssPathResponse { points }))
}

#[utoipa::path(
    post,
    path = "/predict-pass",
    tag = "iss",
    request_body = LocationRequest,
    responses(
        (status = 200, description = "Up to three upcoming rise times, or a message when none", body = PredictPassResponse),
        (status = 500, description = "Propagation failed")
    )
)]
pub async fn predict_pass(
    State(state): State<AppState>,
    Json(location): Json<LocationRequest>,
) -> ApiResult<impl IntoResponse> {
    let observer = Observer::new(location.lat, location.lng, 0.0);
    let now = Utc::now();
    let events = state.orbit.find_events(
        &observer,
        now,
        now + Duration::hours(PASS_LOOKAHEAD_HOURS),
        MIN_PASS_ELEVATION_DEG,
    )?;

    let passes: Vec<String> = events
        .iter()
        .filter(|e| e.kind == EventKind::Rise)
        .take(MAX_REPORTED_PASSES)
        .map(|e| format_pass_time(e.time))
        .collect();

    if passes.is_empty() {
        Ok(Json(PredictPassResponse::NoPasses {
            message: "No visible passes in the next 48 hours".to_string(),
        }))
    } else {
        Ok(Json(PredictPassResponse::Passes { passes }))
    }
}

/// Sample the ground track at 2-minute steps from t=0 to t=90 minutes
/// inclusive (46 points).
fn sample_path(model: &dyn OrbitModel, now: DateTime<Utc>) -> Result<Vec<PathPoint>, EphemerisError> {
    let mut points = Vec::new();
    let mut minute = 0;
    while minute <= PATH_DURATION_MIN {
        let at = now + Duration::minutes(minute);
        let sub = model.subpoint(at)?;
        points.push(PathPoint {
            lat: sub.latitude_deg,
            lng: sub.longitude_deg,
            alt: sub.elevation_km / EARTH_RADIUS_KM,
            timestamp: iso_utc_seconds(at),
        });
        minute += PATH_STEP_MIN;
    }
    Ok(points)
}

fn format_pass_time(at: DateTime<Utc>) -> String {
    at.format("%d-%m-%Y %H:%M UTC").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ephemeris::{PassEvent, SubPoint};
    use chrono::TimeZone;

    struct FixedModel;

    impl OrbitModel for FixedModel {
        fn subpoint(&self, _at: DateTime<Utc>) -> Result<SubPoint, EphemerisError> {
            Ok(SubPoint {
                latitude_deg: 12.5,
                longitude_deg: -45.0,
                elevation_km: 420.0,
            })
        }

        fn find_events(
            &self,
            _observer: &Observer,
            start: DateTime<Utc>,
            _end: DateTime<Utc>,
            _min_elevation_deg: f64,
        ) -> Result<Vec<PassEvent>, EphemerisError> {
            let pass = |offset_h: i64| {
                [
                    PassEvent {
                        kind: EventKind::Rise,
                        time: start + Duration::hours(offset_h),
                    },
                    PassEvent {
                        kind: EventKind::Culminate,
                        time: start + Duration::hours(offset_h) + Duration::minutes(4),
                    },
                    PassEvent {
                        kind: EventKind::Set,
                        time: start + Duration::hours(offset_h) + Duration::minutes(8),
                    },
                ]
            };
            Ok([pass(2), pass(8), pass(15), pass(23)].concat())
        }
    }

    #[test]
    fn path_has_46_points_spaced_two_minutes() {
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 8, 0, 0).unwrap();
        let points = sample_path(&FixedModel, now).unwrap();

        assert_eq!(points.len(), 46);
        assert_eq!(points[0].timestamp, "2024-06-01T08:00:00Z");
        assert_eq!(points[1].timestamp, "2024-06-01T08:02:00Z");
        assert_eq!(points[45].timestamp, "2024-06-01T09:30:00Z");
    }

    #[test]
    fn path_altitude_is_normalized_by_earth_radius() {
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 8, 0, 0).unwrap();
        let points = sample_path(&FixedModel, now).unwrap();
        assert!((points[0].alt - 420.0 / EARTH_RADIUS_KM).abs() < 1e-12);
    }

    #[test]
    fn rises_are_capped_at_three_in_order() {
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 8, 0, 0).unwrap();
        let observer = Observer::new(0.0, 0.0, 0.0);
        let events = FixedModel
            .find_events(&observer, now, now + Duration::hours(48), 10.0)
            .unwrap();

        let passes: Vec<String> = events
            .iter()
            .filter(|e| e.kind == EventKind::Rise)
            .take(MAX_REPORTED_PASSES)
            .map(|e| format_pass_time(e.time))
            .collect();

        assert_eq!(
            passes,
            vec![
                "01-06-2024 10:00 UTC",
                "01-06-2024 16:00 UTC",
                "01-06-2024 23:00 UTC",
            ]
        );
    }

    #[test]
    fn response_shapes_differ_by_result() {
        let with_passes = serde_json::to_value(PredictPassResponse::Passes {
            passes: vec!["01-06-2024 10:00 UTC".to_string()],
        })
        .unwrap();
        assert!(with_passes.get("passes").is_some());
        assert!(with_passes.get("message").is_none());

        let without = serde_json::to_value(PredictPassResponse::NoPasses {
            message: "No visible passes in the next 48 hours".to_string(),
        })
        .unwrap();
        assert!(without.get("message").is_some());
        assert!(without.get("passes").is_none());
    }
}
