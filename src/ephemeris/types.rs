use chrono::{DateTime, Utc};

/// Point on the ground directly beneath the satellite.
#[derive(Debug, Clone, Copy)]
pub struct SubPoint {
    pub latitude_deg: f64,
    pub longitude_deg: f64,
    pub elevation_km: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Rise,
    Culminate,
    Set,
}

/// A single rise/culminate/set event at the elevation threshold.
#[derive(Debug, Clone, Copy)]
pub struct PassEvent {
    pub kind: EventKind,
    pub time: DateTime<Utc>,
}
