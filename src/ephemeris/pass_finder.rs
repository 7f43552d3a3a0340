use chrono::{DateTime, Duration, Utc};

use crate::ephemeris::error::EphemerisError;
use crate::ephemeris::types::{EventKind, PassEvent};

const COARSE_STEP_SECONDS: i64 = 60; // 1 minute for initial scan
const FINE_STEP_SECONDS: i64 = 1; // 1 second for refinement

/// Find all rise/culminate/set events at `min_elevation_deg` within a time
/// range, in chronological order.
///
/// `sample` returns the satellite's elevation in degrees as seen from the
/// observer at a given instant. A pass already in progress at `start`
/// produces no rise event; a pass still in progress at `end` produces only
/// its rise event.
pub fn find_events<F>(
    sample: F,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    min_elevation_deg: f64,
) -> Result<Vec<PassEvent>, EphemerisError>
where
    F: Fn(DateTime<Utc>) -> Result<f64, EphemerisError>,
{
    let mut events = Vec::new();
    let coarse_step = Duration::seconds(COARSE_STEP_SECONDS);

    let first = sample(start)?;
    let mut prev_above = first >= min_elevation_deg;
    let mut in_pass = prev_above;
    let mut max_el = if in_pass { first } else { 0.0 };
    let mut max_el_time = start;

    let mut cursor = start + coarse_step;
    while cursor <= end {
        let elevation = sample(cursor)?;
        let above = elevation >= min_elevation_deg;

        if above && !prev_above {
            let rise = refine_crossing(&sample, cursor - coarse_step, cursor, min_elevation_deg)?;
            events.push(PassEvent {
                kind: EventKind::Rise,
                time: rise,
            });
            in_pass = true;
            max_el = elevation;
            max_el_time = cursor;
        } else if above && in_pass && elevation > max_el {
            max_el = elevation;
            max_el_time = cursor;
        } else if !above && prev_above && in_pass {
            let set = refine_crossing(&sample, cursor - coarse_step, cursor, min_elevation_deg)?;
            events.push(PassEvent {
                kind: EventKind::Culminate,
                time: max_el_time,
            });
            events.push(PassEvent {
                kind: EventKind::Set,
                time: set,
            });
            in_pass = false;
            max_el = 0.0;
        }

        prev_above = above;
        cursor += coarse_step;
    }

    Ok(events)
}

/// Binary search to find the exact threshold crossing time.
fn refine_crossing<F>(
    sample: &F,
    before: DateTime<Utc>,
    after: DateTime<Utc>,
    min_elevation_deg: f64,
) -> Result<DateTime<Utc>, EphemerisError>
where
    F: Fn(DateTime<Utc>) -> Result<f64, EphemerisError>,
{
    let rising = sample(before)? < min_elevation_deg;
    let mut low = before;
    let mut high = after;

    while (high - low).num_seconds() > FINE_STEP_SECONDS {
        let mid = low + (high - low) / 2;
        let above = sample(mid)? >= min_elevation_deg;
        if above == rising {
            high = mid;
        } else {
            low = mid;
        }
    }

    Ok(high)
}
