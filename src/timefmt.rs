use chrono::{DateTime, Utc};

/// ISO-8601 UTC timestamp truncated to whole seconds, with a trailing "Z".
pub fn iso_utc_seconds(at: DateTime<Utc>) -> String {
    at.format("%Y-%m-%dT%H:%M:%SZ").to_string()
}
