use std::collections::HashMap;
use std::time::Duration;

use sgp4::{Constants, Elements};

use crate::ephemeris::error::EphemerisError;
use crate::ephemeris::model::Sgp4Model;
use crate::web::config::SatelliteConfig;

/// Fetch the elements feed and resolve the tracked satellite by name.
///
/// Any failure here is fatal: the process must not serve traffic without
/// a resolved element set.
pub async fn load_tracked_satellite(config: &SatelliteConfig) -> Result<Sgp4Model, EphemerisError> {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.fetch_timeout_s))
        .build()?;

    log::info!("Fetching elements feed from {}", config.elements_url);
    let response = client.get(&config.elements_url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(EphemerisError::FeedStatus(status.as_u16()));
    }
    let body = response.text().await?;

    let mut satellites = index_by_name(&body)?;
    log::info!("Elements feed contained {} satellites", satellites.len());

    let elements = satellites
        .remove(&config.name)
        .ok_or_else(|| EphemerisError::SatelliteNotFound(config.name.clone()))?;
    let constants = Constants::from_elements(&elements).map_err(|e| EphemerisError::InvalidTle {
        name: config.name.clone(),
        message: e.to_string(),
    })?;

    Ok(Sgp4Model::new(config.name.clone(), elements, constants))
}

/// Parse a multi-satellite TLE feed and index it by name. Unnamed 2-line
/// entries fall back to "NORAD <id>"; duplicate names are last-one-wins.
fn index_by_name(content: &str) -> Result<HashMap<String, Elements>, EphemerisError> {
    let mut satellites = HashMap::new();

    for (name, line1, line2) in parse_multi_tle(content) {
        let elements = Elements::from_tle(name.clone(), line1.as_bytes(), line2.as_bytes())
            .map_err(|e| EphemerisError::InvalidTle {
                name: name.clone().unwrap_or_else(|| line1.clone()),
                message: e.to_string(),
            })?;

        let sat_name = name.unwrap_or_else(|| format!("NORAD {}", elements.norad_id));
        satellites.insert(sat_name, elements);
    }

    Ok(satellites)
}

/// Split multi-satellite TLE content into (name, line1, line2) entries.
fn parse_multi_tle(content: &str) -> Vec<(Option<String>, String, String)> {
    let lines: Vec<&str> = content
        .lines()
        .map(|l| l.trim())
        .filter(|l| !l.is_empty())
        .collect();

    let mut result = Vec::new();
    let mut i = 0;

    while i < lines.len() {
        // Check if current line is line1 (starts with "1 ")
        if lines[i].starts_with("1 ") && i + 1 < lines.len() && lines[i + 1].starts_with("2 ") {
            // 2-line TLE (no name)
            result.push((None, lines[i].to_string(), lines[i + 1].to_string()));
            i += 2;
        } else if i + 2 < lines.len()
            && lines[i + 1].starts_with("1 ")
            && lines[i + 2].starts_with("2 ")
        {
            // 3-line TLE (with name)
            result.push((
                Some(lines[i].to_string()),
                lines[i + 1].to_string(),
                lines[i + 2].to_string(),
            ));
            i += 3;
        } else {
            i += 1; // Skip unknown line
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    const ISS_NAME: &str = "ISS (ZARYA)";
    const ISS_LINE1: &str =
        "1 25544U 98067A   20045.18587073  .00000950  00000-0  25302-4 0  9990";
    const ISS_LINE2: &str =
        "2 25544  51.6443 242.0161 0004885 264.6060 207.3845 15.49165514212791";

    #[test]
    fn parses_named_three_line_entry() {
        let content = format!("{ISS_NAME}\n{ISS_LINE1}\n{ISS_LINE2}\n");
        let entries = parse_multi_tle(&content);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].0.as_deref(), Some(ISS_NAME));
        assert_eq!(entries[0].1, ISS_LINE1);
        assert_eq!(entries[0].2, ISS_LINE2);
    }

    #[test]
    fn parses_unnamed_two_line_entry() {
        let content = format!("{ISS_LINE1}\n{ISS_LINE2}\n");
        let entries = parse_multi_tle(&content);
        assert_eq!(entries.len(), 1);
        assert!(entries[0].0.is_none());
    }

    #[test]
    fn skips_junk_lines_between_entries() {
        let content = format!("# comment\n\n{ISS_NAME}\n{ISS_LINE1}\n{ISS_LINE2}\ntrailing noise\n");
        let entries = parse_multi_tle(&content);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].0.as_deref(), Some(ISS_NAME));
    }

    #[test]
    fn index_resolves_by_name() {
        let content = format!("{ISS_NAME}\n{ISS_LINE1}\n{ISS_LINE2}\n");
        let satellites = index_by_name(&content).unwrap();
        let elements = satellites.get(ISS_NAME).unwrap();
        assert_eq!(elements.norad_id, 25544);
    }

    #[test]
    fn duplicate_names_are_last_one_wins() {
        let content = format!(
            "{ISS_NAME}\n{ISS_LINE1}\n{ISS_LINE2}\n{ISS_NAME}\n{ISS_LINE1}\n{ISS_LINE2}\n"
        );
        let satellites = index_by_name(&content).unwrap();
        assert_eq!(satellites.len(), 1);
    }

    #[test]
    fn invalid_tle_is_an_error() {
        let content = format!("{ISS_NAME}\n1 garbage\n2 garbage\n");
        assert!(index_by_name(&content).is_err());
    }
}
