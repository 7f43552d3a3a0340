use serde::Deserialize;
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub web: WebConfig,
    #[serde(default)]
    pub satellite: SatelliteConfig,
    #[serde(default)]
    pub crew: CrewConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WebConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

fn default_bind() -> String {
    "0.0.0.0:8080".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct SatelliteConfig {
    /// Name of the tracked satellite in the elements feed; startup is
    /// fatal if the feed does not contain it.
    #[serde(default = "default_satellite_name")]
    pub name: String,
    #[serde(default = "default_elements_url")]
    pub elements_url: String,
    #[serde(default = "default_elements_timeout")]
    pub fetch_timeout_s: u64,
}

impl Default for SatelliteConfig {
    fn default() -> Self {
        Self {
            name: default_satellite_name(),
            elements_url: default_elements_url(),
            fetch_timeout_s: default_elements_timeout(),
        }
    }
}

fn default_satellite_name() -> String {
    "ISS (ZARYA)".to_string()
}

fn default_elements_url() -> String {
    "https://celestrak.org/NORAD/elements/stations.txt".to_string()
}

fn default_elements_timeout() -> u64 {
    30
}

#[derive(Debug, Clone, Deserialize)]
pub struct CrewConfig {
    #[serde(default = "default_crew_url")]
    pub source_url: String,
    #[serde(default = "default_crew_ttl")]
    pub cache_ttl_minutes: i64,
    #[serde(default = "default_crew_timeout")]
    pub fetch_timeout_s: u64,
    #[serde(default = "default_photo")]
    pub default_photo: String,
    /// Astronaut name -> photo URL; names missing here fall back to
    /// `default_photo`.
    #[serde(default)]
    pub photos: HashMap<String, String>,
}

impl Default for CrewConfig {
    fn default() -> Self {
        Self {
            source_url: default_crew_url(),
            cache_ttl_minutes: default_crew_ttl(),
            fetch_timeout_s: default_crew_timeout(),
            default_photo: default_photo(),
            photos: HashMap::new(),
        }
    }
}

fn default_crew_url() -> String {
    "http://api.open-notify.org/astros.json".to_string()
}

fn default_crew_ttl() -> i64 {
    10
}

fn default_crew_timeout() -> u64 {
    10
}

fn default_photo() -> String {
    "https://www.nasa.gov/wp-content/uploads/2023/05/default-astronaut.jpg".to_string()
}

impl Config {
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&content)?;
        Ok(config)
    }
}
