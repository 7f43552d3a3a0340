use thiserror::Error;

#[derive(Debug, Error)]
pub enum EphemerisError {
    #[error("elements feed request failed: {0}")]
    Fetch(#[from] reqwest::Error),
    #[error("elements feed returned HTTP {0}")]
    FeedStatus(u16),
    #[error("invalid TLE for {name}: {message}")]
    InvalidTle { name: String, message: String },
    #[error("satellite {0:?} not found in elements feed")]
    SatelliteNotFound(String),
    #[error("propagation error: {0}")]
    Propagation(String),
}
