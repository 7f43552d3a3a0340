use thiserror::Error;

#[derive(Debug, Error)]
pub enum CrewError {
    #[error("crew roster request failed: {0}")]
    Fetch(#[from] reqwest::Error),
    #[error("crew roster returned HTTP {0}")]
    UpstreamStatus(u16),
}
