use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::crew::CrewError;
use crate::ephemeris::EphemerisError;

pub enum ApiError {
    Propagation(String),
    CrewUnavailable,
}

impl From<EphemerisError> for ApiError {
    fn from(e: EphemerisError) -> Self {
        ApiError::Propagation(e.to_string())
    }
}

impl From<CrewError> for ApiError {
    fn from(e: CrewError) -> Self {
        log::warn!("Crew roster refresh failed: {}", e);
        ApiError::CrewUnavailable
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Propagation(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::with_message("propagation_failed", &msg)),
            )
                .into_response(),
            ApiError::CrewUnavailable => (
                StatusCode::BAD_GATEWAY,
                Json(ErrorResponse::with_message(
                    "crew_unreachable",
                    "Crew service unreachable",
                )),
            )
                .into_response(),
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ErrorResponse {
    pub fn with_message(error: &str, message: &str) -> Self {
        ErrorResponse {
            error: error.to_string(),
            message: Some(message.to_string()),
        }
    }
}
