use utoipa::OpenApi;

use crate::crew::{CrewMember, CrewPayload};

use super::api::error::ErrorResponse;
use super::api::iss::{
    IssNowResponse, IssPathResponse, LocationRequest, PathPoint, PredictPassResponse,
    StatusResponse,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        super::api::iss::home,
        super::api::iss::iss_now,
        super::api::iss::iss_path,
        super::api::iss::predict_pass,
        super::api::crew::get_crew,
    ),
    components(
        schemas(
            StatusResponse,
            IssNowResponse,
            IssPathResponse,
            PathPoint,
            LocationRequest,
            PredictPassResponse,
            CrewPayload,
            CrewMember,
            ErrorResponse,
        )
    ),
    info(
        title = "Space Backend API",
        description = "ISS position, path, pass prediction and crew roster",
        version = "0.1.0"
    ),
    tags(
        (name = "iss", description = "Position, path and pass prediction"),
        (name = "crew", description = "Crew roster")
    )
)]
pub struct ApiDoc;
