use axum::{extract::State, response::IntoResponse, Json};

use crate::crew::CrewPayload;
use crate::web::api::error::ApiResult;
use crate::web::server::AppState;

#[utoipa::path(
    get,
    path = "/crew",
    tag = "crew",
    responses(
        (status = 200, description = "Current crew roster with photos", body = CrewPayload),
        (status = 502, description = "Crew service unreachable")
    )
)]
pub async fn get_crew(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let payload = state.crew.get().await?;
    Ok(Json(payload))
}
