use axum::{routing::get, routing::post, Router};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::crew::CrewCache;
use crate::ephemeris::OrbitModel;

use super::api::crew as crew_handlers;
use super::api::iss as iss_handlers;
use super::api_doc::ApiDoc;
use super::config::Config;

#[derive(Clone)]
pub struct AppState {
    pub orbit: Arc<dyn OrbitModel>,
    pub crew: Arc<CrewCache>,
}

pub async fn run_server(
    config: Config,
    orbit: Arc<dyn OrbitModel>,
    crew: Arc<CrewCache>,
) -> std::io::Result<()> {
    let bind_addr = config.web.bind.clone();

    let state = AppState { orbit, crew };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .route("/", get(iss_handlers::home))
        .route("/iss-now", get(iss_handlers::iss_now))
        .route("/iss-path", get(iss_handlers::iss_path))
        .route("/predict-pass", post(iss_handlers::predict_pass))
        .route("/crew", get(crew_handlers::get_crew))
        // OpenAPI / Swagger
        .merge(SwaggerUi::new("/swagger-ui").url("/api-doc/openapi.json", ApiDoc::openapi()))
        // Middleware
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    log::info!("Starting server on {}", bind_addr);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    axum::serve(listener, app).await
}
