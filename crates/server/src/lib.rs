pub mod config;
pub mod error;
pub mod routes;
pub mod state;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use state::AppState;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Research Agent API",
        version = "0.1.0",
        description = "Streams research-run state as AG-UI style snapshot/delta events"
    ),
    paths(routes::health_check, routes::run::start_run),
    components(schemas(
        routes::HealthResponse,
        routes::run::RunAgentInput,
        routes::run::InputMessage,
    )),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "runs", description = "Research run execution and event streaming"),
    )
)]
pub struct ApiDoc;

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api/openapi.json", ApiDoc::openapi()))
        .route("/health", get(routes::health_check))
        .route("/", post(routes::run::start_run))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
