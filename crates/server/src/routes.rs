use axum::{
    middleware,
    routing::{get, post},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{TraceLayer, DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, DefaultOnFailure},
};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use common::types::Health;

use crate::errors::ApiError;
use crate::openapi::ApiDoc;

pub mod auth;
pub mod tratamientos;

use auth::ServerState;

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "OK", body = crate::openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

async fn not_found() -> ApiError {
    ApiError::NotFound
}

/// Build the full application router: public user/health/docs routes and the
/// token-protected treatment routes.
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    // Public routes
    let public = Router::new()
        .route("/health", get(health))
        .route("/api/user/create/", post(auth::register))
        .route("/api/user/token/", post(auth::token))
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    // Protected API routes
    let api = Router::new()
        .route("/api/user/me/", get(auth::me))
        .route("/api/tratamientos/", get(tratamientos::list).post(tratamientos::create))
        .route(
            "/api/tratamientos/:id/",
            get(tratamientos::retrieve)
                .put(tratamientos::update)
                .patch(tratamientos::partial_update)
                .delete(tratamientos::destroy),
        )
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::require_auth));

    public
        .merge(api)
        .fallback(not_found)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_request(
                    DefaultOnRequest::new()
                        .level(Level::INFO),
                )
                // status code and latency
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_failure(
                    DefaultOnFailure::new()
                        .level(Level::ERROR),
                ),
        )
}
