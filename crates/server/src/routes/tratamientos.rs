use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use serde_json::Value;
use tracing::info;

use service::tratamientos::Representation;

use crate::{errors::ApiError, routes::auth::ServerState};

#[utoipa::path(
    get, path = "/api/tratamientos/", tag = "tratamientos",
    responses(
        (status = 200, description = "Treatments, newest first", body = [crate::openapi::TratamientoSummaryDoc]),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer" = []))
)]
pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<Representation>>, ApiError> {
    let items = state.tratamientos.list().await?;
    info!(count = items.len(), "list tratamientos");
    Ok(Json(items))
}

#[utoipa::path(
    post, path = "/api/tratamientos/", tag = "tratamientos",
    request_body = crate::openapi::TratamientoInputDoc,
    responses(
        (status = 201, description = "Created", body = crate::openapi::TratamientoDetailDoc),
        (status = 400, description = "Validation Error"),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer" = []))
)]
pub async fn create(
    State(state): State<ServerState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<Representation>), ApiError> {
    let Json(payload) = payload?;
    let created = state.tratamientos.create(&payload).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    get, path = "/api/tratamientos/{id}/", tag = "tratamientos",
    params(("id" = i32, Path, description = "Treatment id")),
    responses(
        (status = 200, description = "OK", body = crate::openapi::TratamientoDetailDoc),
        (status = 404, description = "Not Found")
    ),
    security(("bearer" = []))
)]
pub async fn retrieve(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<Representation>, ApiError> {
    Ok(Json(state.tratamientos.retrieve(&id).await?))
}

#[utoipa::path(
    put, path = "/api/tratamientos/{id}/", tag = "tratamientos",
    params(("id" = i32, Path, description = "Treatment id")),
    request_body = crate::openapi::TratamientoInputDoc,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::TratamientoDetailDoc),
        (status = 400, description = "Validation Error"),
        (status = 404, description = "Not Found")
    ),
    security(("bearer" = []))
)]
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Representation>, ApiError> {
    let Json(payload) = payload?;
    Ok(Json(state.tratamientos.update(&id, &payload, false).await?))
}

#[utoipa::path(
    patch, path = "/api/tratamientos/{id}/", tag = "tratamientos",
    params(("id" = i32, Path, description = "Treatment id")),
    request_body = crate::openapi::TratamientoInputDoc,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::TratamientoDetailDoc),
        (status = 400, description = "Validation Error"),
        (status = 404, description = "Not Found")
    ),
    security(("bearer" = []))
)]
pub async fn partial_update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Representation>, ApiError> {
    let Json(payload) = payload?;
    Ok(Json(state.tratamientos.update(&id, &payload, true).await?))
}

#[utoipa::path(
    delete, path = "/api/tratamientos/{id}/", tag = "tratamientos",
    params(("id" = i32, Path, description = "Treatment id")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Not Found")
    ),
    security(("bearer" = []))
)]
pub async fn destroy(State(state): State<ServerState>, Path(id): Path<String>) -> Result<StatusCode, ApiError> {
    state.tratamientos.destroy(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
