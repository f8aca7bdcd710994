use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Request, State},
    http::{header, StatusCode},
    middleware::Next,
    response::Response,
    Extension, Json,
};
use sea_orm::DatabaseConnection;
use serde::Serialize;
use tracing::{info, warn};

use service::auth::{
    domain::LoginInput,
    errors::AuthError,
    service::{AuthConfig, AuthService},
};
use service::tratamientos::{
    repo::seaorm::SeaOrmTratamientoRepository, repository::TratamientoRepository, TratamientoViewSet,
};
use service::users::{
    repo::seaorm::SeaOrmUserRepository, repository::UserRepository, RegisterInput, User, UserManager,
};

use crate::errors::ApiError;

/// Shared handles for every handler.
#[derive(Clone)]
pub struct ServerState {
    pub users: UserManager,
    pub auth: AuthService,
    pub tratamientos: TratamientoViewSet,
}

impl ServerState {
    pub fn new(
        users: Arc<dyn UserRepository>,
        tratamientos: Arc<dyn TratamientoRepository>,
        auth: AuthConfig,
    ) -> Self {
        let users = UserManager::new(users);
        Self {
            auth: AuthService::new(users.clone(), auth),
            users,
            tratamientos: TratamientoViewSet::new(tratamientos),
        }
    }

    /// State backed by the SeaORM repositories.
    pub fn from_db(db: DatabaseConnection, auth: AuthConfig) -> Self {
        Self::new(
            Arc::new(SeaOrmUserRepository { db: db.clone() }),
            Arc::new(SeaOrmTratamientoRepository { db }),
            auth,
        )
    }
}

#[derive(Debug, Serialize)]
pub struct UserOutput {
    pub id: i32,
    pub email: String,
    pub name: String,
}

impl From<User> for UserOutput {
    fn from(u: User) -> Self { Self { id: u.id, email: u.email, name: u.name } }
}

#[derive(Debug, Serialize)]
pub struct TokenOutput {
    pub token: String,
}

#[utoipa::path(
    post, path = "/api/user/create/", tag = "user",
    request_body = crate::openapi::RegisterRequest,
    responses(
        (status = 201, description = "Created", body = crate::openapi::UserDoc),
        (status = 400, description = "Validation Error")
    )
)]
pub async fn register(
    State(state): State<ServerState>,
    payload: Result<Json<RegisterInput>, JsonRejection>,
) -> Result<(StatusCode, Json<UserOutput>), ApiError> {
    let Json(input) = payload?;
    let user = state.users.register(&input).await?;
    info!(user_id = user.id, "user_registered");
    Ok((StatusCode::CREATED, Json(user.into())))
}

#[utoipa::path(
    post, path = "/api/user/token/", tag = "user",
    request_body = crate::openapi::TokenRequest,
    responses(
        (status = 200, description = "Token issued", body = crate::openapi::TokenDoc),
        (status = 400, description = "Invalid credentials")
    )
)]
pub async fn token(
    State(state): State<ServerState>,
    payload: Result<Json<LoginInput>, JsonRejection>,
) -> Result<Json<TokenOutput>, ApiError> {
    let Json(input) = payload?;
    let creds = input.validate()?;
    let session = state.auth.login(creds).await?;
    Ok(Json(TokenOutput { token: session.token }))
}

#[utoipa::path(
    get, path = "/api/user/me/", tag = "user",
    responses(
        (status = 200, description = "Authenticated user", body = crate::openapi::UserDoc),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer" = []))
)]
pub async fn me(Extension(user): Extension<User>) -> Json<UserOutput> {
    Json(user.into())
}

/// Pull the token out of `Authorization: Bearer <token>` (or `Token <token>`).
/// Other schemes count as no credentials at all.
fn token_from_header(value: &str) -> Result<&str, AuthError> {
    let mut parts = value.split_whitespace();
    let scheme = parts.next().unwrap_or_default();
    if !scheme.eq_ignore_ascii_case("bearer") && !scheme.eq_ignore_ascii_case("token") {
        return Err(AuthError::MissingCredentials);
    }
    match (parts.next(), parts.next()) {
        (Some(token), None) => Ok(token),
        _ => Err(AuthError::InvalidToken),
    }
}

/// Route layer guarding authenticated routes: resolves the bearer token to an
/// active user and stores it as a request extension.
pub async fn require_auth(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = match req.headers().get(header::AUTHORIZATION).and_then(|v| v.to_str().ok()) {
        Some(value) => token_from_header(value).map(str::to_owned),
        None => Err(AuthError::MissingCredentials),
    };
    let token = token.map_err(|e| {
        warn!(path = %req.uri().path(), reason = %e, "rejected unauthenticated request");
        e
    })?;

    let user = state.auth.authenticate(&token).await.map_err(|e| {
        warn!(path = %req.uri().path(), err = %e, "token authentication failed");
        e
    })?;
    req.extensions_mut().insert(user);
    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_parsing() {
        assert_eq!(token_from_header("Bearer abc").unwrap(), "abc");
        assert_eq!(token_from_header("token abc").unwrap(), "abc");
        assert!(matches!(token_from_header("Basic abc"), Err(AuthError::MissingCredentials)));
        assert!(matches!(token_from_header("Bearer"), Err(AuthError::InvalidToken)));
        assert!(matches!(token_from_header("Bearer a b"), Err(AuthError::InvalidToken)));
    }
}
