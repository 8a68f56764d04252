use axum::{Json, extract::State, http::StatusCode};
use tracing::instrument;

use crate::middleware::auth::AuthUser;
use crate::modules::auth::model::{AuthResponse, LoginRequest, SignupRequest};
use crate::modules::auth::service::AuthService;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

/// Register a new account
#[utoipa::path(
    post,
    path = "/api/auth/signup",
    request_body = SignupRequest,
    responses(
        (status = 201, description = "Account created", body = AuthResponse),
        (status = 400, description = "Malformed request body"),
        (status = 409, description = "Email already registered"),
        (status = 422, description = "Validation failed")
    ),
    tag = "Auth"
)]
#[instrument(skip(state, request))]
pub async fn signup(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<SignupRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), AppError> {
    let response = AuthService::register(&state.db, &state.jwt_config, request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// Log in with email and password
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Logged in", body = AuthResponse),
        (status = 401, description = "Invalid credentials")
    ),
    tag = "Auth"
)]
#[instrument(skip(state, request))]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    let response = AuthService::login(&state.db, &state.jwt_config, request).await?;
    Ok(Json(response))
}

/// Exchange a valid token for a fresh one
#[utoipa::path(
    post,
    path = "/api/auth/refresh",
    responses(
        (status = 200, description = "Token refreshed", body = AuthResponse),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "Account no longer exists")
    ),
    security(("bearer_auth" = [])),
    tag = "Auth"
)]
#[instrument(skip(state, auth))]
pub async fn refresh(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<AuthResponse>, AppError> {
    let response = AuthService::refresh(&state.db, &state.jwt_config, auth.user_id()?).await?;
    Ok(Json(response))
}
