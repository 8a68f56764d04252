use axum::{
    Json,
    extract::{Path, Request, State},
    http::StatusCode,
};
use tracing::instrument;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::middleware::auth::AuthUser;
use crate::modules::faculty::model::{
    CreateFacultyDto, CreateFacultyResponse, FacultyProfile, FacultyWithProfile,
    UpdateFacultyProfileDto,
};
use crate::modules::faculty::service::FacultyService;
use crate::modules::users::model::{UpdateStatusDto, User};
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::uploads::parse_profile_update;
use crate::validator::ValidatedJson;

#[derive(serde::Serialize, ToSchema)]
pub struct FacultyProfileResponse {
    pub profile: FacultyProfile,
}

#[derive(serde::Serialize, ToSchema)]
pub struct FacultyListResponse {
    pub faculty: Vec<FacultyWithProfile>,
}

/// Provision a faculty account
#[utoipa::path(
    post,
    path = "/api/admin/faculty",
    request_body = CreateFacultyDto,
    responses(
        (status = 201, description = "Faculty account created", body = CreateFacultyResponse),
        (status = 409, description = "Email already registered"),
        (status = 403, description = "Forbidden - admin only")
    ),
    security(("bearer_auth" = [])),
    tag = "Faculty"
)]
#[instrument(skip(state, dto))]
pub async fn create_faculty(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateFacultyDto>,
) -> Result<(StatusCode, Json<CreateFacultyResponse>), AppError> {
    let response = FacultyService::create_faculty(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// List all faculty
#[utoipa::path(
    get,
    path = "/api/admin/faculty",
    responses(
        (status = 200, description = "Faculty with profiles", body = FacultyListResponse),
        (status = 403, description = "Forbidden - admin only")
    ),
    security(("bearer_auth" = [])),
    tag = "Faculty"
)]
#[instrument(skip(state))]
pub async fn list_faculty(
    State(state): State<AppState>,
) -> Result<Json<FacultyListResponse>, AppError> {
    let faculty = FacultyService::list_faculty(&state.db).await?;
    Ok(Json(FacultyListResponse { faculty }))
}

/// Get a faculty member's profile
#[utoipa::path(
    get,
    path = "/api/admin/faculty/{user_id}/profile",
    params(("user_id" = Uuid, Path, description = "Faculty member's user id")),
    responses(
        (status = 200, description = "Profile", body = FacultyProfileResponse),
        (status = 404, description = "Faculty member not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Faculty"
)]
#[instrument(skip(state))]
pub async fn get_faculty_profile(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<FacultyProfileResponse>, AppError> {
    let profile = FacultyService::get_profile(&state.db, user_id).await?;
    Ok(Json(FacultyProfileResponse { profile }))
}

/// Update a faculty member's profile
#[utoipa::path(
    patch,
    path = "/api/admin/faculty/{user_id}/profile",
    params(("user_id" = Uuid, Path, description = "Faculty member's user id")),
    request_body = UpdateFacultyProfileDto,
    responses(
        (status = 200, description = "Updated profile", body = FacultyProfileResponse),
        (status = 400, description = "Invalid employment status"),
        (status = 404, description = "Faculty member not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Faculty"
)]
#[instrument(skip(state, dto))]
pub async fn update_faculty_profile(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateFacultyProfileDto>,
) -> Result<Json<FacultyProfileResponse>, AppError> {
    let profile = FacultyService::update_profile(&state.db, user_id, dto, None).await?;
    Ok(Json(FacultyProfileResponse { profile }))
}

/// Activate or deactivate a faculty account
#[utoipa::path(
    patch,
    path = "/api/admin/faculty/{user_id}/status",
    params(("user_id" = Uuid, Path, description = "Faculty member's user id")),
    request_body = UpdateStatusDto,
    responses(
        (status = 200, description = "Updated account"),
        (status = 404, description = "Faculty member not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Faculty"
)]
#[instrument(skip(state))]
pub async fn update_faculty_status(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateStatusDto>,
) -> Result<Json<User>, AppError> {
    let user = FacultyService::set_status(&state.db, user_id, dto.is_active).await?;
    Ok(Json(user))
}

/// Get the caller's own faculty profile
#[utoipa::path(
    get,
    path = "/api/faculty-profile",
    responses(
        (status = 200, description = "Profile", body = FacultyProfileResponse),
        (status = 401, description = "Missing or invalid token")
    ),
    security(("bearer_auth" = [])),
    tag = "Profile"
)]
#[instrument(skip(state, auth))]
pub async fn get_my_faculty_profile(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<FacultyProfileResponse>, AppError> {
    let profile = FacultyService::ensure_profile(&state.db, auth.user_id()?).await?;
    Ok(Json(FacultyProfileResponse { profile }))
}

/// Update the caller's own faculty profile (JSON or multipart with an image)
#[utoipa::path(
    put,
    path = "/api/faculty-profile",
    responses(
        (status = 200, description = "Updated profile", body = FacultyProfileResponse),
        (status = 400, description = "Bad image or malformed body")
    ),
    security(("bearer_auth" = [])),
    tag = "Profile"
)]
#[instrument(skip(state, auth, req))]
pub async fn update_my_faculty_profile(
    State(state): State<AppState>,
    auth: AuthUser,
    req: Request,
) -> Result<Json<FacultyProfileResponse>, AppError> {
    let user_id = auth.user_id()?;
    let (dto, image_path): (UpdateFacultyProfileDto, _) =
        parse_profile_update(req, &state.upload_config, "faculty", user_id).await?;

    dto.validate()
        .map_err(|e| AppError::unprocessable(e.to_string()))?;

    let profile = FacultyService::update_profile(&state.db, user_id, dto, image_path).await?;
    Ok(Json(FacultyProfileResponse { profile }))
}
