use axum::{
    Json,
    extract::{Path, Request, State},
};
use tracing::instrument;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::middleware::auth::AuthUser;
use crate::modules::students::model::{StudentProfile, StudentWithProfile, UpdateStudentProfileDto};
use crate::modules::students::service::StudentService;
use crate::modules::users::model::{UpdateStatusDto, User};
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::uploads::parse_profile_update;
use crate::validator::ValidatedJson;

#[derive(serde::Serialize, ToSchema)]
pub struct ProfileResponse {
    pub profile: StudentProfile,
}

#[derive(serde::Serialize, ToSchema)]
pub struct StudentListResponse {
    pub students: Vec<StudentWithProfile>,
}

/// List all students
#[utoipa::path(
    get,
    path = "/api/admin/students",
    responses(
        (status = 200, description = "Students with profiles", body = StudentListResponse),
        (status = 403, description = "Forbidden - admin only")
    ),
    security(("bearer_auth" = [])),
    tag = "Students"
)]
#[instrument(skip(state))]
pub async fn list_students(
    State(state): State<AppState>,
) -> Result<Json<StudentListResponse>, AppError> {
    let students = StudentService::list_students(&state.db).await?;
    Ok(Json(StudentListResponse { students }))
}

/// Get a student's profile
#[utoipa::path(
    get,
    path = "/api/admin/students/{user_id}/profile",
    params(("user_id" = Uuid, Path, description = "Student's user id")),
    responses(
        (status = 200, description = "Profile", body = ProfileResponse),
        (status = 404, description = "Student not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Students"
)]
#[instrument(skip(state))]
pub async fn get_student_profile(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<ProfileResponse>, AppError> {
    let profile = StudentService::get_profile(&state.db, user_id).await?;
    Ok(Json(ProfileResponse { profile }))
}

/// Update a student's profile
#[utoipa::path(
    patch,
    path = "/api/admin/students/{user_id}/profile",
    params(("user_id" = Uuid, Path, description = "Student's user id")),
    request_body = UpdateStudentProfileDto,
    responses(
        (status = 200, description = "Updated profile", body = ProfileResponse),
        (status = 404, description = "Student not found"),
        (status = 409, description = "Student ID already in use")
    ),
    security(("bearer_auth" = [])),
    tag = "Students"
)]
#[instrument(skip(state, dto))]
pub async fn update_student_profile(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateStudentProfileDto>,
) -> Result<Json<ProfileResponse>, AppError> {
    let profile = StudentService::update_profile(&state.db, user_id, dto, None).await?;
    Ok(Json(ProfileResponse { profile }))
}

/// Activate or deactivate a student account
#[utoipa::path(
    patch,
    path = "/api/admin/students/{user_id}/status",
    params(("user_id" = Uuid, Path, description = "Student's user id")),
    request_body = UpdateStatusDto,
    responses(
        (status = 200, description = "Updated account"),
        (status = 404, description = "Student not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Students"
)]
#[instrument(skip(state))]
pub async fn update_student_status(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateStatusDto>,
) -> Result<Json<User>, AppError> {
    let user = StudentService::set_status(&state.db, user_id, dto.is_active).await?;
    Ok(Json(user))
}

/// Get the caller's own profile
#[utoipa::path(
    get,
    path = "/api/profile",
    responses(
        (status = 200, description = "Profile", body = ProfileResponse),
        (status = 401, description = "Missing or invalid token")
    ),
    security(("bearer_auth" = [])),
    tag = "Profile"
)]
#[instrument(skip(state, auth))]
pub async fn get_my_profile(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ProfileResponse>, AppError> {
    let profile = StudentService::ensure_profile(&state.db, auth.user_id()?).await?;
    Ok(Json(ProfileResponse { profile }))
}

/// Update the caller's own profile (JSON or multipart with an image)
#[utoipa::path(
    put,
    path = "/api/profile",
    responses(
        (status = 200, description = "Updated profile", body = ProfileResponse),
        (status = 400, description = "Bad image or malformed body"),
        (status = 409, description = "Student ID already in use")
    ),
    security(("bearer_auth" = [])),
    tag = "Profile"
)]
#[instrument(skip(state, auth, req))]
pub async fn update_my_profile(
    State(state): State<AppState>,
    auth: AuthUser,
    req: Request,
) -> Result<Json<ProfileResponse>, AppError> {
    let user_id = auth.user_id()?;
    let (dto, image_path): (UpdateStudentProfileDto, _) =
        parse_profile_update(req, &state.upload_config, "profile", user_id).await?;

    dto.validate()
        .map_err(|e| AppError::unprocessable(e.to_string()))?;

    let profile = StudentService::update_profile(&state.db, user_id, dto, image_path).await?;
    Ok(Json(ProfileResponse { profile }))
}
