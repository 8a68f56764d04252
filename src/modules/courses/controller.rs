use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;
use tracing::instrument;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::middleware::auth::AuthUser;
use crate::modules::courses::model::{Course, CourseWithFaculty, CreateCourseDto, UpdateCourseDto};
use crate::modules::courses::service::CourseService;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

#[derive(serde::Serialize, ToSchema)]
pub struct CourseListResponse {
    pub courses: Vec<CourseWithFaculty>,
}

#[derive(serde::Serialize, ToSchema)]
pub struct MyCoursesResponse {
    pub courses: Vec<Course>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct CourseListQuery {
    /// Restrict to one department.
    pub department: Option<String>,
}

/// Create a course
#[utoipa::path(
    post,
    path = "/api/admin/courses",
    request_body = CreateCourseDto,
    responses(
        (status = 201, description = "Course created", body = Course),
        (status = 400, description = "Invalid section or non-faculty assignee"),
        (status = 409, description = "Course code already exists")
    ),
    security(("bearer_auth" = [])),
    tag = "Courses"
)]
#[instrument(skip(state, dto))]
pub async fn create_course(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateCourseDto>,
) -> Result<(StatusCode, Json<Course>), AppError> {
    let course = CourseService::create_course(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(course)))
}

/// List courses
#[utoipa::path(
    get,
    path = "/api/admin/courses",
    params(CourseListQuery),
    responses(
        (status = 200, description = "Courses with instructors", body = CourseListResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Courses"
)]
#[instrument(skip(state))]
pub async fn list_courses(
    State(state): State<AppState>,
    Query(query): Query<CourseListQuery>,
) -> Result<Json<CourseListResponse>, AppError> {
    let courses = CourseService::list_courses(&state.db, query.department).await?;
    Ok(Json(CourseListResponse { courses }))
}

/// Get one course
#[utoipa::path(
    get,
    path = "/api/admin/courses/{id}",
    params(("id" = Uuid, Path, description = "Course id")),
    responses(
        (status = 200, description = "Course", body = Course),
        (status = 404, description = "Course not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Courses"
)]
#[instrument(skip(state))]
pub async fn get_course(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Course>, AppError> {
    let course = CourseService::get_course(&state.db, id).await?;
    Ok(Json(course))
}

/// Update a course
#[utoipa::path(
    patch,
    path = "/api/admin/courses/{id}",
    params(("id" = Uuid, Path, description = "Course id")),
    request_body = UpdateCourseDto,
    responses(
        (status = 200, description = "Updated course", body = Course),
        (status = 400, description = "Invalid section or non-faculty assignee"),
        (status = 404, description = "Course not found"),
        (status = 409, description = "Course code already exists")
    ),
    security(("bearer_auth" = [])),
    tag = "Courses"
)]
#[instrument(skip(state, dto))]
pub async fn update_course(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateCourseDto>,
) -> Result<Json<Course>, AppError> {
    let course = CourseService::update_course(&state.db, id, dto).await?;
    Ok(Json(course))
}

/// Delete a course
#[utoipa::path(
    delete,
    path = "/api/admin/courses/{id}",
    params(("id" = Uuid, Path, description = "Course id")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Course not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Courses"
)]
#[instrument(skip(state))]
pub async fn delete_course(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    CourseService::delete_course(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Courses assigned to the calling faculty member
#[utoipa::path(
    get,
    path = "/api/faculty/courses",
    responses(
        (status = 200, description = "Assigned courses", body = MyCoursesResponse),
        (status = 403, description = "Forbidden - faculty only")
    ),
    security(("bearer_auth" = [])),
    tag = "Courses"
)]
#[instrument(skip(state, auth))]
pub async fn my_courses(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<MyCoursesResponse>, AppError> {
    let courses = CourseService::faculty_courses(&state.db, auth.user_id()?).await?;
    Ok(Json(MyCoursesResponse { courses }))
}
