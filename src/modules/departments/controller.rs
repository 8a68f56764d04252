use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;
use tracing::instrument;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::modules::departments::model::{
    CreateDepartmentDto, Department, UpdateDepartmentDto,
};
use crate::modules::departments::service::DepartmentService;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

#[derive(serde::Serialize, ToSchema)]
pub struct DepartmentListResponse {
    pub departments: Vec<Department>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct DepartmentListQuery {
    /// Case-insensitive substring match against code or name.
    pub q: Option<String>,
}

/// Create a department
#[utoipa::path(
    post,
    path = "/api/admin/departments",
    request_body = CreateDepartmentDto,
    responses(
        (status = 201, description = "Department created", body = Department),
        (status = 409, description = "Department code already exists")
    ),
    security(("bearer_auth" = [])),
    tag = "Departments"
)]
#[instrument(skip(state, dto))]
pub async fn create_department(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateDepartmentDto>,
) -> Result<(StatusCode, Json<Department>), AppError> {
    let department = DepartmentService::create_department(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(department)))
}

/// List departments
#[utoipa::path(
    get,
    path = "/api/admin/departments",
    params(DepartmentListQuery),
    responses(
        (status = 200, description = "Departments", body = DepartmentListResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Departments"
)]
#[instrument(skip(state))]
pub async fn list_departments(
    State(state): State<AppState>,
    Query(query): Query<DepartmentListQuery>,
) -> Result<Json<DepartmentListResponse>, AppError> {
    let departments = DepartmentService::list_departments(&state.db, query.q).await?;
    Ok(Json(DepartmentListResponse { departments }))
}

/// Get one department
#[utoipa::path(
    get,
    path = "/api/admin/departments/{id}",
    params(("id" = Uuid, Path, description = "Department id")),
    responses(
        (status = 200, description = "Department", body = Department),
        (status = 404, description = "Department not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Departments"
)]
#[instrument(skip(state))]
pub async fn get_department(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Department>, AppError> {
    let department = DepartmentService::get_department(&state.db, id).await?;
    Ok(Json(department))
}

/// Update a department
#[utoipa::path(
    patch,
    path = "/api/admin/departments/{id}",
    params(("id" = Uuid, Path, description = "Department id")),
    request_body = UpdateDepartmentDto,
    responses(
        (status = 200, description = "Updated department", body = Department),
        (status = 404, description = "Department not found"),
        (status = 409, description = "Department code already exists")
    ),
    security(("bearer_auth" = [])),
    tag = "Departments"
)]
#[instrument(skip(state, dto))]
pub async fn update_department(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateDepartmentDto>,
) -> Result<Json<Department>, AppError> {
    let department = DepartmentService::update_department(&state.db, id, dto).await?;
    Ok(Json(department))
}

/// Delete a department
#[utoipa::path(
    delete,
    path = "/api/admin/departments/{id}",
    params(("id" = Uuid, Path, description = "Department id")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Department not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Departments"
)]
#[instrument(skip(state))]
pub async fn delete_department(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    DepartmentService::delete_department(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
