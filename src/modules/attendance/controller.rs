use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use chrono::NaiveDate;
use serde::Deserialize;
use tracing::instrument;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::modules::attendance::model::{SessionDetail, SessionSummary, UpsertSessionDto};
use crate::modules::attendance::service::AttendanceService;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

#[derive(serde::Serialize, ToSchema)]
pub struct SessionListResponse {
    pub sessions: Vec<SessionSummary>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct SessionListQuery {
    pub course_id: Option<Uuid>,
    pub date: Option<NaiveDate>,
}

/// List attendance sessions
#[utoipa::path(
    get,
    path = "/api/admin/attendance",
    params(SessionListQuery),
    responses(
        (status = 200, description = "Sessions with counts", body = SessionListResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Attendance"
)]
#[instrument(skip(state))]
pub async fn list_sessions(
    State(state): State<AppState>,
    Query(query): Query<SessionListQuery>,
) -> Result<Json<SessionListResponse>, AppError> {
    let sessions =
        AttendanceService::list_sessions(&state.db, query.course_id, query.date).await?;
    Ok(Json(SessionListResponse { sessions }))
}

/// Record or replace a roll call
#[utoipa::path(
    post,
    path = "/api/admin/attendance",
    request_body = UpsertSessionDto,
    responses(
        (status = 200, description = "Session with roll call", body = SessionDetail),
        (status = 400, description = "Invalid course, status or student")
    ),
    security(("bearer_auth" = [])),
    tag = "Attendance"
)]
#[instrument(skip(state, dto))]
pub async fn upsert_session(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<UpsertSessionDto>,
) -> Result<Json<SessionDetail>, AppError> {
    let detail = AttendanceService::upsert_session(&state.db, dto).await?;
    Ok(Json(detail))
}

/// Get one session with its roll call
#[utoipa::path(
    get,
    path = "/api/admin/attendance/{id}",
    params(("id" = Uuid, Path, description = "Session id")),
    responses(
        (status = 200, description = "Session with roll call", body = SessionDetail),
        (status = 404, description = "Session not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Attendance"
)]
#[instrument(skip(state))]
pub async fn get_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionDetail>, AppError> {
    let detail = AttendanceService::get_session(&state.db, id).await?;
    Ok(Json(detail))
}

/// Delete a session
#[utoipa::path(
    delete,
    path = "/api/admin/attendance/{id}",
    params(("id" = Uuid, Path, description = "Session id")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Session not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Attendance"
)]
#[instrument(skip(state))]
pub async fn delete_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    AttendanceService::delete_session(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
