use axum::{
    Json,
    extract::{Path, State},
};
use tracing::instrument;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::modules::users::model::{UpdateRoleDto, User};
use crate::modules::users::service::UserService;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

#[derive(serde::Serialize, ToSchema)]
pub struct UserResponse {
    pub user: User,
}

/// Change a user's role
#[utoipa::path(
    patch,
    path = "/api/users/{id}/role",
    params(("id" = Uuid, Path, description = "User id")),
    request_body = UpdateRoleDto,
    responses(
        (status = 200, description = "Role updated", body = UserResponse),
        (status = 400, description = "Invalid role"),
        (status = 403, description = "Forbidden - admin only"),
        (status = 404, description = "User not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
#[instrument(skip(state))]
pub async fn update_user_role(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateRoleDto>,
) -> Result<Json<UserResponse>, AppError> {
    let user = UserService::update_role(&state.db, id, dto.role).await?;
    Ok(Json(UserResponse { user }))
}
