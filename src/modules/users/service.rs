use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::modules::users::model::{User, UserRole};
use crate::utils::errors::AppError;

const USER_COLUMNS: &str = "id, name, email, role, is_active, created_at, updated_at";

pub struct UserService;

impl UserService {
    #[instrument(skip(db))]
    pub async fn get_user(db: &PgPool, user_id: Uuid) -> Result<User, AppError> {
        sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(user_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found("User not found"))
    }

    /// Admin-only role change; the only path that mutates a role.
    #[instrument(skip(db))]
    pub async fn update_role(db: &PgPool, user_id: Uuid, role: UserRole) -> Result<User, AppError> {
        sqlx::query_as::<_, User>(&format!(
            "UPDATE users SET role = $2, updated_at = NOW() WHERE id = $1
             RETURNING {USER_COLUMNS}"
        ))
        .bind(user_id)
        .bind(role.as_str())
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found("User not found"))
    }

    /// Toggle activation. Deactivation is the deletion substitute: the row
    /// stays, logins fail and the auth gate rejects existing tokens.
    #[instrument(skip(db))]
    pub async fn set_status(db: &PgPool, user_id: Uuid, is_active: bool) -> Result<User, AppError> {
        sqlx::query_as::<_, User>(&format!(
            "UPDATE users SET is_active = $2, updated_at = NOW() WHERE id = $1
             RETURNING {USER_COLUMNS}"
        ))
        .bind(user_id)
        .bind(is_active)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found("User not found"))
    }
}
